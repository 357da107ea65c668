#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, Vec<&str>)| {
    let (source, lines) = data;
    let mut engine = relplate::Engine::new();
    let _ = engine.add_template("fuzz", source);
    let _ = engine.compile_lines(lines);
});
