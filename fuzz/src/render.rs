#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde::Serialize;

#[derive(Debug, Serialize, Arbitrary)]
enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fuzz_target!(|data: (&str, &str, BTreeMap<String, Value>)| {
    let (source, name, root) = data;
    let engine = relplate::Engine::new();
    let Ok(template) = engine.compile(source) else {
        return;
    };
    if let Ok(root) = relplate::to_object(&root) {
        let _ = template.render(name, &root);
    }
});
