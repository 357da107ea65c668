mod helpers;

use relplate::{Engine, ErrorKind, Object};

use crate::helpers::federate;

#[test]
fn render_raw() {
    let result = Engine::new()
        .compile("virtual ~Federate() {};\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "virtual ~Federate() {};\n");
}

#[test]
fn render_empty() {
    let result = Engine::new()
        .compile("")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "");
}

#[test]
fn render_placeholder() {
    let result = Engine::new()
        .compile("class {federate.classname} {\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "class Federate {\n");
}

#[test]
fn render_placeholder_integer() {
    let result = Engine::new()
        .compile("const int VERSION = {federate.version};")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "const int VERSION = 3;");
}

#[test]
fn render_placeholder_bool() {
    let root = Object::new().with_value("enabled", true);
    let result = Engine::new()
        .compile("{federate.enabled}")
        .unwrap()
        .render("federate", &root)
        .unwrap();
    assert_eq!(result, "true");
}

#[test]
fn render_placeholder_nested_object() {
    let result = Engine::new()
        .compile("load(\"{federate.fom.filename}\");")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "load(\"RPR-FOM.xml\");");
}

#[test]
fn render_placeholder_discovers_attribute() {
    let result = Engine::new()
        .compile("load(\"{fom.filename}\");")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "load(\"RPR-FOM.xml\");");
}

#[test]
fn render_brace_text_passes_through() {
    let result = Engine::new()
        .compile("void {federate.classname}::run() { {federate.classname}(); }\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "void Federate::run() { Federate(); }\n");
}

#[test]
fn render_implicit_loop() {
    let result = Engine::new()
        .compile("case {interaction.handlename}:\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "case loadScenarioHandle:\ncase startHandle:\n");
}

#[test]
fn render_implicit_loop_through_nested_relation() {
    let result = Engine::new()
        .compile("{parameter.varname}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "scenarioName\ninitialFuelAmount\ntimeScaleFactor\n");
}

#[test]
fn render_implicit_group() {
    let result = Engine::new()
        .compile("  {interaction.varname}:\n    {parameter.datatype} {parameter.varname};\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "  loadScenario:\n    String scenarioName;\n    Integer initialFuelAmount;\n\n  start:\n    Float timeScaleFactor;\n"
    );
}

#[test]
fn render_implicit_group_custom_separator() {
    let mut engine = Engine::new();
    engine.set_separator("// --\n");
    let result = engine
        .compile("{interaction.varname}:\n    {parameter.varname}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "loadScenario:\n    scenarioName\n    initialFuelAmount\n// --\nstart:\n    timeScaleFactor\n"
    );
}

#[test]
fn render_implicit_loops_on_one_line() {
    let result = Engine::new()
        .compile("{interaction.varname}({parameter.datatype} {parameter.varname})\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "loadScenario(String scenarioName)\nloadScenario(Integer initialFuelAmount)\nstart(Float timeScaleFactor)\n"
    );
}

#[test]
fn render_implicit_group_stops_at_raw_line() {
    let result = Engine::new()
        .compile("{interaction.varname}\n// parameters\n{parameter.varname}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "loadScenario\nstart\n// parameters\nscenarioName\ninitialFuelAmount\ntimeScaleFactor\n"
    );
}

#[test]
fn render_implicit_group_stops_at_bound_line() {
    let result = Engine::new()
        .compile("{interaction.varname}\n{federate.classname}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "loadScenario\nstart\nFederate\n");
}

#[test]
fn render_implicit_loop_empty_relation() {
    let root = Object::new()
        .with_value("classname", "Federate")
        .with_relation("interactions", []);
    let result = Engine::new()
        .compile("class {federate.classname}\ncase {interaction.varname}:\n};\n")
        .unwrap()
        .render("federate", &root)
        .unwrap();
    assert_eq!(result, "class Federate\n};\n");
}

#[test]
fn render_implicit_group_empty_relation() {
    let root = Object::new()
        .with_value("classname", "Federate")
        .with_relation("interactions", []);
    let result = Engine::new()
        .compile("class {federate.classname}\n{interaction.varname}\n{parameter.varname}\n};\n")
        .unwrap()
        .render("federate", &root)
        .unwrap();
    assert_eq!(result, "class Federate\n};\n");
}

#[test]
fn render_implicit_group_err_unresolved_after_elements() {
    let err = Engine::new()
        .compile("{interaction.varname}\n{field.varname}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedName);
    assert_eq!(
        err.to_string(),
        "cannot resolve `field`, no bound object exposes `fields` or `field` between bytes 23 and 28"
    );
}

#[test]
fn render_explicit_loop() {
    let result = Engine::new()
        .compile("switch (handle) {\n{$interactions}\n  case {interaction.handlename}:\n    break;\n{interactions$}\n}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "switch (handle) {\n  case loadScenarioHandle:\n    break;\n  case startHandle:\n    break;\n}\n"
    );
}

#[test]
fn render_explicit_loop_nested() {
    let result = Engine::new()
        .compile("{$interactions}\n{$parameters}\n{interaction.varname}.{parameter.varname}\n{parameters$}\n{interactions$}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "loadScenario.scenarioName\nloadScenario.initialFuelAmount\nstart.timeScaleFactor\n"
    );
}

#[test]
fn render_explicit_loop_discovers_relation() {
    let result = Engine::new()
        .compile("{$parameters}\n{parameter.varname}\n{parameters$}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(result, "scenarioName\ninitialFuelAmount\ntimeScaleFactor\n");
}

#[test]
fn render_explicit_loop_prefers_innermost_binding() {
    let field = |varname: &str| Object::new().with_value("varname", varname);
    let root = Object::new().with_relation(
        "interactions",
        [
            Object::new().with_value("varname", "start").with_relation(
                "parameters",
                [
                    Object::new().with_relation("fields", [field("a"), field("b")]),
                    Object::new().with_relation("fields", [field("c")]),
                ],
            ),
            Object::new().with_value("varname", "stop").with_relation(
                "parameters",
                [Object::new().with_relation("fields", [field("d")])],
            ),
        ],
    );
    let result = Engine::new()
        .compile("{$interactions}\n{interaction.varname}:\n{field.varname}\n{interactions$}\n")
        .unwrap()
        .render("federate", &root)
        .unwrap();
    assert_eq!(result, "start:\na\nb\nc\nstop:\nd\n");
}

#[test]
fn render_discovery_is_scoped_by_bindings() {
    let lines = Engine::new()
        .compile_lines(["{parameter.varname}", "{$interactions}", "-{parameter.varname}", "{interactions$}"])
        .unwrap()
        .render_lines("federate", &federate())
        .unwrap();
    assert_eq!(
        lines,
        [
            "scenarioName",
            "initialFuelAmount",
            "timeScaleFactor",
            "-scenarioName",
            "-initialFuelAmount",
            "-timeScaleFactor",
        ]
    );
}

#[test]
fn render_explicit_loop_with_implicit_group_inside() {
    let result = Engine::new()
        .compile("{$interactions}\nvoid {interaction.varname}(\n  {parameter.varname},\n);\n{interactions$}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap();
    assert_eq!(
        result,
        "void loadScenario(\n  scenarioName,\n  initialFuelAmount,\n);\nvoid start(\n  timeScaleFactor,\n);\n"
    );
}

#[test]
fn render_lines() {
    let lines = Engine::new()
        .compile_lines(["class {federate.classname} {", "{interaction.varname}:", "  {parameter.varname}", "};"])
        .unwrap()
        .render_lines("federate", &federate())
        .unwrap();
    assert_eq!(
        lines,
        [
            "class Federate {",
            "loadScenario:",
            "  scenarioName",
            "  initialFuelAmount",
            "\n",
            "start:",
            "  timeScaleFactor",
            "};",
        ]
    );
}

#[test]
fn render_lines_from_text() {
    let lines = Engine::new()
        .compile("{interaction.varname}\n")
        .unwrap()
        .render_lines("federate", &federate())
        .unwrap();
    assert_eq!(lines, ["loadScenario\n", "start\n"]);
}

#[test]
fn render_err_unresolved_name() {
    let err = Engine::new()
        .compile("{interaction.varname}\n")
        .unwrap()
        .render("federate", &Object::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedName);
    assert_eq!(
        format!("{:#}", err),
        "
   |
 1 | {interaction.varname}
   |  ^^^^^^^^^^^ cannot resolve `interaction`, no bound object exposes `interactions` or `interaction`
"
    );
}

#[test]
fn render_err_unresolved_loop() {
    let err = Engine::new()
        .compile("{$widgets}\n{widget.name}\n{widgets$}\n")
        .unwrap()
        .render("federate", &federate())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedName);
    assert_eq!(
        format!("{:#}", err),
        "
   |
 1 | {$widgets}
   |   ^^^^^^^ cannot resolve `widget`, no bound object exposes `widgets` or `widget`
"
    );
}

#[test]
fn render_err_missing_attribute() {
    let err = Engine::new()
        .compile("{federate.missing}")
        .unwrap()
        .render("federate", &federate())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AttributeResolution);
    assert_eq!(
        format!("{:#}", err),
        "
   |
 1 | {federate.missing}
   |           ^^^^^^^ attribute `missing` not found
"
    );
}

#[test]
fn render_err_attribute_of_value() {
    let err = Engine::new()
        .compile("{federate.classname.x}")
        .unwrap()
        .render("federate", &federate())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AttributeResolution);
    assert_eq!(
        format!("{:#}", err),
        "
   |
 1 | {federate.classname.x}
   |                     ^ cannot access attribute `x` of string
"
    );
}

#[test]
fn render_err_unrenderable_object() {
    let err = Engine::new()
        .compile("static {federate.fom};")
        .unwrap()
        .render("federate", &federate())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Render);
    assert_eq!(
        format!("{:#}", err),
        "
   |
 1 | static {federate.fom};
   |        ^^^^^^^^^^^^^^ expected renderable value, but placeholder evaluated to object
"
    );
}

#[test]
fn render_err_unrenderable() {
    for (source, human) in [
        ("{federate}", "object"),
        ("{federate.interactions}", "relation"),
        ("{federate.tags}", "list"),
    ] {
        let root = federate().with_value("tags", vec!["a", "b"]);
        let err = Engine::new()
            .compile(source)
            .unwrap()
            .render("federate", &root)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "expected renderable value, but placeholder evaluated to {human} between bytes 0 and {}",
                source.len()
            )
        );
    }
}

#[test]
fn render_err_ambiguous_relation() {
    let root = Object::new()
        .with_relation("interactions", [Object::new().with_relation("parameters", [Object::new()])])
        .with_relation("objects", [Object::new().with_relation("parameters", [Object::new()])]);
    let err = Engine::new()
        .compile("{parameter.varname}")
        .unwrap()
        .render("federate", &root)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AmbiguousRelation);
    assert_eq!(err.candidates(), ["interactions", "objects"]);
    assert_eq!(
        err.to_string(),
        "relation `parameters` is ambiguous at level 1, found on `interactions`, `objects` between bytes 1 and 10"
    );
}

#[test]
fn render_lines_empty() {
    let lines = Engine::new()
        .compile_lines(Vec::<String>::new())
        .unwrap()
        .render_lines("federate", &federate())
        .unwrap();
    assert!(lines.is_empty());
}

#[test]
fn render_is_deterministic() {
    let engine = Engine::new();
    let template = engine
        .compile("{interaction.varname}\n{parameter.varname}\n{$interactions}\n{interaction.handlename}\n{interactions$}\n")
        .unwrap();
    let root = federate();
    let first = template.render("federate", &root).unwrap();
    let second = template.render("federate", &root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn render_source_file() {
    let interaction = |name: &str, varname: &str, parameters: &[(&str, &str)]| {
        Object::new()
            .with_value("handlename", format!("{varname}Handle"))
            .with_value("literalname", format!("L\"HLAinteractionRoot.{name}\""))
            .with_relation(
                "parameters",
                parameters.iter().map(|(name, varname)| {
                    Object::new()
                        .with_value("handlename", format!("{varname}Handle"))
                        .with_value("literalname", format!("L\"{name}\""))
                }),
            )
    };
    let root = Object::new()
        .with_value("classname", "Federate")
        .with_object(
            "fom",
            Object::new().with_value("filenames_literal", r#"{ L"FuelEconomyBase.xml" }"#),
        )
        .with_relation(
            "interactions",
            [
                interaction(
                    "LoadScenario",
                    "loadScenario",
                    &[("ScenarioName", "scenarioName"), ("InitialFuelAmount", "initialFuelAmount")],
                ),
                interaction("Start", "start", &[("TimeScaleFactor", "timeScaleFactor")]),
            ],
        );

    let result = Engine::new()
        .compile(
            r#"#include "{federate.classname}.h"

{federate.classname}::{federate.classname}()
{
  std::vector<std::wstring> fomURLs({fom.filenames_literal});

  {interaction.handlename} = rti.getInteractionClassHandle({interaction.literalname});
  {parameter.handlename} = rti.getParameterHandle({interaction.handlename}, {parameter.literalname});
}
"#,
        )
        .unwrap()
        .render("federate", &root)
        .unwrap();
    assert_eq!(
        result,
        r#"#include "Federate.h"

Federate::Federate()
{
  std::vector<std::wstring> fomURLs({ L"FuelEconomyBase.xml" });

  loadScenarioHandle = rti.getInteractionClassHandle(L"HLAinteractionRoot.LoadScenario");
  scenarioNameHandle = rti.getParameterHandle(loadScenarioHandle, L"ScenarioName");
  initialFuelAmountHandle = rti.getParameterHandle(loadScenarioHandle, L"InitialFuelAmount");

  startHandle = rti.getInteractionClassHandle(L"HLAinteractionRoot.Start");
  timeScaleFactorHandle = rti.getParameterHandle(startHandle, L"TimeScaleFactor");
}
"#
    );
}
