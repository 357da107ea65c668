mod helpers;

use std::thread;

use relplate::{Engine, Object};

use crate::helpers::federate;

#[test]
fn engine_debug() {
    format!("{:?}", Engine::new());
}

#[test]
fn engine_send_and_sync() {
    let engine = Engine::new();
    thread::spawn(move || {
        let result = engine
            .compile("{federate.classname}")
            .unwrap()
            .render("federate", &federate())
            .unwrap();
        assert_eq!(result, "Federate");
    })
    .join()
    .unwrap();
}

#[test]
fn engine_compile_non_static_source() -> relplate::Result<()> {
    let engine = Engine::new();
    let source = String::from("{federate.classname}");
    let result = engine.compile(&source)?.render("federate", &federate())?;
    assert_eq!(result, "Federate");
    Ok(())
}

#[test]
fn engine_add_template_non_static_source() -> relplate::Result<()> {
    let mut engine = Engine::new();
    let source = String::from("case {interaction.handlename}:\n");
    engine.add_template("switch", &source)?;
    let result = engine
        .get_template("switch")
        .unwrap()
        .render("federate", &federate())?;
    assert_eq!(result, "case loadScenarioHandle:\ncase startHandle:\n");
    Ok(())
}

#[test]
fn engine_get_template_missing() {
    assert!(Engine::new().get_template("missing").is_none());
}

#[test]
fn engine_template_source() -> relplate::Result<()> {
    let engine = Engine::new();
    let template = engine.compile("{federate.classname}\n")?;
    assert_eq!(template.source(), "{federate.classname}\n");

    let template = engine.compile_lines(["{$interactions}", "{interaction.varname}", "{interactions$}"])?;
    assert_eq!(template.source(), "{$interactions}\n{interaction.varname}\n{interactions$}");
    Ok(())
}

#[test]
fn engine_render_with_other_root_name() -> relplate::Result<()> {
    let root = Object::new().with_value("name", "Lunar");
    let result = Engine::new()
        .compile("mission {mission.name}")?
        .render("mission", &root)?;
    assert_eq!(result, "mission Lunar");
    Ok(())
}

#[test]
fn engine_custom_syntax() -> relplate::Result<()> {
    let syntax = relplate::Syntax::builder()
        .placeholder("<<", ">>")
        .loop_marker("@")
        .build();
    let result = Engine::with_syntax(syntax)
        .compile("<<@interactions>>\nvoid <<interaction.varname>>() {}\n<<interactions@>>\n")?
        .render("federate", &federate())?;
    assert_eq!(result, "void loadScenario() {}\nvoid start() {}\n");
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn engine_render_from() -> relplate::Result<()> {
    #[derive(serde::Serialize)]
    struct Interaction {
        varname: &'static str,
        parameters: Vec<Parameter>,
    }

    #[derive(serde::Serialize)]
    struct Parameter {
        varname: &'static str,
    }

    #[derive(serde::Serialize)]
    struct Federate {
        classname: &'static str,
        interactions: Vec<Interaction>,
    }

    let root = Federate {
        classname: "Federate",
        interactions: vec![
            Interaction {
                varname: "loadScenario",
                parameters: vec![Parameter { varname: "scenarioName" }],
            },
            Interaction {
                varname: "start",
                parameters: vec![],
            },
        ],
    };
    let result = Engine::new()
        .compile("{federate.classname}\n{interaction.varname}:\n  {parameter.varname}\n")?
        .render_from("federate", &root)?;
    assert_eq!(result, "Federate\nloadScenario:\n  scenarioName\n\nstart:\n");
    Ok(())
}
