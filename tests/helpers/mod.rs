#![allow(dead_code)]

use relplate::Object;

/// A federate with two interactions and their parameters.
pub fn federate() -> Object {
    Object::new()
        .with_value("classname", "Federate")
        .with_value("version", 3)
        .with_object("fom", Object::new().with_value("filename", "RPR-FOM.xml"))
        .with_relation(
            "interactions",
            [
                Object::new()
                    .with_value("varname", "loadScenario")
                    .with_value("handlename", "loadScenarioHandle")
                    .with_relation(
                        "parameters",
                        [
                            parameter("scenarioName", "String"),
                            parameter("initialFuelAmount", "Integer"),
                        ],
                    ),
                Object::new()
                    .with_value("varname", "start")
                    .with_value("handlename", "startHandle")
                    .with_relation("parameters", [parameter("timeScaleFactor", "Float")]),
            ],
        )
}

pub fn parameter(varname: &str, datatype: &str) -> Object {
    Object::new()
        .with_value("varname", varname)
        .with_value("datatype", datatype)
}
