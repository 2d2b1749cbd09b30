use serde_json::json;

use cloudstack_gen::model::NormalizedType;
use cloudstack_gen::{
    CompiledModel, EventMap, Field, Generator, GeneratorConfig, SchemaCompiler, StaticSource,
};

fn compile(apis: serde_json::Value, config: &GeneratorConfig, events: &EventMap) -> CompiledModel {
    let source = StaticSource::new("test", apis, serde_json::Value::Null);
    Generator::new(config.clone()).compile(&source, events).unwrap()
}

fn names(fields: &cloudstack_gen::VariableContainer) -> Vec<&str> {
    fields.names()
}

#[test]
fn list_api_end_to_end() {
    let model = compile(
        json!([{
            "name": "listFoo",
            "isasync": false,
            "params": [{"name": "id", "type": "uuid", "required": true}],
            "response": [{"name": "id", "type": "uuid"}, {"name": "created", "type": "date"}]
        }]),
        &GeneratorConfig::default(),
        &EventMap::default(),
    );

    let api = model.api("listFoo").unwrap();
    assert_eq!(api.name, "listFoo");
    assert!(!api.is_async);
    assert!(api.event_type.is_none());

    let required = api.parameters.required();
    assert_eq!(required.len(), 1);
    let id = required[0].as_scalar().unwrap();
    assert_eq!(id.name(), "id");
    assert_eq!(id.normalized_type(), NormalizedType::String);

    let response = &api.response;
    assert!(!response.is_shared());
    assert_eq!(names(response.properties()), vec!["created", "id"]);

    let created = response.properties().get("created").and_then(Field::as_scalar).unwrap();
    assert!(created.is_date());
    assert_eq!(created.normalized_type(), NormalizedType::DateTime);

    let id = response.properties().get("id").and_then(Field::as_scalar).unwrap();
    assert_eq!(id.normalized_type(), NormalizedType::String);

    assert!(model.warnings.is_empty());
}

#[test]
fn shared_object_collects_union_of_shapes() {
    let model = compile(
        json!([
            {
                "name": "listVirtualMachines",
                "response": [{
                    "name": "nic",
                    "type": "set",
                    "response": [
                        {"name": "a", "type": "string"},
                        {"name": "b", "type": "string", "description": "first"}
                    ]
                }]
            },
            {
                "name": "deployVirtualMachine",
                "isasync": true,
                "response": [{
                    "name": "nic",
                    "type": "set",
                    "response": [
                        {"name": "b", "type": "integer", "description": "second"},
                        {"name": "c", "type": "string"}
                    ]
                }]
            }
        ]),
        &GeneratorConfig::default(),
        &EventMap::from_iter([("deployVirtualMachine", "VM.CREATE")]),
    );

    assert_eq!(model.shared_objects.len(), 1);

    let list_ref = model.api("listVirtualMachines").unwrap().response.properties().get("nic").unwrap();
    let deploy_ref = model.api("deployVirtualMachine").unwrap().response.properties().get("nic").unwrap();
    assert_eq!(list_ref.as_object(), deploy_ref.as_object());

    let nic = model.resolve(list_ref.as_object().unwrap()).unwrap();
    assert!(nic.is_shared());
    assert_eq!(names(nic.properties()), vec!["a", "b", "c"]);

    let b = nic.properties().get("b").and_then(Field::as_scalar).unwrap();
    assert_eq!(b.description(), "first");
    assert_eq!(b.typ(), "string");
}

#[test]
fn overload_replaces_every_identity_value() {
    let config = GeneratorConfig::from_yaml_str(
        "namespace: Acme\n\
         overloads:\n  \
           - name: Nic\n    \
             overload: \\Acme\\Models\\Nic\n    \
             swagger: AcmeNic\n",
    )
    .unwrap();

    let model = compile(
        json!([{
            "name": "listNics",
            "response": [
                {"name": "nic", "type": "list", "response": [{"name": "id"}]},
                {"name": "tags", "type": "list", "response": [{"name": "key"}]}
            ]
        }]),
        &config,
        &EventMap::default(),
    );

    let nic = model.shared_objects.get_by_name("nic").unwrap();
    assert_eq!(nic.class_name(), "Nic");
    assert_eq!(nic.fq_name(), "\\Acme\\Models\\Nic");
    assert_eq!(nic.swagger_name(), "AcmeNic");
    assert!(nic.identity().overloaded);

    let tags = model.shared_objects.get_by_name("tags").unwrap();
    assert_eq!(tags.class_name(), "Tags");
    assert_eq!(tags.fq_name(), "\\Acme\\CloudStackResponse\\Tags");
    assert_eq!(tags.swagger_name(), "CloudStackTags");
    assert!(!tags.identity().overloaded);

    let response = &model.api("listNics").unwrap().response;
    assert_eq!(response.class_name(), "ListNicsResponse");
}

#[test]
fn malformed_fields_are_skipped() {
    let model = compile(
        json!([
            {
                "name": "createTags",
                "params": [
                    {"type": "string", "description": "no name"},
                    {"name": "   "},
                    "not an object",
                    {"name": "resourceids", "type": "list", "required": "true"}
                ],
                "response": [{"description": "nameless"}, {"name": "success", "type": "boolean"}]
            },
            {"description": "nameless API"}
        ]),
        &GeneratorConfig::default(),
        &EventMap::default(),
    );

    assert_eq!(model.apis.len(), 1);
    let api = model.api("createTags").unwrap();
    assert_eq!(names(&api.parameters), vec!["resourceids"]);
    assert!(api.parameters.get("resourceids").unwrap().is_required());
    assert_eq!(names(api.response.properties()), vec!["success"]);
}

#[test]
fn async_api_without_event_warns_once() {
    let model = compile(
        json!([
            {"name": "destroyRouter", "isasync": true},
            {"name": "startRouter", "isasync": "true"},
            {"name": "listRouters", "isasync": false}
        ]),
        &GeneratorConfig::default(),
        &EventMap::from_iter([("startRouter", "ROUTER.START")]),
    );

    assert_eq!(model.apis.len(), 3);
    assert!(model.api("destroyRouter").unwrap().event_type.is_none());
    assert_eq!(model.api("startRouter").unwrap().event_type.as_deref(), Some("ROUTER.START"));

    assert_eq!(model.warnings.len(), 1);
    assert_eq!(
        model.warnings[0].to_string(),
        "No async event present in map for destroyRouter"
    );
}

#[test]
fn fresh_compilers_produce_identical_models() {
    let raw: Vec<cloudstack_gen::RawApi> = serde_json::from_value(json!([
        {"name": "listZones", "params": [{"name": "page"}, {"name": "pagesize"}, {"name": "id"}],
         "response": [{"name": "capacity", "type": "list", "response": [{"name": "total", "type": "long"}]}]},
        {"name": "listPods",
         "response": [{"name": "capacity", "type": "list", "response": [{"name": "used", "type": "long"}]}]}
    ]))
    .unwrap();
    let config = GeneratorConfig::default();
    let events = EventMap::default();

    let first = SchemaCompiler::new(&config, &events).compile_all(&raw);
    let second = SchemaCompiler::new(&config, &events).compile_all(&raw);

    assert_eq!(first.apis, second.apis);
    let first_objects: Vec<_> = first.shared_objects.iter().collect();
    let second_objects: Vec<_> = second.shared_objects.iter().collect();
    assert_eq!(first_objects, second_objects);

    let zones = first.api("listZones").unwrap();
    assert!(zones.is_pageable());
    assert!(zones.is_list());
    assert_eq!(names(&zones.parameters), vec!["id", "page", "pagesize"]);

    let capacity = first.shared_objects.get_by_name("capacity").unwrap();
    assert_eq!(names(capacity.properties()), vec!["total", "used"]);
}

#[test]
fn apis_are_in_natural_name_order() {
    let model = compile(
        json!([
            {"name": "listVlan10"},
            {"name": "listVlan2"},
            {"name": "addNic"},
            {"name": "listVlan1"},
            {"name": "Zone"}
        ]),
        &GeneratorConfig::default(),
        &EventMap::default(),
    );

    let names: Vec<&str> = model.apis.iter().map(|api| api.name.as_str()).collect();
    assert_eq!(names, ["Zone", "addNic", "listVlan1", "listVlan2", "listVlan10"]);
}

#[test]
fn malformed_api_entries_do_not_fail_the_document() {
    let model = compile(
        json!({"listapisresponse": {"api": [
            null,
            {"name": null, "isasync": true},
            {"name": "listZones", "params": [{"name": "id"}]},
            ["not", "an", "api"],
            {"name": "listPods"}
        ]}}),
        &GeneratorConfig::default(),
        &EventMap::default(),
    );

    let names: Vec<&str> = model.apis.iter().map(|api| api.name.as_str()).collect();
    assert_eq!(names, ["listPods", "listZones"]);
    assert!(model.warnings.is_empty());
}
