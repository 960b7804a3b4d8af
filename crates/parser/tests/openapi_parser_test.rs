//! Integration test for OpenAPI resource inference

use provider_codegen_common::{FieldKind, GeneratorError, PrimitiveType};
use provider_codegen_parser::{parse_document, OpenApiParser};

const WIDGETS: &str = r##"{
    "openapi": "3.0.3",
    "info": {"title": "Widgets", "version": "1.0.0"},
    "paths": {
        "/widgets": {
            "get": {
                "tags": ["widgets"],
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Widget"}}}
                    }
                }
            },
            "post": {
                "requestBody": {
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/WidgetInput"}}}
                },
                "responses": {"201": {"description": "Created"}}
            }
        },
        "/widgets/{id}": {
            "get": {"responses": {"200": {"description": "OK"}}},
            "put": {
                "requestBody": {
                    "content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {"name": {"type": "string"}}
                    }}}
                }
            },
            "delete": {"responses": {"204": {"description": "Deleted"}}}
        },
        "/internalnetworks": {
            "get": {"responses": {"200": {"description": "OK"}}}
        },
        "/tools/whois": {
            "get": {"responses": {"200": {"description": "OK"}}}
        },
        "/orphans/{id}": {
            "get": {"responses": {"200": {"description": "OK"}}},
            "delete": {}
        },
        "/debug/state": {
            "get": {"tags": ["Debug"], "responses": {"200": {"description": "OK"}}}
        },
        "/traces": {
            "post": {"tags": ["DEBUGGING"]}
        },
        "/traces/{id}": {
            "get": {"tags": ["debugging"]},
            "delete": {}
        }
    },
    "components": {
        "schemas": {
            "Widget": {
                "type": "object",
                "properties": {
                    "id": {"type": "string", "readOnly": true},
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "isGlobal": {"type": "boolean"}
                }
            },
            "WidgetInput": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string", "description": "Display name"},
                    "access": {"type": "string", "enum": ["allow", "block"]},
                    "limits": {"type": "object", "additionalProperties": {"type": "integer"}},
                    "rules": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "port": {"type": "integer"},
                                "protocol": {"type": "string", "enum": ["tcp", "udp"]}
                            }
                        }
                    }
                }
            }
        }
    }
}"##;

#[test]
fn test_resources_sorted_by_name() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["internalnetwork", "whois", "widget"]);
}

#[test]
fn test_collection_item_pairing() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    let widget = resources.iter().find(|r| r.name == "widget").unwrap();

    assert_eq!(widget.collection_path, "/widgets");
    assert_eq!(widget.item_path, "/widgets/{id}");
    assert!(widget.has_delete);

    let update = widget.update_schema.as_ref().expect("update schema from PUT");
    assert_eq!(update.len(), 1);
    assert_eq!(update.fields[0].name, "name");
}

#[test]
fn test_unpaired_collection_keeps_empty_item_path() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    let whois = resources.iter().find(|r| r.name == "whois").unwrap();
    assert_eq!(whois.collection_path, "/tools/whois");
    assert!(whois.item_path.is_empty());
    assert!(!whois.has_delete);
    assert!(whois.update_schema.is_none());
}

#[test]
fn test_orphan_item_paths_are_dropped() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    assert!(resources.iter().all(|r| r.name != "orphan"));
    assert!(resources.iter().all(|r| !r.item_path.starts_with("/orphans")));
}

#[test]
fn test_debug_paths_are_excluded() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    assert!(resources.iter().all(|r| r.name != "state"));
    assert!(resources.iter().all(|r| r.name != "trace"));
}

#[test]
fn test_debug_item_path_is_not_paired() {
    let json = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Gadgets", "version": "1.0.0"},
        "paths": {
            "/gadgets": {
                "post": {
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {"label": {"type": "string"}}
                        }}}
                    }
                }
            },
            "/gadgets/{id}": {
                "get": {"tags": ["debug"], "responses": {"200": {"description": "OK"}}},
                "put": {
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {"label": {"type": "string"}}
                        }}}
                    }
                },
                "delete": {}
            }
        }
    }"#;

    let resources = parse_document(json.as_bytes()).unwrap();
    assert_eq!(resources.len(), 1);

    let gadget = &resources[0];
    assert_eq!(gadget.name, "gadget");
    assert!(gadget.create_schema.is_some());
    assert_eq!(gadget.item_path, "");
    assert!(!gadget.has_delete);
    assert!(gadget.update_schema.is_none());
}

#[test]
fn test_read_schema_flattening() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    let widget = resources.iter().find(|r| r.name == "widget").unwrap();
    let read = widget.read_schema.as_ref().unwrap();

    assert_eq!(read.len(), 3);
    assert_eq!(read.fields[0].kind, FieldKind::Primitive(PrimitiveType::String));
    assert!(read.fields[0].read_only);
    assert_eq!(read.fields[1].kind, FieldKind::List(PrimitiveType::String));
    assert_eq!(read.fields[2].kind, FieldKind::Primitive(PrimitiveType::Bool));
    assert_eq!(read.fields[2].name, "is_global");
    assert_eq!(read.fields[2].source_name, "isGlobal");
}

#[test]
fn test_create_schema_flattening() {
    let resources = parse_document(WIDGETS.as_bytes()).unwrap();
    let widget = resources.iter().find(|r| r.name == "widget").unwrap();
    let create = widget.create_schema.as_ref().unwrap();

    let name = create.field("name").unwrap();
    assert!(name.required);
    assert_eq!(name.description.as_deref(), Some("Display name"));

    let access = create.field("access").unwrap();
    assert!(!access.required);
    assert_eq!(access.enum_values, vec!["allow", "block"]);

    assert_eq!(
        create.field("limits").unwrap().kind,
        FieldKind::Map(PrimitiveType::Int)
    );

    let rules = create.field("rules").unwrap();
    assert!(rules.kind.is_list_of_object());
    let nested = rules.kind.nested().unwrap();
    assert_eq!(nested.fields[1].enum_values, vec!["tcp", "udp"]);
}

#[test]
fn test_parsing_is_idempotent() {
    let first = parse_document(WIDGETS.as_bytes()).unwrap();
    let second = parse_document(WIDGETS.as_bytes()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_yaml_document() {
    let yaml = r#"
openapi: 3.0.3
info:
  title: Profiles
  version: "1"
paths:
  /profiles:
    post:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                blockPage:
                  type: boolean
                name:
                  type: string
  /profiles/{profileId}:
    patch:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                name:
                  type: string
    delete: {}
"#;

    let resources = OpenApiParser::from_slice(yaml.as_bytes())
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(resources.len(), 1);

    let profile = &resources[0];
    assert_eq!(profile.name, "profile");
    assert_eq!(profile.item_path, "/profiles/{profileId}");
    assert!(profile.has_delete);

    let create = profile.create_schema.as_ref().unwrap();
    let names: Vec<&str> = create.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["block_page", "name"]);
}

#[test]
fn test_camel_case_collection_name() {
    let json = r#"{
        "openapi": "3.0.0",
        "info": {"title": "t", "version": "1"},
        "paths": {"/api/internalNetworks": {"get": {}}}
    }"#;

    let resources = parse_document(json.as_bytes()).unwrap();
    assert_eq!(resources[0].name, "internal_network");
}

#[test]
fn test_invalid_document_is_fatal() {
    let missing_info = r#"{"openapi": "3.0.0", "paths": {}}"#;
    assert!(matches!(
        parse_document(missing_info.as_bytes()),
        Err(GeneratorError::Input(_))
    ));
}
