use retort::{built_in_definitions, Role, RuleDefinition, TemplateSpec};

#[test]
fn definition_round_trips_through_json() {
    let def = RuleDefinition::new("link", "test coupling")
        .template(
            TemplateSpec::new("[A:1]-[A:2]")
                .role(Role::A, ["[O;D1:1]"])
                .role(Role::B, ["[N;D1:2]", "[N;D2:2]"])
                .alert("[S;D1]"),
        )
        .alert("[O;D1][C;a]");
    let json = serde_json::to_string(&def).unwrap();
    let back: RuleDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, def);
}

#[test]
fn definition_loads_from_handwritten_json() {
    let json = r#"{
        "name": "amination",
        "templates": [
            {
                "roles": {
                    "A": ["[Cl,Br,I;D1:1]-[C;a:2]"],
                    "B": ["[N;D1:3][C;a;M]", "[N;D1:3][C;z1;x1;M]"]
                },
                "product": "[A:2]-[A:3]"
            }
        ]
    }"#;
    let def: RuleDefinition = serde_json::from_str(json).unwrap();
    assert!(def.validate().is_ok());
    assert_eq!(def.description, "");
    assert!(def.alerts.is_empty());
    assert_eq!(def.instance_count(), 2);
    let roles: Vec<Role> = def.templates[0].roles.keys().copied().collect();
    assert_eq!(roles, vec![Role::A, Role::B]);
}

#[test]
fn built_in_library_is_well_formed() {
    let definitions = built_in_definitions();
    assert_eq!(definitions.len(), 9);
    for def in &definitions {
        def.validate().unwrap();
        assert!(!def.description.is_empty(), "{} lacks description", def.name);
        assert!(def.instance_count() >= 1);
    }
    // spot-check the documented expansion counts
    let amidation = definitions.iter().find(|d| d.name == "amidation").unwrap();
    assert_eq!(amidation.instance_count(), 5);
    assert_eq!(amidation.alerts.len(), 2);
}

#[test]
fn built_ins_survive_serialization() {
    for def in built_in_definitions() {
        let json = serde_json::to_string(&def).unwrap();
        let back: RuleDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
