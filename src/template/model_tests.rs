//! Tests for the template data model and value types.

use super::*;

#[test]
fn test_value_comparable_forms() {
    assert_eq!(
        Value::String("abc".into()).as_comparable(),
        Some("abc".to_string())
    );
    assert_eq!(Value::Bool(true).as_comparable(), Some("true".to_string()));
    assert_eq!(Value::List(vec!["a".into()]).as_comparable(), None);
}

#[test]
fn test_value_empty_string_semantics() {
    assert!(Value::String(String::new()).is_empty_string());
    assert!(!Value::String("x".into()).is_empty_string());
    assert!(!Value::Bool(false).is_empty_string());
    assert!(!Value::List(Vec::new()).is_empty_string());
}

#[test]
fn test_value_from_raw_bool_parsing() {
    assert_eq!(Value::from_raw(ParamType::Bool, "true"), Value::Bool(true));
    assert_eq!(Value::from_raw(ParamType::Bool, "TRUE"), Value::Bool(true));
    assert_eq!(Value::from_raw(ParamType::Bool, "false"), Value::Bool(false));
    assert_eq!(Value::from_raw(ParamType::Bool, ""), Value::Bool(false));
    assert_eq!(
        Value::from_raw(ParamType::String, "true"),
        Value::String("true".into())
    );
}

#[test]
fn test_resolved_config_preserves_insertion_order() {
    let mut config = ResolvedConfig::new();
    config.insert("b", Value::String("2".into()));
    config.insert("a", Value::String("1".into()));
    config.insert("b", Value::String("3".into())); // replace keeps position

    let names: Vec<&str> = config.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(config.get("b"), Some(&Value::String("3".into())));
    assert_eq!(config.len(), 2);
}

#[test]
fn test_resolved_config_serializes_as_ordered_map() {
    let mut config = ResolvedConfig::new();
    config.insert("usage", Value::String("pv".into()));
    config.insert("enabled", Value::Bool(true));
    config.insert("identifiers", Value::List(vec!["a".into(), "b".into()]));

    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(yaml, "usage: pv\nenabled: true\nidentifiers:\n- a\n- b\n");
}

#[test]
fn test_param_label_falls_back_to_name() {
    let mut param = Param {
        name: "host".into(),
        ..Param::default()
    };
    assert_eq!(param.label(), "host");
    param.description = "Host name or IP".into();
    assert_eq!(param.label(), "Host name or IP");
}

#[test]
fn test_template_yaml_round_trip() {
    let yaml = r#"
template: sma-inverter
title: SMA Inverter
class: meter
requirements:
  tags: [sponsorship]
  description: Needs a sponsor token
  uri: https://example.org/sponsor
params:
  - name: usage
    type: choice
    choice: [pv, battery]
  - name: host
    required: true
    example: 192.168.1.10
  - name: port
    default: "502"
  - name: capacity
    advanced: true
    dependencies:
      - name: usage
        check: equal
        value: battery
  - name: identifiers
    type: stringlist
  - name: interface
    type: variant
    choice: [rs485, tcpip]
variants:
  interfaces:
    tcpip:
      description: Network (TCP/IP)
      params:
        - name: port
      defaults:
        port: "502"
"#;

    let template: Template = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(template.template, "sma-inverter");
    assert_eq!(template.title(), "SMA Inverter");
    assert_eq!(template.class, DeviceClass::Meter);
    assert!(template.requirements.has(RequirementTag::Sponsorship));
    assert_eq!(template.params.len(), 6);

    let capacity = template.param_by_name("capacity").unwrap();
    assert!(capacity.advanced);
    assert_eq!(capacity.dependencies.len(), 1);
    assert_eq!(capacity.dependencies[0].check, DependencyCheck::Equal);
    assert_eq!(capacity.dependencies[0].value, "battery");

    let identifiers = template.param_by_name("identifiers").unwrap();
    assert_eq!(identifiers.value_type, ParamType::StringList);

    let variants = template.variants.as_ref().unwrap();
    assert_eq!(variants.interfaces["tcpip"].defaults["port"], "502");
}

#[test]
fn test_template_minimal_yaml_defaults() {
    let template: Template = serde_yaml::from_str("template: tiny\nparams:\n  - name: host\n").unwrap();
    assert_eq!(template.title(), "tiny");
    assert_eq!(template.class, DeviceClass::Meter);
    assert!(template.requirements.is_empty());
    let host = template.param_by_name("host").unwrap();
    assert_eq!(host.value_type, ParamType::String);
    assert!(!host.required);
    assert!(host.dependencies.is_empty());
}

#[test]
fn test_choice_contains_across_declarations() {
    let template = Template {
        template: "t".into(),
        params: vec![
            Param {
                name: "usage".into(),
                choice: vec!["pv".into()],
                ..Param::default()
            },
            Param {
                name: "usage".into(),
                choice: vec!["battery".into()],
                ..Param::default()
            },
        ],
        ..Template::default()
    };
    assert!(template.choice_contains("usage", "pv"));
    assert!(template.choice_contains("usage", "battery"));
    assert!(!template.choice_contains("usage", "grid"));
}

#[test]
fn test_device_category_metadata() {
    assert_eq!(DeviceCategory::PvMeter.class(), DeviceClass::Meter);
    assert_eq!(DeviceCategory::PvMeter.usage_filter(), Some("pv"));
    assert_eq!(DeviceCategory::Charger.usage_filter(), None);
    assert_eq!(DeviceCategory::BatteryMeter.default_name(), "battery");
}
