#![cfg(feature = "serde")]

use condlint::lint::{lint_xml, Check, LintConfig};
use condlint::{parse, AnalysisConfig, EqualityModel, Expr};

#[test]
fn lint_config_from_json() {
    let config: LintConfig = serde_json::from_str(
        r#"{"analysis": {"max_atoms": 8, "equality": "independent"}, "complexity_threshold": 4}"#,
    )
    .unwrap();
    assert_eq!(config.complexity_threshold(), 4);
    assert_eq!(config.analysis().max_atoms(), 8);
    assert_eq!(config.analysis().equality(), EqualityModel::Independent);
    assert_eq!(config.analysis().max_depth(), AnalysisConfig::default().max_depth());
}

#[test]
fn missing_fields_take_defaults() {
    let config: LintConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LintConfig::default());
}

#[test]
fn findings_serialize() {
    let xml = "<Flow><Condition>1 = 2</Condition></Flow>";
    let findings = lint_xml(xml, &LintConfig::default()).unwrap();
    let json = serde_json::to_value(&findings).unwrap();
    assert_eq!(json[0]["check"], "contradiction");
    assert_eq!(json[0]["severity"], "warning");
    assert_eq!(json[0]["location"]["line"], 1);
    assert_eq!(findings[0].check(), Check::Contradiction);
}

#[test]
fn expression_tree_round_trips_through_json() {
    let expr = parse(r#"request.verb = "GET" and not flag"#).unwrap();
    let json = serde_json::to_string(&expr).unwrap();
    let back: Expr = serde_json::from_str(&json).unwrap();
    assert_eq!(back, expr);
}
