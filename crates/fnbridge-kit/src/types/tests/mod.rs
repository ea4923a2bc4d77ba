use std::str::FromStr;

use super::diagnostics::Diagnostic;
use super::functions::{DescriptionKind, FunctionDecl, FunctionParam};
use super::provider::{CallFunctionResponse, ProviderAddr};
use super::types::{ObjectType, Type, Value};
use super::Fingerprint;
use serde_json::json;
use serde_json::Value as JsonValue;
use test_case::test_case;

fn bytes() -> Vec<u8> {
    hex::decode("ffffff").unwrap()
}

#[test_case(Value::string("Test".to_string()))]
#[test_case(Value::integer(1))]
#[test_case(Value::integer(-10))]
#[test_case(Value::bool(true))]
#[test_case(Value::null())]
#[test_case(Value::array(vec![Value::string("test".to_string()), Value::integer(1)]))]
#[test_case({
    let mut o = indexmap::IndexMap::new();
     o.insert("key1".to_string(), Value::string("test".to_string()));
     o.insert("key2".to_string(), Value::integer(1));
     o.insert("nested".to_string(), Value::Object(o.clone()));
     Value::Object(o)
})]
#[test_case(Value::buffer(bytes()))]
#[test_case(Value::provider(bytes(), "ns::type"))]
#[test_case(Value::unknown(Type::array(Type::string())))]
fn it_serdes_values(value: Value) {
    let ser = serde_json::to_string(&value).unwrap();
    let de: Value = serde_json::from_str(&ser).unwrap();
    assert_eq!(de, value);
}

#[test_case(json!({"type": "integer", "value": "18446744073709551615" }))]
#[test_case(json!({"type": "float", "value": 1.12 }))]
#[test_case(json!({"type": "null"}))]
#[test_case(json!({"type":"buffer","value":"0xFFFFFF"}))]
#[test_case(json!({"type":"unknown","value":"dynamic"}))]
fn it_deserializes_values(val: JsonValue) {
    let _: Value = serde_json::from_value(val.clone())
        .map_err(|e| format!("failed to deserialize value {}: {}", val, e))
        .unwrap();
}

#[test]
fn it_rejects_invalid_keys() {
    match serde_json::from_value::<Value>(json!({"type": "strin", "value": "my string"})) {
        Err(e) => {
            assert_eq!(&e.to_string(), "invalid type strin");
        }
        Ok(_) => panic!("missing expected error for invalid value key"),
    }
}

#[test]
fn it_detects_nested_unknowns() {
    let nested = ObjectType::from(vec![
        ("name", Value::string("alice".into())),
        ("tags", Value::array(vec![Value::string("a".into()), Value::unknown(Type::string())])),
    ])
    .to_value();

    assert!(!nested.is_unknown());
    assert!(!nested.is_wholly_known());
    assert!(Value::array(vec![Value::null(), Value::integer(1)]).is_wholly_known());
    assert!(!Value::unknown(Type::dynamic()).is_wholly_known());
}

#[test]
fn null_is_not_unknown() {
    assert!(Value::null().is_null());
    assert!(Value::null().is_wholly_known());
    assert!(!Value::unknown(Type::null()).is_null());
}

#[test]
fn object_equality_ignores_key_order() {
    let lhs = ObjectType::from(vec![("a", Value::integer(1)), ("b", Value::bool(true))]).to_value();
    let rhs = ObjectType::from(vec![("b", Value::bool(true)), ("a", Value::integer(1))]).to_value();
    assert_eq!(lhs, rhs);
}

#[test_case("string", Type::string())]
#[test_case("dynamic", Type::dynamic())]
#[test_case("array[array[integer]]", Type::array(Type::array(Type::integer())))]
#[test_case("provider(evm::address)", Type::provider("evm::address"))]
fn it_parses_types(source: &str, expected: Type) {
    let parsed = Type::try_from(source.to_string()).unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.to_string(), source);
}

#[test]
fn dynamic_parameters_accept_null() {
    let strict = FunctionParam::new("value", Type::string());
    assert!(!strict.accepts_null());
    assert!(strict.clone().allow_null().accepts_null());
    assert!(FunctionParam::new("value", Type::dynamic()).accepts_null());
}

#[test]
fn it_matches_arguments_to_parameters() {
    let decl = FunctionDecl::new(
        vec![FunctionParam::new("separator", Type::string())],
        Type::string(),
    )
    .with_variadic_parameter(FunctionParam::new("parts", Type::string()));

    assert_eq!(decl.parameter_at(0).map(|p| p.name.as_str()), Some("separator"));
    assert_eq!(decl.parameter_at(5).map(|p| p.name.as_str()), Some("parts"));
    assert!(decl.accepts_arity(1));
    assert!(decl.accepts_arity(4));
    assert!(!decl.accepts_arity(0));
    assert_eq!(decl.expected_arity(), "at least 1");
}

#[test]
fn it_defines_declarations_with_the_macro() {
    let decl = define_function_decl! {
        documentation: "`join` concatenates strings.",
        parameters: [
            separator: { documentation: "Placed between parts.", typing: Type::string(), allow_null: true },
            first: { documentation: "First part.", typing: Type::dynamic(), allow_unknown: true }
        ],
        variadic_parameter: rest: { documentation: "Remaining parts.", typing: Type::string() },
        return_type: Type::string(),
    };

    assert_eq!(decl.parameters.len(), 2);
    assert!(decl.parameters[0].allow_null_value);
    assert!(!decl.parameters[0].allow_unknown_values);
    assert!(decl.parameters[1].allow_unknown_values);
    assert_eq!(decl.variadic_parameter.as_ref().map(|p| p.name.as_str()), Some("rest"));
    assert_eq!(decl.description_kind, DescriptionKind::Plain);

    let no_variadic = define_function_decl! {
        documentation: "`now` returns a timestamp.",
        parameters: [],
        return_type: Type::integer(),
    };
    assert!(no_variadic.variadic_parameter.is_none());
}

#[test_case("hashicorp/aws", "registry.fnbridge.dev/hashicorp/aws")]
#[test_case("example.com/acme/tools", "example.com/acme/tools")]
fn it_parses_provider_addresses(source: &str, canonical: &str) {
    let addr = ProviderAddr::from_str(source).unwrap();
    assert_eq!(addr.to_string(), canonical);
}

#[test_case("aws")]
#[test_case("a//b")]
#[test_case("a/b/c/d")]
fn it_rejects_malformed_provider_addresses(source: &str) {
    assert!(ProviderAddr::from_str(source).is_err());
}

#[test]
fn it_joins_error_diagnostics() {
    let single = CallFunctionResponse::err(Diagnostic::error("boom").with_code("E42"))
        .with_diagnostic(Diagnostic::warning("deprecated"));
    assert!(single.has_errors());
    assert_eq!(single.errors_to_diagnostic(), Some(Diagnostic::error("boom").with_code("E42")));
    assert_eq!(single.warnings().count(), 1);

    let several = CallFunctionResponse::err(Diagnostic::error("first"))
        .with_diagnostic(Diagnostic::error("second"));
    let joined = several.errors_to_diagnostic().unwrap();
    assert_eq!(joined.message, "2 problems:\n\n- first\n- second");

    let clean = CallFunctionResponse::ok(Value::bool(true))
        .with_diagnostic(Diagnostic::warning("slow"));
    assert!(!clean.has_errors());
    assert!(clean.errors_to_diagnostic().is_none());
}

#[test]
fn fingerprints_roundtrip_through_hex() {
    let fingerprint = Fingerprint::from_components(vec!["abc"]);
    assert_eq!(
        fingerprint.to_hex(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    let parsed = Fingerprint::from_hex_string(&format!("0x{}", fingerprint)).unwrap();
    assert_eq!(parsed, fingerprint);
    assert!(Fingerprint::from_hex_string("0xabcd").is_err());

    let ser = serde_json::to_string(&fingerprint).unwrap();
    let de: Fingerprint = serde_json::from_str(&ser).unwrap();
    assert_eq!(de, fingerprint);
}
