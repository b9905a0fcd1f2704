//! Invoker behavior: validation, default filling, and pass-through of the
//! callable's own result.

use fn_schema::{Callable, SchemaError, TypeDescriptor, call, validate_returns};
use serde_json::{Value, json};

fn add() -> Callable {
    Callable::new("add", |args| {
        let a = args["a"].as_i64().unwrap_or(0);
        let b = args["b"].as_f64().unwrap_or(0.0);
        Ok(json!(format!("{}", a as f64 + b)))
    })
    .with_doc("Adds an integer and a number.")
    .param("a", TypeDescriptor::integer())
    .param("b", TypeDescriptor::number())
    .returning(TypeDescriptor::string())
}

#[test]
fn test_call_returns_the_callables_value() {
    let result = call(&add(), &json!({"a": 1, "b": 2.0})).unwrap();
    assert_eq!(result, json!("3"));
}

#[test]
fn test_call_reports_every_violation() {
    let err = call(&add(), &json!({"a": "one", "b": "two"})).unwrap_err();
    let SchemaError::Validation { violations } = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(violations.len(), 2);
    let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"/a"));
    assert!(paths.contains(&"/b"));
}

#[test]
fn test_call_rejects_missing_required_parameter() {
    let err = call(&add(), &json!({"a": 1})).unwrap_err();
    assert!(matches!(err, SchemaError::Validation { .. }));
}

#[test]
fn test_call_fills_defaults() {
    let greet = Callable::new("greet", |args| {
        let name = args["name"].as_str().unwrap_or("");
        let greeting = args["greeting"].as_str().unwrap_or("");
        Ok(json!(format!("{greeting}, {name}!")))
    })
    .param("name", TypeDescriptor::string())
    .param_with_default("greeting", TypeDescriptor::string(), json!("Hello"));

    assert_eq!(
        call(&greet, &json!({"name": "Ada"})).unwrap(),
        json!("Hello, Ada!")
    );
    assert_eq!(
        call(&greet, &json!({"name": "Ada", "greeting": "Hi"})).unwrap(),
        json!("Hi, Ada!")
    );
}

#[test]
fn test_call_drops_unknown_keys() {
    let keys = Callable::new("keys", |args| {
        let names: Vec<&str> = args.keys().map(String::as_str).collect();
        Ok(json!(names))
    })
    .param("expected", TypeDescriptor::boolean());

    let result = call(&keys, &json!({"expected": true, "stray": 1})).unwrap();
    assert_eq!(result, json!(["expected"]));
}

#[test]
fn test_call_accepts_null_for_optional_type() {
    let maybe = Callable::new("maybe", |args| Ok(args["a"].clone()))
        .param("a", TypeDescriptor::optional(TypeDescriptor::integer()));

    assert_eq!(call(&maybe, &json!({"a": null})).unwrap(), Value::Null);
    assert_eq!(call(&maybe, &json!({"a": 3})).unwrap(), json!(3));
    let err = call(&maybe, &json!({"a": "x"})).unwrap_err();
    assert!(matches!(err, SchemaError::Validation { .. }));
}

#[test]
fn test_call_propagates_runtime_errors() {
    let fail = Callable::new("fail", |_| {
        Err(SchemaError::Runtime("database unreachable".to_string()))
    });
    let err = call(&fail, &json!({})).unwrap_err();
    assert_eq!(err, SchemaError::Runtime("database unreachable".to_string()));
}

#[test]
fn test_call_surfaces_missing_annotation() {
    let broken = Callable::new("broken", |_| Ok(Value::Null)).param_untyped("a");
    let err = call(&broken, &json!({"a": 1})).unwrap_err();
    assert!(matches!(err, SchemaError::MissingAnnotation { .. }));
}

#[test]
fn test_validate_returns() {
    let schema = json!({"type": "string"});
    assert!(validate_returns(&json!("ok"), &schema).unwrap());
    assert!(!validate_returns(&json!(3), &schema).unwrap());
}

#[test]
fn test_validate_returns_rejects_bad_schema() {
    let err = validate_returns(&json!(1), &json!({"type": 12})).unwrap_err();
    assert!(matches!(err, SchemaError::SchemaGeneration(_)));
}
