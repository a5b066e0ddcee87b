//! The demo tools exposed to the model: three arithmetic operations and a
//! failure simulator used to exercise error translation.
//!
//! ```rust
//! use abacus::tools::demo_registry;
//!
//! let registry = demo_registry().expect("demo tools register");
//! assert_eq!(registry.names(), vec!["add", "multiply", "divide", "simulate_error"]);
//! ```

use atooling::{
    ParameterSpec, ToolArgs, ToolError, ToolRegistry, ToolSchema, required_f64, required_string,
};

pub const SIMULATED_ERROR_TYPES: [&str; 4] = ["generic", "validation", "timeout", "network"];

pub fn add_schema() -> ToolSchema {
    binary_schema("add", "Add two numbers and return the sum")
}

pub fn multiply_schema() -> ToolSchema {
    binary_schema("multiply", "Multiply two numbers and return the product")
}

/// `b` is deliberately not declared non-zero; division by zero fails in the body.
pub fn divide_schema() -> ToolSchema {
    ToolSchema::new("divide", "Divide a by b and return the quotient")
        .parameter(ParameterSpec::number("a", "Dividend"))
        .parameter(ParameterSpec::number("b", "Divisor"))
}

pub fn simulate_error_schema() -> ToolSchema {
    ToolSchema::new(
        "simulate_error",
        "Always fails with a simulated error of the requested category",
    )
    .parameter(
        ParameterSpec::string("error_type", "Category of failure to simulate")
            .one_of(SIMULATED_ERROR_TYPES)
            .with_default("generic"),
    )
}

fn binary_schema(name: &str, description: &str) -> ToolSchema {
    ToolSchema::new(name, description)
        .parameter(ParameterSpec::number("a", "First operand"))
        .parameter(ParameterSpec::number("b", "Second operand"))
}

fn operands(args: &ToolArgs) -> Result<(f64, f64), ToolError> {
    Ok((required_f64(args, "a")?, required_f64(args, "b")?))
}

pub fn add(args: &ToolArgs) -> Result<String, ToolError> {
    let (a, b) = operands(args)?;
    Ok((a + b).to_string())
}

pub fn multiply(args: &ToolArgs) -> Result<String, ToolError> {
    let (a, b) = operands(args)?;
    Ok((a * b).to_string())
}

pub fn divide(args: &ToolArgs) -> Result<String, ToolError> {
    let (a, b) = operands(args)?;
    if b == 0.0 {
        return Err(ToolError::execution("Cannot divide by zero"));
    }
    Ok((a / b).to_string())
}

/// Never succeeds. Each category maps to its own error kind and message.
pub fn simulate_error(args: &ToolArgs) -> Result<String, ToolError> {
    let error_type = required_string(args, "error_type")?;
    Err(match error_type.as_str() {
        "validation" => {
            ToolError::invalid_arguments("Simulated validation error: input failed validation")
        }
        "timeout" => ToolError::timeout("Simulated timeout error: operation timed out"),
        "network" => ToolError::network("Simulated network error: connection refused"),
        _ => ToolError::execution("Simulated generic error: something went wrong"),
    })
}

/// Registry holding the four demo tools in presentation order.
pub fn demo_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register_sync_fn(add_schema(), |args, _ctx| add(&args))?;
    registry.register_sync_fn(multiply_schema(), |args, _ctx| multiply(&args))?;
    registry.register_sync_fn(divide_schema(), |args, _ctx| divide(&args))?;
    registry.register_sync_fn(simulate_error_schema(), |args, _ctx| simulate_error(&args))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use atooling::ToolErrorKind;
    use serde_json::json;

    use super::*;

    fn args(value: serde_json::Value) -> ToolArgs {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn add_and_multiply_render_plain_numbers() {
        assert_eq!(add(&args(json!({"a": 2, "b": 3}))).expect("add"), "5");
        assert_eq!(add(&args(json!({"a": 0.5, "b": 2}))).expect("add"), "2.5");
        assert_eq!(multiply(&args(json!({"a": 3, "b": 7}))).expect("multiply"), "21");
    }

    #[test]
    fn add_is_consistent_for_mixed_signs() {
        for (a, b) in [(1.5, -2.25), (-10.0, 4.0), (1e6, 3.0)] {
            let sum: f64 = add(&args(json!({"a": a, "b": b})))
                .expect("add")
                .parse()
                .expect("numeric output");
            assert_eq!(a - sum + b, 0.0);
        }
    }

    #[test]
    fn divide_by_zero_fails_in_the_body() {
        let err = divide(&args(json!({"a": 1, "b": 0}))).expect_err("zero divisor fails");
        assert_eq!(err.kind, ToolErrorKind::Execution);
        assert_eq!(err.message, "Cannot divide by zero");

        assert_eq!(divide(&args(json!({"a": 5, "b": 2}))).expect("divide"), "2.5");
    }

    #[test]
    fn simulate_error_categories_are_distinct() {
        let expectations = [
            ("generic", ToolErrorKind::Execution),
            ("validation", ToolErrorKind::InvalidArguments),
            ("timeout", ToolErrorKind::Timeout),
            ("network", ToolErrorKind::Network),
        ];

        let mut messages = Vec::new();
        for (category, kind) in expectations {
            let err = simulate_error(&args(json!({"error_type": category})))
                .expect_err("simulate_error always fails");
            assert_eq!(err.kind, kind);
            assert!(err.message.contains(category), "{}", err.message);
            messages.push(err.message);
        }

        messages.dedup();
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn simulate_error_schema_defaults_to_generic_and_rejects_unknown_categories() {
        let schema = simulate_error_schema();

        let validated = schema.validate(&json!({})).expect("default applies");
        assert_eq!(validated.get("error_type"), Some(&json!("generic")));

        let err = schema
            .validate(&json!({"error_type": "disk"}))
            .expect_err("unknown category is rejected");
        assert_eq!(err.kind, ToolErrorKind::InvalidArguments);
    }

    #[test]
    fn demo_registry_advertises_json_schemas() {
        let registry = demo_registry().expect("registry builds");
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 4);

        let divide: serde_json::Value =
            serde_json::from_str(&definitions[2].input_schema).expect("schema is JSON");
        assert_eq!(divide["type"], "object");
        assert_eq!(divide["required"], json!(["a", "b"]));
    }
}
