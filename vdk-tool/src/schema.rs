use schemars::{JsonSchema, r#gen::SchemaSettings};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use vdk_core::{Result, VdkError};

/// Generate a flat parameters schema (no $schema, $ref, or definitions)
pub fn parameters_schema_for<T: JsonSchema>() -> Value {
    let settings = SchemaSettings::openapi3().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let generator = schemars::r#gen::SchemaGenerator::new(settings);
    let mut schema = generator.into_root_schema_for::<T>();
    schema.schema.metadata().title = None;

    let mut value = serde_json::to_value(schema.schema).unwrap_or_default();
    clean_schema(&mut value);
    value
}

/// Remove fields that function-calling APIs reject
fn clean_schema(value: &mut Value) {
    if let Value::Object(map) = value {
        map.remove("$schema");
        map.remove("definitions");
        map.remove("$ref");
        map.remove("additionalProperties");

        for (_, v) in map.iter_mut() {
            clean_schema(v);
        }
    } else if let Value::Array(arr) = value {
        for v in arr.iter_mut() {
            clean_schema(v);
        }
    }
}

/// Deserialize tool arguments into their typed form.
///
/// A missing arguments object is treated as `{}` so tools whose fields are all
/// optional accept a bare call.
pub fn parse_args<T: DeserializeOwned>(tool_name: &str, args: Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| {
        VdkError::InvalidArguments(format!("Invalid arguments for {}: {}", tool_name, e))
    })
}
