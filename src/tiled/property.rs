//! Custom property normalization.
//!
//! Tiled historically wrote custom properties as two parallel maps
//! (`properties`: name → value, `propertytypes`: name → type); newer exports
//! already use a single list of `{name, value, type}` entries. Both
//! encodings normalize to the list form; the dual encoding is zipped, the
//! list form is validated for the three required fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CookError, Result};

/// One typed custom property. `name` is unique within its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Normalize either property encoding into an ordered list.
///
/// Absence of property data is not an error and yields `None`. Map-form
/// entries come out sorted by name (serde_json object iteration order),
/// making output deterministic; list-form entries keep their source order.
pub fn normalize_properties(
    properties: Option<Value>,
    propertytypes: Option<Map<String, Value>>,
) -> Result<Option<Vec<Property>>> {
    let Some(properties) = properties else {
        return Ok(None);
    };

    match properties {
        Value::Object(entries) => {
            let types = propertytypes.unwrap_or_default();
            let mut list = Vec::with_capacity(entries.len());

            for (name, value) in entries {
                let kind = types
                    .get(&name)
                    .and_then(Value::as_str)
                    .ok_or_else(|| CookError::PropertyTypeMismatch { name: name.clone() })?
                    .to_string();
                list.push(Property { name, value, kind });
            }

            Ok(Some(list))
        }
        Value::Array(entries) => {
            let mut list = Vec::with_capacity(entries.len());

            for entry in entries {
                list.push(validate_entry(entry)?);
            }

            Ok(Some(list))
        }
        _ => Err(CookError::InvalidPropertyFormat {
            field: "properties",
        }),
    }
}

/// Check a list-form entry for the three required fields.
fn validate_entry(entry: Value) -> Result<Property> {
    let Value::Object(mut fields) = entry else {
        return Err(CookError::InvalidPropertyFormat { field: "name" });
    };

    let name = match fields.remove("name") {
        Some(Value::String(name)) => name,
        _ => return Err(CookError::InvalidPropertyFormat { field: "name" }),
    };

    let value = fields
        .remove("value")
        .ok_or(CookError::InvalidPropertyFormat { field: "value" })?;

    let kind = match fields.remove("type") {
        Some(Value::String(kind)) => kind,
        _ => return Err(CookError::InvalidPropertyFormat { field: "type" }),
    };

    Ok(Property { name, value, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Option<Value> {
        Some(value)
    }

    fn types(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_zip_dual_encoding() {
        let result = normalize_properties(
            object(json!({ "a": 1 })),
            types(json!({ "a": "int" })),
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            result,
            vec![Property {
                name: "a".to_string(),
                value: json!(1),
                kind: "int".to_string(),
            }]
        );
    }

    #[test]
    fn test_zip_orders_by_name() {
        let result = normalize_properties(
            object(json!({ "speed": 3.5, "music": "cave", "dark": true })),
            types(json!({ "speed": "float", "music": "string", "dark": "bool" })),
        )
        .unwrap()
        .unwrap();

        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["dark", "music", "speed"]);
    }

    #[test]
    fn test_zip_missing_type_entry() {
        let result = normalize_properties(object(json!({ "a": 1 })), types(json!({})));

        assert!(matches!(
            result,
            Err(CookError::PropertyTypeMismatch { name }) if name == "a"
        ));
    }

    #[test]
    fn test_zip_without_propertytypes_at_all() {
        let result = normalize_properties(object(json!({ "a": 1 })), None);

        assert!(matches!(
            result,
            Err(CookError::PropertyTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_list_form_passes_validation() {
        let result = normalize_properties(
            object(json!([
                { "name": "a", "value": 1, "type": "int" },
                { "name": "b", "value": "x", "type": "string" },
            ])),
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "a");
        assert_eq!(result[1].kind, "string");
    }

    #[test]
    fn test_list_form_missing_field() {
        let result = normalize_properties(
            object(json!([{ "name": "a", "value": 1 }])),
            None,
        );

        assert!(matches!(
            result,
            Err(CookError::InvalidPropertyFormat { field: "type" })
        ));
    }

    #[test]
    fn test_absent_properties() {
        assert_eq!(normalize_properties(None, None).unwrap(), None);
    }

    #[test]
    fn test_property_serialization_uses_type_key() {
        let prop = Property {
            name: "a".to_string(),
            value: json!(true),
            kind: "bool".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&prop).unwrap(),
            json!({ "name": "a", "value": true, "type": "bool" })
        );
    }
}
