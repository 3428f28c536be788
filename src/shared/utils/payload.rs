use crate::domain::entities::ContactDraft;
use crate::domain::errors::{DomainError, DomainResult};
use serde_json::{Map, Value};

/// Builds a raw [`ContactDraft`] from a request body.
///
/// Absent list fields default to empty and an absent `is_bookmarked` to
/// false. Unknown keys are ignored. Field-level cleaning happens later in
/// [`ContactDraft::validate`].
pub fn parse_contact_payload(payload: Option<Value>) -> DomainResult<ContactDraft> {
    let object = &require_object(payload)?;

    let name = match object.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err(invalid("name must be a string")),
    };

    Ok(ContactDraft {
        name,
        phone_numbers: text_list(object, "phone_numbers")?,
        emails: text_list(object, "emails")?,
        addresses: text_list(object, "addresses")?,
        socials: text_list(object, "socials")?,
        is_bookmarked: object.get("is_bookmarked").map(truthy).unwrap_or(false),
    })
}

/// Reads the required `is_bookmarked` flag of a bookmark request.
pub fn parse_bookmark_payload(payload: Option<Value>) -> DomainResult<bool> {
    payload
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|object| object.get("is_bookmarked"))
        .map(truthy)
        .ok_or_else(|| invalid("Missing is_bookmarked field"))
}

fn require_object(payload: Option<Value>) -> DomainResult<Map<String, Value>> {
    match payload {
        None | Some(Value::Null) => Err(invalid("Request body cannot be empty")),
        Some(Value::Object(object)) if object.is_empty() => {
            Err(invalid("Request body cannot be empty"))
        }
        Some(Value::Object(object)) => Ok(object),
        Some(_) => Err(invalid("Invalid data format")),
    }
}

fn text_list(object: &Map<String, Value>, field: &str) -> DomainResult<Vec<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().filter_map(as_text).collect()),
        Some(_) => Err(invalid(&format!("{} must be a list", field))),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(object) => !object.is_empty(),
    }
}

fn invalid(message: &str) -> DomainError {
    DomainError::ValidationError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_absent_fields() {
        let draft = parse_contact_payload(Some(json!({"name": "Ana"}))).unwrap();
        assert_eq!(draft.name, "Ana");
        assert!(draft.phone_numbers.is_empty());
        assert!(draft.emails.is_empty());
        assert!(!draft.is_bookmarked);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let draft = parse_contact_payload(Some(json!({
            "name": "Ana",
            "phone_numbers": ["1"],
            "nickname": "A",
            "id": 99
        })))
        .unwrap();
        assert_eq!(draft.phone_numbers, vec!["1"]);
    }

    #[test]
    fn test_elements_coerced_to_text() {
        let draft = parse_contact_payload(Some(json!({
            "name": "Ana",
            "phone_numbers": [5551234, "  42 ", null, true]
        })))
        .unwrap();
        assert_eq!(draft.phone_numbers, vec!["5551234", "  42 ", "true"]);
    }

    #[test]
    fn test_every_list_field_read_from_body() {
        let draft = parse_contact_payload(Some(json!({
            "name": "Ana",
            "phone_numbers": ["555"],
            "emails": ["ana@example.com"],
            "addresses": ["1 Main St"],
            "socials": ["@ana", ["nested", 1]],
            "is_bookmarked": true
        })))
        .unwrap();
        assert_eq!(draft.phone_numbers, vec!["555"]);
        assert_eq!(draft.emails, vec!["ana@example.com"]);
        assert_eq!(draft.addresses, vec!["1 Main St"]);
        assert_eq!(draft.socials, vec!["@ana", "[\"nested\",1]"]);
        assert!(draft.is_bookmarked);
    }

    #[test]
    fn test_empty_and_null_bodies_rejected() {
        for payload in [None, Some(Value::Null), Some(json!({}))] {
            let err = parse_contact_payload(payload).unwrap_err();
            assert_eq!(err.message(), "Request body cannot be empty");
        }
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = parse_contact_payload(Some(json!(["Ana"]))).unwrap_err();
        assert_eq!(err.message(), "Invalid data format");
    }

    #[test]
    fn test_list_field_must_be_array() {
        let err = parse_contact_payload(Some(json!({"name": "Ana", "emails": "a@b.c"})))
            .unwrap_err();
        assert_eq!(err.message(), "emails must be a list");
    }

    #[test]
    fn test_non_string_name_rejected() {
        let result = parse_contact_payload(Some(json!({"name": 12, "phone_numbers": ["1"]})));
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_bookmark_flag_truthiness() {
        assert!(parse_bookmark_payload(Some(json!({"is_bookmarked": true}))).unwrap());
        assert!(parse_bookmark_payload(Some(json!({"is_bookmarked": 1}))).unwrap());
        assert!(!parse_bookmark_payload(Some(json!({"is_bookmarked": ""}))).unwrap());
        assert!(!parse_bookmark_payload(Some(json!({"is_bookmarked": null}))).unwrap());
    }

    #[test]
    fn test_bookmark_flag_required() {
        assert!(parse_bookmark_payload(Some(json!({"name": "Ana"}))).is_err());
        assert!(parse_bookmark_payload(None).is_err());
    }
}
