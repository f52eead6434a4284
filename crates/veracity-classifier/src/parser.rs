//! Parse LLM output into classifications

use crate::error::ClassifierError;
use veracity_domain::Classification;

/// Parse the span from the first `[` to the last `]` as a classification array
///
/// The whole array must validate: one malformed element rejects the
/// response, which sends the caller down the fail-open path.
pub fn parse_classifications(response: &str) -> Result<Vec<Classification>, ClassifierError> {
    let json_str = extract_array(response)?;
    let classifications: Vec<Classification> = serde_json::from_str(json_str)?;
    Ok(classifications)
}

fn extract_array(response: &str) -> Result<&str, ClassifierError> {
    match (response.find('['), response.rfind(']')) {
        (Some(start), Some(end)) if end > start => Ok(&response[start..=end]),
        _ => Err(ClassifierError::NoJsonArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_array() {
        let response = r#"[
            {"claim_id": "c1", "is_verifiable": true, "reason": "specific number"},
            {"claim_id": "c2", "is_verifiable": false, "reason": "opinion"}
        ]"#;

        let parsed = parse_classifications(response).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_verifiable);
        assert_eq!(parsed[1].claim_id, "c2");
    }

    #[test]
    fn test_parse_array_wrapped_in_prose() {
        let response = "Here you go:\n```json\n[{\"claim_id\": \"c1\", \"is_verifiable\": true, \"reason\": \"date\"}]\n```\nDone.";
        let parsed = parse_classifications(response).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_no_array() {
        assert!(matches!(
            parse_classifications("I cannot classify these."),
            Err(ClassifierError::NoJsonArray)
        ));
        assert!(matches!(
            parse_classifications("] backwards ["),
            Err(ClassifierError::NoJsonArray)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_classifications("[{claim_id: c1}]"),
            Err(ClassifierError::JsonParse(_))
        ));
    }

    #[test]
    fn test_one_bad_element_rejects_all() {
        let response = r#"[
            {"claim_id": "c1", "is_verifiable": true, "reason": "ok"},
            {"claim_id": "c2", "is_verifiable": "maybe", "reason": "bad type"}
        ]"#;
        assert!(matches!(
            parse_classifications(response),
            Err(ClassifierError::JsonParse(_))
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let response = r#"[{"claim_id": "c1", "is_verifiable": true}]"#;
        assert!(parse_classifications(response).is_err());
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_classifications("[]").unwrap().is_empty());
    }
}
