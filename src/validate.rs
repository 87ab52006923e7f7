//! Field-level validation for livestock submissions.
//!
//! The same rule set runs on both sides of the wire: the server applies it
//! before any write, and the client applies it before the network round trip
//! so obviously invalid input never leaves the process. Rules:
//!
//! - `type`, `breed`, and `healthStatus` must be non-empty text
//!   (whitespace-only counts as empty)
//! - `age` must be a finite, strictly positive number
//!
//! Validation is a pure function from a candidate to a list of violations;
//! an empty list means the candidate is acceptable.

use serde::{Deserialize, Serialize};

use crate::livestock::LivestockCandidate;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Wire name of the offending field.
    pub field: String,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl Violation {
    /// Creates a violation for `field` with `message`.
    pub fn new(field: &str, message: &str) -> Self {
        Violation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validates a candidate as a full record: every field must be present and
/// satisfy its rule. Used on creation and on the merged record during update.
pub fn validate_full(candidate: &LivestockCandidate) -> Vec<Violation> {
    validate(candidate, true)
}

/// Validates only the fields present in the candidate. Used client-side
/// before a partial update, where omitted fields keep their stored values
/// and the server validates the merged result.
pub fn validate_present(candidate: &LivestockCandidate) -> Vec<Violation> {
    validate(candidate, false)
}

fn validate(candidate: &LivestockCandidate, require_all: bool) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_text(
        "type",
        "Type is required",
        candidate.kind.as_deref(),
        require_all,
        &mut violations,
    );
    check_text(
        "breed",
        "Breed is required",
        candidate.breed.as_deref(),
        require_all,
        &mut violations,
    );
    check_age(candidate.age, require_all, &mut violations);
    check_text(
        "healthStatus",
        "Health Status is required",
        candidate.health_status.as_deref(),
        require_all,
        &mut violations,
    );
    violations
}

fn check_text(
    field: &str,
    message: &str,
    value: Option<&str>,
    required: bool,
    out: &mut Vec<Violation>,
) {
    match value {
        Some(text) if !text.trim().is_empty() => {}
        Some(_) => out.push(Violation::new(field, message)),
        None if required => out.push(Violation::new(field, message)),
        None => {}
    }
}

fn check_age(value: Option<f64>, required: bool, out: &mut Vec<Violation>) {
    match value {
        Some(age) if age.is_finite() && age > 0.0 => {}
        Some(_) => out.push(Violation::new("age", "Age must be a positive number")),
        None if required => out.push(Violation::new("age", "Age is required")),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_candidate() -> LivestockCandidate {
        LivestockCandidate {
            kind: Some("cow".to_string()),
            breed: Some("Holstein".to_string()),
            age: Some(3.0),
            health_status: Some("good".to_string()),
        }
    }

    #[test]
    fn full_candidate_passes() {
        assert!(validate_full(&full_candidate()).is_empty());
    }

    #[test]
    fn missing_fields_each_reported() {
        let candidate = LivestockCandidate::default();
        let violations = validate_full(&candidate);
        assert_eq!(violations.len(), 4);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "breed", "age", "healthStatus"]);
    }

    #[test]
    fn empty_text_rejected() {
        let mut candidate = full_candidate();
        candidate.breed = Some(String::new());
        let violations = validate_full(&candidate);
        assert_eq!(violations, vec![Violation::new("breed", "Breed is required")]);
    }

    #[test]
    fn whitespace_only_text_rejected() {
        let mut candidate = full_candidate();
        candidate.kind = Some("   ".to_string());
        let violations = validate_full(&candidate);
        assert_eq!(violations, vec![Violation::new("type", "Type is required")]);
    }

    #[test]
    fn zero_age_rejected() {
        let mut candidate = full_candidate();
        candidate.age = Some(0.0);
        let violations = validate_full(&candidate);
        assert_eq!(
            violations,
            vec![Violation::new("age", "Age must be a positive number")]
        );
    }

    #[test]
    fn negative_age_rejected() {
        let mut candidate = full_candidate();
        candidate.age = Some(-2.0);
        assert_eq!(validate_full(&candidate).len(), 1);
    }

    #[test]
    fn non_finite_age_rejected() {
        let mut candidate = full_candidate();
        candidate.age = Some(f64::NAN);
        assert_eq!(validate_full(&candidate).len(), 1);
        candidate.age = Some(f64::INFINITY);
        assert_eq!(validate_full(&candidate).len(), 1);
    }

    #[test]
    fn present_only_skips_missing_fields() {
        let patch = LivestockCandidate {
            age: Some(4.5),
            ..LivestockCandidate::default()
        };
        assert!(validate_present(&patch).is_empty());
    }

    #[test]
    fn present_only_still_checks_present_fields() {
        let patch = LivestockCandidate {
            age: Some(-1.0),
            health_status: Some(String::new()),
            ..LivestockCandidate::default()
        };
        let violations = validate_present(&patch);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "age");
        assert_eq!(violations[1].field, "healthStatus");
    }

    #[test]
    fn empty_patch_passes_present_only() {
        assert!(validate_present(&LivestockCandidate::default()).is_empty());
    }

    #[test]
    fn violation_serializes_with_field_and_message() {
        let violation = Violation::new("age", "Age must be a positive number");
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"field": "age", "message": "Age must be a positive number"})
        );
    }
}
