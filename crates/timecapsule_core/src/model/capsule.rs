//! Capsule domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by the store, service and front ends.
//! - Provide creation input validation and the unlock boundary rule.
//!
//! # Invariants
//! - `id` is never reused for another capsule within one store.
//! - Capsules are immutable after creation; there is no update path.
//! - `open_date` carries no time component; locking compares calendar days.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a stored capsule.
///
/// Kept numeric to match the persisted wire shape (`id` is a JSON number).
pub type CapsuleId = u64;

/// Canonical stored record for one time capsule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capsule {
    /// Stable id assigned at creation, used as the only lookup key.
    pub id: CapsuleId,
    /// Short non-empty headline, always visible.
    pub title: String,
    /// Non-empty body text, withheld from presentation until unlocked.
    pub message: String,
    /// Calendar day the capsule unlocks, serialized as `YYYY-MM-DD`.
    #[serde(rename = "openDate")]
    pub open_date: NaiveDate,
    /// Creation instant, recorded for audit and used in no logic.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Capsule {
    /// Returns whether this capsule is still sealed on the given day.
    ///
    /// The boundary day itself is unlocked: a capsule opening today is open.
    pub fn is_locked_on(&self, on: NaiveDate) -> bool {
        on < self.open_date
    }
}

/// Unvalidated creation input, matching the external request body.
///
/// Fields default to empty strings so an absent request field flows into
/// `validate()` as a missing-field error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CapsuleDraft {
    pub title: String,
    pub message: String,
    /// Open date as user-supplied text; parsed during validation.
    #[serde(rename = "openDate")]
    pub open_date: String,
}

impl CapsuleDraft {
    /// Validates all creation fields and parses the open date.
    ///
    /// # Contract
    /// - `title`, `message` and `open_date` must be non-blank.
    /// - `open_date` must parse as a `YYYY-MM-DD` calendar day.
    /// - Returns the parsed open date on success; the draft itself is
    ///   otherwise taken verbatim (no trimming of stored text).
    pub fn validate(&self) -> Result<NaiveDate, CapsuleValidationError> {
        if self.title.trim().is_empty() {
            return Err(CapsuleValidationError::MissingField("title"));
        }
        if self.message.trim().is_empty() {
            return Err(CapsuleValidationError::MissingField("message"));
        }
        if self.open_date.trim().is_empty() {
            return Err(CapsuleValidationError::MissingField("openDate"));
        }
        NaiveDate::parse_from_str(self.open_date.trim(), "%Y-%m-%d")
            .map_err(|_| CapsuleValidationError::InvalidOpenDate(self.open_date.clone()))
    }
}

/// Validation error for capsule creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapsuleValidationError {
    /// A required field is absent or blank.
    MissingField(&'static str),
    /// The open date is present but not a `YYYY-MM-DD` calendar day.
    InvalidOpenDate(String),
}

impl Display for CapsuleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "all fields are required; missing `{field}`")
            }
            Self::InvalidOpenDate(value) => {
                write!(f, "invalid open date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for CapsuleValidationError {}

#[cfg(test)]
mod tests {
    use super::{Capsule, CapsuleDraft, CapsuleValidationError};
    use chrono::{NaiveDate, Utc};

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid test date")
    }

    fn capsule(open_date: &str) -> Capsule {
        Capsule {
            id: 1,
            title: "t".to_string(),
            message: "m".to_string(),
            open_date: date(open_date),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn open_date_today_is_unlocked() {
        let capsule = capsule("2024-06-15");
        assert!(!capsule.is_locked_on(date("2024-06-15")));
    }

    #[test]
    fn open_date_tomorrow_is_locked() {
        let capsule = capsule("2024-06-16");
        assert!(capsule.is_locked_on(date("2024-06-15")));
    }

    #[test]
    fn open_date_in_past_is_unlocked() {
        let capsule = capsule("2020-01-01");
        assert!(!capsule.is_locked_on(date("2024-06-15")));
    }

    #[test]
    fn validate_accepts_complete_draft() {
        let draft = CapsuleDraft {
            title: "Letter".to_string(),
            message: "Hi future me".to_string(),
            open_date: "2030-01-01".to_string(),
        };
        assert_eq!(draft.validate().unwrap(), date("2030-01-01"));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        for (title, message, open_date, field) in [
            ("", "msg", "2025-01-01", "title"),
            ("t", "", "2025-01-01", "message"),
            ("t", "msg", "", "openDate"),
            ("   ", "msg", "2025-01-01", "title"),
        ] {
            let draft = CapsuleDraft {
                title: title.to_string(),
                message: message.to_string(),
                open_date: open_date.to_string(),
            };
            let err = draft.validate().unwrap_err();
            assert_eq!(err, CapsuleValidationError::MissingField(field));
        }
    }

    #[test]
    fn validate_rejects_malformed_date() {
        let draft = CapsuleDraft {
            title: "t".to_string(),
            message: "msg".to_string(),
            open_date: "next tuesday".to_string(),
        };
        assert!(matches!(
            draft.validate().unwrap_err(),
            CapsuleValidationError::InvalidOpenDate(_)
        ));
    }

    #[test]
    fn wire_field_names_match_persisted_layout() {
        let json = serde_json::to_value(capsule("2025-03-04")).unwrap();
        assert!(json.get("openDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["openDate"], "2025-03-04");
    }
}
