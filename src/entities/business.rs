// 🏢 Business Entity - One output row per accepted registry record
// Identity is a UUID minted at projection time; values are frozen once
// the record is appended to the output set

use crate::reader::SourceRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calendar formats accepted for the registration-date column.
/// Tried in order after RFC 3339.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];

// ============================================================================
// REGISTRATION DATE
// ============================================================================

/// Outcome of parsing the source registration-date string.
///
/// Invalid is distinct from Absent so the pipeline can emit a diagnostic
/// for garbage dates without rejecting the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationDate {
    /// Column was empty
    Absent,

    /// Parsed as a calendar date/time
    Parsed(DateTime<Utc>),

    /// Non-empty but unparseable; field degrades to null
    Invalid,
}

impl RegistrationDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return RegistrationDate::Absent;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return RegistrationDate::Parsed(dt.with_timezone(&Utc));
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return RegistrationDate::Parsed(dt.and_utc());
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return RegistrationDate::Parsed(dt.and_utc());
                }
            }
        }

        RegistrationDate::Invalid
    }

    /// Value for the `created_at` field; Absent and Invalid both null
    pub fn value(&self) -> Option<DateTime<Utc>> {
        match self {
            RegistrationDate::Parsed(dt) => Some(*dt),
            RegistrationDate::Absent | RegistrationDate::Invalid => None,
        }
    }
}

// ============================================================================
// BUSINESS ENTITY
// ============================================================================

/// Directory business entity, shaped for the backend `businesses` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    /// Stable identity (UUID), unique across the output set
    pub id: String,

    pub name: String,

    /// Verbatim industrial classification text
    pub description: String,

    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,

    /// Fixed default; no rating data in registry exports
    pub rating: f64,

    pub is_verified: bool,
    pub is_member: bool,
    pub images: Vec<String>,
    pub location: Option<String>,
    pub operating_hours: Option<String>,
    pub is_open: bool,

    /// Fixed literal per run ("approved" or "pending")
    pub status: String,

    pub owner_id: Option<String>,

    /// Registration date when present and valid, else null
    pub created_at: Option<DateTime<Utc>>,

    /// Processing timestamp
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Project an accepted source record into a Business with a fresh
    /// UUID and the directory defaults
    pub fn from_record(
        record: &SourceRecord,
        status: &str,
        created_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Business {
            id: uuid::Uuid::new_v4().to_string(),
            name: record.name.clone(),
            description: record.classification.clone(),
            address: record.address.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            website: record.website.clone(),
            rating: 0.0,
            is_verified: false,
            is_member: false,
            images: Vec::new(),
            location: None,
            operating_hours: None,
            is_open: false,
            status: status.to_string(),
            owner_id: None,
            created_at,
            updated_at: now,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_absent() {
        assert_eq!(RegistrationDate::parse(""), RegistrationDate::Absent);
        assert_eq!(RegistrationDate::parse("   "), RegistrationDate::Absent);
        assert_eq!(RegistrationDate::parse("").value(), None);
    }

    #[test]
    fn test_parse_iso_date() {
        let parsed = RegistrationDate::parse("2001-04-12");
        match parsed {
            RegistrationDate::Parsed(dt) => {
                assert_eq!(dt.year(), 2001);
                assert_eq!(dt.month(), 4);
                assert_eq!(dt.day(), 12);
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = RegistrationDate::parse("1998-11-30T00:00:00Z");
        assert!(matches!(parsed, RegistrationDate::Parsed(_)));
    }

    #[test]
    fn test_parse_slash_format() {
        let parsed = RegistrationDate::parse("12/04/2001");
        assert!(matches!(parsed, RegistrationDate::Parsed(_)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            RegistrationDate::parse("not a date"),
            RegistrationDate::Invalid
        );
        assert_eq!(RegistrationDate::parse("not a date").value(), None);
        // Invalid is not Absent
        assert_ne!(
            RegistrationDate::parse("garbage"),
            RegistrationDate::Absent
        );
    }

    #[test]
    fn test_from_record_defaults() {
        let record = SourceRecord {
            name: "Acme Traders".to_string(),
            classification: "Trading".to_string(),
            address: "MG Road, Vijayawada".to_string(),
            ..Default::default()
        };

        let now = Utc::now();
        let business = Business::from_record(&record, "approved", None, now);

        assert_eq!(business.name, "Acme Traders");
        assert_eq!(business.description, "Trading");
        assert_eq!(business.status, "approved");
        assert_eq!(business.rating, 0.0);
        assert!(!business.is_verified);
        assert!(!business.is_member);
        assert!(!business.is_open);
        assert!(business.images.is_empty());
        assert!(business.location.is_none());
        assert!(business.operating_hours.is_none());
        assert!(business.owner_id.is_none());
        assert!(business.created_at.is_none());
        assert_eq!(business.updated_at, now);
        // Absent contact columns become empty strings
        assert_eq!(business.phone, "");
    }

    #[test]
    fn test_fresh_uuid_per_business() {
        let record = SourceRecord::default();
        let now = Utc::now();

        let a = Business::from_record(&record, "approved", None, now);
        let b = Business::from_record(&record, "approved", None, now);
        assert_ne!(a.id, b.id);
    }
}
