// 🚦 Record Filter - Status and geography gates
// Decides which registry records qualify for the output tables

use crate::reader::SourceRecord;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Only records with this literal status survive the status gate
pub const ACTIVE_STATUS: &str = "Active";

// ============================================================================
// REGION POLICY
// ============================================================================

/// Geographic eligibility: an address qualifies when it mentions one of
/// the area or district names (case-insensitive substring) or carries a
/// 6-digit postal code on the allow-list.
pub struct RegionPolicy {
    /// Region name used in rejection messages
    pub name: String,
    areas: Vec<String>,
    districts: Vec<String>,
    postal_codes: HashSet<&'static str>,
    postal_token: Regex,
}

impl RegionPolicy {
    /// Policy for the Amaravati Capital Region
    pub fn amaravati_capital_region() -> Self {
        RegionPolicy {
            name: "the Amaravati Capital Region".to_string(),
            areas: VALID_AREAS.iter().map(|a| a.to_string()).collect(),
            districts: VALID_DISTRICTS.iter().map(|d| d.to_string()).collect(),
            postal_codes: VALID_POSTAL_CODES.iter().copied().collect(),
            // 6-digit token bounded by non-digits
            postal_token: Regex::new(r"\b\d{6}\b").expect("postal code pattern is valid"),
        }
    }

    /// Check area/district names against the address text
    pub fn matches_area(&self, address: &str) -> bool {
        let normalized = address.to_lowercase();

        self.areas
            .iter()
            .chain(self.districts.iter())
            .any(|place| normalized.contains(&place.to_lowercase()))
    }

    /// Extract the first 6-digit token and check the allow-list
    pub fn matches_postal_code(&self, address: &str) -> bool {
        match self.postal_token.find(address) {
            Some(token) => self.postal_codes.contains(token.as_str()),
            None => false,
        }
    }

    /// Either gate admits the address
    pub fn contains(&self, address: &str) -> bool {
        self.matches_area(address) || self.matches_postal_code(address)
    }
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self::amaravati_capital_region()
    }
}

// ============================================================================
// REJECTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Status gate: record status is not "Active"
    NotActive,

    /// Geography gate: address matched neither area names nor postal codes
    OutsideRegion { region: String },
}

/// One entry in the rejection log, tied to the originating record
#[derive(Debug, Clone)]
pub struct Rejection {
    pub company: String,
    pub address: String,
    pub reason: RejectionReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectionReason::NotActive => write!(
                f,
                "Business \"{}\" with address \"{}\" is not active.",
                self.company, self.address
            ),
            RejectionReason::OutsideRegion { region } => write!(
                f,
                "Business \"{}\" with address \"{}\" is outside {}.",
                self.company, self.address, region
            ),
        }
    }
}

// ============================================================================
// RECORD FILTER
// ============================================================================

/// Two independent gates. The status gate always applies; the geography
/// gate applies only when a region policy is configured. A record failing
/// status is never evaluated against geography.
pub struct RecordFilter {
    region: Option<RegionPolicy>,
}

impl RecordFilter {
    pub fn new(region: Option<RegionPolicy>) -> Self {
        RecordFilter { region }
    }

    /// Status-only variant
    pub fn status_only() -> Self {
        RecordFilter { region: None }
    }

    /// Accept the record, or explain why not
    pub fn evaluate(&self, record: &SourceRecord) -> Result<(), Rejection> {
        if record.status != ACTIVE_STATUS {
            return Err(Rejection {
                company: record.name.clone(),
                address: record.address.clone(),
                reason: RejectionReason::NotActive,
            });
        }

        if let Some(region) = &self.region {
            if !region.contains(&record.address) {
                return Err(Rejection {
                    company: record.name.clone(),
                    address: record.address.clone(),
                    reason: RejectionReason::OutsideRegion {
                        region: region.name.clone(),
                    },
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// REGION DATA
// ============================================================================

/// Amaravati Capital Region area names
const VALID_AREAS: &[&str] = &[
    "Amaravati",
    "Amaravathi",
    "Guntur",
    "Mangalagiri",
    "Vijayawada",
    "Tenali",
];

/// Districts covering the capital region
const VALID_DISTRICTS: &[&str] = &["Guntur", "Krishna"];

/// Postal codes inside the capital region
const VALID_POSTAL_CODES: &[&str] = &[
    "520001", "520002", "520003", "520004", "520007", "520008", "520010", "520011", "520012", "520013",
    "520015", "521001", "521002", "521101", "521102", "521104", "521105", "521106", "521107", "521108",
    "521109", "521110", "521111", "521120", "521121", "521125", "521126", "521130", "521131", "521132",
    "521133", "521135", "521136", "521137", "521138", "521139", "521148", "521149", "521150", "521151",
    "521153", "521156", "521157", "521158", "521162", "521163", "521164", "521165", "521170", "521175",
    "521178", "521180", "521181", "521182", "521183", "521185", "521190", "521201", "521207", "521211",
    "521212", "521213", "521214", "521215", "521225", "521227", "521228", "521229", "521230", "521235",
    "521241", "521245", "521246", "521247", "521250", "521256", "521260", "521261", "521263", "521286",
    "521301", "521311", "521312", "521321", "521322", "521323", "521324", "521325", "521326", "521327",
    "521328", "521329", "521330", "521331", "521332", "521333", "521340", "521343", "521345", "521356",
    "521366", "521369", "521390", "521401", "521402", "521403", "521444", "521456", "521457", "522001",
    "522002", "522003", "522004", "522005", "522006", "522007", "522009", "522015", "522016", "522017",
    "522018", "522019", "522020", "522034", "522101", "522111", "522112", "522113", "522124", "522125",
    "522201", "522202", "522211", "522212", "522213", "522233", "522234", "522235", "522236", "522237",
    "522256", "522257", "522258", "522259", "522261", "522262", "522264", "522265", "522268", "522301",
    "522302", "522303", "522304", "522305", "522306", "522307", "522308", "522309", "522310", "522311",
    "522312", "522313", "522314", "522315", "522316", "522317", "522318", "522324", "522325", "522329",
    "522330", "522341", "522401", "522402", "522403", "522408", "522409", "522410", "522411", "522412",
    "522413", "522414", "522415", "522421", "522426", "522435", "522436", "522437", "522438", "522439",
    "522501", "522502", "522503", "522508", "522509", "522510", "522529", "522549", "522601", "522603",
    "522611", "522612", "522613", "522614", "522615", "522616", "522617", "522619", "522626", "522646",
    "522647", "522649", "522657", "522658", "522659", "522660", "522661", "522663",
];

// ============================================================================
// TESTS
// ============================================================================
