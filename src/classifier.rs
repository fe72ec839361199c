// 🏷️ Category Classifier - Slug normalization + static lookup table
// Maps free-text industrial classification strings to short category labels

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Label used when no table entry matches a slug.
/// Kept distinct from legitimate labels by the Classification enum below.
pub const FALLBACK_LABEL: &str = "TODO";

// ============================================================================
// SLUG NORMALIZATION
// ============================================================================

/// Normalize raw classification text into a slug.
///
/// Lower-cases, strips everything outside `[a-z0-9 ]`, then replaces
/// spaces with underscores. Total: every input (including empty) yields
/// a slug.
///
/// # Examples
/// ```
/// use registry_pipeline::classifier::slugify;
///
/// assert_eq!(slugify("Manufacturing (Textiles)"), "manufacturing_textiles");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Outcome of a table lookup.
///
/// "No mapping found" is a first-class outcome, not a magic string: a
/// record whose classification text literally slugs to the fallback label
/// can never be confused with an unclassified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Slug resolved to a short category label via the table
    Mapped(String),

    /// Slug has no table entry; record goes to the catch-all bucket
    Fallback,
}

impl Classification {
    /// The category label this record files under
    pub fn label(&self) -> &str {
        match self {
            Classification::Mapped(label) => label,
            Classification::Fallback => FALLBACK_LABEL,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Classification::Fallback)
    }
}

// ============================================================================
// CLASSIFICATION TABLE
// ============================================================================

/// Static slug → label table.
///
/// The table is data, not logic: it can be loaded from a JSON file for
/// validation and versioning, or built from the compiled-in registry
/// defaults. Several slugs intentionally map to the same label (e.g. the
/// manufacturing slugs that all file under "Chemicals") - this is
/// many-to-one compression.
pub struct ClassificationTable {
    map: HashMap<String, String>,
}

impl ClassificationTable {
    /// Create an empty table (classifies everything as fallback)
    pub fn new() -> Self {
        ClassificationTable {
            map: HashMap::new(),
        }
    }

    /// Create a table with the built-in registry mappings
    pub fn with_defaults() -> Self {
        let map = DEFAULT_TABLE
            .iter()
            .map(|(slug, label)| (slug.to_string(), label.to_string()))
            .collect();
        ClassificationTable { map }
    }

    /// Load a table from a JSON file holding a flat slug → label object
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read classification table: {:?}", path.as_ref()))?;

        let map: HashMap<String, String> = serde_json::from_str(&content)
            .context("Failed to parse classification table JSON")?;

        Ok(ClassificationTable { map })
    }

    /// Look up a precomputed slug
    pub fn classify_slug(&self, slug: &str) -> Classification {
        match self.map.get(slug) {
            Some(label) => Classification::Mapped(label.clone()),
            None => Classification::Fallback,
        }
    }

    /// Slugify raw classification text, then look it up
    pub fn classify(&self, raw_text: &str) -> Classification {
        self.classify_slug(&slugify(raw_text))
    }

    /// Number of slug entries loaded
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// BUILT-IN TABLE
// ============================================================================

/// Registry classification slugs → simplified category labels
const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("business_services", "Services"),
    ("construction", "Construction"),
    ("real_estate_and_renting", "RealEstate"),
    ("trading", "Trading"),
    ("manufacturing_textiles", "Textiles"),
    ("other_professional_scientific_and_technical_activities", "Professional"),
    ("manufacturing_paper__paper_products_publishing_printing_and_reproduction_of_recorded_media", "Publishing"),
    ("manufacturing_metals__chemicals_and_products_thereof", "Chemicals"),
    ("manufacture_of_basic_metals", "Metals"),
    ("agriculture_and_allied_activities", "Agriculture"),
    ("manufacturing_machinery__equipments", "Machinery"),
    ("manufacture_of_other_transport_equipment", "Transport"),
    ("community_personal__social_services", "Community"),
    ("manufacture_of_computer_electronicand_optical_products", "Electronics"),
    ("education", "Education"),
    ("other_personal_service_activities", "Personal"),
    ("sports_activities_and_amusement_and_recreation_activities", "Recreation"),
    ("activities_of_membership_organizations", "Organizations"),
    ("accommodation", "Accommodation"),
    ("finance", "Finance"),
    ("food_and_beverage_service_activities", "FoodService"),
    ("publishing_activities", "Publishing"),
    ("transport_storage_and_communications", "Communications"),
    ("programming_and_broadcasting_activities", "Broadcasting"),
    ("computer_programming_consultancyand_relatedactivities", "Technology"),
    ("manufacturing_leather__products_thereof", "Leather"),
    ("manufacturing_wood_products", "Wood"),
    ("manufacture_of_pharmaceuticals_medicinal_chemical_and_botanical_products", "Pharmaceuticals"),
    ("activitiesofheadofficesmanagementconsultancyactivities", "Management"),
    ("architecture_and_engineering_activities_technical_testing_and_analysis", "Engineering"),
    ("scientific_research_and_development", "Research"),
    ("human_health_activities", "Healthcare"),
    ("social_work_activities_without_accommodation", "SocialWork"),
    ("manufacturing_others", "Manufacturing"),
    ("unclassified", "Unclassified"),
    ("electricity_gas__water_companies", "Utilities"),
    ("mining__quarrying", "Mining"),
    ("manufacture_of_food_products", "FoodProducts"),
    ("manufacturing_food_stuffs", "FoodProcessing"),
    ("wholesaletradeexceptofmotorvehiclesandmotorcycles", "Wholesale"),
    ("retail_trade_except_of_motor_vehicles_and_motorcycles", "Retail"),
    ("rental_and_leasing_activities", "Leasing"),
    ("employment_activities", "Employment"),
    ("office_administrative_office_support_and", "Administration"),
    ("telecommunications", "Telecommunications"),
    ("manufacture_of_coke_and_refined_petroleum_products", "Petroleum"),
    ("manufacture_of_beverages", "Beverages"),
    ("publicadministrationanddefencecompulsory_social_security", "Government"),
    ("electricity_gas_steam_and_aircondition_supply", "Energy"),
    ("wholesale_and_retail_trade_and_repair_of_motor_vehicles_and_motorcycles", "Automotive"),
    ("construction_of_buildings", "Buildings"),
    ("civil_engineering", "Engineering"),
    ("motion_picture_video_and_television_programme_production_sound_recording_and_music_publishing_activities", "Media"),
    ("information_service_activities", "Information"),
    ("warehousing_and_support_activities_for_transportation", "Logistics"),
    ("legal_and_accounting_activities", "Legal"),
    ("financial_service_activities_except_insurance_and_pension_funding", "Banking"),
    ("manufacture_of_wearing_apparel", "Apparel"),
    ("repair_and_installation_of_machinery_and_equipment", "Equipment"),
    ("insurance", "Insurance"),
    ("sewerage", "Sewerage"),
    ("waste_collection_treatment_and_disposal_activities_materials_recovery", "WasteManagement"),
    ("advertising_and_market_research", "Advertising"),
    ("manufacture_of_electrical_equipment", "Electrical"),
    ("services_to_buildings_and_landscape_activities", "Landscaping"),
    ("manufacture_of_paper_and_paper_products", "Paper"),
    ("travel_agency_tour_operator_and_other_reservation_service_activities", "Tourism"),
    ("manufacture_of_other_nonmetallic_mineral_products", "Minerals"),
    ("undifferentiated_goods_and_servicesproducing_activities_of_private_households_for_own_use", "Household"),
    ("forestry_and_logging", "Forestry"),
    ("remediationactivitiesandotherwastemanagementservices", "Environmental"),
    ("manufacture_of_fabricated_metal_products_except_machinery_and_equipment", "MetalProducts"),
    ("postal_and_courier_activities", "Postal"),
    ("manufacture_of_rubber_and_plastics_products", "Plastics"),
    ("fishing_and_aquaculture", "Fishing"),
    ("manufacture_of_tobacco_products", "Tobacco"),
    ("security_and_investigation_activities", "Security"),
    ("extraction_of_crude_petroleum_and_natural_gas", "Oil"),
    ("manufacture_of_motor_vehicles_trailers_and_semitrailers", "Automotive"),
    ("manufacture_of_leather_and_related_products", "Leather"),
    ("printing_and_reproduction_of_recorded_media_this_division_excludes_publishing_activities_see_section_j_for_publishing_activities", "Printing"),
    ("creative_arts_and_entertainment_activities", "Entertainment"),
    ("mining_of_coal_and_lignite", "Coal"),
    ("mining_support_service_activities", "Mining"),
    ("water_transport", "Maritime"),
    ("air_transport", "Aviation"),
    ("mining_of_metal_ores", "Mining"),
    ("residential_care_activities", "Healthcare"),
    ("repair_of_computers_and_personal_and_household_goods", "Repair"),
    ("manufacture_of_furniture", "Furniture"),
    ("manufacture_of_chemicals_and_chemical_products", "Chemicals"),
];

// ============================================================================
// TESTS
// ============================================================================
