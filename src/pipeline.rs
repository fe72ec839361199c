// ⚙️ Pipeline Driver - Filter → Classifier → Assigner → Projector
// Single-threaded, single forward pass; outputs buffer in memory and
// materialize together at end-of-run

use crate::classifier::ClassificationTable;
use crate::entities::{Business, CategoryLink, CategoryRegistry, RegistrationDate};
use crate::filter::{RecordFilter, RegionPolicy, Rejection};
use crate::reader::{load_source_csv, SourceRecord};
use crate::writer;
use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Output file names within the destination directory
pub const BUSINESSES_FILE: &str = "businesses.csv";
pub const CATEGORIES_FILE: &str = "business_categories.csv";
pub const MAPPINGS_FILE: &str = "business_category_mappings.csv";
pub const ERROR_LOG_FILE: &str = "category_errors.log";

// ============================================================================
// OPTIONS
// ============================================================================

/// Per-run configuration
pub struct PipelineOptions {
    /// Geography gate; None runs the status-only variant
    pub region: Option<RegionPolicy>,

    /// Fixed status literal stamped on every output business
    pub business_status: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            region: Some(RegionPolicy::amaravati_capital_region()),
            business_status: "approved".to_string(),
        }
    }
}

impl PipelineOptions {
    /// Status-only variant (no geography gate)
    pub fn status_only() -> Self {
        PipelineOptions {
            region: None,
            ..Default::default()
        }
    }
}

// ============================================================================
// RUN STATE
// ============================================================================

/// Strictly sequential phases; no backtracking or re-processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// Consuming source rows one at a time
    Streaming,

    /// Source exhausted; deriving summary structures
    Finalizing,

    /// Outputs handed over for materialization
    Done,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// One pipeline run. Owns the category registry and every output buffer;
/// nothing is written until the full pass completes.
pub struct Pipeline {
    table: ClassificationTable,
    filter: RecordFilter,
    status: String,
    state: RunState,

    registry: CategoryRegistry,
    businesses: Vec<Business>,
    links: Vec<CategoryLink>,
    rejections: Vec<Rejection>,
    diagnostics: Vec<String>,
}

impl Pipeline {
    pub fn new(table: ClassificationTable, options: PipelineOptions) -> Self {
        Pipeline {
            table,
            filter: RecordFilter::new(options.region),
            status: options.business_status,
            state: RunState::Streaming,
            registry: CategoryRegistry::new(),
            businesses: Vec::new(),
            links: Vec::new(),
            rejections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Pipeline with the built-in classification table and default options
    pub fn with_defaults() -> Self {
        Pipeline::new(ClassificationTable::with_defaults(), PipelineOptions::default())
    }

    /// Feed one source row through Filter → Classifier → Assigner →
    /// Projector. Returns true when the record was accepted.
    pub fn process(&mut self, record: &SourceRecord) -> bool {
        debug_assert_eq!(self.state, RunState::Streaming);

        if let Err(rejection) = self.filter.evaluate(record) {
            self.rejections.push(rejection);
            return false;
        }

        let classification = self.table.classify_slug(&record.slug());
        let now = Utc::now();

        let registration = RegistrationDate::parse(&record.registration_date);
        if registration == RegistrationDate::Invalid {
            // Soft error: field degrades to null, record stays in
            self.diagnostics.push(format!(
                "Invalid date for company: {}, Date: {}",
                record.name, record.registration_date
            ));
        }

        let business = Business::from_record(record, &self.status, registration.value(), now);
        let category_id = self.registry.resolve(classification.label(), now);

        self.links
            .push(CategoryLink::new(business.id.clone(), category_id, now));
        self.businesses.push(business);

        true
    }

    /// Finalize the run: derive the informational category-description
    /// index and hand over the buffered outputs.
    pub fn finalize(mut self) -> PipelineOutput {
        self.state = RunState::Finalizing;

        // Informational only: first classification text seen per label
        let mut category_descriptions: HashMap<String, String> = HashMap::new();
        for business in &self.businesses {
            category_descriptions
                .entry(business.description.clone())
                .or_insert_with(|| business.description.clone());
        }

        self.state = RunState::Done;

        PipelineOutput {
            businesses: self.businesses,
            categories: self.registry.into_categories(),
            links: self.links,
            rejections: self.rejections,
            diagnostics: self.diagnostics,
            category_descriptions,
        }
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Everything one run produced, still in memory
pub struct PipelineOutput {
    pub businesses: Vec<Business>,
    pub categories: Vec<crate::entities::Category>,
    pub links: Vec<CategoryLink>,
    pub rejections: Vec<Rejection>,

    /// Soft-error diagnostics (invalid dates); informational
    pub diagnostics: Vec<String>,

    /// Informational classification-text index built during finalization
    pub category_descriptions: HashMap<String, String>,
}

impl PipelineOutput {
    /// Materialize all outputs into a directory. The rejection log is
    /// written only when at least one rejection occurred.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<RunReport> {
        let dir = dir.as_ref();

        writer::write_businesses(dir.join(BUSINESSES_FILE), &self.businesses)?;
        writer::write_categories(dir.join(CATEGORIES_FILE), &self.categories)?;
        writer::write_links(dir.join(MAPPINGS_FILE), &self.links)?;

        let error_log = if self.rejections.is_empty() {
            None
        } else {
            let path = dir.join(ERROR_LOG_FILE);
            writer::write_rejection_log(&path, &self.rejections)?;
            Some(path)
        };

        Ok(RunReport {
            accepted: self.businesses.len(),
            rejected: self.rejections.len(),
            categories: self.categories.len(),
            invalid_dates: self.diagnostics.len(),
            error_log,
        })
    }
}

/// Summary reported to the user after a completed run
#[derive(Debug)]
pub struct RunReport {
    pub accepted: usize,
    pub rejected: usize,
    pub categories: usize,
    pub invalid_dates: usize,
    pub error_log: Option<PathBuf>,
}

// ============================================================================
// DRIVER
// ============================================================================

/// Full run over a source CSV: load, stream every row, finalize, and
/// materialize all outputs into `out_dir`. Source read failures and
/// unwritable destinations abort before any output is committed.
pub fn run_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
    table: ClassificationTable,
    options: PipelineOptions,
) -> Result<(RunReport, Vec<String>)> {
    let records = load_source_csv(input)?;

    let mut pipeline = Pipeline::new(table, options);
    for record in &records {
        pipeline.process(record);
    }

    let output = pipeline.finalize();
    let report = output.write_to_dir(out_dir)?;

    Ok((report, output.diagnostics))
}

// ============================================================================
// TESTS
// ============================================================================
