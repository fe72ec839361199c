// 📂 Source Reader - Registry CSV input
// Loads raw registry rows and runs the slug pre-pass

use crate::classifier::slugify;
use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Header of the classification column in registry exports
pub const CLASSIFICATION_COLUMN: &str = "CompanyIndustrialClassification";

/// Header of the precomputed slug column added by the prepare pass
pub const SLUG_COLUMN: &str = "simplified_category";

// ============================================================================
// SOURCE RECORD
// ============================================================================

/// One raw registry row. Ephemeral: exists only while the row is being
/// pushed through the pipeline. Absent columns deserialize as empty
/// strings, never as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "CompanyName", default)]
    pub name: String,

    #[serde(rename = "CompanyStatus", default)]
    pub status: String,

    #[serde(rename = "CompanyIndustrialClassification", default)]
    pub classification: String,

    #[serde(rename = "Registered_Office_Address", default)]
    pub address: String,

    #[serde(rename = "Phone", default)]
    pub phone: String,

    #[serde(rename = "Email", default)]
    pub email: String,

    #[serde(rename = "Website", default)]
    pub website: String,

    #[serde(rename = "CompanyRegistrationdate_date", default)]
    pub registration_date: String,

    /// Precomputed slug from the prepare pass; empty when the pipeline
    /// runs directly on a raw export
    #[serde(rename = "simplified_category", default)]
    pub simplified_category: String,
}

impl SourceRecord {
    /// Slug for classification: the precomputed column when present,
    /// otherwise derived from the raw classification text
    pub fn slug(&self) -> String {
        if self.simplified_category.is_empty() {
            slugify(&self.classification)
        } else {
            self.simplified_category.clone()
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load all registry rows from a CSV export.
///
/// An unreadable file or a malformed CSV structure is fatal; missing
/// optional columns are not.
pub fn load_source_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SourceRecord>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open source CSV: {}", path.as_ref().display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();

    for (line_num, result) in reader.deserialize::<SourceRecord>().enumerate() {
        let record = result.with_context(|| {
            format!(
                "Failed to parse CSV line {} in {}",
                line_num + 2, // 1-indexed + header row
                path.as_ref().display()
            )
        })?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// SLUG PRE-PASS
// ============================================================================

/// Rewrite a registry CSV with a `simplified_category` column appended.
///
/// Every existing column is preserved as-is; the new column holds the
/// slug of the classification text (empty when the row has none).
/// Returns the number of rows written.
pub fn prepare_csv<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize> {
    let file = File::open(input.as_ref())
        .with_context(|| format!("Failed to open source CSV: {}", input.as_ref().display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();

    let classification_idx = headers
        .iter()
        .position(|h| h == CLASSIFICATION_COLUMN);

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(output.as_ref())
        .with_context(|| format!("Failed to create output CSV: {}", output.as_ref().display()))?;

    let mut out_headers = headers.clone();
    out_headers.push_field(SLUG_COLUMN);
    writer
        .write_record(&out_headers)
        .context("Failed to write CSV headers")?;

    let mut count = 0;
    for (line_num, result) in reader.records().enumerate() {
        let record: StringRecord = result.with_context(|| {
            format!("Failed to parse CSV line {}", line_num + 2)
        })?;

        let slug = classification_idx
            .and_then(|idx| record.get(idx))
            .map(slugify)
            .unwrap_or_default();

        let mut out = record.clone();
        out.push_field(&slug);
        writer
            .write_record(&out)
            .with_context(|| format!("Failed to write CSV line {}", line_num + 2))?;
        count += 1;
    }

    writer.flush().context("Failed to flush output CSV")?;

    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================
