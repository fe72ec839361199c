// 📝 Output Writer - Relational CSV tables + rejection log
// Fixed column orders; every cell is written as a quoted string

use crate::entities::{Business, Category, CategoryLink};
use crate::filter::Rejection;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::Path;

/// Column order of the businesses table
pub const BUSINESS_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "address",
    "phone",
    "email",
    "website",
    "rating",
    "is_verified",
    "is_member",
    "images",
    "location",
    "operating_hours",
    "is_open",
    "status",
    "owner_id",
    "created_at",
    "updated_at",
];

/// Column order of the categories table
pub const CATEGORY_COLUMNS: &[&str] = &["id", "name", "description", "created_at", "updated_at"];

/// Column order of the business-category link table
pub const LINK_COLUMNS: &[&str] = &["business_id", "category_id", "created_at", "updated_at"];

// ============================================================================
// CELL FORMATTING
// ============================================================================
// Missing, null, zero, and false values all collapse to the empty cell.
// This is the backend import convention: lossy for structured values,
// but every cell stays a plain quoted string.

fn time_cell(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn opt_time_cell(time: Option<DateTime<Utc>>) -> String {
    time.map(time_cell).unwrap_or_default()
}

fn opt_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn bool_cell(value: bool) -> String {
    if value {
        "true".to_string()
    } else {
        String::new()
    }
}

fn rating_cell(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn images_cell(images: &[String]) -> String {
    if images.is_empty() {
        String::new()
    } else {
        serde_json::to_string(images).unwrap_or_default()
    }
}

// ============================================================================
// ROW PROJECTION
// ============================================================================

pub(crate) fn business_row(business: &Business) -> Vec<String> {
    vec![
        business.id.clone(),
        business.name.clone(),
        business.description.clone(),
        business.address.clone(),
        business.phone.clone(),
        business.email.clone(),
        business.website.clone(),
        rating_cell(business.rating),
        bool_cell(business.is_verified),
        bool_cell(business.is_member),
        images_cell(&business.images),
        opt_cell(&business.location),
        opt_cell(&business.operating_hours),
        bool_cell(business.is_open),
        business.status.clone(),
        opt_cell(&business.owner_id),
        opt_time_cell(business.created_at),
        time_cell(business.updated_at),
    ]
}

pub(crate) fn category_row(category: &Category) -> Vec<String> {
    vec![
        category.id.clone(),
        category.name.clone(),
        category.description.clone(),
        time_cell(category.created_at),
        time_cell(category.updated_at),
    ]
}

pub(crate) fn link_row(link: &CategoryLink) -> Vec<String> {
    vec![
        link.business_id.clone(),
        link.category_id.clone(),
        time_cell(link.created_at),
        time_cell(link.updated_at),
    ]
}

// ============================================================================
// TABLE WRITERS
// ============================================================================

fn write_table<P: AsRef<Path>>(
    path: P,
    columns: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path.as_ref())
        .with_context(|| format!("Failed to create output CSV: {}", path.as_ref().display()))?;

    writer
        .write_record(columns)
        .context("Failed to write CSV header")?;

    for row in rows {
        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write row to {}", path.as_ref().display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.as_ref().display()))?;

    Ok(())
}

pub fn write_businesses<P: AsRef<Path>>(path: P, businesses: &[Business]) -> Result<()> {
    write_table(path, BUSINESS_COLUMNS, businesses.iter().map(business_row))
}

pub fn write_categories<P: AsRef<Path>>(path: P, categories: &[Category]) -> Result<()> {
    write_table(path, CATEGORY_COLUMNS, categories.iter().map(category_row))
}

pub fn write_links<P: AsRef<Path>>(path: P, links: &[CategoryLink]) -> Result<()> {
    write_table(path, LINK_COLUMNS, links.iter().map(link_row))
}

/// Write the rejection log: one free-text line per rejection.
/// Callers skip this entirely when no rejection occurred.
pub fn write_rejection_log<P: AsRef<Path>>(path: P, rejections: &[Rejection]) -> Result<()> {
    let content = rejections
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    fs::write(path.as_ref(), content)
        .with_context(|| format!("Failed to write rejection log: {}", path.as_ref().display()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RejectionReason;
    use crate::reader::SourceRecord;

    fn sample_business() -> Business {
        let record = SourceRecord {
            name: "Acme Traders".to_string(),
            classification: "Trading".to_string(),
            address: "MG Road, Vijayawada".to_string(),
            phone: "08662-12345".to_string(),
            ..Default::default()
        };
        Business::from_record(&record, "approved", None, Utc::now())
    }

    #[test]
    fn test_business_row_falsy_collapse() {
        let business = sample_business();
        let row = business_row(&business);

        assert_eq!(row.len(), BUSINESS_COLUMNS.len());
        // rating, flags, images, location, operating_hours, owner_id,
        // created_at all collapse to empty cells
        assert_eq!(row[7], "");
        assert_eq!(row[8], "");
        assert_eq!(row[9], "");
        assert_eq!(row[10], "");
        assert_eq!(row[11], "");
        assert_eq!(row[12], "");
        assert_eq!(row[13], "");
        assert_eq!(row[15], "");
        assert_eq!(row[16], "");
        // status and updated_at are populated
        assert_eq!(row[14], "approved");
        assert!(row[17].ends_with('Z'));
    }

    #[test]
    fn test_business_row_populated_created_at() {
        let mut business = sample_business();
        business.created_at = Some(Utc::now());

        let row = business_row(&business);
        assert!(row[16].ends_with('Z'));
    }

    #[test]
    fn test_time_cell_millisecond_format() {
        let time = DateTime::parse_from_rfc3339("2001-04-12T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(time_cell(time), "2001-04-12T00:00:00.000Z");
    }

    #[test]
    fn test_write_businesses_quotes_every_cell() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_businesses(file.path(), &[sample_business()]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = content.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("\"id\",\"name\""));

        let row = lines.next().unwrap();
        assert!(row.contains("\"Acme Traders\""));
        // Empty cells still appear quoted
        assert!(row.contains("\"\""));
    }

    #[test]
    fn test_write_categories_column_order() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let category = Category::new("Education".to_string(), Utc::now());
        write_categories(file.path(), &[category]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with(
            "\"id\",\"name\",\"description\",\"created_at\",\"updated_at\""
        ));
    }

    #[test]
    fn test_write_rejection_log_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let rejections = vec![
            Rejection {
                company: "Gone Ltd".to_string(),
                address: "Hyderabad".to_string(),
                reason: RejectionReason::NotActive,
            },
            Rejection {
                company: "Far Away Pvt Ltd".to_string(),
                address: "Chennai".to_string(),
                reason: RejectionReason::OutsideRegion {
                    region: "the Amaravati Capital Region".to_string(),
                },
            },
        ];

        write_rejection_log(file.path(), &rejections).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("is not active"));
        assert!(lines[1].contains("outside the Amaravati Capital Region"));
    }

    #[test]
    fn test_write_to_unwritable_destination_is_fatal() {
        let result = write_businesses("/nonexistent/dir/businesses.csv", &[]);
        assert!(result.is_err());
    }
}
