// Registry Pipeline - Core Library
// Exposes all modules for use in the CLI, webhook server, and tests

pub mod classifier;
pub mod entities;
pub mod filter;
pub mod pipeline;
pub mod reader;
pub mod webhook;
pub mod writer;

// Re-export commonly used types
pub use classifier::{slugify, Classification, ClassificationTable, FALLBACK_LABEL};
pub use entities::{Business, Category, CategoryLink, CategoryRegistry, RegistrationDate};
pub use filter::{RecordFilter, RegionPolicy, Rejection, RejectionReason, ACTIVE_STATUS};
pub use pipeline::{
    run_file, Pipeline, PipelineOptions, PipelineOutput, RunReport,
    BUSINESSES_FILE, CATEGORIES_FILE, ERROR_LOG_FILE, MAPPINGS_FILE,
};
pub use reader::{load_source_csv, prepare_csv, SourceRecord};
pub use webhook::{Article, PublishPayload, DEFAULT_AUTHOR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
