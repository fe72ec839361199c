// 🔗 Business-Category Link - Join rows between the two output tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One link per accepted business: the classification table yields
/// exactly one category per record. Both ids must reference entities
/// already present in their output sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLink {
    pub business_id: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryLink {
    pub fn new(business_id: String, category_id: String, now: DateTime<Utc>) -> Self {
        CategoryLink {
            business_id,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }
}
