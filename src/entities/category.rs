// 🏷️ Category Entity + Registry - Deduplicated category identities
// Category name is a value; the UUID minted on first sight is the
// identity every later record with the same label reuses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CATEGORY ENTITY
// ============================================================================

/// Directory category entity, shaped for the backend `categories` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable identity (UUID)
    pub id: String,

    /// Short label from the classification table, or the fallback sentinel
    pub name: String,

    /// Currently mirrors the name
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, now: DateTime<Utc>) -> Self {
        Category {
            id: uuid::Uuid::new_v4().to_string(),
            description: name.clone(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

/// Run-scoped name → id registry.
///
/// Single owner, single writer: the pipeline resolves every label through
/// this registry, which mints one Category per distinct name (including
/// the fallback sentinel, registered at most once). Must be fresh per
/// run; reusing one across runs would leak identifiers between unrelated
/// datasets.
pub struct CategoryRegistry {
    by_name: HashMap<String, String>,
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        CategoryRegistry {
            by_name: HashMap::new(),
            categories: Vec::new(),
        }
    }

    /// Resolve a label to its category id, minting a new Category on
    /// first sight. Lookup is exact string equality.
    pub fn resolve(&mut self, label: &str, now: DateTime<Utc>) -> String {
        if let Some(id) = self.by_name.get(label) {
            return id.clone();
        }

        let category = Category::new(label.to_string(), now);
        let id = category.id.clone();
        self.by_name.insert(label.to_string(), id.clone());
        self.categories.push(category);
        id
    }

    /// Id for an already-registered label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.by_name.get(label).map(|s| s.as_str())
    }

    /// Categories in registration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Consume the registry, yielding the category output set
    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
