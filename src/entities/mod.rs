// 🏛️ Output Entities
// Businesses, categories, and the links between them

pub mod business;
pub mod category;
pub mod link;

pub use business::{Business, RegistrationDate};
pub use category::{Category, CategoryRegistry};
pub use link::CategoryLink;
