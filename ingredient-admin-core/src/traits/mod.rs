//! Collaborator abstraction trait definition

mod navigator;

pub use navigator::Navigator;

// Re-export the record store capability from the store library
pub use ingredient_admin_store::RecordStore;
