//! Utility functions

mod slug;

pub use slug::slugify;
