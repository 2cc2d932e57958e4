//! Platform adapters

mod log_navigator;

pub use log_navigator::LogNavigator;
