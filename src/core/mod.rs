//! Core conversion logic, free of any terminal or network concerns

pub mod config;
pub mod conversion;
pub mod log;
pub mod rates;
pub mod validation;

// Re-export main types for cleaner imports
pub use conversion::{ConversionResult, RatePreview};
pub use rates::{RateTable, RateTableProvider};
pub use validation::{ConversionRequest, MAX_AMOUNT, ValidationError};
