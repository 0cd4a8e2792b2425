//! Terminal front-end: commands, the converter form and their rendering

pub mod convert;
pub mod form;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;
