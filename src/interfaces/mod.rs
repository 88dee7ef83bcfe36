//! Adapters between the library and the outside world: the JSON catalog,
//! CSV command scripts and CSV reports.

pub mod catalog;
pub mod csv;
