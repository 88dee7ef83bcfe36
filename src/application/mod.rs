//! Application layer containing the circulation logic.
//!
//! `Library` applies check-outs, returns, holds, payments and the daily fine
//! run. `LibraryService` puts a library behind a `tokio` channel so it can be
//! shared between tasks without interleaving mutations.

pub mod library;
pub mod service;
