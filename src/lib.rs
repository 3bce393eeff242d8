//! `CalQ` core - meal logging and daily calorie tracking
//!
//! This crate is the storage-and-calculation core behind a calorie tracking
//! front end: SQLite-backed CRUD for meal logs with daily totals, a rolling
//! 7-day series, a singleton settings row holding the daily target, and the
//! pure serving-size/aggregation functions a UI calls without a round-trip
//! to storage.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::dbg_macro,
    clippy::exit,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Pure serving-size scaling and in-memory aggregation over meal logs
pub mod calc;
/// Configuration management for database path and profile defaults
pub mod config;
/// SQLite-backed persistence for meal logs and the settings row
pub mod db;
/// Unified error types and result handling
pub mod errors;
/// Named record types shared by the storage and calculation layers
pub mod models;
