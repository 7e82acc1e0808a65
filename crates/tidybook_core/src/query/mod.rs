//! Read-only views over record collections.
//!
//! # Responsibility
//! - Free-text search and attribute filtering for presentation views.
//! - Aggregate task statistics over any view.
//!
//! # Invariants
//! - Every function is pure: same input, same output, input never mutated.
//! - Output preserves input order; nothing here re-sorts.

pub mod filter;
pub mod search;
pub mod stats;
