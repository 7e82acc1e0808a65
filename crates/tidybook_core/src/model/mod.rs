//! Domain records held by the record stores.
//!
//! # Responsibility
//! - Define the contact and task records and their wire shapes.
//! - Define the shared `Record` contract the store and query layers rely on.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId` assigned at creation.
//! - Required text fields are validated on write, tolerated empty on read.

pub mod contact;
pub mod record;
pub mod task;
