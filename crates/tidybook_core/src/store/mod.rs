//! In-memory record stores mirrored to durable storage.
//!
//! # Responsibility
//! - Own the canonical ordered collection for one entity kind.
//! - Expose CRUD by position and by stable id.
//!
//! # Invariants
//! - Writes validate records before anything is persisted.
//! - A mutation is acknowledged only after the whole collection is written;
//!   failed writes leave the in-memory collection untouched.
//! - Stores are single-threaded; callers sharing one must wrap it in a mutex.

pub mod record_store;
