//! Notes app core: one JSON file per note plus the editor controller.
//!
//! # Responsibility
//! - Model, persist and list notes (`model`, `store`, `indexed`).
//! - Apply save rules and timestamps (`service`).
//! - Drive the notes window from input events (`editor`).
//!
//! # Invariants
//! - Directory contents are owned by the running instance; no locking.
//! - Renaming a title leaves the old file behind (flagged, not fixed).

pub mod clock;
pub mod editor;
pub mod indexed;
pub mod model;
pub mod service;
pub mod store;
