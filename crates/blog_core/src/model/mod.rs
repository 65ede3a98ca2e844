//! Read models for published site content.
//!
//! # Responsibility
//! - Define the shapes handed from storage to the query service and views.
//! - Keep display rules (author display name) next to the data they read.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing here mutates storage.
//! - Numeric ids grow monotonically and define "newest first".

pub mod author;
pub mod page;
pub mod post;
pub mod taxonomy;
