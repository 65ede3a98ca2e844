//! Use-case services over the content repository.
//!
//! # Responsibility
//! - Turn reader requests into listing/lookup results with titles.
//! - Keep routing and rendering concerns out of query rules.

pub mod content_service;
