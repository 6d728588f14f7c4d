//! Tactical sea-map model: a 20x20 grid split into four weather regions,
//! validators for regions, features and movement, a template catalog, and a
//! versioned JSON map document with import, merge and diff.

pub mod cli;
pub mod config;
pub mod document;
pub mod grid;
pub mod map;
pub mod templates;
pub mod validation;
