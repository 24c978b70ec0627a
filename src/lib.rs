//! `SlidePilot` - presentation core for the `SlidePilot` editor.
//!
//! This crate provides the document model, a deterministic import and render
//! pipeline, an undoable command engine and the bridge that turns assistant
//! utterances into commands.

// Re-export public modules for use in integration tests and as a library
pub mod assistant;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod import;
pub mod model;
pub mod render;
pub mod source;
pub mod types;
