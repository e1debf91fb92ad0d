//! studyforge-core: Data model, sampling, and file store.
//!
//! This crate defines the records every pipeline stage reads and writes,
//! the exam blueprint shared by the samplers, and the helpers for loading
//! and atomically rewriting the JSON files that connect the stages.

pub mod config;
pub mod domain;
pub mod error;
pub mod model;
pub mod practice;
pub mod sampling;
pub mod store;
pub mod study_data;
pub mod text;
