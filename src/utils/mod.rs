//! Shared helpers that do not belong to a single layer.

pub mod text_processing;
