//! Terminal client for managing document collections on a Recall backend:
//! semantic search, collection lifecycle, file upload, external sources and
//! stored entries.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod ui;
pub mod utils;
