//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - The router, the shared collection cache and toasts
//! - One state module per page
//! - Validation errors raised before any request is sent

mod cache;
mod error;
mod form;
mod loading;
mod navigation;
mod pages;
mod toast;

pub use cache::{CollectionCache, CollectionsReader};
pub use error::ValidationError;
pub use form::{CollectionPicker, Input, ListCursor};
pub use loading::Busy;
pub use navigation::{Page, Router};
pub use pages::{
    CollectionsField, Completion, EntriesField, FollowUp, ResetConfirmation, SearchField,
    SourcesField, UploadField,
};
pub use toast::{Toast, ToastKind, TOAST_DURATION};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
