//! Reusable UI widget components.
//!
//! This module contains reusable widget components such as spinners, form
//! fields and styling utilities.

pub mod field;
pub mod spinner;
pub mod styling;
