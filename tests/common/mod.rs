//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - Record fixtures and builders
//! - Checklist and PDF assertions
//! - PDF inspection helpers

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod pdf_helpers;

pub use assertions::*;
pub use fixtures::*;
pub use pdf_helpers::*;
