//! Core types shared by every stage of the pipeline.
//!
//! # Modules
//!
//! ## `error`
//!
//! - [`PortletGenError`] - fatal errors that abort a run (setup, configuration, generation)
//! - [`ParseError`] / [`ValidationError`] - recoverable, file- or declaration-scoped errors
//! - [`ErrorContext`] and [`user_friendly_error`] - terminal-friendly error reporting
//!
//! ## `diagnostics`
//!
//! - [`Diagnostics`] - the sink recoverable errors are reported into
//! - [`Diagnostic`], [`Severity`], [`DiagnosticKind`]
//!
//! # Propagation Policy
//!
//! Parse and validation errors are collected and reported, never returned with `?`.
//! Setup and generation errors are returned as `Err` and terminate the run.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{
    ErrorContext, ParseError, PortletGenError, SourceLocation, ValidationError,
    user_friendly_error,
};
