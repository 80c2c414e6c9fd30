//! Error types for the scanner.
//!
//! This module defines the diagnostics raised while scanning source text:
//!
//! - Error structures with source position information
//! - The recoverable and fatal error variants
//! - Helpful tips shown alongside a diagnostic

pub mod errors;
