//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures carrying the offending source line
//! - Specific error variants for the lexical, syntax, semantic and runtime phases
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
