//! Scoped bookkeeping for variables and functions.
//!
//! The same [`Environment`](environment::Environment) serves the checker,
//! which only tracks declared types and initialization, and the executor,
//! which also stores the live value of every variable.

pub mod declaration_table;
pub mod environment;
