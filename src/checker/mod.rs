//! Semantic analysis module.
//!
//! This module checks a parsed [`Program`](crate::ast::ast::Program) before
//! it is executed. It:
//!
//! - Resolves the type of every expression and stores it in the tree
//! - Verifies declarations, assignments, calls and returns are well typed
//! - Tracks scopes to catch undeclared and uninitialized variables
//! - Enforces the program-level rules (a `main` function, no nested
//!   functions, no declarations inside loops)
//!
//! Every problem is collected, the checker never stops at the first one.

pub mod checker;
pub mod expr;
pub mod stmt;

#[cfg(test)]
mod tests;
