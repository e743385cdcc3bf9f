//! Execution module for running checked programs.
//!
//! This module walks the annotated AST and evaluates it directly:
//!
//! - Declares globals, built-ins and functions, then calls `main`
//! - Evaluates expressions to [`Value`](value::Value)s
//! - Runs statements, propagating `return` up to the call that made it
//! - Bounds recursion by the configured call depth
//!
//! Built-in functions read from and write to caller-provided streams, so
//! programs can be run against in-memory input and output.

pub mod builtins;
pub mod executor;
pub mod expr;
pub mod stmt;
pub mod value;
