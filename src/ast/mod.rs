/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program and declaration nodes
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - types: The value types an expression can resolve to
/// - printer: Renders a program back to source text
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
