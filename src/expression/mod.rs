/// Expression module
/// Contains the algebraic expression tree and everything that builds or
/// renders it
///
/// Submodules:
/// - expressions: the Expression node hierarchy and reconstruction arguments
/// - symbols: bound Scalar/Array leaves and the Variable factory
/// - literals: literal leaves and the Literal factory
/// - parser: fallback expression interpreter for raw source text
/// - stringifier: precedence-aware rendering back to Fortran syntax
/// - visitor: traversal and substitution utilities for passes
pub mod expressions;
pub mod literals;
pub mod parser;
pub mod stringifier;
pub mod symbols;
pub mod visitor;
