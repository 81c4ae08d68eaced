/// Errors module
/// Contains the error types raised during expression construction
///
/// Submodules:
/// - errors: Error and ErrorImpl definitions
pub mod errors;

#[cfg(test)]
mod tests;
