/// Scope module
/// Contains the per-program-unit symbol table and its handles
///
/// Submodules:
/// - scope: SymbolTable, Scope and the weak ScopeRef handle
pub mod scope;

#[cfg(test)]
mod tests;
