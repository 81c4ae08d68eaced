/// Types module
/// Contains the type descriptors stored in a scope's symbol table
///
/// Submodules:
/// - types: DataType, SymbolType and derived-type member entries
pub mod types;
