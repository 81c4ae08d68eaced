use std::fmt::Display;

use indexmap::IndexMap;

use crate::expression::expressions::Expression;

/// The data kind of a declared symbol.
///
/// `Deferred` is the placeholder assigned to a name that is referenced
/// before its declaration has been processed; a later declaration overwrites
/// the table entry with the resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Real,
    Logical,
    Character,
    DerivedType,
    Deferred,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Real => write!(f, "REAL"),
            DataType::Logical => write!(f, "LOGICAL"),
            DataType::Character => write!(f, "CHARACTER"),
            DataType::DerivedType => write!(f, "TYPE"),
            DataType::Deferred => write!(f, "DEFERRED"),
        }
    }
}

/// A member entry in a derived type's variable map.
///
/// A type definition carries `Declared` entries: the shared, immutable
/// template taken straight from the frontend. Instantiating a variable of
/// the type replaces the whole map with `Bound` entries, fully scoped child
/// nodes named `instance%member`. The expansion step keys off this
/// distinction, which is what makes it idempotent.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    Declared(SymbolType),
    Bound(Expression),
}

impl TypeEntry {
    pub fn is_declared(&self) -> bool {
        matches!(self, TypeEntry::Declared(_))
    }
}

/// Internal representation of a symbol's declared type.
///
/// Lives in the owning scope's symbol table; symbol nodes read and write it
/// through the table rather than storing a copy (the single source of truth
/// for a name's type).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolType {
    pub dtype: DataType,
    /// Numeric kind tag, e.g. a named kind parameter like `JPRB`.
    pub kind: Option<String>,
    /// Dimension expressions of the declared shape; empty for scalars.
    pub shape: Vec<Expression>,
    /// The derived-type instance variable this type's symbol belongs to.
    pub parent: Option<Box<Expression>>,
    /// Member variables of a derived type; empty for intrinsic types.
    pub variables: IndexMap<String, TypeEntry>,
}

impl SymbolType {
    pub fn new(dtype: DataType) -> Self {
        SymbolType {
            dtype,
            kind: None,
            shape: vec![],
            parent: None,
            variables: IndexMap::new(),
        }
    }

    /// A derived type with the given member template.
    pub fn derived(variables: IndexMap<String, SymbolType>) -> Self {
        let variables = variables
            .into_iter()
            .map(|(name, vtype)| (name, TypeEntry::Declared(vtype)))
            .collect();

        SymbolType {
            dtype: DataType::DerivedType,
            kind: None,
            shape: vec![],
            parent: None,
            variables,
        }
    }

    pub fn is_deferred(&self) -> bool {
        self.dtype == DataType::Deferred
    }

    // Clone-with-overrides consumers; unset fields carry over unchanged.

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(String::from(kind));
        self
    }

    pub fn with_shape(mut self, shape: Vec<Expression>) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_parent(mut self, parent: Expression) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn with_variables(mut self, variables: IndexMap<String, TypeEntry>) -> Self {
        self.variables = variables;
        self
    }
}
