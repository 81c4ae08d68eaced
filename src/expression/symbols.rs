//! Bound symbol leaves and the Variable factory.
//!
//! A `Scalar` or `Array` node never stores its own type: it keeps only its
//! qualified name and a weak handle to the owning scope, and every type
//! access goes through the scope's table entry keyed by that name. Two
//! nodes with the same `(name, scope)` therefore always observe the same
//! type, which is the single source of truth every transformation pass
//! relies on.
//!
//! `Variable` is the only construction path that guarantees this invariant:
//! it resolves the effective type, picks the `Scalar`/`Array` variant, and
//! runs derived-type member expansion before handing the node out.

use indexmap::IndexMap;

use crate::errors::errors::{Error, ErrorImpl};
use crate::scope::scope::{Scope, ScopeRef};
use crate::types::types::{DataType, SymbolType, TypeEntry};
use crate::{Position, Span};

use super::expressions::{ArraySubscript, Expression};

/// Expression node for scalar variables (and other algebraic leaves).
///
/// It is always associated with a given scope (typically a subroutine)
/// whose symbol table holds the corresponding type entry.
#[derive(Debug, Clone)]
pub struct Scalar {
    /// Qualified name; contains `%` for derived-type members.
    pub name: String,
    pub scope: ScopeRef,
    pub initial: Option<Box<Expression>>,
    pub source: Option<Span>,
}

/// Expression node for array variables.
///
/// It can have associated dimensions (the indexing/slicing used when
/// accessing entries); shape, data type and parent information are part of
/// the type held in the scope's table.
#[derive(Debug, Clone)]
pub struct Array {
    pub name: String,
    pub scope: ScopeRef,
    pub dimensions: Option<ArraySubscript>,
    pub initial: Option<Box<Expression>>,
    pub source: Option<Span>,
}

/// Field overrides for [`Scalar::clone_with`] / [`Array::clone_with`].
/// Unset fields carry over from the node being cloned.
#[derive(Default)]
pub struct VariableUpdate {
    pub name: Option<String>,
    pub scope: Option<Scope>,
    pub var_type: Option<SymbolType>,
    pub dimensions: Option<Vec<Expression>>,
    pub initial: Option<Expression>,
    pub source: Option<Span>,
}

fn basename(name: &str) -> &str {
    match name.rfind('%') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

impl Scalar {
    /// The symbol name without the qualifier from the parent.
    pub fn basename(&self) -> &str {
        basename(&self.name)
    }

    /// The scope owning this symbol, or `None` once the owning program
    /// unit has released it.
    pub fn scope(&self) -> Option<Scope> {
        Scope::from_ref(&self.scope)
    }

    /// The declared type, looked up live in the scope's table.
    pub fn var_type(&self) -> Option<SymbolType> {
        self.scope()?.lookup(&self.name, false)
    }

    /// Writes the type through to the scope's table entry.
    pub fn set_type(&self, value: SymbolType) -> Result<(), Error> {
        write_type(&self.scope, &self.name, value)
    }

    /// The enclosing derived-type instance variable, if this symbol is a
    /// member of one.
    pub fn parent(&self) -> Option<Expression> {
        self.var_type()?.parent.map(|parent| *parent)
    }

    /// Replicates the variable with the provided overrides, re-deriving the
    /// variant from scratch through the [`Variable`] factory.
    pub fn clone_with(&self, update: VariableUpdate) -> Result<Expression, Error> {
        let scope = match update.scope {
            Some(scope) => scope,
            None => self.scope().ok_or_else(|| dangling(&self.name))?,
        };
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let var_type = update.var_type.or_else(|| self.var_type());
        let initial = update
            .initial
            .or_else(|| self.initial.as_deref().cloned());
        let source = update.source.or_else(|| self.source.clone());

        Variable::new(&name, &scope, var_type, update.dimensions, initial, source)
    }
}

impl Array {
    /// The symbol name without the qualifier from the parent.
    pub fn basename(&self) -> &str {
        basename(&self.name)
    }

    pub fn scope(&self) -> Option<Scope> {
        Scope::from_ref(&self.scope)
    }

    /// The declared type, looked up live in the scope's table.
    pub fn var_type(&self) -> Option<SymbolType> {
        self.scope()?.lookup(&self.name, false)
    }

    pub fn set_type(&self, value: SymbolType) -> Result<(), Error> {
        write_type(&self.scope, &self.name, value)
    }

    pub fn parent(&self) -> Option<Expression> {
        self.var_type()?.parent.map(|parent| *parent)
    }

    /// The indexing/slicing applied to this access, if any.
    pub fn dimensions(&self) -> Option<&ArraySubscript> {
        self.dimensions.as_ref()
    }

    pub fn set_dimensions(&mut self, dimensions: Vec<Expression>) {
        self.dimensions = Some(ArraySubscript::new(dimensions));
    }

    /// The originally allocated shape, proxied from the type entry.
    pub fn shape(&self) -> Vec<Expression> {
        self.var_type().map(|entry| entry.shape).unwrap_or_default()
    }

    /// Replicates the variable with the provided overrides.
    ///
    /// Note: the factory re-derives the variant, so overriding the type
    /// with a scalar one (and passing no dimensions) yields a [`Scalar`].
    pub fn clone_with(&self, update: VariableUpdate) -> Result<Expression, Error> {
        let scope = match update.scope {
            Some(scope) => scope,
            None => self.scope().ok_or_else(|| dangling(&self.name))?,
        };
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let var_type = update.var_type.or_else(|| self.var_type());
        let dimensions = update
            .dimensions
            .or_else(|| self.dimensions.as_ref().map(|dims| dims.index.clone()));
        let initial = update
            .initial
            .or_else(|| self.initial.as_deref().cloned());
        let source = update.source.or_else(|| self.source.clone());

        Variable::new(&name, &scope, var_type, dimensions, initial, source)
    }
}

fn write_type(scope: &ScopeRef, name: &str, value: SymbolType) -> Result<(), Error> {
    match Scope::from_ref(scope) {
        Some(scope) => {
            scope.assign(name, value);
            Ok(())
        }
        None => Err(dangling(name)),
    }
}

fn dangling(name: &str) -> Error {
    Error::new(
        ErrorImpl::ScopeDropped {
            variable: String::from(name),
        },
        Position::null(),
    )
}

/// Factory for bound symbol nodes.
///
/// This is a convenience constructor that always returns either a
/// [`Scalar`] or an [`Array`] node; there is no generic variable value at
/// runtime.
///
/// Warning: providing a type overwrites the corresponding entry in the
/// symbol table. A name may have been encountered before its declaration,
/// so the latest type information is treated as the most up to date.
pub struct Variable;

impl Variable {
    /// Builds a bound symbol node.
    ///
    /// The effective type is the explicit `var_type` if given (assigned to
    /// the table, last writer wins), else the scope's existing entry; a
    /// lookup miss inserts a `Deferred` placeholder so the name resolves
    /// once its declaration is processed. The variant follows from the
    /// dimensions and the effective shape, and derived-type members are
    /// expanded before the node is returned.
    pub fn new(
        name: &str,
        scope: &Scope,
        var_type: Option<SymbolType>,
        dimensions: Option<Vec<Expression>>,
        initial: Option<Expression>,
        source: Option<Span>,
    ) -> Result<Expression, Error> {
        if name.is_empty() {
            return Err(Error::new(
                ErrorImpl::InvalidConstruction {
                    message: String::from("a variable requires a non-empty name"),
                },
                Position::null(),
            ));
        }

        let effective = match var_type {
            Some(entry) => {
                scope.assign(name, entry.clone());
                entry
            }
            None => match scope.lookup(name, false) {
                Some(entry) => entry,
                None => {
                    let deferred = SymbolType::new(DataType::Deferred);
                    scope.set_default(name, deferred.clone());
                    deferred
                }
            },
        };

        let obj = if dimensions.is_none() && effective.shape.is_empty() {
            Expression::Scalar(Scalar {
                name: String::from(name),
                scope: scope.reference(),
                initial: initial.map(Box::new),
                source,
            })
        } else {
            Expression::Array(Array {
                name: String::from(name),
                scope: scope.reference(),
                dimensions: dimensions.map(ArraySubscript::new),
                initial: initial.map(Box::new),
                source,
            })
        };

        Variable::instantiate_derived_type_variables(obj, scope)
    }

    /// Rebuilds a derived type's member map for one concrete instance.
    ///
    /// A variable created from a type definition still carries the shared
    /// member template (`Declared` entries). Instantiation clones the type
    /// with a dedicated map of `Bound` member nodes, each named
    /// `instance%member`, registered in the instance's scope and pointing
    /// back at the instance through its type's `parent`. The template
    /// itself is never touched, and a map that already holds `Bound`
    /// entries is left alone, so running this twice changes nothing.
    fn instantiate_derived_type_variables(
        obj: Expression,
        scope: &Scope,
    ) -> Result<Expression, Error> {
        let obj_type = match &obj {
            Expression::Scalar(scalar) => scalar.var_type(),
            Expression::Array(array) => array.var_type(),
            _ => None,
        };

        let obj_type = match obj_type {
            Some(entry) if entry.dtype == DataType::DerivedType => entry,
            _ => return Ok(obj),
        };

        let needs_expansion = obj_type
            .variables
            .values()
            .next()
            .map(TypeEntry::is_declared)
            .unwrap_or(false);
        if !needs_expansion {
            return Ok(obj);
        }

        let obj_name = match &obj {
            Expression::Scalar(scalar) => scalar.name.clone(),
            Expression::Array(array) => array.name.clone(),
            _ => unreachable!("factory only produces symbol nodes"),
        };

        let mut variables = IndexMap::new();
        for (member_name, entry) in &obj_type.variables {
            let template = match entry {
                TypeEntry::Declared(template) => template,
                TypeEntry::Bound(_) => continue,
            };
            let member_type = template.clone().with_parent(obj.clone());
            let qualified = format!("{}%{}", obj_name, member_name);
            let member = Variable::new(&qualified, scope, Some(member_type), None, None, None)?;
            variables.insert(member_name.clone(), TypeEntry::Bound(member));
        }

        let instance_type = obj_type.with_variables(variables);
        match &obj {
            Expression::Scalar(scalar) => scalar.set_type(instance_type)?,
            Expression::Array(array) => array.set_type(instance_type)?,
            _ => unreachable!("factory only produces symbol nodes"),
        }

        Ok(obj)
    }
}
