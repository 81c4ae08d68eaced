//! Literal leaves and the Literal factory.
//!
//! The factory classifies raw frontend values into typed literal nodes.
//! Floating point values keep the exact textual form they were written in:
//! re-serializing a tree must never drift a constant's representation, no
//! matter how many render/re-parse cycles it goes through.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};
use crate::types::types::DataType;
use crate::{Position, Span};

use super::expressions::Expression;
use super::parser::parse_expression;

lazy_static! {
    /// Fortran real syntax, including `d` exponents (`1.0`, `.5`, `2.5e-3`,
    /// `1.0d0`).
    static ref REAL_RE: Regex =
        Regex::new(r"^(?:\d+\.\d*|\.\d+|\d+)(?:[eEdD][+-]?\d+)?$").unwrap();
}

/// An integer constant in an expression.
///
/// It can have a specific kind associated, which backends may use to cast
/// the constant in generated code.
#[derive(Debug, Clone)]
pub struct IntLiteral {
    pub value: i64,
    pub kind: Option<String>,
    pub source: Option<Span>,
}

impl IntLiteral {
    pub fn new(value: i64) -> Self {
        IntLiteral {
            value,
            kind: None,
            source: None,
        }
    }
}

/// A floating point constant in an expression.
///
/// The value is the original source text, not a parsed number; parsing and
/// re-printing would lose the author's representation (`1.0E+0` vs `1.`).
#[derive(Debug, Clone)]
pub struct FloatLiteral {
    pub value: String,
    pub kind: Option<String>,
    pub source: Option<Span>,
}

impl FloatLiteral {
    pub fn new(value: &str) -> Self {
        FloatLiteral {
            value: String::from(value),
            kind: None,
            source: None,
        }
    }
}

/// A boolean constant in an expression.
#[derive(Debug, Clone)]
pub struct LogicLiteral {
    pub value: bool,
    pub source: Option<Span>,
}

impl LogicLiteral {
    /// Builds from any spelling in `{.true., true, .false., false}`,
    /// case-insensitive.
    pub fn new(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            ".true." | "true" => Some(LogicLiteral {
                value: true,
                source: None,
            }),
            ".false." | "false" => Some(LogicLiteral {
                value: false,
                source: None,
            }),
            _ => None,
        }
    }
}

/// A string constant. One matching pair of surrounding quote characters is
/// stripped on construction.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub source: Option<Span>,
}

impl StringLiteral {
    pub fn new(value: &str) -> Self {
        let bytes = value.as_bytes();
        let quoted = bytes.len() >= 2
            && bytes[0] == bytes[bytes.len() - 1]
            && (bytes[0] == b'\'' || bytes[0] == b'"');
        let value = if quoted {
            &value[1..value.len() - 1]
        } else {
            value
        };

        StringLiteral {
            value: String::from(value),
            source: None,
        }
    }
}

/// A list of constant literals, e.g. as used in array initialization.
#[derive(Debug, Clone)]
pub struct LiteralList {
    pub elements: Vec<Expression>,
    pub source: Option<Span>,
}

impl LiteralList {
    pub fn new(elements: Vec<Expression>) -> Self {
        LiteralList {
            elements,
            source: None,
        }
    }
}

/// A factory that instantiates the appropriate literal node for a raw
/// value.
///
/// Classification order: an explicit data type dispatches directly; else
/// the kind is inferred from the value itself; else the value is handed to
/// the fallback expression parser and an elementary result is re-wrapped.
/// A value that survives none of these is an `UnclassifiableLiteral`, which
/// aborts building the enclosing subtree.
pub struct Literal;

impl Literal {
    pub fn new(
        value: &str,
        dtype: Option<DataType>,
        kind: Option<String>,
    ) -> Result<Expression, Error> {
        if let Some(dtype) = dtype {
            return Literal::from_dtype(value, dtype, kind);
        }

        if let Some(obj) = Literal::classify(value, kind.clone()) {
            return Ok(obj);
        }

        // Let the expression parser figure out what we are dealing with;
        // elementary results still get the caller's kind attached.
        match parse_expression(value, None) {
            Ok(mut obj) => {
                if let Some(kind) = kind {
                    match &mut obj {
                        Expression::IntLiteral(literal) => literal.kind = Some(kind),
                        Expression::FloatLiteral(literal) => literal.kind = Some(kind),
                        _ => {}
                    }
                }
                Ok(obj)
            }
            Err(_) => Err(Literal::unclassifiable(value)),
        }
    }

    /// Elementary classification without the parser fallback.
    pub(crate) fn classify(value: &str, kind: Option<String>) -> Option<Expression> {
        let trimmed = value.trim();

        if let Ok(parsed) = trimmed.parse::<i64>() {
            let mut literal = IntLiteral::new(parsed);
            literal.kind = kind;
            return Some(Expression::IntLiteral(literal));
        }

        if REAL_RE.is_match(trimmed) {
            let mut literal = FloatLiteral::new(trimmed);
            literal.kind = kind;
            return Some(Expression::FloatLiteral(literal));
        }

        if let Some(literal) = LogicLiteral::new(trimmed) {
            return Some(Expression::LogicLiteral(literal));
        }

        let bytes = trimmed.as_bytes();
        if bytes.len() >= 2
            && bytes[0] == bytes[bytes.len() - 1]
            && (bytes[0] == b'\'' || bytes[0] == b'"')
        {
            return Some(Expression::StringLiteral(StringLiteral::new(trimmed)));
        }

        None
    }

    fn from_dtype(value: &str, dtype: DataType, kind: Option<String>) -> Result<Expression, Error> {
        let trimmed = value.trim();
        match dtype {
            DataType::Integer => match trimmed.parse::<i64>() {
                Ok(parsed) => {
                    let mut literal = IntLiteral::new(parsed);
                    literal.kind = kind;
                    Ok(Expression::IntLiteral(literal))
                }
                Err(_) => Err(Literal::unclassifiable(value)),
            },
            DataType::Real => {
                if REAL_RE.is_match(trimmed) {
                    let mut literal = FloatLiteral::new(trimmed);
                    literal.kind = kind;
                    Ok(Expression::FloatLiteral(literal))
                } else {
                    Err(Literal::unclassifiable(value))
                }
            }
            DataType::Logical => match LogicLiteral::new(trimmed) {
                Some(literal) => Ok(Expression::LogicLiteral(literal)),
                None => Err(Literal::unclassifiable(value)),
            },
            DataType::Character => Ok(Expression::StringLiteral(StringLiteral::new(trimmed))),
            DataType::DerivedType | DataType::Deferred => Err(Literal::unclassifiable(value)),
        }
    }

    fn unclassifiable(value: &str) -> Error {
        Error::new(
            ErrorImpl::UnclassifiableLiteral {
                value: String::from(value),
            },
            Position::null(),
        )
    }
}
