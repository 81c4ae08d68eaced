//! The expression node hierarchy.
//!
//! All nodes live in the closed `Expression` union: bound symbols and
//! literals as leaves, operators, calls, casts, ranges and subscripts as
//! composites. Every node carries optional source provenance and exposes
//! its reconstruction arguments, the ordered field list sufficient to
//! rebuild an equal node. Structural equality is defined over the dispatch
//! key plus those arguments, never over identity, so separately constructed
//! nodes naming the same symbol are interchangeable.

use crate::scope::scope::ScopeRef;
use crate::Span;

use super::literals::{FloatLiteral, IntLiteral, LiteralList, LogicLiteral, StringLiteral};
use super::stringifier::Stringifier;
use super::symbols::{Array, Scalar};

/// Expression Types
///
/// The dispatch key of each node kind, used by the rendering visitor and
/// by structural equality.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Scalar,
    Array,
    IntLiteral,
    FloatLiteral,
    LogicLiteral,
    StringLiteral,
    LiteralList,
    Sum,
    Product,
    Quotient,
    Power,
    Comparison,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    InlineCall,
    Cast,
    Range,
    LoopRange,
    RangeIndex,
    ArraySubscript,
}

/// An n-ary addition. Subtraction is a term multiplied by `-1`; the
/// stringifier folds such terms back into `a - b` form.
#[derive(Debug, Clone)]
pub struct Sum {
    pub children: Vec<Expression>,
    pub source: Option<Span>,
}

/// An n-ary multiplication.
#[derive(Debug, Clone)]
pub struct Product {
    pub children: Vec<Expression>,
    pub source: Option<Span>,
}

#[derive(Debug, Clone)]
pub struct Quotient {
    pub numerator: Box<Expression>,
    pub denominator: Box<Expression>,
    pub source: Option<Span>,
}

#[derive(Debug, Clone)]
pub struct Power {
    pub base: Box<Expression>,
    pub exponent: Box<Expression>,
    pub source: Option<Span>,
}

/// A relational operation, with the operator kept as written in the source
/// (`==`, `/=`, `<`, `<=`, `>`, `>=`).
#[derive(Debug, Clone)]
pub struct Comparison {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
    pub source: Option<Span>,
}

#[derive(Debug, Clone)]
pub struct LogicalAnd {
    pub children: Vec<Expression>,
    pub source: Option<Span>,
}

#[derive(Debug, Clone)]
pub struct LogicalOr {
    pub children: Vec<Expression>,
    pub source: Option<Span>,
}

#[derive(Debug, Clone)]
pub struct LogicalNot {
    pub child: Box<Expression>,
    pub source: Option<Span>,
}

/// An in-line function call with positional and keyword arguments.
#[derive(Debug, Clone)]
pub struct InlineCall {
    pub name: String,
    pub parameters: Vec<Expression>,
    pub kw_parameters: Vec<(String, Expression)>,
    pub source: Option<Span>,
}

/// A data type cast, e.g. `REAL(K, kind=JPRB)`.
#[derive(Debug, Clone)]
pub struct Cast {
    pub name: String,
    pub expression: Box<Expression>,
    pub kind: Option<Box<Expression>>,
    pub source: Option<Span>,
}

/// A declaration-style range, rendered `lower:upper` or `lower:upper:step`.
/// Absent bounds render as the empty string (open-ended range).
#[derive(Debug, Clone)]
pub struct Range {
    pub lower: Option<Box<Expression>>,
    pub upper: Option<Box<Expression>>,
    pub step: Option<Box<Expression>>,
    pub source: Option<Span>,
}

/// A loop-control range, rendered `lower, upper` or `lower, upper, step`.
#[derive(Debug, Clone)]
pub struct LoopRange {
    pub lower: Option<Box<Expression>>,
    pub upper: Option<Box<Expression>>,
    pub step: Option<Box<Expression>>,
    pub source: Option<Span>,
}

/// A subscript range, e.g. the `1:N:2` in `B%C(1:N:2)`.
#[derive(Debug, Clone)]
pub struct RangeIndex {
    pub lower: Option<Box<Expression>>,
    pub upper: Option<Box<Expression>>,
    pub step: Option<Box<Expression>>,
    pub source: Option<Span>,
}

impl RangeIndex {
    /// Builds a subscript range, normalizing the degenerate case: an upper
    /// bound with no lower bound and no step is a direct index and collapses
    /// to that bound itself rather than a one-element range.
    pub fn new(
        lower: Option<Expression>,
        upper: Option<Expression>,
        step: Option<Expression>,
    ) -> Expression {
        if lower.is_none() && step.is_none() {
            if let Some(index) = upper {
                return index;
            }
        }

        Expression::RangeIndex(RangeIndex {
            lower: lower.map(Box::new),
            upper: upper.map(Box::new),
            step: step.map(Box::new),
            source: None,
        })
    }
}

/// The normalized wrapper around an array's dimension/index list.
#[derive(Debug, Clone)]
pub struct ArraySubscript {
    pub index: Vec<Expression>,
    pub source: Option<Span>,
}

impl ArraySubscript {
    pub fn new(index: Vec<Expression>) -> Self {
        ArraySubscript {
            index,
            source: None,
        }
    }
}

/// A node of the expression tree.
///
/// Leaves are bound symbols ([`Scalar`]/[`Array`], whose type lives in the
/// owning scope's table) and literals; composites wrap child expressions.
/// Adding a variant here is a compiler-checked update of every visitor.
#[derive(Debug, Clone)]
pub enum Expression {
    Scalar(Scalar),
    Array(Array),
    IntLiteral(IntLiteral),
    FloatLiteral(FloatLiteral),
    LogicLiteral(LogicLiteral),
    StringLiteral(StringLiteral),
    LiteralList(LiteralList),
    Sum(Sum),
    Product(Product),
    Quotient(Quotient),
    Power(Power),
    Comparison(Comparison),
    LogicalAnd(LogicalAnd),
    LogicalOr(LogicalOr),
    LogicalNot(LogicalNot),
    InlineCall(InlineCall),
    Cast(Cast),
    Range(Range),
    LoopRange(LoopRange),
    RangeIndex(RangeIndex),
    ArraySubscript(ArraySubscript),
}

/// One reconstruction argument.
///
/// Scope handles compare by pointer identity (two handles to the same live
/// table are the same scope); everything else compares structurally.
#[derive(Debug, Clone)]
pub enum InitArg {
    Name(String),
    Scope(ScopeRef),
    Text(String),
    Int(i64),
    Bool(bool),
    Expr(Box<Expression>),
    OptExpr(Option<Box<Expression>>),
    ExprList(Vec<Expression>),
    KwArgs(Vec<(String, Expression)>),
}

impl PartialEq for InitArg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (InitArg::Name(a), InitArg::Name(b)) => a == b,
            (InitArg::Scope(a), InitArg::Scope(b)) => a.ptr_eq(b),
            (InitArg::Text(a), InitArg::Text(b)) => a == b,
            (InitArg::Int(a), InitArg::Int(b)) => a == b,
            (InitArg::Bool(a), InitArg::Bool(b)) => a == b,
            (InitArg::Expr(a), InitArg::Expr(b)) => a == b,
            (InitArg::OptExpr(a), InitArg::OptExpr(b)) => a == b,
            (InitArg::ExprList(a), InitArg::ExprList(b)) => a == b,
            (InitArg::KwArgs(a), InitArg::KwArgs(b)) => a == b,
            _ => false,
        }
    }
}

fn push_opt(args: &mut Vec<InitArg>, value: &Option<Box<Expression>>) {
    args.push(InitArg::OptExpr(value.clone()));
}

impl Expression {
    /// Returns the dispatch key of the node.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expression::Scalar(_) => ExprType::Scalar,
            Expression::Array(_) => ExprType::Array,
            Expression::IntLiteral(_) => ExprType::IntLiteral,
            Expression::FloatLiteral(_) => ExprType::FloatLiteral,
            Expression::LogicLiteral(_) => ExprType::LogicLiteral,
            Expression::StringLiteral(_) => ExprType::StringLiteral,
            Expression::LiteralList(_) => ExprType::LiteralList,
            Expression::Sum(_) => ExprType::Sum,
            Expression::Product(_) => ExprType::Product,
            Expression::Quotient(_) => ExprType::Quotient,
            Expression::Power(_) => ExprType::Power,
            Expression::Comparison(_) => ExprType::Comparison,
            Expression::LogicalAnd(_) => ExprType::LogicalAnd,
            Expression::LogicalOr(_) => ExprType::LogicalOr,
            Expression::LogicalNot(_) => ExprType::LogicalNot,
            Expression::InlineCall(_) => ExprType::InlineCall,
            Expression::Cast(_) => ExprType::Cast,
            Expression::Range(_) => ExprType::Range,
            Expression::LoopRange(_) => ExprType::LoopRange,
            Expression::RangeIndex(_) => ExprType::RangeIndex,
            Expression::ArraySubscript(_) => ExprType::ArraySubscript,
        }
    }

    /// The canonical, ordered field list sufficient to rebuild an equal
    /// node. Source provenance is deliberately not part of it: a rebuilt
    /// node is equal to the original wherever it came from.
    pub fn init_args(&self) -> Vec<InitArg> {
        let mut args = vec![];

        match self {
            Expression::Scalar(scalar) => {
                args.push(InitArg::Name(scalar.name.clone()));
                args.push(InitArg::Scope(scalar.scope.clone()));
            }
            Expression::Array(array) => {
                args.push(InitArg::Name(array.name.clone()));
                args.push(InitArg::Scope(array.scope.clone()));
                if let Some(dimensions) = &array.dimensions {
                    args.push(InitArg::ExprList(dimensions.index.clone()));
                }
            }
            Expression::IntLiteral(literal) => {
                args.push(InitArg::Int(literal.value));
                if let Some(kind) = &literal.kind {
                    args.push(InitArg::Text(kind.clone()));
                }
            }
            Expression::FloatLiteral(literal) => {
                args.push(InitArg::Text(literal.value.clone()));
                if let Some(kind) = &literal.kind {
                    args.push(InitArg::Text(kind.clone()));
                }
            }
            Expression::LogicLiteral(literal) => {
                args.push(InitArg::Bool(literal.value));
            }
            Expression::StringLiteral(literal) => {
                args.push(InitArg::Text(literal.value.clone()));
            }
            Expression::LiteralList(list) => {
                args.push(InitArg::ExprList(list.elements.clone()));
            }
            Expression::Sum(sum) => {
                args.push(InitArg::ExprList(sum.children.clone()));
            }
            Expression::Product(product) => {
                args.push(InitArg::ExprList(product.children.clone()));
            }
            Expression::Quotient(quotient) => {
                args.push(InitArg::Expr(quotient.numerator.clone()));
                args.push(InitArg::Expr(quotient.denominator.clone()));
            }
            Expression::Power(power) => {
                args.push(InitArg::Expr(power.base.clone()));
                args.push(InitArg::Expr(power.exponent.clone()));
            }
            Expression::Comparison(comparison) => {
                args.push(InitArg::Expr(comparison.left.clone()));
                args.push(InitArg::Text(comparison.operator.clone()));
                args.push(InitArg::Expr(comparison.right.clone()));
            }
            Expression::LogicalAnd(and) => {
                args.push(InitArg::ExprList(and.children.clone()));
            }
            Expression::LogicalOr(or) => {
                args.push(InitArg::ExprList(or.children.clone()));
            }
            Expression::LogicalNot(not) => {
                args.push(InitArg::Expr(not.child.clone()));
            }
            Expression::InlineCall(call) => {
                args.push(InitArg::Name(call.name.clone()));
                args.push(InitArg::ExprList(call.parameters.clone()));
                args.push(InitArg::KwArgs(call.kw_parameters.clone()));
            }
            Expression::Cast(cast) => {
                args.push(InitArg::Name(cast.name.clone()));
                args.push(InitArg::Expr(cast.expression.clone()));
                args.push(InitArg::OptExpr(cast.kind.clone()));
            }
            Expression::Range(range) => {
                push_opt(&mut args, &range.lower);
                push_opt(&mut args, &range.upper);
                push_opt(&mut args, &range.step);
            }
            Expression::LoopRange(range) => {
                push_opt(&mut args, &range.lower);
                push_opt(&mut args, &range.upper);
                push_opt(&mut args, &range.step);
            }
            Expression::RangeIndex(range) => {
                push_opt(&mut args, &range.lower);
                push_opt(&mut args, &range.upper);
                push_opt(&mut args, &range.step);
            }
            Expression::ArraySubscript(subscript) => {
                args.push(InitArg::ExprList(subscript.index.clone()));
            }
        }

        args
    }

    /// Returns the node's source provenance, if it has any.
    pub fn source(&self) -> Option<&Span> {
        match self {
            Expression::Scalar(node) => node.source.as_ref(),
            Expression::Array(node) => node.source.as_ref(),
            Expression::IntLiteral(node) => node.source.as_ref(),
            Expression::FloatLiteral(node) => node.source.as_ref(),
            Expression::LogicLiteral(node) => node.source.as_ref(),
            Expression::StringLiteral(node) => node.source.as_ref(),
            Expression::LiteralList(node) => node.source.as_ref(),
            Expression::Sum(node) => node.source.as_ref(),
            Expression::Product(node) => node.source.as_ref(),
            Expression::Quotient(node) => node.source.as_ref(),
            Expression::Power(node) => node.source.as_ref(),
            Expression::Comparison(node) => node.source.as_ref(),
            Expression::LogicalAnd(node) => node.source.as_ref(),
            Expression::LogicalOr(node) => node.source.as_ref(),
            Expression::LogicalNot(node) => node.source.as_ref(),
            Expression::InlineCall(node) => node.source.as_ref(),
            Expression::Cast(node) => node.source.as_ref(),
            Expression::Range(node) => node.source.as_ref(),
            Expression::LoopRange(node) => node.source.as_ref(),
            Expression::RangeIndex(node) => node.source.as_ref(),
            Expression::ArraySubscript(node) => node.source.as_ref(),
        }
    }

    /// Drops the node's source provenance so backends re-render it through
    /// the stringifier instead of reusing original source text.
    pub fn invalidate_source(&mut self) {
        match self {
            Expression::Scalar(node) => node.source = None,
            Expression::Array(node) => node.source = None,
            Expression::IntLiteral(node) => node.source = None,
            Expression::FloatLiteral(node) => node.source = None,
            Expression::LogicLiteral(node) => node.source = None,
            Expression::StringLiteral(node) => node.source = None,
            Expression::LiteralList(node) => node.source = None,
            Expression::Sum(node) => node.source = None,
            Expression::Product(node) => node.source = None,
            Expression::Quotient(node) => node.source = None,
            Expression::Power(node) => node.source = None,
            Expression::Comparison(node) => node.source = None,
            Expression::LogicalAnd(node) => node.source = None,
            Expression::LogicalOr(node) => node.source = None,
            Expression::LogicalNot(node) => node.source = None,
            Expression::InlineCall(node) => node.source = None,
            Expression::Cast(node) => node.source = None,
            Expression::Range(node) => node.source = None,
            Expression::LoopRange(node) => node.source = None,
            Expression::RangeIndex(node) => node.source = None,
            Expression::ArraySubscript(node) => node.source = None,
        }
    }

    /// The symbol or function name, for the node kinds that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Expression::Scalar(scalar) => Some(&scalar.name),
            Expression::Array(array) => Some(&array.name),
            Expression::InlineCall(call) => Some(&call.name),
            Expression::Cast(cast) => Some(&cast.name),
            _ => None,
        }
    }
}

impl PartialEq for Expression {
    /// Structural equality: same dispatch key, same reconstruction
    /// arguments. Identity plays no part, so two nodes built separately for
    /// the same symbol compare equal.
    fn eq(&self, other: &Self) -> bool {
        self.get_expr_type() == other.get_expr_type() && self.init_args() == other.init_args()
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Stringifier::new().stringify(self))
    }
}
