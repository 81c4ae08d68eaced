//! Traversal and substitution utilities for transformation passes.
//!
//! All of these are exhaustive matches over [`Expression`], so adding a
//! node kind is a compiler-checked update here.

use super::expressions::{
    ArraySubscript, Cast, Comparison, Expression, InlineCall, LogicalAnd, LogicalNot, LogicalOr,
    LoopRange, Power, Product, Quotient, Range, RangeIndex, Sum,
};

fn push_opt<'a>(children: &mut Vec<&'a Expression>, child: &'a Option<Box<Expression>>) {
    if let Some(child) = child {
        children.push(child);
    }
}

/// The direct child expressions of a node, in rendering order.
pub fn children(expr: &Expression) -> Vec<&Expression> {
    let mut children: Vec<&Expression> = vec![];

    match expr {
        Expression::Scalar(scalar) => {
            push_opt(&mut children, &scalar.initial);
        }
        Expression::Array(array) => {
            if let Some(dimensions) = &array.dimensions {
                children.extend(dimensions.index.iter());
            }
            push_opt(&mut children, &array.initial);
        }
        Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::LogicLiteral(_)
        | Expression::StringLiteral(_) => {}
        Expression::LiteralList(list) => children.extend(list.elements.iter()),
        Expression::Sum(sum) => children.extend(sum.children.iter()),
        Expression::Product(product) => children.extend(product.children.iter()),
        Expression::Quotient(quotient) => {
            children.push(&quotient.numerator);
            children.push(&quotient.denominator);
        }
        Expression::Power(power) => {
            children.push(&power.base);
            children.push(&power.exponent);
        }
        Expression::Comparison(comparison) => {
            children.push(&comparison.left);
            children.push(&comparison.right);
        }
        Expression::LogicalAnd(and) => children.extend(and.children.iter()),
        Expression::LogicalOr(or) => children.extend(or.children.iter()),
        Expression::LogicalNot(not) => children.push(&not.child),
        Expression::InlineCall(call) => {
            children.extend(call.parameters.iter());
            children.extend(call.kw_parameters.iter().map(|(_, value)| value));
        }
        Expression::Cast(cast) => {
            children.push(&cast.expression);
            push_opt(&mut children, &cast.kind);
        }
        Expression::Range(range) => {
            push_opt(&mut children, &range.lower);
            push_opt(&mut children, &range.upper);
            push_opt(&mut children, &range.step);
        }
        Expression::LoopRange(range) => {
            push_opt(&mut children, &range.lower);
            push_opt(&mut children, &range.upper);
            push_opt(&mut children, &range.step);
        }
        Expression::RangeIndex(range) => {
            push_opt(&mut children, &range.lower);
            push_opt(&mut children, &range.upper);
            push_opt(&mut children, &range.step);
        }
        Expression::ArraySubscript(subscript) => children.extend(subscript.index.iter()),
    }

    children
}

/// Collects every bound symbol node in the tree, pre-order, deduplicated
/// by structural equality.
pub fn collect_variables(expr: &Expression) -> Vec<Expression> {
    let mut variables = vec![];
    collect_variables_into(expr, &mut variables);
    variables
}

fn collect_variables_into(expr: &Expression, variables: &mut Vec<Expression>) {
    if matches!(expr, Expression::Scalar(_) | Expression::Array(_)) && !variables.contains(expr) {
        variables.push(expr.clone());
    }

    for child in children(expr) {
        collect_variables_into(child, variables);
    }
}

fn substitute_box(
    expr: &Expression,
    replacements: &[(Expression, Expression)],
) -> Box<Expression> {
    Box::new(substitute(expr, replacements))
}

fn substitute_opt(
    expr: &Option<Box<Expression>>,
    replacements: &[(Expression, Expression)],
) -> Option<Box<Expression>> {
    expr.as_deref()
        .map(|child| substitute_box(child, replacements))
}

fn substitute_all(
    exprs: &[Expression],
    replacements: &[(Expression, Expression)],
) -> Vec<Expression> {
    exprs
        .iter()
        .map(|child| substitute(child, replacements))
        .collect()
}

/// Rebuilds the tree with every subtree structurally equal to a `from`
/// pattern replaced by the corresponding `to` expression. Matching is
/// top-down: a replaced subtree is not searched again.
pub fn substitute(
    expr: &Expression,
    replacements: &[(Expression, Expression)],
) -> Expression {
    for (from, to) in replacements {
        if expr == from {
            return to.clone();
        }
    }

    match expr {
        Expression::Scalar(_)
        | Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::LogicLiteral(_)
        | Expression::StringLiteral(_) => expr.clone(),
        Expression::Array(array) => {
            let mut array = array.clone();
            array.dimensions = array
                .dimensions
                .map(|dimensions| ArraySubscript::new(substitute_all(&dimensions.index, replacements)));
            array.initial = array
                .initial
                .as_deref()
                .map(|initial| substitute_box(initial, replacements));
            Expression::Array(array)
        }
        Expression::LiteralList(list) => {
            let mut list = list.clone();
            list.elements = substitute_all(&list.elements, replacements);
            Expression::LiteralList(list)
        }
        Expression::Sum(sum) => Expression::Sum(Sum {
            children: substitute_all(&sum.children, replacements),
            source: sum.source.clone(),
        }),
        Expression::Product(product) => Expression::Product(Product {
            children: substitute_all(&product.children, replacements),
            source: product.source.clone(),
        }),
        Expression::Quotient(quotient) => Expression::Quotient(Quotient {
            numerator: substitute_box(&quotient.numerator, replacements),
            denominator: substitute_box(&quotient.denominator, replacements),
            source: quotient.source.clone(),
        }),
        Expression::Power(power) => Expression::Power(Power {
            base: substitute_box(&power.base, replacements),
            exponent: substitute_box(&power.exponent, replacements),
            source: power.source.clone(),
        }),
        Expression::Comparison(comparison) => Expression::Comparison(Comparison {
            left: substitute_box(&comparison.left, replacements),
            operator: comparison.operator.clone(),
            right: substitute_box(&comparison.right, replacements),
            source: comparison.source.clone(),
        }),
        Expression::LogicalAnd(and) => Expression::LogicalAnd(LogicalAnd {
            children: substitute_all(&and.children, replacements),
            source: and.source.clone(),
        }),
        Expression::LogicalOr(or) => Expression::LogicalOr(LogicalOr {
            children: substitute_all(&or.children, replacements),
            source: or.source.clone(),
        }),
        Expression::LogicalNot(not) => Expression::LogicalNot(LogicalNot {
            child: substitute_box(&not.child, replacements),
            source: not.source.clone(),
        }),
        Expression::InlineCall(call) => Expression::InlineCall(InlineCall {
            name: call.name.clone(),
            parameters: substitute_all(&call.parameters, replacements),
            kw_parameters: call
                .kw_parameters
                .iter()
                .map(|(name, value)| (name.clone(), substitute(value, replacements)))
                .collect(),
            source: call.source.clone(),
        }),
        Expression::Cast(cast) => Expression::Cast(Cast {
            name: cast.name.clone(),
            expression: substitute_box(&cast.expression, replacements),
            kind: substitute_opt(&cast.kind, replacements),
            source: cast.source.clone(),
        }),
        Expression::Range(range) => Expression::Range(Range {
            lower: substitute_opt(&range.lower, replacements),
            upper: substitute_opt(&range.upper, replacements),
            step: substitute_opt(&range.step, replacements),
            source: range.source.clone(),
        }),
        Expression::LoopRange(range) => Expression::LoopRange(LoopRange {
            lower: substitute_opt(&range.lower, replacements),
            upper: substitute_opt(&range.upper, replacements),
            step: substitute_opt(&range.step, replacements),
            source: range.source.clone(),
        }),
        Expression::RangeIndex(range) => Expression::RangeIndex(RangeIndex {
            lower: substitute_opt(&range.lower, replacements),
            upper: substitute_opt(&range.upper, replacements),
            step: substitute_opt(&range.step, replacements),
            source: range.source.clone(),
        }),
        Expression::ArraySubscript(subscript) => Expression::ArraySubscript(ArraySubscript::new(
            substitute_all(&subscript.index, replacements),
        )),
    }
}
