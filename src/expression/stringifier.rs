//! Precedence-aware rendering of expression trees back to Fortran syntax.
//!
//! Each node kind carries a precedence level; a child is wrapped in
//! parentheses only when its own level is strictly lower than what its
//! position requires, so re-rendered source stays minimal.

use super::expressions::Expression;
use super::literals::{FloatLiteral, IntLiteral};

const PREC_NONE: u8 = 0;
const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_COMPARISON: u8 = 4;
const PREC_SUM: u8 = 5;
const PREC_PRODUCT: u8 = 6;
const PREC_UNARY: u8 = 7;
const PREC_POWER: u8 = 8;
const PREC_CALL: u8 = 9;

/// Renders expression trees to Fortran source text.
pub struct Stringifier;

impl Stringifier {
    pub fn new() -> Self {
        Stringifier
    }

    pub fn stringify(&self, expr: &Expression) -> String {
        self.visit(expr, PREC_NONE)
    }

    fn visit(&self, expr: &Expression, min_prec: u8) -> String {
        let (text, prec) = self.render(expr);
        if prec < min_prec {
            format!("({})", text)
        } else {
            text
        }
    }

    fn visit_opt(&self, expr: &Option<Box<Expression>>) -> String {
        match expr {
            Some(expr) => self.visit(expr, PREC_NONE),
            None => String::new(),
        }
    }

    fn join(&self, children: &[Expression], separator: &str, min_prec: u8) -> String {
        children
            .iter()
            .map(|child| self.visit(child, min_prec))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Splits a negated term off a sum child: a literal with a negative
    /// value, or a product with a leading `-1` factor.
    fn negated_term(&self, child: &Expression) -> Option<String> {
        match child {
            Expression::IntLiteral(IntLiteral { value, kind, .. }) if *value < 0 => {
                Some(render_int(-value, kind))
            }
            Expression::Product(product) => match product.children.split_first() {
                Some((Expression::IntLiteral(IntLiteral { value: -1, .. }), rest))
                    if !rest.is_empty() =>
                {
                    Some(self.join(rest, " * ", PREC_PRODUCT))
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&self, expr: &Expression) -> (String, u8) {
        match expr {
            Expression::Scalar(scalar) => (scalar.name.clone(), PREC_CALL),
            Expression::Array(array) => {
                let mut text = array.name.clone();
                if let Some(dimensions) = &array.dimensions {
                    text = format!("{}({})", text, self.join(&dimensions.index, ", ", PREC_NONE));
                }
                if let Some(initial) = &array.initial {
                    text = format!("{} = {}", text, self.visit(initial, PREC_NONE));
                }
                (text, PREC_CALL)
            }
            Expression::IntLiteral(literal) => {
                (render_int(literal.value, &literal.kind), PREC_CALL)
            }
            Expression::FloatLiteral(FloatLiteral { value, kind, .. }) => {
                let text = match kind {
                    Some(kind) => format!("{}_{}", value, kind),
                    None => value.clone(),
                };
                (text, PREC_CALL)
            }
            Expression::LogicLiteral(literal) => {
                let text = if literal.value { ".true." } else { ".false." };
                (String::from(text), PREC_CALL)
            }
            Expression::StringLiteral(literal) => (format!("'{}'", literal.value), PREC_CALL),
            Expression::LiteralList(list) => (
                format!("[{}]", self.join(&list.elements, ", ", PREC_NONE)),
                PREC_CALL,
            ),
            Expression::Sum(sum) => {
                let mut text = String::new();
                for (position, child) in sum.children.iter().enumerate() {
                    match self.negated_term(child) {
                        Some(term) if position == 0 => {
                            text = format!("-{}", term);
                        }
                        Some(term) => {
                            text = format!("{} - {}", text, term);
                        }
                        None if position == 0 => {
                            text = self.visit(child, PREC_SUM);
                        }
                        None => {
                            text = format!("{} + {}", text, self.visit(child, PREC_SUM));
                        }
                    }
                }
                (text, PREC_SUM)
            }
            Expression::Product(product) => {
                let text = match product.children.split_first() {
                    Some((Expression::IntLiteral(IntLiteral { value: -1, .. }), rest))
                        if !rest.is_empty() =>
                    {
                        format!("-{}", self.join(rest, " * ", PREC_PRODUCT))
                    }
                    _ => self.join(&product.children, " * ", PREC_PRODUCT),
                };
                (text, PREC_PRODUCT)
            }
            Expression::Quotient(quotient) => {
                let numerator = self.visit(&quotient.numerator, PREC_PRODUCT);
                let denominator = self.visit(&quotient.denominator, PREC_UNARY);
                (format!("{} / {}", numerator, denominator), PREC_PRODUCT)
            }
            Expression::Power(power) => {
                let base = self.visit(&power.base, PREC_CALL);
                let exponent = self.visit(&power.exponent, PREC_POWER);
                (format!("{}**{}", base, exponent), PREC_POWER)
            }
            Expression::Comparison(comparison) => {
                let left = self.visit(&comparison.left, PREC_SUM);
                let right = self.visit(&comparison.right, PREC_SUM);
                (
                    format!("{} {} {}", left, comparison.operator, right),
                    PREC_COMPARISON,
                )
            }
            Expression::LogicalAnd(and) => {
                (self.join(&and.children, " .and. ", PREC_AND), PREC_AND)
            }
            Expression::LogicalOr(or) => (self.join(&or.children, " .or. ", PREC_OR), PREC_OR),
            Expression::LogicalNot(not) => (
                format!(".not. {}", self.visit(&not.child, PREC_NOT)),
                PREC_NOT,
            ),
            Expression::InlineCall(call) => {
                let mut arguments: Vec<String> = call
                    .parameters
                    .iter()
                    .map(|parameter| self.visit(parameter, PREC_NONE))
                    .collect();
                for (name, value) in &call.kw_parameters {
                    arguments.push(format!("{}={}", name, self.visit(value, PREC_NONE)));
                }
                (
                    format!("{}({})", call.name, arguments.join(", ")),
                    PREC_CALL,
                )
            }
            Expression::Cast(cast) => {
                let expression = self.visit(&cast.expression, PREC_NONE);
                let text = match &cast.kind {
                    Some(kind) => format!(
                        "{}({}, kind={})",
                        cast.name,
                        expression,
                        self.visit(kind, PREC_NONE)
                    ),
                    None => format!("{}({})", cast.name, expression),
                };
                (text, PREC_CALL)
            }
            Expression::Range(range) => {
                let mut text =
                    format!("{}:{}", self.visit_opt(&range.lower), self.visit_opt(&range.upper));
                if range.step.is_some() {
                    text = format!("{}:{}", text, self.visit_opt(&range.step));
                }
                (text, PREC_NONE)
            }
            Expression::LoopRange(range) => {
                let mut text = format!(
                    "{}, {}",
                    self.visit_opt(&range.lower),
                    self.visit_opt(&range.upper)
                );
                if range.step.is_some() {
                    text = format!("{}, {}", text, self.visit_opt(&range.step));
                }
                (text, PREC_NONE)
            }
            Expression::RangeIndex(range) => {
                let mut text =
                    format!("{}:{}", self.visit_opt(&range.lower), self.visit_opt(&range.upper));
                if range.step.is_some() {
                    text = format!("{}:{}", text, self.visit_opt(&range.step));
                }
                (text, PREC_NONE)
            }
            Expression::ArraySubscript(subscript) => {
                (self.join(&subscript.index, ", ", PREC_NONE), PREC_NONE)
            }
        }
    }
}

impl Default for Stringifier {
    fn default() -> Self {
        Stringifier::new()
    }
}

fn render_int(value: i64, kind: &Option<String>) -> String {
    match kind {
        Some(kind) => format!("{}_{}", value, kind),
        None => value.to_string(),
    }
}

/// Renders an expression to Fortran source text.
pub fn stringify(expr: &Expression) -> String {
    Stringifier::new().stringify(expr)
}
