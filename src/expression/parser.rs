//! Fallback expression interpreter.
//!
//! The literal factory hands values here when they are not elementary
//! literals, and transformation passes use [`parse_expression`] to build
//! trees from raw Fortran expression text. Tokenization runs over a regex
//! pattern table with per-pattern handlers; parsing is a Pratt parser with
//! NUD/LED lookup tables keyed by token kind.
//!
//! Identifier leaves are built through the [`Variable`] factory against the
//! caller's scope. Parsing without a scope is supported for constant
//! expressions only; a bare name then fails with an unexpected-token error,
//! which the literal factory reports as an unclassifiable literal.

use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::errors::{Error, ErrorImpl};
use crate::scope::scope::Scope;
use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::expressions::{
    Comparison, Expression, InlineCall, LogicalAnd, LogicalNot, LogicalOr, Power, Product,
    Quotient, RangeIndex, Sum,
};
use super::literals::{IntLiteral, Literal, LogicLiteral, StringLiteral};
use super::symbols::Variable;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,
    String,
    Logical,

    OpenParen,
    CloseParen,
    Comma,
    Colon,
    Percent,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // /=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    And,
    Or,
    Not,

    Plus,
    Dash,
    Star,
    StarStar,
    Slash,

    Unknown,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

lazy_static! {
    /// Fortran dot-delimited operator and literal keywords. Comparison
    /// spellings normalize to their symbolic form.
    static ref DOT_LOOKUP: HashMap<&'static str, (TokenKind, &'static str)> = {
        let mut map = HashMap::new();
        map.insert(".true.", (TokenKind::Logical, ".true."));
        map.insert(".false.", (TokenKind::Logical, ".false."));
        map.insert(".and.", (TokenKind::And, ".and."));
        map.insert(".or.", (TokenKind::Or, ".or."));
        map.insert(".not.", (TokenKind::Not, ".not."));
        map.insert(".eq.", (TokenKind::Equals, "=="));
        map.insert(".ne.", (TokenKind::NotEquals, "/="));
        map.insert(".lt.", (TokenKind::Less, "<"));
        map.insert(".le.", (TokenKind::LessEquals, "<="));
        map.insert(".gt.", (TokenKind::Greater, ">"));
        map.insert(".ge.", (TokenKind::GreaterEquals, ">="));
        map
    };
}

pub type RegexHandler = fn(&mut Lexer, Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: i32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Rc<String>) -> Lexer {
        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("\\.[a-zA-Z]+\\.").unwrap(), handler: dot_word_handler },
                RegexPattern { regex: Regex::new("[0-9]*\\.?[0-9]+([eEdD][+-]?[0-9]+)?(_[a-zA-Z][a-zA-Z0-9_]*)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("'[^']*'|\"[^\"]*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new(",").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new(":").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new("%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
                RegexPattern { regex: Regex::new("==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "/=") },
                RegexPattern { regex: Regex::new("<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new(">=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("\\*\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**") },
                RegexPattern { regex: Regex::new("\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
                RegexPattern { regex: Regex::new("/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
            ],
            source,
            file,
        }
    }

    pub fn advance_n(&mut self, n: i32) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos as usize] as char
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos as usize..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos as usize >= self.source.len()
    }

    fn token_span(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position(self.pos as u32 + len as u32, Rc::clone(&self.file)),
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched as i32);
}

fn number_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let span = lexer.token_span(matched.len());

    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), span));
    lexer.advance_n(matched.len() as i32);
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let span = lexer.token_span(matched.len());

    lexer.push(MK_TOKEN!(TokenKind::Identifier, matched.clone(), span));
    lexer.advance_n(matched.len() as i32);
}

fn string_handler(lexer: &mut Lexer, regex: Regex) {
    // The quotes stay in the token value; StringLiteral strips them.
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let span = lexer.token_span(matched.len());

    lexer.push(MK_TOKEN!(TokenKind::String, matched.clone(), span));
    lexer.advance_n(matched.len() as i32);
}

fn dot_word_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();
    let span = lexer.token_span(matched.len());

    match DOT_LOOKUP.get(matched.to_lowercase().as_str()) {
        Some((kind, value)) => {
            lexer.push(MK_TOKEN!(*kind, String::from(*value), span));
        }
        None => {
            lexer.push(MK_TOKEN!(TokenKind::Unknown, matched.clone(), span));
        }
    }
    lexer.advance_n(matched.len() as i32);
}

pub fn tokenize(source: &str, file: Rc<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(String::from(source), file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex.clone());
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                Position(lex.pos as u32, Rc::clone(&lex.file)),
            ));
        }
    }

    let eof_span = lex.token_span(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof_span));
    Ok(lex.tokens)
}

/// Operator precedence for the Pratt parser, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Power,
    Unary,
    Call,
    Member,
    Primary,
}

pub type NUDHandler = for<'src> fn(&mut Parser<'src>) -> Result<Expression, Error>;
pub type LEDHandler =
    for<'src> fn(&mut Parser<'src>, Expression, BindingPower) -> Result<Expression, Error>;

pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

pub struct Parser<'src> {
    tokens: Vec<Token>,
    pos: i32,
    scope: Option<&'src Scope>,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token>, scope: Option<&'src Scope>) -> Self {
        Parser {
            tokens,
            pos: 0,
            scope,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        self.tokens.get(self.pos as usize).unwrap()
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn peek_kind(&self) -> TokenKind {
        match self.tokens.get((self.pos + 1) as usize) {
            Some(token) => token.kind,
            None => TokenKind::EOF,
        }
    }

    pub fn advance(&mut self) -> &Token {
        self.pos += 1;
        self.tokens.get((self.pos - 1) as usize).unwrap()
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        } else {
            Ok(self.advance().clone())
        }
    }

    fn unexpected(&self) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    }

    fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        // Operator tokens keep the binding power their LED registered.
        self.binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }
}

fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_logical_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_logical_expr);

    // Relational
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_comparison_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_comparison_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_additive_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_additive_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_multiplicative_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_multiplicative_expr);
    parser.led(TokenKind::StarStar, BindingPower::Power, parse_power_expr);

    // Subscripts/calls and member qualification
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::Percent, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Logical, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_not_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
}

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.nud_lookup.contains_key(&token_kind) {
        return Err(parser.unexpected());
    }

    let mut left = parser.nud_lookup.get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is less than BP of current token, continue
    // parsing the lhs
    while *parser
        .binding_power_lookup
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.led_lookup.contains_key(&token_kind) {
            return Err(parser.unexpected());
        }

        let led_bp = *parser.binding_power_lookup.get(&token_kind).unwrap();
        left = parser.led_lookup.get(&token_kind).unwrap()(parser, left, led_bp)?;
    }

    Ok(left)
}

fn parse_primary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance().clone();
            // A trailing `_kind` suffix tags the literal's numeric kind.
            let (value, kind) = match token.value.split_once('_') {
                Some((value, kind)) => (String::from(value), Some(String::from(kind))),
                None => (token.value.clone(), None),
            };

            match Literal::classify(&value, kind) {
                Some(literal) => Ok(literal),
                None => Err(Error::new(
                    ErrorImpl::UnclassifiableLiteral { value: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            match parser.scope {
                Some(scope) => {
                    Variable::new(&token.value, scope, None, None, None, Some(token.span))
                }
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::String => {
            let token = parser.advance();
            Ok(Expression::StringLiteral(StringLiteral::new(&token.value)))
        }
        TokenKind::Logical => {
            let token = parser.advance();
            // The lexer only emits Logical for recognized spellings.
            Ok(Expression::LogicLiteral(
                LogicLiteral::new(&token.value).unwrap(),
            ))
        }
        _ => Err(parser.unexpected()),
    }
}

/// Negates a term: literals fold directly, everything else becomes a
/// product with a leading `-1` (which the stringifier renders back as a
/// minus sign).
fn negate(expr: Expression) -> Expression {
    match expr {
        Expression::IntLiteral(mut literal) => {
            literal.value = -literal.value;
            Expression::IntLiteral(literal)
        }
        Expression::Product(mut product) => {
            product
                .children
                .insert(0, Expression::IntLiteral(IntLiteral::new(-1)));
            Expression::Product(product)
        }
        other => Expression::Product(Product {
            children: vec![Expression::IntLiteral(IntLiteral::new(-1)), other],
            source: None,
        }),
    }
}

fn parse_additive_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp)?;
    let right = if operator == TokenKind::Dash {
        negate(right)
    } else {
        right
    };

    let children = match left {
        Expression::Sum(sum) => {
            let mut children = sum.children;
            children.push(right);
            children
        }
        other => vec![other, right],
    };

    Ok(Expression::Sum(Sum {
        children,
        source: None,
    }))
}

fn parse_multiplicative_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp)?;

    if operator == TokenKind::Slash {
        return Ok(Expression::Quotient(Quotient {
            numerator: Box::new(left),
            denominator: Box::new(right),
            source: None,
        }));
    }

    let children = match left {
        Expression::Product(product) => {
            let mut children = product.children;
            children.push(right);
            children
        }
        other => vec![other, right],
    };

    Ok(Expression::Product(Product {
        children,
        source: None,
    }))
}

fn parse_power_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    parser.advance();
    // Right-associative: parse the exponent one level below Power.
    let exponent = parse_expr(parser, BindingPower::Multiplicative)?;

    Ok(Expression::Power(Power {
        base: Box::new(left),
        exponent: Box::new(exponent),
        source: None,
    }))
}

fn parse_comparison_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.advance().value.clone();
    let right = parse_expr(parser, bp)?;

    Ok(Expression::Comparison(Comparison {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        source: None,
    }))
}

fn parse_logical_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp)?;

    if operator == TokenKind::And {
        let children = match left {
            Expression::LogicalAnd(and) => {
                let mut children = and.children;
                children.push(right);
                children
            }
            other => vec![other, right],
        };
        return Ok(Expression::LogicalAnd(LogicalAnd {
            children,
            source: None,
        }));
    }

    let children = match left {
        Expression::LogicalOr(or) => {
            let mut children = or.children;
            children.push(right);
            children
        }
        other => vec![other, right],
    };
    Ok(Expression::LogicalOr(LogicalOr {
        children,
        source: None,
    }))
}

fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;
    Ok(negate(rhs))
}

fn parse_not_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();
    // `.not.` binds tighter than `.and.`/`.or.` but looser than relational
    // operators.
    let rhs = parse_expr(parser, BindingPower::Logical)?;
    Ok(Expression::LogicalNot(LogicalNot {
        child: Box::new(rhs),
        source: None,
    }))
}

fn parse_grouping_expr(parser: &mut Parser) -> Result<Expression, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// One call/subscript argument; handles `lower:upper:step` subscript
/// ranges, with any bound optionally absent.
fn parse_argument(parser: &mut Parser) -> Result<Expression, Error> {
    let at_bound_end = |kind: TokenKind| {
        kind == TokenKind::Comma || kind == TokenKind::CloseParen || kind == TokenKind::Colon
    };

    let lower = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    if parser.current_token_kind() != TokenKind::Colon {
        return lower.ok_or_else(|| parser.unexpected());
    }
    parser.advance();

    let upper = if at_bound_end(parser.current_token_kind()) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let step = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        if at_bound_end(parser.current_token_kind()) {
            None
        } else {
            Some(parse_expr(parser, BindingPower::Default)?)
        }
    } else {
        None
    };

    Ok(RangeIndex::new(lower, upper, step))
}

fn parse_call_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let name = match left.name() {
        Some(name) => String::from(name),
        None => return Err(parser.unexpected()),
    };
    parser.advance();

    let mut parameters = vec![];
    let mut kw_parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        if parser.current_token_kind() == TokenKind::Identifier
            && parser.peek_kind() == TokenKind::Assignment
        {
            let kw_name = parser.advance().value.clone();
            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;
            kw_parameters.push((kw_name, value));
        } else {
            parameters.push(parse_argument(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    // A parenthesized reference to a name declared with a shape is an array
    // access, not a call.
    if kw_parameters.is_empty() {
        if let Some(scope) = parser.scope {
            let is_array = scope
                .lookup(&name, false)
                .map(|entry| !entry.shape.is_empty())
                .unwrap_or(false);
            if is_array {
                return Variable::new(&name, scope, None, Some(parameters), None, None);
            }
        }
    }

    Ok(Expression::InlineCall(InlineCall {
        name,
        parameters,
        kw_parameters,
        source: None,
    }))
}

fn parse_member_expr(
    parser: &mut Parser,
    left: Expression,
    _bp: BindingPower,
) -> Result<Expression, Error> {
    let name = match left.name() {
        Some(name) => String::from(name),
        None => return Err(parser.unexpected()),
    };
    parser.advance();
    let member = parser.expect(TokenKind::Identifier)?;

    let scope = match parser.scope {
        Some(scope) => scope,
        None => return Err(parser.unexpected()),
    };
    let qualified = format!("{}%{}", name, member.value);

    Variable::new(&qualified, scope, None, None, None, Some(member.span))
}

/// Parses a stream of Fortran expression text into an expression tree.
///
/// This is the main entry point of the fallback interpreter. Identifier
/// resolution requires `scope`; passing `None` restricts the input to
/// constant expressions.
pub fn parse_expression(source: &str, scope: Option<&Scope>) -> Result<Expression, Error> {
    let file = Rc::new(String::from("<expression>"));
    let tokens = tokenize(source, file)?;

    let mut parser = Parser::new(tokens, scope);
    create_token_lookups(&mut parser);

    let expr = parse_expr(&mut parser, BindingPower::Default)?;
    parser.expect(TokenKind::EOF)?;

    Ok(expr)
}
