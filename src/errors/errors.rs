use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// An error raised while building an expression tree, carrying the source
/// position it was raised at.
///
/// Construction-time failures are fatal for the subtree being built and are
/// propagated to the caller; no partially built node is ever returned.
/// Note that overwriting a symbol's type in its scope is deliberately NOT an
/// error ("last writer wins"), and looking up an undeclared name yields an
/// absent result rather than failing.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnclassifiableLiteral { .. } => "UnclassifiableLiteral",
            ErrorImpl::InvalidConstruction { .. } => "InvalidConstruction",
            ErrorImpl::ScopeDropped { .. } => "ScopeDropped",
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnclassifiableLiteral { value } => ErrorTip::Suggestion(format!(
                "The value `{}` is not an integer, real, logical or character literal \
                 and does not parse as an expression",
                value
            )),
            ErrorImpl::InvalidConstruction { message } => {
                ErrorTip::Suggestion(message.clone())
            }
            ErrorImpl::ScopeDropped { variable } => ErrorTip::Suggestion(format!(
                "The scope owning `{}` has been released; the symbol can no longer \
                 reach its type entry",
                variable
            )),
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unclassifiable literal: {value:?}")]
    UnclassifiableLiteral { value: String },
    #[error("invalid construction: {message}")]
    InvalidConstruction { message: String },
    #[error("scope of {variable:?} has been dropped")]
    ScopeDropped { variable: String },
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
}
