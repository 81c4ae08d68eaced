//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnclassifiableLiteral {
            value: "@".to_string(),
        },
        Position(10, Rc::new("test.f90".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnclassifiableLiteral");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.f90".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_invalid_construction_error() {
    let error = Error::new(
        ErrorImpl::InvalidConstruction {
            message: "a variable requires a name".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "InvalidConstruction");
}

#[test]
fn test_scope_dropped_error() {
    let error = Error::new(
        ErrorImpl::ScopeDropped {
            variable: "x".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ScopeDropped");
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_unclassifiable_literal_tip_names_the_value() {
    let error = Error::new(
        ErrorImpl::UnclassifiableLiteral {
            value: "1..0".to_string(),
        },
        Position::null(),
    );

    let tip = format!("{}", error.get_tip());
    assert!(tip.contains("1..0"));
}

#[test]
fn test_error_display() {
    let error = ErrorImpl::ScopeDropped {
        variable: "tend".to_string(),
    };

    assert_eq!(format!("{}", error), "scope of \"tend\" has been dropped");
}
