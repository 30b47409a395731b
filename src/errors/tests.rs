//! Unit tests for error handling and the diagnostics reporter.

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorClass, ErrorImpl};
use crate::errors::reporter::{Reporter, Severity};
use crate::Position;

fn at(line: u32, col: u32) -> Position {
    Position::new(line, col, Rc::new("test.tas".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        at(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.class(), ErrorClass::Fatal);
    assert_eq!(error.get_position().col, 10);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ErrorImpl::UndefinedVariable { name: "x".to_string() }.to_string(),
        "reference to undefined variable x"
    );
    assert_eq!(ErrorImpl::IncompatibleTypes.to_string(), "incompatible types");
    assert_eq!(ErrorImpl::IntegerExpected.to_string(), "integer type expected");
    assert_eq!(
        ErrorImpl::Expected { token: "\";\"".to_string() }.to_string(),
        "\";\" expected"
    );
    assert_eq!(
        ErrorImpl::StructAlreadyDefined { name: "Point".to_string() }.to_string(),
        "struct 'Point' is already defined"
    );
}

#[test]
fn test_error_classes() {
    let syntax = Error::new(ErrorImpl::Invalid { production: "Stat" }, at(1, 1));
    let semantic = Error::new(ErrorImpl::IncompatibleTypes, at(1, 1));

    assert_eq!(syntax.class(), ErrorClass::Syntax);
    assert_eq!(semantic.class(), ErrorClass::Semantic);
}

#[test]
fn test_error_display() {
    let error = Error::new(ErrorImpl::BooleanExpected, at(3, 14));
    assert_eq!(error.to_string(), "-- line 3 col 14: boolean type expected");
}

#[test]
fn test_reporter_surfaces_first_error() {
    let mut reporter = Reporter::default();

    assert!(reporter.report(Error::new(ErrorImpl::IncompatibleTypes, at(2, 5))));
    assert_eq!(reporter.count(), 1);
    assert_eq!(reporter.diagnostics()[0].to_string(), "-- line 2 col 5: incompatible types");
}

#[test]
fn test_reporter_suppresses_within_distance() {
    let mut reporter = Reporter::default();

    reporter.report(Error::new(ErrorImpl::IncompatibleTypes, at(1, 1)));
    reporter.token_consumed();
    assert!(!reporter.report(Error::new(ErrorImpl::IntegerExpected, at(1, 2))));
    assert_eq!(reporter.count(), 1);

    // The swallowed error reset the distance as well
    reporter.token_consumed();
    assert!(!reporter.report(Error::new(ErrorImpl::IntegerExpected, at(1, 3))));

    reporter.token_consumed();
    reporter.token_consumed();
    assert!(reporter.report(Error::new(ErrorImpl::BooleanExpected, at(1, 5))));
    assert_eq!(reporter.count(), 2);
}

#[test]
fn test_reporter_warnings_are_not_counted() {
    let mut reporter = Reporter::default();
    reporter.warn("Warning: Program p is empty".to_string(), &at(1, 1));

    assert_eq!(reporter.count(), 0);
    assert_eq!(reporter.diagnostics().len(), 1);
    assert_eq!(reporter.diagnostics()[0].severity, Severity::Warning);
}

#[test]
fn test_reporter_custom_distance() {
    let mut reporter = Reporter::new(0);

    assert!(reporter.report(Error::new(ErrorImpl::IncompatibleTypes, at(1, 1))));
    assert!(reporter.report(Error::new(ErrorImpl::IncompatibleTypes, at(1, 1))));
    assert_eq!(reporter.count(), 2);
}
