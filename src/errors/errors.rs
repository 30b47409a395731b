use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Which stage noticed the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Syntax,
    Semantic,
    Fatal,
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

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::Expected { .. } => "Expected",
            ErrorImpl::Invalid { .. } => "Invalid",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::IncompatibleTypes => "IncompatibleTypes",
            ErrorImpl::IntegerExpected => "IntegerExpected",
            ErrorImpl::BooleanExpected => "BooleanExpected",
            ErrorImpl::ConditionalBooleanExpected => "ConditionalBooleanExpected",
            ErrorImpl::AssignToNonVariable => "AssignToNonVariable",
            ErrorImpl::VariableExpected => "VariableExpected",
            ErrorImpl::NotAProcedure => "NotAProcedure",
            ErrorImpl::ReadKindMismatch { .. } => "ReadKindMismatch",
            ErrorImpl::ReadTypeMismatch { .. } => "ReadTypeMismatch",
            ErrorImpl::StructAlreadyDefined { .. } => "StructAlreadyDefined",
            ErrorImpl::StructNotDefined { .. } => "StructNotDefined",
            ErrorImpl::ArrayAlreadyDeclared { .. } => "ArrayAlreadyDeclared",
            ErrorImpl::ArrayTooLarge { .. } => "ArrayTooLarge",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::CaseTypeMismatch => "CaseTypeMismatch",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorClass::Fatal,
            ErrorImpl::Expected { .. } | ErrorImpl::Invalid { .. } => ErrorClass::Syntax,
            _ => ErrorClass::Semantic,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "-- line {} col {}: {}",
            self.position.line, self.position.col, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character {token:?}")]
    UnrecognisedToken { token: String },
    #[error("{token} expected")]
    Expected { token: String },
    #[error("invalid {production}")]
    Invalid { production: &'static str },
    #[error("invalid number {token}")]
    NumberParseError { token: String },
    #[error("reference to undefined variable {name}")]
    UndefinedVariable { name: String },
    #[error("incompatible types")]
    IncompatibleTypes,
    #[error("integer type expected")]
    IntegerExpected,
    #[error("boolean type expected")]
    BooleanExpected,
    #[error("boolean type expected for conditional assignment")]
    ConditionalBooleanExpected,
    #[error("cannot assign to non-variable")]
    AssignToNonVariable,
    #[error("variable expected")]
    VariableExpected,
    #[error("object is not a procedure")]
    NotAProcedure,
    #[error("variable type expected but {name} has kind {kind}")]
    ReadKindMismatch { name: String, kind: String },
    #[error("integer type expected but {name} has type {type_}")]
    ReadTypeMismatch { name: String, type_: String },
    #[error("struct '{name}' is already defined")]
    StructAlreadyDefined { name: String },
    #[error("struct '{name}' has not been defined")]
    StructNotDefined { name: String },
    #[error("array '{name}' is already declared")]
    ArrayAlreadyDeclared { name: String },
    #[error("array '{name}' has too many elements")]
    ArrayTooLarge { name: String },
    #[error("procedure {name} expects {expected} argument(s), received {received}")]
    ArgumentCountMismatch { name: String, expected: usize, received: usize },
    #[error("argument {index} of {name}: expected {expected}, received {received}")]
    ArgumentTypeMismatch { name: String, index: usize, expected: String, received: String },
    #[error("case label type does not match switch subject")]
    CaseTypeMismatch,
}
