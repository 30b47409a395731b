use std::fmt::Display;

use log::{debug, warn};

use crate::Position;

use super::errors::{Error, ErrorClass};

/// Tokens that must be consumed after a reported error before another is surfaced.
pub const MIN_ERROR_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error(ErrorClass),
    Warning,
}

/// One line of the diagnostics stream.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-- line {} col {}: {}", self.line, self.col, self.message)
    }
}

/// Collects diagnostics for one compilation, suppressing cascades.
///
/// `distance` counts tokens consumed since the last report. An error found
/// while `distance < min_distance` is swallowed: neither recorded nor
/// counted. Every error, surfaced or not, resets the distance.
#[derive(Debug)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
    count: usize,
    distance: usize,
    min_distance: usize,
}

impl Reporter {
    pub fn new(min_distance: usize) -> Self {
        Reporter {
            diagnostics: vec![],
            count: 0,
            distance: min_distance,
            min_distance,
        }
    }

    pub fn token_consumed(&mut self) {
        self.distance += 1;
    }

    /// Records `error` if far enough from the previous one. Returns whether it surfaced.
    pub fn report(&mut self, error: Error) -> bool {
        let surfaced = self.distance >= self.min_distance;
        self.distance = 0;

        if !surfaced {
            debug!("suppressed: {}", error);
            return false;
        }

        let position = error.get_position();
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error(error.class()),
            line: position.line,
            col: position.col,
            message: error.get_impl().to_string(),
        });
        self.count += 1;
        true
    }

    pub fn warn(&mut self, message: String, position: &Position) {
        warn!("{}", message);
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            line: position.line,
            col: position.col,
            message,
        });
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Reporter::new(MIN_ERROR_DISTANCE)
    }
}
