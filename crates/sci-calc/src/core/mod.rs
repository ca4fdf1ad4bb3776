//! Core calculator engine
//!
//! Everything the button grid feeds into lives here: the decimal
//! number helpers, binary operations, scientific functions, the event-driven
//! engine and its history.

pub mod engine;
pub mod functions;
pub mod history;
pub mod number;
mod operations;

pub use engine::{Engine, Event, MemoryOp};
pub use functions::{AngleMode, TrigFunction, UnaryFunction};
pub use operations::{Calculator, Operation};

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Domain defaults (divide by zero, square root of a negative, ...) are not
/// errors under the default policy; they produce 0. The variants here cover
/// states that should not be reachable through normal keypad use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Display text that does not parse as a decimal numeral
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
    /// Digit event carrying something other than `0`-`9`
    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),
    /// Button label with no keypad meaning
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),
    /// Result is too large or too small for the display to render
    #[error("Overflow: result exceeds display range")]
    Overflow,
    /// Binary floating point intermediate was NaN or infinite
    #[error("Non-finite result: {0}")]
    NonFinite(FloatViolation),
    /// Domain error reported under [`DomainPolicy::Reject`](crate::config::DomainPolicy)
    #[error("Domain error: {0}")]
    Domain(DomainError),
}

/// Inputs outside a function's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Division with a zero divisor
    #[error("division by zero")]
    DivisionByZero,
    /// Square root of a negative value
    #[error("square root of a negative value")]
    NegativeSquareRoot,
    /// Reciprocal of zero
    #[error("reciprocal of zero")]
    ZeroReciprocal,
    /// Factorial of a negative integer
    #[error("factorial of a negative value")]
    NegativeFactorial,
}

/// Anomalies detected in a floating point intermediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FloatViolation {
    /// NaN detected in result
    #[error("NaN detected")]
    NaN,
    /// Infinity detected in result
    #[error("Infinite value detected")]
    Infinite,
}

/// Rejects NaN and infinities before they are converted back to decimal.
///
/// Transcendental functions and `x^y` run in `f64`; their results pass
/// through here so a NaN never reaches the display.
pub fn check_finite(value: f64) -> CalcResult<f64> {
    if value.is_nan() {
        Err(CalcError::NonFinite(FloatViolation::NaN))
    } else if value.is_infinite() {
        Err(CalcError::NonFinite(FloatViolation::Infinite))
    } else {
        Ok(value)
    }
}
