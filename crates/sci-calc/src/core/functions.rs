//! Unary and scientific functions
//!
//! Square, cube, reciprocal and factorial stay in decimal arithmetic.
//! Roots, logarithms, exponentials, constants and trigonometry run in `f64`
//! and are converted back to decimal.

use std::f64::consts::{E, PI};

use bigdecimal::{BigDecimal, One, ToPrimitive, Zero};

use crate::core::number::{from_f64, to_f64};
use crate::core::{CalcError, CalcResult, Calculator, DomainError};

/// Unit used to interpret the argument of sin, cos and tan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AngleMode {
    /// Degrees (full turn = 360)
    #[default]
    Degrees,
    /// Radians (full turn = 2π)
    Radians,
    /// Gradians (full turn = 400)
    Gradians,
}

impl AngleMode {
    /// All modes in toggle order
    pub const ALL: [Self; 3] = [Self::Degrees, Self::Radians, Self::Gradians];

    /// Converts an angle in this unit to radians
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
            Self::Gradians => angle * PI / 200.0,
        }
    }

    /// Returns the toggle label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degrees => "Deg",
            Self::Radians => "Rad",
            Self::Gradians => "Grad",
        }
    }
}

/// Functions of the current display value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    /// √x
    SquareRoot,
    /// 1/x
    Reciprocal,
    /// x²
    Square,
    /// x³
    Cube,
    /// ∛x
    CubeRoot,
    /// Euler's number (ignores the display)
    E,
    /// π (ignores the display)
    Pi,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log10,
    /// eˣ
    Exp,
    /// n!, on the display value truncated to an integer
    Factorial,
}

impl UnaryFunction {
    /// All functions in keypad order
    pub const ALL: [Self; 11] = [
        Self::Reciprocal,
        Self::SquareRoot,
        Self::CubeRoot,
        Self::Square,
        Self::Cube,
        Self::E,
        Self::Pi,
        Self::Ln,
        Self::Log10,
        Self::Factorial,
        Self::Exp,
    ];

    /// Returns the keypad label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SquareRoot => "√",
            Self::Reciprocal => "1/x",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::CubeRoot => "∛",
            Self::E => "e",
            Self::Pi => "π",
            Self::Ln => "ln",
            Self::Log10 => "log",
            Self::Exp => "eˣ",
            Self::Factorial => "n!",
        }
    }

    /// Returns false for constants, which replace the display without reading it
    #[must_use]
    pub const fn reads_display(self) -> bool {
        !matches!(self, Self::E | Self::Pi)
    }
}

/// Trigonometric functions; each also has a hyperbolic variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunction {
    /// sin / sinh
    Sin,
    /// cos / cosh
    Cos,
    /// tan / tanh
    Tan,
}

impl TrigFunction {
    /// All functions in keypad order
    pub const ALL: [Self; 3] = [Self::Sin, Self::Cos, Self::Tan];

    /// Returns the keypad label
    #[must_use]
    pub const fn label(self, hyperbolic: bool) -> &'static str {
        match (self, hyperbolic) {
            (Self::Sin, false) => "sin",
            (Self::Cos, false) => "cos",
            (Self::Tan, false) => "tan",
            (Self::Sin, true) => "sinh",
            (Self::Cos, true) => "cosh",
            (Self::Tan, true) => "tanh",
        }
    }

    fn eval(self, x: f64, hyperbolic: bool) -> f64 {
        match (self, hyperbolic) {
            (Self::Sin, false) => x.sin(),
            (Self::Cos, false) => x.cos(),
            (Self::Tan, false) => x.tan(),
            (Self::Sin, true) => x.sinh(),
            (Self::Cos, true) => x.cosh(),
            (Self::Tan, true) => x.tanh(),
        }
    }
}

impl Calculator {
    /// Applies a unary function to `x`
    pub fn apply_unary(&self, function: UnaryFunction, x: &BigDecimal) -> CalcResult<BigDecimal> {
        match function {
            UnaryFunction::SquareRoot => {
                if *x < BigDecimal::zero() {
                    return self.domain_default(DomainError::NegativeSquareRoot);
                }
                from_f64(to_f64(x).sqrt())
            }
            UnaryFunction::Reciprocal => {
                if x.is_zero() {
                    return self.domain_default(DomainError::ZeroReciprocal);
                }
                self.rounded(BigDecimal::one() / x)
            }
            UnaryFunction::Square => self.rounded(x * x),
            UnaryFunction::Cube => self.rounded(x * x * x),
            UnaryFunction::CubeRoot => from_f64(to_f64(x).cbrt()),
            UnaryFunction::E => from_f64(E),
            UnaryFunction::Pi => from_f64(PI),
            UnaryFunction::Ln => from_f64(to_f64(x).ln()),
            UnaryFunction::Log10 => from_f64(to_f64(x).log10()),
            UnaryFunction::Exp => from_f64(to_f64(x).exp()),
            UnaryFunction::Factorial => self.factorial(x),
        }
    }

    /// Applies sin/cos/tan (or their hyperbolic variants) to `x`.
    ///
    /// Circular functions convert `x` from `mode` to radians first;
    /// hyperbolic functions use `x` as is.
    pub fn apply_trig(
        function: TrigFunction,
        hyperbolic: bool,
        x: &BigDecimal,
        mode: AngleMode,
    ) -> CalcResult<BigDecimal> {
        let x = to_f64(x);
        let arg = if hyperbolic { x } else { mode.to_radians(x) };
        from_f64(function.eval(arg, hyperbolic))
    }

    /// n! of `x` truncated toward zero, rounding after every multiplication
    pub fn factorial(&self, x: &BigDecimal) -> CalcResult<BigDecimal> {
        let n = x.with_scale(0);
        if n < BigDecimal::zero() {
            return self.domain_default(DomainError::NegativeFactorial);
        }
        // anything this large overflows the display long before the loop ends
        let n = n.to_u64().ok_or(CalcError::Overflow)?;
        let mut acc = BigDecimal::one();
        for i in 2..=n {
            acc = self.rounded(acc * BigDecimal::from(i))?;
        }
        Ok(acc)
    }
}
