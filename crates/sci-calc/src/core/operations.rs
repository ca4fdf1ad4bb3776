//! Binary operations on fixed-precision decimals

use bigdecimal::{BigDecimal, Zero};

use crate::config::{ConfigError, DomainPolicy, EngineConfig};
use crate::core::number::{self, DEFAULT_PRECISION};
use crate::core::{CalcError, CalcResult, DomainError};

/// Binary operator awaiting its right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Power (xʸ)
    Power,
}

impl Operation {
    /// All operators, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the operator symbol used in history lines
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Returns the keypad label for this operator
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Power => "xʸ",
            _ => self.symbol(),
        }
    }

    /// Returns true for the operators percent treats as additive
    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

/// Decimal arithmetic with a fixed significant-digit precision
#[derive(Debug, Clone, Copy)]
pub struct Calculator {
    precision: u64,
    policy: DomainPolicy,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with 20 significant digits and zero defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION as u64,
            policy: DomainPolicy::DefaultToZero,
        }
    }

    /// Creates a calculator from a validated engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            precision: u64::from(config.precision),
            policy: config.domain_policy,
        })
    }

    /// Significant digits kept by arithmetic
    #[must_use]
    pub const fn precision(&self) -> u64 {
        self.precision
    }

    /// Active domain policy
    #[must_use]
    pub const fn policy(&self) -> DomainPolicy {
        self.policy
    }

    /// Applies `op` to `a` and `b`
    pub fn compute(&self, a: &BigDecimal, b: &BigDecimal, op: Operation) -> CalcResult<BigDecimal> {
        match op {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
            Operation::Divide => self.divide(a, b),
            Operation::Power => Self::power(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(&self, a: &BigDecimal, b: &BigDecimal) -> CalcResult<BigDecimal> {
        self.rounded(a + b)
    }

    /// Subtraction: a − b
    pub fn subtract(&self, a: &BigDecimal, b: &BigDecimal) -> CalcResult<BigDecimal> {
        self.rounded(a - b)
    }

    /// Multiplication: a × b
    pub fn multiply(&self, a: &BigDecimal, b: &BigDecimal) -> CalcResult<BigDecimal> {
        self.rounded(a * b)
    }

    /// Division: a ÷ b, with a zero divisor handled by the domain policy
    pub fn divide(&self, a: &BigDecimal, b: &BigDecimal) -> CalcResult<BigDecimal> {
        if b.is_zero() {
            return self.domain_default(DomainError::DivisionByZero);
        }
        self.rounded(a / b)
    }

    /// Power: a ^ b, evaluated in binary floating point
    pub fn power(a: &BigDecimal, b: &BigDecimal) -> CalcResult<BigDecimal> {
        number::from_f64(number::to_f64(a).powf(number::to_f64(b)))
    }

    /// Percent of the accumulator for the pending operator.
    ///
    /// `p = base × value / 100`. Additive operators yield `base + p`,
    /// multiplicative ones yield `p`, and `Power` yields nothing.
    pub fn percent(
        &self,
        base: &BigDecimal,
        value: &BigDecimal,
        op: Operation,
    ) -> CalcResult<Option<BigDecimal>> {
        let p = self.rounded(base * value / BigDecimal::from(100))?;
        match op {
            Operation::Add | Operation::Subtract => self.add(base, &p).map(Some),
            Operation::Multiply | Operation::Divide => Ok(Some(p)),
            Operation::Power => Ok(None),
        }
    }

    /// Result for an input outside a function's domain
    pub(crate) fn domain_default(&self, error: DomainError) -> CalcResult<BigDecimal> {
        match self.policy {
            DomainPolicy::DefaultToZero => Ok(BigDecimal::zero()),
            DomainPolicy::Reject => Err(CalcError::Domain(error)),
        }
    }

    /// Rounds an exact result to the configured precision
    pub(crate) fn rounded(&self, value: BigDecimal) -> CalcResult<BigDecimal> {
        number::check_range(number::round_significant(&value, self.precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::number::MAX_PRECISION;
    use proptest::prelude::*;

    fn num(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    fn reject() -> Calculator {
        Calculator::from_config(&EngineConfig::default().with_domain_policy(DomainPolicy::Reject))
            .unwrap()
    }

    // --- Operation enum tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "−");
        assert_eq!(Operation::Multiply.symbol(), "×");
        assert_eq!(Operation::Divide.symbol(), "÷");
        assert_eq!(Operation::Power.symbol(), "^");
    }

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::Power.label(), "xʸ");
        assert_eq!(Operation::Divide.label(), "÷");
    }

    #[test]
    fn test_operation_additive() {
        assert!(Operation::Add.is_additive());
        assert!(Operation::Subtract.is_additive());
        assert!(!Operation::Multiply.is_additive());
        assert!(!Operation::Divide.is_additive());
        assert!(!Operation::Power.is_additive());
    }

    // --- Calculator creation tests ---

    #[test]
    fn test_calculator_new() {
        let calc = Calculator::new();
        assert_eq!(calc.precision(), 20);
        assert_eq!(calc.policy(), DomainPolicy::DefaultToZero);
    }

    #[test]
    fn test_calculator_from_config() {
        let calc = Calculator::from_config(&EngineConfig::default().with_precision(8)).unwrap();
        assert_eq!(calc.precision(), 8);
    }

    #[test]
    fn test_calculator_from_config_rejects_bad_precision() {
        for precision in [0, MAX_PRECISION + 1] {
            let config = EngineConfig::default().with_precision(precision);
            assert!(matches!(
                Calculator::from_config(&config),
                Err(ConfigError::InvalidPrecision(p)) if p == precision
            ));
        }
    }

    // --- Arithmetic tests ---

    #[test]
    fn test_compute_basic() {
        let calc = Calculator::new();
        let (two, three) = (num("2"), num("3"));
        assert_eq!(calc.compute(&two, &three, Operation::Add), Ok(num("5")));
        assert_eq!(calc.compute(&two, &three, Operation::Subtract), Ok(num("-1")));
        assert_eq!(
            calc.compute(&num("6"), &num("7"), Operation::Multiply),
            Ok(num("42"))
        );
        assert_eq!(
            calc.compute(&num("20"), &num("4"), Operation::Divide),
            Ok(num("5"))
        );
    }

    #[test]
    fn test_add_decimals_exact() {
        let calc = Calculator::new();
        assert_eq!(calc.add(&num("0.1"), &num("0.2")), Ok(num("0.3")));
    }

    #[test]
    fn test_divide_rounds_to_precision() {
        let calc = Calculator::new();
        let result = calc.divide(&num("2"), &num("3")).unwrap();
        assert_eq!(number::format_display(&result), "0.66666666666666666667");
    }

    #[test]
    fn test_divide_by_zero_defaults_to_zero() {
        let calc = Calculator::new();
        assert_eq!(calc.divide(&num("10"), &BigDecimal::zero()), Ok(BigDecimal::zero()));
        assert_eq!(
            calc.compute(&num("-3.5"), &BigDecimal::zero(), Operation::Divide),
            Ok(BigDecimal::zero())
        );
    }

    #[test]
    fn test_divide_by_zero_rejected_under_strict_policy() {
        assert_eq!(
            reject().divide(&num("10"), &BigDecimal::zero()),
            Err(CalcError::Domain(DomainError::DivisionByZero))
        );
    }

    #[test]
    fn test_add_rounds_wide_operands() {
        let calc = Calculator::new();
        let sum = calc
            .add(&num("123456789012345678901234567890"), &num("1"))
            .unwrap();
        assert_eq!(number::format_display(&sum), "123456789012345678900000000000");
    }

    #[test]
    fn test_multiply_large_and_tiny() {
        let calc = Calculator::new();
        let big = calc.multiply(&num("1E15"), &num("1E15")).unwrap();
        assert_eq!(number::format_display(&big), "1000000000000000000000000000000");
        let tiny = calc.multiply(&num("1E-15"), &num("1E-15")).unwrap();
        assert_eq!(number::format_display(&tiny), "0.000000000000000000000000000001");
    }

    #[test]
    fn test_divide_tiny_quotient_keeps_twenty_digits() {
        let calc = Calculator::new();
        let result = calc.divide(&num("1"), &num("3E10")).unwrap();
        assert_eq!(number::format_display(&result), "0.000000000033333333333333333333");
    }

    #[test]
    fn test_multiply_beyond_display_range() {
        let calc = Calculator::new();
        assert_eq!(
            calc.multiply(&num("1E5000"), &num("1E5000")),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_lower_precision_rounds_earlier() {
        let config = EngineConfig::default().with_precision(4);
        let calc = Calculator::from_config(&config).unwrap();
        assert_eq!(calc.divide(&num("1"), &num("3")), Ok(num("0.3333")));
        assert_eq!(calc.multiply(&num("1.2345"), &num("1")), Ok(num("1.235")));
    }

    // --- Power tests ---

    #[test]
    fn test_power_integers() {
        assert_eq!(Calculator::power(&num("2"), &num("10")), Ok(num("1024")));
    }

    #[test]
    fn test_power_fractional_exponent() {
        assert_eq!(Calculator::power(&num("4"), &num("0.5")), Ok(num("2")));
    }

    #[test]
    fn test_power_negative_exponent() {
        assert_eq!(Calculator::power(&num("2"), &num("-1")), Ok(num("0.5")));
    }

    #[test]
    fn test_power_nan_is_reported() {
        assert!(matches!(
            Calculator::power(&num("-2"), &num("0.5")),
            Err(CalcError::NonFinite(_))
        ));
    }

    #[test]
    fn test_power_beyond_f64_is_reported() {
        assert!(matches!(
            Calculator::power(&num("10"), &num("400")),
            Err(CalcError::NonFinite(_))
        ));
    }

    // --- Percent tests ---

    #[test]
    fn test_percent_additive() {
        let calc = Calculator::new();
        let (base, value) = (num("200"), num("10"));
        assert_eq!(
            calc.percent(&base, &value, Operation::Add),
            Ok(Some(num("220")))
        );
        // subtract also adds the percentage to the base
        assert_eq!(
            calc.percent(&base, &value, Operation::Subtract),
            Ok(Some(num("220")))
        );
    }

    #[test]
    fn test_percent_multiplicative() {
        let calc = Calculator::new();
        let (base, value) = (num("200"), num("10"));
        assert_eq!(
            calc.percent(&base, &value, Operation::Multiply),
            Ok(Some(num("20")))
        );
        assert_eq!(
            calc.percent(&base, &value, Operation::Divide),
            Ok(Some(num("20")))
        );
    }

    #[test]
    fn test_percent_power_yields_nothing() {
        let calc = Calculator::new();
        assert_eq!(calc.percent(&num("2"), &num("3"), Operation::Power), Ok(None));
    }

    // --- Property-based tests ---

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
            let calc = Calculator::new();
            let (a, b) = (BigDecimal::from(a), BigDecimal::from(b));
            prop_assert_eq!(calc.add(&a, &b), calc.add(&b, &a));
        }

        #[test]
        fn prop_multiply_commutative(a in any::<i64>(), b in any::<i64>()) {
            let calc = Calculator::new();
            let (a, b) = (BigDecimal::from(a), BigDecimal::from(b));
            prop_assert_eq!(calc.multiply(&a, &b), calc.multiply(&b, &a));
        }

        #[test]
        fn prop_divide_by_zero_never_errors(a in any::<i64>()) {
            let calc = Calculator::new();
            prop_assert_eq!(calc.divide(&BigDecimal::from(a), &BigDecimal::zero()), Ok(BigDecimal::zero()));
        }

        #[test]
        fn prop_divide_by_self(a in 1i64..i64::MAX) {
            let calc = Calculator::new();
            let a = BigDecimal::from(a);
            prop_assert_eq!(calc.divide(&a, &a), Ok(BigDecimal::from(1)));
        }

        #[test]
        fn prop_add_identity(a in -99_999_999_999_999_999i64..99_999_999_999_999_999) {
            let calc = Calculator::new();
            let a = BigDecimal::from(a);
            prop_assert_eq!(calc.add(&a, &BigDecimal::zero()), Ok(a));
        }

        #[test]
        fn prop_results_have_at_most_twenty_digits(a in any::<i64>(), b in any::<i64>(), exp in -500i64..500) {
            let calc = Calculator::new();
            let a = BigDecimal::new(a.into(), exp);
            let product = calc.multiply(&a, &BigDecimal::from(b)).unwrap();
            prop_assert!(product.normalized().digits() <= 20);
        }
    }
}
