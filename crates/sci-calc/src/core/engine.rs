//! Calculator evaluation engine
//!
//! A state machine fed one keypad event at a time. There is no expression
//! parsing and no precedence: a pending binary operator is applied as soon
//! as the next operator or `=` arrives, so `2 + 3 ×` evaluates `2 + 3`
//! before queuing `×`.
//!
//! The display string doubles as the entry buffer. It is only parsed when a
//! terminating action (operator, `=`, `%`, a function, `MS`/`M+`/`M-`) needs
//! its value, so partial entries like `"1E"` are fine while typing.

use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::core::functions::{AngleMode, TrigFunction, UnaryFunction};
use crate::core::history::History;
use crate::core::number::{format_display, parse_display};
use crate::core::{CalcError, CalcResult, Calculator, Operation};

/// Memory register actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    /// MC: zero the register
    Clear,
    /// MR: show the register
    Recall,
    /// MS: store the display
    Store,
    /// M+: add the display to the register
    Add,
    /// M-: subtract the display from the register
    Subtract,
}

impl MemoryOp {
    /// All memory actions in keypad order
    pub const ALL: [Self; 5] = [
        Self::Clear,
        Self::Recall,
        Self::Store,
        Self::Add,
        Self::Subtract,
    ];

    /// Returns the keypad label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Store => "MS",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

/// A discrete user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A digit key, `'0'` to `'9'`
    Digit(char),
    /// `.`
    DecimalPoint,
    /// `Exp`: start or extend scientific-notation entry
    ExponentMarker,
    /// `±`
    SignToggle,
    /// `Back`
    Backspace,
    /// `CE`: clear the current entry only
    ClearEntry,
    /// `C`: clear entry, accumulator and pending operator
    ClearAll,
    /// A binary operator key
    Operator(Operation),
    /// `=`
    Equals,
    /// `%`
    Percent,
    /// A function of the display value
    Unary(UnaryFunction),
    /// sin/cos/tan or their hyperbolic variants
    Trig {
        /// Which function
        function: TrigFunction,
        /// Use sinh/cosh/tanh instead
        hyperbolic: bool,
    },
    /// A memory register key
    Memory(MemoryOp),
}

/// The evaluation engine
///
/// Owns the display, accumulator, pending operator, entering-new flag and
/// memory register. Angle mode is not owned; it is passed in with each event.
#[derive(Debug, Clone)]
pub struct Engine {
    display: String,
    accumulator: BigDecimal,
    pending: Option<Operation>,
    entering_new: bool,
    memory: BigDecimal,
    calculator: Calculator,
    history: History,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            Calculator::new(),
            History::with_capacity(EngineConfig::default().history_capacity),
        )
    }

    /// Creates an engine from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let calculator = Calculator::from_config(config)?;
        Ok(Self::from_parts(
            calculator,
            History::with_capacity(config.history_capacity),
        ))
    }

    fn from_parts(calculator: Calculator, history: History) -> Self {
        Self {
            display: "0".to_string(),
            accumulator: BigDecimal::zero(),
            pending: None,
            entering_new: true,
            memory: BigDecimal::zero(),
            calculator,
            history,
        }
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn accumulator(&self) -> &BigDecimal {
        &self.accumulator
    }

    /// Operator waiting for its right operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending
    }

    /// True when the next digit starts a fresh number
    #[must_use]
    pub fn is_entering_new(&self) -> bool {
        self.entering_new
    }

    /// Memory register value
    #[must_use]
    pub fn memory(&self) -> &BigDecimal {
        &self.memory
    }

    /// True when the memory register holds a non-zero value
    #[must_use]
    pub fn has_memory(&self) -> bool {
        !self.memory.is_zero()
    }

    /// Completed computations of this session
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Drops all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Arithmetic settings in use
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Parses the display text
    pub fn display_value(&self) -> CalcResult<BigDecimal> {
        parse_display(&self.display)
    }

    /// Processes one event.
    ///
    /// On error the state is left as it was, except for
    /// [`CalcError::InvalidNumber`], which clears the current entry.
    pub fn handle(&mut self, event: Event, angle_mode: AngleMode) -> CalcResult<()> {
        debug!(?event, ?angle_mode, "handling event");
        let result = self.apply(event, angle_mode);
        match &result {
            Ok(()) => debug!(display = %self.display, pending = ?self.pending, "event handled"),
            Err(CalcError::InvalidNumber(text)) => {
                warn!(%text, ?event, "display did not parse, clearing entry");
                self.clear_entry();
            }
            Err(err) => warn!(%err, ?event, "event rejected"),
        }
        result
    }

    /// Processes a sequence of events, stopping at the first error
    pub fn handle_all<I>(&mut self, events: I, angle_mode: AngleMode) -> CalcResult<()>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            self.handle(event, angle_mode)?;
        }
        Ok(())
    }

    fn apply(&mut self, event: Event, angle_mode: AngleMode) -> CalcResult<()> {
        match event {
            Event::Digit(d) => self.input_digit(d)?,
            Event::DecimalPoint => self.input_marker('.', "0."),
            Event::ExponentMarker => self.input_marker('E', "1E"),
            Event::SignToggle => self.toggle_sign(),
            Event::Backspace => self.backspace(),
            Event::ClearEntry => self.clear_entry(),
            Event::ClearAll => self.clear_all(),
            Event::Operator(op) => self.select_operator(op)?,
            Event::Equals => self.equals()?,
            Event::Percent => self.percent()?,
            Event::Unary(function) => {
                let x = if function.reads_display() {
                    self.display_value()?
                } else {
                    BigDecimal::zero()
                };
                let result = self.calculator.apply_unary(function, &x)?;
                self.set_display(&result);
            }
            Event::Trig {
                function,
                hyperbolic,
            } => {
                let x = self.display_value()?;
                let result = Calculator::apply_trig(function, hyperbolic, &x, angle_mode)?;
                self.set_display(&result);
            }
            Event::Memory(op) => self.memory_op(op)?,
        }
        Ok(())
    }

    fn input_digit(&mut self, digit: char) -> CalcResult<()> {
        if !digit.is_ascii_digit() {
            return Err(CalcError::InvalidDigit(digit));
        }
        if self.entering_new || self.display == "0" {
            self.display = digit.to_string();
            self.entering_new = false;
        } else {
            self.display.push(digit);
        }
        Ok(())
    }

    /// Decimal point and exponent marker: at most one of each per number
    fn input_marker(&mut self, marker: char, fresh: &str) {
        if self.entering_new {
            self.display = fresh.to_string();
            self.entering_new = false;
        } else if !self.display.contains(marker) {
            self.display.push(marker);
        }
    }

    fn toggle_sign(&mut self) {
        if self.display == "0" {
            return;
        }
        match self.display.strip_prefix('-') {
            Some(rest) => self.display = rest.to_string(),
            None => self.display.insert(0, '-'),
        }
    }

    fn backspace(&mut self) {
        if self.entering_new {
            return;
        }
        let len = self.display.chars().count();
        if len <= 1 || (len == 2 && self.display.starts_with('-')) {
            self.display = "0".to_string();
            self.entering_new = true;
        } else {
            self.display.pop();
        }
    }

    fn clear_entry(&mut self) {
        self.display = "0".to_string();
        self.entering_new = true;
    }

    /// Same as [`Event::ClearAll`]: resets the entry, accumulator and
    /// pending operator. Memory, history and angle mode are kept.
    pub fn clear_all(&mut self) {
        self.clear_entry();
        self.accumulator = BigDecimal::zero();
        self.pending = None;
    }

    fn select_operator(&mut self, op: Operation) -> CalcResult<()> {
        let right = self.display_value()?;
        let left = match self.pending {
            // a right operand was typed: chain left to right
            Some(pending) if !self.entering_new => {
                let result = self.compute(pending, &right)?;
                self.set_display(&result);
                result
            }
            _ => right,
        };
        self.accumulator = left;
        self.pending = Some(op);
        self.entering_new = true;
        Ok(())
    }

    fn equals(&mut self) -> CalcResult<()> {
        let Some(op) = self.pending else {
            return Ok(());
        };
        let right = self.display_value()?;
        let result = self.compute(op, &right)?;
        self.set_display(&result);
        self.pending = None;
        Ok(())
    }

    fn percent(&mut self) -> CalcResult<()> {
        let Some(op) = self.pending else {
            return Ok(());
        };
        let value = self.display_value()?;
        match self.calculator.percent(&self.accumulator, &value, op)? {
            Some(result) => self.set_display(&result),
            None => self.entering_new = true,
        }
        Ok(())
    }

    fn memory_op(&mut self, op: MemoryOp) -> CalcResult<()> {
        match op {
            MemoryOp::Clear => self.memory = BigDecimal::zero(),
            MemoryOp::Recall => {
                let recalled = self.memory.clone();
                self.set_display(&recalled);
            }
            MemoryOp::Store => self.memory = self.display_value()?,
            MemoryOp::Add => {
                self.memory = self.calculator.add(&self.memory, &self.display_value()?)?;
            }
            MemoryOp::Subtract => {
                self.memory = self
                    .calculator
                    .subtract(&self.memory, &self.display_value()?)?;
            }
        }
        Ok(())
    }

    /// Applies the pending operator to the accumulator and records it
    fn compute(&mut self, op: Operation, right: &BigDecimal) -> CalcResult<BigDecimal> {
        let left = &self.accumulator;
        let result = self.calculator.compute(left, right, op)?;
        let expression = format!(
            "{} {} {}",
            format_display(left),
            op.symbol(),
            format_display(right)
        );
        let shown = format_display(&result);
        trace!(%expression, result = %shown, "applied operator");
        self.history.record(expression, shown);
        Ok(result)
    }

    fn set_display(&mut self, value: &BigDecimal) {
        self.display = format_display(value);
        self.entering_new = true;
    }
}
