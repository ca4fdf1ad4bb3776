//! Button-press driver
//!
//! A presentation layer talks to the engine by button label and reads back
//! the display and indicators. [`CalculatorDriver`] is that seam, so the same
//! key sequences can drive any front end; [`EngineDriver`] is the in-process
//! implementation used by the tests.

use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::core::{AngleMode, CalcError, CalcResult, Engine, Operation};
use crate::keypad::Keypress;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use sci_calc::prelude::*;
///
/// let mut driver = EngineDriver::new();
/// driver.enter("7 + 3 × 2 =").unwrap();
/// assert_eq!(driver.display(), "20");
/// ```
pub trait CalculatorDriver {
    /// Presses one button by label
    fn press(&mut self, label: &str) -> CalcResult<()>;

    /// Current display text
    fn display(&self) -> String;

    /// Selected angle mode
    fn angle_mode(&self) -> AngleMode;

    /// True when memory holds a non-zero value
    fn memory_indicator(&self) -> bool;

    /// Operator waiting for its right operand
    fn pending_indicator(&self) -> Option<Operation>;

    /// Presses `C`
    fn clear(&mut self);

    /// History lines, newest first
    fn history(&self) -> Vec<String>;

    /// Presses each label in turn, stopping at the first error
    fn press_all(&mut self, labels: &[&str]) -> CalcResult<()> {
        for label in labels {
            self.press(label)?;
        }
        Ok(())
    }

    /// Presses whitespace-separated keys.
    ///
    /// Tokens that are not button labels but consist of digits and points,
    /// such as `"200"` or `"2.5"`, are typed one character at a time.
    fn enter(&mut self, keys: &str) -> CalcResult<()> {
        for token in keys.split_whitespace() {
            let typed = Keypress::from_label(token).is_none()
                && token.chars().all(|c| c.is_ascii_digit() || c == '.');
            if typed {
                for c in token.chars() {
                    self.press(c.encode_utf8(&mut [0; 4]))?;
                }
            } else {
                self.press(token)?;
            }
        }
        Ok(())
    }
}

/// Driver owning an engine and the angle-mode toggle state
#[derive(Debug, Clone, Default)]
pub struct EngineDriver {
    engine: Engine,
    angle_mode: AngleMode,
}

impl EngineDriver {
    /// Creates a driver with the default configuration, in degrees
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: Engine::with_config(config)?,
            angle_mode: AngleMode::default(),
        })
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Selects the angle mode
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, label: &str) -> CalcResult<()> {
        match Keypress::from_label(label) {
            Some(Keypress::Event(event)) => self.engine.handle(event, self.angle_mode),
            Some(Keypress::Angle(mode)) => {
                debug!(?mode, "angle mode selected");
                self.angle_mode = mode;
                Ok(())
            }
            Some(Keypress::Inert) => Ok(()),
            None => Err(CalcError::UnknownKey(label.to_string())),
        }
    }

    fn display(&self) -> String {
        self.engine.display().to_string()
    }

    fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    fn memory_indicator(&self) -> bool {
        self.engine.has_memory()
    }

    fn pending_indicator(&self) -> Option<Operation> {
        self.engine.pending_operator()
    }

    fn clear(&mut self) {
        self.engine.clear_all();
    }

    fn history(&self) -> Vec<String> {
        self.engine
            .history()
            .iter_rev()
            .map(|entry| entry.display())
            .collect()
    }
}
