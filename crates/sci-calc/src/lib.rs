//! Scientific Calculator - Keypad Evaluation Engine
//!
//! The engine behind a desktop calculator with Basic and Scientific panels.
//! It is an event-driven state machine: each button press is an [`Event`],
//! operators apply left to right as they are entered, and every value is a
//! decimal rounded to 20 significant digits.
//!
//! # Layers
//!
//! - [`core`]: numbers, operations, scientific functions, the engine, history
//! - [`config`]: precision, domain policy and history size, loadable from JSON
//! - [`keypad`]: panel layouts and button label mapping
//! - [`driver`]: a label-driven interface for front ends and tests
//!
//! # Example
//!
//! ```rust
//! use sci_calc::prelude::*;
//!
//! let mut engine = Engine::new();
//! for event in [
//!     Event::Digit('7'),
//!     Event::Operator(Operation::Add),
//!     Event::Digit('3'),
//!     Event::Operator(Operation::Multiply),
//!     Event::Digit('2'),
//!     Event::Equals,
//! ] {
//!     engine.handle(event, AngleMode::Degrees).unwrap();
//! }
//! // no precedence: (7 + 3) × 2
//! assert_eq!(engine.display(), "20");
//! ```
//!
//! [`Event`]: core::Event

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, DomainPolicy, EngineConfig};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        AngleMode, CalcError, CalcResult, Calculator, DomainError, Engine, Event, MemoryOp,
        Operation, TrigFunction, UnaryFunction,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::keypad::{Keypad, Keypress};
}
