//! Keypad layouts and label mapping
//!
//! The desktop calculator has two panels, Basic and Scientific. Each button
//! label maps to a [`Keypress`]: an engine event, an angle-mode toggle, or an
//! inert placeholder (`(`, `)` and `Inv` exist on the panel but do nothing).

use crate::core::{AngleMode, Event, MemoryOp, Operation, TrigFunction, UnaryFunction};

/// What pressing a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keypress {
    /// Feed an event to the engine
    Event(Event),
    /// Select the angle mode used by sin/cos/tan
    Angle(AngleMode),
    /// Placeholder with no behavior
    Inert,
}

impl Keypress {
    /// Maps a button label to its keypress.
    ///
    /// ASCII `-`, `*`, `/` and `^` are accepted as operator aliases.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let event = match label {
            "." => Event::DecimalPoint,
            "Exp" => Event::ExponentMarker,
            "±" => Event::SignToggle,
            "Back" => Event::Backspace,
            "CE" => Event::ClearEntry,
            "C" => Event::ClearAll,
            "=" => Event::Equals,
            "%" => Event::Percent,
            "(" | ")" | "Inv" => return Some(Self::Inert),
            "-" => Event::Operator(Operation::Subtract),
            "*" => Event::Operator(Operation::Multiply),
            "/" => Event::Operator(Operation::Divide),
            "^" => Event::Operator(Operation::Power),
            _ => return Self::lookup(label),
        };
        Some(Self::Event(event))
    }

    fn lookup(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        if let (Some(d), None) = (chars.next(), chars.next()) {
            if d.is_ascii_digit() {
                return Some(Self::Event(Event::Digit(d)));
            }
        }
        if let Some(op) = Operation::ALL.into_iter().find(|op| op.label() == label) {
            return Some(Self::Event(Event::Operator(op)));
        }
        if let Some(f) = UnaryFunction::ALL.into_iter().find(|f| f.label() == label) {
            return Some(Self::Event(Event::Unary(f)));
        }
        for hyperbolic in [false, true] {
            if let Some(function) = TrigFunction::ALL
                .into_iter()
                .find(|f| f.label(hyperbolic) == label)
            {
                return Some(Self::Event(Event::Trig {
                    function,
                    hyperbolic,
                }));
            }
        }
        if let Some(op) = MemoryOp::ALL.into_iter().find(|op| op.label() == label) {
            return Some(Self::Event(Event::Memory(op)));
        }
        AngleMode::ALL
            .into_iter()
            .find(|mode| mode.label() == label)
            .map(Self::Angle)
    }
}

/// A button on a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button
    pub label: &'static str,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Behavior when pressed
    pub keypress: Keypress,
}

/// A panel of buttons laid out in rows
#[derive(Debug, Clone)]
pub struct Keypad {
    name: &'static str,
    buttons: Vec<KeypadButton>,
    rows: usize,
}

const BASIC_ROWS: &[&[&str]] = &[
    &["C", "Back", "CE", "%", "÷"],
    &["7", "8", "9", "×", "1/x"],
    &["4", "5", "6", "−", "√"],
    &["1", "2", "3", "+", "±"],
    &["MC", "MR", "MS", "M+", "M-"],
    &["0", ".", "="],
    &["Deg", "Rad", "Grad"],
];

const SCIENTIFIC_ROWS: &[&[&str]] = &[
    &["1/x", "MC", "MR", "MS", "M+", "M-", "C", "Back", "CE", "%", "÷"],
    &["√", "∛", "x²", "x³", "xʸ", "e", "7", "8", "9", "×"],
    &["π", "Exp", "ln", "log", "n!", "eˣ", "4", "5", "6", "−"],
    &["(", ")", "cos", "cosh", "tan", "tanh", "1", "2", "3", "+"],
    &["Deg", "Rad", "Grad", "Inv", "sin", "sinh", "0", ".", "="],
];

impl Keypad {
    /// The Basic panel: arithmetic, percent, memory and angle toggles
    #[must_use]
    pub fn basic() -> Self {
        Self::from_rows("Basic", BASIC_ROWS)
    }

    /// The Scientific panel: everything on Basic plus the function keys
    #[must_use]
    pub fn scientific() -> Self {
        Self::from_rows("Scientific", SCIENTIFIC_ROWS)
    }

    fn from_rows(name: &'static str, rows: &[&[&'static str]]) -> Self {
        let buttons = rows
            .iter()
            .enumerate()
            .flat_map(|(row, labels)| {
                labels.iter().enumerate().filter_map(move |(col, &label)| {
                    Keypress::from_label(label).map(|keypress| KeypadButton {
                        label,
                        row,
                        col,
                        keypress,
                    })
                })
            })
            .collect();
        Self {
            name,
            buttons,
            rows: rows.len(),
        }
    }

    /// Panel name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Iterates buttons row by row
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds the first button with this label
    #[must_use]
    pub fn find_button(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_labels() {
        for d in '0'..='9' {
            assert_eq!(
                Keypress::from_label(&d.to_string()),
                Some(Keypress::Event(Event::Digit(d)))
            );
        }
    }

    #[test]
    fn test_operator_labels_and_aliases() {
        let pairs = [
            ("+", Operation::Add),
            ("−", Operation::Subtract),
            ("-", Operation::Subtract),
            ("×", Operation::Multiply),
            ("*", Operation::Multiply),
            ("÷", Operation::Divide),
            ("/", Operation::Divide),
            ("xʸ", Operation::Power),
            ("^", Operation::Power),
        ];
        for (label, op) in pairs {
            assert_eq!(
                Keypress::from_label(label),
                Some(Keypress::Event(Event::Operator(op))),
                "label {label}"
            );
        }
    }

    #[test]
    fn test_function_labels() {
        assert_eq!(
            Keypress::from_label("n!"),
            Some(Keypress::Event(Event::Unary(UnaryFunction::Factorial)))
        );
        assert_eq!(
            Keypress::from_label("cosh"),
            Some(Keypress::Event(Event::Trig {
                function: TrigFunction::Cos,
                hyperbolic: true,
            }))
        );
        assert_eq!(
            Keypress::from_label("tan"),
            Some(Keypress::Event(Event::Trig {
                function: TrigFunction::Tan,
                hyperbolic: false,
            }))
        );
    }

    #[test]
    fn test_memory_and_angle_labels() {
        assert_eq!(
            Keypress::from_label("M-"),
            Some(Keypress::Event(Event::Memory(MemoryOp::Subtract)))
        );
        assert_eq!(
            Keypress::from_label("Grad"),
            Some(Keypress::Angle(AngleMode::Gradians))
        );
    }

    #[test]
    fn test_placeholder_labels_are_inert() {
        for label in ["(", ")", "Inv"] {
            assert_eq!(Keypress::from_label(label), Some(Keypress::Inert));
        }
    }

    #[test]
    fn test_unknown_labels() {
        for label in ["", "12", "sec", "M*", "deg"] {
            assert_eq!(Keypress::from_label(label), None, "label {label:?}");
        }
    }

    #[test]
    fn test_basic_layout() {
        let keypad = Keypad::basic();
        assert_eq!(keypad.name(), "Basic");
        assert_eq!(keypad.rows(), 7);
        assert_eq!(keypad.button_count(), 5 * 5 + 3 + 3);
        assert_eq!(keypad.get_button_at(0, 0).unwrap().label, "C");
        assert_eq!(keypad.get_button_at(5, 2).unwrap().label, "=");
        assert!(keypad.get_button_at(5, 3).is_none());
    }

    #[test]
    fn test_scientific_layout() {
        let keypad = Keypad::scientific();
        assert_eq!(keypad.rows(), 5);
        assert_eq!(keypad.button_count(), 11 + 10 + 10 + 10 + 9);
        let sinh = keypad.find_button("sinh").unwrap();
        assert_eq!((sinh.row, sinh.col), (4, 5));
    }

    #[test]
    fn test_every_panel_label_is_known() {
        for rows in [BASIC_ROWS, SCIENTIFIC_ROWS] {
            for label in rows.iter().flat_map(|r| r.iter()) {
                assert!(Keypress::from_label(label).is_some(), "label {label}");
            }
        }
    }

    #[test]
    fn test_scientific_covers_every_function() {
        let keypad = Keypad::scientific();
        for f in UnaryFunction::ALL {
            assert!(keypad.find_button(f.label()).is_some(), "{f:?}");
        }
        for f in TrigFunction::ALL {
            assert!(keypad.find_button(f.label(false)).is_some());
            assert!(keypad.find_button(f.label(true)).is_some());
        }
    }
}
