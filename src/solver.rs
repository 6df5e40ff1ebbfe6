//! # Expression Solver Module
//!
//! Attempts to interpret arbitrary text as a mathematical expression.
//! Input arrives unvalidated (user-typed text or raw OCR output) and is
//! handed to the evaluator verbatim; its parser is the single source of
//! truth for what counts as a valid expression, so rejection here is
//! routine rather than exceptional.

use log::debug;

/// Outcome of attempting to solve one piece of text
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The text parsed as an expression and evaluated
    Solved {
        /// The solved text, verbatim
        original: String,
        /// The evaluated result, formatted for a chat reply
        simplified: String,
    },
    /// The text was rejected by the expression parser
    Unparseable {
        /// The rejected text, verbatim
        original: String,
    },
}

impl Resolution {
    /// The input text this outcome was produced from
    pub fn original(&self) -> &str {
        match self {
            Resolution::Solved { original, .. } => original,
            Resolution::Unparseable { original } => original,
        }
    }
}

/// Try to evaluate `input` as a mathematical expression.
///
/// Never panics; malformed input (the common case for OCR-derived text)
/// resolves to [`Resolution::Unparseable`].
pub fn resolve(input: &str) -> Resolution {
    match meval::eval_str(input) {
        Ok(value) => {
            debug!("Evaluated expression to {value}");
            Resolution::Solved {
                original: input.to_string(),
                simplified: format_value(value),
            }
        }
        Err(e) => {
            debug!("Expression rejected by parser: {e}");
            Resolution::Unparseable {
                original: input.to_string(),
            }
        }
    }
}

/// Format an evaluated value for a chat reply.
///
/// Integral results are rendered without a fractional part so that `2+2`
/// answers `4` rather than `4.0`.
fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_results_drop_the_fractional_part() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-12.0), "-12");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_non_integral_results_keep_their_decimals() {
        assert_eq!(format_value(3.5), "3.5");
        assert_eq!(format_value(0.25), "0.25");
    }

    #[test]
    fn test_resolve_keeps_the_original_text() {
        assert_eq!(resolve("2+2").original(), "2+2");
        assert_eq!(resolve("not math").original(), "not math");
    }

    #[test]
    fn test_prose_is_unparseable() {
        assert_eq!(
            resolve("hello world"),
            Resolution::Unparseable {
                original: "hello world".to_string()
            }
        );
    }
}
