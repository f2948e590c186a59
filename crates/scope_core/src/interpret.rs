//! Turns the service's probability vector into a label and a confidence.

use crate::error::{Result, ScopeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary outcome shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Differentiation present; class index 0.
    Positive,
    /// Differentiation absent.
    Negative,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Positive => f.write_str("positive"),
            Label::Negative => f.write_str("negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub label: Label,
    /// Confidence in percent, `[0, 100]` for well-formed input.
    pub confidence_pct: f64,
}

impl Interpretation {
    /// Confidence with two decimals, e.g. `80.00%`.
    pub fn confidence_text(&self) -> String {
        format!("{:.2}%", self.confidence_pct)
    }
}

/// Interpret a prediction vector.
///
/// Two or more values are multi-class: the first index holding the maximum
/// wins and only index 0 maps to [`Label::Positive`]. A single value is a
/// binary score and is positive only when strictly above 50%.
pub fn interpret(predictions: &[f64]) -> Result<Interpretation> {
    match predictions {
        [] => Err(ScopeError::EmptyPredictions),
        [single] => {
            let confidence_pct = single * 100.0;
            let label = if confidence_pct > 50.0 {
                Label::Positive
            } else {
                Label::Negative
            };
            Ok(Interpretation {
                label,
                confidence_pct,
            })
        }
        _ => {
            let (best_idx, best) = argmax_first(predictions);
            let label = if best_idx == 0 {
                Label::Positive
            } else {
                Label::Negative
            };
            Ok(Interpretation {
                label,
                confidence_pct: best * 100.0,
            })
        }
    }
}

fn argmax_first(values: &[f64]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best = values[0];
    for (idx, &value) in values.iter().enumerate().skip(1) {
        // strict comparison keeps the earliest index on ties; NaN never wins
        if value > best || (best.is_nan() && !value.is_nan()) {
            best_idx = idx;
            best = value;
        }
    }
    (best_idx, best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&[0.2, 0.8], Label::Negative, 80.0)]
    #[case(&[0.9, 0.1], Label::Positive, 90.0)]
    #[case(&[0.5, 0.5], Label::Positive, 50.0)]
    #[case(&[0.1, 0.45, 0.45], Label::Negative, 45.0)]
    #[case(&[0.4, 0.1, 0.4, 0.1], Label::Positive, 40.0)]
    #[case(&[0.1, 0.2, 0.7], Label::Negative, 70.0)]
    fn multiclass_picks_first_maximum(
        #[case] predictions: &[f64],
        #[case] label: Label,
        #[case] pct: f64,
    ) {
        let out = interpret(predictions).unwrap();
        assert_eq!(out.label, label);
        assert_relative_eq!(out.confidence_pct, pct, epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.73, Label::Positive)]
    #[case(0.5, Label::Negative)]
    #[case(0.500001, Label::Positive)]
    #[case(0.0, Label::Negative)]
    #[case(1.0, Label::Positive)]
    fn binary_threshold_is_strictly_above_half(#[case] score: f64, #[case] label: Label) {
        assert_eq!(interpret(&[score]).unwrap().label, label);
    }

    #[test]
    fn confidence_text_uses_two_decimals() {
        assert_eq!(interpret(&[0.2, 0.8]).unwrap().confidence_text(), "80.00%");
        assert_eq!(interpret(&[0.73]).unwrap().confidence_text(), "73.00%");
    }

    #[test]
    fn empty_vector_is_an_error() {
        assert!(matches!(interpret(&[]), Err(ScopeError::EmptyPredictions)));
    }

    #[test]
    fn nan_does_not_win() {
        let out = interpret(&[f64::NAN, 0.3, 0.2]).unwrap();
        assert_eq!(out.label, Label::Negative);
        assert_relative_eq!(out.confidence_pct, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn labels_display_lowercase() {
        assert_eq!(Label::Positive.to_string(), "positive");
        assert_eq!(Label::Negative.to_string(), "negative");
    }
}
