//! @ai:module:intent Seam between kata content and an external answer evaluator
//! @ai:module:layer application
//! @ai:module:public_api Evaluator, LiteralEvaluator, Verdict, attempt
//! @ai:module:depends_on model, blank, error

use crate::blank::BlankMarker;
use crate::error::{Error, Result};
use crate::model::Kata;
use serde::{Deserialize, Serialize};

/// @ai:intent Outcome of evaluating one attempt at a kata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    /// Indexes of blanks whose answer did not match.
    pub mismatches: Vec<usize>,
}

impl Verdict {
    pub fn from_mismatches(mismatches: Vec<usize>) -> Self {
        Self {
            passed: mismatches.is_empty(),
            mismatches,
        }
    }
}

/// @ai:intent Evaluates filled-in kata code against the kata's expected literals
/// @ai:context a real implementation runs the code with the source language's semantics
pub trait Evaluator: Send + Sync {
    /// @ai:intent Decide whether the answers solve the kata
    /// @ai:pre answers.len() == kata.solutions.len()
    fn evaluate(&self, kata: &Kata, filled_code: &str, answers: &[String]) -> Result<Verdict>;
}

/// @ai:intent Textual comparison of answers with solutions, ignoring whitespace layout
/// @ai:assumes answers and solutions are written in the same canonical form
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralEvaluator;

impl Evaluator for LiteralEvaluator {
    fn evaluate(&self, kata: &Kata, _filled_code: &str, answers: &[String]) -> Result<Verdict> {
        let mismatches = kata
            .solutions
            .iter()
            .zip(answers)
            .enumerate()
            .filter(|(_, (expected, given))| normalize(expected) != normalize(given))
            .map(|(idx, _)| idx)
            .collect();

        Ok(Verdict::from_mismatches(mismatches))
    }
}

/// @ai:intent Fill a kata with candidate answers and hand it to an evaluator
/// @ai:pre answers.len() == kata.solutions.len()
/// @ai:effects depends on evaluator
pub fn attempt(
    kata: &Kata,
    answers: &[String],
    marker: &BlankMarker,
    evaluator: &dyn Evaluator,
) -> Result<Verdict> {
    if answers.len() != kata.solutions.len() {
        return Err(Error::AnswerCount {
            expected: kata.solutions.len(),
            found: answers.len(),
        });
    }

    let filled = marker.fill(&kata.code, answers)?;
    tracing::debug!("Evaluating {} answers", answers.len());
    evaluator.evaluate(kata, &filled, answers)
}

fn normalize(literal: &str) -> String {
    literal.split_whitespace().collect::<Vec<_>>().join(" ")
}
