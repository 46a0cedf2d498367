//! Test utilities for laraship unit tests.
//!
//! Provides a scripted [`Prompter`](crate::ops::prompts::Prompter) that
//! replays queued answers and records every question it was asked, plus
//! Laravel project fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use laraship::test_support::{Answer, ScriptedPrompter};
//!
//! let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::Default]);
//! let config = collect_migration_config(&mut prompter, false)?;
//! assert_eq!(prompter.asked().len(), 2);
//! ```

pub mod fixtures;

use std::collections::VecDeque;

use crate::core::error::LarashipError;
use crate::ops::prompts::Prompter;

pub use fixtures::*;

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Accept whatever default the question offers.
    Default,
    Yes,
    No,
    /// Index into a select question's items.
    Choice(usize),
    Text(&'static str),
    /// Behave as if the operator pressed Ctrl-C.
    Abort,
}

/// Prompter that replays a fixed list of answers.
///
/// Panics when asked more questions than it has answers, or when an
/// answer does not fit the question kind.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> Result<Answer, LarashipError> {
        self.asked.push(question.to_string());
        match self.answers.pop_front() {
            Some(Answer::Abort) => Err(LarashipError::PromptAborted {
                question: question.to_string(),
                message: "interrupted".to_string(),
            }),
            Some(answer) => Ok(answer),
            None => panic!("unexpected question: {}", question),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, LarashipError> {
        match self.next(question)? {
            Answer::Default => Ok(default),
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            other => panic!("{:?} does not answer yes/no question: {}", other, question),
        }
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String, LarashipError> {
        match self.next(question)? {
            Answer::Default => Ok(default.to_string()),
            Answer::Text(text) => Ok(text.to_string()),
            other => panic!("{:?} does not answer text question: {}", other, question),
        }
    }

    fn select(
        &mut self,
        question: &str,
        items: &[&str],
        default: usize,
    ) -> Result<usize, LarashipError> {
        match self.next(question)? {
            Answer::Default => Ok(default),
            Answer::Choice(index) if index < items.len() => Ok(index),
            other => panic!("{:?} does not answer select question: {}", other, question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompter_records_questions() {
        let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::Text("x"), Answer::Choice(1)]);

        assert!(prompter.confirm("first?", false).unwrap());
        assert_eq!(prompter.input("second?", "d").unwrap(), "x");
        assert_eq!(prompter.select("third?", &["a", "b"], 0).unwrap(), 1);

        assert_eq!(prompter.asked(), &["first?", "second?", "third?"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_scripted_abort() {
        let mut prompter = ScriptedPrompter::new([Answer::Abort]);
        assert!(prompter.confirm("q?", true).is_err());
    }
}
