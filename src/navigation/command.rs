//! Command string interpreter
//!
//! Decodes a command string into [`Action`]s one character at a time.
//! The engine pulls actions lazily, so an invalid character only stops the
//! batch once every action before it has already been applied.

use crate::core::types::Action;
use crate::error::{Error, Result};
use std::iter::FusedIterator;
use std::str::Chars;

/// Lazy iterator over the actions of a command string.
///
/// Yields `Err(Error::InvalidCommand)` for the first character outside
/// `f`/`l`/`r` and then stops.
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    chars: Chars<'a>,
    index: usize,
    failed: bool,
}

/// Start parsing a command string
pub fn parse(command: &str) -> Commands<'_> {
    Commands {
        chars: command.chars(),
        index: 0,
        failed: false,
    }
}

impl Iterator for Commands<'_> {
    type Item = Result<Action>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let character = self.chars.next()?;
        let index = self.index;
        self.index += 1;

        match Action::from_char(character) {
            Some(action) => Some(Ok(action)),
            None => {
                self.failed = true;
                Some(Err(Error::InvalidCommand { index, character }))
            }
        }
    }
}

impl FusedIterator for Commands<'_> {}
