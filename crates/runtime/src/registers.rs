//! Register bank
//!
//! 52 slots keyed by `A`–`Z` and `a`–`z`. Every slot always holds a value
//! (the empty string unless seeded). Inside the language a letter only reads
//! its register; there is no operator that writes one. `set` exists for
//! configuration before a run starts.

use crate::bootstrap;
use crate::config::ConfigError;
use postfix_core::Value;
use std::array;

pub const REGISTER_COUNT: usize = 52;

static EMPTY: Value = Value::String(String::new());

#[derive(Debug, Clone, PartialEq)]
pub struct Registers {
    slots: [Value; REGISTER_COUNT],
}

impl Registers {
    /// All 52 registers bound to the empty string
    pub fn empty() -> Self {
        Self {
            slots: array::from_fn(|_| Value::empty()),
        }
    }

    /// The standard bank: interactive loop, string analysis, conditional helper
    pub fn bootstrap() -> Self {
        let mut registers = Self::empty();
        registers.seed(bootstrap::INTERACTIVE_LOOP, bootstrap::interactive_loop());
        registers.seed(bootstrap::STRING_ANALYSIS, bootstrap::string_analysis());
        registers.seed(
            bootstrap::CONDITIONAL,
            bootstrap::CONDITIONAL_HELPER.to_string(),
        );
        registers
    }

    fn seed(&mut self, key: char, program: String) {
        if let Some(idx) = slot(key) {
            self.slots[idx] = Value::String(program);
        }
    }

    /// Value held by `key`; the empty string for anything that is not a register
    pub fn get(&self, key: char) -> &Value {
        slot(key).map_or(&EMPTY, |idx| &self.slots[idx])
    }

    /// Rebind a register before a run
    ///
    /// # Errors
    /// `InvalidRegister` if `key` is not an ASCII letter.
    pub fn set(&mut self, key: char, value: Value) -> Result<(), ConfigError> {
        let idx = slot(key).ok_or_else(|| ConfigError::InvalidRegister(key.to_string()))?;
        self.slots[idx] = value;
        Ok(())
    }

    /// (key, value) pairs in `A..Z a..z` order
    pub fn iter(&self) -> impl Iterator<Item = (char, &Value)> {
        keys().zip(self.slots.iter())
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::bootstrap()
    }
}

/// True for the 52 register keys
pub fn is_register(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// All register keys, uppercase first
pub fn keys() -> impl Iterator<Item = char> {
    ('A'..='Z').chain('a'..='z')
}

fn slot(key: char) -> Option<usize> {
    match key {
        'A'..='Z' => Some(key as usize - 'A' as usize),
        'a'..='z' => Some(26 + key as usize - 'a' as usize),
        _ => None,
    }
}
