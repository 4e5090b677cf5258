//! Engine configuration
//!
//! Register contents are configuration data: a TOML file can replace any of
//! the bootstrap programs, seed other registers, and choose which register
//! becomes the initial tape.
//!
//! # Example
//!
//! ```toml
//! boot_register = "d"
//!
//! [registers]
//! d = "(hello)\""
//! c = "3!_1+$2$@"
//! ```

use crate::bootstrap::BOOT_REGISTER;
use crate::registers::{Registers, is_register};
use postfix_core::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "postfix.toml";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("'{0}' is not a register (expected a single letter A-Z or a-z)")]
    InvalidRegister(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Register whose text seeds the tape
    pub boot_register: String,

    /// Register overrides, applied on top of the bootstrap bank
    pub registers: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boot_register: BOOT_REGISTER.to_string(),
            registers: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.boot_key()?;
        for key in config.registers.keys() {
            register_key(key)?;
        }
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loading config");
        Self::from_toml(&content)
    }

    /// Load `path` if given, else `postfix.toml` in the working directory if
    /// present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Override one register's program text
    pub fn with_register(mut self, key: char, program: impl Into<String>) -> Self {
        self.registers.insert(key.to_string(), program.into());
        self
    }

    pub fn with_boot_register(mut self, key: char) -> Self {
        self.boot_register = key.to_string();
        self
    }

    /// The boot register as a key
    pub fn boot_key(&self) -> Result<char, ConfigError> {
        register_key(&self.boot_register)
    }

    /// Bootstrap bank with this configuration's overrides applied
    pub fn registers(&self) -> Result<Registers, ConfigError> {
        let mut registers = Registers::bootstrap();
        for (key, program) in &self.registers {
            let key = register_key(key)?;
            debug!(register = %key, len = program.len(), "overriding register");
            registers.set(key, Value::from(program.as_str()))?;
        }
        Ok(registers)
    }
}

fn register_key(key: &str) -> Result<char, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_register(c) => Ok(c),
        _ => Err(ConfigError::InvalidRegister(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.boot_key(), Ok('a'));
        assert_eq!(config.registers().unwrap(), Registers::bootstrap());
    }

    #[test]
    fn test_parse_overrides() {
        let config = EngineConfig::from_toml(
            r#"
boot_register = "d"

[registers]
d = "1 2+"
Z = "(zed)"
"#,
        )
        .unwrap();
        assert_eq!(config.boot_key(), Ok('d'));
        let registers = config.registers().unwrap();
        assert_eq!(registers.get('d'), &Value::from("1 2+"));
        assert_eq!(registers.get('Z'), &Value::from("(zed)"));
        assert_eq!(registers.get('c'), &Value::from("3!_1+$2$@"));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_register_key() {
        let err = EngineConfig::from_toml("[registers]\nab = \"1\"\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidRegister("ab".to_string()));

        let err = EngineConfig::from_toml("boot_register = \"7\"\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidRegister("7".to_string()));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = EngineConfig::from_toml("bogus = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_register('e', "(e)")
            .with_boot_register('e');
        assert_eq!(config.boot_key(), Ok('e'));
        assert_eq!(config.registers().unwrap().get('e'), &Value::from("(e)"));
    }
}
