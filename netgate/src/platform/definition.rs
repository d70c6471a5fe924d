//! Dialect description consumed by the driver.

use indexmap::IndexMap;
use regex::bytes::Regex;

use super::privilege_level::PrivilegeLevel;
use crate::error::{PlatformError, Result};

/// A question the device can ask where a prompt was expected, and the
/// line sent back to it.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub pattern: Regex,
    pub answer: String,
}

/// Everything the driver needs to know about one CLI dialect.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    pub name: String,

    /// Levels keyed by name. Prompts are matched against them in this order.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Where the device is expected to land after login.
    pub default_privilege: String,

    /// Where configuration commands are sent.
    pub config_privilege: String,

    /// Output substrings that mark a command as rejected.
    pub failure_patterns: Vec<String>,

    /// Sent once after login, before any caller command.
    pub on_open_commands: Vec<String>,

    /// Questions answered automatically while waiting for a prompt.
    pub confirmations: Vec<Confirmation>,

    pub terminal_width: u32,
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Start a definition from its privilege levels.
    ///
    /// The first root level is the default and a level named
    /// `configuration`, if present, is the configuration level; both can be
    /// overridden.
    pub fn new(name: impl Into<String>, levels: impl IntoIterator<Item = PrivilegeLevel>) -> Self {
        let privilege_levels: IndexMap<String, PrivilegeLevel> = levels
            .into_iter()
            .map(|level| (level.name.clone(), level))
            .collect();

        let default_privilege = privilege_levels
            .values()
            .find(|level| level.is_root())
            .map(|level| level.name.clone())
            .unwrap_or_default();

        Self {
            name: name.into(),
            privilege_levels,
            default_privilege,
            config_privilege: "configuration".to_string(),
            failure_patterns: Vec::new(),
            on_open_commands: Vec::new(),
            confirmations: Vec::new(),
            terminal_width: 511,
            terminal_height: 24,
        }
    }

    pub fn default_privilege(mut self, name: impl Into<String>) -> Self {
        self.default_privilege = name.into();
        self
    }

    pub fn config_privilege(mut self, name: impl Into<String>) -> Self {
        self.config_privilege = name.into();
        self
    }

    pub fn failures(mut self, patterns: &[&str]) -> Self {
        self.failure_patterns
            .extend(patterns.iter().map(|p| p.to_string()));
        self
    }

    pub fn on_open(mut self, commands: &[&str]) -> Self {
        self.on_open_commands
            .extend(commands.iter().map(|c| c.to_string()));
        self
    }

    /// Answer `answer` whenever the last line of output matches `pattern`.
    pub fn confirm(mut self, pattern: &str, answer: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| PlatformError::InvalidDefinition {
            message: format!("{}: confirmation pattern: {e}", self.name),
        })?;
        self.confirmations.push(Confirmation {
            pattern,
            answer: answer.into(),
        });
        Ok(self)
    }

    /// The confirmation whose question is on `line`, if any.
    pub fn confirmation_for(&self, line: &[u8]) -> Option<&Confirmation> {
        self.confirmations.iter().find(|c| c.pattern.is_match(line))
    }

    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    pub fn get_privilege(&self, name: &str) -> Option<&PrivilegeLevel> {
        self.privilege_levels.get(name)
    }

    /// First failure pattern found in `output`, if any.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failure_patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| output.contains(pattern))
    }

    /// Check that every level name the definition refers to exists.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> crate::error::Error {
            PlatformError::InvalidDefinition {
                message: format!("{}: {}", self.name, message),
            }
            .into()
        };

        if self.privilege_levels.is_empty() {
            return Err(invalid("no privilege levels".to_string()));
        }

        for (role, name) in [
            ("default", &self.default_privilege),
            ("configuration", &self.config_privilege),
        ] {
            if !self.privilege_levels.contains_key(name) {
                return Err(invalid(format!("{} level {:?} is not defined", role, name)));
            }
        }

        for level in self.privilege_levels.values() {
            if let Some(parent) = level.parent() {
                if !self.privilege_levels.contains_key(parent) {
                    return Err(invalid(format!(
                        "level {:?} is entered from unknown level {:?}",
                        level.name, parent
                    )));
                }
            }
        }

        Ok(())
    }
}
