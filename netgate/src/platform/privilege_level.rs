//! CLI modes and how to move between them.

use regex::bytes::Regex;

/// How a mode is entered from, and left back to, the mode below it.
#[derive(Debug, Clone)]
pub struct ModeEntry {
    /// The mode this one is entered from.
    pub parent: String,

    /// Sent in `parent` to get here.
    pub enter: String,

    /// Sent here to get back to `parent`.
    pub leave: String,

    /// Password challenge the device may show after `enter`.
    pub password_prompt: Option<Regex>,
}

/// A privilege level (CLI mode) on a network device, recognized by its
/// prompt.
///
/// Levels without an [`entry`](Self::entry) are roots: the device puts the
/// user there at login and nothing sits below them.
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    pub name: String,

    /// Matches the prompt line shown in this mode.
    pub pattern: Regex,

    pub entry: Option<ModeEntry>,

    /// Substrings that rule a prompt out even when `pattern` matches, for
    /// modes whose prompts share a terminator (`#` in both privileged and
    /// configuration mode).
    pub excludes: Vec<String>,
}

impl PrivilegeLevel {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            entry: None,
            excludes: Vec::new(),
        })
    }

    /// Reachable from `parent` by sending `enter`; `leave` goes back.
    pub fn entered_from(
        mut self,
        parent: impl Into<String>,
        enter: impl Into<String>,
        leave: impl Into<String>,
    ) -> Self {
        self.entry = Some(ModeEntry {
            parent: parent.into(),
            enter: enter.into(),
            leave: leave.into(),
            password_prompt: None,
        });
        self
    }

    /// Answer a password challenge matching `pattern` when entering.
    ///
    /// Only meaningful after [`entered_from`](Self::entered_from); on a root
    /// level it has no effect.
    pub fn with_password_prompt(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let prompt = Regex::new(pattern)?;
        if let Some(entry) = self.entry.as_mut() {
            entry.password_prompt = Some(prompt);
        }
        Ok(self)
    }

    pub fn excluding(mut self, text: impl Into<String>) -> Self {
        self.excludes.push(text.into());
        self
    }

    pub fn parent(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.parent.as_str())
    }

    pub fn is_root(&self) -> bool {
        self.entry.is_none()
    }

    /// Whether `prompt` belongs to this level.
    pub fn matches(&self, prompt: &str) -> bool {
        !self.excludes.iter().any(|text| prompt.contains(text.as_str()))
            && self.pattern.is_match(prompt.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_disambiguate_shared_terminator() {
        let level = PrivilegeLevel::new("privilege_exec", r"#\s?$")
            .unwrap()
            .excluding("(config");

        assert!(level.matches("router#"));
        assert!(!level.matches("router(config)#"));
        assert!(!level.matches("router>"));
    }

    #[test]
    fn test_entry() {
        let root = PrivilegeLevel::new("exec", r">$").unwrap();
        assert!(root.is_root());
        assert_eq!(root.parent(), None);

        let level = PrivilegeLevel::new("privilege_exec", r"#$")
            .unwrap()
            .entered_from("exec", "enable", "disable")
            .with_password_prompt(r"(?i)password:\s?$")
            .unwrap();

        let entry = level.entry.as_ref().unwrap();
        assert_eq!(level.parent(), Some("exec"));
        assert_eq!(entry.enter, "enable");
        assert_eq!(entry.leave, "disable");
        assert!(entry.password_prompt.as_ref().unwrap().is_match(b"Password: "));
    }

    #[test]
    fn test_password_prompt_on_root_is_ignored() {
        let level = PrivilegeLevel::new("exec", r">$")
            .unwrap()
            .with_password_prompt("password:")
            .unwrap();
        assert!(level.entry.is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PrivilegeLevel::new("broken", r"(unclosed").is_err());
    }
}
