//! Tracks the current CLI mode and plans moves between modes.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;
use regex::bytes::Regex;

use crate::error::{DriverError, Result};
use crate::platform::{PlatformDefinition, PrivilegeLevel};

/// One step between adjacent levels.
#[derive(Debug, Clone)]
pub struct Transition {
    pub command: String,

    /// Password challenge to answer after `command`, if any.
    pub password_prompt: Option<Regex>,
}

/// Current privilege level plus the level graph.
///
/// Each level with an entry is linked both ways to its parent, so any level
/// can be reached from any other level in the same tree.
#[derive(Debug)]
pub struct PrivilegeManager {
    levels: IndexMap<String, PrivilegeLevel>,
    current: Option<String>,
}

impl PrivilegeManager {
    /// Start out assuming the platform's default level until a prompt is
    /// seen.
    pub fn new(platform: &PlatformDefinition) -> Self {
        let current = platform
            .get_privilege(&platform.default_privilege)
            .map(|level| level.name.clone());

        Self {
            levels: platform.privilege_levels.clone(),
            current,
        }
    }

    fn neighbors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let up = self.levels.get(name).and_then(PrivilegeLevel::parent);
        let down = self
            .levels
            .values()
            .filter(move |level| level.parent() == Some(name))
            .map(|level| level.name.as_str());
        up.into_iter().chain(down)
    }

    /// The level a prompt belongs to.
    pub fn determine_from_prompt(&self, prompt: &str) -> Result<&PrivilegeLevel> {
        self.levels
            .values()
            .find(|level| level.matches(prompt))
            .ok_or_else(|| {
                DriverError::UnknownPrivilege {
                    prompt: prompt.to_string(),
                }
                .into()
            })
    }

    /// Update the current level from a prompt.
    ///
    /// An unrecognized prompt leaves the current level alone and returns
    /// `None`.
    pub fn observe_prompt(&mut self, prompt: &str) -> Option<&str> {
        let name = self.determine_from_prompt(prompt).ok()?.name.clone();
        self.current = Some(name);
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&PrivilegeLevel> {
        self.current.as_deref().and_then(|name| self.levels.get(name))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Shortest route from `from` to `to`, both ends included.
    pub fn find_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let no_path = || DriverError::NoPrivilegePath {
            from: from.to_string(),
            to: to.to_string(),
        };

        if !self.levels.contains_key(from) || !self.levels.contains_key(to) {
            return Err(no_path().into());
        }

        // Breadth-first, remembering how each level was reached
        let mut came_from: HashMap<&str, Option<&str>> = HashMap::from([(from, None)]);
        let mut queue = VecDeque::from([from]);

        while let Some(level) = queue.pop_front() {
            if level == to {
                let mut path = vec![to.to_string()];
                let mut node = to;
                while let Some(&Some(prev)) = came_from.get(node) {
                    path.push(prev.to_string());
                    node = prev;
                }
                path.reverse();
                return Ok(path);
            }

            for next in self.neighbors(level) {
                if !came_from.contains_key(next) {
                    came_from.insert(next, Some(level));
                    queue.push_back(next);
                }
            }
        }

        Err(no_path().into())
    }

    /// How to step between two adjacent levels.
    ///
    /// Going up into a level uses that level's entry command; going back
    /// down uses the leave command of the level being left.
    pub fn get_transition(&self, from: &str, to: &str) -> Option<Transition> {
        let entering = self.levels.get(to)?.entry.as_ref();
        if let Some(entry) = entering.filter(|e| e.parent == from) {
            return Some(Transition {
                command: entry.enter.clone(),
                password_prompt: entry.password_prompt.clone(),
            });
        }

        let leaving = self.levels.get(from)?.entry.as_ref();
        leaving.filter(|e| e.parent == to).map(|entry| Transition {
            command: entry.leave.clone(),
            password_prompt: None,
        })
    }
}
