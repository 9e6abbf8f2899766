//! Command registry
//!
//! An explicit name -> command mapping built once at shell start; it
//! owns the command instances for the session's duration and fixes the
//! iteration order `help` reports in. There is no self-registering
//! global list.

use crate::commands::{fs, net, passwd, sys, wget, Command};

/// Owns the session's command instances
pub struct CommandRegistry {
    entries: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry holding every built-in command
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(sys::Whoami));
        registry.register(Box::new(fs::Ls));
        registry.register(Box::new(fs::Pwd));
        registry.register(Box::new(fs::Cd));
        registry.register(Box::new(sys::Uname));
        registry.register(Box::new(fs::Remove::new("rm")));
        registry.register(Box::new(fs::Remove::new("rmdir")));
        registry.register(Box::new(fs::Mkdir));
        registry.register(Box::new(wget::Wget));
        registry.register(Box::new(passwd::Passwd));
        registry.register(Box::new(fs::Cat));
        registry.register(Box::new(net::Ifconfig));
        registry.register(Box::new(sys::Meminfo));
        registry.register(Box::new(sys::Df));
        registry
    }

    /// Add a command; a duplicate name replaces the earlier entry
    pub fn register(&mut self, command: Box<dyn Command>) {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|c| c.name() == command.name())
        {
            warn!("replacing already-registered command '{}'", command.name());
            self.entries[pos] = command;
        } else {
            self.entries.push(command);
        }
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.entries
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.entries.iter().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
