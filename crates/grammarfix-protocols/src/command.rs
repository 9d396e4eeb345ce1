//! The single user-invocable command.

use serde::{Deserialize, Serialize};

use crate::host::TabId;

/// Where the command is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandContext {
    /// Only while a text selection exists.
    Selection,
}

/// Command registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub id: String,
    pub title: String,
    pub contexts: Vec<CommandContext>,
}

impl CommandSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contexts: vec![CommandContext::Selection],
        }
    }
}

/// A user invoking a registered command on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub menu_item_id: String,
    pub selection_text: String,
    pub tab_id: TabId,
}

impl CommandInvocation {
    pub fn new(
        menu_item_id: impl Into<String>,
        selection_text: impl Into<String>,
        tab_id: TabId,
    ) -> Self {
        Self {
            menu_item_id: menu_item_id.into(),
            selection_text: selection_text.into(),
            tab_id,
        }
    }
}

/// Host facility that exposes commands to the user.
pub trait CommandSurface: Send + Sync {
    /// Register a command. Registering the same id twice replaces the first.
    fn register_command(&self, spec: CommandSpec);
}
