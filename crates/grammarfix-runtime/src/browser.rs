//! In-process browser host.
//!
//! Tabs hold either a bare document or a running page task. Ordinary pages
//! get their agent at load time; privileged pages never do. Messages to a tab
//! without an agent fail the way a real extension message would, which is
//! what drives the delivery layer's injection fallback.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use grammarfix_agent::Document;
use grammarfix_protocols::command::{CommandInvocation, CommandSpec, CommandSurface};
use grammarfix_protocols::directive::Directive;
use grammarfix_protocols::error::DeliveryError;
use grammarfix_protocols::host::{is_privileged_url, TabHost, TabId, TabInfo};

use crate::error::BrowserError;
use crate::page::{PageEdit, PageHandle, PageSnapshot};

enum PageState {
    /// No agent: a privileged page, or one loaded before the agent existed.
    Bare(Document),
    Live(PageHandle),
    /// Document is moving between states.
    Busy,
}

struct Tab {
    url: String,
    page: PageState,
}

#[derive(Default)]
struct BrowserState {
    tabs: HashMap<TabId, Tab>,
    next_tab_id: TabId,
}

/// Simulated browser implementing the host seams.
#[derive(Default)]
pub struct SimulatedBrowser {
    state: Mutex<BrowserState>,
    commands: Mutex<Vec<CommandSpec>>,
}

impl SimulatedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a page. Ordinary pages come up with a live agent.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open_tab(&self, url: impl Into<String>, document: Document) -> TabId {
        let url = url.into();
        let inject = !is_privileged_url(&url);
        let tab_id = self.insert_tab(url, document);
        if inject {
            self.start_agent(tab_id);
        }
        tab_id
    }

    /// Load a page without starting its agent.
    pub fn open_tab_without_agent(&self, url: impl Into<String>, document: Document) -> TabId {
        self.insert_tab(url.into(), document)
    }

    pub fn close_tab(&self, tab_id: TabId) -> bool {
        self.state.lock().tabs.remove(&tab_id).is_some()
    }

    /// Stop a tab's agent, keeping its document.
    pub async fn detach_agent(&self, tab_id: TabId) -> Result<(), BrowserError> {
        let Some(handle) = self.live_handle(tab_id)? else {
            return Ok(());
        };
        let document = handle.detach().await?;
        if let Some(tab) = self.state.lock().tabs.get_mut(&tab_id) {
            tab.page = PageState::Bare(document);
        }
        Ok(())
    }

    pub fn has_agent(&self, tab_id: TabId) -> bool {
        matches!(self.live_handle(tab_id), Ok(Some(_)))
    }

    pub fn registered_commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().clone()
    }

    /// Change the page, with or without an agent running.
    pub async fn edit_page(
        &self,
        tab_id: TabId,
        edit: impl FnOnce(&mut Document) + Send + 'static,
    ) -> Result<(), BrowserError> {
        let edit: PageEdit = Box::new(edit);
        if let Some(handle) = self.live_handle(tab_id)? {
            return handle.edit(edit).await;
        }
        let mut state = self.state.lock();
        let tab = state
            .tabs
            .get_mut(&tab_id)
            .ok_or(BrowserError::TabNotFound(tab_id))?;
        match &mut tab.page {
            PageState::Bare(document) => {
                edit(document);
                Ok(())
            }
            _ => Err(BrowserError::PageClosed(tab_id)),
        }
    }

    pub async fn snapshot(&self, tab_id: TabId) -> Result<PageSnapshot, BrowserError> {
        if let Some(handle) = self.live_handle(tab_id)? {
            return handle.snapshot().await;
        }
        let state = self.state.lock();
        match state.tabs.get(&tab_id).map(|tab| &tab.page) {
            Some(PageState::Bare(document)) => Ok(PageSnapshot::without_agent(document.clone())),
            Some(_) => Err(BrowserError::PageClosed(tab_id)),
            None => Err(BrowserError::TabNotFound(tab_id)),
        }
    }

    /// Right-click the page and pick a registered command.
    ///
    /// The agent, if any, sees the context menu event first; the invocation
    /// carries the selection text as the browser reports it.
    pub async fn invoke_command(
        &self,
        tab_id: TabId,
        command_id: &str,
    ) -> Result<CommandInvocation, BrowserError> {
        if !self.commands.lock().iter().any(|spec| spec.id == command_id) {
            return Err(BrowserError::UnknownCommand(command_id.to_string()));
        }

        let selection_text = match self.live_handle(tab_id)? {
            Some(handle) => handle.context_menu().await?,
            None => {
                let state = self.state.lock();
                match state.tabs.get(&tab_id).map(|tab| &tab.page) {
                    Some(PageState::Bare(document)) => document.selection_text(),
                    _ => String::new(),
                }
            }
        };

        debug!(tab_id, command = command_id, "Command invoked");
        Ok(CommandInvocation::new(command_id, selection_text, tab_id))
    }

    fn insert_tab(&self, url: String, document: Document) -> TabId {
        let mut state = self.state.lock();
        state.next_tab_id += 1;
        let tab_id = state.next_tab_id;
        debug!(tab_id, url = %url, "Tab opened");
        state.tabs.insert(
            tab_id,
            Tab {
                url,
                page: PageState::Bare(document),
            },
        );
        tab_id
    }

    /// Move a bare document into a page task. Returns false if there was
    /// nothing to start.
    fn start_agent(&self, tab_id: TabId) -> bool {
        let mut state = self.state.lock();
        let Some(tab) = state.tabs.get_mut(&tab_id) else {
            return false;
        };
        match std::mem::replace(&mut tab.page, PageState::Busy) {
            PageState::Bare(document) => {
                tab.page = PageState::Live(PageHandle::spawn(tab_id, document));
                true
            }
            other => {
                tab.page = other;
                false
            }
        }
    }

    fn live_handle(&self, tab_id: TabId) -> Result<Option<PageHandle>, BrowserError> {
        let state = self.state.lock();
        let tab = state.tabs.get(&tab_id).ok_or(BrowserError::TabNotFound(tab_id))?;
        Ok(match &tab.page {
            PageState::Live(handle) => Some(handle.clone()),
            _ => None,
        })
    }
}

#[async_trait]
impl TabHost for SimulatedBrowser {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, DeliveryError> {
        self.state
            .lock()
            .tabs
            .get(&tab_id)
            .map(|tab| TabInfo::new(tab_id, tab.url.clone()))
            .ok_or(DeliveryError::TabNotFound(tab_id))
    }

    async fn send_message(&self, tab_id: TabId, directive: &Directive) -> Result<(), DeliveryError> {
        let handle = self
            .live_handle(tab_id)
            .map_err(|e| e.into_delivery(tab_id))?
            .ok_or_else(|| BrowserError::PageClosed(tab_id).into_delivery(tab_id))?;
        handle
            .deliver(directive.clone())
            .await
            .map_err(|e| e.into_delivery(tab_id))
    }

    async fn inject_agent(&self, tab_id: TabId) -> Result<(), DeliveryError> {
        let url = self.get_tab(tab_id).await?.url;
        if is_privileged_url(&url) {
            warn!(tab_id, url = %url, "Refusing to inject into privileged page");
            return Err(BrowserError::Privileged(url).into_delivery(tab_id));
        }
        if self.start_agent(tab_id) {
            info!(tab_id, "Selection agent injected");
        }
        Ok(())
    }
}

impl CommandSurface for SimulatedBrowser {
    fn register_command(&self, spec: CommandSpec) {
        let mut commands = self.commands.lock();
        commands.retain(|existing| existing.id != spec.id);
        debug!(command = %spec.id, title = %spec.title, "Context menu item added");
        commands.push(spec);
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
