//! In-memory host doubles shared by the delivery and coordinator tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use grammarfix_protocols::command::{CommandSpec, CommandSurface};
use grammarfix_protocols::directive::Directive;
use grammarfix_protocols::error::DeliveryError;
use grammarfix_protocols::host::{PlatformNotification, PlatformNotifier, TabHost, TabId, TabInfo};
use grammarfix_provider_anthropic::AnthropicFormat;
use grammarfix_provider_openai::OpenAIFormat;

use crate::registry::WireFormatRegistry;

pub(crate) fn formats() -> Arc<WireFormatRegistry> {
    let registry = WireFormatRegistry::new();
    registry.register(Arc::new(OpenAIFormat::new()));
    registry.register(Arc::new(AnthropicFormat::new()));
    Arc::new(registry)
}

/// How a mock tab reacts to messages and injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgentMode {
    /// Agent is listening.
    Live,
    /// No agent yet; injection brings one up.
    Injectable,
    /// Injection reports success but the agent never answers.
    Unresponsive,
    /// Injection is refused.
    Refused,
}

struct MockTab {
    url: String,
    mode: AgentMode,
}

#[derive(Default)]
pub(crate) struct MockHost {
    tabs: Mutex<HashMap<TabId, MockTab>>,
    delivered: Mutex<Vec<(TabId, Directive)>>,
    send_attempts: Mutex<usize>,
    injections: Mutex<usize>,
}

impl MockHost {
    pub(crate) fn with_tab(self, tab_id: TabId, url: &str, mode: AgentMode) -> Self {
        self.tabs.lock().insert(
            tab_id,
            MockTab {
                url: url.to_string(),
                mode,
            },
        );
        self
    }

    pub(crate) fn delivered(&self) -> Vec<(TabId, Directive)> {
        self.delivered.lock().clone()
    }

    pub(crate) fn directives(&self) -> Vec<Directive> {
        self.delivered.lock().iter().map(|(_, d)| d.clone()).collect()
    }

    pub(crate) fn send_attempts(&self) -> usize {
        *self.send_attempts.lock()
    }

    pub(crate) fn injections(&self) -> usize {
        *self.injections.lock()
    }
}

#[async_trait]
impl TabHost for MockHost {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, DeliveryError> {
        self.tabs
            .lock()
            .get(&tab_id)
            .map(|tab| TabInfo::new(tab_id, tab.url.clone()))
            .ok_or(DeliveryError::TabNotFound(tab_id))
    }

    async fn send_message(&self, tab_id: TabId, directive: &Directive) -> Result<(), DeliveryError> {
        *self.send_attempts.lock() += 1;
        let mode = self
            .tabs
            .lock()
            .get(&tab_id)
            .map(|tab| tab.mode)
            .ok_or(DeliveryError::TabNotFound(tab_id))?;

        if mode == AgentMode::Live {
            self.delivered.lock().push((tab_id, directive.clone()));
            Ok(())
        } else {
            Err(DeliveryError::AgentUnavailable {
                tab_id,
                reason: "Receiving end does not exist".to_string(),
            })
        }
    }

    async fn inject_agent(&self, tab_id: TabId) -> Result<(), DeliveryError> {
        *self.injections.lock() += 1;
        let mut tabs = self.tabs.lock();
        let tab = tabs.get_mut(&tab_id).ok_or(DeliveryError::TabNotFound(tab_id))?;
        match tab.mode {
            AgentMode::Injectable => {
                tab.mode = AgentMode::Live;
                Ok(())
            }
            AgentMode::Refused => Err(DeliveryError::InjectionFailed {
                tab_id,
                reason: "Cannot access contents of the page".to_string(),
            }),
            AgentMode::Live | AgentMode::Unresponsive => Ok(()),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    shown: Mutex<Vec<PlatformNotification>>,
    broken: bool,
}

impl RecordingNotifier {
    pub(crate) fn broken() -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub(crate) fn shown(&self) -> Vec<PlatformNotification> {
        self.shown.lock().clone()
    }
}

#[async_trait]
impl PlatformNotifier for RecordingNotifier {
    async fn notify(&self, notification: PlatformNotification) -> Result<(), DeliveryError> {
        if self.broken {
            return Err(DeliveryError::NotificationFailed("notifications disabled".to_string()));
        }
        self.shown.lock().push(notification);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingSurface {
    commands: Mutex<Vec<CommandSpec>>,
}

impl RecordingSurface {
    pub(crate) fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().clone()
    }
}

impl CommandSurface for RecordingSurface {
    fn register_command(&self, spec: CommandSpec) {
        self.commands.lock().push(spec);
    }
}
