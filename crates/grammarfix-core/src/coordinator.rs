//! Command lifecycle: one correction cycle per invocation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use grammarfix_config::SettingsStore;
use grammarfix_protocols::command::{CommandInvocation, CommandSpec, CommandSurface};
use grammarfix_protocols::directive::Directive;
use grammarfix_protocols::host::TabId;

use crate::client::CorrectionClient;
use crate::delivery::DeliveryLayer;

pub const COMMAND_ID: &str = "fixGrammar";
pub const COMMAND_TITLE: &str = "Fix Grammar with AI";

/// Shown when no endpoint URL is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Please configure API settings in the extension popup";

/// What one invocation amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Not our command.
    Ignored,
    /// No endpoint URL; nothing was sent.
    NotConfigured,
    /// Correction succeeded and a replacement was delivered.
    Corrected {
        original_text: String,
        fixed_text: String,
    },
    /// Correction failed; `message` was shown to the user.
    Failed { message: String },
}

/// Background coordinator.
///
/// Holds no per-cycle state: settings are re-read on every invocation and
/// each invocation makes exactly one correction attempt.
pub struct Coordinator {
    settings: Arc<dyn SettingsStore>,
    client: CorrectionClient,
    delivery: DeliveryLayer,
}

impl Coordinator {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        client: CorrectionClient,
        delivery: DeliveryLayer,
    ) -> Self {
        Self {
            settings,
            client,
            delivery,
        }
    }

    /// Register the single selection-scoped command.
    pub fn register(&self, surface: &dyn CommandSurface) {
        surface.register_command(CommandSpec::new(COMMAND_ID, COMMAND_TITLE));
        info!(command = COMMAND_ID, "Command registered");
    }

    /// Run one correction cycle.
    pub async fn handle_invocation(&self, invocation: &CommandInvocation) -> CycleOutcome {
        if invocation.menu_item_id != COMMAND_ID {
            debug!(menu_item_id = %invocation.menu_item_id, "Ignoring foreign command");
            return CycleOutcome::Ignored;
        }

        let tab_id = invocation.tab_id;
        let settings = match self.settings.load().await {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = %e, "Failed to read settings");
                return self.fail(tab_id, e.to_string()).await;
            }
        };

        let endpoint = match settings.endpoint() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(tab_id, error = %e, "Endpoint not configured");
                self.delivery
                    .deliver(tab_id, &Directive::show_error(NOT_CONFIGURED_MESSAGE))
                    .await;
                return CycleOutcome::NotConfigured;
            }
        };

        self.delivery.deliver(tab_id, &Directive::ShowLoading).await;

        match self.client.correct(&invocation.selection_text, &endpoint).await {
            Ok(fixed_text) => {
                info!(tab_id, format = %endpoint.format, "Grammar fixed");
                let directive = Directive::replace_text(&invocation.selection_text, &fixed_text);
                self.delivery.deliver(tab_id, &directive).await;
                CycleOutcome::Corrected {
                    original_text: invocation.selection_text.clone(),
                    fixed_text,
                }
            }
            Err(e) => {
                error!(tab_id, error = %e, "Error fixing grammar");
                self.fail(tab_id, e.to_string()).await
            }
        }
    }

    async fn fail(&self, tab_id: TabId, summary: String) -> CycleOutcome {
        let message = format!("Error fixing grammar: {}", summary);
        self.delivery
            .deliver(tab_id, &Directive::show_error(&message))
            .await;
        CycleOutcome::Failed { message }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
