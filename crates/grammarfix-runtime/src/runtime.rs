//! Extension runtime: coordinator, delivery and browser wired together.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use grammarfix_config::SettingsStore;
use grammarfix_core::delivery::DEFAULT_SETTLE_DELAY;
use grammarfix_core::{
    Coordinator, CorrectionClient, CycleOutcome, DeliveryLayer, WireFormatRegistry, COMMAND_ID,
};
use grammarfix_protocols::host::TabId;
use grammarfix_provider_anthropic::AnthropicFormat;
use grammarfix_provider_openai::OpenAIFormat;

use crate::browser::SimulatedBrowser;
use crate::error::BrowserError;
use crate::notifier::LogNotifier;

/// Registry holding every built-in wire format.
pub fn default_formats() -> Arc<WireFormatRegistry> {
    let registry = WireFormatRegistry::new();
    registry.register(Arc::new(OpenAIFormat::new()));
    registry.register(Arc::new(AnthropicFormat::new()));
    Arc::new(registry)
}

/// Configuration for the extension runtime.
#[derive(Debug, Clone)]
pub struct ExtensionRuntimeConfig {
    /// Wait between injecting an agent and retrying a send.
    pub settle_delay: Duration,
}

impl Default for ExtensionRuntimeConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// One installed extension running against a simulated browser.
pub struct ExtensionRuntime {
    browser: Arc<SimulatedBrowser>,
    notifier: Arc<LogNotifier>,
    client: CorrectionClient,
    coordinator: Coordinator,
}

impl ExtensionRuntime {
    /// Install the extension: build the pipeline and register its command.
    pub fn new(settings: Arc<dyn SettingsStore>, config: ExtensionRuntimeConfig) -> Self {
        let browser = Arc::new(SimulatedBrowser::new());
        let notifier = Arc::new(LogNotifier::new());
        let client = CorrectionClient::new(default_formats());
        let delivery = DeliveryLayer::new(browser.clone(), notifier.clone())
            .with_settle_delay(config.settle_delay);
        let coordinator = Coordinator::new(settings, client.clone(), delivery);

        coordinator.register(browser.as_ref());
        info!("Grammar Fixer installed");

        Self {
            browser,
            notifier,
            client,
            coordinator,
        }
    }

    pub fn browser(&self) -> &Arc<SimulatedBrowser> {
        &self.browser
    }

    pub fn notifier(&self) -> &Arc<LogNotifier> {
        &self.notifier
    }

    /// The correction client, for connection probes.
    pub fn client(&self) -> &CorrectionClient {
        &self.client
    }

    /// Right-click the tab's selection and choose the fix command.
    pub async fn fix_selection(&self, tab_id: TabId) -> Result<CycleOutcome, BrowserError> {
        let invocation = self.browser.invoke_command(tab_id, COMMAND_ID).await?;
        Ok(self.coordinator.handle_invocation(&invocation).await)
    }
}
