//! Fix subcommand: one correction cycle on a simulated page.

use std::sync::Arc;

use tracing::info;

use grammarfix_agent::{ControlKind, Document, NodeId, Range};
use grammarfix_config::SettingsStore;
use grammarfix_core::coordinator::NOT_CONFIGURED_MESSAGE;
use grammarfix_core::CycleOutcome;
use grammarfix_runtime::{ExtensionRuntime, ExtensionRuntimeConfig};

enum Selected {
    Paragraph,
    Control(NodeId),
}

/// Select all of `text` on a fresh page, run the fix command, print the page.
pub(crate) async fn handle_fix_command(
    store: Arc<dyn SettingsStore>,
    text: String,
    page_url: String,
    textarea: bool,
) -> anyhow::Result<()> {
    let (document, selected) = build_page(&text, textarea);

    let runtime = ExtensionRuntime::new(store, ExtensionRuntimeConfig::default());
    let tab_id = runtime.browser().open_tab(page_url.clone(), document);
    info!(tab_id, page_url = %page_url, "Page opened");

    let outcome = runtime.fix_selection(tab_id).await?;
    let page = runtime.browser().snapshot(tab_id).await?;

    let result = match selected {
        Selected::Paragraph => page.body_text(),
        Selected::Control(node) => page
            .document
            .control_value(node)
            .unwrap_or_default()
            .to_string(),
    };

    for notification in runtime.notifier().shown() {
        eprintln!("[{}] {}", notification.title, notification.message);
    }
    if let Some(notification) = &page.notification {
        eprintln!("[page] {}", notification.message);
    }

    match outcome {
        CycleOutcome::Corrected { .. } => {
            println!("{}", result);
            Ok(())
        }
        CycleOutcome::NotConfigured => anyhow::bail!("{}", NOT_CONFIGURED_MESSAGE),
        CycleOutcome::Failed { message } => anyhow::bail!("{}", message),
        CycleOutcome::Ignored => anyhow::bail!("Command was not handled"),
    }
}

fn build_page(text: &str, textarea: bool) -> (Document, Selected) {
    if textarea {
        let mut document = Document::new();
        let root = document.root();
        let control = document.append_control(root, ControlKind::TextArea, text);
        document.focus(control);
        document.set_control_selection(control, 0, text.chars().count());
        return (document, Selected::Control(control));
    }

    let (mut document, node) = Document::with_paragraph(text);
    document.select(Range::within(node, 0, text.chars().count()));
    (document, Selected::Paragraph)
}
