//! A page with a live selection agent, run as its own task.
//!
//! The task owns the page's [`Document`] and [`SelectionAgent`] and handles
//! one message at a time, so page state is never shared. The handle is the
//! only way in; once every handle is dropped, or the page is detached, the
//! task ends.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use grammarfix_agent::{Document, SelectionAgent};
use grammarfix_protocols::directive::{Directive, StatusNotification};
use grammarfix_protocols::host::TabId;

use crate::error::BrowserError;

const PAGE_QUEUE_DEPTH: usize = 32;

/// Page mutation run inside the page task.
pub type PageEdit = Box<dyn FnOnce(&mut Document) + Send>;

/// What a page looks like at one instant.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub document: Document,
    pub notification: Option<StatusNotification>,
    /// Recent page notifications, oldest first. Bounded by the agent's history.
    pub notifications_shown: Vec<StatusNotification>,
    pub captured_text: Option<String>,
}

impl PageSnapshot {
    pub(crate) fn without_agent(document: Document) -> Self {
        Self {
            document,
            notification: None,
            notifications_shown: Vec::new(),
            captured_text: None,
        }
    }

    fn of(document: &Document, agent: &SelectionAgent) -> Self {
        Self {
            document: document.clone(),
            notification: agent.notification().current().cloned(),
            notifications_shown: agent.notification().history().to_vec(),
            captured_text: agent.capture().map(|c| c.text.clone()),
        }
    }

    pub fn body_text(&self) -> String {
        self.document.body_text()
    }
}

enum PageMessage {
    Directive(Directive, oneshot::Sender<()>),
    ContextMenu(oneshot::Sender<String>),
    Edit(PageEdit, oneshot::Sender<()>),
    Snapshot(oneshot::Sender<PageSnapshot>),
    Detach(oneshot::Sender<Document>),
}

/// Sender side of a running page task.
#[derive(Clone)]
pub struct PageHandle {
    tab_id: TabId,
    tx: mpsc::Sender<PageMessage>,
}

impl PageHandle {
    /// Start the agent on `document`.
    pub fn spawn(tab_id: TabId, document: Document) -> Self {
        let (tx, rx) = mpsc::channel(PAGE_QUEUE_DEPTH);
        tokio::spawn(run_page(tab_id, document, rx));
        debug!(tab_id, "Selection agent started");
        Self { tab_id, tx }
    }

    /// Deliver a directive and wait until the agent has acted on it.
    pub async fn deliver(&self, directive: Directive) -> Result<(), BrowserError> {
        self.request(|ack| PageMessage::Directive(directive, ack)).await
    }

    /// Fire the context menu event; returns the selected text.
    pub async fn context_menu(&self) -> Result<String, BrowserError> {
        self.request(PageMessage::ContextMenu).await
    }

    pub async fn edit(&self, edit: PageEdit) -> Result<(), BrowserError> {
        self.request(|ack| PageMessage::Edit(edit, ack)).await
    }

    pub async fn snapshot(&self) -> Result<PageSnapshot, BrowserError> {
        self.request(PageMessage::Snapshot).await
    }

    /// Stop the agent and hand the document back.
    pub async fn detach(&self) -> Result<Document, BrowserError> {
        self.request(PageMessage::Detach).await
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> PageMessage,
    ) -> Result<T, BrowserError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(message(ack_tx))
            .await
            .map_err(|_| BrowserError::PageClosed(self.tab_id))?;
        ack_rx.await.map_err(|_| BrowserError::PageClosed(self.tab_id))
    }
}

async fn run_page(tab_id: TabId, mut document: Document, mut rx: mpsc::Receiver<PageMessage>) {
    let mut agent = SelectionAgent::new();

    while let Some(message) = rx.recv().await {
        match message {
            PageMessage::Directive(directive, ack) => {
                trace!(tab_id, action = directive.action(), "Page handling directive");
                agent.handle(&mut document, &directive);
                let _ = ack.send(());
            }
            PageMessage::ContextMenu(reply) => {
                agent.on_context_menu(&document);
                let _ = reply.send(document.selection_text());
            }
            PageMessage::Edit(edit, ack) => {
                edit(&mut document);
                let _ = ack.send(());
            }
            PageMessage::Snapshot(reply) => {
                let _ = reply.send(PageSnapshot::of(&document, &agent));
            }
            PageMessage::Detach(reply) => {
                let _ = reply.send(document);
                debug!(tab_id, "Selection agent detached");
                return;
            }
        }
    }

    debug!(tab_id, "Selection agent stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammarfix_agent::Range;

    #[tokio::test]
    async fn test_page_replaces_captured_selection() {
        let (document, text) = Document::with_paragraph("She go to school.");
        let page = PageHandle::spawn(1, document);

        page.edit(Box::new(move |doc| doc.select(Range::within(text, 0, 6))))
            .await
            .unwrap();
        assert_eq!(page.context_menu().await.unwrap(), "She go");

        page.deliver(Directive::replace_text("She go", "She goes"))
            .await
            .unwrap();

        let snapshot = page.snapshot().await.unwrap();
        assert_eq!(snapshot.body_text(), "She goes to school.");
        assert!(snapshot.captured_text.is_none());
    }

    #[tokio::test]
    async fn test_detached_page_rejects_messages() {
        let (document, _) = Document::with_paragraph("text");
        let page = PageHandle::spawn(2, document);

        let document = page.detach().await.unwrap();
        assert_eq!(document.body_text(), "text");

        let err = page.deliver(Directive::ShowLoading).await.unwrap_err();
        assert!(matches!(err, BrowserError::PageClosed(2)));
    }
}
