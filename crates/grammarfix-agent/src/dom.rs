//! Minimal page document model.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
//! detaches it from its parent; the id stays valid so stale references can
//! be detected instead of silently pointing at a different node.
//!
//! Range boundaries follow DOM conventions: in a text node the offset counts
//! characters, in an element it counts children. All text offsets, including
//! text control selections, are in Unicode scalar values.

use grammarfix_protocols::error::ReplacementError;

/// Node handle.
pub type NodeId = usize;

/// Kind of text control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-line `<input>`.
    Input,
    /// Multi-line `<textarea>`.
    TextArea,
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
    },
    Text(String),
    Control {
        kind: ControlKind,
        value: String,
        selection_start: usize,
        selection_end: usize,
    },
}

/// Most recent events kept by a [`Document`].
pub const EVENT_LIMIT: usize = 64;

/// Event recorded by [`Document::dispatch_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    Input { target: NodeId, bubbles: bool },
}

/// A point in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A span between two boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Boundary,
    pub end: Boundary,
}

impl Range {
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    /// Range inside one text node.
    pub fn within(node: NodeId, start: usize, end: usize) -> Self {
        Self::new(Boundary::new(node, start), Boundary::new(node, end))
    }

    pub fn collapsed(at: Boundary) -> Self {
        Self::new(at, at)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Position of a boundary in document order: preorder index plus character
/// offset within that node.
type Point = (usize, usize);

/// In-memory page document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    focus: Option<NodeId>,
    selection: Option<Range>,
    events: Vec<DomEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element {
                    tag: "body".to_string(),
                },
                parent: None,
                children: Vec::new(),
            }],
            root: 0,
            focus: None,
            selection: None,
            events: Vec::new(),
        }
    }

    /// Document whose body holds one paragraph of text.
    pub fn with_paragraph(text: &str) -> (Self, NodeId) {
        let mut doc = Self::new();
        let p = doc.append_element(doc.root(), "p");
        let text = doc.append_text(p, text);
        (doc, text)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // ---- construction ----

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        self.nodes[child].parent = Some(parent);
        let children = &mut self.nodes[parent].children;
        match index {
            Some(i) if i < children.len() => children.insert(i, child),
            _ => children.push(child),
        }
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.push(NodeKind::Element {
            tag: tag.to_string(),
        });
        self.attach(parent, node, None);
        node
    }

    pub fn append_text(&mut self, parent: NodeId, data: &str) -> NodeId {
        let node = self.push(NodeKind::Text(data.to_string()));
        self.attach(parent, node, None);
        node
    }

    pub fn append_control(&mut self, parent: NodeId, kind: ControlKind, value: &str) -> NodeId {
        let node = self.push(NodeKind::Control {
            kind,
            value: value.to_string(),
            selection_start: 0,
            selection_end: 0,
        });
        self.attach(parent, node, None);
        node
    }

    /// Detach a node (and its subtree) from the document.
    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != node);
        self.nodes[node].parent = None;
        if self.focus.is_some_and(|f| !self.is_attached(f)) {
            self.focus = None;
        }
    }

    // ---- inspection ----

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|n| &n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Text(data) => Some(data),
            _ => None,
        }
    }

    pub fn set_text(&mut self, node: NodeId, data: &str) {
        if let Some(NodeKind::Text(current)) = self.nodes.get_mut(node).map(|n| &mut n.kind) {
            *current = data.to_string();
        }
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attached nodes in document order.
    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node].children.iter().rev());
        }
        order
    }

    /// Concatenated text of a subtree. Control values are not included.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(data) = self.nodes.get(current) else {
                continue;
            };
            if let NodeKind::Text(text) = &data.kind {
                out.push_str(text);
            }
            stack.extend(data.children.iter().rev());
        }
        out
    }

    /// Text of the whole document.
    pub fn body_text(&self) -> String {
        self.text_content(self.root)
    }

    /// Attached text nodes in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&n| matches!(self.nodes[n].kind, NodeKind::Text(_)))
            .collect()
    }

    // ---- focus and controls ----

    pub fn focus(&mut self, node: NodeId) {
        if self.is_attached(node) {
            self.focus = Some(node);
        }
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    /// Focused node, if it is a text control.
    pub fn focused_control(&self) -> Option<NodeId> {
        self.focus
            .filter(|&node| matches!(self.kind(node), Some(NodeKind::Control { .. })))
    }

    pub fn control_value(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Control { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn control_selection(&self, node: NodeId) -> Option<(usize, usize)> {
        match self.kind(node)? {
            NodeKind::Control {
                selection_start,
                selection_end,
                ..
            } => Some((*selection_start, *selection_end)),
            _ => None,
        }
    }

    /// Set a control's value; the selection collapses to the end, as in browsers.
    pub fn set_control_value(&mut self, node: NodeId, new_value: &str) {
        if let Some(NodeKind::Control {
            value,
            selection_start,
            selection_end,
            ..
        }) = self.nodes.get_mut(node).map(|n| &mut n.kind)
        {
            *value = new_value.to_string();
            let len = value.chars().count();
            *selection_start = len;
            *selection_end = len;
        }
    }

    /// Select a span of a control's value. Offsets are clamped to the value.
    pub fn set_control_selection(&mut self, node: NodeId, start: usize, end: usize) {
        if let Some(NodeKind::Control {
            value,
            selection_start,
            selection_end,
            ..
        }) = self.nodes.get_mut(node).map(|n| &mut n.kind)
        {
            let len = value.chars().count();
            let end = end.min(len);
            *selection_start = start.min(end);
            *selection_end = end;
        }
    }

    /// Record an `input` event on `target`.
    pub fn dispatch_input(&mut self, target: NodeId) {
        while self.events.len() >= EVENT_LIMIT {
            self.events.remove(0);
        }
        self.events.push(DomEvent::Input {
            target,
            bubbles: true,
        });
    }

    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    // ---- selection ----

    pub fn select(&mut self, range: Range) {
        self.selection = Some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// Text of the current selection, or of the focused control's selection.
    pub fn selection_text(&self) -> String {
        if let Some(control) = self.focused_control() {
            let (start, end) = self.control_selection(control).unwrap_or_default();
            return self
                .control_value(control)
                .map(|value| char_slice(value, start, end).to_string())
                .unwrap_or_default();
        }
        self.selection
            .and_then(|range| self.range_text(&range).ok())
            .unwrap_or_default()
    }

    /// Check that a range still points at live nodes with in-bounds offsets.
    pub fn validate_range(&self, range: &Range) -> Result<(), ReplacementError> {
        self.points(&self.preorder(), range).map(|_| ())
    }

    /// Text covered by a range.
    pub fn range_text(&self, range: &Range) -> Result<String, ReplacementError> {
        let order = self.preorder();
        let (start, end) = self.points(&order, range)?;
        let mut out = String::new();
        for (index, from, to) in self.covered_text(&order, start, end) {
            if let Some(text) = self.text(order[index]) {
                out.push_str(char_slice(text, from, to));
            }
        }
        Ok(out)
    }

    /// Remove the contents of a range.
    ///
    /// Boundary text nodes are trimmed. Text nodes and whole subtrees
    /// strictly inside the range are detached. Returns the collapsed
    /// insertion point, which is the original start boundary.
    pub fn delete_contents(&mut self, range: &Range) -> Result<Boundary, ReplacementError> {
        let order = self.preorder();
        let (start, end) = self.points(&order, range)?;
        let contained = self.contained_subtrees(&order, range, start, end);

        for (index, from, to) in self.covered_text(&order, start, end) {
            let node = order[index];
            let Some(text) = self.text(node) else {
                continue;
            };
            let len = text.chars().count();
            let is_boundary_node = node == range.start.node || node == range.end.node;
            if from == 0 && to == len && !is_boundary_node {
                self.remove(node);
            } else {
                let kept = format!("{}{}", char_slice(text, 0, from), char_slice(text, to, len));
                self.set_text(node, &kept);
            }
        }

        for node in contained {
            if self.is_attached(node) {
                self.remove(node);
            }
        }

        self.selection = Some(Range::collapsed(range.start));
        Ok(range.start)
    }

    /// Insert a new text node at a boundary, splitting a text node if needed.
    pub fn insert_text_at(&mut self, at: Boundary, data: &str) -> Result<NodeId, ReplacementError> {
        let order = self.preorder();
        self.point(&order, at)?;

        let existing = match self.kind(at.node) {
            Some(NodeKind::Text(text)) => Some(text.clone()),
            Some(NodeKind::Element { .. }) => None,
            _ => {
                return Err(ReplacementError::UnsupportedBoundary(format!(
                    "cannot insert text into node {}",
                    at.node
                )));
            }
        };

        let new_node = self.push(NodeKind::Text(data.to_string()));
        match existing {
            Some(text) => {
                let parent = self.parent(at.node).ok_or_else(|| {
                    ReplacementError::StaleRange(format!("text node {} has no parent", at.node))
                })?;
                let len = text.chars().count();
                self.set_text(at.node, char_slice(&text, 0, at.offset));

                let index = self.child_index(parent, at.node).unwrap_or(0);
                self.attach(parent, new_node, Some(index + 1));

                let tail = char_slice(&text, at.offset, len);
                if !tail.is_empty() {
                    let tail_node = self.push(NodeKind::Text(tail.to_string()));
                    self.attach(parent, tail_node, Some(index + 2));
                }
            }
            None => self.attach(at.node, new_node, Some(at.offset)),
        }
        Ok(new_node)
    }

    /// Collapse the selection to just after `node`.
    pub fn collapse_after(&mut self, node: NodeId) -> Result<Range, ReplacementError> {
        let parent = self
            .parent(node)
            .ok_or_else(|| ReplacementError::StaleRange(format!("node {} is detached", node)))?;
        let index = self.child_index(parent, node).unwrap_or(0);
        let range = Range::collapsed(Boundary::new(parent, index + 1));
        self.selection = Some(range);
        Ok(range)
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    fn points(&self, order: &[NodeId], range: &Range) -> Result<(Point, Point), ReplacementError> {
        let start = self.point(order, range.start)?;
        let end = self.point(order, range.end)?;
        if start > end {
            return Err(ReplacementError::StaleRange(
                "range end precedes its start".to_string(),
            ));
        }
        Ok((start, end))
    }

    /// Resolve a boundary to a document-order point.
    fn point(&self, order: &[NodeId], boundary: Boundary) -> Result<Point, ReplacementError> {
        let node = boundary.node;
        let data = self
            .nodes
            .get(node)
            .ok_or_else(|| ReplacementError::StaleRange(format!("node {} does not exist", node)))?;
        let position = order
            .iter()
            .position(|&n| n == node)
            .ok_or_else(|| ReplacementError::StaleRange(format!("node {} was removed", node)))?;

        match &data.kind {
            NodeKind::Text(text) => {
                let len = text.chars().count();
                if boundary.offset > len {
                    return Err(ReplacementError::StaleRange(format!(
                        "offset {} is past the end of node {} ({} chars)",
                        boundary.offset, node, len
                    )));
                }
                Ok((position, boundary.offset))
            }
            NodeKind::Element { .. } => {
                let children = &data.children;
                if boundary.offset > children.len() {
                    return Err(ReplacementError::StaleRange(format!(
                        "offset {} is past the children of node {}",
                        boundary.offset, node
                    )));
                }
                let next = match children.get(boundary.offset) {
                    Some(child) => order.iter().position(|n| n == child).unwrap_or(order.len()),
                    None => position + self.subtree_size(node),
                };
                Ok((next, 0))
            }
            NodeKind::Control { .. } => Err(ReplacementError::UnsupportedBoundary(format!(
                "node {} is a text control",
                node
            ))),
        }
    }

    fn subtree_size(&self, node: NodeId) -> usize {
        let mut size = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            size += 1;
            stack.extend(self.nodes[current].children.iter());
        }
        size
    }

    /// Non-text nodes whose whole subtree lies between two points.
    ///
    /// Ancestors of either boundary never qualify, since their subtree
    /// reaches outside the range.
    fn contained_subtrees(&self, order: &[NodeId], range: &Range, start: Point, end: Point) -> Vec<NodeId> {
        (start.0..end.0.min(order.len()))
            .map(|index| (index, order[index]))
            .filter(|&(index, node)| {
                node != range.start.node
                    && node != range.end.node
                    && self.text(node).is_none()
                    && index + self.subtree_size(node) <= end.0
            })
            .map(|(_, node)| node)
            .collect()
    }

    /// Text nodes between two points as `(preorder index, from, to)` spans.
    fn covered_text(&self, order: &[NodeId], start: Point, end: Point) -> Vec<(usize, usize, usize)> {
        let last = end.0.min(order.len().saturating_sub(1));
        (start.0..=last)
            .filter_map(|index| {
                let text = self.text(order[index])?;
                let len = text.chars().count();
                let from = if index == start.0 { start.1 } else { 0 };
                let to = if index == end.0 { end.1 } else { len };
                (from < to || index == start.0).then_some((index, from, to.max(from)))
            })
            .collect()
    }
}

/// Slice a string by character offsets, clamping to its length.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte = |offset: usize| {
        s.char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    };
    let (start, end) = (byte(start), byte(end));
    if start >= end { "" } else { &s[start..end] }
}

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
