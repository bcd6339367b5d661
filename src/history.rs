use crate::scene::graph::NodeId;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDirection {
    Back,
    Forward,
}

/// Bounded back/forward list of past selections.
///
/// Recording after stepping back discards the forward entries, like a browser history. Recording
/// the selection the cursor already points at is a no-op, so a host echoing a selection it was
/// just told to apply does not grow the list.
#[derive(Clone, Debug)]
pub struct SelectionHistory {
    entries: Vec<Vec<NodeId>>,
    cursor: usize,
    capacity: usize,
}

impl Default for SelectionHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SelectionHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, selection: &[NodeId]) {
        if selection.is_empty() || self.current() == Some(selection) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(selection.to_vec());
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    pub fn current(&self) -> Option<&[NodeId]> {
        self.entries.get(self.cursor).map(Vec::as_slice)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Move the cursor one entry and return the selection found there.
    pub fn step(&mut self, dir: HistoryDirection) -> Option<Vec<NodeId>> {
        match dir {
            HistoryDirection::Back if self.can_go_back() => self.cursor -= 1,
            HistoryDirection::Forward if self.can_go_forward() => self.cursor += 1,
            _ => return None,
        }
        self.current().map(<[NodeId]>::to_vec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
