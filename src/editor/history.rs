//! Linear undo history with a cursor.

/// Ordered snapshots plus the index of the one currently displayed.
///
/// Invariant: when non-empty, `cursor < entries.len()`. Committing after an
/// undo drops every entry past the cursor; there is no redo.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Truncates to `[0, cursor]`, appends `entry` and moves the cursor onto it.
    pub fn commit(&mut self, entry: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Steps the cursor back and returns the entry now displayed.
    ///
    /// Returns `None` (and changes nothing) at the first entry or when empty.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }
}
