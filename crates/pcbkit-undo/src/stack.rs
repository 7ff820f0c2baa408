//! Undo stack
//!
//! Linear history of committed command groups with a cursor, plus at most one
//! open transaction. Every mutation of a document goes through a transaction:
//!
//! ```text
//! begin_cmd_group -> append_to_cmd_group* -> commit_cmd_group | abort_cmd_group
//! ```

use crate::command::UndoCommand;
use crate::group::UndoCommandGroup;
use chrono::{DateTime, Utc};
use pcbkit_core::{Error, Result};
use serde::Serialize;
use tracing::{debug, error, info};

/// One committed transaction
pub struct HistoryEntry<D> {
    group: UndoCommandGroup<D>,
    committed_at: DateTime<Utc>,
}

impl<D> HistoryEntry<D> {
    pub fn text(&self) -> &str {
        self.group.text()
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    pub fn child_count(&self) -> usize {
        self.group.child_count()
    }
}

/// Serializable summary of an undo stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoStackState {
    pub count: usize,
    pub current_index: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_text: Option<String>,
    pub redo_text: Option<String>,
    pub clean: bool,
    pub command_group_active: bool,
}

/// Transactional undo/redo history for a document of type `D`
pub struct UndoStack<D> {
    entries: Vec<HistoryEntry<D>>,
    /// Number of entries currently applied to the document.
    current_index: usize,
    active: Option<UndoCommandGroup<D>>,
    clean_index: Option<usize>,
    /// Maximum number of entries kept, 0 means unlimited.
    max_depth: usize,
    corrupted: bool,
}

impl<D> UndoStack<D> {
    pub fn new() -> Self {
        Self::with_max_depth(0)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_index: 0,
            active: None,
            clean_index: Some(0),
            max_depth,
            corrupted: false,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of entries in the history, including undone ones.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry<D>> {
        self.entries.iter()
    }

    pub fn is_command_group_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_group_text(&self) -> Option<&str> {
        self.active.as_ref().map(|g| g.text())
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0 && self.active.is_none() && !self.corrupted
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.entries.len() && self.active.is_none() && !self.corrupted
    }

    pub fn undo_text(&self) -> Option<&str> {
        if self.current_index == 0 {
            return None;
        }
        self.entries.get(self.current_index - 1).map(|e| e.text())
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.entries.get(self.current_index).map(|e| e.text())
    }

    /// Marks the current position as the saved state.
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.current_index);
    }

    pub fn is_clean(&self) -> bool {
        self.active.is_none() && self.clean_index == Some(self.current_index)
    }

    /// Opens a new transaction.
    pub fn begin_cmd_group(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        if let Some(active) = &self.active {
            return Err(Error::logic(format!(
                "Cannot begin '{}': group '{}' is still open",
                text,
                active.text()
            )));
        }
        debug!("Begin command group '{}'", text);
        self.active = Some(UndoCommandGroup::open(text));
        Ok(())
    }

    /// Executes `cmd` and appends it to the open transaction.
    ///
    /// A failing command is not appended; the transaction stays open.
    pub fn append_to_cmd_group<C>(&mut self, cmd: C, doc: &mut D) -> Result<bool>
    where
        C: UndoCommand<D> + 'static,
    {
        match self.active.as_mut() {
            Some(group) => group.append_child(cmd, doc),
            None => Err(Error::logic(format!(
                "Cannot append '{}': no command group is open",
                cmd.text()
            ))),
        }
    }

    /// Closes the open transaction and records it.
    ///
    /// Returns `false` if the transaction did not change the document, in
    /// which case it is discarded and the history is left untouched.
    pub fn commit_cmd_group(&mut self) -> Result<bool> {
        let mut group = self
            .active
            .take()
            .ok_or_else(|| Error::logic("Cannot commit: no command group is open"))?;
        group.close();
        if !group.was_modified() {
            debug!("Discard unmodified command group '{}'", group.text());
            return Ok(false);
        }
        debug!("Commit command group '{}'", group.text());

        // A new branch discards everything after the cursor.
        self.entries.truncate(self.current_index);
        if matches!(self.clean_index, Some(c) if c > self.current_index) {
            self.clean_index = None;
        }
        self.entries.push(HistoryEntry {
            group,
            committed_at: Utc::now(),
        });
        self.current_index += 1;

        if self.max_depth > 0 && self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(..excess);
            self.current_index -= excess;
            self.clean_index = self.clean_index.and_then(|c| c.checked_sub(excess));
            debug!("Evicted {} undo history entries", excess);
        }
        Ok(true)
    }

    /// Reverts and discards the open transaction.
    pub fn abort_cmd_group(&mut self, doc: &mut D) -> Result<()> {
        let mut group = self
            .active
            .take()
            .ok_or_else(|| Error::logic("Cannot abort: no command group is open"))?;
        debug!("Abort command group '{}'", group.text());
        group.close();
        group.perform_undo(doc)
    }

    /// Executes a single command as its own transaction.
    pub fn exec_cmd<C>(&mut self, cmd: C, doc: &mut D) -> Result<bool>
    where
        C: UndoCommand<D> + 'static,
    {
        self.begin_cmd_group(cmd.text().to_string())?;
        if let Err(err) = self.append_to_cmd_group(cmd, doc) {
            self.abort_cmd_group(doc)?;
            return Err(err);
        }
        self.commit_cmd_group()
    }

    /// Undoes the last applied entry; does nothing at the start of history.
    pub fn undo(&mut self, doc: &mut D) -> Result<()> {
        self.check_replay("undo")?;
        if self.current_index == 0 {
            return Ok(());
        }
        let entry = &mut self.entries[self.current_index - 1];
        info!("Undo '{}'", entry.text());
        if let Err(err) = entry.group.perform_undo(doc) {
            self.corrupted = true;
            error!("Undo stack is corrupted: {}", err);
            return Err(err);
        }
        self.current_index -= 1;
        Ok(())
    }

    /// Redoes the next entry; does nothing at the head of history.
    pub fn redo(&mut self, doc: &mut D) -> Result<()> {
        self.check_replay("redo")?;
        if self.current_index >= self.entries.len() {
            return Ok(());
        }
        let entry = &mut self.entries[self.current_index];
        info!("Redo '{}'", entry.text());
        if let Err(err) = entry.group.perform_redo(doc) {
            self.corrupted = true;
            error!("Undo stack is corrupted: {}", err);
            return Err(err);
        }
        self.current_index += 1;
        Ok(())
    }

    /// Drops the whole history.
    pub fn clear(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Err(Error::logic("Cannot clear undo stack while a group is open"));
        }
        self.entries.clear();
        self.current_index = 0;
        self.clean_index = Some(0);
        self.corrupted = false;
        Ok(())
    }

    pub fn snapshot(&self) -> UndoStackState {
        UndoStackState {
            count: self.count(),
            current_index: self.current_index,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_text: self.undo_text().map(str::to_string),
            redo_text: self.redo_text().map(str::to_string),
            clean: self.is_clean(),
            command_group_active: self.is_command_group_active(),
        }
    }

    fn check_replay(&self, operation: &'static str) -> Result<()> {
        if let Some(active) = &self.active {
            return Err(Error::logic(format!(
                "Cannot {} while group '{}' is open",
                operation,
                active.text()
            )));
        }
        if self.corrupted {
            return Err(Error::HistoryCorrupted {
                operation,
                text: String::new(),
                reason: "a previous undo/redo failed".to_string(),
            });
        }
        Ok(())
    }
}

impl<D> Default for UndoStack<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Drop for UndoStack<D> {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            error!(
                "Undo stack dropped with open command group '{}'",
                active.text()
            );
        }
    }
}

impl<D> std::fmt::Debug for UndoStack<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoStack")
            .field("count", &self.entries.len())
            .field("current_index", &self.current_index)
            .field("active", &self.active_group_text())
            .field("corrupted", &self.corrupted)
            .finish()
    }
}
