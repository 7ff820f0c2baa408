//! Command groups
//!
//! A group is an ordered composite of commands which is executed, undone and
//! redone as a unit. Groups implement [`UndoCommand`] themselves, so they nest.

use crate::command::{TrackedCommand, UndoCommand};
use pcbkit_core::{Error, Result};
use tracing::{debug, error};

/// Ordered composite of commands.
///
/// A group created with [`UndoCommandGroup::open`] is a live transaction:
/// it counts as executed from the start and every appended child is executed
/// immediately. A group created with [`UndoCommandGroup::new`] collects
/// children and runs them all in [`perform_execute`](UndoCommand::perform_execute).
pub struct UndoCommandGroup<D> {
    text: String,
    children: Vec<TrackedCommand<D>>,
    executed: bool,
    closed: bool,
    modified: bool,
}

impl<D> UndoCommandGroup<D> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
            executed: false,
            closed: false,
            modified: false,
        }
    }

    /// Creates a live transaction group.
    pub fn open(text: impl Into<String>) -> Self {
        Self {
            executed: true,
            ..Self::new(text)
        }
    }

    /// Appends a child command.
    ///
    /// If the group has already been executed the child is executed right
    /// away and only added on success. Returns whether the child changed the
    /// document (always `false` for a deferred child).
    pub fn append_child<C>(&mut self, cmd: C, doc: &mut D) -> Result<bool>
    where
        C: UndoCommand<D> + 'static,
    {
        if self.closed {
            return Err(Error::logic(format!(
                "Cannot append '{}' to closed group '{}'",
                cmd.text(),
                self.text
            )));
        }
        let mut child = TrackedCommand::new(cmd);
        if !self.executed {
            self.children.push(child);
            return Ok(false);
        }
        let changed = child.execute(doc)?;
        self.modified |= changed;
        self.children.push(child);
        Ok(changed)
    }

    /// Closes the group; no more children can be appended.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether any executed child reported a change.
    pub fn was_modified(&self) -> bool {
        self.modified
    }

    pub fn children(&self) -> impl Iterator<Item = &TrackedCommand<D>> {
        self.children.iter()
    }

    fn corrupted(&self, operation: &'static str, err: Error) -> Error {
        match err {
            e @ Error::HistoryCorrupted { .. } => e,
            other => {
                error!("Failed to {} '{}': {}", operation, self.text, other);
                Error::HistoryCorrupted {
                    operation,
                    text: self.text.clone(),
                    reason: other.to_string(),
                }
            }
        }
    }
}

impl<D> UndoCommand<D> for UndoCommandGroup<D> {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, doc: &mut D) -> Result<bool> {
        if self.executed {
            return Err(Error::logic(format!(
                "Group '{}' was already executed",
                self.text
            )));
        }
        let mut modified = false;
        for i in 0..self.children.len() {
            match self.children[i].execute(doc) {
                Ok(changed) => modified |= changed,
                Err(err) => {
                    debug!(
                        "Child '{}' of group '{}' failed, rolling back {} children",
                        self.children[i].text(),
                        self.text,
                        i
                    );
                    for done in self.children[..i].iter_mut().rev() {
                        if let Err(undo_err) = done.undo(doc) {
                            error!(
                                "Rollback of '{}' in group '{}' failed: {}",
                                done.text(),
                                self.text,
                                undo_err
                            );
                        }
                    }
                    return Err(err);
                }
            }
        }
        self.executed = true;
        self.modified = modified;
        Ok(modified)
    }

    fn perform_undo(&mut self, doc: &mut D) -> Result<()> {
        for i in (0..self.children.len()).rev() {
            if let Err(err) = self.children[i].undo(doc) {
                return Err(self.corrupted("undo", err));
            }
        }
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut D) -> Result<()> {
        for i in 0..self.children.len() {
            if let Err(err) = self.children[i].redo(doc) {
                return Err(self.corrupted("redo", err));
            }
        }
        Ok(())
    }
}

impl<D> std::fmt::Debug for UndoCommandGroup<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoCommandGroup")
            .field("text", &self.text)
            .field("children", &self.children.len())
            .field("closed", &self.closed)
            .field("modified", &self.modified)
            .finish()
    }
}
