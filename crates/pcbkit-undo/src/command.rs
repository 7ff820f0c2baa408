//! Command contract
//!
//! An [`UndoCommand`] is the atomic unit of reversible mutation of a document
//! of type `D`. Commands are never driven directly; they are wrapped in a
//! [`TrackedCommand`] which enforces the execute/undo/redo lifecycle.

use pcbkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A reversible mutation of a document.
///
/// Implementors capture everything needed to reverse themselves when
/// constructed or during [`perform_execute`](UndoCommand::perform_execute).
pub trait UndoCommand<D> {
    /// Human readable description, shown in undo/redo menus.
    fn text(&self) -> &str;

    /// Performs the mutation for the first time.
    ///
    /// Returns whether the document actually changed. On error the document
    /// must be left untouched.
    fn perform_execute(&mut self, doc: &mut D) -> Result<bool>;

    /// Reverses the last execute or redo.
    fn perform_undo(&mut self, doc: &mut D) -> Result<()>;

    /// Reapplies the mutation after an undo.
    fn perform_redo(&mut self, doc: &mut D) -> Result<()>;
}

impl<D, C: UndoCommand<D> + ?Sized> UndoCommand<D> for Box<C> {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn perform_execute(&mut self, doc: &mut D) -> Result<bool> {
        (**self).perform_execute(doc)
    }

    fn perform_undo(&mut self, doc: &mut D) -> Result<()> {
        (**self).perform_undo(doc)
    }

    fn perform_redo(&mut self, doc: &mut D) -> Result<()> {
        (**self).perform_redo(doc)
    }
}

/// Lifecycle state of a tracked command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandState {
    NotExecuted,
    Executed,
    Undone,
}

/// A command together with its lifecycle state.
pub struct TrackedCommand<D> {
    inner: Box<dyn UndoCommand<D>>,
    state: CommandState,
    was_ever_executed: bool,
    redo_count: usize,
}

impl<D> TrackedCommand<D> {
    pub fn new<C>(cmd: C) -> Self
    where
        C: UndoCommand<D> + 'static,
    {
        Self::from_boxed(Box::new(cmd))
    }

    pub fn from_boxed(inner: Box<dyn UndoCommand<D>>) -> Self {
        Self {
            inner,
            state: CommandState::NotExecuted,
            was_ever_executed: false,
            redo_count: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }

    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn was_ever_executed(&self) -> bool {
        self.was_ever_executed
    }

    /// Number of successful redo calls.
    pub fn redo_count(&self) -> usize {
        self.redo_count
    }

    /// Executes the command for the first time.
    pub fn execute(&mut self, doc: &mut D) -> Result<bool> {
        if self.state != CommandState::NotExecuted {
            return Err(Error::logic(format!(
                "Cannot execute '{}' in state {:?}",
                self.text(),
                self.state
            )));
        }
        debug!("Execute command '{}'", self.text());
        let changed = self.inner.perform_execute(doc)?;
        self.state = CommandState::Executed;
        self.was_ever_executed = true;
        Ok(changed)
    }

    pub fn undo(&mut self, doc: &mut D) -> Result<()> {
        if self.state != CommandState::Executed {
            return Err(Error::logic(format!(
                "Cannot undo '{}' in state {:?}",
                self.text(),
                self.state
            )));
        }
        debug!("Undo command '{}'", self.text());
        self.inner.perform_undo(doc)?;
        self.state = CommandState::Undone;
        Ok(())
    }

    pub fn redo(&mut self, doc: &mut D) -> Result<()> {
        if self.state != CommandState::Undone {
            return Err(Error::logic(format!(
                "Cannot redo '{}' in state {:?}",
                self.text(),
                self.state
            )));
        }
        debug!("Redo command '{}'", self.text());
        self.inner.perform_redo(doc)?;
        self.state = CommandState::Executed;
        self.redo_count += 1;
        Ok(())
    }
}

impl<D> std::fmt::Debug for TrackedCommand<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedCommand")
            .field("text", &self.text())
            .field("state", &self.state)
            .finish()
    }
}
