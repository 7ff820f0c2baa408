//! # pcbkit Undo
//!
//! Transactional undo/redo engine. Generic over the document type, so it has
//! no knowledge of boards or projects.
//!
//! - [`UndoCommand`]: one reversible mutation
//! - [`UndoCommandGroup`]: ordered composite, executed and rolled back as a unit
//! - [`UndoStack`]: linear history with at most one open transaction

pub mod command;
pub mod group;
pub mod stack;

pub use command::{CommandState, TrackedCommand, UndoCommand};
pub use group::UndoCommandGroup;
pub use stack::{HistoryEntry, UndoStack, UndoStackState};
