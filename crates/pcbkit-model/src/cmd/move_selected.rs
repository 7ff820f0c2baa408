//! Moving, rotating and flipping a selection of board items

use super::item_edit::{edit_command_for, BoardItemEdit};
use crate::board::ItemRef;
use crate::project::Project;
use pcbkit_core::{Angle, Error, Orientation, Point, Result};
use pcbkit_undo::{UndoCommand, UndoCommandGroup};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Transform {
    Rotate(Angle, Point),
    Mirror(Orientation, Point),
}

/// Transforms all selected items as one undo step.
///
/// While the command is being built (e.g. during a drag) every change is
/// previewed on the board. On execution the per-item edits are collected in
/// a single group. Locked items are left where they are.
pub struct CmdMoveSelectedBoardItems {
    text: String,
    edits: Vec<Box<dyn BoardItemEdit>>,
    group: Option<UndoCommandGroup<Project>>,
    delta: Point,
    transforms: Vec<Transform>,
    inner_layers: u8,
}

impl CmdMoveSelectedBoardItems {
    pub fn new(doc: &Project, items: &[ItemRef]) -> Result<Self> {
        let mut edits = Vec::with_capacity(items.len());
        for item in items {
            let edit = edit_command_for(doc, *item)?;
            if !edit.is_locked() {
                edits.push(edit);
            }
        }
        debug!("Transforming {} of {} selected items", edits.len(), items.len());
        Ok(Self {
            text: "Move board items".to_string(),
            edits,
            group: None,
            delta: Point::default(),
            transforms: Vec::new(),
            inner_layers: doc.board().layer_stack().inner_layers(),
        })
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    /// Sets the translation relative to the original positions.
    pub fn set_delta(&mut self, delta: Point, doc: &mut Project) -> Result<()> {
        if delta == self.delta {
            return Ok(());
        }
        self.delta = delta;
        self.restage(doc)
    }

    pub fn rotate(&mut self, angle: Angle, center: Point, doc: &mut Project) -> Result<()> {
        // Transforms are replayed before the translation.
        self.transforms.push(Transform::Rotate(angle, center - self.delta));
        self.restage(doc)
    }

    pub fn mirror(&mut self, orientation: Orientation, center: Point, doc: &mut Project) -> Result<()> {
        self.transforms
            .push(Transform::Mirror(orientation, center - self.delta));
        self.restage(doc)
    }

    /// Reverts all previews of a command that will not be executed.
    pub fn discard(&mut self, doc: &mut Project) -> Result<()> {
        for edit in self.edits.iter_mut().rev() {
            edit.discard_preview(doc)?;
        }
        Ok(())
    }

    fn restage(&mut self, doc: &mut Project) -> Result<()> {
        for edit in &mut self.edits {
            edit.reset_staged();
            for transform in &self.transforms {
                match *transform {
                    Transform::Rotate(angle, center) => edit.rotate_staged(angle, center),
                    Transform::Mirror(orientation, center) => {
                        edit.mirror_staged(orientation, center, self.inner_layers)
                    }
                }
            }
            edit.translate_staged(self.delta);
            edit.preview(doc)?;
        }
        Ok(())
    }
}

impl UndoCommand<Project> for CmdMoveSelectedBoardItems {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        // Previews are reverted first so that a failing child leaves nothing
        // behind once the group has been rolled back.
        self.discard(doc)?;
        let mut group = UndoCommandGroup::open(self.text.clone());
        for edit in self.edits.drain(..) {
            if let Err(err) = group.append_child(edit, doc) {
                group.perform_undo(doc)?;
                return Err(err);
            }
        }
        group.close();
        let modified = group.was_modified();
        self.group = Some(group);
        Ok(modified)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        self.group
            .as_mut()
            .ok_or_else(|| Error::logic("Move command was never executed"))?
            .perform_undo(doc)
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.group
            .as_mut()
            .ok_or_else(|| Error::logic("Move command was never executed"))?
            .perform_redo(doc)
    }
}
