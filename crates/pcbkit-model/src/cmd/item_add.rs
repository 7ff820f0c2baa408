//! Adding and removing board items

use crate::board::{
    BoardDevice, BoardHole, BoardItem, BoardNetLine, BoardPlane, BoardPolygon, BoardStrokeText,
    BoardVia, BoardZone, ItemRef,
};
use crate::project::{ChangeKind, ItemKind, Project, ProjectEvent};
use pcbkit_core::{Error, Result};
use pcbkit_undo::UndoCommand;
use uuid::Uuid;

/// Adds an item to its board collection.
///
/// The command owns the item until it is executed and again after it is
/// undone, so an abandoned command simply drops it.
pub struct CmdBoardItemAdd<T: BoardItem> {
    text: String,
    uuid: Uuid,
    item: Option<T>,
    index: Option<usize>,
}

impl<T: BoardItem> CmdBoardItemAdd<T> {
    pub fn new(item: T) -> Self {
        Self {
            text: format!("Add {}", T::KIND.to_string().to_lowercase()),
            uuid: item.uuid(),
            item: Some(item),
            index: None,
        }
    }

    /// Inserts at `index` instead of appending.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn insert(&mut self, doc: &mut Project) -> Result<()> {
        let item = self
            .item
            .take()
            .ok_or_else(|| Error::logic(format!("{} {} is already on the board", T::KIND, self.uuid)))?;
        let index = self.index.unwrap_or_else(|| doc.board().items::<T>().len());
        doc.board_mut().insert_item(index, item);
        self.index = Some(index);
        doc.notify(ProjectEvent::new(T::KIND, self.uuid, ChangeKind::Added));
        Ok(())
    }
}

impl<T: BoardItem> UndoCommand<Project> for CmdBoardItemAdd<T> {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        if let Some(item) = &self.item {
            item.validate(doc)?;
        }
        self.insert(doc)?;
        Ok(true)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        let (index, item) = doc
            .board_mut()
            .remove_item::<T>(self.uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), self.uuid))?;
        self.index = Some(index);
        self.item = Some(item);
        doc.notify(ProjectEvent::new(T::KIND, self.uuid, ChangeKind::Removed));
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.insert(doc)
    }
}

/// Removes an item from its board collection.
///
/// While executed the command owns the removed item and remembers its index
/// so that undo restores the original order.
pub struct CmdBoardItemRemove<T: BoardItem> {
    text: String,
    uuid: Uuid,
    removed: Option<(usize, T)>,
}

impl<T: BoardItem> CmdBoardItemRemove<T> {
    pub fn new(uuid: Uuid) -> Self {
        Self {
            text: format!("Remove {}", T::KIND.to_string().to_lowercase()),
            uuid,
            removed: None,
        }
    }

    fn remove(&mut self, doc: &mut Project) -> Result<()> {
        let removed = doc
            .board_mut()
            .remove_item::<T>(self.uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), self.uuid))?;
        self.removed = Some(removed);
        doc.notify(ProjectEvent::new(T::KIND, self.uuid, ChangeKind::Removed));
        Ok(())
    }
}

impl<T: BoardItem> UndoCommand<Project> for CmdBoardItemRemove<T> {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        self.remove(doc)?;
        Ok(true)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        let (index, item) = self
            .removed
            .take()
            .ok_or_else(|| Error::logic(format!("{} {} was not removed", T::KIND, self.uuid)))?;
        doc.board_mut().insert_item(index, item);
        doc.notify(ProjectEvent::new(T::KIND, self.uuid, ChangeKind::Added));
        Ok(())
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.remove(doc)
    }
}

/// Builds the remove command matching the kind of `item`.
pub fn remove_command_for(item: ItemRef) -> Result<Box<dyn UndoCommand<Project>>> {
    let uuid = item.uuid;
    Ok(match item.kind {
        ItemKind::Hole => Box::new(CmdBoardItemRemove::<BoardHole>::new(uuid)),
        ItemKind::Via => Box::new(CmdBoardItemRemove::<BoardVia>::new(uuid)),
        ItemKind::Polygon => Box::new(CmdBoardItemRemove::<BoardPolygon>::new(uuid)),
        ItemKind::Plane => Box::new(CmdBoardItemRemove::<BoardPlane>::new(uuid)),
        ItemKind::Zone => Box::new(CmdBoardItemRemove::<BoardZone>::new(uuid)),
        ItemKind::StrokeText => Box::new(CmdBoardItemRemove::<BoardStrokeText>::new(uuid)),
        ItemKind::Device => Box::new(CmdBoardItemRemove::<BoardDevice>::new(uuid)),
        ItemKind::NetLine => Box::new(CmdBoardItemRemove::<BoardNetLine>::new(uuid)),
        other => {
            return Err(Error::logic(format!("{} is not a board item", other)));
        }
    })
}
