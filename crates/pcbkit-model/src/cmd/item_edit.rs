//! Editing board items
//!
//! [`CmdBoardItemEdit`] keeps a snapshot of the item before and after the
//! edit. Setters only stage the new state unless `immediate` is set, in which
//! case the board is updated right away as an unrecorded preview. A preview
//! that is never executed must be reverted with [`CmdBoardItemEdit::discard`].

use crate::board::{
    BoardDevice, BoardHole, BoardItem, BoardNetLine, BoardPlane, BoardPolygon, BoardStrokeText,
    BoardVia, BoardZone, ItemRef, TextAlign, ZoneRules,
};
use crate::project::{ChangeKind, ItemKind, Project, ProjectEvent};
use pcbkit_core::{
    Angle, Error, Layer, Orientation, Path, Point, PositiveLength, Result, UnsignedLength,
};
use pcbkit_undo::UndoCommand;
use std::collections::BTreeSet;
use uuid::Uuid;

pub struct CmdBoardItemEdit<T: BoardItem> {
    text: String,
    old: T,
    new: T,
    previewed: bool,
}

impl<T: BoardItem> CmdBoardItemEdit<T> {
    pub fn new(doc: &Project, uuid: Uuid) -> Result<Self> {
        let item = doc
            .board()
            .item::<T>(uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), uuid))?;
        Ok(Self::from_item(item))
    }

    pub fn from_item(item: &T) -> Self {
        Self {
            text: format!("Edit {}", T::KIND.name().to_lowercase()),
            old: item.clone(),
            new: item.clone(),
            previewed: false,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.old.uuid()
    }

    pub fn old_item(&self) -> &T {
        &self.old
    }

    pub fn new_item(&self) -> &T {
        &self.new
    }

    /// Forgets all staged changes; the board is not touched.
    pub fn reset(&mut self) {
        self.new = self.old.clone();
    }

    pub fn translate(&mut self, delta: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |item| item.translate(delta))
    }

    pub fn rotate(
        &mut self,
        angle: Angle,
        center: Point,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |item| item.rotate(angle, center))
    }

    pub fn mirror(
        &mut self,
        orientation: Orientation,
        center: Point,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        let inner = doc.board().layer_stack().inner_layers();
        self.modify(immediate, doc, |item| item.mirror(orientation, center, inner))
    }

    pub fn snap_to_grid(
        &mut self,
        grid: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |item| item.snap_to_grid(grid))
    }

    /// Writes the staged state to the board without recording it.
    pub fn apply_preview(&mut self, doc: &mut Project) -> Result<()> {
        let uuid = self.uuid();
        let slot = doc
            .board_mut()
            .item_mut::<T>(uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), uuid))?;
        let changed = *slot != self.new;
        if changed {
            *slot = self.new.clone();
        }
        self.previewed = true;
        if changed {
            doc.notify(ProjectEvent::new(T::KIND, uuid, ChangeKind::Previewed));
        }
        Ok(())
    }

    /// Reverts an applied preview. Safe to call repeatedly.
    pub fn discard(&mut self, doc: &mut Project) -> Result<()> {
        if !self.previewed {
            return Ok(());
        }
        self.previewed = false;
        let uuid = self.uuid();
        let Some(slot) = doc.board_mut().item_mut::<T>(uuid) else {
            // The item is already gone, e.g. its add command was aborted.
            return Ok(());
        };
        if *slot != self.old {
            *slot = self.old.clone();
            doc.notify(ProjectEvent::new(T::KIND, uuid, ChangeKind::Previewed));
        }
        Ok(())
    }

    fn modify(
        &mut self,
        immediate: bool,
        doc: &mut Project,
        f: impl FnOnce(&mut T),
    ) -> Result<()> {
        f(&mut self.new);
        if immediate {
            self.apply_preview(doc)?;
        }
        Ok(())
    }

    fn write(&self, doc: &mut Project, state: &T) -> Result<()> {
        let uuid = self.uuid();
        let slot = doc
            .board_mut()
            .item_mut::<T>(uuid)
            .ok_or_else(|| Error::not_found(T::KIND.name(), uuid))?;
        *slot = state.clone();
        if self.old != self.new {
            doc.notify(ProjectEvent::new(T::KIND, uuid, ChangeKind::Edited));
        }
        Ok(())
    }
}

impl<T: BoardItem> UndoCommand<Project> for CmdBoardItemEdit<T> {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, doc: &mut Project) -> Result<bool> {
        self.new.validate(doc)?;
        self.write(doc, &self.new)?;
        self.previewed = false;
        Ok(self.old != self.new)
    }

    fn perform_undo(&mut self, doc: &mut Project) -> Result<()> {
        self.write(doc, &self.old)
    }

    fn perform_redo(&mut self, doc: &mut Project) -> Result<()> {
        self.write(doc, &self.new)
    }
}

impl CmdBoardItemEdit<BoardHole> {
    pub fn set_position(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |h| h.position = pos)
    }

    pub fn set_diameter(
        &mut self,
        diameter: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |h| h.diameter = diameter)
    }

    pub fn set_locked(&mut self, locked: bool, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |h| h.locked = locked)
    }
}

impl CmdBoardItemEdit<BoardVia> {
    pub fn set_position(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |v| v.position = pos)
    }

    pub fn set_size(
        &mut self,
        size: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |v| v.size = size)
    }

    pub fn set_drill(
        &mut self,
        drill: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |v| v.drill = drill)
    }

    pub fn set_net_signal(
        &mut self,
        net: Option<Uuid>,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |v| v.net_signal = net)
    }
}

impl CmdBoardItemEdit<BoardPolygon> {
    pub fn set_path(&mut self, path: Path, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |p| p.path = path)
    }

    pub fn set_layer(&mut self, layer: Layer, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |p| p.layer = layer)
    }

    pub fn set_line_width(
        &mut self,
        width: UnsignedLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |p| p.line_width = width)
    }

    pub fn set_filled(&mut self, filled: bool, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |p| p.filled = filled)
    }

    pub fn set_grab_area(
        &mut self,
        grab_area: bool,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |p| p.grab_area = grab_area)
    }
}

impl CmdBoardItemEdit<BoardPlane> {
    pub fn set_outline(&mut self, outline: Path, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |p| p.outline = outline)
    }

    pub fn set_layer(&mut self, layer: Layer, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |p| p.layer = layer)
    }

    pub fn set_net_signal(
        &mut self,
        net: Option<Uuid>,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |p| p.net_signal = net)
    }

    pub fn set_min_width(
        &mut self,
        width: UnsignedLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |p| p.min_width = width)
    }

    pub fn set_keep_orphans(
        &mut self,
        keep: bool,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |p| p.keep_orphans = keep)
    }
}

impl CmdBoardItemEdit<BoardZone> {
    pub fn set_outline(&mut self, outline: Path, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |z| z.outline = outline)
    }

    pub fn set_layers(
        &mut self,
        layers: BTreeSet<Layer>,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |z| z.layers = layers)
    }

    pub fn set_rules(&mut self, rules: ZoneRules, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |z| z.rules = rules)
    }
}

impl CmdBoardItemEdit<BoardStrokeText> {
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        let text = text.into();
        self.modify(immediate, doc, |t| t.text = text)
    }

    pub fn set_position(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |t| t.position = pos)
    }

    pub fn set_rotation(&mut self, angle: Angle, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |t| t.rotation = angle.mapped_to_0_360())
    }

    pub fn set_height(
        &mut self,
        height: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |t| t.height = height)
    }

    pub fn set_stroke_width(
        &mut self,
        width: UnsignedLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |t| t.stroke_width = width)
    }

    pub fn set_layer(&mut self, layer: Layer, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |t| t.layer = layer)
    }

    pub fn set_mirrored(&mut self, mirrored: bool, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |t| t.mirrored = mirrored)
    }

    pub fn set_align(&mut self, align: TextAlign, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |t| t.align = align)
    }
}

impl CmdBoardItemEdit<BoardDevice> {
    pub fn set_position(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |d| d.position = pos)
    }

    pub fn set_rotation(&mut self, angle: Angle, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |d| d.rotation = angle.mapped_to_0_360())
    }

    pub fn set_mirrored(&mut self, mirrored: bool, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |d| d.mirrored = mirrored)
    }

    pub fn set_locked(&mut self, locked: bool, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |d| d.locked = locked)
    }
}

impl CmdBoardItemEdit<BoardNetLine> {
    pub fn set_start(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |l| l.start = pos)
    }

    pub fn set_end(&mut self, pos: Point, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |l| l.end = pos)
    }

    pub fn set_layer(&mut self, layer: Layer, immediate: bool, doc: &mut Project) -> Result<()> {
        self.modify(immediate, doc, |l| l.layer = layer)
    }

    pub fn set_width(
        &mut self,
        width: PositiveLength,
        immediate: bool,
        doc: &mut Project,
    ) -> Result<()> {
        self.modify(immediate, doc, |l| l.width = width)
    }
}

/// Kind-erased view of a [`CmdBoardItemEdit`], used by commands that edit a
/// heterogeneous selection.
pub trait BoardItemEdit: UndoCommand<Project> {
    fn item(&self) -> ItemRef;
    fn is_locked(&self) -> bool;
    fn reset_staged(&mut self);
    fn translate_staged(&mut self, delta: Point);
    fn rotate_staged(&mut self, angle: Angle, center: Point);
    fn mirror_staged(&mut self, orientation: Orientation, center: Point, inner_layers: u8);
    fn snap_staged(&mut self, grid: PositiveLength);
    fn set_locked_staged(&mut self, locked: bool);
    fn preview(&mut self, doc: &mut Project) -> Result<()>;
    fn discard_preview(&mut self, doc: &mut Project) -> Result<()>;
}

impl<T: BoardItem> BoardItemEdit for CmdBoardItemEdit<T> {
    fn item(&self) -> ItemRef {
        ItemRef::of(&self.old)
    }

    fn is_locked(&self) -> bool {
        self.old.is_locked()
    }

    fn reset_staged(&mut self) {
        CmdBoardItemEdit::reset(self)
    }

    fn translate_staged(&mut self, delta: Point) {
        self.new.translate(delta);
    }

    fn rotate_staged(&mut self, angle: Angle, center: Point) {
        self.new.rotate(angle, center);
    }

    fn mirror_staged(&mut self, orientation: Orientation, center: Point, inner_layers: u8) {
        self.new.mirror(orientation, center, inner_layers);
    }

    fn snap_staged(&mut self, grid: PositiveLength) {
        self.new.snap_to_grid(grid);
    }

    fn set_locked_staged(&mut self, locked: bool) {
        self.new.set_locked(locked);
    }

    fn preview(&mut self, doc: &mut Project) -> Result<()> {
        CmdBoardItemEdit::apply_preview(self, doc)
    }

    fn discard_preview(&mut self, doc: &mut Project) -> Result<()> {
        CmdBoardItemEdit::discard(self, doc)
    }
}

/// Builds an edit command for the item behind `item`.
pub fn edit_command_for(doc: &Project, item: ItemRef) -> Result<Box<dyn BoardItemEdit>> {
    let uuid = item.uuid;
    Ok(match item.kind {
        ItemKind::Hole => Box::new(CmdBoardItemEdit::<BoardHole>::new(doc, uuid)?),
        ItemKind::Via => Box::new(CmdBoardItemEdit::<BoardVia>::new(doc, uuid)?),
        ItemKind::Polygon => Box::new(CmdBoardItemEdit::<BoardPolygon>::new(doc, uuid)?),
        ItemKind::Plane => Box::new(CmdBoardItemEdit::<BoardPlane>::new(doc, uuid)?),
        ItemKind::Zone => Box::new(CmdBoardItemEdit::<BoardZone>::new(doc, uuid)?),
        ItemKind::StrokeText => Box::new(CmdBoardItemEdit::<BoardStrokeText>::new(doc, uuid)?),
        ItemKind::Device => Box::new(CmdBoardItemEdit::<BoardDevice>::new(doc, uuid)?),
        ItemKind::NetLine => Box::new(CmdBoardItemEdit::<BoardNetLine>::new(doc, uuid)?),
        other => return Err(Error::logic(format!("{} is not a board item", other))),
    })
}
