use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    Angle, Layer, Length, Orientation, Path, Point, PositiveLength, Result, UnsignedLength,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free graphics polygon (board outline, documentation, copper fill, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPolygon {
    pub uuid: Uuid,
    pub layer: Layer,
    pub line_width: UnsignedLength,
    pub filled: bool,
    pub grab_area: bool,
    pub path: Path,
    pub locked: bool,
}

impl BoardPolygon {
    pub fn new(layer: Layer, line_width: UnsignedLength, filled: bool, path: Path) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            layer,
            line_width,
            filled,
            grab_area: filled,
            path,
            locked: false,
        }
    }
}

impl BoardItem for BoardPolygon {
    const KIND: ItemKind = ItemKind::Polygon;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.polygons
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.polygons
    }

    fn anchor(&self) -> Point {
        self.path.first().map(|v| v.pos).unwrap_or_default()
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn hit_test(&self, pos: &Point, tolerance: Length) -> bool {
        if (self.filled || self.grab_area) && self.path.is_closed() && self.path.contains(pos) {
            return true;
        }
        self.path
            .distance_to(pos)
            .is_some_and(|d| d.to_nm() <= self.line_width.to_nm() / 2 + tolerance.to_nm())
    }

    fn translate(&mut self, delta: Point) {
        self.path = self.path.translated(delta);
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.path = self.path.rotated(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, inner_layers: u8) {
        self.path = self.path.mirrored(orientation, center);
        self.layer = self.layer.mirrored(inner_layers);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.path = self.path.mapped_to_grid(grid);
    }

    fn validate(&self, _project: &Project) -> Result<()> {
        if self.path.is_empty() {
            return Err(ValidationError::InvalidGeometry {
                reason: "polygon has no vertices".into(),
            }
            .into());
        }
        Ok(())
    }
}
