use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    Angle, Error, Layer, Length, Orientation, Path, Point, PositiveLength, Result,
    UnsignedLength, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Copper fill area connected to a net
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPlane {
    pub uuid: Uuid,
    pub layer: Layer,
    pub net_signal: Option<Uuid>,
    pub outline: Path,
    pub min_width: UnsignedLength,
    pub keep_orphans: bool,
    pub locked: bool,
}

impl BoardPlane {
    pub fn new(layer: Layer, net_signal: Option<Uuid>, outline: Path) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            layer,
            net_signal,
            outline,
            min_width: UnsignedLength::zero(),
            keep_orphans: false,
            locked: false,
        }
    }
}

impl BoardItem for BoardPlane {
    const KIND: ItemKind = ItemKind::Plane;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.planes
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.planes
    }

    fn anchor(&self) -> Point {
        self.outline.first().map(|v| v.pos).unwrap_or_default()
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn hit_test(&self, pos: &Point, tolerance: Length) -> bool {
        // Planes are only grabbed at their outline so items inside stay reachable.
        self.outline
            .distance_to(pos)
            .is_some_and(|d| d <= tolerance)
    }

    fn translate(&mut self, delta: Point) {
        self.outline = self.outline.translated(delta);
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.outline = self.outline.rotated(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, inner_layers: u8) {
        self.outline = self.outline.mirrored(orientation, center);
        self.layer = self.layer.mirrored(inner_layers);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.outline = self.outline.mapped_to_grid(grid);
    }

    fn validate(&self, project: &Project) -> Result<()> {
        if !self.layer.is_copper() {
            return Err(ValidationError::InvalidValue {
                field: "layer".into(),
                reason: format!("planes must be on a copper layer, not {}", self.layer),
            }
            .into());
        }
        if let Some(net) = self.net_signal {
            if project.circuit().net_signal(net).is_none() {
                return Err(Error::not_found("Net signal", net));
            }
        }
        Ok(())
    }
}
