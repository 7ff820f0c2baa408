use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    Angle, Layer, Length, Orientation, Path, Point, PositiveLength, Result, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// What is forbidden inside a keepout zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRules {
    pub no_copper: bool,
    pub no_planes: bool,
    pub no_exposure: bool,
    pub no_devices: bool,
}

impl Default for ZoneRules {
    fn default() -> Self {
        Self {
            no_copper: true,
            no_planes: true,
            no_exposure: false,
            no_devices: false,
        }
    }
}

/// Keepout zone spanning one or more copper layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardZone {
    pub uuid: Uuid,
    pub layers: BTreeSet<Layer>,
    pub rules: ZoneRules,
    pub outline: Path,
    pub locked: bool,
}

impl BoardZone {
    pub fn new(layers: BTreeSet<Layer>, rules: ZoneRules, outline: Path) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            layers,
            rules,
            outline,
            locked: false,
        }
    }
}

impl BoardItem for BoardZone {
    const KIND: ItemKind = ItemKind::Zone;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.zones
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.zones
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
        self.layers = self.layers.iter().map(|l| l.mirrored(inner_layers)).collect();
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.outline = self.outline.mapped_to_grid(grid);
    }

    fn validate(&self, _project: &Project) -> Result<()> {
        if self.layers.iter().any(|l| !l.is_copper()) {
            return Err(ValidationError::InvalidValue {
                field: "layers".into(),
                reason: "zones may only span copper layers".into(),
            }
            .into());
        }
        Ok(())
    }
}
