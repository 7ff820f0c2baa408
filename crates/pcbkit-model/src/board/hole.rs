use super::{Board, BoardItem};
use crate::project::ItemKind;
use pcbkit_core::{Angle, Length, Orientation, Point, PositiveLength};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Non-plated mounting hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardHole {
    pub uuid: Uuid,
    pub position: Point,
    pub diameter: PositiveLength,
    pub locked: bool,
}

impl BoardHole {
    pub fn new(position: Point, diameter: PositiveLength) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position,
            diameter,
            locked: false,
        }
    }
}

impl BoardItem for BoardHole {
    const KIND: ItemKind = ItemKind::Hole;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.holes
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.holes
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn hit_test(&self, pos: &Point, tolerance: Length) -> bool {
        self.position.distance_to(pos).to_nm() <= self.diameter.to_nm() / 2 + tolerance.to_nm()
    }

    fn translate(&mut self, delta: Point) {
        self.position = self.position + delta;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.position = self.position.rotated(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, _inner_layers: u8) {
        self.position = self.position.mirrored(orientation, center);
    }
}
