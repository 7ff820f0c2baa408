use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    Angle, Error, Length, Orientation, Point, PositiveLength, Result, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plated through-hole connecting copper layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardVia {
    pub uuid: Uuid,
    pub position: Point,
    pub size: PositiveLength,
    pub drill: PositiveLength,
    pub net_signal: Option<Uuid>,
    pub locked: bool,
}

impl BoardVia {
    pub fn new(
        position: Point,
        size: PositiveLength,
        drill: PositiveLength,
        net_signal: Option<Uuid>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position,
            size,
            drill,
            net_signal,
            locked: false,
        }
    }
}

impl BoardItem for BoardVia {
    const KIND: ItemKind = ItemKind::Via;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.vias
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.vias
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
        self.position.distance_to(pos).to_nm() <= self.size.to_nm() / 2 + tolerance.to_nm()
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

    fn validate(&self, project: &Project) -> Result<()> {
        if self.drill > self.size {
            return Err(ValidationError::InvalidValue {
                field: "drill".into(),
                reason: format!(
                    "drill diameter {} exceeds via size {}",
                    self.drill, self.size
                ),
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
