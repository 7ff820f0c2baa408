use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{Angle, Error, Length, Orientation, Point, Result, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grab radius around the device origin in nanometres.
const DEVICE_GRAB_RADIUS: i64 = 1_000_000;

/// Footprint placement of a circuit component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDevice {
    pub uuid: Uuid,
    /// Component instance in the circuit
    pub component: Uuid,
    /// Library device
    pub device: Uuid,
    /// Library footprint
    pub footprint: Uuid,
    pub position: Point,
    pub rotation: Angle,
    pub mirrored: bool,
    pub locked: bool,
}

impl BoardDevice {
    pub fn new(component: Uuid, device: Uuid, footprint: Uuid, position: Point) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            component,
            device,
            footprint,
            position,
            rotation: Angle::deg0(),
            mirrored: false,
            locked: false,
        }
    }
}

impl BoardItem for BoardDevice {
    const KIND: ItemKind = ItemKind::Device;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.devices
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.devices
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
        self.position.distance_to(pos).to_nm() <= DEVICE_GRAB_RADIUS + tolerance.to_nm()
    }

    fn translate(&mut self, delta: Point) {
        self.position = self.position + delta;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.position = self.position.rotated(angle, center);
        let angle = if self.mirrored { -angle } else { angle };
        self.rotation = (self.rotation + angle).mapped_to_0_360();
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, _inner_layers: u8) {
        self.position = self.position.mirrored(orientation, center);
        self.mirrored = !self.mirrored;
        self.rotation = match orientation {
            Orientation::Horizontal => self.rotation,
            Orientation::Vertical => self.rotation + Angle::deg180(),
        }
        .mapped_to_0_360();
    }

    fn validate(&self, project: &Project) -> Result<()> {
        if project.circuit().component_instance(self.component).is_none() {
            return Err(Error::not_found("Component", self.component));
        }
        let placed_twice = project
            .board()
            .devices()
            .iter()
            .any(|d| d.component == self.component && d.uuid != self.uuid);
        if placed_twice {
            return Err(ValidationError::InvalidValue {
                field: "component".into(),
                reason: "component is already placed on the board".into(),
            }
            .into());
        }
        Ok(())
    }
}
