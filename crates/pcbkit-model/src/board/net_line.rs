use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    geometry::distance_to_segment, Angle, Error, Layer, Length, Orientation, Point,
    PositiveLength, Result, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Straight copper trace segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardNetLine {
    pub uuid: Uuid,
    pub net_signal: Option<Uuid>,
    pub layer: Layer,
    pub width: PositiveLength,
    pub start: Point,
    pub end: Point,
}

impl BoardNetLine {
    pub fn new(
        net_signal: Option<Uuid>,
        layer: Layer,
        width: PositiveLength,
        start: Point,
        end: Point,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            net_signal,
            layer,
            width,
            start,
            end,
        }
    }

    pub fn length(&self) -> Length {
        self.start.distance_to(&self.end)
    }
}

impl BoardItem for BoardNetLine {
    const KIND: ItemKind = ItemKind::NetLine;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.net_lines
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.net_lines
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn hit_test(&self, pos: &Point, tolerance: Length) -> bool {
        distance_to_segment(pos, &self.start, &self.end).to_nm()
            <= self.width.to_nm() / 2 + tolerance.to_nm()
    }

    fn translate(&mut self, delta: Point) {
        self.start = self.start + delta;
        self.end = self.end + delta;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.start = self.start.rotated(angle, center);
        self.end = self.end.rotated(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, inner_layers: u8) {
        self.start = self.start.mirrored(orientation, center);
        self.end = self.end.mirrored(orientation, center);
        self.layer = self.layer.mirrored(inner_layers);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.start = self.start.mapped_to_grid(grid);
        self.end = self.end.mapped_to_grid(grid);
    }

    fn validate(&self, project: &Project) -> Result<()> {
        if !self.layer.is_copper() {
            return Err(ValidationError::InvalidValue {
                field: "layer".into(),
                reason: format!("traces must be on a copper layer, not {}", self.layer),
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
