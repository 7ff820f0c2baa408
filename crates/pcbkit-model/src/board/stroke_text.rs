use super::{Board, BoardItem};
use crate::project::{ItemKind, Project};
use pcbkit_core::{
    Angle, Layer, Length, Orientation, Point, PositiveLength, Result, UnsignedLength,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn mirrored(self) -> Self {
        match self {
            HAlign::Left => HAlign::Right,
            HAlign::Center => HAlign::Center,
            HAlign::Right => HAlign::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAlign {
    pub h: HAlign,
    pub v: VAlign,
}

impl Default for TextAlign {
    fn default() -> Self {
        Self {
            h: HAlign::Left,
            v: VAlign::Bottom,
        }
    }
}

/// Text rendered with stroke fonts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStrokeText {
    pub uuid: Uuid,
    pub layer: Layer,
    pub text: String,
    pub position: Point,
    pub rotation: Angle,
    pub height: PositiveLength,
    pub stroke_width: UnsignedLength,
    pub mirrored: bool,
    pub align: TextAlign,
    pub locked: bool,
}

impl BoardStrokeText {
    pub fn new(
        layer: Layer,
        text: impl Into<String>,
        position: Point,
        height: PositiveLength,
        stroke_width: UnsignedLength,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            layer,
            text: text.into(),
            position,
            rotation: Angle::deg0(),
            height,
            stroke_width,
            mirrored: layer.is_bottom(),
            align: TextAlign::default(),
            locked: false,
        }
    }
}

impl BoardItem for BoardStrokeText {
    const KIND: ItemKind = ItemKind::StrokeText;

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn collection(board: &Board) -> &Vec<Self> {
        &board.stroke_texts
    }

    fn collection_mut(board: &mut Board) -> &mut Vec<Self> {
        &mut board.stroke_texts
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
        self.position.distance_to(pos).to_nm() <= self.height.to_nm() + tolerance.to_nm()
    }

    fn translate(&mut self, delta: Point) {
        self.position = self.position + delta;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.position = self.position.rotated(angle, center);
        let angle = if self.mirrored { -angle } else { angle };
        self.rotation = (self.rotation + angle).mapped_to_0_360();
    }

    fn mirror(&mut self, orientation: Orientation, center: Point, inner_layers: u8) {
        self.position = self.position.mirrored(orientation, center);
        self.layer = self.layer.mirrored(inner_layers);
        self.mirrored = !self.mirrored;
        self.rotation = match orientation {
            Orientation::Horizontal => self.rotation,
            Orientation::Vertical => self.rotation + Angle::deg180(),
        }
        .mapped_to_0_360();
    }

    fn validate(&self, _project: &Project) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "text".into(),
                reason: "text must not be empty".into(),
            }
            .into());
        }
        Ok(())
    }
}
