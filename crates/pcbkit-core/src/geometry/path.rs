use super::point::{distance_to_segment, Orientation, Point};
use crate::units::{Angle, Length, PositiveLength};
use serde::{Deserialize, Serialize};

/// Path vertex; `angle` is the arc angle of the segment starting here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Point,
    pub angle: Angle,
}

impl Vertex {
    pub fn new(pos: Point) -> Self {
        Self { pos, angle: Angle::deg0() }
    }

    pub fn with_angle(pos: Point, angle: Angle) -> Self {
        Self { pos, angle }
    }
}

/// Open or closed polyline
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn from_points(points: &[Point]) -> Self {
        Self::new(points.iter().copied().map(Vertex::new).collect())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn add_vertex(&mut self, pos: Point, angle: Angle) {
        self.vertices.push(Vertex::with_angle(pos, angle));
    }

    pub fn first(&self) -> Option<&Vertex> {
        self.vertices.first()
    }

    pub fn last(&self) -> Option<&Vertex> {
        self.vertices.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Vertex> {
        self.vertices.last_mut()
    }

    /// A path is closed if it has at least two vertices and the last one
    /// coincides with the first one.
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() >= 2 && first.pos == last.pos,
            _ => false,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|v| v.pos)
    }

    pub fn translated(&self, delta: Point) -> Self {
        self.map_points(|p| p + delta)
    }

    pub fn mapped_to_grid(&self, interval: PositiveLength) -> Self {
        self.map_points(|p| p.mapped_to_grid(interval))
    }

    pub fn rotated(&self, angle: Angle, center: Point) -> Self {
        self.map_points(|p| p.rotated(angle, center))
    }

    /// Mirrors all vertices; arc angles change their sign.
    pub fn mirrored(&self, orientation: Orientation, center: Point) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|v| Vertex::with_angle(v.pos.mirrored(orientation, center), -v.angle))
                .collect(),
        )
    }

    /// Smallest distance from `point` to any segment (or the single vertex).
    pub fn distance_to(&self, point: &Point) -> Option<Length> {
        match self.vertices.len() {
            0 => None,
            1 => Some(point.distance_to(&self.vertices[0].pos)),
            _ => self
                .vertices
                .windows(2)
                .map(|w| distance_to_segment(point, &w[0].pos, &w[1].pos))
                .min(),
        }
    }

    /// Even-odd point-in-polygon test; open paths are treated as closed.
    pub fn contains(&self, point: &Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let (px, py) = (point.x.to_nm() as f64, point.y.to_nm() as f64);
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let (xi, yi) = (self.vertices[i].pos.x.to_nm() as f64, self.vertices[i].pos.y.to_nm() as f64);
            let (xj, yj) = (self.vertices[j].pos.x.to_nm() as f64, self.vertices[j].pos.y.to_nm() as f64);
            if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    pub fn nearest_vertex(&self, point: &Point) -> Option<usize> {
        self.vertices
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| v.pos.distance_to(point))
            .map(|(i, _)| i)
    }

    fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(
            self.vertices
                .iter()
                .map(|v| Vertex::with_angle(f(v.pos), v.angle))
                .collect(),
        )
    }
}
