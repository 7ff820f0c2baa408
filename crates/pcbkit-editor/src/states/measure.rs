//! Measure tool
//!
//! Shows a ruler between two clicked points. The cursor snaps to the grid or
//! to the nearest item reference point, whichever is closer; holding Shift
//! disables snapping. The tool never touches the undo stack.

use super::{BoardEditorState, StateKind};
use crate::adapter::{Features, Key, KeyEvent, SceneMouseEvent, ToolInfo};
use crate::context::BoardEditorContext;
use pcbkit_core::{Angle, Point};
use pcbkit_model::Board;
use std::fmt::Write;

#[derive(Default)]
pub struct MeasureState {
    snap_candidates: Vec<Point>,
    last_scene_pos: Point,
    cursor_pos: Point,
    cursor_snapped: bool,
    start: Option<Point>,
    end: Option<Point>,
}

impl MeasureState {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_snap_candidates(board: &Board) -> Vec<Point> {
        let mut points = Vec::new();
        points.extend(board.devices().iter().map(|d| d.position));
        points.extend(board.vias().iter().map(|v| v.position));
        points.extend(board.holes().iter().map(|h| h.position));
        points.extend(board.stroke_texts().iter().map(|t| t.position));
        for line in board.net_lines() {
            points.push(line.start);
            points.push(line.end);
        }
        for polygon in board.polygons() {
            points.extend(polygon.path.points());
        }
        for plane in board.planes() {
            points.extend(plane.outline.points());
        }
        for zone in board.zones() {
            points.extend(zone.outline.points());
        }
        points.sort_by_key(|p| (p.x, p.y));
        points.dedup();
        points
    }

    fn update_cursor(&mut self, ctx: &mut BoardEditorContext, snap: bool) {
        self.cursor_pos = self.last_scene_pos;
        self.cursor_snapped = false;
        if snap {
            let on_grid = ctx.map_to_grid(self.last_scene_pos);
            let grid_distance = self.last_scene_pos.distance_to(&on_grid);
            let nearest = self
                .snap_candidates
                .iter()
                .map(|c| (self.last_scene_pos.distance_to(c), *c))
                .min_by_key(|(distance, _)| *distance);
            match nearest {
                Some((distance, candidate)) if distance <= grid_distance => {
                    self.cursor_pos = candidate;
                    self.cursor_snapped = true;
                }
                _ => self.cursor_pos = on_grid,
            }
        }
        self.update_ruler(ctx);
    }

    fn update_ruler(&self, ctx: &mut BoardEditorContext) {
        let placing_start = self.start.is_none() || self.end.is_some();
        let adapter = ctx.adapter();
        adapter.set_scene_cursor(self.cursor_pos, placing_start, self.cursor_snapped);
        let start = self.start.unwrap_or(self.cursor_pos);
        let end = self.end.unwrap_or(self.cursor_pos);
        adapter.set_view_ruler(self.start.map(|_| (start, end)));
        adapter.set_view_info_box_text(&info_text(start, end));
    }

    fn update_status_bar(&self, ctx: &mut BoardEditorContext) {
        let message = match (self.start, self.end) {
            (Some(_), Some(_)) => "Press Delete to clear the measurement",
            (Some(_), None) => "Click to specify the end point (press Shift to disable snap)",
            _ => "Click to specify the start point (press Shift to disable snap)",
        };
        ctx.adapter().set_status_bar_message(message, 0);
    }
}

fn info_text(start: Point, end: Point) -> String {
    let diff = end - start;
    let length = start.distance_to(&end);
    let angle = Angle::from_deg(diff.y.to_mm().atan2(diff.x.to_mm()).to_degrees());
    let mut text = String::new();
    let _ = writeln!(text, "X0: {:>12.6} mm", start.x.to_mm());
    let _ = writeln!(text, "Y0: {:>12.6} mm", start.y.to_mm());
    let _ = writeln!(text, "X1: {:>12.6} mm", end.x.to_mm());
    let _ = writeln!(text, "Y1: {:>12.6} mm", end.y.to_mm());
    let _ = writeln!(text, "ΔX: {:>12.6} mm", diff.x.to_mm());
    let _ = writeln!(text, "ΔY: {:>12.6} mm", diff.y.to_mm());
    let _ = writeln!(text, "Δ:  {:>12.6} mm", length.to_mm());
    let _ = write!(text, "∠:  {:>12.3}°", angle.to_deg());
    text
}

impl BoardEditorState for MeasureState {
    fn kind(&self) -> StateKind {
        StateKind::Measure
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::Measure
    }

    fn features(&self, _ctx: &BoardEditorContext) -> Features {
        let mut features = Features::ABORT;
        if self.end.is_some() {
            features |= Features::REMOVE;
        }
        features
    }

    fn entry(&mut self, ctx: &mut BoardEditorContext) -> bool {
        self.snap_candidates = Self::collect_snap_candidates(ctx.project().board());
        let global = ctx.adapter().global_cursor_pos();
        self.last_scene_pos = ctx.adapter().map_global_pos_to_scene_pos(global);
        if let Some(scene) = ctx.scene_mut() {
            scene.clear_selection();
        }
        ctx.adapter().set_view_gray_out(true);
        self.update_cursor(ctx, true);
        self.update_status_bar(ctx);
        true
    }

    fn exit(&mut self, ctx: &mut BoardEditorContext) -> bool {
        // Start and end are kept so the ruler reappears on re-entry.
        self.snap_candidates.clear();
        let adapter = ctx.adapter();
        adapter.set_scene_cursor(Point::default(), false, false);
        adapter.set_view_ruler(None);
        adapter.set_view_gray_out(false);
        adapter.set_view_info_box_text("");
        adapter.set_status_bar_message("", 0);
        true
    }

    fn process_abort_command(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if self.start.is_some() && self.end.is_none() {
            self.start = None;
            self.update_ruler(ctx);
            self.update_status_bar(ctx);
            return true;
        }
        false
    }

    fn process_remove(&mut self, ctx: &mut BoardEditorContext) -> bool {
        if self.start.is_some() && self.end.is_some() {
            self.start = None;
            self.end = None;
            self.update_ruler(ctx);
            self.update_status_bar(ctx);
            return true;
        }
        false
    }

    fn process_key_pressed(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift {
            return false;
        }
        self.update_cursor(ctx, false);
        true
    }

    fn process_key_released(&mut self, ctx: &mut BoardEditorContext, e: &KeyEvent) -> bool {
        if e.key != Key::Shift {
            return false;
        }
        self.update_cursor(ctx, true);
        true
    }

    fn process_mouse_moved(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        self.last_scene_pos = e.scene_pos;
        self.update_cursor(ctx, !e.modifiers.shift);
        true
    }

    fn process_left_pressed(&mut self, ctx: &mut BoardEditorContext, e: &SceneMouseEvent) -> bool {
        self.last_scene_pos = e.scene_pos;
        self.update_cursor(ctx, !e.modifiers.shift);
        if self.start.is_none() || self.end.is_some() {
            self.start = Some(self.cursor_pos);
            self.end = None;
        } else {
            self.end = Some(self.cursor_pos);
        }
        self.update_ruler(ctx);
        self.update_status_bar(ctx);
        true
    }
}
