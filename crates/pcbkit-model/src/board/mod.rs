//! Board items
//!
//! Every kind of board object implements [`BoardItem`], which gives generic
//! commands access to its collection and its geometry.

pub mod device;
pub mod hole;
pub mod net_line;
pub mod plane;
pub mod polygon;
pub mod stroke_text;
pub mod via;
pub mod zone;

pub use device::BoardDevice;
pub use hole::BoardHole;
pub use net_line::BoardNetLine;
pub use plane::BoardPlane;
pub use polygon::BoardPolygon;
pub use stroke_text::{BoardStrokeText, HAlign, TextAlign, VAlign};
pub use via::BoardVia;
pub use zone::{BoardZone, ZoneRules};

use crate::project::{ItemKind, Project};
use pcbkit_core::{Angle, Layer, Length, Orientation, Point, PositiveLength, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;
use uuid::Uuid;

/// Common interface of all board objects.
pub trait BoardItem: Clone + PartialEq + Debug + 'static {
    const KIND: ItemKind;

    fn uuid(&self) -> Uuid;

    fn collection(board: &Board) -> &Vec<Self>;

    fn collection_mut(board: &mut Board) -> &mut Vec<Self>;

    /// Reference point used for grid snapping and placement.
    fn anchor(&self) -> Point;

    fn is_locked(&self) -> bool {
        false
    }

    /// No-op for items that cannot be locked.
    fn set_locked(&mut self, _locked: bool) {}

    fn hit_test(&self, pos: &Point, tolerance: Length) -> bool;

    fn translate(&mut self, delta: Point);

    fn rotate(&mut self, angle: Angle, center: Point);

    fn mirror(&mut self, orientation: Orientation, center: Point, inner_layers: u8);

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        let anchor = self.anchor();
        self.translate(anchor.mapped_to_grid(grid) - anchor);
    }

    /// Checks the item against the rest of the project before it is stored.
    fn validate(&self, _project: &Project) -> Result<()> {
        Ok(())
    }
}

/// Typed reference to a board object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub uuid: Uuid,
}

impl ItemRef {
    pub fn new(kind: ItemKind, uuid: Uuid) -> Self {
        Self { kind, uuid }
    }

    pub fn of<T: BoardItem>(item: &T) -> Self {
        Self::new(T::KIND, item.uuid())
    }
}

/// Inner layer count and layer visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    inner_layers: u8,
    visible: BTreeSet<Layer>,
}

impl LayerStack {
    pub fn new(inner_layers: u8) -> Self {
        let mut visible: BTreeSet<Layer> = Layer::copper_layers(inner_layers).into_iter().collect();
        visible.extend([
            Layer::BoardOutlines,
            Layer::BoardCutouts,
            Layer::TopPlacement,
            Layer::BotPlacement,
            Layer::TopLegend,
            Layer::BotLegend,
            Layer::TopNames,
            Layer::BotNames,
            Layer::TopValues,
            Layer::BotValues,
        ]);
        Self {
            inner_layers,
            visible,
        }
    }

    pub fn inner_layers(&self) -> u8 {
        self.inner_layers
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        self.visible.contains(&layer)
    }

    /// Returns whether the visibility changed.
    pub fn set_visible(&mut self, layer: Layer, visible: bool) -> bool {
        if visible {
            self.visible.insert(layer)
        } else {
            self.visible.remove(&layer)
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A PCB with ordered item collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) name: String,
    pub(crate) layer_stack: LayerStack,
    pub(crate) holes: Vec<BoardHole>,
    pub(crate) vias: Vec<BoardVia>,
    pub(crate) polygons: Vec<BoardPolygon>,
    pub(crate) planes: Vec<BoardPlane>,
    pub(crate) zones: Vec<BoardZone>,
    pub(crate) stroke_texts: Vec<BoardStrokeText>,
    pub(crate) devices: Vec<BoardDevice>,
    pub(crate) net_lines: Vec<BoardNetLine>,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer_stack(&self) -> &LayerStack {
        &self.layer_stack
    }

    pub fn layer_stack_mut(&mut self) -> &mut LayerStack {
        &mut self.layer_stack
    }

    pub fn holes(&self) -> &[BoardHole] {
        &self.holes
    }

    pub fn vias(&self) -> &[BoardVia] {
        &self.vias
    }

    pub fn polygons(&self) -> &[BoardPolygon] {
        &self.polygons
    }

    pub fn planes(&self) -> &[BoardPlane] {
        &self.planes
    }

    pub fn zones(&self) -> &[BoardZone] {
        &self.zones
    }

    pub fn stroke_texts(&self) -> &[BoardStrokeText] {
        &self.stroke_texts
    }

    pub fn devices(&self) -> &[BoardDevice] {
        &self.devices
    }

    pub fn net_lines(&self) -> &[BoardNetLine] {
        &self.net_lines
    }

    pub fn items<T: BoardItem>(&self) -> &[T] {
        T::collection(self)
    }

    pub fn item<T: BoardItem>(&self, uuid: Uuid) -> Option<&T> {
        T::collection(self).iter().find(|i| i.uuid() == uuid)
    }

    pub fn contains(&self, item: ItemRef) -> bool {
        match item.kind {
            ItemKind::Hole => self.item::<BoardHole>(item.uuid).is_some(),
            ItemKind::Via => self.item::<BoardVia>(item.uuid).is_some(),
            ItemKind::Polygon => self.item::<BoardPolygon>(item.uuid).is_some(),
            ItemKind::Plane => self.item::<BoardPlane>(item.uuid).is_some(),
            ItemKind::Zone => self.item::<BoardZone>(item.uuid).is_some(),
            ItemKind::StrokeText => self.item::<BoardStrokeText>(item.uuid).is_some(),
            ItemKind::Device => self.item::<BoardDevice>(item.uuid).is_some(),
            ItemKind::NetLine => self.item::<BoardNetLine>(item.uuid).is_some(),
            ItemKind::NetSignal | ItemKind::ComponentInstance => false,
        }
    }

    /// Total number of board items.
    pub fn item_count(&self) -> usize {
        self.holes.len()
            + self.vias.len()
            + self.polygons.len()
            + self.planes.len()
            + self.zones.len()
            + self.stroke_texts.len()
            + self.devices.len()
            + self.net_lines.len()
    }

    /// Every item on the board, in hit-test order.
    pub fn all_items(&self) -> Vec<ItemRef> {
        let mut refs = Vec::with_capacity(self.item_count());
        refs.extend(self.devices.iter().map(ItemRef::of));
        refs.extend(self.stroke_texts.iter().map(ItemRef::of));
        refs.extend(self.vias.iter().map(ItemRef::of));
        refs.extend(self.holes.iter().map(ItemRef::of));
        refs.extend(self.net_lines.iter().map(ItemRef::of));
        refs.extend(self.polygons.iter().map(ItemRef::of));
        refs.extend(self.zones.iter().map(ItemRef::of));
        refs.extend(self.planes.iter().map(ItemRef::of));
        refs
    }

    pub fn anchor_of(&self, item: ItemRef) -> Option<Point> {
        let uuid = item.uuid;
        match item.kind {
            ItemKind::Hole => self.item::<BoardHole>(uuid).map(BoardItem::anchor),
            ItemKind::Via => self.item::<BoardVia>(uuid).map(BoardItem::anchor),
            ItemKind::Polygon => self.item::<BoardPolygon>(uuid).map(BoardItem::anchor),
            ItemKind::Plane => self.item::<BoardPlane>(uuid).map(BoardItem::anchor),
            ItemKind::Zone => self.item::<BoardZone>(uuid).map(BoardItem::anchor),
            ItemKind::StrokeText => self.item::<BoardStrokeText>(uuid).map(BoardItem::anchor),
            ItemKind::Device => self.item::<BoardDevice>(uuid).map(BoardItem::anchor),
            ItemKind::NetLine => self.item::<BoardNetLine>(uuid).map(BoardItem::anchor),
            ItemKind::NetSignal | ItemKind::ComponentInstance => None,
        }
    }

    pub(crate) fn item_mut<T: BoardItem>(&mut self, uuid: Uuid) -> Option<&mut T> {
        T::collection_mut(self).iter_mut().find(|i| i.uuid() == uuid)
    }

    pub(crate) fn insert_item<T: BoardItem>(&mut self, index: usize, item: T) {
        let items = T::collection_mut(self);
        let index = index.min(items.len());
        items.insert(index, item);
    }

    pub(crate) fn remove_item<T: BoardItem>(&mut self, uuid: Uuid) -> Option<(usize, T)> {
        let items = T::collection_mut(self);
        let index = items.iter().position(|i| i.uuid() == uuid)?;
        Some((index, items.remove(index)))
    }

    /// Items under `pos`, topmost first.
    ///
    /// Items on hidden layers are skipped. Order: devices, texts, vias,
    /// holes, net lines, polygons, zones, planes.
    pub fn items_at(&self, pos: &Point, tolerance: Length) -> Vec<ItemRef> {
        let layers = &self.layer_stack;
        let mut hits = Vec::new();
        collect_hits(&self.devices, pos, tolerance, &mut hits, |_| true);
        collect_hits(&self.stroke_texts, pos, tolerance, &mut hits, |t| layers.is_visible(t.layer));
        collect_hits(&self.vias, pos, tolerance, &mut hits, |_| true);
        collect_hits(&self.holes, pos, tolerance, &mut hits, |_| true);
        collect_hits(&self.net_lines, pos, tolerance, &mut hits, |l| layers.is_visible(l.layer));
        collect_hits(&self.polygons, pos, tolerance, &mut hits, |p| layers.is_visible(p.layer));
        collect_hits(&self.zones, pos, tolerance, &mut hits, |_| true);
        collect_hits(&self.planes, pos, tolerance, &mut hits, |p| layers.is_visible(p.layer));
        hits
    }

    /// Items whose anchor lies inside the rectangle spanned by `a` and `b`.
    pub fn items_in_rect(&self, a: Point, b: Point) -> Vec<ItemRef> {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        let inside = |p: Point| p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y;
        let mut refs = Vec::new();
        refs.extend(self.devices.iter().filter(|i| inside(i.anchor())).map(ItemRef::of));
        refs.extend(self.stroke_texts.iter().filter(|i| inside(i.anchor())).map(ItemRef::of));
        refs.extend(self.vias.iter().filter(|i| inside(i.anchor())).map(ItemRef::of));
        refs.extend(self.holes.iter().filter(|i| inside(i.anchor())).map(ItemRef::of));
        refs.extend(
            self.net_lines
                .iter()
                .filter(|l| inside(l.start) && inside(l.end))
                .map(ItemRef::of),
        );
        refs.extend(
            self.polygons
                .iter()
                .filter(|p| p.path.points().all(inside))
                .map(ItemRef::of),
        );
        refs.extend(
            self.zones
                .iter()
                .filter(|z| z.outline.points().all(inside))
                .map(ItemRef::of),
        );
        refs.extend(
            self.planes
                .iter()
                .filter(|p| p.outline.points().all(inside))
                .map(ItemRef::of),
        );
        refs
    }
}

fn collect_hits<T: BoardItem>(
    items: &[T],
    pos: &Point,
    tolerance: Length,
    hits: &mut Vec<ItemRef>,
    visible: impl Fn(&T) -> bool,
) {
    hits.extend(
        items
            .iter()
            .rev()
            .filter(|i| visible(i) && i.hit_test(pos, tolerance))
            .map(ItemRef::of),
    );
}
