//! # pcbkit Model
//!
//! The data edited by the board editor and the commands that mutate it.
//!
//! Domain objects are reachable only through narrow getters; every change
//! goes through a command from [`cmd`] so it can be undone. Commands emit one
//! [`ProjectEvent`] per actual change.

pub mod board;
pub mod circuit;
pub mod cmd;
pub mod project;

pub use board::{
    Board, BoardDevice, BoardHole, BoardItem, BoardNetLine, BoardPlane, BoardPolygon,
    BoardStrokeText, BoardVia, BoardZone, HAlign, ItemRef, LayerStack, TextAlign, VAlign,
    ZoneRules,
};
pub use circuit::{AssemblyOption, Circuit, ComponentInstance, NetSignal};
pub use project::{ChangeKind, ItemKind, Project, ProjectEvent};
