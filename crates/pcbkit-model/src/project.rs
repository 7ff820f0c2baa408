//! Project: the document edited through the undo stack

use crate::board::Board;
use crate::circuit::Circuit;
use pcbkit_core::{ChangeNotifier, SubscriptionId};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Kind of a domain object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ItemKind {
    Hole,
    Via,
    Polygon,
    Plane,
    Zone,
    StrokeText,
    Device,
    NetLine,
    NetSignal,
    ComponentInstance,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Hole => "Hole",
            ItemKind::Via => "Via",
            ItemKind::Polygon => "Polygon",
            ItemKind::Plane => "Plane",
            ItemKind::Zone => "Zone",
            ItemKind::StrokeText => "Stroke text",
            ItemKind::Device => "Device",
            ItemKind::NetLine => "Net line",
            ItemKind::NetSignal => "Net signal",
            ItemKind::ComponentInstance => "Component",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Edited,
    /// Uncommitted live preview of an edit
    Previewed,
}

/// Change notification emitted by commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEvent {
    pub kind: ItemKind,
    pub uuid: Uuid,
    pub change: ChangeKind,
}

impl ProjectEvent {
    pub fn new(kind: ItemKind, uuid: Uuid, change: ChangeKind) -> Self {
        Self { kind, uuid, change }
    }
}

/// An open project with its circuit and one board
#[derive(Debug, Default)]
pub struct Project {
    name: String,
    circuit: Circuit,
    board: Board,
    notifier: ChangeNotifier<ProjectEvent>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_board(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ProjectEvent) + 'static,
    {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn notify(&mut self, event: ProjectEvent) {
        tracing::trace!("{} {} {:?}", event.kind, event.uuid, event.change);
        self.notifier.notify(&event);
    }
}
