//! # pcbkit Editor
//!
//! Interactive board editing on top of [`pcbkit_model`].
//!
//! [`BoardEditorFsm`] receives input events from the host, forwards them to
//! the active [`BoardEditorState`] and switches tools. Tools change the
//! board only through commands grouped on the undo stack, so every finished
//! operation is one undo step and every cancelled one leaves no trace. The
//! host is reached through [`BoardEditorAdapter`]; [`HeadlessAdapter`]
//! implements it without a UI.

pub mod adapter;
pub mod context;
pub mod fsm;
pub mod headless;
pub mod states;

pub use adapter::{
    BoardEditorAdapter, CursorShape, Features, GraphicsScene, Key, KeyEvent, Modifiers,
    SceneMouseEvent, ToolInfo, ToolSetting,
};
pub use context::BoardEditorContext;
pub use fsm::BoardEditorFsm;
pub use headless::{HeadlessAdapter, HeadlessLog, SharedHeadlessLog};
pub use states::{BoardEditorState, StateKind};
