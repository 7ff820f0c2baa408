//! # pcbkit
//!
//! Interactive board editing for PCB layout tools: a finite state machine
//! of editor tools on top of a transactional undo engine.
//!
//! ## Architecture
//!
//! pcbkit is organized as a workspace with multiple crates:
//!
//! 1. **pcbkit-core** - Units, geometry, layers, errors, change notification
//! 2. **pcbkit-undo** - Undoable commands, command groups and the undo stack
//! 3. **pcbkit-model** - Board items, circuit and the commands that edit them
//! 4. **pcbkit-settings** - Editor configuration and its persistence
//! 5. **pcbkit-editor** - Editor states, the FSM and the host adapter
//! 6. **pcbkit** - Re-exports and a headless script replay tool
//!
//! The editor never talks to a UI directly. A host implements
//! [`BoardEditorAdapter`]; [`HeadlessAdapter`] records everything instead
//! and drives [`script::Replayer`].

pub mod script;

pub use pcbkit_core::{
    Angle, Error, Layer, Length, Orientation, Path, Point, PositiveLength, Result, UnsignedLength,
};
pub use pcbkit_editor::{
    BoardEditorAdapter, BoardEditorContext, BoardEditorFsm, BoardEditorState, CursorShape,
    Features, HeadlessAdapter, HeadlessLog, Key, KeyEvent, Modifiers, SceneMouseEvent,
    SharedHeadlessLog, StateKind, ToolInfo, ToolSetting,
};
pub use pcbkit_model::{Board, ItemKind, ItemRef, Project};
pub use pcbkit_settings::{EditorConfig, SettingsPersistence};
pub use pcbkit_undo::{UndoCommand, UndoCommandGroup, UndoStack};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so that replay output on stdout stays machine readable.
/// `RUST_LOG` is honoured on top of the default `INFO` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
