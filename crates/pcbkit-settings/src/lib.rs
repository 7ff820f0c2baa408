//! pcbkit Settings Crate
//!
//! Editor configuration (grid, undo depth, tool defaults) and its
//! persistence as TOML or JSON.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    EditorConfig, GridSettings, HistorySettings, HoleDefaults, PlaneDefaults, PolygonDefaults,
    StrokeTextDefaults, ToolDefaults, TraceDefaults, ViaDefaults, ZoneDefaults, MAX_HISTORY_DEPTH,
};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
