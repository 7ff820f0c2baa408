//! Editor configuration
//!
//! Configuration is organized into logical sections:
//! - Grid (default snapping interval)
//! - History (undo depth)
//! - Tool defaults (initial properties of every placement tool)
//!
//! All lengths are nanometres. Every section falls back to its defaults when
//! missing from the file, so partial configuration files are accepted.

use crate::error::{SettingsError, SettingsResult};
use pcbkit_core::{allowed_geometry_layers, Layer, PositiveLength, UnsignedLength};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound for the undo history depth
pub const MAX_HISTORY_DEPTH: usize = 10_000;

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid interval in nanometres
    pub interval: PositiveLength,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            interval: PositiveLength::new_const(635_000),
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Number of committed entries kept; 0 keeps everything
    pub max_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleDefaults {
    pub diameter: PositiveLength,
}

impl Default for HoleDefaults {
    fn default() -> Self {
        Self {
            diameter: PositiveLength::new_const(1_000_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaDefaults {
    pub size: PositiveLength,
    pub drill: PositiveLength,
}

impl Default for ViaDefaults {
    fn default() -> Self {
        Self {
            size: PositiveLength::new_const(700_000),
            drill: PositiveLength::new_const(300_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonDefaults {
    pub layer: Layer,
    pub line_width: UnsignedLength,
    pub filled: bool,
}

impl Default for PolygonDefaults {
    fn default() -> Self {
        Self {
            layer: Layer::BoardOutlines,
            line_width: UnsignedLength::zero(),
            filled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDefaults {
    pub layer: Layer,
}

impl Default for PlaneDefaults {
    fn default() -> Self {
        Self {
            layer: Layer::TopCopper,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeTextDefaults {
    pub layer: Layer,
    pub text: String,
    pub height: PositiveLength,
    pub stroke_width: UnsignedLength,
}

impl Default for StrokeTextDefaults {
    fn default() -> Self {
        Self {
            layer: Layer::BoardDocumentation,
            text: "{{PROJECT}}".to_string(),
            height: PositiveLength::new_const(1_500_000),
            stroke_width: UnsignedLength::new_const(200_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceDefaults {
    pub layer: Layer,
    pub width: PositiveLength,
}

impl Default for TraceDefaults {
    fn default() -> Self {
        Self {
            layer: Layer::TopCopper,
            width: PositiveLength::new_const(500_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDefaults {
    pub layers: BTreeSet<Layer>,
}

impl Default for ZoneDefaults {
    fn default() -> Self {
        Self {
            layers: BTreeSet::from([Layer::TopCopper]),
        }
    }
}

/// Initial properties of the placement tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    pub hole: HoleDefaults,
    pub via: ViaDefaults,
    pub polygon: PolygonDefaults,
    pub plane: PlaneDefaults,
    pub stroke_text: StrokeTextDefaults,
    pub trace: TraceDefaults,
    pub zone: ZoneDefaults,
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub history: HistorySettings,
    pub tools: ToolDefaults,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the combination of values.
    ///
    /// Single values are already range checked while deserializing.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.history.max_depth > MAX_HISTORY_DEPTH {
            return Err(SettingsError::invalid(
                "history.max_depth",
                format!("must not exceed {}", MAX_HISTORY_DEPTH),
            ));
        }

        let via = &self.tools.via;
        if via.drill > via.size {
            return Err(SettingsError::invalid(
                "tools.via.drill",
                "must not exceed the via size",
            ));
        }

        let geometry_layers = allowed_geometry_layers();
        if !geometry_layers.contains(&self.tools.polygon.layer) {
            return Err(SettingsError::invalid(
                "tools.polygon.layer",
                format!("{} cannot hold polygons", self.tools.polygon.layer),
            ));
        }
        if !geometry_layers.contains(&self.tools.stroke_text.layer) {
            return Err(SettingsError::invalid(
                "tools.stroke_text.layer",
                format!("{} cannot hold texts", self.tools.stroke_text.layer),
            ));
        }
        if self.tools.stroke_text.text.trim().is_empty() {
            return Err(SettingsError::invalid("tools.stroke_text.text", "must not be empty"));
        }

        if !self.tools.plane.layer.is_copper() {
            return Err(SettingsError::invalid(
                "tools.plane.layer",
                "must be a copper layer",
            ));
        }
        if !self.tools.trace.layer.is_copper() {
            return Err(SettingsError::invalid(
                "tools.trace.layer",
                "must be a copper layer",
            ));
        }

        let zone = &self.tools.zone;
        if zone.layers.is_empty() {
            return Err(SettingsError::invalid("tools.zone.layers", "must not be empty"));
        }
        if zone.layers.iter().any(|l| !l.is_copper()) {
            return Err(SettingsError::invalid(
                "tools.zone.layers",
                "must only contain copper layers",
            ));
        }

        Ok(())
    }
}
