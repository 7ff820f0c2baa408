//! Board layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    BoardOutlines,
    BoardCutouts,
    BoardDocumentation,
    BoardComments,
    BoardMeasures,
    TopPlacement,
    BotPlacement,
    TopDocumentation,
    BotDocumentation,
    TopNames,
    BotNames,
    TopValues,
    BotValues,
    TopLegend,
    BotLegend,
    TopStopMask,
    BotStopMask,
    TopSolderPaste,
    BotSolderPaste,
    TopCopper,
    /// Inner copper layer, numbered from 1 (closest to the top)
    InnerCopper(u8),
    BotCopper,
}

impl Layer {
    pub fn is_copper(&self) -> bool {
        matches!(self, Layer::TopCopper | Layer::InnerCopper(_) | Layer::BotCopper)
    }

    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Layer::TopPlacement
                | Layer::TopDocumentation
                | Layer::TopNames
                | Layer::TopValues
                | Layer::TopLegend
                | Layer::TopStopMask
                | Layer::TopSolderPaste
                | Layer::TopCopper
        )
    }

    pub fn is_bottom(&self) -> bool {
        matches!(
            self,
            Layer::BotPlacement
                | Layer::BotDocumentation
                | Layer::BotNames
                | Layer::BotValues
                | Layer::BotLegend
                | Layer::BotStopMask
                | Layer::BotSolderPaste
                | Layer::BotCopper
        )
    }

    /// Returns the counterpart on the other board side.
    ///
    /// Inner copper layer `n` maps to `inner_count + 1 - n`. Layers without a
    /// side are returned unchanged.
    pub fn mirrored(&self, inner_count: u8) -> Layer {
        match *self {
            Layer::TopPlacement => Layer::BotPlacement,
            Layer::BotPlacement => Layer::TopPlacement,
            Layer::TopDocumentation => Layer::BotDocumentation,
            Layer::BotDocumentation => Layer::TopDocumentation,
            Layer::TopNames => Layer::BotNames,
            Layer::BotNames => Layer::TopNames,
            Layer::TopValues => Layer::BotValues,
            Layer::BotValues => Layer::TopValues,
            Layer::TopLegend => Layer::BotLegend,
            Layer::BotLegend => Layer::TopLegend,
            Layer::TopStopMask => Layer::BotStopMask,
            Layer::BotStopMask => Layer::TopStopMask,
            Layer::TopSolderPaste => Layer::BotSolderPaste,
            Layer::BotSolderPaste => Layer::TopSolderPaste,
            Layer::TopCopper => Layer::BotCopper,
            Layer::BotCopper => Layer::TopCopper,
            Layer::InnerCopper(n) if n >= 1 && n <= inner_count => {
                Layer::InnerCopper(inner_count + 1 - n)
            }
            other => other,
        }
    }

    /// Copper layers from top to bottom.
    pub fn copper_layers(inner_count: u8) -> Vec<Layer> {
        let mut layers = vec![Layer::TopCopper];
        layers.extend((1..=inner_count).map(Layer::InnerCopper));
        layers.push(Layer::BotCopper);
        layers
    }

    pub fn name(&self) -> String {
        let name = match self {
            Layer::InnerCopper(n) => return format!("Inner Copper {}", n),
            Layer::BoardOutlines => "Board Outlines",
            Layer::BoardCutouts => "Board Cutouts",
            Layer::BoardDocumentation => "Board Documentation",
            Layer::BoardComments => "Board Comments",
            Layer::BoardMeasures => "Board Measures",
            Layer::TopPlacement => "Top Placement",
            Layer::BotPlacement => "Bottom Placement",
            Layer::TopDocumentation => "Top Documentation",
            Layer::BotDocumentation => "Bottom Documentation",
            Layer::TopNames => "Top Names",
            Layer::BotNames => "Bottom Names",
            Layer::TopValues => "Top Values",
            Layer::BotValues => "Bottom Values",
            Layer::TopLegend => "Top Legend",
            Layer::BotLegend => "Bottom Legend",
            Layer::TopStopMask => "Top Stop Mask",
            Layer::BotStopMask => "Bottom Stop Mask",
            Layer::TopSolderPaste => "Top Solder Paste",
            Layer::BotSolderPaste => "Bottom Solder Paste",
            Layer::TopCopper => "Top Copper",
            Layer::BotCopper => "Bottom Copper",
        };
        name.to_string()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Layers on which free graphics (polygons, texts) may be drawn.
pub fn allowed_geometry_layers() -> &'static [Layer] {
    &[
        Layer::BoardOutlines,
        Layer::BoardCutouts,
        Layer::BoardDocumentation,
        Layer::BoardComments,
        Layer::BoardMeasures,
        Layer::TopPlacement,
        Layer::BotPlacement,
        Layer::TopDocumentation,
        Layer::BotDocumentation,
        Layer::TopNames,
        Layer::BotNames,
        Layer::TopValues,
        Layer::BotValues,
        Layer::TopLegend,
        Layer::BotLegend,
        Layer::TopStopMask,
        Layer::BotStopMask,
        Layer::TopSolderPaste,
        Layer::BotSolderPaste,
        Layer::TopCopper,
        Layer::BotCopper,
    ]
}
