//! # pcbkit Core
//!
//! Core types shared by all pcbkit crates: the error taxonomy, integer units,
//! geometry primitives, board layers and a change notifier.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod notify;
pub mod units;

pub use error::{Error, Result, ValidationError};
pub use geometry::{Orientation, Path, Point, Vertex};
pub use layer::{allowed_geometry_layers, Layer};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use units::{Angle, Length, PositiveLength, UnsignedLength};
