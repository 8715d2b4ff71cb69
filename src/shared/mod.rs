//! Geteilte Konfiguration und Standardwerte.

pub mod options;

pub use options::StyleConfig;
pub use options::{DELETE_PICK_RADIUS, LAYOUT_SEED, MIN_SCALED_LENGTH, SEGMENT_LENGTH};
