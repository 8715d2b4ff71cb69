//! Fence Layout Library.
//! Prozedurales Auslegen von Zäunen und Objektreihen entlang einer Polylinie.

pub mod app;
pub mod core;
pub mod layout;
pub mod shared;

pub use app::{EditMode, PathEditor};
pub use core::{
    FencePath, FlatGround, HeightSampler, Heightmap, InstanceFactory, LayoutError, Placement,
    RandomSource, RecordingFactory, SeededRandom, TemplateId, TerrainTiles, WorldBounds,
};
pub use layout::{LayoutEngine, LayoutPlan, LayoutResult, SpawnKind, SpawnRequest};
pub use shared::StyleConfig;
