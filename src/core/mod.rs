//! Core-Domänentypen: Pfad, Platzierungen, Terrain-Abfrage, Zufall.

mod error;
pub mod heightmap;
mod instance;
/// Zaunpfad als Punktliste im Container-Raum
///
/// Dieses Modul definiert:
/// - FencePath: Polylinie mit optionalem Schluss-Segment
/// - Einfüge- und Lösch-Abfragen für die Bearbeitung
pub mod path;
mod placement;
mod random;
mod sampler;

pub use error::LayoutError;
pub use heightmap::{Heightmap, TerrainTiles, WorldBounds};
pub use instance::{InstanceFactory, RecordedInstance, RecordingFactory};
pub use path::FencePath;
pub use placement::{Placement, ShearFrame, TemplateId};
pub use random::{RandomSource, SeededRandom};
pub use sampler::{FlatGround, HeightSampler};
