//! Vertrag für die Terrain-Höhenabfrage.

use glam::Vec3;

/// Liefert die Bodenhöhe (Welt-Y) an einer horizontalen Weltposition.
///
/// Außerhalb bekannter Bodenflächen ist der Wert 0.0.
pub trait HeightSampler {
    /// Höhe an Weltposition (x, z)
    fn sample_height(&self, x: f32, z: f32) -> f32;

    /// Höhe unter einer 3D-Position (Y wird ignoriert)
    fn height_at(&self, position: Vec3) -> f32 {
        self.sample_height(position.x, position.z)
    }
}

impl<F> HeightSampler for F
where
    F: Fn(f32, f32) -> f32,
{
    fn sample_height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Ebener Boden auf konstanter Höhe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatGround {
    /// Bodenhöhe in Metern
    pub elevation: f32,
}

impl FlatGround {
    /// Erstellt ebenen Boden auf der angegebenen Höhe
    pub fn new(elevation: f32) -> Self {
        Self { elevation }
    }
}

impl HeightSampler for FlatGround {
    fn sample_height(&self, _x: f32, _z: f32) -> f32 {
        self.elevation
    }
}
