//! Heightmap-Terrain als `HeightSampler`.
//!
//! Graustufenbilder (8 oder 16 Bit) werden auf einen Weltbereich gelegt und
//! bikubisch abgetastet. Mehrere Kacheln lassen sich über `TerrainTiles`
//! kombinieren; außerhalb aller Kacheln ist der Boden 0.0.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use image::{DynamicImage, GenericImageView};

use super::HeightSampler;

/// Weltkoordinaten-Begrenzung einer Heightmap (X/Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimale X-Koordinate
    pub min_x: f32,
    /// Minimale Z-Koordinate
    pub min_z: f32,
    /// Maximale X-Koordinate
    pub max_x: f32,
    /// Maximale Z-Koordinate
    pub max_z: f32,
}

impl WorldBounds {
    /// Quadratischer Bereich, zentriert um (0, 0)
    pub fn centered(size: f32) -> Self {
        let half = size / 2.0;
        Self {
            min_x: -half,
            min_z: -half,
            max_x: half,
            max_z: half,
        }
    }

    /// Bereich ab einer Ecke mit Ausdehnung (size_x, size_z)
    pub fn from_corner(min_x: f32, min_z: f32, size_x: f32, size_z: f32) -> Self {
        Self {
            min_x,
            min_z,
            max_x: min_x + size_x,
            max_z: min_z + size_z,
        }
    }

    /// Halboffene Enthaltensprüfung: Min inklusive, Max exklusiv
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x < self.max_x && z >= self.min_z && z < self.max_z
    }

    fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }
}

/// Graustufen-Heightmap über einem Weltbereich.
#[derive(Debug, Clone)]
pub struct Heightmap {
    /// Normalisierte Grauwerte [0.0, 1.0], zeilenweise
    values: Vec<f32>,
    width: u32,
    height: u32,
    bounds: WorldBounds,
    /// Meter pro normalisiertem Grauwert 1.0
    height_scale: f32,
    /// Welthöhe der Terrain-Basis (wird addiert)
    base_elevation: f32,
}

impl Heightmap {
    /// Lädt ein Graustufenbild (PNG) und legt es auf `bounds`.
    pub fn load(path: &Path, bounds: WorldBounds, height_scale: f32) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Heightmap konnte nicht geladen werden: {}", path.display()))?;
        let heightmap = Self::from_image(image, bounds, height_scale)?;

        log::info!(
            "Heightmap geladen: {} ({}x{}), Bereich ({:.1}, {:.1}) bis ({:.1}, {:.1})",
            path.display(),
            heightmap.width,
            heightmap.height,
            bounds.min_x,
            bounds.min_z,
            bounds.max_x,
            bounds.max_z
        );
        Ok(heightmap)
    }

    /// Übernimmt ein bereits dekodiertes Bild; 16-Bit-Formate behalten ihre Auflösung.
    pub fn from_image(image: DynamicImage, bounds: WorldBounds, height_scale: f32) -> Result<Self> {
        let (width, height) = image.dimensions();
        let values: Vec<f32> = match image.color() {
            image::ColorType::L16
            | image::ColorType::La16
            | image::ColorType::Rgb16
            | image::ColorType::Rgba16 => image
                .into_luma16()
                .pixels()
                .map(|p| p[0] as f32 / u16::MAX as f32)
                .collect(),
            _ => image
                .into_luma8()
                .pixels()
                .map(|p| p[0] as f32 / u8::MAX as f32)
                .collect(),
        };
        Self::from_values(width, height, values, bounds, height_scale)
    }

    /// Erstellt eine Heightmap aus normalisierten Werten (zeilenweise, Z-Zeilen).
    pub fn from_values(
        width: u32,
        height: u32,
        values: Vec<f32>,
        bounds: WorldBounds,
        height_scale: f32,
    ) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "Heightmap braucht mindestens ein Pixel ({}x{})",
            width,
            height
        );
        ensure!(
            values.len() == (width as usize) * (height as usize),
            "Heightmap {}x{} erwartet {} Werte, erhalten: {}",
            width,
            height,
            (width as usize) * (height as usize),
            values.len()
        );
        ensure!(
            bounds.width() > 0.0 && bounds.depth() > 0.0,
            "Heightmap-Bereich ist leer"
        );

        Ok(Self {
            values,
            width,
            height,
            bounds,
            height_scale,
            base_elevation: 0.0,
        })
    }

    /// Setzt die Basis-Höhe der Kachel (Builder)
    pub fn with_base_elevation(mut self, base_elevation: f32) -> Self {
        self.base_elevation = base_elevation;
        self
    }

    /// Weltbereich der Heightmap
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Pixel-Dimensionen
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bikubisch interpolierter Grauwert an Pixelkoordinate (px, pz).
    fn sample_bicubic(&self, px: f32, pz: f32) -> f32 {
        let x0 = px.floor() as i64;
        let z0 = pz.floor() as i64;
        let fx = px - px.floor();
        let fz = pz - pz.floor();

        let mut rows = [0.0f32; 4];
        for (j, row) in rows.iter_mut().enumerate() {
            let z = z0 + j as i64 - 1;
            let samples: [f32; 4] =
                std::array::from_fn(|i| self.value_clamped(x0 + i as i64 - 1, z));
            *row = catmull_rom(samples, fx);
        }
        catmull_rom(rows, fz)
    }

    fn value_clamped(&self, x: i64, z: i64) -> f32 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let z = z.clamp(0, self.height as i64 - 1) as usize;
        self.values[z * self.width as usize + x]
    }
}

/// Catmull-Rom-Interpolation zwischen `p[1]` und `p[2]`.
fn catmull_rom(p: [f32; 4], t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p[1])
        + (-p[0] + p[2]) * t
        + (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]) * t2
        + (-p[0] + 3.0 * p[1] - 3.0 * p[2] + p[3]) * t3)
}

impl HeightSampler for Heightmap {
    /// Höhe in Metern; Positionen außerhalb werden auf den Rand geklemmt.
    fn sample_height(&self, x: f32, z: f32) -> f32 {
        let nx = ((x - self.bounds.min_x) / self.bounds.width()).clamp(0.0, 1.0);
        let nz = ((z - self.bounds.min_z) / self.bounds.depth()).clamp(0.0, 1.0);
        let px = nx * (self.width - 1) as f32;
        let pz = nz * (self.height - 1) as f32;

        let value = self.sample_bicubic(px, pz);
        log::trace!(
            "Heightmap-Abfrage ({:.2}, {:.2}) -> Pixel ({:.2}, {:.2}) -> {:.4}",
            x,
            z,
            px,
            pz,
            value
        );
        self.base_elevation + value * self.height_scale
    }
}

/// Mehrere sich nicht überlappende Terrain-Kacheln.
#[derive(Debug, Clone, Default)]
pub struct TerrainTiles {
    tiles: Vec<Heightmap>,
}

impl TerrainTiles {
    /// Erstellt eine leere Kachelmenge
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Kachel hinzu
    pub fn push(&mut self, tile: Heightmap) {
        self.tiles.push(tile);
    }

    /// Anzahl der Kacheln
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true`, wenn keine Kachel vorhanden ist
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl FromIterator<Heightmap> for TerrainTiles {
    fn from_iter<I: IntoIterator<Item = Heightmap>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

impl HeightSampler for TerrainTiles {
    /// Die erste Kachel, die (x, z) enthält, antwortet; sonst 0.0.
    fn sample_height(&self, x: f32, z: f32) -> f32 {
        self.tiles
            .iter()
            .find(|tile| tile.bounds.contains(x, z))
            .map_or(0.0, |tile| tile.sample_height(x, z))
    }
}
