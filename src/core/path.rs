//! Editierbarer Zaunpfad: geordnete Punkte plus Topologie (offen/geschlossen).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{HeightSampler, LayoutError};

/// Abstand (Meter), um den `next_append_point` den Pfad verlängert.
pub const APPEND_STEP: f32 = 3.0;

/// Geordneter Punktzug im lokalen Raum der besitzenden Platzierung.
///
/// Die Reihenfolge der Punkte legt die Laufrichtung fest. Bei
/// `closed_loop` verbindet ein implizites Segment den letzten mit dem
/// ersten Punkt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FencePath {
    /// Pfadpunkte (lokal zu `origin`)
    points: Vec<Vec3>,
    /// Geschlossene Schleife (letzter → erster Punkt)
    pub closed_loop: bool,
    /// Weltposition der besitzenden Platzierung
    #[serde(default)]
    origin: Vec3,
}

impl FencePath {
    /// Erstellt einen leeren, offenen Pfad im Ursprung
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt einen Pfad aus vorhandenen lokalen Punkten
    pub fn from_points(points: Vec<Vec3>, closed_loop: bool) -> Self {
        Self {
            points,
            closed_loop,
            origin: Vec3::ZERO,
        }
    }

    /// Setzt die Weltposition der Platzierung (Builder)
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Alle Punkte in Pfadreihenfolge
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Anzahl der Punkte
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true`, wenn der Pfad keine Punkte hat
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Weltposition der besitzenden Platzierung
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Rechnet einen lokalen Punkt in Weltkoordinaten um
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local + self.origin
    }

    /// Rechnet eine Weltposition in den lokalen Raum des Pfads um
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        world - self.origin
    }

    /// Anzahl der Segmente: `len - 1`, bei geschlossener Schleife `+ 1`.
    /// Mit 0 oder 1 Punkten gibt es keine Segmente.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed_loop => n,
            n => n - 1,
        }
    }

    /// Iterator über alle Segmente als `(start, ende)` in lokalen Koordinaten,
    /// inklusive des Schließsegments.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let n = self.points.len();
        (0..self.segment_count()).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Index des nächstgelegenen Punkts (quadratische Distanz).
    ///
    /// Strikter `<`-Vergleich: bei Gleichstand gewinnt der niedrigste Index.
    fn closest_point(&self, query: Vec3) -> Option<(usize, f32)> {
        let mut closest: Option<(usize, f32)> = None;
        for (i, point) in self.points.iter().enumerate() {
            let dist_sq = point.distance_squared(query);
            if closest.is_none_or(|(_, best)| dist_sq < best) {
                closest = Some((i, dist_sq));
            }
        }
        closest
    }

    /// Ermittelt, an welchem Index ein neuer Punkt an `query` (lokal)
    /// eingefügt werden soll.
    ///
    /// Leerer Pfad → 0, ein Punkt → 1 (anhängen). Sonst entscheidet der
    /// nächstgelegene Punkt: an den Enden über das Skalarprodukt zum Nachbarn,
    /// bei inneren Punkten über die normierte Richtung zu Vorgänger und
    /// Nachfolger.
    pub fn insert_index_for(&self, query: Vec3) -> usize {
        let n = self.points.len();
        if n < 2 {
            return n;
        }

        let Some((closest, _)) = self.closest_point(query) else {
            return n;
        };
        let p = &self.points;

        if closest == 0 {
            // Liegt die Anfrage in Richtung des zweiten Punkts?
            if (query - p[0]).dot(p[1] - p[0]) > 0.0 {
                1
            } else {
                0
            }
        } else if closest == n - 1 {
            // Liegt die Anfrage in Richtung des vorletzten Punkts?
            if (query - p[n - 1]).dot(p[n - 2] - p[n - 1]) > 0.0 {
                n - 1
            } else {
                n
            }
        } else {
            let dir_prev = (p[closest - 1] - p[closest]).normalize_or_zero();
            let dir_next = (p[closest + 1] - p[closest]).normalize_or_zero();
            let dir_query = (query - p[closest]).normalize_or_zero();

            if dir_query.dot(dir_prev) > dir_query.dot(dir_next) {
                closest
            } else {
                closest + 1
            }
        }
    }

    /// Nächstgelegener Punkt, sofern seine quadratische Distanz kleiner als
    /// `radius²` ist (Löschkandidat).
    pub fn nearest_point_index_within_radius(&self, query: Vec3, radius: f32) -> Option<usize> {
        let (index, dist_sq) = self.closest_point(query)?;
        (dist_sq < radius * radius).then_some(index)
    }

    /// Fügt einen Punkt an `index` ein (`index == len` hängt an).
    pub fn insert_at(&mut self, index: usize, point: Vec3) -> Result<(), LayoutError> {
        if index > self.points.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        Ok(())
    }

    /// Entfernt den Punkt an `index` und gibt ihn zurück.
    pub fn remove_at(&mut self, index: usize) -> Result<Vec3, LayoutError> {
        if index >= self.points.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    /// Überschreibt die Position eines vorhandenen Punkts.
    pub fn set_point(&mut self, index: usize, point: Vec3) -> Result<(), LayoutError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Vorschlag für einen neu angehängten Punkt: verlängert das letzte
    /// Segment um `APPEND_STEP`, bei einem Punkt entlang +X.
    pub fn next_append_point(&self) -> Vec3 {
        match self.points.as_slice() {
            [] => Vec3::ZERO,
            [only] => *only + Vec3::X * APPEND_STEP,
            [.., prev, last] => *last + (*last - *prev).normalize_or_zero() * APPEND_STEP,
        }
    }

    /// Setzt alle Punkte auf die Bodenhöhe unter ihrer Weltposition.
    pub fn snap_to_ground<H: HeightSampler + ?Sized>(&mut self, sampler: &H) {
        let origin = self.origin;
        for point in &mut self.points {
            let world = *point + origin;
            point.y = sampler.sample_height(world.x, world.z) - origin.y;
        }
    }

    /// Verschiebt die besitzende Platzierung und legt alle Punkte neu auf den Boden.
    pub fn set_origin<H: HeightSampler + ?Sized>(&mut self, origin: Vec3, sampler: &H) {
        if self.origin == origin {
            return;
        }
        self.origin = origin;
        self.snap_to_ground(sampler);
        log::debug!(
            "Pfad-Ursprung verschoben nach ({:.2}, {:.2}, {:.2}), {} Punkte neu auf Boden gelegt",
            origin.x,
            origin.y,
            origin.z,
            self.points.len()
        );
    }
}

#[cfg(test)]
mod tests;
