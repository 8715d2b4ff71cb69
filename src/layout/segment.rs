//! Geometrie eines einzelnen Pfadsegments.

use glam::{Quat, Vec3};

use crate::shared::options::MIN_SCALED_LENGTH;

/// Aufteilung eines Segments in gleich lange Instanz-Schritte.
///
/// Die Vertikale wird ignoriert: Anzahl, Streckung und Heading ergeben sich
/// aus der horizontalen Projektion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    /// Segmentanfang (Welt)
    pub start: Vec3,
    /// Horizontale Einheitsrichtung (Null bei Länge 0)
    pub direction: Vec3,
    /// Horizontale Länge L
    pub horizontal_length: f32,
    /// Anzahl Instanzen, mindestens 1
    pub instance_count: usize,
    /// Längsstreckung jeder Instanz, damit die Schritte das Segment exakt füllen
    pub stretch: f32,
    /// Gier in Grad, sodass lokales +Z entlang `direction` zeigt
    pub heading_deg: f32,
}

impl SegmentGeometry {
    /// Teilt das Segment `start → end` für die skalierte Segmentlänge auf.
    pub fn new(start: Vec3, end: Vec3, scaled_length: f32) -> Self {
        let flat = Vec3::new(end.x - start.x, 0.0, end.z - start.z);
        let horizontal_length = flat.length();
        let unit_length = scaled_length.max(MIN_SCALED_LENGTH);

        let nominal = horizontal_length / unit_length;
        let instance_count = nominal.round().max(1.0) as usize;
        let stretch = (horizontal_length / instance_count as f32) / unit_length;

        // +X entspricht 90°, +Z entspricht 0°
        let heading_deg = 90.0 - flat.z.atan2(flat.x).to_degrees();

        Self {
            start,
            direction: flat.normalize_or_zero(),
            horizontal_length,
            instance_count,
            stretch,
            heading_deg,
        }
    }

    /// Horizontale Länge eines Instanz-Schritts
    pub fn step_length(&self) -> f32 {
        self.horizontal_length / self.instance_count as f32
    }

    /// Horizontaler Schrittvektor
    pub fn step(&self) -> Vec3 {
        self.direction * self.step_length()
    }

    /// Anfang des Schritts `i` (Welt, Y des Segmentanfangs)
    pub fn step_start(&self, i: usize) -> Vec3 {
        self.start + self.step() * i as f32
    }

    /// Gier-Rotation des Segments
    pub fn heading(&self) -> Quat {
        Quat::from_rotation_y(self.heading_deg.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn straight_segment_along_x() {
        let geo = SegmentGeometry::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(geo.instance_count, 5);
        assert_abs_diff_eq!(geo.stretch, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(geo.heading_deg, 90.0, epsilon = 1e-5);

        let forward = geo.heading() * Vec3::Z;
        assert_abs_diff_eq!(forward.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(forward.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn rounding_stretches_to_exact_fit() {
        let geo = SegmentGeometry::new(Vec3::ZERO, Vec3::new(0.0, 4.0, 9.0), 2.0);
        // 9 / 2 = 4.5 → 5 Instanzen (round half away from zero)
        assert_eq!(geo.instance_count, 5);
        assert_abs_diff_eq!(
            geo.instance_count as f32 * 2.0 * geo.stretch,
            geo.horizontal_length,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(geo.heading_deg, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(geo.step_start(5).z, 9.0, epsilon = 1e-5);
    }

    #[test]
    fn short_segment_still_gets_one_instance() {
        let geo = SegmentGeometry::new(Vec3::ZERO, Vec3::new(0.3, 0.0, 0.0), 2.0);
        assert_eq!(geo.instance_count, 1);
        assert_abs_diff_eq!(geo.stretch, 0.15, epsilon = 1e-6);
    }

    #[test]
    fn tiny_scaled_length_is_clamped() {
        let geo = SegmentGeometry::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.0);
        assert_eq!(geo.instance_count, 10);
        assert!(geo.stretch.is_finite());
    }

    #[test]
    fn zero_length_segment_is_finite() {
        let geo = SegmentGeometry::new(Vec3::ONE, Vec3::new(1.0, 5.0, 1.0), 2.0);
        assert_eq!(geo.instance_count, 1);
        assert_eq!(geo.step(), Vec3::ZERO);
        assert_eq!(geo.stretch, 0.0);
    }
}
