//! Scherung eines starren Segment-Modells entlang geneigten Terrains.
//!
//! Instancing-Schnittstellen bieten meist nur Translation/Rotation/Skalierung
//! (TRS). Eine Scherung `Y' = Y + k·Z` lässt sich aber als Kette
//! Rotation → Skalierung → Rotation → Skalierung darstellen:
//!
//! ```text
//! (a) Rotation um X mit θ/2
//! (b) Skalierung (1, cos θ/2, sin θ/2)
//! (c) Rotation um X mit −45°
//! (d) Skalierung (1, √2, √2 / sin θ)
//! ```
//!
//! θ ist der Winkel zwischen Hoch-Achse und geschertem Vorwärtsvektor.
//! Bei ebenem Boden ist θ = π/2 und die Kette ergibt die Identität.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

use glam::{Mat4, Quat, Vec3};

/// Unterhalb dieses Abstands (Radiant) zu 0 bzw. π gilt der Scherwinkel als degeneriert.
pub const MIN_SHEAR_ANGLE: f32 = 0.01;

/// Scherwinkel θ für einen Höhenunterschied über eine horizontale Schrittlänge.
pub fn shear_angle(height_delta: f32, step_length: f32) -> f32 {
    FRAC_PI_2 - height_delta.atan2(step_length)
}

/// Ein Träger der Scherkette: Rotation gefolgt von nicht-uniformer Skalierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearCarrier {
    /// Rotation um die lokale X-Achse
    pub rotation: Quat,
    /// Nicht-uniforme Skalierung
    pub scale: Vec3,
}

impl ShearCarrier {
    /// Matrix `R · S` des Trägers
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation) * Mat4::from_scale(self.scale)
    }
}

/// Zerlegung einer Scherung in zwei Rotations-Skalierungs-Träger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearDecomposition {
    /// Scherwinkel θ (Radiant)
    pub angle: f32,
    /// Äußerer Träger (Schritte a + b)
    pub outer: ShearCarrier,
    /// Innerer Träger (Schritte c + d)
    pub inner: ShearCarrier,
}

impl ShearDecomposition {
    /// Baut die Zerlegung für den Winkel θ.
    ///
    /// `None`, wenn θ zu nah an 0 oder π liegt (sin θ → 0).
    pub fn from_angle(angle: f32) -> Option<Self> {
        if !angle.is_finite()
            || angle.abs() <= MIN_SHEAR_ANGLE
            || (PI - angle).abs() <= MIN_SHEAR_ANGLE
        {
            return None;
        }

        let half = angle * 0.5;
        Some(Self {
            angle,
            outer: ShearCarrier {
                rotation: Quat::from_rotation_x(half),
                scale: Vec3::new(1.0, half.cos(), half.sin()),
            },
            inner: ShearCarrier {
                rotation: Quat::from_rotation_x(-FRAC_PI_4),
                scale: Vec3::new(1.0, SQRT_2, SQRT_2 / angle.sin()),
            },
        })
    }

    /// Zerlegung für einen Höhenunterschied über eine horizontale Schrittlänge.
    pub fn from_slope(height_delta: f32, step_length: f32) -> Option<Self> {
        Self::from_angle(shear_angle(height_delta, step_length))
    }

    /// Scherfaktor k der resultierenden Abbildung `Y' = Y + k·Z` (= cot θ).
    pub fn slope(&self) -> f32 {
        self.angle.cos() / self.angle.sin()
    }

    /// Beide Träger als Matrizen (außen, innen)
    pub fn carrier_matrices(&self) -> [Mat4; 2] {
        [self.outer.matrix(), self.inner.matrix()]
    }

    /// Zusammengesetzte Scher-Matrix (außen · innen)
    pub fn matrix(&self) -> Mat4 {
        self.outer.matrix() * self.inner.matrix()
    }
}
