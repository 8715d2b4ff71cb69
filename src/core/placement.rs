//! Ergebnis-Transformationen einer Platzierung.

use glam::{Mat4, Quat, Vec3};

use crate::layout::shear::ShearDecomposition;

/// Referenz auf eine Instanz-Vorlage (Asset-Name/Pfad beim Host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Erstellt eine Vorlagen-Referenz
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name der Vorlage
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Geschertes Trägersystem einer Fence-Instanz.
///
/// Ersetzt die zwei Zwischenknoten einer Szenenhierarchie: der Träger steht
/// am Pivot, ist per Heading gedreht und trägt die Scherkette. Die Instanz
/// selbst liegt mit `local_offset` darin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearFrame {
    /// Ausrichtung des Trägers (Gier um +Y)
    pub heading: Quat,
    /// Scherkette des Trägers
    pub decomposition: ShearDecomposition,
    /// Position der Instanz innerhalb des gescherten Trägers
    pub local_offset: Vec3,
}

/// Transformation einer Instanz im Raum des Pfad-Containers.
///
/// Ohne Scherung ist `rotation`/`scale` direkt die TRS-Transformation am
/// Pivot `position`. Mit Scherung gelten `rotation`/`scale` lokal im
/// gescherten Träger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Pivot (Container-lokal)
    pub position: Vec3,
    /// Rotation der Instanz
    pub rotation: Quat,
    /// Nicht-uniforme Skalierung der Instanz
    pub scale: Vec3,
    /// Optionaler Scher-Träger
    pub shear: Option<ShearFrame>,
}

impl Placement {
    /// Reine TRS-Platzierung
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            shear: None,
        }
    }

    /// `true`, wenn die Instanz in einem gescherten Träger sitzt
    pub fn is_sheared(&self) -> bool {
        self.shear.is_some()
    }

    /// Vollständige Matrix Instanz → Container.
    pub fn to_matrix(&self) -> Mat4 {
        match &self.shear {
            None => Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position),
            Some(frame) => {
                Mat4::from_translation(self.position)
                    * Mat4::from_quat(frame.heading)
                    * frame.decomposition.matrix()
                    * Mat4::from_scale_rotation_translation(
                        self.scale,
                        self.rotation,
                        frame.local_offset,
                    )
            }
        }
    }

    /// Container-lokale Position des Instanz-Ursprungs (inkl. Offset im Träger)
    pub fn origin(&self) -> Vec3 {
        self.to_matrix().transform_point3(Vec3::ZERO)
    }
}
