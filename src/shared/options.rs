//! Stil-Konfiguration eines Zaunpfads.
//!
//! `StyleConfig` enthält alle vom Host änderbaren Layout-Parameter und wird
//! als TOML gespeichert. Die `const`-Werte sind die Standardwerte.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{LayoutError, TemplateId};

// ── Layout ──────────────────────────────────────────────────────────

/// Nominale Segmentlänge in Metern.
pub const SEGMENT_LENGTH: f32 = 2.0;
/// Untergrenze der skalierten Segmentlänge (schützt vor Division durch ~0).
pub const MIN_SCALED_LENGTH: f32 = 0.1;
/// Standard-Seed für reproduzierbare Variationen.
pub const LAYOUT_SEED: u64 = 123;

// ── Objekt-Modus ────────────────────────────────────────────────────

/// Standard-Gier-Variation [min, max] in Grad.
pub const ROTATION_VARIATION: Vec2 = Vec2::new(-180.0, 180.0);
/// Standard-Skalierungs-Variation [min, max].
pub const SCALE_VARIATION: Vec2 = Vec2::new(1.0, 1.0);

// ── Editieren ───────────────────────────────────────────────────────

/// Pick-Radius (Meter) für das Löschen von Punkten (10 m² Quadratdistanz).
pub const DELETE_PICK_RADIUS: f32 = 3.162_277_7;

/// Layout-Parameter eines Zaunpfads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Vorlagen-Palette; leere Slots fallen auf Slot 0 zurück
    #[serde(with = "palette_slots")]
    pub templates: Vec<Option<TemplateId>>,
    /// Abschlusspfosten am Ende offener Zäune (nur Fence-Modus)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_post: Option<TemplateId>,
    /// Versatz der Instanz am Segmentanfang (Fence-Modus)
    pub end_offset: Vec3,
    /// Basis-Gier in Grad
    pub rotation: f32,
    /// Nominale Segmentlänge in Metern
    pub segment_length: f32,
    /// Basis-Skalierung
    pub scale: Vec3,
    /// Einzelobjekte statt durchgehender Segmente
    pub object_mode: bool,
    /// Positions-Variation als Halbbreiten (X seitlich, Y entlang der Richtung)
    pub position_variation: Vec2,
    /// Gier-Variation [min, max] in Grad
    pub rotation_variation: Vec2,
    /// Uniforme Skalierungs-Variation [min, max]
    pub scale_variation: Vec2,
    /// Segmente per Scherung an die Hangneigung anpassen
    pub use_shear: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            templates: vec![None],
            end_post: None,
            end_offset: Vec3::ZERO,
            rotation: 0.0,
            segment_length: SEGMENT_LENGTH,
            scale: Vec3::ONE,
            object_mode: false,
            position_variation: Vec2::ZERO,
            rotation_variation: ROTATION_VARIATION,
            scale_variation: SCALE_VARIATION,
            use_shear: true,
        }
    }
}

impl StyleConfig {
    /// Stil mit einer einzelnen Vorlage (Builder-Einstieg)
    pub fn with_template(template: impl Into<TemplateId>) -> Self {
        Self {
            templates: vec![Some(template.into())],
            ..Self::default()
        }
    }

    /// Segmentlänge inkl. Längsskalierung (Z)
    pub fn scaled_length(&self) -> f32 {
        self.segment_length * self.scale.z
    }

    /// `true`, wenn die Palette verwendbar ist (Slot 0 belegt).
    pub fn has_templates(&self) -> bool {
        matches!(self.templates.first(), Some(Some(_)))
    }

    /// Vorlage für einen Palettenindex, leere Slots fallen auf Slot 0 zurück.
    pub fn template_at(&self, index: usize) -> Option<&TemplateId> {
        self.templates
            .get(index)
            .and_then(Option::as_ref)
            .or_else(|| self.templates.first().and_then(Option::as_ref))
    }

    /// Prüft Werte, die der Layout-Durchlauf nur per Clamping verarbeiten kann.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let finite = self.end_offset.is_finite()
            && self.rotation.is_finite()
            && self.segment_length.is_finite()
            && self.scale.is_finite()
            && self.position_variation.is_finite()
            && self.rotation_variation.is_finite()
            && self.scale_variation.is_finite();
        if !finite {
            return Err(LayoutError::InvalidConfiguration(
                "nicht-endliche Werte im Stil".to_string(),
            ));
        }
        if self.scaled_length() <= 0.0 {
            return Err(LayoutError::InvalidConfiguration(format!(
                "skalierte Segmentlänge {} muss positiv sein",
                self.scaled_length()
            )));
        }
        Ok(())
    }

    /// Parst einen Stil aus TOML; fehlende Felder erhalten Standardwerte.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Lädt einen Stil aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(style) => {
                    log::info!("Zaun-Stil geladen aus: {}", path.display());
                    style
                }
                Err(e) => {
                    log::warn!("Stil-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Stil-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert den Stil als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Zaun-Stil gespeichert nach: {}", path.display());
        Ok(())
    }
}

/// TOML kennt kein `null`: leere Palettenslots werden als `""` gespeichert.
mod palette_slots {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::TemplateId;

    pub fn serialize<S: Serializer>(
        slots: &[Option<TemplateId>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(slots.iter().map(|slot| slot.as_ref().map_or("", |t| t.as_str())))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Option<TemplateId>>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names
            .into_iter()
            .map(|name| (!name.is_empty()).then(|| TemplateId(name)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let style = StyleConfig::default();
        assert_eq!(style.segment_length, SEGMENT_LENGTH);
        assert_eq!(style.rotation_variation, ROTATION_VARIATION);
        assert!(style.use_shear);
        assert!(!style.has_templates());
        assert_eq!(style.scaled_length(), 2.0);
    }

    #[test]
    fn template_fallback_to_first_slot() {
        let mut style = StyleConfig::with_template("a");
        style.templates.push(None);
        style.templates.push(Some(TemplateId::from("c")));

        assert_eq!(style.template_at(0).map(TemplateId::as_str), Some("a"));
        assert_eq!(style.template_at(1).map(TemplateId::as_str), Some("a"));
        assert_eq!(style.template_at(2).map(TemplateId::as_str), Some("c"));
        assert_eq!(style.template_at(9).map(TemplateId::as_str), Some("a"));
    }

    #[test]
    fn palette_without_first_slot_is_unusable() {
        let style = StyleConfig {
            templates: vec![None, Some(TemplateId::from("b"))],
            ..StyleConfig::default()
        };
        assert!(!style.has_templates());
        assert!(!StyleConfig {
            templates: Vec::new(),
            ..StyleConfig::default()
        }
        .has_templates());
    }

    #[test]
    fn validate_flags_non_positive_length() {
        let mut style = StyleConfig::default();
        assert!(style.validate().is_ok());

        style.segment_length = 0.0;
        assert!(matches!(
            style.validate(),
            Err(LayoutError::InvalidConfiguration(_))
        ));

        style.segment_length = 2.0;
        style.scale.z = f32::NAN;
        assert!(style.validate().is_err());
    }

    #[test]
    fn toml_roundtrip_keeps_empty_slots() {
        let mut style = StyleConfig::with_template("fence_a");
        style.templates.push(None);
        style.end_post = Some(TemplateId::from("post"));
        style.scale = Vec3::new(1.0, 1.5, 0.5);

        let text = toml::to_string_pretty(&style).expect("serialisierbar");
        let parsed = StyleConfig::from_toml_str(&text).expect("parsebar");
        assert_eq!(parsed, style);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let parsed = StyleConfig::from_toml_str("segment_length = 4.0\nobject_mode = true\n")
            .expect("parsebar");
        assert_eq!(parsed.segment_length, 4.0);
        assert!(parsed.object_mode);
        assert_eq!(parsed.scale, Vec3::ONE);
        assert_eq!(parsed.templates, vec![None]);
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "fence_layout_style_{}.toml",
            std::process::id()
        ));
        let style = StyleConfig::with_template("hedge");
        style.save_to_file(&path).expect("speicherbar");

        let loaded = StyleConfig::load_from_file(&path);
        assert_eq!(loaded, style);
        let _ = std::fs::remove_file(&path);

        // Fehlende Datei → Standardwerte
        assert_eq!(StyleConfig::load_from_file(&path), StyleConfig::default());
    }
}
