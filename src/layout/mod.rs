//! Prozedurales Layout: Pfad + Stil → platzierte Instanzen.
//!
//! Jeder Durchlauf ist ein vollständiger Neuaufbau (alle Instanzen verwerfen,
//! dann neu erzeugen). Der Zufallsgenerator wird zu Beginn jedes Durchlaufs
//! neu geseedet, daher liefern identische Eingaben identische Ergebnisse.

mod segment;
pub mod shear;

pub use segment::SegmentGeometry;
pub use shear::{ShearCarrier, ShearDecomposition};

use glam::{Quat, Vec3};

use crate::core::{
    FencePath, HeightSampler, InstanceFactory, Placement, RandomSource, SeededRandom, ShearFrame,
    TemplateId,
};
use crate::shared::StyleConfig;

/// Art einer Platzierung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    /// Einzelobjekt (Objekt-Modus)
    Object,
    /// Durchgehendes Zaunsegment
    Fence,
    /// Abschlusspfosten am Pfadende
    EndPost,
}

/// Eine geplante Instanz.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    /// Gewählte Vorlage
    pub template: TemplateId,
    /// Platzierung im Container
    pub placement: Placement,
    /// Art der Platzierung
    pub kind: SpawnKind,
}

/// Statistik eines ausgelegten Segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    /// Segmentindex im Pfad
    pub index: usize,
    /// Horizontale Segmentlänge
    pub horizontal_length: f32,
    /// Anzahl der Segment-Instanzen (ohne Zusatzobjekt am Pfadende)
    pub instance_count: usize,
    /// Längsstreckung je Instanz
    pub stretch: f32,
    /// Heading in Grad
    pub heading_deg: f32,
}

/// Ergebnis eines Layout-Durchlaufs ohne Seiteneffekte.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    /// Alle Instanzen in Erzeugungsreihenfolge
    pub requests: Vec<SpawnRequest>,
    /// Ausgelegte Segmente
    pub segments: Vec<SegmentLayout>,
}

impl LayoutPlan {
    /// Anzahl geplanter Instanzen
    pub fn instance_count(&self) -> usize {
        self.requests.len()
    }

    /// Platzierung des Abschlusspfostens, falls geplant
    pub fn end_post(&self) -> Option<&Placement> {
        self.requests
            .iter()
            .find(|r| r.kind == SpawnKind::EndPost)
            .map(|r| &r.placement)
    }

    /// Alle Platzierungen in Erzeugungsreihenfolge
    pub fn placements(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.requests.iter().map(|r| &r.placement)
    }
}

/// Zusammenfassung eines `rebuild`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    /// Anzahl erzeugter Instanzen (inkl. Abschlusspfosten)
    pub instance_count: usize,
    /// Anzahl ausgelegter Segmente
    pub segment_count: usize,
    /// Platzierung des Abschlusspfostens
    pub end_post: Option<Placement>,
}

/// Rotation einer Fence-Instanz: Segment-Heading plus Basis-Gier.
fn fence_rotation(heading: Quat, base_rotation_deg: f32) -> Quat {
    heading * Quat::from_rotation_y(base_rotation_deg.to_radians())
}

/// Layout-Engine mit austauschbarer Zufallsquelle.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<R = SeededRandom> {
    rng: R,
}

impl LayoutEngine<SeededRandom> {
    /// Engine mit `StdRng`-basierter Zufallsquelle
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RandomSource> LayoutEngine<R> {
    /// Engine mit eigener Zufallsquelle
    pub fn with_random(rng: R) -> Self {
        Self { rng }
    }

    /// Berechnet alle Platzierungen für Pfad und Stil.
    ///
    /// Keine Segmente oder keine verwendbare Vorlage → leerer Plan.
    pub fn plan<H: HeightSampler + ?Sized>(
        &mut self,
        path: &FencePath,
        style: &StyleConfig,
        sampler: &H,
        seed: u64,
    ) -> LayoutPlan {
        self.rng.reseed(seed);
        let mut plan = LayoutPlan::default();

        let segment_count = path.segment_count();
        if segment_count == 0 {
            log::debug!("Layout übersprungen: Pfad hat keine Segmente");
            return plan;
        }
        if !style.has_templates() {
            log::debug!("Layout übersprungen: keine Vorlage in Slot 0");
            return plan;
        }
        if let Err(e) = style.validate() {
            log::warn!("{}; Segmentlänge wird geklemmt", e);
        }

        let origin = path.origin();
        for (index, (start, end)) in path.segments().enumerate() {
            let geometry = SegmentGeometry::new(
                path.to_world(start),
                path.to_world(end),
                style.scaled_length(),
            );
            log::trace!(
                "Segment {}: L={:.3}, {} Instanzen, Streckung {:.4}, Heading {:.2}°",
                index,
                geometry.horizontal_length,
                geometry.instance_count,
                geometry.stretch,
                geometry.heading_deg
            );

            if style.object_mode {
                let is_open_end = !path.closed_loop && index == segment_count - 1;
                self.place_objects(&geometry, is_open_end, style, sampler, origin, &mut plan);
            } else {
                self.place_fences(&geometry, style, sampler, origin, &mut plan);
            }

            plan.segments.push(SegmentLayout {
                index,
                horizontal_length: geometry.horizontal_length,
                instance_count: geometry.instance_count,
                stretch: geometry.stretch,
                heading_deg: geometry.heading_deg,
            });
        }

        Self::place_end_post(path, style, &mut plan);
        plan
    }

    /// Verwirft alle Instanzen des Containers und erzeugt den Plan neu.
    pub fn rebuild<H, F>(
        &mut self,
        path: &FencePath,
        style: &StyleConfig,
        sampler: &H,
        factory: &mut F,
        seed: u64,
    ) -> LayoutResult
    where
        H: HeightSampler + ?Sized,
        F: InstanceFactory + ?Sized,
    {
        factory.destroy_all();

        let plan = self.plan(path, style, sampler, seed);
        for request in &plan.requests {
            factory.create(&request.template, &request.placement);
        }

        let result = LayoutResult {
            instance_count: plan.instance_count(),
            segment_count: plan.segments.len(),
            end_post: plan.end_post().copied(),
        };
        log::debug!(
            "Zaun neu aufgebaut: {} Instanzen auf {} Segmenten",
            result.instance_count,
            result.segment_count
        );
        result
    }

    /// Wählt eine Vorlage gleichverteilt aus der Palette.
    fn pick_template(&mut self, style: &StyleConfig) -> Option<TemplateId> {
        let slots = i32::try_from(style.templates.len()).unwrap_or(i32::MAX);
        let index = self.rng.range_int(0, slots).max(0) as usize;
        style.template_at(index).cloned()
    }

    /// Objekt-Modus: Einzelobjekte mit zufälliger Position, Gier und Größe.
    fn place_objects<H: HeightSampler + ?Sized>(
        &mut self,
        geometry: &SegmentGeometry,
        is_open_end: bool,
        style: &StyleConfig,
        sampler: &H,
        origin: Vec3,
        plan: &mut LayoutPlan,
    ) {
        // Offener Pfad: Abschlussobjekt auf dem letzten Punkt
        let count = geometry.instance_count + usize::from(is_open_end);
        let heading = geometry.heading();
        let variation = style.position_variation;

        for i in 0..count {
            // Positionsversatz ist lokal zur Laufrichtung
            let local_offset = Vec3::new(
                self.rng.range(-variation.x, variation.x),
                0.0,
                self.rng.range(-variation.y, variation.y),
            );
            let yaw_variation = self.rng.range(style.rotation_variation.x, style.rotation_variation.y);
            let scale_variation = self.rng.range(style.scale_variation.x, style.scale_variation.y);

            let mut position = geometry.step_start(i) + heading * local_offset;
            position.y = sampler.height_at(position);

            let rotation = Quat::from_rotation_y(
                (style.rotation + geometry.heading_deg + yaw_variation).to_radians(),
            );
            let placement = Placement::new(position - origin, rotation, style.scale * scale_variation);

            let Some(template) = self.pick_template(style) else {
                continue;
            };
            plan.requests.push(SpawnRequest {
                template,
                placement,
                kind: SpawnKind::Object,
            });
        }
    }

    /// Fence-Modus: durchgehende Segmente, optional per Scherung an den Hang angepasst.
    fn place_fences<H: HeightSampler + ?Sized>(
        &mut self,
        geometry: &SegmentGeometry,
        style: &StyleConfig,
        sampler: &H,
        origin: Vec3,
        plan: &mut LayoutPlan,
    ) {
        let heading = geometry.heading();
        let step = geometry.step();
        let step_length = geometry.step_length();
        let scale = Vec3::new(style.scale.x, style.scale.y, style.scale.z * geometry.stretch);
        let end_offset = style.end_offset * style.scale * geometry.stretch;

        for i in 0..geometry.instance_count {
            let step_start = geometry.step_start(i);
            let y1 = sampler.height_at(step_start);
            let y2 = sampler.height_at(step_start + step);

            let shear = if style.use_shear {
                let decomposition = ShearDecomposition::from_slope(y2 - y1, step_length);
                if decomposition.is_none() {
                    log::trace!(
                        "Scherwinkel bei Schritt {} degeneriert, platziere ungeschert",
                        i
                    );
                }
                decomposition
            } else {
                None
            };

            let placement = match shear {
                Some(decomposition) => Placement {
                    position: Vec3::new(step_start.x, y1, step_start.z) - origin,
                    rotation: Quat::from_rotation_y(style.rotation.to_radians()),
                    scale,
                    shear: Some(ShearFrame {
                        heading,
                        decomposition,
                        local_offset: end_offset,
                    }),
                },
                None => {
                    // Tieferer Endpunkt, damit das Segment nicht über dem Boden schwebt
                    let base = Vec3::new(step_start.x, y1.min(y2), step_start.z);
                    Placement::new(
                        base + heading * end_offset - origin,
                        fence_rotation(heading, style.rotation),
                        scale,
                    )
                }
            };

            let Some(template) = self.pick_template(style) else {
                continue;
            };
            plan.requests.push(SpawnRequest {
                template,
                placement,
                kind: SpawnKind::Fence,
            });
        }
    }

    /// Abschlusspfosten am letzten Punkt offener Fence-Pfade.
    fn place_end_post(path: &FencePath, style: &StyleConfig, plan: &mut LayoutPlan) {
        if path.closed_loop || style.object_mode {
            return;
        }
        let (Some(post), Some(last_segment), Some(last_point)) =
            (&style.end_post, plan.segments.last(), path.points().last())
        else {
            return;
        };

        let heading = Quat::from_rotation_y(last_segment.heading_deg.to_radians());
        let placement = Placement::new(
            *last_point,
            fence_rotation(heading, style.rotation),
            style.scale * last_segment.stretch,
        );
        plan.requests.push(SpawnRequest {
            template: post.clone(),
            placement,
            kind: SpawnKind::EndPost,
        });
    }
}
