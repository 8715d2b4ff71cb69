use glam::Vec3;

use crate::core::{FencePath, HeightSampler, InstanceFactory, LayoutError};
use crate::layout::{LayoutEngine, LayoutResult};
use crate::shared::options::{DELETE_PICK_RADIUS, LAYOUT_SEED};
use crate::shared::StyleConfig;

/// Aktiver Bearbeitungsmodus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Keine Punktbearbeitung
    #[default]
    None,
    /// Klick fügt am passenden Index einen Punkt ein
    Add,
    /// Klick löscht den Punkt unter dem Cursor
    Delete,
}

/// Bearbeitungssitzung eines Zaunpfads.
///
/// Hält Pfad, Stil, Modus und Cursor. Alle Änderungen laufen über die
/// öffentlichen Operationen von `FencePath` und `LayoutEngine`.
#[derive(Debug, Clone)]
pub struct PathEditor {
    /// Bearbeiteter Pfad
    pub path: FencePath,
    /// Stil für den Neuaufbau
    pub style: StyleConfig,
    /// Seed für reproduzierbare Variationen
    pub seed: u64,
    /// Pick-Radius für den Lösch-Modus (Meter)
    pub delete_radius: f32,
    mode: EditMode,
    cursor: Option<Vec3>,
    engine: LayoutEngine,
}

impl PathEditor {
    /// Neue Sitzung mit Standard-Seed und -Pick-Radius.
    pub fn new(path: FencePath, style: StyleConfig) -> Self {
        Self {
            path,
            style,
            seed: LAYOUT_SEED,
            delete_radius: DELETE_PICK_RADIUS,
            mode: EditMode::None,
            cursor: None,
            engine: LayoutEngine::new(),
        }
    }

    pub fn edit_mode(&self) -> EditMode {
        self.mode
    }

    /// Wechselt den Modus; erneutes Setzen des aktiven Modus schaltet ab.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.mode = if self.mode == mode {
            EditMode::None
        } else {
            mode
        };
        log::debug!("Bearbeitungsmodus: {:?}", self.mode);
    }

    pub fn cursor(&self) -> Option<Vec3> {
        self.cursor
    }

    /// Cursor-Position in Weltkoordinaten (`None` = außerhalb des Terrains).
    pub fn set_cursor(&mut self, world: Option<Vec3>) {
        self.cursor = world;
    }

    /// Einfügeindex für den Cursor im Add-Modus.
    pub fn add_target_index(&self) -> Option<usize> {
        if self.mode != EditMode::Add {
            return None;
        }
        let cursor = self.cursor?;
        Some(self.path.insert_index_for(self.path.to_local(cursor)))
    }

    /// Löschkandidat unter dem Cursor im Delete-Modus.
    pub fn delete_target_index(&self) -> Option<usize> {
        if self.mode != EditMode::Delete {
            return None;
        }
        let cursor = self.cursor?;
        self.path
            .nearest_point_index_within_radius(self.path.to_local(cursor), self.delete_radius)
    }

    /// Vorschau-Linien (Welt) vom Cursor zu den betroffenen Punkten.
    ///
    /// Add: Nachbarn des Einfügeindex, bei geschlossenem Pfad über das
    /// Pfadende hinweg. Delete: der Löschkandidat.
    pub fn preview_links(&self) -> Vec<(Vec3, Vec3)> {
        let Some(cursor) = self.cursor else {
            return Vec::new();
        };
        let points = self.path.points();
        let world = |i: usize| self.path.to_world(points[i]);

        match self.mode {
            EditMode::None => Vec::new(),
            EditMode::Delete => self
                .delete_target_index()
                .map(|i| vec![(cursor, world(i))])
                .unwrap_or_default(),
            EditMode::Add => {
                let Some(index) = self.add_target_index() else {
                    return Vec::new();
                };
                let n = points.len();
                let mut neighbors = Vec::with_capacity(2);
                if index > 0 {
                    neighbors.push(index - 1);
                } else if self.path.closed_loop && n > 1 {
                    neighbors.push(n - 1);
                }
                if index < n {
                    neighbors.push(index);
                } else if self.path.closed_loop && n > 1 {
                    neighbors.push(0);
                }
                neighbors.into_iter().map(|i| (cursor, world(i))).collect()
            }
        }
    }

    /// Führt die Bearbeitung des aktiven Modus am Cursor aus.
    ///
    /// Gibt den eingefügten bzw. entfernten Index zurück, `None` wenn nichts
    /// geändert wurde.
    pub fn apply_edit<H: HeightSampler + ?Sized>(
        &mut self,
        sampler: &H,
    ) -> Result<Option<usize>, LayoutError> {
        match self.mode {
            EditMode::None => Ok(None),
            EditMode::Add => {
                let (Some(index), Some(cursor)) = (self.add_target_index(), self.cursor) else {
                    return Ok(None);
                };
                let local = self.grounded_local(cursor, sampler);
                self.path.insert_at(index, local)?;
                log::debug!("Punkt {} eingefügt ({} Punkte)", index, self.path.len());
                Ok(Some(index))
            }
            EditMode::Delete => {
                let Some(index) = self.delete_target_index() else {
                    return Ok(None);
                };
                self.path.remove_at(index)?;
                log::debug!("Punkt {} gelöscht ({} Punkte)", index, self.path.len());
                Ok(Some(index))
            }
        }
    }

    /// Verschiebt einen Punkt auf eine Weltposition, Y folgt dem Boden.
    pub fn move_point<H: HeightSampler + ?Sized>(
        &mut self,
        index: usize,
        world: Vec3,
        sampler: &H,
    ) -> Result<(), LayoutError> {
        let local = self.grounded_local(world, sampler);
        self.path.set_point(index, local)
    }

    /// Hängt einen Punkt in Verlängerung des letzten Segments an.
    pub fn append_point<H: HeightSampler + ?Sized>(
        &mut self,
        sampler: &H,
    ) -> Result<usize, LayoutError> {
        let world = self.path.to_world(self.path.next_append_point());
        let local = self.grounded_local(world, sampler);
        let index = self.path.len();
        self.path.insert_at(index, local)?;
        Ok(index)
    }

    /// Baut alle Instanzen mit dem Sitzungs-Seed neu auf.
    pub fn rebuild<H, F>(&mut self, sampler: &H, factory: &mut F) -> LayoutResult
    where
        H: HeightSampler + ?Sized,
        F: InstanceFactory + ?Sized,
    {
        self.engine
            .rebuild(&self.path, &self.style, sampler, factory, self.seed)
    }

    /// Weltposition auf den Boden legen und in Pfad-Koordinaten umrechnen.
    fn grounded_local<H: HeightSampler + ?Sized>(&self, world: Vec3, sampler: &H) -> Vec3 {
        let grounded = Vec3::new(world.x, sampler.height_at(world), world.z);
        self.path.to_local(grounded)
    }
}
