//! Vertrag zum Instancing des Hosts.

use super::{Placement, TemplateId};

/// Erzeugt und verwirft die sichtbaren Instanzen eines Pfads.
///
/// Der Host verwaltet die Instanzen als Kinder eines Containers; das Layout
/// hält nach einem Durchlauf keine Handles fest.
pub trait InstanceFactory {
    /// Undurchsichtiges Handle des Hosts
    type Handle;

    /// Erstellt eine Instanz der Vorlage unter dem Container
    fn create(&mut self, template: &TemplateId, placement: &Placement) -> Self::Handle;

    /// Entfernt alle bisher erzeugten Kinder des Containers
    fn destroy_all(&mut self);
}

/// Eine aufgezeichnete Instanz.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInstance {
    /// Verwendete Vorlage
    pub template: TemplateId,
    /// Platzierung im Container
    pub placement: Placement,
}

/// `InstanceFactory`, die Instanzen nur als Liste festhält.
///
/// Nützlich für Vorschauen, Export und Tests; das Handle ist der Listenindex.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    instances: Vec<RecordedInstance>,
    destroy_calls: usize,
}

impl RecordingFactory {
    /// Erstellt eine leere Aufzeichnung
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle aktuell vorhandenen Instanzen
    pub fn instances(&self) -> &[RecordedInstance] {
        &self.instances
    }

    /// Anzahl der `destroy_all`-Aufrufe
    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls
    }
}

impl InstanceFactory for RecordingFactory {
    type Handle = usize;

    fn create(&mut self, template: &TemplateId, placement: &Placement) -> usize {
        self.instances.push(RecordedInstance {
            template: template.clone(),
            placement: *placement,
        });
        self.instances.len() - 1
    }

    fn destroy_all(&mut self) {
        self.instances.clear();
        self.destroy_calls += 1;
    }
}
