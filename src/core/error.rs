//! Fehlertypen der Pfad- und Layout-Operationen.

use thiserror::Error;

/// Fehler bei Pfad-Mutationen oder Stil-Validierung.
///
/// Der Layout-Durchlauf selbst schlägt nie fehl: leere Pfade, leere Paletten
/// und degenerierte Scherwinkel führen zu einem kleineren Ergebnis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Punkt-Index außerhalb des gültigen Bereichs
    #[error("Punkt-Index {index} außerhalb des gültigen Bereichs (Punktanzahl: {len})")]
    IndexOutOfRange {
        /// Angefragter Index
        index: usize,
        /// Aktuelle Punktanzahl des Pfads
        len: usize,
    },
    /// Stil-Parameter, die nur per Clamping verarbeitet werden können
    #[error("Ungültige Stil-Konfiguration: {0}")]
    InvalidConfiguration(String),
}
