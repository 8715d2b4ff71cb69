//! Interaktive Bearbeitung: Modus, Cursor und Punkt-Operationen.
//!
//! Die Sitzung hält nur UI-Zustand; Geometrie und Layout liegen in
//! `core` bzw. `layout`.

mod editor;

pub use editor::{EditMode, PathEditor};
