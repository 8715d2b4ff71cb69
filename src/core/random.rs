//! Deterministische Zufallsquelle für Variationen und Template-Auswahl.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reproduzierbare Zufallsquelle.
///
/// Wird zu Beginn jedes Layout-Durchlaufs neu geseedet, damit identische
/// Eingaben identische Platzierungen ergeben.
pub trait RandomSource {
    /// Setzt den Generator auf den Zustand des Seeds zurück
    fn reseed(&mut self, seed: u64);

    /// Gleitkommawert im geschlossenen Intervall [min, max].
    /// Vertauschte Grenzen sind erlaubt.
    fn range(&mut self, min: f32, max: f32) -> f32;

    /// Ganzzahl in [min, max_exclusive). Leeres Intervall liefert `min`.
    fn range_int(&mut self, min: i32, max_exclusive: i32) -> i32;
}

/// `RandomSource` auf Basis von `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Erstellt einen Generator mit dem angegebenen Seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for SeededRandom {
    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        // Auch NaN-Grenzen landen hier
        if !(lo < hi) {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn range_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.rng.random_range(min..max_exclusive)
    }
}
