//! Segment timing is estimated, not measured: word count drives a nominal
//! duration which a random multiplier perturbs for naturalness. Downstream
//! artifacts depend on this exact output range, so the constants are fixed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::conversation::Segment;

pub const MIN_SEGMENT_SECS: f64 = 1.5;
pub const SECS_PER_WORD: f64 = 0.35;
pub const NATURALNESS_RANGE: (f64, f64) = (0.9, 1.2);
pub const PAUSE_RANGE: (f64, f64) = (0.3, 1.0);

/// Nominal duration before the naturalness multiplier.
pub fn nominal_duration(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    (words as f64 * SECS_PER_WORD).max(MIN_SEGMENT_SECS)
}

/// One diarization interval: who spoke when, with role, text, and voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationEntry {
    pub start: f64,
    pub end: f64,
    pub speaker: crate::conversation::Speaker,
    pub role: crate::conversation::Role,
    pub text: String,
    pub voice: String,
}

/// Accumulates successful segments onto a single synthetic timeline,
/// advancing by estimated duration plus a random inter-segment pause.
#[derive(Debug, Default)]
pub struct Timeline {
    cursor: f64,
    entries: Vec<DiarizationEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: &Segment, voice: &str, rng: &mut impl Rng) {
        let (lo, hi) = NATURALNESS_RANGE;
        let duration = nominal_duration(&segment.text) * rng.gen_range(lo..hi);

        self.entries.push(DiarizationEntry {
            start: round2(self.cursor),
            end: round2(self.cursor + duration),
            speaker: segment.speaker,
            role: segment.role,
            text: segment.text.clone(),
            voice: voice.to_string(),
        });

        let (pause_lo, pause_hi) = PAUSE_RANGE;
        self.cursor += duration + rng.gen_range(pause_lo..pause_hi);
    }

    /// Total timeline length, including the pause after the last segment.
    pub fn duration(&self) -> f64 {
        round2(self.cursor)
    }

    pub fn entries(&self) -> &[DiarizationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
