//! Elapsed-time resolution over an utterance's cue sequence.

use crate::config::VisemeConfig;
use crate::viseme::{VisemeCue, VisemeShape};

/// Duration assumed for cues that carry none, in seconds.
pub const DEFAULT_CUE_SECONDS: f32 = 0.1;

/// Read-only view of one utterance's cue sequence, resolved against
/// continuous playback time.
///
/// Built once per utterance from the mapper's output and discarded when
/// playback ends or a new utterance supersedes it.
#[derive(Debug, Clone)]
pub struct VisemeTimeline {
    cues: Vec<VisemeCue>,
    fallback_seconds: f32,
}

impl VisemeTimeline {
    /// Wrap a cue sequence with the default fallback duration.
    pub fn new(cues: Vec<VisemeCue>) -> Self {
        Self::with_fallback(cues, DEFAULT_CUE_SECONDS)
    }

    /// Wrap a cue sequence, treating cues without an explicit duration as
    /// `fallback_seconds` long.
    pub fn with_fallback(cues: Vec<VisemeCue>, fallback_seconds: f32) -> Self {
        Self {
            cues,
            fallback_seconds,
        }
    }

    /// Wrap a cue sequence using the configured fallback duration.
    pub fn with_config(cues: Vec<VisemeCue>, config: &VisemeConfig) -> Self {
        Self::with_fallback(cues, config.fallback_cue_seconds)
    }

    /// The underlying cue sequence.
    pub fn cues(&self) -> &[VisemeCue] {
        &self.cues
    }

    /// Resolve the shape showing at `elapsed_seconds` since utterance
    /// start: the first cue whose accumulated duration reaches the elapsed
    /// time. Silence for an empty sequence or once playback has run past
    /// the end.
    pub fn shape_at(&self, elapsed_seconds: f32) -> VisemeShape {
        let mut accumulated = 0.0;
        for cue in &self.cues {
            accumulated += cue.duration.unwrap_or(self.fallback_seconds);
            if accumulated >= elapsed_seconds {
                return cue.shape;
            }
        }
        VisemeShape::Sil
    }

    /// Total timeline length in seconds, counting fallback durations.
    pub fn total_duration(&self) -> f32 {
        self.cues
            .iter()
            .map(|cue| cue.duration.unwrap_or(self.fallback_seconds))
            .sum()
    }

    /// Whether playback has run past the last cue.
    pub fn is_finished(&self, elapsed_seconds: f32) -> bool {
        elapsed_seconds > self.total_duration()
    }

    /// A copy with runs of adjacent same-shape cues merged into one cue of
    /// summed duration. Cuts cue churn without changing what [`shape_at`]
    /// resolves at any instant.
    ///
    /// Cues without an explicit duration are never merged.
    ///
    /// [`shape_at`]: VisemeTimeline::shape_at
    pub fn coalesced(&self) -> Self {
        let mut merged: Vec<VisemeCue> = Vec::with_capacity(self.cues.len());
        for cue in &self.cues {
            if let Some(last) = merged.last_mut()
                && last.shape == cue.shape
                && let (Some(held), Some(extra)) = (last.duration, cue.duration)
            {
                last.duration = Some(held + extra);
                continue;
            }
            merged.push(cue.clone());
        }
        Self {
            cues: merged,
            fallback_seconds: self.fallback_seconds,
        }
    }
}
