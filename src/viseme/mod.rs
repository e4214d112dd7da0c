//! Viseme mapping and playback for lip-sync animation.
//!
//! A viseme is a visual mouth shape that corresponds to one or more speech
//! sounds. This module turns speech-ready text into a timed cue sequence
//! and resolves those cues into per-frame blend-shape weights:
//!
//! - `mapper`: character-class heuristic from text to timed [`VisemeCue`]s
//! - `timeline`: elapsed-playback-time lookup over a cue sequence
//! - `transition`: crossfade between consecutive shapes, one call per frame

pub mod mapper;
pub mod timeline;
pub mod transition;

pub use mapper::{VisemeMapper, estimate_speech_seconds, text_to_visemes};
pub use timeline::{DEFAULT_CUE_SECONDS, VisemeTimeline};
pub use transition::{TRANSITION_SECONDS, TransitionEngine};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Oculus-style viseme identifiers (standard for lip-sync).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum VisemeShape {
    /// Silence (mouth closed).
    Sil = 0,
    /// /p/, /b/, /m/ (lips pressed together).
    PP = 1,
    /// /f/, /v/ (teeth on lip).
    FF = 2,
    /// /θ/, /ð/ (tongue between teeth).
    TH = 3,
    /// /t/, /d/, /l/ (tongue at roof).
    DD = 4,
    /// /k/, /g/, /ŋ/ (back of tongue up).
    KK = 5,
    /// /tʃ/, /dʒ/, /ʃ/, /ʒ/ (tongue curved).
    CH = 6,
    /// /s/, /z/ (teeth together, tongue forward).
    SS = 7,
    /// /n/, /nj/ (tongue at roof, nasal).
    NN = 8,
    /// /r/ (tongue curled).
    RR = 9,
    /// /a/ (mouth open wide).
    AA = 10,
    /// /e/ (mouth medium).
    E = 11,
    /// /i/ (mouth wide, teeth apart).
    I = 12,
    /// /o/ (rounded, medium).
    O = 13,
    /// /u/ (rounded, small).
    U = 14,
}

impl VisemeShape {
    /// Every shape, in discriminant order.
    pub const ALL: [VisemeShape; 15] = [
        VisemeShape::Sil,
        VisemeShape::PP,
        VisemeShape::FF,
        VisemeShape::TH,
        VisemeShape::DD,
        VisemeShape::KK,
        VisemeShape::CH,
        VisemeShape::SS,
        VisemeShape::NN,
        VisemeShape::RR,
        VisemeShape::AA,
        VisemeShape::E,
        VisemeShape::I,
        VisemeShape::O,
        VisemeShape::U,
    ];

    /// Stable name used to key blend-shape weights on the renderer side.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sil => "sil",
            Self::PP => "pp",
            Self::FF => "ff",
            Self::TH => "th",
            Self::DD => "dd",
            Self::KK => "kk",
            Self::CH => "ch",
            Self::SS => "ss",
            Self::NN => "nn",
            Self::RR => "rr",
            Self::AA => "aa",
            Self::E => "e",
            Self::I => "i",
            Self::O => "o",
            Self::U => "u",
        }
    }
}

impl fmt::Display for VisemeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timed mouth-shape instruction in an utterance's cue sequence.
///
/// Created once when text is mapped to visemes, read-only during playback,
/// discarded when playback ends or is superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisemeCue {
    /// Mouth shape to show.
    pub shape: VisemeShape,
    /// Articulation strength in `[0, 1]`.
    pub weight: f32,
    /// How long the shape holds, in seconds. `None` means "use the
    /// playback fallback duration" (terminal silence cues omit it).
    pub duration: Option<f32>,
}

impl VisemeCue {
    /// A cue with an explicit duration.
    pub fn timed(shape: VisemeShape, weight: f32, duration: f32) -> Self {
        Self {
            shape,
            weight,
            duration: Some(duration),
        }
    }

    /// A full-weight silence cue with no duration, as emitted for empty
    /// input and at the end of every utterance.
    pub fn silence() -> Self {
        Self {
            shape: VisemeShape::Sil,
            weight: 1.0,
            duration: None,
        }
    }
}

/// Per-frame blend weights for every shape, keyed by [`VisemeShape`].
///
/// Returned by the transition engine each frame; the caller applies it to
/// the avatar's expression system. Weights the engine is not blending are
/// explicit zeros so stale renderer state cannot linger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights([f32; VisemeShape::ALL.len()]);

impl BlendWeights {
    /// All weights zero.
    pub fn zeroed() -> Self {
        Self([0.0; VisemeShape::ALL.len()])
    }

    /// Resting pose: silence at full weight, everything else zero.
    pub fn silence() -> Self {
        let mut weights = Self::zeroed();
        weights.set(VisemeShape::Sil, 1.0);
        weights
    }

    /// Weight for one shape.
    pub fn get(&self, shape: VisemeShape) -> f32 {
        self.0[shape as usize]
    }

    /// Set the weight for one shape.
    pub fn set(&mut self, shape: VisemeShape, weight: f32) {
        self.0[shape as usize] = weight;
    }

    /// Iterate `(shape, weight)` pairs in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = (VisemeShape, f32)> + '_ {
        VisemeShape::ALL.iter().map(|&shape| (shape, self.get(shape)))
    }

    /// Total weight across all shapes.
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::silence()
    }
}
