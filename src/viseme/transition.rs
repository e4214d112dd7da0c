//! Crossfade between successive mouth shapes.

use crate::viseme::{BlendWeights, VisemeShape};

/// Seconds a crossfade between two shapes takes to complete.
pub const TRANSITION_SECONDS: f32 = 0.1;

/// Smooths a stream of per-frame shape requests into blend weights.
///
/// At most two shapes participate in a blend: the shape being left and the
/// shape being approached. A new request while mid-fade abandons the old
/// origin and fades from wherever the previous target was, so rapid shape
/// changes stay continuous instead of snapping.
///
/// The engine owns no render state. Each [`apply`] call returns the full
/// weight map for the caller to hand to whatever drives the avatar.
///
/// [`apply`]: TransitionEngine::apply
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    current: VisemeShape,
    target: VisemeShape,
    /// Fade completion from `current` toward `target`, 0.0 to 1.0.
    progress: f32,
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self {
            current: VisemeShape::Sil,
            target: VisemeShape::Sil,
            progress: 1.0,
        }
    }
}

impl TransitionEngine {
    /// An engine at rest on silence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fade by `dt` seconds toward `next` and return the
    /// resulting weights.
    ///
    /// Requesting the shape already targeted just continues the fade in
    /// flight. Requesting a different shape retargets: the old target
    /// becomes the fade origin and progress restarts from zero.
    pub fn apply(&mut self, next: VisemeShape, dt: f32) -> BlendWeights {
        if next != self.target {
            self.current = self.target;
            self.target = next;
            self.progress = 0.0;
        }
        self.progress = (self.progress + dt / TRANSITION_SECONDS).min(1.0);

        let mut weights = BlendWeights::zeroed();
        weights.set(self.current, 1.0 - self.progress);
        weights.set(self.target, self.progress);
        weights
    }

    /// Snap back to resting silence and return the silence weights.
    pub fn reset(&mut self) -> BlendWeights {
        *self = Self::default();
        BlendWeights::silence()
    }

    /// The shape the engine is fading toward.
    pub fn target(&self) -> VisemeShape {
        self.target
    }

    /// The shape the engine is fading away from.
    pub fn current(&self) -> VisemeShape {
        self.current
    }

    /// Whether the fade has completed and the target shape is fully shown.
    pub fn is_stable(&self) -> bool {
        self.progress >= 1.0
    }
}
