//! Lilt: speech-ready text shaping and viseme timelines for avatar voice
//! assistants.
//!
//! This crate turns raw assistant replies into everything a talking avatar
//! needs besides the audio itself:
//! Raw text → ProcessingPipeline → clean/display text + metadata →
//! VisemeMapper → timed cues → VisemeTimeline + TransitionEngine → per-frame
//! blend weights
//!
//! # Architecture
//!
//! Two independent stages, pure computation end to end:
//! - **Text pipeline**: priority-ordered processors strip emphasis markers,
//!   emojis, and URLs from the speech text while recording what they found
//!   (spans, gestures, links) for the UI and the avatar.
//! - **Viseme playback**: a character-class mapper converts clean text into
//!   timed mouth-shape cues; during audio playback a timeline resolves the
//!   current cue by elapsed time and a transition engine crossfades between
//!   shapes once per render frame.
//!
//! Audio synthesis, networking, and rendering live in the host application;
//! this crate only ever touches strings, cues, and weights.

pub mod config;
pub mod error;
pub mod text;
pub mod viseme;

pub use config::LiltConfig;
pub use error::{PipelineError, Result, ServiceDomain, ServiceErrorKind};
pub use text::{PreprocessedText, ProcessingPipeline, TextMetadata, TextProcessor};
pub use viseme::{
    BlendWeights, TransitionEngine, VisemeCue, VisemeMapper, VisemeShape, VisemeTimeline,
    text_to_visemes,
};
