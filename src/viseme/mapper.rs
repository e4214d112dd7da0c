//! Heuristic text-to-viseme mapping.
//!
//! Walks each word character by character, preferring known two-character
//! vowel digraphs (`oo`, `ee`, `ai`, …) over single letters, and emits a
//! timed cue sequence padded with short silences at word boundaries. This
//! is a character-class approximation, not phonetic analysis: consonant
//! clusters, silent letters, and multi-syllable vowel runs are guessed at,
//! which is an accepted limitation of the design rather than a bug.

use crate::config::VisemeConfig;
use crate::viseme::{VisemeCue, VisemeShape};
use tracing::debug;

/// Maps speech-ready text to a timed cue sequence.
#[derive(Debug, Clone)]
pub struct VisemeMapper {
    /// Estimated seconds of speech per character when no real duration is
    /// supplied.
    seconds_per_char: f32,
}

impl Default for VisemeMapper {
    fn default() -> Self {
        Self::new(&VisemeConfig::default())
    }
}

impl VisemeMapper {
    /// Create a mapper from viseme configuration.
    pub fn new(config: &VisemeConfig) -> Self {
        Self {
            seconds_per_char: config.seconds_per_char,
        }
    }

    /// Convert text to a cue sequence.
    ///
    /// `total_duration` is the known utterance length in seconds; when
    /// `None` (audio not yet decoded) the length is estimated from the
    /// configured per-character rate. Empty or whitespace-only text yields
    /// a single full-weight silence cue.
    pub fn cues(&self, text: &str, total_duration: Option<f32>) -> Vec<VisemeCue> {
        if text.trim().is_empty() {
            return vec![VisemeCue::silence()];
        }

        let char_count = text.chars().count() as f32;
        let total = total_duration.unwrap_or(self.seconds_per_char * char_count);
        let time_per_char = total / char_count;

        let mut cues = Vec::new();
        for word in text.split_whitespace() {
            push_word_cues(&mut cues, word, time_per_char);
        }
        // Terminal silence so playback always resolves to a closed mouth.
        cues.push(VisemeCue::silence());

        debug!(
            cue_count = cues.len(),
            total_seconds = total,
            "mapped text to viseme cues"
        );
        cues
    }
}

/// Map `text` to cues with the default per-character rate.
///
/// Convenience for callers without a [`VisemeMapper`] instance.
pub fn text_to_visemes(text: &str, total_duration: Option<f32>) -> Vec<VisemeCue> {
    VisemeMapper::default().cues(text, total_duration)
}

/// Estimate speech time for `text` in seconds at the given speaking rate.
///
/// Useful before the synthesized audio duration is known. The rate is
/// clamped to a 30 wpm floor to keep short texts from producing absurd
/// estimates.
pub fn estimate_speech_seconds(text: &str, words_per_minute: f32) -> f32 {
    let word_count = text.split_whitespace().count() as f32;
    word_count / words_per_minute.max(30.0) * 60.0
}

/// Emit the cues for one word: a half-weight silence on each side, and one
/// cue per consumed character group inside.
fn push_word_cues(cues: &mut Vec<VisemeCue>, word: &str, time_per_char: f32) {
    let boundary = VisemeCue::timed(VisemeShape::Sil, 0.5, time_per_char * 0.5);
    cues.push(boundary.clone());

    let chars: Vec<char> = word.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        // Greedy two-character vowel digraph lookahead.
        if i + 1 < chars.len()
            && let Some(shape) = digraph_shape(chars[i], chars[i + 1])
        {
            cues.push(VisemeCue::timed(shape, 1.0, time_per_char * 2.0));
            i += 2;
            continue;
        }
        let shape = char_shape(chars[i]);
        // Unmapped characters resolve to silence; emitting a cue for each
        // would spam the timeline, so they contribute nothing.
        if shape != VisemeShape::Sil {
            cues.push(VisemeCue::timed(shape, 1.0, time_per_char));
        }
        i += 1;
    }

    cues.push(boundary);
}

/// Vowel digraph to viseme mapping (case-insensitive).
fn digraph_shape(a: char, b: char) -> Option<VisemeShape> {
    match (a.to_ascii_lowercase(), b.to_ascii_lowercase()) {
        // Long rounded vowels
        ('o', 'o') => Some(VisemeShape::U),
        ('u', 'e') | ('u', 'i') => Some(VisemeShape::U),

        // Long front vowels
        ('e', 'e') | ('e', 'a') | ('i', 'e') => Some(VisemeShape::I),

        // Mid front diphthongs
        ('a', 'i') | ('a', 'y') | ('e', 'i') | ('e', 'y') => Some(VisemeShape::E),

        // Back rounded diphthongs
        ('o', 'a') | ('o', 'w') => Some(VisemeShape::O),
        ('a', 'u') | ('a', 'w') => Some(VisemeShape::O),
        ('o', 'i') | ('o', 'y') => Some(VisemeShape::O),

        // Wide open
        ('o', 'u') => Some(VisemeShape::AA),

        _ => None,
    }
}

/// Single-character to viseme mapping (case-insensitive).
///
/// Unknown characters (digits, punctuation) map to silence, which the
/// caller suppresses.
fn char_shape(c: char) -> VisemeShape {
    match c.to_ascii_lowercase() {
        // Vowels
        'a' => VisemeShape::AA,
        'e' => VisemeShape::E,
        'i' | 'y' => VisemeShape::I,
        'o' => VisemeShape::O,
        'u' | 'w' => VisemeShape::U,

        // Bilabial: lips together
        'b' | 'p' | 'm' => VisemeShape::PP,

        // Labiodental: teeth on lip
        'f' | 'v' => VisemeShape::FF,

        // Alveolar stops and laterals: tongue at roof
        't' | 'd' | 'l' => VisemeShape::DD,

        // Nasal
        'n' => VisemeShape::NN,

        // Velar: back of tongue
        'k' | 'g' | 'c' | 'q' | 'x' => VisemeShape::KK,

        // Postalveolar
        'j' => VisemeShape::CH,

        // Sibilants
        's' | 'z' => VisemeShape::SS,

        // Rhotic
        'r' => VisemeShape::RR,

        // 'h' is mostly breath; treat as silence like unmapped characters.
        _ => VisemeShape::Sil,
    }
}
