//! Voice trait for section renderers

use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section};

/// Renders one instrument's part of a section.
///
/// Implementations add into `out`, which covers exactly the section's frames;
/// they never overwrite what other voices have written.
pub trait VoiceRenderer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Accumulate this voice's samples for `section` into `out`
    fn render(
        &self,
        section: &Section,
        structure: &CompositionStructure,
        sample_rate: u32,
        out: &mut StereoSliceMut<'_>,
    );
}

/// One occurrence of a phrase element on the frame timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<'a, T> {
    pub item: &'a T,
    /// First frame, relative to the section start
    pub start: usize,
    /// One past the last frame, clipped to the section length
    pub end: usize,
}

impl<T> Span<'_, T> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Position of `frame` within the span, 0.0 at onset.
    ///
    /// Measured against the unclipped length so notes cut off at a section
    /// boundary keep their envelope timing.
    pub fn position(&self, frame: usize, full_len: f64) -> f64 {
        (frame - self.start) as f64 / full_len
    }
}

/// Lay `items` end to end, repeating the phrase until `len` frames are filled.
///
/// Elements that would start at or after `len` are dropped; the last one is
/// clipped. A phrase with no positive duration yields nothing.
pub fn looped_spans<'a, T>(
    items: &'a [T],
    beats_of: impl Fn(&T) -> f64,
    frames_per_beat: f64,
    len: usize,
) -> Vec<Span<'a, T>> {
    let phrase_beats: f64 = items.iter().map(&beats_of).sum();
    let positive = |x: f64| x.is_finite() && x > 0.0;
    if len == 0 || !positive(phrase_beats) || !positive(frames_per_beat) {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut beat = 0.0;
    'outer: loop {
        for item in items {
            let start = (beat * frames_per_beat).floor() as usize;
            if start >= len {
                break 'outer;
            }
            beat += beats_of(item);
            let end = ((beat * frames_per_beat).floor() as usize).min(len);
            if end > start {
                spans.push(Span { item, start, end });
            }
        }
    }
    spans
}

/// Frames per beat at the structure's tempo
pub fn frames_per_beat(structure: &CompositionStructure, sample_rate: u32) -> f64 {
    structure.beat_seconds() * sample_rate as f64
}

/// Loudness shared by every pitched voice in a section
pub fn section_level(section: &Section, structure: &CompositionStructure) -> f64 {
    section.intensity * structure.energy
}
