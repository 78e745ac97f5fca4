//! Stereo sample buffer
//!
//! The buffer is sized once from the composition, then filled additively by
//! voices and processed in place by effects.

use std::ops::Range;

/// Two-channel f32 audio at a fixed sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    left: Vec<f32>,
    right: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Allocate a silent buffer of `frames` frames
    pub fn new(frames: usize, sample_rate: u32) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
            sample_rate,
        }
    }

    /// Build a buffer from existing channel data. Channels are truncated to equal length.
    pub fn from_channels(mut left: Vec<f32>, mut right: Vec<f32>, sample_rate: u32) -> Self {
        let frames = left.len().min(right.len());
        left.truncate(frames);
        right.truncate(frames);
        Self {
            left,
            right,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Both channels, mutably
    pub fn channels_mut(&mut self) -> [&mut [f32]; 2] {
        [&mut self.left, &mut self.right]
    }

    /// Mutable view over the whole buffer
    pub fn as_slice_mut(&mut self) -> StereoSliceMut<'_> {
        StereoSliceMut {
            left: &mut self.left,
            right: &mut self.right,
        }
    }

    /// Split into disjoint mutable views, one per range.
    ///
    /// Ranges must be sorted, non-overlapping, and inside the buffer. Gaps
    /// between ranges are skipped.
    pub fn split_ranges_mut(&mut self, ranges: &[Range<usize>]) -> Vec<StereoSliceMut<'_>> {
        let mut views = Vec::with_capacity(ranges.len());
        let mut left: &mut [f32] = &mut self.left;
        let mut right: &mut [f32] = &mut self.right;
        let mut offset = 0;

        for range in ranges {
            let skip = range.start.saturating_sub(offset).min(left.len());
            let (_, l_rest) = std::mem::take(&mut left).split_at_mut(skip);
            let (_, r_rest) = std::mem::take(&mut right).split_at_mut(skip);
            let take = range.len().min(l_rest.len());
            let (l_view, l_tail) = l_rest.split_at_mut(take);
            let (r_view, r_tail) = r_rest.split_at_mut(take);
            views.push(StereoSliceMut {
                left: l_view,
                right: r_view,
            });
            left = l_tail;
            right = r_tail;
            offset += skip + take;
        }
        views
    }

    /// Largest absolute sample value in either channel
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// Count samples outside [-1, 1]
    pub fn clipped_samples(&self) -> usize {
        self.left
            .iter()
            .chain(self.right.iter())
            .filter(|s| s.abs() > 1.0)
            .count()
    }

    /// Multiply every sample by a gain
    pub fn apply_gain(&mut self, gain: f32) {
        for channel in self.channels_mut() {
            for sample in channel.iter_mut() {
                *sample *= gain;
            }
        }
    }

    /// Interleave into L, R, L, R, ...
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames() * 2);
        for (&l, &r) in self.left.iter().zip(&self.right) {
            out.push(l);
            out.push(r);
        }
        out
    }
}

/// Mutable stereo view over part of a buffer
#[derive(Debug)]
pub struct StereoSliceMut<'a> {
    left: &'a mut [f32],
    right: &'a mut [f32],
}

impl<'a> StereoSliceMut<'a> {
    /// Number of frames in the view
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Add to both channels at a frame; out-of-range frames are ignored
    #[inline]
    pub fn add(&mut self, frame: usize, left: f64, right: f64) {
        if frame < self.left.len() {
            self.left[frame] += left as f32;
            self.right[frame] += right as f32;
        }
    }

    pub fn left(&self) -> &[f32] {
        self.left
    }

    pub fn right(&self) -> &[f32] {
        self.right
    }
}
