// Frame-timed sprite animation
//
// The animator decouples "how much time passed" from "which frame to show":
// elapsed milliseconds are banked in an accumulator and frames are advanced
// by whole frame periods, so animation speed stays correct no matter what
// tick rate the loop actually achieves. Truncation jitter is bounded by one
// frame period.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::renderer::TextureHandle;

/// Animation construction and playback errors
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("animation \"{0}\" has no frames")]
    EmptySequence(String),

    #[error("unknown animation name: \"{0}\"")]
    UnknownAnimation(String),

    #[error("frame rate must be positive")]
    ZeroFrameRate,
}

/// One drawable sub-image within an animation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Uploaded texture backing this frame
    pub texture: TextureHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Frame {
    /// Create a new frame
    pub fn new(texture: TextureHandle, width: u32, height: u32) -> Self {
        Self {
            texture,
            width,
            height,
        }
    }
}

/// Named, ordered, non-empty frame sequences for one entity kind.
///
/// Built once at load time and shared read-only between any number of
/// animators for the same character.
#[derive(Debug)]
pub struct AnimationSet {
    sequences: HashMap<String, Vec<Frame>>,
}

impl AnimationSet {
    /// Build a set from named sequences.
    ///
    /// Fails if any sequence is empty; the check is eager so no animator can
    /// ever be constructed over a zero-length sequence.
    pub fn from_sequences(
        sequences: HashMap<String, Vec<Frame>>,
    ) -> Result<Self, AnimationError> {
        for (name, frames) in &sequences {
            if frames.is_empty() {
                return Err(AnimationError::EmptySequence(name.clone()));
            }
        }
        Ok(Self { sequences })
    }

    /// Get a sequence by name
    pub fn get(&self, name: &str) -> Option<&[Frame]> {
        self.sequences.get(name).map(Vec::as_slice)
    }

    /// Check whether a sequence exists
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Number of sequences in the set
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the set has no sequences
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// Per-entity frame timer that selects the current frame of the playing
/// sequence from accumulated elapsed time.
///
/// Two states: idle (no sequence selected, `update` yields nothing) and
/// playing. All sequences loop unconditionally.
#[derive(Debug)]
pub struct Animator {
    /// Shared, read-only animation data
    set: Arc<AnimationSet>,

    /// Fixed duration of one frame in milliseconds
    frame_period_ms: u64,

    /// Name of the playing sequence, or None when idle
    current: Option<String>,

    /// Index into the playing sequence
    frame_index: usize,

    /// Time banked since the last frame advance, kept below the frame period
    accumulated_ms: u64,
}

impl Animator {
    /// Create an animator over a shared animation set.
    ///
    /// The frame period is `1000 / frame_rate` in whole milliseconds, so the
    /// true playback rate is slightly below `frame_rate` when it does not
    /// divide 1000 evenly.
    pub fn new(set: Arc<AnimationSet>, frame_rate: u32) -> Result<Self, AnimationError> {
        if frame_rate == 0 {
            return Err(AnimationError::ZeroFrameRate);
        }
        Ok(Self {
            set,
            frame_period_ms: 1000 / frame_rate as u64,
            current: None,
            frame_index: 0,
            accumulated_ms: 0,
        })
    }

    /// Select the sequence to play.
    ///
    /// `None` idles the animator: the selection is cleared and `update`
    /// yields nothing until a sequence is selected again. Re-selecting the
    /// sequence that is already playing is a no-op, so a held key does not
    /// restart the walk cycle every tick. Selecting a different sequence
    /// resets the frame index and banked time. Unknown names fail and leave
    /// the state untouched.
    pub fn play(&mut self, name: Option<&str>) -> Result<(), AnimationError> {
        let Some(name) = name else {
            self.current = None;
            self.frame_index = 0;
            self.accumulated_ms = 0;
            return Ok(());
        };

        if !self.set.contains(name) {
            return Err(AnimationError::UnknownAnimation(name.to_string()));
        }

        if self.current.as_deref() != Some(name) {
            self.current = Some(name.to_string());
            self.frame_index = 0;
            self.accumulated_ms = 0;
        }
        Ok(())
    }

    /// Advance the timer by `delta_ms` and return the frame to draw, or
    /// `None` when idle.
    ///
    /// Whole frame periods are consumed in a single division rather than a
    /// per-frame subtraction loop, so a large delta after a stall advances
    /// the correct number of frames in one step.
    pub fn update(&mut self, delta_ms: u64) -> Option<Frame> {
        let name = self.current.as_deref()?;
        let frames = self.set.get(name)?;

        self.accumulated_ms += delta_ms;
        if self.accumulated_ms >= self.frame_period_ms {
            let advanced = (self.accumulated_ms / self.frame_period_ms) as usize;
            self.accumulated_ms %= self.frame_period_ms;
            self.frame_index = (self.frame_index + advanced) % frames.len();
        }

        Some(frames[self.frame_index])
    }

    /// Name of the playing sequence, or None when idle
    pub fn current_animation(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Current index into the playing sequence
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Milliseconds banked since the last frame advance
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// The shared animation set
    pub fn animation_set(&self) -> &AnimationSet {
        &self.set
    }
}
