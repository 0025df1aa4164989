//! Sprite-sheet animation clips.
//!
//! A clip is an ordered, cyclic list of frames plus a fixed-step countdown
//! cursor. [`AnimationClip::tick`] is meant to be called once per simulation
//! step; `speed` is expressed in timer units consumed per call, not seconds.

use crate::components::frame::Frame;

/// Timer value a clip is rearmed with after each frame advance.
pub const TIMER_RESET: f64 = 1.0;

/// One frame of a clip: the rectangle read from the manifest and the
/// backend image handle sliced from the sheet for it.
#[derive(Debug, Clone)]
pub struct SpriteFrame<I> {
    pub rect: Frame,
    pub image: I,
}

/// Playback position that survives a reload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub frame_index: usize,
    pub timer: f64,
}

#[derive(Debug, Clone)]
pub struct AnimationClip<I> {
    pub frames: Vec<SpriteFrame<I>>,
    pub speed: f64,
    pub timer: f64,
    pub frame_index: usize,
}

impl<I> AnimationClip<I> {
    pub fn new(speed: f64) -> Self {
        Self {
            frames: Vec::new(),
            speed,
            timer: 0.0,
            frame_index: 0,
        }
    }

    pub fn push_frame(&mut self, rect: Frame, image: I) {
        self.frames.push(SpriteFrame { rect, image });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Advance the countdown by one step.
    ///
    /// The timer drops by `speed`; once it goes below zero the cursor moves to
    /// the next frame (wrapping past the last one) and the timer is rearmed to
    /// exactly [`TIMER_RESET`], discarding any overshoot. Returns `true` when
    /// the frame changed. A clip without frames is left untouched.
    pub fn tick(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.timer -= self.speed;
        if self.timer < 0.0 {
            self.frame_index += 1;
            if self.frame_index >= self.frames.len() {
                self.frame_index = 0;
            }
            self.timer = TIMER_RESET;
            return true;
        }
        false
    }

    /// Frame under the cursor, `None` for an empty clip.
    pub fn current(&self) -> Option<&SpriteFrame<I>> {
        self.frames.get(self.frame_index)
    }

    pub fn playback(&self) -> PlaybackState {
        PlaybackState {
            frame_index: self.frame_index,
            timer: self.timer,
        }
    }

    /// Carry a previous playback position into this clip.
    ///
    /// The timer is copied as is. A frame index that no longer fits this
    /// clip's frame list wraps to the first frame.
    pub fn restore(&mut self, state: PlaybackState) {
        self.timer = state.timer;
        self.frame_index = if state.frame_index < self.frames.len() {
            state.frame_index
        } else {
            0
        };
    }
}
