//! Time management utilities

use std::time::Duration;

/// Elapsed time of a single frame, handed to per-frame callbacks
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct FrameTime(Duration);

impl FrameTime {
    /// Zero-length frame
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Create from seconds. Negative or non-finite input clamps to zero.
    pub fn from_secs_f32(seconds: f32) -> Self {
        Duration::try_from_secs_f32(seconds).map_or(Self::ZERO, Self)
    }

    /// Create from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Elapsed time in seconds
    pub fn as_seconds(&self) -> f32 {
        self.0.as_secs_f32()
    }

    /// Elapsed time in milliseconds
    pub fn as_millis(&self) -> f32 {
        self.0.as_secs_f32() * 1000.0
    }
}

/// Frame clock advanced by the host's fixed step
pub struct Timer {
    delta: FrameTime,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            delta: FrameTime::ZERO,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame
    pub fn advance(&mut self, delta: FrameTime) {
        self.delta = delta;
        self.total_time += delta.as_seconds();
        self.frame_count += 1;
    }

    /// Get the time since the last frame
    pub const fn delta(&self) -> FrameTime {
        self.delta
    }

    /// Get the total elapsed time advanced so far, in seconds
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
