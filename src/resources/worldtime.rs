use bevy_ecs::prelude::Resource;

/// Simulation clock.
///
/// `elapsed`/`delta` follow the frame time; `ticks` counts fixed simulation
/// steps, which is the clock animations actually run on.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub ticks: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            ticks: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

/// Upper bound on steps produced by one `advance`, so a long stall (window
/// drag, breakpoint) does not replay seconds of animation in one frame.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Converts variable frame time into whole fixed simulation steps.
#[derive(Resource, Clone, Copy, Debug)]
pub struct FixedStep {
    /// Length of one step in seconds.
    pub step: f32,
    pub accumulator: f32,
}

impl FixedStep {
    /// `rate` steps per second; a rate of 0 is treated as 1.
    pub fn from_rate(rate: u32) -> Self {
        Self {
            step: 1.0 / rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Feed `dt` seconds and return how many steps are due now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::from_rate(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates_partial_steps() {
        let mut fs = FixedStep::from_rate(10);
        assert_eq!(fs.advance(0.05), 0);
        assert_eq!(fs.advance(0.06), 1);
        assert!((fs.accumulator - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_advance_multiple_steps() {
        let mut fs = FixedStep::from_rate(10);
        assert_eq!(fs.advance(0.35), 3);
    }

    #[test]
    fn test_advance_caps_long_stalls() {
        let mut fs = FixedStep::from_rate(60);
        assert_eq!(fs.advance(5.0), MAX_STEPS_PER_FRAME);
        assert!(fs.accumulator <= fs.step);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let fs = FixedStep::from_rate(0);
        assert_eq!(fs.step, 1.0);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut fs = FixedStep::from_rate(10);
        assert_eq!(fs.advance(-1.0), 0);
        assert_eq!(fs.accumulator, 0.0);
    }
}
