//! Simulation configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Largest batch a single cycle may generate.
pub const MAX_BATCH_SIZE: usize = 65_536;

/// Knobs for the generation loop and path pacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Frames generated per cycle.
    pub batch_size: usize,
    /// Pause after each frame a path emulator sends.
    pub inter_frame_delay: Duration,
    /// Pause between generation cycles.
    pub inter_cycle_delay: Duration,
    /// Stop after this many cycles (`None` runs until stopped).
    pub max_cycles: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            inter_frame_delay: Duration::from_millis(500),
            inter_cycle_delay: Duration::from_secs(1),
            max_cycles: None,
        }
    }
}

impl SimConfig {
    /// Rejects configurations the loop cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::BatchTooLarge { size: self.batch_size, max: MAX_BATCH_SIZE });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimConfig::default();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.inter_frame_delay, Duration::from_millis(500));
        assert_eq!(config.inter_cycle_delay, Duration::from_secs(1));
        assert_eq!(config.max_cycles, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_batch_rejected() {
        let config = SimConfig { batch_size: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBatch));
    }

    #[test]
    fn oversized_batch_rejected() {
        let config = SimConfig { batch_size: usize::MAX, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BatchTooLarge { size: usize::MAX, max: MAX_BATCH_SIZE })
        );

        let largest = SimConfig { batch_size: MAX_BATCH_SIZE, ..Default::default() };
        assert!(largest.validate().is_ok());
    }
}
