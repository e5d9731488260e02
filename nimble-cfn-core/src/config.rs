//! Handler configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Delay policy of a reconciliation handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlerConfig {
    /// Delay requested while the remote resource is in a transitional state.
    pub stabilization_delay_secs: u32,
    /// First backoff delay after a transient remote error.
    pub transient_base_delay_secs: u32,
    /// Upper bound of the transient backoff.
    pub transient_max_delay_secs: u32,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            stabilization_delay_secs: 5,
            transient_base_delay_secs: 2,
            transient_max_delay_secs: 60,
        }
    }
}

impl HandlerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stabilization_delay_secs == 0 {
            return Err(ConfigError::ZeroDelay("stabilization delay"));
        }
        if self.transient_base_delay_secs == 0 {
            return Err(ConfigError::ZeroDelay("transient base delay"));
        }
        if self.transient_max_delay_secs < self.transient_base_delay_secs {
            return Err(ConfigError::InvertedBackoff {
                base: self.transient_base_delay_secs,
                max: self.transient_max_delay_secs,
            });
        }
        Ok(())
    }

    /// Backoff for the `retries`-th consecutive transient failure (1-based).
    pub fn transient_delay(&self, retries: u32) -> u32 {
        let exponent = retries.saturating_sub(1).min(31);
        self.transient_base_delay_secs
            .saturating_mul(1u32 << exponent)
            .min(self.transient_max_delay_secs)
            .max(1)
    }

    /// Stabilization delay, never below one second.
    pub fn stabilization_delay(&self) -> u32 {
        self.stabilization_delay_secs.max(1)
    }
}
