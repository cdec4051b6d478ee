//! Exposure synthesis configuration.

use crate::error::SamplingError;

/// Maximum number of samples per cell.
pub const MAX_SAMPLE_SIZE: usize = 10_000_000;

/// What to do with samples still out of bounds after the last rejection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundPolicy {
    /// Report `SamplingError::SamplingDivergence`.
    #[default]
    Fail,
    /// Clamp the remaining samples to the nearest bound.
    Clamp,
}

/// Exposure synthesis configuration.
///
/// # Examples
///
/// ```rust
/// use burden_sampling::{BoundPolicy, SamplingConfig};
///
/// let config = SamplingConfig::builder()
///     .sample_size(5_000)
///     .bound_policy(BoundPolicy::Clamp)
///     .build()
///     .unwrap();
/// assert_eq!(config.sample_size(), 5_000);
/// assert_eq!(config.max_rejection_passes(), 10_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    sample_size: usize,
    max_rejection_passes: usize,
    bound_policy: BoundPolicy,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: 1000,
            max_rejection_passes: 10_000,
            bound_policy: BoundPolicy::Fail,
        }
    }
}

impl SamplingConfig {
    /// Creates a new configuration builder starting from the defaults.
    #[inline]
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Samples drawn per cell.
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Cap on rejection passes.
    #[inline]
    pub fn max_rejection_passes(&self) -> usize {
        self.max_rejection_passes
    }

    /// Policy once the cap is hit.
    #[inline]
    pub fn bound_policy(&self) -> BoundPolicy {
        self.bound_policy
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidConfig` if:
    /// - `sample_size` is 0 or greater than 10,000,000
    /// - `max_rejection_passes` is 0
    pub fn validate(&self) -> Result<(), SamplingError> {
        if self.sample_size == 0 || self.sample_size > MAX_SAMPLE_SIZE {
            return Err(SamplingError::InvalidConfig {
                name: "sample_size",
                value: format!("{} not in [1, {}]", self.sample_size, MAX_SAMPLE_SIZE),
            });
        }
        if self.max_rejection_passes == 0 {
            return Err(SamplingError::InvalidConfig {
                name: "max_rejection_passes",
                value: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SamplingConfig`].
#[derive(Clone, Debug, Default)]
pub struct SamplingConfigBuilder {
    config: SamplingConfig,
}

impl SamplingConfigBuilder {
    /// Sets the number of samples per cell.
    #[inline]
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.config.sample_size = sample_size;
        self
    }

    /// Sets the cap on rejection passes.
    #[inline]
    pub fn max_rejection_passes(mut self, passes: usize) -> Self {
        self.config.max_rejection_passes = passes;
        self
    }

    /// Sets the out-of-bounds policy.
    #[inline]
    pub fn bound_policy(mut self, policy: BoundPolicy) -> Self {
        self.config.bound_policy = policy;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidConfig` if validation fails.
    pub fn build(self) -> Result<SamplingConfig, SamplingError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
