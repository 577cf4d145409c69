//! Capacity policy for [`TypedBuffer`](super::TypedBuffer).
//!
//! Growth doubles the capacity until the doubling step would exceed
//! `max_increment`, after which the buffer grows linearly by `max_increment`.
//! Shrinking happens when the length falls below a quarter of the capacity,
//! and never goes below `min_capacity`.
//!
//! Both rules are pure functions of `(len, capacity)` so they can be checked
//! without building a buffer.

use crate::error::{Error, Result};

/// Default capacity of a freshly created buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

/// Default cap on a single growth step.
pub const DEFAULT_MAX_INCREMENT: usize = 1024;

/// Default capacity floor for shrinking.
pub const DEFAULT_MIN_CAPACITY: usize = 8;

/// Growth and shrink parameters for a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BufferConfig {
    /// Capacity reserved up front.
    pub initial_capacity: usize,
    /// Largest single growth step.
    pub max_increment: usize,
    /// Capacity never shrinks below this.
    pub min_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        return BufferConfig {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_increment: DEFAULT_MAX_INCREMENT,
            min_capacity: DEFAULT_MIN_CAPACITY,
        };
    }
}

impl BufferConfig {
    pub fn new() -> BufferConfig {
        return BufferConfig::default();
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> BufferConfig {
        self.initial_capacity = initial_capacity;
        return self;
    }

    pub fn with_max_increment(mut self, max_increment: usize) -> BufferConfig {
        self.max_increment = max_increment;
        return self;
    }

    pub fn with_min_capacity(mut self, min_capacity: usize) -> BufferConfig {
        self.min_capacity = min_capacity;
        return self;
    }

    /// Reject configurations that would stall growth.
    pub fn validate(&self) -> Result<()> {
        if self.max_increment == 0 {
            return Err(Error::InvalidConfiguration("max_increment must be positive"));
        }
        if self.min_capacity == 0 {
            return Err(Error::InvalidConfiguration("min_capacity must be positive"));
        }
        return Ok(());
    }

    /// Capacity to grow to when `required` slots are needed.
    ///
    /// Returns `capacity` unchanged if it already suffices.
    pub fn grown_capacity(&self, capacity: usize, required: usize) -> usize {
        if required <= capacity {
            return capacity;
        }
        let step = capacity.min(self.max_increment);
        return capacity
            .saturating_add(step)
            .max(required)
            .max(self.min_capacity);
    }

    /// Capacity to shrink to, or `None` if the buffer is not underused.
    pub fn shrunk_capacity(&self, len: usize, capacity: usize) -> Option<usize> {
        if capacity <= self.min_capacity || len >= capacity / 4 {
            return None;
        }
        let target = len.saturating_mul(2).max(self.min_capacity);
        if target >= capacity {
            return None;
        }
        return Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        assert_eq!(BufferConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_increment_rejected() {
        let config = BufferConfig::new().with_max_increment(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_floor_rejected() {
        let config = BufferConfig::new().with_min_capacity(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn grow_doubles_below_increment() {
        let config = BufferConfig::default();
        assert_eq!(config.grown_capacity(8, 9), 16);
        assert_eq!(config.grown_capacity(16, 17), 32);
        assert_eq!(config.grown_capacity(512, 513), 1024);
    }

    #[test]
    fn grow_is_linear_past_increment() {
        let config = BufferConfig::new().with_max_increment(100);
        assert_eq!(config.grown_capacity(400, 401), 500);
        assert_eq!(config.grown_capacity(500, 501), 600);
    }

    #[test]
    fn grow_honors_large_request() {
        let config = BufferConfig::default();
        assert_eq!(config.grown_capacity(8, 1000), 1000);
    }

    #[test]
    fn grow_from_empty_reaches_floor() {
        let config = BufferConfig::default();
        assert_eq!(config.grown_capacity(0, 1), 8);
    }

    #[test]
    fn grow_noop_when_room() {
        let config = BufferConfig::default();
        assert_eq!(config.grown_capacity(32, 10), 32);
    }

    #[test]
    fn shrink_only_when_underused() {
        let config = BufferConfig::default();
        assert_eq!(config.shrunk_capacity(8, 32), None);
        assert_eq!(config.shrunk_capacity(7, 32), Some(14));
        assert_eq!(config.shrunk_capacity(0, 64), Some(8));
    }

    #[test]
    fn shrink_respects_floor() {
        let config = BufferConfig::new().with_min_capacity(16);
        assert_eq!(config.shrunk_capacity(1, 16), None);
        assert_eq!(config.shrunk_capacity(1, 100), Some(16));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields() {
        let config: BufferConfig = serde_json::from_str(r#"{"max_increment": 64}"#).unwrap();
        assert_eq!(config, BufferConfig::new().with_max_increment(64));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<BufferConfig>(&json).unwrap(), config);
    }
}
