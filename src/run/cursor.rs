//! Locality cache for run lookups.
//!
//! Views read attributes position by position, so consecutive lookups almost
//! always land in the same run or the next one. Remembering where the last
//! lookup ended lets the next one resume the scan there instead of walking
//! from run 0.
//!
//! # Usage Patterns
//!
//! ## Sequential Forward
//! Lookups at P, P+1, P+2, ...
//! Cache hit: scan forward from the cached run
//!
//! ## Backward or Random
//! Lookup before the cached run start
//! Cache miss: scan from run 0
//!
//! The cache is only a hint. Any mutation of the run structure must call
//! [`CursorCache::invalidate`], and [`CursorCache::starting_point`] refuses
//! to hand out a run index that no longer exists.

/// Where the last lookup ended: a run index and that run's first position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorCache {
    /// Index of the cached run.
    run: usize,
    /// Logical position of the first element of the cached run.
    start: usize,
    /// Whether the cache is valid.
    valid: bool,
}

impl CursorCache {
    /// Create a new invalid cache.
    pub fn new() -> CursorCache {
        return CursorCache {
            run: 0,
            start: 0,
            valid: false,
        };
    }

    /// Check if the cache is valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        return self.valid;
    }

    /// Cached run index (meaningful only while valid).
    #[inline]
    pub fn run(&self) -> usize {
        return self.run;
    }

    /// Cached run start (meaningful only while valid).
    #[inline]
    pub fn start(&self) -> usize {
        return self.start;
    }

    /// Record the result of a lookup.
    #[inline]
    pub fn update(&mut self, run: usize, start: usize) {
        self.run = run;
        self.start = start;
        self.valid = true;
    }

    /// Invalidate the cache.
    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Where to begin scanning for `index` in an array of `run_count` runs.
    ///
    /// Returns the cached `(run, start)` when it is valid, still names an
    /// existing run, and does not lie past `index`; otherwise `(0, 0)`.
    #[inline]
    pub fn starting_point(&self, index: usize, run_count: usize) -> (usize, usize) {
        if self.valid && self.run < run_count && self.start <= index {
            return (self.run, self.start);
        }
        return (0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_initially_invalid() {
        let cache = CursorCache::new();
        assert!(!cache.is_valid());
        assert_eq!(cache.starting_point(10, 5), (0, 0));
    }

    #[test]
    fn cache_update_and_access() {
        let mut cache = CursorCache::new();
        cache.update(5, 30);

        assert!(cache.is_valid());
        assert_eq!(cache.run(), 5);
        assert_eq!(cache.start(), 30);
    }

    #[test]
    fn cache_invalidate() {
        let mut cache = CursorCache::new();
        cache.update(5, 30);

        cache.invalidate();

        assert!(!cache.is_valid());
        assert_eq!(cache.starting_point(40, 10), (0, 0));
    }

    #[test]
    fn forward_lookup_resumes() {
        let mut cache = CursorCache::new();
        cache.update(5, 30);

        assert_eq!(cache.starting_point(30, 10), (5, 30));
        assert_eq!(cache.starting_point(95, 10), (5, 30));
    }

    #[test]
    fn backward_lookup_restarts() {
        let mut cache = CursorCache::new();
        cache.update(5, 30);

        assert_eq!(cache.starting_point(29, 10), (0, 0));
    }

    #[test]
    fn stale_run_index_ignored() {
        let mut cache = CursorCache::new();
        cache.update(5, 30);

        // Array shrank to three runs without invalidating.
        assert_eq!(cache.starting_point(31, 3), (0, 0));
    }
}
