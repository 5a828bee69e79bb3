//! Scanner configuration.

/// Buffer sizing for a [`Scanner`](crate::Scanner).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScannerConfig {
    /// Characters allocated up front. The buffer doubles whenever a single
    /// match outgrows it.
    pub initial_capacity: usize,
    /// On [`reset`](crate::Scanner::reset), drop a grown buffer back to
    /// `initial_capacity`.
    pub shrink_on_reset: bool,
}

impl ScannerConfig {
    /// Smallest buffer the scanner will allocate.
    pub const MIN_CAPACITY: usize = 16;

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_shrink_on_reset(mut self, shrink: bool) -> Self {
        self.shrink_on_reset = shrink;
        self
    }

    /// `initial_capacity`, raised to [`Self::MIN_CAPACITY`].
    pub fn effective_capacity(&self) -> usize {
        self.initial_capacity.max(Self::MIN_CAPACITY)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            initial_capacity: 16 * 1024,
            shrink_on_reset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.initial_capacity, 16384);
        assert!(config.shrink_on_reset);
    }

    #[test]
    fn capacity_floor() {
        let config = ScannerConfig::default().with_initial_capacity(2);
        assert_eq!(config.effective_capacity(), ScannerConfig::MIN_CAPACITY);
        let config = config.with_initial_capacity(100);
        assert_eq!(config.effective_capacity(), 100);
    }
}
