//! Run configuration for the test engine

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Controls how [`TestCase`](crate::TestCase) captures and reports failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Prepend the engine's own frames to failures raised in fixtures and test bodies
    pub engine_frames: bool,
    /// Clean failures (drop frames and source errors, keep the rendered text) before reporting them
    pub clean_failures: bool,
    /// Suppress the default panic output for panics caught inside tests
    pub quiet_panics: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            engine_frames: true,
            clean_failures: true,
            quiet_panics: true,
        }
    }
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether engine frames are prepended
    pub fn with_engine_frames(mut self, enabled: bool) -> Self {
        self.engine_frames = enabled;
        self
    }

    /// Set whether failures are cleaned before reporting
    pub fn with_clean_failures(mut self, enabled: bool) -> Self {
        self.clean_failures = enabled;
        self
    }

    /// Set whether caught panics are printed by the default hook
    pub fn with_quiet_panics(mut self, enabled: bool) -> Self {
        self.quiet_panics = enabled;
        self
    }
}
