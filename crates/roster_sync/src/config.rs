//! Configuration for the sync repository.

/// Configuration for [`SyncRepository`](crate::SyncRepository).
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Whether `watch` kicks off a background refresh. On by default;
    /// turn off when the host schedules refreshes itself.
    pub refresh_on_watch: bool,
}

impl SyncConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            refresh_on_watch: true,
        }
    }

    /// Sets whether `watch` kicks off a background refresh.
    pub fn with_refresh_on_watch(mut self, refresh_on_watch: bool) -> Self {
        self.refresh_on_watch = refresh_on_watch;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_refresh_on_watch() {
        assert!(SyncConfig::new().refresh_on_watch);
        assert!(SyncConfig::default().refresh_on_watch);
    }

    #[test]
    fn builder_overrides() {
        let config = SyncConfig::new().with_refresh_on_watch(false);
        assert!(!config.refresh_on_watch);
    }
}
