// ============================================================================
// Logging
// tracing-subscriber setup for binaries and demos
// ============================================================================
//
// Library code only emits `tracing` events. Registration is logged at INFO,
// duplicate registration and formatter failures at WARN, parse fallbacks at
// DEBUG.

use tracing::Level;

/// Install a global fmt subscriber at `level`.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing(Level::DEBUG);
        assert!(init_tracing(Level::DEBUG).is_err());
    }
}
