//! When extracted outlines are remembered
//!
//! Each outline face carries a [`CachePolicy`]. Faces left on
//! [`CachePolicy::FollowProcess`] defer to a process-wide default, which
//! starts from the `FURNITURE_CACHE` environment variable (off when unset
//! or unparsable) and can be changed at runtime with
//! [`set_caching_enabled`].
//!
//! ```
//! use furniture_core::cache_config::{self, CachePolicy};
//!
//! assert!(CachePolicy::Always.is_enabled());
//! assert!(!CachePolicy::Never.is_enabled());
//!
//! cache_config::set_caching_enabled(true);
//! assert!(CachePolicy::FollowProcess.is_enabled());
//! cache_config::set_caching_enabled(false);
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable holding the process default
pub const ENV_VAR: &str = "FURNITURE_CACHE";

const UNRESOLVED: u8 = 0;
const OFF: u8 = 1;
const ON: u8 = 2;

static PROCESS_DEFAULT: AtomicU8 = AtomicU8::new(UNRESOLVED);

/// Per-face caching choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Use the process-wide default
    #[default]
    FollowProcess,
    Always,
    Never,
}

impl CachePolicy {
    pub fn is_enabled(self) -> bool {
        match self {
            CachePolicy::FollowProcess => is_caching_enabled(),
            CachePolicy::Always => true,
            CachePolicy::Never => false,
        }
    }
}

/// Reads a switch value such as `1`, `on` or `false`
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// The process-wide default, resolving the environment on first use
pub fn is_caching_enabled() -> bool {
    match PROCESS_DEFAULT.load(Ordering::Acquire) {
        ON => true,
        OFF => false,
        _ => {
            let enabled = std::env::var(ENV_VAR)
                .ok()
                .and_then(|value| parse_switch(&value))
                .unwrap_or(false);
            let state = if enabled { ON } else { OFF };
            // A runtime setting made meanwhile wins over the environment.
            match PROCESS_DEFAULT.compare_exchange(
                UNRESOLVED,
                state,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if enabled {
                        log::info!("Outline caching enabled via {ENV_VAR}");
                    }
                    enabled
                },
                Err(current) => current == ON,
            }
        },
    }
}

/// Override the process-wide default; faces with their own policy ignore it
pub fn set_caching_enabled(enabled: bool) {
    PROCESS_DEFAULT.store(if enabled { ON } else { OFF }, Ordering::Release);
    log::debug!(
        "Outline caching {} for faces following the process default",
        if enabled { "enabled" } else { "disabled" }
    );
}
