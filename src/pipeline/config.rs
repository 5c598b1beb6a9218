//! Reconciler settings.
//!
//! Thread-local signals, read by the reconciler on every pass. Because they
//! are signals, changing one while a tree is mounted re-runs the mount effect.

use spark_signals::signal;
use std::cell::RefCell;

thread_local! {
    static VERIFY_MOUNTS: RefCell<spark_signals::Signal<bool>> = RefCell::new(signal(cfg!(debug_assertions)));
    static WARN_DUPLICATE_KEYS: RefCell<spark_signals::Signal<bool>> = RefCell::new(signal(true));
}

// =============================================================================
// Mount Verification
// =============================================================================

/// Whether the reconciler re-renders native components after each update
/// and panics if their mount identity changed.
///
/// Defaults to on in debug builds.
pub fn verify_mounts() -> bool {
    VERIFY_MOUNTS.with(|v| v.borrow().get())
}

pub fn set_verify_mounts(enabled: bool) {
    VERIFY_MOUNTS.with(|v| v.borrow().set(enabled));
}

// =============================================================================
// Duplicate Keys
// =============================================================================

/// Whether sibling nodes sharing a key are reported with `log::warn!`.
pub fn warn_duplicate_keys() -> bool {
    WARN_DUPLICATE_KEYS.with(|v| v.borrow().get())
}

pub fn set_warn_duplicate_keys(enabled: bool) {
    WARN_DUPLICATE_KEYS.with(|v| v.borrow().set(enabled));
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Restore every setting to its default.
pub fn reset_config() {
    set_verify_mounts(cfg!(debug_assertions));
    set_warn_duplicate_keys(true);
}
