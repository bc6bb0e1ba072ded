use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Host UI state consulted right before a dialog would be shown.
pub trait UiContext: Send + Sync {
    /// False once the screen that started the check has gone away.
    fn is_mounted(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMounted;

impl UiContext for AlwaysMounted {
    fn is_mounted(&self) -> bool {
        true
    }
}

/// Shared flag the host clears when its screen is dismissed.
#[derive(Debug, Clone)]
pub struct MountFlag {
    mounted: Arc<AtomicBool>,
}

impl MountFlag {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for MountFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext for MountFlag {
    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_flag_clones_share_state() {
        let flag = MountFlag::new();
        let host_handle = flag.clone();
        assert!(flag.is_mounted());

        host_handle.unmount();

        assert!(!flag.is_mounted());
        assert!(AlwaysMounted.is_mounted());
    }
}
