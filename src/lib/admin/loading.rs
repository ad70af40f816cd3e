use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Set while a backend call is in flight. Clones observe the same flag, so a
/// front-end can hold one to disable the button that started the call.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Lowered again when the guard is dropped, whichever way the call ended.
    pub fn raise(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.clone())
    }
}

#[must_use]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}
