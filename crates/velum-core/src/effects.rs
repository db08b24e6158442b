use std::cell::RefCell;
use std::rc::Rc;

/// One-shot cleanup handle. Clones share the same cleanup; whichever call
/// to [`run`](Dispose::run) comes first consumes it.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs the cleanup; later calls are no-ops.
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Runs `f` now and ties the returned cleanup to the current scope, so it
/// fires when the owning entry is destroyed. The handle is also returned
/// for callers that want to dispose earlier by hand.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let dispose = f();

    if let Some(scope) = crate::scope::current_scope() {
        let scoped = dispose.clone();
        scope.add_disposer(move || scoped.run());
    }

    dispose
}

/// Wraps a cleanup for returning out of [`effect`].
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
