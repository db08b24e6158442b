use std::cell::RefCell;
use std::rc::Rc;

/// Observable value. Cloning the handle shares the underlying storage, so
/// the registry and every host handle see the same version counter.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    observers: Vec<Box<dyn Fn(&T)>>,
}

impl<T> Inner<T> {
    fn notify(&self) {
        for obs in &self.observers {
            obs(&self.value);
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            observers: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        let inner = &mut *self.0.borrow_mut();
        inner.value = v;
        inner.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let inner = &mut *self.0.borrow_mut();
        f(&mut inner.value);
        inner.notify();
    }

    /// Registers an observer. Observers run synchronously inside every
    /// `set`/`update`, in subscription order, and live as long as the
    /// signal does.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) {
        self.0.borrow_mut().observers.push(Box::new(f));
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
