#![allow(non_snake_case)]
//! Imperative modal registry.
//!
//! `ModalRegistry` owns a stack of modal configurations keyed by random ids.
//! `create` returns a [`ModalInstance`] handle whose operations are bound to
//! that one id; `ModalHost` composes every live entry above the app content;
//! `modals()` is the hook-style accessor for code running inside a host.
//!
//! ```rust
//! use velum_provider::*;
//! use velum_ui::{ModalProps, Text};
//!
//! let registry = ModalRegistry::new();
//! let instance = registry.create(
//!     ModalProps::new().open(true).title(Text("Hello")),
//! );
//! instance.update(|p| p.open = false);
//! instance.destroy();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use velum_core::*;
use velum_ui::{Modal, ModalProps, Stack, ViewExt};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed modal snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

struct Entry {
    id: u64,
    props: Rc<RefCell<ModalProps>>,
    /// Disposed when the entry is destroyed, so instance cleanups run.
    scope: Scope,
}

#[derive(Default)]
struct RegistryState {
    entries: Vec<Entry>,
}

/// Shared list of modal entries. Cloning shares the same registry; hosts
/// recompose whenever the version signal is bumped.
#[derive(Clone)]
pub struct ModalRegistry {
    inner: Rc<RefCell<RegistryState>>,
    version: Rc<Signal<u64>>,
}

impl Default for ModalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryState::default())),
            version: Rc::new(signal(0)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Monotonic change counter; reading it during composition joins the
    /// host to registry mutations.
    pub fn version(&self) -> &Signal<u64> {
        &self.version
    }

    fn bump(&self) {
        let v = self.version.get();
        self.version.set(v.wrapping_add(1));
    }

    fn fresh_id(&self) -> u64 {
        // Zero is the inert-handle sentinel; re-roll on the (unlikely)
        // collision with a live entry too.
        let s = self.inner.borrow();
        loop {
            let id: u64 = rand::random();
            if id != 0 && !s.entries.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }

    /// Appends a modal entry and returns the handle bound to it. Later
    /// entries stack above earlier ones.
    pub fn create(&self, props: ModalProps) -> ModalInstance {
        let id = self.fresh_id();
        self.inner.borrow_mut().entries.push(Entry {
            id,
            props: Rc::new(RefCell::new(props)),
            scope: Scope::new(),
        });
        log::debug!("modal registry: created instance {id}");
        self.bump();
        ModalInstance {
            id,
            registry: self.clone(),
        }
    }

    fn update_props(&self, id: u64, f: impl FnOnce(&mut ModalProps)) -> bool {
        let props = {
            let s = self.inner.borrow();
            match s.entries.iter().find(|e| e.id == id) {
                Some(e) => e.props.clone(),
                None => return false,
            }
        };
        f(&mut props.borrow_mut());
        self.bump();
        true
    }

    fn set_open(&self, id: u64, open: bool) -> bool {
        self.update_props(id, |p| p.open = open)
    }

    fn destroy(&self, id: u64) -> bool {
        let entry = {
            let mut s = self.inner.borrow_mut();
            let idx = s.entries.iter().position(|e| e.id == id);
            idx.map(|i| s.entries.remove(i))
        };

        let Some(entry) = entry else {
            return false;
        };

        entry.scope.dispose();
        // Drop the remembered transition state so a future entry cannot
        // inherit it through slot-key reuse.
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.evict_prefix(&format!("modal:{id}:"));
            c.evict_prefix(&format!("anim:f32:modal:{id}:"));
        });
        log::debug!("modal registry: destroyed instance {id}");
        self.bump();
        true
    }

    pub fn destroy_all(&self) {
        let ids: Vec<u64> = self.inner.borrow().entries.iter().map(|e| e.id).collect();
        for id in ids {
            let _ = self.destroy(id);
        }
    }

    fn add_cleanup(&self, id: u64, f: impl FnOnce() + 'static) -> bool {
        let s = self.inner.borrow();
        match s.entries.iter().find(|e| e.id == id) {
            Some(e) => {
                e.scope.add_disposer(f);
                true
            }
            None => false,
        }
    }

    /// Serializes per-entry open state. Views and callbacks are not
    /// serializable and are deliberately absent.
    pub fn to_json(&self) -> String {
        let s = self.inner.borrow();
        let snaps: Vec<ModalSnapshot> = s
            .entries
            .iter()
            .map(|e| {
                let p = e.props.borrow();
                ModalSnapshot {
                    id: e.id,
                    open: p.open,
                    width: p.width,
                    z_index: p.z_index,
                }
            })
            .collect();
        serde_json::to_string(&snaps).unwrap_or_else(|_| "[]".into())
    }

    /// Re-applies `open` flags from a [`to_json`](Self::to_json) snapshot to
    /// entries that still exist. Returns how many entries were touched.
    pub fn restore_open_states(&self, json: &str) -> Result<usize, SnapshotError> {
        let snaps: Vec<ModalSnapshot> = serde_json::from_str(json)?;
        let mut applied = 0;
        {
            let s = self.inner.borrow();
            for snap in &snaps {
                if let Some(e) = s.entries.iter().find(|e| e.id == snap.id) {
                    e.props.borrow_mut().open = snap.open;
                    applied += 1;
                }
            }
        }
        if applied > 0 {
            self.bump();
        }
        Ok(applied)
    }
}

#[derive(Serialize, Deserialize)]
struct ModalSnapshot {
    id: u64,
    open: bool,
    width: f32,
    z_index: f32,
}

/// Handle bound to one modal entry. All operations are inert (returning
/// `false`) once the entry has been destroyed.
#[derive(Clone)]
pub struct ModalInstance {
    id: u64,
    registry: ModalRegistry,
}

impl ModalInstance {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn open(&self) -> bool {
        self.registry.set_open(self.id, true)
    }

    pub fn close(&self) -> bool {
        self.registry.set_open(self.id, false)
    }

    /// Mutates the stored props in place; the host recomposes afterwards.
    pub fn update(&self, f: impl FnOnce(&mut ModalProps)) -> bool {
        self.registry.update_props(self.id, f)
    }

    /// Removes the entry immediately, without playing the exit transition,
    /// and runs cleanups registered with [`on_destroy`](Self::on_destroy).
    pub fn destroy(&self) -> bool {
        self.registry.destroy(self.id)
    }

    /// Registers `f` to run when this instance is destroyed (individually or
    /// via `destroy_all`).
    pub fn on_destroy(&self, f: impl FnOnce() + 'static) -> bool {
        self.registry.add_cleanup(self.id, f)
    }

    fn inert() -> Self {
        Self {
            id: 0,
            registry: ModalRegistry::new(),
        }
    }
}

/// Hook-style surface handed to app content running under a host: `create`
/// and `destroy_all`, matching the imperative API of the registry it wraps.
#[derive(Clone)]
pub struct Modals {
    registry: Option<ModalRegistry>,
}

impl Modals {
    pub fn create(&self, props: ModalProps) -> ModalInstance {
        match &self.registry {
            Some(r) => r.create(props),
            None => {
                log::warn!("modals() called outside a ModalHost; returning an inert handle");
                ModalInstance::inert()
            }
        }
    }

    pub fn destroy_all(&self) {
        if let Some(r) = &self.registry {
            r.destroy_all();
        }
    }
}

/// Installs the `Modals` local around `f` so nested composables can reach
/// the registry through [`modals`].
pub fn with_modals<R>(registry: &ModalRegistry, f: impl FnOnce() -> R) -> R {
    with_local(
        Modals {
            registry: Some(registry.clone()),
        },
        f,
    )
}

/// The use-modal accessor. Outside a host this yields an inert handle whose
/// operations do nothing.
pub fn modals() -> Modals {
    local::<Modals>().unwrap_or(Modals { registry: None })
}

/// Composes `content` with every live modal stacked above it, in creation
/// order. Each modal's remembered transition state is keyed by its id.
pub fn ModalHost(registry: &ModalRegistry, content: impl FnOnce() -> View) -> View {
    // The version read is where a reactive runner would subscribe for
    // re-composition; headless hosts just call this every frame.
    let _v = registry.version.get();

    let content = with_modals(registry, content);

    let live: Vec<(u64, ModalProps, Scope)> = registry
        .inner
        .borrow()
        .entries
        .iter()
        .map(|e| (e.id, e.props.borrow().clone(), e.scope.clone()))
        .collect();

    let mut layers: Vec<View> = Vec::with_capacity(live.len() + 1);
    layers.push(content);
    for (id, props, scope) in live {
        layers.push(scope.run(|| Modal(id.to_string(), &props)));
    }

    Stack(Modifier::new().fill_max_size()).child(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use velum_core::{COMPOSER, TestClock, compose_frame};
    use velum_ui::Text;
    use web_time::Duration;

    fn reset() {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.keyed_slots.clear();
            c.slots.clear();
        });
    }

    fn host_frame(registry: &ModalRegistry) -> View {
        let registry = registry.clone();
        compose_frame(move || {
            ModalHost(&registry, || Text("app-content"))
        })
    }

    fn find<'a>(v: &'a View, pred: &dyn Fn(&View) -> bool) -> Option<&'a View> {
        if pred(v) {
            return Some(v);
        }
        v.children.iter().find_map(|c| find(c, pred))
    }

    fn find_text<'a>(v: &'a View, wanted: &str) -> Option<&'a View> {
        find(v, &|n| {
            matches!(&n.kind, ViewKind::Text { text, .. } if text == wanted)
        })
    }

    #[test]
    fn create_appends_entries_with_random_nonzero_ids() {
        let registry = ModalRegistry::new();
        let a = registry.create(ModalProps::new().open(true));
        let b = registry.create(ModalProps::new().open(true));
        let c = registry.create(ModalProps::new());

        assert_eq!(registry.len(), 3);
        assert_ne!(a.id(), 0);
        assert_ne!(b.id(), 0);
        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn mutations_bump_the_version_signal() {
        let registry = ModalRegistry::new();
        let v0 = registry.version().get();

        let instance = registry.create(ModalProps::new());
        let v1 = registry.version().get();
        assert_ne!(v0, v1);

        instance.open();
        let v2 = registry.version().get();
        assert_ne!(v1, v2);

        instance.destroy();
        assert_ne!(v2, registry.version().get());
    }

    #[test]
    fn open_close_toggle_stored_props() {
        let registry = ModalRegistry::new();
        let instance = registry.create(ModalProps::new());

        assert!(instance.open());
        assert!(registry.inner.borrow().entries[0].props.borrow().open);

        assert!(instance.close());
        assert!(!registry.inner.borrow().entries[0].props.borrow().open);
    }

    #[test]
    fn update_mutates_props_in_place() {
        let registry = ModalRegistry::new();
        let instance = registry.create(ModalProps::new().ok_text("OK"));

        assert!(instance.update(|p| p.ok_text = "Apply".into()));
        assert_eq!(
            registry.inner.borrow().entries[0].props.borrow().ok_text,
            "Apply"
        );
    }

    #[test]
    fn destroyed_handles_are_inert() {
        let registry = ModalRegistry::new();
        let instance = registry.create(ModalProps::new());

        assert!(instance.destroy());
        assert_eq!(registry.len(), 0);

        assert!(!instance.destroy());
        assert!(!instance.open());
        assert!(!instance.close());
        assert!(!instance.update(|p| p.open = true));
        assert!(!instance.on_destroy(|| {}));
    }

    #[test]
    fn destroy_runs_registered_cleanups() {
        let registry = ModalRegistry::new();
        let instance = registry.create(ModalProps::new());

        let ran = Rc::new(Cell::new(false));
        {
            let ran = ran.clone();
            assert!(instance.on_destroy(move || ran.set(true)));
        }

        assert!(!ran.get());
        instance.destroy();
        assert!(ran.get());
    }

    #[test]
    fn destroy_all_clears_every_entry() {
        let registry = ModalRegistry::new();
        let a = registry.create(ModalProps::new().open(true));
        let _b = registry.create(ModalProps::new().open(true));

        registry.destroy_all();
        assert!(registry.is_empty());
        assert!(!a.open());
    }

    #[test]
    fn host_renders_content_below_modals_in_creation_order() {
        reset();
        let registry = ModalRegistry::new();
        let _first = registry.create(
            ModalProps::new().open(true).title(Text("first-title")),
        );
        let _second = registry.create(
            ModalProps::new().open(true).title(Text("second-title")),
        );

        let v = host_frame(&registry);

        assert_eq!(v.children.len(), 3);
        assert!(find_text(&v.children[0], "app-content").is_some());
        assert!(find_text(&v.children[1], "first-title").is_some());
        assert!(find_text(&v.children[2], "second-title").is_some());
    }

    #[test]
    fn destroyed_entry_disappears_from_host() {
        reset();
        let registry = ModalRegistry::new();
        let instance = registry.create(
            ModalProps::new().open(true).title(Text("going-away")),
        );

        let v = host_frame(&registry);
        assert!(find_text(&v, "going-away").is_some());

        instance.destroy();
        let v = host_frame(&registry);
        assert!(find_text(&v, "going-away").is_none());
        assert_eq!(v.children.len(), 1);
    }

    #[test]
    fn closed_entry_stays_listed_and_can_reopen() {
        reset();
        let clock = TestClock::install();
        let registry = ModalRegistry::new();
        let instance = registry.create(
            ModalProps::new().open(true).title(Text("blinker")),
        );

        let _ = host_frame(&registry);
        clock.advance(Duration::from_millis(600));
        let _ = host_frame(&registry);

        instance.close();
        let _ = host_frame(&registry);
        clock.advance(Duration::from_millis(600));
        let v = host_frame(&registry);

        // Exit transition finished; entry still composes (hidden).
        assert_eq!(registry.len(), 1);
        assert_eq!(v.children[1].modifier.alpha, Some(0.0));

        instance.open();
        let _ = host_frame(&registry);
        clock.advance(Duration::from_millis(600));
        let v = host_frame(&registry);
        assert_eq!(v.children[1].modifier.alpha, Some(1.0));
    }

    #[test]
    fn modals_accessor_works_inside_host_content() {
        reset();
        let registry = ModalRegistry::new();
        let created = Rc::new(RefCell::new(None));

        let created2 = created.clone();
        let registry2 = registry.clone();
        let _ = compose_frame(move || {
            ModalHost(&registry2, move || {
                let m = modals();
                *created2.borrow_mut() =
                    Some(m.create(ModalProps::new().open(true).title(Text("from-hook"))));
                Text("app-content")
            })
        });

        assert_eq!(registry.len(), 1);
        let instance = created.borrow().clone().unwrap();
        assert!(instance.close());

        // The entry created mid-frame shows up in that same frame.
        let v = host_frame(&registry);
        assert!(find_text(&v, "from-hook").is_some());
    }

    #[test]
    fn modals_accessor_is_inert_outside_host() {
        let m = modals();
        let instance = m.create(ModalProps::new().open(true));
        assert_eq!(instance.id(), 0);
        assert!(!instance.open());
        assert!(!instance.update(|p| p.open = false));
        assert!(!instance.destroy());
        m.destroy_all(); // must not panic
    }

    #[test]
    fn snapshot_roundtrip_restores_open_flags() {
        let registry = ModalRegistry::new();
        let a = registry.create(ModalProps::new().open(true));
        let b = registry.create(ModalProps::new().open(true).width(500.0));

        let json = registry.to_json();

        a.close();
        b.close();
        assert!(!registry.inner.borrow().entries[0].props.borrow().open);

        let applied = registry.restore_open_states(&json).unwrap();
        assert_eq!(applied, 2);
        assert!(registry.inner.borrow().entries[0].props.borrow().open);
        assert!(registry.inner.borrow().entries[1].props.borrow().open);
    }

    #[test]
    fn snapshot_ignores_ids_that_no_longer_exist() {
        let registry = ModalRegistry::new();
        let a = registry.create(ModalProps::new().open(true));
        let json = registry.to_json();

        a.destroy();
        let applied = registry.restore_open_states(&json).unwrap();
        assert_eq!(applied, 0);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let registry = ModalRegistry::new();
        let err = registry.restore_open_states("not json");
        assert!(matches!(err, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn destroy_evicts_remembered_transition_state() {
        reset();
        let registry = ModalRegistry::new();
        let instance = registry.create(ModalProps::new().open(true));
        let id = instance.id();

        let _ = host_frame(&registry);
        let key = format!("modal:{id}:status");
        assert!(COMPOSER.with(|c| c.borrow().keyed_slots.contains_key(&key)));

        instance.destroy();
        assert!(!COMPOSER.with(|c| c.borrow().keyed_slots.contains_key(&key)));
    }
}
