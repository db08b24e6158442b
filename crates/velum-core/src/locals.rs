//! # Composition locals
//!
//! Velum passes "ambient" values down the composition with a thread-local
//! stack of typed frames rather than explicit parameters. The two users in
//! this workspace are the color [`Theme`] and the modal registry handle that
//! `velum-provider` installs around app content.
//!
//! Override a local for a subtree with [`with_local`] (or [`with_theme`] for
//! the theme):
//!
//! ```rust
//! use velum_core::*;
//!
//! let dimmer = Theme {
//!     scrim: Color::from_hex("#000000CC"),
//!     ..Theme::default()
//! };
//!
//! with_theme(dimmer, || {
//!     assert_eq!(theme().scrim, Color::from_hex("#000000CC"));
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            // no frame: create a temporary one
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

/// Installs `value` as the local of its type for the duration of `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Innermost local of type `T`, if any enclosing `with_local` installed one.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

/// Colors read by the overlay widgets. Intentionally small and semantic;
/// a full design system is out of scope here.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Window background / app root.
    pub background: Color,
    /// Default container surface (the dialog panel).
    pub surface: Color,
    /// Primary foreground color on top of `surface`/`background`.
    pub on_surface: Color,
    /// Accent color for the confirm button.
    pub primary: Color,
    /// Foreground color used on top of `primary`.
    pub on_primary: Color,
    /// Low-emphasis outline/border color.
    pub outline: Color,
    /// Backdrop color drawn behind open dialogs.
    pub scrim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            surface: Color::from_hex("#1E1E1E"),
            on_surface: Color::from_hex("#DDDDDD"),
            primary: Color::from_hex("#34AF82"),
            on_primary: Color::WHITE,
            outline: Color::from_hex("#555555"),
            scrim: Color::from_hex("#000000AA"),
        }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_local(theme, f)
}

pub fn theme() -> Theme {
    local::<Theme>().unwrap_or_default()
}
