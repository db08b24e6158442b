//! # Velum core runtime
//!
//! The small reactive core under the modal overlay widgets. Three pieces
//! matter:
//!
//! - `Signal<T>` — observable, reactive value. The registry bumps a version
//!   signal so hosts know to recompose.
//! - `remember*` — lifecycle-aware storage bound to composition. The modal's
//!   transition state lives in a keyed slot.
//! - `effect` / `scoped_effect` — side-effects with cleanup, wired to the
//!   `Scope` that owns the composing view.
//!
//! ## Signals
//!
//! ```rust
//! use velum_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   composition slot always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key-based and more
//!   stable across conditional branches. Modal transition state is keyed by
//!   the instance id so stacked dialogs animate independently.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use velum_core::*;
//!
//! fn Example() -> View {
//!     scoped_effect(|| {
//!         log::info!("Mounted Example");
//!         Box::new(|| log::info!("Unmounted Example"))
//!     });
//!
//!     View::new(0, ViewKind::Box)
//! }
//! ```
//!
//! `scoped_effect` cleanups run when the owning scope is disposed, e.g. when
//! a modal entry is destroyed through its handle.
#![allow(non_snake_case)]

pub mod animation;
pub mod color;
pub mod effects;
pub mod geometry;
pub mod input;
pub mod locals;
pub mod modifier;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod view;


pub use animation::{
    AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, SystemClock, TestClock, set_clock,
};
pub use color::*;
pub use effects::*;
pub use geometry::*;
pub use input::*;
pub use locals::*;
pub use modifier::*;
pub use runtime::*;
pub use scope::{Scope, current_scope, scoped_effect};
pub use semantics::*;
pub use signal::*;
pub use view::*;
