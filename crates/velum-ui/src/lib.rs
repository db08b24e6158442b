#![allow(non_snake_case)]
//! Base widgets and the modal overlay.

pub mod anim;
pub mod modal;

use std::rc::Rc;

use velum_core::*;

pub use modal::{Footer, Modal, ModalProps, TransitionStatus};

pub fn Surface(modifier: Modifier, child: View) -> View {
    let mut v = View::new(0, ViewKind::Surface).modifier(modifier);
    v.children = vec![child];
    v
}

pub fn Box(modifier: Modifier) -> View {
    View::new(0, ViewKind::Box).modifier(modifier)
}

pub fn Row(modifier: Modifier) -> View {
    View::new(0, ViewKind::Row).modifier(modifier)
}

pub fn Column(modifier: Modifier) -> View {
    View::new(0, ViewKind::Column).modifier(modifier)
}

pub fn Stack(modifier: Modifier) -> View {
    View::new(0, ViewKind::Stack).modifier(modifier)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            color: Color::WHITE,
            font_size: 16.0, // dp
        },
    )
}

pub fn Spacer() -> View {
    Box(Modifier::new().flex_grow(1.0))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::Button {
            text: text.clone(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button).label(text))
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 T0);
impl_into_children_tuple!(0 T0, 1 T1);
impl_into_children_tuple!(0 T0, 1 T1, 2 T2);
impl_into_children_tuple!(0 T0, 1 T1, 2 T2, 3 T3);
impl_into_children_tuple!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4);
impl_into_children_tuple!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5);

/// Method styling
pub trait TextStyle {
    fn color(self, c: Color) -> View;
    fn size(self, dp: f32) -> View;
}

impl TextStyle for View {
    fn color(mut self, c: Color) -> View {
        if let ViewKind::Text {
            color: text_color, ..
        } = &mut self.kind
        {
            *text_color = c;
        }
        self
    }

    fn size(mut self, dp_font: f32) -> View {
        if let ViewKind::Text {
            font_size: text_size_dp,
            ..
        } = &mut self.kind
        {
            *text_size_dp = dp_font;
        }
        self
    }
}
