//! Modal dialog overlay.
//!
//! `Modal` is presentational: it owns nothing but its visibility transition.
//! The caller drives `open` (directly, or through `velum-provider`'s
//! registry) and reacts to `on_ok` / `on_cancel` / `after_close`.
//!
//! Layering mirrors the usual portal structure: a full-screen scrim, a
//! full-screen wrapper that catches outside clicks, and the dialog panel on
//! top. Open/close plays a fixed 500 ms ease-in-out opacity tween; while the
//! tween runs the overlay reports `Entering`/`Exiting`, and `after_close`
//! fires once when an exit reaches `Exited`.

use std::rc::Rc;

use velum_core::*;
use web_time::Duration;

use crate::anim::animate_f32_from;
use crate::{Box, Button, Column, Row, Spacer, Stack, Surface, Text, TextStyle, ViewExt};

pub type ModalCallback = Rc<dyn Fn()>;

/// Footer contents. `Default` renders the OK/Cancel pair, `None` renders no
/// footer at all, `Custom` replaces it verbatim.
#[derive(Clone)]
pub enum Footer {
    Default,
    None,
    Custom(View),
}

/// Where the overlay is in its visibility transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    Entering,
    Entered,
    Exiting,
    Exited,
}

const TRANSITION: Duration = Duration::from_millis(500);

/// Vertical inset of the panel when `centered` is off (the "near the top"
/// placement).
const TOP_OFFSET_DP: f32 = 120.0;

fn transition_spec() -> AnimationSpec {
    AnimationSpec::tween(TRANSITION, Easing::EaseInOut)
}

#[derive(Clone)]
pub struct ModalProps {
    pub open: bool,
    pub title: Option<View>,
    pub content: Option<View>,
    pub children: Vec<View>,
    pub footer: Footer,
    pub ok_text: String,
    pub cancel_text: String,
    pub closable: bool,
    pub close_icon: Option<View>,
    pub centered: bool,
    pub width: f32,
    pub z_index: f32,
    pub mask: bool,
    pub mask_closable: bool,
    pub destroy_on_close: bool,
    pub style: Modifier,
    pub mask_style: Modifier,
    pub body_style: Modifier,
    pub wrap_style: Modifier,
    pub on_ok: Option<ModalCallback>,
    pub on_cancel: Option<ModalCallback>,
    pub after_close: Option<ModalCallback>,
}

impl Default for ModalProps {
    fn default() -> Self {
        Self {
            open: false,
            title: None,
            content: None,
            children: Vec::new(),
            footer: Footer::Default,
            ok_text: "OK".into(),
            cancel_text: "Cancel".into(),
            closable: true,
            close_icon: None,
            centered: true,
            width: 250.0,
            z_index: 1000.0,
            mask: true,
            mask_closable: true,
            destroy_on_close: false,
            style: Modifier::new(),
            mask_style: Modifier::new(),
            body_style: Modifier::new(),
            wrap_style: Modifier::new(),
            on_ok: None,
            on_cancel: None,
            after_close: None,
        }
    }
}

impl ModalProps {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
    pub fn title(mut self, v: View) -> Self {
        self.title = Some(v);
        self
    }
    pub fn content(mut self, v: View) -> Self {
        self.content = Some(v);
        self
    }
    pub fn child(mut self, v: View) -> Self {
        self.children.push(v);
        self
    }
    pub fn footer(mut self, f: Footer) -> Self {
        self.footer = f;
        self
    }
    pub fn ok_text(mut self, s: impl Into<String>) -> Self {
        self.ok_text = s.into();
        self
    }
    pub fn cancel_text(mut self, s: impl Into<String>) -> Self {
        self.cancel_text = s.into();
        self
    }
    pub fn closable(mut self, v: bool) -> Self {
        self.closable = v;
        self
    }
    pub fn close_icon(mut self, v: View) -> Self {
        self.close_icon = Some(v);
        self
    }
    pub fn centered(mut self, v: bool) -> Self {
        self.centered = v;
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = w;
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn mask(mut self, v: bool) -> Self {
        self.mask = v;
        self
    }
    pub fn mask_closable(mut self, v: bool) -> Self {
        self.mask_closable = v;
        self
    }
    pub fn destroy_on_close(mut self, v: bool) -> Self {
        self.destroy_on_close = v;
        self
    }
    pub fn style(mut self, m: Modifier) -> Self {
        self.style = m;
        self
    }
    pub fn mask_style(mut self, m: Modifier) -> Self {
        self.mask_style = m;
        self
    }
    pub fn body_style(mut self, m: Modifier) -> Self {
        self.body_style = m;
        self
    }
    pub fn wrap_style(mut self, m: Modifier) -> Self {
        self.wrap_style = m;
        self
    }
    pub fn on_ok(mut self, f: impl Fn() + 'static) -> Self {
        self.on_ok = Some(Rc::new(f));
        self
    }
    pub fn on_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_cancel = Some(Rc::new(f));
        self
    }
    pub fn after_close(mut self, f: impl Fn() + 'static) -> Self {
        self.after_close = Some(Rc::new(f));
        self
    }
}

fn invoke(cb: &Option<ModalCallback>) {
    if let Some(cb) = cb {
        cb();
    }
}

/// Derives the transition status for `key` this frame and returns it with
/// the current overlay opacity.
fn step_transition(key: &str, open: bool) -> (TransitionStatus, f32) {
    let target = if open { 1.0 } else { 0.0 };
    let alpha = animate_f32_from(format!("modal:{key}:alpha"), 0.0, target, transition_spec());

    let status = if open {
        if alpha >= 1.0 {
            TransitionStatus::Entered
        } else {
            TransitionStatus::Entering
        }
    } else if alpha <= 0.0 {
        TransitionStatus::Exited
    } else {
        TransitionStatus::Exiting
    };
    (status, alpha)
}

/// Composes the modal overlay for this frame.
///
/// `key` scopes the remembered transition state, so stacked instances must
/// use distinct keys (the registry passes the instance id).
pub fn Modal(key: impl Into<String>, props: &ModalProps) -> View {
    let key = key.into();
    let (status, alpha) = step_transition(&key, props.open);

    // `after_close` is edge-triggered on the transition into Exited, from
    // any live status; mounting in the closed state does not fire it.
    let prev = remember_state_with_key(format!("modal:{key}:status"), || {
        None::<TransitionStatus>
    });
    let closed_now = {
        let mut prev = prev.borrow_mut();
        let edge = matches!(*prev, Some(s) if s != TransitionStatus::Exited)
            && status == TransitionStatus::Exited;
        *prev = Some(status);
        edge
    };
    if closed_now {
        log::debug!("modal {key}: exit transition finished");
        invoke(&props.after_close);
    }

    let hidden = status == TransitionStatus::Exited;
    if hidden && props.destroy_on_close {
        return Box(Modifier::new());
    }

    let mut layers: Vec<View> = Vec::new();
    if props.mask {
        layers.push(scrim(props, hidden));
    }
    layers.push(wrapper(props, hidden));

    Stack(Modifier::new().fill_max_size().alpha(alpha)).child(layers)
}

fn scrim(props: &ModalProps, hidden: bool) -> View {
    let mut m = Modifier::new().fill_max_size().background(theme().scrim);
    if !hidden {
        let mask_closable = props.mask_closable;
        let on_cancel = props.on_cancel.clone();
        m = m.clickable().on_pointer_down(move |_| {
            if mask_closable {
                invoke(&on_cancel);
            }
        });
    }
    Box(m.merged(&props.mask_style))
}

/// Full-screen wrapper that positions the panel and cancels on outside
/// clicks. The panel sits above it in hit-test order and swallows its own
/// clicks, so a pointer-down reaching the wrapper was outside the dialog.
fn wrapper(props: &ModalProps, hidden: bool) -> View {
    let mut m = Modifier::new()
        .fill_max_size()
        .align_items(Align::Center)
        .justify_content(if props.centered {
            Align::Center
        } else {
            Align::Start
        });
    if !hidden {
        let mask_closable = props.mask_closable;
        let on_cancel = props.on_cancel.clone();
        m = m.clickable().on_pointer_down(move |_| {
            if mask_closable {
                invoke(&on_cancel);
            }
        });
    }

    Column(m.merged(&props.wrap_style)).child(panel(props, hidden))
}

fn panel(props: &ModalProps, hidden: bool) -> View {
    let t = theme();

    let mut sections: Vec<View> = Vec::new();

    // Header
    let mut header_kids: Vec<View> = Vec::new();
    if let Some(title) = &props.title {
        header_kids.push(title.clone());
    }
    if props.closable {
        header_kids.push(Spacer());
        header_kids.push(close_button(props, hidden));
    }
    sections.push(Row(Modifier::new().fill_max_width().padding(4.0)).child(header_kids));

    // Body
    let mut body_kids: Vec<View> = props.children.clone();
    if let Some(content) = &props.content {
        body_kids.push(content.clone());
    }
    sections.push(
        Column(
            Modifier::new()
                .fill_max_width()
                .padding(8.0)
                .merged(&props.body_style),
        )
        .child(body_kids),
    );

    // Footer
    match &props.footer {
        Footer::Default => {
            let on_ok = props.on_ok.clone();
            let on_cancel = props.on_cancel.clone();
            sections.push(
                Row(Modifier::new().fill_max_width().padding(4.0)).child((
                    Spacer(),
                    Button(props.ok_text.clone(), move || invoke(&on_ok)),
                    Button(props.cancel_text.clone(), move || invoke(&on_cancel)),
                )),
            );
        }
        Footer::None => {}
        Footer::Custom(v) => sections.push(v.clone()),
    }

    let mut m = Modifier::new()
        .width(props.width)
        .background(t.surface)
        .border(1.0, t.outline, 8.0)
        .clip_rounded(8.0)
        .padding(16.0)
        .z_index(props.z_index);
    if !props.centered {
        m = m.margin_top(TOP_OFFSET_DP);
    }
    if !hidden {
        // Clicks on the panel stop here instead of reaching the wrapper.
        m = m
            .clickable()
            .on_pointer_down(|_| {})
            .semantics(dialog_semantics(props));
    }

    Surface(m.merged(&props.style), Column(Modifier::new()).child(sections))
}

fn dialog_semantics(props: &ModalProps) -> Semantics {
    let mut s = Semantics::new(Role::Dialog).modal();
    if let Some(title) = &props.title
        && let ViewKind::Text { text, .. } = &title.kind
    {
        s = s.label(text.clone());
    }
    s
}

fn close_button(props: &ModalProps, hidden: bool) -> View {
    let icon = props
        .close_icon
        .clone()
        .unwrap_or_else(|| Text("\u{00D7}").color(theme().on_surface));

    let mut m = Modifier::new().padding(4.0);
    if !hidden {
        let on_cancel = props.on_cancel.clone();
        m = m
            .clickable()
            .on_pointer_down(move |_| invoke(&on_cancel))
            .semantics(Semantics::new(Role::Button).label("Close"));
    }
    Box(m).child(icon)
}
