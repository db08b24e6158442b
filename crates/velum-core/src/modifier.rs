use std::rc::Rc;

use crate::{Color, PointerEvent, Size};

#[derive(Clone, Debug)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum PositionType {
    Relative,
    Absolute,
}

/// Main-axis / cross-axis placement for container kinds. A deliberately small
/// set; the overlay layer only ever needs start and center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: Option<f32>,
    pub padding_values: Option<PaddingValues>,
    pub margin_top: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub flex_grow: Option<f32>,
    pub justify_content: Option<Align>,
    pub align_items: Option<Align>,
    pub clip_rounded: Option<f32>,
    /// Works for hit-testing only, draw order is not changed.
    pub z_index: f32,
    pub click: bool,
    pub on_pointer_down: Option<Rc<dyn Fn(PointerEvent)>>,
    pub semantics: Option<crate::Semantics>,
    pub alpha: Option<f32>,
    pub position_type: Option<PositionType>,
    pub offset_left: Option<f32>,
    pub offset_right: Option<f32>,
    pub offset_top: Option<f32>,
    pub offset_bottom: Option<f32>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max", &self.fill_max)
            .field("fill_max_w", &self.fill_max_w)
            .field("fill_max_h", &self.fill_max_h)
            .field("padding", &self.padding)
            .field("padding_values", &self.padding_values)
            .field("margin_top", &self.margin_top)
            .field("margin_bottom", &self.margin_bottom)
            .field("background", &self.background)
            .field("border", &self.border)
            .field("flex_grow", &self.flex_grow)
            .field("justify_content", &self.justify_content)
            .field("align_items", &self.align_items)
            .field("clip_rounded", &self.clip_rounded)
            .field("z_index", &self.z_index)
            .field("click", &self.click)
            .field(
                "on_pointer_down",
                &self.on_pointer_down.as_ref().map(|_| "..."),
            )
            .field("semantics", &self.semantics)
            .field("alpha", &self.alpha)
            .field("position_type", &self.position_type)
            .field("offset_left", &self.offset_left)
            .field("offset_right", &self.offset_right)
            .field("offset_top", &self.offset_top)
            .field("offset_bottom", &self.offset_bottom)
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn fill_max_height(mut self) -> Self {
        self.fill_max_h = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding_values = Some(padding);
        self
    }
    pub fn margin_top(mut self, v: f32) -> Self {
        self.margin_top = Some(v);
        self
    }
    pub fn margin_bottom(mut self, v: f32) -> Self {
        self.margin_bottom = Some(v);
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn justify_content(mut self, a: Align) -> Self {
        self.justify_content = Some(a);
        self
    }
    pub fn align_items(mut self, a: Align) -> Self {
        self.align_items = Some(a);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip_rounded = Some(radius);
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn clickable(mut self) -> Self {
        self.click = true;
        self
    }
    pub fn on_pointer_down(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_down = Some(Rc::new(f));
        self
    }
    pub fn semantics(mut self, s: crate::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.position_type = Some(PositionType::Absolute);
        self
    }
    pub fn offset(
        mut self,
        left: Option<f32>,
        top: Option<f32>,
        right: Option<f32>,
        bottom: Option<f32>,
    ) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self.offset_right = right;
        self.offset_bottom = bottom;
        self
    }

    /// Merges `other` on top of `self`: any field `other` sets wins. Used to
    /// apply caller-supplied style modifiers over widget defaults.
    pub fn merged(self, other: &Modifier) -> Self {
        Modifier {
            size: other.size.or(self.size),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            fill_max: other.fill_max || self.fill_max,
            fill_max_w: other.fill_max_w || self.fill_max_w,
            fill_max_h: other.fill_max_h || self.fill_max_h,
            padding: other.padding.or(self.padding),
            padding_values: other.padding_values.or(self.padding_values),
            margin_top: other.margin_top.or(self.margin_top),
            margin_bottom: other.margin_bottom.or(self.margin_bottom),
            background: other.background.or(self.background),
            border: other.border.clone().or(self.border),
            flex_grow: other.flex_grow.or(self.flex_grow),
            justify_content: other.justify_content.or(self.justify_content),
            align_items: other.align_items.or(self.align_items),
            clip_rounded: other.clip_rounded.or(self.clip_rounded),
            z_index: if other.z_index != 0.0 {
                other.z_index
            } else {
                self.z_index
            },
            click: other.click || self.click,
            on_pointer_down: other.on_pointer_down.clone().or(self.on_pointer_down),
            semantics: other.semantics.clone().or(self.semantics),
            alpha: other.alpha.or(self.alpha),
            position_type: other.position_type.or(self.position_type),
            offset_left: other.offset_left.or(self.offset_left),
            offset_right: other.offset_right.or(self.offset_right),
            offset_top: other.offset_top.or(self.offset_top),
            offset_bottom: other.offset_bottom.or(self.offset_bottom),
        }
    }
}
