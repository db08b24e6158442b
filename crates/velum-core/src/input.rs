use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

#[derive(Clone, Copy, Debug)]
pub enum PointerButton {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Clone, Copy, Debug)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    Cancel,
}

#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerKind,
    pub event: PointerEventKind,
    pub position: Vec2,
}

impl PointerEvent {
    /// Primary-button press at `position`, as a platform runner would emit.
    /// Handy for tests and headless drivers.
    pub fn primary_down(position: Vec2) -> Self {
        Self {
            id: PointerId(0),
            kind: PointerKind::Mouse,
            event: PointerEventKind::Down(PointerButton::Primary),
            position,
        }
    }
}
