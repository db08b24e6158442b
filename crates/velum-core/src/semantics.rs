/// High-level semantic role of a view, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Button,
    Container,
    /// A dialog overlay (`role="dialog"` equivalent).
    Dialog,
}

/// Semantics attached to a `View`, used to build the accessibility tree.
#[derive(Clone, Debug)]
pub struct Semantics {
    pub role: Role,
    /// Human-readable label for screen readers. For buttons, this is the
    /// "name" that is announced.
    pub label: Option<String>,
    /// `aria-modal` equivalent: the node blocks interaction with content
    /// underneath while present.
    pub modal: bool,
    /// Whether this node is actionable; disabled nodes remain in the tree
    /// but are marked not enabled.
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            modal: false,
            enabled: true,
        }
    }

    pub fn label(mut self, l: impl Into<String>) -> Self {
        self.label = Some(l.into());
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }
}
