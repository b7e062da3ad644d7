use crate::geometry::{Edges, SizeConstraints};

/// Cross-axis placement of a child inside its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    Stretch,
}

impl Align {
    /// Position and extent of an item of natural size `natural` inside
    /// `available` cells.
    pub fn place(self, natural: u16, available: u16) -> (u16, u16) {
        let size = natural.min(available);
        match self {
            Align::Start => (0, size),
            Align::Center => ((available - size) / 2, size),
            Align::End => (available - size, size),
            Align::Stretch => (0, available),
        }
    }
}

/// Layout parameters attached to a persistent widget.
///
/// `shrink` is carried for callers that negotiate overflow themselves; the
/// box engine never shrinks below measured size and lets paint clip instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutParams {
    pub grow: u16,
    pub shrink: u16,
    pub align: Align,
    pub margin: Edges,
    pub padding: Edges,
    pub constraints: SizeConstraints,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            grow: 0,
            shrink: 1,
            align: Align::Start,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            constraints: SizeConstraints::NONE,
        }
    }
}

impl LayoutParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn grow(mut self, grow: u16) -> Self {
        self.grow = grow;
        self
    }

    #[must_use]
    pub fn shrink(mut self, shrink: u16) -> Self {
        self.shrink = shrink;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}
