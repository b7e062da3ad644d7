//! Integer geometry on the character grid.
//!
//! Everything is measured in terminal cells. Coordinates are `u16` like the
//! terminal itself; intermediate arithmetic that can exceed a cell count
//! (weights, sums of extents) widens to `u32` at the call site.

/// A cell position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle. `x + width` may exceed the screen; painting clips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(
            x,
            y,
            right.saturating_sub(x),
            bottom.saturating_sub(y),
        )
    }

    /// Shrink by `edges`, never going negative.
    pub fn inset(&self, edges: Edges) -> Rect {
        let width = self.width.saturating_sub(edges.horizontal());
        let height = self.height.saturating_sub(edges.vertical());
        Rect::new(
            self.x.saturating_add(edges.left.min(self.width)),
            self.y.saturating_add(edges.top.min(self.height)),
            width,
            height,
        )
    }
}

/// Four-sided insets used for both margin and padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    pub const fn all(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Leading inset along `axis` (left or top).
    pub fn start(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing inset along `axis` (right or bottom).
    pub fn end(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    pub fn along(&self, axis: Axis) -> u16 {
        self.start(axis).saturating_add(self.end(axis))
    }
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn main_of(self, size: Size) -> u16 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    pub fn cross_of(self, size: Size) -> u16 {
        self.cross().main_of(size)
    }

    /// Build a size from main/cross extents along this axis.
    pub fn size(self, main: u16, cross: u16) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Build a rect whose main/cross origin and extents are given along this axis.
    pub fn rect(self, main_pos: u16, cross_pos: u16, main: u16, cross: u16) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(main_pos, cross_pos, main, cross),
            Axis::Vertical => Rect::new(cross_pos, main_pos, cross, main),
        }
    }

    pub fn main_pos(self, rect: &Rect) -> u16 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    pub fn cross_pos(self, rect: &Rect) -> u16 {
        self.cross().main_pos(rect)
    }
}

/// Per-widget size limits. `None` (or a zero passed to the builders) means
/// unconstrained on that bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SizeConstraints {
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    pub min_height: Option<u16>,
    pub max_height: Option<u16>,
}

fn nonzero(value: u16) -> Option<u16> {
    (value > 0).then_some(value)
}

impl SizeConstraints {
    pub const NONE: SizeConstraints = SizeConstraints {
        min_width: None,
        max_width: None,
        min_height: None,
        max_height: None,
    };

    #[must_use]
    pub fn min_width(mut self, value: u16) -> Self {
        self.min_width = nonzero(value);
        self
    }

    #[must_use]
    pub fn max_width(mut self, value: u16) -> Self {
        self.max_width = nonzero(value);
        self
    }

    #[must_use]
    pub fn min_height(mut self, value: u16) -> Self {
        self.min_height = nonzero(value);
        self
    }

    #[must_use]
    pub fn max_height(mut self, value: u16) -> Self {
        self.max_height = nonzero(value);
        self
    }

    /// Clamp `size` into the configured bounds. Max wins over min when they
    /// disagree.
    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            clamp_opt(size.width, self.min_width, self.max_width),
            clamp_opt(size.height, self.min_height, self.max_height),
        )
    }
}

fn clamp_opt(value: u16, min: Option<u16>, max: Option<u16>) -> u16 {
    let mut v = value;
    if let Some(min) = min.filter(|m| *m > 0) {
        v = v.max(min);
    }
    if let Some(max) = max.filter(|m| *m > 0) {
        v = v.min(max);
    }
    v
}

/// Available space handed to a measure call. `None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
}

impl Constraints {
    pub const UNBOUNDED: Constraints = Constraints {
        max_width: None,
        max_height: None,
    };

    pub const fn loose(width: u16, height: u16) -> Self {
        Self {
            max_width: Some(width),
            max_height: Some(height),
        }
    }

    pub fn along(&self, axis: Axis) -> Option<u16> {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Constraints with `main` on `axis` and `cross` on the other axis.
    pub fn for_axis(axis: Axis, main: Option<u16>, cross: Option<u16>) -> Self {
        match axis {
            Axis::Horizontal => Self {
                max_width: main,
                max_height: cross,
            },
            Axis::Vertical => Self {
                max_width: cross,
                max_height: main,
            },
        }
    }

    pub fn width_or(&self, fallback: u16) -> u16 {
        self.max_width.unwrap_or(fallback)
    }

    pub fn height_or(&self, fallback: u16) -> u16 {
        self.max_height.unwrap_or(fallback)
    }
}
