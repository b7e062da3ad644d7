use std::borrow::Cow;

use crate::geometry::{Edges, Rect, Size};
use crate::layout::to_cell;
use crate::render::PaintContext;
use crate::style::Style;
use crate::text::display_width;
use crate::view::{bounded, AnyView, View, UNBOUNDED};

/// Styled text, soft-wrapped to the available width unless wrapping is
/// turned off. Hard newlines always break.
pub struct Text {
    content: String,
    style: Style,
    wrap: bool,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
            wrap: true,
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    fn lines(&self, width: u16) -> Vec<Cow<'_, str>> {
        let wrap_at = bounded(width).filter(|w| self.wrap && *w > 0);
        self.content
            .split('\n')
            .flat_map(|line| match wrap_at {
                Some(w) => textwrap::wrap(line, w as usize),
                None => vec![Cow::Borrowed(line)],
            })
            .collect()
    }
}

impl View for Text {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        let lines = self.lines(max_width);
        let width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        Size::new(to_cell(width).min(max_width), to_cell(lines.len()).min(max_height))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        for (row, line) in self
            .lines(bounds.width)
            .iter()
            .take(bounds.height as usize)
            .enumerate()
        {
            ctx.print(bounds.x, bounds.y + row as u16, line, self.style);
        }
    }
}

/// Empty flexible space.
pub struct Spacer {
    weight: u16,
}

impl Spacer {
    pub fn new(weight: u16) -> Self {
        Self { weight }
    }
}

impl View for Spacer {
    fn measure(&self, _max_width: u16, _max_height: u16) -> Size {
        Size::ZERO
    }

    fn paint(&self, _ctx: &mut PaintContext<'_>, _bounds: Rect) {}

    fn flex_weight(&self) -> Option<u16> {
        Some(self.weight)
    }
}

/// Takes all bounded space it is offered and paints it.
pub struct Fill {
    style: Style,
    ch: char,
}

impl Fill {
    pub fn new(style: Style) -> Self {
        Self { style, ch: ' ' }
    }

    #[must_use]
    pub fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }
}

impl View for Fill {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        Size::new(
            bounded(max_width).unwrap_or(0),
            bounded(max_height).unwrap_or(0),
        )
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        ctx.fill(bounds, self.style);
        if self.ch != ' ' {
            let row: String = std::iter::repeat(self.ch)
                .take(bounds.width as usize)
                .collect();
            for y in bounds.y..bounds.bottom() {
                ctx.print_truncated(bounds.x, y, bounds.width, &row, self.style);
            }
        }
    }
}

/// Insets a child by fixed edges.
pub struct Padded {
    edges: Edges,
    inner: AnyView,
}

impl Padded {
    pub fn new(edges: Edges, inner: AnyView) -> Self {
        Self { edges, inner }
    }
}

fn shrink(extent: u16, by: u16) -> u16 {
    if extent == UNBOUNDED {
        UNBOUNDED
    } else {
        extent.saturating_sub(by)
    }
}

impl View for Padded {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        let inner = self.inner.measure(
            shrink(max_width, self.edges.horizontal()),
            shrink(max_height, self.edges.vertical()),
        );
        Size::new(
            inner
                .width
                .saturating_add(self.edges.horizontal())
                .min(max_width),
            inner
                .height
                .saturating_add(self.edges.vertical())
                .min(max_height),
        )
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        let inner = bounds.inset(self.edges);
        ctx.with_clip(inner, |ctx| self.inner.paint(ctx, inner));
    }

    fn flex_weight(&self) -> Option<u16> {
        self.inner.flex_weight()
    }
}

/// Marks a child as flexible with the given weight.
pub struct Flex {
    weight: u16,
    inner: AnyView,
}

impl Flex {
    pub fn new(weight: u16, inner: AnyView) -> Self {
        Self { weight, inner }
    }
}

impl View for Flex {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        self.inner.measure(max_width, max_height)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        self.inner.paint(ctx, bounds);
    }

    fn flex_weight(&self) -> Option<u16> {
        Some(self.weight)
    }
}
