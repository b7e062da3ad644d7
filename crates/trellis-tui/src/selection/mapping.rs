use crate::geometry::Point;
use crate::selection::TextPosition;
use crate::text::{char_width, display_width, floor_boundary};

/// Converts between screen cells and text positions for a scrolled,
/// optionally line-numbered text area.
///
/// ```
/// use trellis_tui::geometry::Point;
/// use trellis_tui::selection::{ScreenMapper, TextPosition};
///
/// let lines = ["alpha", "beta", "gamma"];
/// let mapper = ScreenMapper::new(Point::new(0, 0), 1, 4);
/// // Row 0 shows line 1; the first four columns are the gutter.
/// assert_eq!(mapper.screen_to_text(6, 0, &lines), TextPosition::new(1, 2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenMapper {
    /// Top-left cell of the text area, gutter included.
    pub origin: Point,
    /// First visible line.
    pub scroll_offset: usize,
    /// Columns reserved for line numbers.
    pub gutter_width: u16,
}

impl ScreenMapper {
    pub fn new(origin: Point, scroll_offset: usize, gutter_width: u16) -> Self {
        Self {
            origin,
            scroll_offset,
            gutter_width,
        }
    }

    /// Text position under screen cell (x, y).
    ///
    /// Clicks in the gutter map to column 0. Rows below the text map to the
    /// end of the last line.
    pub fn screen_to_text<S: AsRef<str>>(&self, x: u16, y: u16, lines: &[S]) -> TextPosition {
        let Some(last) = lines.len().checked_sub(1) else {
            return TextPosition::default();
        };
        let row = y.saturating_sub(self.origin.y) as usize + self.scroll_offset;
        if row > last {
            return TextPosition::new(last, lines[last].as_ref().len());
        }

        let target = x
            .saturating_sub(self.origin.x)
            .saturating_sub(self.gutter_width) as usize;
        let line = lines[row].as_ref();
        let mut used = 0;
        for (i, c) in line.char_indices() {
            if used >= target {
                return TextPosition::new(row, i);
            }
            used += char_width(c);
        }
        TextPosition::new(row, line.len())
    }

    /// Screen cell of `pos`, or `None` when it is scrolled above the view.
    pub fn text_to_screen<S: AsRef<str>>(&self, pos: TextPosition, lines: &[S]) -> Option<Point> {
        let row = pos.line.checked_sub(self.scroll_offset)?;
        let column = lines.get(pos.line).map_or(0, |line| {
            let line = line.as_ref();
            display_width(&line[..floor_boundary(line, pos.column)])
        });
        let x = self.origin.x as usize + self.gutter_width as usize + column;
        let y = self.origin.y as usize + row;
        Some(Point::new(
            x.min(u16::MAX as usize) as u16,
            y.min(u16::MAX as usize) as u16,
        ))
    }
}
