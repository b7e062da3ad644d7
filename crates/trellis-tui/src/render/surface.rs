use crate::geometry::{Point, Rect, Size};
use crate::style::Style;
use crate::text::truncate_to_width;

/// Invoked with the absolute cell that was clicked.
pub type RegionCallback = Box<dyn FnMut(Point) + Send>;

/// Cell-level drawing backend.
///
/// Implementations own buffering and output; the toolkit only issues these
/// primitives. Coordinates outside the surface are ignored.
pub trait Surface {
    fn size(&self) -> Size;

    fn print(&mut self, x: u16, y: u16, text: &str, style: Style);

    fn fill(&mut self, rect: Rect, style: Style);

    fn print_truncated(&mut self, x: u16, y: u16, max_width: u16, text: &str, style: Style) {
        self.print(x, y, truncate_to_width(text, max_width as usize), style);
    }

    fn register_region(&mut self, rect: Rect, callback: RegionCallback);

    /// Where the terminal cursor should be shown after the frame, if anywhere.
    fn set_cursor(&mut self, _position: Option<Point>) {}
}
