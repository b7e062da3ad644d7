use crate::geometry::{Point, Rect, Size};
use crate::render::regions::InteractiveRegions;
use crate::render::surface::{RegionCallback, Surface};
use crate::style::Style;
use crate::text::char_width;

/// Marks the trailing cell(s) covered by a double-width glyph.
const CONTINUATION: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub fn blank(style: Style) -> Self {
        Self { ch: ' ', style }
    }

    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Style::default())
    }
}

/// In-memory character grid implementing [`Surface`].
///
/// Holds one frame: the cells, the interactive regions registered while
/// painting it, and the requested cursor position.
#[derive(Debug)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    regions: InteractiveRegions,
    cursor: Option<Point>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
            regions: InteractiveRegions::new(),
            cursor: None,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
        self.regions.clear();
        self.cursor = None;
    }

    /// Blank every cell and forget regions and cursor.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.regions.clear();
        self.cursor = None;
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn regions(&self) -> &InteractiveRegions {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut InteractiveRegions {
        &mut self.regions
    }

    /// Write one glyph, repairing any wide glyph it partially overwrites.
    fn put(&mut self, x: u16, y: u16, ch: char, width: u16, style: Style) {
        let Some(i) = self.index(x, y) else { return };

        if self.cells[i].is_continuation() && x > 0 {
            self.cells[i - 1] = Cell::blank(self.cells[i - 1].style);
        }
        let end = x.saturating_add(width.max(1));
        let mut j = end;
        while let Some(k) = self.index(j, y) {
            if !self.cells[k].is_continuation() {
                break;
            }
            self.cells[k] = Cell::blank(self.cells[k].style);
            j += 1;
        }

        self.cells[i] = Cell { ch, style };
        for dx in 1..width {
            if let Some(k) = self.index(x + dx, y) {
                self.cells[k] = Cell {
                    ch: CONTINUATION,
                    style,
                };
            }
        }
    }

    /// One row as plain text, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Rows joined with `\n`, trailing blanks trimmed. Handy for snapshots.
    pub fn to_plain_text(&self) -> String {
        self.to_lines()
            .iter()
            .map(|l| l.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for CellBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) {
        if y >= self.height {
            return;
        }
        let mut col = x;
        for c in text.chars() {
            if col >= self.width {
                break;
            }
            let w = char_width(c) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > self.width {
                break;
            }
            self.put(col, y, c, w, style);
            col += w;
        }
    }

    fn fill(&mut self, rect: Rect, style: Style) {
        let area = rect.intersect(&Rect::from_size(self.size()));
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.put(x, y, ' ', 1, style);
            }
        }
    }

    fn register_region(&mut self, rect: Rect, callback: RegionCallback) {
        self.regions.register(rect, callback);
    }

    fn set_cursor(&mut self, position: Option<Point>) {
        self.cursor = position;
    }
}
