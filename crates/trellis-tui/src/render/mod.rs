//! Drawing backend abstraction and the in-memory cell buffer.

mod cell_buffer;
mod context;
mod regions;
mod surface;
mod terminal;

pub use cell_buffer::{Cell, CellBuffer};
pub use context::PaintContext;
pub use regions::InteractiveRegions;
pub use surface::{RegionCallback, Surface};
pub use terminal::TerminalWriter;
