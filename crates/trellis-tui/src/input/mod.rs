//! Text-input engine: segment buffer, key mapping and visual-line motion.

mod action;
mod segment;
mod wrap;

pub use action::InputAction;
pub use segment::{InputOptions, Segment, SegmentBuffer};
pub use wrap::{cursor_position, visual_lines, VisualLine};
