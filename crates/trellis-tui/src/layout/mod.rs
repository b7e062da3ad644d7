mod boxes;
mod flex;
mod params;

pub use boxes::{BoxLayout, LayoutItem};
pub(crate) use boxes::to_cell;
pub use flex::{calculate_extents, distribute, ChildMeasurement, FlexLayoutInput, FlexLayoutResult};
pub use params::{Align, LayoutParams};
