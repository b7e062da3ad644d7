//! Retained/declarative terminal UI toolkit.
//!
//! Two layout tiers share one flex-distribution core:
//!
//! - [`view`]: declarative views rebuilt every frame (`vstack`, `hstack`,
//!   `zstack`, text, spacers) that measure within a maximum size and paint
//!   into the bounds they are given;
//! - [`widgets`]: persistent widgets with [`LayoutParams`] (grow, margin,
//!   padding, size constraints) laid out by the [`BoxLayout`] engine.
//!
//! Interactive widgets register with a [`FocusManager`] while painting and
//! receive keys and mouse events through it. [`Ui`] ties a frame together:
//! clear focus, paint the root view into a [`CellBuffer`], then route input.
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use trellis_tui::view::{text, vstack, Mount};
//! use trellis_tui::widgets::TextInput;
//! use trellis_tui::Ui;
//!
//! let name = Arc::new(Mutex::new(TextInput::new("name").placeholder("your name")));
//! let root = vstack([text("Name:"), Mount::focusable(&name)]);
//!
//! let mut ui = Ui::new(20, 2);
//! ui.render(&root);
//! assert_eq!(ui.screen_text(), "Name:\nyour name");
//! assert_eq!(ui.focus().focused().as_deref(), Some("name"));
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod render;
pub mod selection;
pub mod style;
pub mod text;
pub mod ticker;
pub mod ui;
pub mod view;
pub mod widgets;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::TuiConfig;
pub use error::{ClipboardError, ConfigError, Error, Result};
pub use focus::{FocusHandle, FocusManager, Focusable};
pub use geometry::{Axis, Constraints, Edges, Point, Rect, Size, SizeConstraints};
pub use input::{InputAction, InputOptions, Segment, SegmentBuffer};
pub use layout::{Align, BoxLayout, LayoutItem, LayoutParams};
pub use render::{CellBuffer, PaintContext, Surface, TerminalWriter};
pub use selection::{ScreenMapper, Selection, TextPosition};
pub use style::{Color, Style};
pub use ticker::FrameTicker;
pub use ui::Ui;
pub use view::{AnyView, View, ViewExt};
pub use widgets::{Widget, WidgetHandle};
