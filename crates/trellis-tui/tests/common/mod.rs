//! Shared helpers for the integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use trellis_tui::geometry::{Constraints, Rect, Size};
use trellis_tui::layout::{LayoutItem, LayoutParams};
use trellis_tui::render::{CellBuffer, PaintContext};
use trellis_tui::{FocusManager, View};

/// Fixed-size layout leaf.
#[derive(Debug, Clone)]
pub struct Leaf {
    pub size: Size,
    pub params: LayoutParams,
}

impl Leaf {
    pub fn new(width: u16, height: u16, grow: u16) -> Self {
        Self {
            size: Size::new(width, height),
            params: LayoutParams::new().grow(grow),
        }
    }
}

impl LayoutItem for Leaf {
    fn params(&self) -> LayoutParams {
        self.params
    }

    fn measure(&self, _constraints: Constraints) -> Size {
        self.size
    }
}

pub fn leaves() -> impl Strategy<Value = Vec<Leaf>> {
    prop::collection::vec((0u16..30, 0u16..5, 0u16..4), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(w, h, grow)| Leaf::new(w, h, grow))
            .collect()
    })
}

/// One editing step applied to a segment buffer.
#[derive(Debug, Clone)]
pub enum Edit {
    Type(String),
    Paste(String),
    Newline,
    Backspace,
    Delete,
    DeleteWord,
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
}

pub fn edits() -> impl Strategy<Value = Vec<Edit>> {
    let edit = prop_oneof![
        4 => "[a-z 日é_.]{1,6}".prop_map(Edit::Type),
        1 => prop::collection::vec("[a-z]{0,4}", 1..4).prop_map(|lines| Edit::Paste(lines.join("\n"))),
        1 => Just(Edit::Newline),
        2 => Just(Edit::Backspace),
        1 => Just(Edit::Delete),
        1 => Just(Edit::DeleteWord),
        2 => Just(Edit::Left),
        1 => Just(Edit::Right),
        1 => Just(Edit::WordLeft),
        1 => Just(Edit::WordRight),
        1 => Just(Edit::Home),
        1 => Just(Edit::End),
    ];
    prop::collection::vec(edit, 0..40)
}

pub fn render(view: &dyn View, width: u16, height: u16) -> String {
    let mut buf = CellBuffer::new(width, height);
    let focus = FocusManager::new();
    let mut ctx = PaintContext::new(&mut buf, &focus);
    view.paint(&mut ctx, Rect::new(0, 0, width, height));
    buf.to_plain_text()
}
