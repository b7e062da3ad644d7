//! Clickable rectangles collected during paint.

use crate::geometry::{Point, Rect};
use crate::render::surface::RegionCallback;

struct Region {
    rect: Rect,
    callback: RegionCallback,
}

/// Rectangle → callback registry. Populated while painting, consulted on
/// click, cleared once per frame by the frame driver.
#[derive(Default)]
pub struct InteractiveRegions {
    regions: Vec<Region>,
}

impl std::fmt::Debug for InteractiveRegions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.regions.iter().map(|r| r.rect))
            .finish()
    }
}

impl InteractiveRegions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rect: Rect, callback: RegionCallback) {
        if rect.is_empty() {
            return;
        }
        self.regions.push(Region { rect, callback });
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Fire the topmost region under (x, y). Regions painted later sit on top.
    pub fn dispatch(&mut self, x: u16, y: u16) -> bool {
        match self.regions.iter_mut().rev().find(|r| r.rect.contains(x, y)) {
            Some(region) => {
                tracing::trace!(x, y, rect = ?region.rect, "region hit");
                (region.callback)(Point::new(x, y));
                true
            }
            None => false,
        }
    }
}
