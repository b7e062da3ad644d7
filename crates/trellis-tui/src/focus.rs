//! Keyboard focus registry and Tab-order navigation.
//!
//! The manager is rebuilt every frame: [`FocusManager::clear`] empties the
//! registration table, widgets re-register while painting, and the focused
//! identity survives the clear as a plain string. An identity may be focused
//! before (or without) anything registering under it.

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use parking_lot::Mutex;

use crate::geometry::Rect;

/// A participant in keyboard focus.
pub trait Focusable: Send {
    fn focus_id(&self) -> &str;

    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);

    /// Returns `true` if the key was consumed.
    fn handle_key(&mut self, key: &KeyEvent) -> bool;

    /// Screen area that transfers focus when clicked.
    fn focus_bounds(&self) -> Rect;

    fn handle_mouse(&mut self, _event: &MouseEvent) -> bool {
        false
    }

    /// Bracketed paste delivered by the terminal.
    fn handle_paste(&mut self, _content: &str) -> bool {
        false
    }
}

pub type FocusHandle = Arc<Mutex<dyn Focusable>>;

#[derive(Default)]
struct FocusState {
    table: HashMap<String, FocusHandle>,
    order: Vec<String>,
    current: Option<String>,
}

/// Shared focus context. Every method takes the internal lock only for its
/// own duration and never while calling into a widget.
#[derive(Default)]
pub struct FocusManager {
    state: Mutex<FocusState>,
}

impl std::fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FocusManager")
            .field("order", &state.order)
            .field("current", &state.current)
            .finish()
    }
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a focusable for the current frame.
    ///
    /// Registering an identity twice in one frame replaces the handle but
    /// keeps its original position in the Tab order.
    pub fn register(&self, handle: FocusHandle) {
        let id = handle.lock().focus_id().to_string();

        let focused = {
            let mut state = self.state.lock();
            match state.table.get_mut(&id) {
                Some(slot) => *slot = handle.clone(),
                None => {
                    state.order.push(id.clone());
                    state.table.insert(id.clone(), handle.clone());
                }
            }
            match &state.current {
                Some(current) => *current == id,
                None => {
                    tracing::debug!(id = %id, "first registrant takes focus");
                    state.current = Some(id);
                    true
                }
            }
        };

        handle.lock().set_focused(focused);
    }

    /// Forget this frame's registrations. The focused identity is kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.table.clear();
        state.order.clear();
    }

    pub fn set_focus(&self, id: &str) {
        self.transition(|_| Some(id.to_string()));
    }

    pub fn focus_next(&self) {
        self.transition(|state| {
            let order = &state.order;
            if order.is_empty() {
                return None;
            }
            let next = match position(state) {
                Some(i) => (i + 1) % order.len(),
                None => 0,
            };
            Some(order[next].clone())
        });
    }

    pub fn focus_prev(&self) {
        self.transition(|state| {
            let order = &state.order;
            if order.is_empty() {
                return None;
            }
            let prev = match position(state) {
                Some(0) | None => order.len() - 1,
                Some(i) => i - 1,
            };
            Some(order[prev].clone())
        });
    }

    /// Move focus to the identity chosen by `pick`, updating both holders.
    fn transition(&self, pick: impl FnOnce(&FocusState) -> Option<String>) {
        let (previous, next) = {
            let mut state = self.state.lock();
            let Some(target) = pick(&state) else {
                return;
            };
            let previous = state
                .current
                .as_ref()
                .filter(|current| **current != target)
                .and_then(|current| state.table.get(current).cloned());
            let next = state.table.get(&target).cloned();
            tracing::debug!(
                from = ?state.current,
                to = %target,
                registered = next.is_some(),
                "focus changed"
            );
            state.current = Some(target);
            (previous, next)
        };

        if let Some(previous) = previous {
            previous.lock().set_focused(false);
        }
        if let Some(next) = next {
            next.lock().set_focused(true);
        }
    }

    /// Currently focused identity, registered or not.
    pub fn focused(&self) -> Option<String> {
        self.state.lock().current.clone()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.state.lock().current.as_deref() == Some(id)
    }

    pub fn focus_order(&self) -> Vec<String> {
        self.state.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().order.is_empty()
    }

    fn focused_handle(&self) -> Option<FocusHandle> {
        let state = self.state.lock();
        state
            .current
            .as_ref()
            .and_then(|current| state.table.get(current).cloned())
    }

    /// Route a key: Tab and Shift+Tab navigate, everything else goes to the
    /// focused widget.
    pub fn handle_key(&self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::BackTab => {
                self.focus_prev();
                return true;
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_prev();
                return true;
            }
            KeyCode::Tab => {
                self.focus_next();
                return true;
            }
            _ => {}
        }

        match self.focused_handle() {
            Some(handle) => handle.lock().handle_key(key),
            None => false,
        }
    }

    /// Focus the first widget, in Tab order, whose bounds contain (x, y).
    pub fn handle_click(&self, x: u16, y: u16) -> bool {
        let handles: Vec<FocusHandle> = {
            let state = self.state.lock();
            state
                .order
                .iter()
                .filter_map(|id| state.table.get(id).cloned())
                .collect()
        };
        let hit = handles.into_iter().find_map(|handle| {
            let widget = handle.lock();
            widget
                .focus_bounds()
                .contains(x, y)
                .then(|| widget.focus_id().to_string())
        });
        match hit {
            Some(id) => {
                self.set_focus(&id);
                true
            }
            None => false,
        }
    }

    /// Forward a mouse event to the focused widget.
    pub fn handle_mouse(&self, event: &MouseEvent) -> bool {
        match self.focused_handle() {
            Some(handle) => handle.lock().handle_mouse(event),
            None => false,
        }
    }

    pub fn handle_paste(&self, content: &str) -> bool {
        match self.focused_handle() {
            Some(handle) => handle.lock().handle_paste(content),
            None => false,
        }
    }
}

fn position(state: &FocusState) -> Option<usize> {
    let current = state.current.as_ref()?;
    state.order.iter().position(|id| id == current)
}


#[cfg(test)]
mod tests {
    use super::testing::Probe;
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup(ids: &[&str]) -> (FocusManager, Vec<Arc<Mutex<Probe>>>) {
        let manager = FocusManager::new();
        let probes: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| Probe::handle(id, Rect::new(0, i as u16, 10, 1)))
            .collect();
        for probe in &probes {
            manager.register(probe.clone());
        }
        (manager, probes)
    }

    #[test]
    fn first_registrant_is_focused() {
        let (manager, probes) = setup(&["a", "b"]);
        assert_eq!(manager.focused().as_deref(), Some("a"));
        assert!(probes[0].lock().focused);
        assert!(!probes[1].lock().focused);
    }

    #[test]
    fn register_is_idempotent_per_frame() {
        let (manager, probes) = setup(&["a", "b"]);
        manager.register(probes[0].clone());
        assert_eq!(manager.focus_order(), vec!["a", "b"]);
    }

    #[test]
    fn focus_next_wraps() {
        let (manager, probes) = setup(&["a", "b", "c"]);
        manager.focus_next();
        manager.focus_next();
        assert_eq!(manager.focused().as_deref(), Some("c"));
        assert!(probes[2].lock().focused);
        assert!(!probes[1].lock().focused);
        manager.focus_next();
        assert_eq!(manager.focused().as_deref(), Some("a"));
    }

    #[test]
    fn focus_prev_wraps_to_last() {
        let (manager, _) = setup(&["a", "b", "c"]);
        manager.focus_prev();
        assert_eq!(manager.focused().as_deref(), Some("c"));
    }

    #[test]
    fn navigation_on_empty_registry_is_noop() {
        let manager = FocusManager::new();
        manager.focus_next();
        manager.focus_prev();
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn focused_identity_survives_clear() {
        let (manager, _) = setup(&["a", "b"]);
        manager.focus_next();
        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.focused().as_deref(), Some("b"));

        let a = Probe::handle("a", Rect::default());
        let b = Probe::handle("b", Rect::default());
        manager.register(a.clone());
        manager.register(b.clone());
        assert!(!a.lock().focused);
        assert!(b.lock().focused);
    }

    #[test]
    fn set_focus_tolerates_unregistered_id() {
        let (manager, probes) = setup(&["a"]);
        manager.set_focus("later");
        assert_eq!(manager.focused().as_deref(), Some("later"));
        assert!(!probes[0].lock().focused);
        assert!(!manager.handle_key(&key(KeyCode::Char('x'))));

        let later = Probe::handle("later", Rect::default());
        manager.register(later.clone());
        assert!(later.lock().focused);
    }

    #[test]
    fn tab_is_intercepted_before_widgets() {
        let (manager, probes) = setup(&["a", "b"]);
        assert!(manager.handle_key(&key(KeyCode::Tab)));
        assert_eq!(manager.focused().as_deref(), Some("b"));
        assert!(probes[0].lock().keys.is_empty());

        assert!(manager.handle_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)));
        assert_eq!(manager.focused().as_deref(), Some("a"));
        assert!(manager.handle_key(&key(KeyCode::BackTab)));
        assert_eq!(manager.focused().as_deref(), Some("b"));
    }

    #[test]
    fn other_keys_go_to_focused_widget() {
        let (manager, probes) = setup(&["a", "b"]);
        assert!(manager.handle_key(&key(KeyCode::Char('q'))));
        assert!(!manager.handle_key(&key(KeyCode::Up)));
        assert_eq!(probes[0].lock().keys, vec![KeyCode::Char('q'), KeyCode::Up]);
        assert!(probes[1].lock().keys.is_empty());
    }

    #[test]
    fn click_transfers_focus() {
        let (manager, probes) = setup(&["a", "b", "c"]);
        assert!(manager.handle_click(3, 2));
        assert_eq!(manager.focused().as_deref(), Some("c"));
        assert!(probes[2].lock().focused);
        assert!(!probes[0].lock().focused);
        assert!(!manager.handle_click(30, 30));
        assert_eq!(manager.focused().as_deref(), Some("c"));
    }
}
