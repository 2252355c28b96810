//! The navigation port: the only process-wide mutable state.
//!
//! In a browser this is `window.location.hash` plus the `hashchange`
//! event. The resolver only ever talks to the [`NavigationPort`] trait, so
//! tests and the command-line driver run against [`MemoryNavigation`].
//!
//! The runtime is single-threaded and cooperative, so listeners are plain
//! `Rc<dyn Fn>` callbacks and the port uses interior mutability.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

/// A fragment-change callback. Receives the new fragment.
pub type FragmentListener = Rc<dyn Fn(&str)>;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Access to the address bar's fragment.
pub trait NavigationPort {
    /// The current fragment, including the leading `#` when present.
    fn current_fragment(&self) -> String;

    /// Replace the fragment. Listeners are notified if it changed.
    fn set_fragment(&self, fragment: &str);

    /// Register a listener for subsequent fragment changes.
    fn on_change(&self, listener: FragmentListener) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

#[derive(Default)]
struct PortState {
    fragment: String,
    listeners: Vec<(ListenerId, FragmentListener)>,
    next_id: u64,
    pending: VecDeque<String>,
    dispatching: bool,
}

/// In-memory navigation port.
///
/// Changes made while listeners are running (a listener that navigates)
/// are queued and delivered after the current round, so every listener
/// sees changes in the order they happened and the last delivery always
/// matches the final fragment. Cloning yields another handle to the same
/// address bar.
#[derive(Clone, Default)]
pub struct MemoryNavigation {
    state: Rc<RefCell<PortState>>,
}

impl MemoryNavigation {
    /// Create a port positioned at `fragment`.
    pub fn new(fragment: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(PortState {
                fragment: fragment.to_owned(),
                ..PortState::default()
            })),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver queued changes until the queue is empty.
    fn drain(&self) {
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.pending.pop_front() {
                    Some(fragment) => {
                        let listeners: Vec<FragmentListener> =
                            state.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
                        Some((fragment, listeners))
                    }
                    None => {
                        state.dispatching = false;
                        None
                    }
                }
            };
            let Some((fragment, listeners)) = next else {
                return;
            };
            for listener in listeners {
                listener(&fragment);
            }
        }
    }
}

impl NavigationPort for MemoryNavigation {
    fn current_fragment(&self) -> String {
        self.state.borrow().fragment.clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let start_dispatch = {
            let mut state = self.state.borrow_mut();
            if state.fragment == fragment {
                return;
            }
            debug!(from = state.fragment, to = fragment, "fragment changed");
            fragment.clone_into(&mut state.fragment);
            state.pending.push_back(fragment.to_owned());
            !std::mem::replace(&mut state.dispatching, true)
        };
        if start_dispatch {
            self.drain();
        }
    }

    fn on_change(&self, listener: FragmentListener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);
        state.listeners.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(registered, _)| *registered != id);
    }
}
