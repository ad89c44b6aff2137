//! Reducer actions, change notifications, and transition logic for the window registry.

use thiserror::Error;

use crate::model::{WindowId, WindowRecord, WindowRegistryState, WindowState};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_windows`].
pub enum WindowAction<C> {
    /// Open a window, or restore the existing one with the same id.
    OpenWindow {
        /// Resolved window id.
        window_id: WindowId,
        /// Title used when a new record is created.
        title: String,
        /// Content used when a new record is created.
        content: C,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Move a window into the tray.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Expand a window to fill the viewport.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
    },
    /// Return a minimized or maximized window to its normal panel.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Change notifications emitted by [`reduce_windows`] and forwarded to registry subscribers.
pub enum RegistryEffect {
    /// A new window record was created.
    Opened(WindowId),
    /// An existing window was reopened and brought back to normal.
    Reopened(WindowId),
    /// A window entered (or was re-stamped in) the tray.
    Minimized(WindowId),
    /// A window now fills the viewport.
    Maximized(WindowId),
    /// A window returned to its normal panel.
    Restored(WindowId),
    /// A window was removed.
    Closed(WindowId),
    /// The minimized tray contents or order changed.
    TrayChanged,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference a missing window.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
}

/// Applies a [`WindowAction`] to the registry state and returns the resulting notifications.
///
/// An empty effect list means the action changed nothing (for example restoring a window that
/// is already normal).
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when a close/minimize/maximize/restore action
/// references a window that is not open. Opening never fails.
pub fn reduce_windows<C>(
    state: &mut WindowRegistryState<C>,
    action: WindowAction<C>,
) -> Result<Vec<RegistryEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        WindowAction::OpenWindow {
            window_id,
            title,
            content,
        } => match state.windows.iter().position(|w| w.id == window_id) {
            Some(index) => {
                let window = &mut state.windows[index];
                let was_minimized = window.is_minimized();
                set_state(window, WindowState::Normal);
                effects.push(RegistryEffect::Reopened(window_id));
                if was_minimized {
                    effects.push(RegistryEffect::TrayChanged);
                }
            }
            None => {
                state
                    .windows
                    .push(WindowRecord::new(window_id.clone(), title, content));
                effects.push(RegistryEffect::Opened(window_id));
            }
        },
        WindowAction::CloseWindow { window_id } => {
            let index = position(state, &window_id)?;
            let removed = state.windows.remove(index);
            effects.push(RegistryEffect::Closed(window_id));
            if removed.is_minimized() {
                effects.push(RegistryEffect::TrayChanged);
            }
        }
        WindowAction::MinimizeWindow { window_id } => {
            let order = state.next_minimized_order;
            let window = find_window_mut(state, &window_id)?;
            window.state = WindowState::Minimized;
            window.minimized_order = Some(order);
            state.next_minimized_order = order.saturating_add(1);
            effects.push(RegistryEffect::Minimized(window_id));
            effects.push(RegistryEffect::TrayChanged);
        }
        WindowAction::MaximizeWindow { window_id } => {
            let window = find_window_mut(state, &window_id)?;
            if window.is_maximized() {
                return Ok(effects);
            }
            let was_minimized = window.is_minimized();
            set_state(window, WindowState::Maximized);
            effects.push(RegistryEffect::Maximized(window_id));
            if was_minimized {
                effects.push(RegistryEffect::TrayChanged);
            }
        }
        WindowAction::RestoreWindow { window_id } => {
            let window = find_window_mut(state, &window_id)?;
            if window.state == WindowState::Normal {
                return Ok(effects);
            }
            let was_minimized = window.is_minimized();
            set_state(window, WindowState::Normal);
            effects.push(RegistryEffect::Restored(window_id));
            if was_minimized {
                effects.push(RegistryEffect::TrayChanged);
            }
        }
    }
    Ok(effects)
}

/// Moves a window into a non-minimized state, dropping its tray stamp.
fn set_state<C>(window: &mut WindowRecord<C>, next: WindowState) {
    window.state = next;
    window.minimized_order = None;
}

fn position<C>(
    state: &WindowRegistryState<C>,
    window_id: &WindowId,
) -> Result<usize, ReducerError> {
    state
        .windows
        .iter()
        .position(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn find_window_mut<'a, C>(
    state: &'a mut WindowRegistryState<C>,
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord<C>, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    type State = WindowRegistryState<&'static str>;

    fn open(state: &mut State, id: &str, title: &str) -> Vec<RegistryEffect> {
        reduce_windows(
            state,
            WindowAction::OpenWindow {
                window_id: WindowId::from(id),
                title: title.to_string(),
                content: "body",
            },
        )
        .expect("open never fails")
    }

    fn apply(state: &mut State, action: WindowAction<&'static str>) -> Vec<RegistryEffect> {
        reduce_windows(state, action).expect("window exists")
    }

    fn minimize(id: &str) -> WindowAction<&'static str> {
        WindowAction::MinimizeWindow {
            window_id: WindowId::from(id),
        }
    }

    fn assert_order_invariant(state: &State) {
        for window in &state.windows {
            assert_eq!(
                window.minimized_order.is_some(),
                window.state == WindowState::Minimized,
                "order stamp out of sync for {}",
                window.id
            );
        }
    }

    #[test]
    fn open_creates_normal_window() {
        let mut state = State::default();
        let effects = open(&mut state, "w1", "New Customer");

        assert_eq!(effects, vec![RegistryEffect::Opened(WindowId::from("w1"))]);
        let window = state.window(&WindowId::from("w1")).expect("window");
        assert_eq!(window.title, "New Customer");
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.minimized_order, None);
    }

    #[test]
    fn reopening_restores_existing_window_without_duplicating() {
        let mut state = State::default();
        open(&mut state, "w1", "New Customer");
        apply(&mut state, minimize("w1"));

        let effects = reduce_windows(
            &mut state,
            WindowAction::OpenWindow {
                window_id: WindowId::from("w1"),
                title: "Other title".to_string(),
                content: "other body",
            },
        )
        .expect("reopen");

        assert_eq!(
            effects,
            vec![
                RegistryEffect::Reopened(WindowId::from("w1")),
                RegistryEffect::TrayChanged
            ]
        );
        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.minimized_order, None);
        assert_eq!(window.title, "New Customer");
        assert_eq!(window.content, "body");
    }

    #[test]
    fn reopening_maximized_window_returns_it_to_normal() {
        let mut state = State::default();
        open(&mut state, "w1", "New Customer");
        apply(
            &mut state,
            WindowAction::MaximizeWindow {
                window_id: WindowId::from("w1"),
            },
        );

        let effects = open(&mut state, "w1", "Other title");

        assert_eq!(effects, vec![RegistryEffect::Reopened(WindowId::from("w1"))]);
        assert_eq!(state.windows.len(), 1);
        let window = &state.windows[0];
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.minimized_order, None);
        assert_eq!(window.title, "New Customer");
        assert_order_invariant(&state);
    }

    #[test]
    fn tray_lists_most_recently_minimized_first() {
        let mut state = State::default();
        for id in ["a", "b", "c"] {
            open(&mut state, id, id);
        }
        for id in ["a", "b", "c"] {
            apply(&mut state, minimize(id));
        }

        let tray: Vec<&str> = state
            .minimized_windows()
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(tray, vec!["c", "b", "a"]);
    }

    #[test]
    fn minimizing_again_moves_window_to_tray_front() {
        let mut state = State::default();
        open(&mut state, "w1", "one");
        open(&mut state, "w2", "two");
        apply(&mut state, minimize("w1"));
        apply(&mut state, minimize("w2"));
        apply(&mut state, minimize("w1"));

        let tray: Vec<&str> = state
            .minimized_windows()
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(tray, vec!["w1", "w2"]);
        assert_eq!(state.next_minimized_order, 3);
    }

    #[test]
    fn maximize_and_restore_clear_tray_stamp() {
        let mut state = State::default();
        open(&mut state, "w1", "one");
        apply(&mut state, minimize("w1"));

        let effects = apply(
            &mut state,
            WindowAction::MaximizeWindow {
                window_id: WindowId::from("w1"),
            },
        );
        assert_eq!(
            effects,
            vec![
                RegistryEffect::Maximized(WindowId::from("w1")),
                RegistryEffect::TrayChanged
            ]
        );
        assert_eq!(state.windows[0].state, WindowState::Maximized);
        assert_eq!(state.windows[0].minimized_order, None);

        let effects = apply(
            &mut state,
            WindowAction::RestoreWindow {
                window_id: WindowId::from("w1"),
            },
        );
        assert_eq!(effects, vec![RegistryEffect::Restored(WindowId::from("w1"))]);
        assert_eq!(state.windows[0].state, WindowState::Normal);
    }

    #[test]
    fn redundant_transitions_emit_nothing() {
        let mut state = State::default();
        open(&mut state, "w1", "one");

        let restore = apply(
            &mut state,
            WindowAction::RestoreWindow {
                window_id: WindowId::from("w1"),
            },
        );
        assert!(restore.is_empty());

        apply(
            &mut state,
            WindowAction::MaximizeWindow {
                window_id: WindowId::from("w1"),
            },
        );
        let again = apply(
            &mut state,
            WindowAction::MaximizeWindow {
                window_id: WindowId::from("w1"),
            },
        );
        assert!(again.is_empty());
    }

    #[test]
    fn close_removes_window_in_any_state() {
        let mut state = State::default();
        open(&mut state, "w1", "one");
        open(&mut state, "w2", "two");
        apply(&mut state, minimize("w2"));

        let effects = apply(
            &mut state,
            WindowAction::CloseWindow {
                window_id: WindowId::from("w2"),
            },
        );
        assert_eq!(
            effects,
            vec![
                RegistryEffect::Closed(WindowId::from("w2")),
                RegistryEffect::TrayChanged
            ]
        );
        apply(
            &mut state,
            WindowAction::CloseWindow {
                window_id: WindowId::from("w1"),
            },
        );
        assert!(state.windows.is_empty());
    }

    #[test]
    fn unknown_window_is_reported_and_state_untouched() {
        let mut state = State::default();
        open(&mut state, "w1", "one");
        let before = state.clone();

        for action in [
            minimize("ghost"),
            WindowAction::MaximizeWindow {
                window_id: WindowId::from("ghost"),
            },
            WindowAction::RestoreWindow {
                window_id: WindowId::from("ghost"),
            },
            WindowAction::CloseWindow {
                window_id: WindowId::from("ghost"),
            },
        ] {
            assert_eq!(
                reduce_windows(&mut state, action),
                Err(ReducerError::WindowNotFound(WindowId::from("ghost")))
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn order_stamp_tracks_minimized_state_across_mixed_sequence() {
        let mut state = State::default();
        let ids = ["a", "b", "c"];
        for id in ids {
            open(&mut state, id, id);
        }
        let script: Vec<(usize, u8)> = vec![
            (0, 0),
            (1, 1),
            (0, 2),
            (2, 0),
            (1, 0),
            (2, 3),
            (0, 0),
            (0, 1),
            (1, 2),
            (2, 0),
            (2, 0),
        ];
        for (index, op) in script {
            let window_id = WindowId::from(ids[index]);
            let action = match op {
                0 => WindowAction::MinimizeWindow { window_id },
                1 => WindowAction::MaximizeWindow { window_id },
                2 => WindowAction::RestoreWindow { window_id },
                _ => WindowAction::OpenWindow {
                    window_id,
                    title: String::new(),
                    content: "",
                },
            };
            reduce_windows(&mut state, action).expect("window exists");
            assert_order_invariant(&state);
        }
    }
}
