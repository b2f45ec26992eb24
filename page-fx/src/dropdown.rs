//! The "pages" dropdown: a two-state menu with keyboard navigation.
//!
//! [`Dropdown::handle`] maps one user input to exactly one [`Reaction`];
//! the caller applies the class, `aria-expanded` and focus side effects.

/// Open/closed state of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    /// Value for the trigger's `aria-expanded` attribute.
    pub fn aria_expanded(self) -> &'static str {
        match self {
            MenuState::Closed => "false",
            MenuState::Open => "true",
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// Where keyboard focus should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Trigger,
    Link(usize),
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    ArrowDown,
    ArrowUp,
    Escape,
    Other,
}

impl MenuKey {
    /// Classify a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => MenuKey::ArrowDown,
            "ArrowUp" | "Up" => MenuKey::ArrowUp,
            "Escape" | "Esc" => MenuKey::Escape,
            _ => MenuKey::Other,
        }
    }
}

/// The element a key event was dispatched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Trigger,
    Link(usize),
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Click on the trigger button.
    TriggerClick,
    /// Click on anything outside both the trigger and the menu.
    OutsideClick,
    Key { key: MenuKey, origin: KeyOrigin },
}

/// What the caller must do in response to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// The state flipped; re-sync the menu class and `aria-expanded`.
    pub state_changed: bool,
    pub focus: Option<Focus>,
    /// Suppress the browser's default action (arrow-key scrolling).
    pub prevent_default: bool,
}

impl Reaction {
    fn none() -> Self {
        Self::default()
    }
}

/// Dropdown state machine over an ordered list of `link_count` links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dropdown {
    state: MenuState,
    link_count: usize,
}

impl Dropdown {
    pub fn new(link_count: usize) -> Self {
        Self {
            state: MenuState::Closed,
            link_count,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    fn set(&mut self, next: MenuState) -> bool {
        let changed = self.state != next;
        self.state = next;
        changed
    }

    pub fn handle(&mut self, input: MenuInput) -> Reaction {
        match input {
            MenuInput::TriggerClick => {
                let next = match self.state {
                    MenuState::Closed => MenuState::Open,
                    MenuState::Open => MenuState::Closed,
                };
                Reaction {
                    state_changed: self.set(next),
                    ..Reaction::none()
                }
            }
            MenuInput::OutsideClick => Reaction {
                state_changed: self.set(MenuState::Closed),
                ..Reaction::none()
            },
            MenuInput::Key { key, origin } => self.handle_key(key, origin),
        }
    }

    fn handle_key(&mut self, key: MenuKey, origin: KeyOrigin) -> Reaction {
        match (key, origin) {
            (MenuKey::Escape, _) => Reaction {
                state_changed: self.set(MenuState::Closed),
                ..Reaction::none()
            },
            (MenuKey::ArrowDown, KeyOrigin::Trigger) => {
                let state_changed = self.set(MenuState::Open);
                Reaction {
                    state_changed,
                    focus: (self.link_count > 0).then_some(Focus::Link(0)),
                    prevent_default: true,
                }
            }
            (MenuKey::ArrowDown, KeyOrigin::Link(i)) if self.state.is_open() => Reaction {
                focus: (i + 1 < self.link_count).then_some(Focus::Link(i + 1)),
                prevent_default: true,
                ..Reaction::none()
            },
            (MenuKey::ArrowUp, KeyOrigin::Link(i)) if self.state.is_open() => Reaction {
                focus: Some(match i {
                    0 => Focus::Trigger,
                    _ => Focus::Link(i - 1),
                }),
                prevent_default: true,
                ..Reaction::none()
            },
            _ => Reaction::none(),
        }
    }
}
