use glaze::PointerSample;
use std::collections::HashMap;

use crate::math::Vec2;

pub use miniquad::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl TryFrom<miniquad::MouseButton> for MouseButton {
    type Error = ();
    fn try_from(value: miniquad::MouseButton) -> Result<Self, Self::Error> {
        match value {
            miniquad::MouseButton::Left => Ok(MouseButton::Left),
            miniquad::MouseButton::Middle => Ok(MouseButton::Middle),
            miniquad::MouseButton::Right => Ok(MouseButton::Right),
            miniquad::MouseButton::Unknown => Err(()),
        }
    }
}

pub enum InputEvent {
    Key { key: KeyCode, pressed: bool },
    MouseMotion { position: Vec2 },
    MouseButton { button: MouseButton, pressed: bool },
}

#[derive(Clone, Copy)]
struct KeyBinding {
    key: KeyCode,
}

impl KeyBinding {
    fn event(&self, event: &InputEvent) -> Option<bool> {
        if let InputEvent::Key { key, pressed } = *event {
            if key == self.key {
                return Some(pressed);
            }
        }
        None
    }
}

#[derive(Clone, Copy)]
struct MouseButtonBinding {
    button: MouseButton,
}

impl MouseButtonBinding {
    fn event(&self, event: &InputEvent) -> Option<bool> {
        if let InputEvent::MouseButton { button, pressed } = *event {
            if button == self.button {
                return Some(pressed);
            }
        }
        None
    }
}

#[derive(Clone, Copy)]
enum Binding {
    Key(KeyBinding),
    MouseButton(MouseButtonBinding),
}

impl Binding {
    fn event(&self, event: &InputEvent) -> Option<bool> {
        match self {
            Binding::Key(binding) => binding.event(event),
            Binding::MouseButton(binding) => binding.event(event),
        }
    }
}

/// The state of one named action, with edge flags that stay set until
/// [`InputSystem::end_frame`].
#[derive(Default, Clone, Copy)]
pub struct ActionState {
    pressed: bool,
    changed: bool,
}

impl ActionState {
    pub fn changed(&self) -> bool {
        self.changed
    }
    pub fn pressed(&self) -> bool {
        self.pressed
    }
    pub fn released(&self) -> bool {
        !self.pressed
    }
    pub fn just_pressed(&self) -> bool {
        self.pressed && self.changed
    }
    pub fn just_released(&self) -> bool {
        !self.pressed && self.changed
    }
}

/// Tracks named button actions and the pointer. Events arrive between
/// frames; `sample_pointer` exposes the result as the per-frame pointer
/// sample the widget code consumes, and `end_frame` clears edges.
pub struct InputSystem {
    bindings: HashMap<String, (Binding, ActionState)>,
    pointer_position: Vec2,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            bindings: HashMap::new(),
            pointer_position: Vec2::ZERO,
        }
    }
    /// The bindings every demo wants: left mouse as "primary" and escape
    /// as "exit".
    pub fn with_default_bindings() -> Self {
        let mut input = Self::new();
        input.bind_mouse_button("primary", MouseButton::Left);
        input.bind_key("exit", KeyCode::Escape);
        input
    }

    pub fn bind_key(&mut self, action: &str, key: KeyCode) {
        self.bindings.insert(
            action.to_owned(),
            (Binding::Key(KeyBinding { key }), ActionState::default()),
        );
    }
    pub fn bind_mouse_button(&mut self, action: &str, button: MouseButton) {
        self.bindings.insert(
            action.to_owned(),
            (
                Binding::MouseButton(MouseButtonBinding { button }),
                ActionState::default(),
            ),
        );
    }

    pub fn try_get(&self, action: &str) -> Option<&ActionState> {
        self.bindings.get(action).map(|(_, state)| state)
    }
    pub fn get(&self, action: &str) -> ActionState {
        if let Some(state) = self.try_get(action) {
            *state
        } else {
            eprintln!("Input action \"{}\" not bound", action);
            ActionState::default()
        }
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }
    pub fn sample_pointer(&self) -> PointerSample {
        let primary = self.get("primary");
        PointerSample {
            position: self.pointer_position,
            just_pressed: primary.just_pressed(),
            just_released: primary.just_released(),
        }
    }

    pub fn end_frame(&mut self) {
        for (_, state) in self.bindings.values_mut() {
            state.changed = false;
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if let InputEvent::MouseMotion { position } = event {
            self.pointer_position = position;
            return;
        }

        for (binding, state) in self.bindings.values_mut() {
            if let Some(pressed) = binding.event(&event) {
                if state.pressed != pressed {
                    state.pressed = pressed;
                    state.changed = true;
                }
            }
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_edges_last_one_frame() {
        let mut input = InputSystem::with_default_bindings();
        input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(input.sample_pointer().just_pressed);

        input.end_frame();
        let sample = input.sample_pointer();
        assert!(!sample.just_pressed && !sample.just_released);

        input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(input.sample_pointer().just_released);
    }

    #[test]
    fn repeated_press_events_are_not_edges() {
        let mut input = InputSystem::with_default_bindings();
        input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        input.end_frame();
        input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(!input.sample_pointer().just_pressed);
        assert!(input.get("primary").pressed());
    }

    #[test]
    fn motion_updates_the_pointer_position() {
        let mut input = InputSystem::with_default_bindings();
        input.handle_event(InputEvent::MouseMotion {
            position: Vec2::new(42.0, 7.0),
        });
        assert_eq!(input.sample_pointer().position, Vec2::new(42.0, 7.0));
    }
}
