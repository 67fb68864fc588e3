use cinder::{impl_add_event_listener, Event};
use std::any::Any;

use crate::{math::Vec2, CheckboxColors, GuiRenderer, Rect, Text, BLUE, RED};

use super::Widget;

/// A toggle that starts out showing a neutral prompt. The first click it
/// ever receives permanently switches it to showing one of two
/// state-dependent captions; after that only the checked value toggles.
pub struct Checkbox {
    bounds: Rect,
    prompt: Text,
    text_on: Text,
    text_off: Text,
    checked: bool,
    confirmed: bool,
    colors: CheckboxColors,
    changed: Event<bool>,
}

impl Checkbox {
    pub fn new(prompt: &str, text_on: &str, text_off: &str, bounds: Rect) -> Self {
        Checkbox {
            bounds,
            prompt: Text::centered(prompt),
            text_on: Text::centered(text_on),
            text_off: Text::centered(text_off),
            checked: false,
            confirmed: false,
            colors: CheckboxColors {
                on: BLUE,
                off: RED,
                ..Default::default()
            },
            changed: Event::new(),
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// The caption drawn this frame: the prompt until the first click,
    /// then the on/off caption for the current value.
    pub fn caption(&self) -> &Text {
        if !self.confirmed {
            &self.prompt
        } else if self.checked {
            &self.text_on
        } else {
            &self.text_off
        }
    }
}

impl_add_event_listener!(Checkbox, changed, bool, add_changed_listener);

impl Widget for Checkbox {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn draw(&self, renderer: &mut GuiRenderer) {
        renderer.set_color(self.colors.value_background(self.checked));
        renderer.draw_rect(self.bounds);
        renderer.set_color(self.colors.foreground);
        renderer.draw_text(self.bounds, self.caption());
    }
    fn handle_click(&mut self, point: Vec2) -> bool {
        if self.bounds.contains(point) {
            // One-way switch: once confirmed, never back to the prompt.
            self.confirmed = true;
            self.checked = !self.checked;
            self.changed.emit(&self.checked);
            return true;
        }
        false
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn confirmation_is_one_way() {
        let mut checkbox = Checkbox::new("prompt", "on", "off", Rect::new(10.0, 10.0, 80.0, 40.0));
        assert_eq!(checkbox.caption().text, "prompt");

        assert!(checkbox.handle_click(Vec2::new(20.0, 20.0)));
        assert!(checkbox.checked());
        assert_eq!(checkbox.caption().text, "on");

        // Further toggles switch captions but never return to the prompt.
        checkbox.handle_click(Vec2::new(20.0, 20.0));
        assert!(!checkbox.checked());
        assert_eq!(checkbox.caption().text, "off");
        checkbox.handle_click(Vec2::new(20.0, 20.0));
        assert_eq!(checkbox.caption().text, "on");
    }

    #[test]
    fn toggles_inside_bounds_without_gating() {
        let mut checkbox = Checkbox::new("prompt", "on", "off", Rect::new(10.0, 10.0, 80.0, 40.0));
        assert!(!checkbox.handle_click(Vec2::new(200.0, 200.0)));
        assert!(!checkbox.checked());
        assert!(checkbox.handle_click(Vec2::new(20.0, 20.0)));
        assert!(checkbox.checked());
    }

    #[test]
    fn emits_changed_on_every_toggle() {
        let values = Rc::new(Cell::new((0, false)));
        let values1 = values.clone();
        let mut checkbox = Checkbox::new("prompt", "on", "off", Rect::new(10.0, 10.0, 80.0, 40.0));
        checkbox.add_changed_listener(move |&checked| {
            let (count, _) = values1.get();
            values1.set((count + 1, checked));
        });

        checkbox.handle_click(Vec2::new(20.0, 20.0));
        checkbox.handle_click(Vec2::new(20.0, 20.0));
        assert_eq!(values.get(), (2, false));
    }
}
