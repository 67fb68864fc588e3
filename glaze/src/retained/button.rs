use cinder::Callback;
use std::any::Any;

use crate::{math::Vec2, ButtonColors, GuiRenderer, Rect, Text};

use super::Widget;

/// A push button. Clicks inside its bounds invoke the bound action; a
/// button that is not interactable still draws but never consumes clicks.
/// Every button must have its action bound before it can receive clicks;
/// dispatching an unbound action panics.
pub struct Button {
    bounds: Rect,
    label: Text,
    interactable: bool,
    colors: ButtonColors,
    on_click: Callback,
}

impl Button {
    pub fn new(label: &str, bounds: Rect) -> Self {
        Button {
            bounds,
            label: Text::centered(label),
            interactable: true,
            colors: ButtonColors::default(),
            on_click: Callback::unbound(),
        }
    }

    pub fn set_on_click<F>(&mut self, f: F)
    where
        F: FnMut() + 'static,
    {
        self.on_click.bind(f);
    }

    pub fn interactable(&self) -> bool {
        self.interactable
    }
    pub fn set_interactable(&mut self, interactable: bool) {
        self.interactable = interactable;
    }

    pub fn label(&self) -> &str {
        &self.label.text
    }
}

impl Widget for Button {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn draw(&self, renderer: &mut GuiRenderer) {
        renderer.set_color(self.colors.background(self.interactable));
        renderer.draw_rect(self.bounds);
        renderer.set_color(self.colors.foreground);
        renderer.draw_text(self.bounds, &self.label);
    }
    fn handle_click(&mut self, point: Vec2) -> bool {
        if self.bounds.contains(point) && self.interactable {
            if !self.on_click.is_bound() {
                panic!("button \"{}\" clicked with no action bound", self.label.text);
            }
            self.on_click.invoke();
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
    fn non_interactable_button_never_consumes() {
        let fired = Rc::new(Cell::new(false));
        let fired1 = fired.clone();
        let mut button = Button::new("locked", Rect::new(10.0, 10.0, 80.0, 40.0));
        button.set_on_click(move || fired1.set(true));
        button.set_interactable(false);

        assert!(!button.handle_click(Vec2::new(20.0, 20.0)));
        assert!(!fired.get());
    }

    #[test]
    fn click_outside_bounds_is_ignored() {
        let mut button = Button::new("button", Rect::new(10.0, 10.0, 80.0, 40.0));
        button.set_on_click(|| ());
        assert!(!button.handle_click(Vec2::new(200.0, 200.0)));
    }

    #[test]
    #[should_panic]
    fn click_with_unbound_action_is_a_contract_violation() {
        let mut button = Button::new("broken", Rect::new(10.0, 10.0, 80.0, 40.0));
        button.handle_click(Vec2::new(20.0, 20.0));
    }
}
