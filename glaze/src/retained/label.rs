use palette::LinSrgba;
use std::any::Any;

use crate::{math::Vec2, GuiRenderer, Rect, Text, BLACK};

use super::Widget;

/// Static text. Labels never consume click events.
pub struct Label {
    bounds: Rect,
    text: Text,
    color: LinSrgba,
}

impl Label {
    pub fn new(text: &str, bounds: Rect) -> Self {
        Label {
            bounds,
            text: Text::new(text),
            color: BLACK,
        }
    }

    pub fn text(&self) -> &str {
        &self.text.text
    }
    pub fn set_text(&mut self, text: String) {
        self.text.text = text;
    }
    pub fn set_color(&mut self, color: LinSrgba) {
        self.color = color;
    }
}

impl Widget for Label {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn draw(&self, renderer: &mut GuiRenderer) {
        renderer.set_color(self.color);
        renderer.draw_text(self.bounds, &self.text);
    }
    fn handle_click(&mut self, _point: Vec2) -> bool {
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

    #[test]
    fn labels_never_consume_clicks() {
        let mut label = Label::new("Resolution", Rect::new(10.0, 20.0, 100.0, 40.0));
        assert!(!label.handle_click(Vec2::new(20.0, 30.0)));
    }
}
