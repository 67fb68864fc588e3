use glyph_brush::{ab_glyph::PxScale, Extra, Section};
use palette::LinSrgba;

use crate::Rect;

pub use glyph_brush::{FontId, HorizontalAlign, VerticalAlign};

pub const GRAY: LinSrgba = LinSrgba::new(0.51, 0.51, 0.51, 1.0);
pub const LIGHT_GRAY: LinSrgba = LinSrgba::new(0.784, 0.784, 0.784, 1.0);
pub const GREEN: LinSrgba = LinSrgba::new(0.0, 0.894, 0.188, 1.0);
pub const DARK_GREEN: LinSrgba = LinSrgba::new(0.0, 0.459, 0.173, 1.0);
pub const SKY_BLUE: LinSrgba = LinSrgba::new(0.4, 0.749, 1.0, 1.0);
pub const ORANGE: LinSrgba = LinSrgba::new(1.0, 0.631, 0.0, 1.0);
pub const PINK: LinSrgba = LinSrgba::new(1.0, 0.427, 0.761, 1.0);
pub const PURPLE: LinSrgba = LinSrgba::new(0.784, 0.478, 1.0, 1.0);
pub const BLUE: LinSrgba = LinSrgba::new(0.0, 0.475, 0.945, 1.0);
pub const RED: LinSrgba = LinSrgba::new(0.902, 0.161, 0.216, 1.0);
pub const BLACK: LinSrgba = LinSrgba::new(0.0, 0.0, 0.0, 1.0);

#[derive(Debug, Clone)]
pub struct Text {
    pub font: FontId,
    pub font_size: f32,
    pub text: String,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
}

impl Default for Text {
    fn default() -> Self {
        Text {
            font: Default::default(),
            font_size: 14.0,
            text: String::new(),
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Top,
        }
    }
}

impl Text {
    pub fn new(text: &str) -> Self {
        Text {
            text: text.to_owned(),
            ..Default::default()
        }
    }
    pub fn centered(text: &str) -> Self {
        Text {
            text: text.to_owned(),
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
            ..Default::default()
        }
    }
}

/// The rendering seam the widget code draws through. `kiln` provides the
/// real quad-batching implementation; tests provide a recording one.
pub trait Renderer {
    fn queue_rect(&mut self, rect: Rect, color: LinSrgba);
    fn queue_text(&mut self, section: Section);
    fn pt_to_px_scale(&self, font: FontId, pt_size: f32) -> PxScale;
}

pub struct GuiRenderer<'a> {
    renderer: &'a mut dyn Renderer,
    color: LinSrgba,
}

impl<'a> GuiRenderer<'a> {
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        GuiRenderer {
            renderer,
            color: Default::default(),
        }
    }

    pub fn set_color(&mut self, color: LinSrgba) {
        self.color = color;
    }
    pub fn draw_rect(&mut self, rect: Rect) {
        self.renderer.queue_rect(rect, self.color);
    }
    pub fn draw_text(&mut self, bounds: Rect, text: &Text) {
        let mut layout = if text.text.contains('\n') {
            glyph_brush::Layout::default_wrap()
        } else {
            glyph_brush::Layout::default_single_line()
        };
        layout = layout.h_align(text.h_align).v_align(text.v_align);
        let screen_position = (
            bounds.x()
                + match text.h_align {
                    HorizontalAlign::Left => 0.,
                    HorizontalAlign::Center => bounds.width() / 2.,
                    HorizontalAlign::Right => bounds.width(),
                },
            bounds.y()
                + match text.v_align {
                    VerticalAlign::Top => 0.,
                    VerticalAlign::Center => bounds.height() / 2.,
                    VerticalAlign::Bottom => bounds.height(),
                },
        );
        let text = glyph_brush::Text {
            text: &text.text,
            scale: self.renderer.pt_to_px_scale(text.font, text.font_size),
            font_id: text.font,
            extra: Extra {
                color: self.color.into(),
                z: 0.,
            },
        };
        self.renderer.queue_text(Section {
            screen_position,
            bounds: (bounds.width(), bounds.height()),
            layout,
            text: vec![text],
        });
    }
}

/// Background and text colors for a button across its interaction states.
#[derive(Clone, Copy)]
pub struct ButtonColors {
    pub normal: LinSrgba,
    pub hover: LinSrgba,
    pub press: LinSrgba,
    pub commit: LinSrgba,
    pub disabled: LinSrgba,
    pub foreground: LinSrgba,
    pub foreground_active: LinSrgba,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: GRAY,
            hover: GREEN,
            press: DARK_GREEN,
            commit: GREEN,
            disabled: LIGHT_GRAY,
            foreground: BLACK,
            foreground_active: SKY_BLUE,
        }
    }
}

impl ButtonColors {
    pub fn background(&self, interactable: bool) -> LinSrgba {
        if interactable {
            self.normal
        } else {
            self.disabled
        }
    }
}

/// Checkbox colors; the background depends on the checked value as well as
/// the interaction state.
#[derive(Clone, Copy)]
pub struct CheckboxColors {
    pub off: LinSrgba,
    pub on: LinSrgba,
    pub hover: LinSrgba,
    pub press: LinSrgba,
    pub foreground: LinSrgba,
    pub foreground_active: LinSrgba,
}

impl Default for CheckboxColors {
    fn default() -> Self {
        Self {
            off: ORANGE,
            on: PINK,
            hover: GREEN,
            press: DARK_GREEN,
            foreground: BLACK,
            foreground_active: SKY_BLUE,
        }
    }
}

impl CheckboxColors {
    pub fn value_background(&self, checked: bool) -> LinSrgba {
        if checked {
            self.on
        } else {
            self.off
        }
    }
}
