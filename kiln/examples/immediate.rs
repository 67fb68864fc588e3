use std::time::Duration;

use glaze::{
    immediate::{UiState, WidgetId},
    GuiRenderer, PointerSample, Rect,
};
use kiln::{input::InputSystem, window, Game, GameLoader, QuadRenderer, RenderingContext};

const RESIZE_CHECKBOX: WidgetId = WidgetId(10);

struct ImmediateDemo {
    input: InputSystem,
    renderer: QuadRenderer,
    ui: UiState,
    pointer: PointerSample,
    can_resize: bool,
}

impl Game for ImmediateDemo {
    fn set_screen_size(&mut self, width: f32, height: f32) {
        self.renderer.set_screen_size(width, height);
    }
    fn handle_event(&mut self, event: kiln::input::InputEvent) {
        self.input.handle_event(event);
    }
    fn update(&mut self, _frame_time: Duration) {
        self.pointer = self.input.sample_pointer();
        if self.input.get("exit").just_pressed() {
            window::request_quit();
        }
        self.input.end_frame();
    }
    fn render(&mut self, context: &mut RenderingContext) {
        let gui = GuiRenderer::new(&mut self.renderer);
        let mut ui = self.ui.frame(self.pointer, gui);

        self.can_resize = ui.checkbox(
            RESIZE_CHECKBOX,
            self.can_resize,
            "Resolution resizable.",
            "Resolution locked.",
            Rect::new(10.0, 60.0, 80.0, 40.0),
        );

        let resolutions = [
            ("800x600", 800, 600),
            ("1000x600", 1000, 600),
            ("1200x600", 1200, 600),
        ];
        for (index, (label, width, height)) in resolutions.into_iter().enumerate() {
            let bounds = Rect::new(10.0 + 90.0 * index as f32, 10.0, 80.0, 40.0);
            if ui.button(WidgetId(index as u32), label, bounds) && self.can_resize {
                window::set_size(width, height);
            }
        }

        drop(ui);
        self.renderer.render_pass(context);
    }
}

impl GameLoader for ImmediateDemo {
    type Game = ImmediateDemo;
    fn fonts() -> Vec<&'static str> {
        vec!["OpenSans-Regular.ttf"]
    }
    fn create_game(renderer: QuadRenderer) -> Self::Game {
        ImmediateDemo {
            input: InputSystem::with_default_bindings(),
            renderer,
            ui: UiState::new(),
            pointer: PointerSample::default(),
            can_resize: false,
        }
    }
}

fn main() {
    kiln::run_game::<ImmediateDemo>("Immediate Mode");
}
