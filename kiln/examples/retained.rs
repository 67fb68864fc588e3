use std::time::Duration;

use glaze::{
    retained::{Button, Checkbox, Container, Label, Scene},
    GuiRenderer, Rect,
};
use kiln::{input::InputSystem, window, Game, GameLoader, QuadRenderer, RenderingContext};

struct RetainedDemo {
    input: InputSystem,
    renderer: QuadRenderer,
    scene: Scene,
    resize_buttons: [usize; 3],
    lock_checkbox: usize,
}

impl RetainedDemo {
    fn build_scene() -> (Scene, [usize; 3], usize) {
        let mut root = Container::new(Rect::new(10.0, 10.0, 600.0, 500.0));

        let resolutions = [
            ("800 x 600", 800, 600),
            ("1000 x 600", 1000, 600),
            ("1200 x 600", 1200, 600),
        ];
        let mut resize_buttons = [0; 3];
        for (slot, (index, (label, width, height))) in resize_buttons
            .iter_mut()
            .zip(resolutions.into_iter().enumerate())
        {
            let bounds = Rect::new(120.0 + 90.0 * index as f32, 10.0, 80.0, 40.0);
            let mut button = Button::new(label, bounds);
            button.set_interactable(false);
            button.set_on_click(move || window::set_size(width, height));
            *slot = root.add_child(button);
        }

        root.add_child(Label::new("Resolution", Rect::new(10.0, 20.0, 100.0, 40.0)));

        let mut checkbox = Checkbox::new(
            "Lock\nresolution?",
            "Resolution\nresizable",
            "Resolution\nlocked",
            Rect::new(10.0, 60.0, 100.0, 40.0),
        );
        checkbox.add_changed_listener(|checked| {
            println!("Resolution {}", if *checked { "unlocked" } else { "locked" });
        });
        let lock_checkbox = root.add_child(checkbox);

        (Scene::new(root), resize_buttons, lock_checkbox)
    }
}

impl Game for RetainedDemo {
    fn set_screen_size(&mut self, width: f32, height: f32) {
        self.renderer.set_screen_size(width, height);
    }
    fn handle_event(&mut self, event: kiln::input::InputEvent) {
        self.input.handle_event(event);
    }
    fn update(&mut self, _frame_time: Duration) {
        let pointer = self.input.sample_pointer();
        self.scene.update(&pointer);

        // The checkbox gates the buttons from outside the tree.
        let unlocked = self
            .scene
            .root()
            .child::<Checkbox>(self.lock_checkbox)
            .unwrap()
            .checked();
        for &index in &self.resize_buttons {
            self.scene
                .root_mut()
                .child_mut::<Button>(index)
                .unwrap()
                .set_interactable(unlocked);
        }

        if self.input.get("exit").just_pressed() {
            window::request_quit();
        }
        self.input.end_frame();
    }
    fn render(&mut self, context: &mut RenderingContext) {
        let mut gui = GuiRenderer::new(&mut self.renderer);
        self.scene.draw(&mut gui);
        self.renderer.render_pass(context);
    }
}

impl GameLoader for RetainedDemo {
    type Game = RetainedDemo;
    fn fonts() -> Vec<&'static str> {
        vec!["OpenSans-Regular.ttf"]
    }
    fn create_game(renderer: QuadRenderer) -> Self::Game {
        let (scene, resize_buttons, lock_checkbox) = RetainedDemo::build_scene();
        RetainedDemo {
            input: InputSystem::with_default_bindings(),
            renderer,
            scene,
            resize_buttons,
            lock_checkbox,
        }
    }
}

fn main() {
    kiln::run_game::<RetainedDemo>("Retained Mode");
}
