pub mod asset;
pub mod input;
mod quad;
mod report;

pub use cinder::*;
pub use glam as math;
pub use palette as color;
pub use quad::QuadRenderer;
pub use report::{nonfatal_error, ResultExt};

use miniquad::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tiny_game_loop::GameLoop;

use input::InputEvent;
use math::Vec2;

pub mod window {
    pub use miniquad::window::{order_quit, request_quit, screen_size};

    pub fn set_size(width: u32, height: u32) {
        miniquad::window::set_window_size(width, height);
    }
}

pub type RenderingContext = Box<dyn RenderingBackend>;
pub use glyph_brush::ab_glyph::FontArc as Font;

#[derive(Serialize, Deserialize)]
struct WindowConfig {
    width: u32,
    height: u32,
    fullscreen: bool,
    fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            fps: 60,
        }
    }
}

impl WindowConfig {
    const FILE: &'static str = "window.yaml";

    fn load() -> asset::Result<Self> {
        #[cfg(debug_assertions)]
        {
            asset::create_dir("config");
            let path = asset::get_path("config", Self::FILE);
            if !path.exists() {
                println!("Creating default file {}", path.to_string_lossy());
                asset::save_yaml_file("config", Self::FILE, &WindowConfig::default())?;
            }
        }
        asset::load_yaml_file("config", Self::FILE)
    }
}

pub trait Game: Sized + 'static {
    fn set_screen_size(&mut self, width: f32, height: f32);
    fn handle_event(&mut self, event: InputEvent);
    fn quit_requested(&mut self) -> bool {
        true
    }
    fn update(&mut self, frame_time: Duration);
    fn render(&mut self, context: &mut RenderingContext);
}

pub trait GameLoader: 'static {
    type Game: Game;
    fn fonts() -> Vec<&'static str>;
    fn create_game(renderer: QuadRenderer) -> Self::Game;
}

struct Stage<G: Game> {
    context: RenderingContext,
    game_loop: GameLoop,
    time: Instant,
    game: G,
}

impl<G: Game> Stage<G> {
    fn new(mut game: G, context: RenderingContext, window_config: WindowConfig) -> Self {
        game.set_screen_size(window_config.width as f32, window_config.height as f32);
        Stage {
            context,
            game_loop: GameLoop::new_with_fps(window_config.fps, Duration::from_millis(250)),
            time: Instant::now(),
            game,
        }
    }
}

impl<G: Game> EventHandler for Stage<G> {
    fn update(&mut self) {
        let elapsed = self.time.elapsed();
        self.time = Instant::now();
        let update = self.game_loop.update(elapsed);
        if update.num_updates == 0 {
            // Limit framerate
            std::thread::sleep(update.frame_time - elapsed);
            return;
        }
        update.run(|update| self.game.update(update.frame_time));
    }

    fn draw(&mut self) {
        self.game.render(&mut self.context);
        self.context.commit_frame();
    }

    fn quit_requested_event(&mut self) {
        if !self.game.quit_requested() {
            miniquad::window::cancel_quit();
        }
    }

    fn resize_event(&mut self, width: f32, height: f32) {
        self.game.set_screen_size(width, height);
    }

    fn mouse_motion_event(&mut self, x: f32, y: f32) {
        self.game.handle_event(InputEvent::MouseMotion {
            position: Vec2::new(x, y),
        });
    }
    fn mouse_button_down_event(&mut self, button: MouseButton, _x: f32, _y: f32) {
        if let Ok(button) = button.try_into() {
            self.game.handle_event(InputEvent::MouseButton {
                button,
                pressed: true,
            });
        }
    }
    fn mouse_button_up_event(&mut self, button: MouseButton, _x: f32, _y: f32) {
        if let Ok(button) = button.try_into() {
            self.game.handle_event(InputEvent::MouseButton {
                button,
                pressed: false,
            });
        }
    }

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, _repeat: bool) {
        self.game.handle_event(InputEvent::Key {
            key: keycode,
            pressed: true,
        });
    }
    fn key_up_event(&mut self, keycode: KeyCode, _keymods: KeyMods) {
        self.game.handle_event(InputEvent::Key {
            key: keycode,
            pressed: false,
        });
    }
}

fn load<G: GameLoader>() -> asset::Result<(WindowConfig, Vec<Font>)> {
    println!(
        "{}",
        console::style("Loading window config and fonts").bold()
    );
    let window_config = WindowConfig::load()?;
    let fonts = G::fonts()
        .into_iter()
        .map(|file| asset::load_font_file("fonts", file))
        .collect::<asset::Result<Vec<_>>>()?;
    Ok((window_config, fonts))
}

pub fn run_game<G: GameLoader>(window_title: &str) {
    report::install();
    let (window_config, fonts) = load::<G>().unwrap();
    let conf = conf::Conf {
        window_title: window_title.to_string(),
        window_width: window_config.width.try_into().unwrap(),
        window_height: window_config.height.try_into().unwrap(),
        fullscreen: window_config.fullscreen,
        window_resizable: false,
        ..Default::default()
    };
    miniquad::start(conf, move || {
        let mut context = miniquad::window::new_rendering_backend();
        let renderer = QuadRenderer::new(&mut context, fonts);
        println!("{}", console::style("Starting frame loop").bold());
        let game = G::create_game(renderer);
        Box::new(Stage::new(game, context, window_config))
    });
}
