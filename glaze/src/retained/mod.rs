//! Retained-mode widgets: long-lived objects owned by a strict tree.
//! Drawing is a pre-order traversal in insertion order; click routing
//! walks the same lists back-to-front so the topmost-drawn widget gets
//! first claim on the event.

mod button;
mod checkbox;
mod label;

pub use button::Button;
pub use checkbox::Checkbox;
pub use label::Label;

use std::any::Any;

use crate::{math::Vec2, GuiRenderer, PointerSample, Rect};

/// The capability contract every retained widget implements. `bounds`
/// must be set at construction, before the first draw or hit-test.
pub trait Widget: 'static {
    fn bounds(&self) -> Rect;
    fn draw(&self, renderer: &mut GuiRenderer);
    /// Returns true if this widget consumed the click at `point`.
    fn handle_click(&mut self, point: Vec2) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A widget that owns an ordered list of children. The container itself
/// has no visual; children added first draw first, so later children end
/// up on top where they overlap.
#[derive(Default)]
pub struct Container {
    bounds: Rect,
    children: Vec<Box<dyn Widget>>,
}

impl Container {
    pub fn new(bounds: Rect) -> Self {
        Container {
            bounds,
            children: Vec::new(),
        }
    }

    /// Takes ownership of `child` and returns its index, which stays
    /// valid for the life of the container (children are never removed).
    pub fn add_child<W: Widget>(&mut self, child: W) -> usize {
        self.children.push(Box::new(child));
        self.children.len() - 1
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child<W: Widget>(&self, index: usize) -> Option<&W> {
        self.children.get(index)?.as_any().downcast_ref()
    }
    pub fn child_mut<W: Widget>(&mut self, index: usize) -> Option<&mut W> {
        self.children.get_mut(index)?.as_any_mut().downcast_mut()
    }
}

impl Widget for Container {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn draw(&self, renderer: &mut GuiRenderer) {
        for child in &self.children {
            child.draw(renderer);
        }
    }
    fn handle_click(&mut self, point: Vec2) -> bool {
        // Reverse of draw order: the last-added child is drawn on top and
        // must be offered the click first. The first child to consume it
        // stops the walk.
        for child in self.children.iter_mut().rev() {
            if child.handle_click(point) {
                return true;
            }
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

/// Drives the retained tree once per frame: route a click into the tree
/// on the frame the primary button is released, and draw the whole tree.
/// No hover feedback exists in this model; between releases the tree is
/// not consulted at all.
pub struct Scene {
    root: Container,
}

impl Scene {
    pub fn new(root: Container) -> Self {
        Scene { root }
    }

    pub fn root(&self) -> &Container {
        &self.root
    }
    pub fn root_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    pub fn update(&mut self, pointer: &PointerSample) {
        if pointer.just_released {
            self.root.handle_click(pointer.position);
        }
    }

    pub fn draw(&self, renderer: &mut GuiRenderer) {
        self.root.draw(renderer);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{FontId, Renderer};
    use glyph_brush::{ab_glyph::PxScale, Section};
    use palette::LinSrgba;
    use std::{cell::Cell, rc::Rc};

    #[derive(Default)]
    pub struct RecordingRenderer {
        pub rects: Vec<(Rect, LinSrgba)>,
        pub texts: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn queue_rect(&mut self, rect: Rect, color: LinSrgba) {
            self.rects.push((rect, color));
        }
        fn queue_text(&mut self, section: Section) {
            for text in &section.text {
                self.texts.push(text.text.to_owned());
            }
        }
        fn pt_to_px_scale(&self, _font: FontId, pt_size: f32) -> PxScale {
            PxScale::from(pt_size)
        }
    }

    fn counting_button(bounds: Rect, count: &Rc<Cell<u32>>) -> Button {
        let count = count.clone();
        let mut button = Button::new("button", bounds);
        button.set_on_click(move || count.set(count.get() + 1));
        button
    }

    #[test]
    fn click_goes_to_topmost_overlapping_child() {
        let under = Rc::new(Cell::new(0));
        let over = Rc::new(Cell::new(0));
        let overlap = Rect::new(10.0, 10.0, 80.0, 40.0);

        let mut root = Container::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        root.add_child(counting_button(overlap, &under));
        root.add_child(counting_button(overlap, &over));

        assert!(root.handle_click(Vec2::new(20.0, 20.0)));
        assert_eq!(under.get(), 0);
        assert_eq!(over.get(), 1);
    }

    #[test]
    fn empty_container_handles_nothing() {
        let mut root = Container::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        assert!(!root.handle_click(Vec2::new(20.0, 20.0)));

        let mut renderer = RecordingRenderer::default();
        root.draw(&mut GuiRenderer::new(&mut renderer));
        assert!(renderer.rects.is_empty());
    }

    #[test]
    fn nested_containers_route_depth_first() {
        let count = Rc::new(Cell::new(0));
        let mut inner = Container::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        inner.add_child(counting_button(Rect::new(10.0, 10.0, 80.0, 40.0), &count));
        let mut root = Container::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        root.add_child(inner);

        assert!(root.handle_click(Vec2::new(20.0, 20.0)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn scene_dispatches_only_on_release() {
        let count = Rc::new(Cell::new(0));
        let mut root = Container::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        root.add_child(counting_button(Rect::new(10.0, 10.0, 80.0, 40.0), &count));
        let mut scene = Scene::new(root);

        scene.update(&PointerSample::at(20.0, 20.0));
        scene.update(&PointerSample::pressed(20.0, 20.0));
        assert_eq!(count.get(), 0);
        scene.update(&PointerSample::released(20.0, 20.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn typed_child_access_through_the_tree() {
        let mut root = Container::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        let index = root.add_child(Button::new("resize", Rect::new(10.0, 10.0, 80.0, 40.0)));

        assert!(root.child::<Button>(index).is_some());
        assert!(root.child::<Checkbox>(index).is_none());
        root.child_mut::<Button>(index)
            .unwrap()
            .set_interactable(false);
        assert!(!root.child::<Button>(index).unwrap().interactable());
    }

    #[test]
    fn resize_demo_scenario_fires_only_the_pressed_button() {
        let fired: Vec<Rc<Cell<u32>>> = (0..3).map(|_| Rc::new(Cell::new(0))).collect();
        let mut root = Container::new(Rect::new(10.0, 10.0, 600.0, 500.0));
        let rects = [
            Rect::new(120.0, 10.0, 80.0, 40.0),
            Rect::new(210.0, 10.0, 80.0, 40.0),
            Rect::new(300.0, 10.0, 80.0, 40.0),
        ];
        let buttons: Vec<usize> = rects
            .iter()
            .zip(&fired)
            .map(|(&bounds, count)| root.add_child(counting_button(bounds, count)))
            .collect();
        let gate = root.add_child(Checkbox::new(
            "Lock\nresolution?",
            "Resolution\nresizable",
            "Resolution\nlocked",
            Rect::new(10.0, 60.0, 100.0, 40.0),
        ));
        let mut scene = Scene::new(root);

        // Unlock: click the checkbox, then mirror its value into the
        // buttons the way the demo glue does every frame.
        scene.update(&PointerSample::released(20.0, 70.0));
        let unlocked = scene.root().child::<Checkbox>(gate).unwrap().checked();
        assert!(unlocked);
        for &index in &buttons {
            scene
                .root_mut()
                .child_mut::<Button>(index)
                .unwrap()
                .set_interactable(unlocked);
        }

        // Press and release inside the second button.
        scene.update(&PointerSample::pressed(220.0, 20.0));
        scene.update(&PointerSample::released(220.0, 20.0));
        assert_eq!(fired[0].get(), 0);
        assert_eq!(fired[1].get(), 1);
        assert_eq!(fired[2].get(), 0);
    }
}
