//! Immediate-mode widgets: no widget objects, no tree. Callers evaluate
//! each widget once per frame with a caller-assigned id, and the only
//! state carried across frames is the hot/active registry in [`UiState`].

use crate::{
    ButtonColors, CheckboxColors, GuiRenderer, PointerSample, Rect, Text, PURPLE,
};

/// Caller-assigned widget identity for one frame loop. Two widgets
/// evaluated in the same frame must not share an id; hover and press
/// resolution become ambiguous if they do (undefined, not checked).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(pub u32);

#[derive(Clone, Copy)]
pub struct UiColors {
    pub button: ButtonColors,
    pub checkbox: CheckboxColors,
    pub label: palette::LinSrgba,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            button: ButtonColors::default(),
            checkbox: CheckboxColors::default(),
            label: PURPLE,
        }
    }
}

/// The interaction registry: which widget the pointer is over (`hot`) and
/// which widget holds the current press (`active`). Owned by the frame
/// loop for the life of the process and lent to a [`Ui`] each frame.
#[derive(Default)]
pub struct UiState {
    hot: Option<WidgetId>,
    active: Option<WidgetId>,
    pub colors: UiColors,
}

impl UiState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn hot(&self) -> Option<WidgetId> {
        self.hot
    }
    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }

    /// Borrows the registry for one frame of widget evaluation.
    pub fn frame<'a>(&'a mut self, pointer: PointerSample, renderer: GuiRenderer<'a>) -> Ui<'a> {
        Ui {
            state: self,
            pointer,
            renderer,
        }
    }
}

/// One frame's evaluation context. Each widget call resolves hover and
/// press for its id, draws the resulting visual state, and reports this
/// frame's outcome. Evaluation order breaks overlap ties: the last widget
/// evaluated under the pointer ends the frame hot.
pub struct Ui<'a> {
    state: &'a mut UiState,
    pointer: PointerSample,
    renderer: GuiRenderer<'a>,
}

impl Ui<'_> {
    /// Returns true exactly on the frame a press started on this button is
    /// released while the pointer is still over it.
    pub fn button(&mut self, id: WidgetId, text: &str, bounds: Rect) -> bool {
        let mut clicked = false;
        let colors = self.state.colors.button;
        let mut background = colors.normal;
        let mut foreground = colors.foreground;

        // The user is holding a press that started on this button. A
        // release only counts as a click while we are still hot; dragging
        // off the button before releasing cancels the press.
        if self.state.active == Some(id) {
            foreground = colors.foreground_active;
            background = colors.press;
            if self.pointer.just_released {
                if self.state.hot == Some(id) {
                    clicked = true;
                    background = colors.commit;
                }
                self.state.active = None;
            }
        }

        if self.state.hot == Some(id) {
            if self.state.active != Some(id) {
                background = colors.hover;
            }
            if self.pointer.just_pressed {
                self.state.active = Some(id);
            }
        }

        if bounds.contains(self.pointer.position) {
            self.state.hot = Some(id);
        } else if self.state.hot == Some(id) {
            // Only relinquish our own hover claim. Another widget may have
            // claimed hot already this frame and we must not clear that.
            self.state.hot = None;
            background = colors.normal;
        }

        self.renderer.set_color(background);
        self.renderer.draw_rect(bounds);
        self.renderer.set_color(foreground);
        self.renderer.draw_text(bounds, &Text::new(text));

        clicked
    }

    /// Runs the same press/release resolution as [`Ui::button`] and returns
    /// the checkbox value for this frame: toggled on a commit, otherwise
    /// the `checked` argument unchanged. The caller persists the value.
    pub fn checkbox(
        &mut self,
        id: WidgetId,
        checked: bool,
        text_on: &str,
        text_off: &str,
        bounds: Rect,
    ) -> bool {
        let mut value = checked;
        let colors = self.state.colors.checkbox;
        let mut background = colors.value_background(checked);
        let mut foreground = colors.foreground;

        if self.state.active == Some(id) {
            foreground = colors.foreground_active;
            background = colors.press;
            if self.pointer.just_released {
                if self.state.hot == Some(id) {
                    value = !checked;
                    background = colors.value_background(value);
                }
                self.state.active = None;
            }
        }

        if self.state.hot == Some(id) {
            if self.state.active != Some(id) {
                background = colors.hover;
            }
            if self.pointer.just_pressed {
                self.state.active = Some(id);
            }
        }

        if bounds.contains(self.pointer.position) {
            self.state.hot = Some(id);
        } else if self.state.hot == Some(id) {
            self.state.hot = None;
            background = colors.value_background(checked);
        }

        self.renderer.set_color(background);
        self.renderer.draw_rect(bounds);
        self.renderer.set_color(foreground);
        let text = if checked { text_on } else { text_off };
        self.renderer.draw_text(bounds, &Text::new(text));

        value
    }

    /// Labels take no id and never interact; they only draw.
    pub fn label(&mut self, text: &str, bounds: Rect) {
        self.renderer.set_color(self.state.colors.label);
        self.renderer.draw_text(bounds, &Text::new(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontId, Renderer};
    use glyph_brush::{ab_glyph::PxScale, Section};
    use palette::LinSrgba;

    #[derive(Default)]
    struct RecordingRenderer {
        rects: Vec<(Rect, LinSrgba)>,
        texts: Vec<String>,
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

    const BUTTON: WidgetId = WidgetId(0);
    const OTHER: WidgetId = WidgetId(1);
    const BOUNDS: Rect = Rect {
        position: crate::math::Vec2::new(10.0, 10.0),
        size: crate::math::Vec2::new(80.0, 40.0),
    };

    fn eval_button(state: &mut UiState, pointer: PointerSample) -> bool {
        let mut renderer = RecordingRenderer::default();
        let mut ui = state.frame(pointer, GuiRenderer::new(&mut renderer));
        ui.button(BUTTON, "button", BOUNDS)
    }

    #[test]
    fn press_then_release_inside_commits_once() {
        let mut state = UiState::new();
        assert!(!eval_button(&mut state, PointerSample::at(20.0, 20.0)));
        assert_eq!(state.hot(), Some(BUTTON));

        assert!(!eval_button(&mut state, PointerSample::pressed(20.0, 20.0)));
        assert_eq!(state.active(), Some(BUTTON));

        assert!(eval_button(&mut state, PointerSample::released(20.0, 20.0)));
        assert_eq!(state.active(), None);

        // The commit is reported on the release frame only, never again.
        assert!(!eval_button(&mut state, PointerSample::at(20.0, 20.0)));
    }

    #[test]
    fn drag_away_cancels_commit() {
        let mut state = UiState::new();
        eval_button(&mut state, PointerSample::at(20.0, 20.0));
        eval_button(&mut state, PointerSample::pressed(20.0, 20.0));
        // Drag outside the bounds while holding the press.
        eval_button(&mut state, PointerSample::at(200.0, 200.0));
        assert_eq!(state.hot(), None);
        assert_eq!(state.active(), Some(BUTTON));

        assert!(!eval_button(
            &mut state,
            PointerSample::released(200.0, 200.0)
        ));
        assert_eq!(state.active(), None);
    }

    #[test]
    fn idle_frames_leave_registry_unchanged() {
        let mut state = UiState::new();
        eval_button(&mut state, PointerSample::at(20.0, 20.0));
        for _ in 0..3 {
            assert!(!eval_button(&mut state, PointerSample::at(20.0, 20.0)));
            assert_eq!(state.hot(), Some(BUTTON));
            assert_eq!(state.active(), None);
        }
    }

    #[test]
    fn last_evaluated_overlapping_widget_wins_hot() {
        let mut state = UiState::new();
        let mut renderer = RecordingRenderer::default();
        let mut ui = state.frame(PointerSample::at(20.0, 20.0), GuiRenderer::new(&mut renderer));
        ui.button(BUTTON, "under", BOUNDS);
        ui.button(OTHER, "over", BOUNDS);
        assert_eq!(state.hot(), Some(OTHER));
    }

    #[test]
    fn widget_never_clears_anothers_hover_claim() {
        let mut state = UiState::new();
        let mut renderer = RecordingRenderer::default();
        let mut ui = state.frame(PointerSample::at(20.0, 20.0), GuiRenderer::new(&mut renderer));
        ui.button(BUTTON, "hovered", BOUNDS);
        ui.button(OTHER, "elsewhere", Rect::new(200.0, 200.0, 80.0, 40.0));
        assert_eq!(state.hot(), Some(BUTTON));
    }

    #[test]
    fn checkbox_toggles_only_on_commit() {
        let mut state = UiState::new();
        let eval = |state: &mut UiState, checked: bool, pointer: PointerSample| {
            let mut renderer = RecordingRenderer::default();
            let mut ui = state.frame(pointer, GuiRenderer::new(&mut renderer));
            ui.checkbox(BUTTON, checked, "on", "off", BOUNDS)
        };

        assert!(!eval(&mut state, false, PointerSample::at(20.0, 20.0)));
        assert!(!eval(&mut state, false, PointerSample::pressed(20.0, 20.0)));
        assert!(eval(&mut state, false, PointerSample::released(20.0, 20.0)));
        // The caller persists the value; passing it back in keeps it.
        assert!(eval(&mut state, true, PointerSample::at(20.0, 20.0)));
    }

    #[test]
    fn checkbox_drag_away_keeps_value() {
        let mut state = UiState::new();
        let eval = |state: &mut UiState, pointer: PointerSample| {
            let mut renderer = RecordingRenderer::default();
            let mut ui = state.frame(pointer, GuiRenderer::new(&mut renderer));
            ui.checkbox(BUTTON, false, "on", "off", BOUNDS)
        };
        eval(&mut state, PointerSample::at(20.0, 20.0));
        eval(&mut state, PointerSample::pressed(20.0, 20.0));
        eval(&mut state, PointerSample::at(200.0, 200.0));
        assert!(!eval(&mut state, PointerSample::released(200.0, 200.0)));
    }

    #[test]
    fn every_evaluation_draws() {
        let mut state = UiState::new();
        let mut renderer = RecordingRenderer::default();
        {
            let mut ui =
                state.frame(PointerSample::at(0.0, 0.0), GuiRenderer::new(&mut renderer));
            ui.button(BUTTON, "button", BOUNDS);
            ui.checkbox(OTHER, true, "on", "off", Rect::new(10.0, 60.0, 80.0, 40.0));
            ui.label("label", Rect::new(10.0, 110.0, 80.0, 40.0));
        }
        // One background rect per button/checkbox, one text per widget,
        // even though nothing is hovered or pressed.
        assert_eq!(renderer.rects.len(), 2);
        assert_eq!(renderer.texts, vec!["button", "on", "label"]);
    }
}
