//! Dual-handle range slider widget
//!
//! Draws a [`RangeSelector`] as a track with a highlighted segment and two
//! handles, with the current values printed above it. Pointer and keyboard
//! input are translated into `set_low` / `set_high` calls; everything about
//! ordering and change detection is left to the selector.

use egui::{
    Align2, Color32, CornerRadius, FontId, Id, Key, Pos2, Rect, Response, Sense, Shape, Stroke,
    Ui, Widget, pos2, vec2,
};

use crate::config::SliderStyle;
use crate::constants::style::{
    DEFAULT_CURRENCY_TEXT, DEFAULT_WIDTH, HANDLE_RADIUS, TRACK_HEIGHT,
};
use crate::range::{Handle, RangeSelector};

const LABEL_HEIGHT: f32 = 22.0;
const DASH_LENGTH: f32 = 4.0;
const DASH_GAP: f32 = 3.0;
/// Handles closer than this (as a track fraction) count as coinciding
const TIE_TOLERANCE: f64 = 1e-9;

/// Egui widget over a `&mut RangeSelector`
pub struct DoubleRangeSlider<'a> {
    selector: &'a mut RangeSelector,
    id_salt: Id,
    track_color: Color32,
    range_color: Color32,
    width: f32,
    currency_text: String,
}

impl<'a> DoubleRangeSlider<'a> {
    pub fn new(selector: &'a mut RangeSelector) -> Self {
        Self {
            selector,
            id_salt: Id::new("double_range_slider"),
            track_color: Color32::BLACK,
            range_color: Color32::GRAY,
            width: DEFAULT_WIDTH,
            currency_text: DEFAULT_CURRENCY_TEXT.to_string(),
        }
    }

    /// Take colours, width and label prefix from a style.
    /// Colours that fail to parse keep the widget defaults.
    pub fn style(mut self, style: &SliderStyle) -> Self {
        self.track_color = style.track_color32().unwrap_or(self.track_color);
        self.range_color = style.range_color32().unwrap_or(self.range_color);
        self.width = style.width;
        self.currency_text = style.currency_text.clone();
        self
    }

    /// Distinguish several sliders in the same UI
    pub fn id_salt(mut self, salt: impl std::hash::Hash) -> Self {
        self.id_salt = Id::new(salt);
        self
    }
}

/// Track geometry inside the allocated widget rect
struct TrackLayout {
    left: f32,
    width: f32,
    center_y: f32,
}

impl TrackLayout {
    fn new(rect: Rect) -> Self {
        Self {
            left: rect.left() + HANDLE_RADIUS,
            width: (rect.width() - 2.0 * HANDLE_RADIUS).max(1.0),
            center_y: rect.top() + LABEL_HEIGHT + HANDLE_RADIUS,
        }
    }

    fn x_at(&self, fraction: f64) -> f32 {
        self.left + fraction as f32 * self.width
    }

    fn fraction_at(&self, x: f32) -> f64 {
        f64::from((x - self.left) / self.width)
    }

    fn handle_center(&self, selector: &RangeSelector, handle: Handle) -> Pos2 {
        pos2(
            self.x_at(selector.fraction_of(selector.value(handle))),
            self.center_y,
        )
    }
}

/// Handle a pointer press at `fraction` should grab.
///
/// The nearer handle wins; when both are equally near (they coincide on
/// screen) the one stacked on top wins.
pub fn pick_handle(selector: &RangeSelector, fraction: f64) -> Handle {
    let to_low = (fraction - selector.fraction_of(selector.low())).abs();
    let to_high = (fraction - selector.fraction_of(selector.high())).abs();
    if (to_low - to_high).abs() < TIE_TOLERANCE {
        selector.stacking().top()
    } else if to_low < to_high {
        Handle::Low
    } else {
        Handle::High
    }
}

/// Value label text, whole numbers without decimals
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

impl Widget for DoubleRangeSlider<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired = vec2(self.width, LABEL_HEIGHT + 2.0 * HANDLE_RADIUS);
        let (rect, mut response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let id = ui.make_persistent_id(self.id_salt);
        let layout = TrackLayout::new(rect);

        let mut active = ui
            .memory_mut(|m| m.data.get_temp::<Handle>(id))
            .unwrap_or_else(|| self.selector.stacking().top());
        let mut changed = false;

        if let Some(pointer) = response.interact_pointer_pos() {
            let fraction = layout.fraction_at(pointer.x);
            if response.drag_started() || response.clicked() {
                active = pick_handle(self.selector, fraction);
            }
            if response.dragged() || response.clicked() {
                let value = self.selector.value_at_fraction(fraction);
                changed |= self.selector.set(active, value).is_some();
            }
        }

        if response.hovered() || response.has_focus() {
            let (left, right) = ui.input(|i| {
                (i.key_pressed(Key::ArrowLeft), i.key_pressed(Key::ArrowRight))
            });
            if left {
                changed |= self.selector.nudge(active, -1).is_some();
            }
            if right {
                changed |= self.selector.nudge(active, 1).is_some();
            }
        }

        ui.memory_mut(|m| m.data.insert_temp(id, active));
        if changed {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, &layout, active, &response);
        }

        response
    }
}

impl DoubleRangeSlider<'_> {
    fn paint(&self, ui: &Ui, rect: Rect, layout: &TrackLayout, active: Handle, response: &Response) {
        let painter = ui.painter();
        let visuals = ui.visuals();
        let text_color = visuals.text_color();
        let font = FontId::proportional(14.0);

        // Value labels with a dashed rule between them
        let label_y = rect.top() + LABEL_HEIGHT / 2.0;
        let low_text = format!("{} {}", self.currency_text, format_value(self.selector.low()));
        let high_text = format!("{} {}", self.currency_text, format_value(self.selector.high()));
        let low_rect = painter.text(
            pos2(rect.left(), label_y),
            Align2::LEFT_CENTER,
            low_text,
            font.clone(),
            text_color,
        );
        let high_rect = painter.text(
            pos2(rect.right(), label_y),
            Align2::RIGHT_CENTER,
            high_text,
            font,
            text_color,
        );
        let dash_from = low_rect.right() + 6.0;
        let dash_to = high_rect.left() - 6.0;
        if dash_to > dash_from {
            painter.extend(Shape::dashed_line(
                &[pos2(dash_from, label_y), pos2(dash_to, label_y)],
                Stroke::new(1.0, visuals.weak_text_color()),
                DASH_LENGTH,
                DASH_GAP,
            ));
        }

        // Track and highlighted segment
        let half = TRACK_HEIGHT / 2.0;
        let track = Rect::from_min_max(
            pos2(layout.left, layout.center_y - half),
            pos2(layout.left + layout.width, layout.center_y + half),
        );
        painter.rect_filled(track, CornerRadius::same(2), self.track_color);

        let segment = self.selector.track_segment();
        let seg_left = layout.left + segment.left_percent as f32 / 100.0 * layout.width;
        let seg_width = segment.width_percent as f32 / 100.0 * layout.width;
        let highlight = Rect::from_min_size(
            pos2(seg_left, layout.center_y - half),
            vec2(seg_width, TRACK_HEIGHT),
        );
        painter.rect_filled(highlight, CornerRadius::same(2), self.range_color);

        // Bottom handle first so the top one stays grabbable
        let stacking = self.selector.stacking();
        for handle in [stacking.bottom(), stacking.top()] {
            let center = layout.handle_center(self.selector, handle);
            let widget_visuals = if response.dragged() && handle == active {
                &visuals.widgets.active
            } else if response.hovered() && handle == active {
                &visuals.widgets.hovered
            } else {
                &visuals.widgets.inactive
            };
            painter.circle(
                center,
                HANDLE_RADIUS,
                widget_visuals.bg_fill,
                Stroke::new(1.5, self.range_color),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Interval;

    #[test]
    fn test_pick_nearest_handle() {
        let mut selector = RangeSelector::new(0.0, 500.0).unwrap();
        selector.set_low(100.0);
        selector.set_high(300.0);

        assert_eq!(pick_handle(&selector, 0.0), Handle::Low);
        assert_eq!(pick_handle(&selector, 0.35), Handle::Low);
        assert_eq!(pick_handle(&selector, 0.45), Handle::High);
        assert_eq!(pick_handle(&selector, 1.0), Handle::High);
    }

    #[test]
    fn test_pick_prefers_top_handle_on_tie() {
        let mut selector = RangeSelector::new(0.0, 500.0).unwrap();
        // Both handles pushed to the top of the range: low is stacked on top
        selector.set_low(499.0);
        let midpoint = (selector.fraction_of(499.0) + 1.0) / 2.0;
        assert_eq!(pick_handle(&selector, midpoint), Handle::Low);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(250.0), "250");
        assert_eq!(format_value(2.5), "2.50");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn test_style_overrides_defaults() {
        let mut selector = RangeSelector::new(0.0, 10.0).unwrap();
        let style = SliderStyle {
            range_color: "not-a-colour".to_string(),
            currency_text: "USD".to_string(),
            width: 320.0,
            ..SliderStyle::default()
        };
        let slider = DoubleRangeSlider::new(&mut selector).style(&style);
        assert_eq!(slider.currency_text, "USD");
        assert_eq!(slider.width, 320.0);
        assert_eq!(slider.track_color, Color32::from_rgb(0, 0, 0));
        assert_eq!(slider.range_color, Color32::GRAY);
    }

    /// Run one frame with the given input events.
    /// Returns the slider rect and whether the response reported a change.
    fn run_frame(
        ctx: &egui::Context,
        selector: &mut RangeSelector,
        events: Vec<egui::Event>,
    ) -> (Rect, bool) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut out = (Rect::NOTHING, false);
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.add(DoubleRangeSlider::new(selector));
                out.0 = response.rect;
                out.1 |= response.changed();
            });
        });
        out
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn arrow_right(pressed: bool) -> egui::Event {
        egui::Event::Key {
            key: Key::ArrowRight,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_drag_and_arrow_keys_move_the_grabbed_handle() {
        use std::cell::Cell;
        use std::rc::Rc;

        let notified = Rc::new(Cell::new(0usize));
        let sink = Rc::clone(&notified);
        let mut selector = RangeSelector::new(0.0, 400.0)
            .unwrap()
            .on_change(move |_| sink.set(sink.get() + 1));
        let ctx = egui::Context::default();

        let (rect, _) = run_frame(&ctx, &mut selector, vec![]);
        let layout = TrackLayout::new(rect);
        let press_at = pos2(layout.x_at(0.1), layout.center_y);
        let drag_to = pos2(layout.x_at(0.25), layout.center_y);

        let frames = vec![
            vec![egui::Event::PointerMoved(press_at)],
            vec![button(press_at, true)],
            vec![egui::Event::PointerMoved(drag_to)],
            vec![],
            vec![button(drag_to, false)],
            vec![arrow_right(true)],
            vec![arrow_right(false)],
        ];

        let mut changed_frames = Vec::new();
        let mut notifying_frames = Vec::new();
        for events in frames {
            let before = notified.get();
            let (_, changed) = run_frame(&ctx, &mut selector, events);
            changed_frames.push(changed);
            notifying_frames.push(notified.get() > before);
        }

        // Dragging grabbed the nearer (low) handle and snapped it to 100,
        // the arrow key then nudged that same handle by one step
        assert_eq!(selector.interval(), Interval::new(101.0, 400.0));
        assert_eq!(notified.get(), 2);
        assert_eq!(changed_frames, notifying_frames);
        assert_eq!(
            changed_frames,
            vec![false, false, true, false, false, true, false]
        );
    }

    #[test]
    fn test_renders_without_input_and_leaves_selection_alone() {
        let mut selector = RangeSelector::new(0.0, 500.0).unwrap();
        let ctx = egui::Context::default();
        let mut changed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = ui.add(DoubleRangeSlider::new(&mut selector)).changed();
            });
        });
        assert!(!changed);
        assert_eq!((selector.low(), selector.high()), (0.0, 500.0));
    }
}
