use super::*;
use crate::draw::{BLUE, Color, GREEN, PixelBuffer, RED};
use crate::image::{ImageError, ImageLoader, encode_png_data_uri};
use crate::input::events::{TouchEvent, TouchPhase};
use crate::input::tool_state::{PropertyChange, PropertyError, ToolState};
use crate::overlay::{FocusRequest, OverlayLayout, OverlayPhase};
use crate::util::Point;
use serde_json::json;

const WHITE_PX: [u8; 4] = [255, 255, 255, 255];
const RED_PX: [u8; 4] = [255, 0, 0, 255];
const GREEN_PX: [u8; 4] = [0, 255, 0, 255];
const BLUE_PX: [u8; 4] = [0, 0, 255, 255];

fn create_test_input_state() -> InputState {
    let mut state = InputState::new(ToolState::default());
    assert!(state.resize(100.0, 100.0, 1.0));
    state
}

fn pixel(state: &InputState, x: u32, y: u32) -> [u8; 4] {
    state.surface().get_buffer().unwrap().pixel(x, y).unwrap()
}

fn all_white(state: &InputState) -> bool {
    state
        .surface()
        .get_buffer()
        .unwrap()
        .as_raw()
        .chunks_exact(4)
        .all(|px| px == WHITE_PX)
}

fn with_shape_colors(state: &mut InputState) {
    state.apply_property(PropertyChange::ShapeFillColor(GREEN));
    state.apply_property(PropertyChange::ShapeStrokeColor(BLUE));
    state.apply_property(PropertyChange::ShapeStrokeWidth(2.0));
}

#[test]
fn test_pointer_down_before_resize_is_ignored() {
    let mut state = InputState::default();
    state.on_pointer_down(5.0, 5.0);
    assert!(state.state.is_idle());

    state.on_tool_selected("rectangle");
    state.on_pointer_down(5.0, 5.0);
    assert!(state.state.is_idle());
    assert!(!state.has_snapshot());
}

#[test]
fn test_brush_stroke_draws_segments() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::BrushColor(RED));
    state.apply_property(PropertyChange::BrushWidth(5.0));

    state.on_pointer_down(10.0, 10.0);
    assert!(matches!(state.state, DrawingState::Stroking { .. }));
    state.on_pointer_move(50.0, 10.0);
    state.on_pointer_up(50.0, 10.0);
    assert!(state.state.is_idle());

    for x in 10..=50 {
        assert_eq!(pixel(&state, x, 10), RED_PX, "x = {x}");
    }
    assert_eq!(pixel(&state, 30, 40), WHITE_PX);
    assert_eq!(pixel(&state, 80, 10), WHITE_PX);
}

#[test]
fn test_pointer_down_alone_draws_nothing() {
    let mut state = create_test_input_state();
    state.on_pointer_down(10.0, 10.0);
    state.on_pointer_up(10.0, 10.0);
    assert!(all_white(&state));
}

#[test]
fn test_eraser_paints_background() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::BrushColor(RED));
    state.apply_property(PropertyChange::BrushWidth(6.0));
    state.on_pointer_down(10.0, 50.0);
    state.on_pointer_move(90.0, 50.0);
    state.on_pointer_up(90.0, 50.0);
    assert_eq!(pixel(&state, 50, 50), RED_PX);

    state.on_tool_selected("eraser");
    state.apply_property(PropertyChange::BrushWidth(20.0));
    state.on_pointer_down(0.0, 50.0);
    state.on_pointer_move(100.0, 50.0);
    state.on_pointer_leave();
    assert!(all_white(&state));
}

#[test]
fn test_settings_are_pinned_for_the_whole_stroke() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::BrushColor(RED));
    state.on_pointer_down(10.0, 20.0);
    state.on_pointer_move(30.0, 20.0);

    state.apply_property(PropertyChange::BrushColor(BLUE));
    state.on_pointer_move(60.0, 20.0);
    state.on_pointer_up(60.0, 20.0);
    assert_eq!(pixel(&state, 50, 20), RED_PX);

    // The next stroke picks up the new color.
    state.on_pointer_down(10.0, 70.0);
    state.on_pointer_move(60.0, 70.0);
    state.on_pointer_up(60.0, 70.0);
    assert_eq!(pixel(&state, 40, 70), BLUE_PX);
}

#[test]
fn test_shape_preview_never_accumulates() {
    let mut state = create_test_input_state();
    with_shape_colors(&mut state);
    state.on_tool_selected("rectangle");

    state.on_pointer_down(10.0, 10.0);
    assert!(state.has_snapshot());
    state.on_pointer_move(90.0, 90.0);
    assert_eq!(pixel(&state, 60, 60), GREEN_PX);

    state.on_pointer_move(30.0, 30.0);
    // The larger first preview was rolled back before the second was drawn.
    assert_eq!(pixel(&state, 60, 60), WHITE_PX);
    assert_eq!(pixel(&state, 20, 20), GREEN_PX);

    state.on_pointer_up(95.0, 95.0);
    assert!(state.state.is_idle());
    assert!(!state.has_snapshot());
    // Commit uses the last moved-to point, not the release point.
    assert_eq!(pixel(&state, 60, 60), WHITE_PX);
    assert_eq!(pixel(&state, 20, 20), GREEN_PX);
}

#[test]
fn test_rectangle_drag_commits_normalized_rect() {
    let mut state = create_test_input_state();
    with_shape_colors(&mut state);
    state.on_tool_selected("rectangle");

    state.on_pointer_down(80.0, 80.0);
    state.on_pointer_move(20.0, 20.0);
    state.on_pointer_up(20.0, 20.0);

    assert_eq!(pixel(&state, 50, 50), GREEN_PX);
    assert_eq!(pixel(&state, 20, 50), BLUE_PX);
    assert_eq!(pixel(&state, 79, 50), BLUE_PX);
    assert_eq!(pixel(&state, 10, 10), WHITE_PX);
    assert_eq!(pixel(&state, 90, 90), WHITE_PX);
}

#[test]
fn test_circle_drag_commits_true_circle() {
    let mut state = create_test_input_state();
    with_shape_colors(&mut state);
    state.on_tool_selected("circle");

    // Wide, short drag: radius follows the larger half-extent.
    state.on_pointer_down(20.0, 45.0);
    state.on_pointer_move(60.0, 55.0);
    state.on_pointer_up(60.0, 55.0);

    assert_eq!(pixel(&state, 40, 50), GREEN_PX);
    assert_eq!(pixel(&state, 40, 35), GREEN_PX);
    assert_eq!(pixel(&state, 40, 65), GREEN_PX);
    assert_eq!(pixel(&state, 40, 80), WHITE_PX);
}

#[test]
fn test_click_without_drag_leaves_minimum_shape() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::ShapeFillColor(GREEN));
    state.apply_property(PropertyChange::ShapeStrokeColor(GREEN));
    state.apply_property(PropertyChange::ShapeStrokeWidth(1.0));
    state.on_tool_selected("rectangle");

    state.on_pointer_down(40.0, 40.0);
    state.on_pointer_up(40.0, 40.0);
    assert_eq!(pixel(&state, 40, 40), GREEN_PX);
    assert_eq!(pixel(&state, 42, 42), WHITE_PX);
}

#[test]
fn test_zero_outline_width_draws_with_brush_width() {
    let mut state = create_test_input_state();
    with_shape_colors(&mut state);
    state.apply_property(PropertyChange::BrushWidth(10.0));
    state.apply_property(PropertyChange::ShapeStrokeWidth(0.0));
    state.on_tool_selected("rectangle");

    state.on_pointer_down(20.0, 20.0);
    state.on_pointer_move(80.0, 80.0);
    state.on_pointer_up(80.0, 80.0);

    // A 10px outline straddles x = 20, reaching out to x = 15.
    assert_eq!(pixel(&state, 16, 50), BLUE_PX);
    assert_eq!(pixel(&state, 23, 50), BLUE_PX);
    assert_eq!(pixel(&state, 50, 50), GREEN_PX);
    assert_eq!(pixel(&state, 13, 50), WHITE_PX);
}

#[test]
fn test_tool_switch_during_preview_rolls_back() {
    let mut state = create_test_input_state();
    with_shape_colors(&mut state);
    state.on_tool_selected("circle");

    state.on_pointer_down(20.0, 20.0);
    state.on_pointer_move(80.0, 80.0);
    assert!(!all_white(&state));

    state.on_tool_selected("brush");
    assert!(state.state.is_idle());
    assert!(!state.has_snapshot());
    assert!(all_white(&state));
}

#[test]
fn test_unknown_tool_disables_pointer_input() {
    let mut state = create_test_input_state();
    state.on_tool_selected("lasso");
    assert_eq!(state.tool_state().active_tool, None);

    state.on_pointer_down(10.0, 10.0);
    state.on_pointer_move(90.0, 90.0);
    state.on_pointer_up(90.0, 90.0);
    assert!(state.state.is_idle());
    assert!(all_white(&state));
}

#[test]
fn test_filter_tool_ignores_pointer() {
    let mut state = create_test_input_state();
    state.on_tool_selected("filter");
    state.on_pointer_down(10.0, 10.0);
    state.on_pointer_move(60.0, 60.0);
    assert!(state.state.is_idle());
    assert!(all_white(&state));
}

#[test]
fn test_text_overlay_lifecycle() {
    let mut state = create_test_input_state();
    state.update_layout(OverlayLayout {
        canvas_origin: Point::new(120.0, 64.0),
        wrapper_origin: Point::new(100.0, 40.0),
    });
    state.on_tool_selected("text");
    state.apply_property(PropertyChange::FontSize(32.0));

    state.on_pointer_down(10.0, 10.0);
    let overlay = state.text_overlay().unwrap();
    assert_eq!(overlay.anchor(), Point::new(30.0, 34.0));
    assert_eq!(overlay.phase(), OverlayPhase::Attaching);

    // Releasing the pointer does not end text editing.
    state.on_pointer_up(10.0, 10.0);
    assert!(state.text_overlay().is_some());
    assert!(all_white(&state));

    assert_eq!(
        state.overlay_attached(),
        Some(FocusRequest { select_all: true })
    );
    assert_eq!(state.overlay_attached(), None);

    state.set_text_draft("  Hi  ");
    let commit = state.finish_text_input().unwrap();
    assert_eq!(commit.text, "Hi");
    assert_eq!(commit.position, Point::new(10.0, 10.0));
    assert!(state.state.is_idle());
    assert!(!all_white(&state));
}

#[test]
fn test_blank_or_cancelled_text_draws_nothing() {
    let mut state = create_test_input_state();
    state.on_tool_selected("text");

    state.on_pointer_down(10.0, 10.0);
    state.set_text_draft("   ");
    assert!(state.finish_text_input().is_none());
    assert!(state.state.is_idle());

    state.on_pointer_down(10.0, 10.0);
    state.set_text_draft("discard me");
    state.cancel_text_input();
    assert!(state.state.is_idle());
    assert!(all_white(&state));
}

#[test]
fn test_second_text_click_moves_overlay_and_keeps_draft() {
    let mut state = create_test_input_state();
    state.on_tool_selected("text");
    state.on_pointer_down(10.0, 10.0);
    state.set_text_draft("draft");

    state.on_pointer_down(40.0, 50.0);
    let overlay = state.text_overlay().unwrap();
    assert_eq!(overlay.anchor(), Point::new(40.0, 50.0));
    assert_eq!(overlay.draft(), "draft");

    // Other tools cannot start gestures while the overlay is open.
    state.on_tool_selected("brush");
    assert!(state.text_overlay().is_some());
    state.on_pointer_down(5.0, 5.0);
    state.on_pointer_move(90.0, 5.0);
    assert!(state.text_overlay().is_some());
    assert!(all_white(&state));
}

#[test]
fn test_overlay_style_follows_published_state() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::FontWeight(75.0));
    state.apply_property(PropertyChange::FontSlant(10.0));
    state.apply_property(PropertyChange::TextColor(RED));
    let style = state.overlay_style();
    assert_eq!(style.font_weight, 400);
    assert_eq!(style.font_style, "italic");
    assert_eq!(style.color, "#ff0000");
    assert_eq!(style.font_size_px, 16.0);
}

#[test]
fn test_touch_events_drive_gestures_and_suppress_defaults() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::BrushColor(RED));

    let start = TouchEvent::new(TouchPhase::Start, vec![Point::new(10.0, 30.0)]);
    assert!(state.on_touch(&start));
    let moved = TouchEvent::new(TouchPhase::Move, vec![Point::new(60.0, 30.0)]);
    assert!(state.on_touch(&moved));
    let end = TouchEvent::new(TouchPhase::End, vec![]);
    assert!(state.on_touch(&end));
    assert!(state.state.is_idle());
    assert_eq!(pixel(&state, 40, 30), RED_PX);

    // Nothing owns the touch once idle.
    assert!(!state.on_touch(&moved));
    assert!(!state.on_touch(&end));
}

#[test]
fn test_touch_before_canvas_ready_is_not_suppressed() {
    let mut state = InputState::default();
    let start = TouchEvent::new(TouchPhase::Start, vec![Point::new(1.0, 1.0)]);
    assert!(!state.on_touch(&start));
}

#[test]
fn test_resize_abandons_pointer_gesture_but_keeps_text() {
    let mut state = create_test_input_state();
    state.on_tool_selected("rectangle");
    state.on_pointer_down(10.0, 10.0);
    state.on_pointer_move(50.0, 50.0);

    assert!(state.resize(60.0, 40.0, 2.0));
    assert!(state.state.is_idle());
    assert!(!state.has_snapshot());
    assert_eq!(state.surface().size_px(), Some((120, 80)));
    assert!(all_white(&state));

    state.on_tool_selected("text");
    state.on_pointer_down(5.0, 5.0);
    assert!(state.resize(80.0, 80.0, 1.0));
    assert!(state.text_overlay().is_some());
}

#[test]
fn test_property_errors_leave_state_unchanged() {
    let mut state = create_test_input_state();
    let before = state.tool_state();

    assert_eq!(
        state.on_property_change("zoomLevel", &json!(2)),
        Err(PropertyError::UnknownProperty("zoomLevel".to_string()))
    );
    assert!(state.on_property_change("brushWidth", &json!("wide")).is_err());
    assert_eq!(state.tool_state(), before);

    state.on_property_change("brushWidth", &json!(12)).unwrap();
    assert_eq!(state.tool_state().brush_width, 12.0);
    // Earlier handles still see the old value.
    assert_eq!(before.brush_width, 5.0);
}

#[test]
fn test_filter_preview_does_not_touch_pixels() {
    let mut state = create_test_input_state();
    state.on_property_change("brightness", &json!(120)).unwrap();
    state.on_property_change("saturation", &json!("87.5")).unwrap();
    assert_eq!(
        state.get_filter_style(),
        "brightness(120%) contrast(100%) saturate(87.5%)"
    );
    assert!(all_white(&state));
}

#[test]
fn test_apply_filter_bakes_and_resets() {
    let mut state = create_test_input_state();
    let gray = PixelBuffer::filled(100, 100, Color::from_rgba8(100, 100, 100, 255));
    state.surface.put_buffer(&gray).unwrap();

    state.apply_filter(200.0, 100.0, 100.0);
    assert_eq!(pixel(&state, 50, 50), [200, 200, 200, 255]);
    assert!(state.tool_state().adjustments().is_neutral());
    assert_eq!(
        state.get_filter_style(),
        "brightness(100%) contrast(100%) saturate(100%)"
    );
}

#[test]
fn test_apply_filters_before_ready_is_noop() {
    let mut state = InputState::default();
    state.apply_property(PropertyChange::Brightness(150.0));
    state.apply_filters_to_canvas();
    assert_eq!(state.tool_state().brightness, 150.0);
}

#[test]
fn test_clear_canvas_restores_background() {
    let mut state = create_test_input_state();
    state.apply_property(PropertyChange::BrushColor(RED));
    state.on_pointer_down(10.0, 10.0);
    state.on_pointer_move(90.0, 90.0);
    state.on_pointer_up(90.0, 90.0);
    state.clear_canvas();
    assert!(all_white(&state));
}

#[test]
fn test_export_requires_canvas() {
    assert!(InputState::default().get_image_as_base64().is_none());
    let state = create_test_input_state();
    let uri = state.get_image_as_base64().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[test]
fn test_load_image_without_runtime_reports_unavailable() {
    let mut state = create_test_input_state();
    assert!(matches!(
        state.load_image("data:image/png;base64,AAAA"),
        Err(ImageError::LoaderUnavailable)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_loaded_image_is_stretched_over_canvas() {
    let mut source = InputState::default();
    assert!(source.resize(4.0, 2.0, 1.0));
    source.surface.put_buffer(&PixelBuffer::filled(4, 2, RED)).unwrap();
    let uri = source.get_image_as_base64().unwrap();

    let mut state = create_test_input_state();
    state.load_image(uri).unwrap();
    state.load_image("data:image/png;base64,AAAA").unwrap();
    assert_eq!(state.pending_image_loads(), 2);

    assert_eq!(state.finish_image_loads().await, 1);
    assert_eq!(state.pending_image_loads(), 0);
    let buffer = state.surface().get_buffer().unwrap();
    assert!(buffer.as_raw().chunks_exact(4).all(|px| px == RED_PX));
}

#[tokio::test]
async fn test_load_finishing_before_canvas_exists_is_dropped() {
    let mut source = InputState::default();
    assert!(source.resize(2.0, 2.0, 1.0));
    let png = source.surface().export_png().unwrap();

    let handle = tokio::runtime::Handle::current();
    let mut state = InputState::new(ToolState::default()).with_loader(ImageLoader::new(&handle));
    state.load_image(encode_png_data_uri(&png)).unwrap();

    assert_eq!(state.finish_image_loads().await, 0);
    assert!(state.surface().get_buffer().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_load_is_stretched_to_canvas_size_at_completion() {
    let mut source = InputState::default();
    assert!(source.resize(3.0, 3.0, 1.0));
    source.surface.put_buffer(&PixelBuffer::filled(3, 3, BLUE)).unwrap();
    let uri = source.get_image_as_base64().unwrap();

    let mut state = create_test_input_state();
    state.load_image(uri).unwrap();
    assert!(state.resize(30.0, 20.0, 2.0));

    assert_eq!(state.finish_image_loads().await, 1);
    let buffer = state.surface().get_buffer().unwrap();
    assert_eq!((buffer.width(), buffer.height()), (60, 40));
    assert!(buffer.as_raw().chunks_exact(4).all(|px| px == BLUE_PX));
}
