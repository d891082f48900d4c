mod common;

use common::{TraceCall, TraceSurface};
use eframe_scribble::{ActiveTool, OverlayError, PaintOverlay};
use egui::pos2;

fn text_overlay() -> PaintOverlay<TraceSurface> {
    let mut overlay = PaintOverlay::new();
    overlay.set_tool(Some(ActiveTool::Text));
    overlay
}

#[test]
fn empty_or_blank_text_is_rejected_without_state_change() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    for text in ["", "   "] {
        let result = overlay.place_label(text, pos2(10.0, 10.0), &mut surface);
        assert!(matches!(result, Err(OverlayError::EmptyLabelText)));
        assert!(matches!(
            overlay.begin_placement(text),
            Err(OverlayError::EmptyLabelText)
        ));
    }

    assert!(overlay.document().labels().is_empty());
    assert!(!overlay.placement_armed());
    assert!(surface.calls.is_empty());
}

#[test]
fn armed_placement_places_on_the_next_press() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    overlay.begin_placement("hello").expect("non-empty text");
    assert!(overlay.placement_armed());

    overlay.pointer_down(pos2(30.0, 40.0), &mut surface);

    assert!(!overlay.placement_armed());
    let labels = overlay.document().labels();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "hello");
    assert_eq!(labels[0].pos, pos2(30.0, 40.0));
    assert!(overlay.selected_label().is_some());
    assert!(matches!(
        surface.calls.last(),
        Some(TraceCall::Text { text, baseline, .. }) if text == "hello" && *baseline == pos2(30.0, 40.0)
    ));
}

#[test]
fn identical_overlapping_labels_hit_the_later_one() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    let first = overlay
        .place_label("A", pos2(10.0, 10.0), &mut surface)
        .expect("non-empty label");
    let second = overlay
        .place_label("B", pos2(10.0, 10.0), &mut surface)
        .expect("non-empty label");

    let hit = overlay.document().hit_test(pos2(10.0, 10.0), &surface);
    assert_eq!(hit, Some(second));
    assert_ne!(hit, Some(first));
}

#[test]
fn drag_follows_the_pointer_with_a_stable_offset() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    let id = overlay
        .place_label("A", pos2(50.0, 50.0), &mut surface)
        .expect("non-empty label");

    // Press inside the hit box but off the exact origin, so the offset is
    // observable.
    overlay.pointer_down(pos2(52.0, 48.0), &mut surface);
    assert!(overlay.is_dragging());
    let offset = pos2(50.0, 50.0) - pos2(52.0, 48.0);

    overlay.pointer_moved(pos2(70.0, 60.0), &mut surface);
    overlay.pointer_moved(pos2(90.0, 70.0), &mut surface);

    let label = overlay.document().label(id).expect("label exists");
    assert_eq!(label.pos, pos2(90.0, 70.0) + offset);

    // The restore-then-redraw cycle leaves exactly one visible rendering.
    assert_eq!(surface.visible_renderings("A"), 1);

    overlay.pointer_up();
    assert!(!overlay.is_dragging());
    assert_eq!(overlay.selected_label(), Some(id));
}

#[test]
fn a_second_drag_reuses_the_placement_snapshot() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    overlay
        .place_label("A", pos2(50.0, 50.0), &mut surface)
        .expect("non-empty label");

    overlay.pointer_down(pos2(50.0, 50.0), &mut surface);
    overlay.pointer_moved(pos2(80.0, 60.0), &mut surface);
    overlay.pointer_up();

    overlay.pointer_down(pos2(80.0, 60.0), &mut surface);
    assert!(overlay.is_dragging());
    overlay.pointer_moved(pos2(100.0, 80.0), &mut surface);
    overlay.pointer_up();

    let restores: Vec<u64> = surface
        .calls
        .iter()
        .filter_map(|call| match call {
            TraceCall::Restore { snapshot } => Some(*snapshot),
            _ => None,
        })
        .collect();
    assert_eq!(restores, vec![1, 1]);
}

#[test]
fn pressing_an_unselected_label_does_not_drag_it() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    let first = overlay
        .place_label("one", pos2(50.0, 50.0), &mut surface)
        .expect("non-empty label");
    let second = overlay
        .place_label("two", pos2(300.0, 300.0), &mut surface)
        .expect("non-empty label");
    assert_eq!(overlay.selected_label(), Some(second));

    overlay.pointer_down(pos2(52.0, 48.0), &mut surface);
    assert!(!overlay.is_dragging());

    overlay.pointer_moved(pos2(120.0, 120.0), &mut surface);
    let label = overlay.document().label(first).expect("label exists");
    assert_eq!(label.pos, pos2(50.0, 50.0));
}

#[test]
fn switching_tools_drops_the_selection() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    let id = overlay
        .place_label("A", pos2(50.0, 50.0), &mut surface)
        .expect("non-empty label");
    assert_eq!(overlay.selected_label(), Some(id));

    overlay.set_tool(Some(ActiveTool::Brush));
    assert_eq!(overlay.selected_label(), None);

    // Back in text mode the label is deselected and no longer draggable.
    overlay.set_tool(Some(ActiveTool::Text));
    overlay.pointer_down(pos2(50.0, 50.0), &mut surface);
    assert!(!overlay.is_dragging());
    overlay.pointer_moved(pos2(200.0, 200.0), &mut surface);
    let label = overlay.document().label(id).expect("label exists");
    assert_eq!(label.pos, pos2(50.0, 50.0));
}

#[test]
fn dragging_with_no_selection_is_a_no_op() {
    let mut surface = TraceSurface::new();
    let mut overlay = text_overlay();

    overlay.pointer_down(pos2(10.0, 10.0), &mut surface);
    overlay.pointer_moved(pos2(20.0, 20.0), &mut surface);
    overlay.pointer_up();

    assert!(overlay.document().is_empty());
    assert!(surface.calls.is_empty());
}
