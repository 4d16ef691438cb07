use egui::{pos2, Color32, Pos2, Rect};
use screen_note::{EditorState, ObjectKind};

fn drag(state: &mut EditorState, path: &[Pos2]) {
    let start = path[0];
    state.pointer_down(start);
    for location in &path[1..] {
        state.pointer_dragged(start, *location);
    }
    let end = *path.last().unwrap();
    state.pointer_up(start, end);
}

fn click(state: &mut EditorState, location: Pos2) {
    drag(state, &[location]);
}

fn draw(state: &mut EditorState, kind: ObjectKind, from: Pos2, to: Pos2) {
    state.set_tool(kind);
    drag(state, &[from, to]);
}

#[test]
fn test_pen_stroke_then_undo() {
    let mut state = EditorState::default();
    state.set_tool(ObjectKind::Pen);
    state.set_color(Color32::RED);

    drag(&mut state, &[pos2(10.0, 10.0), pos2(20.0, 10.0), pos2(20.0, 20.0)]);

    assert_eq!(state.objects().len(), 1);
    let stroke = &state.objects()[0];
    assert_eq!(stroke.kind(), ObjectKind::Pen);
    assert_eq!(stroke.color(), Color32::RED);
    assert_eq!(
        stroke.points(),
        &[pos2(10.0, 10.0), pos2(20.0, 10.0), pos2(20.0, 20.0)]
    );

    state.undo();
    assert!(state.objects().is_empty());
}

#[test]
fn test_shape_click_is_discarded() {
    let mut state = EditorState::default();
    state.set_tool(ObjectKind::LineRect);
    click(&mut state, pos2(0.0, 0.0));
    assert!(state.objects().is_empty());
    assert!(state.history().is_empty());
    assert!(!state.flags().redo);
}

#[test]
fn test_short_shapes_are_discarded() {
    let mut state = EditorState::default();
    for kind in [ObjectKind::Line, ObjectKind::Arrow, ObjectKind::FillOval] {
        draw(&mut state, kind, pos2(0.0, 0.0), pos2(3.0, 3.0));
    }
    assert!(state.objects().is_empty());

    draw(&mut state, ObjectKind::Line, pos2(0.0, 0.0), pos2(3.0, 4.0));
    assert_eq!(state.objects().len(), 1);
}

#[test]
fn test_select_click_keeps_history() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(0.0, 0.0), pos2(50.0, 50.0));
    let before = state.objects()[0].points().to_vec();

    state.set_tool(ObjectKind::Select);
    click(&mut state, pos2(25.0, 25.0));

    assert_eq!(state.history().len(), 1);
    assert_eq!(state.objects()[0].points(), before.as_slice());
    assert!(state.objects()[0].is_selected());
}

#[test]
fn test_drag_back_to_start_records_nothing() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(0.0, 0.0), pos2(50.0, 50.0));
    state.set_tool(ObjectKind::Select);

    drag(&mut state, &[pos2(25.0, 25.0), pos2(40.0, 40.0), pos2(25.0, 25.0)]);

    assert_eq!(state.history().len(), 1);
    assert!(!state.flags().redo);
    assert_eq!(state.objects()[0].points(), &[pos2(0.0, 0.0), pos2(50.0, 50.0)]);
}

#[test]
fn test_move_selection() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(0.0, 0.0), pos2(50.0, 50.0));
    state.set_tool(ObjectKind::Select);

    drag(&mut state, &[pos2(25.0, 25.0), pos2(30.0, 30.0), pos2(35.0, 45.0)]);
    assert_eq!(state.objects()[0].points(), &[pos2(10.0, 20.0), pos2(60.0, 70.0)]);
    assert_eq!(state.history().len(), 2);

    state.undo();
    assert_eq!(state.objects()[0].points(), &[pos2(0.0, 0.0), pos2(50.0, 50.0)]);
}

#[test]
fn test_marquee_selects_enclosed_and_crossed_outlines() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(10.0, 10.0), pos2(40.0, 40.0));
    draw(&mut state, ObjectKind::LineRect, pos2(100.0, 100.0), pos2(200.0, 200.0));
    draw(&mut state, ObjectKind::Line, pos2(300.0, 0.0), pos2(400.0, 0.0));
    let depth = state.history().len();

    state.set_tool(ObjectKind::Select);
    drag(&mut state, &[pos2(0.0, 0.0), pos2(60.0, 60.0), pos2(120.0, 120.0)]);

    let selected: Vec<bool> = state.objects().iter().map(|o| o.is_selected()).collect();
    assert_eq!(selected, [true, true, false]);
    assert_eq!(state.history().len(), depth);
}

#[test]
fn test_marquee_inside_stroked_outline_selects_nothing() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::LineRect, pos2(0.0, 0.0), pos2(200.0, 200.0));
    state.set_tool(ObjectKind::Select);

    drag(&mut state, &[pos2(50.0, 50.0), pos2(150.0, 150.0)]);
    assert!(!state.has_selection());

    drag(&mut state, &[pos2(300.0, 300.0), pos2(400.0, 400.0)]);
    assert!(!state.has_selection());
}

#[test]
fn test_marquee_rect_is_published_while_dragging() {
    let mut state = EditorState::default();
    state.set_tool(ObjectKind::Select);
    state.pointer_down(pos2(80.0, 80.0));
    state.pointer_dragged(pos2(80.0, 80.0), pos2(20.0, 30.0));

    let snapshot = state.snapshot();
    assert_eq!(
        snapshot.marquee,
        Some(Rect::from_min_max(pos2(20.0, 30.0), pos2(80.0, 80.0)))
    );
}

#[test]
fn test_resize_from_corner_handle() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::LineRect, pos2(0.0, 0.0), pos2(100.0, 50.0));
    state.set_tool(ObjectKind::Select);
    click(&mut state, pos2(0.0, 25.0));
    assert!(state.has_selection());
    assert_eq!(state.anchors().len(), 8);

    drag(&mut state, &[pos2(100.0, 50.0), pos2(110.0, 60.0), pos2(120.0, 70.0)]);

    let bounds = state.objects()[0].bounds();
    assert!((bounds.max.x - 120.0).abs() < 1e-4);
    assert!((bounds.max.y - 70.0).abs() < 1e-4);
    assert_eq!(bounds.min, pos2(0.0, 0.0));
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_resizing_a_dot_moves_it() {
    let mut state = EditorState::default();
    state.set_tool(ObjectKind::Pen);
    click(&mut state, pos2(50.0, 50.0));
    assert_eq!(state.objects()[0].points(), &[pos2(50.0, 50.0)]);

    state.set_tool(ObjectKind::Select);
    click(&mut state, pos2(50.0, 50.0));
    assert!(state.has_selection());

    // A zero-size selection has a single handle, on the dot.
    assert_eq!(state.anchors().len(), 1);
    drag(&mut state, &[pos2(50.0, 50.0), pos2(60.0, 55.0)]);
    let point = state.objects()[0].points()[0];
    assert!(point.x.is_finite() && point.y.is_finite());
    assert_eq!(point, pos2(60.0, 55.0));
}

#[test]
fn test_clicking_empty_canvas_clears_selection() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(0.0, 0.0), pos2(50.0, 50.0));
    state.set_tool(ObjectKind::Select);
    state.select_all();
    assert!(state.has_selection());

    click(&mut state, pos2(300.0, 300.0));
    assert!(!state.has_selection());
}

#[test]
fn test_click_picks_topmost_object() {
    let mut state = EditorState::default();
    draw(&mut state, ObjectKind::FillRect, pos2(0.0, 0.0), pos2(50.0, 50.0));
    draw(&mut state, ObjectKind::FillOval, pos2(10.0, 10.0), pos2(40.0, 40.0));
    state.set_tool(ObjectKind::Select);

    click(&mut state, pos2(25.0, 25.0));
    let selected: Vec<bool> = state.objects().iter().map(|o| o.is_selected()).collect();
    assert_eq!(selected, [false, true]);
}
