use super::*;
use crate::constants::*;

/// Session with two screens: A at (50, 50) and B at (500, 50), nothing selected.
fn session_with_two_screens() -> (EditorSession, ScreenId, ScreenId) {
    let mut session = EditorSession::new();
    let a = session.add_screen();
    let b = session.add_screen();
    session.project.clear_selection();
    (session, a, b)
}

/// Adds a component at a content-relative position and returns its id.
fn add_component(session: &mut EditorSession, screen: ScreenId, at: Position) -> ComponentId {
    session
        .project
        .add_component(WireframeComponent::new(screen, at, "Widget"))
        .unwrap()
}

/// Deterministic pseudo-random walk used by the bound-checking tests.
fn pointer_walk(seed: u64, steps: usize, spread: f32) -> Vec<Position> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
    };
    (0..steps)
        .map(|_| Position::new(next() * spread, next() * spread))
        .collect()
}

fn assert_contained(component: &WireframeComponent) {
    let p = component.position;
    let s = component.size;
    assert!(p.x >= 0.0 && p.y >= 0.0, "negative position {p:?}");
    assert!(p.x + s.width <= CONTENT_WIDTH, "overflows width: {p:?} {s:?}");
    assert!(p.y + s.height <= CONTENT_HEIGHT, "overflows height: {p:?} {s:?}");
    assert!((MIN_COMPONENT_WIDTH..=CONTENT_WIDTH).contains(&s.width));
    assert!((MIN_COMPONENT_HEIGHT..=CONTENT_HEIGHT).contains(&s.height));
}

#[test]
fn header_press_selects_and_drags_screen() {
    let (mut session, a, _) = session_with_two_screens();

    session.pointer_down(Position::new(70.0, 60.0));
    assert_eq!(session.gesture_state(), GestureState::DraggingScreen);
    assert_eq!(session.project().selected_screen_id, Some(a));
    assert!(session.input_surface().is_captured());

    session.pointer_move(Position::new(170.0, 260.0));
    assert_eq!(session.project().screen(a).unwrap().position, Position::new(150.0, 250.0));

    session.pointer_up();
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(!session.input_surface().is_captured());
}

#[test]
fn dragged_screen_never_goes_negative() {
    let (mut session, a, _) = session_with_two_screens();
    session.pointer_down(Position::new(70.0, 60.0));

    for point in pointer_walk(7, 200, 800.0) {
        session.pointer_move(point);
        let position = session.project().screen(a).unwrap().position;
        assert!(position.x >= 0.0 && position.y >= 0.0);
    }
    session.pointer_up();
}

#[test]
fn menu_button_opens_menu_without_dragging() {
    let (mut session, a, _) = session_with_two_screens();
    session.pointer_down(Position::new(440.0, 60.0));
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert_eq!(session.open_menu(), Some(a));
    assert_eq!(session.project().selected_screen_id, Some(a));

    session.key_escape();
    assert_eq!(session.open_menu(), None);
}

#[test]
fn body_press_drags_component_within_content() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));

    // Component spans (150, 190)..(250, 240) on the canvas
    session.pointer_down(Position::new(160.0, 200.0));
    assert_eq!(session.gesture_state(), GestureState::DraggingComponent);
    assert_eq!(session.project().selected_component_id, Some(c));
    assert!(session.project().selected_screen_id.is_none());

    session.pointer_move(Position::new(180.0, 230.0));
    assert_eq!(session.project().component(c).unwrap().position, Position::new(120.0, 130.0));

    session.pointer_move(Position::new(5000.0, 5000.0));
    assert_eq!(session.project().component(c).unwrap().position, Position::new(300.0, 250.0));

    session.pointer_move(Position::new(-5000.0, -5000.0));
    assert_eq!(session.project().component(c).unwrap().position, Position::ZERO);

    session.pointer_up();
    assert_eq!(session.gesture_state(), GestureState::Idle);
}

#[test]
fn resize_handle_grows_and_clamps() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));
    session.select_component(c);

    session.pointer_down(Position::new(248.0, 238.0));
    assert_eq!(session.gesture_state(), GestureState::ResizingComponent);

    session.pointer_move(Position::new(298.0, 258.0));
    assert_eq!(session.project().component(c).unwrap().size, Size::new(150.0, 70.0));

    session.pointer_move(Position::new(2000.0, 2000.0));
    assert_eq!(session.project().component(c).unwrap().size, Size::new(300.0, 200.0));

    session.pointer_move(Position::new(-2000.0, -2000.0));
    assert_eq!(session.project().component(c).unwrap().size, Size::new(40.0, 20.0));
    assert_eq!(session.project().component(c).unwrap().position, Position::new(100.0, 100.0));

    session.pointer_up();
    assert!(!session.input_surface().is_captured());
}

#[test]
fn component_stays_contained_through_mixed_gestures() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(20.0, 20.0));

    for round in 0..20u64 {
        let component = session.project().component(c).unwrap().clone();
        let screen = session.project().screen(a).unwrap().clone();
        let origin = component.absolute_origin(&screen);
        session.select_component(c);
        if round % 2 == 0 {
            session.pointer_down(origin.offset(
                component.size.width - 2.0,
                component.size.height - 2.0,
            ));
            assert_eq!(session.gesture_state(), GestureState::ResizingComponent);
        } else {
            session.pointer_down(origin.offset(2.0, 2.0));
            assert_eq!(session.gesture_state(), GestureState::DraggingComponent);
        }
        for delta in pointer_walk(round + 1, 30, 500.0) {
            session.pointer_move(origin.offset(delta.x, delta.y));
            assert_contained(session.project().component(c).unwrap());
        }
        session.pointer_up();
    }
}

#[test]
fn pressing_canvas_clears_selection() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    session.pointer_down(Position::new(5.0, 5.0));
    assert!(session.project().selected_screen_id.is_none());
    assert!(session.project().selected_component_id.is_none());
    assert_eq!(session.gesture_state(), GestureState::Idle);
}

#[test]
fn double_click_on_content_creates_centered_component() {
    let (mut session, a, _) = session_with_two_screens();

    // Content origin is (50, 90)
    let id = session.double_click(Position::new(250.0, 190.0)).unwrap();
    let component = session.project().component(id).unwrap();
    assert_eq!(component.position, Position::new(150.0, 75.0));
    assert_eq!(component.size, Size::new(100.0, 50.0));
    assert_eq!(component.screen_id, a);
    assert_eq!(component.label, "Component 1");
    assert_eq!(session.project().selected_component_id, Some(id));
    assert_eq!(session.gesture_state(), GestureState::Idle);
}

#[test]
fn double_click_near_corner_clamps_to_zero() {
    let (mut session, _, _) = session_with_two_screens();
    let id = session.double_click(Position::new(60.0, 95.0)).unwrap();
    assert_eq!(session.project().component(id).unwrap().position, Position::ZERO);
}

#[test]
fn double_click_on_component_or_header_creates_nothing() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));
    assert!(session.double_click(Position::new(200.0, 200.0)).is_none());
    assert!(session.double_click(Position::new(100.0, 60.0)).is_none());
    assert_eq!(session.project().screen(a).unwrap().components.len(), 1);
    assert_eq!(session.label_edit().map(|e| e.component_id), Some(c));
}

#[test]
fn connection_from_selected_component_to_other_screen() {
    let (mut session, a, b) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));
    session.select_component(c);

    assert!(session.start_connection());
    assert_eq!(session.gesture_state(), GestureState::Connecting);
    assert_eq!(
        session.pending_source(),
        Some(PendingSource {
            screen_id: a,
            component_id: Some(c)
        })
    );

    // B's header
    session.pointer_down(Position::new(600.0, 60.0));

    let connections = &session.project().connections;
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].from_component_id, Some(c));
    assert_eq!(connections[0].from_screen_id, a);
    assert_eq!(connections[0].to_screen_id, b);
    assert_eq!(connections[0].description, "Click");
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(session.pending_source().is_none());
}

#[test]
fn connection_uses_typed_description_then_resets_it() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    assert!(session.start_connection());
    session.connection_description = "Sign up".into();

    // Click inside B's content area
    session.pointer_down(Position::new(700.0, 200.0));

    assert_eq!(session.project().connections[0].description, "Sign up");
    assert!(session.connection_description.is_empty());
}

#[test]
fn clicking_source_screen_cancels_connection() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    session.start_connection();
    session.connection_description = "Loop".into();

    session.pointer_down(Position::new(100.0, 200.0));

    assert!(session.project().connections.is_empty());
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(session.connection_description.is_empty());
}

#[test]
fn clicking_empty_canvas_cancels_connection() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    session.start_connection();
    session.pointer_down(Position::new(5.0, 900.0));
    assert!(session.project().connections.is_empty());
    assert_eq!(session.gesture_state(), GestureState::Idle);
    // Cancelling does not clear the selection
    assert_eq!(session.project().selected_screen_id, Some(a));
}

#[test]
fn start_connection_requires_selection_and_idle() {
    let (mut session, a, _) = session_with_two_screens();
    assert!(!session.can_start_connection());
    assert!(!session.start_connection());

    session.pointer_down(Position::new(70.0, 60.0));
    assert_eq!(session.project().selected_screen_id, Some(a));
    assert!(!session.start_connection());
    session.pointer_up();
    assert!(session.can_start_connection());
}

#[test]
fn escape_cancels_connection() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    session.start_connection();
    session.key_escape();
    assert_eq!(session.gesture_state(), GestureState::Idle);
}

#[test]
fn deleting_dragged_screen_releases_capture() {
    let (mut session, a, b) = session_with_two_screens();
    session.pointer_down(Position::new(70.0, 60.0));
    assert!(session.input_surface().is_captured());

    assert!(session.delete_screen(a));
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(!session.input_surface().is_captured());
    assert!(session.project().screen(b).is_some());
}

#[test]
fn deleting_resized_component_releases_capture() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));
    session.select_component(c);
    session.pointer_down(Position::new(248.0, 238.0));
    assert!(session.input_surface().is_captured());

    assert!(session.key_delete());
    assert!(session.project().component(c).is_none());
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(!session.input_surface().is_captured());

    // Stray moves after the gesture ended change nothing
    session.pointer_move(Position::new(10.0, 10.0));
    session.pointer_up();
}

#[test]
fn deleting_screen_cascades_connections() {
    let (mut session, a, b) = session_with_two_screens();
    let c = session.add_screen();
    for (from, to) in [(a, b), (b, c), (c, a)] {
        session.select_screen(from);
        session.start_connection();
        let target = session.project().screen(to).unwrap().position.offset(100.0, 10.0);
        session.pointer_down(target);
    }
    assert_eq!(session.project().connections.len(), 3);

    session.delete_screen(b);
    let remaining = &session.project().connections;
    assert_eq!(remaining.len(), 1);
    assert_eq!((remaining[0].from_screen_id, remaining[0].to_screen_id), (c, a));
}

#[test]
fn label_edit_suspends_drag_and_commits_on_enter() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(100.0, 100.0));

    assert!(session.begin_label_edit(c));
    session.set_label_draft("Sign in");
    assert_eq!(session.project().component(c).unwrap().label, "Sign in");

    session.pointer_down(Position::new(160.0, 200.0));
    assert_eq!(session.gesture_state(), GestureState::Idle);
    assert!(session.label_edit().is_some());

    session.key_enter();
    assert!(session.label_edit().is_none());
    assert_eq!(session.project().component(c).unwrap().label, "Sign in");

    session.pointer_down(Position::new(160.0, 200.0));
    assert_eq!(session.gesture_state(), GestureState::DraggingComponent);
}

#[test]
fn label_edit_escape_restores_original() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(0.0, 0.0));
    session.begin_label_edit(c);
    session.set_label_draft("Oops");
    session.key_escape();
    assert_eq!(session.project().component(c).unwrap().label, "Widget");
    assert!(session.label_edit().is_none());
}

#[test]
fn label_edit_commits_on_blur() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(0.0, 0.0));
    session.begin_label_edit(c);
    session.set_label_draft("Kept");

    session.pointer_down(Position::new(5.0, 5.0));
    assert!(session.label_edit().is_none());
    assert_eq!(session.project().component(c).unwrap().label, "Kept");
}

#[test]
fn delete_key_ignored_while_editing() {
    let (mut session, a, _) = session_with_two_screens();
    let c = add_component(&mut session, a, Position::new(0.0, 0.0));
    session.begin_label_edit(c);
    assert!(!session.key_delete());
    assert!(session.project().component(c).is_some());
}

#[test]
fn duplicate_from_menu_selects_copy() {
    let (mut session, a, _) = session_with_two_screens();
    session.pointer_down(Position::new(440.0, 60.0));
    let copy = session.duplicate_screen(a).unwrap();
    assert_eq!(session.open_menu(), None);
    assert_eq!(session.project().selected_screen_id, Some(copy));
    assert_eq!(session.project().screen(copy).unwrap().title, "Screen 1 Copy");
}

#[test]
fn clear_project_resets_everything() {
    let (mut session, a, _) = session_with_two_screens();
    session.select_screen(a);
    session.start_connection();
    session.clear_project();
    assert!(session.project().screens.is_empty());
    assert_eq!(session.gesture_state(), GestureState::Idle);
}
