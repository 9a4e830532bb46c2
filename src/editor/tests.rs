use super::*;
use crate::draw::{Color, Shape};
use crate::input::{PointerEvent, TextInput, ToolMode, ToolbarCommand};
use crate::util::Point;

fn png_bytes(width: i32, height: i32) -> Vec<u8> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.2, 0.4, 0.6);
        ctx.paint().unwrap();
    }
    let mut bytes = Vec::new();
    surface.write_to_png(&mut bytes).unwrap();
    bytes
}

fn create_test_editor() -> Editor {
    let settings = EditorSettings {
        viewport: Viewport::new(1200.0, 800.0),
        ..EditorSettings::default()
    };
    Editor::load(&png_bytes(2000, 1000), settings).unwrap()
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.handle_pointer(PointerEvent::Down(from.into()));
    editor.handle_pointer(PointerEvent::Move(to.into()));
    editor.handle_pointer(PointerEvent::Up(to.into()));
}

fn committed_shapes(editor: &Editor) -> Vec<&Shape> {
    editor
        .surface()
        .frame
        .shapes
        .iter()
        .filter(|a| !a.in_progress)
        .map(|a| &a.shape)
        .collect()
}

#[test]
fn test_load_fits_image_into_viewport() {
    let editor = create_test_editor();
    let surface = editor.surface();
    assert_eq!(surface.width(), 1200);
    assert_eq!(surface.height(), 600);
    assert!((surface.scale() - 0.6).abs() < 1e-9);
    assert_eq!(surface.image_size(), (2000, 1000));

    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), 0);
    assert!(!editor.can_undo());
    assert_eq!(editor.tool(), ToolMode::Select);
    assert!(editor.interaction().selection_enabled);
}

#[test]
fn test_small_image_is_not_upscaled() {
    let settings = EditorSettings {
        viewport: Viewport::new(1200.0, 800.0),
        ..EditorSettings::default()
    };
    let editor = Editor::load(&png_bytes(300, 200), settings).unwrap();
    assert_eq!(editor.surface().width(), 300);
    assert_eq!(editor.surface().height(), 200);
    assert_eq!(editor.surface().scale(), 1.0);
}

#[test]
fn test_load_rejects_invalid_png() {
    let result = Editor::load(b"definitely not a png", EditorSettings::default());
    assert!(matches!(result, Err(EditorError::ImageLoad(_))));
}

#[test]
fn test_rectangle_drag_normalizes_negative_extent() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    editor.handle_pointer(PointerEvent::Down(Point::new(100.0, 100.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(80.0, 90.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(50.0, 50.0)));
    // Provisional shape is replaced, not accumulated
    assert_eq!(editor.surface().frame.len(), 1);
    assert!(editor.surface().frame.shapes[0].in_progress);

    editor.handle_pointer(PointerEvent::Up(Point::new(50.0, 50.0)));

    let shapes = committed_shapes(&editor);
    assert_eq!(shapes.len(), 1);
    match shapes[0] {
        Shape::Rect {
            x,
            y,
            w,
            h,
            color,
            thick,
        } => {
            assert_eq!((*x, *y, *w, *h), (50.0, 50.0, 50.0, 50.0));
            assert_eq!(*color, Color::from_hex("#FF0000").unwrap());
            assert_eq!(*thick, 3.0);
        }
        other => panic!("expected rectangle, got {other:?}"),
    }
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().cursor(), 1);
}

#[test]
fn test_undo_restores_post_load_snapshot() {
    let mut editor = create_test_editor();
    let initial = editor.surface().snapshot().unwrap();

    editor.set_tool(ToolMode::Rectangle);
    drag(&mut editor, (100.0, 100.0), (50.0, 50.0));
    assert!(editor.can_undo());

    assert!(editor.undo().unwrap());
    assert_eq!(editor.surface().snapshot().unwrap(), initial);
    assert!(editor.surface().frame.is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn test_arrow_head_follows_drag_direction() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Arrow);
    assert!(editor.set_color("blue"));

    drag(&mut editor, (0.0, 0.0), (10.0, 0.0));
    drag(&mut editor, (0.0, 0.0), (0.0, 10.0));

    let shapes = committed_shapes(&editor);
    assert_eq!(shapes.len(), 2);
    let rotations: Vec<f64> = shapes
        .iter()
        .map(|shape| match shape {
            Shape::Arrow {
                end,
                head,
                color,
                thick,
                ..
            } => {
                assert_eq!(head.center, *end);
                assert_eq!((head.width, head.length), (15.0, 20.0));
                assert_eq!(*color, Color::from_hex("#0000FF").unwrap());
                assert_eq!(*thick, 4.0);
                head.rotation
            }
            other => panic!("expected arrow, got {other:?}"),
        })
        .collect();
    assert!((rotations[0] - 90.0).abs() < 1e-9);
    assert!((rotations[1] - 180.0).abs() < 1e-9);
}

#[test]
fn test_zero_length_drag_adds_nothing() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    editor.handle_pointer(PointerEvent::Down(Point::new(10.0, 10.0)));
    editor.handle_pointer(PointerEvent::Up(Point::new(10.0, 10.0)));

    assert!(editor.surface().frame.is_empty());
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.state(), &DrawingState::Idle);
}

#[test]
fn test_stray_pointer_up_is_ignored() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Arrow);
    editor.handle_pointer(PointerEvent::Up(Point::new(5.0, 5.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(15.0, 5.0)));

    assert!(editor.surface().frame.is_empty());
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_history_grows_with_each_completed_edit() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    for i in 0..4 {
        let offset = i as f64 * 20.0;
        drag(&mut editor, (offset, offset), (offset + 10.0, offset + 10.0));
    }

    assert_eq!(editor.history().len(), 5);
    assert_eq!(editor.history().cursor(), 4);
}

#[test]
fn test_repeated_undo_matches_earlier_snapshots() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    let mut snapshots = vec![editor.surface().snapshot().unwrap()];
    for i in 0..3 {
        let offset = i as f64 * 30.0;
        drag(&mut editor, (offset, offset), (offset + 25.0, offset + 15.0));
        snapshots.push(editor.surface().snapshot().unwrap());
    }

    for k in 1..=3 {
        assert!(editor.undo().unwrap());
        assert_eq!(editor.surface().snapshot().unwrap(), snapshots[3 - k]);
        assert_eq!(editor.history().get(3 - k), Some(&snapshots[3 - k]));
    }

    // Already at the oldest entry
    assert!(!editor.undo().unwrap());
    assert_eq!(editor.history().cursor(), 0);
}

#[test]
fn test_commit_after_undo_truncates_history() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
    drag(&mut editor, (20.0, 20.0), (30.0, 30.0));
    drag(&mut editor, (40.0, 40.0), (50.0, 50.0));
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.history().cursor(), 1);

    drag(&mut editor, (60.0, 60.0), (70.0, 70.0));

    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().cursor(), 2);
    assert_eq!(committed_shapes(&editor).len(), 2);
}

#[test]
fn test_tool_change_discards_interrupted_drag() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);

    editor.handle_pointer(PointerEvent::Down(Point::new(10.0, 10.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(40.0, 40.0)));
    editor.set_tool(ToolMode::Arrow);

    assert!(editor.surface().frame.is_empty());
    assert_eq!(editor.state(), &DrawingState::Idle);
    assert_eq!(editor.history().len(), 1);

    // The late pointer-up belongs to no drag
    editor.handle_pointer(PointerEvent::Up(Point::new(40.0, 40.0)));
    assert!(editor.surface().frame.is_empty());
}

#[test]
fn test_tool_change_updates_interaction() {
    let mut editor = create_test_editor();

    editor.set_tool(ToolMode::Text);
    let interaction = editor.interaction();
    assert!(!interaction.selection_enabled);
    assert_eq!(interaction.cursor, Cursor::Crosshair);
    assert_eq!(interaction.handlers, Some(DrawingTool::Text));

    editor.set_tool(ToolMode::Select);
    let interaction = editor.interaction();
    assert!(interaction.selection_enabled);
    assert_eq!(interaction.cursor, Cursor::Default);
    assert_eq!(interaction.handlers, None);
}

#[test]
fn test_text_tool_places_placeholder_and_edits() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);

    editor.handle_pointer(PointerEvent::Down(Point::new(30.0, 40.0)));
    assert!(editor.is_editing_text());
    assert_eq!(editor.editing_text(), Some("Click to edit"));
    assert_eq!(editor.selection(), Some(0));
    assert_eq!(editor.history().len(), 2);

    editor.handle_text(TextInput::Insert("Hi".into()));
    editor.handle_text(TextInput::Insert(" there".into()));
    editor.handle_text(TextInput::Backspace);
    assert_eq!(editor.editing_text(), Some("Hi ther"));
    // Keystrokes are not history entries
    assert_eq!(editor.history().len(), 2);

    editor.handle_text(TextInput::Finish);
    assert!(!editor.is_editing_text());
    assert_eq!(editor.history().len(), 3);

    match committed_shapes(&editor)[0] {
        Shape::Text {
            x, y, text, size, ..
        } => {
            assert_eq!((*x, *y), (30.0, 40.0));
            assert_eq!(text, "Hi ther");
            assert_eq!(*size, 20.0);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_unchanged_text_finish_does_not_commit() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);
    editor.handle_pointer(PointerEvent::Down(Point::new(30.0, 40.0)));
    editor.handle_text(TextInput::Finish);

    assert_eq!(editor.history().len(), 2);
    assert_eq!(committed_shapes(&editor).len(), 1);
}

#[test]
fn test_emptied_text_is_removed_on_finish() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);
    editor.handle_pointer(PointerEvent::Down(Point::new(30.0, 40.0)));
    editor.handle_text(TextInput::Backspace);
    assert_eq!(editor.editing_text(), Some(""));

    editor.set_tool(ToolMode::Select);

    assert!(editor.surface().frame.is_empty());
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn test_second_text_click_finishes_first_edit() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);

    editor.handle_pointer(PointerEvent::Down(Point::new(10.0, 10.0)));
    editor.handle_text(TextInput::Insert("one".into()));
    editor.handle_pointer(PointerEvent::Up(Point::new(10.0, 10.0)));
    editor.handle_pointer(PointerEvent::Down(Point::new(200.0, 200.0)));

    // place, edit finish, second place
    assert_eq!(editor.history().len(), 4);
    assert_eq!(editor.surface().frame.len(), 2);
    assert_eq!(editor.editing_text(), Some("Click to edit"));
    assert_eq!(editor.selection(), Some(1));
}

#[test]
fn test_select_mode_moves_shape_and_commits() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);
    drag(&mut editor, (100.0, 100.0), (200.0, 150.0));
    editor.set_tool(ToolMode::Select);

    editor.handle_pointer(PointerEvent::Down(Point::new(150.0, 120.0)));
    assert_eq!(editor.selection(), Some(0));
    editor.handle_pointer(PointerEvent::Move(Point::new(160.0, 125.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(170.0, 140.0)));
    editor.handle_pointer(PointerEvent::Up(Point::new(170.0, 140.0)));

    match committed_shapes(&editor)[0] {
        Shape::Rect { x, y, w, h, .. } => {
            assert_eq!((*x, *y, *w, *h), (120.0, 120.0, 100.0, 50.0));
        }
        other => panic!("expected rectangle, got {other:?}"),
    }
    assert_eq!(editor.history().len(), 3);

    // Undo puts it back and drops the selection
    editor.undo().unwrap();
    assert_eq!(editor.selection(), None);
    match committed_shapes(&editor)[0] {
        Shape::Rect { x, y, .. } => assert_eq!((*x, *y), (100.0, 100.0)),
        other => panic!("expected rectangle, got {other:?}"),
    }
}

#[test]
fn test_select_click_without_move_does_not_commit() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Rectangle);
    drag(&mut editor, (100.0, 100.0), (200.0, 150.0));
    editor.set_tool(ToolMode::Select);

    editor.handle_pointer(PointerEvent::Down(Point::new(150.0, 120.0)));
    editor.handle_pointer(PointerEvent::Up(Point::new(150.0, 120.0)));
    assert_eq!(editor.selection(), Some(0));
    assert_eq!(editor.history().len(), 2);

    editor.handle_pointer(PointerEvent::Down(Point::new(900.0, 500.0)));
    editor.handle_pointer(PointerEvent::Up(Point::new(900.0, 500.0)));
    assert_eq!(editor.selection(), None);
}

#[test]
fn test_edit_selected_text_reenters_editing() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);
    editor.handle_pointer(PointerEvent::Down(Point::new(30.0, 40.0)));
    editor.handle_text(TextInput::Insert("Note".into()));
    editor.handle_text(TextInput::Finish);
    assert_eq!(editor.history().len(), 3);

    assert!(editor.edit_selected_text());
    editor.handle_text(TextInput::Insert("!".into()));
    editor.handle_text(TextInput::Finish);
    assert_eq!(editor.history().len(), 4);

    match committed_shapes(&editor)[0] {
        Shape::Text { text, .. } => assert_eq!(text, "Note!"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_undo_during_text_edit_resets_state() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Text);
    editor.handle_pointer(PointerEvent::Down(Point::new(30.0, 40.0)));
    editor.handle_text(TextInput::Insert("draft".into()));

    editor.handle_toolbar(ToolbarCommand::Undo).unwrap();

    assert!(!editor.is_editing_text());
    assert!(editor.surface().frame.is_empty());
    assert_eq!(editor.selection(), None);
    editor.handle_text(TextInput::Insert("ignored".into()));
    assert!(editor.surface().frame.is_empty());
}

#[test]
fn test_set_color_keeps_previous_on_invalid_value() {
    let mut editor = create_test_editor();
    assert_eq!(editor.toolbar_state().color, "#FF0000");

    assert!(editor.set_color("#00FF00"));
    assert!(!editor.set_color("not-a-color"));
    assert_eq!(editor.color(), Color::from_hex("#00FF00").unwrap());

    editor
        .handle_toolbar(ToolbarCommand::SetColor("orange".into()))
        .unwrap();
    assert_eq!(editor.toolbar_state().color, "#FFA500");
}

#[test]
fn test_toolbar_state_tracks_tool_and_undo() {
    let mut editor = create_test_editor();
    editor
        .handle_toolbar(ToolbarCommand::SetTool(ToolMode::Rectangle))
        .unwrap();
    drag(&mut editor, (0.0, 0.0), (10.0, 10.0));

    assert_eq!(
        editor.toolbar_state(),
        ToolbarState {
            tool: ToolMode::Rectangle,
            color: "#FF0000".to_string(),
            can_undo: true,
        }
    );
}

#[test]
fn test_to_image_is_deterministic() {
    let mut editor = create_test_editor();
    editor.set_tool(ToolMode::Arrow);
    drag(&mut editor, (10.0, 10.0), (300.0, 200.0));
    editor.set_tool(ToolMode::Rectangle);
    drag(&mut editor, (400.0, 100.0), (500.0, 250.0));

    let first = editor.to_image().unwrap();
    let second = editor.to_image().unwrap();
    assert_eq!(first, second);

    let decoded = cairo::ImageSurface::create_from_png(&mut first.as_slice()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 600));
}

#[test]
fn test_download_writes_timestamped_png() {
    let editor = create_test_editor();
    let dir = tempfile::tempdir().unwrap();

    let path = editor.download(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("annotated-"));
    assert!(name.ends_with(".png"));
    assert_eq!(std::fs::read(&path).unwrap(), editor.to_image().unwrap());
}
