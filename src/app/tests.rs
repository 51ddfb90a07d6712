use super::*;
use crate::core::actions::Action;
use crate::ui::components::InputPurpose;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use tempfile::TempDir;

fn make_test_app(temp: &TempDir) -> (App, PathBuf) {
    let root = temp.path().canonicalize().unwrap();
    (App::new_for_test(&root), root)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_dialog_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn clear_input(app: &mut App) {
    app.handle_dialog_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn select_name(app: &mut App, name: &str) {
    let row = app
        .session
        .listing
        .entries
        .iter()
        .position(|e| e.name == name)
        .unwrap_or_else(|| panic!("{} not listed", name));
    app.session.listing.select(row);
}

fn toast(app: &App) -> String {
    app.toast_message
        .as_ref()
        .map(|(m, _)| m.clone())
        .unwrap_or_default()
}

fn dialog_title(app: &App) -> Option<String> {
    match &app.dialog {
        Some(DialogKind::Error { title, .. }) => Some(title.clone()),
        Some(DialogKind::Input { title, .. }) => Some(title.clone()),
        Some(DialogKind::Confirm { title, .. }) => Some(title.clone()),
        Some(DialogKind::Message { title, .. }) => Some(title.clone()),
        Some(DialogKind::Properties { title, .. }) => Some(title.clone()),
        Some(DialogKind::Help { .. }) => Some("Help".to_string()),
        None => None,
    }
}

fn input_value(app: &App) -> Option<(String, InputPurpose)> {
    match &app.dialog {
        Some(DialogKind::Input { value, purpose, .. }) => Some((value.clone(), *purpose)),
        _ => None,
    }
}

// === 시작 ===

#[test]
fn test_initial_load_does_not_seed_history() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let (app, root) = make_test_app(&temp);

    assert_eq!(app.current_dir(), root);
    assert_eq!(app.session.listing.entries.len(), 1);
    assert!(!app.session.history.can_go_back());
    assert!(app.dialog.is_none());
}

#[test]
fn test_empty_folder_shows_toast() {
    let temp = TempDir::new().unwrap();
    let (app, _) = make_test_app(&temp);
    assert_eq!(toast(&app), "Folder is empty");
}

// === 복사 / 이동 ===

#[test]
fn test_copy_flow_keeps_extension() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("report.txt"), "data").unwrap();
    fs::create_dir(temp.path().join("dest")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "report.txt");
    app.execute_action(Action::Copy);
    let (value, purpose) = input_value(&app).unwrap();
    assert_eq!(value, root.display().to_string());
    assert_eq!(purpose, InputPurpose::Destination);

    clear_input(&mut app);
    type_text(&mut app, "dest");
    press(&mut app, KeyCode::Enter);

    // 이름 단계: 확장자를 뺀 원래 이름이 제안됨
    let (value, purpose) = input_value(&app).unwrap();
    assert_eq!(value, "report");
    assert_eq!(purpose, InputPurpose::TargetName);

    clear_input(&mut app);
    type_text(&mut app, "final");
    press(&mut app, KeyCode::Enter);

    assert!(app.dialog.is_none(), "dialog: {:?}", dialog_title(&app));
    assert!(root.join("dest/final.txt").exists());
    assert!(root.join("report.txt").exists());
    assert!(toast(&app).starts_with("Copied report.txt"));
    assert!(app.flow.is_none());
}

#[test]
fn test_copy_blank_name_reuses_original() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.log"), "x").unwrap();
    fs::create_dir(temp.path().join("out")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "a.log");
    app.execute_action(Action::Copy);
    clear_input(&mut app);
    type_text(&mut app, "out");
    press(&mut app, KeyCode::Enter);
    clear_input(&mut app);
    press(&mut app, KeyCode::Enter);

    assert!(root.join("out/a.log").exists());
}

#[test]
fn test_copy_collision_shows_error_and_leaves_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("same.txt"), "src").unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "same.txt");
    app.execute_action(Action::Copy);
    // 기본 대상은 현재 디렉토리, 이름도 그대로면 충돌
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert_eq!(dialog_title(&app).as_deref(), Some("Name Collision"));
    assert_eq!(fs::read_to_string(root.join("same.txt")).unwrap(), "src");

    press(&mut app, KeyCode::Enter);
    assert!(app.dialog.is_none());
}

#[test]
fn test_move_into_subfolder_refreshes_listing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("note.md"), "n").unwrap();
    fs::create_dir(temp.path().join("archive")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "note.md");
    app.execute_action(Action::Move);
    clear_input(&mut app);
    type_text(&mut app, "archive");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    assert!(root.join("archive/note.md").exists());
    assert!(!root.join("note.md").exists());
    let names: Vec<_> = app
        .session
        .listing
        .entries
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["archive"]);
}

#[test]
fn test_move_cancelled_at_name_step() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("keep.txt"), "k").unwrap();
    fs::create_dir(temp.path().join("elsewhere")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "keep.txt");
    app.execute_action(Action::Move);
    clear_input(&mut app);
    type_text(&mut app, "elsewhere");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);

    assert!(app.dialog.is_none());
    assert!(app.flow.is_none());
    assert_eq!(toast(&app), "Cancelled");
    assert!(root.join("keep.txt").exists());
    assert!(!root.join("elsewhere/keep.txt").exists());
}

#[test]
fn test_cancel_button_on_destination_step() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("f.txt"), "f").unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::Copy);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    assert!(app.dialog.is_none());
    assert!(app.flow.is_none());
}

// === 삭제 ===

#[test]
fn test_delete_folder_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("old/nested")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "old");
    app.execute_action(Action::Delete);
    assert!(matches!(app.dialog, Some(DialogKind::Confirm { .. })));

    press(&mut app, KeyCode::Enter);
    assert!(!root.join("old").exists());
    assert!(app.session.listing.entries.is_empty());
    assert!(toast(&app).starts_with("Deleted old"));
}

#[test]
fn test_delete_declined_keeps_target() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("precious.txt"), "p").unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.execute_action(Action::Delete);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    assert!(root.join("precious.txt").exists());
    assert_eq!(toast(&app), "Cancelled");
}

#[test]
fn test_delete_file_without_confirmation_when_disabled() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tmp.bin"), "t").unwrap();
    let (mut app, root) = make_test_app(&temp);
    app.config.confirm_file_delete = false;

    app.execute_action(Action::Delete);

    assert!(app.dialog.is_none());
    assert!(!root.join("tmp.bin").exists());
}

#[test]
fn test_delete_folder_still_confirms_when_file_confirm_disabled() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("dir")).unwrap();
    let (mut app, root) = make_test_app(&temp);
    app.config.confirm_file_delete = false;

    app.execute_action(Action::Delete);
    assert!(matches!(app.dialog, Some(DialogKind::Confirm { .. })));
    press(&mut app, KeyCode::Char('n'));
    assert!(root.join("dir").exists());
}

// === 생성 ===

#[test]
fn test_create_folder_selects_new_entry() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("zzz.txt"), "z").unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.execute_action(Action::MakeDirectory);
    type_text(&mut app, "new_dir");
    press(&mut app, KeyCode::Enter);

    assert!(root.join("new_dir").is_dir());
    let selected = app.session.listing.selected_entry().unwrap();
    assert_eq!(selected.name, "new_dir");
    assert_eq!(toast(&app), "Created new_dir");
}

#[test]
fn test_create_folder_rejects_invalid_name() {
    let temp = TempDir::new().unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.execute_action(Action::MakeDirectory);
    type_text(&mut app, "bad name");
    press(&mut app, KeyCode::Enter);

    assert_eq!(dialog_title(&app).as_deref(), Some("Invalid Name"));
    assert!(!root.join("bad name").exists());
}

// === 탐색 ===

#[test]
fn test_go_to_relative_path_records_history() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.execute_action(Action::GoToPath);
    clear_input(&mut app);
    type_text(&mut app, "sub");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.current_dir(), root.join("sub"));
    assert!(app.session.history.can_go_back());

    app.execute_action(Action::HistoryBack);
    assert_eq!(app.current_dir(), root);
    app.execute_action(Action::HistoryForward);
    assert_eq!(app.current_dir(), root.join("sub"));
}

#[test]
fn test_go_to_file_path_selects_it_in_parent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("docs")).unwrap();
    fs::write(temp.path().join("docs/a.txt"), "a").unwrap();
    fs::write(temp.path().join("docs/b.txt"), "b").unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.go_to_path(&root.join("docs/b.txt").display().to_string());

    assert_eq!(app.current_dir(), root.join("docs"));
    assert_eq!(app.session.listing.selected_entry().unwrap().name, "b.txt");
}

#[test]
fn test_go_to_missing_path_shows_error() {
    let temp = TempDir::new().unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.go_to_path("does/not/exist");

    assert_eq!(dialog_title(&app).as_deref(), Some("Invalid Directory"));
    assert_eq!(app.current_dir(), root);
    assert!(!app.session.history.can_go_back());
}

#[test]
fn test_empty_history_is_a_toast_not_an_error() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::HistoryBack);
    assert!(app.dialog.is_none());
    assert_eq!(toast(&app), "No previous folder");

    app.execute_action(Action::HistoryForward);
    assert_eq!(toast(&app), "No next folder");
}

#[test]
fn test_enter_and_leave_directory_from_listing() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("child")).unwrap();
    fs::write(temp.path().join("z.txt"), "z").unwrap();
    let (mut app, root) = make_test_app(&temp);

    select_name(&mut app, "child");
    app.execute_action(Action::EnterSelected);
    assert_eq!(app.current_dir(), root.join("child"));
    assert_eq!(toast(&app), "Folder is empty");

    app.execute_action(Action::GoToParent);
    assert_eq!(app.current_dir(), root);
    // 상위로 올라오면 방금 있던 디렉토리가 선택됨
    assert_eq!(app.session.listing.selected_entry().unwrap().name, "child");
}

#[test]
fn test_tree_select_and_collapse() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("alpha/inner")).unwrap();
    fs::create_dir(temp.path().join("beta")).unwrap();
    let (mut app, root) = make_test_app(&temp);
    let root_id = app.session.tree.root();
    app.session
        .tree
        .expand(&app.session.filesystem, root_id);

    app.execute_action(Action::ToggleFocus);
    assert_eq!(app.focus, Focus::Tree);
    app.execute_action(Action::GoToTop);
    app.execute_action(Action::MoveDown);
    app.execute_action(Action::EnterSelected);
    assert_eq!(app.current_dir(), root.join("alpha"));

    // 펼쳐진 alpha 접기 → 한 번 더 누르면 부모(root)로
    app.execute_action(Action::CollapseNode);
    assert!(!app.session.tree.node(app.tree_cursor_node().unwrap()).unwrap().expanded);
    app.execute_action(Action::CollapseNode);
    assert_eq!(app.tree_cursor, 0);
    assert_eq!(app.tree_cursor_node(), Some(root_id));
}

#[test]
fn test_refresh_relocates_when_folder_removed() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("gone")).unwrap();
    let (mut app, root) = make_test_app(&temp);

    app.go_to_path("gone");
    assert_eq!(app.current_dir(), root.join("gone"));
    fs::remove_dir(root.join("gone")).unwrap();

    app.execute_action(Action::Refresh);
    assert_eq!(app.current_dir(), root);
    assert_eq!(toast(&app), "Folder no longer exists, moved up");
}

// === 보기 ===

#[test]
fn test_search_and_return_to_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("deep/er")).unwrap();
    fs::write(temp.path().join("deep/er/needle.txt"), "n").unwrap();
    fs::write(temp.path().join("hay.txt"), "h").unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::StartSearch);
    type_text(&mut app, "needle");
    press(&mut app, KeyCode::Enter);

    assert!(app.session.listing.is_search_result());
    assert_eq!(app.session.listing.entries.len(), 1);
    assert_eq!(toast(&app), "1 match found");

    app.execute_action(Action::Refresh);
    assert!(!app.session.listing.is_search_result());
}

#[test]
fn test_blank_search_shows_error() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::StartSearch);
    type_text(&mut app, "  ");
    press(&mut app, KeyCode::Enter);

    assert_eq!(dialog_title(&app).as_deref(), Some("Search"));
}

#[test]
fn test_toggle_hidden_filters_dotfiles() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".secret"), "s").unwrap();
    fs::write(temp.path().join("plain"), "p").unwrap();
    let (mut app, _) = make_test_app(&temp);
    assert_eq!(app.session.listing.entries.len(), 2);

    app.execute_action(Action::ToggleHidden);
    assert_eq!(app.session.listing.entries.len(), 1);
    assert_eq!(toast(&app), "Hidden files hidden");
}

#[test]
fn test_properties_dialog_for_selected_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("info.txt"), "12345").unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::ShowProperties);
    let Some(DialogKind::Properties { rows, .. }) = &app.dialog else {
        panic!("expected properties dialog");
    };
    assert!(rows.iter().any(|(l, v)| l == "Name" && v == "info.txt"));

    press(&mut app, KeyCode::Esc);
    assert!(app.dialog.is_none());
}

#[test]
fn test_help_scroll_is_clamped() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::ShowHelp);
    press(&mut app, KeyCode::Char('k'));
    for _ in 0..500 {
        press(&mut app, KeyCode::Char('j'));
    }
    let Some(DialogKind::Help { scroll_offset }) = &app.dialog else {
        panic!("expected help dialog");
    };
    assert_eq!(
        *scroll_offset,
        crate::ui::components::help_row_count().saturating_sub(1)
    );
}

#[test]
fn test_toggle_theme_and_quit() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::ToggleTheme);
    assert_eq!(toast(&app), "Theme: light");
    app.execute_action(Action::Quit);
    assert!(app.should_quit());
}

#[test]
fn test_nothing_selected_in_empty_folder() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);

    app.execute_action(Action::Copy);
    assert!(app.dialog.is_none());
    assert_eq!(toast(&app), "Nothing selected");
}

#[test]
fn test_pending_key_notice() {
    let temp = TempDir::new().unwrap();
    let (mut app, _) = make_test_app(&temp);
    app.toast_message = None;

    app.set_pending_key('g');
    assert_eq!(app.status_notice().as_deref(), Some("g_"));
    assert!(!app.is_pending_key_expired());
    app.clear_pending_key();
    assert_eq!(app.status_notice(), None);
}
