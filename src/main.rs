mod app;
mod config;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use anyhow::{Context, Result};
use app::App;
use config::Config;
use core::actions::{find_action, find_sequence_action, is_sequence_prefix};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::ListingSource;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::Duration;
use tracing::{error, info};
use ui::components::{
    CommandBar, Dialog, FilePanel, PathBar, StatusBar, TreePanel, WarningScreen,
};
use ui::{Focus, LayoutMode};
use utils::{formatter::format_file_size, logging};

fn main() -> Result<()> {
    let config = Config::load().context("Failed to load settings")?;
    let log_path = logging::init(&config.log_level)?;
    info!(log = %log_path.display(), "dirscope starting");

    let mut app = App::new(config).context("Failed to open start directory")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "main loop failed");
        eprintln!("Error: {:?}", err);
    }
    info!("dirscope stopped");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();
            app.layout.update(size, app.focus);

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::Split | LayoutMode::Single => render_main_ui(f, app),
            }
        })?;

        let poll_timeout = if app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                // Windows는 Release도 보고하므로 Press만 처리
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        app.handle_dialog_key(key);
                    } else {
                        handle_normal_keys(app, key);
                    }
                }
            }
        }

        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }
        app.clear_expired_toast();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, key: KeyEvent) {
    let (modifiers, code) = (key.modifiers, key.code);

    // 1) 대기 중인 시퀀스 완성 (gg, gp)
    if let Some(prefix) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(prefix, c) {
                app.execute_action(action);
                return;
            }
        }
    }

    // 2) 시퀀스 시작
    if modifiers == KeyModifiers::NONE {
        if let KeyCode::Char(c) = code {
            if is_sequence_prefix(c) {
                app.set_pending_key(c);
                return;
            }
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();
    let session = &app.session;

    let path = session.current_dir().display().to_string();
    let path_bar = PathBar::new(&path)
        .history(session.history.can_go_back(), session.history.can_go_forward())
        .theme(theme);
    f.render_widget(path_bar, areas.path_bar);

    if app.layout_mode() == LayoutMode::Split || app.focus == Focus::Tree {
        let rows = app.tree_rows();
        let tree = TreePanel::new(&session.tree, &rows)
            .cursor(app.tree_cursor)
            .scroll_offset(app.tree_scroll)
            .current(session.selected_node)
            .focused(app.focus == Focus::Tree)
            .theme(theme);
        f.render_widget(tree, areas.tree_panel);
    }

    if app.layout_mode() == LayoutMode::Split || app.focus == Focus::Listing {
        render_listing(f, app, theme, areas.listing_panel);
    }

    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new(&app.command_items).theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}

/// 목록 패널 (검색 중이면 결과 목록)
fn render_listing(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let listing = &app.session.listing;
    let (title, search_base, empty_message) = match &listing.source {
        ListingSource::Directory => {
            let name = listing
                .directory
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| listing.directory.display().to_string());
            (format!(" {} ", name), None, "Folder is empty")
        }
        ListingSource::Search { query } => (
            format!(" Search: {} ", query),
            Some(listing.directory.as_path()),
            "No matches",
        ),
    };

    let panel = FilePanel::new(&listing.entries)
        .title(&title)
        .selected_index(listing.selected_index)
        .scroll_offset(listing.scroll_offset)
        .search_base(search_base)
        .empty_message(empty_message)
        .focused(app.focus == Focus::Listing)
        .theme(theme);
    f.render_widget(panel, area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let listing = &app.session.listing;
    let total_size = format_file_size(listing.total_size());
    let notice = app.status_notice();
    let query = match &listing.source {
        ListingSource::Search { query } => Some(query.as_str()),
        ListingSource::Directory => None,
    };

    let status_bar = StatusBar::new()
        .file_count(listing.file_count())
        .dir_count(listing.dir_count())
        .total_size(&total_size)
        .notice(notice.as_deref())
        .search_query(query)
        .show_hidden(listing.show_hidden)
        .theme(theme);
    f.render_widget(status_bar, area);
}
