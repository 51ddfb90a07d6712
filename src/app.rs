use crate::config::Config;
use crate::core::actions::generate_command_bar_items;
use crate::core::{BrowserSession, SessionOptions};
use crate::models::{ListingStatus, NodeId};
use crate::ui::components::{CommandItem, DialogKind};
use crate::ui::{Focus, LayoutManager, LayoutMode, ThemeManager};
use crate::utils::error::{DirscopeError, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

mod dialogs;
mod navigation;
mod operations;
mod text_edit;

use operations::OperationFlow;

/// 토스트 표시 시간 (초)
const TOAST_SECS: u64 = 3;
/// 키 시퀀스 대기 시간 (ms)
const PENDING_KEY_MS: u128 = 800;

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 트리/목록/기록
    pub session: BrowserSession,
    /// 시작 시 읽은 설정
    pub config: Config,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 키 입력을 받는 패널
    pub focus: Focus,
    /// 트리 커서 (visible_rows 인덱스)
    pub tree_cursor: usize,
    pub tree_scroll: usize,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 다이얼로그로 진행 중인 파일 작업
    flow: Option<OperationFlow>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    /// 대기 키 입력 시각
    pub pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    pub command_items: Vec<CommandItem>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let start = config.resolve_start_dir();
        if !start.is_dir() {
            return Err(DirscopeError::InvalidDirectory { path: start });
        }

        let options = SessionOptions {
            show_hidden: config.show_hidden,
            history_limit: config.history_limit,
            tree_root: None,
        };
        info!(start = %start.display(), "starting session");
        let session = BrowserSession::new(start, options);
        let theme_manager = ThemeManager::new(config.theme);

        let mut app = Self::with_session(session, config, theme_manager);
        app.initial_load();
        Ok(app)
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(root: &std::path::Path) -> Self {
        let options = SessionOptions {
            show_hidden: true,
            history_limit: 100,
            tree_root: Some(root.to_path_buf()),
        };
        let session = BrowserSession::new(root.to_path_buf(), options);
        let mut app = Self::with_session(session, Config::default(), ThemeManager::default());
        app.initial_load();
        app
    }

    fn with_session(session: BrowserSession, config: Config, theme_manager: ThemeManager) -> Self {
        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            session,
            config,
            theme_manager,
            focus: Focus::default(),
            tree_cursor: 0,
            tree_scroll: 0,
            dialog: None,
            flow: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            command_items: generate_command_bar_items(),
        }
    }

    /// 첫 목록 로드 (기록에는 남기지 않음)
    fn initial_load(&mut self) {
        let result = self.session.refresh();
        self.report_listing(result);
    }

    /// 종료
    pub fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 현재 디렉토리
    pub fn current_dir(&self) -> PathBuf {
        self.session.current_dir().to_path_buf()
    }

    /// 레이아웃 모드 반환
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    /// 목록 로드 결과를 사용자에게 알림
    ///
    /// 권한 문제나 잘못된 경로는 에러 다이얼로그, 빈 디렉토리는 토스트.
    pub(crate) fn report_listing(&mut self, result: Result<ListingStatus>) {
        match result {
            Ok(ListingStatus::Empty) => self.set_toast("Folder is empty"),
            Ok(ListingStatus::Populated(_)) => {}
            Err(err) => self.show_error(&err),
        }
        self.sync_tree_cursor();
        self.adjust_listing_scroll();
    }

    /// 에러 다이얼로그 표시
    pub(crate) fn show_error(&mut self, err: &DirscopeError) {
        warn!(error = %err, "user facing error");
        self.dialog = Some(DialogKind::error(err.title(), err.to_string()));
    }

    // === 트리 커서 ===

    pub fn tree_rows(&self) -> Vec<(NodeId, usize)> {
        self.session.tree.visible_rows()
    }

    /// 트리 커서 위치의 노드
    pub fn tree_cursor_node(&self) -> Option<NodeId> {
        self.tree_rows().get(self.tree_cursor).map(|&(id, _)| id)
    }

    /// 트리 커서를 현재 디렉토리 노드로 옮김
    pub(crate) fn sync_tree_cursor(&mut self) {
        let rows = self.tree_rows();
        if let Some(selected) = self.session.selected_node {
            if let Some(pos) = rows.iter().position(|&(id, _)| id == selected) {
                self.tree_cursor = pos;
            }
        }
        self.clamp_tree_cursor(rows.len());
    }

    pub(crate) fn clamp_tree_cursor(&mut self, row_count: usize) {
        if row_count == 0 {
            self.tree_cursor = 0;
        } else if self.tree_cursor >= row_count {
            self.tree_cursor = row_count - 1;
        }
        self.adjust_tree_scroll();
    }

    fn adjust_tree_scroll(&mut self) {
        let visible = self.layout.tree_rows();
        if visible == 0 {
            return;
        }
        if self.tree_cursor < self.tree_scroll {
            self.tree_scroll = self.tree_cursor;
        } else if self.tree_cursor >= self.tree_scroll + visible {
            self.tree_scroll = self.tree_cursor + 1 - visible;
        }
    }

    pub(crate) fn adjust_listing_scroll(&mut self) {
        let visible = self.layout.listing_rows();
        self.session.listing.adjust_scroll(visible);
    }

    // === 토스트 / 키 시퀀스 ===

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료된 토스트 제거
    pub fn clear_expired_toast(&mut self) {
        if let Some((_, time)) = &self.toast_message {
            if time.elapsed().as_secs() >= TOAST_SECS {
                self.toast_message = None;
            }
        }
    }

    /// 상태바 알림 (토스트 우선, 그 다음 대기 키)
    pub fn status_notice(&self) -> Option<String> {
        if let Some((message, _)) = &self.toast_message {
            return Some(message.clone());
        }
        self.pending_key.map(|k| format!("{}_", k))
    }

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .is_some_and(|t| t.elapsed().as_millis() > PENDING_KEY_MS)
    }
}

#[cfg(test)]
mod tests;
