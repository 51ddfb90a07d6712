use super::*;
use crate::core::actions::Action;
use crate::core::OpenTarget;
use crate::ui::components::InputPurpose;
use std::path::Path;
use tracing::debug;

impl App {
    /// 액션 실행 (키 바인딩 테이블에서 조회된 결과)
    pub fn execute_action(&mut self, action: Action) {
        debug!(action = action.id(), focus = ?self.focus, "execute action");
        match action {
            Action::Quit => self.quit(),
            Action::ToggleFocus => self.focus.toggle(),
            Action::MoveDown => self.move_cursor(1),
            Action::MoveUp => self.move_cursor(-1),
            Action::PageDown => self.move_cursor(self.page_size() as isize),
            Action::PageUp => self.move_cursor(-(self.page_size() as isize)),
            Action::GoToTop => self.move_cursor_to_edge(false),
            Action::GoToBottom => self.move_cursor_to_edge(true),
            Action::EnterSelected => self.enter_selected(),
            Action::ExpandNode => self.expand_or_enter(),
            Action::CollapseNode => self.collapse_or_leave(),
            Action::GoToParent => self.go_to_parent(),
            Action::HistoryBack => self.history_step(false),
            Action::HistoryForward => self.history_step(true),
            Action::GoToPath => self.start_go_to_path(),
            Action::Copy | Action::Move => self.start_transfer(action),
            Action::Delete => self.start_delete(),
            Action::MakeDirectory => self.start_create(),
            Action::OpenDefaultApp => self.open_selected_with_default_app(),
            Action::ShowProperties => self.show_properties(),
            Action::StartSearch => self.start_search(),
            Action::ToggleHidden => self.toggle_hidden(),
            Action::Refresh => self.refresh(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::ShowHelp => self.dialog = Some(DialogKind::help()),
        }
    }

    // === 커서 이동 ===

    fn page_size(&self) -> usize {
        let rows = match self.focus {
            Focus::Tree => self.layout.tree_rows(),
            Focus::Listing => self.layout.listing_rows(),
        };
        rows.max(1)
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Tree => {
                let count = self.tree_rows().len();
                self.tree_cursor = self.tree_cursor.saturating_add_signed(delta);
                self.clamp_tree_cursor(count);
            }
            Focus::Listing => {
                self.session.listing.move_selection(delta);
                self.adjust_listing_scroll();
            }
        }
    }

    fn move_cursor_to_edge(&mut self, bottom: bool) {
        match self.focus {
            Focus::Tree => {
                let count = self.tree_rows().len();
                self.tree_cursor = if bottom { count.saturating_sub(1) } else { 0 };
                self.clamp_tree_cursor(count);
            }
            Focus::Listing => {
                if bottom {
                    self.session.listing.select_last();
                } else {
                    self.session.listing.select_first();
                }
                self.adjust_listing_scroll();
            }
        }
    }

    // === 열기 / 펼치기 ===

    /// Enter: 트리는 노드 선택, 목록은 행 열기
    pub fn enter_selected(&mut self) {
        match self.focus {
            Focus::Tree => {
                let Some(id) = self.tree_cursor_node() else {
                    return;
                };
                let result = self.session.select_tree_node(id);
                self.report_listing(result);
            }
            Focus::Listing => {
                let row = self.session.listing.selected_index;
                match self.session.open_row(row) {
                    Ok(Some(OpenTarget::Directory(_))) => {
                        let count = self.session.listing.entries.len();
                        let status = if count == 0 {
                            ListingStatus::Empty
                        } else {
                            ListingStatus::Populated(count)
                        };
                        self.report_listing(Ok(status));
                    }
                    Ok(Some(OpenTarget::File(path))) => self.open_with_default_app(&path),
                    Ok(None) => {}
                    Err(err) => self.report_listing(Err(err)),
                }
            }
        }
    }

    /// Right: 트리 노드를 펼치거나 첫 자식으로, 목록에서는 디렉토리 열기
    fn expand_or_enter(&mut self) {
        match self.focus {
            Focus::Tree => {
                let Some(id) = self.tree_cursor_node() else {
                    return;
                };
                let expanded = self.session.tree.node(id).is_some_and(|n| n.expanded);
                if expanded {
                    let has_children = self
                        .session
                        .tree
                        .node(id)
                        .is_some_and(|n| !n.children().is_empty());
                    if has_children {
                        self.move_cursor(1);
                    }
                } else {
                    self.session.toggle_tree_node(id);
                }
            }
            Focus::Listing => {
                if self
                    .session
                    .listing
                    .selected_entry()
                    .is_some_and(|e| e.is_directory())
                {
                    self.enter_selected();
                }
            }
        }
    }

    /// Left: 트리 노드를 접거나 부모 노드로, 목록에서는 상위 디렉토리
    fn collapse_or_leave(&mut self) {
        match self.focus {
            Focus::Tree => {
                let Some(id) = self.tree_cursor_node() else {
                    return;
                };
                let Some((expanded, parent)) =
                    self.session.tree.node(id).map(|n| (n.expanded, n.parent))
                else {
                    return;
                };
                if expanded {
                    self.session.toggle_tree_node(id);
                    return;
                }
                let rows = self.tree_rows();
                if let Some(pos) = parent.and_then(|p| rows.iter().position(|&(n, _)| n == p)) {
                    self.tree_cursor = pos;
                    self.clamp_tree_cursor(rows.len());
                }
            }
            Focus::Listing => self.go_to_parent(),
        }
    }

    pub fn go_to_parent(&mut self) {
        match self.session.go_to_parent() {
            Ok(Some(status)) => self.report_listing(Ok(status)),
            Ok(None) => self.set_toast("Already at the top"),
            Err(err) => self.report_listing(Err(err)),
        }
    }

    /// 뒤로/앞으로 (기록 없음은 토스트로만 알림)
    fn history_step(&mut self, forward: bool) {
        let result = if forward {
            self.session.go_forward()
        } else {
            self.session.go_back()
        };
        match result {
            Err(DirscopeError::EmptyHistory) => {
                self.set_toast(if forward {
                    "No next folder"
                } else {
                    "No previous folder"
                });
            }
            other => self.report_listing(other),
        }
    }

    // === 보기 ===

    fn toggle_hidden(&mut self) {
        let show = !self.session.listing.show_hidden;
        let result = self.session.set_show_hidden(show);
        self.report_listing(result);
        self.set_toast(if show {
            "Hidden files shown"
        } else {
            "Hidden files hidden"
        });
    }

    /// 새로고침 (검색 중이면 디렉토리 목록으로 복귀)
    pub fn refresh(&mut self) {
        let relocated = self.session.relocate_if_missing();
        let root = self.session.tree.root();
        self.session
            .tree
            .rebuild_children_of(&self.session.filesystem, root);
        let result = self.session.refresh();
        self.report_listing(result);
        if relocated {
            self.set_toast("Folder no longer exists, moved up");
        }
    }

    fn toggle_theme(&mut self) {
        self.theme_manager.toggle();
        let name = match self.theme_manager.name() {
            crate::config::ThemeName::Dark => "dark",
            crate::config::ThemeName::Light => "light",
        };
        self.set_toast(&format!("Theme: {}", name));
    }

    // === 경로 이동 ===

    fn start_go_to_path(&mut self) {
        let current = self.current_dir().display().to_string();
        self.dialog = Some(DialogKind::input(
            "Go to",
            "Folder path:",
            current,
            InputPurpose::GoToPath,
        ));
    }

    /// 입력한 경로로 이동 (파일이면 그 부모로 가서 선택)
    pub(crate) fn go_to_path(&mut self, input: &str) {
        let Some(target) = resolve_input_path(&self.current_dir(), input) else {
            return;
        };

        if target.is_file() {
            let Some(parent) = target.parent().map(Path::to_path_buf) else {
                return;
            };
            let result = self.session.navigate_to(&parent);
            if let Some(row) = self.session.listing.position_of(&target) {
                self.session.listing.select(row);
            }
            self.focus = Focus::Listing;
            self.report_listing(result);
            return;
        }

        let result = self.session.navigate_to(&target);
        self.report_listing(result);
    }

    // === 외부 프로그램 ===

    fn open_selected_with_default_app(&mut self) {
        let Some(path) = self.session.listing.selected_entry().map(|e| e.path.clone()) else {
            self.set_toast("Nothing selected");
            return;
        };
        self.open_with_default_app(&path);
    }

    fn open_with_default_app(&mut self, path: &Path) {
        match self.session.filesystem.open_with_default_app(path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                self.set_toast(&format!("Opened {}", name));
            }
            Err(err) => self.show_error(&err),
        }
    }
}

/// 사용자가 입력한 경로 해석
///
/// `~`는 홈, 상대 경로는 `base` 기준. 비어 있으면 None.
pub(crate) fn resolve_input_path(base: &Path, input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let expanded = if trimmed == "~" {
        dirs::home_dir()?
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        dirs::home_dir()?.join(rest)
    } else {
        PathBuf::from(trimmed)
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    Some(absolute.canonicalize().unwrap_or(absolute))
}
