//! 다이얼로그로 진행하는 파일 작업 흐름
//!
//! 다이얼로그에서 받은 답을 `PromptAnswers`로 모아 `FileOperations`에 넘긴다.

use super::navigation::resolve_input_path;
use super::*;
use crate::core::actions::Action;
use crate::core::{FileOperations, NamePurpose, PromptAnswers};
use crate::models::file_entry::split_extension;
use crate::models::{ListingSource, OperationOutcome, OperationType};
use crate::ui::components::InputPurpose;
use crate::utils::formatter::pluralize;
use std::path::Path;

/// 다이얼로그 사이에 유지되는 작업 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OperationFlow {
    /// 복사/이동 (대상 디렉토리를 고른 뒤 이름 입력)
    Transfer {
        operation: OperationType,
        source: PathBuf,
        destination: Option<PathBuf>,
    },
    Delete {
        target: PathBuf,
    },
    Create {
        parent: PathBuf,
    },
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl App {
    /// 다이얼로그 활성 여부
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기 (진행 중인 작업도 버림)
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.flow = None;
    }

    /// 입력/확인 다이얼로그 취소
    pub(crate) fn cancel_dialog(&mut self) {
        let had_flow = self.flow.is_some();
        self.close_dialog();
        if had_flow {
            self.set_toast("Cancelled");
        }
    }

    /// 작업 대상: 트리 포커스면 커서 노드, 목록이면 선택 항목
    fn operation_target(&self) -> Option<PathBuf> {
        match self.focus {
            Focus::Tree => self
                .tree_cursor_node()
                .and_then(|id| self.session.tree.node(id))
                .map(|n| n.path.clone()),
            Focus::Listing => self.session.listing.selected_entry().map(|e| e.path.clone()),
        }
    }

    // === 복사 / 이동 ===

    pub(crate) fn start_transfer(&mut self, action: Action) {
        let operation = if action == Action::Move {
            OperationType::Move
        } else {
            OperationType::Copy
        };
        let Some(source) = self.operation_target() else {
            self.set_toast("Nothing selected");
            return;
        };

        let prompt = format!("{} '{}' to folder:", operation.name(), display_name(&source));
        self.dialog = Some(DialogKind::input(
            operation.name(),
            prompt,
            self.current_dir().display().to_string(),
            InputPurpose::Destination,
        ));
        self.flow = Some(OperationFlow::Transfer {
            operation,
            source,
            destination: None,
        });
    }

    /// 대상 디렉토리 입력 완료 → 이름 입력으로
    pub(crate) fn confirm_destination(&mut self, value: &str) {
        let Some(OperationFlow::Transfer {
            operation, source, ..
        }) = self.flow.clone()
        else {
            self.close_dialog();
            return;
        };
        let Some(destination) = resolve_input_path(&self.current_dir(), value) else {
            self.cancel_dialog();
            return;
        };

        let is_dir = source.is_dir();
        let original = display_name(&source);
        let suggested = if is_dir {
            original.as_str()
        } else {
            split_extension(&original).0
        };
        let purpose = if operation == OperationType::Move {
            NamePurpose::MoveAs
        } else {
            NamePurpose::CopyAs
        };
        let prompt = if is_dir {
            "Folder name at destination:"
        } else {
            purpose.prompt()
        };

        self.dialog = Some(DialogKind::input(
            operation.name(),
            prompt,
            suggested,
            InputPurpose::TargetName,
        ));
        self.flow = Some(OperationFlow::Transfer {
            operation,
            source,
            destination: Some(destination),
        });
    }

    /// 이름 입력 완료 → 실행
    pub(crate) fn confirm_target_name(&mut self, value: &str) {
        let Some(OperationFlow::Transfer {
            operation,
            source,
            destination: Some(destination),
        }) = self.flow.take()
        else {
            self.close_dialog();
            return;
        };
        self.dialog = None;

        let mut picker = PromptAnswers::new().destination(destination);
        let mut names = PromptAnswers::new().name(value);
        let mut ops = FileOperations::new(&mut self.session);
        let result = match operation {
            OperationType::Move => ops.move_entry(&source, &mut picker, &mut names),
            _ => ops.copy(&source, &mut picker, &mut names),
        };
        self.finish_operation(result);
    }

    // === 삭제 ===

    pub(crate) fn start_delete(&mut self) {
        let Some(target) = self.operation_target() else {
            self.set_toast("Nothing selected");
            return;
        };

        let is_dir = target.is_dir();
        if !is_dir && !self.config.confirm_file_delete {
            self.run_delete(target);
            return;
        }

        let message = if is_dir {
            format!(
                "Delete folder '{}' and everything inside it?",
                display_name(&target)
            )
        } else {
            format!("Delete '{}'?", display_name(&target))
        };
        self.dialog = Some(DialogKind::confirm("Delete", message));
        self.flow = Some(OperationFlow::Delete { target });
    }

    /// 확인 다이얼로그 OK
    pub(crate) fn confirm_dialog_accepted(&mut self) {
        match self.flow.take() {
            Some(OperationFlow::Delete { target }) => {
                self.dialog = None;
                self.run_delete(target);
            }
            _ => self.close_dialog(),
        }
    }

    fn run_delete(&mut self, target: PathBuf) {
        let mut answers = PromptAnswers::new().confirmed(true);
        let result = FileOperations::new(&mut self.session)
            .confirm_file_delete(self.config.confirm_file_delete)
            .delete(&target, &mut answers);
        self.finish_operation(result);
    }

    // === 생성 ===

    pub(crate) fn start_create(&mut self) {
        let parent = self.current_dir();
        self.dialog = Some(DialogKind::input(
            "New Folder",
            NamePurpose::Create.prompt(),
            "",
            InputPurpose::FolderName,
        ));
        self.flow = Some(OperationFlow::Create { parent });
    }

    pub(crate) fn confirm_folder_name(&mut self, value: &str) {
        let Some(OperationFlow::Create { parent }) = self.flow.take() else {
            self.close_dialog();
            return;
        };
        self.dialog = None;

        let mut names = PromptAnswers::new().name(value);
        let result = FileOperations::new(&mut self.session).create(&parent, &mut names);
        self.finish_operation(result);
    }

    /// 작업 결과 반영 (토스트 또는 에러 다이얼로그)
    fn finish_operation(&mut self, result: Result<OperationOutcome>) {
        match result {
            Ok(outcome) => match outcome.report() {
                Some(report) => {
                    let summary = report.summary();
                    info!(summary = %summary, "operation completed");
                    let select = report
                        .destination
                        .as_deref()
                        .and_then(|dest| self.session.listing.position_of(dest));
                    if let Some(row) = select {
                        self.session.listing.select(row);
                    }
                    self.set_toast(&summary);
                }
                None => self.set_toast("Cancelled"),
            },
            Err(err) => self.show_error(&err),
        }
        self.sync_tree_cursor();
        self.adjust_listing_scroll();
    }

    // === 검색 ===

    pub(crate) fn start_search(&mut self) {
        let initial = match &self.session.listing.source {
            ListingSource::Search { query } => query.clone(),
            ListingSource::Directory => String::new(),
        };
        let prompt = format!("Search names under {}:", self.current_dir().display());
        self.dialog = Some(DialogKind::input(
            "Search",
            prompt,
            initial,
            InputPurpose::Search,
        ));
    }

    pub(crate) fn run_search(&mut self, query: &str) {
        self.dialog = None;
        match self.session.search(query) {
            Ok(count) => {
                self.focus = Focus::Listing;
                self.adjust_listing_scroll();
                self.set_toast(&format!("{} found", pluralize(count, "match", "matches")));
            }
            Err(err) => self.show_error(&err),
        }
    }

    // === 속성 ===

    pub(crate) fn show_properties(&mut self) {
        let Some(target) = self.operation_target() else {
            self.set_toast("Nothing selected");
            return;
        };
        match self.session.properties(&target) {
            Ok(props) => self.dialog = Some(DialogKind::properties(&props)),
            Err(err) => self.show_error(&err),
        }
    }
}
