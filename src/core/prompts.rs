//! 파일 작업 중 사용자에게 묻는 지점
//!
//! UI는 다이얼로그로 답을 모은 뒤 `PromptAnswers`로 작업을 실행합니다.

use std::path::{Path, PathBuf};

/// 이름 입력 목적
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePurpose {
    /// 새 디렉토리
    Create,
    /// 복사본 이름
    CopyAs,
    /// 이동 후 이름
    MoveAs,
}

impl NamePurpose {
    pub fn prompt(&self) -> &'static str {
        match self {
            NamePurpose::Create => "New folder name:",
            NamePurpose::CopyAs => "Name for the copy (extension is kept):",
            NamePurpose::MoveAs => "Name at destination (extension is kept):",
        }
    }
}

/// 복사/이동 대상 디렉토리 선택
pub trait DestinationPicker {
    /// None이면 취소
    fn pick_destination(&mut self, source: &Path) -> Option<PathBuf>;
}

/// 이름 입력
pub trait NameInput {
    /// None이면 취소
    fn input_name(&mut self, purpose: NamePurpose, suggested: &str) -> Option<String>;
}

/// 삭제 확인
pub trait ConfirmationPrompt {
    fn confirm(&mut self, target: &Path, is_dir: bool) -> bool;
}

/// 미리 정해진 응답
///
/// 값이 없는 질문은 취소로 답한다.
#[derive(Debug, Clone, Default)]
pub struct PromptAnswers {
    pub destination: Option<PathBuf>,
    pub name: Option<String>,
    pub confirmed: bool,
}

impl PromptAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(mut self, dir: impl Into<PathBuf>) -> Self {
        self.destination = Some(dir.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }
}

impl DestinationPicker for PromptAnswers {
    fn pick_destination(&mut self, _source: &Path) -> Option<PathBuf> {
        self.destination.clone()
    }
}

impl NameInput for PromptAnswers {
    fn input_name(&mut self, _purpose: NamePurpose, _suggested: &str) -> Option<String> {
        self.name.clone()
    }
}

impl ConfirmationPrompt for PromptAnswers {
    fn confirm(&mut self, _target: &Path, _is_dir: bool) -> bool {
        self.confirmed
    }
}
