use crate::system::FileProperties;
use crate::utils::formatter::{format_attributes, format_date_full, format_file_size};

/// 입력 다이얼로그 목적
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    /// 복사/이동 대상 디렉토리
    Destination,
    /// 복사/이동 후 이름
    TargetName,
    /// 새 디렉토리 이름
    FolderName,
    /// 파일 이름 검색어
    Search,
    /// 경로 직접 이동
    GoToPath,
}

/// 다이얼로그 종류
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// 한 줄 입력
    Input {
        title: String,
        prompt: String,
        value: String,
        /// 바이트 인덱스
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        purpose: InputPurpose,
    },
    /// 확인 (OK/Cancel)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    Error {
        title: String,
        message: String,
    },
    Message {
        title: String,
        message: String,
    },
    /// 속성 (라벨, 값) 행
    Properties {
        title: String,
        rows: Vec<(String, String)>,
    },
    /// 단축키 도움말
    Help { scroll_offset: usize },
}

impl DialogKind {
    pub fn input(
        title: impl Into<String>,
        prompt: impl Into<String>,
        initial: impl Into<String>,
        purpose: InputPurpose,
    ) -> Self {
        let value: String = initial.into();
        let cursor_pos = value.len();
        DialogKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            value,
            cursor_pos,
            selected_button: 0,
            purpose,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }

    /// 속성 다이얼로그
    pub fn properties(props: &FileProperties) -> Self {
        let kind = if props.is_directory { "Folder" } else { "File" };
        let size = format!("{} ({} bytes)", format_file_size(props.size), props.size);

        let rows = vec![
            ("Name", props.name.clone()),
            ("Extension", props.extension_display().to_string()),
            ("Type", kind.to_string()),
            ("Size", size),
            ("Location", props.location.display().to_string()),
            ("Created", format_date_full(props.created)),
            ("Modified", format_date_full(props.modified)),
            ("Owner", props.owner.clone().unwrap_or_else(|| "N/A".to_string())),
            (
                "Attributes",
                format_attributes(props.readable, props.writable, props.executable),
            ),
        ];

        DialogKind::Properties {
            title: "Properties".to_string(),
            rows: rows
                .into_iter()
                .map(|(label, value)| (label.to_string(), value))
                .collect(),
        }
    }

    /// OK 버튼만 있는 정보성 다이얼로그인지
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            DialogKind::Error { .. } | DialogKind::Message { .. } | DialogKind::Properties { .. }
        )
    }
}
