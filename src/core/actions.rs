//! 액션 레지스트리
//!
//! 키 바인딩, 커맨드바 항목, 도움말 내용이 모두 이 테이블을 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    ToggleFocus,
    EnterSelected,
    ExpandNode,
    CollapseNode,
    GoToParent,
    HistoryBack,
    HistoryForward,
    GoToPath,
    // File Operations
    Copy,
    Move,
    Delete,
    MakeDirectory,
    OpenDefaultApp,
    ShowProperties,
    // View
    StartSearch,
    ToggleHidden,
    Refresh,
    ToggleTheme,
    // System
    ShowHelp,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOperation,
    View,
    System,
}

impl ActionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::FileOperation => "File Operations",
            ActionCategory::View => "View",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        label: "Move up / down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("j / k"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        label: "Top",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gg / Home"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        label: "Bottom",
        category: ActionCategory::Navigation,
        shortcut_display: Some("G / End"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        label: "Page up / down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("PgUp / PgDn"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        label: "Page down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::ToggleFocus,
        id: "toggle_focus",
        label: "Switch tree / listing",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Tab"),
        command_bar: Some(CommandBarEntry {
            key: "Tab",
            label: "Pane",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::EnterSelected,
        id: "enter",
        label: "Open",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Enter"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ExpandNode,
        id: "expand",
        label: "Expand folder",
        category: ActionCategory::Navigation,
        shortcut_display: Some("l / Right"),
        command_bar: None,
    },
    ActionDef {
        action: Action::CollapseNode,
        id: "collapse",
        label: "Collapse folder",
        category: ActionCategory::Navigation,
        shortcut_display: Some("h / Left"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToParent,
        id: "go_parent",
        label: "Parent folder",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Backspace"),
        command_bar: Some(CommandBarEntry {
            key: "Bksp",
            label: "Up",
            priority: 51,
        }),
    },
    ActionDef {
        action: Action::HistoryBack,
        id: "history_back",
        label: "Back",
        category: ActionCategory::Navigation,
        shortcut_display: Some("[ / Alt+Left"),
        command_bar: Some(CommandBarEntry {
            key: "[/]",
            label: "Back/Fwd",
            priority: 52,
        }),
    },
    ActionDef {
        action: Action::HistoryForward,
        id: "history_forward",
        label: "Forward",
        category: ActionCategory::Navigation,
        shortcut_display: Some("] / Alt+Right"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToPath,
        id: "goto_path",
        label: "Go to path",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gp"),
        command_bar: None,
    },
    // File Operations
    ActionDef {
        action: Action::Copy,
        id: "copy",
        label: "Copy",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("c / F5"),
        command_bar: Some(CommandBarEntry {
            key: "F5",
            label: "Copy",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Move,
        id: "move",
        label: "Move",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("m / F6"),
        command_bar: Some(CommandBarEntry {
            key: "F6",
            label: "Move",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::MakeDirectory,
        id: "mkdir",
        label: "New folder",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("n / F7"),
        command_bar: Some(CommandBarEntry {
            key: "F7",
            label: "MkDir",
            priority: 12,
        }),
    },
    ActionDef {
        action: Action::Delete,
        id: "delete",
        label: "Delete",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("d / Del / F8"),
        command_bar: Some(CommandBarEntry {
            key: "F8",
            label: "Del",
            priority: 13,
        }),
    },
    ActionDef {
        action: Action::OpenDefaultApp,
        id: "open_default",
        label: "Open with default app",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("o"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowProperties,
        id: "properties",
        label: "Properties",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("i"),
        command_bar: Some(CommandBarEntry {
            key: "i",
            label: "Info",
            priority: 20,
        }),
    },
    // View
    ActionDef {
        action: Action::StartSearch,
        id: "search",
        label: "Search files",
        category: ActionCategory::View,
        shortcut_display: Some("/"),
        command_bar: Some(CommandBarEntry {
            key: "/",
            label: "Find",
            priority: 21,
        }),
    },
    ActionDef {
        action: Action::ToggleHidden,
        id: "toggle_hidden",
        label: "Show / hide hidden files",
        category: ActionCategory::View,
        shortcut_display: Some("."),
        command_bar: None,
    },
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        label: "Refresh",
        category: ActionCategory::View,
        shortcut_display: Some("^R"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ToggleTheme,
        id: "toggle_theme",
        label: "Switch dark / light theme",
        category: ActionCategory::View,
        shortcut_display: Some("t"),
        command_bar: None,
    },
    // System
    ActionDef {
        action: Action::ShowHelp,
        id: "help",
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("? / F1"),
        command_bar: Some(CommandBarEntry {
            key: "F1",
            label: "Help",
            priority: 1,
        }),
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q / ^C"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 90,
        }),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    let plain = Some(KeyModifiers::NONE);
    let bind = |code: KeyCode, modifiers: Option<KeyModifiers>, action: Action| KeyBinding {
        code,
        modifiers,
        action,
    };

    vec![
        // 종료
        bind(KeyCode::Char('q'), plain, Action::Quit),
        bind(
            KeyCode::Char('c'),
            Some(KeyModifiers::CONTROL),
            Action::Quit,
        ),
        // 포커스
        bind(KeyCode::Tab, None, Action::ToggleFocus),
        bind(KeyCode::BackTab, None, Action::ToggleFocus),
        // 탐색: Vim
        bind(KeyCode::Char('j'), plain, Action::MoveDown),
        bind(KeyCode::Char('k'), plain, Action::MoveUp),
        bind(KeyCode::Char('l'), plain, Action::ExpandNode),
        bind(KeyCode::Char('h'), plain, Action::CollapseNode),
        bind(
            KeyCode::Char('G'),
            Some(KeyModifiers::SHIFT),
            Action::GoToBottom,
        ),
        bind(KeyCode::Char('G'), plain, Action::GoToBottom),
        // 탐색: 화살표 (Alt 조합보다 뒤에 두면 가려지므로 Alt를 먼저)
        bind(KeyCode::Left, Some(KeyModifiers::ALT), Action::HistoryBack),
        bind(
            KeyCode::Right,
            Some(KeyModifiers::ALT),
            Action::HistoryForward,
        ),
        bind(KeyCode::Down, plain, Action::MoveDown),
        bind(KeyCode::Up, plain, Action::MoveUp),
        bind(KeyCode::Right, plain, Action::ExpandNode),
        bind(KeyCode::Left, plain, Action::CollapseNode),
        bind(KeyCode::Home, None, Action::GoToTop),
        bind(KeyCode::End, None, Action::GoToBottom),
        bind(KeyCode::PageUp, None, Action::PageUp),
        bind(KeyCode::PageDown, None, Action::PageDown),
        bind(KeyCode::Enter, None, Action::EnterSelected),
        bind(KeyCode::Backspace, None, Action::GoToParent),
        // 기록
        bind(KeyCode::Char('['), plain, Action::HistoryBack),
        bind(KeyCode::Char(']'), plain, Action::HistoryForward),
        // 파일 작업
        bind(KeyCode::Char('c'), plain, Action::Copy),
        bind(KeyCode::F(5), None, Action::Copy),
        bind(KeyCode::Char('m'), plain, Action::Move),
        bind(KeyCode::F(6), None, Action::Move),
        bind(KeyCode::Char('n'), plain, Action::MakeDirectory),
        bind(KeyCode::F(7), None, Action::MakeDirectory),
        bind(KeyCode::Char('d'), plain, Action::Delete),
        bind(KeyCode::Delete, None, Action::Delete),
        bind(KeyCode::F(8), None, Action::Delete),
        bind(KeyCode::Char('o'), plain, Action::OpenDefaultApp),
        bind(KeyCode::Char('i'), plain, Action::ShowProperties),
        // 보기
        bind(KeyCode::Char('/'), plain, Action::StartSearch),
        bind(KeyCode::Char('.'), plain, Action::ToggleHidden),
        bind(
            KeyCode::Char('r'),
            Some(KeyModifiers::CONTROL),
            Action::Refresh,
        ),
        bind(KeyCode::Char('t'), plain, Action::ToggleTheme),
        // 시스템
        bind(KeyCode::Char('?'), None, Action::ShowHelp),
        bind(KeyCode::F(1), None, Action::ShowHelp),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

fn build_sequence_bindings() -> Vec<SequenceBinding> {
    vec![
        SequenceBinding {
            prefix: 'g',
            key: 'g',
            action: Action::GoToTop,
        },
        SequenceBinding {
            prefix: 'g',
            key: 'p',
            action: Action::GoToPath,
        },
    ]
}

static SEQUENCE_BINDINGS: LazyLock<Vec<SequenceBinding>> = LazyLock::new(build_sequence_bindings);

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    SEQUENCE_BINDINGS
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    SEQUENCE_BINDINGS.iter().any(|binding| binding.prefix == c)
}

impl Action {
    /// 로그에 남기는 액션 식별자
    pub fn id(&self) -> &'static str {
        ACTION_DEFS
            .iter()
            .find(|d| d.action == *self)
            .map(|d| d.id)
            .unwrap_or("unknown")
    }
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    [
        ActionCategory::Navigation,
        ActionCategory::FileOperation,
        ActionCategory::View,
        ActionCategory::System,
    ]
    .iter()
    .map(|category| {
        let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
            .iter()
            .filter(|d| d.category == *category)
            .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
            .collect();
        (category.title(), items)
    })
    .filter(|(_, items)| !items.is_empty())
    .collect()
}
