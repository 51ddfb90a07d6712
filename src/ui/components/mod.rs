// UI Components
pub mod command_bar;
pub mod dialog;
pub mod file_panel;
pub mod path_bar;
pub mod status_bar;
pub mod tree_panel;
pub mod warning;

pub use command_bar::{CommandBar, CommandItem};
pub use dialog::{help_row_count, Dialog, DialogKind, InputPurpose};
pub use file_panel::FilePanel;
pub use path_bar::PathBar;
pub use status_bar::StatusBar;
pub use tree_panel::TreePanel;
pub use warning::WarningScreen;

/// 버퍼의 한 행을 문자열로 (위젯 테스트용)
#[cfg(test)]
pub(crate) fn row_text(buf: &ratatui::buffer::Buffer, y: u16) -> String {
    (0..buf.area.width)
        .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
        .collect()
}
