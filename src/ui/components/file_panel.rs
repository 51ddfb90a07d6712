// File panel - 디렉토리 목록 패널
//
// 컬럼: Name | Type | Size | Modified
// 좁은 폭에서는 Type, Modified 컬럼을 생략합니다.

use crate::models::FileEntry;
use crate::ui::Theme;
use crate::utils::formatter::{fit_width, format_date, format_file_size};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TYPE_WIDTH: usize = 8;
const SIZE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 16;
/// 이 폭 미만이면 Type/Modified 생략
const FULL_COLUMNS_MIN_WIDTH: usize = 56;

/// 컬럼 레이아웃 계산 결과
struct ColumnLayout {
    name_width: usize,
    show_type: bool,
    show_date: bool,
}

pub struct FilePanel<'a> {
    title: &'a str,
    entries: &'a [FileEntry],
    selected_index: usize,
    scroll_offset: usize,
    /// 검색 결과면 이름 대신 기준 디렉토리 기준 상대 경로 표시
    search_base: Option<&'a Path>,
    /// 엔트리가 없을 때 표시할 문구
    empty_message: &'a str,
    focused: bool,
    bg_color: Color,
    fg_color: Color,
    header_color: Color,
    directory_color: Color,
    hidden_color: Color,
    active_border: Color,
    inactive_border: Color,
    selected_fg: Color,
    selected_bg: Color,
    selected_inactive_bg: Color,
    muted_color: Color,
}

impl<'a> FilePanel<'a> {
    pub fn new(entries: &'a [FileEntry]) -> Self {
        Self {
            title: "",
            entries,
            selected_index: 0,
            scroll_offset: 0,
            search_base: None,
            empty_message: "(Empty directory)",
            focused: true,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            header_color: Color::Rgb(150, 150, 150),
            directory_color: Color::Rgb(86, 156, 214),
            hidden_color: Color::Rgb(128, 128, 128),
            active_border: Color::Rgb(0, 120, 212),
            inactive_border: Color::Rgb(60, 60, 60),
            selected_fg: Color::White,
            selected_bg: Color::Rgb(0, 120, 212),
            selected_inactive_bg: Color::Rgb(58, 61, 65),
            muted_color: Color::Rgb(100, 100, 100),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn search_base(mut self, base: Option<&'a Path>) -> Self {
        self.search_base = base;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.file_normal.to_color();
        self.header_color = theme.panel_header.to_color();
        self.directory_color = theme.directory.to_color();
        self.hidden_color = theme.hidden.to_color();
        self.active_border = theme.panel_active_border.to_color();
        self.inactive_border = theme.panel_inactive_border.to_color();
        self.selected_fg = theme.file_selected.to_color();
        self.selected_bg = theme.file_selected_bg.to_color();
        self.selected_inactive_bg = theme.file_selected_inactive_bg.to_color();
        self.muted_color = theme.muted.to_color();
        self
    }

    fn calculate_column_layout(width: usize, has_scrollbar: bool) -> ColumnLayout {
        // 앞 여백 1칸, 스크롤바 1칸
        let usable = width.saturating_sub(1 + usize::from(has_scrollbar));
        let full = usable >= FULL_COLUMNS_MIN_WIDTH;

        let mut fixed = 1 + SIZE_WIDTH;
        if full {
            fixed += (1 + TYPE_WIDTH) + (1 + DATE_WIDTH);
        }

        ColumnLayout {
            name_width: usable.saturating_sub(fixed),
            show_type: full,
            show_date: full,
        }
    }

    /// 표시할 이름 (검색 결과는 상대 경로)
    fn display_name(&self, entry: &FileEntry) -> String {
        match self.search_base {
            Some(base) => entry
                .path
                .strip_prefix(base)
                .map(|rel| rel.to_string_lossy().to_string())
                .unwrap_or_else(|_| entry.name.clone()),
            None => entry.name.clone(),
        }
    }

    fn render_header(&self, layout: &ColumnLayout, inner: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(self.header_color)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(fit_width("Name", layout.name_width), header_style),
        ];
        if layout.show_type {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(fit_width("Type", TYPE_WIDTH), header_style));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{:>width$}", "Size", width = SIZE_WIDTH),
            header_style,
        ));
        if layout.show_date {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(fit_width("Modified", DATE_WIDTH), header_style));
        }
        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);

        let separator = "─".repeat(inner.width as usize);
        buf.set_string(
            inner.x,
            inner.y + 1,
            separator,
            Style::default().fg(self.inactive_border),
        );
    }

    fn render_entry(
        &self,
        entry: &FileEntry,
        is_cursor: bool,
        layout: &ColumnLayout,
        inner: Rect,
        buf: &mut Buffer,
        y: u16,
    ) {
        let fg = if is_cursor && self.focused {
            self.selected_fg
        } else if entry.is_hidden {
            self.hidden_color
        } else if entry.is_directory() {
            self.directory_color
        } else {
            self.fg_color
        };
        let mut style = Style::default().fg(fg);
        if is_cursor {
            style = style.bg(if self.focused {
                self.selected_bg
            } else {
                self.selected_inactive_bg
            });
        }

        let name = if entry.is_directory() {
            format!("{}/", self.display_name(entry))
        } else {
            self.display_name(entry)
        };
        let name = truncate_name(&name, layout.name_width);

        let mut spans = vec![
            Span::styled(" ", style),
            Span::styled(fit_width(&name, layout.name_width), style),
        ];
        if layout.show_type {
            spans.push(Span::styled(" ", style));
            spans.push(Span::styled(
                fit_width(&entry.type_label(), TYPE_WIDTH),
                style,
            ));
        }

        let size = if entry.is_directory() {
            "-".to_string()
        } else {
            format_file_size(entry.size)
        };
        spans.push(Span::styled(" ", style));
        spans.push(Span::styled(
            format!("{:>width$}", size, width = SIZE_WIDTH),
            style,
        ));

        if layout.show_date {
            spans.push(Span::styled(" ", style));
            spans.push(Span::styled(format_date(entry.modified), style));
        }

        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let padding = (inner.width as usize).saturating_sub(used);
        spans.push(Span::styled(" ".repeat(padding), style));

        buf.set_line(inner.x, y, &Line::from(spans), inner.width);
    }

    fn render_scrollbar(&self, inner: Rect, buf: &mut Buffer, track_height: usize) {
        let total_items = self.entries.len();
        if track_height == 0 || total_items == 0 {
            return;
        }

        let thumb_height = (track_height * track_height / total_items).max(1);
        let max_scroll = total_items.saturating_sub(track_height);
        let thumb_pos = if max_scroll == 0 {
            0
        } else {
            self.scroll_offset.min(max_scroll) * track_height.saturating_sub(thumb_height)
                / max_scroll
        };

        let x = inner.x + inner.width - 1;
        let track_start_y = inner.y + 2;
        let track_style = Style::default().fg(self.inactive_border);
        let thumb_style = Style::default().fg(self.header_color);

        for i in 0..track_height {
            let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                ("┃", thumb_style)
            } else {
                ("│", track_style)
            };
            buf.set_string(x, track_start_y + i as u16, symbol, style);
        }
    }
}

impl Widget for FilePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border = if self.focused {
            self.active_border
        } else {
            self.inactive_border
        };
        let title_max = (area.width as usize).saturating_sub(4);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ", truncate_name(self.title, title_max)),
                Style::default().fg(self.fg_color).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 {
            return;
        }

        let rows_height = (inner.height as usize).saturating_sub(2);
        let has_scrollbar = self.entries.len() > rows_height;
        let layout = Self::calculate_column_layout(inner.width as usize, has_scrollbar);

        self.render_header(&layout, inner, buf);

        if self.entries.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y + 2,
                self.empty_message,
                Style::default().fg(self.muted_color),
            );
            return;
        }

        for (i, entry) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(rows_height)
        {
            let y = inner.y + 2 + (i - self.scroll_offset) as u16;
            self.render_entry(entry, i == self.selected_index, &layout, inner, buf, y);
        }

        if has_scrollbar {
            self.render_scrollbar(inner, buf, rows_height);
        }
    }
}

/// 최대 폭에 맞게 이름 줄이기 (확장자 보존)
///
/// "very_long_fi....txt" 처럼 가운데를 생략한다.
/// 확장자가 없거나 숨김 파일(.bashrc)이면 끝을 자른다.
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.len();

    let (stem, ext) = match name.rfind('.') {
        Some(dot_pos) if dot_pos > 0 && !name.ends_with('/') => {
            (&name[..dot_pos], &name[dot_pos..])
        }
        _ => (name, ""),
    };

    // 확장자를 살릴 공간이 없으면 끝에서 자름
    let keep_ext = !ext.is_empty() && ellipsis_width + ext.width() < max_width;
    let (head_source, tail, head_budget) = if keep_ext {
        (stem, ext, max_width - ellipsis_width - ext.width())
    } else {
        (name, "", max_width.saturating_sub(ellipsis_width))
    };

    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in head_source.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if current_width + ch_width > head_budget {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }
    truncated.push_str(ELLIPSIS);
    truncated.push_str(tail);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use crate::ui::components::row_text;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn entry(name: &str, kind: EntryKind, size: u64) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: PathBuf::from("/base").join(name),
            kind,
            size,
            modified: SystemTime::UNIX_EPOCH,
            created: SystemTime::UNIX_EPOCH,
            is_hidden: name.starts_with('.'),
        }
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("test.txt", 20), "test.txt");

        let truncated = truncate_name("very_long_filename_that_should_be_truncated.txt", 20);
        assert!(truncated.contains("..."));
        assert!(truncated.ends_with(".txt"));
        assert_eq!(truncated.width(), 20);

        assert!(truncate_name("very_long_filename_without_extension", 15).ends_with("..."));
        assert!(truncate_name(".very_long_hidden_config_file", 15).ends_with("..."));
    }

    #[test]
    fn test_column_layout() {
        let wide = FilePanel::calculate_column_layout(80, false);
        assert!(wide.show_type && wide.show_date);
        assert_eq!(wide.name_width, 79 - (1 + SIZE_WIDTH + 1 + TYPE_WIDTH + 1 + DATE_WIDTH));

        let narrow = FilePanel::calculate_column_layout(40, true);
        assert!(!narrow.show_type && !narrow.show_date);
        assert_eq!(narrow.name_width, 38 - (1 + SIZE_WIDTH));
    }

    #[test]
    fn test_render_rows() {
        let entries = vec![
            entry("docs", EntryKind::Directory, 0),
            entry("readme.md", EntryKind::File, 2048),
        ];
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        FilePanel::new(&entries).title("/base").render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Name"));
        assert!(row_text(&buf, 1).contains("Modified"));
        let dir_row = row_text(&buf, 3);
        assert!(dir_row.contains("docs/"));
        assert!(dir_row.contains("Folder"));
        let file_row = row_text(&buf, 4);
        assert!(file_row.contains("readme.md"));
        assert!(file_row.contains("MD"));
        assert!(file_row.contains("2.0 KB"));
    }

    #[test]
    fn test_search_results_show_relative_path() {
        let mut found = entry("hit.log", EntryKind::File, 1);
        found.path = PathBuf::from("/base/sub/hit.log");
        let entries = vec![found];

        let base = PathBuf::from("/base");
        let panel = FilePanel::new(&entries).search_base(Some(&base));
        assert_eq!(panel.display_name(&entries[0]), "sub/hit.log");
    }

    #[test]
    fn test_empty_message() {
        let entries: Vec<FileEntry> = Vec::new();
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        FilePanel::new(&entries)
            .empty_message("(No matches)")
            .render(area, &mut buf);
        assert!(row_text(&buf, 3).contains("(No matches)"));
    }
}
