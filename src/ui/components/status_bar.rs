// Status bar component - 상태바
//
// 목록의 파일/디렉토리 개수와 총 크기, 목록 상태 메시지, 보기 옵션 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    file_count: usize,
    dir_count: usize,
    /// 총 크기 (포맷된 문자열)
    total_size: &'a str,
    /// "Empty directory", "Permission denied" 같은 목록 상태
    notice: Option<&'a str>,
    /// 검색 결과 표시 중이면 검색어
    search_query: Option<&'a str>,
    show_hidden: bool,
    bg_color: Color,
    fg_color: Color,
    notice_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            total_size: "0 B",
            notice: None,
            search_query: None,
            show_hidden: true,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            notice_color: Color::Yellow,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    pub fn total_size(mut self, size: &'a str) -> Self {
        self.total_size = size;
        self
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn search_query(mut self, query: Option<&'a str>) -> Self {
        self.search_query = query;
        self
    }

    pub fn show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.notice_color = theme.warning.to_color();
        self
    }

    fn left_text(&self) -> String {
        let mut text = format!(
            " {} dirs, {} files | {}",
            self.dir_count, self.file_count, self.total_size
        );
        if let Some(query) = self.search_query {
            text.push_str(&format!(" | search: \"{}\"", query));
        }
        text
    }

    fn right_text(&self) -> String {
        let hidden = if self.show_hidden { "on" } else { "off" };
        format!("[hidden: {}] ", hidden)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left_info = self.left_text();
        let notice_info = self
            .notice
            .map(|notice| format!(" | {}", notice))
            .unwrap_or_default();
        let right_info = self.right_text();

        let used = left_info.width() + notice_info.width() + right_info.width();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let spans = vec![
            Span::styled(left_info, Style::default().fg(self.fg_color)),
            Span::styled(notice_info, Style::default().fg(self.notice_color)),
            Span::raw(padding),
            Span::styled(right_info, Style::default().fg(self.fg_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::row_text;

    #[test]
    fn test_status_bar_text() {
        let bar = StatusBar::new()
            .file_count(10)
            .dir_count(5)
            .total_size("1.2 GB")
            .search_query(Some("log"));

        assert_eq!(bar.left_text(), " 5 dirs, 10 files | 1.2 GB | search: \"log\"");
        assert_eq!(bar.right_text(), "[hidden: on] ");
    }

    #[test]
    fn test_notice_rendered() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new()
            .notice(Some("Empty directory"))
            .show_hidden(false)
            .render(area, &mut buf);

        let text = row_text(&buf, 0);
        assert!(text.contains("| Empty directory"));
        assert!(text.trim_end().ends_with("[hidden: off]"));
    }
}
