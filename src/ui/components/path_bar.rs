// Path bar - 상단 현재 위치 표시 (뒤로/앞으로 가능 여부 포함)

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct PathBar<'a> {
    path: &'a str,
    can_go_back: bool,
    can_go_forward: bool,
    bg_color: Color,
    fg_color: Color,
    muted_color: Color,
}

impl<'a> PathBar<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            can_go_back: false,
            can_go_forward: false,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::White,
            muted_color: Color::Rgb(100, 100, 100),
        }
    }

    pub fn history(mut self, can_go_back: bool, can_go_forward: bool) -> Self {
        self.can_go_back = can_go_back;
        self.can_go_forward = can_go_forward;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.path_bar_bg.to_color();
        self.fg_color = theme.path_bar_fg.to_color();
        self.muted_color = theme.muted.to_color();
        self
    }
}

/// 앞부분을 "..."로 줄여 경로 끝이 보이게 함
pub fn truncate_path_start(path: &str, max_width: usize) -> String {
    if path.width() <= max_width {
        return path.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for ch in path.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        tail.push(ch);
        used += w;
    }
    tail.reverse();
    format!("...{}", tail.into_iter().collect::<String>())
}

impl Widget for PathBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let arrow_style = |enabled: bool| {
            if enabled {
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.muted_color)
            }
        };

        // " < > " 5칸 + 양쪽 여백 1칸
        let path_width = (area.width as usize).saturating_sub(6);
        let spans = vec![
            Span::raw(" "),
            Span::styled("<", arrow_style(self.can_go_back)),
            Span::raw(" "),
            Span::styled(">", arrow_style(self.can_go_forward)),
            Span::raw("  "),
            Span::styled(
                truncate_path_start(self.path, path_width),
                Style::default().fg(self.fg_color),
            ),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::row_text;

    #[test]
    fn test_truncate_path_start() {
        assert_eq!(truncate_path_start("/home/user", 20), "/home/user");
        assert_eq!(
            truncate_path_start("/very/long/path/to/project", 12),
            "...o/project"
        );
        assert_eq!(truncate_path_start("/abc", 2), "..");
    }

    #[test]
    fn test_render_path() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        PathBar::new("/tmp/work").history(true, false).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with(" < >  /tmp/work"));
    }
}
