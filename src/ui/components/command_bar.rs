// Command bar component - 하단 커맨드 바
//
// 주요 단축키 표시 (항목은 액션 레지스트리에서 생성)

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 커맨드 항목
#[derive(Debug, Clone)]
pub struct CommandItem {
    /// 단축키 (F1, F5, ...)
    pub key: String,
    /// 레이블 (Help, Copy, ...)
    pub label: String,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// "F5:Copy" 형태의 표시 폭
    fn width(&self) -> usize {
        self.key.width() + 1 + self.label.width()
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar<'a> {
    commands: &'a [CommandItem],
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
}

impl<'a> CommandBar<'a> {
    pub fn new(commands: &'a [CommandItem]) -> Self {
        Self {
            commands,
            bg_color: Color::Rgb(30, 30, 30),
            key_fg_color: Color::Rgb(0, 120, 212),
            label_fg_color: Color::Rgb(212, 212, 212),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg.to_color();
        self.key_fg_color = theme.accent.to_color();
        self.label_fg_color = theme.command_bar_fg.to_color();
        self
    }

    /// 폭 안에 들어가는 앞쪽 항목 수
    fn visible_count(&self, width: usize) -> usize {
        let mut used = 1;
        let mut count = 0;
        for cmd in self.commands {
            let needed = cmd.width() + if count > 0 { 1 } else { 0 };
            if used + needed > width {
                break;
            }
            used += needed;
            count += 1;
        }
        count
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let key_style = Style::default()
            .fg(self.key_fg_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.label_fg_color);

        let visible = self.visible_count(area.width as usize);
        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().take(visible).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(cmd.key.as_str(), key_style));
            spans.push(Span::styled(":", label_style));
            spans.push(Span::styled(cmd.label.as_str(), label_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::row_text;

    #[test]
    fn test_render_items() {
        let items = vec![CommandItem::new("F1", "Help"), CommandItem::new("q", "Quit")];
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        CommandBar::new(&items).render(area, &mut buf);

        assert!(row_text(&buf, 0).starts_with(" F1:Help q:Quit"));
    }

    #[test]
    fn test_items_that_do_not_fit_are_dropped() {
        let items = vec![
            CommandItem::new("F1", "Help"),
            CommandItem::new("F5", "Copy"),
            CommandItem::new("F6", "Move"),
        ];
        let bar = CommandBar::new(&items);
        assert_eq!(bar.visible_count(100), 3);
        assert_eq!(bar.visible_count(16), 2);
        assert_eq!(bar.visible_count(3), 0);
    }
}
