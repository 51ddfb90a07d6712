use super::DialogKind;
use crate::core::actions::generate_help_entries;
use crate::ui::components::file_panel::truncate_name;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
    error_color: Color,
    muted_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
            error_color: Color::Rgb(244, 71, 71),
            muted_color: Color::Rgb(128, 128, 128),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.panel_active_border.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.file_selected_bg.to_color();
        self.button_selected_fg = theme.file_selected.to_color();
        self.input_bg = theme.bg_primary.to_color();
        self.error_color = theme.error.to_color();
        self.muted_color = theme.muted.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { .. } => (((sw as f32 * 0.6) as u16).clamp(44, 90), 7u16),
            DialogKind::Confirm { message, .. } => {
                let lines = message.lines().count().max(1) as u16;
                (50u16.min(sw.saturating_sub(4)).max(30), 6 + lines)
            }
            DialogKind::Error { message, .. } | DialogKind::Message { message, .. } => {
                let lines = message.lines().count().max(1) as u16;
                let w = 56u16.min(sw.saturating_sub(4)).max(30);
                (w, (6 + lines).min(sh.saturating_sub(4)).max(6))
            }
            DialogKind::Properties { rows, .. } => {
                let w = 72u16.min(sw.saturating_sub(8)).max(40);
                (w, rows.len() as u16 + 5)
            }
            DialogKind::Help { .. } => {
                let w = 60u16.min(sw.saturating_sub(4)).max(40);
                (w, sh.saturating_sub(4).max(12))
            }
        };

        let width = width.min(sw.saturating_sub(2));
        let height = height.min(sh.saturating_sub(2));

        Rect {
            x: screen.x + (sw.saturating_sub(width)) / 2,
            y: screen.y + (sh.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// 테두리와 제목을 그리고 패딩을 뺀 내부 영역 반환
    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, is_error: bool) -> Rect {
        let (title_color, border_color) = if is_error {
            (self.error_color, self.error_color)
        } else {
            (self.title_color, self.border_color)
        };
        Block::default()
            .title(format!(" {} ", title))
            .title_style(
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 렌더링 헬퍼, 그린 폭 반환
    fn render_button(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        label: &str,
        is_selected: bool,
    ) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };

        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        buf.set_string(x, y, &padded_label, Style::default().fg(fg).bg(bg));
        width
    }

    /// 하단 중앙 OK / Cancel
    fn render_ok_cancel(&self, buf: &mut Buffer, area: Rect, selected_button: usize) {
        let button_y = area.y + area.height.saturating_sub(2);
        let buttons_width = (" OK ".width() + 2 + " Cancel ".width()) as u16;
        let x = area.x + area.width.saturating_sub(buttons_width) / 2;

        let ok_width = self.render_button(buf, x, button_y, "OK", selected_button == 0);
        self.render_button(buf, x + ok_width + 2, button_y, "Cancel", selected_button == 1);
    }

    fn render_ok(&self, buf: &mut Buffer, area: Rect) {
        let button_y = area.y + area.height.saturating_sub(2);
        let x = area.x + area.width.saturating_sub(" OK ".width() as u16) / 2;
        self.render_button(buf, x, button_y, "OK", true);
    }

    #[allow(clippy::too_many_arguments)]
    fn render_input(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        prompt: &str,
        value: &str,
        cursor_pos: usize,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, false);
        buf.set_string(inner.x, inner.y, prompt, Style::default().fg(self.fg_color));

        let input_y = inner.y + 1;
        let input_width = inner.width as usize;
        for x in inner.x..inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((x, input_y)) {
                cell.set_bg(self.input_bg);
            }
        }

        let (visible, cursor_col) =
            visible_input(value, cursor_pos, input_width.saturating_sub(2));
        let value_style = Style::default().fg(self.fg_color).bg(self.input_bg);
        buf.set_string(inner.x + 1, input_y, visible, value_style);

        let cursor_x = inner.x + 1 + cursor_col as u16;
        if cursor_x < inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
                if cursor_pos < value.len() {
                    cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
                } else {
                    cell.set_char('▏');
                    cell.set_style(value_style);
                }
            }
        }

        self.render_ok_cancel(buf, area, selected_button);
    }

    fn render_confirm(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        selected_button: usize,
    ) {
        let inner = self.frame(buf, area, title, false);
        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        self.render_ok_cancel(buf, area, selected_button);
    }

    fn render_message(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        message: &str,
        is_error: bool,
    ) {
        let inner = self.frame(buf, area, title, is_error);
        let msg_area = Rect {
            height: inner.height.saturating_sub(2),
            ..inner
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(msg_area, buf);

        self.render_ok(buf, area);
    }

    fn render_properties(
        &self,
        buf: &mut Buffer,
        area: Rect,
        title: &str,
        rows: &[(String, String)],
    ) {
        let inner = self.frame(buf, area, title, false);
        let label_width = 12u16;
        let value_width = inner.width.saturating_sub(label_width) as usize;

        let label_style = Style::default().fg(self.muted_color);
        let value_style = Style::default().fg(self.fg_color);
        let last_row_y = area.y + area.height.saturating_sub(3);

        for (i, (label, value)) in rows.iter().enumerate() {
            let y = inner.y + i as u16;
            if y > last_row_y {
                break;
            }
            buf.set_string(inner.x, y, label, label_style);
            buf.set_string(
                inner.x + label_width,
                y,
                truncate_name(value, value_width),
                value_style,
            );
        }

        self.render_ok(buf, area);
    }

    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        let inner = self.frame(buf, area, "Keyboard Shortcuts", false);

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.title_color);
        let desc_style = Style::default().fg(self.fg_color);

        let rows = help_rows();
        // 하단 힌트 1줄 예약
        let visible_height = inner.height.saturating_sub(1) as usize;
        let max_scroll = rows.len().saturating_sub(visible_height);
        let scroll = scroll_offset.min(max_scroll);
        let key_col_width = 16u16;

        for (i, row) in rows.iter().skip(scroll).take(visible_height).enumerate() {
            let y = inner.y + i as u16;
            match row {
                HelpRow::Header(title) => {
                    buf.set_string(inner.x, y, title, header_style);
                }
                HelpRow::Binding(key, desc) => {
                    buf.set_string(inner.x + 2, y, key, key_style);
                    buf.set_string(inner.x + key_col_width, y, desc, desc_style);
                }
                HelpRow::Blank => {}
            }
        }

        let hint = "j/k: scroll  Esc: close";
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height.saturating_sub(2),
            hint,
            Style::default().fg(self.muted_color),
        );
    }
}

/// 도움말 한 줄
#[derive(Debug, PartialEq, Eq)]
enum HelpRow {
    Header(&'static str),
    Binding(&'static str, &'static str),
    Blank,
}

/// 액션 레지스트리에서 도움말 행 생성
fn help_rows() -> Vec<HelpRow> {
    let mut rows = Vec::new();
    for (category, items) in generate_help_entries() {
        if !rows.is_empty() {
            rows.push(HelpRow::Blank);
        }
        rows.push(HelpRow::Header(category));
        rows.extend(items.into_iter().map(|(key, desc)| HelpRow::Binding(key, desc)));
    }
    rows
}

/// 도움말 스크롤 최대값 계산용 전체 행 수
pub fn help_row_count() -> usize {
    help_rows().len()
}

/// 입력 필드 표시 범위 계산
///
/// 커서가 보이도록 앞부분을 잘라낸 문자열과 커서의 표시 열을 반환한다.
fn visible_input(value: &str, cursor_pos: usize, max_width: usize) -> (&str, usize) {
    let cursor_col: usize = value[..cursor_pos]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum();
    if cursor_col < max_width {
        return (value, cursor_col);
    }

    // 커서를 오른쪽 끝에 두도록 앞에서 잘라낼 폭
    let skip_width = cursor_col + 1 - max_width;
    let mut skipped = 0;
    for (i, c) in value.char_indices() {
        if skipped >= skip_width {
            return (&value[i..], cursor_col - skipped);
        }
        skipped += c.width().unwrap_or(0);
    }
    ("", 0)
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Input {
                title,
                prompt,
                value,
                cursor_pos,
                selected_button,
                ..
            } => self.render_input(
                buf,
                dialog_area,
                title,
                prompt,
                value,
                *cursor_pos,
                *selected_button,
            ),
            DialogKind::Confirm {
                title,
                message,
                selected_button,
            } => self.render_confirm(buf, dialog_area, title, message, *selected_button),
            DialogKind::Error { title, message } => {
                self.render_message(buf, dialog_area, title, message, true)
            }
            DialogKind::Message { title, message } => {
                self.render_message(buf, dialog_area, title, message, false)
            }
            DialogKind::Properties { title, rows } => {
                self.render_properties(buf, dialog_area, title, rows)
            }
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset)
            }
        }
    }
}
