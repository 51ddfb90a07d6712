// Tree panel - 디렉토리 트리 패널
//
// 펼쳐진 노드만 들여쓰기로 표시합니다. 아직 읽지 않은 노드는 ▸ 표시를 가집니다.

use crate::models::{DirectoryTree, NodeId, TreeNode};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

const INDENT: usize = 2;

pub struct TreePanel<'a> {
    tree: &'a DirectoryTree,
    /// `DirectoryTree::visible_rows` 결과
    rows: &'a [(NodeId, usize)],
    cursor: usize,
    scroll_offset: usize,
    /// 현재 디렉토리 노드
    current: Option<NodeId>,
    focused: bool,
    bg_color: Color,
    fg_color: Color,
    directory_color: Color,
    hidden_color: Color,
    guide_color: Color,
    active_border: Color,
    inactive_border: Color,
    selected_fg: Color,
    selected_bg: Color,
    selected_inactive_bg: Color,
}

impl<'a> TreePanel<'a> {
    pub fn new(tree: &'a DirectoryTree, rows: &'a [(NodeId, usize)]) -> Self {
        Self {
            tree,
            rows,
            cursor: 0,
            scroll_offset: 0,
            current: None,
            focused: false,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            directory_color: Color::Rgb(86, 156, 214),
            hidden_color: Color::Rgb(128, 128, 128),
            guide_color: Color::Rgb(75, 75, 75),
            active_border: Color::Rgb(0, 120, 212),
            inactive_border: Color::Rgb(60, 60, 60),
            selected_fg: Color::White,
            selected_bg: Color::Rgb(0, 120, 212),
            selected_inactive_bg: Color::Rgb(58, 61, 65),
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn current(mut self, current: Option<NodeId>) -> Self {
        self.current = current;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.panel_bg.to_color();
        self.fg_color = theme.file_normal.to_color();
        self.directory_color = theme.directory.to_color();
        self.hidden_color = theme.hidden.to_color();
        self.guide_color = theme.tree_guide.to_color();
        self.active_border = theme.panel_active_border.to_color();
        self.inactive_border = theme.panel_inactive_border.to_color();
        self.selected_fg = theme.file_selected.to_color();
        self.selected_bg = theme.file_selected_bg.to_color();
        self.selected_inactive_bg = theme.file_selected_inactive_bg.to_color();
        self
    }

    fn marker(node: &TreeNode) -> &'static str {
        if !node.may_have_children() {
            "  "
        } else if node.expanded {
            "▾ "
        } else {
            "▸ "
        }
    }

    fn render_row(
        &self,
        node_id: NodeId,
        depth: usize,
        is_cursor: bool,
        area: Rect,
        buf: &mut Buffer,
        y: u16,
    ) {
        let Some(node) = self.tree.node(node_id) else {
            return;
        };

        let is_current = self.current == Some(node_id);
        let base_fg = if node.name.starts_with('.') {
            self.hidden_color
        } else {
            self.directory_color
        };

        let mut name_style = Style::default().fg(base_fg);
        if is_current {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        let mut guide_style = Style::default().fg(self.guide_color);
        let row_bg = if is_cursor {
            Some(if self.focused {
                self.selected_bg
            } else {
                self.selected_inactive_bg
            })
        } else {
            None
        };
        if let Some(bg) = row_bg {
            name_style = name_style.bg(bg);
            guide_style = guide_style.bg(bg);
            if self.focused {
                name_style = name_style.fg(self.selected_fg);
            }
        }

        let indent = " ".repeat(depth * INDENT);
        let marker = Self::marker(node);
        let used = 1 + indent.width() + marker.width() + node.name.width();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(" ", guide_style),
            Span::styled(indent, guide_style),
            Span::styled(marker, guide_style),
            Span::styled(node.name.as_str(), name_style),
            Span::styled(" ".repeat(padding), guide_style),
        ]);
        buf.set_line(area.x, y, &line, area.width);
    }
}

impl Widget for TreePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let border = if self.focused {
            self.active_border
        } else {
            self.inactive_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(" Folders ", Style::default().fg(self.fg_color)))
            .style(Style::default().bg(self.bg_color));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        for (i, &(node_id, depth)) in self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible)
        {
            let y = inner.y + (i - self.scroll_offset) as u16;
            self.render_row(node_id, depth, i == self.cursor, inner, buf, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::FileSystem;
    use crate::ui::components::row_text;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_expanded_tree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("alpha/inner")).unwrap();
        fs::create_dir(temp.path().join("beta")).unwrap();

        let filesystem = FileSystem::new();
        let mut tree = DirectoryTree::new(temp.path().to_path_buf(), true);
        let root = tree.root();
        tree.expand(&filesystem, root);
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 3);

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        TreePanel::new(&tree, &rows)
            .cursor(1)
            .focused(true)
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("▾ "));
        // 자식은 한 단계 들여쓰기되고, 읽지 않은 alpha는 ▸ 표시
        assert!(row_text(&buf, 2).starts_with("│   ▸ alpha"));
        assert!(row_text(&buf, 3).starts_with("│   ▸ beta"));
    }

    #[test]
    fn test_scroll_offset_skips_rows() {
        let temp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }

        let filesystem = FileSystem::new();
        let mut tree = DirectoryTree::new(temp.path().to_path_buf(), true);
        let root = tree.root();
        tree.expand(&filesystem, root);
        let rows = tree.visible_rows();

        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        TreePanel::new(&tree, &rows)
            .scroll_offset(2)
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("b"));
        assert!(row_text(&buf, 2).contains("c"));
    }
}
