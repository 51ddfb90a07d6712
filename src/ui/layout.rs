// Layout system - 반응형 레이아웃
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 트리 + 목록 분할
// - 40-79 cols: 포커스된 패널만 표시 (Tab으로 전환)
// - <40 cols 또는 15 rows 미만: 경고 화면

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 15;
pub const SPLIT_MIN_WIDTH: u16 = 80;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 트리와 목록을 나란히 표시
    Split,
    /// 포커스된 패널 하나만 표시
    Single,
    /// 터미널이 너무 작음
    TooSmall,
}

/// 입력 포커스가 있는 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Tree,
    #[default]
    Listing,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Focus::Tree => Focus::Listing,
            Focus::Listing => Focus::Tree,
        };
    }
}

/// 트리:목록 폭 비율 (%)
#[derive(Debug, Clone, Copy)]
pub struct PanelRatio {
    pub tree: u16,
    pub listing: u16,
}

impl Default for PanelRatio {
    fn default() -> Self {
        Self {
            tree: 30,
            listing: 70,
        }
    }
}

/// 계산된 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 현재 경로 바
    pub path_bar: Rect,
    pub tree_panel: Rect,
    pub listing_panel: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// TooSmall 모드에서만 사용
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    ratio: PanelRatio,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::Split,
            ratio: PanelRatio::default(),
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < SPLIT_MIN_WIDTH {
            LayoutMode::Single
        } else {
            LayoutMode::Split
        }
    }

    /// 터미널 크기 반영 후 영역 재계산
    pub fn update(&mut self, area: Rect, focus: Focus) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = self.calculate_areas(area, focus);
    }

    fn calculate_areas(&self, area: Rect, focus: Focus) -> LayoutAreas {
        if self.mode == LayoutMode::TooSmall {
            return LayoutAreas {
                warning: area,
                ..Default::default()
            };
        }

        // 경로 바 | 패널 | 상태바 | 커맨드바
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let panel_area = vertical_chunks[1];
        let (tree_panel, listing_panel) = match self.mode {
            LayoutMode::Split => {
                let panel_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(self.ratio.tree),
                        Constraint::Percentage(self.ratio.listing),
                    ])
                    .split(panel_area);
                (panel_chunks[0], panel_chunks[1])
            }
            _ => match focus {
                Focus::Tree => (panel_area, Rect::default()),
                Focus::Listing => (Rect::default(), panel_area),
            },
        };

        LayoutAreas {
            path_bar: vertical_chunks[0],
            tree_panel,
            listing_panel,
            status_bar: vertical_chunks[2],
            command_bar: vertical_chunks[3],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// 목록 패널에 표시 가능한 행 수 (테두리, 헤더 2줄 제외)
    pub fn listing_rows(&self) -> usize {
        (self.areas.listing_panel.height as usize).saturating_sub(4)
    }

    /// 트리 패널에 표시 가능한 행 수 (테두리 제외)
    pub fn tree_rows(&self) -> usize {
        (self.areas.tree_panel.height as usize).saturating_sub(2)
    }
}
