//! 브라우저 세션
//!
//! 트리, 목록, 탐색 기록을 한곳에서 소유하고 탐색 규칙을 적용합니다.
//! - 명시적 탐색(트리 선택, 행 열기, 경로 이동)만 기록에 남긴다.
//! - 뒤로/앞으로, 새로고침, 작업 후 갱신은 기록을 바꾸지 않는다.

use crate::models::{DirectoryListing, DirectoryTree, ListingStatus, NavigationHistory, NodeId};
use crate::system::{FileProperties, FileSystem};
use crate::utils::error::{DirscopeError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 세션 생성 옵션
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub show_hidden: bool,
    /// back 스택 최대 길이 (0이면 무제한)
    pub history_limit: usize,
    /// None이면 파일 시스템 루트들을 트리 최상위로 사용
    pub tree_root: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_hidden: true,
            history_limit: 100,
            tree_root: None,
        }
    }
}

/// 목록 행을 열었을 때의 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    /// 디렉토리로 이동함
    Directory(PathBuf),
    /// 파일 (외부 프로그램으로 열 대상)
    File(PathBuf),
}

/// 탐색 상태 전체
pub struct BrowserSession {
    pub filesystem: FileSystem,
    pub tree: DirectoryTree,
    pub listing: DirectoryListing,
    pub history: NavigationHistory,
    /// 트리에서 선택된 노드 (현재 디렉토리가 트리에 없으면 None)
    pub selected_node: Option<NodeId>,
}

impl BrowserSession {
    /// 세션 생성 (목록은 아직 비어 있음, `refresh`로 첫 로드)
    pub fn new(start: PathBuf, options: SessionOptions) -> Self {
        let filesystem = FileSystem::new();
        let tree = match options.tree_root {
            Some(root) => DirectoryTree::new(root, options.show_hidden),
            None => DirectoryTree::with_filesystem_roots(&filesystem, options.show_hidden),
        };

        Self {
            filesystem,
            tree,
            listing: DirectoryListing::new(start.clone(), options.show_hidden),
            history: NavigationHistory::new(start, options.history_limit),
            selected_node: None,
        }
    }

    /// 현재 디렉토리
    pub fn current_dir(&self) -> &Path {
        self.history.current()
    }

    /// 상대 경로는 현재 디렉토리 기준으로 해석
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir().join(path)
        }
    }

    /// 명시적 탐색
    ///
    /// 디렉토리가 아니면 목록을 비우고 `InvalidDirectory`를 반환하며 기록은 그대로 둔다.
    /// 열거가 거부된 디렉토리는 기록에 남기고 `PartialAccess`를 반환한다.
    pub fn navigate_to(&mut self, path: &Path) -> Result<ListingStatus> {
        let path = self.resolve(path);
        if !path.is_dir() {
            self.listing.clear();
            return Err(DirscopeError::InvalidDirectory { path });
        }

        debug!(path = %path.display(), "navigate");
        self.history.navigate_to(path.clone());
        let status = self.listing.load(&self.filesystem, &path);
        self.sync_tree(&path);
        status
    }

    /// 트리 노드 선택: 펼치고 해당 디렉토리로 이동
    pub fn select_tree_node(&mut self, id: NodeId) -> Result<ListingStatus> {
        let Some(path) = self.tree.node(id).map(|n| n.path.clone()) else {
            return Err(DirscopeError::InvalidDirectory {
                path: PathBuf::new(),
            });
        };

        self.tree.expand(&self.filesystem, id);
        let status = self.navigate_to(&path);
        if status.is_ok() {
            self.selected_node = Some(id);
        }
        status
    }

    /// 트리 노드 펼침/접힘 전환 (탐색 없음)
    pub fn toggle_tree_node(&mut self, id: NodeId) {
        let expanded = self.tree.node(id).map(|n| n.expanded).unwrap_or(false);
        if expanded {
            self.tree.collapse(id);
        } else {
            self.tree.expand(&self.filesystem, id);
        }
    }

    /// 목록 행 열기
    ///
    /// 디렉토리는 이동하고, 파일은 경로만 돌려준다. 범위 밖 행은 None.
    pub fn open_row(&mut self, row: usize) -> Result<Option<OpenTarget>> {
        let Some(entry) = self.listing.entry_at(row) else {
            return Ok(None);
        };
        let path = entry.path.clone();

        if entry.is_directory() {
            self.navigate_to(&path)?;
            Ok(Some(OpenTarget::Directory(path)))
        } else {
            Ok(Some(OpenTarget::File(path)))
        }
    }

    /// 상위 디렉토리로 이동 (루트면 None)
    pub fn go_to_parent(&mut self) -> Result<Option<ListingStatus>> {
        let Some(parent) = self.current_dir().parent().map(Path::to_path_buf) else {
            return Ok(None);
        };
        let child = self.current_dir().to_path_buf();

        let status = self.navigate_to(&parent)?;
        if let Some(row) = self.listing.position_of(&child) {
            self.listing.select(row);
        }
        Ok(Some(status))
    }

    /// 뒤로 가기 (기록 갱신 없음)
    pub fn go_back(&mut self) -> Result<ListingStatus> {
        let target = self.history.go_back()?.to_path_buf();
        self.show_directory(&target)
    }

    /// 앞으로 가기 (기록 갱신 없음)
    pub fn go_forward(&mut self) -> Result<ListingStatus> {
        let target = self.history.go_forward()?.to_path_buf();
        self.show_directory(&target)
    }

    /// 현재 디렉토리 다시 읽기 (기록 갱신 없음)
    pub fn refresh(&mut self) -> Result<ListingStatus> {
        let current = self.current_dir().to_path_buf();
        self.show_directory(&current)
    }

    fn show_directory(&mut self, path: &Path) -> Result<ListingStatus> {
        let status = self.listing.load(&self.filesystem, path);
        self.sync_tree(path);
        status
    }

    /// 트리에서 현재 디렉토리를 찾아 선택
    pub(crate) fn sync_tree(&mut self, path: &Path) {
        self.selected_node = self
            .tree
            .reveal(&self.filesystem, path)
            .and_then(|chain| chain.last().copied());
    }

    /// 현재 디렉토리 아래 재귀 파일 이름 검색
    ///
    /// 결과는 목록에 표시되며 기록은 바뀌지 않는다.
    pub fn search(&mut self, query: &str) -> Result<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DirscopeError::InvalidSearchQuery);
        }

        let base = self.current_dir().to_path_buf();
        let results = self.filesystem.search_files(&base, query)?;
        let count = results.len();
        info!(base = %base.display(), query, count, "search finished");
        self.listing.show_search_results(&base, query, results);
        Ok(count)
    }

    /// 속성 조회
    pub fn properties(&self, path: &Path) -> Result<FileProperties> {
        FileProperties::read(&self.filesystem, path)
    }

    /// 숨김 표시 전환 후 트리와 목록 다시 읽기
    pub fn set_show_hidden(&mut self, show_hidden: bool) -> Result<ListingStatus> {
        self.listing.show_hidden = show_hidden;
        self.tree.set_show_hidden(show_hidden);
        let root = self.tree.root();
        self.tree.rebuild_children_of(&self.filesystem, root);
        self.refresh()
    }

    /// 현재 디렉토리가 사라졌으면 가장 가까운 상위 디렉토리로 옮김
    ///
    /// 기록에는 남기지 않는다. 옮겼으면 true.
    pub fn relocate_if_missing(&mut self) -> bool {
        let current = self.current_dir().to_path_buf();
        if current.is_dir() {
            return false;
        }

        let fallback = current
            .ancestors()
            .skip(1)
            .find(|p| p.is_dir())
            .map(Path::to_path_buf);

        match fallback {
            Some(dir) => {
                info!(from = %current.display(), to = %dir.display(), "relocating");
                self.history.replace_current(dir);
                true
            }
            None => false,
        }
    }
}
