//! 디렉토리 트리 (지연 로딩)
//!
//! 노드는 arena(`Vec`)에 저장하고 `NodeId`로 참조합니다.
//! 부모 참조는 소유하지 않는 인덱스이며, 제거된 노드의 슬롯은 재사용하지 않습니다.
//! 아직 펼치지 않은 노드(`Unloaded`)는 "하위 항목 있음" 표시 하나를 가진 것으로 취급합니다.

use crate::system::filesystem::FileSystem;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 트리 노드 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 노드 로드 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// 아직 하위 디렉토리를 읽지 않음
    Unloaded,
    /// 하위 디렉토리 목록 (이름 순)
    Loaded(Vec<NodeId>),
}

/// 트리 노드 (디렉토리만)
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub path: PathBuf,
    pub name: String,
    pub parent: Option<NodeId>,
    pub state: NodeState,
    /// 화면상 펼침 여부
    pub expanded: bool,
}

impl TreeNode {
    fn new(path: PathBuf, name: String, parent: Option<NodeId>) -> Self {
        Self {
            path,
            name,
            parent,
            state: NodeState::Unloaded,
            expanded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, NodeState::Loaded(_))
    }

    /// 로드된 자식 (미로드 시 빈 슬라이스)
    pub fn children(&self) -> &[NodeId] {
        match &self.state {
            NodeState::Loaded(children) => children,
            NodeState::Unloaded => &[],
        }
    }

    /// 펼침 표시 기호를 그릴지 여부
    pub fn may_have_children(&self) -> bool {
        match &self.state {
            NodeState::Unloaded => true,
            NodeState::Loaded(children) => !children.is_empty(),
        }
    }
}

/// 디렉토리 트리
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    nodes: Vec<Option<TreeNode>>,
    /// 비워진 슬롯 (push_node가 재사용)
    free: Vec<NodeId>,
    root: NodeId,
    /// 루트가 파일 시스템 루트들을 묶는 가상 노드인지
    synthetic_root: bool,
    show_hidden: bool,
}

impl DirectoryTree {
    /// 실제 디렉토리를 루트로 하는 트리
    pub fn new(root: PathBuf, show_hidden: bool) -> Self {
        let name = display_name(&root);
        Self {
            nodes: vec![Some(TreeNode::new(root, name, None))],
            free: Vec::new(),
            root: NodeId(0),
            synthetic_root: false,
            show_hidden,
        }
    }

    /// 파일 시스템 루트들을 자식으로 갖는 가상 루트 트리
    pub fn with_filesystem_roots(filesystem: &FileSystem, show_hidden: bool) -> Self {
        let mut tree = Self {
            nodes: vec![Some(TreeNode::new(
                PathBuf::new(),
                "Computer".to_string(),
                None,
            ))],
            free: Vec::new(),
            root: NodeId(0),
            synthetic_root: true,
            show_hidden,
        };

        let children: Vec<NodeId> = filesystem
            .list_roots()
            .into_iter()
            .map(|path| {
                let name = display_name(&path);
                tree.push_node(TreeNode::new(path, name, Some(NodeId(0))))
            })
            .collect();

        if let Some(root) = tree.node_mut(NodeId(0)) {
            root.state = NodeState::Loaded(children);
            root.expanded = true;
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.show_hidden = show_hidden;
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn push_node(&mut self, node: TreeNode) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = Some(node);
            return id;
        }
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    /// 노드 펼치기
    ///
    /// 미로드 노드는 하위 디렉토리를 읽어 자식을 만든다.
    /// 읽기 실패는 자식 0개로 로드된 것으로 처리하고 에러를 올리지 않는다.
    /// 이미 로드된 노드는 펼침 표시만 바꾼다.
    pub fn expand(&mut self, filesystem: &FileSystem, id: NodeId) {
        let Some(node) = self.node(id) else { return };
        if !node.is_loaded() {
            self.load_children(filesystem, id);
        }
        if let Some(node) = self.node_mut(id) {
            node.expanded = true;
        }
    }

    /// 노드 접기 (자식은 유지)
    pub fn collapse(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.expanded = false;
        }
    }

    fn load_children(&mut self, filesystem: &FileSystem, id: NodeId) {
        let Some(path) = self.node(id).map(|n| n.path.clone()) else {
            return;
        };

        let mut subdirs = match filesystem.read_subdirectories(&path) {
            Ok(subdirs) => subdirs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "tree expand read failed");
                Vec::new()
            }
        };

        if !self.show_hidden {
            subdirs.retain(|entry| !entry.is_hidden);
        }
        subdirs.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        let children: Vec<NodeId> = subdirs
            .into_iter()
            .map(|entry| self.push_node(TreeNode::new(entry.path, entry.name, Some(id))))
            .collect();

        debug!(path = %path.display(), count = children.len(), "tree node loaded");
        if let Some(node) = self.node_mut(id) {
            node.state = NodeState::Loaded(children);
        }
    }

    /// 하위 트리를 버리고 다시 읽기
    ///
    /// 펼쳐져 있던 하위 노드는 경로가 남아 있으면 다시 펼친다.
    pub fn rebuild_children_of(&mut self, filesystem: &FileSystem, id: NodeId) {
        // 가상 루트의 자식(파일 시스템 루트)은 고정이므로 그 아래만 다시 읽는다
        if self.synthetic_root && id == self.root {
            for child in self.children_of(id) {
                if self.node(child).map(TreeNode::is_loaded).unwrap_or(false) {
                    self.rebuild_children_of(filesystem, child);
                }
            }
            return;
        }

        let Some(node) = self.node(id) else { return };
        let was_expanded = node.expanded;

        let mut reopen = HashSet::new();
        for child in node.children().to_vec() {
            self.collect_expanded(child, &mut reopen);
        }

        for child in self.children_of(id) {
            self.discard_subtree(child);
        }
        if let Some(node) = self.node_mut(id) {
            node.state = NodeState::Unloaded;
        }

        self.load_children(filesystem, id);
        if let Some(node) = self.node_mut(id) {
            node.expanded = was_expanded;
        }

        for child in self.children_of(id) {
            self.restore_expanded(filesystem, child, &reopen);
        }
    }

    fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(|n| n.children().to_vec()).unwrap_or_default()
    }

    fn collect_expanded(&self, id: NodeId, out: &mut HashSet<PathBuf>) {
        let Some(node) = self.node(id) else { return };
        if node.expanded && node.is_loaded() {
            out.insert(node.path.clone());
        }
        for &child in node.children() {
            self.collect_expanded(child, out);
        }
    }

    fn restore_expanded(&mut self, filesystem: &FileSystem, id: NodeId, reopen: &HashSet<PathBuf>) {
        let should_open = self
            .node(id)
            .map(|n| reopen.contains(&n.path))
            .unwrap_or(false);
        if !should_open {
            return;
        }
        self.expand(filesystem, id);
        for child in self.children_of(id) {
            self.restore_expanded(filesystem, child, reopen);
        }
    }

    fn discard_subtree(&mut self, id: NodeId) {
        for child in self.children_of(id) {
            self.discard_subtree(child);
        }
        if let Some(slot) = self.nodes.get_mut(id.0) {
            if slot.take().is_some() {
                self.free.push(id);
            }
        }
    }

    /// 경로와 같은 노드를 찾아 루트→노드 체인 반환
    ///
    /// 로드된 자식만 깊이 우선으로 탐색한다.
    pub fn find_path(&self, path: &Path) -> Option<Vec<NodeId>> {
        let mut chain = Vec::new();
        if self.find_from(self.root, path, &mut chain) {
            Some(chain)
        } else {
            None
        }
    }

    fn find_from(&self, id: NodeId, target: &Path, chain: &mut Vec<NodeId>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        chain.push(id);

        if node.path == target {
            return true;
        }
        // 자식 경로는 항상 부모 경로 아래이므로 접두사가 다르면 내려갈 필요 없음
        if target.starts_with(&node.path) {
            for &child in node.children() {
                if self.find_from(child, target, chain) {
                    return true;
                }
            }
        }

        chain.pop();
        false
    }

    /// 경로에 해당하는 노드 (로드된 범위 안에서)
    pub fn find_node(&self, path: &Path) -> Option<NodeId> {
        self.find_path(path).and_then(|chain| chain.last().copied())
    }

    /// 경로까지 조상 노드를 차례로 펼쳐 체인 반환
    ///
    /// 트리 밖의 경로이거나 중간 디렉토리가 사라졌으면 None.
    pub fn reveal(&mut self, filesystem: &FileSystem, path: &Path) -> Option<Vec<NodeId>> {
        let mut current = self.root;
        let mut chain = vec![current];

        loop {
            let node = self.node(current)?;
            if node.path == path {
                return Some(chain);
            }
            if !path.starts_with(&node.path) {
                return None;
            }

            self.expand(filesystem, current);
            let next = self
                .node(current)?
                .children()
                .iter()
                .copied()
                .find(|&child| {
                    self.node(child)
                        .map(|c| path.starts_with(&c.path))
                        .unwrap_or(false)
                })?;

            chain.push(next);
            current = next;
        }
    }

    /// 화면 표시용 (노드, 깊이) 목록
    ///
    /// 가상 루트는 표시하지 않고 그 자식을 깊이 0으로 둔다.
    pub fn visible_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        if self.synthetic_root {
            for child in self.children_of(self.root) {
                self.push_visible(child, 0, &mut rows);
            }
        } else {
            self.push_visible(self.root, 0, &mut rows);
        }
        rows
    }

    fn push_visible(&self, id: NodeId, depth: usize, rows: &mut Vec<(NodeId, usize)>) {
        let Some(node) = self.node(id) else { return };
        rows.push((id, depth));
        if node.expanded {
            for &child in node.children() {
                self.push_visible(child, depth + 1, rows);
            }
        }
    }
}

/// 경로의 표시 이름 (루트는 경로 그대로)
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
