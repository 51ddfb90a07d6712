use crate::models::file_entry::FileEntry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::{DirscopeError, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 목록에 표시 중인 내용의 출처
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// 디렉토리 내용
    Directory,
    /// 검색 결과
    Search { query: String },
}

/// 로드 결과 (정보성)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// 엔트리 n개
    Populated(usize),
    /// 비어 있는 디렉토리
    Empty,
}

/// 현재 디렉토리 목록 상태
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    /// 표시 중인 디렉토리 (검색 모드면 검색 기준 디렉토리)
    pub directory: PathBuf,
    /// 정렬된 엔트리
    pub entries: Vec<FileEntry>,
    /// 커서 위치
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 숨김 파일 표시 여부
    pub show_hidden: bool,
    /// 내용 출처
    pub source: ListingSource,
}

impl DirectoryListing {
    pub fn new(directory: PathBuf, show_hidden: bool) -> Self {
        Self {
            directory,
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            show_hidden,
            source: ListingSource::Directory,
        }
    }

    /// 디렉토리 내용으로 전체 교체
    ///
    /// 실패하면 목록은 비워지고 에러를 반환한다.
    pub fn load(&mut self, filesystem: &FileSystem, directory: &Path) -> Result<ListingStatus> {
        let changed_dir = self.directory != directory || self.source != ListingSource::Directory;
        self.directory = directory.to_path_buf();
        self.source = ListingSource::Directory;

        let mut entries = match filesystem.read_directory(directory) {
            Ok(entries) => entries,
            Err(e) => {
                self.clear();
                return Err(e);
            }
        };

        if !self.show_hidden {
            entries.retain(|entry| !entry.is_hidden);
        }
        sort_entries(&mut entries);
        self.entries = entries;

        if changed_dir {
            self.selected_index = 0;
            self.scroll_offset = 0;
        } else {
            self.clamp_selection();
        }

        debug!(path = %directory.display(), count = self.entries.len(), "listing loaded");
        if self.entries.is_empty() {
            Ok(ListingStatus::Empty)
        } else {
            Ok(ListingStatus::Populated(self.entries.len()))
        }
    }

    /// 검색 결과로 전체 교체
    pub fn show_search_results(&mut self, base: &Path, query: &str, mut results: Vec<FileEntry>) {
        if !self.show_hidden {
            results.retain(|entry| !entry.is_hidden);
        }
        sort_entries(&mut results);

        self.directory = base.to_path_buf();
        self.source = ListingSource::Search {
            query: query.to_string(),
        };
        self.entries = results;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// 목록 비우기
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// 행 번호로 엔트리 조회 (범위 밖이면 None)
    pub fn entry_at(&self, row: usize) -> Option<&FileEntry> {
        self.entries.get(row)
    }

    /// 경로로 행 번호 조회
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    pub fn is_search_result(&self) -> bool {
        matches!(self.source, ListingSource::Search { .. })
    }

    // === 커서 ===

    /// 선택된 항목 반환
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entry_at(self.selected_index)
    }

    pub fn select(&mut self, row: usize) {
        self.selected_index = row;
        self.clamp_selection();
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected_index = self.selected_index.saturating_add_signed(delta).min(last);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.entries.len().saturating_sub(1);
    }

    /// 커서가 보이도록 스크롤 조정
    pub fn adjust_scroll(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selected_index + 1 - visible_rows;
        }
    }

    fn clamp_selection(&mut self) {
        if self.entries.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.entries.len() {
            self.selected_index = self.entries.len() - 1;
        }
    }

    // === 통계 ===

    /// 파일 개수 반환
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// 디렉토리 개수 반환
    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }

    /// 전체 크기 반환 (바이트)
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

/// 디렉토리 먼저, 그 다음 이름 (대소문자 무시)
fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_directory()
        .cmp(&a.is_directory())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(listing: &DirectoryListing) -> Vec<&str> {
        listing.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_load_sorts_directories_first_case_insensitive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("A.txt"), "").unwrap();
        fs::create_dir(temp.path().join("zeta")).unwrap();
        fs::create_dir(temp.path().join("Alpha")).unwrap();

        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        let status = listing.load(&FileSystem::new(), temp.path()).unwrap();

        assert_eq!(status, ListingStatus::Populated(4));
        assert_eq!(names(&listing), vec!["Alpha", "zeta", "A.txt", "b.txt"]);
    }

    #[test]
    fn test_load_empty_directory() {
        let temp = TempDir::new().unwrap();
        let mut listing = DirectoryListing::new(PathBuf::new(), true);

        let status = listing.load(&FileSystem::new(), temp.path()).unwrap();
        assert_eq!(status, ListingStatus::Empty);
        assert!(listing.entries.is_empty());
    }

    #[test]
    fn test_load_invalid_directory_clears() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("x.txt"), "").unwrap();
        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        listing.load(&FileSystem::new(), temp.path()).unwrap();
        assert_eq!(listing.entries.len(), 1);

        let missing = temp.path().join("missing");
        let result = listing.load(&FileSystem::new(), &missing);
        assert!(matches!(result, Err(DirscopeError::InvalidDirectory { .. })));
        assert!(listing.entries.is_empty());
    }

    #[test]
    fn test_hidden_entries_filtered() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".dot"), "").unwrap();
        fs::write(temp.path().join("plain"), "").unwrap();

        let mut listing = DirectoryListing::new(PathBuf::new(), false);
        listing.load(&FileSystem::new(), temp.path()).unwrap();
        assert_eq!(names(&listing), vec!["plain"]);
    }

    #[test]
    fn test_entry_at_bounds() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("only"), "").unwrap();
        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        listing.load(&FileSystem::new(), temp.path()).unwrap();

        assert_eq!(listing.entry_at(0).unwrap().name, "only");
        assert!(listing.entry_at(1).is_none());
        assert!(listing.entry_at(usize::MAX).is_none());
    }

    #[test]
    fn test_reload_same_directory_keeps_clamped_selection() {
        let temp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        let fs_instance = FileSystem::new();
        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        listing.load(&fs_instance, temp.path()).unwrap();
        listing.select(2);

        fs::remove_file(temp.path().join("c")).unwrap();
        listing.load(&fs_instance, temp.path()).unwrap();
        assert_eq!(listing.selected_index, 1);
    }

    #[test]
    fn test_search_results_mode() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.log"), "").unwrap();
        fs::write(temp.path().join("a.log"), "").unwrap();
        let fs_instance = FileSystem::new();
        let results = fs_instance.search_files(temp.path(), "log").unwrap();

        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        listing.show_search_results(temp.path(), "log", results);

        assert!(listing.is_search_result());
        assert_eq!(names(&listing), vec!["a.log", "b.log"]);

        listing.load(&fs_instance, temp.path()).unwrap();
        assert!(!listing.is_search_result());
    }

    #[test]
    fn test_move_selection_and_scroll() {
        let temp = TempDir::new().unwrap();
        for i in 0..10 {
            fs::write(temp.path().join(format!("f{}", i)), "").unwrap();
        }
        let mut listing = DirectoryListing::new(PathBuf::new(), true);
        listing.load(&FileSystem::new(), temp.path()).unwrap();

        listing.move_selection(-3);
        assert_eq!(listing.selected_index, 0);
        listing.move_selection(7);
        listing.adjust_scroll(5);
        assert_eq!(listing.selected_index, 7);
        assert_eq!(listing.scroll_offset, 3);
        listing.move_selection(100);
        assert_eq!(listing.selected_index, 9);
    }
}
