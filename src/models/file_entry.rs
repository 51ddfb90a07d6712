use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 엔트리 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 디렉토리
    Directory,
    /// 디렉토리가 아닌 모든 것
    File,
}

/// 파일 엔트리
///
/// 한 번의 목록 로드 동안만 유효한 스냅샷입니다.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    /// 종류
    pub kind: EntryKind,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간
    pub modified: SystemTime,
    /// 생성 시간 (플랫폼/파일시스템 미지원 시 modified와 동일)
    pub created: SystemTime,
    /// 숨김 파일 여부
    pub is_hidden: bool,
}

impl FileEntry {
    /// 경로에서 메타데이터를 읽어 엔트리 생성
    ///
    /// 심볼릭 링크는 대상 기준으로 판단하고, 끊어진 링크는 링크 자체 정보를 사용합니다.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path).or_else(|_| fs::symlink_metadata(path))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let size = match kind {
            EntryKind::Directory => 0,
            EntryKind::File => metadata.len(),
        };

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);
        let is_hidden = is_hidden_name(&name);

        Ok(Self {
            name,
            path: path.to_path_buf(),
            kind,
            size,
            modified,
            created,
            is_hidden,
        })
    }

    /// 디렉토리 여부 확인
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// 파일 여부 확인
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// 확장자 (첫 글자가 '.'인 이름과 '.'로 끝나는 이름은 확장자 없음)
    pub fn extension(&self) -> Option<&str> {
        split_extension(&self.name).1
    }

    /// 목록 Type 컬럼 라벨
    pub fn type_label(&self) -> String {
        if self.is_directory() {
            return "Folder".to_string();
        }
        match self.extension() {
            Some(ext) => ext.to_uppercase(),
            None => "File".to_string(),
        }
    }
}

/// 이름을 (stem, extension)으로 분리
///
/// 마지막 '.' 기준이며 위치가 0이거나 끝이면 확장자로 보지 않습니다.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Unix 관례: '.'으로 시작하면 숨김
fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_path_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        let dir = temp.path().join("sub");
        fs::write(&file, "hello").unwrap();
        fs::create_dir(&dir).unwrap();

        let file_entry = FileEntry::from_path(&file).unwrap();
        assert_eq!(file_entry.name, "notes.txt");
        assert!(file_entry.is_file());
        assert_eq!(file_entry.size, 5);

        let dir_entry = FileEntry::from_path(&dir).unwrap();
        assert!(dir_entry.is_directory());
        assert_eq!(dir_entry.size, 0);
    }

    #[test]
    fn test_from_path_missing_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(FileEntry::from_path(&temp.path().join("ghost")).is_err());
    }

    #[test]
    fn test_split_extension_rules() {
        assert_eq!(split_extension("report.pdf"), ("report", Some("pdf")));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", Some("gz")));
        assert_eq!(split_extension(".bashrc"), (".bashrc", None));
        assert_eq!(split_extension("trailing."), ("trailing.", None));
        assert_eq!(split_extension("Makefile"), ("Makefile", None));
    }

    #[test]
    fn test_type_label() {
        let temp = TempDir::new().unwrap();
        let pdf = temp.path().join("doc.pdf");
        let plain = temp.path().join("README");
        fs::write(&pdf, "").unwrap();
        fs::write(&plain, "").unwrap();

        assert_eq!(FileEntry::from_path(&pdf).unwrap().type_label(), "PDF");
        assert_eq!(FileEntry::from_path(&plain).unwrap().type_label(), "File");
        assert_eq!(
            FileEntry::from_path(temp.path()).unwrap().type_label(),
            "Folder"
        );
    }

    #[test]
    fn test_hidden_detection() {
        let temp = TempDir::new().unwrap();
        let hidden = temp.path().join(".secret");
        fs::write(&hidden, "").unwrap();
        assert!(FileEntry::from_path(&hidden).unwrap().is_hidden);
    }
}
