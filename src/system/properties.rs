//! 속성 다이얼로그용 정보 수집

use crate::models::file_entry::split_extension;
use crate::system::filesystem::FileSystem;
use crate::utils::error::{DirscopeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 파일/디렉토리 속성
#[derive(Debug, Clone)]
pub struct FileProperties {
    pub name: String,
    /// 확장자 (없으면 None → "N/A" 표시)
    pub extension: Option<String>,
    pub is_directory: bool,
    /// 디렉토리는 하위 전체 합산
    pub size: u64,
    /// 상위 디렉토리
    pub location: PathBuf,
    pub created: SystemTime,
    pub modified: SystemTime,
    /// 소유자 (Unix uid, 그 외 None)
    pub owner: Option<String>,
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

impl FileProperties {
    /// 경로의 속성 읽기
    pub fn read(filesystem: &FileSystem, path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|_| DirscopeError::SourceNotFound {
            path: path.to_path_buf(),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let is_directory = metadata.is_dir();
        let extension = if is_directory {
            None
        } else {
            split_extension(&name).1.map(str::to_string)
        };

        let size = if is_directory {
            filesystem.calculate_total_size(path)
        } else {
            metadata.len()
        };

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);

        let location = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf());

        let (owner, readable, writable, executable) = access_flags(&metadata, path);

        Ok(Self {
            name,
            extension,
            is_directory,
            size,
            location,
            created,
            modified,
            owner,
            readable,
            writable,
            executable,
        })
    }

    /// 확장자 표시 문자열
    pub fn extension_display(&self) -> &str {
        self.extension.as_deref().unwrap_or("N/A")
    }
}

/// 실제로 열어 보는 방식의 읽기 가능 여부
fn can_read(metadata: &fs::Metadata, path: &Path) -> bool {
    if metadata.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        fs::File::open(path).is_ok()
    }
}

#[cfg(unix)]
fn access_flags(metadata: &fs::Metadata, path: &Path) -> (Option<String>, bool, bool, bool) {
    use std::os::unix::fs::MetadataExt;

    // 쓰기/실행은 소유자 비트 기준
    let mode = metadata.mode();
    (
        Some(metadata.uid().to_string()),
        can_read(metadata, path),
        mode & 0o200 != 0,
        mode & 0o100 != 0,
    )
}

#[cfg(not(unix))]
fn access_flags(metadata: &fs::Metadata, path: &Path) -> (Option<String>, bool, bool, bool) {
    let executable = path
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "exe" | "bat" | "cmd" | "com")
        })
        .unwrap_or(false);
    (
        None,
        can_read(metadata, path),
        !metadata.permissions().readonly(),
        executable,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_properties() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("song.mp3");
        fs::write(&file, "12345").unwrap();

        let props = FileProperties::read(&FileSystem::new(), &file).unwrap();
        assert_eq!(props.name, "song.mp3");
        assert_eq!(props.extension_display(), "mp3");
        assert_eq!(props.size, 5);
        assert_eq!(props.location, temp.path());
        assert!(!props.is_directory);
        assert!(props.readable);
    }

    #[test]
    fn test_directory_properties_recursive_size() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("album");
        fs::create_dir_all(dir.join("disc2")).unwrap();
        fs::write(dir.join("a.flac"), "aaaa").unwrap();
        fs::write(dir.join("disc2").join("b.flac"), "bb").unwrap();

        let props = FileProperties::read(&FileSystem::new(), &dir).unwrap();
        assert!(props.is_directory);
        assert_eq!(props.extension_display(), "N/A");
        assert_eq!(props.size, 6);
    }

    #[test]
    fn test_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = FileProperties::read(&FileSystem::new(), &temp.path().join("gone"));
        assert!(matches!(result, Err(DirscopeError::SourceNotFound { .. })));
    }
}
