use crate::models::file_entry::FileEntry;
use crate::utils::error::{DirscopeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 파일 시스템 모듈
///
/// 모든 호출은 동기(blocking)이며 실패는 즉시 타입 있는 에러로 반환합니다.
pub struct FileSystem;

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 존재하지 않거나 디렉토리가 아니면 `InvalidDirectory`,
    /// 열거 자체가 거부되면 `PartialAccess`.
    /// 메타데이터를 읽을 수 없는 개별 엔트리는 건너뜁니다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        if !path.is_dir() {
            return Err(DirscopeError::InvalidDirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "read_dir refused");
            DirscopeError::PartialAccess {
                path: path.to_path_buf(),
            }
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            match FileEntry::from_path(&entry_path) {
                Ok(file_entry) => entries.push(file_entry),
                Err(e) => {
                    warn!(path = %entry_path.display(), error = %e, "skipping unreadable entry");
                }
            }
        }

        Ok(entries)
    }

    /// 하위 디렉토리만 읽기 (트리 확장용)
    pub fn read_subdirectories(&self, path: &Path) -> Result<Vec<FileEntry>> {
        let mut entries = self.read_directory(path)?;
        entries.retain(FileEntry::is_directory);
        Ok(entries)
    }

    /// 파일 시스템 루트 목록
    ///
    /// Unix는 "/", Windows는 존재하는 드라이브 문자.
    #[allow(clippy::unused_self)]
    pub fn list_roots(&self) -> Vec<PathBuf> {
        #[cfg(windows)]
        {
            ('A'..='Z')
                .map(|letter| PathBuf::from(format!("{}:\\", letter)))
                .filter(|p| p.is_dir())
                .collect()
        }

        #[cfg(not(windows))]
        {
            vec![PathBuf::from("/")]
        }
    }

    /// 파일 시스템 루트 여부 (부모 없음)
    #[allow(clippy::unused_self)]
    pub fn is_filesystem_root(&self, path: &Path) -> bool {
        path.parent().is_none()
    }

    /// 디렉토리 쓰기 가능 여부
    ///
    /// Unix에서는 access(2)로 실효 uid/그룹 기준 판정을 커널에 맡긴다.
    #[allow(clippy::unused_self)]
    pub fn is_writable(&self, path: &Path) -> bool {
        #[cfg(unix)]
        {
            use nix::unistd::{access, AccessFlags};
            path.is_dir() && access(path, AccessFlags::W_OK).is_ok()
        }

        #[cfg(not(unix))]
        {
            fs::metadata(path)
                .map(|m| m.is_dir() && !m.permissions().readonly())
                .unwrap_or(false)
        }
    }

    // === 복사 ===

    /// 단일 파일 복사 (덮어쓰지 않음)
    #[allow(clippy::unused_self)]
    pub fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64> {
        if dest.exists() {
            return Err(DirscopeError::DestinationCollision {
                path: dest.to_path_buf(),
            });
        }

        fs::copy(src, dest).map_err(|e| DirscopeError::CopyFailed {
            path: src.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 디렉토리 재귀 복사
    ///
    /// 대상 디렉토리를 먼저 만들고 자식을 깊이 우선으로 복사합니다.
    /// 첫 실패에서 중단하며 이미 복사된 항목은 되돌리지 않습니다.
    pub fn copy_directory(&self, src: &Path, dest: &Path) -> Result<u64> {
        fs::create_dir_all(dest).map_err(|e| DirscopeError::CopyFailed {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;

        let read_dir = fs::read_dir(src).map_err(|e| DirscopeError::CopyFailed {
            path: src.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut total_bytes = 0u64;
        for entry in read_dir {
            let entry = entry.map_err(|e| DirscopeError::CopyFailed {
                path: src.to_path_buf(),
                reason: e.to_string(),
            })?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());

            total_bytes += self.copy_path(&entry_path, &dest_path)?;
        }

        Ok(total_bytes)
    }

    /// 파일이면 파일 복사, 그 외에는 디렉토리로 간주
    pub fn copy_path(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src.is_file() {
            self.copy_file(src, dest)
        } else {
            self.copy_directory(src, dest)
        }
    }

    // === 이동 ===

    /// rename 한 번으로 이동 (복사 후 삭제로 대체하지 않음)
    #[allow(clippy::unused_self)]
    pub fn move_path(&self, src: &Path, dest: &Path) -> Result<()> {
        if dest.exists() {
            return Err(DirscopeError::DestinationCollision {
                path: dest.to_path_buf(),
            });
        }

        fs::rename(src, dest).map_err(|e| DirscopeError::MoveFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        })
    }

    // === 삭제 ===

    /// 단일 파일 삭제
    #[allow(clippy::unused_self)]
    pub fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| DirscopeError::DeleteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 디렉토리 재귀 삭제
    ///
    /// 자식을 먼저 비우고 자신을 지웁니다. 첫 실패 경로를 에러에 담아 즉시 중단합니다.
    /// 심볼릭 링크는 따라가지 않고 링크 자체만 지웁니다.
    pub fn delete_directory(&self, path: &Path) -> Result<()> {
        let read_dir = fs::read_dir(path).map_err(|e| DirscopeError::DeleteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        for entry in read_dir {
            let entry = entry.map_err(|e| DirscopeError::DeleteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let entry_path = entry.path();
            let is_real_dir = fs::symlink_metadata(&entry_path)
                .map(|m| m.is_dir())
                .unwrap_or(false);

            if is_real_dir {
                self.delete_directory(&entry_path)?;
            } else {
                self.delete_file(&entry_path)?;
            }
        }

        fs::remove_dir(path).map_err(|e| DirscopeError::DeleteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 종류에 따라 삭제 분기
    pub fn delete_path(&self, path: &Path) -> Result<()> {
        let is_real_dir = fs::symlink_metadata(path)
            .map(|m| m.is_dir())
            .map_err(|_| DirscopeError::SourceNotFound {
                path: path.to_path_buf(),
            })?;

        if is_real_dir {
            self.delete_directory(path)
        } else {
            self.delete_file(path)
        }
    }

    // === 생성 ===

    /// 디렉토리 생성 (중간 경로 포함)
    #[allow(clippy::unused_self)]
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(DirscopeError::DestinationCollision {
                path: path.to_path_buf(),
            });
        }

        fs::create_dir_all(path).map_err(|e| DirscopeError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    // === 검색 / 크기 ===

    /// 재귀 파일 이름 검색 (대소문자 무시, 부분 일치, 파일만)
    ///
    /// 디렉토리 심볼릭 링크는 따라가지 않고, 읽을 수 없는 하위 디렉토리는 건너뜁니다.
    pub fn search_files(&self, base: &Path, query: &str) -> Result<Vec<FileEntry>> {
        if !base.is_dir() {
            return Err(DirscopeError::InvalidDirectory {
                path: base.to_path_buf(),
            });
        }

        let needle = query.to_lowercase();
        let mut results = Vec::new();
        let mut pending = vec![base.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let read_dir = match fs::read_dir(&dir) {
                Ok(read_dir) => read_dir,
                Err(e) => {
                    debug!(path = %dir.display(), error = %e, "search skipped directory");
                    continue;
                }
            };

            for entry in read_dir.flatten() {
                let entry_path = entry.path();
                let Ok(link_meta) = fs::symlink_metadata(&entry_path) else {
                    continue;
                };

                if link_meta.is_dir() {
                    pending.push(entry_path);
                    continue;
                }

                // 디렉토리를 가리키는 링크는 탐색/매칭 모두 제외
                if link_meta.file_type().is_symlink() && entry_path.is_dir() {
                    continue;
                }

                let name = entry.file_name().to_string_lossy().to_lowercase();
                if name.contains(&needle) {
                    if let Ok(file_entry) = FileEntry::from_path(&entry_path) {
                        results.push(file_entry);
                    }
                }
            }
        }

        Ok(results)
    }

    /// 경로의 총 크기 (디렉토리는 재귀 합산, 읽기 실패 항목은 0으로 간주)
    pub fn calculate_total_size(&self, path: &Path) -> u64 {
        let Ok(metadata) = fs::symlink_metadata(path) else {
            return 0;
        };

        if !metadata.is_dir() {
            return metadata.len();
        }

        let Ok(read_dir) = fs::read_dir(path) else {
            return 0;
        };
        read_dir
            .flatten()
            .map(|entry| self.calculate_total_size(&entry.path()))
            .sum()
    }

    // === 외부 프로그램 ===

    /// OS 기본 프로그램으로 파일 열기
    #[allow(clippy::unused_self)]
    pub fn open_with_default_app(&self, path: &Path) -> Result<()> {
        use std::process::{Command, Stdio};

        if !path.exists() {
            return Err(DirscopeError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(path);
            c
        } else if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]).arg(path);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(path);
            c
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        run_opener(&mut command, path)
    }
}

/// 실행기를 끝까지 기다린 뒤 종료 코드를 에러로 변환
fn run_opener(command: &mut std::process::Command, path: &Path) -> Result<()> {
    let status = command.status().map_err(|e| DirscopeError::OpenFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(DirscopeError::OpenFailed {
            path: path.to_path_buf(),
            reason: format!("opener exited with status {}", status),
        })
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}
