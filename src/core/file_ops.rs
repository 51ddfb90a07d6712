//! 파일 작업 (복사/이동/삭제/생성)
//!
//! 모든 작업은 검증 → 확인(삭제만) → 실행 → 갱신 순서로 진행합니다.
//! 앞 단계에서 멈추면 뒤 단계의 부작용은 없습니다.
//! 실행 중 실패는 즉시 중단하며 이미 처리된 항목은 되돌리지 않습니다.

use crate::core::prompts::{ConfirmationPrompt, DestinationPicker, NameInput, NamePurpose};
use crate::core::session::BrowserSession;
use crate::models::file_entry::split_extension;
use crate::models::{ListingSource, OperationOutcome, OperationReport, OperationType};
use crate::utils::error::{DirscopeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 새 디렉토리 이름 최대 길이
pub const MAX_FOLDER_NAME_LEN: usize = 64;

/// 새 디렉토리 이름 규칙: 비어 있지 않고 64자 이하, `[A-Za-z0-9_]`만 허용
pub fn validate_folder_name(name: &str) -> Result<()> {
    let fail = |reason: &str| {
        Err(DirscopeError::NameValidationFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return fail("name must not be empty");
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return fail("name must be at most 64 characters");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return fail("only letters, digits and '_' are allowed");
    }
    Ok(())
}

/// 복사/이동 후 이름 결정
///
/// 입력이 없거나 비어 있으면 원래 이름을 쓴다.
/// 파일은 원래 확장자를 항상 붙인다.
pub fn compose_target_name(original: &str, is_dir: bool, input: Option<&str>) -> Result<String> {
    let (stem, extension) = if is_dir {
        (original, None)
    } else {
        split_extension(original)
    };

    let chosen = input.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(stem);

    if chosen.contains('/') || chosen.contains('\\') || chosen == "." || chosen == ".." {
        return Err(DirscopeError::NameValidationFailed {
            name: chosen.to_string(),
            reason: "name must not contain path separators".to_string(),
        });
    }

    Ok(match extension {
        Some(ext) => format!("{}.{}", chosen, ext),
        None => chosen.to_string(),
    })
}

/// 세션에 대해 파일 작업 수행
pub struct FileOperations<'a> {
    session: &'a mut BrowserSession,
    /// 파일 삭제도 확인할지 (디렉토리는 항상 확인)
    confirm_file_delete: bool,
}

impl<'a> FileOperations<'a> {
    pub fn new(session: &'a mut BrowserSession) -> Self {
        Self {
            session,
            confirm_file_delete: true,
        }
    }

    pub fn confirm_file_delete(mut self, confirm: bool) -> Self {
        self.confirm_file_delete = confirm;
        self
    }

    // === 복사 ===

    pub fn copy(
        &mut self,
        source: &Path,
        picker: &mut dyn DestinationPicker,
        names: &mut dyn NameInput,
    ) -> Result<OperationOutcome> {
        let Some(plan) = self.plan_transfer(OperationType::Copy, source, picker, names)? else {
            return Ok(OperationOutcome::Cancelled);
        };

        let bytes = self
            .session
            .filesystem
            .copy_path(&plan.source, &plan.target)?;
        info!(
            src = %plan.source.display(),
            dest = %plan.target.display(),
            bytes,
            "copy finished"
        );

        let refreshed = vec![plan.dest_dir.clone()];
        self.refresh_after(&refreshed, plan.is_dir);
        Ok(OperationOutcome::Completed(OperationReport {
            operation: OperationType::Copy,
            source: plan.source,
            destination: Some(plan.target),
            refreshed,
        }))
    }

    // === 이동 ===

    pub fn move_entry(
        &mut self,
        source: &Path,
        picker: &mut dyn DestinationPicker,
        names: &mut dyn NameInput,
    ) -> Result<OperationOutcome> {
        let Some(plan) = self.plan_transfer(OperationType::Move, source, picker, names)? else {
            return Ok(OperationOutcome::Cancelled);
        };

        self.session
            .filesystem
            .move_path(&plan.source, &plan.target)?;
        info!(
            src = %plan.source.display(),
            dest = %plan.target.display(),
            "move finished"
        );

        let mut refreshed = Vec::new();
        if let Some(parent) = plan.source.parent() {
            refreshed.push(parent.to_path_buf());
        }
        if !refreshed.contains(&plan.dest_dir) {
            refreshed.push(plan.dest_dir.clone());
        }
        self.refresh_after(&refreshed, plan.is_dir);
        Ok(OperationOutcome::Completed(OperationReport {
            operation: OperationType::Move,
            source: plan.source,
            destination: Some(plan.target),
            refreshed,
        }))
    }

    // === 삭제 ===

    pub fn delete(
        &mut self,
        target: &Path,
        prompt: &mut dyn ConfirmationPrompt,
    ) -> Result<OperationOutcome> {
        let metadata = fs::symlink_metadata(target).map_err(|_| DirscopeError::SourceNotFound {
            path: target.to_path_buf(),
        })?;
        if self.session.filesystem.is_filesystem_root(target) {
            return Err(DirscopeError::DeleteFailed {
                path: target.to_path_buf(),
                reason: "filesystem root cannot be deleted".to_string(),
            });
        }
        let is_dir = metadata.is_dir();

        if (is_dir || self.confirm_file_delete) && !prompt.confirm(target, is_dir) {
            info!(path = %target.display(), "delete declined");
            return Ok(OperationOutcome::Cancelled);
        }

        // 실패해도 일부가 지워졌을 수 있으므로 갱신은 항상 수행
        let result = self.session.filesystem.delete_path(target);
        let refreshed: Vec<PathBuf> = target.parent().map(Path::to_path_buf).into_iter().collect();
        self.refresh_after(&refreshed, is_dir);
        result?;

        info!(path = %target.display(), "delete finished");
        Ok(OperationOutcome::Completed(OperationReport {
            operation: OperationType::Delete,
            source: target.to_path_buf(),
            destination: None,
            refreshed,
        }))
    }

    // === 생성 ===

    pub fn create(&mut self, parent: &Path, names: &mut dyn NameInput) -> Result<OperationOutcome> {
        if !parent.is_dir() {
            return Err(DirscopeError::InvalidDirectory {
                path: parent.to_path_buf(),
            });
        }

        let Some(input) = names.input_name(NamePurpose::Create, "") else {
            return Ok(OperationOutcome::Cancelled);
        };
        validate_folder_name(&input)?;

        let target = parent.join(&input);
        if fs::symlink_metadata(&target).is_ok() {
            return Err(DirscopeError::DestinationCollision { path: target });
        }
        if !self.session.filesystem.is_writable(parent) {
            return Err(DirscopeError::CreateFailed {
                path: parent.to_path_buf(),
                reason: "parent directory is not writable".to_string(),
            });
        }

        self.session.filesystem.create_directory(&target)?;
        info!(path = %target.display(), "directory created");

        let refreshed = vec![parent.to_path_buf()];
        self.refresh_after(&refreshed, true);
        Ok(OperationOutcome::Completed(OperationReport {
            operation: OperationType::Create,
            source: target.clone(),
            destination: Some(target),
            refreshed,
        }))
    }

    // === 공통 ===

    /// 복사/이동 검증 단계. 취소면 None.
    fn plan_transfer(
        &mut self,
        operation: OperationType,
        source: &Path,
        picker: &mut dyn DestinationPicker,
        names: &mut dyn NameInput,
    ) -> Result<Option<TransferPlan>> {
        if fs::symlink_metadata(source).is_err() {
            return Err(DirscopeError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        // 디렉토리를 가리키는 링크도 복사 시 디렉토리로 재귀하므로 같은 기준을 쓴다
        let is_dir = source.is_dir();

        let Some(dest_dir) = picker.pick_destination(source) else {
            info!(op = operation.name(), src = %source.display(), "destination cancelled");
            return Ok(None);
        };
        if !dest_dir.is_dir() {
            return Err(DirscopeError::InvalidDirectory { path: dest_dir });
        }

        let original = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| DirscopeError::SourceNotFound {
                path: source.to_path_buf(),
            })?;
        let suggested = if is_dir {
            original.as_str()
        } else {
            split_extension(&original).0
        };
        let purpose = match operation {
            OperationType::Move => NamePurpose::MoveAs,
            _ => NamePurpose::CopyAs,
        };
        let input = names.input_name(purpose, suggested);
        let final_name = compose_target_name(&original, is_dir, input.as_deref())?;

        if is_dir && is_inside(&dest_dir, source) {
            return Err(DirscopeError::RecursiveDestination {
                src: source.to_path_buf(),
                dest: dest_dir,
            });
        }

        let target = dest_dir.join(&final_name);
        if fs::symlink_metadata(&target).is_ok() {
            return Err(DirscopeError::DestinationCollision { path: target });
        }

        Ok(Some(TransferPlan {
            source: source.to_path_buf(),
            dest_dir,
            target,
            is_dir,
        }))
    }

    /// 갱신 단계
    ///
    /// 하위 디렉토리 구성이 바뀐 부모는 트리에서 다시 읽고,
    /// 현재 디렉토리가 영향받았으면 목록을 다시 읽는다.
    fn refresh_after(&mut self, affected: &[PathBuf], subdirs_changed: bool) {
        let session = &mut *self.session;

        if subdirs_changed {
            for dir in affected {
                let Some(id) = session.tree.find_node(dir) else {
                    continue;
                };
                let loaded = session.tree.node(id).map(|n| n.is_loaded()).unwrap_or(false);
                if loaded {
                    session.tree.rebuild_children_of(&session.filesystem, id);
                }
            }
        }

        let relocated = session.relocate_if_missing();
        let current = session.current_dir().to_path_buf();
        let result = match session.listing.source.clone() {
            ListingSource::Search { query } if !relocated => session.search(&query).map(|_| ()),
            _ if relocated || subdirs_changed || affected.iter().any(|d| *d == current) => {
                session.refresh().map(|_| ())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            warn!(dir = %current.display(), error = %e, "refresh after operation failed");
        }

        // 검색 결과 갱신은 트리 선택을 건드리지 않으므로 따로 맞춘다
        if subdirs_changed && session.listing.is_search_result() {
            session.sync_tree(&current);
        }
    }
}

struct TransferPlan {
    source: PathBuf,
    dest_dir: PathBuf,
    target: PathBuf,
    is_dir: bool,
}

/// `inner`가 `outer`와 같거나 그 아래인지 (가능하면 실제 경로로 비교)
fn is_inside(inner: &Path, outer: &Path) -> bool {
    let inner = inner.canonicalize().unwrap_or_else(|_| inner.to_path_buf());
    let outer = outer.canonicalize().unwrap_or_else(|_| outer.to_path_buf());
    inner.starts_with(&outer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_folder_name() {
        assert!(validate_folder_name("a_b2").is_ok());
        assert!(validate_folder_name(&"x".repeat(64)).is_ok());

        let too_long = "x".repeat(65);
        for bad in ["", "a b", "dot.dir", "slash/", "한글", too_long.as_str()] {
            assert!(
                matches!(
                    validate_folder_name(bad),
                    Err(DirscopeError::NameValidationFailed { .. })
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_compose_target_name_keeps_extension() {
        assert_eq!(
            compose_target_name("photo.jpg", false, Some("holiday")).unwrap(),
            "holiday.jpg"
        );
        assert_eq!(
            compose_target_name("photo.jpg", false, Some("  ")).unwrap(),
            "photo.jpg"
        );
        assert_eq!(compose_target_name("photo.jpg", false, None).unwrap(), "photo.jpg");
        assert_eq!(compose_target_name("README", false, Some("NOTES")).unwrap(), "NOTES");
    }

    #[test]
    fn test_compose_target_name_directories_keep_dots() {
        assert_eq!(compose_target_name("v1.2", true, None).unwrap(), "v1.2");
        assert_eq!(compose_target_name("v1.2", true, Some("v2")).unwrap(), "v2");
    }

    #[test]
    fn test_compose_target_name_rejects_separators() {
        for bad in ["a/b", "..", ".", "x\\y"] {
            assert!(matches!(
                compose_target_name("f.txt", false, Some(bad)),
                Err(DirscopeError::NameValidationFailed { .. })
            ));
        }
    }
}
