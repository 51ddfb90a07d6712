//! 파일 작업 모델
//!
//! 작업 종류와 완료 보고 구조

use std::path::PathBuf;

/// 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Copy,
    Move,
    Delete,
    Create,
}

impl OperationType {
    /// 작업 유형 이름 반환
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Copy => "Copy",
            OperationType::Move => "Move",
            OperationType::Delete => "Delete",
            OperationType::Create => "Create",
        }
    }

    /// 완료 메시지용 과거형
    pub fn past_tense(&self) -> &'static str {
        match self {
            OperationType::Copy => "Copied",
            OperationType::Move => "Moved",
            OperationType::Delete => "Deleted",
            OperationType::Create => "Created",
        }
    }
}

/// 완료된 작업 보고
#[derive(Debug, Clone)]
pub struct OperationReport {
    pub operation: OperationType,
    /// 원본 (생성 작업은 만들어진 경로)
    pub source: PathBuf,
    /// 결과 경로 (삭제는 None)
    pub destination: Option<PathBuf>,
    /// 트리/목록을 다시 읽은 디렉토리
    pub refreshed: Vec<PathBuf>,
}

impl OperationReport {
    /// 토스트용 한 줄 요약
    pub fn summary(&self) -> String {
        let name = |p: &PathBuf| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.to_string_lossy().to_string())
        };

        match &self.destination {
            Some(dest) if self.operation != OperationType::Create => format!(
                "{} {} -> {}",
                self.operation.past_tense(),
                name(&self.source),
                dest.display()
            ),
            _ => format!("{} {}", self.operation.past_tense(), name(&self.source)),
        }
    }
}

/// 작업 결과
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    /// 실행 및 갱신 완료
    Completed(OperationReport),
    /// 사용자가 선택/확인 단계에서 취소 (부작용 없음)
    Cancelled,
}

impl OperationOutcome {
    pub fn report(&self) -> Option<&OperationReport> {
        match self {
            OperationOutcome::Completed(report) => Some(report),
            OperationOutcome::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_type_names() {
        assert_eq!(OperationType::Copy.name(), "Copy");
        assert_eq!(OperationType::Delete.past_tense(), "Deleted");
    }

    #[test]
    fn test_report_summary() {
        let copy = OperationReport {
            operation: OperationType::Copy,
            source: PathBuf::from("/data/a.txt"),
            destination: Some(PathBuf::from("/backup/a.txt")),
            refreshed: vec![],
        };
        assert_eq!(copy.summary(), "Copied a.txt -> /backup/a.txt");

        let created = OperationReport {
            operation: OperationType::Create,
            source: PathBuf::from("/data/new_dir"),
            destination: Some(PathBuf::from("/data/new_dir")),
            refreshed: vec![],
        };
        assert_eq!(created.summary(), "Created new_dir");
    }
}
