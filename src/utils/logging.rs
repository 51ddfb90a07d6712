//! 파일 기반 tracing 설정
//!
//! TUI가 터미널을 점유하므로 로그는 항상 파일로만 기록합니다.
//! 위치: `<state dir>/dirscope/logs/dirscope-<PID>.log`

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// 로그 디렉토리 결정
///
/// state dir → data local dir → temp dir 순으로 시도
pub fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|base| base.join("dirscope").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("dirscope-logs"))
}

/// 현재 프로세스의 로그 파일 경로
pub fn log_file_path() -> PathBuf {
    log_dir().join(format!("dirscope-{}.log", std::process::id()))
}

/// RUST_LOG가 없으면 설정 파일의 레벨을 기본값으로 사용
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 전역 subscriber 설치 후 로그 파일 경로 반환
pub fn init(default_level: &str) -> Result<PathBuf> {
    let path = log_file_path();
    init_at(&path, default_level)?;
    Ok(path)
}

/// 지정 경로로 전역 subscriber 설치
pub fn init_at(path: &Path, default_level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let log_file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_filter(default_level))
        .try_init()
        .context("Tracing subscriber already installed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_contains_pid() {
        let path = log_file_path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dirscope-"));
        assert!(name.contains(&std::process::id().to_string()));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_build_filter_falls_back_on_garbage_level() {
        // 잘못된 레벨 문자열이어도 패닉 없이 필터 생성
        let _ = build_filter("info");
        let _ = build_filter("not a level ===");
    }
}
