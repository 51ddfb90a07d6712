//! 설정 파일
//!
//! `$DIRSCOPE_SETTINGS_FILE` 또는 `~/.dirscope/settings.toml`에서 읽습니다.
//! 파일이 없으면 기본값을 씁니다.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_ENV: &str = "DIRSCOPE_SETTINGS_FILE";

/// 시작 테마
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 시작 디렉토리 (없으면 현재 작업 디렉토리)
    pub start_dir: Option<PathBuf>,
    pub show_hidden: bool,
    /// back 기록 최대 길이 (0이면 무제한)
    pub history_limit: usize,
    /// 파일 삭제 전 확인 (디렉토리는 항상 확인)
    pub confirm_file_delete: bool,
    pub theme: ThemeName,
    /// `RUST_LOG`가 없을 때 쓰는 로그 레벨
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: true,
            history_limit: 100,
            confirm_file_delete: true,
            theme: ThemeName::Dark,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 설정 파일 경로
    pub fn settings_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".dirscope").join("settings.toml"))
    }

    /// 기본 위치에서 로드
    pub fn load() -> Result<Self> {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 지정한 파일에서 로드 (없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.start_dir {
            if dir.as_os_str().is_empty() {
                bail!("start_dir must not be empty");
            }
        }
        if self.log_level.trim().is_empty() {
            bail!("log_level must not be empty");
        }
        Ok(())
    }

    /// 시작 디렉토리 결정
    ///
    /// 설정값이 디렉토리가 아니면 현재 작업 디렉토리, 그것도 없으면 홈.
    pub fn resolve_start_dir(&self) -> PathBuf {
        let configured = self.start_dir.as_ref().filter(|dir| dir.is_dir()).cloned();
        let candidate = configured
            .or_else(|| env::current_dir().ok())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));
        candidate.canonicalize().unwrap_or(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.show_hidden);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            "show_hidden = false\ntheme = \"light\"\nhistory_limit = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.show_hidden);
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.history_limit, 5);
        assert!(config.confirm_file_delete);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "theme = \"neon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("settings.toml"));
    }

    #[test]
    fn test_empty_log_level_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "log_level = \"  \"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_start_dir() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            start_dir: Some(temp.path().to_path_buf()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_start_dir(),
            temp.path().canonicalize().unwrap()
        );

        let missing = Config {
            start_dir: Some(temp.path().join("missing")),
            ..Config::default()
        };
        assert!(missing.resolve_start_dir().is_dir());
    }
}
