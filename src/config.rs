use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::blend::TargetBlend;

const APP_DIR: &str = "e85_fuel_mixer";
const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/en/ko)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 시작 시 선택되는 목표 에탄올
    pub default_target: TargetBlend,
    /// 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    pub always_on_top: bool,
    /// `RUST_LOG`가 없을 때 쓰는 tracing 필터
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            default_target: TargetBlend::default(),
            window_alpha: 1.0,
            always_on_top: false,
            log_filter: "warn".into(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// `<config dir>/e85_fuel_mixer/config.toml`. 플랫폼 디렉터리가 없으면 작업 디렉터리.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(default_path())
}

/// 지정 경로에서 설정을 로드한다. 파일이 없으면 기본값을 기록한 뒤 돌려준다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 기본 경로에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(default_path())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
