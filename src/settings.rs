//! 입력 필드 문자열을 세션 간에 보존하는 키-값 저장소.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// 저장소 조직/애플리케이션 네임스페이스.
pub const ORGANIZATION: &str = "E85Calculator";
pub const APPLICATION: &str = "Settings";

/// 저장소 로드/저장 오류.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("저장소 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("저장소 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("플랫폼 설정 디렉터리를 찾을 수 없음")]
    NoConfigDir,
}

/// 필드 이름 → 원문 문자열 저장소.
pub trait SettingsStore {
    fn value(&self, key: &str) -> Option<String>;
    fn set_value(&mut self, key: &str, value: &str);
    /// 변경 사항을 영속화한다. 메모리 저장소는 아무 일도 하지 않는다.
    fn sync(&mut self) -> Result<(), SettingsError>;
}

/// 디스크 없이 동작하는 저장소.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn sync(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    fields: BTreeMap<String, String>,
}

/// TOML 파일 기반 저장소. 형식은 `[fields]` 테이블 하나이다.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
    data: SettingsFile,
}

impl TomlSettingsStore {
    /// 플랫폼 설정 디렉터리 아래 `E85Calculator/Settings.toml`을 연다.
    pub fn open_default() -> Result<Self, SettingsError> {
        Self::open(default_path()?)
    }

    /// 지정 경로의 저장소를 연다. 파일이 없으면 빈 저장소로 시작한다.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            SettingsFile::default()
        };
        tracing::debug!(path = %path.display(), fields = data.fields.len(), "settings store opened");
        Ok(Self { path, data })
    }
}

impl SettingsStore for TomlSettingsStore {
    fn value(&self, key: &str) -> Option<String> {
        self.data.fields.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: &str) {
        self.data.fields.insert(key.to_string(), value.to_string());
    }

    fn sync(&mut self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&self.data)?;
        fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "settings store saved");
        Ok(())
    }
}

/// `<config dir>/E85Calculator/Settings.toml`
pub fn default_path() -> Result<PathBuf, SettingsError> {
    let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(base.join(ORGANIZATION).join(format!("{APPLICATION}.toml")))
}
