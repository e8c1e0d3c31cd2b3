//! 결과 문자열을 클립보드로 보내는 출력 지점.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("클립보드 접근 실패: {0}")]
    Access(#[from] arboard::Error),
}

/// 표시 중인 결과를 그대로 받아가는 대상.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// `arboard` 기반 시스템 클립보드. 복사할 때마다 새 핸들을 연다.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// 복사된 문자열을 기억만 하는 클립보드.
#[derive(Debug, Default, Clone)]
pub struct RecordingClipboard {
    pub copied: Vec<String>,
}

impl ClipboardSink for RecordingClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.copied.push(text.to_string());
        Ok(())
    }
}
