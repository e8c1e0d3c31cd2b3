use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::blend::TargetBlend;
use crate::i18n::{fill_template, keys, Translator};

/// 결과 출력 후 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CopyResult,
    Recalculate,
    Exit,
}

/// 줄 단위 입력/출력 쌍. 테스트에서는 메모리 버퍼를 넣는다.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn println(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 `InputClosed`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    /// 필드 값을 묻는다. 빈 입력은 현재 값을 유지한다.
    pub fn prompt_field(
        &mut self,
        tr: &Translator,
        label_key: &str,
        current: &str,
    ) -> Result<String, AppError> {
        let prompt = fill_template(
            &tr.t(keys::PROMPT_FIELD),
            &[("label", tr.t(label_key)), ("current", current.to_string())],
        );
        let line = self.read_line(&prompt)?;
        Ok(if line.is_empty() {
            current.to_string()
        } else {
            line
        })
    }

    /// 목표 에탄올을 묻는다. 목록에 없는 값이면 다시 묻는다.
    pub fn prompt_target(
        &mut self,
        tr: &Translator,
        current: TargetBlend,
    ) -> Result<TargetBlend, AppError> {
        let prompt = fill_template(
            &tr.t(keys::PROMPT_TARGET),
            &[("current", current.label().to_string())],
        );
        loop {
            let line = self.read_line(&prompt)?;
            if line.is_empty() {
                return Ok(current);
            }
            match TargetBlend::from_percent_text(&line) {
                Some(target) => return Ok(target),
                None => self.println(&tr.t(keys::ERROR_INVALID_TARGET))?,
            }
        }
    }

    /// 결과 출력 후 다음 동작을 고른다.
    pub fn next_action(&mut self, tr: &Translator) -> Result<MenuChoice, AppError> {
        self.println(&tr.t(keys::CLI_MENU))?;
        loop {
            let sel = self.read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
            match sel.to_lowercase().as_str() {
                "c" => return Ok(MenuChoice::CopyResult),
                "r" | "" => return Ok(MenuChoice::Recalculate),
                "q" | "0" => return Ok(MenuChoice::Exit),
                _ => self.println(&tr.t(keys::INVALID_SELECTION_RETRY))?,
            }
        }
    }
}
