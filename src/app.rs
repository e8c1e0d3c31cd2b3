use std::io::{BufRead, Write};

use thiserror::Error;

use crate::blend::TargetBlend;
use crate::clipboard::ClipboardSink;
use crate::form::{CalculationOutcome, FormField, FuelForm};
use crate::i18n::{fill_template, keys, Translator};
use crate::settings::SettingsStore;
use crate::ui_cli::{MenuChoice, Prompter};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 표준 입력이 닫혔다.
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

/// 한 번에 계산할 입력 원문.
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot {
    pub tank_capacity: String,
    pub current_fuel: String,
    pub current_ethanol: String,
    pub target: TargetBlend,
    pub copy: bool,
}

/// 인자로 받은 값으로 한 번 계산하고 결과를 출력한다.
pub fn run_once<W: Write>(
    job: &OneShot,
    out: &mut W,
    tr: &Translator,
    store: &mut dyn SettingsStore,
    clipboard: &mut dyn ClipboardSink,
) -> Result<CalculationOutcome, AppError> {
    let mut form = FuelForm {
        tank_capacity: job.tank_capacity.clone(),
        current_fuel: job.current_fuel.clone(),
        current_ethanol: job.current_ethanol.clone(),
        target: job.target,
        result: String::new(),
    };
    let outcome = form.evaluate(tr);
    writeln!(out, "{}", form.result)?;
    if let CalculationOutcome::Computed(_) = outcome {
        if let Err(e) = form.save(store) {
            tracing::warn!("failed to save inputs: {e}");
        }
    }
    if job.copy {
        writeln!(out, "{}", copy_message(&form, clipboard, tr))?;
    }
    Ok(outcome)
}

/// 결과를 복사하고 안내 문구를 돌려준다. 복사 실패는 경고로만 남긴다.
fn copy_message(form: &FuelForm, clipboard: &mut dyn ClipboardSink, tr: &Translator) -> String {
    match form.copy_result(clipboard) {
        Ok(()) => tr.t(keys::COPY_DONE),
        Err(e) => {
            tracing::warn!("clipboard copy failed: {e}");
            fill_template(&tr.t(keys::COPY_FAILED), &[("error", e.to_string())])
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 저장소 값으로 필드를 채운 뒤 묻고, 계산 결과를 출력하고, 복사/재계산/종료를 고른다.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    tr: &Translator,
    default_target: TargetBlend,
    store: &mut dyn SettingsStore,
    clipboard: &mut dyn ClipboardSink,
) -> Result<(), AppError> {
    let mut form = FuelForm::new(default_target);
    form.load(store);
    prompter.println(&tr.t(keys::CLI_TITLE))?;

    loop {
        match session_round(prompter, tr, &mut form, store, clipboard) {
            Ok(MenuChoice::Exit) | Err(AppError::InputClosed) => break,
            Ok(_) => {}
            Err(e) => return Err(e),
        }
    }
    prompter.println(&tr.t(keys::APP_EXIT))?;
    Ok(())
}

fn session_round<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    tr: &Translator,
    form: &mut FuelForm,
    store: &mut dyn SettingsStore,
    clipboard: &mut dyn ClipboardSink,
) -> Result<MenuChoice, AppError> {
    for field in FormField::ORDER {
        let value = prompter.prompt_field(tr, field.label_key(), form.field(field))?;
        *form.field_mut(field) = value;
    }
    form.target = prompter.prompt_target(tr, form.target)?;

    if let Err(e) = form.calculate(store, tr) {
        tracing::warn!("failed to save inputs: {e}");
        prompter.println(&fill_template(
            &tr.t(keys::STORE_SAVE_FAILED),
            &[("error", e.to_string())],
        ))?;
    }
    prompter.println(&form.result)?;

    loop {
        match prompter.next_action(tr)? {
            MenuChoice::CopyResult => {
                prompter.println(&copy_message(form, clipboard, tr))?;
            }
            other => return Ok(other),
        }
    }
}
