//! 입력 폼의 상태와 동작. GUI/CLI 모두 이 모델을 통해 계산기를 호출한다.

use thiserror::Error;

use crate::blend::{self, FuelMix, FuelMixInput, MixError, TargetBlend};
use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::i18n::{keys, Translator};
use crate::settings::{SettingsError, SettingsStore};

/// 저장소에 보존되는 자유 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    TankCapacity,
    CurrentFuel,
    CurrentEthanol,
}

/// 포커스 이동 대상. 마지막 필드 다음은 계산 버튼이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FormField),
    CalculateButton,
}

impl FormField {
    /// 화면 배치 및 Enter 포커스 순서.
    pub const ORDER: [FormField; 3] = [
        FormField::TankCapacity,
        FormField::CurrentFuel,
        FormField::CurrentEthanol,
    ];

    /// 저장소 키.
    pub fn key(self) -> &'static str {
        match self {
            FormField::TankCapacity => "tank_capacity",
            FormField::CurrentFuel => "current_fuel",
            FormField::CurrentEthanol => "current_ethanol",
        }
    }

    /// 라벨 번역 키.
    pub fn label_key(self) -> &'static str {
        match self {
            FormField::TankCapacity => keys::FIELD_TANK_CAPACITY,
            FormField::CurrentFuel => keys::FIELD_CURRENT_FUEL,
            FormField::CurrentEthanol => keys::FIELD_CURRENT_ETHANOL,
        }
    }

    /// Enter 입력 시 다음 포커스 대상.
    pub fn next_focus(self) -> FocusTarget {
        Self::ORDER
            .iter()
            .skip_while(|f| **f != self)
            .nth(1)
            .map_or(FocusTarget::CalculateButton, |f| FocusTarget::Field(*f))
    }
}

/// 입력 해석 오류. 계산기까지 도달하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("숫자가 아닌 입력: {field:?}")]
    InvalidNumber { field: FormField },
}

/// 계산 버튼 한 번의 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationOutcome {
    /// 입력 해석 성공 후 계산기가 돌려준 결과(성공 또는 도메인 실패).
    Computed(Result<FuelMix, MixError>),
    /// 입력이 숫자가 아니어서 계산하지 않았다.
    Rejected(InputError),
}

/// 폼 상태. 필드는 사용자가 입력한 원문 그대로 보관한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelForm {
    pub tank_capacity: String,
    pub current_fuel: String,
    pub current_ethanol: String,
    pub target: TargetBlend,
    pub result: String,
}

impl FuelForm {
    pub fn new(target: TargetBlend) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::TankCapacity => &self.tank_capacity,
            FormField::CurrentFuel => &self.current_fuel,
            FormField::CurrentEthanol => &self.current_ethanol,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::TankCapacity => &mut self.tank_capacity,
            FormField::CurrentFuel => &mut self.current_fuel,
            FormField::CurrentEthanol => &mut self.current_ethanol,
        }
    }

    /// 입력 문자열을 계산 입력으로 바꾼다. 에탄올 퍼센트는 100으로 나눈다.
    pub fn parse_inputs(&self) -> Result<FuelMixInput, InputError> {
        let parse = |field: FormField| {
            self.field(field)
                .trim()
                .parse::<f64>()
                .map_err(|_| InputError::InvalidNumber { field })
        };
        Ok(FuelMixInput {
            tank_capacity: parse(FormField::TankCapacity)?,
            current_fuel: parse(FormField::CurrentFuel)?,
            current_ethanol: parse(FormField::CurrentEthanol)? / 100.0,
            target_ethanol: self.target.fraction(),
        })
    }

    /// 계산을 수행해 `result`를 갱신한다.
    ///
    /// 입력 해석에 성공하면 결과와 관계없이 세 필드 원문을 저장소에 기록한다.
    /// 저장 실패는 결과 표시를 바꾸지 않고 오류로만 돌려준다.
    pub fn calculate(
        &mut self,
        store: &mut dyn SettingsStore,
        tr: &Translator,
    ) -> Result<CalculationOutcome, SettingsError> {
        let outcome = self.evaluate(tr);
        if let CalculationOutcome::Computed(_) = outcome {
            self.save(store)?;
        }
        Ok(outcome)
    }

    /// 저장소를 건드리지 않고 계산과 결과 표시만 수행한다.
    pub fn evaluate(&mut self, tr: &Translator) -> CalculationOutcome {
        let input = match self.parse_inputs() {
            Ok(input) => input,
            Err(err) => {
                tracing::debug!("input rejected: {err}");
                self.result = tr.t(keys::ERROR_INVALID_INPUT);
                return CalculationOutcome::Rejected(err);
            }
        };

        let outcome = blend::calculate_fuel_mix(&input);
        tracing::debug!(?input, ?outcome, "fuel mix calculated");
        self.result = blend::render_outcome(&outcome, tr);
        CalculationOutcome::Computed(outcome)
    }

    /// 세 필드와 결과를 비운다. 목표 비율은 유지한다.
    pub fn clear(&mut self) {
        for field in FormField::ORDER {
            self.field_mut(field).clear();
        }
        self.result.clear();
    }

    /// 저장소에서 필드 원문을 복원한다. 없는 키는 빈 문자열.
    pub fn load(&mut self, store: &dyn SettingsStore) {
        for field in FormField::ORDER {
            *self.field_mut(field) = store.value(field.key()).unwrap_or_default();
        }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        for field in FormField::ORDER {
            store.set_value(field.key(), self.field(field));
        }
        store.sync()
    }

    /// 표시 중인 결과를 그대로 클립보드로 보낸다.
    pub fn copy_result(&self, sink: &mut dyn ClipboardSink) -> Result<(), ClipboardError> {
        sink.copy_text(&self.result)
    }
}
