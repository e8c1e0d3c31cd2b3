//! E85/일반 휘발유(E10) 2성분 혼합 계산.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{self, fill_template, Translator};

/// E85 연료의 에탄올 비율(고정 가정).
pub const E85_ETHANOL_FRACTION: f64 = 0.85;
/// 일반 휘발유(E10)의 에탄올 비율(고정 가정).
pub const REGULAR_ETHANOL_FRACTION: f64 = 0.10;

/// 선택 가능한 목표 에탄올 비율.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetBlend {
    #[default]
    E10,
    E15,
    E30,
    E50,
    E85,
}

impl TargetBlend {
    /// 콤보박스 표시 순서.
    pub const ALL: [TargetBlend; 5] = [
        TargetBlend::E10,
        TargetBlend::E15,
        TargetBlend::E30,
        TargetBlend::E50,
        TargetBlend::E85,
    ];

    /// 목표 에탄올 퍼센트(정수).
    pub fn percent(self) -> u8 {
        match self {
            TargetBlend::E10 => 10,
            TargetBlend::E15 => 15,
            TargetBlend::E30 => 30,
            TargetBlend::E50 => 50,
            TargetBlend::E85 => 85,
        }
    }

    /// 계산에 쓰는 비율(0~1).
    pub fn fraction(self) -> f64 {
        f64::from(self.percent()) / 100.0
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetBlend::E10 => "10",
            TargetBlend::E15 => "15",
            TargetBlend::E30 => "30",
            TargetBlend::E50 => "50",
            TargetBlend::E85 => "85",
        }
    }

    /// "30", "30%", "E30" 형태의 문자열을 해석한다. 목록에 없는 값은 None.
    pub fn from_percent_text(text: &str) -> Option<Self> {
        let t = text.trim().trim_end_matches('%');
        let t = t.strip_prefix(['E', 'e']).unwrap_or(t).trim();
        Self::ALL.into_iter().find(|b| b.label() == t)
    }
}

impl std::fmt::Display for TargetBlend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.percent())
    }
}

/// 혼합 계산 입력. 에탄올 값은 모두 비율(퍼센트/100)이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelMixInput {
    /// 탱크 용량 [gal]
    pub tank_capacity: f64,
    /// 현재 연료량 [gal]
    pub current_fuel: f64,
    /// 현재 연료의 에탄올 비율
    pub current_ethanol: f64,
    /// 목표 에탄올 비율
    pub target_ethanol: f64,
}

impl FuelMixInput {
    /// 남은 탱크 공간 [gal]. 0 이하일 수 있다.
    pub fn available_space(&self) -> f64 {
        self.tank_capacity - self.current_fuel
    }
}

/// 계산 성공 결과. 값은 반올림하지 않은 원본이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuelMix {
    /// E85와 일반 휘발유를 나눠 넣는 경우.
    Split {
        e85_gallons: f64,
        regular_gallons: f64,
        target_ethanol: f64,
    },
    /// 목표가 E85이면 남은 공간을 전부 E85로 채운 뒤의 비율만 보고한다.
    FillWithE85 { resulting_ethanol: f64 },
}

/// 입력 조합으로는 목표를 만들 수 없는 경우.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MixError {
    #[error("no space available in the tank to add fuel")]
    NoSpaceAvailable,
    #[error("target ethanol percentage not reachable (e85={e85_gallons}, regular={regular_gallons})")]
    InfeasibleTarget {
        e85_gallons: f64,
        regular_gallons: f64,
    },
}

/// 주입할 E85/일반 휘발유 양을 계산한다.
///
/// `x + y = 남은 공간`, `0.85x + 0.10y + 현재 에탄올량 = 목표비율 × 탱크용량`을
/// `x`에 대해 풀어낸 닫힌 식을 사용한다. 음수 판정은 허용오차 없이 0과 직접 비교한다.
pub fn calculate_fuel_mix(input: &FuelMixInput) -> Result<FuelMix, MixError> {
    let available = input.available_space();
    if available <= 0.0 {
        return Err(MixError::NoSpaceAvailable);
    }

    let current_ethanol_volume = input.current_fuel * input.current_ethanol;

    if input.target_ethanol == E85_ETHANOL_FRACTION {
        let total_fuel = input.current_fuel + available;
        let total_ethanol = current_ethanol_volume + available * E85_ETHANOL_FRACTION;
        return Ok(FuelMix::FillWithE85 {
            resulting_ethanol: total_ethanol / total_fuel,
        });
    }

    let x = (input.target_ethanol * input.tank_capacity
        - current_ethanol_volume
        - REGULAR_ETHANOL_FRACTION * available)
        / (E85_ETHANOL_FRACTION - REGULAR_ETHANOL_FRACTION);
    let y = available - x;

    if x < 0.0 || y < 0.0 {
        return Err(MixError::InfeasibleTarget {
            e85_gallons: x,
            regular_gallons: y,
        });
    }

    Ok(FuelMix::Split {
        e85_gallons: x,
        regular_gallons: y,
        target_ethanol: input.target_ethanol,
    })
}

/// 4개의 실수 입력을 받아 결과 문장(영문)을 돌려준다.
pub fn compute(
    tank_capacity: f64,
    current_fuel: f64,
    current_ethanol: f64,
    target_ethanol: f64,
) -> String {
    let input = FuelMixInput {
        tank_capacity,
        current_fuel,
        current_ethanol,
        target_ethanol,
    };
    render_outcome(&calculate_fuel_mix(&input), &Translator::new("en"))
}

/// 표시용 숫자. 항상 소수점 둘째 자리까지 찍는다(`30.0`이 아니라 `30.00`).
///
/// 반올림은 포매터에 맡긴다. 이진값 그대로 반올림하고 정확한 중간값은 짝수 쪽으로
/// 보내므로 75.625는 75.62가 된다. `(v * 100).round()`는 75.63을 만든다.
fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

/// 계산 결과를 번역기 언어로 렌더링한다.
pub fn render_outcome(outcome: &Result<FuelMix, MixError>, tr: &Translator) -> String {
    use i18n::keys::*;
    match outcome {
        Err(MixError::NoSpaceAvailable) => tr.t(RESULT_NO_SPACE),
        Err(MixError::InfeasibleTarget { .. }) => tr.t(RESULT_INFEASIBLE),
        Ok(FuelMix::FillWithE85 { resulting_ethanol }) => fill_template(
            &tr.t(RESULT_RESULTING_ETHANOL),
            &[("percent", fmt2(resulting_ethanol * 100.0))],
        ),
        Ok(FuelMix::Split {
            e85_gallons,
            regular_gallons,
            target_ethanol,
        }) => [
            fill_template(&tr.t(RESULT_E85_NEEDED), &[("gallons", fmt2(*e85_gallons))]),
            fill_template(
                &tr.t(RESULT_REGULAR_NEEDED),
                &[("gallons", fmt2(*regular_gallons))],
            ),
            fill_template(
                &tr.t(RESULT_NEW_ETHANOL),
                &[("percent", fmt2(target_ethanol * 100.0))],
            ),
        ]
        .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tank: f64, fuel: f64, ethanol: f64, target: f64) -> FuelMixInput {
        FuelMixInput {
            tank_capacity: tank,
            current_fuel: fuel,
            current_ethanol: ethanol,
            target_ethanol: target,
        }
    }

    #[test]
    fn empty_tank_to_e30() {
        let mix = calculate_fuel_mix(&input(10.0, 0.0, 0.0, 0.30)).unwrap();
        match mix {
            FuelMix::Split {
                e85_gallons,
                regular_gallons,
                ..
            } => {
                assert_eq!(fmt2(e85_gallons), "2.67");
                assert_eq!(fmt2(regular_gallons), "7.33");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn full_tank_has_no_space() {
        assert_eq!(
            calculate_fuel_mix(&input(10.0, 10.0, 0.1, 0.30)),
            Err(MixError::NoSpaceAvailable)
        );
        assert_eq!(
            calculate_fuel_mix(&input(10.0, 12.0, 0.1, 0.85)),
            Err(MixError::NoSpaceAvailable)
        );
    }

    #[test]
    fn nearly_full_tank_reaches_e10_but_not_e50() {
        // 1 gal 남은 상태에서 E5 9 gal: x = (1.0 - 0.45 - 0.1)/0.75 = 0.6, y = 0.4
        let ok = calculate_fuel_mix(&input(10.0, 9.0, 0.05, 0.10)).unwrap();
        assert!(matches!(ok, FuelMix::Split { .. }));
        // E50 목표는 1 gal로 불가능
        let err = calculate_fuel_mix(&input(10.0, 9.0, 0.05, 0.50)).unwrap_err();
        assert!(matches!(err, MixError::InfeasibleTarget { regular_gallons, .. } if regular_gallons < 0.0));
    }

    #[test]
    fn e85_target_fills_with_e85() {
        let mix = calculate_fuel_mix(&input(20.0, 5.0, 0.10, 0.85)).unwrap();
        let FuelMix::FillWithE85 { resulting_ethanol } = mix else {
            panic!("expected fill");
        };
        let expected = (5.0 * 0.10 + 15.0 * 0.85) / 20.0;
        assert!((resulting_ethanol - expected).abs() < 1e-12);
    }

    #[test]
    fn halfway_values_round_to_even() {
        assert_eq!(fmt2(75.625), "75.62");
        assert_eq!(fmt2(78.125), "78.12");
        assert_eq!(fmt2(68.846_153_846_153_84), "68.85");
        assert_eq!(fmt2(30.0), "30.00");
    }

    #[test]
    fn target_blend_parsing() {
        assert_eq!(TargetBlend::from_percent_text("30"), Some(TargetBlend::E30));
        assert_eq!(TargetBlend::from_percent_text(" 85% "), Some(TargetBlend::E85));
        assert_eq!(TargetBlend::from_percent_text("e15"), Some(TargetBlend::E15));
        assert_eq!(TargetBlend::from_percent_text("20"), None);
        assert!((TargetBlend::E50.fraction() - 0.50).abs() < 1e-12);
    }
}
