//! 혼합 계산기의 성질 회귀 테스트.
use e85_fuel_mixer::blend::{
    calculate_fuel_mix, compute, FuelMix, FuelMixInput, MixError, TargetBlend,
};
use pretty_assertions::assert_eq;

fn input(tank: f64, fuel: f64, ethanol: f64, target: f64) -> FuelMixInput {
    FuelMixInput {
        tank_capacity: tank,
        current_fuel: fuel,
        current_ethanol: ethanol,
        target_ethanol: target,
    }
}

fn split(mix: Result<FuelMix, MixError>) -> (f64, f64) {
    match mix {
        Ok(FuelMix::Split {
            e85_gallons,
            regular_gallons,
            ..
        }) => (e85_gallons, regular_gallons),
        other => panic!("expected split, got {other:?}"),
    }
}

#[test]
fn empty_tank_report_text() {
    assert_eq!(
        compute(10.0, 0.0, 0.0, 0.30),
        "E85 Needed: 2.67 gallons\nRegular Gasoline Needed: 7.33 gallons\nNew Ethanol Percentage: 30.00%"
    );
}

#[test]
fn no_space_whenever_fuel_reaches_capacity() {
    for (tank, fuel) in [(10.0, 10.0), (10.0, 10.5), (0.0, 0.0), (15.0, 40.0)] {
        for target in TargetBlend::ALL {
            assert_eq!(
                compute(tank, fuel, 0.1, target.fraction()),
                "No space available in the tank to add fuel."
            );
        }
    }
}

#[test]
fn e85_target_reports_blended_percentage() {
    let cases = [
        ((10.0, 0.0, 0.0), "85.00"),
        ((16.0, 4.0, 0.10), "66.25"),
        ((20.0, 19.0, 0.30), "32.75"),
        ((12.5, 6.25, 0.5), "67.50"),
        ((13.0, 3.0, 0.15), "68.85"),
    ];
    for ((tank, fuel, ethanol), percent) in cases {
        assert_eq!(
            compute(tank, fuel, ethanol, 0.85),
            format!("Resulting Ethanol Percentage: {percent}%")
        );
    }
}

#[test]
fn e85_halfway_percentage_rounds_to_even() {
    // 75.625, 78.125는 정확한 중간값
    assert_eq!(
        compute(16.0, 2.0, 0.10, 0.85),
        "Resulting Ethanol Percentage: 75.62%"
    );
    assert_eq!(
        compute(8.0, 1.0, 0.30, 0.85),
        "Resulting Ethanol Percentage: 78.12%"
    );
}

#[test]
fn feasible_split_balances_volume_and_ethanol() {
    let cases = [
        (10.0, 0.0, 0.0, 0.30),
        (18.0, 5.0, 0.10, 0.50),
        (14.0, 3.5, 0.30, 0.15),
        (20.0, 2.0, 0.85, 0.30),
    ];
    for (tank, fuel, ethanol, target) in cases {
        let (x, y) = split(calculate_fuel_mix(&input(tank, fuel, ethanol, target)));
        assert!(((x + y) - (tank - fuel)).abs() < 1e-9);
        let ethanol_total = 0.85 * x + 0.10 * y + fuel * ethanol;
        assert!((ethanol_total - target * tank).abs() < 1e-9);
    }
}

#[test]
fn higher_target_never_needs_less_e85() {
    let tank = 16.0;
    let fuel = 2.0;
    let ethanol = 0.10;
    let mut previous = f64::NEG_INFINITY;
    for target in [0.10, 0.15, 0.30, 0.50] {
        let x = match calculate_fuel_mix(&input(tank, fuel, ethanol, target)) {
            Ok(FuelMix::Split { e85_gallons, .. }) => e85_gallons,
            Err(MixError::InfeasibleTarget { e85_gallons, .. }) => e85_gallons,
            other => panic!("unexpected {other:?}"),
        };
        assert!(x >= previous, "target {target}: {x} < {previous}");
        previous = x;
    }
}

#[test]
fn nearly_full_tank_feasibility() {
    // 남은 1 gal: E10 목표는 E85 0.6 + 일반 0.4로 가능
    let (x, y) = split(calculate_fuel_mix(&input(10.0, 9.0, 0.05, 0.10)));
    assert!((x - 0.6).abs() < 1e-9);
    assert!((y - 0.4).abs() < 1e-9);

    // 같은 조건에서 E30은 E85가 1 gal을 넘어 일반 휘발유가 음수
    let err = calculate_fuel_mix(&input(10.0, 9.0, 0.05, 0.30)).unwrap_err();
    assert!(matches!(err, MixError::InfeasibleTarget { regular_gallons, .. } if regular_gallons < 0.0));
    assert_eq!(
        compute(10.0, 9.0, 0.05, 0.30),
        "Desired ethanol percentage cannot be achieved with given constraints."
    );
}

#[test]
fn already_above_target_is_infeasible() {
    // 현재 E85 8 gal에 E10 목표: E85 양이 음수
    let err = calculate_fuel_mix(&input(10.0, 8.0, 0.85, 0.10)).unwrap_err();
    assert!(matches!(err, MixError::InfeasibleTarget { e85_gallons, .. } if e85_gallons < 0.0));
}

#[test]
fn exact_zero_e85_is_accepted() {
    // 빈 탱크에 E10 목표: x = (1.0 - 0 - 1.0)/0.75 = 0 정확히
    let (x, y) = split(calculate_fuel_mix(&input(10.0, 0.0, 0.0, 0.10)));
    assert_eq!(x, 0.0);
    assert_eq!(y, 10.0);
}

#[test]
fn identical_inputs_give_identical_output() {
    let a = compute(13.0, 4.2, 0.12, 0.50);
    let b = compute(13.0, 4.2, 0.12, 0.50);
    assert_eq!(a, b);
}
