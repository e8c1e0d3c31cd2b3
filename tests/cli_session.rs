//! CLI 흐름(대화형/일회성) 테스트. 표준 입출력 대신 메모리 버퍼를 쓴다.
use e85_fuel_mixer::{
    app::{self, OneShot},
    blend::{FuelMix, MixError, TargetBlend},
    clipboard::{ClipboardError, ClipboardSink, RecordingClipboard},
    form::CalculationOutcome,
    i18n::Translator,
    settings::{MemorySettingsStore, SettingsStore, TomlSettingsStore},
    ui_cli::Prompter,
};

/// 항상 실패하는 클립보드.
struct UnavailableClipboard;

impl ClipboardSink for UnavailableClipboard {
    fn copy_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(arboard::Error::ClipboardNotSupported.into())
    }
}

fn run_session(input: &str, store: &mut MemorySettingsStore) -> (String, RecordingClipboard) {
    let tr = Translator::new("en");
    let mut clipboard = RecordingClipboard::default();
    let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
    app::run(&mut prompter, &tr, TargetBlend::E10, store, &mut clipboard).unwrap();
    let out = String::from_utf8(prompter.into_output()).unwrap();
    (out, clipboard)
}

#[test]
fn interactive_round_prints_result_and_copies() {
    let mut store = MemorySettingsStore::new();
    let (out, clipboard) = run_session("10\n0\n0\n30\nc\nq\n", &mut store);
    assert!(out.contains("E85 Needed: 2.67 gallons"));
    assert!(out.contains("Result copied to clipboard."));
    assert!(out.ends_with("Exiting application.\n"));
    assert_eq!(clipboard.copied.len(), 1);
    assert!(clipboard.copied[0].starts_with("E85 Needed: 2.67 gallons\n"));
    assert_eq!(store.value("tank_capacity").as_deref(), Some("10"));
}

#[test]
fn stored_values_prefill_prompts() {
    let mut store = MemorySettingsStore::new();
    store.set_value("tank_capacity", "16");
    store.set_value("current_fuel", "4");
    store.set_value("current_ethanol", "10");
    let (out, _) = run_session("\n\n\n85\nq\n", &mut store);
    assert!(out.contains("Tank Capacity (gal) [16]: "));
    assert!(out.contains("Resulting Ethanol Percentage: 66.25%"));
}

#[test]
fn invalid_number_shows_message_and_keeps_store_empty() {
    let mut store = MemorySettingsStore::new();
    let (out, _) = run_session("ten\n0\n0\n\nq\n", &mut store);
    assert!(out.contains("Please enter valid numbers."));
    assert!(store.is_empty());
}

#[test]
fn end_of_input_exits_cleanly() {
    let mut store = MemorySettingsStore::new();
    let (out, _) = run_session("10\n", &mut store);
    assert!(out.ends_with("Exiting application.\n"));
}

#[test]
fn one_shot_reports_outcome_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Settings.toml");
    let mut store = TomlSettingsStore::open(&path).unwrap();
    let mut clipboard = RecordingClipboard::default();
    let mut out = Vec::new();
    let job = OneShot {
        tank_capacity: "10".into(),
        current_fuel: "9".into(),
        current_ethanol: "5".into(),
        target: TargetBlend::E30,
        copy: true,
    };
    let outcome = app::run_once(
        &job,
        &mut out,
        &Translator::new("en"),
        &mut store,
        &mut clipboard,
    )
    .unwrap();
    assert!(matches!(
        outcome,
        CalculationOutcome::Computed(Err(MixError::InfeasibleTarget { .. }))
    ));
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Desired ethanol percentage cannot be achieved"));
    assert_eq!(
        clipboard.copied,
        vec!["Desired ethanol percentage cannot be achieved with given constraints.".to_string()]
    );

    let reopened = TomlSettingsStore::open(&path).unwrap();
    assert_eq!(reopened.value("current_ethanol").as_deref(), Some("5"));
}

#[test]
fn one_shot_in_korean() {
    let mut store = MemorySettingsStore::new();
    let mut clipboard = RecordingClipboard::default();
    let mut out = Vec::new();
    let job = OneShot {
        tank_capacity: "10".into(),
        current_fuel: "0".into(),
        current_ethanol: "0".into(),
        target: TargetBlend::E30,
        copy: false,
    };
    let outcome = app::run_once(
        &job,
        &mut out,
        &Translator::new("ko"),
        &mut store,
        &mut clipboard,
    )
    .unwrap();
    assert!(matches!(
        outcome,
        CalculationOutcome::Computed(Ok(FuelMix::Split { .. }))
    ));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "필요한 E85: 2.67 gal\n필요한 일반 휘발유: 7.33 gal\n새 에탄올 비율: 30.00%\n"
    );
    assert!(clipboard.copied.is_empty());
}

#[test]
fn one_shot_copy_failure_keeps_outcome() {
    let mut store = MemorySettingsStore::new();
    let mut out = Vec::new();
    let job = OneShot {
        tank_capacity: "10".into(),
        current_fuel: "0".into(),
        current_ethanol: "0".into(),
        target: TargetBlend::E30,
        copy: true,
    };
    let outcome = app::run_once(
        &job,
        &mut out,
        &Translator::new("en"),
        &mut store,
        &mut UnavailableClipboard,
    )
    .unwrap();
    assert!(matches!(
        outcome,
        CalculationOutcome::Computed(Ok(FuelMix::Split { .. }))
    ));
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("E85 Needed: 2.67 gallons\n"));
    assert!(text.contains("Clipboard error: "));
    assert_eq!(store.value("tank_capacity").as_deref(), Some("10"));
}

#[test]
fn interactive_copy_failure_is_reported_and_loop_continues() {
    let tr = Translator::new("en");
    let mut store = MemorySettingsStore::new();
    let mut prompter = Prompter::new("10\n0\n0\n30\nc\nq\n".as_bytes(), Vec::new());
    app::run(&mut prompter, &tr, TargetBlend::E10, &mut store, &mut UnavailableClipboard).unwrap();
    let out = String::from_utf8(prompter.into_output()).unwrap();
    assert!(out.contains("Clipboard error: "));
    assert!(out.ends_with("Exiting application.\n"));
}
