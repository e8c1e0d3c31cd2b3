use std::process::ExitCode;

use clap::Parser;
use e85_fuel_mixer::{
    app::{self, AppError, OneShot},
    blend::TargetBlend,
    clipboard::SystemClipboard,
    config,
    form::CalculationOutcome,
    i18n::{self, Translator},
    logging,
    settings::{MemorySettingsStore, SettingsStore, TomlSettingsStore},
    ui_cli::Prompter,
};

/// E85/일반 휘발유 주입량 계산기 (CLI)
#[derive(Debug, Parser)]
#[command(name = "e85_fuel_mixer_cli", version, about)]
struct Cli {
    /// 탱크 용량 [gal]
    #[arg(long = "tank")]
    tank_capacity: Option<String>,
    /// 현재 연료량 [gal]
    #[arg(long = "fuel")]
    current_fuel: Option<String>,
    /// 현재 에탄올 % (10 = 10%)
    #[arg(long = "ethanol")]
    current_ethanol: Option<String>,
    /// 목표 에탄올 % (10, 15, 30, 50, 85)
    #[arg(long, value_parser = parse_target)]
    target: Option<TargetBlend>,
    /// 결과를 클립보드로 복사
    #[arg(long)]
    copy: bool,
    /// 언어 (auto/en/ko)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 입력값 저장소를 쓰지 않음(불러오기/저장 모두)
    #[arg(long)]
    no_save: bool,
}

fn parse_target(s: &str) -> Result<TargetBlend, String> {
    TargetBlend::from_percent_text(s)
        .ok_or_else(|| format!("'{s}' is not one of 10, 15, 30, 50, 85"))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::from(3)
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, AppError> {
    let (cfg, cfg_err) = match config::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    logging::init(&cfg.log_filter);
    if let Some(e) = cfg_err {
        tracing::warn!("config.toml ignored, using defaults: {e}");
    }

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let mut store = open_store(cli.no_save);
    let mut clipboard = SystemClipboard;
    let target = cli.target.unwrap_or(cfg.default_target);

    match (cli.tank_capacity, cli.current_fuel, cli.current_ethanol) {
        (Some(tank_capacity), Some(current_fuel), Some(current_ethanol)) => {
            let job = OneShot {
                tank_capacity,
                current_fuel,
                current_ethanol,
                target,
                copy: cli.copy,
            };
            let outcome = app::run_once(
                &job,
                &mut std::io::stdout(),
                &tr,
                store.as_mut(),
                &mut clipboard,
            )?;
            Ok(match outcome {
                CalculationOutcome::Computed(Ok(_)) => ExitCode::SUCCESS,
                CalculationOutcome::Computed(Err(_)) => ExitCode::from(1),
                CalculationOutcome::Rejected(_) => ExitCode::from(2),
            })
        }
        _ => {
            let mut prompter = Prompter::stdio();
            app::run(&mut prompter, &tr, target, store.as_mut(), &mut clipboard)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(no_save: bool) -> Box<dyn SettingsStore> {
    if no_save {
        return Box::new(MemorySettingsStore::new());
    }
    match TomlSettingsStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("settings store unavailable, inputs will not persist: {e}");
            Box::new(MemorySettingsStore::new())
        }
    }
}
