#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use e85_fuel_mixer::{
    blend::TargetBlend,
    clipboard::{ClipboardError, ClipboardSink},
    config,
    form::{FocusTarget, FormField, FuelForm},
    i18n::{self, fill_template, keys},
    logging,
    settings::{MemorySettingsStore, SettingsStore, TomlSettingsStore},
};
use eframe::{egui, App, Frame};
use std::{fs, path::Path};

const BG: egui::Color32 = egui::Color32::from_rgb(0x2C, 0x3E, 0x50);
const RESULT_BG: egui::Color32 = egui::Color32::from_rgb(0x34, 0x49, 0x5E);
const CALC_FILL: egui::Color32 = egui::Color32::from_rgb(0x1A, 0xBC, 0x9C);
const COPY_FILL: egui::Color32 = egui::Color32::from_rgb(0xF3, 0x9C, 0x12);
const CLEAR_FILL: egui::Color32 = egui::Color32::from_rgb(0xE7, 0x4C, 0x3C);

/// E85 연료 혼합 계산기 (GUI)
#[derive(Debug, Parser)]
struct GuiArgs {
    /// 언어 (auto/en/ko)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let (app_cfg, cfg_err) = match config::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    logging::init(&app_cfg.log_filter);
    if let Some(e) = cfg_err {
        tracing::warn!("config.toml ignored, using defaults: {e}");
    }

    let lang = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    let store = open_store();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([440.0, 560.0])
        .with_transparent(true);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "E85 Fuel Mixer",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::info!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, &lang, store))
        }),
    )
}

fn open_store() -> Box<dyn SettingsStore> {
    match TomlSettingsStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("settings store unavailable, inputs will not persist: {e}");
            Box::new(MemorySettingsStore::new())
        }
    }
}

/// 바이너리 폰트 바이트를 egui 기본 글꼴 뒤에 폴백으로 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 등록한다. 없으면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = Vec::new();
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        ]
        .iter()
        .map(std::path::PathBuf::from),
    );
    for path in candidates.iter().filter(|p| p.exists()) {
        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read system font ({}): {e}", path.display()))?;
        apply_font_bytes(ctx, bytes, "hangul_fallback");
        tracing::debug!(font = %path.display(), "fallback font loaded");
        return Ok(());
    }
    Err("No Hangul font found; Korean labels may not render.".into())
}

/// egui 출력 버퍼로 복사하는 클립보드. 실제 복사는 프레임 종료 시 eframe이 수행한다.
struct EguiClipboard<'a>(&'a egui::Context);

impl ClipboardSink for EguiClipboard<'_> {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.output_mut(|o| o.copied_text = text.to_string());
        Ok(())
    }
}

fn field_id(field: FormField) -> egui::Id {
    egui::Id::new(("fuel_field", field.key()))
}

fn colored_button(text: String, fill: egui::Color32, size: f32) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text)
            .size(size)
            .color(egui::Color32::WHITE),
    )
    .fill(fill)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    form: FuelForm,
    store: Box<dyn SettingsStore>,
    /// 다음 프레임에 포커스를 줄 대상
    pending_focus: Option<FocusTarget>,
    status: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
    settings_status: Option<String>,
    window_alpha: f32,
    always_on_top: bool,
    applied_on_top: Option<bool>,
}

impl GuiApp {
    fn new(config: config::Config, lang_code: &str, store: Box<dyn SettingsStore>) -> Self {
        let tr = i18n::Translator::new_with_pack(lang_code, config.language_pack_dir.as_deref());
        let mut form = FuelForm::new(config.default_target);
        form.load(&*store);
        Self {
            tr,
            form,
            store,
            pending_focus: Some(FocusTarget::Field(FormField::TankCapacity)),
            status: None,
            show_settings_modal: false,
            lang_input: config.language.clone(),
            settings_status: None,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            always_on_top: config.always_on_top,
            applied_on_top: None,
            config,
        }
    }

    fn calculate(&mut self) {
        match self.form.calculate(self.store.as_mut(), &self.tr) {
            Ok(_) => self.status = None,
            Err(e) => {
                tracing::warn!("failed to save inputs: {e}");
                self.status = Some(fill_template(
                    &self.tr.t(keys::STORE_SAVE_FAILED),
                    &[("error", e.to_string())],
                ));
            }
        }
    }

    fn copy_result(&mut self, ctx: &egui::Context) {
        let msg = match self.form.copy_result(&mut EguiClipboard(ctx)) {
            Ok(()) => self.tr.t(keys::COPY_DONE),
            Err(e) => fill_template(&self.tr.t(keys::COPY_FAILED), &[("error", e.to_string())]),
        };
        self.status = Some(msg);
    }

    fn take_focus(&mut self, target: FocusTarget, resp: &egui::Response) {
        if self.pending_focus == Some(target) {
            resp.request_focus();
            self.pending_focus = None;
        }
    }

    /// 입력 그룹: 세 필드 + 목표 에탄올 콤보.
    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.strong(tr.t(keys::INPUT_GROUP));
        ui.add_space(4.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("fuel_inputs")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for field in FormField::ORDER {
                        ui.label(tr.t(field.label_key()));
                        let resp = ui.add(
                            egui::TextEdit::singleline(self.form.field_mut(field))
                                .id(field_id(field))
                                .desired_width(120.0),
                        );
                        self.take_focus(FocusTarget::Field(field), &resp);
                        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            self.pending_focus = Some(field.next_focus());
                        }
                        ui.end_row();
                    }

                    ui.label(tr.t(keys::FIELD_TARGET_ETHANOL));
                    egui::ComboBox::from_id_source("target_ethanol")
                        .selected_text(self.form.target.label())
                        .show_ui(ui, |ui| {
                            for blend in TargetBlend::ALL {
                                ui.selectable_value(&mut self.form.target, blend, blend.label());
                            }
                        });
                    ui.end_row();
                });
        });
    }

    fn ui_buttons(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let width = ui.available_width();
        let calc = ui.add_sized(
            [width, 40.0],
            colored_button(tr.t(keys::BUTTON_CALCULATE), CALC_FILL, 18.0),
        );
        self.take_focus(FocusTarget::CalculateButton, &calc);
        if calc.clicked() {
            self.calculate();
        }
        ui.add_space(4.0);
        if ui
            .add_sized([width, 34.0], colored_button(tr.t(keys::BUTTON_COPY), COPY_FILL, 15.0))
            .clicked()
        {
            self.copy_result(ui.ctx());
        }
        ui.add_space(4.0);
        if ui
            .add_sized([width, 34.0], colored_button(tr.t(keys::BUTTON_CLEAR), CLEAR_FILL, 15.0))
            .clicked()
        {
            self.form.clear();
            self.status = None;
        }
    }

    fn ui_result(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(RESULT_BG)
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(egui::RichText::new(&self.form.result).size(15.0));
            });
        if let Some(msg) = &self.status {
            ui.small(msg);
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings_modal;
        egui::Window::new(tr.t(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::SETTINGS_LANG));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::SETTINGS_LANG_AUTO),
                        );
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                    });
                ui.separator();
                ui.label(tr.t(keys::SETTINGS_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.checkbox(&mut self.always_on_top, tr.t(keys::SETTINGS_ALWAYS_ON_TOP));
                ui.separator();
                if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                    self.save_settings();
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.always_on_top = self.always_on_top;
        self.config.default_target = self.form.target;
        // 즉시 번역기 반영
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => {
                tracing::warn!("config save failed: {e}");
                fill_template(&self.tr.t(keys::SETTINGS_SAVE_ERROR), &[("error", e.to_string())])
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.applied_on_top != Some(self.always_on_top) {
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
                egui::WindowLevel::AlwaysOnTop
            } else {
                egui::WindowLevel::Normal
            }));
            self.applied_on_top = Some(self.always_on_top);
        }

        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.panel_fill = BG.linear_multiply(self.window_alpha);
        style.visuals.window_fill = RESULT_BG.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(tr.t(keys::SETTINGS_TITLE)).clicked() {
                        self.show_settings_modal = true;
                    }
                });
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_inputs(ui);
                    ui.add_space(10.0);
                    self.ui_buttons(ui);
                    ui.add_space(10.0);
                    self.ui_result(ui);
                });
        });
    }
}
