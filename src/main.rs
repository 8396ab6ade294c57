//! Aura Studio RS - Main Application
//! Mood-driven flow-field visualizer with egui GUI

mod config;
mod flow_field;
mod mood;
mod particles;
mod presets;
mod scene;
mod weather;

use config::AppConfig;
use eframe::egui;
use mood::{Emotion, MoodFeed, MoodSender, MoodSnapshot};
use presets::MoodPreset;
use scene::Scene;

const CONFIG_PATH: &str = "aura_studio.json";

/// Main application state
struct AuraStudioApp {
    config: AppConfig,
    scene: Scene,
    feed: MoodFeed,
    sender: MoodSender,

    // UI state: the in-process stand-in for the speech/sentiment pipeline.
    show_controls: bool,
    sentiment: f32,
    emotion: Emotion,
    keywords_text: String,
    selected_preset: MoodPreset,
}

impl AuraStudioApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Setup dark theme
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_unmultiplied(15, 15, 25, 245);
        visuals.panel_fill = egui::Color32::from_rgba_unmultiplied(20, 20, 35, 240);
        cc.egui_ctx.set_visuals(visuals);

        let config = AppConfig::load(CONFIG_PATH).unwrap_or_default();
        let (sender, feed) = MoodFeed::channel();

        Self {
            scene: Scene::new(&config, 1280.0, 720.0),
            config,
            feed,
            sender,
            show_controls: true,
            sentiment: 0.0,
            emotion: Emotion::Calm,
            keywords_text: String::new(),
            selected_preset: MoodPreset::NeutralDrift,
        }
    }

    /// Publish the current control values through the same feed a live
    /// speech pipeline would use.
    fn push_inputs(&self) {
        let keywords = self
            .keywords_text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self.sender
            .send(MoodSnapshot::new(self.sentiment, self.emotion, keywords));
    }

    fn apply_preset(&mut self, preset: MoodPreset) {
        let snapshot = preset.snapshot();
        self.sentiment = snapshot.sentiment;
        self.emotion = snapshot.emotion;
        self.keywords_text = snapshot.keywords.join(", ");
        self.selected_preset = preset;
        self.sender.send(snapshot);
    }
}

impl eframe::App for AuraStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);

        if self.show_controls {
            self.render_controls_panel(ctx);
        }

        self.render_canvas(ctx);

        // Request continuous repaint for animation
        ctx.request_repaint();
    }
}

impl AuraStudioApp {
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🌀 Aura Studio RS");
                ui.separator();

                if ui.button("🎛 Mood Controls").clicked() {
                    self.show_controls = !self.show_controls;
                }

                ui.separator();

                if ui.button("💾 Save Config").clicked() {
                    if let Err(e) = self.config.save(CONFIG_PATH) {
                        eprintln!("Error saving config: {}", e);
                    }
                }
                if ui.button("📂 Load Config").clicked() {
                    match AppConfig::load(CONFIG_PATH) {
                        Ok(config) => self.config = config,
                        Err(e) => eprintln!("Error loading config: {}", e),
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "frame {}  |  {} particles",
                        self.scene.frame(),
                        self.scene.swarm.len()
                    ));
                });
            });
        });
    }

    fn render_controls_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("mood_controls")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Mood Inputs");
                ui.label("Stand-in for the live speech/sentiment pipeline.");
                ui.separator();

                let mut changed = false;

                ui.label("Sentiment");
                changed |= ui
                    .add(egui::Slider::new(&mut self.sentiment, -1.0..=1.0).text("score"))
                    .changed();

                ui.add_space(8.0);
                ui.label("Emotion");
                egui::ComboBox::from_id_source("emotion_select")
                    .selected_text(self.emotion.name())
                    .show_ui(ui, |ui| {
                        for emotion in Emotion::all() {
                            changed |= ui
                                .selectable_value(&mut self.emotion, emotion, emotion.name())
                                .changed();
                        }
                    });

                ui.add_space(8.0);
                ui.label("Keywords (comma separated)");
                changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.keywords_text)
                            .hint_text("forest, meeting, software..."),
                    )
                    .changed();

                if changed {
                    self.push_inputs();
                }

                ui.separator();
                ui.heading("Presets");
                let mut picked = None;
                egui::ComboBox::from_id_source("preset_select")
                    .selected_text(self.selected_preset.name())
                    .show_ui(ui, |ui| {
                        for preset in MoodPreset::all() {
                            if ui
                                .selectable_label(self.selected_preset == preset, preset.name())
                                .clicked()
                            {
                                picked = Some(preset);
                            }
                        }
                    });
                if let Some(preset) = picked {
                    self.apply_preset(preset);
                }
                ui.label(self.selected_preset.description());

                ui.separator();
                ui.label(format!(
                    "turbulence {:.4}\nintensity {:.2}\nspeed {:.2}",
                    self.scene.weather.turbulence,
                    self.scene.weather.intensity,
                    self.scene.weather.particle_speed
                ));
            });
    }

    fn render_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

            // Reallocate the field before this frame's simulation step.
            self.scene.resize(rect.width(), rect.height());

            let snapshot = self.feed.poll().clone();
            self.scene.advance(&snapshot, &self.config);

            let painter = ui.painter_at(rect);
            self.scene.render(&painter, rect, &self.config);
        });
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("Aura Studio RS")
            .with_min_inner_size([800.0, 600.0]),
        vsync: false, // Disable vsync for max FPS
        ..Default::default()
    };

    eframe::run_native(
        "Aura Studio RS",
        options,
        Box::new(|cc| Box::new(AuraStudioApp::new(cc))),
    )
}
