//! Scene Loop for Aura Studio RS
//! Per-frame orchestration: weather, field regeneration, spawning, sweep

use crate::config::AppConfig;
use crate::flow_field::FlowField;
use crate::mood::MoodSnapshot;
use crate::particles::Swarm;
use crate::weather::{Hsb, WeatherSystem};
use egui::{Color32, Painter, Rect};

/// Owns all frame-to-frame mutable state of the visualization. The hosting
/// app calls [`Scene::resize`], [`Scene::advance`] and [`Scene::render`]
/// once per frame, in that order.
pub struct Scene {
    pub field: FlowField,
    pub swarm: Swarm,
    pub weather: WeatherSystem,
    frame: u64,
    width: f32,
    height: f32,
}

impl Scene {
    pub fn new(config: &AppConfig, width: f32, height: f32) -> Self {
        let mut swarm = Swarm::new(width, height);
        swarm.seed(config.swarm.initial_clouds, config.swarm.initial_waves);
        Self {
            field: FlowField::new(width, height, config.field.scale, config.field.noise_seed),
            swarm,
            weather: WeatherSystem::new(),
            frame: 0,
            width,
            height,
        }
    }

    /// Reallocate the field for a new canvas size before the next frame
    /// touches it, so no frame ever reads a grid sized for another canvas.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.field.resize(width, height);
        self.swarm.resize(width, height);
    }

    /// One simulation step, no drawing. Order matters: weather first (it
    /// sets this frame's turbulence/intensity/speed), then the field built
    /// from those values, then spawning, then the sweep, then the floor.
    pub fn advance(&mut self, inputs: &MoodSnapshot, config: &AppConfig) {
        self.frame += 1;

        let bursts = self
            .weather
            .update(inputs.sentiment, inputs.emotion, self.frame);

        self.field
            .regenerate(self.weather.turbulence, self.weather.intensity);

        self.swarm.spawn_by_keyword(
            &inputs.keywords,
            self.frame,
            config.swarm.keyword_interval,
            config.swarm.keyword_burst,
        );
        for burst in bursts {
            self.swarm.spawn(burst.variant, burst.count);
        }

        self.swarm.sweep(&self.field, self.weather.particle_speed);
        self.swarm.maintain_floor(config.swarm.population_floor);
    }

    /// Draw pass for the frame advanced above.
    pub fn render(&self, painter: &Painter, rect: Rect, config: &AppConfig) {
        let [r, g, b] = config.visual.background;
        painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));

        self.swarm.render(painter, rect, &self.weather.palette);

        if config.visual.flash_enabled && self.weather.intensity > 2.0 {
            self.draw_intensity_flash(painter, rect);
        }
    }

    /// Pulsing radial flash in the accent hue for intensity spikes. The
    /// sinusoid keeps alpha in a low band so it breathes instead of strobing.
    fn draw_intensity_flash(&self, painter: &Painter, rect: Rect) {
        let pulse = (self.frame as f32 * 0.1).sin();
        let alpha = 0.05 + (pulse + 1.0) * 0.5 * 0.15;
        let color = Hsb::new(self.weather.palette.accent.h, 80.0, 100.0).to_color32(alpha);
        painter.circle_filled(rect.center(), rect.width() * 0.4, color);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Emotion;
    use crate::particles::{Variant, MAX_AGE};
    use crate::weather::Hsb;

    fn scene() -> (Scene, AppConfig) {
        let config = AppConfig::default();
        (Scene::new(&config, 800.0, 600.0), config)
    }

    #[test]
    fn stale_inputs_still_render_a_neutral_scene() {
        let (mut scene, config) = scene();
        let inputs = MoodSnapshot::default();

        for _ in 0..30 {
            scene.advance(&inputs, &config);
        }
        // Neutral band palette, population kept at the floor or better.
        assert_eq!(scene.weather.palette.primary, Hsb::new(200.0, 50.0, 70.0));
        assert!(scene.swarm.len() >= config.swarm.population_floor);
        assert!(scene.swarm.particles().iter().all(|p| p.age <= MAX_AGE));
    }

    #[test]
    fn anger_over_stormy_sentiment_takes_the_override_values() {
        let (mut scene, config) = scene();
        let inputs = MoodSnapshot::new(-0.5, Emotion::Anger, vec![]);

        scene.advance(&inputs, &config);
        assert_eq!(scene.weather.palette.accent.h, 0.0);
        assert_eq!(scene.weather.turbulence, 0.01);
        assert_eq!(scene.weather.particle_speed, 5.0);
    }

    #[test]
    fn keyword_particles_appear_within_one_throttle_window() {
        let (mut scene, config) = scene();
        let inputs = MoodSnapshot::new(0.0, Emotion::Calm, vec!["Forest Walk".into()]);

        for _ in 0..10 {
            scene.advance(&inputs, &config);
        }
        let leaves = scene
            .swarm
            .particles()
            .iter()
            .filter(|p| p.variant == Variant::Leaf)
            .count();
        assert!(leaves >= config.swarm.keyword_burst);
    }

    #[test]
    fn resize_reallocates_the_field_before_the_next_frame() {
        let (mut scene, config) = scene();
        let inputs = MoodSnapshot::default();
        scene.advance(&inputs, &config);

        scene.resize(400.0, 300.0);
        assert_eq!((scene.field.cols(), scene.field.rows()), (16, 12));

        // The very next frame runs against the new grid without issue.
        scene.advance(&inputs, &config);
        assert!(scene.swarm.len() >= config.swarm.population_floor);
    }

    #[test]
    fn surprise_drives_intensity_into_flash_territory() {
        let (mut scene, config) = scene();
        let inputs = MoodSnapshot::new(0.0, Emotion::Surprise, vec![]);
        scene.advance(&inputs, &config);
        assert!(scene.weather.intensity > 2.0);
    }
}
