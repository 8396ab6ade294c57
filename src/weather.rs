//! Weather Mapper for Aura Studio RS
//! Sentiment and emotion become palette, turbulence, intensity and speed

use crate::mood::Emotion;
use crate::particles::Variant;
use egui::Color32;
use serde::{Deserialize, Serialize};

/// HSB color, hue in degrees [0, 360), saturation and brightness in [0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
}

impl Hsb {
    pub const fn new(h: f32, s: f32, b: f32) -> Self {
        Self { h, s, b }
    }

    /// Convert to an egui color with the given alpha in [0, 1].
    pub fn to_color32(self, alpha: f32) -> Color32 {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.b / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        Color32::from_rgba_unmultiplied(
            ((r + m) * 255.0) as u8,
            ((g + m) * 255.0) as u8,
            ((b + m) * 255.0) as u8,
            a,
        )
    }
}

/// The three-color mood palette every particle reads while rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Hsb,
    pub secondary: Hsb,
    pub accent: Hsb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Hsb::new(200.0, 60.0, 70.0),
            secondary: Hsb::new(220.0, 40.0, 80.0),
            accent: Hsb::new(180.0, 70.0, 90.0),
        }
    }
}

/// A themed particle injection requested by the mapper for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnBurst {
    pub variant: Variant,
    pub count: usize,
}

/// Maps (sentiment, emotion) to the current visual dynamics.
///
/// Sentiment picks an ambient band whose scalars are approached with
/// exponential smoothing, so mood shifts glide instead of snapping. The
/// emotion pass runs second and writes its fields directly for immediacy;
/// the resulting tug-of-war (calm resetting what a band is still easing
/// toward, some emotions touching the palette and others not) is the
/// intended look, not an accident to tidy up.
pub struct WeatherSystem {
    pub palette: Palette,
    pub turbulence: f32,
    pub intensity: f32,
    pub particle_speed: f32,
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            turbulence: 0.002,
            intensity: 1.0,
            particle_speed: 2.0,
        }
    }
}

fn lerp(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

impl WeatherSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the weather one frame. Returns the themed bursts the scene
    /// should inject before this frame's sweep.
    pub fn update(&mut self, sentiment: f32, emotion: Emotion, frame: u64) -> Vec<SpawnBurst> {
        let mut bursts = Vec::new();

        // Sentiment band: ambient baseline, scalars eased toward targets.
        if sentiment < -0.3 {
            // Stormy: dark blues and purples, heavy and slow.
            self.palette.primary = Hsb::new(240.0, 80.0, 40.0);
            self.palette.secondary = Hsb::new(270.0, 70.0, 50.0);
            self.palette.accent = Hsb::new(200.0, 60.0, 60.0);
            self.turbulence = lerp(self.turbulence, 0.008, 0.05);
            self.intensity = lerp(self.intensity, 2.5, 0.05);
            self.particle_speed = lerp(self.particle_speed, 0.8, 0.05);
            if frame % 20 == 0 {
                bursts.push(SpawnBurst {
                    variant: Variant::Triangle,
                    count: 3,
                });
            }
        } else if sentiment > 0.3 {
            // Sunset: warm glowing gradients, fast and flowing.
            self.palette.primary = Hsb::new(30.0, 80.0, 90.0);
            self.palette.secondary = Hsb::new(350.0, 70.0, 85.0);
            self.palette.accent = Hsb::new(50.0, 90.0, 95.0);
            self.turbulence = lerp(self.turbulence, 0.003, 0.1);
            self.intensity = lerp(self.intensity, 1.5, 0.1);
            self.particle_speed = lerp(self.particle_speed, 3.5, 0.1);
            if frame % 15 == 0 {
                bursts.push(SpawnBurst {
                    variant: Variant::Star,
                    count: 3,
                });
            }
        } else {
            // Neutral: soft pastels, gentle motion.
            self.palette.primary = Hsb::new(200.0, 50.0, 70.0);
            self.palette.secondary = Hsb::new(180.0, 40.0, 80.0);
            self.palette.accent = Hsb::new(160.0, 60.0, 75.0);
            self.turbulence = lerp(self.turbulence, 0.002, 0.1);
            self.intensity = lerp(self.intensity, 1.0, 0.1);
            self.particle_speed = lerp(self.particle_speed, 0.8, 0.1);
            if frame % 25 == 0 {
                bursts.push(SpawnBurst {
                    variant: Variant::Wave,
                    count: 1,
                });
            }
        }

        // Emotion override: sharper accent, assigned outright.
        match emotion {
            Emotion::Anger => {
                self.palette.accent = Hsb::new(0.0, 100.0, 90.0);
                self.turbulence = 0.01;
                self.intensity = 3.0;
                self.particle_speed = 5.0;
                if frame % 10 == 0 {
                    bursts.push(SpawnBurst {
                        variant: Variant::Triangle,
                        count: 5,
                    });
                }
            }
            Emotion::Joy => {
                self.palette.primary = Hsb::new(60.0, 90.0, 95.0);
                self.particle_speed = 4.0;
                if frame % 8 == 0 {
                    bursts.push(SpawnBurst {
                        variant: Variant::Star,
                        count: 4,
                    });
                }
            }
            Emotion::Sadness => {
                self.particle_speed = 0.4;
                self.turbulence = 0.001;
            }
            Emotion::Fear => {
                self.palette.primary = Hsb::new(280.0, 70.0, 50.0);
                self.turbulence = 0.007;
                self.particle_speed = 2.5;
            }
            Emotion::Surprise => {
                self.intensity = 2.5;
                self.particle_speed = 5.0;
                if frame % 5 == 0 {
                    bursts.push(SpawnBurst {
                        variant: Variant::Star,
                        count: 6,
                    });
                }
            }
            Emotion::Calm => {
                self.particle_speed = 1.5;
                self.turbulence = 0.002;
                self.intensity = 1.0;
            }
        }

        bursts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run N frames on a non-throttle cadence so bursts don't matter.
    fn run(weather: &mut WeatherSystem, sentiment: f32, emotion: Emotion, frames: u64) {
        for frame in 1..=frames {
            weather.update(sentiment, emotion, frame);
        }
    }

    #[test]
    fn smoothing_is_monotonic_toward_target() {
        // Sadness leaves intensity to the band, so intensity shows the pure
        // smoothing behavior: from 1.0 toward the stormy target 2.5.
        let mut weather = WeatherSystem::new();
        let mut prev = weather.intensity;
        for frame in 1..=400 {
            weather.update(-0.8, Emotion::Sadness, frame);
            assert!(weather.intensity >= prev);
            assert!(weather.intensity <= 2.5 + 1e-6);
            prev = weather.intensity;
        }
        assert!((weather.intensity - 2.5).abs() < 0.01);
    }

    #[test]
    fn anger_override_wins_over_stormy_band() {
        let mut weather = WeatherSystem::new();
        run(&mut weather, -0.5, Emotion::Anger, 3);

        assert_eq!(weather.palette.accent, Hsb::new(0.0, 100.0, 90.0));
        assert_eq!(weather.turbulence, 0.01);
        assert_eq!(weather.particle_speed, 5.0);
        assert_eq!(weather.intensity, 3.0);
        // The band's palette still shows through where anger is silent.
        assert_eq!(weather.palette.primary, Hsb::new(240.0, 80.0, 40.0));
    }

    #[test]
    fn calm_resets_scalars_even_against_the_band() {
        let mut weather = WeatherSystem::new();
        run(&mut weather, 0.9, Emotion::Calm, 50);
        assert_eq!(weather.particle_speed, 1.5);
        assert_eq!(weather.turbulence, 0.002);
        assert_eq!(weather.intensity, 1.0);
        // Sunset palette survives: calm never touches colors.
        assert_eq!(weather.palette.primary, Hsb::new(30.0, 80.0, 90.0));
    }

    #[test]
    fn bursts_follow_their_throttle_cadence() {
        let mut weather = WeatherSystem::new();
        let on_beat = weather.update(-0.5, Emotion::Anger, 20);
        assert!(on_beat.iter().any(|b| b.variant == Variant::Triangle && b.count == 3));
        assert!(on_beat.iter().any(|b| b.variant == Variant::Triangle && b.count == 5));

        let off_beat = weather.update(-0.5, Emotion::Anger, 21);
        assert!(off_beat.is_empty());
    }

    #[test]
    fn hsb_conversion_hits_the_corners() {
        let red = Hsb::new(0.0, 100.0, 100.0).to_color32(1.0);
        assert_eq!((red.r(), red.g(), red.b()), (255, 0, 0));

        let white = Hsb::new(0.0, 0.0, 100.0).to_color32(1.0);
        assert_eq!((white.r(), white.g(), white.b()), (255, 255, 255));

        let green = Hsb::new(120.0, 100.0, 100.0).to_color32(1.0);
        assert_eq!((green.r(), green.g(), green.b()), (0, 255, 0));

        assert_eq!(Hsb::new(120.0, 100.0, 100.0).to_color32(0.5).a(), 127);
    }
}
