//! Particle Swarm for Aura Studio RS
//! Flow-field-steered particles with seven behavioral variants

use crate::flow_field::FlowField;
use crate::weather::{Hsb, Palette};
use egui::{Painter, Pos2, Rect, Shape, Stroke, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A particle is alive while `age <= MAX_AGE`; the sweep removes it the
/// frame its age passes this.
pub const MAX_AGE: u32 = 200;

/// The closed set of particle appearances/behaviors. Fixed at creation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Variant {
    Cloud,
    Triangle,
    Star,
    Wave,
    Leaf,
    Grid,
    Spark,
}

const WORK_WORDS: &[&str] = &["work", "job", "office", "task", "project", "meeting"];
const NATURE_WORDS: &[&str] = &["nature", "tree", "plant", "forest", "leaf", "green"];
const TECH_WORDS: &[&str] = &["tech", "code", "digital", "computer", "app", "software"];

impl Variant {
    /// Theme lookup for keyword-triggered spawning. Case-insensitive
    /// substring match; the first matching vocabulary wins, so a word that
    /// happens to sit in two lists only spawns its first theme.
    pub fn for_keyword(keyword: &str) -> Option<Variant> {
        let word = keyword.to_lowercase();
        if WORK_WORDS.iter().any(|w| word.contains(w)) {
            Some(Variant::Grid)
        } else if NATURE_WORDS.iter().any(|w| word.contains(w)) {
            Some(Variant::Leaf)
        } else if TECH_WORDS.iter().any(|w| word.contains(w)) {
            Some(Variant::Spark)
        } else {
            None
        }
    }
}

/// One animated agent. Position, velocity and acceleration live in canvas
/// coordinates; `size` and `rotation` are randomized once at creation.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub variant: Variant,
    pub max_speed: f32,
    pub age: u32,
    pub size: f32,
    pub rotation: f32,
}

impl Particle {
    pub fn new(variant: Variant, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.gen_range(0.0..width.max(1.0)),
                rng.gen_range(0.0..height.max(1.0)),
            ),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            variant,
            max_speed: 3.0,
            age: 0,
            size: rng.gen_range(3.0..8.0),
            rotation: rng.gen_range(0.0..TAU),
        }
    }

    /// Speed cap for this frame, taken from the weather's current value.
    pub fn set_speed(&mut self, speed: f32) {
        self.max_speed = speed;
    }

    /// Add the flow-field vector under the particle, if any. A position
    /// outside the grid means no force and the particle keeps drifting.
    pub fn follow(&mut self, field: &FlowField) {
        if let Some(force) = field.force_at(self.pos) {
            self.apply_force(force);
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    pub fn update(&mut self) {
        self.vel += self.acc;
        let speed = self.vel.length();
        if speed > self.max_speed && speed > 0.0 {
            self.vel *= self.max_speed / speed;
        }
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
        self.age += 1;
    }

    /// Toroidal wrap: crossing any boundary teleports to the opposite edge.
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.pos.x > width {
            self.pos.x = 0.0;
        }
        if self.pos.x < 0.0 {
            self.pos.x = width;
        }
        if self.pos.y > height {
            self.pos.y = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = height;
        }
    }

    /// Fade factor: 1 at birth, linearly down to 0 at `MAX_AGE`.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / MAX_AGE as f32).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age > MAX_AGE
    }

    /// Variant-specific drawing. Every recipe fades through [`Self::alpha`].
    pub fn render(&self, painter: &Painter, origin: Pos2, palette: &Palette) {
        let alpha = self.alpha();
        if alpha <= 0.0 {
            return;
        }
        let center = origin + self.pos;

        match self.variant {
            Variant::Cloud => {
                painter.circle(
                    center,
                    self.size * 1.5,
                    palette.primary.to_color32(alpha * 0.4),
                    Stroke::new(1.0, palette.primary.to_color32(alpha * 0.6)),
                );
                painter.circle_filled(
                    center,
                    self.size * 0.75,
                    palette.secondary.to_color32(alpha * 0.6),
                );
            }
            Variant::Triangle => {
                let spin = self.age as f32 * 0.05;
                let points = vec![
                    center + rotate(Vec2::new(0.0, -self.size * 3.0), spin),
                    center + rotate(Vec2::new(-self.size * 2.5, self.size * 2.0), spin),
                    center + rotate(Vec2::new(self.size * 2.5, self.size * 2.0), spin),
                ];
                painter.add(Shape::convex_polygon(
                    points,
                    palette.primary.to_color32(alpha * 0.8),
                    Stroke::new(2.0, palette.primary.to_color32(alpha)),
                ));
            }
            Variant::Star => {
                let spin = self.rotation + self.age as f32 * 0.08;
                let color = Hsb::new(palette.accent.h, 100.0, 100.0).to_color32(alpha);
                let outer = self.size * 4.0;
                let inner = self.size * 2.0;
                let mut points = Vec::with_capacity(10);
                for i in 0..10 {
                    let r = if i % 2 == 0 { outer } else { inner };
                    let a = spin + i as f32 * TAU / 10.0;
                    points.push(center + Vec2::new(a.cos(), a.sin()) * r);
                }
                painter.add(Shape::closed_line(points.clone(), Stroke::new(2.0, color)));
                for point in points.iter().step_by(2) {
                    painter.line_segment([center, *point], Stroke::new(1.0, color));
                }
            }
            Variant::Wave => {
                let stroke = Stroke::new(2.5, palette.secondary.to_color32(alpha * 0.7));
                let points: Vec<Pos2> = (0..20)
                    .map(|i| {
                        let wobble = (i as f32 * 0.5 + self.age as f32 * 0.1).sin() * self.size;
                        center + Vec2::new(i as f32 * 3.0, wobble)
                    })
                    .collect();
                painter.add(Shape::line(points, stroke));
            }
            Variant::Leaf => {
                // Leaves keep a fixed green regardless of mood palette.
                let spin = self.rotation + self.age as f32 * 0.05;
                let fill = Hsb::new(120.0, 90.0, 80.0).to_color32(alpha);
                let edge = Hsb::new(120.0, 80.0, 60.0).to_color32(alpha);
                let points: Vec<Pos2> = (0..24)
                    .map(|i| {
                        let a = i as f32 * TAU / 24.0;
                        let local =
                            Vec2::new(a.cos() * self.size * 3.0, a.sin() * self.size * 4.5);
                        center + rotate(local, spin)
                    })
                    .collect();
                painter.add(Shape::convex_polygon(points, fill, Stroke::new(1.5, edge)));
                let stem = center + rotate(Vec2::new(0.0, self.size * 4.0), spin);
                painter.line_segment([center, stem], Stroke::new(2.0, edge));
            }
            Variant::Grid => {
                let color = Hsb::new(palette.accent.h, 100.0, 100.0).to_color32(alpha);
                let stroke = Stroke::new(3.0, color);
                painter.line_segment(
                    [center - Vec2::new(15.0, 0.0), center + Vec2::new(15.0, 0.0)],
                    stroke,
                );
                painter.line_segment(
                    [center - Vec2::new(0.0, 15.0), center + Vec2::new(0.0, 15.0)],
                    stroke,
                );
            }
            Variant::Spark => {
                let spin = self.rotation + self.age as f32 * 0.1;
                let accent = Hsb::new(palette.accent.h, 100.0, 100.0);
                painter.add(Shape::convex_polygon(
                    square(center, self.size * 3.0, spin),
                    accent.to_color32(alpha * 0.4),
                    Stroke::new(2.0, accent.to_color32(alpha)),
                ));
                painter.add(Shape::convex_polygon(
                    square(center, self.size * 1.5, spin),
                    accent.to_color32(alpha * 0.7),
                    Stroke::NONE,
                ));
            }
        }
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn square(center: Pos2, half: f32, angle: f32) -> Vec<Pos2> {
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .iter()
    .map(|corner| center + rotate(*corner, angle))
    .collect()
}

/// The owned particle population. Exclusively mutated by the scene loop.
pub struct Swarm {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl Swarm {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            particles: Vec::with_capacity(600),
            width,
            height,
        }
    }

    /// Initial mixed population for a fresh scene.
    pub fn seed(&mut self, clouds: usize, waves: usize) {
        self.spawn(Variant::Cloud, clouds);
        self.spawn(Variant::Wave, waves);
    }

    pub fn spawn(&mut self, variant: Variant, count: usize) {
        let mut rng = rand::thread_rng();
        for _ in 0..count {
            self.particles
                .push(Particle::new(variant, self.width, self.height, &mut rng));
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance every live particle one frame under the current field and
    /// speed cap, then drop the expired. `retain` keeps removal safe
    /// mid-pass; after this no particle has `age > MAX_AGE`.
    pub fn sweep(&mut self, field: &FlowField, speed: f32) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.set_speed(speed);
            particle.follow(field);
            particle.update();
            particle.wrap_edges(width, height);
        }
        self.particles.retain(|p| !p.is_expired());
    }

    /// Top the population back up to the floor with cloud particles so the
    /// scene never goes empty under heavy expiry.
    pub fn maintain_floor(&mut self, floor: usize) {
        if self.particles.len() < floor {
            let missing = floor - self.particles.len();
            self.spawn(Variant::Cloud, missing);
        }
    }

    /// Keyword-triggered spawning, throttled to every `interval`-th frame.
    /// Each themed keyword contributes `burst` particles of its variant.
    pub fn spawn_by_keyword(
        &mut self,
        keywords: &[String],
        frame: u64,
        interval: u64,
        burst: usize,
    ) {
        if keywords.is_empty() || interval == 0 || frame % interval != 0 {
            return;
        }
        for keyword in keywords {
            if let Some(variant) = Variant::for_keyword(keyword) {
                self.spawn(variant, burst);
            }
        }
    }

    /// Read-only draw pass over the surviving particles.
    pub fn render(&self, painter: &Painter, rect: Rect, palette: &Palette) {
        for particle in &self.particles {
            particle.render(painter, rect.min, palette);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[allow(dead_code)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_field() -> FlowField {
        // A fresh field is all zero vectors until regenerated.
        FlowField::new(400.0, 300.0, 25.0, 7)
    }

    fn count_variant(swarm: &Swarm, variant: Variant) -> usize {
        swarm
            .particles()
            .iter()
            .filter(|p| p.variant == variant)
            .count()
    }

    #[test]
    fn keyword_themes_map_to_their_variants() {
        assert_eq!(Variant::for_keyword("Team Meeting Notes"), Some(Variant::Grid));
        assert_eq!(Variant::for_keyword("Forest Walk"), Some(Variant::Leaf));
        assert_eq!(Variant::for_keyword("New App Release"), Some(Variant::Spark));
        assert_eq!(Variant::for_keyword("hello world"), None);
    }

    #[test]
    fn keyword_spawning_respects_the_throttle() {
        let mut swarm = Swarm::new(400.0, 300.0);
        let keywords = vec!["project deadline".to_string()];

        swarm.spawn_by_keyword(&keywords, 7, 10, 5);
        assert!(swarm.is_empty());

        swarm.spawn_by_keyword(&keywords, 20, 10, 5);
        assert_eq!(count_variant(&swarm, Variant::Grid), 5);
    }

    #[test]
    fn seed_produces_the_initial_mix() {
        let mut swarm = Swarm::new(400.0, 300.0);
        swarm.seed(150, 50);
        assert_eq!(swarm.len(), 200);
        assert_eq!(count_variant(&swarm, Variant::Cloud), 150);
        assert_eq!(count_variant(&swarm, Variant::Wave), 50);
    }

    #[test]
    fn sweep_removes_particles_past_max_age() {
        let mut swarm = Swarm::new(400.0, 300.0);
        swarm.spawn(Variant::Cloud, 10);
        let field = quiet_field();

        for _ in 0..MAX_AGE {
            swarm.sweep(&field, 1.0);
        }
        // Everyone sits exactly at MAX_AGE: still alive.
        assert_eq!(swarm.len(), 10);
        assert!(swarm.particles().iter().all(|p| p.age == MAX_AGE));

        // One more update pushes them to 201; the same sweep drops them.
        swarm.sweep(&field, 1.0);
        assert!(swarm.is_empty());
    }

    #[test]
    fn floor_is_restored_after_mass_expiry() {
        let mut swarm = Swarm::new(400.0, 300.0);
        swarm.seed(150, 50);
        let field = quiet_field();

        for _ in 0..(MAX_AGE + 5) {
            swarm.sweep(&field, 1.0);
            swarm.maintain_floor(300);
            assert!(swarm.len() >= 300);
            assert!(swarm.particles().iter().all(|p| p.age <= MAX_AGE));
        }
    }

    #[test]
    fn update_clamps_velocity_to_the_speed_cap() {
        let mut rng = rand::thread_rng();
        let mut particle = Particle::new(Variant::Cloud, 400.0, 300.0, &mut rng);
        particle.set_speed(0.8);
        particle.apply_force(Vec2::new(30.0, -40.0));
        particle.update();
        assert!(particle.vel.length() <= 0.8 + 1e-4);
        assert_eq!(particle.acc, Vec2::ZERO);
        assert_eq!(particle.age, 1);
    }

    #[test]
    fn edges_wrap_toroidally() {
        let mut rng = rand::thread_rng();
        let mut particle = Particle::new(Variant::Cloud, 400.0, 300.0, &mut rng);

        particle.pos = Vec2::new(401.0, 150.0);
        particle.wrap_edges(400.0, 300.0);
        assert_eq!(particle.pos.x, 0.0);

        particle.pos = Vec2::new(-1.0, 301.0);
        particle.wrap_edges(400.0, 300.0);
        assert_eq!(particle.pos, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn alpha_fades_linearly_with_age() {
        let mut rng = rand::thread_rng();
        let mut particle = Particle::new(Variant::Star, 400.0, 300.0, &mut rng);
        assert_eq!(particle.alpha(), 1.0);
        particle.age = 100;
        assert!((particle.alpha() - 0.5).abs() < 1e-6);
        particle.age = 250;
        assert_eq!(particle.alpha(), 0.0);
    }
}
