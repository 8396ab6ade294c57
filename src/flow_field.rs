//! Flow Field for Aura Studio RS
//! Perlin-driven grid of steering vectors, rebuilt from scratch every frame

use egui::Vec2;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Noise-space step between neighboring cells.
const CELL_STEP: f64 = 0.08;

/// Grid of direction vectors covering the canvas, one cell per
/// `scale x scale` pixel block. Every cell is overwritten on
/// [`FlowField::regenerate`]; nothing persists across frames except the
/// slowly advancing time offset.
pub struct FlowField {
    cols: usize,
    rows: usize,
    scale: f32,
    vectors: Vec<Vec2>,
    noise: Perlin,
    z_offset: f64,
}

impl FlowField {
    pub fn new(width: f32, height: f32, scale: f32, seed: u32) -> Self {
        let mut field = Self {
            cols: 0,
            rows: 0,
            scale: scale.max(1.0),
            vectors: Vec::new(),
            noise: Perlin::new(seed),
            z_offset: 0.0,
        };
        field.resize(width, height);
        field
    }

    /// Coherent 3-D noise in [0, 1]. Deterministic for a fixed seed;
    /// callers animate by nudging `z` a little each frame.
    #[allow(dead_code)]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f32 {
        (self.noise.get([x, y, z]) * 0.5 + 0.5) as f32
    }

    /// Reallocate the grid for a new canvas size. Must run before the next
    /// `regenerate` so no frame reads a field sized for the old canvas.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.cols = (width / self.scale).floor().max(0.0) as usize;
        self.rows = (height / self.scale).floor().max(0.0) as usize;
        self.vectors = vec![Vec2::ZERO; self.cols * self.rows];
    }

    /// Rebuild every cell from two noise octaves, then advance the time
    /// offset by the current turbulence. The primary octave gives a base
    /// angle over four full turns; the secondary octave, sampled at double
    /// frequency and half the time rate, perturbs it in proportion to
    /// turbulence.
    pub fn regenerate(&mut self, turbulence: f32, intensity: f32) {
        let noise = &self.noise;
        let z = self.z_offset;
        let cols = self.cols;

        self.vectors
            .par_chunks_mut(cols.max(1))
            .enumerate()
            .for_each(|(row, cells)| {
                let yoff = row as f64 * CELL_STEP;
                for (col, cell) in cells.iter_mut().enumerate() {
                    let xoff = col as f64 * CELL_STEP;

                    let base = (noise.get([xoff, yoff, z]) * 0.5 + 0.5) as f32;
                    let mut angle = base * TAU * 4.0;

                    let swirl =
                        (noise.get([xoff * 2.0, yoff * 2.0, z * 0.5]) * 0.5 + 0.5) as f32;
                    angle += swirl * turbulence * 100.0;

                    *cell = Vec2::new(angle.cos(), angle.sin()) * intensity;
                }
            });

        self.z_offset += turbulence as f64;
    }

    /// Steering vector under a canvas position, or `None` when the position
    /// maps outside the grid. Absent force is not a fault: the particle just
    /// drifts on its existing velocity.
    pub fn force_at(&self, pos: Vec2) -> Option<Vec2> {
        let x = (pos.x / self.scale).floor();
        let y = (pos.y / self.scale).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let index = x as usize + y as usize * self.cols;
        self.vectors.get(index).copied()
    }

    #[allow(dead_code)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[allow(dead_code)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[allow(dead_code)]
    pub fn time_offset(&self) -> f64 {
        self.z_offset
    }
}
