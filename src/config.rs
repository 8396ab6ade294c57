//! Configuration System for Aura Studio RS
//! Scene tuning knobs with JSON persistence

use serde::{Deserialize, Serialize};

// ============================================================================
// Flow Field Configuration
// ============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct FieldConfig {
    /// Cell size in pixels. cols x rows = floor(w/scale) x floor(h/scale).
    pub scale: f32,
    /// Seed for the Perlin source, kept so a scene replays identically.
    pub noise_seed: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            scale: 25.0,
            noise_seed: 1337,
        }
    }
}

// ============================================================================
// Swarm Configuration
// ============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct SwarmConfig {
    /// Minimum live population after each frame's floor maintenance.
    pub population_floor: usize,
    /// Initial seeding mix.
    pub initial_clouds: usize,
    pub initial_waves: usize,
    /// Keyword spawning: act every Nth frame, spawning this many per match.
    pub keyword_interval: u64,
    pub keyword_burst: usize,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population_floor: 300,
            initial_clouds: 150,
            initial_waves: 50,
            keyword_interval: 10,
            keyword_burst: 5,
        }
    }
}

// ============================================================================
// Visual Configuration
// ============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct VisualConfig {
    /// Canvas background, near-black with a blue cast.
    pub background: [u8; 3],
    /// Full-screen accent flash when intensity spikes past 2.
    pub flash_enabled: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: [6, 6, 13],
            flash_enabled: true,
        }
    }
}

// ============================================================================
// Main App Configuration
// ============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub swarm: SwarmConfig,
    pub visual: VisualConfig,
}

impl AppConfig {
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
