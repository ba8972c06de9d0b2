//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values are fixed for a run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};

/// Extra energy spent per tick by each working action, on top of the baseline drain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionEnergyCosts {
    pub gathering_wood: f32,
    /// Shared by floor and wall building
    pub building: f32,
    pub placing_item: f32,
    pub crafting: f32,
    pub exploring: f32,
    pub fighting: f32,
}

impl Default for ActionEnergyCosts {
    fn default() -> Self {
        Self {
            gathering_wood: 0.3,
            building: 0.2,
            placing_item: 0.1,
            crafting: 0.15,
            exploring: 0.2,
            fighting: 0.4,
        }
    }
}

/// Configuration for the simulation systems
///
/// Defaults reproduce the pacing of the island game: one tick per half
/// second, a 4 minute day, and five castaways.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === WORLD ===
    /// Width and height of the square island grid (cells)
    pub grid_size: usize,

    /// Upper bound for health, hunger and energy
    pub max_stat: f32,

    /// Wall-clock period of one tick in the binary (milliseconds)
    pub tick_rate_ms: u64,

    /// Ticks in a full day/night cycle
    ///
    /// The second half of each cycle is night. At 500ms per tick, 480 ticks
    /// is four minutes of real time per day.
    pub ticks_per_day: u64,

    /// Seed for the world RNG. Same seed and same oracle answers give the same run.
    pub seed: u64,

    /// Names of the survivors placed at game start, in id order
    pub survivor_names: Vec<String>,

    /// TOML recipe catalog replacing the built-in recipes. `None` keeps the defaults.
    pub recipes_path: Option<PathBuf>,

    // === ENVIRONMENT ===
    /// Per-tick probability that a GRASS cell grows back into FOREST
    ///
    /// With ~900 grass cells on a default island this yields roughly one new
    /// tree every two ticks.
    pub tree_regrowth_chance: f64,

    /// Per-tick probability that a tree being chopped is felled (FOREST -> GRASS)
    pub tree_fell_chance: f64,

    /// Night spawn probability per grid row; the actual roll is this times `grid_size`
    pub mob_spawn_chance_night: f64,

    /// Mob population never exceeds this
    pub mob_cap: usize,

    pub mob_health: f32,
    pub mob_attack_damage: f32,

    // === SURVIVORS ===
    /// Damage dealt by a fighting survivor without a sword
    pub survivor_base_attack_damage: f32,

    /// Damage dealt by a fighting survivor holding at least one WOODEN_SWORD
    pub sword_attack_damage: f32,

    /// Ticks of CRAFTING needed before the recipe output appears
    pub crafting_duration_ticks: u32,

    pub string_find_chance: f64,
    pub fish_catch_chance: f64,

    /// Hunger lost every tick
    pub hunger_decay: f32,

    /// Health lost every tick while hunger sits at zero
    pub starvation_damage: f32,

    /// Energy lost every tick regardless of action
    pub energy_baseline_drain: f32,

    /// Extra energy lost at night by anyone not RESTING
    pub night_energy_drain: f32,

    /// Energy gained per tick RESTING on a BED (replaces every other energy delta)
    pub bed_energy_regen: f32,

    /// Health gained per tick RESTING on a BED
    pub bed_health_regen: f32,

    pub energy_costs: ActionEnergyCosts,

    // === DECISIONS ===
    /// A busy survivor becomes eligible again after this many ticks
    pub decision_cooldown_ticks: u64,

    /// Survivors must have strictly more energy than this to be asked
    pub min_decision_energy: f32,

    /// Survivors must have strictly more health than this to be asked
    pub min_decision_health: f32,

    /// Night-time mobs closer than this (Chebyshev) force a survivor into FIGHTING
    pub threat_radius: u32,

    /// How long a speech bubble stays visible (ticks)
    pub message_display_ticks: u32,

    /// Give up on an oracle call after this long. `None` waits forever.
    pub oracle_timeout_ms: Option<u64>,

    // === LOGS ===
    pub log_capacity: usize,
    pub chat_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 40,
            max_stat: 100.0,
            tick_rate_ms: 500,
            ticks_per_day: 480,
            seed: 0x5EED,
            survivor_names: ["Alice", "Bob", "Charlie", "Dana", "Eve"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recipes_path: None,

            tree_regrowth_chance: 0.0005,
            tree_fell_chance: 0.05,
            mob_spawn_chance_night: 0.001,
            mob_cap: 10,
            mob_health: 30.0,
            mob_attack_damage: 3.0,

            survivor_base_attack_damage: 2.0,
            sword_attack_damage: 10.0,
            crafting_duration_ticks: 10,
            string_find_chance: 0.1,
            fish_catch_chance: 0.05,
            hunger_decay: 0.1,
            starvation_damage: 0.2,
            energy_baseline_drain: 0.05,
            night_energy_drain: 0.1,
            bed_energy_regen: 1.5,
            bed_health_regen: 0.5,
            energy_costs: ActionEnergyCosts::default(),

            decision_cooldown_ticks: 40,
            min_decision_energy: 10.0,
            min_decision_health: 20.0,
            threat_radius: 5,
            message_display_ticks: 20,
            oracle_timeout_ms: None,

            log_capacity: 100,
            chat_capacity: 20,
        }
    }
}

impl SimulationConfig {
    /// Create config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Spawn roll used on night ticks
    pub fn night_spawn_roll(&self) -> f64 {
        self.mob_spawn_chance_night * self.grid_size as f64
    }

    /// Validate that config values are sensible
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(ColonyError::InvalidConfig("grid_size must be positive".into()));
        }

        if self.tick_rate_ms == 0 || self.ticks_per_day == 0 {
            return Err(ColonyError::InvalidConfig(
                "tick_rate_ms and ticks_per_day must be positive".into(),
            ));
        }

        if self.max_stat <= 0.0 {
            return Err(ColonyError::InvalidConfig(format!(
                "max_stat ({}) must be positive",
                self.max_stat
            )));
        }

        let chances = [
            ("tree_regrowth_chance", self.tree_regrowth_chance),
            ("tree_fell_chance", self.tree_fell_chance),
            ("string_find_chance", self.string_find_chance),
            ("fish_catch_chance", self.fish_catch_chance),
            ("night spawn roll", self.night_spawn_roll()),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(ColonyError::InvalidConfig(format!(
                    "{name} ({p}) must be within [0, 1]"
                )));
            }
        }

        if self.crafting_duration_ticks == 0 {
            return Err(ColonyError::InvalidConfig(
                "crafting_duration_ticks must be positive".into(),
            ));
        }

        Ok(())
    }
}
