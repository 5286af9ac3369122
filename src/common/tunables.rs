//! Tunable gameplay constants.
//!
//! Distances are world units (pixels), durations are seconds. Defaults describe the
//! shipped level; a `tunables.toml` next to the executable (or the file named by
//! `RUN_AND_GUN_TUNABLES`) overrides any subset of them.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an alternative tunables file.
pub const TUNABLES_ENV: &str = "RUN_AND_GUN_TUNABLES";
/// File looked up in the working directory when the variable is unset.
pub const TUNABLES_FILE: &str = "tunables.toml";

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: f32,
    pub rng_seed: u64,
    pub player: PlayerTunables,
    pub enemy: EnemyTunables,
    pub projectiles: ProjectileTunables,
    pub feedback: FeedbackTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 32.0,
            gravity: 1100.0,
            rng_seed: 42,
            player: PlayerTunables::default(),
            enemy: EnemyTunables::default(),
            projectiles: ProjectileTunables::default(),
            feedback: FeedbackTunables::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTunables {
    pub max_health: i32,
    pub move_speed: f32,
    pub base_jump_force: f32,
    pub short_hop: f32,
    pub full_hop: f32,
    pub crouch_jump_multiplier: f32,
    /// Jump-squat length in fixed ticks, counting the press tick. Launch happens on
    /// the last one.
    pub jump_squat_ticks: u32,
    /// Stick tilt (down) past which crouch / fast-fall engage.
    pub tilt_dead_zone: f32,
    pub aim_dead_zone: f32,
    pub ground_check_offset: [f32; 2],
    pub ground_check_radius: f32,
    pub air_check_offset: [f32; 2],
    pub grounded_ray_length: f32,
    pub shots_per_burst: u32,
    pub time_between_shots: f32,
    pub time_between_bursts: f32,
    /// Half-width of the random spread cone, degrees. Doubled while airborne.
    pub bullet_spread_degrees: f32,
    pub muzzle_ground: Option<[f32; 2]>,
    pub muzzle_air: Option<[f32; 2]>,
    pub aim_pivot: [f32; 2],
    pub knockback_impulse: f32,
    /// Time between the death blow and the game-over notification.
    pub death_sequence_duration: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 128.0,
            base_jump_force: 340.0,
            short_hop: 1.0,
            full_hop: 1.25,
            crouch_jump_multiplier: 1.5,
            jump_squat_ticks: 4,
            tilt_dead_zone: 0.6,
            aim_dead_zone: 0.19,
            ground_check_offset: [0.0, -16.0],
            ground_check_radius: 5.0,
            air_check_offset: [0.0, -8.0],
            grounded_ray_length: 14.0,
            shots_per_burst: 6,
            time_between_shots: 0.17,
            time_between_bursts: 1.0,
            bullet_spread_degrees: 2.5,
            muzzle_ground: Some([14.0, 2.0]),
            muzzle_air: Some([12.0, 6.0]),
            aim_pivot: [0.0, 4.0],
            knockback_impulse: 80.0,
            death_sequence_duration: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyTunables {
    pub max_health: i32,
    pub walking_speed: f32,
    pub detect_range: f32,
    pub telegraph_duration: f32,
    pub shoot_animation_duration: f32,
    pub shooting_cooldown: f32,
    /// Length of the downward ledge probe cast from the muzzle.
    pub ground_probe_length: f32,
    pub muzzle: Option<[f32; 2]>,
    pub knockback_impulse: f32,
    pub death_flash_duration: f32,
    pub death_fade_duration: f32,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        Self {
            max_health: 100,
            walking_speed: 32.0,
            detect_range: 160.0,
            telegraph_duration: 0.5,
            shoot_animation_duration: 0.6,
            shooting_cooldown: 0.0,
            ground_probe_length: 24.0,
            muzzle: Some([12.0, 4.0]),
            knockback_impulse: 80.0,
            death_flash_duration: 0.1,
            death_fade_duration: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub damage: i32,
    pub time_to_live: f32,
    pub radius: f32,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self { speed: 160.0, damage: 17, time_to_live: 10.0, radius: 3.0 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectileTunables {
    pub player: ProjectileSpec,
    pub enemy: ProjectileSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackTunables {
    pub hit_flash_duration: f32,
    pub camera_shake_duration: f32,
    pub camera_shake_amplitude: f32,
}

impl Default for FeedbackTunables {
    fn default() -> Self {
        Self { hit_flash_duration: 0.1, camera_shake_duration: 0.3, camera_shake_amplitude: 12.0 }
    }
}

/// Configuration problems, reported once at startup.
#[derive(Debug, Error)]
pub enum TunablesError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{actor} has no `{anchor}` muzzle anchor; its shots are disabled")]
    MissingMuzzle { actor: &'static str, anchor: &'static str },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`player.shots_per_burst` is 0; burst fire is disabled")]
    ZeroShots,
}

impl Tunables {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, TunablesError> {
        toml::from_str(text).map_err(|source| TunablesError::Parse { path: path.to_path_buf(), source })
    }

    pub fn load(path: &Path) -> Result<Self, TunablesError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| TunablesError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml(&text, path)
    }

    /// Where overrides are looked up, if anywhere.
    pub fn override_path() -> Option<PathBuf> {
        match std::env::var_os(TUNABLES_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                let local = PathBuf::from(TUNABLES_FILE);
                local.is_file().then_some(local)
            }
        }
    }

    /// Collect every configuration problem. Callers log them and keep running:
    /// the affected behaviour checks its own inputs and skips itself.
    pub fn validate(&self) -> Vec<TunablesError> {
        let mut problems = Vec::new();

        if self.player.muzzle_ground.is_none() {
            problems.push(TunablesError::MissingMuzzle { actor: "player", anchor: "ground" });
        }
        if self.player.muzzle_air.is_none() {
            problems.push(TunablesError::MissingMuzzle { actor: "player", anchor: "air" });
        }
        if self.enemy.muzzle.is_none() {
            problems.push(TunablesError::MissingMuzzle { actor: "enemy", anchor: "muzzle" });
        }
        if self.player.shots_per_burst == 0 {
            problems.push(TunablesError::ZeroShots);
        }

        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("player.move_speed", self.player.move_speed),
            ("player.ground_check_radius", self.player.ground_check_radius),
            ("enemy.detect_range", self.enemy.detect_range),
            ("projectiles.player.speed", self.projectiles.player.speed),
            ("projectiles.enemy.speed", self.projectiles.enemy.speed),
            ("projectiles.player.time_to_live", self.projectiles.player.time_to_live),
            ("projectiles.enemy.time_to_live", self.projectiles.enemy.time_to_live),
        ];
        problems.extend(
            positive
                .into_iter()
                .filter(|(_, value)| *value <= 0.0 || value.is_nan())
                .map(|(field, value)| TunablesError::NonPositive { field, value }),
        );

        problems
    }
}

/// Convert a config anchor into a vector.
#[inline]
pub fn anchor(v: [f32; 2]) -> Vec2 {
    Vec2::from_array(v)
}
