//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyStats;
use crate::combat::ProjectilePrefab;
use crate::world::DataLoadError;

/// Directory the enemy definitions are read from.
pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.25,
            radius: 0.4,
        }
    }
}

/// Audio cue configuration for an enemy type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AudioConfig {
    /// Asset paths of the ambient clips.
    #[serde(default)]
    pub ambient_clips: Vec<String>,
    /// Asset paths of the flee clips.
    #[serde(default)]
    pub flee_clips: Vec<String>,
    pub play_range: f32,
    pub min_delay: f32,
    pub max_delay: f32,
}

/// Ranged attack configuration for an enemy type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RangedConfig {
    pub shoot_cooldown: f32,
    pub projectile_speed: f32,
    pub standoff_distance: f32,
    #[serde(default)]
    pub projectile: Option<ProjectilePrefab>,
}

fn default_angular_speed() -> f32 {
    300.0
}

fn default_stopping_distance() -> f32 {
    0.1
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: i32,
    pub sight_range: f32,
    /// Degrees from the forward axis.
    pub sight_angle: f32,
    pub wander_speed: f32,
    pub approach_speed: f32,
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f32,
    #[serde(default = "default_stopping_distance")]
    pub stopping_distance: f32,
    #[serde(default)]
    pub model_path: Option<String>,
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
    #[serde(default)]
    pub audio: Option<AudioConfig>,
    #[serde(default)]
    pub ranged: Option<RangedConfig>,
    /// Scene spawned where the enemy dies.
    #[serde(default)]
    pub death_effect: Option<String>,
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            sight_range: self.sight_range,
            sight_angle: self.sight_angle,
            wander_speed: self.wander_speed,
            approach_speed: self.approach_speed,
            angular_speed: self.angular_speed,
        }
    }

    /// Height of the collider's center above the ground it rests on.
    pub fn standing_height(&self) -> f32 {
        let collider = self.collider.clone().unwrap_or_default();
        (collider.half_height + collider.radius) * self.scale.unwrap_or(1.0)
    }

    /// Reject values the AI cannot run with.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: &str| DataLoadError::InvalidDefinition {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.max_health <= 0 {
            return Err(invalid("max_health must be positive"));
        }
        if self.sight_range < 0.0 || self.sight_angle < 0.0 {
            return Err(invalid("sight range and angle must not be negative"));
        }
        if self.wander_speed < 0.0 || self.approach_speed < 0.0 || self.angular_speed < 0.0 {
            return Err(invalid("speeds must not be negative"));
        }
        if self.stopping_distance < 0.0 {
            return Err(invalid("stopping_distance must not be negative"));
        }

        if let Some(audio) = &self.audio {
            if audio.play_range < 0.0 {
                return Err(invalid("audio play_range must not be negative"));
            }
            if audio.min_delay < 0.0 || audio.min_delay > audio.max_delay {
                return Err(invalid("audio delays must satisfy 0 <= min_delay <= max_delay"));
            }
        }

        if let Some(ranged) = &self.ranged {
            if ranged.shoot_cooldown <= 0.0 {
                return Err(invalid("shoot_cooldown must be positive"));
            }
            if ranged.projectile_speed <= 0.0 {
                return Err(invalid("projectile_speed must be positive"));
            }
            if ranged.standoff_distance < 0.0 {
                return Err(invalid("standoff_distance must not be negative"));
            }
            if let Some(projectile) = &ranged.projectile {
                if projectile.lifetime <= 0.0 || projectile.radius <= 0.0 {
                    return Err(invalid("projectile lifetime and radius must be positive"));
                }
            }
        }

        Ok(())
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default, Debug)]
pub struct EnemyDefinitions {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyDefinitions {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }
}

/// Parse and validate one definition.
pub fn parse_enemy_definition(path: &str, contents: &str) -> Result<EnemyDefinition, DataLoadError> {
    let definition =
        ron::from_str::<EnemyDefinition>(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
    definition.validate()?;
    Ok(definition)
}

/// Read one definition file.
pub fn load_enemy_definition(path: &Path) -> Result<EnemyDefinition, DataLoadError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_enemy_definition(&display, &contents)
}

/// Read every `*.ron` definition in `dir`, keyed by file stem.
///
/// Files that fail to load are logged and skipped.
pub fn load_definitions_from_dir(dir: &Path) -> Result<EnemyDefinitions, DataLoadError> {
    if !dir.exists() {
        return Err(DataLoadError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut loaded = EnemyDefinitions::default();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match load_enemy_definition(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                loaded.definitions.insert(enemy_type.to_string(), definition);
            }
            Err(e) => error!("Skipping enemy definition: {}", e),
        }
    }

    Ok(loaded)
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut definitions: ResMut<EnemyDefinitions>) {
    match load_definitions_from_dir(Path::new(ENEMY_DATA_DIR)) {
        Ok(loaded) => {
            definitions.definitions.extend(loaded.definitions);
            info!("Loaded {} enemy definitions", definitions.definitions.len());
        }
        Err(e) => warn!("No enemy definitions loaded: {}", e),
    }
}
