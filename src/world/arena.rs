//! Demo arena: a walled floor, the player, and enemies from definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::combat::{CollisionClass, ProjectileVisuals};
use crate::enemies::{spawn_enemy, EnemyDefinition, EnemyDefinitions, FlatNavSurface, NavSurface};
use crate::player::{spawn_player, PlayerConfig};

/// Arena layout file.
pub const ARENA_FILE: &str = "assets/data/arena.ron";

const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.5;
const FLOOR_DEPTH: f32 = 0.5;

/// One enemy placement.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Definition key (file stem under assets/data/enemies).
    pub enemy_type: String,
    pub position: (f32, f32, f32),
}

/// Arena layout.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Half the side length of the square floor.
    pub half_extent: f32,
    pub floor_height: f32,
    pub player_spawn: (f32, f32, f32),
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let slime = |x, z| EnemySpawn {
            enemy_type: "slime".to_string(),
            position: (x, 0.0, z),
        };
        Self {
            half_extent: 25.0,
            floor_height: 0.0,
            player_spawn: (0.0, 1.0, 15.0),
            enemies: vec![
                slime(-6.0, -4.0),
                slime(0.0, -8.0),
                slime(6.0, -4.0),
                slime(-3.0, -12.0),
                EnemySpawn {
                    enemy_type: "spitter".to_string(),
                    position: (3.0, 0.0, -14.0),
                },
            ],
        }
    }
}

impl ArenaConfig {
    /// The walkable area enemies wander on.
    pub fn nav_surface(&self) -> FlatNavSurface {
        // Keep agents off the wall faces
        FlatNavSurface::centered(self.half_extent - WALL_THICKNESS, self.floor_height)
    }

    /// Placement and shape of the floor slab; its top face is at `floor_height`.
    pub fn floor(&self) -> (Transform, Collider) {
        (
            Transform::from_xyz(0.0, self.floor_height - FLOOR_DEPTH / 2.0, 0.0),
            Collider::cuboid(self.half_extent, FLOOR_DEPTH / 2.0, self.half_extent),
        )
    }

    /// World position of an enemy placement, resting on the floor.
    ///
    /// The placement's `y` is an offset above the floor surface.
    pub fn enemy_position(&self, spawn: &EnemySpawn, definition: &EnemyDefinition) -> Vec3 {
        let (x, y, z) = spawn.position;
        Vec3::new(x, self.floor_height + y + definition.standing_height(), z)
    }
}

/// Parse an arena layout file.
pub fn load_arena_config(path: &Path) -> Result<ArenaConfig, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    let config = ron::from_str::<ArenaConfig>(&contents).map_err(|e| DataLoadError::ParseError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    if config.half_extent <= WALL_THICKNESS {
        return Err(DataLoadError::InvalidDefinition {
            name: display,
            reason: format!("half_extent must exceed the wall thickness ({WALL_THICKNESS})"),
        });
    }

    Ok(config)
}

/// Read the arena layout, falling back to the built-in one.
pub fn load_arena(mut commands: Commands) {
    let config = match load_arena_config(Path::new(ARENA_FILE)) {
        Ok(config) => {
            info!("Loaded arena with {} enemy spawns", config.enemies.len());
            config
        }
        Err(e) => {
            warn!("Using default arena: {}", e);
            ArenaConfig::default()
        }
    };
    commands.insert_resource(config);
}

/// Build the arena, then place the player and the enemies.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<ArenaConfig>,
    definitions: Res<EnemyDefinitions>,
    player_config: Res<PlayerConfig>,
) {
    let size = config.half_extent * 2.0;
    let floor_material = materials.add(Color::srgb(0.22, 0.25, 0.2));
    let wall_material = materials.add(Color::srgb(0.35, 0.33, 0.3));

    let (floor_transform, floor_collider) = config.floor();
    commands.spawn((
        Name::new("Floor"),
        CollisionClass::Environment,
        Mesh3d(meshes.add(Cuboid::new(size, FLOOR_DEPTH, size))),
        MeshMaterial3d(floor_material),
        floor_transform,
        floor_collider,
    ));

    let wall_y = config.floor_height + WALL_HEIGHT / 2.0;
    let edge = config.half_extent - WALL_THICKNESS / 2.0;
    let walls = [
        (Vec3::new(0.0, wall_y, -edge), Vec3::new(size, WALL_HEIGHT, WALL_THICKNESS)),
        (Vec3::new(0.0, wall_y, edge), Vec3::new(size, WALL_HEIGHT, WALL_THICKNESS)),
        (Vec3::new(-edge, wall_y, 0.0), Vec3::new(WALL_THICKNESS, WALL_HEIGHT, size)),
        (Vec3::new(edge, wall_y, 0.0), Vec3::new(WALL_THICKNESS, WALL_HEIGHT, size)),
    ];
    for (center, extent) in walls {
        commands.spawn((
            Name::new("Wall"),
            CollisionClass::Environment,
            Mesh3d(meshes.add(Cuboid::from_size(extent))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
            Collider::cuboid(extent.x / 2.0, extent.y / 2.0, extent.z / 2.0),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(NavSurface::new(config.nav_surface()));
    commands.insert_resource(ProjectileVisuals {
        mesh: meshes.add(Sphere::new(0.2)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.5, 0.9, 0.3),
            emissive: LinearRgba::rgb(0.3, 0.8, 0.2),
            ..default()
        }),
    });

    let (x, y, z) = config.player_spawn;
    spawn_player(&mut commands, Vec3::new(x, y, z), &player_config);

    for spawn in &config.enemies {
        let Some(definition) = definitions.get(&spawn.enemy_type) else {
            warn!("Unknown enemy type in arena: {}", spawn.enemy_type);
            continue;
        };
        spawn_enemy(
            &mut commands,
            &spawn.enemy_type,
            definition,
            config.enemy_position(spawn, definition),
            Some(&asset_server),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::data::{load_definitions_from_dir, parse_enemy_definition, ENEMY_DATA_DIR};
    use bevy_rapier3d::parry::math::Isometry;
    use bevy_rapier3d::parry::query::intersection_test;

    /// Whether a projectile of `radius` spawned at `origin` starts inside the floor.
    fn shot_overlaps_floor(config: &ArenaConfig, origin: Vec3, radius: f32) -> bool {
        let (floor_transform, floor_collider) = config.floor();
        let floor_at = floor_transform.translation;
        let ball = Collider::ball(radius);
        intersection_test(
            &Isometry::translation(floor_at.x, floor_at.y, floor_at.z),
            &*floor_collider.raw,
            &Isometry::translation(origin.x, origin.y, origin.z),
            &*ball.raw,
        )
        .unwrap()
    }

    #[test]
    fn enemies_rest_on_the_floor() {
        let definition = parse_enemy_definition(
            "slime.ron",
            "(name: \"Slime\", max_health: 3, sight_range: 20.0, sight_angle: 45.0, \
             wander_speed: 1.0, approach_speed: 2.5)",
        )
        .unwrap();
        let config = ArenaConfig {
            floor_height: 0.5,
            ..ArenaConfig::default()
        };
        let spawn = EnemySpawn {
            enemy_type: "slime".to_string(),
            position: (2.0, 0.0, -3.0),
        };

        let position = config.enemy_position(&spawn, &definition);
        assert!(position.abs_diff_eq(Vec3::new(2.0, 1.15, -3.0), 1e-6));
    }

    #[test]
    fn ranged_enemies_fire_clear_of_the_floor() {
        let definitions = load_definitions_from_dir(Path::new(ENEMY_DATA_DIR)).unwrap();
        let config = load_arena_config(Path::new(ARENA_FILE)).unwrap();
        let mut shooters = 0;

        for spawn in &config.enemies {
            let definition = definitions.get(&spawn.enemy_type).unwrap();
            let Some(prefab) = definition
                .ranged
                .as_ref()
                .and_then(|ranged| ranged.projectile.as_ref())
            else {
                continue;
            };
            shooters += 1;

            let muzzle = config.enemy_position(spawn, definition);
            assert!(
                !shot_overlaps_floor(&config, muzzle, prefab.radius),
                "{} fires from inside the floor at {muzzle}",
                spawn.enemy_type
            );

            // Centered on the floor plane, the same shot would hit the floor at once
            let (x, _, z) = spawn.position;
            let sunk = Vec3::new(x, config.floor_height, z);
            assert!(shot_overlaps_floor(&config, sunk, prefab.radius));
        }

        assert!(shooters > 0);
    }

    #[test]
    fn arena_file_with_defaults_parses() {
        let config: ArenaConfig = ron::from_str(
            r#"(
                half_extent: 10.0,
                floor_height: 0.5,
                player_spawn: (0.0, 1.0, 0.0),
            )"#,
        )
        .unwrap();
        assert!(config.enemies.is_empty());
        assert_eq!(config.nav_surface(), FlatNavSurface::centered(9.5, 0.5));
    }

    #[test]
    fn missing_arena_file_is_reported() {
        let err = load_arena_config(Path::new("no/such/arena.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }
}
