//! 雲の流れ

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::level::map::LevelMap;
use crate::level::LevelEntity;

#[derive(Component)]
pub struct Cloud;

pub fn spawn_clouds(mut commands: Commands, map: Res<LevelMap>, game_assets: Res<GameAssets>) {
    let (width, height) = CLOUD_SIZE;
    for position in &map.clouds {
        commands.spawn((
            Cloud,
            LevelEntity,
            Sprite {
                image: game_assets.cloud.clone(),
                custom_size: Some(Vec2::new(width, height)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, Z_CLOUDS),
        ));
    }
}

/// 左へ流し、左端から出たら右端へ巻き戻す
pub fn cloud_drift_system(map: Res<LevelMap>, mut query: Query<&mut Transform, With<Cloud>>) {
    let map_width = map.pixel_width();
    let half = CLOUD_SIZE.0 / 2.0;

    for mut transform in query.iter_mut() {
        transform.translation.x -= CLOUD_SPEED;

        let right = transform.translation.x + half;
        if right <= 0.0 {
            transform.translation.x = map_width - right.abs() - half;
        }
    }
}
