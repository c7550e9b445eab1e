//! フィルムグレイン
//!
//! カメラに貼り付けたノイズテクスチャを毎フレーム揺らして
//! 粒子感を出すオーバーレイ。

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::level::camera::MainCamera;
use crate::level::LevelEntity;

#[derive(Component)]
pub struct FilmGrain;

pub fn spawn_grain(
    mut commands: Commands,
    game_assets: Res<GameAssets>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<Entity, With<MainCamera>>,
) {
    let Ok(camera) = camera_query.single() else {
        return;
    };
    let size = windows
        .single()
        .map(|window| Vec2::new(window.width(), window.height()))
        .unwrap_or(Vec2::new(
            DEFAULT_WINDOW_SIZE.0 as f32,
            DEFAULT_WINDOW_SIZE.1 as f32,
        ));

    // ジッターで端が見えないよう少し大きめに張る
    let overlay_size = size + Vec2::splat(GRAIN_JITTER * 2.0);

    let grain = commands
        .spawn((
            FilmGrain,
            LevelEntity,
            Sprite {
                image: game_assets.grain_noise.clone(),
                custom_size: Some(overlay_size),
                color: Color::srgba(1.0, 1.0, 1.0, GRAIN_ALPHA),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, Z_GRAIN),
        ))
        .id();
    commands.entity(camera).add_child(grain);
}

pub fn grain_jitter_system(mut query: Query<&mut Transform, With<FilmGrain>>) {
    let mut rng = rand::thread_rng();
    for mut transform in query.iter_mut() {
        transform.translation.x = rng.gen_range(-GRAIN_JITTER..=GRAIN_JITTER);
        transform.translation.y = rng.gen_range(-GRAIN_JITTER..=GRAIN_JITTER);
    }
}
