//! 浮遊パーティクル
//!
//! 画面中層を左へ漂う淡い光の粒。右端から無限に供給される。

use bevy::prelude::*;
use rand::Rng;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::level::map::LevelMap;
use crate::level::LevelEntity;

#[derive(Component)]
pub struct Particle {
    pub radius: f32,
}

pub fn spawn_particles(mut commands: Commands, map: Res<LevelMap>, game_assets: Res<GameAssets>) {
    let mut rng = rand::thread_rng();
    let width = map.pixel_width();

    for _ in 0..PARTICLES_COUNT {
        let radius = rng.gen_range(1.0..=PARTICLES_RADIUS_MAX);
        let alpha = rng.gen_range(PARTICLE_ALPHA_MIN..=PARTICLE_ALPHA_MAX);
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(PARTICLES_Y_MIN..=PARTICLES_Y_MAX);

        commands.spawn((
            Particle { radius },
            LevelEntity,
            Sprite {
                image: game_assets.particle_circle.clone(),
                custom_size: Some(Vec2::splat(radius * 2.0)),
                color: Color::srgba(1.0, 1.0, 1.0, alpha as f32 / 255.0),
                ..default()
            },
            Transform::from_xyz(x, y, Z_PARTICLES),
        ));
    }
}

/// 左へ漂わせ、画面外へ出たら右端で湧き直す
pub fn particle_drift_system(
    map: Res<LevelMap>,
    mut query: Query<(&Particle, &mut Transform)>,
) {
    let mut rng = rand::thread_rng();
    let width = map.pixel_width();

    for (particle, mut transform) in query.iter_mut() {
        transform.translation.x -= PARTICLE_SPEED;

        if transform.translation.x + particle.radius < 0.0 {
            transform.translation.x = width;
            transform.translation.y = rng.gen_range(PARTICLES_Y_MIN..=PARTICLES_Y_MAX);
        }
    }
}
