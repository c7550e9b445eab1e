//! 前景の茂み
//!
//! プレイヤーが重なったときに透けて、姿が隠れないようにする。

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::level::map::LevelMap;
use crate::level::player::Player;
use crate::level::LevelEntity;

#[derive(Component)]
pub struct Bush {
    /// 0-255スケール
    pub alpha: f32,
}

pub fn spawn_bushes(mut commands: Commands, map: Res<LevelMap>, game_assets: Res<GameAssets>) {
    for position in &map.bushes {
        commands.spawn((
            Bush {
                alpha: BUSH_ALPHA_MAX,
            },
            LevelEntity,
            Sprite {
                image: game_assets.bush.clone(),
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, Z_BUSHES),
        ));
    }
}

/// どれか1つでもプレイヤーと重なっていれば全部まとめてフェードする
pub fn bush_fade_system(
    player_query: Query<&Transform, With<Player>>,
    mut bush_query: Query<(&mut Bush, &mut Sprite, &Transform), Without<Player>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player = player_transform.translation.truncate();

    let collides = bush_query.iter().any(|(.., transform)| {
        transform.translation.truncate().distance(player) < BUSH_FADE_DISTANCE
    });

    for (mut bush, mut sprite, _) in bush_query.iter_mut() {
        bush.alpha = if collides {
            (bush.alpha - BUSH_FADE_SPEED).max(BUSH_ALPHA_MIN)
        } else {
            (bush.alpha + BUSH_FADE_SPEED).min(BUSH_ALPHA_MAX)
        };
        sprite.color.set_alpha(bush.alpha / BUSH_ALPHA_MAX);
    }
}
