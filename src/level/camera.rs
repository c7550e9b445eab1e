use bevy::prelude::*;

use crate::constants::*;

use super::player::Player;

#[derive(Component)]
pub struct MainCamera;

/// プレイヤーへ線形補間で追従する（係数1.0で即時スナップ）
pub fn camera_follow_system(
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };

    let target = player.translation.truncate();
    let position = camera.translation.truncate().lerp(target, CAMERA_FOLLOW_LERP);
    camera.translation.x = position.x;
    camera.translation.y = position.y;
}

/// レベル開始時にカメラをプレイヤー位置へスナップする
pub fn snap_camera_to_player(
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };
    camera.translation.x = player.translation.x;
    camera.translation.y = player.translation.y;
}
