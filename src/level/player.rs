//! プレイヤー
//!
//! 球体のプレイヤーを移動意図に従って転がす。レベル開始直後は
//! スローモーションで着地するまで操作を受け付けない。

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::constants::*;

use super::map::LevelMap;
use super::physics::PlatformerBody;
use super::voiceover::SpeechState;
use super::{LevelEntity, LevelPhase};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    #[default]
    None,
    Left,
    Right,
}

/// 入力レイヤーが毎フレーム書き込む移動意図。
/// jump はエッジトリガーで、同フレームの移動処理が消費する。
#[derive(Resource, Default)]
pub struct PlayerIntent {
    pub horizontal: MoveDirection,
    pub jump: bool,
    pub sprint: bool,
}

#[derive(Component)]
pub struct Player {
    /// 転がり角度（度、0-360でラップ）
    pub angle: f32,
    /// スポーン後のフェードイン用アルファ（0-255スケール）
    pub alpha: f32,
    /// 物理エンジンが接地を確認するまで false
    pub can_walk: bool,
}

/// 接地待ちポーリング（約4Hz）
#[derive(Resource)]
pub struct GroundPoll(pub Timer);

impl Default for GroundPoll {
    fn default() -> Self {
        Self(Timer::from_seconds(
            GROUND_POLL_INTERVAL,
            TimerMode::Repeating,
        ))
    }
}

pub fn spawn_player(mut commands: Commands, map: Res<LevelMap>, game_assets: Res<GameAssets>) {
    commands.spawn((
        Player {
            angle: 0.0,
            alpha: 0.0,
            can_walk: false,
        },
        PlatformerBody::new(Vec2::splat(PLAYER_SIZE / 2.0), GRAVITY_SLOWMO),
        LevelEntity,
        Sprite {
            image: game_assets.player.clone(),
            custom_size: Some(Vec2::splat(PLAYER_SIZE)),
            color: Color::srgba(1.0, 1.0, 1.0, 0.0),
            ..default()
        },
        Transform::from_xyz(map.player_spawn.x, map.player_spawn.y, Z_PLAYER),
    ));
    info!("PLAYER: Spawned at {:?}", map.player_spawn);
}

/// 右回りの角度更新。360を超えたら巻き戻す。
pub(crate) fn rotate_right(angle: f32, step: f32) -> f32 {
    let angle = angle + step;
    if angle > 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// 左回りの角度更新。0以下は360側へラップする。
pub(crate) fn rotate_left(angle: f32, step: f32) -> f32 {
    let angle = angle - step;
    if angle <= 0.0 {
        360.0 - angle.abs()
    } else {
        angle
    }
}

/// 移動意図を速度と回転に反映する。
/// ナレーション再生中はスプリントより優先して速度が落ちる。
pub fn player_movement_system(
    intent: Res<PlayerIntent>,
    speech: Res<SpeechState>,
    map: Res<LevelMap>,
    mut query: Query<(&mut Player, &mut PlatformerBody, &mut Transform, &mut Sprite)>,
) {
    let Ok((mut player, mut body, mut transform, mut sprite)) = query.single_mut() else {
        return;
    };

    // フェードインは移動の有無に関わらず進む
    player.alpha = (player.alpha + PLAYER_ALPHA_SPEED).min(ALPHA_MAX);
    sprite.color.set_alpha(player.alpha / ALPHA_MAX);

    let mut modifier = MODIFIER_WALK;
    if intent.sprint {
        modifier = MODIFIER_SPRINT;
    }
    if speech.playing {
        modifier = MODIFIER_SPEECH;
    }

    if player.can_walk {
        match intent.horizontal {
            MoveDirection::Left => {
                body.velocity.x = -PLAYER_MOVE_SPEED * modifier;
                player.angle = rotate_left(player.angle, PLAYER_MOVE_ANGLE * modifier);
            }
            MoveDirection::Right => {
                body.velocity.x = PLAYER_MOVE_SPEED * modifier;
                player.angle = rotate_right(player.angle, PLAYER_MOVE_ANGLE * modifier);
            }
            MoveDirection::None => body.velocity.x = 0.0,
        }
    }

    if intent.jump {
        let position = transform.translation.truncate();
        if body.can_jump(&map, position, JUMP_GROUND_TOLERANCE) {
            let mut speed = PLAYER_JUMP_SPEED;
            if speech.playing {
                speed *= MODIFIER_SPEECH;
            }
            body.jump(speed);
            debug!("PLAYER: Jump");
        }
    }

    transform.rotation = Quat::from_rotation_z(-player.angle.to_radians());
}

/// レベル開始時の接地待ち。接地が確認できたら歩行を解禁し、
/// スローモーション重力を通常値へ1回だけ切り替える。
pub fn wait_for_ground_system(
    time: Res<Time>,
    mut poll: ResMut<GroundPoll>,
    map: Res<LevelMap>,
    mut phase: ResMut<LevelPhase>,
    mut query: Query<(&Transform, &mut Player, &mut PlatformerBody)>,
) {
    if *phase != LevelPhase::WaitingForGround {
        return;
    }
    poll.0.tick(time.delta());
    if !poll.0.just_finished() {
        return;
    }
    let Ok((transform, mut player, mut body)) = query.single_mut() else {
        return;
    };
    if !body.can_jump(&map, transform.translation.truncate(), JUMP_GROUND_TOLERANCE) {
        return;
    }

    player.can_walk = true;
    body.gravity = GRAVITY_DEFAULT;
    *phase = LevelPhase::Active;
    info!("LEVEL: Ground contact confirmed, level active");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::physics::step;

    #[test]
    fn rotation_wraps_moving_right() {
        assert_eq!(rotate_right(359.0, 2.0), 1.0);
        assert_eq!(rotate_right(10.0, 2.0), 12.0);
        // ちょうど360は巻き戻さない
        assert_eq!(rotate_right(358.0, 2.0), 360.0);
    }

    #[test]
    fn rotation_wraps_moving_left() {
        assert_eq!(rotate_left(1.0, 2.0), 359.0);
        assert_eq!(rotate_left(12.0, 2.0), 10.0);
        assert_eq!(rotate_left(2.0, 2.0), 360.0);
    }

    /// 接地確認で歩行解禁と重力切り替えが1回だけ起きるシナリオ
    #[test]
    fn ground_contact_enables_walking_once() {
        let map = LevelMap::parse(&[
            "F.P...",
            "......",
            "######",
        ])
        .expect("grid is valid");
        let mut player = Player {
            angle: 0.0,
            alpha: 0.0,
            can_walk: false,
        };
        let mut body = PlatformerBody::new(Vec2::splat(PLAYER_SIZE / 2.0), GRAVITY_SLOWMO);
        let mut position = map.player_spawn;
        let mut switches = 0;

        for _ in 0..100_000 {
            step(&map, &mut position, &mut body);
            // 4Hzポーリング相当の接地チェック
            if !player.can_walk && body.can_jump(&map, position, JUMP_GROUND_TOLERANCE) {
                player.can_walk = true;
                body.gravity = GRAVITY_DEFAULT;
                switches += 1;
            }
        }

        assert!(player.can_walk);
        assert_eq!(switches, 1);
        assert_eq!(body.gravity, GRAVITY_DEFAULT);
    }
}
