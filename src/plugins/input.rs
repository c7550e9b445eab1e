//! 入力関連のプラグイン
//!
//! キーボードとゲームパッドをまとめて `PlayerIntent` にサンプリングする。
//! 画面固有の入力（メニュー決定など）は各画面のシステム側で処理する。

use bevy::prelude::*;

use crate::game_state::{PauseMode, Screen};
use crate::level::{LevelSet, MoveDirection, PlayerIntent};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sample_player_intent.in_set(LevelSet::Intent))
            .add_systems(
                Update,
                pause_toggle_system.run_if(in_state(Screen::Playing)),
            );
    }
}

/// 移動・ジャンプ・スプリントの意図を集める。
/// ジャンプはエッジトリガーで、消費側が同フレーム中に処理する。
fn sample_player_intent(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut intent: ResMut<PlayerIntent>,
) {
    let mut left = keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA);
    let mut right = keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD);
    let mut jump = keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::ArrowUp)
        || keyboard.just_pressed(KeyCode::KeyW);
    let mut sprint = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    for gamepad in gamepads.iter() {
        let stick_x = gamepad.left_stick().x.round();
        if stick_x < 0.0 {
            left = true;
        } else if stick_x > 0.0 {
            right = true;
        }
        jump |= gamepad.just_pressed(GamepadButton::South);
        sprint |= gamepad.pressed(GamepadButton::LeftThumb);
    }

    intent.horizontal = match (left, right) {
        (true, false) => MoveDirection::Left,
        (false, true) => MoveDirection::Right,
        // 両押しは直前の方向を維持
        (true, true) => intent.horizontal,
        (false, false) => MoveDirection::None,
    };
    intent.jump = jump;
    intent.sprint = sprint;
}

fn pause_toggle_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    state: Res<State<PauseMode>>,
    mut next: ResMut<NextState<PauseMode>>,
) {
    let pressed = keyboard.just_pressed(KeyCode::Escape)
        || gamepads
            .iter()
            .any(|g| g.just_pressed(GamepadButton::Start));
    if !pressed {
        return;
    }

    match state.get() {
        PauseMode::Running => next.set(PauseMode::Paused),
        PauseMode::Paused => next.set(PauseMode::Running),
    }
}
