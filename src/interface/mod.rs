//! 画面まわり（ロゴ / メニュー / ポーズ / アウトロ）
//!
//! コアのレベルランタイムの外側にある薄いUI層。各画面は自分が
//! 使う入力システムだけを自分の状態に登録する。

mod logo;
mod menu;
mod outro;
mod pause;

use bevy::prelude::*;

use crate::game_state::{PauseMode, Screen};
use crate::level::audio::{pause_level_audio, resume_level_audio};

pub struct InterfacePlugin;

impl Plugin for InterfacePlugin {
    fn build(&self, app: &mut App) {
        app
            // ロゴ
            .add_systems(OnEnter(Screen::Logo), logo::enter_logo)
            .add_systems(Update, logo::update_logo.run_if(in_state(Screen::Logo)))
            .add_systems(OnExit(Screen::Logo), logo::exit_logo)
            // メニュー
            .add_systems(OnEnter(Screen::Menu), menu::enter_menu)
            .add_systems(Update, menu::menu_input.run_if(in_state(Screen::Menu)))
            .add_systems(OnExit(Screen::Menu), menu::exit_menu)
            // ポーズ
            .add_systems(
                OnEnter(PauseMode::Paused),
                (pause::enter_pause, pause_level_audio),
            )
            .add_systems(
                OnExit(PauseMode::Paused),
                (pause::exit_pause, resume_level_audio),
            )
            .add_systems(
                Update,
                pause::pause_menu_input
                    .run_if(in_state(Screen::Playing).and(in_state(PauseMode::Paused))),
            )
            .add_systems(OnExit(Screen::Playing), pause::force_resume)
            // アウトロ
            .add_systems(OnEnter(Screen::Outro), outro::enter_outro)
            .add_systems(
                Update,
                (outro::outro_input, outro::outro_fade_system)
                    .chain()
                    .run_if(in_state(Screen::Outro)),
            )
            .add_systems(OnExit(Screen::Outro), outro::exit_outro);
    }
}
