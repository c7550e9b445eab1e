//! ゲーム状態管理モジュール
//!
//! BevyのStatesシステムで画面遷移とポーズを管理する。

use bevy::prelude::*;

/// 画面遷移: ロゴ → メニュー → レベル → アウトロ
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum Screen {
    #[default]
    Logo,
    Menu,
    Playing,
    Outro,
}

/// レベルプレイ中のポーズ状態
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum PauseMode {
    #[default]
    Running,
    Paused,
}

pub fn log_enter_playing() {
    info!("SCREEN: Entering level");
}

pub fn log_exit_playing() {
    info!("SCREEN: Leaving level");
}

pub fn log_enter_pause() {
    info!("SCREEN: Paused");
}

pub fn log_exit_pause() {
    info!("SCREEN: Resumed");
}
