//! 描画レイヤーと画面まわりの定数

use bevy::prelude::*;

pub const Z_CLOUDS: f32 = 0.2;
pub const Z_TILES: f32 = 0.4;
pub const Z_LIGHTS: f32 = 0.6;
pub const Z_PLAYER: f32 = 0.8;
// 茂みはプレイヤーより手前
pub const Z_BUSHES: f32 = 1.0;
pub const Z_PARTICLES: f32 = 1.2;
pub const Z_GRAIN: f32 = 10.0;
pub const Z_FADE: f32 = 20.0;

pub const WINDOW_TITLE: &str = "Nightlights";
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);
pub const MINIMUM_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// 夜空の背景色
pub const BACKGROUND_COLOR: Color = Color::srgb(0.05, 0.06, 0.12);

/// カメラ追従の補間係数（1.0 = 即時スナップ）
pub const CAMERA_FOLLOW_LERP: f32 = 1.0;

/// レベル完了フェードの速度（0-255スケール、1フレームあたり）
pub const FADE_SPEED: f32 = 2.0;

/// 物理シミュレーションの固定レート
pub const PHYSICS_STEP_HZ: f64 = 62.0;

pub const LOGO_DURATION: f32 = 2.5;

/// アウトロからメニューへ戻るフェードの色と速度
pub const OUTRO_FADE_COLOR: Color = Color::srgb(58.0 / 255.0, 158.0 / 255.0, 236.0 / 255.0);
pub const OUTRO_FADE_SPEED: f32 = 4.0;
