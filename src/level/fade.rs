//! フェードアウト
//!
//! レベル完了でホワイトアウトし、完了後にアウトロ画面へ切り替える。

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::*;
use crate::events::LevelCompleted;
use crate::game_state::Screen;

use super::camera::MainCamera;
use super::{LevelEntity, LevelPhase};

#[derive(Component, Default)]
pub struct FadeOverlay {
    /// 0-255スケール
    pub alpha: f32,
    fired: bool,
}

impl FadeOverlay {
    /// アルファを進める。上限に初めて達したフレームだけ true を返し、
    /// 以降は何度呼んでも false のまま。
    pub fn advance(&mut self) -> bool {
        self.alpha = (self.alpha + FADE_SPEED).min(ALPHA_MAX);
        if self.alpha >= ALPHA_MAX && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }
}

/// レベル完了の通知でオーバーレイを作る。
/// 最初は不可視で、次のフレームの更新から見え始める。
pub fn begin_fade_system(
    mut completed: MessageReader<LevelCompleted>,
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    existing: Query<(), With<FadeOverlay>>,
) {
    if completed.read().last().is_none() {
        return;
    }
    if !existing.is_empty() {
        return;
    }

    let size = windows
        .single()
        .map(|window| Vec2::new(window.width(), window.height()))
        .unwrap_or(Vec2::new(
            DEFAULT_WINDOW_SIZE.0 as f32,
            DEFAULT_WINDOW_SIZE.1 as f32,
        ));

    commands.spawn((
        FadeOverlay::default(),
        LevelEntity,
        Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.0), size),
        Transform::from_xyz(0.0, 0.0, Z_FADE),
        Visibility::Hidden,
    ));
    info!("FADE: Level fade started");
}

/// オーバーレイの更新。カメラに追従して常に画面全体を覆う。
pub fn fade_update_system(
    mut query: Query<(&mut FadeOverlay, &mut Transform, &mut Sprite, &mut Visibility)>,
    camera_query: Query<&Transform, (With<MainCamera>, Without<FadeOverlay>)>,
    mut phase: ResMut<LevelPhase>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Ok((mut overlay, mut transform, mut sprite, mut visibility)) = query.single_mut() else {
        return;
    };

    if let Ok(camera) = camera_query.single() {
        transform.translation.x = camera.translation.x;
        transform.translation.y = camera.translation.y;
    }
    *visibility = Visibility::Visible;

    let finished = overlay.advance();
    sprite.color.set_alpha(overlay.alpha / ALPHA_MAX);

    if finished {
        // 音声の停止は OnExit のテアダウンで行う。遷移はここで1回だけ。
        *phase = LevelPhase::TornDown;
        info!("FADE: Complete, leaving level");
        next_screen.set(Screen::Outro);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_action_fires_exactly_once() {
        let mut overlay = FadeOverlay::default();
        let mut fired = 0;

        // 上限到達まで + さらに余分に回す
        for _ in 0..1000 {
            if overlay.advance() {
                fired += 1;
            }
        }

        assert_eq!(overlay.alpha, ALPHA_MAX);
        assert_eq!(fired, 1);
    }

    #[test]
    fn alpha_is_clamped_at_the_target() {
        let mut overlay = FadeOverlay::default();
        for _ in 0..(ALPHA_MAX / FADE_SPEED) as usize + 10 {
            overlay.advance();
        }
        assert_eq!(overlay.alpha, ALPHA_MAX);
    }
}
