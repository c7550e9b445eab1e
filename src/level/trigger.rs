//! トリガーライト
//!
//! プレイヤーがライトに近づくと打ち上げ演出が始まり、少し遅れて
//! ナレーションが再生される。走査は再生中・打ち上げ中は止まる。

use bevy::audio::{PlaybackMode, Volume};
use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::settings::GameSettings;

use super::audio::LevelAudio;
use super::map::{LevelMap, TriggerLight, FIRST_LIGHT_LAYER};
use super::player::Player;
use super::voiceover::{LevelGeneration, PendingVoiceover, SpeechState, VoiceoverQueue};
use super::LevelEntity;

/// 打ち上げ中のライト。付いている間は走査が止まり、
/// マップ上端を抜けたらスプライトごと消える。
#[derive(Component, Default)]
pub struct LightFlight {
    pub angle: f32,
}

/// 走査の相互排他: 再生中か打ち上げ中は何もしない
pub(crate) fn scan_blocked(speech_playing: bool, light_in_flight: bool) -> bool {
    speech_playing || light_in_flight
}

/// 宣言順（レイヤー番号順）で最初に閾値内へ入ったライトを返す。
/// 最近傍ではなく「最初に見つかったもの」が勝つ。
pub(crate) fn first_light_in_range(
    player: Vec2,
    lights: &[(usize, Vec2)],
    threshold: f32,
) -> Option<usize> {
    lights
        .iter()
        .position(|(_, position)| position.distance(player) < threshold)
}

/// プレイヤーとトリガーライトの近接判定
pub fn light_trigger_scan_system(
    mut commands: Commands,
    mut speech: ResMut<SpeechState>,
    mut queue: ResMut<VoiceoverQueue>,
    generation: Res<LevelGeneration>,
    game_assets: Res<GameAssets>,
    settings: Res<GameSettings>,
    player_query: Query<&Transform, With<Player>>,
    lights_query: Query<(Entity, &Transform, &TriggerLight), Without<LightFlight>>,
    flight_query: Query<(), With<LightFlight>>,
) {
    if scan_blocked(speech.playing, !flight_query.is_empty()) {
        return;
    }
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player = player_transform.translation.truncate();

    // クエリの列挙順は不定なのでレイヤー宣言順に並べてから走査する
    let mut lights: Vec<(usize, Vec2, Entity)> = lights_query
        .iter()
        .map(|(entity, transform, light)| (light.layer, transform.translation.truncate(), entity))
        .collect();
    lights.sort_by_key(|(layer, ..)| *layer);

    let positions: Vec<(usize, Vec2)> = lights
        .iter()
        .map(|(layer, position, _)| (*layer, *position))
        .collect();
    let Some(found) = first_light_in_range(player, &positions, LIGHT_TRIGGER_THRESHOLD) else {
        return;
    };
    let (layer, _, entity) = lights[found];

    info!("TRIGGER: Collided with light layer {layer}");

    commands.spawn((
        AudioPlayer::new(game_assets.light_launch.clone()),
        PlaybackSettings {
            mode: PlaybackMode::Despawn,
            volume: Volume::Linear(settings.volumes.sound),
            ..default()
        },
        LevelAudio,
        LevelEntity,
    ));

    // スプライトはキューの状態に関わらず消費する。
    // 消費しないと空キューのまま同じライトが毎フレーム再マッチしてしまう。
    commands.entity(entity).insert(LightFlight::default());

    let Some(clip) = queue.pop(layer == FIRST_LIGHT_LAYER) else {
        error!("VOICEOVER: No voiceovers left");
        return;
    };

    speech.playing = true;
    commands.spawn((
        PendingVoiceover {
            clip,
            timer: Timer::from_seconds(VOICEOVER_LAUNCH_DELAY, TimerMode::Once),
            generation: generation.0,
        },
        LevelEntity,
    ));
}

/// 打ち上げ中のライトの更新
pub fn light_flight_system(
    mut commands: Commands,
    map: Res<LevelMap>,
    mut query: Query<(Entity, &mut Transform, &mut LightFlight)>,
) {
    for (entity, mut transform, mut flight) in query.iter_mut() {
        transform.translation.y += LIGHT_RISE_SPEED;
        flight.angle += LIGHT_ROTATE_SPEED;
        if flight.angle >= 360.0 {
            flight.angle = 0.0;
        }
        transform.rotation = Quat::from_rotation_z(flight.angle.to_radians());

        // 下端がマップの高さを超えたら破棄
        if transform.translation.y - LIGHT_SIZE / 2.0 > map.pixel_height() {
            commands.entity(entity).despawn();
            info!("TRIGGER: Light left the map");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_is_mutually_exclusive_with_playback() {
        assert!(scan_blocked(true, false));
        assert!(scan_blocked(false, true));
        assert!(scan_blocked(true, true));
        assert!(!scan_blocked(false, false));
    }

    #[test]
    fn first_found_wins_over_nearest() {
        let player = Vec2::ZERO;
        // レイヤー0は遠め、レイヤー1はすぐ隣
        let lights = [
            (0, Vec2::new(90.0, 0.0)),
            (1, Vec2::new(10.0, 0.0)),
        ];

        let found = first_light_in_range(player, &lights, LIGHT_TRIGGER_THRESHOLD);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn out_of_range_lights_are_ignored() {
        let player = Vec2::ZERO;
        let lights = [
            (0, Vec2::new(500.0, 0.0)),
            (1, Vec2::new(0.0, 300.0)),
        ];

        assert_eq!(
            first_light_in_range(player, &lights, LIGHT_TRIGGER_THRESHOLD),
            None
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let player = Vec2::ZERO;
        let lights = [(0, Vec2::new(LIGHT_TRIGGER_THRESHOLD, 0.0))];
        assert_eq!(
            first_light_in_range(player, &lights, LIGHT_TRIGGER_THRESHOLD),
            None
        );

        let lights = [(0, Vec2::new(LIGHT_TRIGGER_THRESHOLD - 0.1, 0.0))];
        assert_eq!(
            first_light_in_range(player, &lights, LIGHT_TRIGGER_THRESHOLD),
            Some(0)
        );
    }
}
