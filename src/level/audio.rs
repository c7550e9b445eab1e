//! レベルの音声
//!
//! 音楽と環境音のハンドルを持ち、ポーズ・再開・テアダウンで
//! まとめて操作する。

use bevy::audio::{PlaybackMode, Volume};
use bevy::prelude::*;

use crate::constants::*;
use crate::settings::GameSettings;

use super::LevelEntity;

/// ポーズ/テアダウン対象の音声ハンドル
#[derive(Component)]
pub struct LevelAudio;

#[derive(Component)]
pub struct MusicAudio;

#[derive(Component)]
pub struct AmbienceAudio;

pub fn start_level_audio(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
) {
    let volumes = settings.volumes;

    // TODO: マップ側のトリガーで曲を切り替えられるようにする
    commands.spawn((
        AudioPlayer::new(asset_server.load("audio/music/before_dawn.ogg")),
        PlaybackSettings {
            volume: Volume::Linear(volumes.music * VOLUME_MUSIC_MODIFIER),
            ..default()
        },
        MusicAudio,
        LevelAudio,
        LevelEntity,
    ));

    let ambience_path = format!("audio/atmos/{}.ogg", settings.map_name);
    commands.spawn((
        AudioPlayer::new(asset_server.load(ambience_path)),
        PlaybackSettings {
            mode: PlaybackMode::Loop,
            volume: Volume::Linear(volumes.sound * VOLUME_ATMO_MODIFIER),
            ..default()
        },
        AmbienceAudio,
        LevelAudio,
        LevelEntity,
    ));
}

/// 曲が自然に終わったハンドルはその場で解放する
pub fn release_finished_music(
    mut commands: Commands,
    query: Query<(Entity, &AudioSink), With<MusicAudio>>,
) {
    for (entity, sink) in query.iter() {
        if sink.empty() {
            info!("AUDIO: Music finished, releasing handle");
            commands.entity(entity).despawn();
        }
    }
}

pub fn pause_level_audio(query: Query<&AudioSink, With<LevelAudio>>) {
    for sink in query.iter() {
        sink.pause();
    }
}

pub fn resume_level_audio(query: Query<&AudioSink, With<LevelAudio>>) {
    for sink in query.iter() {
        sink.play();
    }
}

/// テアダウン: 所有する音声を全て停止して破棄する
pub fn teardown_level_audio(
    mut commands: Commands,
    query: Query<(Entity, Option<&AudioSink>), With<LevelAudio>>,
) {
    let mut stopped = 0usize;
    for (entity, sink) in query.iter() {
        if let Some(sink) = sink {
            sink.stop();
        }
        commands.entity(entity).despawn();
        stopped += 1;
    }
    if stopped > 0 {
        info!("AUDIO: Stopped {stopped} level sounds");
    }
}
