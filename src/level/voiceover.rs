//! ナレーション
//!
//! ストーリークリップのキューと再生状態。キューはレベルセットアップの
//! たびに作り直して一様シャッフルする。`Intro` だけは予約された導入
//! クリップで、シャッフル対象外。

use bevy::audio::Volume;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::constants::*;
use crate::events::LevelCompleted;
use crate::settings::GameSettings;

use super::audio::LevelAudio;
use super::{LevelEntity, LevelPhase};

/// ナレーションクリップのID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceoverClip {
    /// 予約された導入クリップ。シャッフルキューを消費しない。
    Intro,
    Chapter01,
    Chapter02,
    Chapter03,
    Chapter04,
    Chapter05,
}

impl VoiceoverClip {
    pub const STORY: [VoiceoverClip; 5] = [
        VoiceoverClip::Chapter01,
        VoiceoverClip::Chapter02,
        VoiceoverClip::Chapter03,
        VoiceoverClip::Chapter04,
        VoiceoverClip::Chapter05,
    ];

    fn file_name(self) -> &'static str {
        match self {
            VoiceoverClip::Intro => "text00",
            VoiceoverClip::Chapter01 => "text01",
            VoiceoverClip::Chapter02 => "text02",
            VoiceoverClip::Chapter03 => "text03",
            VoiceoverClip::Chapter04 => "text04",
            VoiceoverClip::Chapter05 => "text05",
        }
    }

    pub fn asset_path(self, language: &str) -> String {
        format!("speech/{language}/{}.ogg", self.file_name())
    }
}

/// レベル1回分のナレーションキュー
#[derive(Resource)]
pub struct VoiceoverQueue {
    pending: Vec<VoiceoverClip>,
    /// 優先リストから1回だけ解決した再生言語
    pub language: String,
}

impl VoiceoverQueue {
    /// ストーリークリップを一様シャッフルした新しいキューを作る
    pub fn shuffled(languages: &[String]) -> Self {
        let mut pending = VoiceoverClip::STORY.to_vec();
        pending.shuffle(&mut thread_rng());
        let language = languages
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        Self { pending, language }
    }

    /// `first` のときはシャッフルキューに触れず `Intro` を返す。
    /// 何度呼んでもキューは減らない。
    pub fn pop(&mut self, first: bool) -> Option<VoiceoverClip> {
        if first {
            return Some(VoiceoverClip::Intro);
        }
        self.pending.pop()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// ナレーション再生中フラグ。トリガー走査と移動速度のゲート。
#[derive(Resource, Default)]
pub struct SpeechState {
    pub playing: bool,
}

/// レベル世代。テアダウン後に遅延再生が発火するのを防ぐ。
#[derive(Resource, Default)]
pub struct LevelGeneration(pub u32);

/// ライトの上昇演出に合わせて予約された遅延再生
#[derive(Component)]
pub struct PendingVoiceover {
    pub clip: VoiceoverClip,
    pub timer: Timer,
    pub generation: u32,
}

#[derive(Component)]
pub struct VoiceoverAudio;

pub fn setup_voiceovers(mut commands: Commands, settings: Res<GameSettings>) {
    let queue = VoiceoverQueue::shuffled(&settings.languages);
    info!(
        "VOICEOVER: {} story clips queued, language '{}'",
        queue.remaining(),
        queue.language
    );
    commands.insert_resource(queue);
    commands.insert_resource(SpeechState::default());
}

/// 遅延時間を過ぎた予約再生を開始する
pub fn pending_voiceover_system(
    mut commands: Commands,
    time: Res<Time>,
    generation: Res<LevelGeneration>,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
    queue: Res<VoiceoverQueue>,
    mut query: Query<(Entity, &mut PendingVoiceover)>,
) {
    for (entity, mut pending) in query.iter_mut() {
        pending.timer.tick(time.delta());
        if !pending.timer.just_finished() {
            continue;
        }
        commands.entity(entity).despawn();

        // テアダウン後に残っていた予約は捨てる
        if pending.generation != generation.0 {
            warn!("VOICEOVER: Dropping stale playback of {:?}", pending.clip);
            continue;
        }

        let path = pending.clip.asset_path(&queue.language);
        info!("VOICEOVER: Playing {path}");
        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings {
                volume: Volume::Linear(settings.volumes.speech),
                ..default()
            },
            VoiceoverAudio,
            LevelAudio,
            LevelEntity,
        ));
    }
}

/// 再生完了時にレベル完了を通知すべきか。
/// 位相を Completing へ進めるので、同じ完了は二度報告されない。
pub(crate) fn completion_due(queue: &VoiceoverQueue, phase: &mut LevelPhase) -> bool {
    if queue.is_exhausted() && *phase == LevelPhase::Active {
        *phase = LevelPhase::Completing;
        return true;
    }
    false
}

/// 再生終了の監視。キューが空になったらレベル完了を1回だけ通知する。
pub fn voiceover_completion_system(
    mut commands: Commands,
    mut speech: ResMut<SpeechState>,
    queue: Res<VoiceoverQueue>,
    mut phase: ResMut<LevelPhase>,
    mut completed: MessageWriter<LevelCompleted>,
    query: Query<(Entity, &AudioSink), With<VoiceoverAudio>>,
) {
    for (entity, sink) in query.iter() {
        if !sink.empty() {
            continue;
        }
        commands.entity(entity).despawn();
        speech.playing = false;
        info!("VOICEOVER: Speech completed");

        if completion_due(&queue, &mut phase) {
            info!("LEVEL: All voiceovers played");
            completed.write(LevelCompleted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn languages() -> Vec<String> {
        vec!["en".to_string()]
    }

    #[test]
    fn setup_reshuffles_the_same_clip_set() {
        let first = VoiceoverQueue::shuffled(&languages());
        let second = VoiceoverQueue::shuffled(&languages());

        assert_eq!(first.remaining(), 5);
        assert_eq!(second.remaining(), 5);

        let first_set: HashSet<_> = first.pending.iter().copied().collect();
        let second_set: HashSet<_> = second.pending.iter().copied().collect();
        let story_set: HashSet<_> = VoiceoverClip::STORY.iter().copied().collect();
        assert_eq!(first_set, story_set);
        assert_eq!(second_set, story_set);
    }

    #[test]
    fn first_pop_never_depletes_the_queue() {
        let mut queue = VoiceoverQueue::shuffled(&languages());

        for _ in 0..10 {
            assert_eq!(queue.pop(true), Some(VoiceoverClip::Intro));
        }
        assert_eq!(queue.remaining(), 5);
    }

    #[test]
    fn queue_is_exhausted_after_five_pops() {
        let mut queue = VoiceoverQueue::shuffled(&languages());

        let mut seen = HashSet::new();
        for _ in 0..5 {
            let clip = queue.pop(false).expect("queue has clips");
            assert_ne!(clip, VoiceoverClip::Intro);
            seen.insert(clip);
        }
        // 各クリップは1レベルにつき1回しか出ない
        assert_eq!(seen.len(), 5);
        assert!(queue.is_exhausted());
        assert_eq!(queue.pop(false), None);

        // 導入クリップは枯渇後も返り続ける
        assert_eq!(queue.pop(true), Some(VoiceoverClip::Intro));
    }

    /// 最後のクリップを聴き終えたらレベル完了が1回だけ通知される
    #[test]
    fn level_completes_exactly_once_after_final_clip() {
        let mut queue = VoiceoverQueue::shuffled(&languages());
        let mut phase = LevelPhase::Active;

        // 途中のクリップでは完了にならない
        for _ in 0..4 {
            queue.pop(false);
            assert!(!completion_due(&queue, &mut phase));
        }

        queue.pop(false);
        assert!(completion_due(&queue, &mut phase));
        assert_eq!(phase, LevelPhase::Completing);

        // 以降の再生完了（導入クリップなど）では二度と通知しない
        assert!(!completion_due(&queue, &mut phase));
    }

    #[test]
    fn language_preference_resolves_to_first_entry() {
        let queue = VoiceoverQueue::shuffled(&["fr".to_string(), "en".to_string()]);
        assert_eq!(queue.language, "fr");
        assert_eq!(
            VoiceoverClip::Intro.asset_path(&queue.language),
            "speech/fr/text00.ogg"
        );

        let fallback = VoiceoverQueue::shuffled(&[]);
        assert_eq!(fallback.language, DEFAULT_LANGUAGE);
    }
}
