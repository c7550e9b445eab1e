//! レベルランタイム
//!
//! プレイヤー・物理・カメラ・トリガー・演出・フェードを1つの
//! 更新サイクルに束ねるオーケストレータ。フレーム内の順序は
//! 入力 →（固定ステップ物理）→ カメラ追従 → トリガー走査 →
//! 装飾エフェクト → フェード で固定。

pub mod audio;
pub mod camera;
pub mod effects;
pub mod fade;
pub mod map;
pub mod physics;
pub mod player;
pub mod trigger;
pub mod voiceover;

use bevy::prelude::*;

use crate::constants::PHYSICS_STEP_HZ;
use crate::game_state::{PauseMode, Screen};

pub use player::{MoveDirection, PlayerIntent};

/// レベルのライフサイクル位相
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    #[default]
    Loading,
    WaitingForGround,
    Active,
    Completing,
    TornDown,
}

/// レベル終了時にまとめて破棄するエンティティ
#[derive(Component)]
pub struct LevelEntity;

/// `Update` 内の実行順序。宣言順に `chain` される。
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSet {
    Intent,
    Actor,
    Camera,
    Triggers,
    Effects,
    Fade,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelPhase>()
            .init_resource::<voiceover::LevelGeneration>()
            .insert_resource(Time::<Fixed>::from_hz(PHYSICS_STEP_HZ))
            .configure_sets(
                Update,
                (
                    LevelSet::Intent,
                    LevelSet::Actor,
                    LevelSet::Camera,
                    LevelSet::Triggers,
                    LevelSet::Effects,
                    LevelSet::Fade,
                )
                    .chain()
                    .run_if(in_state(Screen::Playing).and(in_state(PauseMode::Running))),
            )
            .add_systems(
                OnEnter(Screen::Playing),
                (
                    begin_level_loading,
                    map::spawn_level,
                    player::spawn_player,
                    effects::clouds::spawn_clouds,
                    effects::bushes::spawn_bushes,
                    effects::particles::spawn_particles,
                    effects::grain::spawn_grain,
                    audio::start_level_audio,
                    voiceover::setup_voiceovers,
                    camera::snap_camera_to_player,
                    finish_level_loading,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    player::player_movement_system,
                    player::wait_for_ground_system,
                )
                    .chain()
                    .in_set(LevelSet::Actor),
            )
            .add_systems(
                Update,
                camera::camera_follow_system.in_set(LevelSet::Camera),
            )
            .add_systems(
                Update,
                (
                    trigger::light_trigger_scan_system,
                    trigger::light_flight_system,
                    voiceover::pending_voiceover_system,
                    voiceover::voiceover_completion_system,
                )
                    .chain()
                    .in_set(LevelSet::Triggers),
            )
            .add_systems(
                Update,
                (
                    effects::clouds::cloud_drift_system,
                    effects::bushes::bush_fade_system,
                    effects::particles::particle_drift_system,
                    effects::grain::grain_jitter_system,
                    audio::release_finished_music,
                )
                    .in_set(LevelSet::Effects),
            )
            .add_systems(
                Update,
                (fade::begin_fade_system, fade::fade_update_system)
                    .chain()
                    .in_set(LevelSet::Fade),
            )
            .add_systems(
                FixedUpdate,
                physics::physics_step_system
                    .run_if(in_state(Screen::Playing).and(in_state(PauseMode::Running))),
            )
            .add_systems(
                OnExit(Screen::Playing),
                (
                    audio::teardown_level_audio,
                    despawn_level_entities,
                    reset_level_state,
                )
                    .chain(),
            );
    }
}

/// 世代を進めて位相をリセットする。前のレベルの遅延再生は
/// 世代不一致で無効になる。
fn begin_level_loading(
    mut commands: Commands,
    mut generation: ResMut<voiceover::LevelGeneration>,
    mut phase: ResMut<LevelPhase>,
) {
    generation.0 += 1;
    *phase = LevelPhase::Loading;
    commands.insert_resource(player::GroundPoll::default());
    info!("LEVEL: Loading (generation {})", generation.0);
}

fn finish_level_loading(mut phase: ResMut<LevelPhase>) {
    *phase = LevelPhase::WaitingForGround;
}

fn despawn_level_entities(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    let mut count = 0usize;
    for entity in query.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    info!("LEVEL: Torn down ({count} entities)");
}

fn reset_level_state(mut phase: ResMut<LevelPhase>, mut intent: ResMut<PlayerIntent>) {
    *phase = LevelPhase::TornDown;
    *intent = PlayerIntent::default();
}
