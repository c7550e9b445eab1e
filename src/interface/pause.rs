//! ポーズメニュー
//!
//! 仮想時間を止めてオーバーレイを被せる。レベル側の各システムは
//! `PauseMode::Running` でゲートされているので動かない。

use bevy::prelude::*;

use crate::game_state::{PauseMode, Screen};

#[derive(Component)]
pub struct PauseOverlay;

pub fn enter_pause(mut commands: Commands, mut virtual_time: ResMut<Time<Virtual>>) {
    virtual_time.pause();

    commands
        .spawn((
            PauseOverlay,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Paused"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("Esc: resume    Q: main menu"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.8)),
            ));
        });
}

pub fn exit_pause(
    mut commands: Commands,
    mut virtual_time: ResMut<Time<Virtual>>,
    query: Query<Entity, With<PauseOverlay>>,
) {
    virtual_time.unpause();
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// ポーズ中だけ有効な追加入力
pub fn pause_menu_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut next_pause: ResMut<NextState<PauseMode>>,
) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        next_pause.set(PauseMode::Running);
        next_screen.set(Screen::Menu);
    }
}

/// レベルを出るときにポーズ状態を必ず解除する
pub fn force_resume(
    state: Res<State<PauseMode>>,
    mut next_pause: ResMut<NextState<PauseMode>>,
) {
    if *state.get() == PauseMode::Paused {
        next_pause.set(PauseMode::Running);
    }
}
