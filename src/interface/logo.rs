//! ロゴ画面

use bevy::prelude::*;

use crate::constants::*;
use crate::game_state::Screen;
use crate::settings::GameSettings;

#[derive(Component)]
pub struct LogoScreen;

#[derive(Resource)]
pub struct LogoTimer(Timer);

pub fn enter_logo(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if !settings.show_logo {
        next_screen.set(Screen::Menu);
        return;
    }

    commands.insert_resource(LogoTimer(Timer::from_seconds(
        LOGO_DURATION,
        TimerMode::Once,
    )));
    commands
        .spawn((
            LogoScreen,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("a nightlights production"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// 一定時間経過か決定キーでメニューへ
pub fn update_logo(
    time: Res<Time>,
    timer: Option<ResMut<LogoTimer>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    timer.0.tick(time.delta());

    if timer.0.finished() || keyboard.just_pressed(KeyCode::Enter) {
        next_screen.set(Screen::Menu);
    }
}

pub fn exit_logo(mut commands: Commands, query: Query<Entity, With<LogoScreen>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<LogoTimer>();
}
