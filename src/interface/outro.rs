//! 「つづく」画面
//!
//! レベル完了のホワイトアウトから続く白背景の一枚画面。
//! 決定キーで青いフェードを経てメニューへ戻る。

use bevy::prelude::*;

use crate::constants::*;
use crate::game_state::Screen;

#[derive(Component)]
pub struct OutroScreen;

/// メニューへ戻るフェード。存在する間は決定キーを無視する。
#[derive(Component)]
pub struct OutroFade {
    /// 0-255スケール
    pub alpha: f32,
}

pub fn enter_outro(mut commands: Commands, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = Color::WHITE;

    commands
        .spawn((
            OutroScreen,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("To be continued"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(Color::BLACK),
            ));
        });
}

pub fn outro_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    fades: Query<(), With<OutroFade>>,
) {
    // フェードが走り始めたら以降の入力は無視
    if !fades.is_empty() {
        return;
    }

    let confirm = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::Space)
        || gamepads
            .iter()
            .any(|gamepad| gamepad.just_pressed(GamepadButton::Start));
    if !confirm {
        return;
    }

    commands.spawn((
        OutroScreen,
        OutroFade { alpha: 0.0 },
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(OUTRO_FADE_COLOR.with_alpha(0.0)),
        GlobalZIndex(1),
    ));
}

pub fn outro_fade_system(
    mut query: Query<(&mut OutroFade, &mut BackgroundColor)>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Ok((mut fade, mut background)) = query.single_mut() else {
        return;
    };

    fade.alpha = (fade.alpha + OUTRO_FADE_SPEED).min(ALPHA_MAX);
    background.0 = OUTRO_FADE_COLOR.with_alpha(fade.alpha / ALPHA_MAX);

    if fade.alpha >= ALPHA_MAX {
        next_screen.set(Screen::Menu);
    }
}

pub fn exit_outro(
    mut commands: Commands,
    mut clear_color: ResMut<ClearColor>,
    query: Query<Entity, With<OutroScreen>>,
) {
    clear_color.0 = BACKGROUND_COLOR;
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
