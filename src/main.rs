mod assets;
mod constants;
mod events;
mod game_state;
mod interface;
mod level;
mod plugins;
mod settings;

use bevy::prelude::*;
use bevy::render::settings::{Backends, RenderCreation, WgpuSettings};
use bevy::render::RenderPlugin;
use bevy::window::{MonitorSelection, PresentMode, WindowMode};
use std::env;
use std::process::ExitCode;

use constants::{BACKGROUND_COLOR, WINDOW_TITLE};
use events::LevelCompleted;
use game_state::{
    log_enter_pause, log_enter_playing, log_exit_pause, log_exit_playing, PauseMode, Screen,
};
use interface::InterfacePlugin;
use level::LevelPlugin;
use plugins::{InputPlugin, StartupPlugin};
use settings::{GameSettings, ParseOutcome, USAGE};

fn main() -> ExitCode {
    let settings = match GameSettings::parse(env::args()) {
        Ok(ParseOutcome::Settings(settings)) => settings,
        Ok(ParseOutcome::HelpRequested) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("nightlights: {message}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let backends = select_backends();
    let (width, height) = settings.window_size;
    let mode = if settings.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
    } else {
        WindowMode::Windowed
    };
    let present_mode = if settings.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    };

    App::new()
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: WINDOW_TITLE.into(),
                        resolution: (width, height).into(),
                        mode,
                        present_mode,
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,bevy_app=info".to_string(),
                    ..default()
                })
                .set(RenderPlugin {
                    render_creation: RenderCreation::Automatic(WgpuSettings {
                        backends: Some(backends), // WSL は GL を優先
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(settings)
        // Screens
        .init_state::<Screen>()
        .init_state::<PauseMode>()
        .add_systems(OnEnter(Screen::Playing), log_enter_playing)
        .add_systems(OnExit(Screen::Playing), log_exit_playing)
        .add_systems(OnEnter(PauseMode::Paused), log_enter_pause)
        .add_systems(OnExit(PauseMode::Paused), log_exit_pause)
        // Messages
        .add_message::<LevelCompleted>()
        // Game plugins
        .add_plugins(StartupPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(LevelPlugin)
        .add_plugins(InterfacePlugin)
        .run();

    ExitCode::SUCCESS
}

fn select_backends() -> Backends {
    if env::var("WGPU_BACKEND").is_ok() {
        return Backends::PRIMARY;
    }
    if is_wsl() {
        Backends::GL
    } else {
        Backends::PRIMARY
    }
}

fn is_wsl() -> bool {
    env::var("WSL_DISTRO_NAME").is_ok() || env::var("WSL_INTEROP").is_ok()
}
