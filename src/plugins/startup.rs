//! スタートアップ関連のプラグイン
//!
//! アセットカタログの生成とカメラの初期化。

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use rand::Rng;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::level::camera::MainCamera;
use crate::level::PlayerIntent;

pub struct StartupPlugin;

impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .add_systems(Startup, setup);
    }
}

/// カメラ初期化 + アセットカタログ生成
fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
) {
    commands.spawn((Camera2d, MainCamera));

    let game_assets = create_game_assets(&asset_server, &mut images);
    commands.insert_resource(game_assets);
}

/// AssetServer と Images から GameAssets を構築する
fn create_game_assets(asset_server: &AssetServer, images: &mut Assets<Image>) -> GameAssets {
    let particle_circle = create_soft_circle_texture(images);
    let grain_noise = create_grain_noise_texture(images);

    GameAssets {
        player: asset_server.load("textures/player.png"),
        ground: asset_server.load("textures/ground.png"),
        light: asset_server.load("textures/light.png"),
        bush: asset_server.load("textures/bush.png"),
        cloud: asset_server.load("textures/cloud.png"),
        particle_circle,
        grain_noise,
        light_launch: asset_server.load("audio/sounds/light_launch.ogg"),
    }
}

/// 縁に向かって減衰する白い円テクスチャを生成する
fn create_soft_circle_texture(images: &mut Assets<Image>) -> Handle<Image> {
    let size = 16u32;
    let center = size as f32 / 2.0;
    let mut data = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let distance = (dx * dx + dy * dy).sqrt() / center;
            let alpha = if distance <= 1.0 {
                ((1.0 - distance).powf(0.5) * 255.0) as u8
            } else {
                0
            };
            data.push(255);
            data.push(255);
            data.push(255);
            data.push(alpha);
        }
    }

    images.add(image_from_rgba(size, data))
}

/// フィルムグレイン用の白黒ノイズテクスチャを生成する
fn create_grain_noise_texture(images: &mut Assets<Image>) -> Handle<Image> {
    let size = GRAIN_TEXTURE_SIZE;
    let mut rng = rand::thread_rng();
    let mut data = Vec::with_capacity((size * size * 4) as usize);

    for _ in 0..size * size {
        let luma: u8 = rng.gen_range(0..=255);
        data.push(luma);
        data.push(luma);
        data.push(luma);
        data.push(255);
    }

    images.add(image_from_rgba(size, data))
}

fn image_from_rgba(size: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}
