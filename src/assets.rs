use bevy::prelude::*;

#[derive(Resource)]
pub struct GameAssets {
    pub player: Handle<Image>,
    pub ground: Handle<Image>,
    pub light: Handle<Image>,
    pub bush: Handle<Image>,
    pub cloud: Handle<Image>,
    // 生成テクスチャ
    pub particle_circle: Handle<Image>, // ソフト円パーティクル
    pub grain_noise: Handle<Image>,     // フィルムグレイン用ノイズ
    // 効果音
    pub light_launch: Handle<AudioSource>,
}
