//! 装飾エフェクトのチューニング

// ----- 雲 -----
/// 雲の流れる速度（1フレームあたり）
pub const CLOUD_SPEED: f32 = 0.25;
pub const CLOUD_SIZE: (f32, f32) = (192.0, 96.0);

// ----- 茂み -----
/// プレイヤー接近時のフェード速度（0-255スケール、1フレームあたり）
pub const BUSH_FADE_SPEED: f32 = 1.0;
pub const BUSH_ALPHA_MIN: f32 = 255.0 * 0.5;
pub const BUSH_ALPHA_MAX: f32 = 255.0;
/// この距離より近づくと茂みが透け始める
pub const BUSH_FADE_DISTANCE: f32 = 64.0;

// ----- 浮遊パーティクル -----
pub const PARTICLES_COUNT: usize = 300;
pub const PARTICLES_RADIUS_MAX: f32 = 6.0;
/// パーティクルが漂う高さの帯（ワールド座標）
pub const PARTICLES_Y_MIN: f32 = 320.0;
pub const PARTICLES_Y_MAX: f32 = 512.0;
pub const PARTICLE_SPEED: f32 = 0.2;
pub const PARTICLE_ALPHA_MIN: u8 = 100;
pub const PARTICLE_ALPHA_MAX: u8 = 200;

// ----- フィルムグレイン -----
pub const GRAIN_ALPHA: f32 = 24.0 / 255.0;
/// 1フレームあたりの最大ジッター（ピクセル）
pub const GRAIN_JITTER: f32 = 3.0;
pub const GRAIN_TEXTURE_SIZE: u32 = 256;
