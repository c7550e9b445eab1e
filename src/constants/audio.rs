//! 音量まわりの定数

/// 音楽トラックにかける追加の減衰
pub const VOLUME_MUSIC_MODIFIER: f32 = 0.4;
/// 環境音にかける追加の減衰
pub const VOLUME_ATMO_MODIFIER: f32 = 0.1;

pub const DEFAULT_VOLUME_MUSIC: i32 = 50;
pub const DEFAULT_VOLUME_SOUND: i32 = 50;
pub const DEFAULT_VOLUME_SPEECH: i32 = 100;
pub const DEFAULT_VOLUME_MASTER: i32 = 100;
