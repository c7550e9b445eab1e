//! ナレーショントリガーのチューニング

/// トリガーライトの反応距離（ピクセル）
pub const LIGHT_TRIGGER_THRESHOLD: f32 = 100.0;
/// 打ち上げ中のライトの上昇速度（1フレームあたり）
pub const LIGHT_RISE_SPEED: f32 = 10.0;
/// 打ち上げ中のライトの回転速度（度/フレーム）
pub const LIGHT_ROTATE_SPEED: f32 = 5.0;
pub const LIGHT_SIZE: f32 = 48.0;

/// ライトの上昇演出と音声開始を合わせるための遅延（秒）
pub const VOICEOVER_LAUNCH_DELAY: f32 = 2.0;

pub const DEFAULT_LANGUAGE: &str = "en";
