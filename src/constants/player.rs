//! プレイヤーの移動・物理チューニング
//!
//! 速度系は固定ステップ（62Hz）1回あたりのピクセル量で定義する。

/// 1固定ステップあたりの水平移動量
pub const PLAYER_MOVE_SPEED: f32 = 4.0;
/// ジャンプ初速
pub const PLAYER_JUMP_SPEED: f32 = 14.0;
/// 1フレームあたりの回転量（度）
pub const PLAYER_MOVE_ANGLE: f32 = 2.0;

pub const MODIFIER_WALK: f32 = 1.0;
pub const MODIFIER_SPRINT: f32 = 1.5;
/// ナレーション再生中の移動倍率（歩行と同じ）
pub const MODIFIER_SPEECH: f32 = MODIFIER_WALK;

/// レベル開始直後のスローモーション落下用重力
pub const GRAVITY_SLOWMO: f32 = 0.002;
pub const GRAVITY_DEFAULT: f32 = 1.0;
/// 落下速度の上限（1ステップあたり）
pub const MAX_FALL_SPEED: f32 = 20.0;

/// スポーン後のフェードイン速度（0-255スケール、1フレームあたり）
pub const PLAYER_ALPHA_SPEED: f32 = 2.0;
pub const ALPHA_MAX: f32 = 255.0;

pub const PLAYER_SIZE: f32 = 64.0;

/// ジャンプ可否判定で許容する足元との距離
pub const JUMP_GROUND_TOLERANCE: f32 = 5.0;
/// 接地待ちポーリングの間隔（秒、約4Hz）
pub const GROUND_POLL_INTERVAL: f32 = 0.25;
