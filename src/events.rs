//! モジュール間で受け渡すメッセージ

use bevy::prelude::*;

/// 全ナレーションを再生し終えた（フェードアウト開始の合図）
#[derive(Message)]
pub struct LevelCompleted;
