//! 装飾エフェクト
//!
//! ゲームプレイに影響しない見た目だけの演出。どれも毎フレーム
//! 少しずつ動く小さなシステムの集まり。

pub mod bushes;
pub mod clouds;
pub mod grain;
pub mod particles;
