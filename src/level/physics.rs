//! プラットフォーマー物理
//!
//! 固定ステップ（62Hz）で動く簡易キネマティクス。速度系の定数は
//! 1ステップあたりのピクセル量。移動は軸ごとに行い、壁グリッドに
//! 当たったらタイル境界へ寄せる。

use bevy::prelude::*;

use crate::constants::*;

use super::map::LevelMap;

/// 壁との衝突で角に引っかからないための微小マージン
const SKIN: f32 = 0.01;

#[derive(Component)]
pub struct PlatformerBody {
    pub velocity: Vec2,
    /// 1ステップあたりの重力加速度。レベル開始時はスローモーション値。
    pub gravity: f32,
    pub on_ground: bool,
    pub half_extents: Vec2,
}

impl PlatformerBody {
    pub fn new(half_extents: Vec2, gravity: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity,
            on_ground: false,
            half_extents,
        }
    }

    /// 足元 `tolerance` 以内に支えがあるか。ジャンプと接地待ちの判定に使う。
    pub fn can_jump(&self, map: &LevelMap, position: Vec2, tolerance: f32) -> bool {
        let feet = position.y - self.half_extents.y;
        let min = Vec2::new(position.x - self.half_extents.x + SKIN, feet - tolerance);
        let max = Vec2::new(position.x + self.half_extents.x - SKIN, feet);
        map.solid_in_rect(min, max)
    }

    pub fn jump(&mut self, speed: f32) {
        self.velocity.y = speed;
    }
}

/// 1固定ステップ分進める
pub fn step(map: &LevelMap, position: &mut Vec2, body: &mut PlatformerBody) {
    body.velocity.y = (body.velocity.y - body.gravity).max(-MAX_FALL_SPEED);

    let half = body.half_extents;

    // X軸
    if body.velocity.x != 0.0 {
        let target_x = position.x + body.velocity.x;
        let min = Vec2::new(target_x - half.x, position.y - half.y + SKIN);
        let max = Vec2::new(target_x + half.x, position.y + half.y - SKIN);
        if map.solid_in_rect(min, max) {
            if body.velocity.x > 0.0 {
                let edge = ((target_x + half.x) / TILE_SIZE).floor() * TILE_SIZE;
                position.x = edge - half.x;
            } else {
                let edge = ((target_x - half.x) / TILE_SIZE).floor() * TILE_SIZE + TILE_SIZE;
                position.x = edge + half.x;
            }
        } else {
            position.x = target_x;
        }
    }

    // Y軸
    let target_y = position.y + body.velocity.y;
    let min = Vec2::new(position.x - half.x + SKIN, target_y - half.y);
    let max = Vec2::new(position.x + half.x - SKIN, target_y + half.y);
    body.on_ground = false;
    if map.solid_in_rect(min, max) {
        if body.velocity.y < 0.0 {
            let edge = ((target_y - half.y) / TILE_SIZE).floor() * TILE_SIZE + TILE_SIZE;
            position.y = edge + half.y;
            body.on_ground = true;
        } else {
            let edge = ((target_y + half.y) / TILE_SIZE).floor() * TILE_SIZE;
            position.y = edge - half.y;
        }
        body.velocity.y = 0.0;
    } else {
        position.y = target_y;
    }
}

/// 固定ステップの物理更新
pub fn physics_step_system(
    map: Res<LevelMap>,
    mut query: Query<(&mut Transform, &mut PlatformerBody)>,
) {
    for (mut transform, mut body) in query.iter_mut() {
        let mut position = transform.translation.truncate();
        step(&map, &mut position, &mut body);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_map() -> LevelMap {
        LevelMap::parse(&[
            "F.P.....",
            "........",
            "........",
            "########",
        ])
        .expect("grid is valid")
    }

    fn body() -> PlatformerBody {
        PlatformerBody::new(Vec2::splat(PLAYER_SIZE / 2.0), GRAVITY_DEFAULT)
    }

    #[test]
    fn falls_and_lands_on_ground() {
        let map = flat_map();
        let mut body = body();
        let mut position = map.player_spawn;

        for _ in 0..200 {
            step(&map, &mut position, &mut body);
        }

        // 地面の上で静止している
        assert!(body.on_ground);
        assert_eq!(position.y, TILE_SIZE + PLAYER_SIZE / 2.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn slow_motion_gravity_falls_slowly() {
        let map = flat_map();
        let mut slow = PlatformerBody::new(Vec2::splat(PLAYER_SIZE / 2.0), GRAVITY_SLOWMO);
        let mut position = map.player_spawn;
        let start_y = position.y;

        for _ in 0..10 {
            step(&map, &mut position, &mut slow);
        }

        assert!(!slow.on_ground);
        assert!(start_y - position.y < 1.0);
    }

    #[test]
    fn can_jump_only_near_ground() {
        let map = flat_map();
        let mut body = body();
        let mut position = map.player_spawn;

        // 空中では不可
        assert!(!body.can_jump(&map, position, JUMP_GROUND_TOLERANCE));

        for _ in 0..200 {
            step(&map, &mut position, &mut body);
        }
        assert!(body.can_jump(&map, position, JUMP_GROUND_TOLERANCE));

        // ジャンプ直後に地面から離れ、再び判定が落ちる
        body.jump(PLAYER_JUMP_SPEED);
        for _ in 0..5 {
            step(&map, &mut position, &mut body);
        }
        assert!(!body.can_jump(&map, position, JUMP_GROUND_TOLERANCE));
    }

    #[test]
    fn walls_stop_horizontal_movement() {
        let map = LevelMap::parse(&[
            "F.P..#..",
            "#####...",
            "########",
        ])
        .expect("grid is valid");
        let mut body = body();
        let mut position = map.player_spawn;

        // 接地させてから右へ歩く
        for _ in 0..50 {
            step(&map, &mut position, &mut body);
        }
        body.velocity.x = PLAYER_MOVE_SPEED;
        for _ in 0..200 {
            step(&map, &mut position, &mut body);
        }

        // 壁タイルの手前で止まる
        assert_eq!(position.x, 5.0 * TILE_SIZE - PLAYER_SIZE / 2.0);
    }
}
