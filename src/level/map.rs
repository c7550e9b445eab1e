//! レベルマップ
//!
//! `constants::level` のタイルグリッドを解析してワールド座標に展開する。
//! 壁の当たり判定グリッドと、名前付きレイヤー相当のスポーン一覧
//! （プレイヤー・トリガーライト・茂み・雲）を持つ。

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::constants::*;
use crate::settings::GameSettings;

use super::LevelEntity;

/// 最初のナレーションを割り当てるライトレイヤー
pub const FIRST_LIGHT_LAYER: usize = 0;

#[derive(Component)]
pub struct Tile;

/// ナレーショントリガーのライト。
/// layer はグリッド読み取り順のレイヤー番号（0 = 最初のライト）。
#[derive(Component)]
pub struct TriggerLight {
    pub layer: usize,
}

#[derive(Resource)]
pub struct LevelMap {
    width: usize,
    height: usize,
    solid: Vec<bool>,
    pub player_spawn: Vec2,
    /// (レイヤー番号, 位置)。レイヤー番号順 = 走査順。
    pub lights: Vec<(usize, Vec2)>,
    pub bushes: Vec<Vec2>,
    pub clouds: Vec<Vec2>,
}

impl LevelMap {
    pub fn parse(rows: &[&str]) -> Result<Self, String> {
        if rows.is_empty() {
            return Err("map has no rows".to_string());
        }
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err("map has no columns".to_string());
        }

        let mut solid = vec![false; width * height];
        let mut player_spawn = None;
        let mut first_light = None;
        let mut story_lights = Vec::new();
        let mut bushes = Vec::new();
        let mut clouds = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, tile) in row.chars().enumerate() {
                let center = tile_center(col_index, row_index, height);
                match tile {
                    '#' => solid[row_index * width + col_index] = true,
                    'P' => {
                        if player_spawn.is_some() {
                            return Err("map has multiple player spawns".to_string());
                        }
                        player_spawn = Some(center);
                    }
                    'F' => {
                        if first_light.is_some() {
                            return Err("map has multiple first trigger lights".to_string());
                        }
                        first_light = Some(center);
                    }
                    'l' => story_lights.push(center),
                    'b' => bushes.push(center),
                    'c' => clouds.push(center),
                    '.' => {}
                    other => {
                        return Err(format!(
                            "unknown tile '{other}' at column {col_index}, row {row_index}"
                        ));
                    }
                }
            }
        }

        let player_spawn = player_spawn.ok_or("map has no player spawn")?;
        let first_light = first_light.ok_or("map has no first trigger light")?;

        // レイヤー0 = 最初のライト、残りは読み取り順で番号付け
        let mut lights = vec![(FIRST_LIGHT_LAYER, first_light)];
        lights.extend(
            story_lights
                .into_iter()
                .enumerate()
                .map(|(index, position)| (index + 1, position)),
        );

        Ok(Self {
            width,
            height,
            solid,
            player_spawn,
            lights,
            bushes,
            clouds,
        })
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    /// 下から数えたタイル行 `ty`、左からの列 `tx` が壁かどうか。
    /// 横方向の場外は壁扱い、マップ上空は空扱い。
    pub fn is_solid_tile(&self, tx: i64, ty: i64) -> bool {
        if tx < 0 || tx >= self.width as i64 {
            return true;
        }
        if ty < 0 {
            return true;
        }
        if ty >= self.height as i64 {
            return false;
        }
        let row = self.height as i64 - 1 - ty;
        self.solid[(row * self.width as i64 + tx) as usize]
    }

    /// ワールド座標の矩形が壁タイルに重なるか
    pub fn solid_in_rect(&self, min: Vec2, max: Vec2) -> bool {
        let tx0 = (min.x / TILE_SIZE).floor() as i64;
        let tx1 = ((max.x - 1e-4) / TILE_SIZE).floor() as i64;
        let ty0 = (min.y / TILE_SIZE).floor() as i64;
        let ty1 = ((max.y - 1e-4) / TILE_SIZE).floor() as i64;

        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                if self.is_solid_tile(tx, ty) {
                    return true;
                }
            }
        }
        false
    }
}

fn tile_center(col: usize, row: usize, height: usize) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        (height - 1 - row) as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

/// タイルマップを解析して壁とトリガーライトをスポーンする。
/// アセットの存在と同じく、マップの整合性はロード時の前提条件。
pub fn spawn_level(
    mut commands: Commands,
    game_assets: Res<GameAssets>,
    settings: Res<GameSettings>,
) {
    let rows = grid_for(&settings.map_name).expect("map name validated at startup");
    let map = match LevelMap::parse(rows) {
        Ok(map) => map,
        Err(reason) => {
            error!("LEVEL: Map '{}' is invalid: {}", settings.map_name, reason);
            panic!("cannot load map '{}'", settings.map_name);
        }
    };

    let mut tile_count = 0usize;
    for ty in 0..map.height as i64 {
        for tx in 0..map.width as i64 {
            if !map.is_solid_tile(tx, ty) {
                continue;
            }
            let position = Vec2::new(
                tx as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                ty as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            );
            commands.spawn((
                Tile,
                LevelEntity,
                Sprite {
                    image: game_assets.ground.clone(),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, Z_TILES),
            ));
            tile_count += 1;
        }
    }

    for (layer, position) in &map.lights {
        commands.spawn((
            TriggerLight { layer: *layer },
            LevelEntity,
            Sprite {
                image: game_assets.light.clone(),
                custom_size: Some(Vec2::splat(LIGHT_SIZE)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, Z_LIGHTS),
        ));
    }

    info!(
        "LEVEL: Map '{}' spawned ({} wall tiles, {} trigger lights)",
        settings.map_name,
        tile_count,
        map.lights.len()
    );
    commands.insert_resource(map);
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &[&str] = &[
        "..c...",
        "F..l.l",
        ".P..b.",
        "######",
    ];

    #[test]
    fn parses_layers_in_reading_order() {
        let map = LevelMap::parse(GRID).expect("grid is valid");

        assert_eq!(map.lights.len(), 3);
        assert_eq!(map.lights[0].0, FIRST_LIGHT_LAYER);
        assert_eq!(map.lights[1].0, 1);
        assert_eq!(map.lights[2].0, 2);
        // 読み取り順: 'F' が列0、'l' が列3と列5
        assert!(map.lights[1].1.x < map.lights[2].1.x);
        assert_eq!(map.bushes.len(), 1);
        assert_eq!(map.clouds.len(), 1);
    }

    #[test]
    fn player_spawn_is_in_world_coordinates() {
        let map = LevelMap::parse(GRID).expect("grid is valid");
        assert_eq!(
            map.player_spawn,
            Vec2::new(TILE_SIZE * 1.5, TILE_SIZE * 1.5)
        );
    }

    #[test]
    fn solid_queries_cover_bounds() {
        let map = LevelMap::parse(GRID).expect("grid is valid");

        // 一番下の行は壁
        assert!(map.is_solid_tile(0, 0));
        assert!(!map.is_solid_tile(0, 1));
        // 横の場外は壁扱い、上空は空
        assert!(map.is_solid_tile(-1, 1));
        assert!(map.is_solid_tile(99, 1));
        assert!(!map.is_solid_tile(0, 99));
        // 下抜けは常に塞がる
        assert!(map.is_solid_tile(0, -1));
    }

    #[test]
    fn rejects_inconsistent_maps() {
        assert!(LevelMap::parse(&[]).is_err());
        assert!(LevelMap::parse(&["P.", "##"]).is_err()); // 最初のライトがない
        assert!(LevelMap::parse(&["F.", "##"]).is_err()); // プレイヤーがいない
        assert!(LevelMap::parse(&["FP", "#?"]).is_err()); // 未知のタイル
        assert!(LevelMap::parse(&["FPP", "###"]).is_err()); // スポーンが複数
    }

    #[test]
    fn rect_query_matches_tile_edges() {
        let map = LevelMap::parse(GRID).expect("grid is valid");

        // 地面の上にぴったり立つ矩形は衝突しない
        let min = Vec2::new(TILE_SIZE, TILE_SIZE);
        let max = Vec2::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0);
        assert!(!map.solid_in_rect(min, max));

        // 少しでも沈めば衝突する
        assert!(map.solid_in_rect(min - Vec2::new(0.0, 0.5), max - Vec2::new(0.0, 0.5)));
    }
}
