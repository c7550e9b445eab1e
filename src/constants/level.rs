//! レベルレイアウト
//!
//! タイルグリッドをコードで宣言する。1文字が1タイル:
//! `#` = 壁/地面, `P` = プレイヤー出現位置, `F` = 最初のトリガーライト,
//! `l` = トリガーライト（読み取り順に独立レイヤーとして番号付け）,
//! `b` = 茂み, `c` = 雲, `.` = 空白。

pub const TILE_SIZE: f32 = 64.0;

pub const DEFAULT_MAP: &str = "meadow";

/// "meadow" マップ。上の行ほど高い位置。
pub const LEVEL_MEADOW: &[&str] = &[
    "........c...............................c..................................c.............................c..............",
    "......................c.............................c...............................c....................................",
    ".................................c....................................c..............................c...................",
    "..........................................................................................................................",
    "..........................................................................................................................",
    "..........................................................................................................................",
    "..........................................................................................................................",
    "..........................................................................................................................",
    "....P.....................................................................................................................",
    ".............................................####..........................###...........................................",
    "..............F...................l..............................l..................l...................l.......l........",
    "..........bb..............###...........bbb..........####.........bb..............bbb..........bb........................",
    "##########################################################################################################################",
    "##########################################################################################################################",
];

/// マップ名からグリッドを引く。未知の名前は設定エラー。
pub fn grid_for(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "meadow" => Some(LEVEL_MEADOW),
        _ => None,
    }
}
