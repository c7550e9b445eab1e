//! 起動設定
//!
//! コマンドライン引数を起動時に1回だけ解析して `GameSettings` リソースに
//! まとめる。不正な値は起動を中断する（ゲーム内でのリカバリはしない）。

use bevy::prelude::*;

use crate::constants::*;

/// 0-100 の生音量から導出した再生ゲイン。レベル全体で不変。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioVolumes {
    pub music: f32,
    pub sound: f32,
    pub speech: f32,
}

impl AudioVolumes {
    /// 生の音量設定（0-100）をマスター音量でスケールしたゲインに変換する
    pub fn from_raw(music: i32, sound: i32, speech: i32, master: i32) -> Self {
        Self {
            music: gain(music, master),
            sound: gain(sound, master),
            speech: gain(speech, master),
        }
    }
}

/// 0以下は正確に 0.0 になる
fn gain(raw: i32, master: i32) -> f32 {
    if raw <= 0 || master <= 0 {
        return 0.0;
    }
    (raw as f32 / 100.0) * (master as f32 / 100.0)
}

#[derive(Resource, Clone, Debug)]
pub struct GameSettings {
    pub window_size: (u32, u32),
    pub fullscreen: bool,
    pub vsync: bool,
    pub show_logo: bool,
    pub map_name: String,
    /// ナレーション言語の優先リスト。レベルロード時に1回だけ解決される。
    pub languages: Vec<String>,
    pub volumes: AudioVolumes,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            fullscreen: true,
            vsync: true,
            show_logo: true,
            map_name: DEFAULT_MAP.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            volumes: AudioVolumes::from_raw(
                DEFAULT_VOLUME_MUSIC,
                DEFAULT_VOLUME_SOUND,
                DEFAULT_VOLUME_SPEECH,
                DEFAULT_VOLUME_MASTER,
            ),
        }
    }
}

pub const USAGE: &str = "\
nightlights [OPTIONS]

  --windowed            run in a window instead of fullscreen
  --size WxH            window size, e.g. 1280x720
  --no-vsync            disable vsync
  --no-logo             skip the logo screen
  --map NAME            map to load (default: meadow)
  --lang LIST           comma separated language preference, e.g. fr,en
  --volume-music N      music volume 0-100
  --volume-sound N      sound volume 0-100
  --volume-speech N     speech volume 0-100
  --volume-master N     master volume 0-100
  --help                print this help
";

/// ヘルプ表示を要求されたときの戻り値
pub enum ParseOutcome {
    Settings(GameSettings),
    HelpRequested,
}

impl GameSettings {
    /// `std::env::args` 互換のイテレータから設定を組み立てる
    pub fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<ParseOutcome, String> {
        // 先頭はプログラム名
        let _ = args.next();

        let mut settings = GameSettings::default();
        let mut volume_music = DEFAULT_VOLUME_MUSIC;
        let mut volume_sound = DEFAULT_VOLUME_SOUND;
        let mut volume_speech = DEFAULT_VOLUME_SPEECH;
        let mut volume_master = DEFAULT_VOLUME_MASTER;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--windowed" => settings.fullscreen = false,
                "--no-vsync" => settings.vsync = false,
                "--no-logo" => settings.show_logo = false,
                "--size" => {
                    let value = expect_value(&mut args, "--size")?;
                    settings.window_size = parse_size(&value)?;
                }
                "--map" => {
                    let value = expect_value(&mut args, "--map")?;
                    if grid_for(&value).is_none() {
                        return Err(format!("unknown map '{value}'"));
                    }
                    settings.map_name = value;
                }
                "--lang" => {
                    let value = expect_value(&mut args, "--lang")?;
                    let languages: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    if languages.is_empty() {
                        return Err("--lang requires at least one language".to_string());
                    }
                    settings.languages = languages;
                }
                "--volume-music" => volume_music = parse_volume(&mut args, "--volume-music")?,
                "--volume-sound" => volume_sound = parse_volume(&mut args, "--volume-sound")?,
                "--volume-speech" => volume_speech = parse_volume(&mut args, "--volume-speech")?,
                "--volume-master" => volume_master = parse_volume(&mut args, "--volume-master")?,
                "--help" | "-h" => return Ok(ParseOutcome::HelpRequested),
                other => return Err(format!("unknown argument '{other}'")),
            }
        }

        settings.volumes =
            AudioVolumes::from_raw(volume_music, volume_sound, volume_speech, volume_master);
        Ok(ParseOutcome::Settings(settings))
    }
}

fn expect_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} requires a value"))
}

/// "1280x720" 形式のサイズ指定を解析する
fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let error = || format!("invalid size '{value}', expected WxH like 1280x720");

    let (w, h) = value.split_once(['x', 'X']).ok_or_else(error)?;
    let w: u32 = w.trim().parse().map_err(|_| error())?;
    let h: u32 = h.trim().parse().map_err(|_| error())?;

    let (min_w, min_h) = MINIMUM_WINDOW_SIZE;
    if w < min_w || h < min_h {
        return Err(format!("size '{value}' below minimum {min_w}x{min_h}"));
    }
    Ok((w, h))
}

fn parse_volume<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<i32, String> {
    let value = expect_value(args, flag)?;
    let parsed: i32 = value
        .parse()
        .map_err(|_| format!("{flag} expects an integer, got '{value}'"))?;
    if parsed > 100 {
        return Err(format!("{flag} must be at most 100, got {parsed}"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("nightlights".to_string())
            .chain(list.iter().map(|s| s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn parsed(list: &[&str]) -> GameSettings {
        match GameSettings::parse(args(list)).expect("parse failed") {
            ParseOutcome::Settings(s) => s,
            ParseOutcome::HelpRequested => panic!("unexpected help"),
        }
    }

    #[test]
    fn zero_or_negative_raw_volume_is_exactly_silent() {
        for raw in [0, -1, -100] {
            let volumes = AudioVolumes::from_raw(raw, raw, raw, 100);
            assert_eq!(volumes.music, 0.0);
            assert_eq!(volumes.sound, 0.0);
            assert_eq!(volumes.speech, 0.0);
        }
        // マスターが最大でも生音量0なら無音のまま
        assert_eq!(AudioVolumes::from_raw(0, 50, 50, 100).music, 0.0);
    }

    #[test]
    fn positive_volumes_scale_by_master() {
        let volumes = AudioVolumes::from_raw(50, 80, 100, 50);
        assert_relative_eq!(volumes.music, 0.5 * 0.5);
        assert_relative_eq!(volumes.sound, 0.8 * 0.5);
        assert_relative_eq!(volumes.speech, 1.0 * 0.5);
    }

    #[test]
    fn parses_window_options() {
        let settings = parsed(&["--windowed", "--size", "1920x1080", "--no-logo"]);
        assert!(!settings.fullscreen);
        assert!(!settings.show_logo);
        assert_eq!(settings.window_size, (1920, 1080));
    }

    #[test]
    fn rejects_malformed_size() {
        assert!(GameSettings::parse(args(&["--size", "banana"])).is_err());
        assert!(GameSettings::parse(args(&["--size", "100x100"])).is_err());
        assert!(GameSettings::parse(args(&["--size"])).is_err());
    }

    #[test]
    fn rejects_unknown_map_and_argument() {
        assert!(GameSettings::parse(args(&["--map", "nowhere"])).is_err());
        assert!(GameSettings::parse(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn language_list_is_split_and_ordered() {
        let settings = parsed(&["--lang", "fr, en"]);
        assert_eq!(settings.languages, vec!["fr".to_string(), "en".to_string()]);
    }
}
