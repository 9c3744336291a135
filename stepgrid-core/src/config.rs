use std::path::{Path, PathBuf};

use serde::Deserialize;
use stepgrid_types::{DEFAULT_BPM, MAX_BPM, MAX_PACK_INDEX, MIN_BPM};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");
const FALLBACK_BASE_URL: &str = "https://stepgrid.app/";
const FALLBACK_CYCLES: u32 = 2;
const MAX_CYCLES: u32 = 1024;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    share: ShareConfig,
    #[serde(default)]
    playback: PlaybackConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    bpm: Option<f32>,
    pack: Option<i64>,
}

#[derive(Deserialize, Default)]
struct ShareConfig {
    base_url: Option<String>,
}

#[derive(Deserialize, Default)]
struct PlaybackConfig {
    cycles: Option<u32>,
}

pub struct Config {
    defaults: DefaultsConfig,
    share: ShareConfig,
    playback: PlaybackConfig,
}

impl Config {
    /// Built-in defaults overlaid with `~/.config/stepgrid/config.toml`.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::from_file(embedded()),
        }
    }

    /// Built-in defaults overlaid with the file at `path`, if it exists.
    pub fn load_from(path: &Path) -> Self {
        let mut base = embedded();
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                    Ok(user) => merge(&mut base, user),
                    Err(e) => {
                        log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                    }
                },
                Err(e) => {
                    log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                }
            }
        }
        Self::from_file(base)
    }

    /// Built-in defaults overlaid with `contents`.
    pub fn from_toml(contents: &str) -> Self {
        let mut base = embedded();
        match toml::from_str::<ConfigFile>(contents) {
            Ok(user) => merge(&mut base, user),
            Err(e) => log::warn!(target: "config", "ignoring malformed config: {}", e),
        }
        Self::from_file(base)
    }

    fn from_file(file: ConfigFile) -> Self {
        Config {
            defaults: file.defaults,
            share: file.share,
            playback: file.playback,
        }
    }

    /// Tempo for a fresh session (clamped to 60..=300).
    pub fn default_bpm(&self) -> f32 {
        match self.defaults.bpm {
            Some(bpm) if bpm.is_finite() => bpm.clamp(MIN_BPM, MAX_BPM),
            _ => DEFAULT_BPM,
        }
    }

    pub fn default_pack(&self) -> usize {
        // clamped, so the cast cannot truncate
        self.defaults.pack.unwrap_or(0).clamp(0, MAX_PACK_INDEX) as usize
    }

    pub fn share_base_url(&self) -> &str {
        self.share
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(FALLBACK_BASE_URL)
    }

    /// Cycles the headless player runs (clamped to 1..=1024).
    pub fn playback_cycles(&self) -> u32 {
        clamp_cycles(self.playback.cycles.unwrap_or(FALLBACK_CYCLES))
    }
}

/// Bound a cycle count, from the config file or the command line, to 1..=1024.
pub fn clamp_cycles(cycles: u32) -> u32 {
    cycles.clamp(1, MAX_CYCLES)
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!(target: "config", "embedded config.toml is malformed: {}", e);
        ConfigFile::default()
    })
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stepgrid").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_defaults(&mut base.defaults, user.defaults);
    if user.share.base_url.is_some() {
        base.share.base_url = user.share.base_url;
    }
    if user.playback.cycles.is_some() {
        base.playback.cycles = user.playback.cycles;
    }
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.bpm.is_some() {
        base.bpm = user.bpm;
    }
    if user.pack.is_some() {
        base.pack = user.pack;
    }
}
