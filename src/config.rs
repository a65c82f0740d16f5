use crate::library::ScanRule;
use anyhow::{Context, Result};
use directories::{BaseDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const APP_DIR_NAME: &str = "wadsmith";
const CONFIG_FILE: &str = "config.json";
const PRESETS_FILE: &str = "launcher_presets.json";

/// How the library directory is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryLayout {
    /// `IWAD/` and `Mods/` subdirectories; the folder decides the role.
    #[default]
    Directory,
    /// One flat folder; the canonical IWAD filename list decides the role.
    NameList,
}

impl LibraryLayout {
    pub fn label(self) -> &'static str {
        match self {
            LibraryLayout::Directory => "IWAD/ + Mods/ folders",
            LibraryLayout::NameList => "single folder, known IWAD names",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_engine_path")]
    pub engine_path: PathBuf,
    #[serde(default = "default_library_dir")]
    pub library_dir: PathBuf,
    #[serde(default)]
    pub layout: LibraryLayout,
    #[serde(default)]
    pub presets_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub confirm_preset_delete: bool,
    #[serde(default = "default_true")]
    pub exit_after_launch: bool,
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl AppConfig {
    pub fn load_or_create() -> Result<Self> {
        let config_dir = base_config_dir()?;
        Self::load_or_create_in(&config_dir)
    }

    pub fn load_or_create_in(config_dir: &Path) -> Result<Self> {
        fs::create_dir_all(config_dir).context("create config dir")?;
        let path = config_dir.join(CONFIG_FILE);
        if path.exists() {
            let raw = fs::read_to_string(&path).context("read config.json")?;
            let mut config: AppConfig = serde_json::from_str(&raw)
                .with_context(|| format!("parse {}", path.display()))?;
            config.config_dir = config_dir.to_path_buf();
            config.engine_path = expand_tilde(&config.engine_path);
            config.library_dir = expand_tilde(&config.library_dir);
            config.presets_path = config.presets_path.as_deref().map(expand_tilde);
            return Ok(config);
        }

        let config = AppConfig {
            engine_path: default_engine_path(),
            library_dir: default_library_dir(),
            layout: LibraryLayout::default(),
            presets_path: None,
            confirm_preset_delete: true,
            exit_after_launch: true,
            config_dir: config_dir.to_path_buf(),
        };
        config.save()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).context("create config dir")?;
        let path = self.config_dir.join(CONFIG_FILE);
        let raw = serde_json::to_string_pretty(self).context("serialize config.json")?;
        fs::write(path, raw).context("write config.json")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn presets_path(&self) -> PathBuf {
        self.presets_path
            .clone()
            .unwrap_or_else(|| self.config_dir.join(PRESETS_FILE))
    }

    pub fn iwad_dir(&self) -> PathBuf {
        match self.layout {
            LibraryLayout::Directory => self.library_dir.join("IWAD"),
            LibraryLayout::NameList => self.library_dir.clone(),
        }
    }

    pub fn mods_dir(&self) -> PathBuf {
        match self.layout {
            LibraryLayout::Directory => self.library_dir.join("Mods"),
            LibraryLayout::NameList => self.library_dir.clone(),
        }
    }

    pub fn scan_rule(&self) -> ScanRule {
        match self.layout {
            LibraryLayout::Directory => ScanRule::ByDirectory {
                iwad_dir: self.iwad_dir(),
                mods_dir: self.mods_dir(),
            },
            LibraryLayout::NameList => ScanRule::ByName {
                dirs: vec![self.library_dir.clone()],
            },
        }
    }

    /// Places outside the library where WADs tend to end up.
    pub fn discovery_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.library_dir.clone()];
        if let Some(base) = BaseDirs::new() {
            let home = base.home_dir();
            paths.push(home.join("Documents").join("GZDoom"));
            paths.push(home.join("Games"));
            paths.push(home.join("Downloads"));
        }
        if let Some(user) = UserDirs::new() {
            if let Some(downloads) = user.download_dir() {
                paths.push(downloads.to_path_buf());
            }
        }
        paths.push(PathBuf::from("/Applications/GZDoom.app/Contents/MacOS"));
        paths.push(PathBuf::from("/usr/share/games/doom"));
        paths.push(PathBuf::from("/opt/games/doom"));
        for dir in self.scan_rule().directories() {
            paths.push(dir.to_path_buf());
        }

        let mut unique: Vec<PathBuf> = Vec::new();
        for path in paths {
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        unique
    }
}

pub fn base_config_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("resolve home dir")?;
    Ok(base.config_dir().join(APP_DIR_NAME))
}

pub fn base_data_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("resolve home dir")?;
    Ok(base.data_local_dir().join(APP_DIR_NAME))
}

pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(base) => base.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

fn default_engine_path() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/GZDoom.app/Contents/MacOS/gzdoom")
    } else {
        PathBuf::from("gzdoom")
    }
}

fn default_library_dir() -> PathBuf {
    if let Some(user) = UserDirs::new() {
        if let Some(documents) = user.document_dir() {
            return documents.join("GZDoom");
        }
    }
    BaseDirs::new()
        .map(|base| base.home_dir().join("Documents").join("GZDoom"))
        .unwrap_or_else(|| PathBuf::from("GZDoom"))
}

fn default_true() -> bool {
    true
}
