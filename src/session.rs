use crate::{
    launch::{self, ProcessHandle, Spawner},
    library::{ArchiveHandle, LibraryIndex, ScanRule},
    presets::{Preset, PresetTable},
};
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),

    #[error("preset not found: {0}")]
    NotFound(String),

    #[error("could not write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not start {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Base archive plus ordered, duplicate-free overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub base: Option<ArchiveHandle>,
    pub overlays: Vec<ArchiveHandle>,
}

impl Selection {
    pub fn contains_overlay(&self, handle: &ArchiveHandle) -> bool {
        self.overlays.iter().any(|selected| selected.same_file(handle))
    }

    pub fn is_base(&self, handle: &ArchiveHandle) -> bool {
        self.base
            .as_ref()
            .map(|base| base.same_file(handle))
            .unwrap_or(false)
    }
}

/// What a preset load could not find in the current index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetResolution {
    pub missing_iwad: Option<String>,
    pub missing_mods: Vec<String>,
}

impl PresetResolution {
    pub fn is_complete(&self) -> bool {
        self.missing_iwad.is_none() && self.missing_mods.is_empty()
    }
}

/// Selection and preset state over the latest library snapshot.
#[derive(Debug)]
pub struct Session {
    index: LibraryIndex,
    selection: Selection,
    presets: PresetTable,
    presets_path: PathBuf,
}

impl Session {
    pub fn new(index: LibraryIndex, presets_path: PathBuf) -> Self {
        let presets = PresetTable::load(&presets_path);
        Self {
            index,
            selection: Selection::default(),
            presets,
            presets_path,
        }
    }

    pub fn index(&self) -> &LibraryIndex {
        &self.index
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn presets_path(&self) -> &Path {
        &self.presets_path
    }

    pub fn set_base(&mut self, handle: ArchiveHandle) {
        self.selection.base = Some(handle);
    }

    /// Returns true when the overlay ended up selected.
    pub fn toggle_overlay(&mut self, handle: ArchiveHandle) -> bool {
        if let Some(pos) = self
            .selection
            .overlays
            .iter()
            .position(|selected| selected.same_file(&handle))
        {
            self.selection.overlays.remove(pos);
            false
        } else {
            self.selection.overlays.push(handle);
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Stores the current selection under `name`. The in-memory table keeps
    /// the entry even when writing the file fails.
    pub fn save_as_preset(&mut self, name: &str) -> SessionResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::Validation(
                "Preset name is required".to_string(),
            ));
        }
        let Some(base) = &self.selection.base else {
            return Err(SessionError::Validation(
                "Select an IWAD before saving a preset".to_string(),
            ));
        };

        let preset = Preset {
            iwad: base.name.clone(),
            mods: self
                .selection
                .overlays
                .iter()
                .map(|handle| handle.name.clone())
                .collect(),
        };
        self.presets.insert(name.to_string(), preset);
        self.persist()?;
        Ok(name.to_string())
    }

    /// Resolves a preset against the current index. An absent IWAD clears the
    /// base; absent mods are skipped.
    pub fn load_preset(&mut self, name: &str) -> SessionResult<PresetResolution> {
        let preset = self
            .presets
            .get(name)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(name.to_string()))?;

        let mut resolution = PresetResolution::default();
        self.selection.base = self.index.find_iwad(&preset.iwad).cloned();
        if self.selection.base.is_none() {
            resolution.missing_iwad = Some(preset.iwad.clone());
        }

        let mut overlays: Vec<ArchiveHandle> = Vec::new();
        for mod_name in &preset.mods {
            match self.index.find_mod(mod_name) {
                Some(handle) => {
                    if !overlays.iter().any(|selected| selected.same_file(handle)) {
                        overlays.push(handle.clone());
                    }
                }
                None => resolution.missing_mods.push(mod_name.clone()),
            }
        }
        self.selection.overlays = overlays;

        Ok(resolution)
    }

    /// Dry-run of [`Session::load_preset`] that leaves the selection alone.
    pub fn preview_preset(&self, name: &str) -> SessionResult<PresetResolution> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| SessionError::NotFound(name.to_string()))?;
        Ok(PresetResolution {
            missing_iwad: self
                .index
                .find_iwad(&preset.iwad)
                .is_none()
                .then(|| preset.iwad.clone()),
            missing_mods: preset
                .mods
                .iter()
                .filter(|mod_name| self.index.find_mod(mod_name).is_none())
                .cloned()
                .collect(),
        })
    }

    pub fn delete_preset(&mut self, name: &str) -> SessionResult<()> {
        if self.presets.remove(name).is_none() {
            return Err(SessionError::NotFound(name.to_string()));
        }
        self.persist()
    }

    pub fn persist(&self) -> SessionResult<()> {
        self.presets
            .save(&self.presets_path)
            .map_err(|source| SessionError::Persistence {
                path: self.presets_path.clone(),
                source,
            })
    }

    /// Scans again and swaps in the new index. The selection is carried over
    /// by filename; anything no longer on disk is dropped.
    pub fn rescan(&mut self, rule: &ScanRule) {
        let index = LibraryIndex::scan(rule);
        self.replace_index(index);
    }

    pub fn replace_index(&mut self, index: LibraryIndex) {
        let base = self
            .selection
            .base
            .as_ref()
            .and_then(|base| index.find_iwad(&base.name).cloned());
        let mut overlays: Vec<ArchiveHandle> = Vec::new();
        for selected in &self.selection.overlays {
            if let Some(handle) = index.find_mod(&selected.name) {
                if !overlays.iter().any(|kept| kept.same_file(handle)) {
                    overlays.push(handle.clone());
                }
            }
        }
        self.index = index;
        self.selection = Selection { base, overlays };
    }

    pub fn build_launch_arguments(&self, engine: &Path) -> SessionResult<Vec<OsString>> {
        let Some(base) = &self.selection.base else {
            return Err(SessionError::Validation(
                "Select an IWAD before launching".to_string(),
            ));
        };
        let mods: Vec<&Path> = self
            .selection
            .overlays
            .iter()
            .map(|handle| handle.path.as_path())
            .collect();
        Ok(launch::build_arguments(engine, &base.path, &mods))
    }

    pub fn launch(&self, engine: &Path, spawner: &dyn Spawner) -> SessionResult<ProcessHandle> {
        let argv = self.build_launch_arguments(engine)?;
        spawner.spawn(&argv).map_err(|source| SessionError::Launch {
            program: engine.display().to_string(),
            source,
        })
    }
}
