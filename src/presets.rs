use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Filenames a preset points at. Plain strings so presets outlive any scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(alias = "base")]
    pub iwad: String,
    #[serde(default, alias = "overlays")]
    pub mods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedPreset {
    pub name: String,
    #[serde(flatten)]
    pub preset: Preset,
}

/// Insertion-ordered preset table keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetTable {
    entries: Vec<NamedPreset>,
}

impl PresetTable {
    /// Reads the table from `path`. A missing or unreadable file, or one that
    /// is not a JSON object, yields an empty table. Entries that do not parse
    /// are dropped one by one.
    pub fn load(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };
        let mut table = Self::default();
        for (name, value) in map {
            if name.trim().is_empty() {
                continue;
            }
            if let Ok(preset) = serde_json::from_value::<Preset>(value) {
                table.insert(name, preset);
            }
        }
        table
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut map = Map::new();
        for entry in &self.entries {
            map.insert(entry.name.clone(), serde_json::to_value(&entry.preset)?);
        }
        serde_json::to_string_pretty(&Value::Object(map))
    }

    /// Writes the whole table through a temp file so a failed write never
    /// truncates the previous copy.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = self.to_json().map_err(io::Error::other)?;
        let temp = temp_path(path);
        fs::write(&temp, raw)?;
        if let Err(err) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.preset)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overwrites in place when the name exists, otherwise appends.
    pub fn insert(&mut self, name: String, preset: Preset) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == name) {
            entry.preset = preset;
        } else {
            self.entries.push(NamedPreset { name, preset });
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        let pos = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(pos).preset)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedPreset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn preset(iwad: &str, mods: &[&str]) -> Preset {
        Preset {
            iwad: iwad.to_string(),
            mods: mods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let table = PresetTable::load(&dir.path().join("launcher_presets.json"));
        assert!(table.is_empty());
    }

    #[test]
    fn invalid_json_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("launcher_presets.json");
        fs::write(&path, "{ this is not json").unwrap();
        assert!(PresetTable::load(&path).is_empty());

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(PresetTable::load(&path).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_individually() {
        let raw = r#"{
            "Brutal": { "iwad": "DOOM2.WAD", "mods": ["brutal.pk3"] },
            "Broken": { "mods": ["x.pk3"] },
            "Wrong": "DOOM.WAD",
            "Vanilla": { "iwad": "DOOM.WAD" }
        }"#;
        let table = PresetTable::parse(raw);
        assert_eq!(table.names(), vec!["Brutal", "Vanilla"]);
        assert_eq!(table.get("Vanilla"), Some(&preset("DOOM.WAD", &[])));
    }

    #[test]
    fn accepts_base_and_overlay_aliases() {
        let raw = r#"{ "Alt": { "base": "TNT.WAD", "overlays": ["a.wad", "b.pk3"] } }"#;
        let table = PresetTable::parse(raw);
        assert_eq!(table.get("Alt"), Some(&preset("TNT.WAD", &["a.wad", "b.pk3"])));
    }

    #[test]
    fn insert_overwrites_without_reordering() {
        let mut table = PresetTable::default();
        table.insert("one".to_string(), preset("DOOM.WAD", &[]));
        table.insert("two".to_string(), preset("DOOM2.WAD", &[]));
        table.insert("one".to_string(), preset("TNT.WAD", &["x.pk3"]));
        assert_eq!(table.names(), vec!["one", "two"]);
        assert_eq!(table.get("one"), Some(&preset("TNT.WAD", &["x.pk3"])));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn save_preserves_insertion_order_and_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("launcher_presets.json");
        let mut table = PresetTable::default();
        table.insert("zeta".to_string(), preset("DOOM2.WAD", &["brutal.pk3"]));
        table.insert("alpha".to_string(), preset("DOOM.WAD", &[]));
        table.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.find("zeta").unwrap() < raw.find("alpha").unwrap());
        assert!(raw.contains("\"iwad\""));
        assert!(raw.contains("\"mods\""));
        assert!(!path.with_file_name("launcher_presets.json.tmp").exists());

        let loaded = PresetTable::load(&path);
        assert_eq!(loaded, table);
    }

    #[test]
    fn remove_reports_missing() {
        let mut table = PresetTable::default();
        table.insert("one".to_string(), preset("DOOM.WAD", &[]));
        assert!(table.remove("two").is_none());
        assert!(table.remove("one").is_some());
        assert!(table.is_empty());
    }
}
