use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Canonical base-game filenames recognised by the name-list layout.
pub const IWAD_NAMES: [&str; 8] = [
    "DOOM.WAD",
    "DOOM1.WAD",
    "DOOM2.WAD",
    "PLUTONIA.WAD",
    "TNT.WAD",
    "HERETIC.WAD",
    "HEXEN.WAD",
    "STRIFE1.WAD",
];

const BASE_EXTENSIONS: [&str; 1] = ["wad"];
const OVERLAY_EXTENSIONS: [&str; 2] = ["wad", "pk3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveRole {
    Base,
    Overlay,
}

impl ArchiveRole {
    pub fn label(self) -> &'static str {
        match self {
            ArchiveRole::Base => "IWAD",
            ArchiveRole::Overlay => "Mod",
        }
    }
}

/// One discovered archive. Identity is the path; two handles may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveHandle {
    pub path: PathBuf,
    pub name: String,
    pub role: ArchiveRole,
}

impl ArchiveHandle {
    pub fn new(path: PathBuf, role: ArchiveRole) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name, role }
    }

    pub fn same_file(&self, other: &ArchiveHandle) -> bool {
        self.path == other.path
    }
}

/// How discovered files are split into base and overlay archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRule {
    /// Everything `.wad` under `iwad_dir` is a base archive, everything
    /// `.wad`/`.pk3` under `mods_dir` is an overlay.
    ByDirectory { iwad_dir: PathBuf, mods_dir: PathBuf },
    /// A `.wad` is a base archive only if its uppercase name is in
    /// [`IWAD_NAMES`]; every other `.wad`/`.pk3` is an overlay.
    ByName { dirs: Vec<PathBuf> },
}

impl ScanRule {
    pub fn directories(&self) -> Vec<&Path> {
        match self {
            ScanRule::ByDirectory { iwad_dir, mods_dir } => {
                vec![iwad_dir.as_path(), mods_dir.as_path()]
            }
            ScanRule::ByName { dirs } => dirs.iter().map(|dir| dir.as_path()).collect(),
        }
    }

    fn primary_dir(&self) -> Option<&Path> {
        match self {
            ScanRule::ByDirectory { iwad_dir, .. } => Some(iwad_dir.as_path()),
            ScanRule::ByName { dirs } => dirs.first().map(|dir| dir.as_path()),
        }
    }
}

/// Result of the most recent scan. Rebuilt wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryIndex {
    pub iwads: Vec<ArchiveHandle>,
    pub mods: Vec<ArchiveHandle>,
    pub root_exists: bool,
}

impl LibraryIndex {
    pub fn scan(rule: &ScanRule) -> Self {
        let root_exists = rule.primary_dir().map(|dir| dir.is_dir()).unwrap_or(false);
        let mut index = LibraryIndex {
            iwads: Vec::new(),
            mods: Vec::new(),
            root_exists,
        };

        match rule {
            ScanRule::ByDirectory { iwad_dir, mods_dir } => {
                for path in list_archives(iwad_dir, &BASE_EXTENSIONS) {
                    index.iwads.push(ArchiveHandle::new(path, ArchiveRole::Base));
                }
                for path in list_archives(mods_dir, &OVERLAY_EXTENSIONS) {
                    index.mods.push(ArchiveHandle::new(path, ArchiveRole::Overlay));
                }
            }
            ScanRule::ByName { dirs } => {
                for dir in dirs {
                    for path in list_archives(dir, &OVERLAY_EXTENSIONS) {
                        let role = classify_by_name(&path);
                        let handle = ArchiveHandle::new(path, role);
                        match role {
                            ArchiveRole::Base => index.iwads.push(handle),
                            ArchiveRole::Overlay => index.mods.push(handle),
                        }
                    }
                }
            }
        }

        index
    }

    pub fn is_empty(&self) -> bool {
        self.iwads.is_empty() && self.mods.is_empty()
    }

    pub fn find_iwad(&self, name: &str) -> Option<&ArchiveHandle> {
        self.iwads.iter().find(|handle| handle.name == name)
    }

    pub fn find_mod(&self, name: &str) -> Option<&ArchiveHandle> {
        self.mods.iter().find(|handle| handle.name == name)
    }
}

pub fn is_iwad_name(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    IWAD_NAMES.iter().any(|known| *known == upper)
}

fn classify_by_name(path: &Path) -> ArchiveRole {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    if has_extension(path, &BASE_EXTENSIONS) && is_iwad_name(&name) {
        ArchiveRole::Base
    } else {
        ArchiveRole::Overlay
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .map(|ext| extensions.iter().any(|wanted| *wanted == ext))
        .unwrap_or(false)
}

fn list_archives(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }
    WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect()
}

pub fn ensure_directories(rule: &ScanRule) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in rule.directories() {
        if dir.is_dir() {
            continue;
        }
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        created.push(dir.to_path_buf());
    }
    Ok(created)
}

/// Archives found outside the library, reported for the user to copy in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    pub iwads: Vec<ArchiveHandle>,
    pub mods: Vec<ArchiveHandle>,
    pub searched: Vec<PathBuf>,
}

pub fn discover(search_paths: &[PathBuf]) -> Discovery {
    let mut discovery = Discovery::default();
    for dir in search_paths {
        if !dir.is_dir() {
            continue;
        }
        discovery.searched.push(dir.clone());
        for path in list_archives(dir, &OVERLAY_EXTENSIONS) {
            let role = classify_by_name(&path);
            let handle = ArchiveHandle::new(path, role);
            match role {
                ArchiveRole::Base => discovery.iwads.push(handle),
                ArchiveRole::Overlay => discovery.mods.push(handle),
            }
        }
    }
    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"PWAD").unwrap();
        path
    }

    fn names(handles: &[ArchiveHandle]) -> Vec<String> {
        let mut out: Vec<String> = handles.iter().map(|h| h.name.clone()).collect();
        out.sort();
        out
    }

    #[test]
    fn directory_layout_matches_extensions_case_insensitively() {
        let root = tempdir().unwrap();
        let iwad_dir = root.path().join("IWAD");
        let mods_dir = root.path().join("Mods");
        fs::create_dir_all(&iwad_dir).unwrap();
        fs::create_dir_all(&mods_dir).unwrap();
        touch(&iwad_dir, "DOOM2.WAD");
        touch(&iwad_dir, "freedoom1.wad");
        touch(&iwad_dir, "readme.txt");
        touch(&iwad_dir, "extra.pk3");
        touch(&mods_dir, "brutal.PK3");
        touch(&mods_dir, "maps.Wad");
        touch(&mods_dir, "notes.md");

        let index = LibraryIndex::scan(&ScanRule::ByDirectory {
            iwad_dir: iwad_dir.clone(),
            mods_dir: mods_dir.clone(),
        });

        assert!(index.root_exists);
        assert_eq!(names(&index.iwads), vec!["DOOM2.WAD", "freedoom1.wad"]);
        assert_eq!(names(&index.mods), vec!["brutal.PK3", "maps.Wad"]);
        assert!(index.iwads.iter().all(|h| h.role == ArchiveRole::Base));
        assert!(index.mods.iter().all(|h| h.role == ArchiveRole::Overlay));
    }

    #[test]
    fn name_list_layout_only_admits_known_iwads() {
        let root = tempdir().unwrap();
        touch(root.path(), "doom2.wad");
        touch(root.path(), "HERETIC.WAD");
        touch(root.path(), "freedoom1.wad");
        touch(root.path(), "brutal.pk3");
        touch(root.path(), "doom2.pk3");

        let index = LibraryIndex::scan(&ScanRule::ByName {
            dirs: vec![root.path().to_path_buf()],
        });

        assert_eq!(names(&index.iwads), vec!["HERETIC.WAD", "doom2.wad"]);
        assert_eq!(
            names(&index.mods),
            vec!["brutal.pk3", "doom2.pk3", "freedoom1.wad"]
        );
    }

    #[test]
    fn missing_directories_are_skipped() {
        let root = tempdir().unwrap();
        let rule = ScanRule::ByDirectory {
            iwad_dir: root.path().join("nope"),
            mods_dir: root.path().join("also-nope"),
        };
        let index = LibraryIndex::scan(&rule);
        assert!(!index.root_exists);
        assert!(index.is_empty());
        assert!(!root.path().join("nope").exists());
    }

    #[test]
    fn subdirectories_are_not_scanned() {
        let root = tempdir().unwrap();
        let nested = root.path().join("nested.wad");
        fs::create_dir_all(&nested).unwrap();
        touch(&nested, "DOOM.WAD");
        let index = LibraryIndex::scan(&ScanRule::ByName {
            dirs: vec![root.path().to_path_buf()],
        });
        assert!(index.is_empty());
    }

    #[test]
    fn duplicate_names_across_directories_stay_distinct() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let a = touch(first.path(), "DOOM.WAD");
        let b = touch(second.path(), "DOOM.WAD");
        let index = LibraryIndex::scan(&ScanRule::ByName {
            dirs: vec![first.path().to_path_buf(), second.path().to_path_buf()],
        });
        assert_eq!(index.iwads.len(), 2);
        assert_eq!(index.find_iwad("DOOM.WAD").map(|h| h.path.clone()), Some(a));
        assert!(index.iwads.iter().any(|h| h.path == b));
    }

    #[test]
    fn ensure_directories_creates_only_missing() {
        let root = tempdir().unwrap();
        let iwad_dir = root.path().join("IWAD");
        fs::create_dir_all(&iwad_dir).unwrap();
        let rule = ScanRule::ByDirectory {
            iwad_dir: iwad_dir.clone(),
            mods_dir: root.path().join("Mods"),
        };
        let created = ensure_directories(&rule).unwrap();
        assert_eq!(created, vec![root.path().join("Mods")]);
        assert!(root.path().join("Mods").is_dir());
    }

    #[test]
    fn discover_reports_searched_paths() {
        let root = tempdir().unwrap();
        touch(root.path(), "TNT.WAD");
        touch(root.path(), "eviternity.wad");
        let missing = root.path().join("missing");
        let found = discover(&[root.path().to_path_buf(), missing]);
        assert_eq!(found.searched, vec![root.path().to_path_buf()]);
        assert_eq!(names(&found.iwads), vec!["TNT.WAD"]);
        assert_eq!(names(&found.mods), vec!["eviternity.wad"]);
    }
}
