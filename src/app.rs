use crate::{
    config::{self, AppConfig},
    launch::{self, ProcessSpawner, Spawner},
    library::{self, ArchiveHandle},
    log::EventLog,
    session::{PresetResolution, Session, SessionError},
};
use anyhow::Result;
use arboard::Clipboard;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Presets,
    Iwads,
    Mods,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Presets => "Presets",
            Focus::Iwads => "IWADs",
            Focus::Mods => "Mods",
        }
    }

    fn next(self) -> Self {
        match self {
            Focus::Presets => Focus::Iwads,
            Focus::Iwads => Focus::Mods,
            Focus::Mods => Focus::Presets,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Presets => Focus::Mods,
            Focus::Iwads => Focus::Presets,
            Focus::Mods => Focus::Iwads,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    SavePreset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing {
        prompt: String,
        buffer: String,
        purpose: InputPurpose,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    DeletePreset { name: String },
    OverwritePreset { name: String },
    CreateDirectories,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub yes_label: String,
    pub no_label: String,
    pub choice: DialogChoice,
    pub kind: DialogKind,
}

/// Read-only overlay closed by any key.
#[derive(Debug, Clone)]
pub struct InfoPanel {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

pub struct App {
    pub config: AppConfig,
    pub session: Session,
    pub log: EventLog,
    pub status: String,
    pub focus: Focus,
    pub preset_selected: usize,
    pub iwad_selected: usize,
    pub mod_selected: usize,
    pub input_mode: InputMode,
    pub dialog: Option<Dialog>,
    pub info: Option<InfoPanel>,
    pub toast: Option<Toast>,
    pub help_open: bool,
    pub should_quit: bool,
    pub active_preset: Option<String>,
    clipboard: Option<Clipboard>,
    spawner: Box<dyn Spawner>,
}

impl App {
    pub fn initialize() -> Result<Self> {
        let config = AppConfig::load_or_create()?;
        let log_path = config::base_data_dir()
            .ok()
            .map(|dir| dir.join("wadsmith.log"));
        Ok(Self::with_parts(config, Box::new(ProcessSpawner), log_path))
    }

    pub fn with_parts(
        config: AppConfig,
        spawner: Box<dyn Spawner>,
        log_path: Option<PathBuf>,
    ) -> Self {
        let rule = config.scan_rule();
        let index = library::LibraryIndex::scan(&rule);
        let session = Session::new(index, config.presets_path());
        let mut app = Self {
            config,
            session,
            log: EventLog::new(log_path),
            status: String::new(),
            focus: Focus::Presets,
            preset_selected: 0,
            iwad_selected: 0,
            mod_selected: 0,
            input_mode: InputMode::Normal,
            dialog: None,
            info: None,
            toast: None,
            help_open: false,
            should_quit: false,
            active_preset: None,
            clipboard: None,
            spawner,
        };
        app.announce_scan();
        if app.session.presets().is_empty() {
            app.focus = Focus::Iwads;
        }
        app
    }

    fn announce_scan(&mut self) {
        let index = self.session.index();
        let (iwads, mods, exists) = (index.iwads.len(), index.mods.len(), index.root_exists);
        let presets = self.session.presets().len();
        if !exists {
            let dir = self.config.iwad_dir();
            self.status = format!("Library folder missing: {} (press i to create)", dir.display());
            self.log.warn(format!("Library folder missing: {}", dir.display()));
            return;
        }
        self.status = format!("Found {iwads} IWAD(s), {mods} mod(s), {presets} preset(s)");
        self.log.info(self.status.clone());
        if iwads == 0 {
            self.log.warn(format!(
                "No IWAD files found. Place DOOM.WAD, DOOM2.WAD, etc. in {}",
                self.config.iwad_dir().display()
            ));
        }
    }

    pub fn set_toast(&mut self, message: &str, level: ToastLevel, duration: Duration) {
        self.toast = Some(Toast {
            message: message.to_string(),
            level,
            expires_at: Instant::now() + duration,
        });
    }

    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.focus {
            Focus::Presets => "Enter load | Del delete | l launch | Tab next | ? help",
            Focus::Iwads => "Enter pick IWAD | s save | l launch | Tab next | ? help",
            Focus::Mods => "Space toggle | s save | l launch | Tab next | ? help",
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn move_up(&mut self) {
        let selected = self.focused_selection_mut();
        *selected = selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.focused_len();
        let selected = self.focused_selection_mut();
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    pub fn move_home(&mut self) {
        *self.focused_selection_mut() = 0;
    }

    pub fn move_end(&mut self) {
        let len = self.focused_len();
        *self.focused_selection_mut() = len.saturating_sub(1);
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Presets => self.session.presets().len(),
            Focus::Iwads => self.session.index().iwads.len(),
            Focus::Mods => self.session.index().mods.len(),
        }
    }

    fn focused_selection_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Presets => &mut self.preset_selected,
            Focus::Iwads => &mut self.iwad_selected,
            Focus::Mods => &mut self.mod_selected,
        }
    }

    pub fn clamp_selection(&mut self) {
        let presets = self.session.presets().len();
        let iwads = self.session.index().iwads.len();
        let mods = self.session.index().mods.len();
        self.preset_selected = self.preset_selected.min(presets.saturating_sub(1));
        self.iwad_selected = self.iwad_selected.min(iwads.saturating_sub(1));
        self.mod_selected = self.mod_selected.min(mods.saturating_sub(1));
    }

    pub fn selected_preset_name(&self) -> Option<String> {
        self.session.presets().names().get(self.preset_selected).cloned()
    }

    fn selected_iwad(&self) -> Option<ArchiveHandle> {
        self.session.index().iwads.get(self.iwad_selected).cloned()
    }

    fn selected_mod(&self) -> Option<ArchiveHandle> {
        self.session.index().mods.get(self.mod_selected).cloned()
    }

    /// Enter on the focused pane.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Presets => self.load_selected_preset(),
            Focus::Iwads => self.pick_selected_iwad(),
            Focus::Mods => self.toggle_selected_mod(),
        }
    }

    pub fn pick_selected_iwad(&mut self) {
        let Some(handle) = self.selected_iwad() else {
            self.status = "No IWAD to select".to_string();
            return;
        };
        self.status = format!("IWAD: {}", handle.name);
        self.session.set_base(handle);
        self.focus = Focus::Mods;
    }

    pub fn toggle_selected_mod(&mut self) {
        let Some(handle) = self.selected_mod() else {
            self.status = "No mod to toggle".to_string();
            return;
        };
        let name = handle.name.clone();
        if self.session.toggle_overlay(handle) {
            self.status = format!("Added mod: {name}");
        } else {
            self.status = format!("Removed mod: {name}");
        }
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
        self.active_preset = None;
        self.status = "Selection cleared".to_string();
    }

    pub fn load_selected_preset(&mut self) {
        let Some(name) = self.selected_preset_name() else {
            self.status = "No presets saved yet. Pick an IWAD and press s to save one".to_string();
            return;
        };
        self.load_preset(&name);
    }

    pub fn load_preset(&mut self, name: &str) {
        match self.session.load_preset(name) {
            Ok(resolution) => {
                self.active_preset = Some(name.to_string());
                self.sync_cursors_to_selection();
                self.report_resolution(name, &resolution);
            }
            Err(err) => self.report_error("Load failed", &err),
        }
    }

    fn report_resolution(&mut self, name: &str, resolution: &PresetResolution) {
        if resolution.is_complete() {
            self.status = format!("Preset loaded: {name}");
            self.log.info(format!("Preset loaded: {name}"));
            return;
        }
        if let Some(iwad) = &resolution.missing_iwad {
            self.log.warn(format!("Preset {name}: IWAD not found: {iwad}"));
        }
        for missing in &resolution.missing_mods {
            self.log.warn(format!("Preset {name}: mod not found: {missing}"));
        }
        let dropped = resolution.missing_mods.len() + usize::from(resolution.missing_iwad.is_some());
        self.status = format!("Preset loaded with {dropped} missing file(s): {name}");
        self.set_toast(
            &format!("{dropped} file(s) from {name} are missing"),
            ToastLevel::Warn,
            Duration::from_secs(3),
        );
    }

    fn sync_cursors_to_selection(&mut self) {
        let selection = self.session.selection();
        if let Some(base) = &selection.base {
            if let Some(pos) = self
                .session
                .index()
                .iwads
                .iter()
                .position(|handle| handle.same_file(base))
            {
                self.iwad_selected = pos;
            }
        }
    }

    pub fn enter_save_preset(&mut self) {
        if self.session.selection().base.is_none() {
            self.status = "Select an IWAD before saving a preset".to_string();
            self.set_toast("Pick an IWAD first", ToastLevel::Warn, Duration::from_secs(3));
            return;
        }
        self.input_mode = InputMode::Editing {
            prompt: "Preset name".to_string(),
            buffer: self.active_preset.clone().unwrap_or_default(),
            purpose: InputPurpose::SavePreset,
        };
    }

    pub fn handle_submit(&mut self, purpose: InputPurpose, value: String) {
        match purpose {
            InputPurpose::SavePreset => self.request_save_preset(value),
        }
    }

    fn request_save_preset(&mut self, name: String) {
        let name = name.trim().to_string();
        if self.session.presets().contains(&name) && self.active_preset.as_deref() != Some(&name) {
            self.open_dialog(Dialog {
                title: "Overwrite Preset".to_string(),
                message: format!("A preset named \"{name}\" already exists."),
                yes_label: "Overwrite".to_string(),
                no_label: "Cancel".to_string(),
                choice: DialogChoice::No,
                kind: DialogKind::OverwritePreset { name },
            });
            return;
        }
        self.save_preset(&name);
    }

    pub fn save_preset(&mut self, name: &str) {
        match self.session.save_as_preset(name) {
            Ok(saved) => {
                self.status = format!("Preset saved: {saved}");
                self.log.info(format!("Preset saved: {saved}"));
                self.set_toast(
                    &format!("Preset saved: {saved}"),
                    ToastLevel::Info,
                    Duration::from_secs(2),
                );
                self.active_preset = Some(saved.clone());
                if let Some(pos) = self.session.presets().names().iter().position(|n| *n == saved) {
                    self.preset_selected = pos;
                }
            }
            Err(err) => self.report_error("Save failed", &err),
        }
    }

    pub fn prompt_delete_selected_preset(&mut self) {
        let Some(name) = self.selected_preset_name() else {
            return;
        };
        if !self.config.confirm_preset_delete {
            self.delete_preset(&name);
            return;
        }
        self.open_dialog(Dialog {
            title: "Delete Preset".to_string(),
            message: format!("Delete preset \"{name}\"?"),
            yes_label: "Delete".to_string(),
            no_label: "Cancel".to_string(),
            choice: DialogChoice::No,
            kind: DialogKind::DeletePreset { name },
        });
    }

    pub fn delete_preset(&mut self, name: &str) {
        match self.session.delete_preset(name) {
            Ok(()) => {
                if self.active_preset.as_deref() == Some(name) {
                    self.active_preset = None;
                }
                self.status = format!("Preset deleted: {name}");
                self.log.info(format!("Preset deleted: {name}"));
                self.set_toast(
                    &format!("Preset deleted: {name}"),
                    ToastLevel::Info,
                    Duration::from_secs(2),
                );
                self.clamp_selection();
            }
            Err(err) => self.report_error("Delete failed", &err),
        }
    }

    pub fn rescan(&mut self) {
        let had_base = self.session.selection().base.is_some();
        let had_mods = self.session.selection().overlays.len();
        self.session.rescan(&self.config.scan_rule());
        if let Some(name) = &self.active_preset {
            if !self.session.presets().contains(name) {
                self.active_preset = None;
            }
        }
        self.clamp_selection();
        self.announce_scan();
        if had_base && self.session.selection().base.is_none() {
            self.log.warn("Selected IWAD is no longer on disk".to_string());
        }
        let dropped = had_mods.saturating_sub(self.session.selection().overlays.len());
        if dropped > 0 {
            self.log.warn(format!("{dropped} selected mod(s) are no longer on disk"));
        }
    }

    pub fn prompt_create_directories(&mut self) {
        let dirs: Vec<String> = self
            .config
            .scan_rule()
            .directories()
            .iter()
            .map(|dir| dir.display().to_string())
            .collect();
        self.open_dialog(Dialog {
            title: "Create Directories".to_string(),
            message: dirs.join("\n"),
            yes_label: "Create".to_string(),
            no_label: "Cancel".to_string(),
            choice: DialogChoice::Yes,
            kind: DialogKind::CreateDirectories,
        });
    }

    pub fn create_directories(&mut self) {
        match library::ensure_directories(&self.config.scan_rule()) {
            Ok(created) if created.is_empty() => {
                self.status = "Library directories already exist".to_string();
            }
            Ok(created) => {
                for dir in &created {
                    self.log.info(format!("Created: {}", dir.display()));
                }
                self.status = format!("Created {} director(ies)", created.len());
                self.rescan();
            }
            Err(err) => {
                self.status = format!("Create failed: {err:#}");
                self.log.error(format!("Create failed: {err:#}"));
            }
        }
    }

    pub fn show_discovery(&mut self) {
        let found = library::discover(&self.config.discovery_paths());
        let mut lines = Vec::new();
        lines.push(format!("Searched {} location(s)", found.searched.len()));
        lines.push(String::new());
        lines.push(format!("IWADs ({}):", found.iwads.len()));
        for handle in &found.iwads {
            lines.push(format!("  {}", handle.path.display()));
        }
        lines.push(String::new());
        lines.push(format!("Mods ({}):", found.mods.len()));
        for handle in &found.mods {
            lines.push(format!("  {}", handle.path.display()));
        }
        lines.push(String::new());
        lines.push(format!("IWAD folder: {}", self.config.iwad_dir().display()));
        lines.push(format!("Mods folder: {}", self.config.mods_dir().display()));
        self.log.info(format!(
            "Discovery: {} IWAD(s), {} mod(s)",
            found.iwads.len(),
            found.mods.len()
        ));
        self.info = Some(InfoPanel {
            title: "Discovered Files".to_string(),
            lines,
        });
    }

    pub fn show_configuration(&mut self) {
        let engine = &self.config.engine_path;
        let engine_state = if launch::engine_available(engine) {
            "found"
        } else {
            "not found"
        };
        let index = self.session.index();
        let mut lines = vec![
            format!("Engine: {} ({engine_state})", engine.display()),
            format!("Library: {}", self.config.library_dir.display()),
            format!("Layout: {}", self.config.layout.label()),
            format!("IWAD folder: {}", self.config.iwad_dir().display()),
            format!("Mods folder: {}", self.config.mods_dir().display()),
            format!("Presets file: {}", self.session.presets_path().display()),
            format!("Config file: {}", self.config.config_path().display()),
            String::new(),
            format!("IWAD files: {}", index.iwads.len()),
            format!("Mod files: {}", index.mods.len()),
            format!("Saved presets: {}", self.session.presets().len()),
            String::new(),
            "Common engine locations:".to_string(),
        ];
        for (path, exists) in launch::engine_candidates() {
            let mark = if exists { "+" } else { "-" };
            lines.push(format!("  {mark} {path}"));
        }
        self.info = Some(InfoPanel {
            title: "Configuration".to_string(),
            lines,
        });
    }

    pub fn command_preview(&self) -> Option<String> {
        self.session
            .build_launch_arguments(&self.config.engine_path)
            .ok()
            .map(|argv| launch::format_command(&argv))
    }

    pub fn copy_command_to_clipboard(&mut self) {
        let Some(command) = self.command_preview() else {
            self.status = "Select an IWAD first".to_string();
            return;
        };
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(err) => {
                    self.status = format!("Clipboard unavailable: {err}");
                    self.log.warn(format!("Clipboard unavailable: {err}"));
                    return;
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        match clipboard.set_text(command) {
            Ok(()) => {
                self.status = "Launch command copied".to_string();
                self.set_toast("Command copied", ToastLevel::Info, Duration::from_secs(2));
            }
            Err(err) => {
                self.status = format!("Copy failed: {err}");
                self.log.warn(format!("Copy failed: {err}"));
            }
        }
    }

    pub fn launch(&mut self) {
        let engine = self.config.engine_path.clone();
        let argv = match self.session.build_launch_arguments(&engine) {
            Ok(argv) => argv,
            Err(err) => {
                self.report_error("Launch blocked", &err);
                return;
            }
        };
        self.log.info(format!("Launching: {}", launch::format_command(&argv)));
        match self.session.launch(&engine, self.spawner.as_ref()) {
            Ok(handle) => {
                self.status = format!("GZDoom launched (pid {})", handle.pid);
                self.log.info(format!("GZDoom launched (pid {})", handle.pid));
                if self.config.exit_after_launch {
                    self.should_quit = true;
                }
            }
            Err(err) => self.report_error("Launch failed", &err),
        }
    }

    fn report_error(&mut self, action: &str, err: &SessionError) {
        let level = match err {
            SessionError::Validation(_) | SessionError::NotFound(_) => ToastLevel::Warn,
            SessionError::Persistence { .. } | SessionError::Launch { .. } => ToastLevel::Error,
        };
        self.status = format!("{action}: {err}");
        match level {
            ToastLevel::Error => self.log.error(format!("{action}: {err}")),
            _ => self.log.warn(format!("{action}: {err}")),
        }
        self.set_toast(&format!("{action}: {err}"), level, Duration::from_secs(3));
    }

    fn open_dialog(&mut self, dialog: Dialog) {
        if self.dialog.is_some() {
            return;
        }
        self.dialog = Some(dialog);
    }

    pub fn dialog_set_choice(&mut self, choice: DialogChoice) {
        if let Some(dialog) = &mut self.dialog {
            dialog.choice = choice;
        }
    }

    pub fn dialog_toggle_choice(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.choice = match dialog.choice {
                DialogChoice::Yes => DialogChoice::No,
                DialogChoice::No => DialogChoice::Yes,
            };
        }
    }

    pub fn dialog_confirm(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        if dialog.choice == DialogChoice::No {
            self.status = format!("{} cancelled", dialog.title);
            return;
        }
        match dialog.kind {
            DialogKind::DeletePreset { name } => self.delete_preset(&name),
            DialogKind::OverwritePreset { name } => self.save_preset(&name),
            DialogKind::CreateDirectories => self.create_directories(),
        }
    }

    pub fn close_info(&mut self) {
        self.info = None;
    }

    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LibraryLayout, launch::ProcessHandle};
    use std::{
        ffi::OsString,
        fs, io,
        sync::{Arc, Mutex},
    };
    use tempfile::{tempdir, TempDir};

    #[derive(Clone, Default)]
    struct FakeSpawner {
        calls: Arc<Mutex<Vec<Vec<OsString>>>>,
    }

    impl Spawner for FakeSpawner {
        fn spawn(&self, argv: &[OsString]) -> io::Result<ProcessHandle> {
            self.calls.lock().unwrap().push(argv.to_vec());
            Ok(ProcessHandle { pid: 7 })
        }
    }

    fn test_app(iwads: &[&str], mods: &[&str]) -> (TempDir, App, FakeSpawner) {
        let root = tempdir().unwrap();
        let library_dir = root.path().join("GZDoom");
        fs::create_dir_all(library_dir.join("IWAD")).unwrap();
        fs::create_dir_all(library_dir.join("Mods")).unwrap();
        for name in iwads {
            fs::write(library_dir.join("IWAD").join(name), b"IWAD").unwrap();
        }
        for name in mods {
            fs::write(library_dir.join("Mods").join(name), b"PWAD").unwrap();
        }
        let config = AppConfig {
            engine_path: PathBuf::from("gzdoom"),
            library_dir,
            layout: LibraryLayout::Directory,
            presets_path: None,
            confirm_preset_delete: true,
            exit_after_launch: true,
            config_dir: root.path().join("config"),
        };
        let spawner = FakeSpawner::default();
        let app = App::with_parts(config, Box::new(spawner.clone()), None);
        (root, app, spawner)
    }

    #[test]
    fn pick_toggle_save_and_launch() {
        let (_root, mut app, spawner) = test_app(&["DOOM2.WAD"], &["brutal.pk3"]);
        assert_eq!(app.focus, Focus::Iwads);

        app.activate();
        assert_eq!(app.focus, Focus::Mods);
        app.activate();
        assert_eq!(app.session.selection().overlays.len(), 1);

        app.enter_save_preset();
        app.input_mode = InputMode::Normal;
        app.handle_submit(InputPurpose::SavePreset, "Brutal".to_string());
        assert_eq!(app.active_preset.as_deref(), Some("Brutal"));
        assert!(app.session.presets().contains("Brutal"));

        app.launch();
        assert!(app.should_quit);
        let calls = spawner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][1], "-iwad");
        assert_eq!(calls[0][3], "-file");
    }

    #[test]
    fn save_without_iwad_stays_in_normal_mode() {
        let (_root, mut app, _spawner) = test_app(&["DOOM.WAD"], &[]);
        app.enter_save_preset();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.toast.is_some());
    }

    #[test]
    fn saving_over_another_preset_asks_first() {
        let (_root, mut app, _spawner) = test_app(&["DOOM.WAD"], &[]);
        app.pick_selected_iwad();
        app.save_preset("one");
        app.active_preset = None;

        app.handle_submit(InputPurpose::SavePreset, "one".to_string());
        assert!(matches!(
            app.dialog.as_ref().map(|d| &d.kind),
            Some(DialogKind::OverwritePreset { .. })
        ));
        app.dialog_set_choice(DialogChoice::Yes);
        app.dialog_confirm();
        assert_eq!(app.active_preset.as_deref(), Some("one"));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn delete_goes_through_confirmation() {
        let (_root, mut app, _spawner) = test_app(&["DOOM.WAD"], &[]);
        app.pick_selected_iwad();
        app.save_preset("gone");
        app.focus = Focus::Presets;

        app.prompt_delete_selected_preset();
        app.dialog_confirm();
        assert!(app.session.presets().contains("gone"));

        app.prompt_delete_selected_preset();
        app.dialog_toggle_choice();
        app.dialog_confirm();
        assert!(!app.session.presets().contains("gone"));
        assert!(app.active_preset.is_none());
    }

    #[test]
    fn launch_without_iwad_does_not_spawn() {
        let (_root, mut app, spawner) = test_app(&["DOOM.WAD"], &[]);
        app.launch();
        assert!(!app.should_quit);
        assert!(spawner.calls.lock().unwrap().is_empty());
        assert!(app.status.starts_with("Launch blocked"));
    }

    #[test]
    fn rescan_drops_removed_selection() {
        let (root, mut app, _spawner) = test_app(&["DOOM.WAD"], &["a.pk3"]);
        app.pick_selected_iwad();
        app.toggle_selected_mod();
        fs::remove_file(root.path().join("GZDoom").join("Mods").join("a.pk3")).unwrap();

        app.rescan();
        assert!(app.session.selection().overlays.is_empty());
        assert!(app.session.selection().base.is_some());
        assert_eq!(app.mod_selected, 0);
    }

    #[test]
    fn rescan_keeps_preset_whose_save_failed() {
        let (root, mut app, _spawner) = test_app(&["DOOM.WAD"], &[]);
        let blocker = root.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        app.session = Session::new(
            app.session.index().clone(),
            blocker.join("launcher_presets.json"),
        );

        app.pick_selected_iwad();
        app.save_preset("keep");
        assert!(app.status.starts_with("Save failed"));
        assert!(app.session.presets().contains("keep"));

        app.rescan();
        assert!(app.session.presets().contains("keep"));
        assert!(app.session.selection().base.is_some());
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let (_root, mut app, _spawner) = test_app(&["DOOM.WAD", "DOOM2.WAD"], &[]);
        app.focus = Focus::Iwads;
        app.move_down();
        app.move_down();
        assert_eq!(app.iwad_selected, 1);
        app.move_up();
        app.move_up();
        assert_eq!(app.iwad_selected, 0);
        app.move_end();
        assert_eq!(app.iwad_selected, 1);
    }
}
