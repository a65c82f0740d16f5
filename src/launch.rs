use std::{
    ffi::OsString,
    io,
    path::Path,
    process::{Command, Stdio},
    thread,
};

pub const IWAD_FLAG: &str = "-iwad";
pub const FILE_FLAG: &str = "-file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
}

/// Starts the engine. Implementations must not wait on the child.
pub trait Spawner {
    fn spawn(&self, argv: &[OsString]) -> io::Result<ProcessHandle>;
}

/// Detached launch with all standard streams closed.
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, argv: &[OsString]) -> io::Result<ProcessHandle> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command line",
            ));
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pid = child.id();
        // Reaped off-thread so a launcher that stays open leaves no zombie.
        thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(ProcessHandle { pid })
    }
}

/// Arguments for the engine, in the order it expects them. Paths are kept as
/// raw OS strings so non-UTF-8 filenames reach the engine unchanged.
pub fn build_arguments(engine: &Path, iwad: &Path, mods: &[&Path]) -> Vec<OsString> {
    let mut argv = vec![
        engine.as_os_str().to_os_string(),
        OsString::from(IWAD_FLAG),
        iwad.as_os_str().to_os_string(),
    ];
    if !mods.is_empty() {
        argv.push(OsString::from(FILE_FLAG));
        argv.extend(mods.iter().map(|path| path.as_os_str().to_os_string()));
    }
    argv
}

/// Lossy copy of argv for logs and JSON output.
pub fn display_arguments(argv: &[OsString]) -> Vec<String> {
    argv.iter()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect()
}

/// Renders argv the way a user would paste it into a POSIX shell.
pub fn format_command(argv: &[OsString]) -> String {
    argv.iter()
        .map(|arg| shell_quote(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    let safe = arg
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || "-_./=:,+@%".contains(ch));
    if safe {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Engine executable locations worth checking, with whether each exists.
pub fn engine_candidates() -> Vec<(String, bool)> {
    let mut candidates = vec![
        "/Applications/GZDoom.app/Contents/MacOS/gzdoom".to_string(),
        "/usr/local/bin/gzdoom".to_string(),
        "/opt/homebrew/bin/gzdoom".to_string(),
        "/usr/bin/gzdoom".to_string(),
        "/usr/games/gzdoom".to_string(),
    ];
    if let Some(base) = directories::BaseDirs::new() {
        if let Some(bin) = base.executable_dir() {
            candidates.push(bin.join("gzdoom").display().to_string());
        }
    }
    candidates
        .into_iter()
        .map(|path| {
            let exists = Path::new(&path).is_file();
            (path, exists)
        })
        .collect()
}

/// Whether `engine` points at a file or resolves through `PATH`.
pub fn engine_available(engine: &Path) -> bool {
    if engine.components().count() > 1 {
        return engine.is_file();
    }
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(engine).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn omits_file_flag_without_mods() {
        let argv = build_arguments(
            Path::new("gzdoom"),
            Path::new("/games/DOOM2.WAD"),
            &[],
        );
        assert_eq!(argv, vec!["gzdoom", "-iwad", "/games/DOOM2.WAD"]);
    }

    #[test]
    fn keeps_mod_order() {
        let a = PathBuf::from("/mods/brutal.pk3");
        let b = PathBuf::from("/mods/extra.wad");
        let argv = build_arguments(
            Path::new("gzdoom"),
            Path::new("/games/DOOM2.WAD"),
            &[a.as_path(), b.as_path()],
        );
        assert_eq!(
            argv,
            vec![
                "gzdoom",
                "-iwad",
                "/games/DOOM2.WAD",
                "-file",
                "/mods/brutal.pk3",
                "/mods/extra.wad"
            ]
        );
    }

    #[test]
    fn quotes_only_when_needed() {
        let argv: Vec<OsString> = ["gzdoom", "/home/me/My Games/DOOM.WAD", "it's.pk3"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(
            format_command(&argv),
            r"gzdoom '/home/me/My Games/DOOM.WAD' 'it'\''s.pk3'"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_paths_pass_through_unchanged() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let dir = tempfile::tempdir().unwrap();
        let iwad = dir.path().join(OsStr::from_bytes(b"DOOM\xff.WAD"));
        std::fs::write(&iwad, b"IWAD").unwrap();

        let argv = build_arguments(Path::new("gzdoom"), &iwad, &[iwad.as_path()]);
        assert_eq!(argv[2], iwad.as_os_str());
        assert!(Path::new(&argv[2]).is_file());
        assert_eq!(argv[4], iwad.as_os_str());
        assert!(display_arguments(&argv)[2].contains('\u{FFFD}'));
    }

    #[cfg(unix)]
    #[test]
    fn spawn_returns_without_waiting_for_exit() {
        let argv = vec![OsString::from("sh"), OsString::from("-c"), OsString::from("sleep 2")];
        let started = std::time::Instant::now();
        let handle = ProcessSpawner.spawn(&argv).unwrap();
        assert!(handle.pid > 0);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn empty_argv_is_rejected() {
        let err = ProcessSpawner.spawn(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let argv = vec![OsString::from("/definitely/not/here/gzdoom")];
        assert!(ProcessSpawner.spawn(&argv).is_err());
    }
}
