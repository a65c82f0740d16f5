use crate::{
    app::App,
    config::{self, AppConfig},
    launch::{self, ProcessSpawner},
    library::{self, ArchiveHandle, LibraryIndex},
    log::EventLog,
    presets::NamedPreset,
    session::Session,
    ui,
};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;

const LOG_FILE: &str = "wadsmith.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(OutputFormat::Json),
            "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

struct GlobalOptions {
    format: OutputFormat,
    dry_run: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum CliAction {
    Ui,
    Command {
        command: CliCommand,
        format: OutputFormat,
        dry_run: bool,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum CliCommand {
    Files,
    PresetsList,
    PresetsShow(String),
    PresetsSave {
        name: String,
        iwad: String,
        mods: Vec<String>,
    },
    PresetsDelete(String),
    Launch(LaunchTarget),
    Discover,
    Paths,
    Init,
    Help,
    Version,
}

#[derive(Debug, PartialEq, Eq)]
enum LaunchTarget {
    Preset(String),
    Files { iwad: String, mods: Vec<String> },
}

/// Flag values gathered from `--iwad` / `--file` style arguments.
#[derive(Debug, Default)]
struct FileArgs {
    positionals: Vec<String>,
    iwad: Option<String>,
    mods: Vec<String>,
    dry_run: bool,
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = parse_args(&args)?;
    match action {
        CliAction::Ui => {
            let mut app = App::initialize()?;
            ui::run(&mut app)
        }
        CliAction::Command {
            command,
            format,
            dry_run,
        } => match command {
            CliCommand::Help => {
                print_help();
                Ok(())
            }
            CliCommand::Version => {
                println!("wadsmith v{}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            _ => {
                let mut context = CliContext::initialize()?;
                run_command(&mut context, command, format, dry_run)
            }
        },
    }
}

fn parse_args(args: &[String]) -> Result<CliAction> {
    if args.is_empty() {
        return Ok(CliAction::Ui);
    }

    if matches!(args.first().map(|s| s.as_str()), Some("--help" | "-h" | "help")) {
        return Ok(text_command(CliCommand::Help));
    }
    if matches!(args.first().map(|s| s.as_str()), Some("--version" | "-V" | "version")) {
        return Ok(text_command(CliCommand::Version));
    }

    let (global, tokens) = parse_global_options(args)?;
    let Some(head) = tokens.first() else {
        return Ok(CliAction::Ui);
    };
    let rest = tokens.get(1..).unwrap_or(&[]);
    let mut dry_run = global.dry_run;
    let command = match head.as_str() {
        "files" => CliCommand::Files,
        "presets" => parse_presets(rest)?,
        "launch" => {
            let (target, launch_dry_run) = parse_launch(rest)?;
            dry_run |= launch_dry_run;
            CliCommand::Launch(target)
        }
        "discover" => CliCommand::Discover,
        "paths" => CliCommand::Paths,
        "init" => CliCommand::Init,
        "-h" | "--help" | "help" => CliCommand::Help,
        other => bail!("Unknown command: {other} (see wadsmith --help)"),
    };

    Ok(CliAction::Command {
        command,
        format: global.format,
        dry_run,
    })
}

fn text_command(command: CliCommand) -> CliAction {
    CliAction::Command {
        command,
        format: OutputFormat::Text,
        dry_run: false,
    }
}

/// Global flags are read up to the subcommand. After it only `--format` is
/// global, so preset names such as `-n` reach the subcommand intact.
fn parse_global_options(args: &[String]) -> Result<(GlobalOptions, Vec<String>)> {
    let mut format = OutputFormat::Text;
    let mut dry_run = false;
    let mut tokens: Vec<String> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--format=") {
            format = OutputFormat::parse(value)
                .with_context(|| format!("Unknown format: {value}"))?;
            continue;
        }
        if arg == "--format" {
            let Some(value) = iter.next() else {
                bail!("--format requires text or json");
            };
            format = OutputFormat::parse(value)
                .with_context(|| format!("Unknown format: {value}"))?;
            continue;
        }
        if tokens.is_empty() && (arg == "--dry-run" || arg == "-n") {
            dry_run = true;
            continue;
        }
        tokens.push(arg.to_string());
    }

    Ok((GlobalOptions { format, dry_run }, tokens))
}

fn parse_presets(args: &[String]) -> Result<CliCommand> {
    let sub = args.first().map(|value| value.as_str()).unwrap_or("list");
    let rest = args.get(1..).unwrap_or(&[]);
    match sub {
        "list" | "ls" => Ok(CliCommand::PresetsList),
        "show" => Ok(CliCommand::PresetsShow(required_name(rest, "presets show")?)),
        "delete" | "rm" => Ok(CliCommand::PresetsDelete(required_name(
            rest,
            "presets delete",
        )?)),
        "save" => {
            let parsed = parse_file_args(rest)?;
            if parsed.dry_run {
                bail!("--dry-run only applies to launch");
            }
            let name = required_name(&parsed.positionals, "presets save")?;
            let Some(iwad) = parsed.iwad else {
                bail!("presets save requires --iwad <file>");
            };
            Ok(CliCommand::PresetsSave {
                name,
                iwad,
                mods: parsed.mods,
            })
        }
        other => bail!("Unknown presets command: {other}"),
    }
}

fn parse_launch(args: &[String]) -> Result<(LaunchTarget, bool)> {
    let parsed = parse_file_args(args)?;
    let target = match (parsed.positionals.as_slice(), parsed.iwad) {
        ([], Some(iwad)) => LaunchTarget::Files {
            iwad,
            mods: parsed.mods,
        },
        ([], None) => bail!("launch requires a preset name or --iwad <file>"),
        (names, None) if parsed.mods.is_empty() => {
            LaunchTarget::Preset(required_name(names, "launch")?)
        }
        _ => bail!("launch takes either a preset name or --iwad/--file, not both"),
    };
    Ok((target, parsed.dry_run))
}

/// Preset names are trimmed the same way saving trims them.
fn required_name(args: &[String], command: &str) -> Result<String> {
    match args {
        [name] if !name.trim().is_empty() => Ok(name.trim().to_string()),
        [_] | [] => bail!("{command} requires a preset name"),
        _ => bail!("{command} takes one name; quote names that contain spaces"),
    }
}

/// `--file` takes every following value up to the next flag, so both
/// `--file a.pk3 b.pk3` and `--file a.pk3 --file b.pk3` work.
fn parse_file_args(args: &[String]) -> Result<FileArgs> {
    let mut out = FileArgs::default();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--iwad=") {
            out.iwad = Some(value.to_string());
            continue;
        }
        if let Some(value) = arg.strip_prefix("--file=") {
            out.mods.push(value.to_string());
            continue;
        }
        match arg.as_str() {
            "--iwad" => {
                let Some(value) = iter.next() else {
                    bail!("--iwad requires a file name");
                };
                out.iwad = Some(value.to_string());
            }
            "--dry-run" => out.dry_run = true,
            "--file" => {
                let before = out.mods.len();
                while let Some(value) = iter.peek() {
                    if value.starts_with("--") {
                        break;
                    }
                    out.mods.push(value.to_string());
                    iter.next();
                }
                if out.mods.len() == before {
                    bail!("--file requires at least one file name");
                }
            }
            flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
            _ => out.positionals.push(arg.to_string()),
        }
    }
    Ok(out)
}

/// Non-interactive counterpart of the TUI `App`: same config, session and log.
struct CliContext {
    config: AppConfig,
    session: Session,
    log: EventLog,
}

impl CliContext {
    fn initialize() -> Result<Self> {
        let config = AppConfig::load_or_create()?;
        let log_path = config::base_data_dir().ok().map(|dir| dir.join(LOG_FILE));
        let index = LibraryIndex::scan(&config.scan_rule());
        let session = Session::new(index, config.presets_path());
        Ok(Self {
            config,
            session,
            log: EventLog::new(log_path),
        })
    }
}

fn run_command(
    context: &mut CliContext,
    command: CliCommand,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    match command {
        CliCommand::Files => list_files(context, format),
        CliCommand::PresetsList => list_presets(context, format),
        CliCommand::PresetsShow(name) => show_preset(context, &name, format),
        CliCommand::PresetsSave { name, iwad, mods } => {
            save_preset(context, &name, &iwad, &mods)
        }
        CliCommand::PresetsDelete(name) => {
            context.session.delete_preset(&name)?;
            context.log.info(format!("Preset deleted: {name}"));
            println!("Deleted preset: {name}");
            Ok(())
        }
        CliCommand::Launch(target) => launch_target(context, target, format, dry_run),
        CliCommand::Discover => discover_files(context, format),
        CliCommand::Paths => list_paths(context, format),
        CliCommand::Init => init_directories(context),
        CliCommand::Help | CliCommand::Version => Ok(()),
    }
}

#[derive(Serialize)]
struct FilesOutput<'a> {
    library_exists: bool,
    iwad_dir: String,
    mods_dir: String,
    iwads: &'a [ArchiveHandle],
    mods: &'a [ArchiveHandle],
}

fn list_files(context: &CliContext, format: OutputFormat) -> Result<()> {
    let index = context.session.index();
    let output = FilesOutput {
        library_exists: index.root_exists,
        iwad_dir: context.config.iwad_dir().display().to_string(),
        mods_dir: context.config.mods_dir().display().to_string(),
        iwads: &index.iwads,
        mods: &index.mods,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if !output.library_exists {
                println!("Library folder missing: {} (run wadsmith init)", output.iwad_dir);
            } else if index.is_empty() {
                println!("No WAD or PK3 files found (try wadsmith discover)");
            }
            println!("IWADs ({}) in {}", output.iwads.len(), output.iwad_dir);
            for handle in output.iwads {
                println!("  {}", handle.name);
            }
            println!("Mods ({}) in {}", output.mods.len(), output.mods_dir);
            for handle in output.mods {
                println!("  {}", handle.name);
            }
        }
    }

    Ok(())
}

fn list_presets(context: &CliContext, format: OutputFormat) -> Result<()> {
    let items: Vec<&NamedPreset> = context.session.presets().iter().collect();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No presets saved.");
            }
            for item in items {
                println!(
                    "{}  {} + {} mod(s)",
                    item.name,
                    item.preset.iwad,
                    item.preset.mods.len()
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PresetShowOutput {
    name: String,
    iwad: String,
    mods: Vec<String>,
    missing_iwad: Option<String>,
    missing_mods: Vec<String>,
}

fn show_preset(context: &CliContext, name: &str, format: OutputFormat) -> Result<()> {
    let Some(preset) = context.session.presets().get(name) else {
        bail!("Preset not found: {name}");
    };
    let resolution = context.session.preview_preset(name)?;
    let output = PresetShowOutput {
        name: name.to_string(),
        iwad: preset.iwad.clone(),
        mods: preset.mods.clone(),
        missing_iwad: resolution.missing_iwad,
        missing_mods: resolution.missing_mods,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let iwad_state = if output.missing_iwad.is_some() {
                " (missing)"
            } else {
                ""
            };
            println!("Preset: {}", output.name);
            println!("IWAD: {}{iwad_state}", output.iwad);
            if output.mods.is_empty() {
                println!("Mods: none");
            } else {
                println!("Mods:");
                for (index, mod_name) in output.mods.iter().enumerate() {
                    let state = if output.missing_mods.contains(mod_name) {
                        " (missing)"
                    } else {
                        ""
                    };
                    println!("  {}. {mod_name}{state}", index + 1);
                }
            }
        }
    }
    Ok(())
}

fn select_files(context: &mut CliContext, iwad: &str, mods: &[String]) -> Result<()> {
    let index = context.session.index();
    let Some(base) = index.find_iwad(iwad).cloned() else {
        bail!(
            "IWAD not found: {iwad} (looked in {})",
            context.config.iwad_dir().display()
        );
    };
    let mut overlays = Vec::new();
    for mod_name in mods {
        let Some(handle) = index.find_mod(mod_name).cloned() else {
            bail!(
                "Mod not found: {mod_name} (looked in {})",
                context.config.mods_dir().display()
            );
        };
        overlays.push(handle);
    }

    context.session.clear_selection();
    context.session.set_base(base);
    for handle in overlays {
        if !context.session.selection().contains_overlay(&handle) {
            context.session.toggle_overlay(handle);
        }
    }
    Ok(())
}

fn save_preset(context: &mut CliContext, name: &str, iwad: &str, mods: &[String]) -> Result<()> {
    select_files(context, iwad, mods)?;
    let saved = context.session.save_as_preset(name)?;
    context.log.info(format!("Preset saved: {saved}"));
    println!("Saved preset: {saved}");
    Ok(())
}

#[derive(Serialize)]
struct LaunchOutput {
    argv: Vec<String>,
    command: String,
    pid: Option<u32>,
}

fn launch_target(
    context: &mut CliContext,
    target: LaunchTarget,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    match target {
        LaunchTarget::Preset(name) => {
            let resolution = context.session.load_preset(&name)?;
            if let Some(iwad) = &resolution.missing_iwad {
                context.log.warn(format!("Preset {name}: IWAD not found: {iwad}"));
                bail!("Preset {name}: IWAD not found: {iwad}");
            }
            for missing in &resolution.missing_mods {
                context.log.warn(format!("Preset {name}: mod not found: {missing}"));
                eprintln!("Warning: mod not found, skipping: {missing}");
            }
        }
        LaunchTarget::Files { iwad, mods } => select_files(context, &iwad, &mods)?,
    }

    let engine = context.config.engine_path.clone();
    let argv = context.session.build_launch_arguments(&engine)?;
    let command = launch::format_command(&argv);
    let display_argv = launch::display_arguments(&argv);
    let pid = if dry_run {
        None
    } else {
        if !launch::engine_available(&engine) {
            eprintln!("Warning: engine not found: {}", engine.display());
        }
        context.log.info(format!("Launching: {command}"));
        match context.session.launch(&engine, &ProcessSpawner) {
            Ok(handle) => {
                context.log.info(format!("GZDoom launched (pid {})", handle.pid));
                Some(handle.pid)
            }
            Err(err) => {
                context.log.error(format!("Launch failed: {err}"));
                return Err(err.into());
            }
        }
    };

    let output = LaunchOutput {
        argv: display_argv,
        command,
        pid,
    };
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => match output.pid {
            Some(pid) => println!("Launched GZDoom (pid {pid}): {}", output.command),
            None => println!("{}", output.command),
        },
    }
    Ok(())
}

fn discover_files(context: &CliContext, format: OutputFormat) -> Result<()> {
    let found = library::discover(&context.config.discovery_paths());
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        OutputFormat::Text => {
            println!("Searched {} location(s)", found.searched.len());
            for handle in found.iwads.iter().chain(found.mods.iter()) {
                println!("  {:<4} {}", handle.role.label(), handle.path.display());
            }
            println!(
                "Found {} IWAD(s) and {} mod(s)",
                found.iwads.len(),
                found.mods.len()
            );
            println!();
            println!("Copy IWADs to: {}", context.config.iwad_dir().display());
            println!("Copy mods to:  {}", context.config.mods_dir().display());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PathsOutput {
    engine_path: String,
    engine_found: bool,
    library_dir: String,
    layout: String,
    iwad_dir: String,
    mods_dir: String,
    presets_path: String,
    config_path: String,
    log_path: Option<String>,
    engine_candidates: Vec<EngineCandidate>,
}

#[derive(Serialize)]
struct EngineCandidate {
    path: String,
    exists: bool,
}

fn list_paths(context: &CliContext, format: OutputFormat) -> Result<()> {
    let config = &context.config;
    let output = PathsOutput {
        engine_path: config.engine_path.display().to_string(),
        engine_found: launch::engine_available(&config.engine_path),
        library_dir: config.library_dir.display().to_string(),
        layout: config.layout.label().to_string(),
        iwad_dir: config.iwad_dir().display().to_string(),
        mods_dir: config.mods_dir().display().to_string(),
        presets_path: context.session.presets_path().display().to_string(),
        config_path: config.config_path().display().to_string(),
        log_path: context.log.path().map(|path| path.display().to_string()),
        engine_candidates: launch::engine_candidates()
            .into_iter()
            .map(|(path, exists)| EngineCandidate { path, exists })
            .collect(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let state = if output.engine_found { "found" } else { "not found" };
            println!("Engine: {} ({state})", output.engine_path);
            println!("Library: {}", output.library_dir);
            println!("Layout: {}", output.layout);
            println!("IWAD folder: {}", output.iwad_dir);
            println!("Mods folder: {}", output.mods_dir);
            println!("Presets: {}", output.presets_path);
            println!("Config: {}", output.config_path);
            if let Some(log_path) = output.log_path {
                println!("Log: {log_path}");
            }
            println!("Common engine locations:");
            for candidate in output.engine_candidates {
                let mark = if candidate.exists { "+" } else { "-" };
                println!("  {mark} {}", candidate.path);
            }
        }
    }
    Ok(())
}

fn init_directories(context: &mut CliContext) -> Result<()> {
    let created: Vec<PathBuf> = library::ensure_directories(&context.config.scan_rule())?;
    if created.is_empty() {
        println!("Library directories already exist.");
        return Ok(());
    }
    for dir in &created {
        context.log.info(format!("Created: {}", dir.display()));
        println!("Created {}", dir.display());
    }
    Ok(())
}

fn print_help() {
    println!("wadsmith v{}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  wadsmith                                   Launch TUI");
    println!("  wadsmith files                             List IWADs and mods in the library");
    println!("  wadsmith presets list                      List presets");
    println!("  wadsmith presets show <name>               Show a preset and what is missing");
    println!("  wadsmith presets save <name> --iwad <file> [--file <mod>...]");
    println!("                                             Save a preset");
    println!("  wadsmith presets delete <name>             Delete a preset");
    println!("  wadsmith launch <preset>                   Launch GZDoom with a preset");
    println!("  wadsmith launch --iwad <file> [--file <mod>...]");
    println!("                                             Launch GZDoom with explicit files");
    println!("  wadsmith discover                          Search common locations for WADs");
    println!("  wadsmith paths                             Show configured paths");
    println!("  wadsmith init                              Create the library folders");
    println!();
    println!("Global options:");
    println!("  --format <json|text>                       Output format");
    println!("  -n, --dry-run                              Print the launch command only");
    println!("  -h, --help                                 Show help");
    println!("  -V, --version                              Show version");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn command(values: &[&str]) -> CliCommand {
        match parse_args(&args(values)).unwrap() {
            CliAction::Command { command, .. } => command,
            CliAction::Ui => panic!("expected a command"),
        }
    }

    #[test]
    fn no_args_opens_ui() {
        assert_eq!(parse_args(&[]).unwrap(), CliAction::Ui);
    }

    #[test]
    fn presets_subcommands() {
        assert_eq!(command(&["presets"]), CliCommand::PresetsList);
        assert_eq!(
            command(&["presets", "show", "Brutal"]),
            CliCommand::PresetsShow("Brutal".to_string())
        );
        assert_eq!(
            command(&["presets", "delete", "Brutal"]),
            CliCommand::PresetsDelete("Brutal".to_string())
        );
        assert!(parse_args(&args(&["presets", "show"])).is_err());
        assert!(parse_args(&args(&["presets", "rename", "x"])).is_err());
    }

    #[test]
    fn save_collects_mods_in_order() {
        assert_eq!(
            command(&[
                "presets", "save", "Brutal", "--iwad", "DOOM2.WAD", "--file", "a.pk3", "b.wad",
                "--file=c.pk3"
            ]),
            CliCommand::PresetsSave {
                name: "Brutal".to_string(),
                iwad: "DOOM2.WAD".to_string(),
                mods: vec!["a.pk3".to_string(), "b.wad".to_string(), "c.pk3".to_string()],
            }
        );
        assert!(parse_args(&args(&["presets", "save", "x"])).is_err());
        assert!(parse_args(&args(&["presets", "save", "--iwad", "DOOM.WAD"])).is_err());
    }

    #[test]
    fn launch_targets_and_globals() {
        match parse_args(&args(&["--dry-run", "launch", "Brutal", "--format", "json"])).unwrap() {
            CliAction::Command {
                command,
                format,
                dry_run,
            } => {
                assert_eq!(command, CliCommand::Launch(LaunchTarget::Preset("Brutal".to_string())));
                assert_eq!(format, OutputFormat::Json);
                assert!(dry_run);
            }
            CliAction::Ui => panic!("expected a command"),
        }

        assert_eq!(
            command(&["launch", "--iwad", "DOOM.WAD"]),
            CliCommand::Launch(LaunchTarget::Files {
                iwad: "DOOM.WAD".to_string(),
                mods: Vec::new(),
            })
        );
        assert!(parse_args(&args(&["launch"])).is_err());
        assert!(parse_args(&args(&["launch", "Brutal", "--iwad", "DOOM.WAD"])).is_err());
        assert!(parse_args(&args(&["launch", "--iwad", "DOOM.WAD", "--file"])).is_err());
    }

    #[test]
    fn dash_n_after_subcommand_is_a_preset_name() {
        match parse_args(&args(&["launch", "-n"])).unwrap() {
            CliAction::Command {
                command, dry_run, ..
            } => {
                assert_eq!(command, CliCommand::Launch(LaunchTarget::Preset("-n".to_string())));
                assert!(!dry_run);
            }
            CliAction::Ui => panic!("expected a command"),
        }
        assert_eq!(
            command(&["presets", "delete", "-n"]),
            CliCommand::PresetsDelete("-n".to_string())
        );

        match parse_args(&args(&["launch", "Brutal", "--dry-run"])).unwrap() {
            CliAction::Command { dry_run, .. } => assert!(dry_run),
            CliAction::Ui => panic!("expected a command"),
        }
        assert!(parse_args(&args(&["presets", "save", "x", "--iwad", "DOOM.WAD", "--dry-run"])).is_err());
    }

    #[test]
    fn preset_names_are_trimmed_everywhere() {
        assert_eq!(
            command(&["presets", "delete", "  x  "]),
            CliCommand::PresetsDelete("x".to_string())
        );
        assert_eq!(
            command(&["presets", "show", " x"]),
            CliCommand::PresetsShow("x".to_string())
        );
        assert_eq!(
            command(&["launch", "x  "]),
            CliCommand::Launch(LaunchTarget::Preset("x".to_string()))
        );
        match command(&["presets", "save", "  x  ", "--iwad", "DOOM.WAD"]) {
            CliCommand::PresetsSave { name, .. } => assert_eq!(name, "x"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_args(&args(&["presets", "delete", "   "])).is_err());
    }

    #[test]
    fn bad_format_and_unknown_command_fail() {
        assert!(parse_args(&args(&["files", "--format", "yaml"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert_eq!(command(&["--version"]), CliCommand::Version);
        assert_eq!(command(&["paths", "--format=json"]), CliCommand::Paths);
    }
}
