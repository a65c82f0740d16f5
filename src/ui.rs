use crate::{
    app::{App, DialogChoice, Focus, InputMode, InputPurpose, ToastLevel},
    library::ArchiveHandle,
    log::LogLevel,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{io, time::Duration};

const PRESET_PANEL_WIDTH: u16 = 30;
const DETAILS_PANEL_WIDTH: u16 = 44;

const HELP_LINES: [&str; 17] = [
    "Tab / Shift+Tab   Switch pane",
    "Up / Down, j / k  Move",
    "Home / End        Jump to first / last",
    "Enter             Load preset / pick IWAD / toggle mod",
    "Space             Pick IWAD / toggle mod",
    "Del, d            Delete preset",
    "s                 Save selection as preset",
    "l, F5             Launch GZDoom",
    "c                 Clear selection",
    "y                 Copy launch command",
    "r                 Rescan library",
    "i                 Create library folders",
    "f                 Search common locations for WADs",
    "p                 Show configuration",
    "PgUp / PgDn       Scroll log",
    "?                 Toggle help",
    "q                 Quit",
];

#[derive(Clone)]
struct Theme {
    accent: Color,
    accent_soft: Color,
    border: Color,
    text: Color,
    muted: Color,
    success: Color,
    warning: Color,
    error: Color,
    header_bg: Color,
    log_bg: Color,
}

impl Theme {
    fn new() -> Self {
        Self {
            accent: Color::Rgb(235, 120, 70),
            accent_soft: Color::Rgb(150, 75, 45),
            border: Color::Rgb(80, 68, 62),
            text: Color::Rgb(230, 225, 220),
            muted: Color::Rgb(150, 140, 132),
            success: Color::Rgb(120, 220, 140),
            warning: Color::Rgb(230, 200, 120),
            error: Color::Rgb(235, 100, 95),
            header_bg: Color::Rgb(30, 22, 20),
            log_bg: Color::Rgb(20, 16, 15),
        }
    }

    fn block(&self, title: &'static str, focused: bool) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if focused {
                self.accent_soft
            } else {
                self.border
            }))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ))
    }

    fn panel(&self, title: &'static str, focused: bool) -> Block<'static> {
        self.block(title, focused).padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
    }

    fn highlight(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.accent_soft)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }
}

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        app.clamp_selection();
        terminal.draw(|frame| draw(frame, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.info.is_some() {
        app.close_info();
        return;
    }
    if app.help_open {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
        ) {
            app.toggle_help();
        }
        return;
    }
    if app.dialog.is_some() {
        handle_dialog_mode(app, key);
        return;
    }

    let mode = std::mem::replace(&mut app.input_mode, InputMode::Normal);
    match mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing {
            prompt,
            buffer,
            purpose,
        } => handle_input_mode(app, key, prompt, buffer, purpose),
    }
}

fn handle_dialog_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left
        | KeyCode::Right
        | KeyCode::Tab
        | KeyCode::Char('h')
        | KeyCode::Char('l') => app.dialog_toggle_choice(),
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.dialog_set_choice(DialogChoice::Yes);
            app.dialog_confirm();
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.dialog_set_choice(DialogChoice::No);
            app.dialog_confirm();
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.dialog_confirm(),
        KeyCode::Esc => {
            app.dialog_set_choice(DialogChoice::No);
            app.dialog_confirm();
        }
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::BackTab => app.cycle_focus_back(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.rescan(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.enter_save_preset(),
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::F(5) => app.launch(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.clear_selection(),
        KeyCode::Char('y') | KeyCode::Char('Y') => app.copy_command_to_clipboard(),
        KeyCode::Char('i') | KeyCode::Char('I') => app.prompt_create_directories(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.show_discovery(),
        KeyCode::Char('p') | KeyCode::Char('P') => app.show_configuration(),
        KeyCode::PageUp => app.log.scroll_up(3),
        KeyCode::PageDown => app.log.scroll_down(3),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.move_down(),
        KeyCode::Home => app.move_home(),
        KeyCode::End => app.move_end(),
        KeyCode::Enter => app.activate(),
        _ => handle_focus_key(app, key),
    }
}

fn handle_focus_key(app: &mut App, key: KeyEvent) {
    match app.focus {
        Focus::Presets => match key.code {
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') | KeyCode::Char('D') => {
                app.prompt_delete_selected_preset()
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let index = (c as u8 - b'1') as usize;
                if index < app.session.presets().len() {
                    app.preset_selected = index;
                }
            }
            _ => {}
        },
        Focus::Iwads => {
            if key.code == KeyCode::Char(' ') {
                app.pick_selected_iwad();
            }
        }
        Focus::Mods => {
            if key.code == KeyCode::Char(' ') {
                app.toggle_selected_mod();
            }
        }
    }
}

fn handle_input_mode(
    app: &mut App,
    key: KeyEvent,
    prompt: String,
    mut buffer: String,
    purpose: InputPurpose,
) {
    match key.code {
        KeyCode::Esc => {
            app.status = "Save cancelled".to_string();
            app.set_toast("Save cancelled", ToastLevel::Warn, Duration::from_secs(2));
            return;
        }
        KeyCode::Enter => {
            let value = buffer.trim().to_string();
            if value.is_empty() {
                app.status = "Preset name is required".to_string();
                app.set_toast("Preset name required", ToastLevel::Warn, Duration::from_secs(3));
            } else {
                app.handle_submit(purpose, value);
                return;
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                if c == 'u' {
                    buffer.clear();
                }
            } else {
                buffer.push(c);
            }
        }
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }

    app.input_mode = InputMode::Editing {
        prompt,
        buffer,
        purpose,
    };
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    let theme = Theme::new();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(11)])
        .split(area);

    draw_header(frame, app, &theme, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PRESET_PANEL_WIDTH),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(DETAILS_PANEL_WIDTH),
        ])
        .split(chunks[1]);

    draw_presets(frame, app, &theme, body[0]);
    draw_archives(frame, app, &theme, body[1], Focus::Iwads);
    draw_archives(frame, app, &theme, body[2], Focus::Mods);

    let details_block = theme.panel("Details", false);
    let details_inner = details_block.inner(body[3]);
    let details = Paragraph::new(build_details(app, &theme, details_inner.width as usize))
        .style(Style::default().fg(theme.text))
        .block(details_block)
        .wrap(Wrap { trim: false });
    frame.render_widget(details, body[3]);

    let footer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(8)])
        .split(chunks[2]);

    let status_block = theme.panel("Status", false);
    let status_inner = status_block.inner(footer[0]);
    let status = Paragraph::new(status_bar_line(app, status_inner.width))
        .style(Style::default().fg(theme.text))
        .block(status_block);
    frame.render_widget(status, footer[0]);

    let log_block = theme
        .panel("Log", false)
        .style(Style::default().bg(theme.log_bg));
    let log_inner = log_block.inner(footer[1]);
    let log = Paragraph::new(build_log_lines(app, &theme, log_inner.height as usize))
        .style(Style::default().fg(theme.text).bg(theme.log_bg))
        .block(log_block);
    frame.render_widget(log, footer[1]);

    if app.dialog.is_some() {
        draw_dialog(frame, app, &theme);
    }
    if let Some(info) = &app.info {
        draw_overlay(frame, &theme, &info.title, &info.lines);
    }
    if app.help_open {
        let lines: Vec<String> = HELP_LINES.iter().map(|line| line.to_string()).collect();
        draw_overlay(frame, &theme, "Keys", &lines);
    }
    draw_toast(frame, app, &theme, chunks[1]);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let selection = app.session.selection();
    let preset_label = app
        .active_preset
        .clone()
        .unwrap_or_else(|| "Custom".to_string());
    let iwad_label = selection
        .base
        .as_ref()
        .map(|handle| handle.name.clone())
        .unwrap_or_else(|| "none".to_string());
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "wadsmith",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("GZDoom Launcher", Style::default().fg(theme.text)),
            Span::raw("  "),
            Span::styled(
                app.focus.label(),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Preset: ", Style::default().fg(theme.muted)),
            Span::styled(preset_label, Style::default().fg(theme.accent)),
            Span::raw("   "),
            Span::styled("IWAD: ", Style::default().fg(theme.muted)),
            Span::styled(
                iwad_label,
                Style::default().fg(if selection.base.is_some() {
                    theme.success
                } else {
                    theme.warning
                }),
            ),
            Span::raw("   "),
            Span::styled("Mods: ", Style::default().fg(theme.muted)),
            Span::styled(
                selection.overlays.len().to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .style(Style::default().bg(theme.header_bg))
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_presets(frame: &mut Frame<'_>, app: &App, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Presets;
    let names = app.session.presets().names();
    if names.is_empty() {
        let empty = Paragraph::new("No presets saved yet.\nPick an IWAD and press s.")
            .style(Style::default().fg(theme.muted))
            .block(theme.panel("Presets", focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let active = app.active_preset.as_deref() == Some(name.as_str());
            let marker = if active { "* " } else { "  " };
            let number = if index < 9 {
                format!("{} ", index + 1)
            } else {
                "  ".to_string()
            };
            let style = if active {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(number, Style::default().fg(theme.muted)),
                Span::styled(format!("{marker}{name}"), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(theme.panel("Presets", focused))
        .highlight_style(theme.highlight(focused))
        .highlight_symbol(if focused { ">" } else { " " });
    let mut state = ListState::default();
    state.select(Some(app.preset_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_archives(frame: &mut Frame<'_>, app: &App, theme: &Theme, area: Rect, pane: Focus) {
    let focused = app.focus == pane;
    let index = app.session.index();
    let (title, handles, selected, empty_text): (&'static str, &[ArchiveHandle], usize, String) =
        match pane {
            Focus::Iwads => (
                "IWADs",
                index.iwads.as_slice(),
                app.iwad_selected,
                format!("No IWAD files in\n{}", app.config.iwad_dir().display()),
            ),
            _ => (
                "Mods",
                index.mods.as_slice(),
                app.mod_selected,
                format!("No mod files in\n{}", app.config.mods_dir().display()),
            ),
        };

    if handles.is_empty() {
        let empty = Paragraph::new(empty_text)
            .style(Style::default().fg(theme.muted))
            .block(theme.panel(title, focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let selection = app.session.selection();
    let items: Vec<ListItem> = handles
        .iter()
        .map(|handle| {
            let (marker, style) = match pane {
                Focus::Iwads if selection.is_base(handle) => {
                    ("(*) ".to_string(), Style::default().fg(theme.success))
                }
                Focus::Iwads => ("( ) ".to_string(), Style::default().fg(theme.text)),
                _ => match selection
                    .overlays
                    .iter()
                    .position(|selected| selected.same_file(handle))
                {
                    Some(pos) => (
                        format!("[{}] ", pos + 1),
                        Style::default().fg(theme.success),
                    ),
                    None => ("[ ] ".to_string(), Style::default().fg(theme.text)),
                },
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(handle.name.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(theme.panel(title, focused))
        .highlight_style(theme.highlight(focused))
        .highlight_symbol(if focused { ">" } else { " " });
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn build_details(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let label = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
    };

    if app.focus == Focus::Presets {
        if let Some(name) = app.selected_preset_name() {
            if let Some(preset) = app.session.presets().get(&name) {
                let preview = app.session.preview_preset(&name).unwrap_or_default();
                lines.push(label(&format!("Preset: {name}")));
                let iwad_style = if preview.missing_iwad.is_some() {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.text)
                };
                lines.push(Line::from(vec![
                    Span::styled("IWAD: ", Style::default().fg(theme.muted)),
                    Span::styled(preset.iwad.clone(), iwad_style),
                ]));
                if preset.mods.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "No mods",
                        Style::default().fg(theme.muted),
                    )));
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("Mods ({}):", preset.mods.len()),
                        Style::default().fg(theme.muted),
                    )));
                    for mod_name in &preset.mods {
                        let missing = preview.missing_mods.contains(mod_name);
                        let style = if missing {
                            Style::default().fg(theme.error)
                        } else {
                            Style::default().fg(theme.text)
                        };
                        let suffix = if missing { " (missing)" } else { "" };
                        lines.push(Line::from(Span::styled(
                            truncate(&format!("  {mod_name}{suffix}"), width),
                            style,
                        )));
                    }
                }
                lines.push(Line::from(""));
            }
        }
    }

    let selection = app.session.selection();
    lines.push(label("Selection"));
    match &selection.base {
        Some(base) => lines.push(Line::from(vec![
            Span::styled("IWAD: ", Style::default().fg(theme.muted)),
            Span::styled(base.name.clone(), Style::default().fg(theme.success)),
        ])),
        None => lines.push(Line::from(Span::styled(
            "IWAD: none selected",
            Style::default().fg(theme.warning),
        ))),
    }
    for (index, handle) in selection.overlays.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            truncate(&format!("  {}. {}", index + 1, handle.name), width),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));
    lines.push(label("Command"));
    match app.command_preview() {
        Some(command) => lines.push(Line::from(Span::styled(
            command,
            Style::default().fg(theme.muted),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Pick an IWAD to build the command.",
            Style::default().fg(theme.muted),
        ))),
    }
    lines
}

fn truncate(value: &str, width: usize) -> String {
    if width == 0 || value.chars().count() <= width {
        return value.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

fn status_bar_line(app: &App, width: u16) -> String {
    let width = width as usize;
    let (left, right) = match &app.input_mode {
        InputMode::Normal => (format!("Status: {}", app.status), app.hint().to_string()),
        InputMode::Editing { prompt, buffer, .. } => (
            format!("{prompt}: {buffer}_"),
            "Enter confirm | Esc cancel".to_string(),
        ),
    };

    if width == 0 {
        return String::new();
    }

    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len + 1 > width {
        return truncate(&left, width);
    }

    let spaces = width - left_len - right_len;
    format!("{left}{}{right}", " ".repeat(spaces))
}

fn build_log_lines(app: &App, theme: &Theme, height: usize) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }

    let entries = app.log.entries();
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            "No recent events.",
            Style::default().fg(theme.muted),
        ))];
    }

    let total = entries.len();
    let view = height.max(1);
    let max_scroll = total.saturating_sub(view);
    let scroll = app.log.scroll.min(max_scroll);
    let start = total.saturating_sub(view + scroll);
    let end = (start + view).min(total);

    entries[start..end]
        .iter()
        .map(|entry| {
            let (label, color) = match entry.level {
                LogLevel::Info => ("[i]", theme.accent),
                LogLevel::Warn => ("[!]", theme.warning),
                LogLevel::Error => ("[x]", theme.error),
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(entry.message.clone(), Style::default().fg(theme.text)),
            ])
        })
        .collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2)).max(1);
    let height = height.min(area.height.saturating_sub(2)).max(1);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn draw_dialog(frame: &mut Frame<'_>, app: &App, theme: &Theme) {
    let Some(dialog) = &app.dialog else {
        return;
    };

    let area = frame.size();
    let message_lines: Vec<Line> = dialog
        .message
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    let height = (message_lines.len().max(1) as u16 + 6).max(7);
    let width = (area.width.saturating_mul(2) / 3).max(34);
    let dialog_area = centered(area, width, height);

    let yes_selected = dialog.choice == DialogChoice::Yes;
    let yes_style = if yes_selected {
        Style::default()
            .fg(Color::Black)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let no_style = if !yes_selected {
        Style::default()
            .fg(Color::Black)
            .bg(theme.warning)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            dialog.title.clone(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(message_lines);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", dialog.yes_label), yes_style),
        Span::raw("   "),
        Span::styled(format!(" {} ", dialog.no_label), no_style),
    ]));

    frame.render_widget(Clear, dialog_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_soft))
        .style(Style::default().bg(theme.header_bg));
    let widget = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center);
    frame.render_widget(widget, dialog_area);
}

fn draw_overlay(frame: &mut Frame<'_>, theme: &Theme, title: &str, body: &[String]) {
    let area = frame.size();
    let longest = body.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
    let overlay_area = centered(area, longest.saturating_add(6).max(40), body.len() as u16 + 4);

    let mut lines: Vec<Line> = body
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(theme.text))))
        .collect();
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Clear, overlay_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_soft))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .style(Style::default().bg(theme.header_bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn draw_toast(frame: &mut Frame<'_>, app: &App, theme: &Theme, body_area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let color = match toast.level {
        ToastLevel::Info => theme.success,
        ToastLevel::Warn => theme.warning,
        ToastLevel::Error => theme.error,
    };
    let width = (toast.message.chars().count() as u16 + 4).min(body_area.width);
    if width == 0 || body_area.height < 3 {
        return;
    }
    let x = body_area.x + body_area.width.saturating_sub(width + 1);
    let y = body_area.y + 1;
    let toast_area = Rect::new(x, y, width, 3);
    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme.header_bg));
    let widget = Paragraph::new(Span::styled(
        toast.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .block(block);
    frame.render_widget(widget, toast_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("DOOM2.WAD", 20), "DOOM2.WAD");
        assert_eq!(truncate("brutalv22test.pk3", 10), "brutalv...");
    }
}
