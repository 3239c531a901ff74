use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::error::Error;
use std::io::{self, Stdout};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use crate::nds_color::Palette;
use crate::nds_config::{save_config, Config};
use crate::nds_dims::{parse_positive, MAX_SPINNER_VALUE};
use crate::nds_engine::{GameEngine, GameInstance};
use crate::nds_form::{ConfigurationForm, NEIGHBORHOOD_TYPE_NAMES, NEIGHBORHOOD_WRAP_NAMES};
use crate::nds_lang::Lang;

type Term = Terminal<CrosstermBackend<Stdout>>;

const MIN_TWIDTH: u16 = 72;
const MIN_THEIGHT: u16 = 20;
const OPTIONS_WIDTH: u16 = 46;
const LABEL_WIDTH: usize = 18;

/// Focusable controls, in the order Up/Down walks them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Dimensions,
    MinesField,
    MinesSlider,
    Neighborhood,
    Radius,
    Wrap,
    Launch,
    Axis(usize),
}

const OPTION_ROWS: [Focus; 7] = [
    Focus::Dimensions,
    Focus::MinesField,
    Focus::MinesSlider,
    Focus::Neighborhood,
    Focus::Radius,
    Focus::Wrap,
    Focus::Launch,
];

// Line of each option row inside the options panel
fn option_line(focus: Focus) -> u16 {
    match focus {
        Focus::Dimensions => 1,
        Focus::MinesField => 3,
        Focus::MinesSlider => 4,
        Focus::Neighborhood => 6,
        Focus::Radius => 7,
        Focus::Wrap => 8,
        Focus::Launch => 12,
        Focus::Axis(_) => 0,
    }
}

/// What the loop should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Continue,
    ToggleLanguage,
    Exit,
}

// Runtime UI variables grouped so handlers can borrow them together
#[derive(Debug)]
struct UiState {
    focus: Focus,
    edit_buf: Option<String>, // digits typed into the focused numeric control
    axis_scroll: usize,
    axes_visible: usize,
    notice: Option<String>,
    launched: Option<GameInstance>,
    options_rect: Option<Rect>,
    axes_rect: Option<Rect>,
    ok_rect: Option<Rect>,
}

impl UiState {
    fn new() -> Self {
        UiState {
            focus: Focus::Dimensions,
            edit_buf: None,
            axis_scroll: 0,
            axes_visible: 1,
            notice: None,
            launched: None,
            options_rect: None,
            axes_rect: None,
            ok_rect: None,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.edit_buf = None;
        }
        self.focus = focus;
        if let Focus::Axis(i) = focus {
            if i < self.axis_scroll {
                self.axis_scroll = i;
            } else if i >= self.axis_scroll + self.axes_visible {
                self.axis_scroll = i + 1 - self.axes_visible;
            }
        }
    }

    // Keep the axis focus and scroll valid after the axis count changed
    fn fit_axes(&mut self, len: usize) {
        if let Focus::Axis(i) = self.focus {
            if i >= len {
                self.set_focus(Focus::Axis(len - 1));
            }
        }
        self.axis_scroll = self.axis_scroll.min(len.saturating_sub(self.axes_visible));
    }

    fn move_focus(&mut self, down: bool, axes: usize) {
        let next = match self.focus {
            Focus::Axis(i) => {
                if down {
                    Focus::Axis((i + 1).min(axes - 1))
                } else {
                    Focus::Axis(i.saturating_sub(1))
                }
            }
            f => {
                let pos = OPTION_ROWS.iter().position(|r| *r == f).unwrap_or(0);
                let pos = if down {
                    (pos + 1) % OPTION_ROWS.len()
                } else {
                    (pos + OPTION_ROWS.len() - 1) % OPTION_ROWS.len()
                };
                OPTION_ROWS[pos]
            }
        };
        self.set_focus(next);
    }

    fn switch_panel(&mut self) {
        let next = match self.focus {
            Focus::Axis(_) => Focus::Dimensions,
            _ => Focus::Axis(self.axis_scroll),
        };
        self.set_focus(next);
    }

    fn handle_key<E: GameEngine<Instance = GameInstance>>(
        &mut self,
        code: KeyCode,
        form: &mut ConfigurationForm,
        engine: &E,
    ) -> Outcome {
        // Blocking modals swallow every key except their dismissal
        if self.launched.is_some() {
            return match code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Outcome::Exit,
                _ => Outcome::Continue,
            };
        }
        if self.notice.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return Outcome::Continue;
        }

        match code {
            KeyCode::Esc => return Outcome::Exit,
            KeyCode::F(7) => return Outcome::ToggleLanguage,
            KeyCode::Up => self.move_focus(false, form.dims().len()),
            KeyCode::Down => self.move_focus(true, form.dims().len()),
            KeyCode::Tab | KeyCode::BackTab => self.switch_panel(),
            // Enter first finishes a numeric edit, then launches
            KeyCode::Enter if self.edit_buf.is_some() => self.edit_buf = None,
            KeyCode::Enter => self.launch(form, engine),
            KeyCode::Char(' ') if self.focus == Focus::Launch => self.launch(form, engine),
            KeyCode::Left | KeyCode::Char('-') => self.step(form, -1),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.step(form, 1),
            KeyCode::PageUp if self.focus == Focus::MinesSlider => {
                let big = (form.mines().upper_bound() / 10).max(1) as i64;
                form.step_mines_slider(big);
            }
            KeyCode::PageDown if self.focus == Focus::MinesSlider => {
                let big = (form.mines().upper_bound() / 10).max(1) as i64;
                form.step_mines_slider(-big);
            }
            KeyCode::Home if self.focus == Focus::MinesSlider => {
                form.set_mines_from_slider(0);
            }
            KeyCode::End if self.focus == Focus::MinesSlider => {
                let max = form.mines().slider().max;
                form.set_mines_from_slider(max);
            }
            KeyCode::Home if self.focus == Focus::MinesField => {
                self.edit_buf = None;
                form.set_mines_from_field(0);
            }
            KeyCode::End if self.focus == Focus::MinesField => {
                self.edit_buf = None;
                let max = form.mines().field().max;
                form.set_mines_from_field(max);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => self.type_digit(form, c),
            KeyCode::Backspace => self.backspace(form),
            _ => {}
        }
        self.fit_axes(form.dims().len());
        Outcome::Continue
    }

    fn launch<E: GameEngine<Instance = GameInstance>>(&mut self, form: &mut ConfigurationForm, engine: &E) {
        self.edit_buf = None;
        match form.launch(engine) {
            Ok(instance) => self.launched = Some(instance),
            Err(_) => self.notice = form.take_notifications().pop(),
        }
    }

    // Spinner arrows and selector cycling
    fn step(&mut self, form: &mut ConfigurationForm, delta: i64) {
        self.edit_buf = None;
        match self.focus {
            Focus::Dimensions => {
                let n = step_spinner(form.dims().len() as u64, delta);
                form.set_dimensionality(n as usize);
            }
            Focus::Axis(i) => {
                let cur = form.dims().extent(i).unwrap_or(1);
                if let Err(e) = form.set_extent_value(i, step_spinner(cur, delta)) {
                    log::warn!("{}", e);
                }
            }
            Focus::MinesField => form.step_mines_field(delta),
            Focus::MinesSlider => form.step_mines_slider(delta),
            Focus::Radius => {
                let cur = form.radius().trim().parse::<u64>().unwrap_or(1);
                form.set_radius(&step_spinner(cur, delta).to_string());
            }
            Focus::Neighborhood => {
                let labels: Vec<&str> = NEIGHBORHOOD_TYPE_NAMES.iter().map(|(l, _)| *l).collect();
                let next = cycle(&labels, form.neighborhood(), delta);
                form.set_neighborhood(next);
            }
            Focus::Wrap => {
                let labels: Vec<&str> = NEIGHBORHOOD_WRAP_NAMES.iter().map(|(l, _)| *l).collect();
                let next = cycle(&labels, form.wrap(), delta);
                form.set_wrap(next);
            }
            Focus::Launch => {}
        }
    }

    fn type_digit(&mut self, form: &mut ConfigurationForm, c: char) {
        let limit = match self.focus {
            Focus::MinesField => 19,
            Focus::Dimensions | Focus::Axis(_) | Focus::Radius => 4,
            _ => return,
        };
        let buf = self.edit_buf.get_or_insert_with(String::new);
        if buf.len() < limit {
            buf.push(c);
        }
        self.apply_buffer(form);
    }

    fn backspace(&mut self, form: &mut ConfigurationForm) {
        if let Some(buf) = self.edit_buf.as_mut() {
            buf.pop();
            self.apply_buffer(form);
        }
    }

    // Every keystroke is applied right away, like an input event
    fn apply_buffer(&mut self, form: &mut ConfigurationForm) {
        let Some(buf) = self.edit_buf.clone() else {
            return;
        };
        match self.focus {
            Focus::Dimensions => {
                let n = parse_positive(&buf).min(MAX_SPINNER_VALUE);
                form.set_dimensionality(n as usize);
            }
            Focus::Axis(i) => {
                if let Err(e) = form.set_extent(i, &buf) {
                    log::warn!("{}", e);
                }
            }
            Focus::MinesField => {
                // the field shows what it clamped to, same as the slider
                form.commit_mines_field(&buf);
                self.edit_buf = Some(form.mines().field().value.to_string());
            }
            Focus::Radius => form.set_radius(&buf),
            _ => {}
        }
    }

    fn handle_mouse<E: GameEngine<Instance = GameInstance>>(
        &mut self,
        ev: MouseEvent,
        form: &mut ConfigurationForm,
        engine: &E,
    ) -> Outcome {
        let (col, row) = (ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.launched.is_some() || self.notice.is_some() {
                    if self.ok_rect.is_some_and(|r| contains(r, col, row)) {
                        return self.handle_key(KeyCode::Enter, form, engine);
                    }
                    return Outcome::Continue;
                }
                if let Some(r) = self.options_rect.filter(|r| contains(*r, col, row)) {
                    let line = row.saturating_sub(r.y + 1);
                    if let Some(f) = OPTION_ROWS.iter().find(|f| option_line(**f) == line) {
                        self.set_focus(*f);
                        if *f == Focus::Launch {
                            self.launch(form, engine);
                        }
                    }
                } else if let Some(r) = self.axes_rect.filter(|r| contains(*r, col, row)) {
                    let line = row.saturating_sub(r.y + 1) as usize;
                    let i = self.axis_scroll + line;
                    if line < self.axes_visible && i < form.dims().len() {
                        self.set_focus(Focus::Axis(i));
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                if self.axes_rect.is_some_and(|r| contains(r, col, row)) {
                    let max = form.dims().len().saturating_sub(self.axes_visible);
                    self.axis_scroll = (self.axis_scroll + 1).min(max);
                }
            }
            MouseEventKind::ScrollUp => {
                if self.axes_rect.is_some_and(|r| contains(r, col, row)) {
                    self.axis_scroll = self.axis_scroll.saturating_sub(1);
                }
            }
            _ => {}
        }
        Outcome::Continue
    }
}

fn step_spinner(cur: u64, delta: i64) -> u64 {
    let next = if delta < 0 {
        cur.saturating_sub(delta.unsigned_abs())
    } else {
        cur.saturating_add(delta as u64)
    };
    next.clamp(1, MAX_SPINNER_VALUE)
}

fn cycle<'a>(labels: &[&'a str], current: &str, delta: i64) -> &'a str {
    let n = labels.len() as i64;
    let pos = labels.iter().position(|l| *l == current).unwrap_or(0) as i64;
    labels[(pos + delta).rem_euclid(n) as usize]
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Restores the terminal even when the loop bails out with an error
struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(TuiGuard { terminal })
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the launcher screen until the user exits.
/// Returns the launched game, if any.
pub fn run<E: GameEngine<Instance = GameInstance>>(
    cfg: &mut Config,
    lang: &mut Lang,
    engine: &E,
) -> Result<Option<GameInstance>, Box<dyn Error>> {
    let mut tui = TuiGuard::new()?;
    let palette = Palette::detect();
    let mut form = ConfigurationForm::new();
    let mut ui = UiState::new();
    let tick_rate = Duration::from_millis(200);

    loop {
        tui.terminal.draw(|f| draw(f, &form, &mut ui, lang, &palette, cfg.ascii_slider))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let outcome = match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind == KeyEventKind::Press => {
                ui.handle_key(code, &mut form, engine)
            }
            Event::Mouse(ev) => ui.handle_mouse(ev, &mut form, engine),
            _ => Outcome::Continue,
        };
        match outcome {
            Outcome::Continue => {}
            Outcome::ToggleLanguage => {
                cfg.language = lang.toggle().to_string();
                save_config(cfg);
            }
            Outcome::Exit => break,
        }
    }

    Ok(ui.launched)
}

fn pad_label(label: &str, width: usize) -> String {
    format!("{}{}", label, " ".repeat(width.saturating_sub(label.width())))
}

fn draw<B: Backend>(f: &mut Frame<'_, B>, form: &ConfigurationForm, ui: &mut UiState, lang: &Lang, pal: &Palette, ascii: bool) {
    let a = &lang.assets;
    let size = f.size();
    if size.width < MIN_TWIDTH || size.height < MIN_THEIGHT {
        let warn_lines = vec![
            Spans::from(Span::raw(a.tsmsg_line1)),
            Spans::from(Span::raw(Lang::fill_all(a.tsmsg_line2, &[MIN_TWIDTH.to_string(), MIN_THEIGHT.to_string()]))),
        ];
        let warn = Paragraph::new(Text::from(warn_lines))
            .block(Block::default().borders(Borders::ALL).title(a.tsmsg_title))
            .alignment(Alignment::Center);
        f.render_widget(Clear, size);
        let area = center_rect(40u16.min(size.width), 5u16.min(size.height), size);
        f.render_widget(warn, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(15), Constraint::Length(3)].as_ref())
        .split(size);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(OPTIONS_WIDTH), Constraint::Min(20)].as_ref())
        .split(rows[0]);

    draw_options(f, cols[0], form, ui, lang, pal, ascii);
    draw_axes(f, cols[1], form, ui, lang, pal);

    // status row
    let status = if form.mines().exceeds_bound() {
        Paragraph::new(Spans::from(Span::styled(a.status_over_bound, Style::default().fg(pal.error_fg).add_modifier(Modifier::BOLD))))
    } else {
        Paragraph::new(Spans::from(Span::styled(a.status_hint, Style::default().fg(pal.key_fg))))
    };
    f.render_widget(status.block(Block::default().borders(Borders::ALL)), rows[1]);

    ui.ok_rect = None;
    if let Some(msg) = ui.notice.as_deref() {
        let mrect = center_rect(50, 8, size);
        f.render_widget(Clear, mrect);
        let body = Paragraph::new(Text::from(vec![Spans::from(Span::raw("")), Spans::from(Span::styled(msg, Style::default().fg(pal.error_fg)))]))
            .block(Block::default().borders(Borders::ALL).title(a.err_title))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(body, mrect);
        ui.ok_rect = Some(draw_ok_button(f, mrect, a.btn_ok, pal));
    } else if let Some(game) = ui.launched.as_ref() {
        let mrect = center_rect(56, 10, size);
        f.render_widget(Clear, mrect);
        let c = &game.config;
        let field = c.field_size.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(" x ");
        let lines = vec![
            Spans::from(Span::raw("")),
            Spans::from(Span::raw(Lang::fill(a.launched_field_fmt, field))),
            Spans::from(Span::raw(Lang::fill(a.launched_mines_fmt, c.mine_count))),
            Spans::from(Span::raw(Lang::fill_all(
                a.launched_rule_fmt,
                &[c.neighborhood_type.token().to_string(), c.radius.to_string(), c.neighborhood_wrap.token().to_string()],
            ))),
            Spans::from(Span::raw(Lang::fill(a.launched_at_fmt, &game.launched_at))),
        ];
        let body = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(a.launched_title))
            .alignment(Alignment::Center);
        f.render_widget(body, mrect);
        ui.ok_rect = Some(draw_ok_button(f, mrect, a.btn_ok, pal));
    }
}

fn draw_options<B: Backend>(f: &mut Frame<'_, B>, area: Rect, form: &ConfigurationForm, ui: &mut UiState, lang: &Lang, pal: &Palette, ascii: bool) {
    let a = &lang.assets;
    ui.options_rect = Some(area);
    let focus_style = Style::default().bg(pal.focus_bg).fg(pal.focus_fg).add_modifier(Modifier::BOLD);
    let field_style = |focus: Focus| if ui.focus == focus { focus_style } else { Style::default().bg(pal.field_bg) };
    let shown = |focus: Focus, value: String| match (&ui.edit_buf, ui.focus == focus) {
        (Some(buf), true) => buf.clone(),
        _ => value,
    };

    let mines = form.mines();
    let mines_style = if mines.exceeds_bound() && ui.focus != Focus::MinesField {
        Style::default().bg(pal.warn_bg).fg(pal.focus_fg)
    } else {
        field_style(Focus::MinesField)
    };
    let label = |s: &str| Span::styled(format!(" {}", pad_label(s, LABEL_WIDTH)), Style::default().fg(pal.label));

    // slider track sized to what is left of the row
    let inner_w = area.width.saturating_sub(2) as usize;
    let track_w = inner_w.saturating_sub(LABEL_WIDTH + 4).max(3);
    let knob = ((track_w - 1) as f64 * mines.slider().ratio()).round() as usize;
    let (fill, rest, knob_ch) = if ascii { ("=", "-", "|") } else { ("━", "─", "●") };
    let slider_style = if ui.focus == Focus::MinesSlider { Style::default().bg(pal.focus_bg) } else { Style::default() };
    let slider = vec![
        label(a.lbl_slider),
        Span::styled(fill.repeat(knob), slider_style.fg(pal.slider_fill)),
        Span::styled(knob_ch, slider_style.fg(pal.slider_fill).add_modifier(Modifier::BOLD)),
        Span::styled(rest.repeat(track_w - 1 - knob), slider_style.fg(pal.slider_track)),
    ];

    let selector = |focus: Focus, value: &str| {
        let text = format!("< {} >", value);
        if ui.focus == focus { Span::styled(text, focus_style) } else { Span::raw(text) }
    };

    let launch_style = if ui.focus == Focus::Launch {
        Style::default().bg(pal.button_focus_bg).fg(pal.focus_fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(pal.button_bg).fg(pal.focus_fg).add_modifier(Modifier::BOLD)
    };
    let launch_pad = inner_w.saturating_sub(a.btn_launch.width()) / 2;

    let lines = vec![
        Spans::from(Span::raw("")),
        Spans::from(vec![
            label(a.lbl_dimensions),
            Span::styled(format!("{:>5}", shown(Focus::Dimensions, form.dims().len().to_string())), field_style(Focus::Dimensions)),
        ]),
        Spans::from(Span::raw("")),
        Spans::from(vec![
            label(&Lang::fill(a.lbl_mines_fmt, mines.field().max)),
            Span::styled(format!("{:>5}", shown(Focus::MinesField, mines.field().value.to_string())), mines_style),
        ]),
        Spans::from(slider),
        Spans::from(Span::raw("")),
        Spans::from(vec![label(a.lbl_neighborhood), selector(Focus::Neighborhood, form.neighborhood())]),
        Spans::from(vec![
            label(a.lbl_radius),
            Span::styled(format!("{:>5}", shown(Focus::Radius, form.radius().to_string())), field_style(Focus::Radius)),
        ]),
        Spans::from(vec![label(a.lbl_wrapping), selector(Focus::Wrap, form.wrap())]),
        Spans::from(Span::raw("")),
        Spans::from(Span::styled(format!(" {}", Lang::fill(a.lbl_volume_fmt, form.dims().volume())), Style::default().fg(pal.label))),
        Spans::from(Span::raw("")),
        Spans::from(vec![Span::raw(" ".repeat(launch_pad)), Span::styled(a.btn_launch, launch_style)]),
    ];
    let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL).title(a.title_options));
    f.render_widget(p, area);
}

fn draw_axes<B: Backend>(f: &mut Frame<'_, B>, area: Rect, form: &ConfigurationForm, ui: &mut UiState, lang: &Lang, pal: &Palette) {
    let a = &lang.assets;
    ui.axes_rect = Some(area);
    ui.axes_visible = area.height.saturating_sub(2).max(1) as usize;
    let dims = form.dims();
    ui.axis_scroll = ui.axis_scroll.min(dims.len().saturating_sub(ui.axes_visible));

    let focus_style = Style::default().bg(pal.focus_bg).fg(pal.focus_fg).add_modifier(Modifier::BOLD);
    let end = (ui.axis_scroll + ui.axes_visible).min(dims.len());
    let lines: Vec<Spans> = (ui.axis_scroll..end)
        .map(|i| {
            let focused = ui.focus == Focus::Axis(i);
            let value = match (&ui.edit_buf, focused) {
                (Some(buf), true) => buf.clone(),
                _ => dims.extent(i).unwrap_or(1).to_string(),
            };
            let style = if focused { focus_style } else { Style::default().bg(pal.field_bg) };
            Spans::from(vec![
                Span::styled(format!(" {}", pad_label(&Lang::fill(a.lbl_axis_fmt, i + 1), 14)), Style::default().fg(pal.label)),
                Span::styled(format!("{:>5}", value), style),
            ])
        })
        .collect();
    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(Lang::fill(a.title_axes_fmt, dims.len())));
    f.render_widget(p, area);
}

fn draw_ok_button<B: Backend>(f: &mut Frame<'_, B>, mrect: Rect, text: &str, pal: &Palette) -> Rect {
    let btn_w = text.width() as u16;
    let bx = mrect.x + (mrect.width.saturating_sub(btn_w)) / 2;
    let by = mrect.y + mrect.height.saturating_sub(2);
    let btn_rect = Rect::new(bx, by, btn_w, 1);
    let btn_style = Style::default().bg(pal.button_focus_bg).fg(pal.focus_fg).add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(Spans::from(Span::styled(text, btn_style))).alignment(Alignment::Center), btn_rect);
    btn_rect
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nds_engine::MinefieldEngine;

    fn press(ui: &mut UiState, form: &mut ConfigurationForm, codes: &[KeyCode]) -> Outcome {
        let engine = MinefieldEngine::with_seed(11);
        let mut last = Outcome::Continue;
        for &code in codes {
            last = ui.handle_key(code, form, &engine);
        }
        last
    }

    #[test]
    fn typing_dimensions_applies_each_keystroke() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Char('1'), KeyCode::Char('2')]);
        assert_eq!(form.dims().len(), 12);
        press(&mut ui, &mut form, &[KeyCode::Backspace]);
        assert_eq!(form.dims().len(), 1);
        press(&mut ui, &mut form, &[KeyCode::Backspace]);
        // empty text coerces to one axis
        assert_eq!(form.dims().len(), 1);
    }

    #[test]
    fn spinner_steps_are_clamped() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Left, KeyCode::Left]);
        assert_eq!(form.dims().len(), 1);
        press(&mut ui, &mut form, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(form.dims().len(), 3);
    }

    #[test]
    fn axis_panel_edits_extents_and_bound() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Char('2'), KeyCode::Tab]);
        assert_eq!(ui.focus, Focus::Axis(0));
        press(&mut ui, &mut form, &[KeyCode::Char('3'), KeyCode::Down, KeyCode::Char('4')]);
        assert_eq!(form.dims().value(), vec![3, 4]);
        assert_eq!(form.mines().upper_bound(), 11);
    }

    #[test]
    fn shrinking_moves_axis_focus_back_in_range() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        form.set_dimensionality(5);
        ui.set_focus(Focus::Axis(4));
        form.set_dimensionality(2);
        ui.fit_axes(form.dims().len());
        assert_eq!(ui.focus, Focus::Axis(1));
    }

    #[test]
    fn selectors_cycle_through_labels() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        ui.set_focus(Focus::Neighborhood);
        press(&mut ui, &mut form, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(form.neighborhood(), "diagonal");
        press(&mut ui, &mut form, &[KeyCode::Left, KeyCode::Left, KeyCode::Left]);
        assert_eq!(form.neighborhood(), "ultraknight");
        ui.set_focus(Focus::Wrap);
        press(&mut ui, &mut form, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(form.wrap(), "reflect on cell");
    }

    #[test]
    fn failed_launch_shows_one_blocking_notice() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        // radius 0 is rejected by the engine
        ui.set_focus(Focus::Radius);
        press(&mut ui, &mut form, &[KeyCode::Char('0'), KeyCode::Enter, KeyCode::Enter]);
        assert!(ui.notice.is_some());
        assert!(ui.launched.is_none());
        // keys other than dismissal are swallowed
        press(&mut ui, &mut form, &[KeyCode::Right]);
        assert_eq!(form.radius(), "0");
        assert_eq!(press(&mut ui, &mut form, &[KeyCode::Esc]), Outcome::Continue);
        assert!(ui.notice.is_none());
        assert!(!form.is_launched());
    }

    #[test]
    fn successful_launch_then_exit() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Char('2'), KeyCode::Tab, KeyCode::Char('5'), KeyCode::Down, KeyCode::Char('5')]);
        ui.set_focus(Focus::MinesSlider);
        press(&mut ui, &mut form, &[KeyCode::Right, KeyCode::Right, KeyCode::Right, KeyCode::Enter]);
        let game = ui.launched.as_ref().unwrap();
        assert_eq!(game.config.field_size, vec![5, 5]);
        assert_eq!(game.config.mine_count, 3);
        assert_eq!(game.mines.len(), 3);
        assert_eq!(press(&mut ui, &mut form, &[KeyCode::Enter]), Outcome::Exit);
    }

    #[test]
    fn mine_field_shows_the_clamped_value() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        form.set_dimensionality(2);
        form.set_extent(0, "3").unwrap();
        form.set_extent(1, "4").unwrap();
        ui.set_focus(Focus::MinesField);
        press(&mut ui, &mut form, &[KeyCode::Char('1'), KeyCode::Char('5')]);
        assert_eq!(ui.edit_buf.as_deref(), Some("11"));
        assert_eq!(form.mines().field().value, 11);
        assert_eq!(form.mines().slider().value, 11);

        press(&mut ui, &mut form, &[KeyCode::Backspace]);
        assert_eq!(ui.edit_buf.as_deref(), Some("1"));
        assert_eq!(form.mines().slider().value, 1);
    }

    #[test]
    fn mine_field_home_and_end_jump_to_range_ends() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        form.set_extent(0, "9").unwrap();
        ui.set_focus(Focus::MinesField);
        press(&mut ui, &mut form, &[KeyCode::Char('4'), KeyCode::End]);
        assert_eq!(ui.edit_buf, None);
        assert_eq!(form.mines().slider().value, 8);
        press(&mut ui, &mut form, &[KeyCode::Home]);
        assert_eq!(form.mines().field().value, 0);
    }

    #[test]
    fn typed_axis_extent_is_capped() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Tab]);
        press(&mut ui, &mut form, &[KeyCode::Char('9'); 5]);
        assert_eq!(form.dims().value(), vec![MAX_SPINNER_VALUE]);
    }

    #[test]
    fn enter_finishes_an_edit_before_launching() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        press(&mut ui, &mut form, &[KeyCode::Char('2'), KeyCode::Enter]);
        assert_eq!(ui.edit_buf, None);
        assert!(ui.launched.is_none());
        assert!(!form.is_launched());
        assert_eq!(form.dims().len(), 2);

        press(&mut ui, &mut form, &[KeyCode::Enter]);
        assert!(ui.launched.is_some());
    }

    #[test]
    fn f7_requests_language_switch() {
        let mut ui = UiState::new();
        let mut form = ConfigurationForm::new();
        assert_eq!(press(&mut ui, &mut form, &[KeyCode::F(7)]), Outcome::ToggleLanguage);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let labels = ["a", "b", "c"];
        assert_eq!(cycle(&labels, "c", 1), "a");
        assert_eq!(cycle(&labels, "a", -1), "c");
        assert_eq!(cycle(&labels, "zzz", 1), "b");
    }
}
