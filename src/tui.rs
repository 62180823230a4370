use crate::chart::{ChartData, MARGIN};
use crate::error::ValidationError;
use crate::money::{format_grouped, format_money};
use crate::report::{
    self, Level, Message, CHART_CAPTION, CONDITIONS_HINT, DISCLAIMER, EXPENSES_HINT,
};
use crate::session::{Field, FieldKind, FieldValue, Session, MAX_AMOUNT};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame, Terminal,
};
use std::collections::HashSet;
use std::io::{self, Stdout};
use std::str::FromStr;
use tracing::{debug, info, warn};
use tui_big_text::{BigText, PixelSize};

const SLICE_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
];

// Canvas sampling step for the donut, in unit-circle coordinates.
const DONUT_STEP: f64 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    TabBar,
    MagicNumber,
    Help,
}

impl Component {
    /// Returns all available components
    pub fn all() -> Vec<Component> {
        vec![Component::TabBar, Component::MagicNumber, Component::Help]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::TabBar => "tab_bar",
            Component::MagicNumber => "magic_number",
            Component::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Component::TabBar => "Top navigation bar showing active tab",
            Component::MagicNumber => "Big projected net worth on the Result tab",
            Component::Help => "Keyboard shortcuts",
        }
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tab_bar" => Ok(Component::TabBar),
            "magic_number" => Ok(Component::MagicNumber),
            "help" => Ok(Component::Help),
            _ => Err(format!("Unknown component: '{s}'")),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisabledComponents {
    disabled: HashSet<Component>,
}

impl DisabledComponents {
    pub fn new(disabled_list: &[String]) -> Self {
        let mut disabled = HashSet::new();

        for component_str in disabled_list {
            match Component::from_str(component_str) {
                Ok(component) => {
                    disabled.insert(component);
                }
                Err(err) => warn!("{err}"),
            }
        }

        DisabledComponents { disabled }
    }

    pub fn is_disabled(&self, component: Component) -> bool {
        self.disabled.contains(&component)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Conditions,
    Expenses,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    Edit,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Tab::Conditions => "Conditions",
            Tab::Expenses => "Monthly expenses",
            Tab::Result => "Result",
        }
    }

    fn all() -> &'static [Tab] {
        &[Tab::Conditions, Tab::Expenses, Tab::Result]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conditions" => Some(Tab::Conditions),
            "expenses" => Some(Tab::Expenses),
            "result" => Some(Tab::Result),
            _ => None,
        }
    }

    fn help(self) -> &'static str {
        match self {
            Tab::Conditions | Tab::Expenses => {
                "h/l (tabs) | j/k (select) | space (toggle) | +/- (adjust) | e (edit) | q (quit)"
            }
            Tab::Result => "h/l (tabs) | j/k (select slice) | 1-3 (direct) | q (quit)",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub session: Session,
    pub should_quit: bool,
    pub error_message: Option<String>,
    pub currency: String,
    pub hypothetical_part_time: f64,
    pub mode: AppMode,
    pub selected_field: usize,
    pub selected_slice: usize,
    pub edit_input: String,
    pub disabled_components: DisabledComponents,
}

impl App {
    pub fn new(
        session: Session,
        currency: String,
        hypothetical_part_time: f64,
        disabled_components: DisabledComponents,
    ) -> App {
        App {
            current_tab: Tab::Conditions,
            session,
            should_quit: false,
            error_message: None,
            currency,
            hypothetical_part_time,
            mode: AppMode::Normal,
            selected_field: 0,
            selected_slice: 0,
            edit_input: String::new(),
            disabled_components,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if tab != self.current_tab {
            debug!(tab = tab.title(), "switched tab");
            self.current_tab = tab;
            self.selected_field = 0;
            self.selected_slice = 0;
        }
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_index = tabs
            .iter()
            .position(|&t| t == self.current_tab)
            .unwrap_or(0);
        self.set_tab(tabs[(current_index + 1) % tabs.len()]);
    }

    pub fn previous_tab(&mut self) {
        let tabs = Tab::all();
        let current_index = tabs
            .iter()
            .position(|&t| t == self.current_tab)
            .unwrap_or(0);
        self.set_tab(tabs[(current_index + tabs.len() - 1) % tabs.len()]);
    }

    /// Input fields shown on the current tab.
    pub fn fields(&self) -> Vec<Field> {
        match self.current_tab {
            Tab::Conditions => self.session.visible_conditions_fields(),
            Tab::Expenses => Field::EXPENSES.to_vec(),
            Tab::Result => Vec::new(),
        }
    }

    pub fn selected(&self) -> Option<Field> {
        let fields = self.fields();
        let last = fields.len().checked_sub(1)?;
        fields.get(self.selected_field.min(last)).copied()
    }

    pub fn select_next(&mut self) {
        if self.current_tab == Tab::Result {
            let slices = self.session.chart().slices().len();
            if self.selected_slice < slices.saturating_sub(1) {
                self.selected_slice += 1;
            }
        } else if self.selected_field < self.fields().len().saturating_sub(1) {
            self.selected_field += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.current_tab == Tab::Result {
            self.selected_slice = self.selected_slice.saturating_sub(1);
        } else {
            self.selected_field = self.selected_field.saturating_sub(1);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(field) = self.selected() {
            self.session.toggle(field);
            // Hiding a gated field may leave the cursor past the end.
            self.selected_field = self
                .selected_field
                .min(self.fields().len().saturating_sub(1));
        }
    }

    pub fn step_selected(&mut self, up: bool) {
        if let Some(field) = self.selected() {
            if !field.is_toggle() {
                self.session.step(field, up);
            }
        }
    }

    pub fn enter_edit_mode(&mut self) {
        let Some(field) = self.selected() else {
            return;
        };
        if field.is_toggle() {
            self.toggle_selected();
            return;
        }
        if let FieldValue::Number(value) = self.session.value(field) {
            self.mode = AppMode::Edit;
            self.edit_input = format!("{value:.0}");
        }
    }

    pub fn exit_edit_mode(&mut self) {
        self.mode = AppMode::Normal;
        self.edit_input.clear();
    }

    pub fn save_edit(&mut self) -> Result<f64, ValidationError> {
        let field = self.selected().ok_or(ValidationError::AmountRequired)?;
        let stored = self.session.parse_and_set(field, &self.edit_input)?;
        info!(field = field.label(), value = stored, "updated field");
        self.exit_edit_mode();
        Ok(stored)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        // Any key dismisses the error popup.
        if self.error_message.take().is_some() {
            return;
        }

        match self.mode {
            AppMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                // Vim navigation - hjkl
                KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                    self.previous_tab();
                }
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                    self.next_tab();
                }
                KeyCode::Char('j') | KeyCode::Down => self.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
                KeyCode::Char(' ') => self.toggle_selected(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.step_selected(true),
                KeyCode::Char('-') => self.step_selected(false),
                KeyCode::Char('e') | KeyCode::Enter => self.enter_edit_mode(),
                KeyCode::Char('1') => self.set_tab(Tab::Conditions),
                KeyCode::Char('2') => self.set_tab(Tab::Expenses),
                KeyCode::Char('3') => self.set_tab(Tab::Result),
                _ => {}
            },
            AppMode::Edit => match code {
                KeyCode::Esc => {
                    self.exit_edit_mode();
                }
                KeyCode::Enter => {
                    if let Err(e) = self.save_edit() {
                        self.error_message = Some(e.to_string());
                        self.exit_edit_mode();
                    }
                }
                KeyCode::Backspace => {
                    self.edit_input.pop();
                }
                KeyCode::Char(c) => {
                    if c.is_ascii_digit() {
                        self.edit_input.push(c);
                    }
                }
                _ => {}
            },
        }
    }
}

pub fn run_tui(mut app: App, tab: Option<Tab>) -> eyre::Result<()> {
    if let Some(tab) = tab {
        app.current_tab = tab;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Every edit is followed by a full redraw, which recomputes the tab.
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = if app.disabled_components.is_disabled(Component::TabBar) {
        vec![f.area()]
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(f.area())
            .to_vec()
    };

    if !app.disabled_components.is_disabled(Component::TabBar) {
        let tab_titles: Vec<Line> = Tab::all()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let style = if *t == app.current_tab {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!("{} {}", i + 1, t.title()), style))
            })
            .collect();

        let tabs = Tabs::new(tab_titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Net worth at the end of your studies"),
            )
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow))
            .select(
                Tab::all()
                    .iter()
                    .position(|&t| t == app.current_tab)
                    .unwrap_or(0),
            );

        f.render_widget(tabs, chunks[0]);
    }

    let content_area = chunks[chunks.len() - 1];

    let content_area = if app.disabled_components.is_disabled(Component::Help) {
        content_area
    } else {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(content_area);
        render_help(f, split[1], app);
        split[0]
    };

    match app.current_tab {
        Tab::Conditions => render_conditions(f, content_area, app),
        Tab::Expenses => render_expenses(f, content_area, app),
        Tab::Result => render_result(f, content_area, app),
    }

    if app.mode == AppMode::Edit {
        render_edit_dialog(f, app);
    }

    if let Some(error) = &app.error_message {
        render_error_popup(f, error);
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Success => Color::Green,
        Level::Info => Color::Cyan,
        Level::Warning => Color::Yellow,
        Level::Error => Color::Red,
    }
}

fn message_line(message: &Message) -> Line<'static> {
    Line::from(Span::styled(
        message.text.clone(),
        Style::default().fg(level_color(message.level)),
    ))
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let help_text = Paragraph::new(app.current_tab.help())
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(help_text, area);
}

fn format_field_value(field: Field, value: FieldValue, currency: &str) -> String {
    match value {
        FieldValue::Flag(true) => "[x] yes".to_string(),
        FieldValue::Flag(false) => "[ ] no".to_string(),
        FieldValue::Number(years) if field == Field::StudyYears => format!("< {years:.0} >"),
        FieldValue::Number(amount) => format_money(amount, currency),
    }
}

fn format_bounds(field: Field, currency: &str) -> String {
    match field.kind() {
        FieldKind::Toggle => String::new(),
        FieldKind::Number {
            min,
            max: Some(max),
            ..
        } if field == Field::StudyYears => format!("{min:.0}-{max:.0}"),
        FieldKind::Number {
            min,
            max: Some(max),
            ..
        } => format!(
            "{}-{}",
            format_money(min, currency),
            format_money(max, currency)
        ),
        FieldKind::Number { min, max: None, .. } => format!(
            "{}-{}",
            format_money(min, currency),
            format_money(MAX_AMOUNT, currency)
        ),
    }
}

fn render_fields(f: &mut Frame, area: Rect, app: &App, title: &str) {
    let header_cells = ["Field", "Value", "Range"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let selected = app.selected();
    let rows = app.fields().into_iter().map(|field| {
        let row_style = if Some(field) == selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        // Amounts revealed by a toggle are indented under it.
        let label = if field.gate().is_some() {
            format!("  {}", field.label())
        } else {
            field.label().to_string()
        };

        Row::new(vec![
            Cell::from(label),
            Cell::from(format_field_value(
                field,
                app.session.value(field),
                &app.currency,
            )),
            Cell::from(format_bounds(field, &app.currency))
                .style(Style::default().fg(Color::Gray)),
        ])
        .height(1)
        .style(row_style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(55),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    .style(Style::default().fg(Color::White));

    f.render_widget(table, area);
}

fn render_hint(f: &mut Frame, area: Rect, hint: &str) {
    let paragraph = Paragraph::new(hint)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_conditions(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    render_fields(f, chunks[0], app, "Your study conditions");
    render_hint(f, chunks[1], CONDITIONS_HINT);
}

fn render_expenses(f: &mut Frame, area: Rect, app: &App) {
    let warnings = app.session.warnings();
    let warning_lines: Vec<Line> = if warnings.is_empty() {
        vec![Line::from(Span::styled(
            "No category is above its average.",
            Style::default().fg(Color::Green),
        ))]
    } else {
        warnings
            .iter()
            .map(|w| {
                Line::from(Span::styled(
                    format!("! {}", w.message(&app.currency)),
                    Style::default().fg(Color::Yellow),
                ))
            })
            .collect()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(warning_lines.len() as u16 + 2),
            Constraint::Length(3),
        ])
        .split(area);

    let conditions = app.session.conditions();
    let rent_line = if conditions.pays_rent() || conditions.receives_rent_aid() {
        format!(
            "Rent after aid: {} (rent {} - rent aid {})",
            format_money(conditions.effective_rent(), &app.currency),
            format_money(conditions.rent(), &app.currency),
            format_money(conditions.rent_aid(), &app.currency),
        )
    } else {
        "No rent to pay.".to_string()
    };
    let rent = Paragraph::new(rent_line)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title("Housing"));
    f.render_widget(rent, chunks[0]);

    render_fields(f, chunks[1], app, "Average monthly expenses");

    let warnings_widget = Paragraph::new(warning_lines)
        .block(Block::default().borders(Borders::ALL).title("Warnings"))
        .wrap(Wrap { trim: true });
    f.render_widget(warnings_widget, chunks[2]);

    render_hint(f, chunks[3], EXPENSES_HINT);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.session.summary(app.hypothetical_part_time);
    let chart = app.session.chart();
    let outcome = report::outcome_messages(&summary, &app.currency);

    let mut constraints = Vec::new();
    if !app.disabled_components.is_disabled(Component::MagicNumber) {
        constraints.push(Constraint::Length(7));
    }
    constraints.push(Constraint::Length(outcome.len() as u16 + 2));
    constraints.push(Constraint::Min(8));
    if summary.alternative.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut chunk_index = 0;

    if !app.disabled_components.is_disabled(Component::MagicNumber) {
        let color = if summary.is_saving() {
            Color::Green
        } else {
            Color::Red
        };
        let sign = if summary.final_net_worth < 0.0 { "-" } else { "" };
        let magic = format!("{sign}{}", format_grouped(summary.final_net_worth.round()));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Your magic number: net worth after {} months ({})",
                summary.total_months, app.currency
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(chunks[chunk_index]);
        f.render_widget(block, chunks[chunk_index]);

        // Quadrant pixels draw each character four cells wide.
        let big_text_width = magic.len() as u16 * 4;
        let centered_area = if big_text_width < inner.width {
            let margin = (inner.width - big_text_width) / 2;
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(margin),
                    Constraint::Min(0),
                    Constraint::Length(margin),
                ])
                .split(inner)[1]
        } else {
            inner
        };

        let big_text = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .lines(vec![magic.into()])
            .build();
        f.render_widget(big_text, centered_area);
        chunk_index += 1;
    }

    let outcome_widget = Paragraph::new(outcome.iter().map(message_line).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Outcome"))
        .wrap(Wrap { trim: true });
    f.render_widget(outcome_widget, chunks[chunk_index]);
    chunk_index += 1;

    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[chunk_index]);
    render_expense_chart(f, chart_chunks[0], &chart, app.selected_slice);
    render_slice_details(f, chart_chunks[1], &chart, app);
    chunk_index += 1;

    if let Some(scenario) = &summary.alternative {
        let message = report::what_if_message(scenario, &app.currency);
        let what_if = Paragraph::new(message_line(&message))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(report::what_if_title(scenario, &app.currency)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(what_if, chunks[chunk_index]);
        chunk_index += 1;
    }

    let disclaimer = Paragraph::new(DISCLAIMER)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(disclaimer, chunks[chunk_index]);
}

/// Sample points of the donut ring, grouped by the slice they fall in.
fn donut_points(chart: &ChartData) -> Vec<Vec<(f64, f64)>> {
    let mut points = vec![Vec::new(); chart.slices().len()];
    let steps = (2.0 / DONUT_STEP) as i32;

    for i in 0..=steps {
        for j in 0..=steps {
            let x = -1.0 + f64::from(i) * DONUT_STEP;
            let y = -1.0 + f64::from(j) * DONUT_STEP;
            if let Some(index) = chart.slice_at(x, y) {
                points[index].push((x, y));
            }
        }
    }
    points
}

/// Largest area with a 2:1 cell ratio, which draws a round circle.
fn square_area(area: Rect) -> Rect {
    let width = area.width.min(area.height * 2);
    let height = area.height.min(area.width / 2);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_expense_chart(f: &mut Frame, area: Rect, chart: &ChartData, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Expense distribution");

    if chart.is_empty() {
        let notice = Paragraph::new(message_line(&report::chart_fallback()))
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(notice, area);
        return;
    }

    let inner = block.inner(area).inner(Margin {
        horizontal: MARGIN,
        vertical: MARGIN,
    });
    f.render_widget(block, area);

    let canvas_area = square_area(inner);
    if canvas_area.width == 0 || canvas_area.height == 0 {
        return;
    }

    let points = donut_points(chart);
    // One terminal cell, in canvas units.
    let cell_width = 2.0 / f64::from(canvas_area.width);
    let labels: Vec<(f64, f64, String, Style)> = chart
        .slices()
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let (x, y) = slice.label_anchor();
            let label = slice.label();
            let style = if i == selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let x = x - label.chars().count() as f64 / 2.0 * cell_width;
            (x, y, label, style)
        })
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (i, coords) in points.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: SLICE_COLORS[i % SLICE_COLORS.len()],
                });
            }
            ctx.layer();
            for (x, y, label, style) in &labels {
                ctx.print(*x, *y, Span::styled(label.clone(), *style));
            }
        });

    f.render_widget(canvas, canvas_area);
}

fn render_slice_details(f: &mut Frame, area: Rect, chart: &ChartData, app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        CHART_CAPTION,
        Style::default().fg(Color::Gray),
    ))];

    let slices = chart.slices();
    if let Some(slice) = slices.get(app.selected_slice.min(slices.len().saturating_sub(1))) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            slice.tooltip(&app.currency),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Selected slice"))
        .wrap(Wrap { trim: true });
    f.render_widget(details, area);
}

fn render_edit_dialog(f: &mut Frame, app: &App) {
    let Some(field) = app.selected() else {
        return;
    };

    let popup_area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, popup_area);

    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Field name
            Constraint::Length(3), // Input
            Constraint::Length(2), // Preview
            Constraint::Length(2), // Instructions
        ])
        .margin(1)
        .split(popup_area);

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Edit value ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    f.render_widget(main_block, popup_area);

    let info = Paragraph::new(format!(
        "{} ({})",
        field.label(),
        format_bounds(field, &app.currency)
    ))
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    f.render_widget(info, popup_layout[0]);

    let input_field = Paragraph::new(format!("{}_", app.edit_input))
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" New value "),
        );
    f.render_widget(input_field, popup_layout[1]);

    // Preview what will actually be stored once bounds apply.
    let (preview_text, preview_style) = match crate::error::parse_amount(&app.edit_input) {
        Ok(value) => {
            let stored = field.clamp(value);
            let shown = format_field_value(field, FieldValue::Number(stored), &app.currency);
            let text = if stored == value {
                format!("Will be stored as {shown}")
            } else {
                format!("Out of range, will be stored as {shown}")
            };
            (text, Style::default().fg(Color::Green))
        }
        Err(e) => (e.to_string(), Style::default().fg(Color::Yellow)),
    };
    let preview = Paragraph::new(preview_text)
        .style(preview_style)
        .alignment(Alignment::Center);
    f.render_widget(preview, popup_layout[2]);

    let instructions = Paragraph::new("Enter: Save | Esc: Cancel | Type a whole number")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    f.render_widget(instructions, popup_layout[3]);
}

fn render_error_popup(f: &mut Frame, error: &str) {
    let popup_area = centered_rect(60, 20, f.area());
    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
