use crate::catalog::EmissionCatalog;
use crate::ledger::{FootprintLedger, FootprintRecord};
use crate::session::{CalcOutcome, CalcSession};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Calculator,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingSearch,
    EditingQuantity,
    EditingDate,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Calculator => Page::History,
            Page::History => Page::Calculator,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Calculator => Page::History,
            Page::History => Page::Calculator,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Calculator => "Calculator",
            Page::History => "History",
        }
    }
}

pub struct App {
    pub catalog: EmissionCatalog,
    pub ledger: FootprintLedger,
    pub session: CalcSession,
    pub current_page: Page,
    pub input_mode: InputMode,
    pub search: String,
    pub matches: Vec<String>,
    pub list_state: ListState,
    pub quantity_input: String,
    pub date_input: String,
    pub outcome: Option<CalcOutcome>,
    pub status: Option<String>,
    pub history: Vec<FootprintRecord>,
    pub history_state: TableState,
}

impl App {
    pub fn new(catalog: EmissionCatalog, ledger: FootprintLedger) -> Self {
        let session = CalcSession::new();
        let date_input = session.date().to_string();

        let mut app = Self {
            catalog,
            ledger,
            session,
            current_page: Page::Calculator,
            input_mode: InputMode::Normal,
            search: String::new(),
            matches: Vec::new(),
            list_state: ListState::default(),
            quantity_input: String::new(),
            date_input,
            outcome: None,
            status: None,
            history: Vec::new(),
            history_state: TableState::default(),
        };

        app.refresh_matches();
        app.reload_history();
        app
    }

    /// Rebuild the activity list from the current search text
    pub fn refresh_matches(&mut self) {
        self.matches = if self.search.trim().is_empty() {
            self.catalog.all_activities().map(String::from).collect()
        } else {
            self.catalog
                .search(self.search.trim())
                .map(String::from)
                .collect()
        };

        // Reset selection to first item
        if self.matches.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    /// Re-read the log file; the cursor lands on the newest row
    pub fn reload_history(&mut self) {
        match self.ledger.read_all() {
            Ok(records) => {
                self.history = records;
                if self.history.is_empty() {
                    self.history_state.select(None);
                } else {
                    self.history_state.select(Some(self.history.len() - 1));
                }
            }
            Err(err) => self.status = Some(format!("{:#}", err)),
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next(&mut self) {
        match self.current_page {
            Page::Calculator => {
                let len = self.matches.len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i >= len - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
            }
            Page::History => {
                let len = self.history.len();
                if len == 0 {
                    return;
                }
                let i = match self.history_state.selected() {
                    Some(i) => {
                        if i >= len - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.history_state.select(Some(i));
            }
        }
    }

    pub fn previous(&mut self) {
        match self.current_page {
            Page::Calculator => {
                let len = self.matches.len();
                if len == 0 {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            len - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
            }
            Page::History => {
                let len = self.history.len();
                if len == 0 {
                    return;
                }
                let i = match self.history_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            len - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.history_state.select(Some(i));
            }
        }
    }

    pub fn select_first(&mut self) {
        match self.current_page {
            Page::Calculator => {
                if !self.matches.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            Page::History => {
                if !self.history.is_empty() {
                    self.history_state.select(Some(0));
                }
            }
        }
    }

    pub fn select_last(&mut self) {
        match self.current_page {
            Page::Calculator => {
                if !self.matches.is_empty() {
                    self.list_state.select(Some(self.matches.len() - 1));
                }
            }
            Page::History => {
                if !self.history.is_empty() {
                    self.history_state.select(Some(self.history.len() - 1));
                }
            }
        }
    }

    /// Make the highlighted list row the session's selected activity
    pub fn select_highlighted(&mut self) {
        let name = match self.list_state.selected().and_then(|i| self.matches.get(i)) {
            Some(name) => name.clone(),
            None => return,
        };

        match self.session.select_activity(&self.catalog, &name) {
            Ok(()) => self.status = Some(format!("Selected: {}", name)),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn push_input(&mut self, c: char) {
        match self.input_mode {
            InputMode::Normal => {}
            InputMode::EditingSearch => {
                self.search.push(c);
                self.refresh_matches();
            }
            InputMode::EditingQuantity => self.quantity_input.push(c),
            InputMode::EditingDate => self.date_input.push(c),
        }
    }

    pub fn pop_input(&mut self) {
        match self.input_mode {
            InputMode::Normal => {}
            InputMode::EditingSearch => {
                self.search.pop();
                self.refresh_matches();
            }
            InputMode::EditingQuantity => {
                self.quantity_input.pop();
            }
            InputMode::EditingDate => {
                self.date_input.pop();
            }
        }
    }

    pub fn commit_input(&mut self) {
        match self.input_mode {
            InputMode::Normal | InputMode::EditingSearch => {}
            InputMode::EditingQuantity => self.add_entry_from_input(),
            InputMode::EditingDate => {
                self.session.set_date(self.date_input.clone());
                self.status = Some(format!("Date set to {}", self.session.date()));
            }
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_input(&mut self) {
        match self.input_mode {
            InputMode::Normal => {}
            InputMode::EditingSearch => {
                self.search.clear();
                self.refresh_matches();
            }
            InputMode::EditingQuantity => self.quantity_input.clear(),
            InputMode::EditingDate => {
                // Revert to the date the session actually carries
                self.date_input = self.session.date().to_string();
            }
        }
        self.input_mode = InputMode::Normal;
    }

    /// Turn the quantity buffer into a session entry
    pub fn add_entry_from_input(&mut self) {
        match self.session.add_selected(&self.quantity_input) {
            Ok(true) => {
                if let Some(entry) = self.session.entries().last() {
                    self.status = Some(format!("Added {} = {}", entry.activity, entry.quantity));
                }
                self.quantity_input.clear();
            }
            Ok(false) => self.status = Some("Select an activity first.".to_string()),
            // Keep the buffer so the user can fix the typo
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn remove_last_entry(&mut self) {
        if self.session.is_empty() {
            self.status = Some("Nothing to remove.".to_string());
            return;
        }
        let index = self.session.len() - 1;
        if let Some(entry) = self.session.remove_entry(index) {
            self.status = Some(format!("Removed {}", entry.activity));
        }
    }

    pub fn clear_entries(&mut self) {
        self.session.clear_entries();
        self.outcome = None;
        self.status = Some("Entries cleared.".to_string());
    }

    /// Run the calculation over the session entries and log the result
    pub fn calculate(&mut self) {
        match self.session.calculate(&self.catalog, &self.ledger) {
            Ok(outcome) => {
                self.status = Some(format!("Logged to {}", self.ledger.data_file().display()));
                self.outcome = Some(outcome);
                self.reload_history();
            }
            Err(err) => self.status = Some(format!("{:#}", err)),
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Editing modes grab the keyboard until Enter or Esc
            if app.input_mode != InputMode::Normal {
                match key.code {
                    KeyCode::Enter => app.commit_input(),
                    KeyCode::Esc => app.cancel_input(),
                    KeyCode::Backspace => app.pop_input(),
                    KeyCode::Char(c) => app.push_input(c),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.select_first(),
                KeyCode::End => app.select_last(),
                KeyCode::Enter if app.current_page == Page::Calculator => {
                    app.select_highlighted()
                }
                KeyCode::Char('/') if app.current_page == Page::Calculator => {
                    app.input_mode = InputMode::EditingSearch;
                }
                KeyCode::Char('v') if app.current_page == Page::Calculator => {
                    app.input_mode = InputMode::EditingQuantity;
                }
                KeyCode::Char('d') if app.current_page == Page::Calculator => {
                    app.input_mode = InputMode::EditingDate;
                }
                KeyCode::Char('g') if app.current_page == Page::Calculator => app.calculate(),
                KeyCode::Char('x') if app.current_page == Page::Calculator => {
                    app.remove_last_entry()
                }
                KeyCode::Char('c') if app.current_page == Page::Calculator => app.clear_entries(),
                KeyCode::Char('r') if app.current_page == Page::History => app.reload_history(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    // Header with page navigation
    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Calculator => render_calculator(f, chunks[1], app),
        Page::History => render_history(f, chunks[1], app),
    }

    // Status bar
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Calculator, Page::History];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Date: {}", app.session.date()),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Entries: {}", app.session.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Logged: {}", app.history.len()),
        Style::default().fg(Color::White),
    ));

    let header_text = vec![Line::from(tab_spans)];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_calculator(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Activity picker
            Constraint::Percentage(60), // Session entries and results
        ])
        .split(area);

    render_activity_picker(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Quantity and date inputs
            Constraint::Percentage(40), // Entry table
            Constraint::Min(0),         // Breakdown and tip
        ])
        .split(columns[1]);

    render_input_row(f, right[0], app);
    render_entries(f, right[1], app);
    render_results(f, right[2], app);
}

fn render_activity_picker(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_style = if app.input_mode == InputMode::EditingSearch {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let search = Paragraph::new(app.search.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search (/) "),
    );
    f.render_widget(search, chunks[0]);

    let items: Vec<ListItem> = app
        .matches
        .iter()
        .map(|name| {
            let factor = app.catalog.factor_of(name).unwrap_or(0.0);
            let picked = app.session.selected_activity() == Some(name.as_str());

            let name_style = if picked {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<30}", truncate(name, 30)), name_style),
                Span::styled(
                    format!("{:>8.2}", factor),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Activities ({}) ", app.matches.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, chunks[1], &mut app.list_state);
}

fn render_input_row(f: &mut Frame, area: Rect, app: &App) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // The quantity belongs to whichever activity is currently selected
    let quantity_title = match app.session.selected_activity() {
        Some(name) => format!(" Quantity - {} (v) ", name),
        None => " Quantity (v) ".to_string(),
    };
    let quantity_style = if app.input_mode == InputMode::EditingQuantity {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let quantity = Paragraph::new(app.quantity_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(quantity_style)
            .title(quantity_title),
    );
    f.render_widget(quantity, boxes[0]);

    let date_style = if app.input_mode == InputMode::EditingDate {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let date = Paragraph::new(app.date_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(date_style)
            .title(" Date (d) "),
    );
    f.render_widget(date, boxes[1]);
}

fn render_entries(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Activity", "Quantity"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.session.entries().iter().map(|entry| {
        let cells = vec![
            Cell::from(truncate(&entry.activity, 34)),
            Cell::from(format!("{}", entry.quantity)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(rows, [Constraint::Length(36), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Entries for {} ", app.session.date())),
        );

    f.render_widget(table, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let content = match &app.outcome {
        Some(outcome) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", outcome.summary.headline()),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];

            let total = outcome.summary.grand_total;
            for (label, value) in outcome.chart.labels.iter().zip(&outcome.chart.values) {
                let share = if total > 0.0 { value / total } else { 0.0 };
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<28}", truncate(label, 28))),
                    Span::styled(format!("{:>8.2}  ", value), Style::default().fg(Color::Cyan)),
                    Span::styled(bar(share, 24), Style::default().fg(Color::Green)),
                ]));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Tip: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    outcome.tip,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));

            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No calculation yet. Add entries, then press g.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ],
    };

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Footprint Breakdown "),
    );

    f.render_widget(panel, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Date", "Activity", "Value", "Total (kg CO₂)"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.history.iter().map(|record| {
        let cells = vec![
            Cell::from(record.date.clone()),
            Cell::from(truncate(&record.activity, 30)),
            Cell::from(format!("{}", record.quantity)),
            Cell::from(format!("{:.2}", record.total_footprint))
                .style(Style::default().fg(Color::Cyan)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(32),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(
                " Carbon Footprint Log ({}) ",
                app.ledger.data_file().display()
            )),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.history_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Calculator => (
            app.list_state.selected().map(|i| i + 1).unwrap_or(0),
            app.matches.len(),
        ),
        Page::History => (
            app.history_state.selected().map(|i| i + 1).unwrap_or(0),
            app.history.len(),
        ),
    };

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(message) = &app.status {
        status_spans.push(Span::raw("| "));
        status_spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" "));
    }

    status_spans.push(Span::raw("| "));

    if app.input_mode != InputMode::Normal {
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Confirm | "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Cancel"));
    } else {
        match app.current_page {
            Page::Calculator => {
                status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Select | "));
                status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Search | "));
                status_spans.push(Span::styled("v", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Quantity | "));
                status_spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Date | "));
                status_spans.push(Span::styled("g", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Calculate | "));
                status_spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Undo | "));
                status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Clear | "));
            }
            Page::History => {
                status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Reload | "));
                status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Nav | "));
            }
        }
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

fn bar(share: f64, width: usize) -> String {
    let filled = (share.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}
