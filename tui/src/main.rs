//! SWASTHA — interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  SWASTHA GUIDE   [1] Dashboard  [2] Appointments  [3] Chat          │
//!   ├─── body ────────────────────────────────────────────────────────────┤
//!   │  login form, or the selected tab                                    │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  status line (notices, errors)                                      │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! Usage: `swastha-tui [CONFIG.toml]`

use std::{
    io,
    path::Path,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use swastha_contracts::{
    appointment::{Appointment, AppointmentStatus},
    chat::{Author, ChatMessage},
    error::SwasthaResult,
    profile::UserProfile,
};
use swastha_core::{
    assistant::{ChatSession, PendingBooking, PendingReply},
    config::SwasthaConfig,
    location::ConfiguredLocation,
    schedule::{partition, recent},
    session,
    traits::SessionStore,
};
use swastha_store::JsonFileStore;
use swastha_triage::SymptomClassifier;

// ── Domain types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dashboard,
    Appointments,
    Chat,
}

impl Tab {
    fn name(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Appointments => "Appointments",
            Tab::Chat => "Chat",
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Appointments,
            Tab::Appointments => Tab::Chat,
            Tab::Chat => Tab::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

/// One line in the status bar.
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    color: Color,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: Color::Green }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: Color::Red }
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    config: SwasthaConfig,
    store: JsonFileStore,
    locator: ConfiguredLocation,

    // `None` shows the login placeholder.
    profile: Option<UserProfile>,
    tab: Tab,

    // Login form.
    email: String,
    password: String,
    login_field: LoginField,

    // Index into the upcoming bucket on the Appointments tab.
    selected: usize,

    // Chat. A fresh session per signed-in user.
    classifier: SymptomClassifier,
    chat: ChatSession,
    input: String,
    // Simulated delays: each value is released once its deadline passes.
    pending_reply: Option<(PendingReply, Instant)>,
    pending_booking: Option<(PendingBooking, Instant)>,
    redirect_at: Option<Instant>,

    notice: Option<Notice>,
    started: Instant,
}

impl App {
    fn new(config: SwasthaConfig) -> SwasthaResult<Self> {
        let store = JsonFileStore::new(&config.storage.data_dir, &config.storage.key);
        let locator = ConfiguredLocation::from_config(&config.location)?;
        let classifier = config.classifier()?;
        let chat = ChatSession::new(classifier.clone(), Utc::now());
        let profile = session::open_dashboard(&store, Utc::now())?;

        Ok(Self {
            config,
            store,
            locator,
            profile,
            tab: Tab::Dashboard,
            email: String::new(),
            password: String::new(),
            login_field: LoginField::Email,
            selected: 0,
            classifier,
            chat,
            input: String::new(),
            pending_reply: None,
            pending_booking: None,
            redirect_at: None,
            notice: None,
            started: Instant::now(),
        })
    }

    /// Something is waiting on a deadline.
    fn busy(&self) -> bool {
        self.pending_reply.is_some() || self.pending_booking.is_some() || self.redirect_at.is_some()
    }

    fn report<T>(&mut self, result: SwasthaResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                None
            }
        }
    }

    // ── Login ─────────────────────────────────────────────────────────────────

    fn submit_login(&mut self) {
        let logged_in = session::login(&self.store, &self.email, &self.password)
            .and_then(|_| session::open_dashboard(&self.store, Utc::now()));
        if let Some(profile) = self.report(logged_in) {
            self.reset_chat();
            self.profile = profile;
            self.tab = Tab::Dashboard;
            self.selected = 0;
            self.password.clear();
            self.notice = Some(Notice::info("Login successful! Welcome back to SWASTHA GUIDE."));
        }
    }

    fn logout(&mut self) {
        if self.report(session::logout(&self.store)).is_some() {
            self.profile = None;
            self.reset_chat();
            self.notice = Some(Notice::info("Signed out."));
        }
    }

    /// Drop the conversation and anything still waiting on a deadline.
    fn reset_chat(&mut self) {
        self.chat = ChatSession::new(self.classifier.clone(), Utc::now());
        self.input.clear();
        self.pending_reply = None;
        self.pending_booking = None;
        self.redirect_at = None;
    }

    // ── Appointments ──────────────────────────────────────────────────────────

    fn upcoming_count(&self) -> usize {
        self.profile
            .as_ref()
            .map(|p| partition(Utc::now(), &p.appointments).upcoming.len())
            .unwrap_or(0)
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.upcoming_count();
        if count == 0 {
            self.selected = 0;
        } else if down {
            self.selected = (self.selected + 1).min(count - 1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    fn cancel_selected(&mut self) {
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        let Some(id) = partition(Utc::now(), &profile.appointments)
            .upcoming
            .get(self.selected)
            .map(|a| a.id.clone())
        else {
            return;
        };

        match session::cancel_and_save(&self.store, profile, &id) {
            Ok(true) => self.notice = Some(Notice::info(format!("Appointment {} cancelled.", id))),
            Ok(false) => {}
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
        self.move_selection(false);
    }

    // ── Chat ──────────────────────────────────────────────────────────────────

    fn send_message(&mut self) {
        // One reply in flight at a time.
        if self.pending_reply.is_some() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        if let Some(reply) = self.chat.submit(&text, Utc::now()) {
            let due = Instant::now() + self.config.assistant.thinking_delay();
            self.pending_reply = Some((reply, due));
        }
    }

    fn allow_location(&mut self) {
        if !self.chat.location_prompt_visible() || self.pending_booking.is_some() {
            return;
        }
        match self.chat.request_booking(&self.locator) {
            Ok(pending) => {
                let due = Instant::now() + self.config.assistant.booking_delay();
                self.pending_booking = Some((pending, due));
                self.notice = Some(Notice::info("Searching for the nearest hospital..."));
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    fn dismiss_location(&mut self) {
        if self.pending_booking.is_none() {
            self.chat.dismiss_location_prompt();
        }
    }

    /// Release whatever has come due.
    fn on_tick(&mut self, now: Instant) {
        if self.pending_reply.as_ref().is_some_and(|(_, due)| now >= *due) {
            if let Some((reply, _)) = self.pending_reply.take() {
                self.chat.deliver(reply, Utc::now());
            }
        }

        if self.pending_booking.as_ref().is_some_and(|(_, due)| now >= *due) {
            if let Some((pending, _)) = self.pending_booking.take() {
                self.finish_booking(pending, now);
            }
        }

        if self.redirect_at.is_some_and(|due| now >= due) {
            self.redirect_at = None;
            self.tab = Tab::Dashboard;
        }
    }

    fn finish_booking(&mut self, pending: PendingBooking, now: Instant) {
        let Some(profile) = self.profile.as_mut() else {
            self.chat.dismiss_location_prompt();
            self.notice = Some(Notice::error("Booking abandoned: nobody is signed in."));
            return;
        };
        self.chat.complete_booking(pending, profile, Utc::now());

        match self.store.save(profile) {
            Ok(()) => {
                self.notice = Some(Notice::info(
                    "Appointment booked successfully! Check your dashboard for appointment details.",
                ));
                self.redirect_at = Some(now + self.config.assistant.redirect_delay());
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // body
            Constraint::Length(3), // status
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    match (&app.profile, app.tab) {
        (None, _) => render_login(f, outer_chunks[1], app),
        (Some(profile), Tab::Dashboard) => render_dashboard(f, outer_chunks[1], profile),
        (Some(profile), Tab::Appointments) => render_appointments(f, outer_chunks[1], app, profile),
        (Some(_), Tab::Chat) => render_chat(f, outer_chunks[1], app),
    }

    render_status(f, outer_chunks[2], app);
    render_footer(f, outer_chunks[3], app);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("SWASTHA GUIDE    ", title_style)];

    if app.profile.is_some() {
        let tabs = [("[1]", Tab::Dashboard), ("[2]", Tab::Appointments), ("[3]", Tab::Chat)];
        for (key, tab) in &tabs {
            let style = if app.tab == *tab {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!("{} {}  ", key, tab.name()), style));
        }
    } else {
        spans.push(Span::styled("Sign in", Style::default().fg(Color::White)));
    }

    let header = Paragraph::new(Line::from(spans)).block(panel(""));
    f.render_widget(header, area);
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let field = |label: &str, value: String, active: bool| {
        let marker = if active { "▸ " } else { "  " };
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(format!("{}{:<10}", marker, label), style),
            Span::raw(value),
        ])
    };

    let masked = "•".repeat(app.password.chars().count());
    let lines = vec![
        Line::from(Span::styled(
            "Welcome to SWASTHA GUIDE",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Sign in with any email and password.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        field("Email", app.email.clone(), app.login_field == LoginField::Email),
        field("Password", masked, app.login_field == LoginField::Password),
    ];

    f.render_widget(Paragraph::new(lines).block(panel(" Login ")), area);
}

fn render_dashboard(f: &mut Frame, area: Rect, profile: &UserProfile) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(area);

    let info = vec![
        Line::from(Span::styled(
            format!("Welcome back, {}", profile.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(Color::DarkGray)),
            Span::raw(profile.email.clone()),
        ]),
        Line::from(vec![
            Span::styled("Age:   ", Style::default().fg(Color::DarkGray)),
            Span::raw(profile.age.to_string()),
        ]),
    ];
    f.render_widget(Paragraph::new(info).block(panel(" Profile ")), chunks[0]);

    let shown = recent(profile, 3);
    let items: Vec<ListItem> = if shown.is_empty() {
        vec![ListItem::new(Span::styled(
            "No appointments yet. Start a chat to book one.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        shown.iter().map(summary_item).collect()
    };
    f.render_widget(List::new(items).block(panel(" Recent Appointments ")), chunks[1]);
}

fn render_appointments(f: &mut Frame, area: Rect, app: &App, profile: &UserProfile) {
    let split = partition(Utc::now(), &profile.appointments);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let upcoming_title = format!(" Upcoming Appointments ({}) ", split.upcoming.len());
    if split.upcoming.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No upcoming appointments",
            Style::default().fg(Color::DarkGray),
        ))
        .block(panel(&upcoming_title));
        f.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = split.upcoming.iter().map(|a| detail_item(a)).collect();
        let list = List::new(items)
            .block(panel(&upcoming_title))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(app.selected.min(split.upcoming.len() - 1)));
        f.render_stateful_widget(list, chunks[0], &mut state);
    }

    let past_title = format!(" Past Appointments ({}) ", split.past.len());
    let items: Vec<ListItem> = if split.past.is_empty() {
        vec![ListItem::new(Span::styled(
            "No past appointments",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        split.past.iter().map(|a| summary_item(a)).collect()
    };
    f.render_widget(List::new(items).block(panel(&past_title)), chunks[1]);
}

fn render_chat(f: &mut Frame, area: Rect, app: &App) {
    let prompt_height = if app.chat.location_prompt_visible() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(prompt_height),
            Constraint::Length(3),
        ])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.chat.transcript() {
        push_message(&mut lines, message);
    }
    if app.pending_reply.is_some() {
        let dots = ".".repeat(1 + (app.started.elapsed().as_millis() / 400 % 3) as usize);
        lines.push(Line::from(Span::styled(
            format!("Assistant is typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest message in view.
    let inner_width = chunks[0].width.saturating_sub(2).max(1) as usize;
    let inner_height = chunks[0].height.saturating_sub(2) as usize;
    let total: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(inner_width))
        .sum();
    let scroll = total.saturating_sub(inner_height).min(u16::MAX as usize) as u16;

    let transcript = Paragraph::new(lines)
        .block(panel(" AI Health Assistant "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(transcript, chunks[0]);

    if app.chat.location_prompt_visible() {
        let body = if app.pending_booking.is_some() {
            Line::from(Span::styled(
                "Searching for the nearest hospital...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::raw("Share your location to book the nearest hospital?  "),
                Span::styled("[Ctrl-A] ", Style::default().fg(Color::Cyan)),
                Span::raw("Allow  "),
                Span::styled("[Esc] ", Style::default().fg(Color::Cyan)),
                Span::raw("Not now"),
            ])
        };
        let prompt = Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Emergency booking ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(prompt, chunks[1]);
    }

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(app.input.clone()),
    ]))
    .block(panel(" Describe your symptoms "));
    f.render_widget(input, chunks[2]);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(notice.text.clone(), Style::default().fg(notice.color))),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line).block(panel(" Status ")), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));

    let mut spans: Vec<Span> = Vec::new();
    match (&app.profile, app.tab) {
        (None, _) => {
            spans.extend([key(" [Tab] "), Span::raw("Next field  "), key("[Enter] "), Span::raw("Sign in  ")]);
            spans.extend([key("[Esc] "), Span::raw("Quit")]);
        }
        (Some(_), Tab::Chat) => {
            spans.extend([key(" [Tab] "), Span::raw("Next tab  "), key("[Enter] "), Span::raw("Send  ")]);
            if app.chat.location_prompt_visible() {
                spans.extend([key("[Ctrl-A] "), Span::raw("Allow location  "), key("[Esc] "), Span::raw("Not now  ")]);
            }
            spans.extend([key("[Ctrl-C] "), Span::raw("Quit")]);
        }
        (Some(_), tab) => {
            spans.extend([key(" [1-3] "), Span::raw("Select tab  ")]);
            if tab == Tab::Appointments {
                spans.extend([key("[↑/↓] "), Span::raw("Select  "), key("[x] "), Span::raw("Cancel  ")]);
            }
            spans.extend([key("[l] "), Span::raw("Logout  "), key("[q] "), Span::raw("Quit")]);
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(panel("")), area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn status_color(status: AppointmentStatus) -> Color {
    match status {
        AppointmentStatus::Confirmed => Color::Green,
        AppointmentStatus::Pending => Color::Yellow,
        AppointmentStatus::Cancelled => Color::Red,
    }
}

fn format_when(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%a, %b %-d %Y at %I:%M %p").to_string()
}

fn summary_item(appointment: &Appointment) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                appointment.hospital_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                appointment.status.label(),
                Style::default().fg(status_color(appointment.status)),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {} | {}", format_when(appointment.scheduled_at), appointment.reason_text),
            Style::default().fg(Color::Gray),
        )),
    ])
}

fn detail_item(appointment: &Appointment) -> ListItem<'static> {
    let dim = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                appointment.hospital_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                appointment.status.label(),
                Style::default().fg(status_color(appointment.status)),
            ),
        ]),
        Line::from(Span::styled(format!("  {}", format_when(appointment.scheduled_at)), dim)),
    ];
    if let Some(address) = &appointment.address {
        lines.push(Line::from(Span::styled(format!("  {}", address), dim)));
    }
    if let Some(phone) = &appointment.phone {
        lines.push(Line::from(Span::styled(format!("  {}", phone), dim)));
    }
    lines.push(Line::from(Span::styled(format!("  Reason: {}", appointment.reason_text), dim)));
    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn push_message(lines: &mut Vec<Line<'static>>, message: &ChatMessage) {
    let (who, color) = match message.author {
        Author::User => ("You", Color::Cyan),
        Author::Assistant if message.is_serious() => ("Assistant", Color::Red),
        Author::Assistant => ("Assistant", Color::Green),
    };
    let stamp = message.created_at.with_timezone(&Local).format("%H:%M");
    lines.push(Line::from(vec![
        Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", stamp), Style::default().fg(Color::DarkGray)),
    ]));
    for text in message.text.lines() {
        lines.push(Line::from(format!("  {}", text)));
    }
    lines.push(Line::from(""));
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn load_app() -> SwasthaResult<App> {
    let config = match std::env::args().nth(1) {
        Some(path) => SwasthaConfig::from_file(Path::new(&path))?,
        None => SwasthaConfig::default(),
    };
    App::new(config)
}

fn main() -> io::Result<()> {
    // Config and store problems are reported before the screen is taken over.
    let mut app = match load_app() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    // Tick interval while a delay is running; also drives the typing dots.
    const TICK_MS: u64 = 100;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        let timeout = if app.busy() {
            Duration::from_millis(TICK_MS)
        } else {
            Duration::from_millis(250)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl && key.code == KeyCode::Char('c') {
                    break;
                }

                match (app.profile.is_some(), app.tab) {
                    // Login placeholder.
                    (false, _) => match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                            app.login_field = match app.login_field {
                                LoginField::Email => LoginField::Password,
                                LoginField::Password => LoginField::Email,
                            };
                        }
                        KeyCode::Enter => app.submit_login(),
                        KeyCode::Backspace => {
                            match app.login_field {
                                LoginField::Email => app.email.pop(),
                                LoginField::Password => app.password.pop(),
                            };
                        }
                        KeyCode::Char(c) => match app.login_field {
                            LoginField::Email => app.email.push(c),
                            LoginField::Password => app.password.push(c),
                        },
                        _ => {}
                    },

                    // Chat: printable keys go to the input line.
                    (true, Tab::Chat) => match key.code {
                        KeyCode::Char('a') if ctrl => app.allow_location(),
                        KeyCode::Esc => app.dismiss_location(),
                        KeyCode::Tab => app.tab = app.tab.next(),
                        KeyCode::Enter => app.send_message(),
                        KeyCode::Backspace => {
                            app.input.pop();
                        }
                        KeyCode::Char(c) if !ctrl => app.input.push(c),
                        _ => {}
                    },

                    (true, _) => match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('1') => app.tab = Tab::Dashboard,
                        KeyCode::Char('2') => app.tab = Tab::Appointments,
                        KeyCode::Char('3') => app.tab = Tab::Chat,
                        KeyCode::Tab => app.tab = app.tab.next(),
                        KeyCode::Char('l') | KeyCode::Char('L') => app.logout(),
                        KeyCode::Up if app.tab == Tab::Appointments => app.move_selection(false),
                        KeyCode::Down if app.tab == Tab::Appointments => app.move_selection(true),
                        KeyCode::Char('x') | KeyCode::Char('X') if app.tab == Tab::Appointments => {
                            app.cancel_selected()
                        }
                        _ => {}
                    },
                }
            }
        }

        app.on_tick(Instant::now());
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
