//! SWASTHA — Symptom Triage & Appointments Demo CLI
//!
//! Drives the SWASTHA runtime from the command line.  The session record is
//! kept in a JSON file (default `.swastha/user.json`), so commands can be
//! chained: log in once, then browse, cancel and chat.
//!
//! Usage:
//!   cargo run -p demo -- login --email asha@example.com --password secret
//!   cargo run -p demo -- dashboard
//!   cargo run -p demo -- appointments
//!   cargo run -p demo -- cancel app-2
//!   cargo run -p demo -- triage I have a sore throat
//!   cargo run -p demo -- chat --allow-location I have chest pain
//!   cargo run -p demo -- chat            (interactive)
//!   cargo run -p demo -- logout

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
};

use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use swastha_contracts::{
    appointment::{Appointment, AppointmentId},
    chat::{Author, ChatMessage},
    error::SwasthaResult,
    profile::UserProfile,
};
use swastha_core::{
    assistant::ChatSession,
    config::SwasthaConfig,
    location::ConfiguredLocation,
    schedule::{partition, recent},
    session,
    traits::SessionStore,
};
use swastha_store::JsonFileStore;

// ── CLI definition ────────────────────────────────────────────────────────────

/// SWASTHA — keyword symptom triage and appointment tracking.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "SWASTHA symptom triage and appointments demo",
    long_about = "Sign in, review and cancel appointments, and chat with the triage assistant.\n\
                  Serious symptoms lead to a simulated emergency booking."
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the session record (overrides the config file).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Skip the simulated thinking and search delays.
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with any non-empty email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the session record.
    Logout,
    /// Show the profile and the three most recent appointments.
    Dashboard,
    /// List upcoming and past appointments.
    Appointments,
    /// Cancel an appointment by id (unknown ids are ignored).
    Cancel { id: String },
    /// Classify a symptom description without starting a chat.
    Triage {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Talk to the triage assistant.  Interactive when no text is given.
    Chat(ChatArgs),
}

#[derive(Args)]
struct ChatArgs {
    /// Grant location access when booking is offered.
    #[arg(long, conflicts_with = "deny_location")]
    allow_location: bool,

    /// Refuse location access when booking is offered.
    #[arg(long)]
    deny_location: bool,

    text: Vec<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Loaded configuration plus the store it points at.
struct Context {
    config: SwasthaConfig,
    store: JsonFileStore,
}

fn run(cli: Cli) -> SwasthaResult<()> {
    let mut config = match &cli.config {
        Some(path) => SwasthaConfig::from_file(path)?,
        None => SwasthaConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if cli.no_delay {
        config.assistant.thinking_delay_ms = 0;
        config.assistant.booking_delay_ms = 0;
        config.assistant.redirect_delay_ms = 0;
    }

    let store = JsonFileStore::new(&config.storage.data_dir, &config.storage.key);
    let ctx = Context { config, store };

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password),
        Command::Logout => {
            session::logout(&ctx.store)?;
            println!("Signed out.");
            Ok(())
        }
        Command::Dashboard => run_dashboard(&ctx),
        Command::Appointments => run_appointments(&ctx),
        Command::Cancel { id } => run_cancel(&ctx, AppointmentId::new(id)),
        Command::Triage { text } => run_triage(&ctx, &text.join(" ")),
        Command::Chat(args) => run_chat(&ctx, args),
    }
}

// ── Pages ─────────────────────────────────────────────────────────────────────

fn run_login(ctx: &Context, email: &str, password: &str) -> SwasthaResult<()> {
    let profile = session::login(&ctx.store, email, password)?;
    println!("Login successful! Welcome back to SWASTHA GUIDE, {}.", profile.name);
    Ok(())
}

fn run_dashboard(ctx: &Context) -> SwasthaResult<()> {
    let Some(profile) = session::open_dashboard(&ctx.store, Utc::now())? else {
        print_login_redirect();
        return Ok(());
    };

    println!();
    println!("Welcome back, {}", profile.name);
    println!("  Email: {}", profile.email);
    println!("  Age:   {}", profile.age);
    println!();
    println!("Recent Appointments");
    println!("-------------------");
    let shown = recent(&profile, 3);
    if shown.is_empty() {
        println!("  No appointments yet. Start a chat to book one.");
    }
    for appointment in shown {
        println!(
            "  [{}] {} | {} | {}",
            appointment.id,
            appointment.hospital_name,
            appointment.status,
            format_when(appointment.scheduled_at)
        );
    }
    println!();
    Ok(())
}

fn run_appointments(ctx: &Context) -> SwasthaResult<()> {
    let Some(profile) = session::open_dashboard(&ctx.store, Utc::now())? else {
        print_login_redirect();
        return Ok(());
    };

    let split = partition(Utc::now(), &profile.appointments);

    println!();
    println!("Upcoming Appointments ({})", split.upcoming.len());
    println!("------------------------");
    if split.upcoming.is_empty() {
        println!("  No upcoming appointments");
    }
    for appointment in &split.upcoming {
        print_appointment_detail(appointment);
    }

    println!();
    println!("Past Appointments ({})", split.past.len());
    println!("--------------------");
    if split.past.is_empty() {
        println!("  No past appointments");
    }
    for appointment in &split.past {
        println!(
            "  [{}] {} ({}) | {} | {}",
            appointment.id,
            appointment.hospital_name,
            appointment.status,
            appointment.reason_text,
            format_when(appointment.scheduled_at)
        );
    }
    println!();
    Ok(())
}

fn run_cancel(ctx: &Context, id: AppointmentId) -> SwasthaResult<()> {
    let Some(mut profile) = session::open_dashboard(&ctx.store, Utc::now())? else {
        print_login_redirect();
        return Ok(());
    };

    if session::cancel_and_save(&ctx.store, &mut profile, &id)? {
        println!("Appointment {} cancelled.", id);
    }
    Ok(())
}

fn run_triage(ctx: &Context, text: &str) -> SwasthaResult<()> {
    let assessment = ctx.config.classifier()?.classify(text);
    println!("Severity: {}", assessment.severity);
    if let Some(keyword) = &assessment.matched_keyword {
        println!("Matched:  \"{}\"", keyword);
    }
    println!();
    println!("{}", assessment.advisory);
    Ok(())
}

// ── Chat ──────────────────────────────────────────────────────────────────────

/// How to answer the location prompt.
#[derive(Clone, Copy)]
enum LocationAnswer {
    Ask,
    Allow,
    Deny,
}

fn run_chat(ctx: &Context, args: ChatArgs) -> SwasthaResult<()> {
    let answer = if args.allow_location {
        LocationAnswer::Allow
    } else if args.deny_location {
        LocationAnswer::Deny
    } else {
        LocationAnswer::Ask
    };

    let mut chat = ChatSession::new(ctx.config.classifier()?, Utc::now());
    if let Some(greeting) = chat.transcript().first() {
        print_message(greeting);
    }

    if !args.text.is_empty() {
        return converse(ctx, &mut chat, &args.text.join(" "), answer);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "stdin read failed; ending chat");
                break;
            }
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        converse(ctx, &mut chat, line, answer)?;
    }
    Ok(())
}

/// One user turn: submit, wait out the thinking delay, and run the booking
/// flow if the reply raised the location prompt.
fn converse(
    ctx: &Context,
    chat: &mut ChatSession,
    text: &str,
    answer: LocationAnswer,
) -> SwasthaResult<()> {
    let Some(reply) = chat.submit(text, Utc::now()) else {
        return Ok(());
    };

    println!("  (assistant is typing...)");
    thread::sleep(ctx.config.assistant.thinking_delay());
    let message = chat.deliver(reply, Utc::now()).clone();
    print_message(&message);

    // Only the reply just delivered may lead into booking.
    if !message.is_serious() || !chat.location_prompt_visible() {
        return Ok(());
    }

    let mut locator = ConfiguredLocation::from_config(&ctx.config.location)?;
    match answer {
        LocationAnswer::Allow => {}
        LocationAnswer::Deny => locator = locator.denied(),
        LocationAnswer::Ask => {
            if !ask_yes_no("Allow location access to find the nearest hospital? [y/N] ") {
                chat.dismiss_location_prompt();
                return Ok(());
            }
        }
    }

    let pending = match chat.request_booking(&locator) {
        Ok(pending) => pending,
        Err(e) => {
            // Not fatal: report and stop this booking attempt.
            println!("  ! {}", e);
            return Ok(());
        }
    };

    println!("  (searching for the nearest hospital...)");
    thread::sleep(ctx.config.assistant.booking_delay());

    let signed_in = ctx.store.load()?;
    let mut profile = signed_in.clone().unwrap_or_else(guest_profile);
    chat.complete_booking(pending, &mut profile, Utc::now());
    if signed_in.is_some() {
        ctx.store.save(&profile)?;
    } else {
        warn!("booking completed without a signed-in user; appointment not saved");
    }

    if let Some(confirmation) = chat.transcript().last() {
        print_message(confirmation);
    }

    if signed_in.is_some() {
        println!("Appointment booked successfully! Check your dashboard for appointment details.");
        thread::sleep(ctx.config.assistant.redirect_delay());
        run_dashboard(ctx)?;
    } else {
        println!("Sign in to keep appointments between sessions; this one was not saved.");
    }
    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_message(message: &ChatMessage) {
    let who = match message.author {
        Author::User => "You",
        Author::Assistant if message.is_serious() => "Assistant [!]",
        Author::Assistant => "Assistant",
    };
    println!();
    println!("{} ({}):", who, message.created_at.with_timezone(&Local).format("%H:%M:%S"));
    for line in message.text.lines() {
        println!("  {}", line);
    }
    println!();
}

fn print_appointment_detail(appointment: &Appointment) {
    println!();
    println!("  {}  [{}]", appointment.hospital_name, appointment.status);
    println!("    Id:      {}", appointment.id);
    println!("    When:    {}", format_when(appointment.scheduled_at));
    if let Some(address) = &appointment.address {
        println!("    Address: {}", address);
    }
    if let Some(phone) = &appointment.phone {
        println!("    Phone:   {}", phone);
    }
    println!("    Reason:  {}", appointment.reason_text);
}

fn print_login_redirect() {
    println!("No one is signed in.");
    println!("Run `demo login --email <EMAIL> --password <PASSWORD>` first.");
}

fn format_when(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%A, %B %-d, %Y at %I:%M %p")
        .to_string()
}

fn ask_yes_no(question: &str) -> bool {
    print!("{}", question);
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Throwaway record used when booking without a session.
fn guest_profile() -> UserProfile {
    UserProfile {
        id: "guest".to_string(),
        name: "Guest".to_string(),
        email: String::new(),
        age: 0,
        appointments: Vec::new(),
    }
}
