use std::io::{self, Write};

use timetable_tool::{
    EngineConfig, EnrolledCourse, Parity, ScheduleComputation, TermFeed, TimetableEngine,
    display_name, load_config_from_json, load_courses_from_csv, load_courses_from_json,
    entry::weekday_label, load_feed_from_csv, load_feed_from_json, reconcile::parity_label,
    save_config_to_json,
};
use tracing_subscriber::EnvFilter;

struct Session {
    engine: TimetableEngine,
    feed: TermFeed,
    courses: Vec<EnrolledCourse>,
    sdi: Option<i64>,
    last: Option<ScheduleComputation>,
}

impl Session {
    fn new() -> Self {
        Self {
            engine: TimetableEngine::default(),
            feed: TermFeed::default(),
            courses: Vec::new(),
            sdi: None,
            last: None,
        }
    }

    fn parity(&self) -> Option<Parity> {
        Parity::from_optional_identifier(self.sdi)
    }

    fn compute(&mut self) -> &ScheduleComputation {
        let computation = self
            .engine
            .compute(&self.courses, &self.feed.schedule, self.parity());
        self.last.insert(computation)
    }

    /// The last result, computing one first when inputs changed since.
    fn computed(&mut self) -> ScheduleComputation {
        match &self.last {
            Some(computation) => computation.clone(),
            None => self.compute().clone(),
        }
    }

    fn invalidate(&mut self) {
        self.last = None;
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut out = String::from(text);
    if width > len {
        out.push_str(&" ".repeat(width - len));
    }
    out
}

fn render_text_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (i, name) in header.iter().enumerate() {
        out.push(' ');
        out.push_str(&pad(name, widths[i]));
        out.push_str(" |");
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(&pad(cell, widths[ci]));
            out.push_str(" |");
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

/// Weekly grid over the layout. Conflicting cells are prefixed with `!`.
fn render_grid(engine: &TimetableEngine, computation: &ScheduleComputation) -> String {
    let layout = engine.layout();
    let mut header = vec!["Time".to_string()];
    header.extend(layout.days().iter().map(|d| weekday_label(*d).to_string()));

    let mut rows = Vec::with_capacity(layout.slots().len());
    for slot in layout.slots() {
        let mut row = vec![slot.to_string()];
        for day in layout.days() {
            let occupants = computation.grid.occupants(*day, slot);
            let names = occupants
                .iter()
                .map(|o| display_name(&o.entry.course_name))
                .collect::<Vec<_>>()
                .join(" / ");
            if computation.conflicts.cell(*day, slot).is_some() {
                row.push(format!("! {names}"));
            } else {
                row.push(names);
            }
        }
        rows.push(row);
    }
    render_text_table(&header, &rows)
}

fn render_courses(courses: &[EnrolledCourse], computation: Option<&ScheduleComputation>) -> String {
    let header = ["id", "name", "code", "ects", "status", "sessions"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = courses
        .iter()
        .map(|course| {
            let sessions = match computation {
                Some(c) if course.is_current() => {
                    let entries = c.entries_for(course.id);
                    if entries.is_empty() {
                        "No schedule found".to_string()
                    } else {
                        entries
                            .iter()
                            .map(|e| format!("{} {} {}", e.day, e.slot, e.room))
                            .collect::<Vec<_>>()
                            .join("; ")
                    }
                }
                _ => String::new(),
            };
            vec![
                course.id.to_string(),
                course.name.clone(),
                course.code.clone(),
                course.ects.to_string(),
                course.status.to_string(),
                sessions,
            ]
        })
        .collect::<Vec<_>>();
    render_text_table(&header, &rows)
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  feed load <json|csv> <path>        Load the term schedule feed\n  feed show                          Show feed term and row count\n  courses load <json|csv> <path>     Load enrolled course records\n  courses show                       List courses with their matched sessions\n  sdi <number>|clear                 Set or clear the student identifier\n  config load <path>                 Load engine configuration (JSON)\n  config save <path>                 Save engine configuration (JSON)\n  layout show                        Show timetable days and slots\n  compute                            Reconcile courses against the feed\n  show                               Show the weekly grid\n  conflicts                          List conflicting cells\n  unscheduled                        List courses with no schedule\n  summary                            One-line summary of the last run\n  quit|exit                          Exit"
    );
}

fn print_warnings(computation: &ScheduleComputation) {
    for warning in &computation.warnings {
        println!("warning: {}", warning);
    }
}

fn print_conflicts(computation: &ScheduleComputation) {
    if !computation.conflicts.has_conflicts() {
        println!("No conflicts.");
        return;
    }
    for cell in &computation.conflicts.cells {
        let ids = cell
            .course_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "Conflict {} {}: courses {} ({} sessions)",
            cell.day, cell.slot, ids, cell.occupant_count
        );
    }
}

fn print_unscheduled(courses: &[EnrolledCourse], computation: &ScheduleComputation) {
    if computation.unscheduled.is_empty() {
        println!("All current courses are scheduled.");
        return;
    }
    for id in &computation.unscheduled {
        let name = courses
            .iter()
            .find(|c| c.id == *id)
            .map(|c| c.name.as_str())
            .unwrap_or("");
        println!("Unscheduled {id}: {name}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new();

    println!("Timetable Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "feed" => match (parts.next(), parts.next(), parts.next()) {
                (Some("load"), Some(fmt), Some(path)) => {
                    let loaded = match fmt {
                        "json" => load_feed_from_json(path),
                        "csv" => load_feed_from_csv(path),
                        _ => {
                            println!("Usage: feed load <json|csv> <path>");
                            continue;
                        }
                    };
                    match loaded {
                        Ok(feed) => {
                            println!("Feed loaded from {} ({} entries).", path, feed.len());
                            session.feed = feed;
                            session.invalidate();
                        }
                        Err(e) => println!("Error loading feed: {}", e),
                    }
                }
                (Some("show"), _, _) | (None, _, _) => {
                    println!(
                        "Term               : {}",
                        session.feed.term.as_deref().unwrap_or("-")
                    );
                    println!("Entries            : {}", session.feed.len());
                }
                _ => println!("Usage: feed load <json|csv> <path>|show"),
            },
            "courses" => match (parts.next(), parts.next(), parts.next()) {
                (Some("load"), Some(fmt), Some(path)) => {
                    let loaded = match fmt {
                        "json" => load_courses_from_json(path),
                        "csv" => load_courses_from_csv(path),
                        _ => {
                            println!("Usage: courses load <json|csv> <path>");
                            continue;
                        }
                    };
                    match loaded {
                        Ok(courses) => {
                            let current = courses.iter().filter(|c| c.is_current()).count();
                            println!(
                                "Courses loaded from {} ({} total, {} current).",
                                path,
                                courses.len(),
                                current
                            );
                            session.courses = courses;
                            session.invalidate();
                        }
                        Err(e) => println!("Error loading courses: {}", e),
                    }
                }
                (Some("show"), _, _) | (None, _, _) => {
                    let computation = session.last.as_ref();
                    println!("{}", render_courses(&session.courses, computation));
                }
                _ => println!("Usage: courses load <json|csv> <path>|show"),
            },
            "sdi" => match parts.next() {
                Some("clear") => {
                    session.sdi = None;
                    session.invalidate();
                    println!("SDI cleared (group unset).");
                }
                Some(value) => match value.parse::<i64>() {
                    Ok(sdi) => {
                        session.sdi = Some(sdi);
                        session.invalidate();
                        println!("SDI set to {} (group {}).", sdi, parity_label(session.parity()));
                    }
                    Err(_) => println!("Invalid SDI"),
                },
                None => println!(
                    "SDI: {} (group {})",
                    session
                        .sdi
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    parity_label(session.parity())
                ),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("load"), Some(path)) => match load_config_from_json(path) {
                    Ok(config) => match TimetableEngine::from_config(&config) {
                        Ok(engine) => {
                            session.engine = engine;
                            session.invalidate();
                            println!("Config loaded from {}.", path);
                        }
                        Err(e) => println!("Error applying config: {}", e),
                    },
                    Err(e) => println!("Error loading config: {}", e),
                },
                (Some("save"), Some(path)) => {
                    let config: EngineConfig = session.engine.config();
                    match save_config_to_json(&config, path) {
                        Ok(_) => println!("Config saved to {}.", path),
                        Err(e) => println!("Error saving config: {}", e),
                    }
                }
                _ => println!("Usage: config load|save <path>"),
            },
            "layout" => {
                let layout = session.engine.layout();
                let days = layout
                    .days()
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let slots = layout
                    .slots()
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Days               : {}", days);
                println!("Slots              : {}", slots);
            }
            "compute" => {
                let computation = session.compute().clone();
                println!("Computed ({})", computation.summary.to_cli_summary());
                print_warnings(&computation);
                println!("{}", render_grid(&session.engine, &computation));
            }
            "show" => {
                let computation = session.computed();
                println!("{}", render_grid(&session.engine, &computation));
            }
            "conflicts" => {
                let computation = session.computed();
                print_conflicts(&computation);
            }
            "unscheduled" => {
                let computation = session.computed();
                print_unscheduled(&session.courses, &computation);
            }
            "summary" => {
                let computation = session.computed();
                println!("{}", computation.summary.to_cli_summary());
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
