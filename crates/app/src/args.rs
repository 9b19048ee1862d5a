use std::fmt;

use ui::AppView;
use ui::routes::UnknownView;
use ui::vm::ALL_CATEGORIES;

pub const DEFAULT_STATE_DB: &str = "sqlite://edutrack-state.sqlite3";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { what: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidMinutes { raw: String },
    InvalidView(UnknownView),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { what } => write!(f, "missing {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --state value: {raw}"),
            ArgsError::InvalidMinutes { raw } => {
                write!(f, "minutes must be a positive whole number: {raw}")
            }
            ArgsError::InvalidView(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  edutrack [options] login <email> [--password <password>]");
    eprintln!("  edutrack [options] show [dashboard|courses|mentorship] [--filter <category>]");
    eprintln!("  edutrack [options] show [dashboard|courses|mentorship] --student <id|name>");
    eprintln!("  edutrack [options] log <courseId> <minutes> <lessonName...>");
    eprintln!("  edutrack [options] lessons <courseId>");
    eprintln!("  edutrack [options] logout");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api <url>          EduTrack API base URL");
    eprintln!("  --state <sqlite_url> where the session is remembered");
    eprintln!("  --demo               use the built-in demo cohort instead of the API");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EDUTRACK_API_URL, EDUTRACK_STATE_DB, EDUTRACK_TIMEOUT_SECS, EDUTRACK_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        email: String,
        password: Option<String>,
    },
    Logout,
    Show {
        view: AppView,
        filter: String,
        student: Option<String>,
    },
    Log {
        course_id: String,
        minutes: u32,
        lesson: String,
    },
    Lessons {
        course_id: String,
    },
}

#[derive(Debug)]
pub struct Args {
    pub api_url: Option<String>,
    pub state_url: String,
    pub demo: bool,
    pub command: Command,
}

/// Outcome of parsing: either a command to run or a request for help.
#[derive(Debug)]
pub enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut api_url = std::env::var("EDUTRACK_API_URL").ok();
        let mut state_url = std::env::var("EDUTRACK_STATE_DB")
            .ok()
            .map_or_else(|| DEFAULT_STATE_DB.into(), normalize_sqlite_url);
        let mut demo = false;
        let mut password = None;
        let mut filter = None;
        let mut student = None;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => api_url = Some(require_value(&mut args, "--api")?),
                "--state" => {
                    let value = require_value(&mut args, "--state")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    state_url = normalize_sqlite_url(value);
                }
                "--demo" => demo = true,
                "--password" => password = Some(require_value(&mut args, "--password")?),
                "--filter" => filter = Some(require_value(&mut args, "--filter")?),
                "--student" => student = Some(require_value(&mut args, "--student")?),
                "--help" | "-h" => return Ok(Parsed::Help),
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(name) = positional.next() else {
            return Ok(Parsed::Help);
        };
        let command = match name.as_str() {
            "login" => Command::Login {
                email: positional
                    .next()
                    .ok_or(ArgsError::MissingArgument { what: "email" })?,
                password,
            },
            "logout" => Command::Logout,
            "show" => Command::Show {
                view: match positional.next() {
                    Some(raw) => raw.parse().map_err(ArgsError::InvalidView)?,
                    None => AppView::Dashboard,
                },
                filter: filter.unwrap_or_else(|| ALL_CATEGORIES.to_owned()),
                student,
            },
            "log" => {
                let course_id = positional
                    .next()
                    .ok_or(ArgsError::MissingArgument { what: "course id" })?;
                let raw = positional
                    .next()
                    .ok_or(ArgsError::MissingArgument { what: "minutes" })?;
                let minutes = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|minutes| *minutes > 0)
                    .ok_or(ArgsError::InvalidMinutes { raw })?;
                let lesson = positional.by_ref().collect::<Vec<_>>().join(" ");
                if lesson.trim().is_empty() {
                    return Err(ArgsError::MissingArgument { what: "lesson name" });
                }
                Command::Log {
                    course_id,
                    minutes,
                    lesson,
                }
            }
            "lessons" => Command::Lessons {
                course_id: positional
                    .next()
                    .ok_or(ArgsError::MissingArgument { what: "course id" })?,
            },
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Parsed::Run(Self {
            api_url,
            state_url,
            demo,
            command,
        }))
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the state file and its directory exist before sqlx opens it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
