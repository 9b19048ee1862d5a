mod args;

use edutrack_core::model::{CourseId, UserRole};
use log::LevelFilter;
use services::{
    AppServices, BackendChoice, Clock, GatewayConfig, ReloadOutcome, SessionController,
};
use ui::routes::is_granted;
use ui::{Navigator, Presentation, build_screen, build_student_detail};

use crate::args::{Args, Command, Parsed, prepare_sqlite_file, print_usage};

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("EDUTRACK_LOG")
        .ok()
        .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn backend_choice(parsed: &Args) -> Result<BackendChoice, Box<dyn std::error::Error>> {
    if parsed.demo {
        return Ok(BackendChoice::Demo);
    }
    let env_config = GatewayConfig::from_env()?;
    let config = match &parsed.api_url {
        Some(api) => GatewayConfig::new(api)?.with_timeout(env_config.timeout),
        None => env_config,
    };
    Ok(BackendChoice::Http(config))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Parsed::Run(parsed)) => parsed,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    init_logging()?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.state_url)?;
    log::debug!("session state at {}", parsed.state_url);
    let choice = backend_choice(&parsed)?;
    let services = AppServices::new_sqlite(&parsed.state_url, Clock::default_clock(), choice).await?;
    let mut session = services.session();

    if let Command::Login { email, password } = &parsed.command {
        let result = match password {
            Some(password) => session.login_with_password(email, password).await,
            None => session.login(email).await,
        };
        result?;
        print_screen(&session, Navigator::new(role_of(&session)?), ui::vm::ALL_CATEGORIES).await;
        return Ok(());
    }

    if !session.restore().await {
        println!("{}", build_screen(&session, &Navigator::new(UserRole::Student), "", &[]));
        return Err(NotLoggedIn.into());
    }

    match parsed.command {
        Command::Login { .. } => Ok(()),
        Command::Logout => {
            let name = session.user().map(|user| user.name().to_owned());
            session.logout().await;
            if let Some(name) = name {
                println!("Logged out {name}.");
            }
            Ok(())
        }
        Command::Show {
            view,
            filter,
            student,
        } => {
            let role = role_of(&session)?;
            if !is_granted(role, view) {
                log::warn!("{view} is not available to {role}; showing the dashboard");
            }
            let mut navigator = Navigator::new(role);
            navigator.select(view);
            match student {
                Some(student) => {
                    print!("{}", build_student_detail(&session, &navigator, &student)?);
                }
                None => print_screen(&session, navigator, &filter).await,
            }
            Ok(())
        }
        Command::Log {
            course_id,
            minutes,
            lesson,
        } => {
            let result = session
                .log_activity(CourseId::new(course_id), minutes, &lesson)
                .await?;
            match &result.submitted {
                Ok(event) => println!(
                    "Logged {} min of \"{}\" on {}.",
                    event.minutes_spent(),
                    event.lesson_name(),
                    event.date()
                ),
                Err(err) => println!("Could not save the activity: {err}"),
            }
            if result.reload == ReloadOutcome::Failed {
                println!("{}", session.load_error().unwrap_or_default());
            }
            Ok(())
        }
        Command::Lessons { course_id } => {
            let lessons = session.lessons(&CourseId::new(course_id)).await?;
            if lessons.is_empty() {
                println!("No lessons published yet.");
            }
            for (index, lesson) in lessons.iter().enumerate() {
                let mark = if lesson.completed { "x" } else { " " };
                match lesson.duration_minutes {
                    Some(minutes) => {
                        println!("[{mark}] {:>2}. {} ({minutes} min)", index + 1, lesson.title);
                    }
                    None => println!("[{mark}] {:>2}. {}", index + 1, lesson.title),
                }
            }
            Ok(())
        }
    }
}

async fn print_screen(session: &SessionController, navigator: Navigator, filter: &str) {
    let insights = if navigator.presentation() == Presentation::MentorshipTable {
        session.mentor_insights().await
    } else {
        Vec::new()
    };
    let nav: Vec<&str> = navigator.nav_items().iter().map(|item| item.label).collect();
    println!("{}", nav.join(" | "));
    println!();
    let screen = build_screen(session, &navigator, filter, &insights);
    print!("{screen}");
}

fn role_of(session: &SessionController) -> Result<UserRole, NotLoggedIn> {
    session.user().map(|user| user.role()).ok_or(NotLoggedIn)
}

#[derive(Debug)]
struct NotLoggedIn;

impl std::fmt::Display for NotLoggedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("not logged in; run `login <email>` first")
    }
}

impl std::error::Error for NotLoggedIn {}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
