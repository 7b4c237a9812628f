mod report_format;
mod settings;
mod terminal_notifier;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use rollcall_core::attendance::domain::attendance_service::AttendanceService;
use rollcall_core::attendance::domain::image_upload::is_image;
use rollcall_core::attendance::domain::notifier::Notifier;
use rollcall_core::attendance::infrastructure::service_factory::{create_service, DataSource};
use rollcall_core::dashboard::mark_attendance_use_case::{
    MarkAttendanceReport, MarkAttendanceUseCase,
};
use rollcall_core::dashboard::recognition_session::RecognitionSession;
use rollcall_core::dashboard::recognize_faces_use_case::RecognizeFacesUseCase;
use rollcall_core::dashboard::roster_report_use_case::RosterReportUseCase;
use rollcall_core::overlay::domain::display_geometry::DisplayGeometry;
use rollcall_core::overlay::domain::overlay_mapper::compute_overlay;
use rollcall_core::overlay::domain::overlay_painter::OverlayPainter;
use rollcall_core::overlay::infrastructure::photo_file_reader::PhotoFileReader;
use rollcall_core::overlay::infrastructure::photo_file_writer::PhotoFileWriter;
use rollcall_core::overlay::infrastructure::rgb_overlay_painter::RgbOverlayPainter;
use rollcall_core::roster::domain::sort::{SortKey, SortOrder, SortState};

use report_format::{format_faces, format_roster, format_sessions, format_student_report};
use settings::Settings;
use terminal_notifier::TerminalNotifier;

/// Classroom attendance from a photo: recognize faces, mark attendance, view reports.
#[derive(Parser)]
#[command(name = "rollcall", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Use the built-in mock backend instead of the live service.
    #[arg(long, global = true)]
    mock: bool,

    /// Base URL of the recognition/attendance service.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a classroom photo and list the recognized faces.
    Recognize {
        /// Classroom photo (jpg, png, bmp, tiff, webp).
        image: PathBuf,

        /// Width the photo is displayed at; boxes are reported in this space.
        #[arg(long)]
        display_width: Option<u32>,

        /// Write a copy of the photo at display size with boxes drawn on it.
        #[arg(long)]
        annotate: Option<PathBuf>,

        /// Mark the recognized students present afterwards.
        #[arg(long)]
        mark: bool,

        /// Attendance date for --mark (YYYY-MM-DD, default today).
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark students present by name.
    Mark {
        /// Student names (comma-separated).
        #[arg(long, value_delimiter = ',', required = true)]
        names: Vec<String>,

        /// Attendance date (YYYY-MM-DD, default today).
        #[arg(long)]
        date: Option<String>,
    },
    /// List the roster with attendance percentages.
    Students {
        /// Case-insensitive filter on name or roll number.
        #[arg(long, default_value = "")]
        search: String,

        /// Sort column: name, roll-no or percentage.
        #[arg(long, default_value = "name")]
        sort: String,

        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },
    /// Show one student's attendance report.
    Student {
        /// Student id.
        id: String,
    },
    /// List attendance sessions, newest first.
    Sessions,
    /// Print the effective settings as JSON.
    Config {
        /// Save the effective settings to the settings file.
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = resolve_settings(&cli.global)?;
    if let Command::Config { write } = cli.command {
        return run_config(&settings, write, cli.global.config.as_deref());
    }

    let service = create_service(&settings.service_config())?;
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);

    match cli.command {
        Command::Recognize {
            image,
            display_width,
            annotate,
            mark,
            date,
        } => {
            let date = if mark {
                Some(parse_date(date.as_deref())?)
            } else {
                None
            };
            run_recognize(
                service,
                notifier,
                &image,
                display_width.unwrap_or(settings.display_width),
                annotate.as_deref(),
                date,
            )
        }
        Command::Mark { names, date } => {
            let date = parse_date(date.as_deref())?;
            let use_case = MarkAttendanceUseCase::new(service, notifier);
            let report = use_case.execute_names(date, &names)?;
            print_mark_report(&report);
            Ok(())
        }
        Command::Students { search, sort, desc } => {
            let key: SortKey = sort.parse()?;
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let use_case = RosterReportUseCase::new(service, notifier);
            let overview = use_case.overview(&search, SortState::new(key, order))?;
            print!("{}", format_roster(&overview));
            Ok(())
        }
        Command::Student { id } => {
            let use_case = RosterReportUseCase::new(service, notifier);
            print!("{}", format_student_report(&use_case.student_report(&id)?));
            Ok(())
        }
        Command::Sessions => {
            let use_case = RosterReportUseCase::new(service, notifier);
            print!("{}", format_sessions(&use_case.sessions()?));
            Ok(())
        }
        Command::Config { .. } => Ok(()),
    }
}

fn run_recognize(
    service: Arc<dyn AttendanceService>,
    notifier: Arc<dyn Notifier>,
    image: &Path,
    display_width: u32,
    annotate: Option<&Path>,
    mark_date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = PhotoFileReader::new();
    let (width, height) = reader.dimensions(image)?;
    let geometry = DisplayGeometry::fit_width(width, height, display_width);

    let recognize = RecognizeFacesUseCase::new(service.clone(), notifier.clone());
    let mut session = RecognitionSession::new();
    let detections = recognize.execute_file(image, &mut session)?;

    let overlay = compute_overlay(&detections, &geometry)?;
    print!("{}", format_faces(&overlay));

    if let Some(output) = annotate {
        let mut photo = reader.read_resized(
            image,
            geometry.displayed_width as u32,
            geometry.displayed_height as u32,
        )?;
        RgbOverlayPainter::default().paint(&mut photo, &overlay)?;
        PhotoFileWriter::new().write(output, &photo)?;
        log::info!("Annotated photo written to {}", output.display());
    }

    if let Some(date) = mark_date {
        let mark = MarkAttendanceUseCase::new(service, notifier);
        let report = mark.execute(date, &mut session)?;
        print_mark_report(&report);
    }

    Ok(())
}

fn run_config(
    settings: &Settings,
    write: bool,
    explicit_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if write {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(Settings::config_path)
            .ok_or("No configuration directory available on this platform")?;
        settings.save_to(&path)?;
        log::info!("Settings written to {}", path.display());
    }
    Ok(())
}

fn print_mark_report(report: &MarkAttendanceReport) {
    println!("Marked present on {}: {}", report.date, report.marked.join(", "));
    if let Some(roster) = &report.roster {
        log::debug!("Roster refreshed: {} student(s)", roster.len());
    }
}

/// Settings file, then environment, then command-line flags.
fn resolve_settings(global: &GlobalArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let base = match &global.config {
        Some(path) if path.exists() => Settings::load_from(path)?,
        // Only reachable for `config --write`, which creates the file.
        Some(_) => Settings::default(),
        None => Settings::load(),
    };
    let settings = base.with_env_overrides(|key| std::env::var(key).ok());
    Ok(apply_overrides(settings, global))
}

fn apply_overrides(mut settings: Settings, global: &GlobalArgs) -> Settings {
    if global.mock {
        settings.data_source = DataSource::Mock;
    }
    if let Some(url) = &global.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(timeout) = global.timeout_secs {
        settings.request_timeout_secs = timeout;
    }
    settings
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        None => Ok(chrono::Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Date must be in YYYY-MM-DD format, got '{s}'")),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(timeout) = cli.global.timeout_secs {
        if timeout == 0 {
            return Err("Timeout must be at least 1 second".into());
        }
    }
    if let Some(path) = &cli.global.config {
        let creating = matches!(cli.command, Command::Config { write: true });
        if !path.exists() && !creating {
            return Err(format!("Settings file not found: {}", path.display()).into());
        }
    }

    match &cli.command {
        Command::Recognize {
            image,
            display_width,
            annotate,
            mark,
            date,
        } => {
            if date.is_some() && !mark {
                return Err("--date is only used with --mark".into());
            }
            if !image.exists() {
                return Err(format!("Input file not found: {}", image.display()).into());
            }
            if !is_image(image) {
                return Err(format!("Not a supported image file: {}", image.display()).into());
            }
            if *display_width == Some(0) {
                return Err("Display width must be a positive integer".into());
            }
            if let Some(output) = annotate {
                if !is_image(output) {
                    return Err(format!(
                        "Annotated output must have an image extension, got {}",
                        output.display()
                    )
                    .into());
                }
            }
            if let Some(d) = date {
                parse_date(Some(d))?;
            }
        }
        Command::Mark { names, date } => {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err("At least one student name is required".into());
            }
            if let Some(d) = date {
                parse_date(Some(d))?;
            }
        }
        Command::Students { sort, .. } => {
            sort.parse::<SortKey>()?;
        }
        Command::Student { id } => {
            if id.trim().is_empty() {
                return Err("Student id must not be empty".into());
            }
        }
        Command::Sessions | Command::Config { .. } => {}
    }
    Ok(())
}
