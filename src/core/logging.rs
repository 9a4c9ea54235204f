//! Logging setup on top of flexi_logger
//!
//! The library itself only uses the `log` facade. The host binary calls
//! [`init_logging`] once at startup and may adjust the level later with
//! [`reconfigure_logging`].

use std::sync::{Mutex, OnceLock};

static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Start the global logger
///
/// `log_format` is one of `text` (default), `ext` (adds the source location)
/// or `json`. When `log_file` is given, records go to that file instead of
/// stderr.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let mut logger = Logger::try_with_str(log_level.unwrap_or("info"))?;

    logger = match (log_format.unwrap_or("text"), color_enabled) {
        ("json", _) => logger.format(json_format),
        ("ext", true) => logger.format(extended_color_format),
        ("ext", false) => logger.format(extended_format),
        (_, true) => logger.format(simple_color_format),
        (_, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

/// Change the log level of a running logger
///
/// Only the level can change at runtime; format and destination are fixed
/// when flexi_logger starts.
pub fn reconfigure_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

type FormatResult = Result<(), std::io::Error>;

const LEVEL_TAGS: [(&str, colored::Color); 5] = [
    ("ERR", colored::Color::Red),
    ("WRN", colored::Color::Yellow),
    ("INF", colored::Color::Green),
    ("DBG", colored::Color::Blue),
    ("TRC", colored::Color::Magenta),
];

fn level_tag(level: log::Level) -> (&'static str, colored::Color) {
    // log::Level discriminants start at 1 (Error)
    LEVEL_TAGS[level as usize - 1]
}

/// Shared text layout: timestamp, level tag, message, optional location
///
/// "2025-01-31 12:00:00.000 INF adding github (descriptor/reconcile.rs:42)"
fn write_line(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
    color: bool,
    with_location: bool,
) -> FormatResult {
    use colored::Colorize;

    let timestamp = now.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    let (tag, tag_color) = level_tag(record.level());
    let location = with_location.then(|| format_target_as_path(record.target(), record.line()));

    if color {
        let tag = match record.level() {
            log::Level::Error => tag.color(tag_color).bold(),
            _ => tag.color(tag_color),
        };
        write!(w, "{} {} {}", timestamp.dimmed(), tag, record.args())?;
        if let Some(location) = location {
            write!(w, " ({})", location.dimmed())?;
        }
    } else {
        write!(w, "{} {} {}", timestamp, tag, record.args())?;
        if let Some(location) = location {
            write!(w, " ({})", location)?;
        }
    }
    Ok(())
}

fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> FormatResult {
    write_line(w, now, record, false, false)
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> FormatResult {
    write_line(w, now, record, true, false)
}

fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> FormatResult {
    write_line(w, now, record, false, true)
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> FormatResult {
    write_line(w, now, record, true, true)
}

/// One JSON object per record
fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> FormatResult {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_tag(record.level()).0,
        "target": format_target_as_path(record.target(), record.line()),
        "message": record.args().to_string(),
    });
    serde_json::to_writer(&mut *w, &line).map_err(std::io::Error::from)
}

// orgfolder::descriptor::reconcile -> descriptor/reconcile.rs
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("orgfolder::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
