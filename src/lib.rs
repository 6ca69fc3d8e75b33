//! Speech-to-text helper for shell voice commands.
//!
//! Reads a recorded WAV clip, hands it to a networked recognition service
//! with a local PocketSphinx fallback, and prints a cleaned lowercase
//! transcript on stdout. Silence on stdout is a valid outcome.

pub mod audio;
pub mod text;
pub mod transcription;

pub use transcription::Transcriber;

fn log_dir_path() -> std::path::PathBuf {
    dirs::data_dir()
        .map(|d| d.join("stt-helper").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from(".").join("logs"))
}

/// Set up fern logging. Stdout is reserved for the transcript, so the
/// console chain goes to stderr; `STT_LOG` raises the console level from
/// the default `warn`. A debug-level file log lands in the data dir.
pub fn init_logger() -> Result<std::path::PathBuf, fern::InitError> {
    let log_dir = log_dir_path();
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = log_dir.join("stt-helper.log");

    let console_level = std::env::var("STT_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);

    let format = |out: fern::FormatCallback<'_>, message: &std::fmt::Arguments<'_>, record: &log::Record| {
        out.finish(format_args!(
            "[{}][{}][{}][{:?}] {}",
            chrono::Local::now().format("%Y-%m-%d"),
            chrono::Local::now().format("%H:%M:%S"),
            record.target(),
            record.level(),
            message
        ))
    };

    fern::Dispatch::new()
        .format(format)
        .level(log::LevelFilter::Debug)
        .chain(
            fern::Dispatch::new()
                .level(console_level)
                .chain(std::io::stderr()),
        )
        .chain(fern::log_file(&log_file)?)
        .apply()?;

    Ok(log_file)
}
