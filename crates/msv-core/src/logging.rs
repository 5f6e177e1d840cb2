//! Logging init: file under the XDG state dir, falling back to stderr when
//! the state dir is unavailable or unwritable.

use std::fs;
use std::io;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

struct LogFileWriter(fs::File);

/// Per-event writer: the shared log file, or stderr if cloning the handle fails.
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn open_log_file() -> anyhow::Result<fs::File> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("msv")?;
    let log_dir = xdg_dirs.get_state_home().join("msv");
    fs::create_dir_all(&log_dir)?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("msv.log"))?;
    Ok(file)
}

/// Initialize structured logging to `~/.local/state/msv/msv.log`, or to
/// stderr when the log file cannot be opened. Progress and verdict output go
/// to stdout separately; the log carries per-check detail.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,msv_core=debug,msv_cli=debug"));

    let writer = match open_log_file() {
        Ok(file) => BoxMakeWriter::new(LogFileWriter(file)),
        Err(_) => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}
