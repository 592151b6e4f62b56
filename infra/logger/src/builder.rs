use crate::{LevelFilter, Logger, LoggerError, LoggerErrorExt, Rotation};
use private::Sealed;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_RETAINED_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Layout of lines written to the rolling log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FileFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug)]
struct FileSink {
    directory: PathBuf,
    rotation: Rotation,
    retained: usize,
    format: FileFormat,
}

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) console: bool,
    pub(crate) level: LevelFilter,
    pub(crate) filter: Option<String>,
    file: Option<FileSink>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { console: true, level: LevelFilter::INFO, filter: None, file: None }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFiles;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFiles {}

/// Typestate builder for the global subscriber.
///
/// A name is required before [`LoggerBuilder::init`] becomes available; file
/// specific knobs only exist once [`LoggerBuilder::directory`] was called.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    pub(crate) settings: Settings,
    name: N,
    sink: PhantomData<F>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { settings: Settings::default(), name: Unnamed, sink: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the application; also the prefix of every log file.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), sink: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Directive list such as `gap_kernel=debug,gap_vanilla=warn`.
    ///
    /// `RUST_LOG` is only consulted when no explicit filter is given.
    #[must_use = "the builder does nothing until `init` is called"]
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.filter = Some(directives.into());
        self
    }

    #[must_use = "the builder does nothing until `init` is called"]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes rolling log files into `directory` (created on init).
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFiles> {
        let mut settings = self.settings;
        settings.file = Some(FileSink {
            directory: directory.into(),
            rotation: Rotation::DAILY,
            retained: DEFAULT_RETAINED_FILES,
            format: FileFormat::Plain,
        });
        LoggerBuilder { settings, name: self.name, sink: PhantomData }
    }

    /// Installs the subscriber globally.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty name, a bad filter or
    /// when no output is enabled; [`LoggerError::Subscriber`] when another
    /// global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = env_filter(&self.settings)?;
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if self.settings.console {
            layers.push(fmt::layer().compact().with_target(true).with_ansi(true).boxed());
        }

        let guard = match self.settings.file {
            Some(sink) => {
                let (layer, guard) = file_layer(&name, sink)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled, turn on the console or set a log directory".into(),
                context: Some(name.into()),
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Named, WithFiles> {
    #[must_use = "the builder does nothing until `init` is called"]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(sink) = self.settings.file.as_mut() {
            sink.rotation = rotation;
        }
        self
    }

    /// Maximum number of rotated files kept on disk.
    #[must_use = "the builder does nothing until `init` is called"]
    pub fn retain(mut self, files: usize) -> Self {
        if let Some(sink) = self.settings.file.as_mut() {
            sink.retained = files;
        }
        self
    }

    /// Emits one JSON object per line in the log files.
    #[must_use = "the builder does nothing until `init` is called"]
    pub fn json(mut self) -> Self {
        if let Some(sink) = self.settings.file.as_mut() {
            sink.format = FileFormat::Json;
        }
        self
    }
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.filter {
        Some(directives) => {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("invalid filter '{directives}': {e}").into(),
                context: None,
            })
        },
        None => Ok(builder.from_env_lossy()),
    }
}

fn file_layer(
    name: &str,
    sink: FileSink,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard), LoggerError> {
    if sink.retained == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "at least one log file must be retained".into(),
            context: None,
        });
    }

    std::fs::create_dir_all(&sink.directory)
        .context(format!("creating {}", sink.directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(sink.rotation)
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(sink.retained)
        .build(&sink.directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let boxed = match sink.format {
        FileFormat::Plain => layer.boxed(),
        FileFormat::Json => layer.json().boxed(),
    };
    Ok((boxed, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_log_to_console_at_info() {
        let builder = LoggerBuilder::new().name("gap");
        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert!(builder.settings.filter.is_none());
        assert!(builder.settings.file.is_none());
    }

    #[test]
    fn file_options_apply_to_the_sink() {
        let builder = LoggerBuilder::new()
            .name("gap")
            .filter("gap_kernel=debug")
            .directory("logs")
            .retain(3)
            .rotation(Rotation::HOURLY)
            .json();

        let sink = builder.settings.file.as_ref().expect("file sink configured");
        assert_eq!(sink.format, FileFormat::Json);
        assert_eq!(sink.retained, 3);
        assert_eq!(sink.directory, PathBuf::from("logs"));
        assert_eq!(builder.settings.filter.as_deref(), Some("gap_kernel=debug"));
    }

    #[test]
    fn bad_filters_are_rejected_before_install() {
        let settings = Settings { filter: Some("gap=verbose".to_owned()), ..Settings::default() };
        let err = env_filter(&settings).expect_err("filter should not parse");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_retention_is_invalid() {
        let sink = FileSink {
            directory: PathBuf::from("unused"),
            rotation: Rotation::NEVER,
            retained: 0,
            format: FileFormat::Plain,
        };
        assert!(matches!(
            file_layer("gap", sink),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }
}
