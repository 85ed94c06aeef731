use std::{env, fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::{
    Error, Result,
    options::{LogFormat, SolverOptions},
};

/// Extra `env_logger` filter directives applied on top of `--log-level`,
/// e.g. `aco_tsp_core::algo::colony=trace`.
pub const LOG_FILTER_ENV: &str = "ACO_TSP_LOG";

/// Installs the global logger described by `options`. Fails if a logger is already set.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never);

    if let Ok(directives) = env::var(LOG_FILTER_ENV)
        && !directives.trim().is_empty()
    {
        builder.parse_filters(&directives);
    }

    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;
    builder.format(move |buf, record| {
        if log_timestamp {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        writeln!(
            buf,
            "{}",
            render_line(log_format, record.level(), record.target(), record.args())
        )
    });

    builder.target(match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            Target::Pipe(Box::new(log_file))
        }
        None => Target::Stderr,
    });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn render_line(
    format: LogFormat,
    level: Level,
    target: &str,
    args: &std::fmt::Arguments<'_>,
) -> String {
    match format {
        LogFormat::Compact => format!("{} {args}", level_tag(level)),
        LogFormat::Pretty => format!("{} [{target}] {args}", level_tag(level)),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{LogFormat, render_line};

    #[test]
    fn compact_lines_omit_target() {
        let line = render_line(
            LogFormat::Compact,
            Level::Info,
            "aco_tsp_core::algo::colony",
            &format_args!("colony: iteration=1"),
        );
        assert_eq!(line, "INFO colony: iteration=1");
    }

    #[test]
    fn pretty_lines_include_target() {
        let line = render_line(
            LogFormat::Pretty,
            Level::Debug,
            "aco_tsp_core::algo::colony",
            &format_args!("colony: iteration=1"),
        );
        assert_eq!(line, "DEBUG [aco_tsp_core::algo::colony] colony: iteration=1");
    }
}
