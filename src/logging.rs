use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Log level for a run: diagnostics at warn, plus group changes when verbose.
pub fn level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Install the global logger: stderr always, plus `log_file` when non-empty.
/// Best-effort: a log file that cannot be opened is skipped (logging must
/// never stop a run).
pub fn init(verbose: bool, log_file: &str) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if !log_file.is_empty() {
        let path = shellexpand::tilde(log_file).into_owned();
        let path = std::path::Path::new(&path);
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            loggers.push(WriteLogger::new(level(verbose), config, file));
        }
    }

    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(level(false), LevelFilter::Warn);
        assert_eq!(level(true), LevelFilter::Info);
    }
}
