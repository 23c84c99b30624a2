// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use log::{LevelFilter, Log, Metadata, Record};

pub(crate) struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn initialize(level: LevelFilter) {
        let logger = Box::leak(Box::new(Logger { level }));

        log::set_max_level(level);
        if log::set_logger(logger).is_err() {
            eprintln!("A logger was already installed");
            return;
        }

        log::debug!("Logger is installed at level {level}");
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("[{}] {}: {}", record.level(), record.file().unwrap_or_default(), record.args());
    }

    fn flush(&self) {}
}
