// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use basalt::{FileStream, OpenMode, StandardOutput, SystemRuntime};

/// Opens files on the real file system. Relative paths are taken from the
/// base directory when one is set.
#[derive(Debug, Default)]
pub struct StdSystem {
    base_directory: Option<PathBuf>,
    opened: usize,
}

impl StdSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: Some(directory.into()),
            opened: 0,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_directory {
            Some(base) if Path::new(path).is_relative() => base.join(path),
            _ => PathBuf::from(path),
        }
    }
}

impl SystemRuntime for StdSystem {
    fn open_file(&mut self, path: &str, mode: OpenMode) -> io::Result<Box<dyn FileStream>> {
        let path = self.resolve(path);

        let stream = match mode {
            OpenMode::Input => StdFileStream::Reader(BufReader::new(File::open(&path)?)),
            OpenMode::Output => StdFileStream::Writer(BufWriter::new(File::create(&path)?)),
            OpenMode::Append => {
                let file = OpenOptions::new().append(true).create(true).open(&path)?;
                StdFileStream::Writer(BufWriter::new(file))
            }
        };

        self.opened += 1;
        log::debug!("Opened {} for {}", path.display(), mode.as_ref());
        Ok(Box::new(stream))
    }

    fn close_file(&mut self, mut stream: Box<dyn FileStream>) -> io::Result<()> {
        stream.flush()
    }

    fn reset(&mut self) {
        log::debug!("Resetting the file system after {} opened file(s)", self.opened);
        self.opened = 0;
    }
}

#[derive(Debug)]
pub enum StdFileStream {
    Reader(BufReader<File>),
    Writer(BufWriter<File>),
}

impl FileStream for StdFileStream {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        match self {
            Self::Writer(writer) => writeln!(writer, "{text}"),
            Self::Reader(..) => Err(io::Error::other("the file is opened for INPUT")),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let Self::Reader(reader) = self else {
            return Err(io::Error::other("the file is not opened for INPUT"));
        };

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Writer(writer) => writer.flush(),
            Self::Reader(..) => Ok(()),
        }
    }
}

/// Writes `PRINT` output to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl StandardOutput for ConsoleOutput {
    fn write(&mut self, text: &str) {
        if let Err(e) = io::stdout().lock().write_all(text.as_bytes()) {
            log::warn!("Failed to write to stdout: {e}");
        }
    }

    fn flush(&mut self) {
        _ = io::stdout().flush();
    }
}
