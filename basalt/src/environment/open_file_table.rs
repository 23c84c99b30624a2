// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::BTreeMap;

use crate::{BasaltError, BasaltResult, FileStream, LineNumber, OpenMode, SystemRuntime};

/// The number a program uses to refer to an open file, `#1` and so on.
pub type FileHandle = u32;

#[derive(Debug)]
pub struct OpenFile {
    line: LineNumber,
    path: String,
    mode: OpenMode,
    stream: Box<dyn FileStream>,
}

impl OpenFile {
    #[must_use]
    pub fn new(line: LineNumber, path: impl Into<String>, mode: OpenMode, stream: Box<dyn FileStream>) -> Self {
        Self {
            line,
            path: path.into(),
            mode,
            stream,
        }
    }

    /// The line the file was opened on.
    #[must_use]
    pub const fn line(&self) -> LineNumber {
        self.line
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn stream(&mut self) -> &mut dyn FileStream {
        self.stream.as_mut()
    }
}

#[derive(Debug, Default)]
pub struct OpenFileTable {
    files: BTreeMap<FileHandle, OpenFile>,
}

impl OpenFileTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, line: LineNumber, handle: FileHandle, file: OpenFile) -> BasaltResult<()> {
        if let Some(existing) = self.files.get(&handle) {
            return Err(BasaltError::handle(
                line,
                handle,
                format!("is already open, it was opened on line {}", existing.line),
            ));
        }

        self.files.insert(handle, file);
        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, handle: FileHandle) -> Option<&OpenFile> {
        self.files.get(&handle)
    }

    pub fn lookup_mut(&mut self, handle: FileHandle) -> Option<&mut OpenFile> {
        self.files.get_mut(&handle)
    }

    pub fn unregister(&mut self, handle: FileHandle) -> Option<OpenFile> {
        self.files.remove(&handle)
    }

    /// Removes the file from the table and hands its stream back to the
    /// runtime.
    pub fn close_file(&mut self, line: LineNumber, handle: FileHandle, system: &mut dyn SystemRuntime) -> BasaltResult<()> {
        let Some(file) = self.unregister(handle) else {
            return Err(BasaltError::handle(line, handle, "is not open"));
        };

        system.close_file(file.stream)
            .map_err(|e| BasaltError::handle(line, handle, format!("could not be closed: {e}")))
    }

    /// Closes every file, carrying on past failures. Returns how many files
    /// were closed cleanly.
    pub fn safe_shutdown(&mut self, system: &mut dyn SystemRuntime) -> usize {
        let files = std::mem::take(&mut self.files);
        let mut closed = 0;

        for (handle, file) in files {
            let path = file.path.clone();

            match system.close_file(file.stream) {
                Ok(()) => closed += 1,
                Err(e) => log::warn!("Failed to close #{handle} (`{path}`): {e}"),
            }
        }

        closed
    }

    pub fn handles(&self) -> impl Iterator<Item = FileHandle> + '_ {
        self.files.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
