// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{cell::RefCell, collections::HashMap, io, rc::Rc};

use basalt::{ConfigRoot, FileStream, OpenMode, StandardOutput, SystemRuntime};
use basalt_interpreter::{run_source, RuntimeError};

/// Collects everything a program prints.
#[derive(Debug, Default, Clone)]
pub struct MemoryOutput {
    text: Rc<RefCell<String>>,
}

impl MemoryOutput {
    pub fn lines(&self) -> Vec<String> {
        self.text.borrow().lines().map(String::from).collect()
    }
}

impl StandardOutput for MemoryOutput {
    fn write(&mut self, text: &str) {
        self.text.borrow_mut().push_str(text);
    }
}

/// Files as lists of lines, shared between the test and the program.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: Rc<RefCell<HashMap<String, Vec<String>>>>,
    resets: Rc<RefCell<usize>>,
}

impl MemoryFileSystem {
    pub fn with_file(self, name: &str, lines: &[&str]) -> Self {
        self.files.borrow_mut().insert(name.to_string(), lines.iter().map(|line| line.to_string()).collect());
        self
    }

    pub fn file(&self, name: &str) -> Option<Vec<String>> {
        self.files.borrow().get(name).cloned()
    }

    pub fn resets(&self) -> usize {
        *self.resets.borrow()
    }
}

impl SystemRuntime for MemoryFileSystem {
    fn open_file(&mut self, path: &str, mode: OpenMode) -> io::Result<Box<dyn FileStream>> {
        let mut files = self.files.borrow_mut();

        match mode {
            OpenMode::Input => {
                let Some(lines) = files.get(path) else {
                    return Err(io::Error::new(io::ErrorKind::NotFound, format!("{path} does not exist")));
                };

                Ok(Box::new(MemoryStream::Reader(lines.clone().into())))
            }

            OpenMode::Output => {
                files.insert(path.to_string(), Vec::new());
                Ok(Box::new(MemoryStream::Writer { path: path.to_string(), files: Rc::clone(&self.files) }))
            }

            OpenMode::Append => {
                files.entry(path.to_string()).or_default();
                Ok(Box::new(MemoryStream::Writer { path: path.to_string(), files: Rc::clone(&self.files) }))
            }
        }
    }

    fn close_file(&mut self, mut stream: Box<dyn FileStream>) -> io::Result<()> {
        stream.flush()
    }

    fn reset(&mut self) {
        *self.resets.borrow_mut() += 1;
    }
}

#[derive(Debug)]
enum MemoryStream {
    Reader(std::collections::VecDeque<String>),
    Writer {
        path: String,
        files: Rc<RefCell<HashMap<String, Vec<String>>>>,
    },
}

impl FileStream for MemoryStream {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        match self {
            Self::Writer { path, files } => {
                files.borrow_mut().entry(path.clone()).or_default().push(text.to_string());
                Ok(())
            }
            Self::Reader(..) => Err(io::Error::other("opened for INPUT")),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self {
            Self::Reader(lines) => Ok(lines.pop_front()),
            Self::Writer { .. } => Err(io::Error::other("not opened for INPUT")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn run_program(input: &str, config: &ConfigRoot, files: &MemoryFileSystem) -> Result<Vec<String>, RuntimeError> {
    _ = env_logger::builder().is_test(true).try_init();

    let output = MemoryOutput::default();
    run_source(input, config, Box::new(files.clone()), Box::new(output.clone()))?;
    Ok(output.lines())
}

pub fn interpret_and_return_stdout(input: &str) -> Vec<String> {
    match run_program(input, &ConfigRoot::default(), &MemoryFileSystem::default()) {
        Ok(lines) => lines,
        Err(e) => panic!("program failed on line {:?}: {e}", e.line()),
    }
}

pub fn interpret_and_return_error(input: &str) -> RuntimeError {
    match run_program(input, &ConfigRoot::default(), &MemoryFileSystem::default()) {
        Ok(lines) => panic!("program unexpectedly succeeded, printing {lines:?}"),
        Err(e) => e,
    }
}
