// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use basalt::ConfigRoot;
use pretty_assertions::assert_eq;
use tests::{run_program, MemoryFileSystem};

fn run(input: &str, files: &MemoryFileSystem) -> Vec<String> {
    match run_program(input, &ConfigRoot::default(), files) {
        Ok(lines) => lines,
        Err(e) => panic!("program failed on line {:?}: {e}", e.line()),
    }
}

#[test]
fn write_then_read_back() {
    let files = MemoryFileSystem::default();

    let output = run(r#"
        PROCEDURE MAIN
            DIM word AS STRING
            DIM number AS INTEGER

            OPEN "data.txt" FOR OUTPUT AS #1
            PRINT #1, "first"
            PRINT #1, 40 + 2
            CLOSE #1

            OPEN "data.txt" FOR INPUT AS #1
            INPUT #1, word
            INPUT #1, number
            CLOSE #1

            PRINT word
            PRINT number
        END PROCEDURE
    "#, &files);

    assert_eq!(files.file("data.txt"), Some(vec!["first".to_string(), " 42".to_string()]));
    assert_eq!(output, ["first", " 42"]);
}

#[test]
fn append_keeps_existing_lines() {
    let files = MemoryFileSystem::default().with_file("numbers.txt", &["1", "2"]);

    let output = run(r#"
        PROCEDURE MAIN
            DIM value AS INTEGER
            DIM total AS INTEGER

            OPEN "numbers.txt" FOR APPEND AS #2
            PRINT #2, 3
            CLOSE #2

            OPEN "numbers.txt" FOR INPUT AS #2
            INPUT #2, value
            total = total + value
            INPUT #2, value
            total = total + value
            INPUT #2, value
            total = total + value
            CLOSE

            PRINT total
        END PROCEDURE
    "#, &files);

    assert_eq!(files.file("numbers.txt"), Some(vec!["1".to_string(), "2".to_string(), " 3".to_string()]));
    assert_eq!(output, [" 6"]);
}

#[test]
fn open_into_a_variable_picks_a_free_handle() {
    let files = MemoryFileSystem::default();

    let output = run(r#"
        PROCEDURE MAIN
            DIM handle AS INTEGER
            OPEN "out.txt" FOR OUTPUT AS handle
            PRINT handle
            PRINT #handle, "x"
            CLOSE #handle
        END PROCEDURE
    "#, &files);

    assert_eq!(output, [" 1"]);
    assert_eq!(files.file("out.txt"), Some(vec!["x".to_string()]));
}

#[test]
fn closed_handles_are_handed_out_again() {
    let files = MemoryFileSystem::default();

    let output = run(r#"
        PROCEDURE MAIN
            DIM a AS INTEGER
            DIM b AS INTEGER
            DIM c AS INTEGER

            OPEN "a.txt" FOR OUTPUT AS a
            OPEN "b.txt" FOR OUTPUT AS b
            CLOSE #a
            OPEN "c.txt" FOR OUTPUT AS c

            PRINT a; b; c
        END PROCEDURE
    "#, &files);

    assert_eq!(output, [" 1 2 1"]);
}

#[test]
fn files_left_open_are_closed_when_the_program_ends() {
    let files = MemoryFileSystem::default();

    run(r#"
        PROCEDURE MAIN
            OPEN "log.txt" FOR OUTPUT AS #3
            PRINT #3, "kept"
        END PROCEDURE
    "#, &files);

    assert_eq!(files.file("log.txt"), Some(vec!["kept".to_string()]));
    assert_eq!(files.resets(), 1);
}

#[test]
fn procedures_share_open_files() {
    let files = MemoryFileSystem::default();

    run(r#"
        PROCEDURE MAIN
            OPEN "shared.txt" FOR OUTPUT AS #1
            CALL WriteLine("from a procedure")
            CLOSE #1
        END PROCEDURE

        PROCEDURE WriteLine(text AS STRING)
            PRINT #1, text
        END PROCEDURE
    "#, &files);

    assert_eq!(files.file("shared.txt"), Some(vec!["from a procedure".to_string()]));
}
