// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use basalt::{BasaltError, ConfigRoot, LineNumber, UnknownTokenPolicy};
use basalt_interpreter::{RuntimeError, RuntimeErrorKind};
use rstest::rstest;
use tests::{interpret_and_return_error, run_program, MemoryFileSystem};

fn engine_error(error: &RuntimeError) -> &BasaltError {
    match error.kind() {
        RuntimeErrorKind::Engine(error) => error,
        kind => panic!("expected an engine error, but got {kind:?}"),
    }
}

#[rstest]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT "fine"
            PRINT 1 / 0
        END PROCEDURE
    "#,
    "DivisionByZero",
    3,
)]
#[case(
    r#"
        PROCEDURE MAIN
            CALL Two(1)
        END PROCEDURE

        PROCEDURE Two(a, b)
        END PROCEDURE
    "#,
    "ArgumentCount",
    2,
)]
#[case(
    r#"
        PROCEDURE MAIN
            DIM values(2) AS INTEGER
            values(2) = 1
            values(3) = 1
        END PROCEDURE
    "#,
    "IndexOutOfRange",
    4,
)]
#[case(
    r#"
        PROCEDURE MAIN
            CALL Helper
        END PROCEDURE

        PROCEDURE Helper
            RETURN 5
        END PROCEDURE
    "#,
    "UnexpectedReturnValue",
    5,
)]
#[case(
    r#"
        PROCEDURE MAIN
            DIM values(2)
            PRINT values
        END PROCEDURE
    "#,
    "MissingIndex",
    3,
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT #0, "nowhere"
        END PROCEDURE
    "#,
    "Engine",
    2,
)]
fn runtime_errors(#[case] input: &str, #[case] kind: &str, #[case] line: usize) {
    let error = interpret_and_return_error(input);

    assert_eq!(error.kind().as_ref(), kind, "unexpected error: {error}");
    assert_eq!(error.line(), Some(LineNumber::new(line)));
}

#[test]
fn reading_past_the_end_of_a_file() {
    let files = MemoryFileSystem::default().with_file("short.txt", &["only"]);

    let error = run_program(r#"
        PROCEDURE MAIN
            DIM word AS STRING
            OPEN "short.txt" FOR INPUT AS #1
            INPUT #1, word
            INPUT #1, word
        END PROCEDURE
    "#, &ConfigRoot::default(), &files).unwrap_err();

    assert!(matches!(error.kind(), RuntimeErrorKind::EndOfFile { handle: 1 }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(5)));
}

#[test]
fn printing_to_a_handle_that_is_not_open() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            PRINT #4, "lost"
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::Handle { handle: 4, .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(2)));
}

#[test]
fn opening_a_handle_twice() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            OPEN "a.txt" FOR OUTPUT AS #1
            OPEN "b.txt" FOR OUTPUT AS #1
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::Handle { handle: 1, .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(3)));
}

#[test]
fn opening_a_missing_file_for_input() {
    let files = MemoryFileSystem::default();

    let error = run_program(r#"
        PROCEDURE MAIN
            OPEN "missing.txt" FOR INPUT AS #2
        END PROCEDURE
    "#, &ConfigRoot::default(), &files).unwrap_err();

    assert!(matches!(engine_error(&error), BasaltError::Handle { handle: 2, .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(2)));
    assert_eq!(files.resets(), 1);
}

#[test]
fn a_program_without_main() {
    let error = interpret_and_return_error(r#"
        PROCEDURE Other
            PRINT "unreachable"
        END PROCEDURE
    "#);

    assert_eq!(engine_error(&error), &BasaltError::MissingEntryPoint);
    assert_eq!(error.line(), None);
}

#[test]
fn let_of_an_undeclared_variable() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            LET y = 1
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::SyntaxError { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(2)));
}

#[test]
fn calling_an_undeclared_procedure() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            CALL Nowhere
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::SyntaxError { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(2)));
}

#[test]
fn unknown_data_types() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            DIM gadget AS WIDGET
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::BadDataType { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(2)));
}

#[test]
fn duplicate_declarations() {
    let error = interpret_and_return_error(r#"
        PROCEDURE MAIN
            DIM twice AS INTEGER
            DIM twice AS STRING
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::DuplicateDefinition { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(3)));
}

#[test]
fn statements_outside_of_a_procedure() {
    let error = interpret_and_return_error(r#"
        PRINT "too early"

        PROCEDURE MAIN
        END PROCEDURE
    "#);

    assert!(matches!(engine_error(&error), BasaltError::SyntaxError { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(1)));
}

const PEEKING_PROGRAM: &str = r#"
    PROCEDURE MAIN
        DIM secret AS STRING
        secret = "hidden"
        CALL Peek
    END PROCEDURE

    PROCEDURE Peek
        PRINT secret
    END PROCEDURE
"#;

#[test]
fn locals_of_other_procedures_are_skipped_by_default() {
    let output = run_program(PEEKING_PROGRAM, &ConfigRoot::default(), &MemoryFileSystem::default());
    assert_eq!(output.unwrap(), [""]);
}

#[test]
fn locals_of_other_procedures_can_be_rejected() {
    let mut config = ConfigRoot::default();
    config.parser.unknown_expression_tokens = UnknownTokenPolicy::Reject;

    let error = run_program(PEEKING_PROGRAM, &config, &MemoryFileSystem::default()).unwrap_err();

    assert!(matches!(engine_error(&error), BasaltError::SyntaxError { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(7)));
}

#[test]
fn trailing_comments_pass_the_strict_parser() {
    let mut config = ConfigRoot::default();
    config.parser.unknown_expression_tokens = UnknownTokenPolicy::Reject;

    let output = run_program(r#"
        PROCEDURE MAIN
            DIM x AS INTEGER
            x = 2 + 3 ' sum
            PRINT x ' note
            PRINT "done" REM trailing
        END PROCEDURE
    "#, &config, &MemoryFileSystem::default());

    assert_eq!(output.unwrap(), [" 5", "done"]);
}

#[rstest]
#[case(
    r#"
        PROCEDURE MAIN
            CALL MAIN
        END PROCEDURE
    "#,
    2,
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT Forever(1)
        END PROCEDURE

        FUNCTION Forever(n AS LONG) AS LONG
            RETURN Forever(n + 1) + 1
        END FUNCTION
    "#,
    5,
)]
fn endless_recursion_is_an_error(#[case] input: &str, #[case] line: usize) {
    let error = interpret_and_return_error(input);

    assert!(matches!(engine_error(&error), BasaltError::EngineExecution { .. }), "{error:?}");
    assert_eq!(error.line(), Some(LineNumber::new(line)));
}

#[test]
fn call_depth_comes_from_the_config() {
    let mut config = ConfigRoot::default();
    config.runtime.max_call_depth = 4;

    let program = r#"
        DIM depth AS INTEGER

        PROCEDURE MAIN
            CALL Dive
        END PROCEDURE

        PROCEDURE Dive
            depth = depth + 1
            PRINT depth
            CALL Dive
        END PROCEDURE
    "#;

    let files = MemoryFileSystem::default();
    let error = run_program(program, &config, &files).unwrap_err();

    assert!(matches!(engine_error(&error), BasaltError::EngineExecution { .. }), "{error:?}");
    assert_eq!(files.resets(), 1);
}
