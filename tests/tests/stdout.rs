// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use rstest::rstest;
use tests::interpret_and_return_stdout;

#[rstest]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT "Hello, world!"
        END PROCEDURE
    "#,
    &[
        "Hello, world!",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT 1 + 2 * 3
            PRINT (1 + 2) * 3
            PRINT 2 ^ 3 ^ 2
            PRINT -2 ^ 2
            PRINT 7 \ 2; 7 MOD 3
            PRINT 7 / 2
        END PROCEDURE
    "#,
    &[
        " 7",
        " 9",
        " 512",
        "-4",
        " 3 1",
        " 3.5",
    ],
)]
#[case(
    r#"
        DIM counter AS INTEGER

        PROCEDURE MAIN
            counter = 41
            CALL Bump
            PRINT "counter ="; counter
        END PROCEDURE

        PROCEDURE Bump
            counter = counter + 1
        END PROCEDURE
    "#,
    &[
        "counter = 42",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT Square(4)
            PRINT Add(2, 3) * 2
            PRINT Add(Square(2), 0.5)
        END PROCEDURE

        FUNCTION Square(n AS INTEGER) AS INTEGER
            RETURN n * n
        END FUNCTION

        FUNCTION Add(a, b) AS DOUBLE
            RETURN a + b
        END FUNCTION
    "#,
    &[
        " 16",
        " 10",
        " 4.5",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT "a"; "b"
            PRINT "a", "b"
            PRINT "no newline";
            PRINT " here"
            PRINT
            PRINT "x"; 1; -1
        END PROCEDURE
    "#,
    &[
        "ab",
        "a\tb",
        "no newline here",
        "",
        "x 1-1",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            DIM squares(4) AS INTEGER
            DIM i AS INTEGER
            i = 2
            squares(i) = i * i
            squares(4) = 16
            PRINT squares(2); squares(4); squares(0)
        END PROCEDURE
    "#,
    &[
        " 4 16 0",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            DIM greeting AS STRING
            LET greeting = "hi " + "there"
            PRINT greeting
        END PROCEDURE
    "#,
    &[
        "hi there",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT "before"
            CALL Halt
            PRINT "after"
        END PROCEDURE

        PROCEDURE Halt
            END
            PRINT "never"
        END PROCEDURE
    "#,
    &[
        "before",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            Greet "Ada", 3
        END PROCEDURE

        PROCEDURE Greet(name AS STRING, times AS INTEGER)
            PRINT "Hello "; name; " x"; times
        END PROCEDURE
    "#,
    &[
        "Hello Ada x 3",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            CALL Early
            PRINT "done"
        END PROCEDURE

        PROCEDURE Early
            PRINT "one"
            RETURN
            PRINT "two"
        END PROCEDURE
    "#,
    &[
        "one",
        "done",
    ],
)]
#[case(
    r#"
        ' comments are allowed everywhere
        REM even like this
        PROCEDURE MAIN
            BEEP
            PRINT "still running" ' after a statement too
        END PROCEDURE
    "#,
    &[
        "still running",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            DIM whole AS INTEGER
            DIM ratio
            whole = 2.6
            ratio = 1 / 4
            PRINT whole; ratio
        END PROCEDURE
    "#,
    &[
        " 3 .25",
    ],
)]
#[case(
    r#"
        DIM total AS LONG

        PROCEDURE MAIN
            DIM total AS STRING
            total = "local"
            CALL Show
            PRINT total
        END PROCEDURE

        PROCEDURE Show
            total = 7
            PRINT total
        END PROCEDURE
    "#,
    &[
        " 7",
        "local",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT Twice(Twice(3))
        END PROCEDURE

        FUNCTION Twice(n AS LONG) AS LONG
            DIM doubled AS LONG
            doubled = n * 2
            RETURN doubled
        END FUNCTION
    "#,
    &[
        " 12",
    ],
)]
#[case(
    r#"
        PROCEDURE MAIN
            PRINT Nothing(); "|"
        END PROCEDURE

        FUNCTION Nothing() AS STRING
        END FUNCTION
    "#,
    &[
        "|",
    ],
)]
fn stdout(#[case] input: &str, #[case] expected: &[&str]) {
    let actual = interpret_and_return_stdout(input);
    assert_eq!(actual, expected);
}
