// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

pub trait StrExt {
    /// The case-folded, trimmed form used as a table key.
    #[must_use]
    fn normalized_name(&self) -> String;

    /// Trims the line and collapses whitespace runs outside of string
    /// literals into a single space.
    #[must_use]
    fn normalize_whitespace(&self) -> String;
}

impl StrExt for str {
    fn normalized_name(&self) -> String {
        self.trim().to_ascii_uppercase()
    }

    fn normalize_whitespace(&self) -> String {
        let mut result = String::with_capacity(self.len());
        let mut in_string = false;
        let mut pending_space = false;

        for c in self.trim().chars() {
            if in_string {
                result.push(c);
                in_string = c != '"';
                continue;
            }

            if c.is_whitespace() {
                pending_space = true;
                continue;
            }

            if pending_space {
                result.push(' ');
                pending_space = false;
            }

            in_string = c == '"';
            result.push(c);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  print   x  ", "print x")]
    #[case("PRINT\t\"a    b\"   ;  y", "PRINT \"a    b\" ; y")]
    #[case("", "")]
    #[case("\"open string   ", "\"open string")]
    fn normalize_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(input.normalize_whitespace(), expected);
    }

    #[rstest]
    #[case(" main ", "MAIN")]
    #[case("Greet$", "GREET$")]
    fn normalized_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(input.normalized_name(), expected);
    }
}
