// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Keyword {
    Append,
    As,
    Call,
    Close,
    Dim,
    End,
    For,
    Function,
    Input,
    Let,
    Open,
    Output,
    Print,
    Procedure,
    Return,
    Shared,
}

impl Keyword {
    pub fn iter_variants() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Keywords are matched case-insensitively, like the rest of the dialect.
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref().eq_ignore_ascii_case(input))
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Keywords that open or close a procedure/function span.
    #[must_use]
    pub const fn is_span_keyword(&self) -> bool {
        matches!(self, Self::Procedure | Self::Function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("procedure", Some(Keyword::Procedure))]
    #[case("Dim", Some(Keyword::Dim))]
    #[case("END", Some(Keyword::End))]
    #[case("ending", None)]
    #[case("", None)]
    fn parse(#[case] input: &str, #[case] expected: Option<Keyword>) {
        assert_eq!(Keyword::parse(input), expected);
    }

    #[test]
    fn as_str_matches_strum_serialization() {
        for keyword in Keyword::iter_variants() {
            assert_eq!(keyword.as_str(), keyword.as_ref());
        }
    }
}
