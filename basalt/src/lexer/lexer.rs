// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{iter::Peekable, str::CharIndices};

use crate::{ArithmeticOperator, Keyword, StrExt, Token, TokenKind, TokenizedLine};

/// Splits one pre-processed line into tokens. Every character of the line ends
/// up in exactly one token, so the token texts concatenate back into the line.
pub struct Lexer<'line> {
    input: &'line str,
    chars: Peekable<CharIndices<'line>>,
    column: usize,

    /// Byte offset and column of the word being accumulated.
    word_begin: Option<(usize, usize)>,
    tokens: Vec<Token>,
}

impl<'line> Lexer<'line> {
    pub fn new(input: &'line str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 0,
            word_begin: None,
            tokens: Vec::new(),
        }
    }

    /// Normalizes and tokenizes every line of `source`. Blank lines are
    /// dropped; line numbers are left for the declaration pass to assign.
    pub fn tokenize_source(source: &str) -> Vec<TokenizedLine> {
        source.lines()
            .map(|line| line.normalize_whitespace())
            .filter(|line| !line.is_empty())
            .map(|line| TokenizedLine::new(Lexer::new(&line).tokenize()))
            .collect()
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(&(offset, c)) = self.chars.peek() {
            match c {
                '"' => {
                    self.flush_word(offset);
                    self.consume_string(offset);
                }

                '\'' => {
                    self.flush_word(offset);
                    self.consume_rest_of_line(offset, self.column);
                    break;
                }

                c if c.is_whitespace() => {
                    if let Some((begin, column)) = self.pending_rem(offset) {
                        self.word_begin = None;
                        self.consume_rest_of_line(begin, column);
                        break;
                    }

                    self.flush_word(offset);
                    self.consume_single_char_token(TokenKind::Separator);
                }

                '(' => self.delimiter(offset, TokenKind::ExpressionStart),
                ')' => self.delimiter(offset, TokenKind::ExpressionEnd),
                ',' => self.delimiter(offset, TokenKind::ArgumentSeparator),
                ';' => self.delimiter(offset, TokenKind::StatementSeparator),
                '#' => self.delimiter(offset, TokenKind::FileNumber),
                '=' => self.delimiter(offset, TokenKind::Assignment),

                c if is_word_char(c) => {
                    if self.word_begin.is_none() {
                        self.word_begin = Some((offset, self.column));
                    }
                    self.next_char();
                }

                c => {
                    let kind = match ArithmeticOperator::from_char(c) {
                        Some(operator) => TokenKind::ArithmeticOperator(operator),
                        None => TokenKind::Illegal(c),
                    };
                    self.delimiter(offset, kind);
                }
            }
        }

        self.flush_word(self.input.len());
        self.tokens
    }

    fn delimiter(&mut self, offset: usize, kind: TokenKind) {
        self.flush_word(offset);
        self.consume_single_char_token(kind);
    }

    fn pending_rem(&self, end: usize) -> Option<(usize, usize)> {
        self.word_begin
            .filter(|&(begin, _)| self.input[begin..end].eq_ignore_ascii_case("REM"))
    }

    fn flush_word(&mut self, end: usize) {
        let Some((begin, column)) = self.word_begin.take() else {
            return;
        };

        let text = &self.input[begin..end];
        self.tokens.push(Token::new(classify_word(text), text, column));
    }

    fn consume_single_char_token(&mut self, kind: TokenKind) {
        let column = self.column;
        let Some((offset, c)) = self.next_char() else {
            return;
        };

        let text = &self.input[offset..offset + c.len_utf8()];
        self.tokens.push(Token::new(kind, text, column));
    }

    fn consume_string(&mut self, begin: usize) {
        let column = self.column;
        self.next_char();

        let mut end = self.input.len();
        while let Some((offset, c)) = self.next_char() {
            if c == '"' {
                end = offset + 1;
                break;
            }
        }

        let text = &self.input[begin..end];
        let contents = text.strip_prefix('"').unwrap_or(text);
        let contents = contents.strip_suffix('"').unwrap_or(contents);

        self.tokens.push(Token::new(TokenKind::StringLiteral(contents.to_string()), text, column));
    }

    fn consume_rest_of_line(&mut self, begin: usize, column: usize) {
        while self.next_char().is_some() {}

        self.tokens.push(Token::new(TokenKind::Comment, &self.input[begin..], column));
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next()?;
        self.column += 1;
        Some(next)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '$' | '%' | '!')
}

fn classify_word(text: &str) -> TokenKind {
    if text.eq_ignore_ascii_case("REM") {
        return TokenKind::Comment;
    }

    if text.eq_ignore_ascii_case("MOD") {
        return TokenKind::ArithmeticOperator(ArithmeticOperator::Modulo);
    }

    if let Some(keyword) = Keyword::parse(text) {
        return TokenKind::Keyword(keyword);
    }

    let starts_numeric = text.starts_with(|c: char| c.is_ascii_digit())
        || (text.starts_with('.') && text.len() > 1);

    if starts_numeric {
        if let Ok(integer) = text.parse::<i64>() {
            return TokenKind::Integer(integer);
        }

        if let Ok(float) = text.parse::<f64>() {
            return TokenKind::FloatingPoint(float);
        }
    }

    TokenKind::Identifier
}
