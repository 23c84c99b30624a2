// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod arithmetic_operator;
mod keyword;
mod lexer;
mod token;
mod token_kind;
mod tokenized_line;

pub use self::{
    arithmetic_operator::ArithmeticOperator,
    keyword::Keyword,
    lexer::Lexer,
    token::Token,
    token_kind::TokenKind,
    tokenized_line::TokenizedLine,
};
