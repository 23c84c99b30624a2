// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod code_dom;
mod expression;
mod expression_parser;
mod statement;
mod statement_builder;

pub use self::{
    code_dom::CodeDom,
    expression::{
        depth_of,
        Expression,
        Literal,
    },
    expression_parser::{
        ExpressionParser,
        UnknownTokenPolicy,
    },
    statement::{
        DataTypeDescriptor,
        OpenTarget,
        ParameterDefinition,
        PrintItem,
        PrintSeparator,
        Statement,
        StatementKind,
        TypeExpression,
    },
    statement_builder::StatementBuilder,
};
