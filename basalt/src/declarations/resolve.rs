// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Keyword, Token, TokenKind, TokenizedLine};

use super::ReferenceTable;

/// Promotes every remaining [`TokenKind::Identifier`] that names something the
/// declaration pass recorded. Locals of the enclosing routine win over globals,
/// which win over functions and then procedures. Unknown names stay
/// identifiers.
pub fn resolve_references(lines: &mut [TokenizedLine], table: &ReferenceTable) {
    let mut scope: Option<String> = None;
    let mut promotions = 0;

    for line in lines.iter_mut() {
        let mut closes_scope = false;

        match line.first_kind() {
            Some(TokenKind::Keyword(keyword)) if keyword.is_span_keyword() => {
                scope = line.token(2).map(Token::normalized_name);
            }

            Some(TokenKind::Keyword(Keyword::End)) => {
                closes_scope = matches!(
                    line.token(2).map(|token| &token.kind),
                    Some(TokenKind::Keyword(keyword)) if keyword.is_span_keyword()
                );
            }

            _ => (),
        }

        for index in 0..line.tokens().len() {
            let token = &line.tokens()[index];
            if token.kind != TokenKind::Identifier {
                continue;
            }

            let Some(kind) = resolve_name(table, scope.as_deref(), &token.text) else {
                continue;
            };

            let promoted = token.with_kind(kind);
            line.substitute(index, promoted);
            promotions += 1;
        }

        if closes_scope {
            scope = None;
        }
    }

    log::debug!("Reference resolution promoted {promotions} identifier(s)");
}

fn resolve_name(table: &ReferenceTable, scope: Option<&str>, name: &str) -> Option<TokenKind> {
    if scope.is_some() && table.find_variable(scope, name).is_some() {
        return Some(TokenKind::VariableName);
    }

    if table.find_variable(None, name).is_some() {
        return Some(TokenKind::VariableName);
    }

    if table.function(name).is_some() {
        return Some(TokenKind::FunctionName);
    }

    if table.procedure(name).is_some() {
        return Some(TokenKind::ProcedureName);
    }

    None
}
