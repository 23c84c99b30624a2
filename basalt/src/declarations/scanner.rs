// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{BasaltError, BasaltResult, Keyword, LineNumber, TokenKind, TokenizedLine};

use super::{ReferenceRecord, ReferenceTable};

/// The declaration pass: numbers the lines, records every user-declared name
/// and promotes the declaring identifier tokens so that later stages see the
/// role of a name without deriving it again.
#[derive(Debug, Default)]
pub struct DeclarationScanner {
    table: ReferenceTable,
    scope: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoutineKind {
    Procedure,
    Function,
}

impl DeclarationScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan(mut self, lines: &mut [TokenizedLine]) -> BasaltResult<ReferenceTable> {
        for (index, line) in lines.iter_mut().enumerate() {
            line.assign_number(LineNumber::new(index + 1));
            self.scan_line(index, line)?;
        }

        log::debug!(
            "Declaration pass found {} procedure(s), {} function(s) and {} variable(s)",
            self.table.procedures().count(),
            self.table.functions().count(),
            self.table.variables().count(),
        );

        Ok(self.table)
    }

    fn scan_line(&mut self, index: usize, line: &mut TokenizedLine) -> BasaltResult<()> {
        let keyword = match line.first_kind() {
            Some(TokenKind::Keyword(keyword)) => *keyword,
            _ => return Ok(()),
        };

        match keyword {
            Keyword::Procedure => self.scan_routine(index, line, RoutineKind::Procedure),
            Keyword::Function => self.scan_routine(index, line, RoutineKind::Function),
            Keyword::Dim => self.scan_dim(index, line),

            Keyword::End => {
                let closes_span = matches!(
                    line.token(2).map(|token| &token.kind),
                    Some(TokenKind::Keyword(keyword)) if keyword.is_span_keyword()
                );

                if closes_span {
                    self.scope = None;
                }

                Ok(())
            }

            _ => Ok(()),
        }
    }

    fn scan_routine(&mut self, index: usize, line: &mut TokenizedLine, kind: RoutineKind) -> BasaltResult<()> {
        let keyword = match kind {
            RoutineKind::Procedure => Keyword::Procedure,
            RoutineKind::Function => Keyword::Function,
        };

        if let Some(scope) = &self.scope {
            return Err(BasaltError::syntax(
                line.position(0),
                format!("`{}` cannot be declared inside `{scope}`", keyword.as_str()),
            ));
        }

        expect_declaration_name(line, 2, keyword.as_str())?;

        let name_token = &line.tokens()[2];
        let record = ReferenceRecord::new(&name_token.text, line.number(), index, None);
        let scope = record.key.clone();

        let promoted = match kind {
            RoutineKind::Procedure => {
                let promoted = name_token.with_kind(TokenKind::ProcedureName);
                self.table.insert_procedure(record)?;
                promoted
            }

            RoutineKind::Function => {
                let promoted = name_token.with_kind(TokenKind::FunctionName);
                self.table.insert_function(record)?;
                promoted
            }
        };

        line.substitute(2, promoted);
        self.scope = Some(scope);
        self.scan_parameters(index, line)
    }

    /// Records the names of `(a AS INTEGER, b)` as variables of the routine
    /// that is being declared.
    fn scan_parameters(&mut self, index: usize, line: &mut TokenizedLine) -> BasaltResult<()> {
        let mut cursor = 3;
        while line.token(cursor).is_some_and(|token| token.kind.is_separator()) {
            cursor += 1;
        }

        if line.token(cursor).map(|token| &token.kind) != Some(&TokenKind::ExpressionStart) {
            return Ok(());
        }

        let mut expecting_name = true;
        for position in cursor + 1..line.tokens().len() {
            let token = &line.tokens()[position];
            let is_name = match &token.kind {
                TokenKind::Separator => continue,
                TokenKind::ExpressionEnd => break,
                TokenKind::ArgumentSeparator => {
                    expecting_name = true;
                    continue;
                }

                TokenKind::Identifier => expecting_name,
                _ => false,
            };

            expecting_name = false;
            if !is_name {
                continue;
            }

            let record = ReferenceRecord::new(&token.text, line.number(), index, self.scope.clone());
            let promoted = token.with_kind(TokenKind::VariableName);
            self.table.insert_variable(record)?;
            line.substitute(position, promoted);
        }

        Ok(())
    }

    /// `DIM name` and `DIM SHARED name`. The variable belongs to the routine
    /// the line is in, so `SHARED` only makes a difference at the top level.
    /// Inside a routine it still declares a local.
    fn scan_dim(&mut self, index: usize, line: &mut TokenizedLine) -> BasaltResult<()> {
        let is_shared = line.token(2).is_some_and(|token| token.kind.is_keyword(Keyword::Shared));
        if let (true, Some(scope)) = (is_shared, &self.scope) {
            log::warn!("`DIM SHARED` on line {} is inside `{scope}`, so it declares a local variable", line.number());
        }

        let (name_index, context) = if is_shared {
            (4, "DIM SHARED")
        } else {
            (2, "DIM")
        };

        expect_declaration_name(line, name_index, context)?;

        let name_token = &line.tokens()[name_index];
        let record = ReferenceRecord::new(&name_token.text, line.number(), index, self.scope.clone());
        let promoted = name_token.with_kind(TokenKind::VariableName);

        self.table.insert_variable(record)?;
        line.substitute(name_index, promoted);
        Ok(())
    }
}

fn expect_declaration_name(line: &TokenizedLine, name_index: usize, context: &str) -> BasaltResult<()> {
    let separator_index = name_index - 1;

    match line.token(separator_index) {
        Some(token) if token.kind.is_separator() => (),

        Some(token) => {
            return Err(BasaltError::syntax(
                line.position(separator_index),
                format!("expected a space after `{context}`, but found `{token}`"),
            ));
        }

        None => {
            return Err(BasaltError::syntax(
                line.position(separator_index),
                format!("expected a name after `{context}`"),
            ));
        }
    }

    match line.token(name_index) {
        Some(token) if token.kind == TokenKind::Identifier => Ok(()),

        Some(token) => Err(BasaltError::syntax(
            line.position(name_index),
            format!("expected a name after `{context}`, but found {} `{token}`", token.kind.name()),
        )),

        None => Err(BasaltError::syntax(
            line.position(name_index),
            format!("expected a name after `{context}`"),
        )),
    }
}
