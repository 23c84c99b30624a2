// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    resolve_references,
    BasaltResult,
    CodeDom,
    ConfigRoot,
    DeclarationScanner,
    Lexer,
    LineNumber,
    ParserOutputLogger,
    ReferenceTable,
    StatementBuilder,
    TokenizedLine,
};

/// A source unit after every parsing stage: tokenized lines with their
/// references resolved, the declaration table and the statements.
#[derive(Debug)]
pub struct ParsedSource {
    lines: Vec<TokenizedLine>,
    references: ReferenceTable,
    code_dom: CodeDom,
}

impl ParsedSource {
    pub fn parse(source: &str, config: &ConfigRoot, logger: &mut dyn ParserOutputLogger) -> BasaltResult<Self> {
        let mut lines = Lexer::tokenize_source(source);
        logger.log_line(&format!("Tokenized {} line(s)", lines.len()));

        let references = DeclarationScanner::new().scan(&mut lines)?;
        logger.log_line(&format!(
            "Found {} procedure(s), {} function(s) and {} variable(s)",
            references.procedures().count(),
            references.functions().count(),
            references.variables().count(),
        ));

        resolve_references(&mut lines, &references);

        let code_dom = StatementBuilder::new(config.parser.unknown_expression_tokens, logger).build(&lines)?;
        logger.log_line(&format!("Built {} statement(s)", code_dom.len()));

        Ok(Self {
            lines,
            references,
            code_dom,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[TokenizedLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, number: LineNumber) -> Option<&TokenizedLine> {
        self.lines.iter().find(|line| line.number() == number)
    }

    #[must_use]
    pub const fn references(&self) -> &ReferenceTable {
        &self.references
    }

    #[must_use]
    pub const fn code_dom(&self) -> &CodeDom {
        &self.code_dom
    }

    #[must_use]
    pub fn into_code_dom(self) -> CodeDom {
        self.code_dom
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<TokenizedLine>, CodeDom) {
        (self.lines, self.code_dom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StatementKind, TokenKind};

    #[test]
    fn runs_every_stage() {
        let mut log = Vec::new();
        let source = "DIM total AS INTEGER\n\nPROCEDURE MAIN\n  total = Twice(2)\nEND PROCEDURE\nFUNCTION Twice(n)\n  RETURN n * 2\nEND FUNCTION\n";

        let parsed = ParsedSource::parse(source, &ConfigRoot::default(), &mut log).unwrap();

        assert_eq!(parsed.lines().len(), 7);
        assert!(parsed.references().function("twice").is_some());
        assert_eq!(parsed.code_dom().len(), 7);
        assert_eq!(log.len(), 3);

        let assignment = parsed.line(LineNumber::new(3)).unwrap();
        assert_eq!(assignment.first_kind(), Some(&TokenKind::VariableName));

        let statements = parsed.into_code_dom().into_statements();
        assert!(matches!(statements[2].kind, StatementKind::Assignment { .. }));
    }

    #[test]
    fn scanner_errors_stop_parsing() {
        let source = "PROCEDURE MAIN\nEND PROCEDURE\nPROCEDURE main\nEND PROCEDURE";
        assert!(ParsedSource::parse(source, &ConfigRoot::default(), &mut Vec::new()).is_err());
    }
}
