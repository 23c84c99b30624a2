// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{BasaltError, BasaltResult, Keyword, OpenMode, ParserOutputLogger, SourcePosition, Token, TokenKind, TokenizedLine};

use super::{
    CodeDom,
    DataTypeDescriptor,
    Expression,
    ExpressionParser,
    OpenTarget,
    ParameterDefinition,
    PrintItem,
    PrintSeparator,
    Statement,
    StatementKind,
    TypeExpression,
    UnknownTokenPolicy,
};

/// Builds the [`CodeDom`] of a source unit whose lines already went through
/// the declaration pass and reference resolution.
pub struct StatementBuilder<'logger> {
    policy: UnknownTokenPolicy,
    logger: &'logger mut dyn ParserOutputLogger,
}

impl<'logger> StatementBuilder<'logger> {
    pub fn new(policy: UnknownTokenPolicy, logger: &'logger mut dyn ParserOutputLogger) -> Self {
        Self {
            policy,
            logger,
        }
    }

    pub fn build(&mut self, lines: &[TokenizedLine]) -> BasaltResult<CodeDom> {
        let statements = lines.iter()
            .map(|line| self.build_statement(line))
            .collect::<BasaltResult<Vec<_>>>()?;

        let passed = statements.iter()
            .filter(|statement| matches!(statement.kind, StatementKind::Pass { .. }))
            .count();

        log::debug!("Built {} statement(s), {passed} passed through", statements.len());
        Ok(CodeDom::new(statements))
    }

    pub fn build_statement(&mut self, line: &TokenizedLine) -> BasaltResult<Statement> {
        let mut parser = LineParser::new(line, self.policy);

        let Some(first) = parser.next() else {
            return Ok(Statement::new(line.number(), StatementKind::Comment));
        };

        let kind = match &first.kind {
            TokenKind::Keyword(Keyword::Procedure) => parser.procedure_start()?,
            TokenKind::Keyword(Keyword::Function) => parser.function_start()?,
            TokenKind::Keyword(Keyword::End) => parser.end()?,
            TokenKind::Keyword(Keyword::Dim) => parser.declaration()?,
            TokenKind::Keyword(Keyword::Let) => parser.let_assignment()?,
            TokenKind::VariableName => parser.assignment(first)?,
            TokenKind::Keyword(Keyword::Print) => parser.print()?,
            TokenKind::Keyword(Keyword::Call) => parser.call()?,
            TokenKind::ProcedureName => parser.call_arguments(first)?,
            TokenKind::Keyword(Keyword::Return) => parser.return_statement()?,
            TokenKind::Keyword(Keyword::Open) => parser.open()?,
            TokenKind::Keyword(Keyword::Close) => parser.close()?,
            TokenKind::Comment => StatementKind::Comment,

            TokenKind::Keyword(Keyword::Input) => match parser.input()? {
                Some(kind) => kind,
                None => self.pass(line),
            },

            _ => self.pass(line),
        };

        Ok(Statement::new(line.number(), kind))
    }

    fn pass(&mut self, line: &TokenizedLine) -> StatementKind {
        let text = line.text();
        self.logger.log_line(&format!("Line {}: passing over unrecognized command `{text}`", line.number()));
        StatementKind::Pass { text }
    }
}

/// Walks the tokens of one line, stepping over separators.
struct LineParser<'line> {
    line: &'line TokenizedLine,
    tokens: &'line [Token],
    cursor: usize,
    policy: UnknownTokenPolicy,
}

impl<'line> LineParser<'line> {
    fn new(line: &'line TokenizedLine, policy: UnknownTokenPolicy) -> Self {
        Self {
            line,
            tokens: without_trailing_comment(line.tokens()),
            cursor: 0,
            policy,
        }
    }

    fn skip_separators(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(|token| token.kind.is_separator()) {
            self.cursor += 1;
        }
    }

    fn peek(&mut self) -> Option<&'line Token> {
        self.skip_separators();
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'line Token> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    fn next_if(&mut self, predicate: impl FnOnce(&TokenKind) -> bool) -> Option<&'line Token> {
        let token = self.peek()?;
        if !predicate(&token.kind) {
            return None;
        }

        self.cursor += 1;
        Some(token)
    }

    fn rest(&mut self) -> &'line [Token] {
        let rest = &self.tokens[self.cursor.min(self.tokens.len())..];
        self.cursor = self.tokens.len();
        rest
    }

    /// Takes tokens up to, but not including, the first token outside of
    /// parentheses that matches `stop`.
    fn take_until(&mut self, stop: impl Fn(&TokenKind) -> bool) -> &'line [Token] {
        let begin = self.cursor.min(self.tokens.len());
        let mut depth = 0_usize;
        let mut end = begin;

        while let Some(token) = self.tokens.get(end) {
            if depth == 0 && stop(&token.kind) {
                break;
            }

            match token.kind {
                TokenKind::ExpressionStart => depth += 1,
                TokenKind::ExpressionEnd => depth = depth.saturating_sub(1),
                _ => (),
            }

            end += 1;
        }

        self.cursor = end;
        &self.tokens[begin..end]
    }

    fn error(&self, token: Option<&Token>, message: impl Into<String>) -> BasaltError {
        let column = match token {
            Some(token) => token.column,
            None => self.line.text().chars().count(),
        };

        BasaltError::syntax(SourcePosition::new(self.line.number(), column), message)
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> BasaltResult<&'line Token> {
        match self.next() {
            Some(token) if token.kind == *kind => Ok(token),
            Some(token) => Err(self.error(Some(token), format!("expected {what}, but found {} `{token}`", token.kind.name()))),
            None => Err(self.error(None, format!("expected {what}"))),
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword, context: &str) -> BasaltResult<()> {
        self.expect(&TokenKind::Keyword(keyword), &format!("`{}` {context}", keyword.as_str()))?;
        Ok(())
    }

    fn expression(&self, tokens: &[Token]) -> BasaltResult<Vec<Expression>> {
        ExpressionParser::new(tokens, self.line.number(), self.policy).parse()
    }

    fn procedure_start(&mut self) -> BasaltResult<StatementKind> {
        let name = self.expect(&TokenKind::ProcedureName, "a procedure name after `PROCEDURE`")?;
        let parameters = self.parameters()?;

        Ok(StatementKind::ProcedureStart {
            name: name.normalized_name(),
            parameters,
        })
    }

    fn function_start(&mut self) -> BasaltResult<StatementKind> {
        let name = self.expect(&TokenKind::FunctionName, "a function name after `FUNCTION`")?;
        let parameters = self.parameters()?;
        let return_type = self.type_clause()?;

        Ok(StatementKind::FunctionStart {
            name: name.normalized_name(),
            parameters,
            return_type,
        })
    }

    fn parameters(&mut self) -> BasaltResult<Vec<ParameterDefinition>> {
        let mut parameters = Vec::new();

        if self.next_if(|kind| *kind == TokenKind::ExpressionStart).is_none() {
            return Ok(parameters);
        }

        if self.next_if(|kind| *kind == TokenKind::ExpressionEnd).is_some() {
            return Ok(parameters);
        }

        loop {
            let name = self.expect(&TokenKind::VariableName, "a parameter name")?;
            let type_name = self.type_clause()?;

            parameters.push(ParameterDefinition {
                name: name.normalized_name(),
                type_name,
            });

            match self.next() {
                Some(token) if token.kind == TokenKind::ArgumentSeparator => continue,
                Some(token) if token.kind == TokenKind::ExpressionEnd => break,
                Some(token) => {
                    return Err(self.error(Some(token), format!("expected `,` or `)` in the parameter list, but found `{token}`")));
                }
                None => return Err(self.error(None, "expected `)` to close the parameter list")),
            }
        }

        Ok(parameters)
    }

    /// `AS type`, or the default type when there is no `AS`.
    fn type_clause(&mut self) -> BasaltResult<TypeExpression> {
        if self.next_if(|kind| kind.is_keyword(Keyword::As)).is_none() {
            return Ok(TypeExpression::default());
        }

        match self.next() {
            Some(token) if token.kind == TokenKind::Identifier || token.kind.is_user_name() => {
                Ok(TypeExpression::new(token.text.clone()))
            }

            Some(token) => Err(self.error(Some(token), format!("expected a type name after `AS`, but found {} `{token}`", token.kind.name()))),
            None => Err(self.error(None, "expected a type name after `AS`")),
        }
    }

    fn end(&mut self) -> BasaltResult<StatementKind> {
        match self.next() {
            None => Ok(StatementKind::End),
            Some(token) if token.kind.is_keyword(Keyword::Procedure) => Ok(StatementKind::ProcedureEnd),
            Some(token) if token.kind.is_keyword(Keyword::Function) => Ok(StatementKind::FunctionEnd),
            Some(token) => Err(self.error(Some(token), format!("expected `PROCEDURE` or `FUNCTION` after `END`, but found `{token}`"))),
        }
    }

    fn declaration(&mut self) -> BasaltResult<StatementKind> {
        _ = self.next_if(|kind| kind.is_keyword(Keyword::Shared));
        let name = self.expect(&TokenKind::VariableName, "a variable name after `DIM`")?;

        let mut data_type = DataTypeDescriptor::default();
        if let Some(opening) = self.next_if(|kind| *kind == TokenKind::ExpressionStart) {
            let size = self.take_until(|kind| *kind == TokenKind::ExpressionEnd);
            if self.next().is_none() {
                return Err(self.error(Some(opening), "this `(` is never closed"));
            }

            let size = self.expression(size)?;
            data_type.is_array = true;
            data_type.array_size = (!size.is_empty()).then_some(size);
        }

        data_type.type_name = self.type_clause()?;

        Ok(StatementKind::VariableDeclaration {
            name: name.normalized_name(),
            data_type,
        })
    }

    fn let_assignment(&mut self) -> BasaltResult<StatementKind> {
        match self.next() {
            Some(token) if token.kind == TokenKind::VariableName => self.assignment(token),
            Some(token) if token.kind == TokenKind::Identifier => {
                Err(self.error(Some(token), format!("`{token}` is not declared, declare it with `DIM` first")))
            }
            Some(token) => Err(self.error(Some(token), format!("expected a variable name after `LET`, but found `{token}`"))),
            None => Err(self.error(None, "expected a variable name after `LET`")),
        }
    }

    fn assignment(&mut self, variable: &Token) -> BasaltResult<StatementKind> {
        let mut index = None;
        if let Some(opening) = self.next_if(|kind| *kind == TokenKind::ExpressionStart) {
            let tokens = self.take_until(|kind| *kind == TokenKind::ExpressionEnd);
            if self.next().is_none() {
                return Err(self.error(Some(opening), "this `(` is never closed"));
            }
            index = Some(self.expression(tokens)?);
        }

        self.expect(&TokenKind::Assignment, &format!("`=` after `{variable}`"))?;

        let tokens = self.rest();
        let expression = self.expression(tokens)?;
        if expression.is_empty() {
            return Err(self.error(None, format!("expected a value to assign to `{variable}`")));
        }

        Ok(StatementKind::Assignment {
            variable: variable.normalized_name(),
            index,
            expression,
        })
    }

    fn print(&mut self) -> BasaltResult<StatementKind> {
        if self.next_if(|kind| *kind == TokenKind::FileNumber).is_none() {
            return Ok(StatementKind::Print {
                items: self.print_items()?,
            });
        }

        let handle = self.file_number()?;
        self.expect(&TokenKind::ArgumentSeparator, "`,` after the file number")?;

        Ok(StatementKind::PrintFile {
            handle,
            items: self.print_items()?,
        })
    }

    fn file_number(&mut self) -> BasaltResult<Vec<Expression>> {
        let tokens = self.take_until(|kind| *kind == TokenKind::ArgumentSeparator);
        let handle = self.expression(tokens)?;

        if handle.is_empty() {
            let token = self.peek();
            return Err(self.error(token, "expected a file number after `#`"));
        }

        Ok(handle)
    }

    fn print_items(&mut self) -> BasaltResult<Vec<PrintItem>> {
        let mut items = Vec::new();

        while self.peek().is_some() {
            let tokens = self.take_until(|kind| matches!(kind, TokenKind::StatementSeparator | TokenKind::ArgumentSeparator));
            let separator = self.next().map(|token| match token.kind {
                TokenKind::StatementSeparator => PrintSeparator::Semicolon,
                _ => PrintSeparator::Comma,
            });

            let expression = self.expression(tokens)?;
            if expression.is_empty() && separator.is_none() {
                break;
            }

            items.push(PrintItem {
                expression,
                separator,
            });
        }

        Ok(items)
    }

    /// `INPUT #n, variable`. Console input is not supported, so any other
    /// form yields `None`.
    fn input(&mut self) -> BasaltResult<Option<StatementKind>> {
        if self.next_if(|kind| *kind == TokenKind::FileNumber).is_none() {
            return Ok(None);
        }

        let handle = self.file_number()?;
        self.expect(&TokenKind::ArgumentSeparator, "`,` after the file number")?;
        let variable = self.expect(&TokenKind::VariableName, "a variable to read into")?;

        Ok(Some(StatementKind::InputFile {
            handle,
            variable: variable.normalized_name(),
        }))
    }

    fn call(&mut self) -> BasaltResult<StatementKind> {
        match self.next() {
            Some(token) if token.kind == TokenKind::ProcedureName => self.call_arguments(token),
            Some(token) if token.kind == TokenKind::Identifier => {
                Err(self.error(Some(token), format!("`{token}` is not a declared procedure")))
            }
            Some(token) => Err(self.error(Some(token), format!("expected a procedure name after `CALL`, but found `{token}`"))),
            None => Err(self.error(None, "expected a procedure name after `CALL`")),
        }
    }

    /// Arguments of a call, written as `Name a, b` or `Name(a, b)`.
    fn call_arguments(&mut self, procedure: &Token) -> BasaltResult<StatementKind> {
        let mut tokens = trim_separators(self.rest());
        if is_wrapped_in_parentheses(tokens) {
            tokens = &tokens[1..tokens.len() - 1];
        }

        let mut arguments = Vec::new();
        if !trim_separators(tokens).is_empty() {
            for argument in split_top_level(tokens, TokenKind::ArgumentSeparator) {
                arguments.push(self.expression(argument)?);
            }
        }

        Ok(StatementKind::Call {
            procedure: procedure.normalized_name(),
            arguments,
        })
    }

    fn return_statement(&mut self) -> BasaltResult<StatementKind> {
        let tokens = self.rest();
        let expression = self.expression(tokens)?;

        Ok(StatementKind::Return {
            expression: (!expression.is_empty()).then_some(expression),
        })
    }

    fn open(&mut self) -> BasaltResult<StatementKind> {
        let path_tokens = self.take_until(|kind| kind.is_keyword(Keyword::For));
        let path = self.expression(path_tokens)?;
        self.expect_keyword(Keyword::For, "after the file path")?;

        if path.is_empty() {
            return Err(self.error(self.line.token(0), "expected a file path after `OPEN`"));
        }

        let mode = match self.next() {
            Some(token) => match &token.kind {
                TokenKind::Keyword(Keyword::Input) => OpenMode::Input,
                TokenKind::Keyword(Keyword::Output) => OpenMode::Output,
                TokenKind::Keyword(Keyword::Append) => OpenMode::Append,
                _ => return Err(self.error(Some(token), format!("expected `INPUT`, `OUTPUT` or `APPEND` after `FOR`, but found `{token}`"))),
            },
            None => return Err(self.error(None, "expected `INPUT`, `OUTPUT` or `APPEND` after `FOR`")),
        };

        self.expect_keyword(Keyword::As, "after the file mode")?;

        let target = match self.next() {
            Some(token) if token.kind == TokenKind::FileNumber => {
                let tokens = self.rest();
                let handle = self.expression(tokens)?;
                if handle.is_empty() {
                    return Err(self.error(None, "expected a file number after `#`"));
                }
                OpenTarget::Handle(handle)
            }

            Some(token) if token.kind == TokenKind::VariableName => OpenTarget::Variable(token.normalized_name()),
            Some(token) => return Err(self.error(Some(token), format!("expected `#` or a variable after `AS`, but found `{token}`"))),
            None => return Err(self.error(None, "expected `#` or a variable after `AS`")),
        };

        Ok(StatementKind::Open {
            path,
            mode,
            target,
        })
    }

    fn close(&mut self) -> BasaltResult<StatementKind> {
        _ = self.next_if(|kind| *kind == TokenKind::FileNumber);
        let tokens = self.rest();
        let handle = self.expression(tokens)?;

        Ok(StatementKind::Close {
            handle: (!handle.is_empty()).then_some(handle),
        })
    }
}

/// A comment runs until the end of the line, so it can only be the last token.
fn without_trailing_comment(tokens: &[Token]) -> &[Token] {
    match tokens.split_last() {
        Some((last, rest)) if last.kind == TokenKind::Comment => rest,
        _ => tokens,
    }
}

fn trim_separators(tokens: &[Token]) -> &[Token] {
    let begin = tokens.iter().position(|token| !token.kind.is_separator()).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(|token| !token.kind.is_separator()).map_or(begin, |index| index + 1);
    &tokens[begin..end]
}

/// Whether the first token opens a parenthesis that the last token closes.
fn is_wrapped_in_parentheses(tokens: &[Token]) -> bool {
    if tokens.first().map(|token| &token.kind) != Some(&TokenKind::ExpressionStart) {
        return false;
    }

    let mut depth = 0_usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::ExpressionStart => depth += 1,
            TokenKind::ExpressionEnd => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index == tokens.len() - 1;
                }
            }
            _ => (),
        }
    }

    false
}

/// Splits on `separator` tokens that are not inside parentheses.
pub(crate) fn split_top_level(tokens: &[Token], separator: TokenKind) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut begin = 0;

    for (index, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::ExpressionStart => depth += 1,
            TokenKind::ExpressionEnd => depth = depth.saturating_sub(1),
            kind if depth == 0 && *kind == separator => {
                parts.push(&tokens[begin..index]);
                begin = index + 1;
            }
            _ => (),
        }
    }

    parts.push(&tokens[begin..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resolve_references, DeclarationScanner, Lexer, Literal, LineNumber, ArithmeticOperator};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn build_with_log(source: &str, policy: UnknownTokenPolicy) -> (BasaltResult<CodeDom>, Vec<String>) {
        let mut lines = Lexer::tokenize_source(source);
        let table = DeclarationScanner::new().scan(&mut lines).unwrap();
        resolve_references(&mut lines, &table);

        let mut log = Vec::new();
        let code_dom = StatementBuilder::new(policy, &mut log).build(&lines);
        (code_dom, log)
    }

    fn build(source: &str) -> Vec<StatementKind> {
        let (code_dom, _) = build_with_log(source, UnknownTokenPolicy::Skip);
        code_dom.unwrap()
            .into_statements()
            .into_iter()
            .map(|statement| statement.kind)
            .collect()
    }

    fn variable(name: &str) -> Expression {
        Expression::VariableReference(name.to_string())
    }

    fn integer(value: i64) -> Expression {
        Expression::Literal(Literal::Integer(value))
    }

    fn string(value: &str) -> Expression {
        Expression::Literal(Literal::String(value.to_string()))
    }

    #[test]
    fn procedure_header_with_parameters() {
        let statements = build("PROCEDURE Greet(name AS STRING, times)\nEND PROCEDURE");

        assert_eq!(statements, vec![
            StatementKind::ProcedureStart {
                name: "GREET".to_string(),
                parameters: vec![
                    ParameterDefinition { name: "NAME".to_string(), type_name: TypeExpression::new("STRING") },
                    ParameterDefinition { name: "TIMES".to_string(), type_name: TypeExpression::new("SINGLE") },
                ],
            },
            StatementKind::ProcedureEnd,
        ]);
    }

    #[test]
    fn function_header_with_return_type() {
        let statements = build("FUNCTION Twice(n AS INTEGER) AS LONG\nRETURN n * 2\nEND FUNCTION");

        assert_eq!(statements[0], StatementKind::FunctionStart {
            name: "TWICE".to_string(),
            parameters: vec![
                ParameterDefinition { name: "N".to_string(), type_name: TypeExpression::new("INTEGER") },
            ],
            return_type: TypeExpression::new("LONG"),
        });

        assert_eq!(statements[1], StatementKind::Return {
            expression: Some(vec![variable("N"), Expression::ArithmeticOperator(ArithmeticOperator::Multiply), integer(2)]),
        });
        assert_eq!(statements[2], StatementKind::FunctionEnd);
    }

    #[rstest]
    #[case("DIM x", "X", "SINGLE", false, None)]
    #[case("DIM name AS string", "NAME", "string", false, None)]
    #[case("DIM SHARED list(10) AS INTEGER", "LIST", "INTEGER", true, Some(vec![integer(10)]))]
    #[case("DIM items()", "ITEMS", "SINGLE", true, None)]
    fn declarations(
        #[case] source: &str,
        #[case] name: &str,
        #[case] type_name: &str,
        #[case] is_array: bool,
        #[case] array_size: Option<Vec<Expression>>,
    ) {
        let statements = build(source);
        assert_eq!(statements, vec![StatementKind::VariableDeclaration {
            name: name.to_string(),
            data_type: DataTypeDescriptor {
                type_name: TypeExpression::new(type_name),
                is_array,
                array_size,
            },
        }]);
    }

    #[test]
    fn assignments_with_and_without_let() {
        let statements = build("DIM a(3)\nLET a(1) = 5\na(2) = a(1) + 1");

        assert_eq!(statements[1], StatementKind::Assignment {
            variable: "A".to_string(),
            index: Some(vec![integer(1)]),
            expression: vec![integer(5)],
        });

        assert_eq!(statements[2], StatementKind::Assignment {
            variable: "A".to_string(),
            index: Some(vec![integer(2)]),
            expression: vec![
                variable("A"),
                Expression::Complex(vec![integer(1)]),
                Expression::ArithmeticOperator(ArithmeticOperator::Add),
                integer(1),
            ],
        });
    }

    #[test]
    fn let_of_an_undeclared_variable_is_a_syntax_error() {
        let (code_dom, _) = build_with_log("PROCEDURE MAIN\nLET y = 1\nEND PROCEDURE", UnknownTokenPolicy::Skip);
        let error = code_dom.unwrap_err();

        assert_eq!(error.line(), Some(LineNumber::new(2)));
        assert_eq!(error.column(), Some(4));
    }

    #[test]
    fn print_items_keep_their_separators() {
        let statements = build("DIM x\nPRINT \"a\"; x, 3;\nPRINT");

        assert_eq!(statements[1], StatementKind::Print {
            items: vec![
                PrintItem { expression: vec![string("a")], separator: Some(PrintSeparator::Semicolon) },
                PrintItem { expression: vec![variable("X")], separator: Some(PrintSeparator::Comma) },
                PrintItem { expression: vec![integer(3)], separator: Some(PrintSeparator::Semicolon) },
            ],
        });
        assert_eq!(statements[2], StatementKind::Print { items: Vec::new() });
    }

    #[test]
    fn file_commands() {
        let statements = build("DIM h\nDIM line AS STRING\nOPEN \"out.txt\" FOR OUTPUT AS #1\nOPEN \"in.txt\" FOR INPUT AS h\nPRINT #1, \"x\"\nINPUT #h, line\nCLOSE #1\nCLOSE");

        assert_eq!(statements[2], StatementKind::Open {
            path: vec![string("out.txt")],
            mode: OpenMode::Output,
            target: OpenTarget::Handle(vec![integer(1)]),
        });
        assert_eq!(statements[3], StatementKind::Open {
            path: vec![string("in.txt")],
            mode: OpenMode::Input,
            target: OpenTarget::Variable("H".to_string()),
        });
        assert_eq!(statements[4], StatementKind::PrintFile {
            handle: vec![integer(1)],
            items: vec![PrintItem { expression: vec![string("x")], separator: None }],
        });
        assert_eq!(statements[5], StatementKind::InputFile {
            handle: vec![variable("H")],
            variable: "LINE".to_string(),
        });
        assert_eq!(statements[6], StatementKind::Close { handle: Some(vec![integer(1)]) });
        assert_eq!(statements[7], StatementKind::Close { handle: None });
    }

    #[rstest]
    #[case("OPEN \"f\" FOR OUTPUT")]
    #[case("OPEN \"f\" AS #1")]
    #[case("OPEN FOR OUTPUT AS #1")]
    #[case("OPEN \"f\" FOR READING AS #1")]
    fn malformed_open_is_a_syntax_error(#[case] source: &str) {
        let (code_dom, _) = build_with_log(source, UnknownTokenPolicy::Skip);
        assert!(matches!(code_dom.unwrap_err(), BasaltError::SyntaxError { .. }));
    }

    #[test]
    fn calls_with_and_without_parentheses() {
        let statements = build("PROCEDURE Show(a, b)\nEND PROCEDURE\nCALL Show(1, 2)\nShow 1, (2 + 3)\nCALL Show");

        assert_eq!(statements[2], StatementKind::Call {
            procedure: "SHOW".to_string(),
            arguments: vec![vec![integer(1)], vec![integer(2)]],
        });
        assert_eq!(statements[3], StatementKind::Call {
            procedure: "SHOW".to_string(),
            arguments: vec![
                vec![integer(1)],
                vec![Expression::Complex(vec![integer(2), Expression::ArithmeticOperator(ArithmeticOperator::Add), integer(3)])],
            ],
        });
        assert_eq!(statements[4], StatementKind::Call {
            procedure: "SHOW".to_string(),
            arguments: Vec::new(),
        });
    }

    #[test]
    fn unknown_commands_pass_through_and_are_logged() {
        let (code_dom, log) = build_with_log("BEEP 3\nINPUT x\n' note\nEND", UnknownTokenPolicy::Skip);
        let kinds: Vec<StatementKind> = code_dom.unwrap().into_statements().into_iter().map(|x| x.kind).collect();

        assert_eq!(kinds, vec![
            StatementKind::Pass { text: "BEEP 3".to_string() },
            StatementKind::Pass { text: "INPUT x".to_string() },
            StatementKind::Comment,
            StatementKind::End,
        ]);
        assert_eq!(log.len(), 2);
        assert!(log[0].contains("BEEP 3"));
    }

    #[test]
    fn reject_policy_reaches_into_statements() {
        let (code_dom, _) = build_with_log("DIM x\nx = 1 + unknown", UnknownTokenPolicy::Reject);
        let error = code_dom.unwrap_err();
        assert_eq!(error.line(), Some(LineNumber::new(2)));
    }

    #[rstest]
    #[case("DIM x\nx = 1 + 2 ' sum", 1)]
    #[case("PRINT 1 ' note", 0)]
    #[case("PRINT \"a\"; REM more", 0)]
    #[case("PROCEDURE MAIN\nEND PROCEDURE ' footer", 1)]
    fn trailing_comments_are_not_part_of_the_statement(#[case] source: &str, #[case] index: usize) {
        let (code_dom, _) = build_with_log(source, UnknownTokenPolicy::Reject);
        let statements = code_dom.unwrap().into_statements();

        assert!(!statements[index].kind.is_inert(), "{:?}", statements[index]);
    }

    #[test]
    fn trailing_comment_after_print_keeps_the_items() {
        let (code_dom, _) = build_with_log("PRINT 1 ' note", UnknownTokenPolicy::Reject);
        let statements = code_dom.unwrap().into_statements();

        assert_eq!(statements[0].kind, StatementKind::Print {
            items: vec![PrintItem { expression: vec![integer(1)], separator: None }],
        });
    }

    #[test]
    fn split_top_level_ignores_nested_separators() {
        let tokens = Lexer::new("a, (b, c), d").tokenize();
        let parts = split_top_level(&tokens, TokenKind::ArgumentSeparator);
        assert_eq!(parts.len(), 3);
    }
}
