//! Recursive descent parser for wenyan.
//!
//! Statements are dispatched on their leading keyword through [`RULES`].
//! Each rule consumes one logical statement and returns the statements it
//! produced; the driver loop attaches locations, binds a following
//! `名之曰「x」` to the statement's result, and handles recovery.

use crate::error::ParseError;
use crate::macros;
use smol_str::SmolStr;
use tracing::{debug, trace};
use wenyan_ast::*;
use wenyan_diagnostics::{DiagnosticKind, DiagnosticsTracker, FatalError, SourceLocation};
use wenyan_lexer::{Keyword, Token, TokenKind, TypeName};

/// Parser configuration.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Attach source locations to AST nodes.
    pub locations: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { locations: true }
    }
}

type Rule = fn(&mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError>;

/// Statement dispatch, keyed by the leading keyword.
const RULES: &[(Keyword, Rule)] = &[
    (Keyword::DeclarePrivate, declare_private),
    (Keyword::DeclarePublic, declare_public),
    (Keyword::Have, have),
    (Keyword::NameIt, name_answers),
    (Keyword::Print, print),
    (Keyword::Discard, discard),
    (Keyword::Comment, comment),
    (Keyword::Past, reassign),
    (Keyword::If, if_statement),
    (Keyword::Loop, loop_forever),
    (Keyword::RangeLoop, for_range),
    (Keyword::ForEach, for_in),
    (Keyword::Break, break_statement),
    (Keyword::Continue, continue_statement),
    (Keyword::Return, return_value),
    (Keyword::ReturnAnswer, return_answer),
    (Keyword::ReturnVoid, return_void),
    (Keyword::Call, call),
    (Keyword::Add, arithmetic),
    (Keyword::Sub, arithmetic),
    (Keyword::Mul, arithmetic),
    (Keyword::Div, arithmetic),
    (Keyword::Not, negate),
    (Keyword::Express, express),
    (Keyword::Push, push),
    (Keyword::Concat, concat),
    (Keyword::ImportFrom, import),
    (Keyword::MacroFrom, macro_statement),
    (Keyword::Try, try_statement),
    (Keyword::Throw, throw),
];

/// Largest count a declaration or argument group may state. Defaults are
/// materialized per value, so the count bounds the work done.
pub const MAX_COUNT: usize = 1 << 16;

const IF_TERMINATORS: &[Keyword] = &[Keyword::ElseIf, Keyword::Else, Keyword::BlockEnd];
const CATCH_TERMINATORS: &[Keyword] = &[Keyword::CatchIs, Keyword::CatchAll, Keyword::TryEnd];

/// Parser for a wenyan token stream.
pub struct Parser<'t> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    tracker: &'t mut DiagnosticsTracker,
    options: ParseOptions,
}

impl<'t> Parser<'t> {
    /// Create a parser. A missing trailing `Eof` token is added.
    pub fn new(
        mut tokens: Vec<Token>,
        tracker: &'t mut DiagnosticsTracker,
        options: ParseOptions,
    ) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let (offset, end) = tokens
                .last()
                .map(|t| (t.span.end, t.loc.end))
                .unwrap_or_default();
            tokens.push(Token::new(
                TokenKind::Eof,
                offset..offset,
                SourceLocation::new(end, end),
            ));
        }
        Self {
            tokens,
            pos: 0,
            tracker,
            options,
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    pub(crate) fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Look `n` tokens ahead. Past the end this is the `Eof` token.
    pub(crate) fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at(&self, keyword: Keyword) -> bool {
        self.current().is(keyword)
    }

    pub(crate) fn eat(&mut self, keyword: Keyword) -> bool {
        if self.at(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.at(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("`{keyword}`")))
        }
    }

    /// Skip end markers and separators.
    pub(crate) fn skip_punctuation(&mut self) {
        while matches!(self.current().kind, TokenKind::Period | TokenKind::Comma) {
            self.advance();
        }
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                loc: token.loc,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: token.kind.clone(),
                loc: token.loc,
            }
        }
    }

    /// The location to attach to a node built from `token`.
    pub(crate) fn loc(&self, token: &Token) -> Option<SourceLocation> {
        self.options.locations.then_some(token.loc)
    }

    fn loc_since(&self, start: &Token) -> Option<SourceLocation> {
        self.options
            .locations
            .then(|| start.loc.merge(self.previous().loc))
    }

    /// Record a recoverable inconsistency and keep going.
    pub(crate) fn warn(
        &mut self,
        message: impl Into<String>,
        loc: &SourceLocation,
    ) -> Result<(), ParseError> {
        self.tracker
            .report(DiagnosticKind::RecoverableParse, message, Some(loc), true)?;
        Ok(())
    }

    fn fail(&mut self, err: ParseError) -> FatalError {
        match err {
            ParseError::Fatal(fatal) => fatal,
            other => self.tracker.fatal(
                DiagnosticKind::StructuralParse,
                other.to_string(),
                other.location(),
            ),
        }
    }

    /// Skip past the next end marker.
    fn synchronize(&mut self) {
        while !self.current().kind.is_end_marker() {
            self.advance();
        }
        self.eat_period();
    }

    fn eat_period(&mut self) {
        if self.current().kind == TokenKind::Period {
            self.advance();
        }
    }

    // ========================================================================
    // Program and blocks
    // ========================================================================

    /// Parse the whole token stream.
    pub fn parse_program(&mut self) -> Result<Program, FatalError> {
        let body = self.parse_block(&[])?;
        debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    /// Parse statements until one of `terminators` (left unconsumed), or until
    /// the end of input when `terminators` is empty.
    pub(crate) fn parse_block(
        &mut self,
        terminators: &[Keyword],
    ) -> Result<Vec<Statement>, FatalError> {
        let mut body = Vec::new();
        loop {
            self.skip_punctuation();
            match self.current().kind.clone() {
                TokenKind::Eof if terminators.is_empty() => return Ok(body),
                TokenKind::Eof => {
                    let expected = terminators
                        .iter()
                        .map(|k| format!("`{k}`"))
                        .collect::<Vec<_>>()
                        .join(" or ");
                    let err = self.unexpected(expected);
                    return Err(self.fail(err));
                }
                TokenKind::Keyword(keyword) if terminators.contains(&keyword) => return Ok(body),
                _ => self.parse_statement(&mut body)?,
            }
        }
    }

    fn parse_statement(&mut self, body: &mut Vec<Statement>) -> Result<(), FatalError> {
        let start = self.current().clone();
        let rule = match &start.kind {
            TokenKind::Keyword(keyword) => RULES
                .iter()
                .find(|(k, _)| k == keyword)
                .map(|(_, rule)| *rule),
            _ => None,
        };
        let Some(rule) = rule else {
            let err = ParseError::UnknownStatement {
                found: start.kind.clone(),
                loc: start.loc,
            };
            return Err(self.fail(err));
        };

        match rule(self) {
            Ok(kinds) => {
                let loc = self.loc_since(&start);
                let mut statements: Vec<Statement> = kinds
                    .into_iter()
                    .map(|kind| Statement::new(kind, loc))
                    .collect();
                if let Some(last) = statements.last_mut() {
                    self.bind_name(last);
                }
                trace!(keyword = %start.kind, count = statements.len(), "parsed statement");
                body.extend(statements);
                Ok(())
            }
            Err(err) if err.is_recoverable() => {
                let loc = err.location().copied();
                self.tracker.report(
                    DiagnosticKind::RecoverableParse,
                    err.to_string(),
                    loc.as_ref(),
                    true,
                )?;
                self.synchronize();
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// `名之曰「x」` with a single name right after a result-producing
    /// statement names that result.
    fn bind_name(&mut self, statement: &mut Statement) {
        self.skip_punctuation();
        let single_name = self.at(Keyword::NameIt)
            && self.peek(1).is(Keyword::Say)
            && matches!(self.peek(2).kind, TokenKind::Identifier(_))
            && !self.peek(3).is(Keyword::Say);
        if !single_name {
            return;
        }
        let Some(assign) = statement.node.assign_mut() else {
            return;
        };
        if assign.is_some() {
            return;
        }

        self.advance();
        self.advance();
        let token = self.advance();
        if let TokenKind::Identifier(name) = &token.kind {
            *assign = Some(
                Identifier::new(name.clone())
                    .declaring()
                    .with_loc(self.loc(&token)),
            );
        }
        statement.loc = statement.loc.map(|loc| loc.merge(token.loc));
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    /// A positive count of at most [`MAX_COUNT`].
    fn parse_count(&mut self) -> Result<usize, ParseError> {
        let loc = self.current().loc;
        match self.current().kind {
            TokenKind::Number(n) if n > MAX_COUNT as i64 => Err(ParseError::CountTooLarge {
                count: n,
                limit: MAX_COUNT,
                loc,
            }),
            TokenKind::Number(n) if n > 0 => {
                self.advance();
                Ok(n as usize)
            }
            _ => Err(self.unexpected("a count")),
        }
    }

    fn parse_type(&mut self) -> Result<VarType, ParseError> {
        match self.current().kind {
            TokenKind::Type(name) => {
                self.advance();
                Ok(var_type(name))
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    /// `名之曰「a」曰「b」`, or nothing.
    fn parse_names(&mut self) -> Result<Vec<Identifier>, ParseError> {
        if !self.eat(Keyword::NameIt) {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        while self.eat(Keyword::Say) {
            names.push(self.parse_identifier()?);
        }
        if names.is_empty() {
            return Err(self.unexpected("`曰`"));
        }
        Ok(names)
    }

    /// An optional `名之曰「e」` binding.
    fn parse_binding(&mut self) -> Result<Option<Identifier>, ParseError> {
        self.skip_punctuation();
        if !self.at(Keyword::NameIt) {
            return Ok(None);
        }
        self.advance();
        self.expect(Keyword::Say)?;
        let name = self.parse_identifier()?.declaring();
        self.skip_punctuation();
        Ok(Some(name))
    }

    /// Quoted text: a string literal or a bare quoted name.
    fn parse_text(&mut self) -> Result<(SmolStr, Token), ParseError> {
        match &self.current().kind {
            TokenKind::String(text) | TokenKind::Identifier(text) => {
                let text = text.clone();
                Ok((text, self.advance()))
            }
            _ => Err(self.unexpected("quoted text")),
        }
    }

    fn check_literal(&mut self, declared: VarType, value: &Operand) -> Result<(), ParseError> {
        let Operand::Literal(lit) = value else {
            return Ok(());
        };
        let natural = lit.natural_type();
        if declared == VarType::Auto || natural == declared {
            return Ok(());
        }
        let loc = self.previous().loc;
        self.warn(
            format!("expected a {declared:?} value, found a {natural:?} literal"),
            &loc,
        )
    }

    /// `是謂「name」` followed by the closing keyword.
    fn check_closing_name(
        &mut self,
        expected: Option<&SmolStr>,
        closing: Keyword,
    ) -> Result<(), ParseError> {
        self.expect(Keyword::ThisIs)?;
        let (name, token) = self.parse_text()?;
        if let Some(expected) = expected {
            if *expected != name {
                self.warn(
                    format!("closing name 「{name}」 does not match 「{expected}」"),
                    &token.loc,
                )?;
            }
        }
        self.expect(closing)?;
        Ok(())
    }

    fn count_mismatch(
        &self,
        what: &'static str,
        expected: usize,
        found: usize,
        at: &Token,
    ) -> ParseError {
        ParseError::CountMismatch {
            what,
            expected,
            found,
            loc: at.loc,
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn declaration(&mut self, accessability: Accessability) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let count_token = self.current().clone();
        let count = self.parse_count()?;
        let var_type = self.parse_type()?;
        self.skip_punctuation();

        let mut values = Vec::new();
        while self.eat(Keyword::Say) {
            let value = self.parse_operand()?;
            self.check_literal(var_type, &value)?;
            values.push(value);
            self.skip_punctuation();
        }
        let names = self.parse_names()?;
        self.skip_punctuation();

        if values.is_empty() && count == 1 {
            if var_type == VarType::Function
                && (self.at(Keyword::FunctionArgs) || self.at(Keyword::FunctionBody))
            {
                let function = self.function_declaration(names, accessability, &count_token)?;
                return Ok(vec![function]);
            }
            if var_type == VarType::Object && self.at(Keyword::ObjectBody) {
                let object = self.object_declaration(names, &count_token)?;
                return Ok(vec![object]);
            }
        }

        self.variable_declaration(var_type, count, names, values, accessability, &count_token)
    }

    fn variable_declaration(
        &mut self,
        var_type: VarType,
        count: usize,
        names: Vec<Identifier>,
        values: Vec<Operand>,
        accessability: Accessability,
        at: &Token,
    ) -> Result<Vec<StatementKind>, ParseError> {
        let values = if values.is_empty() {
            let Some(default) = Literal::default_for(var_type) else {
                return Err(self.unexpected("a function body"));
            };
            vec![Operand::Literal(default); count]
        } else if values.len() != count {
            return Err(self.count_mismatch("values", count, values.len(), at));
        } else {
            values
        };

        if names.is_empty() {
            return Ok(values
                .into_iter()
                .map(|value| {
                    StatementKind::Express(ExpressStatement {
                        expression: value.into(),
                        assign: None,
                    })
                })
                .collect());
        }
        if names.len() != count {
            return Err(self.count_mismatch("names", count, names.len(), at));
        }

        Ok(vec![StatementKind::VariableDeclaration(VariableDeclaration {
            var_type,
            count,
            names,
            values,
            accessability,
        })])
    }

    fn function_declaration(
        &mut self,
        mut names: Vec<Identifier>,
        accessability: Accessability,
        at: &Token,
    ) -> Result<StatementKind, ParseError> {
        if names.len() > 1 {
            return Err(self.count_mismatch("names", 1, names.len(), at));
        }
        let name = match names.pop() {
            Some(ident) => FunctionName::Identifier(ident.declaring()),
            None => FunctionName::Answer(Answer::new(0)),
        };

        let mut args = Vec::new();
        if self.eat(Keyword::FunctionArgs) {
            self.skip_punctuation();
            self.expect(Keyword::MustFirstGet)?;
            loop {
                self.skip_punctuation();
                if self.eat(Keyword::FunctionBodyAfterArgs) {
                    break;
                }
                let group = self.current().clone();
                let count = self.parse_count()?;
                let var_type = self.parse_type()?;
                self.skip_punctuation();
                let mut found = 0;
                while self.eat(Keyword::Say) {
                    let name = self.parse_identifier()?.declaring();
                    args.push(FunctionArgument { name, var_type });
                    found += 1;
                    self.skip_punctuation();
                }
                if found != count {
                    return Err(self.count_mismatch("arguments", count, found, &group));
                }
            }
        } else {
            self.expect(Keyword::FunctionBody)?;
        }

        let body = self.parse_block(&[Keyword::ThisIs])?;
        let expected = match &name {
            FunctionName::Identifier(ident) => Some(&ident.name),
            FunctionName::Answer(_) => None,
        };
        let expected = expected.cloned();
        self.check_closing_name(expected.as_ref(), Keyword::FunctionEnd)?;

        Ok(StatementKind::FunctionDeclaration(FunctionDeclaration {
            name,
            args,
            body,
            accessability,
        }))
    }

    fn object_declaration(
        &mut self,
        mut names: Vec<Identifier>,
        at: &Token,
    ) -> Result<StatementKind, ParseError> {
        if names.len() > 1 {
            return Err(self.count_mismatch("names", 1, names.len(), at));
        }
        let assign = names.pop().map(Identifier::declaring);

        self.expect(Keyword::ObjectBody)?;
        self.skip_punctuation();
        let mut entries = Vec::new();
        while self.eat(Keyword::ObjectKey) {
            let (key, _) = self.parse_text()?;
            self.expect(Keyword::ConditionEnd)?;
            self.skip_punctuation();
            let var_type = self.parse_type()?;
            self.expect(Keyword::Say)?;
            let value = self.parse_operand()?;
            self.check_literal(var_type, &value)?;
            entries.push(ObjectEntry {
                key,
                var_type,
                value: value.into(),
            });
            self.skip_punctuation();
        }

        let expected = assign.as_ref().map(|ident| ident.name.clone());
        self.check_closing_name(expected.as_ref(), Keyword::ObjectEnd)?;

        Ok(StatementKind::ObjectDeclaration(ObjectDeclaration {
            entries,
            assign,
        }))
    }

    /// `有數三。名之曰「甲」。`
    fn single_declaration(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        let keyword = self.advance();
        let var_type = self.parse_type()?;
        let value = self.parse_operand()?;
        self.check_literal(var_type, &value)?;
        self.skip_punctuation();
        let names = self.parse_names()?;
        self.variable_declaration(
            var_type,
            1,
            names,
            vec![value],
            Accessability::Private,
            &keyword,
        )
    }

    /// A standalone `名之曰「a」曰「b」` names the latest answers, oldest first.
    fn name_answers(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        let names = self.parse_names()?;
        let count = names.len();
        let values = (0..count)
            .rev()
            .map(|offset| Operand::Answer(Answer::new(offset)))
            .collect();
        Ok(vec![StatementKind::VariableDeclaration(VariableDeclaration {
            var_type: VarType::Auto,
            count,
            names,
            values,
            accessability: Accessability::Private,
        })])
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn if_statement(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let condition = self.parse_expression()?;
        self.expect(Keyword::ConditionEnd)?;
        let body = self.parse_block(IF_TERMINATORS)?;

        let mut branches = Vec::new();
        loop {
            if self.eat(Keyword::ElseIf) {
                let condition = self.parse_expression()?;
                self.expect(Keyword::ConditionEnd)?;
                let body = self.parse_block(IF_TERMINATORS)?;
                branches.push((Some(condition), body));
            } else if self.eat(Keyword::Else) {
                let body = self.parse_block(&[Keyword::BlockEnd])?;
                branches.push((None, body));
                break;
            } else {
                break;
            }
        }
        self.expect(Keyword::BlockEnd)?;

        let else_ = branches
            .into_iter()
            .rev()
            .fold(None, |else_, (condition, body)| {
                Some(Box::new(IfStatement {
                    condition,
                    body,
                    else_,
                }))
            });
        Ok(vec![StatementKind::If(IfStatement {
            condition: Some(condition),
            body,
            else_,
        })])
    }

    /// `恆為是。...云云。`
    fn loop_forever(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        let keyword = self.advance();
        let body = self.parse_block(&[Keyword::BlockEnd])?;
        self.expect(Keyword::BlockEnd)?;
        let condition = Expression::Literal(Literal::boolean(true).with_loc(self.loc(&keyword)));
        Ok(vec![StatementKind::While(WhileStatement { condition, body })])
    }

    /// `為是百遍。...云云。`
    fn for_range(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let range = match &self.current().kind {
            TokenKind::Number(n) => {
                let n = *n as f64;
                self.advance();
                LoopCount::Count(n)
            }
            TokenKind::Identifier(_) => LoopCount::Identifier(self.parse_identifier()?),
            _ => return Err(self.unexpected("a count")),
        };
        self.expect(Keyword::Times)?;
        let body = self.parse_block(&[Keyword::BlockEnd])?;
        self.expect(Keyword::BlockEnd)?;
        Ok(vec![StatementKind::ForRange(ForRangeStatement {
            range,
            iterator: None,
            body,
        })])
    }

    /// `凡「列」中之「物」。...云云。`
    fn for_in(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let collection = self.parse_identifier()?;
        let iterator = if self.eat(Keyword::ForEachIn) {
            Some(self.parse_identifier()?.declaring())
        } else {
            None
        };
        let body = self.parse_block(&[Keyword::BlockEnd])?;
        self.expect(Keyword::BlockEnd)?;
        Ok(vec![StatementKind::ForIn(ForInStatement {
            collection,
            iterator,
            body,
        })])
    }

    fn try_statement(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let body = self.parse_block(&[Keyword::Catch, Keyword::TryEnd])?;

        let mut catches = Vec::new();
        if self.eat(Keyword::Catch) {
            loop {
                self.skip_punctuation();
                if self.eat(Keyword::CatchIs) {
                    let (error_type, _) = self.parse_text()?;
                    self.expect(Keyword::CatchIsEnd)?;
                    let binding = self.parse_binding()?;
                    let body = self.parse_block(CATCH_TERMINATORS)?;
                    catches.push(CatchStatement {
                        error_type: Some(error_type),
                        binding,
                        body,
                    });
                } else if self.eat(Keyword::CatchAll) {
                    let binding = self.parse_binding()?;
                    let body = self.parse_block(&[Keyword::TryEnd])?;
                    catches.push(CatchStatement {
                        error_type: None,
                        binding,
                        body,
                    });
                    break;
                } else {
                    break;
                }
            }
        }
        self.expect(Keyword::TryEnd)?;

        Ok(vec![StatementKind::Try(TryStatement { body, catches })])
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// `加A以B`, `加A於B`, and `除A以B。所餘幾何`.
    fn arithmetic(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        let keyword = self.advance();
        let mut operator = match keyword.kind {
            TokenKind::Keyword(Keyword::Add) => BinaryOperator::Add,
            TokenKind::Keyword(Keyword::Sub) => BinaryOperator::Sub,
            TokenKind::Keyword(Keyword::Mul) => BinaryOperator::Mul,
            _ => BinaryOperator::Div,
        };
        let first = self.parse_term()?;
        let (left, right) = if self.eat(Keyword::With) {
            (first, self.parse_term()?)
        } else if self.eat(Keyword::At) {
            let second = self.parse_term()?;
            (second, first)
        } else {
            return Err(self.unexpected("`以` or `於`"));
        };

        if operator == BinaryOperator::Div {
            let mark = self.pos;
            self.skip_punctuation();
            if self.eat(Keyword::Remainder) {
                operator = BinaryOperator::Mod;
            } else {
                self.pos = mark;
            }
        }

        Ok(vec![StatementKind::Operation(OperationStatement {
            expression: Expression::binary(left, operator, right),
            assign: None,
        })])
    }

    /// `變A`
    fn negate(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let operand = self.parse_term()?;
        Ok(vec![StatementKind::Operation(OperationStatement {
            expression: Expression::not(operand),
            assign: None,
        })])
    }

    /// `夫A` or `夫A B ... 中有陽乎`.
    fn express(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let first = self.parse_expression()?;
        let folds = self.at_operand() || self.at(Keyword::AnyTrue) || self.at(Keyword::AllTrue);
        if !folds {
            return Ok(vec![StatementKind::Express(ExpressStatement {
                expression: first,
                assign: None,
            })]);
        }

        let mut rest = Vec::new();
        while self.at_operand() {
            rest.push(self.parse_term()?);
        }
        let operator = if self.eat(Keyword::AnyTrue) {
            BinaryOperator::Or
        } else if self.eat(Keyword::AllTrue) {
            BinaryOperator::And
        } else {
            return Err(self.unexpected("`中有陽乎` or `中無陰乎`"));
        };
        let expression = rest
            .into_iter()
            .fold(first, |left, right| Expression::binary(left, operator, right));
        Ok(vec![StatementKind::Operation(OperationStatement {
            expression,
            assign: None,
        })])
    }

    /// `施「f」於A於B`
    fn call(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let function = self.parse_identifier()?;
        let mut args = Vec::new();
        while self.eat(Keyword::At) {
            args.push(self.parse_operand()?);
        }
        Ok(vec![StatementKind::FunctionCall(FunctionCall {
            function,
            args,
            assign: None,
        })])
    }

    fn with_values(&mut self) -> Result<Vec<Operand>, ParseError> {
        let mut values = Vec::new();
        while self.eat(Keyword::With) {
            values.push(self.parse_operand()?);
        }
        if values.is_empty() {
            return Err(self.unexpected("`以`"));
        }
        Ok(values)
    }

    /// `充「列」以一以二`
    fn push(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let target = self.parse_operand()?;
        let values = self.with_values()?;
        Ok(vec![StatementKind::ArrayPush(ArrayPush { target, values })])
    }

    /// `銜「甲」以「乙」`
    fn concat(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let target = self.parse_operand()?;
        let values = self.with_values()?;
        Ok(vec![StatementKind::ArrayConcat(ArrayConcat {
            target,
            values,
            assign: None,
        })])
    }

    /// `昔之「甲」者。今「乙」是矣。`
    fn reassign(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let target_token = self.current().clone();
        let assign = self.parse_term()?;
        let assignable = match &assign {
            Expression::Identifier(_) => true,
            Expression::Array(op) => matches!(op.operator, ArrayOperator::Item(_)),
            _ => false,
        };
        if !assignable {
            return Err(ParseError::InvalidAssignTarget {
                loc: target_token.loc,
            });
        }
        self.expect(Keyword::ConditionEnd)?;
        self.skip_punctuation();
        self.expect(Keyword::Now)?;
        let value = self.parse_expression()?;
        self.expect(Keyword::ReassignEnd)?;
        Ok(vec![StatementKind::Reassign(ReassignStatement { assign, value })])
    }

    // ========================================================================
    // Modules and macros
    // ========================================================================

    /// `吾嘗觀「「算經」」之書。方悟「正弦」「餘弦」之義。`
    fn import(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        let (name, _) = self.parse_text()?;
        self.expect(Keyword::ImportBook)?;
        self.skip_punctuation();

        let mut imports = Vec::new();
        if self.eat(Keyword::ImportNames) {
            while let TokenKind::Identifier(name) = &self.current().kind {
                imports.push(name.clone());
                self.advance();
            }
            self.expect(Keyword::ImportEnd)?;
        }
        Ok(vec![StatementKind::Import(ImportStatement { name, imports })])
    }

    /// `或云「「from」」。蓋謂「「to」」。` rewrites the rest of the stream.
    fn macro_statement(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        self.skip_punctuation();
        let (from, from_token) = self.parse_text()?;
        self.skip_punctuation();
        self.expect(Keyword::MacroTo)?;
        self.skip_punctuation();
        let (to, to_token) = self.parse_text()?;

        let pattern = self.macro_tokens(&from, &from_token)?;
        let replacement = self.macro_tokens(&to, &to_token)?;
        if let (Some(pattern), Some(replacement)) = (pattern, replacement) {
            if pattern.is_empty() {
                self.warn("macro pattern is empty", &from_token.loc)?;
            } else {
                let count = macros::expand(&mut self.tokens, self.pos, &pattern, &replacement);
                debug!(%from, %to, count, "expanded macro");
            }
        }
        Ok(vec![StatementKind::Macro(MacroStatement { from, to })])
    }

    fn macro_tokens(&mut self, text: &str, at: &Token) -> Result<Option<Vec<Token>>, ParseError> {
        let mut scratch = DiagnosticsTracker::new();
        match wenyan_lexer::tokenize(text, &mut scratch) {
            Ok(mut tokens) if scratch.is_empty() => {
                tokens.pop();
                Ok(Some(tokens))
            }
            _ => {
                self.warn(format!("macro text 「{text}」 does not scan"), &at.loc)?;
                Ok(None)
            }
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// `嗚呼。「「文氣淤塞」」之禍。曰「「訊」」。`
    fn throw(&mut self) -> Result<Vec<StatementKind>, ParseError> {
        self.advance();
        self.skip_punctuation();
        let (error_type, _) = self.parse_text()?;
        self.expect(Keyword::Disaster)?;
        let mark = self.pos;
        self.skip_punctuation();
        let message = if self.eat(Keyword::Say) {
            Some(self.parse_operand()?)
        } else {
            self.pos = mark;
            None
        };
        Ok(vec![StatementKind::Throw(Throw {
            error_type,
            message,
        })])
    }
}

fn var_type(name: TypeName) -> VarType {
    match name {
        TypeName::Number => VarType::Number,
        TypeName::String => VarType::String,
        TypeName::Boolean => VarType::Boolean,
        TypeName::Array => VarType::Array,
        TypeName::Object => VarType::Object,
        TypeName::Function => VarType::Function,
        TypeName::Auto => VarType::Auto,
    }
}

// ============================================================================
// Rule table entries
// ============================================================================

fn declare_private(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.declaration(Accessability::Private)
}

fn declare_public(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.declaration(Accessability::Public)
}

fn have(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.single_declaration()
}

fn name_answers(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.name_answers()
}

fn print(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    Ok(vec![StatementKind::Print(Print { expressions: None })])
}

fn discard(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    Ok(vec![StatementKind::Discard])
}

fn comment(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    p.skip_punctuation();
    let (value, _) = p.parse_text()?;
    Ok(vec![StatementKind::Comment(Comment { value })])
}

fn reassign(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.reassign()
}

fn if_statement(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.if_statement()
}

fn loop_forever(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.loop_forever()
}

fn for_range(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.for_range()
}

fn for_in(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.for_in()
}

fn break_statement(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    Ok(vec![StatementKind::Break])
}

fn continue_statement(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    Ok(vec![StatementKind::Continue])
}

fn return_value(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    let expression = p.parse_expression()?;
    Ok(vec![StatementKind::Return(Return {
        expression: Some(expression),
    })])
}

fn return_answer(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    let keyword = p.advance();
    let answer = Answer::new(0).with_loc(p.loc(&keyword));
    Ok(vec![StatementKind::Return(Return {
        expression: Some(Expression::Answer(answer)),
    })])
}

fn return_void(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.advance();
    Ok(vec![StatementKind::Return(Return { expression: None })])
}

fn call(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.call()
}

fn arithmetic(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.arithmetic()
}

fn negate(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.negate()
}

fn express(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.express()
}

fn push(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.push()
}

fn concat(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.concat()
}

fn import(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.import()
}

fn macro_statement(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.macro_statement()
}

fn try_statement(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.try_statement()
}

fn throw(p: &mut Parser<'_>) -> Result<Vec<StatementKind>, ParseError> {
    p.throw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wenyan_diagnostics::Diagnostic;

    fn parse_with(source: &str, options: ParseOptions) -> (Option<Program>, Vec<Diagnostic>) {
        let mut tracker = DiagnosticsTracker::new();
        let ast = wenyan_lexer::tokenize(source, &mut tracker)
            .and_then(|tokens| Parser::new(tokens, &mut tracker, options).parse_program())
            .ok();
        (ast, tracker.into_diagnostics())
    }

    fn parse(source: &str) -> (Option<Program>, Vec<Diagnostic>) {
        parse_with(source, ParseOptions::default())
    }

    /// Parse without diagnostics and strip locations.
    fn body(source: &str) -> Vec<StatementKind> {
        let (ast, diagnostics) = parse(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        let mut ast = ast.unwrap();
        ast.clear_locations();
        ast.body.into_iter().map(|s| s.node).collect()
    }

    fn num(n: f64) -> Operand {
        Operand::Literal(Literal::number(n))
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier::new(name))
    }

    #[test]
    fn test_empty_program() {
        let (ast, diagnostics) = parse("");
        assert_eq!(ast, Some(Program { body: vec![] }));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_single_declaration() {
        assert_eq!(
            body("吾有一數。曰三。名之曰「甲」。"),
            vec![StatementKind::VariableDeclaration(VariableDeclaration {
                var_type: VarType::Number,
                count: 1,
                names: vec![Identifier::new("甲")],
                values: vec![num(3.0)],
                accessability: Accessability::Private,
            })]
        );
    }

    #[test]
    fn test_multiple_declaration() {
        assert_eq!(
            body("吾有三數。曰一。曰三。曰五。名之曰「甲」曰「乙」曰「丙」。"),
            vec![StatementKind::VariableDeclaration(VariableDeclaration {
                var_type: VarType::Number,
                count: 3,
                names: vec![
                    Identifier::new("甲"),
                    Identifier::new("乙"),
                    Identifier::new("丙"),
                ],
                values: vec![num(1.0), num(3.0), num(5.0)],
                accessability: Accessability::Private,
            })]
        );
    }

    #[test]
    fn test_public_declaration_with_defaults() {
        assert_eq!(
            body("今有二言。名之曰「甲」曰「乙」。"),
            vec![StatementKind::VariableDeclaration(VariableDeclaration {
                var_type: VarType::String,
                count: 2,
                names: vec![Identifier::new("甲"), Identifier::new("乙")],
                values: vec![
                    Operand::Literal(Literal::string("")),
                    Operand::Literal(Literal::string("")),
                ],
                accessability: Accessability::Public,
            })]
        );
    }

    #[test]
    fn test_declaration_without_names_pushes_answers() {
        assert_eq!(
            body("吾有二數。曰一。曰二。"),
            vec![
                StatementKind::Express(ExpressStatement {
                    expression: num(1.0).into(),
                    assign: None,
                }),
                StatementKind::Express(ExpressStatement {
                    expression: num(2.0).into(),
                    assign: None,
                }),
            ]
        );
    }

    #[test]
    fn test_have_declares_one_value() {
        assert_eq!(
            body("有數五。名之曰「甲」。"),
            vec![StatementKind::VariableDeclaration(VariableDeclaration {
                var_type: VarType::Number,
                count: 1,
                names: vec![Identifier::new("甲")],
                values: vec![num(5.0)],
                accessability: Accessability::Private,
            })]
        );
    }

    #[test]
    fn test_partial_values_are_fatal() {
        let (ast, diagnostics) = parse("吾有二數。曰一。名之曰「甲」曰「乙」。");
        assert!(ast.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
        assert!(!diagnostics[0].recoverable);
    }

    #[test]
    fn test_name_count_mismatch_is_fatal() {
        let (ast, diagnostics) = parse("吾有二數。曰一。曰二。名之曰「甲」。");
        assert!(ast.is_none());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
        assert_eq!(diagnostics[0].message, "expected 2 names, found 1");
    }

    #[test]
    fn test_oversized_count_is_fatal() {
        let (ast, diagnostics) = parse("吾有一兆數。名之曰「甲」。");
        assert!(ast.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
        assert_eq!(
            diagnostics[0].message,
            "cannot declare 1000000000000 at once, the limit is 65536"
        );
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 3));

        let (ast, diagnostics) = parse("吾有一兆數。");
        assert!(ast.is_none());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
    }

    #[test]
    fn test_count_at_limit_is_accepted() {
        let source = format!("吾有{}數。", "六萬五千五百三十六");
        let (ast, diagnostics) = parse(&source);
        assert!(diagnostics.is_empty());
        assert_eq!(ast.unwrap().body.len(), MAX_COUNT);
    }

    #[test]
    fn test_literal_kind_mismatch_is_recoverable() {
        let (ast, diagnostics) = parse("吾有一數。曰「「書」」。名之曰「甲」。");
        assert_eq!(ast.unwrap().body.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::RecoverableParse);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 7));
    }

    #[test]
    fn test_name_binds_result() {
        assert_eq!(
            body("加一以二。名之曰「和」。"),
            vec![StatementKind::Operation(OperationStatement {
                expression: Expression::binary(
                    num(1.0).into(),
                    BinaryOperator::Add,
                    num(2.0).into()
                ),
                assign: Some(Identifier::new("和").declaring()),
            })]
        );
    }

    #[test]
    fn test_several_names_take_answers() {
        let statements = body("加一以二。減三以四。名之曰「甲」曰「乙」。");
        assert_eq!(statements.len(), 3);
        assert_eq!(
            statements[2],
            StatementKind::VariableDeclaration(VariableDeclaration {
                var_type: VarType::Auto,
                count: 2,
                names: vec![Identifier::new("甲"), Identifier::new("乙")],
                values: vec![
                    Operand::Answer(Answer::new(1)),
                    Operand::Answer(Answer::new(0)),
                ],
                accessability: Accessability::Private,
            })
        );
    }

    #[test]
    fn test_arithmetic_forms() {
        let statements = body("加一於二。除十以三。所餘幾何。");
        let expressions: Vec<_> = statements
            .into_iter()
            .map(|s| match s {
                StatementKind::Operation(op) => op.expression,
                other => panic!("expected operation, got {other:?}"),
            })
            .collect();
        assert_eq!(
            expressions,
            vec![
                Expression::binary(num(2.0).into(), BinaryOperator::Add, num(1.0).into()),
                Expression::binary(num(10.0).into(), BinaryOperator::Mod, num(3.0).into()),
            ]
        );
    }

    #[test]
    fn test_express_fold() {
        assert_eq!(
            body("夫「甲」「乙」「丙」中無陰乎。"),
            vec![StatementKind::Operation(OperationStatement {
                expression: Expression::binary(
                    Expression::binary(ident("甲"), BinaryOperator::And, ident("乙")),
                    BinaryOperator::And,
                    ident("丙"),
                ),
                assign: None,
            })]
        );
    }

    #[test]
    fn test_if_chain() {
        let statements = body("若「甲」等於一者。書之。或若「甲」等於二者。噫。若非。書之。云云。");
        let StatementKind::If(stmt) = &statements[0] else {
            panic!("expected if");
        };
        assert!(stmt.condition.is_some());
        let second = stmt.else_.as_ref().unwrap();
        assert!(second.condition.is_some());
        assert_eq!(second.body, vec![Statement::bare(StatementKind::Discard)]);
        let last = second.else_.as_ref().unwrap();
        assert!(last.condition.is_none());
        assert!(last.else_.is_none());
    }

    #[test]
    fn test_if_without_else() {
        let statements = body("若其然者。書之。也。");
        let StatementKind::If(stmt) = &statements[0] else {
            panic!("expected if");
        };
        assert!(stmt.else_.is_none());
    }

    #[test]
    fn test_loops() {
        let statements = body("恆為是。乃止。云云。為是三遍。乃止是遍。云云。凡「列」中之「物」。書之。云云。");
        assert!(matches!(&statements[0], StatementKind::While(w) if w.body == vec![Statement::bare(StatementKind::Break)]));
        assert!(matches!(&statements[1], StatementKind::ForRange(f) if f.range == LoopCount::Count(3.0)));
        let StatementKind::ForIn(for_in) = &statements[2] else {
            panic!("expected for-in");
        };
        assert_eq!(for_in.collection, Identifier::new("列"));
        assert_eq!(for_in.iterator, Some(Identifier::new("物").declaring()));
    }

    #[test]
    fn test_function_declaration() {
        let statements = body(
            "吾有一術。名之曰「加法」。欲行是術。必先得二數。曰「甲」。曰「乙」。\
             乃行是術曰。加「甲」以「乙」。乃得矣。是謂「加法」之術也。",
        );
        let StatementKind::FunctionDeclaration(func) = &statements[0] else {
            panic!("expected function");
        };
        assert_eq!(
            func.name,
            FunctionName::Identifier(Identifier::new("加法").declaring())
        );
        assert_eq!(func.args.len(), 2);
        assert_eq!(func.args[1].var_type, VarType::Number);
        assert_eq!(func.body.len(), 2);
        assert_eq!(func.accessability, Accessability::Private);
    }

    #[test]
    fn test_closing_name_mismatch_is_recoverable() {
        let (ast, diagnostics) = parse("吾有一術。名之曰「甲」。是術曰。乃歸空無。是謂「乙」之術也。");
        assert!(ast.is_some());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::RecoverableParse);
    }

    #[test]
    fn test_argument_count_mismatch_is_fatal() {
        let (ast, diagnostics) =
            parse("吾有一術。名之曰「甲」。欲行是術。必先得二數。曰「子」。乃行是術曰。乃歸空無。是謂「甲」之術也。");
        assert!(ast.is_none());
        assert_eq!(diagnostics[0].message, "expected 2 arguments, found 1");
    }

    #[test]
    fn test_object_declaration() {
        let statements = body(
            "吾有一物。名之曰「書」。其物如是。物之「「名」」者。言曰「「春秋」」。\
             物之「「頁」」者。數曰三百。是謂「書」之物也。",
        );
        assert_eq!(
            statements,
            vec![StatementKind::ObjectDeclaration(ObjectDeclaration {
                entries: vec![
                    ObjectEntry {
                        key: "名".into(),
                        var_type: VarType::String,
                        value: Expression::Literal(Literal::string("春秋")),
                    },
                    ObjectEntry {
                        key: "頁".into(),
                        var_type: VarType::Number,
                        value: Expression::Literal(Literal::number(300.0)),
                    },
                ],
                assign: Some(Identifier::new("書").declaring()),
            })]
        );
    }

    #[test]
    fn test_reassign() {
        assert_eq!(
            body("昔之「列」之一者。今「乙」是矣。"),
            vec![StatementKind::Reassign(ReassignStatement {
                assign: Expression::Array(ArrayOperation {
                    base: Operand::Identifier(Identifier::new("列")),
                    operator: ArrayOperator::Item(num(1.0)),
                }),
                value: ident("乙"),
            })]
        );
    }

    #[test]
    fn test_try_catch() {
        let statements = body(
            "姑妄行此。嗚呼。「「禍」」之禍。如事不諧。豈「「禍」」之禍歟。名之曰「e」。書之。\
             不知何禍歟。書之。乃作罷。",
        );
        let StatementKind::Try(stmt) = &statements[0] else {
            panic!("expected try");
        };
        assert_eq!(
            stmt.body,
            vec![Statement::bare(StatementKind::Throw(Throw {
                error_type: "禍".into(),
                message: None,
            }))]
        );
        assert_eq!(stmt.catches.len(), 2);
        assert_eq!(stmt.catches[0].error_type.as_deref(), Some("禍"));
        assert_eq!(
            stmt.catches[0].binding,
            Some(Identifier::new("e").declaring())
        );
        assert_eq!(stmt.catches[1].error_type, None);
    }

    #[test]
    fn test_import_and_call() {
        assert_eq!(
            body("吾嘗觀「「算經」」之書。方悟「正弦」「餘弦」之義。施「正弦」於一。"),
            vec![
                StatementKind::Import(ImportStatement {
                    name: "算經".into(),
                    imports: vec!["正弦".into(), "餘弦".into()],
                }),
                StatementKind::FunctionCall(FunctionCall {
                    function: Identifier::new("正弦"),
                    args: vec![num(1.0)],
                    assign: None,
                }),
            ]
        );
    }

    #[test]
    fn test_macro_rewrites_later_tokens() {
        assert_eq!(
            body("或云「「噫」」。蓋謂「「書之」」。噫。"),
            vec![
                StatementKind::Macro(MacroStatement {
                    from: "噫".into(),
                    to: "書之".into(),
                }),
                StatementKind::Print(Print { expressions: None }),
            ]
        );
    }

    #[test]
    fn test_unknown_statement_is_fatal() {
        let (ast, diagnostics) = parse("「甲」。");
        assert!(ast.is_none());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
        assert_eq!(diagnostics[0].message, "no statement starts with `「甲」`");
    }

    #[test]
    fn test_unexpected_token_drops_statement() {
        let (ast, diagnostics) = parse("施一。書之。");
        let ast = ast.unwrap();
        assert_eq!(ast.body.len(), 1);
        assert_eq!(ast.body[0].node, StatementKind::Print(Print { expressions: None }));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].recoverable);
    }

    #[test]
    fn test_unclosed_block_is_fatal() {
        let (ast, diagnostics) = parse("若其然者。書之。");
        assert!(ast.is_none());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralParse);
    }

    #[test]
    fn test_reparse_is_structurally_equal() {
        let source = "吾有一數。曰三。名之曰「甲」。若「甲」大於二者。書之。云云。";
        let (a, _) = parse(source);
        let (b, _) = parse(source);
        let (mut a, mut b) = (a.unwrap(), b.unwrap());
        a.clear_locations();
        b.clear_locations();
        assert_eq!(a, b);
    }

    #[test]
    fn test_statement_locations() {
        let (ast, _) = parse("書之。\n噫。");
        let loc = ast.unwrap().body[1].loc.unwrap();
        assert_eq!((loc.start.line, loc.start.column), (2, 1));

        let (ast, _) = parse_with("書之。", ParseOptions { locations: false });
        assert_eq!(ast.unwrap().body[0].loc, None);
    }
}
