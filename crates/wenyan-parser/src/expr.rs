//! Operands and expressions.
//!
//! Binary operators climb three levels: `且 或`, then comparisons, then
//! arithmetic. Everything is left-associative and prefix `變` binds tighter
//! than any binary operator.

use crate::error::ParseError;
use crate::parser::Parser;
use wenyan_ast::*;
use wenyan_lexer::{Keyword, TokenKind};

fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    let TokenKind::Keyword(keyword) = kind else {
        return None;
    };
    let op = match keyword {
        Keyword::And => BinaryOperator::And,
        Keyword::Or => BinaryOperator::Or,
        Keyword::Eq => BinaryOperator::Eq,
        Keyword::Ne => BinaryOperator::Ne,
        Keyword::Lt => BinaryOperator::Lt,
        Keyword::Gt => BinaryOperator::Gt,
        Keyword::Le => BinaryOperator::Le,
        Keyword::Ge => BinaryOperator::Ge,
        Keyword::Add => BinaryOperator::Add,
        Keyword::Sub => BinaryOperator::Sub,
        Keyword::Mul => BinaryOperator::Mul,
        Keyword::Div => BinaryOperator::Div,
        Keyword::Mod => BinaryOperator::Mod,
        _ => return None,
    };
    Some(op)
}

impl Parser<'_> {
    pub(crate) fn at_operand(&self) -> bool {
        match &self.current().kind {
            TokenKind::Number(_)
            | TokenKind::String(_)
            | TokenKind::Bool(_)
            | TokenKind::Identifier(_) => true,
            TokenKind::Keyword(keyword) => *keyword == Keyword::Answer,
            _ => false,
        }
    }

    /// A literal, a quoted name or `其`.
    pub(crate) fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        let token = self.current().clone();
        let loc = self.loc(&token);
        let operand = match &token.kind {
            TokenKind::Number(n) => Operand::Literal(Literal::number(*n as f64).with_loc(loc)),
            TokenKind::String(s) => Operand::Literal(Literal::string(s.clone()).with_loc(loc)),
            TokenKind::Bool(b) => Operand::Literal(Literal::boolean(*b).with_loc(loc)),
            TokenKind::Identifier(name) => {
                Operand::Identifier(Identifier::new(name.clone()).with_loc(loc))
            }
            TokenKind::Keyword(Keyword::Answer) => Operand::Answer(Answer::new(0).with_loc(loc)),
            _ => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(operand)
    }

    pub(crate) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.current().clone();
        match &token.kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Identifier::new(name.clone()).with_loc(self.loc(&token)))
            }
            _ => Err(self.unexpected("a quoted name")),
        }
    }

    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = binary_operator(&self.current().kind) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary(precedence + 1)?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if self.eat(Keyword::Not) {
            let operand = self.parse_unary()?;
            return Ok(Expression::not(operand));
        }
        self.parse_term()
    }

    /// An operand with an optional `之長`, `之其餘` or `之B`, or `其然` /
    /// `其不然`.
    pub(crate) fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let token = self.current().clone();
        if token.is(Keyword::AnswerTrue) {
            self.advance();
            return Ok(Expression::Answer(Answer::new(0).with_loc(self.loc(&token))));
        }
        if token.is(Keyword::AnswerFalse) {
            self.advance();
            let answer = Expression::Answer(Answer::new(0).with_loc(self.loc(&token)));
            return Ok(Expression::not(answer));
        }

        let base = self.parse_operand()?;
        let operator = if self.eat(Keyword::Length) {
            ArrayOperator::Length
        } else if self.eat(Keyword::Rest) {
            ArrayOperator::Rest
        } else if self.eat(Keyword::Of) {
            ArrayOperator::Item(self.parse_operand()?)
        } else {
            return Ok(base.into());
        };
        Ok(Expression::Array(ArrayOperation { base, operator }))
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use wenyan_ast::*;

    fn condition(source: &str) -> Expression {
        let ast = parse(source).ast.unwrap();
        match &ast.body[0].node {
            StatementKind::If(stmt) => {
                let mut condition = stmt.condition.clone().unwrap();
                condition.clear_locations();
                condition
            }
            other => panic!("expected if, got {other:?}"),
        }
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier::new(name))
    }

    fn num(n: f64) -> Expression {
        Expression::Literal(Literal::number(n))
    }

    #[test]
    fn test_arithmetic_binds_tighter_than_comparison() {
        let expr = condition("若「甲」加一等於三者。云云。");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(ident("甲"), BinaryOperator::Add, num(1.0)),
                BinaryOperator::Eq,
                num(3.0),
            )
        );
    }

    #[test]
    fn test_logic_is_loosest() {
        let expr = condition("若「甲」大於一且「乙」小於二者。云云。");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(ident("甲"), BinaryOperator::Gt, num(1.0)),
                BinaryOperator::And,
                Expression::binary(ident("乙"), BinaryOperator::Lt, num(2.0)),
            )
        );
    }

    #[test]
    fn test_left_associative() {
        let expr = condition("若「甲」減一減二者。云云。");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::binary(ident("甲"), BinaryOperator::Sub, num(1.0)),
                BinaryOperator::Sub,
                num(2.0),
            )
        );
    }

    #[test]
    fn test_not_binds_tightest() {
        let expr = condition("若變「甲」或「乙」者。云云。");
        assert_eq!(
            expr,
            Expression::binary(
                Expression::not(ident("甲")),
                BinaryOperator::Or,
                ident("乙"),
            )
        );
    }

    #[test]
    fn test_answer_conditions() {
        assert_eq!(
            condition("若其然者。云云。"),
            Expression::Answer(Answer::new(0))
        );
        assert_eq!(
            condition("若其不然者。云云。"),
            Expression::not(Expression::Answer(Answer::new(0)))
        );
    }

    #[test]
    fn test_array_operations() {
        assert_eq!(
            condition("若「列」之長大於零者。云云。"),
            Expression::binary(
                Expression::Array(ArrayOperation {
                    base: Operand::Identifier(Identifier::new("列")),
                    operator: ArrayOperator::Length,
                }),
                BinaryOperator::Gt,
                num(0.0),
            )
        );
        assert_eq!(
            condition("若「列」之一等於「列」之「「首」」者。云云。"),
            Expression::binary(
                Expression::Array(ArrayOperation {
                    base: Operand::Identifier(Identifier::new("列")),
                    operator: ArrayOperator::Item(Operand::Literal(Literal::number(1.0))),
                }),
                BinaryOperator::Eq,
                Expression::Array(ArrayOperation {
                    base: Operand::Identifier(Identifier::new("列")),
                    operator: ArrayOperator::Item(Operand::Literal(Literal::string("首"))),
                }),
            )
        );
    }
}
