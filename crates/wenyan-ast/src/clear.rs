//! Location stripping.

use crate::*;

/// Remove every source location from a tree.
///
/// Parsing the same text twice gives trees that are equal after clearing.
pub trait ClearLocations {
    fn clear_locations(&mut self);
}

impl<T: ClearLocations> ClearLocations for Vec<T> {
    fn clear_locations(&mut self) {
        for item in self {
            item.clear_locations();
        }
    }
}

impl<T: ClearLocations> ClearLocations for Option<T> {
    fn clear_locations(&mut self) {
        if let Some(inner) = self {
            inner.clear_locations();
        }
    }
}

impl<T: ClearLocations> ClearLocations for Box<T> {
    fn clear_locations(&mut self) {
        (**self).clear_locations();
    }
}

impl ClearLocations for Program {
    fn clear_locations(&mut self) {
        self.body.clear_locations();
    }
}

impl ClearLocations for Statement {
    fn clear_locations(&mut self) {
        self.loc = None;
        self.node.clear_locations();
    }
}

impl ClearLocations for Literal {
    fn clear_locations(&mut self) {
        self.loc = None;
    }
}

impl ClearLocations for Identifier {
    fn clear_locations(&mut self) {
        self.loc = None;
    }
}

impl ClearLocations for Answer {
    fn clear_locations(&mut self) {
        self.loc = None;
    }
}

impl ClearLocations for Operand {
    fn clear_locations(&mut self) {
        match self {
            Operand::Literal(lit) => lit.clear_locations(),
            Operand::Identifier(ident) => ident.clear_locations(),
            Operand::Answer(answer) => answer.clear_locations(),
        }
    }
}

impl ClearLocations for Expression {
    fn clear_locations(&mut self) {
        match self {
            Expression::Literal(lit) => lit.clear_locations(),
            Expression::Identifier(ident) => ident.clear_locations(),
            Expression::Answer(answer) => answer.clear_locations(),
            Expression::Unary(op) => op.expression.clear_locations(),
            Expression::Binary(op) => {
                op.left.clear_locations();
                op.right.clear_locations();
            }
            Expression::Array(op) => {
                op.base.clear_locations();
                if let ArrayOperator::Item(index) = &mut op.operator {
                    index.clear_locations();
                }
            }
        }
    }
}

impl ClearLocations for IfStatement {
    fn clear_locations(&mut self) {
        self.condition.clear_locations();
        self.body.clear_locations();
        self.else_.clear_locations();
    }
}

impl ClearLocations for StatementKind {
    fn clear_locations(&mut self) {
        match self {
            StatementKind::VariableDeclaration(decl) => {
                decl.names.clear_locations();
                decl.values.clear_locations();
            }
            StatementKind::FunctionDeclaration(func) => {
                match &mut func.name {
                    FunctionName::Identifier(ident) => ident.clear_locations(),
                    FunctionName::Answer(answer) => answer.clear_locations(),
                }
                for arg in &mut func.args {
                    arg.name.clear_locations();
                }
                func.body.clear_locations();
            }
            StatementKind::ObjectDeclaration(obj) => {
                for entry in &mut obj.entries {
                    entry.value.clear_locations();
                }
                obj.assign.clear_locations();
            }
            StatementKind::If(stmt) => stmt.clear_locations(),
            StatementKind::While(stmt) => {
                stmt.condition.clear_locations();
                stmt.body.clear_locations();
            }
            StatementKind::ForIn(stmt) => {
                stmt.collection.clear_locations();
                stmt.iterator.clear_locations();
                stmt.body.clear_locations();
            }
            StatementKind::ForRange(stmt) => {
                if let LoopCount::Identifier(ident) = &mut stmt.range {
                    ident.clear_locations();
                }
                stmt.iterator.clear_locations();
                stmt.body.clear_locations();
            }
            StatementKind::Try(stmt) => {
                stmt.body.clear_locations();
                for catch in &mut stmt.catches {
                    catch.binding.clear_locations();
                    catch.body.clear_locations();
                }
            }
            StatementKind::Operation(stmt) => {
                stmt.expression.clear_locations();
                stmt.assign.clear_locations();
            }
            StatementKind::Express(stmt) => {
                stmt.expression.clear_locations();
                stmt.assign.clear_locations();
            }
            StatementKind::FunctionCall(call) => {
                call.function.clear_locations();
                call.args.clear_locations();
                call.assign.clear_locations();
            }
            StatementKind::ArrayConcat(concat) => {
                concat.target.clear_locations();
                concat.values.clear_locations();
                concat.assign.clear_locations();
            }
            StatementKind::ArrayPush(push) => {
                push.target.clear_locations();
                push.values.clear_locations();
            }
            StatementKind::Reassign(stmt) => {
                stmt.assign.clear_locations();
                stmt.value.clear_locations();
            }
            StatementKind::Print(print) => print.expressions.clear_locations(),
            StatementKind::Return(ret) => ret.expression.clear_locations(),
            StatementKind::Throw(throw) => throw.message.clear_locations(),
            StatementKind::Comment(_)
            | StatementKind::Import(_)
            | StatementKind::Macro(_)
            | StatementKind::Break
            | StatementKind::Continue
            | StatementKind::Discard => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wenyan_diagnostics::{Position, SourceLocation};

    fn loc(offset: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(
            Position::new(1, offset + 1, offset),
            Position::new(1, offset + 2, offset + 3),
        ))
    }

    #[test]
    fn test_clears_nested_locations() {
        let stmt = |at: usize| {
            Statement::new(
                StatementKind::Express(ExpressStatement {
                    expression: Expression::binary(
                        Expression::Identifier(Identifier::new("甲").with_loc(loc(at))),
                        BinaryOperator::Add,
                        Expression::Literal(Literal::number(1.0).with_loc(loc(at + 3))),
                    ),
                    assign: None,
                }),
                loc(at),
            )
        };
        let mut a = Program {
            body: vec![stmt(0)],
        };
        let mut b = Program {
            body: vec![stmt(9)],
        };
        assert_ne!(a, b);

        a.clear_locations();
        b.clear_locations();
        assert_eq!(a, b);
        assert_eq!(a.body[0].loc, None);
    }

    #[test]
    fn test_clears_else_chain() {
        let mut stmt = IfStatement {
            condition: Some(Expression::Answer(Answer::new(0).with_loc(loc(0)))),
            body: vec![],
            else_: Some(Box::new(IfStatement {
                condition: Some(Expression::Answer(Answer::new(1).with_loc(loc(6)))),
                body: vec![],
                else_: None,
            })),
        };
        stmt.clear_locations();
        let inner = stmt.else_.as_ref().unwrap();
        assert_eq!(
            inner.condition,
            Some(Expression::Answer(Answer::new(1)))
        );
    }
}
