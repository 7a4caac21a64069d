//! Parse command - parse a file and show the AST.

use super::{print_diagnostic, read_source};
use std::path::Path;
use wenyan_ast::{Expression, FunctionName, IfStatement, Operand, Statement, StatementKind};
use wenyan_diagnostics::LineIndex;
use wenyan_parser::parse;

pub(crate) fn run(file: &Path, json: bool) -> miette::Result<()> {
    let source = read_source(file)?;

    if !json {
        println!("Parsing: {}\n", file.display());
    }

    let result = parse(&source);

    let lines = LineIndex::new(&source);
    for diagnostic in &result.diagnostics {
        print_diagnostic(file, &lines, diagnostic);
    }

    let Some(ast) = &result.ast else {
        return Err(miette::miette!(
            "{} parse error(s)",
            result.diagnostics.iter().filter(|d| !d.recoverable).count()
        ));
    };

    if json {
        let text = serde_json::to_string_pretty(ast)
            .map_err(|e| miette::miette!("Failed to serialize AST: {}", e))?;
        println!("{}", text);
    } else {
        println!("AST:");
        print_block(&ast.body, 1);
        println!(
            "\n{} statements, {} diagnostics",
            ast.body.len(),
            result.diagnostics.len()
        );
    }

    Ok(())
}

fn print_block(body: &[Statement], indent: usize) {
    for statement in body {
        print_statement(statement, indent);
    }
}

fn print_statement(statement: &Statement, indent: usize) {
    let prefix = "  ".repeat(indent);
    let at = statement
        .loc
        .map(|loc| format!("  @{}:{}", loc.start.line, loc.start.column))
        .unwrap_or_default();

    match &statement.node {
        StatementKind::VariableDeclaration(decl) => {
            let names: Vec<_> = decl.names.iter().map(|n| n.name.as_str()).collect();
            let values: Vec<_> = decl.values.iter().map(operand).collect();
            println!(
                "{}VariableDeclaration {:?} {:?}: [{}] = [{}]{}",
                prefix,
                decl.accessability,
                decl.var_type,
                names.join(", "),
                values.join(", "),
                at
            );
        }
        StatementKind::FunctionDeclaration(func) => {
            let name = match &func.name {
                FunctionName::Identifier(ident) => ident.name.to_string(),
                FunctionName::Answer(_) => "其".to_string(),
            };
            let args: Vec<_> = func.args.iter().map(|a| a.name.name.as_str()).collect();
            println!(
                "{}FunctionDeclaration {:?} {}({}){}",
                prefix,
                func.accessability,
                name,
                args.join(", "),
                at
            );
            print_block(&func.body, indent + 1);
        }
        StatementKind::ObjectDeclaration(decl) => {
            let keys: Vec<_> = decl.entries.iter().map(|e| e.key.as_str()).collect();
            println!("{}ObjectDeclaration {{{}}}{}", prefix, keys.join(", "), at);
        }
        StatementKind::If(stmt) => print_if(stmt, indent, &at),
        StatementKind::While(stmt) => {
            println!("{}While {}{}", prefix, expression(&stmt.condition), at);
            print_block(&stmt.body, indent + 1);
        }
        StatementKind::ForIn(stmt) => {
            let item = stmt.iterator.as_ref().map(|i| i.name.as_str()).unwrap_or("_");
            println!("{}ForIn {} in {}{}", prefix, item, stmt.collection.name, at);
            print_block(&stmt.body, indent + 1);
        }
        StatementKind::ForRange(stmt) => {
            println!("{}ForRange {:?}{}", prefix, stmt.range, at);
            print_block(&stmt.body, indent + 1);
        }
        StatementKind::Try(stmt) => {
            println!("{}Try{}", prefix, at);
            print_block(&stmt.body, indent + 1);
            for catch in &stmt.catches {
                println!(
                    "{}Catch {}",
                    prefix,
                    catch.error_type.as_deref().unwrap_or("*")
                );
                print_block(&catch.body, indent + 1);
            }
        }
        StatementKind::Operation(stmt) => {
            println!("{}Operation {}{}", prefix, expression(&stmt.expression), at)
        }
        StatementKind::Express(stmt) => {
            println!("{}Express {}{}", prefix, expression(&stmt.expression), at)
        }
        StatementKind::FunctionCall(call) => {
            let args: Vec<_> = call.args.iter().map(operand).collect();
            println!(
                "{}FunctionCall {}({}){}",
                prefix,
                call.function.name,
                args.join(", "),
                at
            );
        }
        other => println!("{}{}{}", prefix, summary(other), at),
    }
}

fn print_if(stmt: &IfStatement, indent: usize, at: &str) {
    let prefix = "  ".repeat(indent);
    match &stmt.condition {
        Some(condition) => println!("{}If {}{}", prefix, expression(condition), at),
        None => println!("{}Else", prefix),
    }
    print_block(&stmt.body, indent + 1);
    if let Some(next) = &stmt.else_ {
        print_if(next, indent, "");
    }
}

fn summary(kind: &StatementKind) -> String {
    match kind {
        StatementKind::ArrayConcat(stmt) => format!("ArrayConcat {}", operand(&stmt.target)),
        StatementKind::ArrayPush(stmt) => format!("ArrayPush {}", operand(&stmt.target)),
        StatementKind::Reassign(stmt) => format!(
            "Reassign {} = {}",
            expression(&stmt.assign),
            expression(&stmt.value)
        ),
        StatementKind::Print(_) => "Print".to_string(),
        StatementKind::Comment(comment) => format!("Comment {:?}", comment.value),
        StatementKind::Import(stmt) => format!("Import {} [{}]", stmt.name, stmt.imports.join(", ")),
        StatementKind::Macro(stmt) => format!("Macro {:?} => {:?}", stmt.from, stmt.to),
        StatementKind::Return(ret) => match &ret.expression {
            Some(e) => format!("Return {}", expression(e)),
            None => "Return".to_string(),
        },
        StatementKind::Break => "Break".to_string(),
        StatementKind::Continue => "Continue".to_string(),
        StatementKind::Throw(throw) => format!("Throw {}", throw.error_type),
        StatementKind::Discard => "Discard".to_string(),
        other => format!("{:?}", other),
    }
}

fn operand(operand: &Operand) -> String {
    match operand {
        Operand::Literal(lit) => format!("{:?}", lit.value),
        Operand::Identifier(ident) => ident.name.to_string(),
        Operand::Answer(answer) => format!("其[{}]", answer.offset),
    }
}

fn expression(expr: &Expression) -> String {
    match expr {
        Expression::Literal(lit) => format!("{:?}", lit.value),
        Expression::Identifier(ident) => ident.name.to_string(),
        Expression::Answer(answer) => format!("其[{}]", answer.offset),
        Expression::Unary(op) => format!("!{}", expression(&op.expression)),
        Expression::Binary(op) => format!(
            "({} {:?} {})",
            expression(&op.left),
            op.operator,
            expression(&op.right)
        ),
        Expression::Array(op) => format!("{}.{:?}", operand(&op.base), op.operator),
    }
}
