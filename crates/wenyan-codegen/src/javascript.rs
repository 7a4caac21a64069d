//! The JavaScript backend.
//!
//! Output is plain ES2015 text. Every result-producing statement without a
//! name stores its value in a `$ansN` constant and pushes it on the answer
//! stack of the current frame; `其` and friends read that stack. Public
//! declarations become properties of a module-level `__public__` object that
//! is exported through `module.exports` when the host provides one.

use crate::error::CodegenError;
use crate::scope::Scope;
use crate::Backend;
use tracing::{debug, trace};
use wenyan_ast::*;
use wenyan_diagnostics::{DiagnosticKind, DiagnosticsTracker, FatalError};

const INDENT: &str = "  ";

const PUBLIC_HEADER: &str = "const __public__ = {};\n";
const PUBLIC_TRAILER: &str = "if (typeof module !== \"undefined\" && module.exports) {\n  module.exports = __public__;\n}\n";

/// Generates JavaScript from a wenyan program.
#[derive(Debug)]
pub struct JavaScriptBackend {
    out: String,
    depth: usize,
    scope: Scope,
    temps: usize,
    uses_public: bool,
}

impl Default for JavaScriptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for JavaScriptBackend {
    fn name(&self) -> &'static str {
        "js"
    }

    fn transpile(
        &mut self,
        program: &Program,
        tracker: &mut DiagnosticsTracker,
    ) -> Result<String, FatalError> {
        *self = Self::new();
        debug!(statements = program.body.len(), "generating javascript");

        if let Err(err) = self.statements(&program.body) {
            return Err(tracker.fatal(
                DiagnosticKind::Generation,
                err.to_string(),
                err.location(),
            ));
        }

        let body = std::mem::take(&mut self.out);
        let mut out = String::with_capacity(body.len() + PUBLIC_TRAILER.len());
        if self.uses_public {
            out.push_str(PUBLIC_HEADER);
        }
        out.push_str(&body);
        if self.uses_public {
            out.push_str(PUBLIC_TRAILER);
        }
        debug!(temporaries = self.temps, bytes = out.len(), "generated javascript");
        Ok(out)
    }
}

impl JavaScriptBackend {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            scope: Scope::new(),
            temps: 0,
            uses_public: false,
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn temp(&mut self, prefix: &str) -> String {
        let n = self.temps;
        self.temps += 1;
        format!("${prefix}{n}")
    }

    /// Emit `body` one level deeper, in a fresh frame.
    fn block(&mut self, body: &[Statement]) -> Result<(), CodegenError> {
        self.scope.push();
        self.depth += 1;
        self.statements(body)?;
        self.depth -= 1;
        self.scope.pop();
        Ok(())
    }

    fn statements(&mut self, body: &[Statement]) -> Result<(), CodegenError> {
        for statement in body {
            self.statement(statement)?;
        }
        Ok(())
    }

    /// Name a result, or push it as the newest answer.
    fn result(&mut self, value: String, assign: Option<&Identifier>) {
        match assign {
            Some(ident) => self.declare(ident, value, Accessability::Private),
            None => {
                let temp = self.temp("ans");
                self.line(format!("const {temp} = {value};"));
                self.scope.push_answer(temp);
            }
        }
    }

    fn declare(&mut self, ident: &Identifier, value: String, accessability: Accessability) {
        match accessability {
            Accessability::Public => {
                let target = self.scope.bind_public(&ident.name);
                self.uses_public = true;
                self.line(format!("{target} = {value};"));
            }
            Accessability::Private => {
                let (binding, fresh) = self.scope.bind(&ident.name);
                if fresh {
                    self.line(format!("let {binding} = {value};"));
                } else {
                    self.line(format!("{binding} = {value};"));
                }
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self, statement: &Statement) -> Result<(), CodegenError> {
        trace!(loc = ?statement.loc, "statement");
        match &statement.node {
            StatementKind::VariableDeclaration(decl) => self.variable_declaration(decl),
            StatementKind::FunctionDeclaration(func) => self.function_declaration(func),
            StatementKind::ObjectDeclaration(decl) => {
                let mut fields = Vec::with_capacity(decl.entries.len());
                for entry in &decl.entries {
                    let value = self.expression(&entry.value)?;
                    fields.push(format!("{}: {value}", string(&entry.key)));
                }
                let value = if fields.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", fields.join(", "))
                };
                self.result(value, decl.assign.as_ref());
                Ok(())
            }
            StatementKind::If(stmt) => self.if_statement(stmt),
            StatementKind::While(stmt) => {
                let condition = self.expression(&stmt.condition)?;
                self.line(format!("while ({condition}) {{"));
                self.block(&stmt.body)?;
                self.line("}");
                Ok(())
            }
            StatementKind::ForIn(stmt) => self.for_in(stmt),
            StatementKind::ForRange(stmt) => {
                let count = match &stmt.range {
                    LoopCount::Count(n) => number(*n),
                    LoopCount::Identifier(ident) => self.identifier(ident)?,
                };
                let i = self.temp("i");
                self.line(format!("for (let {i} = 0; {i} < {count}; {i}++) {{"));
                self.block(&stmt.body)?;
                self.line("}");
                Ok(())
            }
            StatementKind::Try(stmt) => self.try_statement(stmt),
            StatementKind::Operation(stmt) => {
                let value = self.expression(&stmt.expression)?;
                self.result(value, stmt.assign.as_ref());
                Ok(())
            }
            StatementKind::Express(stmt) => {
                let value = self.expression(&stmt.expression)?;
                self.result(value, stmt.assign.as_ref());
                Ok(())
            }
            StatementKind::FunctionCall(call) => {
                let function = self.identifier(&call.function)?;
                let args = self.operands(&call.args)?;
                self.result(format!("{function}({args})"), call.assign.as_ref());
                Ok(())
            }
            StatementKind::ArrayConcat(stmt) => {
                let target = self.operand(&stmt.target)?;
                let values = self.operands(&stmt.values)?;
                self.result(format!("{target}.concat({values})"), stmt.assign.as_ref());
                Ok(())
            }
            StatementKind::ArrayPush(stmt) => {
                let target = self.operand(&stmt.target)?;
                let values = self.operands(&stmt.values)?;
                self.line(format!("{target}.push({values});"));
                Ok(())
            }
            StatementKind::Reassign(stmt) => {
                let target = self.expression(&stmt.assign)?;
                let value = self.expression(&stmt.value)?;
                self.line(format!("{target} = {value};"));
                Ok(())
            }
            StatementKind::Print(print) => {
                let args = match &print.expressions {
                    Some(expressions) => expressions
                        .iter()
                        .map(|e| self.expression(e))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => self.scope.take_answers(),
                };
                self.line(format!("console.log({});", args.join(", ")));
                Ok(())
            }
            StatementKind::Comment(comment) => {
                if comment.value.is_empty() {
                    self.line("//");
                }
                for text in comment.value.lines() {
                    self.line(format!("// {text}"));
                }
                Ok(())
            }
            StatementKind::Import(stmt) => {
                self.import(stmt);
                Ok(())
            }
            StatementKind::Macro(stmt) => {
                trace!(from = %stmt.from, to = %stmt.to, "macro already expanded");
                Ok(())
            }
            StatementKind::Return(ret) => {
                match &ret.expression {
                    Some(expression) => {
                        let value = self.expression(expression)?;
                        self.line(format!("return {value};"));
                    }
                    None => self.line("return;"),
                }
                Ok(())
            }
            StatementKind::Break => {
                self.line("break;");
                Ok(())
            }
            StatementKind::Continue => {
                self.line("continue;");
                Ok(())
            }
            StatementKind::Throw(throw) => {
                let message = match &throw.message {
                    Some(message) => self.operand(message)?,
                    None => String::new(),
                };
                self.line(format!(
                    "throw Object.assign(new Error({message}), {{ name: {} }});",
                    string(&throw.error_type)
                ));
                Ok(())
            }
            StatementKind::Discard => {
                self.scope.take_answers();
                Ok(())
            }
        }
    }

    /// Answers a declaration reads are consumed by it.
    fn variable_declaration(&mut self, decl: &VariableDeclaration) -> Result<(), CodegenError> {
        let values = decl
            .values
            .iter()
            .map(|value| self.operand(value))
            .collect::<Result<Vec<_>, _>>()?;
        let consumed = decl
            .values
            .iter()
            .filter_map(|value| match value {
                Operand::Answer(answer) => Some(answer.offset + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        self.scope.consume_answers(consumed);

        for (name, value) in decl.names.iter().zip(values) {
            self.declare(name, value, decl.accessability);
        }
        Ok(())
    }

    fn function_declaration(&mut self, func: &FunctionDeclaration) -> Result<(), CodegenError> {
        // The name is bound before the body so the function can recurse.
        let header = match &func.name {
            FunctionName::Identifier(ident) => match func.accessability {
                Accessability::Public => {
                    self.uses_public = true;
                    FunctionHeader::Assign(self.scope.bind_public(&ident.name))
                }
                Accessability::Private => match self.scope.bind(&ident.name) {
                    (binding, true) => FunctionHeader::Declare(binding),
                    (binding, false) => FunctionHeader::Assign(binding),
                },
            },
            FunctionName::Answer(_) => FunctionHeader::Answer(self.temp("ans")),
        };

        self.scope.push();
        let params = func
            .args
            .iter()
            .map(|arg| self.scope.bind(&arg.name.name).0)
            .collect::<Vec<_>>()
            .join(", ");
        match &header {
            FunctionHeader::Declare(name) => self.line(format!("function {name}({params}) {{")),
            FunctionHeader::Assign(target) => {
                self.line(format!("{target} = function ({params}) {{"))
            }
            FunctionHeader::Answer(temp) => {
                self.line(format!("const {temp} = function ({params}) {{"))
            }
        }

        self.depth += 1;
        self.statements(&func.body)?;
        self.depth -= 1;
        self.scope.pop();

        match header {
            FunctionHeader::Declare(_) => self.line("}"),
            FunctionHeader::Assign(_) => self.line("};"),
            FunctionHeader::Answer(temp) => {
                self.line("};");
                self.scope.push_answer(temp);
            }
        }
        Ok(())
    }

    fn if_statement(&mut self, stmt: &IfStatement) -> Result<(), CodegenError> {
        let condition = match &stmt.condition {
            Some(condition) => self.expression(condition)?,
            None => "true".to_string(),
        };
        self.line(format!("if ({condition}) {{"));
        self.block(&stmt.body)?;

        let mut branch = stmt.else_.as_deref();
        while let Some(next) = branch {
            match &next.condition {
                Some(condition) => {
                    let condition = self.expression(condition)?;
                    self.line(format!("}} else if ({condition}) {{"));
                }
                None => self.line("} else {"),
            }
            self.block(&next.body)?;
            branch = next.else_.as_deref();
        }
        self.line("}");
        Ok(())
    }

    fn for_in(&mut self, stmt: &ForInStatement) -> Result<(), CodegenError> {
        let collection = self.identifier(&stmt.collection)?;
        self.scope.push();
        let item = match &stmt.iterator {
            Some(ident) => self.scope.bind(&ident.name).0,
            None => self.temp("i"),
        };
        self.line(format!("for (let {item} of {collection}) {{"));
        self.depth += 1;
        self.statements(&stmt.body)?;
        self.depth -= 1;
        self.scope.pop();
        self.line("}");
        Ok(())
    }

    /// Typed handlers become an `if / else if` cascade on the error's name.
    /// Anything unmatched goes to the catch-all, or is rethrown.
    fn try_statement(&mut self, stmt: &TryStatement) -> Result<(), CodegenError> {
        self.line("try {");
        self.block(&stmt.body)?;
        let err = self.temp("err");
        self.line(format!("}} catch ({err}) {{"));
        self.depth += 1;

        let mut typed = 0;
        for catch in &stmt.catches {
            let Some(error_type) = &catch.error_type else {
                continue;
            };
            let test = format!("{err}.name === {}", string(error_type));
            if typed == 0 {
                self.line(format!("if ({test}) {{"));
            } else {
                self.line(format!("}} else if ({test}) {{"));
            }
            typed += 1;
            self.depth += 1;
            self.catch_body(catch, &err)?;
            self.depth -= 1;
        }

        let fallback = stmt.catches.iter().find(|c| c.error_type.is_none());
        if typed == 0 {
            match fallback {
                Some(catch) => self.catch_body(catch, &err)?,
                None => self.line(format!("throw {err};")),
            }
        } else {
            self.line("} else {");
            self.depth += 1;
            match fallback {
                Some(catch) => self.catch_body(catch, &err)?,
                None => self.line(format!("throw {err};")),
            }
            self.depth -= 1;
            self.line("}");
        }

        self.depth -= 1;
        self.line("}");
        Ok(())
    }

    fn catch_body(&mut self, catch: &CatchStatement, err: &str) -> Result<(), CodegenError> {
        self.scope.push();
        if let Some(binding) = &catch.binding {
            let (name, _) = self.scope.bind(&binding.name);
            self.line(format!("let {name} = {err};"));
        }
        self.statements(&catch.body)?;
        self.scope.pop();
        Ok(())
    }

    fn import(&mut self, stmt: &ImportStatement) {
        let module = string(&stmt.name);
        if stmt.imports.is_empty() {
            self.line(format!("require({module});"));
            return;
        }
        let mut fresh = Vec::new();
        let mut rebound = false;
        let names = stmt
            .imports
            .iter()
            .map(|name| {
                let (binding, is_new) = self.scope.bind(name);
                if is_new {
                    fresh.push(binding.clone());
                } else {
                    rebound = true;
                }
                if binding == name.as_str() {
                    binding
                } else {
                    format!("{}: {binding}", string(name))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        if !rebound {
            self.line(format!("let {{ {names} }} = require({module});"));
            return;
        }
        // Names already bound in this frame are assigned, not redeclared.
        if !fresh.is_empty() {
            self.line(format!("let {};", fresh.join(", ")));
        }
        self.line(format!("({{ {names} }} = require({module}));"));
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn identifier(&self, ident: &Identifier) -> Result<String, CodegenError> {
        self.scope
            .resolve(&ident.name)
            .map(str::to_string)
            .ok_or_else(|| CodegenError::UndefinedName {
                name: ident.name.to_string(),
                loc: ident.loc,
            })
    }

    fn answer(&self, answer: &Answer) -> Result<String, CodegenError> {
        self.scope
            .answer(answer.offset)
            .map(str::to_string)
            .map_err(|available| CodegenError::AnswerUnderflow {
                offset: answer.offset,
                available,
                loc: answer.loc,
            })
    }

    fn operand(&self, operand: &Operand) -> Result<String, CodegenError> {
        match operand {
            Operand::Literal(lit) => Ok(literal(lit)),
            Operand::Identifier(ident) => self.identifier(ident),
            Operand::Answer(answer) => self.answer(answer),
        }
    }

    fn operands(&self, operands: &[Operand]) -> Result<String, CodegenError> {
        let values = operands
            .iter()
            .map(|operand| self.operand(operand))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values.join(", "))
    }

    fn expression(&self, expression: &Expression) -> Result<String, CodegenError> {
        match expression {
            Expression::Literal(lit) => Ok(literal(lit)),
            Expression::Identifier(ident) => self.identifier(ident),
            Expression::Answer(answer) => self.answer(answer),
            Expression::Unary(op) => {
                let inner = self.expression(&op.expression)?;
                match op.expression.as_ref() {
                    Expression::Binary(_) => Ok(format!("!({inner})")),
                    _ => Ok(format!("!{inner}")),
                }
            }
            Expression::Binary(op) => {
                let left = self.child(&op.left, op.operator, false)?;
                let right = self.child(&op.right, op.operator, true)?;
                Ok(format!("{left} {} {right}", operator(op.operator)))
            }
            Expression::Array(op) => self.array(op),
        }
    }

    /// An operand of a binary operator, parenthesized unless JavaScript
    /// would group it the same way.
    fn child(
        &self,
        expression: &Expression,
        parent: BinaryOperator,
        right: bool,
    ) -> Result<String, CodegenError> {
        let text = self.expression(expression)?;
        let wrap = match expression {
            Expression::Binary(inner) => {
                let (inner_prec, parent_prec) = (inner.operator.precedence(), parent.precedence());
                inner_prec < parent_prec
                    || (inner_prec == parent_prec && (right || inner.operator != parent))
            }
            _ => false,
        };
        Ok(if wrap { format!("({text})") } else { text })
    }

    /// Arrays are 1-indexed in wenyan.
    fn array(&self, op: &ArrayOperation) -> Result<String, CodegenError> {
        let base = match &op.base {
            Operand::Literal(lit) if matches!(lit.value, LiteralValue::Number(_)) => {
                format!("({})", literal(lit))
            }
            other => self.operand(other)?,
        };
        Ok(match &op.operator {
            ArrayOperator::Length => format!("{base}.length"),
            ArrayOperator::Rest => format!("{base}.slice(1)"),
            ArrayOperator::Item(Operand::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            })) => format!("{base}[{}]", number(*n - 1.0)),
            ArrayOperator::Item(Operand::Literal(Literal {
                value: LiteralValue::String(key),
                ..
            })) => format!("{base}[{}]", string(key)),
            ArrayOperator::Item(index) => format!("{base}[{} - 1]", self.operand(index)?),
        })
    }
}

/// How a function declaration binds its name.
enum FunctionHeader {
    Declare(String),
    Assign(String),
    Answer(String),
}

fn operator(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
        BinaryOperator::Eq => "===",
        BinaryOperator::Ne => "!==",
        BinaryOperator::Lt => "<",
        BinaryOperator::Gt => ">",
        BinaryOperator::Le => "<=",
        BinaryOperator::Ge => ">=",
        BinaryOperator::Add => "+",
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        BinaryOperator::Mod => "%",
    }
}

fn literal(lit: &Literal) -> String {
    match &lit.value {
        LiteralValue::Number(n) => number(*n),
        LiteralValue::String(s) => string(s),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::EmptyArray => "[]".to_string(),
        LiteralValue::EmptyObject => "{}".to_string(),
    }
}

fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// A double-quoted JavaScript string literal.
fn string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wenyan_diagnostics::Diagnostic;

    fn js(source: &str) -> String {
        let ast = wenyan_parser::parse(source).ast.expect("parse failed");
        let mut tracker = DiagnosticsTracker::new();
        JavaScriptBackend::new()
            .transpile(&ast, &mut tracker)
            .expect("generation failed")
    }

    fn fails(source: &str) -> Diagnostic {
        let ast = wenyan_parser::parse(source).ast.expect("parse failed");
        let mut tracker = DiagnosticsTracker::new();
        let err = JavaScriptBackend::new()
            .transpile(&ast, &mut tracker)
            .unwrap_err();
        assert_eq!(tracker.diagnostics(), &[err.0.clone()]);
        err.0
    }

    #[test]
    fn test_declaration_and_answer() {
        insta::assert_snapshot!(js("吾有一數。曰三。名之曰「甲」。加「甲」以二。書之。"), @r###"
        let 甲 = 3;
        const $ans0 = 甲 + 2;
        console.log($ans0);
        "###);
    }

    #[test]
    fn test_if_chain() {
        let source = "吾有一數。曰三。名之曰「甲」。\
                      若「甲」等於一者。夫「「一」」。書之。\
                      或若「甲」等於二者。夫「「二」」。書之。\
                      若非。夫「「多」」。書之。云云。";
        insta::assert_snapshot!(js(source), @r###"
        let 甲 = 3;
        if (甲 === 1) {
          const $ans0 = "一";
          console.log($ans0);
        } else if (甲 === 2) {
          const $ans1 = "二";
          console.log($ans1);
        } else {
          const $ans2 = "多";
          console.log($ans2);
        }
        "###);
    }

    #[test]
    fn test_if_without_else() {
        let out = js("若陽者。書之。云云。");
        assert_eq!(out, "if (true) {\n  console.log();\n}\n");
    }

    #[test]
    fn test_function() {
        let source = "吾有一術。名之曰「加法」。欲行是術。必先得二數。曰「甲」。曰「乙」。\
                      乃行是術曰。加「甲」以「乙」。乃得矣。是謂「加法」之術也。\
                      施「加法」於一於二。書之。";
        insta::assert_snapshot!(js(source), @r###"
        function 加法(甲, 乙) {
          const $ans0 = 甲 + 乙;
          return $ans0;
        }
        const $ans1 = 加法(1, 2);
        console.log($ans1);
        "###);
    }

    #[test]
    fn test_public_declaration_is_exported() {
        insta::assert_snapshot!(js("今有一數。曰三。名之曰「甲」。"), @r###"
        const __public__ = {};
        __public__.甲 = 3;
        if (typeof module !== "undefined" && module.exports) {
          module.exports = __public__;
        }
        "###);
    }

    #[test]
    fn test_naming_consumes_answers() {
        insta::assert_snapshot!(js("加一以二。減三以一。名之曰「甲」曰「乙」。書之。"), @r###"
        const $ans0 = 1 + 2;
        const $ans1 = 3 - 1;
        let 甲 = $ans0;
        let 乙 = $ans1;
        console.log();
        "###);
    }

    #[test]
    fn test_try_rethrows_unmatched() {
        let source = "姑妄行此。嗚呼。「「禍」」之禍。曰「「訊」」。\
                      如事不諧。豈「「禍」」之禍歟。名之曰「e」。夫「e」。書之。乃作罷。";
        insta::assert_snapshot!(js(source), @r###"
        try {
          throw Object.assign(new Error("訊"), { name: "禍" });
        } catch ($err0) {
          if ($err0.name === "禍") {
            let e = $err0;
            const $ans1 = e;
            console.log($ans1);
          } else {
            throw $err0;
          }
        }
        "###);
    }

    #[test]
    fn test_catch_all_only() {
        let out = js("姑妄行此。乃止。如事不諧。不知何禍歟。噫。乃作罷。");
        assert_eq!(out, "try {\n  break;\n} catch ($err0) {\n}\n");
    }

    #[test]
    fn test_loops() {
        let source = "吾有一列。名之曰「列」。充「列」以一以二。\
                      凡「列」中之「物」。夫「物」。書之。云云。\
                      為是三遍。乃止。云云。";
        insta::assert_snapshot!(js(source), @r###"
        let 列 = [];
        列.push(1, 2);
        for (let 物 of 列) {
          const $ans0 = 物;
          console.log($ans0);
        }
        for (let $i1 = 0; $i1 < 3; $i1++) {
          break;
        }
        "###);
    }

    #[test]
    fn test_array_access_is_one_based() {
        let out = js("吾有一列。名之曰「列」。吾有一數。曰二。名之曰「甲」。\
                      夫「列」之一。夫「列」之長。夫「列」之「「鍵」」。夫「列」之「甲」。夫「列」之其餘。");
        assert!(out.contains("const $ans0 = 列[0];"));
        assert!(out.contains("const $ans1 = 列.length;"));
        assert!(out.contains("const $ans2 = 列[\"鍵\"];"));
        assert!(out.contains("const $ans3 = 列[甲 - 1];"));
        assert!(out.contains("const $ans4 = 列.slice(1);"));
    }

    #[test]
    fn test_reassign_and_object() {
        let out = js("吾有一數。曰一。名之曰「甲」。昔之「甲」者。今二是矣。\
                      吾有一物。名之曰「書」。其物如是。物之「「名」」者。言曰「「春秋」」。是謂「書」之物也。");
        assert_eq!(out, "let 甲 = 1;\n甲 = 2;\nlet 書 = { \"名\": \"春秋\" };\n");
    }

    #[test]
    fn test_import() {
        let out = js("吾嘗觀「「算經」」之書。方悟「正弦」之義。施「正弦」於一。名之曰「值」。");
        assert_eq!(out, "let { 正弦 } = require(\"算經\");\nlet 值 = 正弦(1);\n");
    }

    #[test]
    fn test_imported_names_can_be_rebound() {
        let out = js("吾嘗觀「「m」」之書。方悟「甲」之義。加一以二。名之曰「甲」。");
        assert_eq!(out, "let { 甲 } = require(\"m\");\n甲 = 1 + 2;\n");
    }

    #[test]
    fn test_import_over_existing_binding_assigns() {
        let out = js("吾有一數。曰一。名之曰「甲」。吾嘗觀「「m」」之書。方悟「甲」「乙」之義。");
        assert_eq!(
            out,
            "let 甲 = 1;\nlet 乙;\n({ 甲, 乙 } = require(\"m\"));\n"
        );
    }

    #[test]
    fn test_loop_variable_can_be_reassigned() {
        let source = "吾有一列。名之曰「列」。凡「列」中之「物」。昔之「物」者。今一是矣。云云。";
        insta::assert_snapshot!(js(source), @r###"
        let 列 = [];
        for (let 物 of 列) {
          物 = 1;
        }
        "###);
    }

    #[test]
    fn test_expression_grouping() {
        let out = js("吾有一數。曰三。名之曰「甲」。夫「甲」加一乘二。夫變「甲」大於一且陽。");
        assert!(out.contains("const $ans0 = (甲 + 1) * 2;"));
        assert!(out.contains("const $ans1 = !甲 > 1 && true;"));
    }

    #[test]
    fn test_mangled_names() {
        let out = js("吾有一數。曰一。名之曰「if」。");
        assert_eq!(out, "let _69_66 = 1;\n");
    }

    #[test]
    fn test_mangled_and_underscore_names_stay_apart() {
        let out = js("吾有一數。曰一。名之曰「1」。吾有一數。曰二。名之曰「_31」。");
        assert_eq!(out, "let _31 = 1;\nlet _5f_33_31 = 2;\n");
    }

    #[test]
    fn test_answer_underflow_is_fatal() {
        let diagnostic = fails("加其以一。");
        assert_eq!(diagnostic.kind, DiagnosticKind::Generation);
        assert_eq!(diagnostic.message, "answer 0 requested but only 0 pending");
        assert_eq!((diagnostic.line, diagnostic.column), (1, 2));
    }

    #[test]
    fn test_undefined_name_is_fatal() {
        let diagnostic = fails("加「甲」以一。");
        assert_eq!(diagnostic.kind, DiagnosticKind::Generation);
        assert_eq!(diagnostic.message, "undefined name 「甲」");
    }

    #[test]
    fn test_blocks_start_with_no_answers() {
        let diagnostic = fails("加一以二。若陽者。加其以一。云云。");
        assert_eq!(diagnostic.kind, DiagnosticKind::Generation);
    }
}
