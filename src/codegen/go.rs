use std::collections::BTreeSet;

use crate::{
    error::{GResult, GenerateError},
    syntax::{Node, Program},
};

use super::GeneratorOptions;

/// Package providing the line printing routine.
pub const FMT_IMPORT: &str = "fmt";

/// Name of the generated Go entry point.
pub const ENTRY_POINT: &str = "main";

/// Emits Go source for a [`Program`].
///
/// Statements are written into a body buffer while the imports they need
/// are collected; [`GoGenerator::generate`] then wraps the body in the
/// package header, the sorted import block and `func main()`.
pub struct GoGenerator {
    options: GeneratorOptions,
    buf: String,
    imports: BTreeSet<&'static str>,
    depth: usize,
}

impl Default for GoGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl GoGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            buf: String::new(),
            imports: BTreeSet::new(),
            // statements live inside the entry point
            depth: 1,
        }
    }

    pub fn generate(mut self, program: &Program) -> GResult<String> {
        self.compile_stmts(&program.statements)?;
        Ok(self.finish())
    }

    fn finish(self) -> String {
        let mut out = String::with_capacity(self.buf.len() + 64);

        out.push_str("package ");
        out.push_str(&self.options.package);
        out.push_str("\n\n");

        if !self.imports.is_empty() {
            out.push_str("import (\n");
            for import in &self.imports {
                out.push_str(&self.options.indent);
                out.push('"');
                out.push_str(import);
                out.push_str("\"\n");
            }
            out.push_str(")\n\n");
        }

        out.push_str("func ");
        out.push_str(ENTRY_POINT);
        out.push_str("() {\n");
        out.push_str(&self.buf);
        out.push_str("}\n");

        log::debug!(
            "generated {} bytes, imports: {:?}",
            out.len(),
            self.imports
        );
        out
    }

    fn require_import(&mut self, import: &'static str) {
        if self.imports.insert(import) {
            log::debug!("import {import:?} required");
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(&self.options.indent);
        }
    }

    fn write_line(&mut self, line: &str) {
        self.write_indent();
        self.buf.push_str(line);
        self.buf.push('\n');
    }

    fn compile_stmts(&mut self, statements: &[Node]) -> GResult<()> {
        for stmt in statements {
            match stmt {
                Node::Statement(inner) => self.compile_stmt(inner)?,
                other => return Err(GenerateError::UnsupportedStatement(other.to_string())),
            }
        }
        Ok(())
    }

    fn compile_stmt(&mut self, stmt: &Node) -> GResult<()> {
        match stmt {
            Node::FunctionDefinition { name, body } => self.compile_fn_decl(name, body),
            Node::Expression(_) => {
                self.write_indent();
                self.compile_expr(stmt)?;
                self.buf.push('\n');
                Ok(())
            }
            Node::StringLiteral(_)
            | Node::IntegerLiteral(_)
            | Node::BinaryOp { .. }
            | Node::FunctionCall { .. }
            | Node::Statement(_) => Err(GenerateError::UnsupportedStatement(stmt.to_string())),
        }
    }

    fn compile_fn_decl(&mut self, name: &str, body: &[Node]) -> GResult<()> {
        self.write_line(&format!("{name} := func() {{"));
        self.depth += 1;
        let compiled = self.compile_stmts(body);
        self.depth -= 1;
        compiled?;
        self.write_line("}");
        // Go rejects closures that are never referenced.
        self.write_line(&format!("_ = {name}"));
        Ok(())
    }

    /// Compiles an `Expression`-tagged node.
    fn compile_expr(&mut self, expr: &Node) -> GResult<()> {
        match expr {
            Node::Expression(inner) => self.compile_expr_kind(inner),
            other => Err(GenerateError::UnsupportedExpression(other.to_string())),
        }
    }

    fn compile_expr_kind(&mut self, expr: &Node) -> GResult<()> {
        match expr {
            Node::StringLiteral(value) => self.buf.push_str(value),
            Node::IntegerLiteral(digits) => self.buf.push_str(digits),
            Node::BinaryOp { op, left, right } => {
                self.compile_operand(left)?;
                self.buf.push(' ');
                self.buf.push_str(op.symbol());
                self.buf.push(' ');
                self.compile_operand(right)?;
            }
            Node::FunctionCall { name, args } => self.compile_call(name, args)?,
            Node::FunctionDefinition { .. } | Node::Expression(_) | Node::Statement(_) => {
                return Err(GenerateError::UnsupportedExpression(expr.to_string()))
            }
        }
        Ok(())
    }

    // Nested operations are parenthesised so Go evaluates them in tree order.
    fn compile_operand(&mut self, operand: &Node) -> GResult<()> {
        match operand {
            Node::Expression(inner) if matches!(**inner, Node::BinaryOp { .. }) => {
                self.buf.push('(');
                self.compile_expr(operand)?;
                self.buf.push(')');
                Ok(())
            }
            _ => self.compile_expr(operand),
        }
    }

    fn compile_call(&mut self, name: &str, args: &[Node]) -> GResult<()> {
        match name {
            "print" => {
                self.require_import(FMT_IMPORT);
                self.buf.push_str("fmt.Println");
            }
            name => self.buf.push_str(name),
        }

        self.buf.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            match arg {
                Node::Expression(_) => self.compile_expr(arg)?,
                other => return Err(GenerateError::UnsupportedCallArgument(other.to_string())),
            }
        }
        self.buf.push(')');

        Ok(())
    }
}
