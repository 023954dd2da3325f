use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// A syntax tree node.
///
/// `Expression` and `Statement` tag the position a node occupies. The parser
/// wraps every call argument and binary operand in `Expression`, and every
/// top-level or function body entry in `Statement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw literal text, quotes included.
    StringLiteral(String),
    /// Decimal digits, unvalidated.
    IntegerLiteral(String),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
    FunctionDefinition {
        name: String,
        body: Vec<Node>,
    },
    Expression(Box<Node>),
    Statement(Box<Node>),
}

impl Node {
    pub fn expr(node: Node) -> Self {
        Self::Expression(Box::new(node))
    }

    pub fn stmt(node: Node) -> Self {
        Self::Statement(Box::new(node))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    pub fn integer(digits: impl Into<String>) -> Self {
        Self::IntegerLiteral(digits.into())
    }

    pub fn binary(op: BinaryOperator, left: Node, right: Node) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn function(name: impl Into<String>, body: Vec<Node>) -> Self {
        Self::FunctionDefinition {
            name: name.into(),
            body,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        write!(f, " {node}")?;
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringLiteral(value) => f.write_str(value),
            Self::IntegerLiteral(digits) => f.write_str(digits),
            Self::BinaryOp { op, left, right } => {
                write!(f, "({} {left} {right})", op.symbol())
            }
            Self::FunctionCall { name, args } => {
                write!(f, "(call {name}")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Self::FunctionDefinition { name, body } => {
                write!(f, "(fun {name}")?;
                write_list(f, body)?;
                f.write_str(")")
            }
            Self::Expression(node) => write!(f, "(expr {node})"),
            Self::Statement(node) => write!(f, "(stmt {node})"),
        }
    }
}

/// Parse root: the top-level statements in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Node>,
}

impl Program {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(program")?;
        write_list(f, &self.statements)?;
        f.write_str(")")
    }
}
