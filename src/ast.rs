//! Abstract syntax tree for curve programs
//!
//! A program is an ordered list of statements; each statement holds named
//! expression-tree slots. Trees are acyclic and exclusively owned top-down.
//! Evaluation lives in [`crate::render::eval`]; this module is data only,
//! plus the read-only [`TreeNode`] projection handed to visualizers.

/// A complete curve program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// One top-level instruction.
///
/// Order matters: a statement sees only the transform state accumulated by
/// the statements before it.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// ORIGIN IS (x, y) - move the coordinate origin
    Origin { x: Expr, y: Expr },
    /// ROT IS angle - set the rotation angle (radians)
    Rotate { angle: Expr },
    /// SCALE IS (x, y) - set the per-axis scale factors
    Scale { x: Expr, y: Expr },
    /// FOR T FROM begin TO end STEP step DRAW (x, y) - sweep T and plot
    ForDraw {
        begin: Expr,
        end: Expr,
        step: Expr,
        x: Expr,
        y: Expr,
    },
}

/// An arithmetic expression over the loop parameter T
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or named constant (PI, E); the label is the source
    /// lexeme, kept for the visualization projection
    Number { value: f64, label: String },
    /// The loop parameter T
    T,
    Unary(UnaryOp, Box<Expr>),
    /// Built-in unary function application
    Func(Func, Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
}

/// Unary sign operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Built-in unary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Ln,
    Exp,
    Sqrt,
}

impl Func {
    /// Apply the bound numeric operation.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Ln => x.ln(),
            Func::Exp => x.exp(),
            Func::Sqrt => x.sqrt(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "SIN",
            Func::Cos => "COS",
            Func::Tan => "TAN",
            Func::Ln => "LN",
            Func::Exp => "EXP",
            Func::Sqrt => "SQRT",
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
        }
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }
}

impl Expr {
    /// Display label for this node (the token lexeme it was built from).
    pub fn label(&self) -> &str {
        match self {
            Expr::Number { label, .. } => label,
            Expr::T => "T",
            Expr::Unary(op, _) => op.symbol(),
            Expr::Func(func, _) => func.name(),
            Expr::Binary(_, op, _) => op.symbol(),
        }
    }

    /// Read-only projection: display label plus ordered children.
    pub fn tree(&self) -> TreeNode {
        let children = match self {
            Expr::Number { .. } | Expr::T => Vec::new(),
            Expr::Unary(_, operand) | Expr::Func(_, operand) => vec![operand.tree()],
            Expr::Binary(lhs, _, rhs) => vec![lhs.tree(), rhs.tree()],
        };
        TreeNode {
            name: self.label().to_string(),
            children,
        }
    }
}

impl Statement {
    /// Statement-kind tag, matching the keyword that introduced it.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Origin { .. } => "ORIGIN",
            Statement::Rotate { .. } => "ROT",
            Statement::Scale { .. } => "SCALE",
            Statement::ForDraw { .. } => "FOR",
        }
    }

    /// Projection of this statement: kind tag with one child per named slot.
    pub fn tree(&self) -> TreeNode {
        fn slot(name: &str, expr: &Expr) -> TreeNode {
            TreeNode {
                name: name.to_string(),
                children: vec![expr.tree()],
            }
        }
        let children = match self {
            Statement::Origin { x, y } => vec![slot("x", x), slot("y", y)],
            Statement::Rotate { angle } => vec![slot("angle", angle)],
            Statement::Scale { x, y } => vec![slot("x", x), slot("y", y)],
            Statement::ForDraw {
                begin,
                end,
                step,
                x,
                y,
            } => vec![
                slot("begin", begin),
                slot("end", end),
                slot("step", step),
                slot("x", x),
                slot("y", y),
            ],
        };
        TreeNode {
            name: self.kind_name().to_string(),
            children,
        }
    }
}

/// One node of the debug tree view: a display label and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// Tree projection of a whole program, one numbered child per statement.
pub fn program_tree(program: &Program) -> TreeNode {
    TreeNode {
        name: "All Statements".to_string(),
        children: program
            .statements
            .iter()
            .enumerate()
            .map(|(i, statement)| TreeNode {
                name: (i + 1).to_string(),
                children: vec![statement.tree()],
            })
            .collect(),
    }
}
