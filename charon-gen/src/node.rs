//! Typed tree handed to the lowering engine
//!
//! Every node owns its children and carries the source location used for
//! diagnostics. The tree is exchanged with the front end as JSON; the node
//! tag is the `node` field and the payload fields sit next to it.

use charon_common::{CompilerError, SourceLocation};
use serde::{Deserialize, Serialize};
use crate::ops::{BinaryOp, UnaryOp};
use crate::types::Type;

/// Function signature shared by definitions and extern declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub arguments: Vec<(String, Type)>,
    pub return_type: Type,
    #[serde(default)]
    pub is_varargs: bool,
}

impl FunctionDecl {
    pub fn new(name: &str, arguments: Vec<(&str, Type)>, return_type: Type, is_varargs: bool) -> Self {
        Self {
            name: name.to_string(),
            arguments: arguments.into_iter().map(|(n, t)| (n.to_string(), t)).collect(),
            return_type,
            is_varargs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum NodeKind {
    Program {
        globals: Vec<Node>,
    },
    GlobalFunction {
        decl: FunctionDecl,
        body: Box<Node>,
    },
    GlobalExtern {
        decl: FunctionDecl,
    },

    ExprLiteralNumeric {
        value: u64,
    },
    ExprLiteralString {
        value: String,
    },
    ExprLiteralChar {
        value: u8,
    },
    ExprLiteralBool {
        value: bool,
    },
    ExprBinary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    ExprUnary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    ExprVar {
        name: String,
    },
    ExprCall {
        name: String,
        args: Vec<Node>,
    },
    ExprCast {
        value: Box<Node>,
        #[serde(rename = "type")]
        ty: Type,
    },

    StmtBlock {
        statements: Vec<Node>,
    },
    StmtReturn {
        value: Option<Box<Node>>,
    },
    StmtIf {
        condition: Box<Node>,
        body: Box<Node>,
        else_body: Option<Box<Node>>,
    },
    StmtWhile {
        condition: Box<Node>,
        body: Box<Node>,
    },
    StmtDecl {
        #[serde(rename = "type")]
        ty: Type,
        name: String,
        initial: Option<Box<Node>>,
    },
}

impl NodeKind {
    /// Tag name, as it appears in the JSON form
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::GlobalFunction { .. } => "GlobalFunction",
            NodeKind::GlobalExtern { .. } => "GlobalExtern",
            NodeKind::ExprLiteralNumeric { .. } => "ExprLiteralNumeric",
            NodeKind::ExprLiteralString { .. } => "ExprLiteralString",
            NodeKind::ExprLiteralChar { .. } => "ExprLiteralChar",
            NodeKind::ExprLiteralBool { .. } => "ExprLiteralBool",
            NodeKind::ExprBinary { .. } => "ExprBinary",
            NodeKind::ExprUnary { .. } => "ExprUnary",
            NodeKind::ExprVar { .. } => "ExprVar",
            NodeKind::ExprCall { .. } => "ExprCall",
            NodeKind::ExprCast { .. } => "ExprCast",
            NodeKind::StmtBlock { .. } => "StmtBlock",
            NodeKind::StmtReturn { .. } => "StmtReturn",
            NodeKind::StmtIf { .. } => "StmtIf",
            NodeKind::StmtWhile { .. } => "StmtWhile",
            NodeKind::StmtDecl { .. } => "StmtDecl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default)]
    pub location: SourceLocation,
}

impl Node {
    pub fn new(kind: NodeKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn program(globals: Vec<Node>, location: SourceLocation) -> Self {
        Self::new(NodeKind::Program { globals }, location)
    }

    pub fn global_function(decl: FunctionDecl, body: Node, location: SourceLocation) -> Self {
        Self::new(NodeKind::GlobalFunction { decl, body: Box::new(body) }, location)
    }

    pub fn global_extern(decl: FunctionDecl, location: SourceLocation) -> Self {
        Self::new(NodeKind::GlobalExtern { decl }, location)
    }

    pub fn literal_numeric(value: u64, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprLiteralNumeric { value }, location)
    }

    pub fn literal_string(value: &str, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprLiteralString { value: value.to_string() }, location)
    }

    pub fn literal_char(value: u8, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprLiteralChar { value }, location)
    }

    pub fn literal_bool(value: bool, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprLiteralBool { value }, location)
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node, location: SourceLocation) -> Self {
        Self::new(
            NodeKind::ExprBinary { op, left: Box::new(left), right: Box::new(right) },
            location,
        )
    }

    pub fn unary(op: UnaryOp, operand: Node, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprUnary { op, operand: Box::new(operand) }, location)
    }

    pub fn var(name: &str, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprVar { name: name.to_string() }, location)
    }

    pub fn call(name: &str, args: Vec<Node>, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprCall { name: name.to_string(), args }, location)
    }

    pub fn cast(value: Node, ty: Type, location: SourceLocation) -> Self {
        Self::new(NodeKind::ExprCast { value: Box::new(value), ty }, location)
    }

    pub fn block(statements: Vec<Node>, location: SourceLocation) -> Self {
        Self::new(NodeKind::StmtBlock { statements }, location)
    }

    pub fn ret(value: Option<Node>, location: SourceLocation) -> Self {
        Self::new(NodeKind::StmtReturn { value: value.map(Box::new) }, location)
    }

    pub fn if_else(condition: Node, body: Node, else_body: Option<Node>, location: SourceLocation) -> Self {
        Self::new(
            NodeKind::StmtIf {
                condition: Box::new(condition),
                body: Box::new(body),
                else_body: else_body.map(Box::new),
            },
            location,
        )
    }

    pub fn while_loop(condition: Node, body: Node, location: SourceLocation) -> Self {
        Self::new(
            NodeKind::StmtWhile { condition: Box::new(condition), body: Box::new(body) },
            location,
        )
    }

    pub fn decl(ty: Type, name: &str, initial: Option<Node>, location: SourceLocation) -> Self {
        Self::new(
            NodeKind::StmtDecl { ty, name: name.to_string(), initial: initial.map(Box::new) },
            location,
        )
    }

    /// Parse a tree from its JSON form
    pub fn from_json(text: &str) -> Result<Node, CompilerError> {
        serde_json::from_str(text).map_err(|e| CompilerError::InputError { message: e.to_string() })
    }

    pub fn to_json(&self) -> Result<String, CompilerError> {
        serde_json::to_string_pretty(self).map_err(|e| CompilerError::InputError { message: e.to_string() })
    }
}
