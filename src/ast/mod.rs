mod context;
mod evaluator;
mod parser;
mod printer;

pub use context::{Context, Variable};
pub use evaluator::Evaluator;
pub use parser::{Parser, MAX_NESTING};

use crate::error::{ExprError, Result};
use std::mem;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Number(f64),
    Variable(String),
    Operator {
        op: Operator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn number(value: f64) -> Self {
        AstNode::Number(value)
    }

    pub fn variable(name: &str) -> Self {
        AstNode::Variable(name.to_string())
    }

    pub fn operator(op: Operator, left: AstNode, right: AstNode) -> Self {
        AstNode::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a call node. `args` is moved into the node, not copied.
    pub fn function_call(name: &str, args: Vec<AstNode>) -> Self {
        AstNode::FunctionCall {
            name: name.to_string(),
            args,
        }
    }

    /// Unary minus, desugared to `0 - operand`.
    pub fn negate(operand: AstNode) -> Self {
        AstNode::operator(Operator::Subtract, AstNode::Number(0.0), operand)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, AstNode::Number(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AstNode::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AstNode::Number(_) | AstNode::Variable(_))
    }

    /// Total number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                AstNode::Number(_) | AstNode::Variable(_) => {}
                AstNode::Operator { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                AstNode::FunctionCall { args, .. } => pending.extend(args.iter()),
            }
        }
        count
    }

    /// Moves every non-leaf child onto `stack`, leaving a placeholder behind.
    fn detach_children(&mut self, stack: &mut Vec<AstNode>) {
        match self {
            AstNode::Number(_) | AstNode::Variable(_) => {}
            AstNode::Operator { left, right, .. } => {
                for child in [left, right] {
                    if !child.is_leaf() {
                        stack.push(mem::replace(&mut **child, AstNode::Number(0.0)));
                    }
                }
            }
            AstNode::FunctionCall { args, .. } => {
                for arg in args.iter_mut().filter(|arg| !arg.is_leaf()) {
                    stack.push(mem::replace(arg, AstNode::Number(0.0)));
                }
            }
        }
    }
}

// Long operator chains parse into trees as deep as they are long, so the
// default recursive drop could exhaust the stack.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 10,
            Operator::Multiply | Operator::Divide => 20,
            Operator::Power => 30,
        }
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Power)
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(ExprError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Power => Ok(left.powf(right)),
        }
    }
}
