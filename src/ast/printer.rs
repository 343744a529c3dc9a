use crate::ast::AstNode;
use std::fmt::{self, Write};

enum Line<'n> {
    Node(&'n AstNode, usize),
    Side(&'static str, usize),
    Arg(usize, usize),
}

impl AstNode {
    /// Writes an indented, line-per-node dump of the tree to `out`.
    pub fn write_tree<W: Write>(&self, out: &mut W, indent: usize) -> fmt::Result {
        let mut pending = vec![Line::Node(self, indent)];

        // Children are pushed in reverse so they pop in print order.
        while let Some(line) = pending.pop() {
            let (node, indent) = match line {
                Line::Side(side, indent) => {
                    writeln!(out, "{:indent$}{}:", "", side, indent = indent)?;
                    continue;
                }
                Line::Arg(i, indent) => {
                    writeln!(out, "{:indent$}ARG {}:", "", i, indent = indent)?;
                    continue;
                }
                Line::Node(node, indent) => (node, indent),
            };

            match node {
                AstNode::Number(value) => {
                    writeln!(out, "{:indent$}NUMBER: {}", "", value, indent = indent)?
                }
                AstNode::Variable(name) => {
                    writeln!(out, "{:indent$}VARIABLE: {}", "", name, indent = indent)?
                }
                AstNode::Operator { op, left, right } => {
                    writeln!(out, "{:indent$}OPERATOR: '{}'", "", op.symbol(), indent = indent)?;
                    pending.push(Line::Node(right, indent + 2));
                    pending.push(Line::Side("RHS", indent));
                    pending.push(Line::Node(left, indent + 2));
                    pending.push(Line::Side("LHS", indent));
                }
                AstNode::FunctionCall { name, args } => {
                    writeln!(
                        out,
                        "{:indent$}FUNCTION CALL: {} (argc={})",
                        "",
                        name,
                        args.len(),
                        indent = indent
                    )?;
                    for (i, arg) in args.iter().enumerate().rev() {
                        pending.push(Line::Node(arg, indent + 4));
                        pending.push(Line::Arg(i, indent + 2));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String never fails.
        let _ = self.write_tree(&mut out, 0);
        out
    }

    pub fn print_tree(&self) {
        print!("{}", self.to_tree_string());
    }
}
