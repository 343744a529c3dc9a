use crate::ast::{AstNode, Context, Operator};
use crate::constants::ConstantRegistry;
use crate::error::{ExprError, Result};
use log::{debug, trace};

pub const MAX_NESTING: usize = 256;

/// Single-pass precedence-climbing parser. Lexing is fused into parsing: the
/// parser walks a byte cursor over the source and builds nodes directly.
///
/// Identifiers that are not function calls must name a constant or a context
/// variable at parse time. Function names are not checked until evaluation.
///
/// Parentheses, unary minus, call arguments and `^` chains recurse; more than
/// [`MAX_NESTING`] levels of them is a syntax error. Flat chains of
/// left-associative operators are parsed in a loop and are not limited.
pub struct Parser<'a, 'ctx> {
    source: &'a str,
    pos: usize,
    depth: usize,
    constants: &'a ConstantRegistry,
    context: &'a Context<'ctx>,
}

impl<'a, 'ctx> Parser<'a, 'ctx> {
    pub fn new(
        source: &'a str,
        constants: &'a ConstantRegistry,
        context: &'a Context<'ctx>,
    ) -> Self {
        Self {
            source,
            pos: 0,
            depth: 0,
            constants,
            context,
        }
    }

    /// Parses a complete expression. Anything but whitespace left after the
    /// expression is a syntax error.
    pub fn parse_expression(
        source: &str,
        constants: &ConstantRegistry,
        context: &Context,
    ) -> Result<AstNode> {
        Parser::new(source, constants, context).parse()
    }

    pub fn parse(mut self) -> Result<AstNode> {
        debug!("Parsing expression: {}", self.source);
        let ast = self.parse_internal()?;

        self.skip_whitespace();
        if self.pos < self.source.len() {
            return Err(ExprError::syntax(self.pos, "unexpected trailing input"));
        }
        Ok(ast)
    }

    /// Parses the longest valid expression at the start of the source and
    /// returns it with the byte offset where parsing stopped.
    pub fn parse_prefix(mut self) -> Result<(AstNode, usize)> {
        debug!("Parsing expression prefix: {}", self.source);
        let ast = self.parse_internal()?;
        Ok((ast, self.pos))
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn peek_digit(&self) -> Option<f64> {
        self.peek()
            .filter(u8::is_ascii_digit)
            .map(|byte| f64::from(byte - b'0'))
    }

    fn peek_operator(&self) -> Option<Operator> {
        self.peek()
            .and_then(|byte| Operator::from_symbol(char::from(byte)))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::syntax(self.pos, "expression nested too deeply"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_internal(&mut self) -> Result<AstNode> {
        let lhs = self.parse_unary()?;
        self.parse_binary_rhs(0, lhs)
    }

    fn parse_unary(&mut self) -> Result<AstNode> {
        self.skip_whitespace();

        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                let operand = self.nested(Self::parse_unary)?;
                return Ok(AstNode::negate(operand));
            }
            Some(b'(') => {
                self.pos += 1;
                let node = self.nested(Self::parse_internal)?;
                self.skip_whitespace();
                if self.peek() != Some(b')') {
                    return Err(ExprError::syntax(self.pos, "closing paren expected"));
                }
                self.pos += 1;
                return Ok(node);
            }
            _ => {}
        }

        if let Some(value) = self.parse_number() {
            return Ok(AstNode::Number(value));
        }

        if self.peek().is_some_and(|byte| byte.is_ascii_alphabetic()) {
            let name = self.parse_identifier();

            let after_name = self.pos;
            self.skip_whitespace();
            if self.peek() == Some(b'(') {
                self.pos += 1;
                return self.parse_call(name);
            }
            self.pos = after_name;

            if !self.is_defined(name) {
                return Err(ExprError::UndefinedVariable(name.to_string()));
            }
            return Ok(AstNode::variable(name));
        }

        Err(ExprError::syntax(self.pos, "unexpected token"))
    }

    /// Digits accumulate as `v * 10 + d`; an optional fraction uses a running
    /// scale of 0.1. No sign and no exponent. Restores the cursor when no
    /// digit is found.
    fn parse_number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut value = 0.0;
        let mut found = false;

        while let Some(digit) = self.peek_digit() {
            value = value * 10.0 + digit;
            self.pos += 1;
            found = true;
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let mut scale = 0.1;
            while let Some(digit) = self.peek_digit() {
                value += digit * scale;
                scale *= 0.1;
                self.pos += 1;
                found = true;
            }
        }

        if !found {
            self.pos = start;
            return None;
        }
        Some(value)
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
        {
            self.pos += 1;
        }
        let source = self.source;
        &source[start..self.pos]
    }

    fn is_defined(&self, name: &str) -> bool {
        self.constants.contains(name) || self.context.contains(name)
    }

    /// Parses the argument list after an opening paren has been consumed.
    fn parse_call(&mut self, name: &str) -> Result<AstNode> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(AstNode::function_call(name, args));
        }

        loop {
            let arg = self.nested(Self::parse_internal)?;
            args.try_reserve(1)?;
            args.push(arg);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(ExprError::syntax(self.pos, "',' or ')' expected")),
            }
        }

        Ok(AstNode::function_call(name, args))
    }

    fn parse_binary_rhs(&mut self, min_precedence: u8, mut lhs: AstNode) -> Result<AstNode> {
        loop {
            self.skip_whitespace();
            let op = match self.peek_operator() {
                Some(op) if op.precedence() >= min_precedence => op,
                _ => return Ok(lhs),
            };
            self.pos += 1;

            let mut rhs = self.parse_unary()?;

            self.skip_whitespace();
            if let Some(next) = self.peek_operator() {
                let binds_tighter = next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence() && op.is_right_associative());
                if binds_tighter {
                    let next_min = if op.is_right_associative() {
                        op.precedence()
                    } else {
                        op.precedence() + 1
                    };
                    rhs = self.nested(|parser| parser.parse_binary_rhs(next_min, rhs))?;
                }
            }

            lhs = Self::combine(op, lhs, rhs)?;
        }
    }

    /// Folds two literals into one, otherwise builds an operator node.
    fn combine(op: Operator, lhs: AstNode, rhs: AstNode) -> Result<AstNode> {
        match (&lhs, &rhs) {
            (AstNode::Number(left), AstNode::Number(right)) => {
                let folded = op.apply(*left, *right)?;
                trace!("Folded {} {} {} = {}", left, op.symbol(), right, folded);
                Ok(AstNode::Number(folded))
            }
            _ => Ok(AstNode::operator(op, lhs, rhs)),
        }
    }
}
