use crate::ast::{AstNode, Context, Operator};
use crate::constants::ConstantRegistry;
use crate::error::{ExprError, Result};
use crate::functions::{FunctionEntry, FunctionRegistry};
use log::trace;

/// Tree-walking evaluator over a parsed [`AstNode`].
///
/// Variables are looked up on every call (constants first, then the context),
/// and function arity is checked against the registry at every call rather
/// than trusted from parse time.
///
/// The walk keeps its own work stack instead of recursing, so tree depth is
/// bounded by memory rather than by the thread's stack.
pub struct Evaluator<'a> {
    functions: &'a FunctionRegistry,
    constants: &'a ConstantRegistry,
}

enum Step<'n, 'a> {
    Visit(&'n AstNode),
    Apply(Operator),
    Call(&'a FunctionEntry, usize),
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a FunctionRegistry, constants: &'a ConstantRegistry) -> Self {
        Self {
            functions,
            constants,
        }
    }

    /// Evaluates an `AstNode` with a given context.
    pub fn evaluate(&self, ast: &AstNode, context: &Context) -> Result<f64> {
        let mut steps = vec![Step::Visit(ast)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(AstNode::Number(n)) => push(&mut values, *n)?,

                Step::Visit(AstNode::Variable(name)) => {
                    let value = self.resolve_variable(name, context)?;
                    push(&mut values, value)?;
                }

                // Left operand is visited first, then `Apply` combines both.
                Step::Visit(AstNode::Operator { op, left, right }) => {
                    steps.try_reserve(3)?;
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                }

                Step::Visit(AstNode::FunctionCall { name, args }) => {
                    let function = self.lookup_function(name, args.len())?;
                    steps.try_reserve(args.len() + 1)?;
                    steps.push(Step::Call(function, args.len()));
                    steps.extend(args.iter().rev().map(Step::Visit));
                }

                Step::Apply(op) => {
                    let right = pop(&mut values)?;
                    let left = pop(&mut values)?;
                    push(&mut values, op.apply(left, right)?)?;
                }

                Step::Call(function, argc) => {
                    let first = values
                        .len()
                        .checked_sub(argc)
                        .ok_or_else(operand_underflow)?;
                    let result = function.call(&values[first..])?;
                    trace!("{}({:?}) = {}", function.name(), &values[first..], result);
                    values.truncate(first);
                    push(&mut values, result)?;
                }
            }
        }

        match values.as_slice() {
            [result] => Ok(*result),
            _ => Err(operand_underflow()),
        }
    }

    fn resolve_variable(&self, name: &str, context: &Context) -> Result<f64> {
        self.constants
            .find_constant(name)
            .or_else(|| context.get(name))
            .ok_or_else(|| ExprError::UndefinedVariable(name.to_string()))
    }

    fn lookup_function(&self, name: &str, argc: usize) -> Result<&'a FunctionEntry> {
        let function = self
            .functions
            .find_function(name)
            .ok_or_else(|| ExprError::FunctionNotFound(name.to_string()))?;

        if !function.arity().accepts(argc) {
            return Err(ExprError::ArityMismatch {
                name: name.to_string(),
                expected: function.arity(),
                actual: argc,
            });
        }
        Ok(function)
    }
}

fn push(values: &mut Vec<f64>, value: f64) -> Result<()> {
    values.try_reserve(1)?;
    values.push(value);
    Ok(())
}

fn pop(values: &mut Vec<f64>) -> Result<f64> {
    values.pop().ok_or_else(operand_underflow)
}

fn operand_underflow() -> ExprError {
    ExprError::Unknown("evaluation stack out of balance".to_string())
}
