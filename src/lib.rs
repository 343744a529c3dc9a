pub mod ast;
pub mod constants;
pub mod environment;
pub mod error;
pub mod functions;

pub use ast::{AstNode, Context, Operator};
pub use environment::Environment;
pub use error::{ErrorKind, ExprError, Result};
pub use functions::Arity;

/// Parses and evaluates `expression` once against a fresh builtin environment.
pub fn evaluate_expression(expression: &str, context: &Context) -> Result<f64> {
    let env = Environment::new();
    let ast = env.parse(expression, context)?;
    env.evaluate(&ast, context)
}
