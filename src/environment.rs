use crate::ast::{AstNode, Context, Evaluator, Parser};
use crate::constants::{self, ConstantRegistry};
use crate::error::{ExprError, Result};
use crate::functions::{self, Arity, FunctionEntry, FunctionRegistry};
use log::{debug, error};

/// Owns the function and constant registries that parsing and evaluation
/// resolve names against.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    functions: FunctionRegistry,
    constants: ConstantRegistry,
}

impl Environment {
    /// Environment with every builtin function and constant installed.
    pub fn new() -> Self {
        let mut env = Self::empty();
        if let Err(err) = env.init() {
            error!("Failed to install builtins: {}", err);
        }
        env
    }

    /// Environment with no functions and no constants.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resets the function registry to the builtins and installs any missing
    /// builtin constants. Custom constants are kept.
    pub fn init(&mut self) -> Result<()> {
        self.functions.clear();
        functions::register_builtins(&mut self.functions)?;
        constants::register_builtins(&mut self.constants)?;
        debug!(
            "Environment initialised with {} functions and {} constants",
            self.functions.len(),
            self.constants.len()
        );
        Ok(())
    }

    pub fn clear_functions(&mut self) {
        self.functions.clear();
    }

    pub fn register_function<A, F>(&mut self, name: &str, arity: A, function: F) -> Result<()>
    where
        A: TryInto<Arity>,
        ExprError: From<A::Error>,
        F: Fn(&[f64]) -> Result<f64> + Send + Sync + 'static,
    {
        self.functions.register_function(name, arity, function)
    }

    pub fn register_constant(&mut self, name: &str, value: f64) -> Result<()> {
        self.constants.register_constant(name, value)
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.find_function(name)
    }

    pub fn find_constant(&self, name: &str) -> Option<f64> {
        self.constants.find_constant(name)
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn constants(&self) -> &ConstantRegistry {
        &self.constants
    }

    /// Parses `expression` in full; trailing input is a syntax error.
    pub fn parse(&self, expression: &str, context: &Context) -> Result<AstNode> {
        Parser::new(expression, &self.constants, context).parse()
    }

    /// Parses the longest valid expression at the start of `expression` and
    /// returns it with the byte offset where parsing stopped.
    pub fn parse_prefix(&self, expression: &str, context: &Context) -> Result<(AstNode, usize)> {
        Parser::new(expression, &self.constants, context).parse_prefix()
    }

    pub fn evaluate(&self, ast: &AstNode, context: &Context) -> Result<f64> {
        Evaluator::new(&self.functions, &self.constants).evaluate(ast, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::Cell;

    #[test]
    fn test_new_has_builtins() {
        let env = Environment::new();
        assert!(env.find_function("sin").is_some());
        assert!(env.find_function("nPr").is_some());
        assert_eq!(env.find_constant("pi"), Some(std::f64::consts::PI));

        let empty = Environment::empty();
        assert!(empty.functions().is_empty());
        assert!(empty.constants().is_empty());
    }

    #[test]
    fn test_register_after_clear() {
        let mut env = Environment::new();
        env.clear_functions();
        assert!(env.find_function("sin").is_none());
        assert_eq!(
            env.evaluate(&env.parse("sin(0)", &Context::new()).unwrap(), &Context::new())
                .unwrap_err(),
            ExprError::FunctionNotFound("sin".to_string())
        );

        env.register_function("half", 1, |args: &[f64]| Ok(args[0] / 2.0))
            .unwrap();
        let context = Context::new();
        let ast = env.parse("half(9)", &context).unwrap();
        assert_eq!(env.evaluate(&ast, &context).unwrap(), 4.5);
        // Constants survive clearing functions.
        assert!(env.find_constant("e").is_some());
    }

    #[test]
    fn test_init_restores_builtins() {
        let mut env = Environment::new();
        env.clear_functions();
        env.register_function("half", 1, |args: &[f64]| Ok(args[0] / 2.0))
            .unwrap();
        env.register_constant("answer", 42.0).unwrap();

        env.init().unwrap();
        assert!(env.find_function("sin").is_some());
        assert!(env.find_function("half").is_none());
        assert_eq!(env.find_constant("answer"), Some(42.0));
        assert_eq!(
            env.functions().len(),
            FunctionRegistry::with_builtins().unwrap().len()
        );
        assert_eq!(
            env.constants().len(),
            ConstantRegistry::with_builtins().unwrap().len() + 1
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let mut env = Environment::new();
        let before = env.functions().len();
        let err = env
            .register_function("sin", 1, |args: &[f64]| Ok(args[0]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DuplicateFunction);
        assert_eq!(env.functions().len(), before);
        assert_eq!(env.find_function("sin").unwrap().call(&[0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_custom_variadic_function() {
        let mut env = Environment::new();
        env.register_function("sum", -1, |args: &[f64]| Ok(args.iter().sum()))
            .unwrap();
        let context = Context::new();
        let ast = env.parse("sum(1, 2, 3, 4)", &context).unwrap();
        assert_eq!(env.evaluate(&ast, &context).unwrap(), 10.0);
        assert_eq!(
            env.register_function("bad", -2, |_: &[f64]| Ok(0.0))
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_custom_constant() {
        let mut env = Environment::new();
        env.register_constant("answer", 42.0).unwrap();
        let context = Context::new();
        let ast = env.parse("answer / 2", &context).unwrap();
        assert!(!ast.is_number());
        assert_eq!(env.evaluate(&ast, &context).unwrap(), 21.0);
    }

    #[test]
    fn test_custom_function_error_propagates() {
        let mut env = Environment::new();
        env.register_function("fail", 0, |_: &[f64]| {
            Err(ExprError::Unknown("sensor offline".to_string()))
        })
        .unwrap();
        let context = Context::new();
        let ast = env.parse("1 + fail()", &context).unwrap();
        let err = env.evaluate(&ast, &context).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.kind().message(), "Unknown Error");
    }

    #[test]
    fn test_long_sum_evaluates_and_drops() {
        let env = Environment::new();
        let x = Cell::new(0.5);
        let context = Context::new().with("x", &x);

        for terms in [60_000, 100_000] {
            let ast = env.parse(&vec!["x"; terms].join("+"), &context).unwrap();
            assert_eq!(env.evaluate(&ast, &context).unwrap(), terms as f64 * 0.5);
            drop(ast);
        }
    }

    #[test]
    fn test_reevaluate_after_cell_update() {
        let env = Environment::new();
        let x = Cell::new(5.0);
        let context = Context::new().with("x", &x);
        let ast = env.parse("x", &context).unwrap();

        assert_eq!(env.evaluate(&ast, &context).unwrap(), 5.0);
        x.set(10.0);
        assert_eq!(env.evaluate(&ast, &context).unwrap(), 10.0);
    }

    #[test]
    fn test_unbound_variable() {
        let env = Environment::new();
        assert_eq!(
            env.parse("y", &Context::new()).unwrap_err().kind(),
            ErrorKind::UndefinedVariable
        );
    }

    #[test]
    fn test_strict_and_prefix_parsing() {
        let env = Environment::new();
        let context = Context::new();

        let err = env.parse("pow(2,10))", &context).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(
            err,
            ExprError::Syntax {
                position: 9,
                reason: "unexpected trailing input"
            }
        );

        let (ast, offset) = env.parse_prefix("pow(2,10))", &context).unwrap();
        assert_eq!(offset, 9);
        assert_eq!(
            ast,
            AstNode::function_call("pow", vec![AstNode::number(2.0), AstNode::number(10.0)])
        );
        assert_eq!(env.evaluate(&ast, &context).unwrap(), 1024.0);
    }

    #[test]
    fn test_literal_division_by_zero_at_parse() {
        let env = Environment::new();
        assert_eq!(
            env.parse("6/0", &Context::new()).unwrap_err(),
            ExprError::DivisionByZero
        );
    }
}
