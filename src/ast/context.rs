use std::cell::Cell;

#[derive(Debug, Clone)]
pub struct Variable<'a> {
    name: String,
    value: &'a Cell<f64>,
}

impl<'a> Variable<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value of the bound cell.
    pub fn get(&self) -> f64 {
        self.value.get()
    }
}

/// Caller-owned binding of variable names to live numeric cells.
///
/// The context only borrows the cells, so a parsed expression can be
/// evaluated again after the caller updates them:
///
/// ```
/// use exprlib_rs::ast::Context;
/// use exprlib_rs::Environment;
/// use std::cell::Cell;
///
/// let env = Environment::new();
/// let x = Cell::new(5.0);
/// let mut context = Context::new();
/// context.bind("x", &x);
///
/// let ast = env.parse("x * 2", &context).unwrap();
/// assert_eq!(env.evaluate(&ast, &context).unwrap(), 10.0);
///
/// x.set(10.0);
/// assert_eq!(env.evaluate(&ast, &context).unwrap(), 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context<'a> {
    variables: Vec<Variable<'a>>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `cell`. Earlier bindings of the same name take
    /// precedence on lookup.
    pub fn bind(&mut self, name: &str, cell: &'a Cell<f64>) -> &mut Self {
        self.variables.push(Variable {
            name: name.to_string(),
            value: cell,
        });
        self
    }

    pub fn with(mut self, name: &str, cell: &'a Cell<f64>) -> Self {
        self.bind(name, cell);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables
            .iter()
            .find(|variable| variable.name == name)
            .map(Variable::get)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.iter().any(|variable| variable.name == name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable<'a>> {
        self.variables.iter()
    }
}
