pub mod aggregate;
pub mod combinatorics;
pub mod power;
pub mod rounding;
pub mod trig;

use crate::error::{ExprError, Result};
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64> + Send + Sync>;

/// Number of arguments a registered function accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    /// Any number of arguments, at least one.
    Variadic,
}

impl Arity {
    pub fn accepts(&self, argc: usize) -> bool {
        match self {
            Arity::Exact(n) => *n == argc,
            Arity::Variadic => argc >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Variadic => f.write_str("at least 1"),
        }
    }
}

/// Raw arity as used by C-style tables: `-1` is variadic, anything below is
/// rejected.
impl TryFrom<i32> for Arity {
    type Error = ExprError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            -1 => Ok(Arity::Variadic),
            n if n >= 0 => Ok(Arity::Exact(n as usize)),
            n => Err(ExprError::InvalidArgument(format!(
                "arity {} is below -1",
                n
            ))),
        }
    }
}

#[derive(Clone)]
pub struct FunctionEntry {
    name: String,
    arity: Arity,
    function: Function,
}

impl FunctionEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn call(&self, args: &[f64]) -> Result<f64> {
        (self.function)(args)
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name to (arity, callable) table. Lookup is a linear scan in registration
/// order; names are case-sensitive and unique.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: Vec<FunctionEntry>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every builtin function.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Registers `function` under `name`.
    ///
    /// `arity` is either an [`Arity`] or a raw `i32` where `-1` means variadic.
    /// Fails with `NullArgument` for an empty name, `InvalidArgument` for a raw
    /// arity below `-1` and `DuplicateFunction` if the name is taken; the
    /// registry is left unchanged on failure.
    pub fn register_function<A, F>(&mut self, name: &str, arity: A, function: F) -> Result<()>
    where
        A: TryInto<Arity>,
        ExprError: From<A::Error>,
        F: Fn(&[f64]) -> Result<f64> + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(ExprError::NullArgument("function name"));
        }
        let arity = arity.try_into()?;
        if self.find_function(name).is_some() {
            return Err(ExprError::DuplicateFunction(name.to_string()));
        }

        self.entries.try_reserve(1)?;
        self.entries.push(FunctionEntry {
            name: name.to_string(),
            arity,
            function: Arc::new(function),
        });
        trace!("Registered function {} ({})", name, arity);
        Ok(())
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} registered functions", self.entries.len());
        self.entries.clear();
    }
}

pub fn register_builtins(registry: &mut FunctionRegistry) -> Result<()> {
    trig::register(registry)?;
    power::register(registry)?;
    rounding::register(registry)?;
    aggregate::register(registry)?;
    combinatorics::register(registry)?;
    debug!("Registered {} builtin functions", registry.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn double(args: &[f64]) -> Result<f64> {
        Ok(args[0] * 2.0)
    }

    #[test]
    fn test_builtins_present() {
        let registry = FunctionRegistry::with_builtins().unwrap();
        let expected = [
            "sin", "cos", "tan", "cot", "sec", "cosec", "asin", "acos", "atan", "pow", "sqrt",
            "cbrt", "ln", "log10", "exp", "abs", "floor", "ceil", "round", "deg2rad", "rad2deg",
            "min", "max", "factorial", "nCr", "nPr",
        ];
        for name in expected {
            assert!(registry.find_function(name).is_some(), "missing {}", name);
        }
        assert_eq!(registry.len(), expected.len());
        assert_eq!(registry.find_function("pow").unwrap().arity(), Arity::Exact(2));
        assert_eq!(registry.find_function("max").unwrap().arity(), Arity::Variadic);
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut registry = FunctionRegistry::new();
        registry.register_function("double", 1, double).unwrap();

        let err = registry
            .register_function("double", 2, |_: &[f64]| Ok(0.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateFunction);
        assert_eq!(registry.len(), 1);

        let entry = registry.find_function("double").unwrap();
        assert_eq!(entry.arity(), Arity::Exact(1));
        assert_eq!(entry.call(&[21.0]).unwrap(), 42.0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = FunctionRegistry::new();
        registry.register_function("double", Arity::Exact(1), double).unwrap();
        registry.register_function("Double", Arity::Exact(1), double).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.find_function("DOUBLE").is_none());
    }

    #[test]
    fn test_invalid_registrations() {
        let mut registry = FunctionRegistry::new();

        let err = registry.register_function("", 1, double).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);

        let err = registry.register_function("bad", -2, double).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert!(registry.is_empty());
    }

    #[test]
    fn test_raw_arity_conversion() {
        assert_eq!(Arity::try_from(-1).unwrap(), Arity::Variadic);
        assert_eq!(Arity::try_from(0).unwrap(), Arity::Exact(0));
        assert_eq!(Arity::try_from(3).unwrap(), Arity::Exact(3));
        assert!(Arity::try_from(-5).is_err());
    }

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(1));
        assert!(Arity::Variadic.accepts(5));
        assert!(!Arity::Variadic.accepts(0));
    }

    #[test]
    fn test_clear_then_register() {
        let mut registry = FunctionRegistry::with_builtins().unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find_function("sin").is_none());

        registry.register_function("sin", 1, double).unwrap();
        assert_eq!(registry.find_function("sin").unwrap().call(&[1.5]).unwrap(), 3.0);
    }
}
