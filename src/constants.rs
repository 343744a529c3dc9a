use crate::error::{ExprError, Result};
use log::{debug, trace};
use std::f64::consts;

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantEntry {
    pub name: String,
    pub value: f64,
}

/// Append-only table of named constants.
///
/// Names are not checked for duplicates. Lookup returns the first registered
/// match, so re-registering a name is masked by the first entry.
#[derive(Debug, Clone, Default)]
pub struct ConstantRegistry {
    entries: Vec<ConstantEntry>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    pub fn register_constant(&mut self, name: &str, value: f64) -> Result<()> {
        if name.is_empty() {
            return Err(ExprError::NullArgument("constant name"));
        }
        self.entries.try_reserve(1)?;
        self.entries.push(ConstantEntry {
            name: name.to_string(),
            value,
        });
        trace!("Registered constant {} = {}", name, value);
        Ok(())
    }

    pub fn find_constant(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_constant(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstantEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Installs every builtin constant whose name is not registered yet, so
/// calling it again on a populated registry adds nothing.
pub fn register_builtins(registry: &mut ConstantRegistry) -> Result<()> {
    let sqrt5 = 5.0_f64.sqrt();
    let builtins = [
        ("pi", consts::PI),
        ("e", consts::E),
        ("tau", consts::TAU),
        // Golden ratio.
        ("phi", (1.0 + sqrt5) / 2.0),
        ("sqrt2", consts::SQRT_2),
        ("sqrt3", 3.0_f64.sqrt()),
        ("sqrt5", sqrt5),
        ("ln2", consts::LN_2),
        ("ln10", consts::LN_10),
        ("log2e", consts::LOG2_E),
        ("log10e", consts::LOG10_E),
        ("invpi", consts::FRAC_1_PI),
        ("inv2pi", 1.0 / consts::TAU),
    ];

    for (name, value) in builtins {
        if !registry.contains(name) {
            registry.register_constant(name, value)?;
        }
    }

    debug!("Constant registry holds {} entries", registry.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_constants() {
        let registry = ConstantRegistry::with_builtins().unwrap();
        assert_eq!(registry.len(), 13);
        assert_eq!(registry.find_constant("pi"), Some(consts::PI));
        assert_eq!(registry.find_constant("tau"), Some(2.0 * consts::PI));
        assert!((registry.find_constant("phi").unwrap() - 1.618_033_988_749_895).abs() < 1e-15);
        assert!((registry.find_constant("inv2pi").unwrap() * consts::TAU - 1.0).abs() < 1e-15);
        assert_eq!(registry.find_constant("PI"), None);
    }

    #[test]
    fn test_duplicate_constant_is_masked() {
        let mut registry = ConstantRegistry::with_builtins().unwrap();
        registry.register_constant("pi", 3.0).unwrap();
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.find_constant("pi"), Some(consts::PI));
    }

    #[test]
    fn test_reinstalling_builtins_keeps_existing_entries() {
        let mut registry = ConstantRegistry::new();
        registry.register_constant("answer", 42.0).unwrap();
        registry.register_constant("e", 2.0).unwrap();

        register_builtins(&mut registry).unwrap();
        register_builtins(&mut registry).unwrap();
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.find_constant("answer"), Some(42.0));
        assert_eq!(registry.find_constant("e"), Some(2.0));
        assert_eq!(registry.find_constant("pi"), Some(consts::PI));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ConstantRegistry::new();
        assert!(registry.register_constant("", 1.0).is_err());
        assert!(registry.is_empty());
    }
}
