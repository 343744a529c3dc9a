use crate::error::{ExprError, Result};
use crate::functions::{Arity, FunctionRegistry};
use exprlib_macros::builtin_fn;

pub fn register(registry: &mut FunctionRegistry) -> Result<()> {
    registry.register_function("min", MIN_ARITY, min)?;
    registry.register_function("max", MAX_ARITY, max)?;
    Ok(())
}

// Strict comparisons against the running value, so a NaN argument is skipped
// unless it comes first.
#[builtin_fn]
pub fn min(values: &[f64]) -> f64 {
    values[1..]
        .iter()
        .fold(values[0], |acc, &value| if value < acc { value } else { acc })
}

#[builtin_fn]
pub fn max(values: &[f64]) -> f64 {
    values[1..]
        .iter()
        .fold(values[0], |acc, &value| if value > acc { value } else { acc })
}
