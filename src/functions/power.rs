use crate::error::{ExprError, Result};
use crate::functions::{Arity, FunctionRegistry};
use exprlib_macros::builtin_fn;

pub fn register(registry: &mut FunctionRegistry) -> Result<()> {
    registry.register_function("pow", POW_ARITY, pow)?;
    registry.register_function("sqrt", SQRT_ARITY, sqrt)?;
    registry.register_function("cbrt", CBRT_ARITY, cbrt)?;

    registry.register_function("ln", LN_ARITY, ln)?;
    registry.register_function("log10", LOG10_ARITY, log10)?;
    registry.register_function("exp", EXP_ARITY, exp)?;
    Ok(())
}

#[builtin_fn]
pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

#[builtin_fn]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[builtin_fn]
pub fn cbrt(x: f64) -> f64 {
    x.cbrt()
}

/// Natural logarithm.
#[builtin_fn]
pub fn ln(x: f64) -> f64 {
    x.ln()
}

#[builtin_fn]
pub fn log10(x: f64) -> f64 {
    x.log10()
}

#[builtin_fn]
pub fn exp(x: f64) -> f64 {
    x.exp()
}
