use crate::error::{ExprError, Result};
use crate::functions::{Arity, FunctionRegistry};
use exprlib_macros::builtin_fn;

pub fn register(registry: &mut FunctionRegistry) -> Result<()> {
    registry.register_function("sin", SIN_ARITY, sin)?;
    registry.register_function("cos", COS_ARITY, cos)?;
    registry.register_function("tan", TAN_ARITY, tan)?;
    registry.register_function("cot", COT_ARITY, cot)?;
    registry.register_function("sec", SEC_ARITY, sec)?;
    registry.register_function("cosec", COSEC_ARITY, cosec)?;

    registry.register_function("asin", ASIN_ARITY, asin)?;
    registry.register_function("acos", ACOS_ARITY, acos)?;
    registry.register_function("atan", ATAN_ARITY, atan)?;
    Ok(())
}

#[builtin_fn]
pub fn sin(x: f64) -> f64 {
    x.sin()
}

#[builtin_fn]
pub fn cos(x: f64) -> f64 {
    x.cos()
}

#[builtin_fn]
pub fn tan(x: f64) -> f64 {
    x.tan()
}

/// Reciprocal of `tan`; no pole check, `cot(0)` is infinite.
#[builtin_fn]
pub fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}

#[builtin_fn]
pub fn sec(x: f64) -> f64 {
    1.0 / x.cos()
}

#[builtin_fn]
pub fn cosec(x: f64) -> f64 {
    1.0 / x.sin()
}

#[builtin_fn]
pub fn asin(x: f64) -> f64 {
    x.asin()
}

#[builtin_fn]
pub fn acos(x: f64) -> f64 {
    x.acos()
}

#[builtin_fn]
pub fn atan(x: f64) -> f64 {
    x.atan()
}
