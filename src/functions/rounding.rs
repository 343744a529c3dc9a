use crate::error::{ExprError, Result};
use crate::functions::{Arity, FunctionRegistry};
use exprlib_macros::builtin_fn;

pub fn register(registry: &mut FunctionRegistry) -> Result<()> {
    registry.register_function("abs", ABS_ARITY, abs)?;
    registry.register_function("floor", FLOOR_ARITY, floor)?;
    registry.register_function("ceil", CEIL_ARITY, ceil)?;
    registry.register_function("round", ROUND_ARITY, round)?;

    registry.register_function("deg2rad", DEG2RAD_ARITY, deg2rad)?;
    registry.register_function("rad2deg", RAD2DEG_ARITY, rad2deg)?;
    Ok(())
}

#[builtin_fn]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[builtin_fn]
pub fn floor(x: f64) -> f64 {
    x.floor()
}

#[builtin_fn]
pub fn ceil(x: f64) -> f64 {
    x.ceil()
}

/// Rounds half away from zero.
#[builtin_fn]
pub fn round(x: f64) -> f64 {
    x.round()
}

#[builtin_fn]
pub fn deg2rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[builtin_fn]
pub fn rad2deg(radians: f64) -> f64 {
    radians.to_degrees()
}
