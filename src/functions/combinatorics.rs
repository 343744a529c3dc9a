use crate::error::{ExprError, Result};
use crate::functions::{Arity, FunctionRegistry};
use exprlib_macros::builtin_fn;

pub fn register(registry: &mut FunctionRegistry) -> Result<()> {
    registry.register_function("factorial", FACTORIAL_ARITY, factorial)?;
    registry.register_function("nCr", NCR_ARITY, ncr)?;
    registry.register_function("nPr", NPR_ARITY, npr)?;
    Ok(())
}

/// `1 * 2 * ... * n` as a float product, with `n` truncated toward zero.
fn product_up_to(n: f64) -> Result<f64> {
    if n < 0.0 {
        return Err(ExprError::InvalidArgument(format!(
            "factorial of negative number {}",
            n
        )));
    }

    let mut result = 1.0;
    for i in 1..=(n as u64) {
        result *= i as f64;
        if result.is_infinite() {
            break;
        }
    }
    Ok(result)
}

fn check_selection(n: f64, r: f64) -> Result<()> {
    if n < 0.0 || r < 0.0 || r > n {
        return Err(ExprError::InvalidArgument(format!(
            "cannot select {} from {}",
            r, n
        )));
    }
    Ok(())
}

#[builtin_fn]
pub fn factorial(n: f64) -> Result<f64> {
    product_up_to(n)
}

/// Combinations, `n! / (r! (n - r)!)`. Large inputs overflow to infinity or NaN.
#[builtin_fn]
pub fn ncr(n: f64, r: f64) -> Result<f64> {
    check_selection(n, r)?;
    Ok(product_up_to(n)? / (product_up_to(r)? * product_up_to(n - r)?))
}

/// Permutations, `n! / (n - r)!`.
#[builtin_fn]
pub fn npr(n: f64, r: f64) -> Result<f64> {
    check_selection(n, r)?;
    Ok(product_up_to(n)? / product_up_to(n - r)?)
}
