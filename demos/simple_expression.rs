use exprlib_rs::{Context, Environment};
use log::debug;
use std::cell::Cell;

fn main() {
    pretty_env_logger::init();

    let env = Environment::new();
    let x = Cell::new(0.0);
    let context = Context::new().with("x", &x);

    let expression = "e^x * sin(x)";
    let ast = match env.parse(expression, &context) {
        Ok(ast) => ast,
        Err(err) => {
            println!("Error: {} ({})", err.kind(), err);
            return;
        }
    };
    debug!("parsed {} nodes", ast.node_count());
    ast.print_tree();

    x.set(10.0);
    match env.evaluate(&ast, &context) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {} ({})", err.kind(), err),
    }
}
