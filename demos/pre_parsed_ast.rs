use exprlib_rs::{Context, Environment};
use std::cell::Cell;

fn main() {
    pretty_env_logger::init();

    let env = Environment::new();
    let price = Cell::new(0.0);
    let volume = Cell::new(3000.0);
    let context = Context::new().with("price", &price).with("volume", &volume);

    let expression = "price * volume / 1000 + sqrt(price)";
    let ast = env
        .parse(expression, &context)
        .expect("Failed to parse");

    for p in [25.0, 50.0, 100.0, 120.0] {
        price.set(p);
        match env.evaluate(&ast, &context) {
            Ok(result) => println!("price={}: {}", p, result),
            Err(err) => println!("price={}: Error: {}", p, err),
        }
    }
}
