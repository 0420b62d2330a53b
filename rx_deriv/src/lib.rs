extern crate rx_match;
extern crate rx_syntax;

pub mod deriv;
pub mod optimize;

pub use deriv::{accepts, derive, nullable};
pub use optimize::optimize;

#[test]
fn foo() {
    let rx = r"ab{1,3}e";
    let ast = rx_syntax::parse(rx).unwrap();
    println!("AST: {:?}", ast);
    let opt = optimize(&ast);
    println!("Optimized: {:?}", opt);
    assert!(accepts(&opt, "abbe".chars()));
    assert!(!accepts(&opt, "ae".chars()));
}
