
mod ast;
mod parser;
mod printer;

pub use ast::{InvalidBounds, Regex};
pub use parser::{parse, ParseError};
pub use printer::print;
