mod commands;
mod frame;
mod parser;

pub use commands::*;
pub use frame::*;
pub use parser::*;
