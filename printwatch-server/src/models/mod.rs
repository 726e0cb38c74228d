mod printer;

pub use printer::*;
