pub mod hasher;
pub mod reader;
pub mod scanner;

pub use scanner::Scanner;
