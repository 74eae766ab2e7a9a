pub mod eval;
pub mod example;
pub mod tex;
