mod noop;
mod stdin;

pub use noop::NoopInput;
pub use stdin::StdinInput;
