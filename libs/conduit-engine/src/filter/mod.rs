mod noop;
mod script;

pub use noop::NoopFilter;
pub use script::ScriptFilter;
