mod capture;
mod noop;
mod stdout;

pub use capture::CaptureOutput;
pub use noop::NoopOutput;
pub use stdout::StdoutOutput;
