pub mod clock;
pub mod jitter;
pub mod serde;
pub mod telemetry;

pub use self::clock::*;
pub use self::jitter::*;
pub use self::serde::*;
pub use self::telemetry::*;
