pub mod errors;
pub mod retry;
pub mod throttle;

pub use errors::BridgeError;
pub use retry::RetryPolicy;
pub use throttle::Throttle;
