pub mod prompt;
mod relay;
pub mod reply;
mod types;

pub use relay::GuessRelay;
pub use reply::{UNKNOWN_GUESS, extract_json_object, parse_reply};
pub use types::{GuessRequest, GuessResult};
