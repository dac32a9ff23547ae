use serde::{Deserialize, Serialize};

pub use crate::error::ErrorBody;
pub use crate::guess::{GuessRequest, GuessResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
