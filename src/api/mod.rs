//! Portfolio server API

mod client;
mod traits;

pub use client::{ApiClient, LoginResponse, SUBMIT_FAILED_MESSAGE};
pub use traits::ApiClientTrait;
#[cfg(test)]
pub use traits::MockApiClientTrait;
