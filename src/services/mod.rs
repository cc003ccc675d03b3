//! Remote Data Gateway: translates store operations into REST calls.
//!
//! One [`api_client::ApiClient`] wraps the HTTP client and error
//! normalization; [`resources::ResourceApi`] layers the resource-oriented
//! list/get/create/update/remove contract on top of it, and
//! [`accounts::AccountApi`] adds the account lookup queries used by the
//! simulated authentication flow. No retries and no caching happen here.

pub mod accounts;
pub mod api_client;
pub mod resources;

pub use accounts::{AccountApi, AccountGateway};
pub use api_client::{ApiClient, TokenSource};
pub use resources::{ListQuery, ResourceApi, ResourceGateway};
