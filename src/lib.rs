//! Client-side data and state layer for the bilingual designer-portfolio
//! application: a REST gateway, per-resource entity stores, an
//! authenticated session store, persisted preferences and a process-wide
//! error surface. Rendering, routing and translation content live in the
//! interface layer and only consume the read/write contract exposed here.

pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod persist;
pub mod services;
pub mod stores;
pub mod utils;
