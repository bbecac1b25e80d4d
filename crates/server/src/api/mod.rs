pub mod errors;
pub mod html;
pub mod json;
pub mod pages;
pub mod server;

pub use server::{AppState, build_api_router, run_api};
