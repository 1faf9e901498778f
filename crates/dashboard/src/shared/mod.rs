#[cfg(target_arch = "wasm32")]
pub mod api_utils;
pub mod config;
pub mod form;
pub mod list_controller;
pub mod list_utils;
pub mod modal_host;
pub mod record_store;
pub mod text;

#[cfg(test)]
pub mod testing;
