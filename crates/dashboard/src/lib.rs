pub mod dashboards;
pub mod domain;
pub mod shared;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("content dashboard loaded");
}

/// Dashboard wired to the platform record API. The host page supplies the
/// modal host and the media manager; `config_toml` overrides the embedded
/// configuration.
#[cfg(target_arch = "wasm32")]
pub fn platform_dashboard(
    modals: Rc<dyn shared::modal_host::ModalHost>,
    media: Rc<dyn shared::modal_host::MediaManager>,
    config_toml: Option<&str>,
) -> anyhow::Result<dashboards::ContentDashboard> {
    let config = shared::config::load_config(config_toml)?;
    let store = Rc::new(shared::record_store::http::HttpRecordStore::new(
        config.api.base_url.clone(),
    ));
    let services = shared::modal_host::Services::new(store, modals, media, config);
    Ok(dashboards::ContentDashboard::new(services))
}
