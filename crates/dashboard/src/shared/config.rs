use contracts::shared::modal::ModalKind;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub list: ListConfig,
    pub language: LanguageConfig,
    pub modals: ModalsConfig,
    pub faq: FaqConfig,
    pub pricing: PricingConfig,
    pub legal: LegalConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LanguageConfig {
    /// Language selected when the dashboard opens
    pub default: String,
}

/// Modal identifiers registered with the modal host
#[derive(Debug, Deserialize, Clone)]
pub struct ModalsConfig {
    pub add_faq: String,
    pub edit_faq: String,
    pub delete_faq: String,
    pub edit_pricing: String,
    pub edit_description: String,
    pub save_text: String,
    pub upload_image: String,
}

impl ModalsConfig {
    pub fn id_for(&self, kind: ModalKind) -> &str {
        match kind {
            ModalKind::AddFaq => &self.add_faq,
            ModalKind::EditFaq => &self.edit_faq,
            ModalKind::DeleteFaq => &self.delete_faq,
            ModalKind::EditPricing => &self.edit_pricing,
            ModalKind::EditDescription => &self.edit_description,
            ModalKind::SaveText => &self.save_text,
            ModalKind::UploadImage => &self.upload_image,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FaqConfig {
    /// Topics offered by the add/edit FAQ forms
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Text items holding the package descriptions, in display order
    pub description_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LegalConfig {
    /// Legal sections in radio-button order (ids start at 1)
    pub sections: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// Base URL of the record API; empty means "derive from window location"
    #[serde(default)]
    pub base_url: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[list]
page_size = 10

[language]
default = "English"

[modals]
add_faq = "c5153ad5-18b0-4d22-a88c-542405a59b99"
edit_faq = "cad760d8-3d4e-4c37-adee-fddf5f70e9d2"
delete_faq = "37a73e82-eabd-4e01-96f4-b44aa22723c2"
edit_pricing = "8165bb05-e4cc-48cd-bc95-2b36f72a96ef"
edit_description = "bb733afb-b807-4811-9122-04428fb97dd9"
save_text = "a8f952c2-c46a-4f6e-b129-4a4ae98b8537"
upload_image = "73c35a91-c02c-436e-b640-5118da5cc5a2"

[faq]
topics = ["Training", "Admin", "Payment", "Packages"]

[pricing]
# Quick 40, Standard 60, Extended 75, Test
description_ids = [
    "ea008f34-79d3-4615-8960-27119e38346c",
    "b813c0a4-6de6-477b-a909-2e6a5b62410b",
    "93aecbfa-6e40-4967-9560-73f881128170",
    "c992a468-02d0-458b-b8f4-e8dbc6207703",
]

[legal]
sections = ["Impressum", "Privacy Policy"]

[api]
base_url = ""
"#;

static DEFAULT: Lazy<DashboardConfig> = Lazy::new(|| match toml::from_str(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => panic!("embedded dashboard config is invalid: {}", e),
});

impl DashboardConfig {
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = toml::from_str(contents)?;
        if config.list.page_size == 0 {
            anyhow::bail!("list.page_size must be greater than zero");
        }
        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

/// Load configuration
///
/// Uses the provided TOML (e.g. fetched `config.toml` or a test fixture) and
/// falls back to the embedded default when none is given.
pub fn load_config(contents: Option<&str>) -> anyhow::Result<DashboardConfig> {
    match contents {
        Some(contents) => {
            log::info!("Loading dashboard config from provided TOML");
            DashboardConfig::from_toml_str(contents)
        }
        None => {
            log::info!("Using default embedded configuration");
            Ok(DashboardConfig::default())
        }
    }
}
