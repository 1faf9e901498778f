//! Content dashboard: one tab per site area, each backed by its editor

use crate::dashboards::d001_content::api::{self, TabData};
use crate::domain::a001_faq::ui::list::FaqEditor;
use crate::domain::a002_package::ui::list::PackagesEditor;
use crate::domain::a003_text::ui::legal::LegalEditor;
use crate::domain::a003_text::ui::section::TextSectionEditor;
use crate::shared::list_controller::ListError;
use crate::shared::modal_host::Services;
use contracts::enums::Language;

/// Вкладки дашборда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTab {
    Home,
    AboutMe,
    Pricing,
    Legal,
    Faq,
}

impl ContentTab {
    pub fn all() -> [ContentTab; 5] {
        [
            ContentTab::Home,
            ContentTab::AboutMe,
            ContentTab::Pricing,
            ContentTab::Legal,
            ContentTab::Faq,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentTab::Home => "Home",
            ContentTab::AboutMe => "About me",
            ContentTab::Pricing => "Pricing",
            ContentTab::Legal => "Legal",
            ContentTab::Faq => "FAQ",
        }
    }

    /// Site page whose text blocks the tab edits
    pub fn page(&self) -> Option<&'static str> {
        match self {
            ContentTab::Home => Some("Home"),
            ContentTab::AboutMe => Some("About me"),
            ContentTab::Pricing => Some("Pricing"),
            ContentTab::Legal => Some("Legal"),
            ContentTab::Faq => None,
        }
    }
}

pub struct ContentDashboard {
    services: Services,
    active: Option<ContentTab>,
    language: String,
    home: TextSectionEditor,
    about: TextSectionEditor,
    pricing: TextSectionEditor,
    packages: PackagesEditor,
    legal: LegalEditor,
    faq: FaqEditor,
}

impl ContentDashboard {
    pub fn new(services: Services) -> Self {
        let language = services.config.language.default.clone();
        let mut faq = FaqEditor::new(services.clone());
        faq.set_language(Some(language.clone()));

        Self {
            home: TextSectionEditor::new(services.clone(), "Home"),
            about: TextSectionEditor::new(services.clone(), "About me"),
            pricing: TextSectionEditor::new(services.clone(), "Pricing"),
            packages: PackagesEditor::new(services.clone()),
            legal: LegalEditor::new(services.clone()),
            faq,
            active: None,
            language,
            services,
        }
    }

    pub fn active_tab(&self) -> Option<ContentTab> {
        self.active
    }

    /// Show a tab and load its collections. On failure the tab keeps the
    /// data it had before.
    pub async fn activate_tab(&mut self, tab: ContentTab) -> Result<(), ListError> {
        self.active = Some(tab);
        log::info!("Opening {} tab", tab.label());

        let store = self.services.store.clone();
        // Last requested FAQ load wins
        let faq_ticket =
            (tab == ContentTab::Faq).then(|| self.faq.list_mut().state_mut().begin_reload());

        let loaded = match tab {
            ContentTab::Home | ContentTab::AboutMe => {
                api::fetch_section(store.as_ref(), tab.page().unwrap_or_default()).await
            }
            ContentTab::Pricing => api::fetch_pricing(store.as_ref()).await,
            ContentTab::Legal => api::fetch_legal(store.as_ref()).await,
            ContentTab::Faq => api::fetch_faq(store.as_ref()).await,
        };

        let data = match loaded {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to load {} tab: {}", tab.label(), e);
                self.services
                    .notifier
                    .error(&format!("Failed to load {}", tab.label()));
                return Err(e.into());
            }
        };

        match data {
            TabData::Section { texts, images } => match tab {
                ContentTab::AboutMe => self.about.set_data(texts, images),
                _ => self.home.set_data(texts, images),
            },
            TabData::Pricing {
                texts,
                images,
                packages,
            } => {
                self.packages.set_data(packages, &texts);
                self.pricing.set_data(texts, images);
            }
            TabData::Legal { texts } => self.legal.set_data(texts),
            TabData::Faq { items } => {
                if let Some(ticket) = faq_ticket {
                    self.faq.list_mut().state_mut().complete_reload(ticket, items);
                }
            }
        }
        Ok(())
    }

    /// Reload the active tab
    pub async fn refresh(&mut self) -> Result<(), ListError> {
        match self.active {
            Some(tab) => self.activate_tab(tab).await,
            None => Ok(()),
        }
    }

    pub fn languages(&self) -> Vec<Language> {
        Language::all()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Re-scope the FAQ list; no reload needed
    pub fn set_language(&mut self, language: &str) {
        if Language::from_name(language).is_none() {
            log::warn!("Unknown language {}", language);
        }
        self.language = language.to_string();
        self.faq.set_language(Some(self.language.clone()));
    }

    pub fn home(&mut self) -> &mut TextSectionEditor {
        &mut self.home
    }

    pub fn about(&mut self) -> &mut TextSectionEditor {
        &mut self.about
    }

    pub fn pricing(&mut self) -> &mut TextSectionEditor {
        &mut self.pricing
    }

    pub fn packages(&mut self) -> &mut PackagesEditor {
        &mut self.packages
    }

    pub fn legal(&mut self) -> &mut LegalEditor {
        &mut self.legal
    }

    pub fn faq(&mut self) -> &mut FaqEditor {
        &mut self.faq
    }
}
