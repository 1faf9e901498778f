//! Legal page editor: Impressum and Privacy Policy texts

use crate::domain::a003_text::model;
use crate::shared::form::FIELD_REQUIRED;
use crate::shared::list_controller::{IntentOutcome, ListError};
use crate::shared::modal_host::Services;
use crate::shared::text::is_blank_rich_text;
use contracts::domain::a003_text::{TextItem, FIELD_CONTENT};
use contracts::shared::modal::{ModalKind, ModalParams};

/// Site page holding the legal texts
pub const LEGAL_PAGE: &str = "Legal";

pub struct LegalEditor {
    services: Services,
    items: Vec<TextItem>,
    /// Radio-button order, ids start at 1
    sections: Vec<String>,
    selected: u32,
    draft: String,
    error: Option<&'static str>,
}

impl LegalEditor {
    pub fn new(services: Services) -> Self {
        let sections = services.config.legal.sections.clone();
        Self {
            services,
            items: Vec::new(),
            sections,
            selected: 1,
            draft: String::new(),
            error: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ListError> {
        match model::fetch_page(self.services.store.as_ref(), LEGAL_PAGE).await {
            Ok(texts) => {
                self.set_data(texts);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load legal texts: {}", e);
                self.services.notifier.error("Failed to load legal texts");
                Err(e.into())
            }
        }
    }

    pub fn set_data(&mut self, texts: Vec<TextItem>) {
        self.items = texts.into_iter().filter(|t| t.page == LEGAL_PAGE).collect();
        self.reset_draft();
    }

    /// (id, label) pairs for the section switch
    pub fn sections(&self) -> Vec<(u32, &str)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| (i as u32 + 1, s.as_str()))
            .collect()
    }

    pub fn selected(&self) -> u32 {
        self.selected
    }

    pub fn select_section(&mut self, id: u32) -> bool {
        if id == 0 || id as usize > self.sections.len() || id == self.selected {
            return false;
        }
        self.selected = id;
        self.reset_draft();
        true
    }

    /// Stored text of the selected section
    pub fn current(&self) -> Option<&TextItem> {
        let name = self.sections.get(self.selected as usize - 1)?;
        self.items.iter().find(|t| &t.section == name)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn edit(&mut self, content: &str) {
        self.draft = content.to_string();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.edit("");
    }

    pub fn revert(&mut self) {
        self.reset_draft();
    }

    pub fn is_dirty(&self) -> bool {
        self.current().map_or(false, |t| t.content != self.draft)
    }

    fn reset_draft(&mut self) {
        self.draft = self.current().map(|t| t.content.clone()).unwrap_or_default();
        self.error = None;
    }

    pub async fn save(&mut self) -> IntentOutcome {
        if is_blank_rich_text(&self.draft) {
            self.error = Some(FIELD_REQUIRED);
            return IntentOutcome::Invalid;
        }
        let Some(id) = self.current().map(|t| t.id.clone()) else {
            log::warn!("No legal text stored for section {}", self.selected);
            return IntentOutcome::Unchanged;
        };

        let params = ModalParams::new()
            .with("id", id)
            .encoded(FIELD_CONTENT, &self.draft);
        match self.services.open_modal(ModalKind::SaveText, params).await {
            Ok(result) if result.is_mutation() => {
                self.services.notifier.success("Text saved");
                match self.load().await {
                    Ok(()) => IntentOutcome::Applied,
                    Err(e) => IntentOutcome::Failed(e),
                }
            }
            Ok(_) => IntentOutcome::Cancelled,
            Err(e) => IntentOutcome::Failed(e.into()),
        }
    }
}
