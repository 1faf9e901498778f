use super::model::{self, FaqFields};
use crate::shared::config::DashboardConfig;
use crate::shared::form::{is_blank, report, required_param, FormError, CHANGES_SAVED, SAVE_FAILED};
use crate::shared::modal_host::Notifier;
use crate::shared::record_store::RecordStore;
use crate::shared::text::is_blank_rich_text;
use contracts::domain::a001_faq::FaqItem;
use contracts::shared::modal::{ModalParams, ModalResult};

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const FAQ_ADDED: &str = "FAQ successfully added.";
pub const FAQ_ADD_FAILED: &str = "Failed to add FAQ";
pub const FAQ_DELETED: &str = "Question successfully deleted";
pub const FAQ_DELETE_FAILED: &str = "Failed to delete question";

fn validate_fields(question: &str, answer: &str, topic: &str) -> Result<(), FormError> {
    if is_blank(question) || is_blank_rich_text(answer) || is_blank(topic) {
        return Err(FormError::validation(FILL_ALL_FIELDS));
    }
    Ok(())
}

/// Форма добавления вопроса
#[derive(Debug, Clone, PartialEq)]
pub struct AddFaqForm {
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub language: String,
    /// Варианты выпадающего списка тем
    pub topics: Vec<String>,
    pub error: Option<String>,
}

impl AddFaqForm {
    /// Language comes from the `language` parameter, else the configured default
    pub fn new(config: &DashboardConfig, params: &ModalParams) -> Self {
        Self {
            question: String::new(),
            answer: String::new(),
            topic: String::new(),
            language: params
                .decoded("language")
                .unwrap_or_else(|| config.language.default.clone()),
            topics: config.faq.topics.clone(),
            error: None,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        validate_fields(&self.question, &self.answer, &self.topic)
    }

    /// Insert the question at the end of its language
    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        self.error = None;
        let result = self.try_submit(store).await;
        if let Err(e) = &result {
            log::error!("Failed to add FAQ item: {}", e);
            self.error = Some(e.to_string());
        }
        report(notifier, &result, FAQ_ADDED, FAQ_ADD_FAILED);
        result
    }

    async fn try_submit(&self, store: &dyn RecordStore) -> Result<ModalResult, FormError> {
        self.validate()?;
        let order = model::next_order(store, &self.language).await?;
        let title = FaqItem::title_for(order, &self.language);
        let fields = FaqFields {
            question: self.question.trim(),
            answer: &self.answer,
            topic: &self.topic,
            language: &self.language,
            title: &title,
        };
        let saved = model::insert(store, fields, order).await?;
        log::info!("Added FAQ item {} ({})", saved.id, title);
        Ok(ModalResult::Saved(true))
    }
}

/// Форма редактирования вопроса
#[derive(Debug, Clone, PartialEq)]
pub struct EditFaqForm {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub topic: String,
    pub language: String,
    pub topics: Vec<String>,
    pub error: Option<String>,
    order: Option<i64>,
    title: Option<String>,
    /// Language the record is stored under
    stored_language: String,
}

impl EditFaqForm {
    /// Load the record named by the `id` parameter
    pub async fn load(
        config: &DashboardConfig,
        store: &dyn RecordStore,
        params: &ModalParams,
    ) -> Result<Self, FormError> {
        let id = required_param(params, "id")?;
        let item = model::fetch_by_id(store, &id).await?;
        let language = item
            .language
            .unwrap_or_else(|| config.language.default.clone());
        Ok(Self {
            id: item.id,
            question: item.question,
            answer: item.answer,
            topic: item.topic,
            stored_language: language.clone(),
            language,
            topics: config.faq.topics.clone(),
            error: None,
            order: item.order,
            title: item.title,
        })
    }

    pub fn validate(&self) -> Result<(), FormError> {
        validate_fields(&self.question, &self.answer, &self.topic)
    }

    /// Title of a record that stays in its language: "{order}-{code}"
    fn title(&self) -> String {
        match self.order {
            Some(order) => FaqItem::title_for(order, &self.language),
            None => self.title.clone().unwrap_or_default(),
        }
    }

    pub async fn submit(
        &mut self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        self.error = None;
        let result = self.try_submit(store).await;
        match &result {
            Ok(saved) => {
                self.order = saved.order;
                self.title = saved.title.clone();
                self.stored_language = self.language.clone();
            }
            Err(e) => {
                log::error!("Failed to update FAQ item {}: {}", self.id, e);
                self.error = Some(e.to_string());
            }
        }
        let result = result.map(|_| ModalResult::Saved(true));
        report(notifier, &result, CHANGES_SAVED, SAVE_FAILED);
        result
    }

    /// A record moved to another language goes to the end of that language,
    /// so it gets a fresh order and title there.
    async fn try_submit(&self, store: &dyn RecordStore) -> Result<FaqItem, FormError> {
        self.validate()?;
        let (order, title) = if self.language == self.stored_language {
            (None, self.title())
        } else {
            let order = model::next_order(store, &self.language).await?;
            log::info!(
                "Moving FAQ item {} from {} to {} at {}",
                self.id,
                self.stored_language,
                self.language,
                order
            );
            (Some(order), FaqItem::title_for(order, &self.language))
        };
        let fields = FaqFields {
            question: self.question.trim(),
            answer: &self.answer,
            topic: &self.topic,
            language: &self.language,
            title: &title,
        };
        Ok(model::update(store, &self.id, fields, order).await?)
    }
}

/// Подтверждение удаления
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFaqConfirm {
    pub id: String,
    pub question: String,
}

impl DeleteFaqConfirm {
    pub async fn load(store: &dyn RecordStore, params: &ModalParams) -> Result<Self, FormError> {
        let id = required_param(params, "id")?;
        let item = model::fetch_by_id(store, &id).await?;
        Ok(Self {
            id: item.id,
            question: item.question,
        })
    }

    pub async fn confirm(
        &self,
        store: &dyn RecordStore,
        notifier: &dyn Notifier,
    ) -> Result<ModalResult, FormError> {
        let result = model::remove(store, &self.id)
            .await
            .map(|_| ModalResult::Deleted(true))
            .map_err(|e| {
                log::error!("Failed to delete FAQ item {}: {}", self.id, e);
                FormError::from(e)
            });
        report(notifier, &result, FAQ_DELETED, FAQ_DELETE_FAILED);
        result
    }

    pub fn cancel(&self) -> ModalResult {
        ModalResult::Deleted(false)
    }
}
