//! Text section editor for the Home, About me and Pricing pages
//!
//! A page is split into sections. Each section has one Standard block and
//! optionally cards ordered by `cardOrder`. The selected block is edited
//! through a `TextDraft` and saved via the save confirmation modal.

use crate::domain::a003_text::draft::{FieldError, TextDraft, TextField};
use crate::domain::a003_text::model;
use crate::shared::list_controller::{IntentOutcome, ListError};
use crate::shared::modal_host::Services;
use crate::shared::record_store::{fetch_collection, StoreError};
use contracts::domain::a003_text::{TextItem, TextSubtype};
use contracts::domain::a004_image::ImageItem;
use contracts::shared::modal::{ImageModalResult, ModalKind, ModalParams, ModalResult};

/// Вариант переключателя секций
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOption {
    /// 1-based, in first-seen order
    pub id: u32,
    pub section: String,
    /// Number of blocks in the section
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    #[default]
    Standard,
    Card,
}

pub struct TextSectionEditor {
    services: Services,
    page: String,
    items: Vec<TextItem>,
    images: Vec<ImageItem>,
    sections: Vec<SectionOption>,
    section: Option<u32>,
    mode: TextMode,
    selected: Option<String>,
    draft: Option<TextDraft>,
    errors: Vec<FieldError>,
}

impl TextSectionEditor {
    pub fn new(services: Services, page: &str) -> Self {
        Self {
            services,
            page: page.to_string(),
            items: Vec::new(),
            images: Vec::new(),
            sections: Vec::new(),
            section: None,
            mode: TextMode::Standard,
            selected: None,
            draft: None,
            errors: Vec::new(),
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Load the page texts and the image library
    pub async fn load(&mut self) -> Result<(), ListError> {
        let store = self.services.store.clone();
        let loaded = futures::try_join!(
            model::fetch_page(store.as_ref(), &self.page),
            fetch_collection::<ImageItem, _>(store.as_ref()),
        );
        match loaded {
            Ok((texts, images)) => {
                self.set_data(texts, images);
                Ok(())
            }
            Err(e) => Err(self.load_failed(e)),
        }
    }

    async fn reload_texts(&mut self) -> Result<(), ListError> {
        match model::fetch_page(self.services.store.as_ref(), &self.page).await {
            Ok(texts) => {
                self.set_texts(texts);
                Ok(())
            }
            Err(e) => Err(self.load_failed(e)),
        }
    }

    fn load_failed(&self, e: StoreError) -> ListError {
        log::error!("Failed to load texts of {}: {}", self.page, e);
        self.services
            .notifier
            .error(&format!("Failed to load {} texts", self.page));
        e.into()
    }

    /// Hand over loaded collections; texts of other pages are ignored
    pub fn set_data(&mut self, texts: Vec<TextItem>, images: Vec<ImageItem>) {
        self.images = images;
        self.set_texts(texts);
    }

    /// Replace the blocks. The selected section and block are kept when they
    /// still exist, the draft is reset to the stored content.
    fn set_texts(&mut self, texts: Vec<TextItem>) {
        let page = self.page.clone();
        let section_name = self.section_name().map(str::to_string);

        self.items = texts.into_iter().filter(|t| t.page == page).collect();
        self.sections = build_sections(&self.items);

        let section = section_name
            .and_then(|name| self.sections.iter().find(|s| s.section == name))
            .or_else(|| self.sections.first())
            .map(|s| s.id);

        match (section, self.section) {
            (Some(id), Some(current)) if id == current && self.find_selected().is_some() => {
                self.reset_draft();
            }
            (Some(id), _) => {
                self.section = Some(id);
                self.select_mode(self.mode);
            }
            (None, _) => {
                self.section = None;
                self.selected = None;
                self.draft = None;
                self.errors.clear();
            }
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn sections(&self) -> &[SectionOption] {
        &self.sections
    }

    pub fn selected_section(&self) -> Option<u32> {
        self.section
    }

    fn section_name(&self) -> Option<&str> {
        let id = self.section?;
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.section.as_str())
    }

    pub fn select_section(&mut self, id: u32) -> bool {
        if !self.sections.iter().any(|s| s.id == id) {
            log::debug!("Section {} not found on {}", id, self.page);
            return false;
        }
        self.section = Some(id);
        self.select_mode(TextMode::Standard);
        true
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// Switch between the Standard block and the first card of the section
    pub fn select_mode(&mut self, mode: TextMode) {
        self.mode = mode;
        let target = match mode {
            TextMode::Standard => self.standard().map(|t| t.id.clone()),
            TextMode::Card => self.cards().first().map(|t| t.id.clone()),
        };
        self.selected = target;
        self.reset_draft();
    }

    fn in_section(&self) -> impl Iterator<Item = &TextItem> + '_ {
        let name = self.section_name().map(str::to_string);
        self.items
            .iter()
            .filter(move |t| Some(t.section.as_str()) == name.as_deref())
    }

    /// Standard block of the selected section; the first non-card block when
    /// none is marked Standard
    pub fn standard(&self) -> Option<&TextItem> {
        self.in_section()
            .find(|t| t.subtype == TextSubtype::Standard)
            .or_else(|| self.in_section().find(|t| t.subtype != TextSubtype::Card))
    }

    /// Cards of the selected section by `cardOrder`, unordered cards last
    pub fn cards(&self) -> Vec<&TextItem> {
        let mut cards: Vec<&TextItem> = self
            .in_section()
            .filter(|t| t.subtype == TextSubtype::Card)
            .collect();
        cards.sort_by_key(|t| (t.card_order.is_none(), t.card_order));
        cards
    }

    pub fn select_card(&mut self, id: &str) -> bool {
        if !self.cards().iter().any(|t| t.id == id) {
            return false;
        }
        self.mode = TextMode::Card;
        self.selected = Some(id.to_string());
        self.reset_draft();
        true
    }

    fn find_selected(&self) -> Option<&TextItem> {
        let id = self.selected.as_deref()?;
        self.items.iter().find(|t| t.id == id)
    }

    /// Stored version of the block being edited
    pub fn current(&self) -> Option<&TextItem> {
        self.find_selected()
    }

    pub fn images(&self) -> &[ImageItem] {
        &self.images
    }

    // ========================================================================
    // Draft
    // ========================================================================

    pub fn draft(&self) -> Option<&TextDraft> {
        self.draft.as_ref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: TextField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    fn reset_draft(&mut self) {
        self.draft = self.find_selected().map(TextDraft::from_item);
        self.errors.clear();
    }

    /// Edit one field; its inline error is cleared
    pub fn edit(&mut self, field: TextField, value: &str) {
        if let Some(draft) = &mut self.draft {
            draft.set(field, value);
            self.errors.retain(|e| e.field != field);
        }
    }

    /// Use an image from the site library for the block
    pub fn use_library_image(&mut self, image_id: &str) -> bool {
        let Some(image) = self.images.iter().find(|i| i.id == image_id) else {
            return false;
        };
        match &mut self.draft {
            Some(draft) => {
                draft.image = Some(image.image.clone());
                true
            }
            None => false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.draft, self.find_selected()) {
            (Some(draft), Some(item)) => draft.is_dirty(item),
            _ => false,
        }
    }

    pub fn revert(&mut self) {
        self.reset_draft();
    }

    pub fn validate(&mut self) -> bool {
        self.errors = self
            .draft
            .as_ref()
            .map(TextDraft::validate)
            .unwrap_or_default();
        self.errors.is_empty()
    }

    /// Validate, then hand the draft to the save confirmation modal. The
    /// page is reloaded once the modal reports the save.
    pub async fn save(&mut self) -> IntentOutcome {
        if !self.validate() {
            return IntentOutcome::Invalid;
        }
        let Some(draft) = &self.draft else {
            return IntentOutcome::Unchanged;
        };

        let params = draft.save_params();
        match self.services.open_modal(ModalKind::SaveText, params).await {
            Ok(result) if result.is_mutation() => {
                self.services.notifier.success("Text saved");
                match self.reload_texts().await {
                    Ok(()) => IntentOutcome::Applied,
                    Err(e) => IntentOutcome::Failed(e),
                }
            }
            Ok(_) => IntentOutcome::Cancelled,
            Err(e) => IntentOutcome::Failed(e.into()),
        }
    }

    /// Upload modal loop: the modal may ask for the media manager any number
    /// of times before it is saved or closed. A saved image is written to
    /// the store right away.
    pub async fn update_image(&mut self) -> IntentOutcome {
        let Some(draft) = &self.draft else {
            return IntentOutcome::Unchanged;
        };
        let id = draft.id.clone();
        let mut image = draft.image.clone();
        let mut alt_text = draft.image_alt_text.clone();

        loop {
            let params = ModalParams::new()
                .with("id", &id)
                .encoded("image", image.as_deref().unwrap_or(""))
                .encoded("altText", &alt_text);

            let result = match self.services.open_modal(ModalKind::UploadImage, params).await {
                Ok(result) => result,
                Err(e) => return IntentOutcome::Failed(e.into()),
            };

            match result {
                ModalResult::Image(ImageModalResult::OpenMediaManager { alt_text: alt }) => {
                    if let Some(alt) = alt {
                        alt_text = alt;
                    }
                    match self.services.media.pick_image().await {
                        Ok(Some(uri)) => image = Some(uri),
                        Ok(None) => log::debug!("No image picked for {}", id),
                        Err(e) => {
                            log::error!("Media manager failed: {}", e);
                            self.services.notifier.error(&e.to_string());
                            return IntentOutcome::Failed(e.into());
                        }
                    }
                }
                ModalResult::Image(ImageModalResult::Saved {
                    saved: true,
                    new_image_url,
                    alt_text: alt,
                }) => {
                    let image = new_image_url.or(image).unwrap_or_default();
                    let alt_text = alt.unwrap_or(alt_text);
                    return self.store_image(&id, &image, &alt_text).await;
                }
                _ => return IntentOutcome::Cancelled,
            }
        }
    }

    async fn store_image(&mut self, id: &str, image: &str, alt_text: &str) -> IntentOutcome {
        match model::save_image(self.services.store.as_ref(), id, image, alt_text).await {
            Ok(saved) => {
                if let Some(slot) = self.items.iter_mut().find(|t| t.id == saved.id) {
                    *slot = saved;
                }
                if let Some(draft) = &mut self.draft {
                    draft.image = Some(image.to_string()).filter(|s| !s.is_empty());
                    draft.image_alt_text = alt_text.to_string();
                }
                self.services.notifier.success("Image updated");
                IntentOutcome::Applied
            }
            Err(e) => {
                log::error!("Failed to save image of {}: {}", id, e);
                self.services.notifier.error("Failed to save image");
                IntentOutcome::Failed(e.into())
            }
        }
    }
}

/// Distinct sections in first-seen order with block counts
pub fn build_sections(items: &[TextItem]) -> Vec<SectionOption> {
    let mut sections: Vec<SectionOption> = Vec::new();
    for item in items.iter().filter(|t| !t.section.is_empty()) {
        match sections.iter_mut().find(|s| s.section == item.section) {
            Some(existing) => existing.count += 1,
            None => {
                let id = sections.len() as u32 + 1;
                sections.push(SectionOption {
                    id,
                    section: item.section.clone(),
                    count: 1,
                });
            }
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::modal_host::ModalError;
    use crate::shared::testing::TestServices;
    use serde_json::{json, Value};

    fn text(id: &str, section: &str, subtype: &str, card_order: Option<i64>, header: &str) -> Value {
        let mut value = json!({
            "_id": id,
            "page": "Home",
            "section": section,
            "subtype": subtype,
            "header": header,
            "content": format!("<p>{} body</p>", header),
        });
        if let Some(order) = card_order {
            value["cardOrder"] = json!(order);
        }
        value
    }

    async fn editor() -> (TestServices, TextSectionEditor) {
        let t = TestServices::new();
        t.store.seed(
            "text",
            vec![
                text("hero", "Hero", "Standard", None, "Welcome"),
                text("c2", "Services", "Card", Some(2), "Second"),
                text("svc", "Services", "Standard", None, "Services"),
                text("c1", "Services", "Card", Some(1), "First"),
                text("c0", "Services", "Card", None, "Unordered"),
                json!({ "_id": "about", "page": "About me", "section": "Bio", "header": "Me" }),
            ],
        );
        t.store.seed(
            "images",
            vec![json!({ "_id": "img1", "image": "wix:image://v1/lib.png/lib.png" })],
        );
        let mut editor = TextSectionEditor::new(t.services(), "Home");
        editor.load().await.unwrap();
        (t, editor)
    }

    fn card_ids(editor: &TextSectionEditor) -> Vec<&str> {
        editor.cards().iter().map(|t| t.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_sections_with_counts() {
        let (_t, editor) = editor().await;

        let sections: Vec<_> = editor
            .sections()
            .iter()
            .map(|s| (s.id, s.section.as_str(), s.count))
            .collect();
        assert_eq!(sections, vec![(1, "Hero", 1), (2, "Services", 4)]);
        assert_eq!(editor.selected_section(), Some(1));
        assert_eq!(editor.draft().unwrap().header, "Welcome");
        assert_eq!(editor.images().len(), 1);
    }

    #[tokio::test]
    async fn test_cards_ordered_by_card_order() {
        let (_t, mut editor) = editor().await;

        assert!(editor.select_section(2));
        assert_eq!(editor.current().unwrap().id, "svc");
        assert_eq!(card_ids(&editor), vec!["c1", "c2", "c0"]);

        editor.select_mode(TextMode::Card);
        assert_eq!(editor.current().unwrap().id, "c1");
        assert!(editor.select_card("c2"));
        assert_eq!(editor.draft().unwrap().header, "Second");
        assert!(!editor.select_card("hero"));
        assert!(!editor.select_section(9));
    }

    #[tokio::test]
    async fn test_validation_blocks_save() {
        let (t, mut editor) = editor().await;
        editor.edit(TextField::Content, "<p>   </p>");

        assert_eq!(editor.save().await, IntentOutcome::Invalid);
        assert_eq!(editor.error_for(TextField::Content), Some("Field cannot be empty"));
        assert!(t.modals.requests().is_empty());

        editor.edit(TextField::Content, "<p>ok</p>");
        assert!(editor.errors().is_empty());
    }

    #[tokio::test]
    async fn test_revert_restores_stored_content() {
        let (_t, mut editor) = editor().await;
        editor.edit(TextField::Header, "Changed");
        assert!(editor.is_dirty());

        editor.revert();
        assert!(!editor.is_dirty());
        assert_eq!(editor.draft().unwrap().header, "Welcome");
    }

    #[tokio::test]
    async fn test_save_through_modal_reloads_page() {
        let (t, mut editor) = editor().await;
        editor.edit(TextField::Header, "Hello");
        t.modals.push(Ok(ModalResult::Saved(true)));
        // what the confirmation modal would have written
        t.store.seed("text", vec![text("hero", "Hero", "Standard", None, "Hello")]);

        assert_eq!(editor.save().await, IntentOutcome::Applied);

        let request = &t.modals.requests()[0];
        assert_eq!(request.kind, ModalKind::SaveText);
        assert_eq!(request.params.get("id"), Some("hero"));
        assert_eq!(request.params.decoded("header").as_deref(), Some("Hello"));
        assert_eq!(editor.current().unwrap().header, "Hello");
        assert!(!editor.is_dirty());
        assert_eq!(t.notifier.successes(), vec!["Text saved".to_string()]);
    }

    #[tokio::test]
    async fn test_unsaved_modal_keeps_stored_content() {
        let (t, mut editor) = editor().await;
        editor.edit(TextField::Header, "Hello");
        t.modals.push(Ok(ModalResult::Saved(false)));

        assert_eq!(editor.save().await, IntentOutcome::Cancelled);
        assert_eq!(editor.current().unwrap().header, "Welcome");
        assert_eq!(editor.draft().unwrap().header, "Hello");
    }

    #[tokio::test]
    async fn test_image_loop_with_media_manager() {
        let (t, mut editor) = editor().await;
        t.modals.push(Ok(ModalResult::Image(ImageModalResult::OpenMediaManager {
            alt_text: Some("Portrait".into()),
        })));
        t.media.push(Ok(Some("wix:image://v1/new.png/new.png#originWidth=5&originHeight=6".into())));
        t.modals.push(Ok(ModalResult::Image(ImageModalResult::Saved {
            saved: true,
            new_image_url: None,
            alt_text: None,
        })));

        assert_eq!(editor.update_image().await, IntentOutcome::Applied);

        let requests = t.modals.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].params.decoded("image").unwrap().contains("new.png"));
        assert_eq!(requests[1].params.decoded("altText").as_deref(), Some("Portrait"));

        let record = t.store.record("text", "hero").unwrap();
        assert!(record["image"].as_str().unwrap().contains("new.png"));
        assert_eq!(record["imageAltText"], json!("Portrait"));
        assert_eq!(editor.draft().unwrap().image_size(), (5, 6));
        assert_eq!(t.media.calls(), 1);
    }

    #[tokio::test]
    async fn test_image_modal_closed_saves_nothing() {
        let (t, mut editor) = editor().await;
        assert_eq!(editor.update_image().await, IntentOutcome::Cancelled);
        assert!(t.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_media_manager_error_is_reported() {
        let (t, mut editor) = editor().await;
        t.modals.push(Ok(ModalResult::Image(ImageModalResult::OpenMediaManager {
            alt_text: None,
        })));
        t.media.push(Err(ModalError::Failed("closed".into())));

        assert!(matches!(
            editor.update_image().await,
            IntentOutcome::Failed(ListError::Modal(_))
        ));
        assert_eq!(t.notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_library_image() {
        let (_t, mut editor) = editor().await;
        assert!(editor.use_library_image("img1"));
        assert!(editor.is_dirty());
        assert!(!editor.use_library_image("missing"));
    }
}
