//! Pricing table: type and session filters with chips, column sort, and the
//! package description cards below the table.

use crate::domain::a002_package::record::SORT_COLUMNS;
use crate::shared::list_controller::{Facet, IntentOutcome, ListController, ListError};
use crate::shared::list_utils::get_sort_indicator;
use crate::shared::modal_host::Services;
use crate::shared::record_store::fetch_collection;
use contracts::domain::a002_package::PackageItem;
use contracts::domain::a003_text::TextItem;
use contracts::shared::modal::{ModalKind, ModalParams};

/// Карточка описания пакета (запись коллекции `text`)
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionCard {
    pub id: String,
    pub header: String,
    pub content: String,
}

pub struct PackagesEditor {
    list: ListController<PackageItem>,
    descriptions: Vec<DescriptionCard>,
}

impl PackagesEditor {
    pub fn new(services: Services) -> Self {
        Self {
            list: ListController::new(services),
            descriptions: Vec::new(),
        }
    }

    pub fn list(&self) -> &ListController<PackageItem> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<PackageItem> {
        &mut self.list
    }

    pub fn descriptions(&self) -> &[DescriptionCard] {
        &self.descriptions
    }

    /// Load packages and their description texts
    pub async fn load(&mut self) -> Result<(), ListError> {
        self.list.reload().await?;
        self.load_descriptions().await
    }

    async fn load_descriptions(&mut self) -> Result<(), ListError> {
        let services = self.list.services().clone();
        match fetch_collection::<TextItem, _>(services.store.as_ref()).await {
            Ok(texts) => {
                self.set_texts(&texts);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load package descriptions: {}", e);
                services.notifier.error("Failed to load package descriptions");
                Err(e.into())
            }
        }
    }

    /// Hand over already loaded collections
    pub fn set_data(&mut self, packages: Vec<PackageItem>, texts: &[TextItem]) {
        self.list.state_mut().ingest(packages);
        self.set_texts(texts);
    }

    /// Keep the configured description records, in configured order
    fn set_texts(&mut self, texts: &[TextItem]) {
        let ids = &self.list.services().config.pricing.description_ids;
        self.descriptions = ids
            .iter()
            .filter_map(|id| {
                let found = texts.iter().find(|t| &t.id == id);
                if found.is_none() {
                    log::warn!("Package description {} not found", id);
                }
                found
            })
            .map(|t| DescriptionCard {
                id: t.id.clone(),
                header: t.header.clone(),
                content: t.content.clone(),
            })
            .collect();
    }

    pub fn select_type(&mut self, option_id: u32) -> bool {
        self.list.state_mut().select_facet(Facet::Group, option_id)
    }

    pub fn select_sessions(&mut self, option_id: u32) -> bool {
        self.list.state_mut().select_facet(Facet::Secondary, option_id)
    }

    /// Remove the chip with the given id ("type" or "session")
    pub fn remove_chip(&mut self, chip_id: &str) -> bool {
        let facet = self
            .list
            .state()
            .chips()
            .iter()
            .find(|c| c.id == chip_id)
            .map(|c| c.facet);
        match facet {
            Some(facet) => self.list.state_mut().remove_facet_filter(facet),
            None => false,
        }
    }

    pub fn clear_filters(&mut self) {
        self.list.state_mut().clear_all_filters();
    }

    pub fn sort_by(&mut self, column: &str) -> bool {
        if !SORT_COLUMNS.contains(&column) {
            log::warn!("Unknown pricing column {}", column);
            return false;
        }
        self.list.state_mut().sort_by(column)
    }

    /// Arrow shown next to a column header
    pub fn sort_indicator(&self, column: &str) -> &'static str {
        match self.list.state().sort() {
            Some(sort) => get_sort_indicator(Some(&sort.column), column, sort.ascending),
            None => get_sort_indicator(None, column, true),
        }
    }

    pub async fn edit_pricing(&mut self, id: &str) -> IntentOutcome {
        let params = ModalParams::new().with("id", id);
        self.list.run_modal(ModalKind::EditPricing, params).await
    }

    pub async fn edit_description(&mut self, id: &str) -> IntentOutcome {
        let services = self.list.services().clone();
        let params = ModalParams::new().with("id", id);
        match services.open_modal(ModalKind::EditDescription, params).await {
            Ok(result) if result.is_mutation() => match self.load_descriptions().await {
                Ok(()) => IntentOutcome::Applied,
                Err(e) => IntentOutcome::Failed(e),
            },
            Ok(_) => IntentOutcome::Cancelled,
            Err(e) => IntentOutcome::Failed(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::TestServices;
    use contracts::shared::modal::ModalResult;
    use serde_json::{json, Value};

    fn package(id: &str, kind: &str, qty: i64, price: f64, validity: i64) -> Value {
        json!({
            "_id": id,
            "packageType": kind,
            "title": PackageItem::display_name(kind, qty),
            "sessionsQty": qty,
            "sessionPrice": price,
            "totalPrice": PackageItem::total_for(qty, price),
            "validityMonths": validity,
        })
    }

    async fn editor() -> (TestServices, PackagesEditor) {
        let t = TestServices::new();
        t.store.seed(
            "packages",
            vec![
                package("q5", "Quick 40", 5, 50.0, 3),
                package("q10", "Quick 40", 10, 45.0, 6),
                package("s5", "Standard 60", 5, 70.0, 3),
                package("s10", "Standard 60", 10, 65.0, 6),
            ],
        );
        let ids = t.config.pricing.description_ids.clone();
        t.store.seed(
            "text",
            vec![
                json!({ "_id": ids[1], "header": "Standard", "content": "<p>60 min</p>" }),
                json!({ "_id": "other", "header": "Home" }),
                json!({ "_id": ids[0], "header": "Quick", "content": "<p>40 min</p>" }),
            ],
        );
        let mut editor = PackagesEditor::new(t.services());
        editor.load().await.unwrap();
        (t, editor)
    }

    fn option_id(editor: &PackagesEditor, facet: Facet, value: &str) -> u32 {
        editor
            .list()
            .state()
            .options(facet)
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_session_options_have_unit_and_counts() {
        let (_t, editor) = editor().await;
        let options = editor.list().state().options(Facet::Secondary);

        let labels: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(labels, vec!["All Sessions", "5 Sessions", "10 Sessions"]);
        assert_eq!(options[1].count, 2);
        assert_eq!(options[0].count, 4);
    }

    #[tokio::test]
    async fn test_removing_session_chip_keeps_type_filter() {
        let (_t, mut editor) = editor().await;
        let standard = option_id(&editor, Facet::Group, "Standard 60");
        let five = option_id(&editor, Facet::Secondary, "5 Sessions");

        editor.select_type(standard);
        editor.select_sessions(five);
        assert_eq!(editor.list().state().view_ids(), vec!["s5"]);
        assert_eq!(editor.list().state().chips().len(), 2);

        assert!(editor.remove_chip("session"));

        let state = editor.list().state();
        assert_eq!(state.view_ids(), vec!["s5", "s10"]);
        assert_eq!(state.chips().len(), 1);
        assert_eq!(state.chips()[0].id, "type");
        assert_eq!(state.chips()[0].label, "Standard 60");
        assert!(!editor.remove_chip("session"));
    }

    #[tokio::test]
    async fn test_clear_filters_hides_chip_bar() {
        let (_t, mut editor) = editor().await;
        let quick = option_id(&editor, Facet::Group, "Quick 40");
        editor.select_type(quick);
        assert!(editor.list().state().has_chips());

        editor.clear_filters();
        assert!(!editor.list().state().has_chips());
        assert_eq!(editor.list().state().view_len(), 4);
    }

    #[tokio::test]
    async fn test_sort_by_total_price_toggles() {
        let (_t, mut editor) = editor().await;

        assert!(editor.sort_by("totalPrice"));
        assert_eq!(editor.list().state().view_ids(), vec!["q5", "s5", "q10", "s10"]);
        assert_eq!(editor.sort_indicator("totalPrice"), " ▲");

        assert!(editor.sort_by("totalPrice"));
        assert_eq!(editor.list().state().view_ids(), vec!["s10", "q10", "s5", "q5"]);
        assert_eq!(editor.sort_indicator("totalPrice"), " ▼");
        assert_eq!(editor.sort_indicator("type"), " ⇅");

        assert!(!editor.sort_by("name"));
    }

    #[tokio::test]
    async fn test_descriptions_follow_configured_order() {
        let (_t, editor) = editor().await;
        let headers: Vec<_> = editor.descriptions().iter().map(|d| d.header.as_str()).collect();
        assert_eq!(headers, vec!["Quick", "Standard"]);
    }

    #[tokio::test]
    async fn test_edit_description_reloads_cards() {
        let (t, mut editor) = editor().await;
        let ids = t.config.pricing.description_ids.clone();
        t.store.seed(
            "text",
            vec![json!({ "_id": ids[0], "header": "Quick (new)", "content": "" })],
        );
        t.modals.push(Ok(ModalResult::Saved(true)));

        assert!(editor.edit_description(&ids[0]).await.is_applied());
        assert_eq!(editor.descriptions()[0].header, "Quick (new)");
        assert_eq!(t.modals.requests()[0].kind, ModalKind::EditDescription);
    }
}
