//! FAQ list: topic filter, language scope, search, paging and manual order

use crate::shared::list_controller::{Direction, Facet, IntentOutcome, ListController, ListError};
use crate::shared::modal_host::Services;
use crate::shared::text::truncate_preview;
use contracts::domain::a001_faq::FaqItem;
use contracts::shared::modal::{ModalKind, ModalParams};

/// Строка таблицы FAQ
#[derive(Debug, Clone, PartialEq)]
pub struct FaqRow {
    pub id: String,
    pub question: String,
    /// Ответ без разметки, не длиннее `PREVIEW_LEN` символов
    pub preview: String,
    pub topic: String,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

pub struct FaqEditor {
    list: ListController<FaqItem>,
}

impl FaqEditor {
    pub fn new(services: Services) -> Self {
        Self {
            list: ListController::new(services),
        }
    }

    pub fn list(&self) -> &ListController<FaqItem> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<FaqItem> {
        &mut self.list
    }

    pub async fn load(&mut self) -> Result<(), ListError> {
        self.list.reload().await
    }

    pub fn set_items(&mut self, items: Vec<FaqItem>) {
        self.list.state_mut().ingest(items);
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.list.state_mut().set_language(language);
    }

    pub fn select_topic(&mut self, option_id: u32) -> bool {
        self.list.state_mut().select_facet(Facet::Group, option_id)
    }

    pub fn search(&mut self, text: &str) {
        self.list.state_mut().set_search(text);
    }

    /// Rows of the current page. Arrows are enabled only where a question
    /// of the same language sits next to the row.
    pub fn rows(&self) -> Vec<FaqRow> {
        let state = self.list.state();
        let has_neighbour = |id: &str, offset| matches!(state.neighbour(id, offset), Ok(Some(_)));

        state
            .page_items()
            .into_iter()
            .map(|item| FaqRow {
                id: item.id.clone(),
                question: item.question.clone(),
                preview: truncate_preview(&item.answer),
                topic: item.topic.clone(),
                can_move_up: has_neighbour(&item.id, -1),
                can_move_down: has_neighbour(&item.id, 1),
            })
            .collect()
    }

    /// "1-10 out of 25 questions"
    pub fn summary(&self) -> String {
        let state = self.list.state();
        let total = state.view_len();
        let noun = if total == 1 { "question" } else { "questions" };
        match state.page_summary() {
            Some((start, end)) => format!("{}-{} out of {} {}", start, end, total, noun),
            None => format!("0 {}", noun),
        }
    }

    pub async fn add(&mut self) -> IntentOutcome {
        let mut params = ModalParams::new();
        if let Some(language) = self.list.state().language() {
            params = params.with("language", language);
        }
        self.list.run_modal(ModalKind::AddFaq, params).await
    }

    pub async fn edit(&mut self, id: &str) -> IntentOutcome {
        let params = ModalParams::new().with("id", id);
        self.list.run_modal(ModalKind::EditFaq, params).await
    }

    pub async fn delete(&mut self, id: &str) -> IntentOutcome {
        let params = ModalParams::new().with("id", id);
        self.list.run_modal(ModalKind::DeleteFaq, params).await
    }

    pub async fn move_up(&mut self, id: &str) -> IntentOutcome {
        self.list.move_adjacent(id, Direction::Up).await
    }

    pub async fn move_down(&mut self, id: &str) -> IntentOutcome {
        self.list.move_adjacent(id, Direction::Down).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::TestServices;
    use contracts::shared::modal::ModalResult;
    use serde_json::{json, Value};

    fn faq(id: &str, order: i64, topic: &str, question: &str, answer: &str) -> Value {
        json!({
            "_id": id,
            "question": question,
            "answer": answer,
            "topic": topic,
            "order": order,
            "language": "English",
        })
    }

    async fn editor(records: Vec<Value>) -> (TestServices, FaqEditor) {
        let t = TestServices::new();
        t.store.seed("faq", records);
        let mut editor = FaqEditor::new(t.services());
        editor.load().await.unwrap();
        (t, editor)
    }

    fn topic_id(editor: &FaqEditor, topic: &str) -> u32 {
        editor
            .list()
            .state()
            .options(Facet::Group)
            .iter()
            .find(|o| o.value == topic)
            .map(|o| o.id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_topic_and_search_combine() {
        let (_t, mut editor) = editor(vec![
            faq("1", 1, "Training", "How to start?", "<p>Initial <b>Setup</b> guide</p>"),
            faq("2", 2, "Training", "Setup for trainers", "<p>Other</p>"),
            faq("3", 3, "Training", "Rest days", "<p>Sleep</p>"),
            faq("4", 4, "Admin", "Account setup", "<p>Login</p>"),
        ])
        .await;

        let training = topic_id(&editor, "Training");
        assert!(editor.select_topic(training));
        editor.search("setup");

        assert_eq!(editor.list().state().view_ids(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_markup_is_not_searched() {
        let (_t, mut editor) = editor(vec![faq("1", 1, "Admin", "Q", "<strong>bold</strong>")]).await;

        editor.search("strong");
        assert_eq!(editor.list().state().view_len(), 0);
        editor.search("BOLD");
        assert_eq!(editor.list().state().view_len(), 1);
    }

    #[tokio::test]
    async fn test_summary_and_rows() {
        let records = (1..=12)
            .map(|i| faq(&i.to_string(), i, "Admin", "Q", &"a".repeat(200)))
            .collect();
        let (_t, mut editor) = editor(records).await;

        assert_eq!(editor.summary(), "1-10 out of 12 questions");
        let rows = editor.rows();
        assert_eq!(rows.len(), 10);
        assert!(!rows[0].can_move_up);
        assert!(rows[9].can_move_down);
        assert_eq!(rows[0].preview.chars().count(), 153);

        editor.list_mut().state_mut().set_page(2);
        assert_eq!(editor.summary(), "11-12 out of 12 questions");
        assert!(!editor.rows()[1].can_move_down);

        editor.search("nothing matches");
        assert_eq!(editor.summary(), "0 questions");
    }

    #[tokio::test]
    async fn test_rows_disable_moves_across_languages() {
        let mut german = faq("g", 1, "Admin", "G", "");
        german["language"] = json!("German");
        let (t, mut editor) = editor(vec![
            faq("a", 1, "Admin", "A", ""),
            german,
            faq("b", 2, "Admin", "B", ""),
        ])
        .await;

        let rows = editor.rows();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "g", "b"]);
        assert!(!rows[0].can_move_up && rows[0].can_move_down);
        assert!(!rows[1].can_move_up && !rows[1].can_move_down);
        assert!(rows[2].can_move_up && !rows[2].can_move_down);

        assert_eq!(editor.move_down("g").await, IntentOutcome::Unchanged);
        assert!(t.store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_move_up_then_reload_shows_new_order() {
        let (t, mut editor) = editor(vec![
            faq("a", 1, "Admin", "A", ""),
            faq("b", 2, "Admin", "B", ""),
        ])
        .await;

        assert_eq!(editor.move_up("b").await, IntentOutcome::Applied);
        assert_eq!(t.store.record("faq", "a").unwrap()["order"], json!(2));
        assert_eq!(t.store.record("faq", "b").unwrap()["order"], json!(1));

        editor.load().await.unwrap();
        assert_eq!(editor.list().state().view_ids(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_add_passes_language_and_reloads() {
        let (t, mut editor) = editor(vec![faq("a", 1, "Admin", "A", "")]).await;
        editor.set_language(Some("English".into()));
        t.modals.push(Ok(ModalResult::Saved(true)));
        t.store.seed(
            "faq",
            vec![faq("a", 1, "Admin", "A", ""), faq("b", 2, "Admin", "B", "")],
        );

        assert!(editor.add().await.is_applied());

        let request = &t.modals.requests()[0];
        assert_eq!(request.params.get("language"), Some("English"));
        assert_eq!(request.modal_id, t.config.modals.add_faq);
        assert_eq!(editor.list().state().view_len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_delete_keeps_list() {
        let (t, mut editor) = editor(vec![faq("a", 1, "Admin", "A", "")]).await;

        assert_eq!(editor.delete("a").await, IntentOutcome::Cancelled);
        assert_eq!(t.modals.requests()[0].params.get("id"), Some("a"));
        assert_eq!(editor.list().state().view_len(), 1);
        assert!(t.store.writes().is_empty());
    }
}
