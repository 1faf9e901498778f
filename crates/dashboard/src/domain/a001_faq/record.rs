use crate::shared::list_controller::{Facet, FacetDef, FacetValue, ListRecord};
use crate::shared::list_utils::{SearchField, Searchable, SortValue, Sortable};
use contracts::domain::a001_faq::FaqItem;

impl Searchable for FaqItem {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Plain(&self.question),
            SearchField::RichText(&self.answer),
        ]
    }
}

impl Sortable for FaqItem {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>> {
        match field {
            "question" => Some(SortValue::Text(&self.question)),
            "topic" => Some(SortValue::Text(&self.topic)),
            "order" => self.order.map(|o| SortValue::Number(o as f64)),
            _ => None,
        }
    }
}

impl ListRecord for FaqItem {
    const GROUP: Option<FacetDef> = Some(FacetDef {
        chip_id: "topic",
        all_label: "All Topics",
        unit: None,
    });

    fn id(&self) -> &str {
        &self.id
    }

    fn order_key(&self) -> Option<i64> {
        self.order
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn facet_value(&self, facet: Facet) -> Option<FacetValue> {
        match facet {
            Facet::Group if !self.topic.is_empty() => Some(FacetValue::Text(self.topic.clone())),
            _ => None,
        }
    }
}
