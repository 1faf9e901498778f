use crate::shared::list_controller::{Facet, FacetDef, FacetValue, ListRecord};
use crate::shared::list_utils::{SearchField, Searchable, SortValue, Sortable};
use contracts::domain::a002_package::PackageItem;

/// Sortable columns of the pricing table
pub const SORT_COLUMNS: [&str; 5] = ["type", "sessionQty", "sessionPrice", "totalPrice", "validity"];

impl Searchable for PackageItem {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        let mut fields = vec![
            SearchField::Plain(&self.package_type),
            SearchField::Plain(&self.name),
        ];
        if let Some(description) = &self.description {
            fields.push(SearchField::RichText(description));
        }
        fields
    }
}

impl Sortable for PackageItem {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>> {
        match field {
            "type" => Some(SortValue::Text(&self.package_type)),
            "sessionQty" => Some(SortValue::Number(self.session_qty as f64)),
            "sessionPrice" => Some(SortValue::Number(self.session_price)),
            "totalPrice" => Some(SortValue::Number(self.total_price)),
            "validity" => Some(SortValue::Number(self.validity_months as f64)),
            _ => None,
        }
    }
}

impl ListRecord for PackageItem {
    const GROUP: Option<FacetDef> = Some(FacetDef {
        chip_id: "type",
        all_label: "All Types",
        unit: None,
    });
    const SECONDARY: Option<FacetDef> = Some(FacetDef {
        chip_id: "session",
        all_label: "All Sessions",
        unit: Some(" Sessions"),
    });

    fn id(&self) -> &str {
        &self.id
    }

    fn facet_value(&self, facet: Facet) -> Option<FacetValue> {
        match facet {
            Facet::Group if !self.package_type.is_empty() => {
                Some(FacetValue::Text(self.package_type.clone()))
            }
            Facet::Group => None,
            Facet::Secondary => Some(FacetValue::Number(self.session_qty)),
        }
    }
}
