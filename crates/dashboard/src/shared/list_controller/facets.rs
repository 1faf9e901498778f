use super::record::{facet_def, Facet, FacetDef, FacetValue, ListRecord};

/// Id of the synthetic "All" option of every facet
pub const ALL_OPTION_ID: u32 = 0;

/// One selectable value of a facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub id: u32,
    pub value: String,
    /// `None` for "All"
    pub key: Option<FacetValue>,
    /// Number of loaded records carrying this value
    pub count: usize,
}

impl FacetOption {
    pub fn all(def: &FacetDef, count: usize) -> Self {
        Self {
            id: ALL_OPTION_ID,
            value: def.all_label.to_string(),
            key: None,
            count,
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_OPTION_ID
    }

    /// "All" matches everything, including records without the field
    pub fn matches(&self, value: Option<&FacetValue>) -> bool {
        match &self.key {
            None => true,
            Some(key) => value == Some(key),
        }
    }
}

/// Removable tag for one active (non-default) facet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub facet: Facet,
    pub id: &'static str,
    pub label: String,
}

/// Distinct values of a facet in first-seen order, ids from 1, "All" first.
/// Empty when the record kind has no such facet.
pub fn build_options<T: ListRecord>(items: &[T], facet: Facet) -> Vec<FacetOption> {
    let Some(def) = facet_def::<T>(facet) else {
        return Vec::new();
    };

    let mut options = vec![FacetOption::all(&def, items.len())];
    for item in items {
        let Some(value) = item.facet_value(facet) else {
            continue;
        };
        match options.iter_mut().find(|o| o.key.as_ref() == Some(&value)) {
            Some(existing) => existing.count += 1,
            None => {
                let id = options.len() as u32;
                options.push(FacetOption {
                    id,
                    value: def.label(&value),
                    key: Some(value),
                    count: 1,
                });
            }
        }
    }
    options
}
