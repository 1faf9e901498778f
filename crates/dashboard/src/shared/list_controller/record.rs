use crate::shared::list_utils::{Searchable, Sortable};
use contracts::shared::record::CollectionRecord;
use std::fmt;

/// Filter dimension of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// Primary categorical field (FAQ topic, package type)
    Group,
    /// Second dimension combined with the group by AND (package session count)
    Secondary,
}

impl Facet {
    pub fn all() -> [Facet; 2] {
        [Facet::Group, Facet::Secondary]
    }
}

/// Display definition of a facet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetDef {
    /// Chip identifier, e.g. "topic"
    pub chip_id: &'static str,
    /// Label of the synthetic "All" option, e.g. "All Topics"
    pub all_label: &'static str,
    /// Suffix for option labels, e.g. " Sessions" gives "5 Sessions"
    pub unit: Option<&'static str>,
}

impl FacetDef {
    pub fn label(&self, value: &FacetValue) -> String {
        match self.unit {
            Some(unit) => format!("{}{}", value, unit),
            None => value.to_string(),
        }
    }
}

/// Value of a facet field on one record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Text(s) => f.write_str(s),
            FacetValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A record the list controller can filter, sort, paginate and reorder
pub trait ListRecord: CollectionRecord + Searchable + Sortable + Clone {
    const GROUP: Option<FacetDef> = None;
    const SECONDARY: Option<FacetDef> = None;

    /// Stable identity across reloads
    fn id(&self) -> &str;

    /// Manual display order within the record's partition
    fn order_key(&self) -> Option<i64> {
        None
    }

    fn language(&self) -> Option<&str> {
        None
    }

    fn facet_value(&self, _facet: Facet) -> Option<FacetValue> {
        None
    }
}

pub fn facet_def<T: ListRecord>(facet: Facet) -> Option<FacetDef> {
    match facet {
        Facet::Group => T::GROUP,
        Facet::Secondary => T::SECONDARY,
    }
}
