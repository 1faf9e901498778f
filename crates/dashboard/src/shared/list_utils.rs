/// Универсальные утилиты для работы со списками (поиск, сортировка)
use crate::shared::text::{contains_ci, strip_html};
use std::cmp::Ordering;

/// Поле, участвующее в поиске
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField<'a> {
    Plain(&'a str),
    /// HTML: перед сравнением разметка удаляется
    RichText(&'a str),
}

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Поля, по которым ищется подстрока
    fn search_fields(&self) -> Vec<SearchField<'_>>;

    /// Проверяет, соответствует ли объект поисковому запросу.
    /// `filter_lower` уже приведён к нижнему регистру.
    fn matches_filter(&self, filter_lower: &str) -> bool {
        self.search_fields().into_iter().any(|field| match field {
            SearchField::Plain(text) => contains_ci(text, filter_lower),
            SearchField::RichText(html) => contains_ci(&strip_html(html), filter_lower),
        })
    }
}

/// Значение колонки для сортировки
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Значение указанной колонки; `None`, если колонка не сортируется
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>>;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match (self.sort_value(field), other.sort_value(field)) {
            (Some(SortValue::Text(a)), Some(SortValue::Text(b))) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Some(SortValue::Number(a)), Some(SortValue::Number(b))) => a.total_cmp(&b),
            // Разные типы не сравниваются
            _ => Ordering::Equal,
        }
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: Option<&str>, field: &str, ascending: bool) -> &'static str {
    if current_field == Some(field) {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}
