//! Состояние списка: загруженные записи и производное представление
//! (фильтр, поиск, сортировка, страница). Только синхронные операции,
//! обращения к хранилищу живут в `ListController`.

use super::facets::{build_options, FacetOption, FilterChip, ALL_OPTION_ID};
use super::pagination::Pagination;
use super::record::{facet_def, Facet, FacetValue, ListRecord};

/// Active filters. Facet selections are option ids, `0` is "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub group: u32,
    pub secondary: u32,
    pub search: String,
}

impl FilterState {
    pub fn selected(&self, facet: Facet) -> u32 {
        match facet {
            Facet::Group => self.group,
            Facet::Secondary => self.secondary,
        }
    }

    fn select(&mut self, facet: Facet, option_id: u32) {
        match facet {
            Facet::Group => self.group = option_id,
            Facet::Secondary => self.secondary = option_id,
        }
    }
}

/// Column sort applied on top of the filtered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub ascending: bool,
}

/// Identifies one load request; only the latest requested load is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct ControllerState<T: ListRecord> {
    items: Vec<T>,
    language: Option<String>,
    group_options: Vec<FacetOption>,
    secondary_options: Vec<FacetOption>,
    filter: FilterState,
    /// Indices into `items`, in display order
    view: Vec<usize>,
    pagination: Pagination,
    chips: Vec<FilterChip>,
    sort: Option<SortState>,
    generation: u64,
    loaded: bool,
}

impl<T: ListRecord> ControllerState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            language: None,
            group_options: build_options::<T>(&[], Facet::Group),
            secondary_options: build_options::<T>(&[], Facet::Secondary),
            filter: FilterState::default(),
            view: Vec::new(),
            pagination: Pagination::new(page_size),
            chips: Vec::new(),
            sort: None,
            generation: 0,
            loaded: false,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    pub fn begin_reload(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished load. Results of superseded requests are dropped.
    pub fn complete_reload(&mut self, ticket: LoadTicket, items: Vec<T>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping stale {} load (generation {} < {})",
                T::COLLECTION,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.ingest(items);
        true
    }

    /// Replace the whole collection, rebuild facet options and re-derive the
    /// view. Facet selections survive when their value is still present.
    pub fn ingest(&mut self, items: Vec<T>) {
        let group = self.selected_key(Facet::Group);
        let secondary = self.selected_key(Facet::Secondary);

        self.items = items;
        self.loaded = true;
        self.group_options = build_options(&self.items, Facet::Group);
        self.secondary_options = build_options(&self.items, Facet::Secondary);

        self.filter.group = Self::remap(&self.group_options, group);
        self.filter.secondary = Self::remap(&self.secondary_options, secondary);
        self.apply();
    }

    fn selected_key(&self, facet: Facet) -> Option<FacetValue> {
        self.selected(facet).and_then(|o| o.key.clone())
    }

    fn remap(options: &[FacetOption], key: Option<FacetValue>) -> u32 {
        key.and_then(|key| options.iter().find(|o| o.key.as_ref() == Some(&key)))
            .map(|o| o.id)
            .unwrap_or(ALL_OPTION_ID)
    }

    /// Patch cached records with updated versions (matched by id) and
    /// re-derive the view, keeping filters and the current page.
    pub fn replace_records(&mut self, updated: Vec<T>) {
        for record in updated {
            match self.items.iter_mut().find(|i| i.id() == record.id()) {
                Some(slot) => *slot = record,
                None => self.items.push(record),
            }
        }
        self.sort = None;
        self.refresh_view();
        self.pagination.clamp(self.view.len());
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Re-derive the view for the given filter state; resets to page 1.
    /// Unknown option ids fall back to "All".
    pub fn apply_filters(&mut self, filter: FilterState) {
        self.filter = filter;
        for facet in Facet::all() {
            let id = self.filter.selected(facet);
            if id != ALL_OPTION_ID && !self.options(facet).iter().any(|o| o.id == id) {
                log::warn!("Unknown {:?} option {} for {}", facet, id, T::COLLECTION);
                self.filter.select(facet, ALL_OPTION_ID);
            }
        }
        self.apply();
    }

    pub fn set_search(&mut self, text: &str) {
        let mut filter = self.filter.clone();
        filter.search = text.to_string();
        self.apply_filters(filter);
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// Select a facet option by id. Unknown ids and re-selecting the
    /// active option are no-ops; returns whether the view changed.
    pub fn select_facet(&mut self, facet: Facet, option_id: u32) -> bool {
        if !self.options(facet).iter().any(|o| o.id == option_id) {
            log::debug!("Option {} not found for {:?}", option_id, facet);
            return false;
        }
        if self.filter.selected(facet) == option_id {
            return false;
        }
        let mut filter = self.filter.clone();
        filter.select(facet, option_id);
        self.apply_filters(filter);
        true
    }

    /// Reset one facet to "All"; the other facets and the search stay.
    pub fn remove_facet_filter(&mut self, facet: Facet) -> bool {
        if self.filter.selected(facet) == ALL_OPTION_ID {
            return false;
        }
        let mut filter = self.filter.clone();
        filter.select(facet, ALL_OPTION_ID);
        self.apply_filters(filter);
        true
    }

    /// Reset every facet and the search text
    pub fn clear_all_filters(&mut self) {
        self.apply_filters(FilterState::default());
    }

    /// Scope the list to one language (`None` shows every language).
    /// Records without a language are shown in every scope.
    pub fn set_language(&mut self, language: Option<String>) {
        if self.language == language {
            return;
        }
        self.language = language;
        self.apply();
    }

    fn apply(&mut self) {
        self.refresh_view();
        self.pagination.reset();
        self.sort = None;
        self.rebuild_chips();
    }

    fn refresh_view(&mut self) {
        let search = self.filter.search.trim().to_lowercase();
        let group = self.selected(Facet::Group).cloned();
        let secondary = self.selected(Facet::Secondary).cloned();

        let mut view: Vec<usize> = (0..self.items.len())
            .filter(|&i| {
                let item = &self.items[i];
                match (&self.language, item.language()) {
                    (Some(active), Some(lang)) => active == lang,
                    _ => true,
                }
            })
            .collect();

        // Stable: equal keys keep load order, records without a key go last
        view.sort_by_key(|&i| {
            let key = self.items[i].order_key();
            (key.is_none(), key)
        });

        view.retain(|&i| {
            let item = &self.items[i];
            group
                .as_ref()
                .map_or(true, |o| o.matches(item.facet_value(Facet::Group).as_ref()))
                && secondary
                    .as_ref()
                    .map_or(true, |o| o.matches(item.facet_value(Facet::Secondary).as_ref()))
        });

        if !search.is_empty() {
            view.retain(|&i| self.items[i].matches_filter(&search));
        }

        self.view = view;
    }

    fn rebuild_chips(&mut self) {
        let mut chips = Vec::new();
        for facet in Facet::all() {
            let (Some(def), Some(option)) = (facet_def::<T>(facet), self.selected(facet)) else {
                continue;
            };
            if !option.is_all() {
                chips.push(FilterChip {
                    facet,
                    id: def.chip_id,
                    label: option.value.clone(),
                });
            }
        }
        self.chips = chips;
    }

    // ========================================================================
    // Sorting & paging
    // ========================================================================

    /// Sort the current view by a column. Clicking the active column again
    /// toggles the direction, a new column starts ascending. Returns false for
    /// columns the record kind does not sort by. Any later filter change
    /// restores the manual order.
    pub fn sort_by(&mut self, column: &str) -> bool {
        let sortable = self
            .items
            .iter()
            .any(|item| item.sort_value(column).is_some());
        if !sortable {
            return false;
        }

        let ascending = match &self.sort {
            Some(current) if current.column == column => !current.ascending,
            _ => true,
        };

        let items = &self.items;
        self.view.sort_by(|&a, &b| {
            let cmp = items[a].compare_by_field(&items[b], column);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });
        self.sort = Some(SortState {
            column: column.to_string(),
            ascending,
        });
        true
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        self.pagination.set_page(page, self.view.len())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn options(&self, facet: Facet) -> &[FacetOption] {
        match facet {
            Facet::Group => &self.group_options,
            Facet::Secondary => &self.secondary_options,
        }
    }

    /// Currently selected option; `None` when the record kind lacks the facet
    pub fn selected(&self, facet: Facet) -> Option<&FacetOption> {
        let id = self.filter.selected(facet);
        self.options(facet).iter().find(|o| o.id == id)
    }

    pub fn chips(&self) -> &[FilterChip] {
        &self.chips
    }

    /// Drives the visibility of the secondary filter bar
    pub fn has_chips(&self) -> bool {
        !self.chips.is_empty()
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn view_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.view.iter().map(move |&i| &self.items[i])
    }

    pub fn view_ids(&self) -> Vec<&str> {
        self.view_items().map(|i| i.id()).collect()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.view.len())
    }

    pub fn page_items(&self) -> Vec<&T> {
        self.view[self.pagination.bounds(self.view.len())]
            .iter()
            .map(|&i| &self.items[i])
            .collect()
    }

    /// 1-based first/last index shown on the current page
    pub fn page_summary(&self) -> Option<(usize, usize)> {
        self.pagination.summary(self.view.len())
    }

    /// Nearest record of the same language as `id` in view order, `None` at
    /// the boundary of that partition. Records of other languages are
    /// skipped, so order keys are only ever swapped within one partition.
    /// `Err(())` when the id is not in the view.
    pub(crate) fn neighbour(&self, id: &str, offset: isize) -> Result<Option<&T>, ()> {
        let pos = self
            .view
            .iter()
            .position(|&i| self.items[i].id() == id)
            .ok_or(())?;
        let language = self.items[self.view[pos]].language();

        let mut target = pos as isize + offset;
        while target >= 0 && (target as usize) < self.view.len() {
            let candidate = &self.items[self.view[target as usize]];
            if candidate.language() == language {
                return Ok(Some(candidate));
            }
            target += offset;
        }
        Ok(None)
    }
}
