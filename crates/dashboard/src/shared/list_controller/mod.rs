//! Filtered list controller
//!
//! Owns a `ControllerState` for one record kind and turns user intents
//! (reload, reorder, modal-driven mutations) into store calls. Pure view
//! operations (filters, search, sort, paging) are on the state itself.

pub mod facets;
pub mod pagination;
pub mod record;
pub mod reorder;
pub mod state;

pub use facets::{FacetOption, FilterChip, ALL_OPTION_ID};
pub use pagination::Pagination;
pub use record::{Facet, FacetDef, FacetValue, ListRecord};
pub use reorder::Direction;
pub use state::{ControllerState, FilterState, LoadTicket, SortState};

use crate::shared::modal_host::{ModalError, Services};
use crate::shared::record_store::{fetch_collection, StoreError};
use contracts::shared::modal::{ModalKind, ModalParams};
use reorder::{swap_order_keys, Slot};
use thiserror::Error;

/// Ошибки операций над списком
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Modal(#[from] ModalError),

    #[error("item {0} is not in the current view")]
    UnknownItem(String),

    #[error("{0} records have no manual order")]
    NotReorderable(&'static str),

    #[error("item {0} has no order key")]
    MissingOrderKey(String),

    #[error("reorder failed and was reverted: {0}")]
    RolledBack(StoreError),

    #[error("reorder failed ({failed}) and could not be reverted ({rollback})")]
    RollbackFailed {
        failed: StoreError,
        rollback: StoreError,
    },
}

/// What happened to a user intent
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Applied,
    /// Nothing to do (boundary move, unchanged selection)
    Unchanged,
    /// The user closed the modal without saving
    Cancelled,
    /// Inline validation failed, nothing was sent
    Invalid,
    Failed(ListError),
}

impl IntentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, IntentOutcome::Applied)
    }
}

pub struct ListController<T: ListRecord> {
    services: Services,
    state: ControllerState<T>,
}

impl<T: ListRecord> ListController<T> {
    pub fn new(services: Services) -> Self {
        let page_size = services.config.list.page_size;
        Self {
            services,
            state: ControllerState::new(page_size),
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn state(&self) -> &ControllerState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControllerState<T> {
        &mut self.state
    }

    /// Query the whole collection and replace the local copy.
    /// On failure the previous data stays visible.
    pub async fn reload(&mut self) -> Result<(), ListError> {
        self.fetch().await.map_err(|e| {
            log::error!("Failed to load {}: {}", T::COLLECTION, e);
            self.services
                .notifier
                .error(&format!("Failed to load {}", T::COLLECTION));
            e
        })
    }

    /// Reload without a notification; the caller reports the outcome
    async fn fetch(&mut self) -> Result<(), ListError> {
        let ticket = self.state.begin_reload();
        let items = fetch_collection::<T, _>(self.services.store.as_ref()).await?;
        log::debug!("Loaded {} {} records", items.len(), T::COLLECTION);
        self.state.complete_reload(ticket, items);
        Ok(())
    }

    /// Swap the item with its neighbour in the current view
    pub async fn move_adjacent(&mut self, id: &str, direction: Direction) -> IntentOutcome {
        match self.try_move(id, direction).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Failed to move {} {}: {}", T::COLLECTION, id, e);
                self.services.notifier.error("Failed to change the order");
                if matches!(e, ListError::RollbackFailed { .. }) {
                    // Store state is unknown, resync
                    match self.fetch().await {
                        Ok(()) => log::info!("Resynced {} after failed rollback", T::COLLECTION),
                        Err(resync) => {
                            log::error!("Resync of {} failed: {}", T::COLLECTION, resync)
                        }
                    }
                }
                IntentOutcome::Failed(e)
            }
        }
    }

    async fn try_move(&mut self, id: &str, direction: Direction) -> Result<IntentOutcome, ListError> {
        let field = T::ORDER_FIELD.ok_or(ListError::NotReorderable(T::COLLECTION))?;

        let (current, neighbour) = {
            let current = self
                .state
                .find(id)
                .ok_or_else(|| ListError::UnknownItem(id.to_string()))?;
            let neighbour = self
                .state
                .neighbour(id, direction.offset())
                .map_err(|_| ListError::UnknownItem(id.to_string()))?;
            let Some(neighbour) = neighbour else {
                log::debug!("{} is already at the {:?} boundary", id, direction);
                return Ok(IntentOutcome::Unchanged);
            };
            (slot_of(current)?, slot_of(neighbour)?)
        };

        let raw = swap_order_keys(
            self.services.store.as_ref(),
            T::COLLECTION,
            field,
            &current,
            &neighbour,
        )
        .await?;

        let updated: Result<Vec<T>, _> = raw.iter().map(T::decode).collect();
        match updated {
            Ok(updated) if updated.len() == 2 => self.state.replace_records(updated),
            Ok(_) | Err(_) => {
                log::warn!("Store returned unexpected records after swap, reloading {}", T::COLLECTION);
                self.reload().await?;
            }
        }
        Ok(IntentOutcome::Applied)
    }

    /// Open a modal and reload when it reports a mutation
    pub async fn run_modal(&mut self, kind: ModalKind, params: ModalParams) -> IntentOutcome {
        match self.services.open_modal(kind, params).await {
            Ok(result) if result.is_mutation() => match self.reload().await {
                Ok(()) => IntentOutcome::Applied,
                Err(e) => IntentOutcome::Failed(e),
            },
            Ok(_) => IntentOutcome::Cancelled,
            Err(e) => IntentOutcome::Failed(e.into()),
        }
    }
}

fn slot_of<T: ListRecord>(item: &T) -> Result<Slot, ListError> {
    let key = item
        .order_key()
        .ok_or_else(|| ListError::MissingOrderKey(item.id().to_string()))?;
    Ok(Slot {
        id: item.id().to_string(),
        key,
    })
}
