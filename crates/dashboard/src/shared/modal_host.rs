//! Collaborators that live outside the dashboard logic: the modal host,
//! the toast notifier and the media manager.

use crate::shared::config::DashboardConfig;
use crate::shared::record_store::RecordStore;
use async_trait::async_trait;
use contracts::shared::modal::{ModalKind, ModalParams, ModalResult};
use contracts::shared::notification::{Notification, NotificationKind};
use std::rc::Rc;
use thiserror::Error;

/// Ошибки открытия модального окна
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModalError {
    #[error("modal {0} is not registered")]
    UnknownModal(String),

    #[error("modal failed: {0}")]
    Failed(String),
}

/// Request to open one modal
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    pub kind: ModalKind,
    pub modal_id: String,
    pub params: ModalParams,
}

impl ModalRequest {
    pub fn new(config: &DashboardConfig, kind: ModalKind, params: ModalParams) -> Self {
        Self {
            kind,
            modal_id: config.modals.id_for(kind).to_string(),
            params,
        }
    }
}

/// Opens a dialog by identifier and resolves once it is closed
#[async_trait(?Send)]
pub trait ModalHost {
    async fn open(&self, request: ModalRequest) -> Result<ModalResult, ModalError>;
}

/// Non-blocking toast notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Platform media manager (single image selection)
#[async_trait(?Send)]
pub trait MediaManager {
    /// URI of the chosen image, `None` when nothing was picked
    async fn pick_image(&self) -> Result<Option<String>, ModalError>;
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => log::info!("{}", notification.message),
            NotificationKind::Error => log::error!("{}", notification.message),
        }
    }
}

/// Collaborators shared by every editor of one dashboard
#[derive(Clone)]
pub struct Services {
    pub store: Rc<dyn RecordStore>,
    pub modals: Rc<dyn ModalHost>,
    pub notifier: Rc<dyn Notifier>,
    pub media: Rc<dyn MediaManager>,
    pub config: Rc<DashboardConfig>,
}

impl Services {
    /// Bundle with the log-only notifier; replace it with `with_notifier`
    /// where the platform shows toasts.
    pub fn new(
        store: Rc<dyn RecordStore>,
        modals: Rc<dyn ModalHost>,
        media: Rc<dyn MediaManager>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            store,
            modals,
            notifier: Rc::new(LogNotifier),
            media,
            config: Rc::new(config),
        }
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn modal_request(&self, kind: ModalKind, params: ModalParams) -> ModalRequest {
        ModalRequest::new(&self.config, kind, params)
    }

    /// Open a modal. A failure to open is logged and shown to the user.
    pub async fn open_modal(
        &self,
        kind: ModalKind,
        params: ModalParams,
    ) -> Result<ModalResult, ModalError> {
        let request = self.modal_request(kind, params);
        log::debug!("Opening modal {} ({})", kind.config_key(), request.modal_id);
        self.modals.open(request).await.map_err(|e| {
            log::error!("Modal {:?} failed: {}", kind, e);
            self.notifier.error(&e.to_string());
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record_store::MemoryRecordStore;
    use crate::shared::testing::{FakeMediaManager, RecordingNotifier, ScriptedModalHost};

    #[tokio::test]
    async fn test_open_modal_resolves_configured_id() {
        let modals = Rc::new(ScriptedModalHost::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let config = DashboardConfig::default();
        let expected = config.modals.save_text.clone();
        let services = Services::new(
            Rc::new(MemoryRecordStore::new()),
            modals.clone(),
            Rc::new(FakeMediaManager::default()),
            config,
        )
        .with_notifier(notifier.clone());

        modals.push(Err(ModalError::Failed("closed by host".into())));
        let result = services
            .open_modal(ModalKind::SaveText, ModalParams::new().with("id", "t1"))
            .await;

        assert!(result.is_err());
        assert_eq!(modals.requests()[0].modal_id, expected);
        assert_eq!(notifier.errors(), vec!["modal failed: closed by host".to_string()]);
    }
}
