//! Test doubles for the dashboard collaborators

use crate::shared::config::DashboardConfig;
use crate::shared::modal_host::{MediaManager, ModalError, ModalHost, ModalRequest, Notifier, Services};
use crate::shared::record_store::{MemoryRecordStore, RecordStore};
use async_trait::async_trait;
use contracts::shared::modal::ModalResult;
use contracts::shared::notification::{Notification, NotificationKind};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Modal host answering with queued results; `Dismissed` once the queue is empty
#[derive(Debug, Default)]
pub struct ScriptedModalHost {
    results: RefCell<VecDeque<Result<ModalResult, ModalError>>>,
    requests: RefCell<Vec<ModalRequest>>,
}

impl ScriptedModalHost {
    pub fn push(&self, result: Result<ModalResult, ModalError>) {
        self.results.borrow_mut().push_back(result);
    }

    pub fn requests(&self) -> Vec<ModalRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ModalHost for ScriptedModalHost {
    async fn open(&self, request: ModalRequest) -> Result<ModalResult, ModalError> {
        self.requests.borrow_mut().push(request);
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(ModalResult::Dismissed))
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }

    fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationKind::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationKind::Success)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.borrow_mut().push(notification);
    }
}

/// Media manager returning queued picks; nothing picked once the queue is empty
#[derive(Debug, Default)]
pub struct FakeMediaManager {
    picks: RefCell<VecDeque<Result<Option<String>, ModalError>>>,
    calls: RefCell<usize>,
}

impl FakeMediaManager {
    pub fn push(&self, pick: Result<Option<String>, ModalError>) {
        self.picks.borrow_mut().push_back(pick);
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

#[async_trait(?Send)]
impl MediaManager for FakeMediaManager {
    async fn pick_image(&self) -> Result<Option<String>, ModalError> {
        *self.calls.borrow_mut() += 1;
        self.picks.borrow_mut().pop_front().unwrap_or(Ok(None))
    }
}

/// Concrete handles to every double behind a `Services` bundle
pub struct TestServices {
    pub store: Rc<MemoryRecordStore>,
    pub modals: Rc<ScriptedModalHost>,
    pub notifier: Rc<RecordingNotifier>,
    pub media: Rc<FakeMediaManager>,
    pub config: Rc<DashboardConfig>,
}

impl TestServices {
    pub fn new() -> Self {
        Self::with_store(MemoryRecordStore::new())
    }

    pub fn with_store(store: MemoryRecordStore) -> Self {
        Self {
            store: Rc::new(store),
            modals: Rc::new(ScriptedModalHost::default()),
            notifier: Rc::new(RecordingNotifier::default()),
            media: Rc::new(FakeMediaManager::default()),
            config: Rc::new(DashboardConfig::default()),
        }
    }

    pub fn services(&self) -> Services {
        let store: Rc<dyn RecordStore> = self.store.clone();
        let modals: Rc<dyn ModalHost> = self.modals.clone();
        let notifier: Rc<dyn Notifier> = self.notifier.clone();
        let media: Rc<dyn MediaManager> = self.media.clone();
        Services {
            store,
            modals,
            notifier,
            media,
            config: self.config.clone(),
        }
    }
}
