//! Async host for a [`PaginationController`].
//!
//! A mounted view owns its controller and page source on a dedicated tokio
//! task. Visibility signals and retries arrive over a channel, fetches run on
//! the same task, and every change is published as a [`ViewSnapshot`].
//! Unmounting (or dropping) the view cancels any fetch still in flight.

use crate::controller::{ControllerSettings, Effect, Input, PaginationController, Phase};
use crate::pagination::{Page, VisibilitySignal};
use crate::traits::{Keyed, PageSource};
use crate::{CatalogError, CatalogResult};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// What the rendering shell needs to draw one listing.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<T> {
    pub items: Vec<T>,
    pub offset: u32,
    pub limit: u32,
    pub total: u32,
    pub loading: bool,
    pub phase: Phase,
    pub last_error: Option<String>,
    /// Number of inputs the view task has consumed so far.
    pub inputs_processed: u64,
}

impl<T: Keyed + Clone> ViewSnapshot<T> {
    fn capture(controller: &PaginationController<T>, inputs_processed: u64) -> Self {
        Self {
            items: controller.items().to_vec(),
            offset: controller.offset(),
            limit: controller.limit(),
            total: controller.total(),
            loading: controller.is_loading(),
            phase: controller.phase(),
            last_error: controller.last_error().map(ToString::to_string),
            inputs_processed,
        }
    }
}

#[derive(Debug)]
enum ViewMessage {
    Visibility(VisibilitySignal),
    Retry,
}

impl ViewMessage {
    fn into_input<T>(self) -> Input<T> {
        match self {
            Self::Visibility(signal) => Input::Visibility(signal),
            Self::Retry => Input::Retry,
        }
    }
}

pub struct ListingView<T> {
    input_tx: mpsc::UnboundedSender<ViewMessage>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    snapshot_rx: watch::Receiver<ViewSnapshot<T>>,
    task: Option<JoinHandle<()>>,
    sent: AtomicU64,
}

impl<T> ListingView<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    /// Mounts a view seeded with `first_page`. Must be called from within a
    /// tokio runtime.
    pub fn mount<S>(first_page: Page<T>, source: S, settings: ControllerSettings) -> CatalogResult<Self>
    where
        S: PageSource<T> + 'static,
    {
        let controller = PaginationController::initialize(first_page, settings)?;
        let (snapshot_tx, snapshot_rx) = watch::channel(ViewSnapshot::capture(&controller, 0));
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run_view(
            controller,
            source,
            input_rx,
            shutdown_rx,
            snapshot_tx,
        ));

        Ok(Self {
            input_tx,
            shutdown_tx: Some(shutdown_tx),
            snapshot_rx,
            task: Some(task),
            sent: AtomicU64::new(0),
        })
    }

    pub fn signal(&self, signal: VisibilitySignal) -> CatalogResult<()> {
        self.send(ViewMessage::Visibility(signal))
    }

    pub fn retry(&self) -> CatalogResult<()> {
        self.send(ViewMessage::Retry)
    }

    fn send(&self, message: ViewMessage) -> CatalogResult<()> {
        self.input_tx
            .send(message)
            .map_err(|_| CatalogError::Internal("listing view is no longer running".to_string()))?;
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn snapshot(&self) -> ViewSnapshot<T> {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot<T>> {
        self.snapshot_rx.clone()
    }

    /// Waits for the first snapshot satisfying `predicate`.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ViewSnapshot<T>) -> bool,
    ) -> CatalogResult<ViewSnapshot<T>> {
        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(predicate)
            .await
            .map_err(|_| CatalogError::Internal("listing view stopped".to_string()))?;
        Ok(snapshot.clone())
    }

    /// Waits until every input sent so far has been consumed and no fetch
    /// is outstanding.
    pub async fn settle(&self) -> CatalogResult<ViewSnapshot<T>> {
        let sent = self.sent.load(Ordering::SeqCst);
        self.wait_for(|snapshot| {
            snapshot.phase == Phase::TornDown
                || (snapshot.inputs_processed >= sent && !snapshot.phase.is_fetching())
        })
        .await
    }

    /// Tears the view down and waits for its task to finish. Any fetch in
    /// flight is dropped without being applied.
    pub async fn unmount(mut self) -> ViewSnapshot<T> {
        self.shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "listing view task ended abnormally");
            }
        }
        self.snapshot()
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl<T> Drop for ListingView<T> {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn run_view<T, S>(
    mut controller: PaginationController<T>,
    source: S,
    mut input_rx: mpsc::UnboundedReceiver<ViewMessage>,
    mut shutdown_rx: oneshot::Receiver<()>,
    snapshot_tx: watch::Sender<ViewSnapshot<T>>,
) where
    T: Keyed + Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    let mut processed: u64 = 0;
    let publish = |controller: &PaginationController<T>, processed: u64| {
        snapshot_tx.send_replace(ViewSnapshot::capture(controller, processed));
    };

    'view: loop {
        let message = tokio::select! {
            _ = &mut shutdown_rx => break 'view,
            message = input_rx.recv() => match message {
                Some(message) => message,
                None => break 'view,
            },
        };
        processed += 1;
        let mut effect = controller.dispatch(message.into_input());
        publish(&controller, processed);

        while let Some(Effect::Fetch(request)) = effect {
            let fetch = source.fetch_page(request);
            tokio::pin!(fetch);

            let outcome = loop {
                tokio::select! {
                    outcome = &mut fetch => break outcome,
                    _ = &mut shutdown_rx => {
                        tracing::debug!(offset = request.offset, "cancelling in-flight fetch");
                        break 'view;
                    }
                    message = input_rx.recv() => match message {
                        Some(message) => {
                            processed += 1;
                            if controller.dispatch(message.into_input()).is_some() {
                                tracing::warn!("unexpected effect while a fetch is in flight");
                            }
                            publish(&controller, processed);
                        }
                        None => break 'view,
                    },
                }
            };

            effect = controller.dispatch(Input::FetchCompleted { request, outcome });
            publish(&controller, processed);
        }
    }

    controller.dispatch(Input::Teardown);
    publish(&controller, processed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;
    use crate::traits::MockPageSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn page(offset: u32, limit: u32, total: u32) -> Page<Item> {
        let end = offset.saturating_add(limit).min(total);
        Page::new(offset, limit, total, (offset..end).map(|id| Item { id }).collect())
    }

    /// Source whose fetches block until released, counting how many started.
    struct GatedSource {
        total: u32,
        release: Arc<Notify>,
        started: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageSource<Item> for GatedSource {
        async fn fetch_page(&self, request: PageRequest) -> CatalogResult<Page<Item>> {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(page(request.offset, request.limit, self.total))
        }
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Source that never answers; records when its future is dropped.
    struct HangingSource {
        started: Arc<Notify>,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl PageSource<Item> for HangingSource {
        async fn fetch_page(&self, _request: PageRequest) -> CatalogResult<Page<Item>> {
            let _flag = DropFlag(self.dropped.clone());
            self.started.notify_one();
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_scroll_to_end_with_mock_source() {
        let mut source = MockPageSource::<Item>::new();
        source
            .expect_fetch_page()
            .withf(|request| *request == PageRequest::new(14, 14))
            .times(1)
            .returning(|request| Ok(page(request.offset, request.limit, 28)));

        let view = ListingView::mount(page(0, 14, 28), source, ControllerSettings::default())
            .unwrap();

        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        let snapshot = view.settle().await.unwrap();
        assert_eq!(snapshot.items.len(), 28);
        assert_eq!(snapshot.offset, 14);
        assert!(snapshot.loading);

        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        let snapshot = view.settle().await.unwrap();
        assert_eq!(snapshot.items.len(), 28);
        assert_eq!(snapshot.offset, 28);
        assert_eq!(snapshot.phase, Phase::Exhausted);

        let final_snapshot = view.unmount().await;
        assert_eq!(final_snapshot.phase, Phase::TornDown);
        assert!(!final_snapshot.loading);
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_and_retry_recovers() {
        let mut source = MockPageSource::<Item>::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(CatalogError::Network("connection reset".to_string())));
        source
            .expect_fetch_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|request| Ok(page(request.offset, request.limit, 42)));

        let view = ListingView::mount(page(0, 14, 42), source, ControllerSettings::default())
            .unwrap();

        view.signal(VisibilitySignal::visible(0.5)).unwrap();
        let snapshot = view.settle().await.unwrap();
        assert_eq!(snapshot.items.len(), 14);
        assert!(matches!(snapshot.phase, Phase::Failed { attempts: 1, .. }));
        assert!(snapshot
            .last_error
            .as_deref()
            .unwrap()
            .contains("connection reset"));

        view.retry().unwrap();
        let snapshot = view.settle().await.unwrap();
        assert_eq!(snapshot.items.len(), 28);
        assert_eq!(snapshot.phase, Phase::Idle);
        assert!(snapshot.last_error.is_none());
    }

    #[tokio::test]
    async fn test_signals_during_fetch_do_not_issue_more_fetches() {
        let release = Arc::new(Notify::new());
        let started = Arc::new(AtomicUsize::new(0));
        let source = GatedSource {
            total: 70,
            release: release.clone(),
            started: started.clone(),
        };

        let view = ListingView::mount(page(0, 14, 70), source, ControllerSettings::default())
            .unwrap();

        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        view.wait_for(|s| s.phase.is_fetching()).await.unwrap();

        for _ in 0..5 {
            view.signal(VisibilitySignal::visible(1.0)).unwrap();
        }
        view.wait_for(|s| s.inputs_processed >= 6).await.unwrap();
        assert_eq!(view.snapshot().offset, 14);

        release.notify_one();
        let snapshot = view.settle().await.unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.items.len(), 28);
        assert_eq!(snapshot.offset, 14);
    }

    #[tokio::test]
    async fn test_unmount_cancels_in_flight_fetch() {
        let started = Arc::new(Notify::new());
        let dropped = Arc::new(AtomicBool::new(false));
        let source = HangingSource {
            started: started.clone(),
            dropped: dropped.clone(),
        };

        let view = ListingView::mount(page(0, 14, 70), source, ControllerSettings::default())
            .unwrap();
        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        started.notified().await;

        let snapshot = view.unmount().await;
        assert!(dropped.load(Ordering::SeqCst));
        assert_eq!(snapshot.phase, Phase::TornDown);
        assert_eq!(snapshot.items.len(), 14);
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight_fetch() {
        let started = Arc::new(Notify::new());
        let dropped = Arc::new(AtomicBool::new(false));
        let source = HangingSource {
            started: started.clone(),
            dropped: dropped.clone(),
        };

        let view = ListingView::mount(page(0, 14, 70), source, ControllerSettings::default())
            .unwrap();
        let mut rx = view.subscribe();
        view.signal(VisibilitySignal::visible(1.0)).unwrap();
        started.notified().await;

        drop(view);

        let snapshot = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            rx.wait_for(|s| s.phase == Phase::TornDown),
        )
        .await
        .expect("view task did not tear down")
        .unwrap()
        .clone();
        assert!(dropped.load(Ordering::SeqCst));
        assert_eq!(snapshot.items.len(), 14);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_subscribers_observe_teardown() {
        let source = MockPageSource::<Item>::new();
        let view = ListingView::mount(page(0, 14, 70), source, ControllerSettings::default())
            .unwrap();
        let rx = view.subscribe();
        let snapshot = view.unmount().await;
        assert_eq!(snapshot.phase, Phase::TornDown);
        assert_eq!(rx.borrow().phase, Phase::TornDown);
    }

    #[tokio::test]
    async fn test_mount_rejects_zero_limit() {
        let source = MockPageSource::<Item>::new();
        let result = ListingView::mount(
            Page::new(0, 0, 10, Vec::<Item>::new()),
            source,
            ControllerSettings::default(),
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
