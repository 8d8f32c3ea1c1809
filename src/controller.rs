use std::sync::Arc;

use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use records::payloads::YesResponse;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    api::ProposalApi,
    config::{FIRST_REFUSAL_WARNING, REPEATED_REFUSAL_WARNING, YES_MESSAGE},
    decor::{AmbientHearts, ConfettiBurst},
    escape::{self, EscapeStrategy, PointerCapability, Reaction},
    geometry::{Layout, Point},
    storage::{NoButtonState, SessionStorage},
    view::PageView,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Recorded(YesResponse),
    /// The call failed; the page celebrated anyway.
    Unrecorded,
    /// A submission was already in flight or done.
    Ignored,
}

struct Inner {
    phase: SubmissionPhase,
    no_button: NoButtonState,
    escape: Box<dyn EscapeStrategy>,
    hearts: Option<AmbientHearts>,
    confetti: Option<ConfettiBurst>,
    torn_down: bool,
}

/// Event wiring for the proposal page. Clones share state, so a host can hand
/// one clone to each event listener.
#[derive(Clone)]
pub struct PageController {
    inner: Arc<Mutex<Inner>>,
    api: Arc<dyn ProposalApi>,
    view: Arc<dyn PageView>,
    storage: Arc<dyn SessionStorage>,
}

impl PageController {
    pub fn new(
        capability: PointerCapability,
        api: Arc<dyn ProposalApi>,
        view: Arc<dyn PageView>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self::with_strategy(escape::for_capability(capability), api, view, storage)
    }

    pub fn with_strategy(
        escape: Box<dyn EscapeStrategy>,
        api: Arc<dyn ProposalApi>,
        view: Arc<dyn PageView>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let no_button = NoButtonState::restore(storage.as_ref());

        Self {
            inner: Arc::new(Mutex::new(Inner {
                phase: SubmissionPhase::Idle,
                no_button,
                escape,
                hearts: None,
                confetti: None,
                torn_down: false,
            })),
            api,
            view,
            storage,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.inner.lock().phase
    }

    pub fn attempts(&self) -> u32 {
        self.inner.lock().no_button.attempt_count
    }

    pub fn capability(&self) -> PointerCapability {
        self.inner.lock().escape.capability()
    }

    /// Page load: starts the background hearts and retires a counter that
    /// already produced the firm warning.
    pub fn mount(&self) {
        let mut inner = self.inner.lock();
        inner.torn_down = false;

        if inner.no_button.attempt_count >= 2 {
            inner.no_button.clear(self.storage.as_ref());
        }

        if inner.hearts.is_none() {
            inner.hearts = Some(AmbientHearts::start(
                self.view.clone(),
                StdRng::from_entropy(),
            ));
        }
    }

    /// Stops every background task owned by the page.
    pub fn teardown(&self) {
        let (hearts, confetti) = {
            let mut inner = self.inner.lock();
            inner.torn_down = true;
            (inner.hearts.take(), inner.confetti.take())
        };

        drop(hearts);
        drop(confetti);
    }

    pub async fn handle_yes(&self) -> SubmissionOutcome {
        {
            let mut inner = self.inner.lock();
            if inner.phase != SubmissionPhase::Idle {
                return SubmissionOutcome::Ignored;
            }
            inner.phase = SubmissionPhase::Submitting;
        }

        self.view.set_yes_enabled(false);

        let outcome = match self.api.record_yes(YES_MESSAGE).await {
            Ok(response) => {
                info!(
                    total = response.total_responses,
                    "YES recorded as {}", response.data.id
                );
                SubmissionOutcome::Recorded(response)
            }
            Err(e) => {
                warn!("Failed to record YES, celebrating anyway: {e:#}");
                SubmissionOutcome::Unrecorded
            }
        };

        let mut inner = self.inner.lock();
        inner.phase = SubmissionPhase::Completed;
        inner.no_button.clear(self.storage.as_ref());

        // The page went away while the request was in flight.
        if inner.torn_down {
            return outcome;
        }

        self.view.show_confirmation();
        inner.confetti = Some(ConfettiBurst::launch(
            self.view.clone(),
            StdRng::from_entropy(),
        ));

        outcome
    }

    /// Clicks on the overlay backdrop (not its content) dismiss it.
    pub fn handle_overlay_click(&self, on_backdrop: bool) {
        if on_backdrop && self.phase() == SubmissionPhase::Completed {
            self.view.hide_confirmation();
        }
    }

    /// Touch-start or pointer-down on the negative control.
    pub fn handle_no_press(&self, at: Point, layout: &Layout) -> Reaction {
        let reaction = self.inner.lock().escape.on_press(at, layout);
        self.apply(reaction)
    }

    pub fn handle_no_hover(&self, layout: &Layout) -> Reaction {
        let reaction = self.inner.lock().escape.on_hover(layout);
        self.apply(reaction)
    }

    pub fn handle_no_click(&self, at: Point, layout: &Layout) -> Reaction {
        let reaction = self.inner.lock().escape.on_click(at, layout);
        self.apply(reaction)
    }

    /// Whether the host must cancel the negative control's default click.
    pub fn prevents_no_click_default(&self) -> bool {
        self.inner.lock().escape.suppresses_default_click()
    }

    pub fn prevents_no_context_menu(&self) -> bool {
        self.inner.lock().escape.suppresses_context_menu()
    }

    pub fn handle_resize(&self) {
        self.view.reset_no_button();
    }

    /// Re-inspects the pointer capability; a change swaps the strategy.
    pub fn handle_orientation_change(&self, capability: PointerCapability) {
        {
            let mut inner = self.inner.lock();
            if inner.escape.capability() != capability {
                info!(?capability, "Pointer capability changed");
                inner.escape = escape::for_capability(capability);
            }
        }

        self.view.reset_no_button();
    }

    fn apply(&self, reaction: Reaction) -> Reaction {
        match &reaction {
            Reaction::Relocate(relocation) => self.view.place_no_button(relocation),
            Reaction::Displace(displacement) => self.view.shift_no_button(displacement),
            Reaction::Refuse => self.refuse(),
            Reaction::Ignore => {}
        }

        reaction
    }

    fn refuse(&self) {
        let attempts = self
            .inner
            .lock()
            .no_button
            .record_attempt(self.storage.as_ref());

        info!(attempts, "Negative control clicked");

        let warning = if attempts == 1 {
            FIRST_REFUSAL_WARNING
        } else {
            REPEATED_REFUSAL_WARNING
        };

        self.view.alert(warning);
        self.view.reload();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::Utc;
    use rand::{SeedableRng, rngs::StdRng};
    use records::{ClientMetadata, ResponseRecord, payloads::YesResponse};

    use super::*;
    use crate::{
        config::{NO_ATTEMPTS_KEY, YES_MESSAGE},
        escape::{CoarsePointerEscape, FinePointerEscape},
        geometry::Size,
        storage::MemoryStorage,
        testing::{Event, RecordingView},
    };

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ProposalApi for FakeApi {
        async fn record_yes(&self, message: &str) -> Result<YesResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;

            if self.fail {
                return Err(anyhow!("connection refused"));
            }

            Ok(YesResponse {
                success: true,
                data: ResponseRecord {
                    id: call.to_string(),
                    timestamp: Utc::now(),
                    message: message.to_string(),
                    client: ClientMetadata::default(),
                },
                total_responses: call + 1,
            })
        }
    }

    struct Page {
        controller: PageController,
        api: Arc<FakeApi>,
        view: Arc<RecordingView>,
        storage: Arc<MemoryStorage>,
    }

    fn page(escape: Box<dyn EscapeStrategy>, api: FakeApi, storage: Arc<MemoryStorage>) -> Page {
        let api = Arc::new(api);
        let view = Arc::new(RecordingView::default());
        let controller =
            PageController::with_strategy(escape, api.clone(), view.clone(), storage.clone());

        Page {
            controller,
            api,
            view,
            storage,
        }
    }

    fn fine() -> Box<dyn EscapeStrategy> {
        Box::new(FinePointerEscape::new(StdRng::seed_from_u64(1)))
    }

    fn coarse() -> Box<dyn EscapeStrategy> {
        Box::new(CoarsePointerEscape::new(StdRng::seed_from_u64(1)))
    }

    fn layout() -> Layout {
        Layout::new(Size::new(1280.0, 800.0), Size::new(120.0, 48.0))
    }

    #[tokio::test]
    async fn test_rapid_double_yes_calls_api_once() {
        let page = page(fine(), FakeApi::default(), Arc::default());
        let other = page.controller.clone();

        let (first, second) = tokio::join!(page.controller.handle_yes(), other.handle_yes());

        assert_eq!(page.api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second, SubmissionOutcome::Ignored);
        let SubmissionOutcome::Recorded(response) = first else {
            panic!("first submission must be recorded");
        };
        assert_eq!(response.data.message, YES_MESSAGE);
        assert_eq!(page.controller.phase(), SubmissionPhase::Completed);

        assert_eq!(page.controller.handle_yes().await, SubmissionOutcome::Ignored);
        assert_eq!(page.api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_yes_flow_updates_view() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(NO_ATTEMPTS_KEY, "1".to_string());
        let page = page(fine(), FakeApi::default(), storage);

        page.controller.handle_yes().await;

        let events = page.view.events();
        assert_eq!(events.first(), Some(&Event::YesEnabled(false)));
        assert_eq!(page.view.count(&Event::ShowConfirmation), 1);
        assert_eq!(page.controller.attempts(), 0);
        assert_eq!(page.storage.get(NO_ATTEMPTS_KEY), None);
    }

    #[tokio::test]
    async fn test_failed_yes_still_celebrates() {
        let page = page(
            coarse(),
            FakeApi {
                fail: true,
                ..Default::default()
            },
            Arc::default(),
        );

        let outcome = page.controller.handle_yes().await;

        assert_eq!(outcome, SubmissionOutcome::Unrecorded);
        assert_eq!(page.controller.phase(), SubmissionPhase::Completed);
        assert_eq!(page.view.count(&Event::ShowConfirmation), 1);
        assert_eq!(page.controller.handle_yes().await, SubmissionOutcome::Ignored);
        assert_eq!(page.api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confetti_follows_yes() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        page.controller.handle_yes().await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        let events = page.view.events();
        assert_eq!(
            events.iter().filter(|e| matches!(e, Event::AddConfetti(_))).count(),
            crate::config::CONFETTI_PIECES
        );
        assert_eq!(
            events.iter().filter(|e| matches!(e, Event::RemoveConfetti(_))).count(),
            crate::config::CONFETTI_PIECES
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_during_yes_skips_confetti() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        let (outcome, ()) = tokio::join!(page.controller.handle_yes(), async {
            page.controller.teardown()
        });
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(matches!(outcome, SubmissionOutcome::Recorded(_)));
        assert_eq!(page.controller.phase(), SubmissionPhase::Completed);
        assert_eq!(page.view.count(&Event::ShowConfirmation), 0);
        assert!(
            !page
                .view
                .events()
                .iter()
                .any(|e| matches!(e, Event::AddConfetti(_)))
        );
        assert!(page.controller.inner.lock().confetti.is_none());
    }

    #[test]
    fn test_overlay_backdrop_dismisses_only_after_yes() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        page.controller.handle_overlay_click(true);
        assert_eq!(page.view.count(&Event::HideConfirmation), 0);

        page.controller.inner.lock().phase = SubmissionPhase::Completed;
        page.controller.handle_overlay_click(false);
        page.controller.handle_overlay_click(true);
        assert_eq!(page.view.count(&Event::HideConfirmation), 1);
    }

    #[test]
    fn test_fine_refusals_escalate() {
        let storage = Arc::new(MemoryStorage::new());
        let page = page(fine(), FakeApi::default(), storage.clone());
        let at = Point::new(640.0, 400.0);

        assert_eq!(page.controller.handle_no_click(at, &layout()), Reaction::Refuse);
        assert_eq!(page.controller.handle_no_click(at, &layout()), Reaction::Refuse);
        assert_eq!(page.controller.handle_no_click(at, &layout()), Reaction::Refuse);

        let events = page.view.events();
        let alerts: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            alerts,
            [
                FIRST_REFUSAL_WARNING,
                REPEATED_REFUSAL_WARNING,
                REPEATED_REFUSAL_WARNING
            ]
        );
        assert_eq!(page.view.count(&Event::Reload), 3);
        assert_eq!(storage.get(NO_ATTEMPTS_KEY).as_deref(), Some("3"));
        assert_eq!(page.api.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_counter_survives_reload() {
        let storage = Arc::new(MemoryStorage::new());
        let before = page(fine(), FakeApi::default(), storage.clone());
        before
            .controller
            .handle_no_click(Point::default(), &layout());

        let after = page(fine(), FakeApi::default(), storage);
        assert_eq!(after.controller.attempts(), 1);

        after
            .controller
            .handle_no_click(Point::default(), &layout());
        assert_eq!(
            after.view.events(),
            [
                Event::Alert(REPEATED_REFUSAL_WARNING.to_string()),
                Event::Reload
            ]
        );
    }

    #[tokio::test]
    async fn test_mount_retires_firm_warning_counter() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(NO_ATTEMPTS_KEY, "2".to_string());
        let page = page(fine(), FakeApi::default(), storage);

        page.controller.mount();

        assert_eq!(page.controller.attempts(), 0);
        assert_eq!(page.storage.get(NO_ATTEMPTS_KEY), None);
        page.controller.teardown();
    }

    #[test]
    fn test_fine_hover_shifts_without_counting() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        let reaction = page.controller.handle_no_hover(&layout());

        let Reaction::Displace(displacement) = reaction else {
            panic!("hover must displace");
        };
        assert_eq!(page.view.events(), [Event::Shift(displacement)]);
        assert_eq!(page.controller.attempts(), 0);
        assert_eq!(
            page.controller.handle_no_press(Point::default(), &layout()),
            Reaction::Ignore
        );
    }

    #[test]
    fn test_coarse_press_and_click_relocate() {
        let page = page(coarse(), FakeApi::default(), Arc::default());
        let at = Point::new(640.0, 400.0);

        for reaction in [
            page.controller.handle_no_press(at, &layout()),
            page.controller.handle_no_click(at, &layout()),
        ] {
            let Reaction::Relocate(relocation) = reaction else {
                panic!("coarse pointer must relocate");
            };
            assert!(page.view.events().contains(&Event::Place(relocation)));
        }

        assert!(page.controller.prevents_no_click_default());
        assert!(page.controller.prevents_no_context_menu());
        assert_eq!(page.controller.attempts(), 0);
        assert_eq!(page.view.count(&Event::Reload), 0);
    }

    #[test]
    fn test_orientation_change_swaps_strategy() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        page.controller
            .handle_orientation_change(PointerCapability::Coarse);
        assert_eq!(page.controller.capability(), PointerCapability::Coarse);

        page.controller
            .handle_orientation_change(PointerCapability::Coarse);
        page.controller.handle_resize();
        assert_eq!(page.view.count(&Event::ResetNo), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_stops_hearts() {
        let page = page(fine(), FakeApi::default(), Arc::default());

        page.controller.mount();
        page.controller.mount();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // A second mount must not start a second field.
        let first_wave = page
            .view
            .events()
            .iter()
            .filter(|e| matches!(e, Event::AddHeart(_)))
            .count();
        assert!(first_wave < 15 + 10);

        page.controller.teardown();
        let settled = page.view.events().len();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(page.view.events().len(), settled);
    }
}
