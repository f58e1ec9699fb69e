//! Background reading requests and status checks.
//!
//! Network calls run on `BackgroundTask` workers. The main loop keeps
//! animating the loading bar and polls the task once per tick; it never
//! waits on the network.

use std::sync::Arc;

use tarot_engine::BackgroundTask;

use crate::provider::{
    has_tokens, placeholder_fortune, Connectivity, ConnectivityProbe, FixedMeter, FixedProbe,
    ReadingRequest, StaticProvider, TextProvider, TokenMeter,
};

/// Fraction of the loading bar filled per second. The bar loops until the
/// reading arrives.
const PROGRESS_RATE: f32 = 0.35;
/// Seconds per frame of the loading background strip.
pub const LOADING_FRAME_INTERVAL: f32 = 0.4;
pub const LOADING_FRAME_COUNT: usize = 4;

/// Everything the game needs from the network, as capabilities.
#[derive(Clone)]
pub struct Services {
    pub provider: Arc<dyn TextProvider>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub meter: Option<Arc<dyn TokenMeter>>,
}

impl Services {
    pub fn new(provider: Arc<dyn TextProvider>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            provider,
            probe,
            meter: None,
        }
    }

    pub fn with_meter(mut self, meter: Arc<dyn TokenMeter>) -> Self {
        self.meter = Some(meter);
        self
    }

    /// Canned readings, always online, nothing spent.
    pub fn offline() -> Self {
        Self::new(
            Arc::new(StaticProvider::default()),
            Arc::new(FixedProbe(Connectivity::ONLINE)),
        )
        .with_meter(Arc::new(FixedMeter(0.0)))
    }
}

/// What a reading request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Paragraphs to show. A placeholder when the provider failed.
    Reading(Vec<String>),
    /// The connectivity check failed; nothing was requested.
    Offline(Connectivity),
}

/// Runs one reading request at a time and animates the wait.
#[derive(Default)]
pub struct FetchGate {
    task: Option<BackgroundTask<FetchOutcome>>,
    progress: f32,
    frame_timer: f32,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch a request. Refused while another one is still running.
    pub fn start(&mut self, services: &Services, request: ReadingRequest) -> bool {
        if self.in_flight() {
            log::warn!("Reading request already in flight; ignoring new request");
            return false;
        }
        self.progress = 0.0;
        self.frame_timer = 0.0;

        let provider = Arc::clone(&services.provider);
        let probe = Arc::clone(&services.probe);
        log::info!("Requesting reading for {:?} ({})", request.cards, request.intention);
        self.task = Some(BackgroundTask::spawn(
            "reading",
            move || fetch_reading(probe.as_ref(), provider.as_ref(), &request),
            |_| FetchOutcome::Reading(placeholder_fortune()),
        ));
        true
    }

    pub fn in_flight(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_ready())
    }

    /// Advance the cosmetic progress bar.
    pub fn tick(&mut self, dt: f32) {
        self.progress += dt.max(0.0) * PROGRESS_RATE;
        if self.progress >= 1.0 {
            self.progress = self.progress.fract();
        }
        self.frame_timer += dt.max(0.0);
    }

    /// The outcome, on the first poll after the worker finished.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        let outcome = self.task.as_ref()?.get()?.clone();
        self.task = None;
        Some(outcome)
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Frame of the loading background strip.
    pub fn frame(&self) -> usize {
        (self.frame_timer / LOADING_FRAME_INTERVAL) as usize % LOADING_FRAME_COUNT
    }
}

fn fetch_reading(
    probe: &dyn ConnectivityProbe,
    provider: &dyn TextProvider,
    request: &ReadingRequest,
) -> FetchOutcome {
    let connectivity = probe.check();
    if !connectivity.is_online() {
        log::warn!("No connection for reading: {:?}", connectivity);
        return FetchOutcome::Offline(connectivity);
    }

    match provider.generate(request) {
        Ok(reading) if !reading.paragraphs.is_empty() => {
            log::info!("Reading received ({} tokens)", reading.token_count);
            FetchOutcome::Reading(reading.paragraphs)
        }
        Ok(_) => {
            log::error!("Reading service returned no paragraphs; using placeholder");
            FetchOutcome::Reading(placeholder_fortune())
        }
        Err(err) => {
            log::error!("Reading request failed: {}; using placeholder", err);
            FetchOutcome::Reading(placeholder_fortune())
        }
    }
}

/// Result of the startup/retry status check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub connectivity: Connectivity,
    pub has_tokens: bool,
}

/// Check connectivity and the token budget in the background.
pub fn spawn_status_check(services: &Services) -> BackgroundTask<StatusReport> {
    let probe = Arc::clone(&services.probe);
    let meter = services.meter.clone();
    BackgroundTask::spawn(
        "status",
        move || check_status(probe.as_ref(), meter.as_deref()),
        |_| StatusReport {
            connectivity: Connectivity::default(),
            has_tokens: true,
        },
    )
}

fn check_status(probe: &dyn ConnectivityProbe, meter: Option<&dyn TokenMeter>) -> StatusReport {
    let connectivity = probe.check();
    log::info!(
        "Connectivity: internet={} backend={}",
        connectivity.internet,
        connectivity.backend
    );
    if !connectivity.is_online() {
        return StatusReport {
            connectivity,
            has_tokens: true,
        };
    }

    let has_tokens = match meter {
        Some(meter) => match meter.total_cost() {
            Ok(cost) => {
                log::info!("Reading budget spent: {:.2}", cost);
                has_tokens(cost, meter.cost_limit())
            }
            Err(err) => {
                log::warn!("Token status unavailable: {}", err);
                true
            }
        },
        None => true,
    };
    StatusReport {
        connectivity,
        has_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderError, Reading};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    struct FailingProvider;

    impl TextProvider for FailingProvider {
        fn generate(&self, _request: &ReadingRequest) -> Result<Reading, ProviderError> {
            Err(ProviderError::Status {
                status: 500,
                body: "upstream down".into(),
            })
        }
    }

    struct PanickingProvider;

    impl TextProvider for PanickingProvider {
        fn generate(&self, _request: &ReadingRequest) -> Result<Reading, ProviderError> {
            panic!("provider crashed")
        }
    }

    /// Blocks every reading until the test sends on the paired channel.
    struct GatedProvider {
        release: Mutex<Receiver<()>>,
        calls: AtomicUsize,
    }

    fn gated() -> (Arc<GatedProvider>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let provider = GatedProvider {
            release: Mutex::new(rx),
            calls: AtomicUsize::new(0),
        };
        (Arc::new(provider), tx)
    }

    impl TextProvider for GatedProvider {
        fn generate(&self, _request: &ReadingRequest) -> Result<Reading, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.release.lock().unwrap().recv();
            Ok(Reading {
                paragraphs: vec!["Gated".into()],
                token_count: 1,
            })
        }
    }

    fn request() -> ReadingRequest {
        ReadingRequest {
            cards: vec!["The Star".into(), "Death reversed".into(), "Ace of Cups".into()],
            intention: "Health".into(),
        }
    }

    fn wait_outcome(gate: &mut FetchGate) -> FetchOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = gate.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "worker never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn services(provider: Arc<dyn TextProvider>) -> Services {
        Services::new(provider, Arc::new(FixedProbe(Connectivity::ONLINE)))
    }

    #[test]
    fn successful_reading_is_delivered_once() {
        let mut gate = FetchGate::new();
        let paragraphs: Vec<String> = (1..=5).map(|i| format!("Paragraph {}", i)).collect();
        assert!(gate.start(&services(Arc::new(StaticProvider::new(paragraphs.clone()))), request()));
        assert_eq!(wait_outcome(&mut gate), FetchOutcome::Reading(paragraphs));
        assert!(gate.poll().is_none());
    }

    #[test]
    fn second_start_is_refused_while_in_flight() {
        let (provider, release) = gated();
        let services = services(provider.clone());
        let mut gate = FetchGate::new();
        assert!(gate.start(&services, request()));
        assert!(gate.in_flight());
        assert!(!gate.start(&services, request()));
        assert!(gate.poll().is_none());

        release.send(()).unwrap();
        assert_eq!(wait_outcome(&mut gate), FetchOutcome::Reading(vec!["Gated".into()]));
        assert!(gate.poll().is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        // Once delivered, the gate takes a new request.
        assert!(gate.start(&services, request()));
        drop(release);
        wait_outcome(&mut gate);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failing_provider_yields_placeholder() {
        let mut gate = FetchGate::new();
        gate.start(&services(Arc::new(FailingProvider)), request());
        match wait_outcome(&mut gate) {
            FetchOutcome::Reading(p) => {
                assert_eq!(p, placeholder_fortune());
                assert!(!p[0].is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn panicking_provider_yields_placeholder() {
        let mut gate = FetchGate::new();
        gate.start(&services(Arc::new(PanickingProvider)), request());
        assert_eq!(wait_outcome(&mut gate), FetchOutcome::Reading(placeholder_fortune()));
    }

    #[test]
    fn offline_probe_skips_the_request() {
        let mut gate = FetchGate::new();
        let offline = Connectivity { internet: true, backend: false };
        let services = Services::new(Arc::new(PanickingProvider), Arc::new(FixedProbe(offline)));
        gate.start(&services, request());
        assert_eq!(wait_outcome(&mut gate), FetchOutcome::Offline(offline));
    }

    #[test]
    fn progress_loops_and_frames_cycle() {
        let mut gate = FetchGate::new();
        gate.tick(2.0);
        assert!(gate.progress() < 1.0);
        assert!((gate.progress() - 0.7).abs() < 1e-4);
        gate.tick(1.0);
        assert!((gate.progress() - 0.05).abs() < 1e-4);

        let mut gate = FetchGate::new();
        assert_eq!(gate.frame(), 0);
        gate.tick(0.5);
        assert_eq!(gate.frame(), 1);
        gate.tick(1.2);
        assert_eq!(gate.frame(), 0);
    }

    #[test]
    fn status_check_reports_spent_budget() {
        let services = Services::offline().with_meter(Arc::new(FixedMeter(5.0)));
        let task = spawn_status_check(&services);
        let deadline = Instant::now() + Duration::from_secs(5);
        while !task.is_ready() {
            assert!(Instant::now() < deadline);
            thread::sleep(Duration::from_millis(5));
        }
        let report = task.get().copied().unwrap();
        assert!(report.connectivity.is_online());
        assert!(!report.has_tokens);
    }
}
