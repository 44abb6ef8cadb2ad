use std::sync::{Arc, Mutex};
use std::time::Duration;

use pprovider::{
    ModelProvider, ProviderError, ProviderFuture, ProviderId, ProviderOperationHooks,
    ProviderOutcome, ResponseOrchestrator, Turn,
};

use crate::{
    CompositeProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
    TracingObservabilityHooks,
};

fn exercise(hooks: &dyn ProviderOperationHooks) {
    let provider_error = ProviderError::timeout("provider timeout");

    hooks.on_attempt_start(ProviderId::Gemini, 1);
    hooks.on_failure(
        ProviderId::Gemini,
        1,
        Duration::from_millis(10),
        &provider_error,
    );
    hooks.on_fallback(ProviderId::Gemini, ProviderId::Groq);
    hooks.on_attempt_start(ProviderId::Groq, 2);
    hooks.on_success(ProviderId::Groq, 2, Duration::from_millis(20));
    hooks.on_exhausted(2);
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise(&MetricsObservabilityHooks);
}

#[derive(Default, Clone)]
struct RecordingProviderHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ProviderOperationHooks for RecordingProviderHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _attempt: usize) {
        self.events
            .lock()
            .expect("events lock")
            .push("attempt_start");
    }

    fn on_success(&self, _provider: ProviderId, _attempt: usize, _elapsed: Duration) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _attempt: usize,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }

    fn on_fallback(&self, _from: ProviderId, _to: ProviderId) {
        self.events.lock().expect("events lock").push("fallback");
    }

    fn on_exhausted(&self, _attempts: usize) {
        self.events.lock().expect("events lock").push("exhausted");
    }
}

struct PanicProviderHooks;

impl ProviderOperationHooks for PanicProviderHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _attempt: usize) {
        panic!("attempt start panic");
    }

    fn on_success(&self, _provider: ProviderId, _attempt: usize, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _attempt: usize,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }

    fn on_fallback(&self, _from: ProviderId, _to: ProviderId) {
        panic!("fallback panic");
    }

    fn on_exhausted(&self, _attempts: usize) {
        panic!("exhausted panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingProviderHooks::default();
    let events = Arc::clone(&inner.events);
    let hooks = SafeProviderHooks::new(inner);

    exercise(&hooks);

    assert_eq!(
        *events.lock().expect("events lock"),
        vec![
            "attempt_start",
            "failure",
            "fallback",
            "attempt_start",
            "success",
            "exhausted"
        ]
    );
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    exercise(&SafeProviderHooks::new(PanicProviderHooks));
}

#[test]
fn composite_hooks_fan_out_in_order() {
    let first = RecordingProviderHooks::default();
    let second = RecordingProviderHooks::default();
    let hooks = CompositeProviderHooks::new()
        .with(Arc::new(first.clone()))
        .with(Arc::new(SafeProviderHooks::new(PanicProviderHooks)))
        .with(Arc::new(second.clone()));

    exercise(&hooks);

    assert_eq!(hooks.len(), 3);
    assert_eq!(first.events.lock().expect("events lock").len(), 6);
    assert_eq!(second.events.lock().expect("events lock").len(), 6);
}

struct FailingThenReply {
    id: ProviderId,
    reply: Option<&'static str>,
}

impl ModelProvider for FailingThenReply {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn generate<'a>(
        &'a self,
        _system_prompt: &'a str,
        _history: &'a [Turn],
        _user_message: &'a str,
    ) -> ProviderFuture<'a, ProviderOutcome> {
        Box::pin(async move {
            match self.reply {
                Some(text) => ProviderOutcome::Success(text.to_string()),
                None => ProviderOutcome::failure(self.id, ProviderError::rate_limited("quota")),
            }
        })
    }
}

#[tokio::test]
async fn panicking_hooks_do_not_break_fallback() {
    let recorder = RecordingProviderHooks::default();
    let hooks = CompositeProviderHooks::new()
        .with(Arc::new(SafeProviderHooks::new(PanicProviderHooks)))
        .with(Arc::new(recorder.clone()));
    let orchestrator = ResponseOrchestrator::builder()
        .provider(Arc::new(FailingThenReply {
            id: ProviderId::Gemini,
            reply: None,
        }))
        .provider(Arc::new(FailingThenReply {
            id: ProviderId::Groq,
            reply: Some("Backup reply"),
        }))
        .hooks(Arc::new(hooks))
        .build();

    let report = orchestrator.generate_response("Hello", &[]).await;

    assert_eq!(report.text.as_deref(), Some("Backup reply"));
    assert_eq!(
        *recorder.events.lock().expect("events lock"),
        vec!["attempt_start", "failure", "fallback", "attempt_start", "success"]
    );
}
