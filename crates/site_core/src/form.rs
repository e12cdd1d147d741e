//! Contact form submission lifecycle.
//!
//! `Idle|Success|Error -> Loading -> Success|Error`, with `Success` falling
//! back to `Idle` after [`RESET_DELAY`]. Each submission bumps a generation
//! counter; the deferred reset and in-flight outcomes are tagged with it and
//! dropped when stale.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::CONTACT_FIELDS,
    protocol::{ContactPayload, ContactResponse},
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::error::{FormError, TransportError};

pub const RESET_DELAY: Duration = Duration::from_millis(5000);
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send message";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check if the backend server is running.";
pub const SUCCESS_BANNER: &str = "Message sent successfully! We'll get back to you soon.";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// One POST of `payload`; no retries.
    async fn submit(&self, payload: &ContactPayload) -> Result<ContactResponse, TransportError>;
}

pub struct MissingContactTransport;

#[async_trait]
impl ContactTransport for MissingContactTransport {
    async fn submit(&self, _payload: &ContactPayload) -> Result<ContactResponse, TransportError> {
        Err(TransportError::Network(
            "contact endpoint is not configured".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    StatusChanged {
        status: FormStatus,
        error_message: Option<String>,
        generation: u64,
    },
    FieldsCleared,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub status: FormStatus,
    pub error_message: Option<String>,
    pub fields: ContactPayload,
    pub generation: u64,
}

impl FormSnapshot {
    pub fn submit_disabled(&self) -> bool {
        self.status == FormStatus::Loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_disabled() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}

#[derive(Default)]
struct FormState {
    status: FormStatus,
    error_message: Option<String>,
    fields: ContactPayload,
    generation: u64,
    reset_task: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl FormState {
    fn cancel_reset(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }

    fn status_event(&self) -> FormEvent {
        FormEvent::StatusChanged {
            status: self.status,
            error_message: self.error_message.clone(),
            generation: self.generation,
        }
    }
}

pub struct ContactForm {
    transport: Arc<dyn ContactTransport>,
    reset_delay: Duration,
    inner: Mutex<FormState>,
    events: broadcast::Sender<FormEvent>,
}

impl ContactForm {
    pub fn new(transport: Arc<dyn ContactTransport>) -> Arc<Self> {
        Self::with_reset_delay(transport, RESET_DELAY)
    }

    pub fn with_reset_delay(transport: Arc<dyn ContactTransport>, reset_delay: Duration) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            transport,
            reset_delay,
            inner: Mutex::new(FormState::default()),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> FormStatus {
        self.inner.lock().await.status
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.inner.lock().await;
        FormSnapshot {
            status: state.status,
            error_message: state.error_message.clone(),
            fields: state.fields.clone(),
            generation: state.generation,
        }
    }

    pub async fn set_field(&self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let mut state = self.inner.lock().await;
        if state.torn_down {
            return Err(FormError::TornDown);
        }
        let slot = match name {
            "name" => &mut state.fields.name,
            "email" => &mut state.fields.email,
            "service" => &mut state.fields.service,
            "message" => &mut state.fields.message,
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        *slot = value.into();
        Ok(())
    }

    pub async fn fill(&self, payload: ContactPayload) -> Result<(), FormError> {
        let mut state = self.inner.lock().await;
        if state.torn_down {
            return Err(FormError::TornDown);
        }
        state.fields = payload;
        Ok(())
    }

    /// Dispatches the current fields and waits for the outcome.
    ///
    /// Rejected without dispatch while a submission is loading, after
    /// teardown, or when a required field is empty.
    pub async fn submit(self: &Arc<Self>) -> Result<FormStatus, FormError> {
        let (payload, generation) = {
            let mut state = self.inner.lock().await;
            if state.torn_down {
                return Err(FormError::TornDown);
            }
            if state.status == FormStatus::Loading {
                return Err(FormError::SubmissionInFlight);
            }
            if let Some(missing) = CONTACT_FIELDS
                .into_iter()
                .find(|field| state.fields.field(field).is_some_and(str::is_empty))
            {
                return Err(FormError::MissingField(missing));
            }

            state.cancel_reset();
            state.generation += 1;
            state.status = FormStatus::Loading;
            state.error_message = None;
            self.publish(state.status_event());
            (state.fields.clone(), state.generation)
        };

        debug!(generation, "submitting contact form");
        let outcome = self.transport.submit(&payload).await;

        let mut state = self.inner.lock().await;
        if state.torn_down || state.generation != generation {
            debug!(generation, "discarding outcome of abandoned submission");
            return Err(FormError::TornDown);
        }

        match outcome {
            Ok(response) if response.success => {
                info!(generation, id = ?response.id, "contact form accepted");
                state.status = FormStatus::Success;
                state.fields = ContactPayload::default();
                self.publish(FormEvent::FieldsCleared);
                self.publish(state.status_event());
                state.reset_task = Some(self.schedule_reset(generation));
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                warn!(generation, error = %message, "contact form rejected");
                state.status = FormStatus::Error;
                state.error_message = Some(message);
                self.publish(state.status_event());
            }
            Err(err) => {
                warn!(generation, %err, "contact form transport failed");
                state.status = FormStatus::Error;
                state.error_message = Some(NETWORK_ERROR_MESSAGE.to_string());
                self.publish(state.status_event());
            }
        }
        Ok(state.status)
    }

    /// Cancels the pending reset and ignores any in-flight outcome.
    pub async fn teardown(&self) {
        let mut state = self.inner.lock().await;
        state.torn_down = true;
        state.cancel_reset();
    }

    pub async fn reset_pending(&self) -> bool {
        self.inner
            .lock()
            .await
            .reset_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn schedule_reset(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let form: Weak<Self> = Arc::downgrade(self);
        let delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(form) = form.upgrade() else {
                return;
            };
            let mut state = form.inner.lock().await;
            if state.torn_down
                || state.generation != generation
                || state.status != FormStatus::Success
            {
                return;
            }
            state.status = FormStatus::Idle;
            state.reset_task = None;
            form.publish(state.status_event());
        })
    }

    fn publish(&self, event: FormEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.inner.get_mut().cancel_reset();
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
