//! Conversation runtime executor

use super::traits::{ChatView, Navigator};
use crate::state_machine::{transition, ConvContext, ConvState, Effect, Event};
use crate::transport::SessionTransport;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Drives the state machine: feeds it events and performs its effects.
///
/// Backend calls run as background tasks that post their outcome back on
/// the event channel, so the loop never blocks on the network.
pub struct ConversationRuntime<T, V, N>
where
    T: SessionTransport + 'static,
    V: ChatView,
    N: Navigator + 'static,
{
    context: ConvContext,
    state: ConvState,
    transport: Arc<T>,
    view: V,
    navigator: Arc<N>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    state_tx: watch::Sender<ConvState>,
}

impl<T, V, N> ConversationRuntime<T, V, N>
where
    T: SessionTransport + 'static,
    V: ChatView,
    N: Navigator + 'static,
{
    pub fn new(
        context: ConvContext,
        transport: T,
        view: V,
        navigator: N,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConvState::Idle);
        Self {
            context,
            state: ConvState::Idle,
            transport: Arc::new(transport),
            view,
            navigator: Arc::new(navigator),
            event_rx,
            event_tx,
            state_tx,
        }
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<ConvState> {
        self.state_tx.subscribe()
    }

    pub async fn run(mut self) {
        tracing::info!("Starting conversation runtime");

        let mut next = Some(Event::Launch);
        while let Some(event) = next {
            if let Err(e) = self.process_event(event) {
                tracing::warn!(state = self.state.name(), error = %e, "Event rejected");
            }
            if self.state.is_finished() {
                break;
            }
            next = self.event_rx.recv().await;
        }

        tracing::info!(state = self.state.name(), "Conversation runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), String> {
        let event_name = event.name();

        // Pure state transition
        let result =
            transition(&self.state, &self.context, event).map_err(|e| e.to_string())?;

        tracing::debug!(
            event = event_name,
            from = self.state.name(),
            to = result.new_state.name(),
            mode = ?result.new_state.mode(),
            effects = result.effects.len(),
            "Transition"
        );

        self.state = result.new_state;
        self.state_tx.send_replace(self.state);

        for effect in result.effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    /// Execute an effect
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::AppendMessage { message } => self.view.append(message),

            Effect::ShowTextEntry { placeholder } => self.view.show_text_entry(&placeholder),

            Effect::ShowConfirmation { affirm, defer } => {
                self.view.show_confirmation(&affirm, &defer);
            }

            Effect::ShowBusy { status } => self.view.show_busy(&status),

            Effect::SetEnabled { enabled } => self.view.set_enabled(enabled),

            Effect::StartSession => {
                let transport = self.transport.clone();
                self.spawn_call(async move {
                    match transport.start_session().await {
                        Ok(start) => Event::SessionStarted {
                            initial_message: start.initial_message,
                        },
                        Err(error) => Event::SessionStartFailed { error },
                    }
                });
            }

            Effect::SendMessage { text } => {
                let transport = self.transport.clone();
                self.spawn_call(async move {
                    match transport.send_message(&text).await {
                        Ok(reply) => Event::ChatReplied { reply },
                        Err(error) => Event::ChatFailed { error },
                    }
                });
            }

            Effect::RequestProfile => {
                let transport = self.transport.clone();
                self.spawn_call(async move {
                    match transport.request_profile().await {
                        Ok(reply) => Event::ProfileReplied { reply },
                        Err(error) => Event::ProfileFailed { error },
                    }
                });
            }

            Effect::ScheduleNavigation { destination, delay } => {
                // Fire-and-forget: there is nothing to cancel it with
                let navigator = self.navigator.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    tracing::info!(destination = %destination, "Navigating");
                    if let Err(e) = navigator.navigate(&destination) {
                        tracing::error!(destination = %destination, error = %e, "Navigation failed");
                    }
                });
            }
        }
    }

    /// Run a backend call in the background and post its outcome
    fn spawn_call<F>(&self, call: F)
    where
        F: std::future::Future<Output = Event> + Send + 'static,
    {
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = call.await;
            if event_tx.send(event).await.is_err() {
                tracing::warn!("Runtime gone before backend call resolved");
            }
        });
    }
}
