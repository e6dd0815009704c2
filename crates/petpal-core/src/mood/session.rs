//! Mood session driver
//!
//! One spawned task per session owns the [`MoodMachine`]. Commands and timer
//! deadlines are funnelled through a single `select!` loop.

use crate::error::{Error, Result};
use crate::event_bus::{EventBus, PetEvent};
use crate::mood::config::MoodConfig;
use crate::mood::machine::{MoodMachine, MoodSnapshot, PetAction, Transition};
use crate::mood::reporter::{ActivityReporter, NoopReporter};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

const COMMAND_BUFFER: usize = 32;

enum Command {
    Act {
        action: PetAction,
        reply: oneshot::Sender<Result<MoodSnapshot>>,
    },
}

/// Cloneable handle for driving a running session.
#[derive(Debug, Clone)]
pub struct MoodHandle {
    id: Uuid,
    commands: mpsc::Sender<Command>,
    snapshot: watch::Receiver<MoodSnapshot>,
    events: EventBus,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Act { action, .. } => f.debug_struct("Act").field("action", action).finish(),
        }
    }
}

impl MoodHandle {
    /// Session identifier
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Feed the pet. Fails with [`Error::Overfed`] while saturated.
    pub async fn feed(&self) -> Result<MoodSnapshot> {
        self.act(PetAction::Feed).await
    }

    /// Play with the pet
    pub async fn play(&self) -> Result<MoodSnapshot> {
        self.act(PetAction::Play).await
    }

    /// Care for the pet
    pub async fn care(&self) -> Result<MoodSnapshot> {
        self.act(PetAction::Care).await
    }

    /// Apply `action` and wait until it has been processed and reported.
    pub async fn act(&self, action: PetAction) -> Result<MoodSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Act { action, reply })
            .await
            .map_err(|_| Error::SessionClosed)?;
        rx.await.map_err(|_| Error::SessionClosed)?
    }

    /// Latest state
    #[must_use]
    pub fn snapshot(&self) -> MoodSnapshot {
        *self.snapshot.borrow()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MoodSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to the event bus this session publishes on
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<PetEvent> {
        self.events.subscribe()
    }
}

/// A running mood session.
///
/// Dropping the session cancels its task and every pending timer.
pub struct MoodSession {
    handle: MoodHandle,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

/// Builder for [`MoodSession`]
pub struct MoodSessionBuilder {
    config: MoodConfig,
    reporter: Arc<dyn ActivityReporter>,
    event_bus: Option<EventBus>,
}

impl MoodSessionBuilder {
    /// Report actions and transitions to `reporter`
    pub fn reporter(mut self, reporter: Arc<dyn ActivityReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Publish on a shared event bus instead of a private one
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Validate the config and start the session task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(self) -> Result<MoodSession> {
        self.config.validate()?;

        let id = Uuid::new_v4();
        let events = self.event_bus.unwrap_or_default();
        let machine = MoodMachine::new(self.config, Instant::now());
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let cancel = CancellationToken::new();

        let task = SessionTask {
            id,
            machine,
            reporter: self.reporter,
            snapshot: snapshot_tx,
            events: events.clone(),
            commands: command_rx,
            cancel: cancel.clone(),
        };

        info!(session_id = %id, "Mood session started");
        let join = tokio::spawn(task.run());

        Ok(MoodSession {
            handle: MoodHandle {
                id,
                commands: command_tx,
                snapshot: snapshot_rx,
                events,
            },
            cancel,
            task: Some(join),
        })
    }
}

impl MoodSession {
    /// Start a session that reports to `reporter`
    pub fn spawn(config: MoodConfig, reporter: Arc<dyn ActivityReporter>) -> Result<Self> {
        Self::builder(config).reporter(reporter).spawn()
    }

    /// Builder with a [`NoopReporter`] and a private event bus
    pub fn builder(config: MoodConfig) -> MoodSessionBuilder {
        MoodSessionBuilder {
            config,
            reporter: Arc::new(NoopReporter),
            event_bus: None,
        }
    }

    /// Cloneable handle; it stops working once the session is gone
    #[must_use]
    pub fn handle(&self) -> MoodHandle {
        self.handle.clone()
    }

    /// Session identifier
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.handle.id
    }

    /// Feed the pet
    pub async fn feed(&self) -> Result<MoodSnapshot> {
        self.handle.feed().await
    }

    /// Play with the pet
    pub async fn play(&self) -> Result<MoodSnapshot> {
        self.handle.play().await
    }

    /// Care for the pet
    pub async fn care(&self) -> Result<MoodSnapshot> {
        self.handle.care().await
    }

    /// Apply any action
    pub async fn act(&self, action: PetAction) -> Result<MoodSnapshot> {
        self.handle.act(action).await
    }

    /// Latest state
    #[must_use]
    pub fn snapshot(&self) -> MoodSnapshot {
        self.handle.snapshot()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MoodSnapshot> {
        self.handle.subscribe()
    }

    /// Subscribe to session events
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<PetEvent> {
        self.handle.events()
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(session_id = %self.handle.id, error = %e, "Mood session task failed");
            }
        }
        info!(session_id = %self.handle.id, "Mood session stopped");
    }
}

impl Drop for MoodSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for MoodSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodSession")
            .field("id", &self.handle.id)
            .field("snapshot", &self.handle.snapshot())
            .finish()
    }
}

struct SessionTask {
    id: Uuid,
    machine: MoodMachine,
    reporter: Arc<dyn ActivityReporter>,
    snapshot: watch::Sender<MoodSnapshot>,
    events: EventBus,
    commands: mpsc::Receiver<Command>,
    cancel: CancellationToken,
}

impl SessionTask {
    async fn run(mut self) {
        loop {
            let deadline = self.machine.next_deadline();

            // Commands win over timers due at the same instant.
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => break,

                command = self.commands.recv() => {
                    let Some(Command::Act { action, reply }) = command else {
                        break;
                    };
                    let result = match self.machine.apply(action, Instant::now()) {
                        Ok(transition) => {
                            self.dispatch(transition).await;
                            Ok(self.machine.snapshot())
                        }
                        Err(e) => {
                            debug!(session_id = %self.id, action = %action, error = %e, "Action rejected");
                            Err(e)
                        }
                    };
                    // The caller may have given up waiting
                    let _ = reply.send(result);
                }

                _ = sleep_until(deadline) => {
                    let transition = self.machine.advance(Instant::now());
                    if !transition.is_empty() {
                        self.dispatch(transition).await;
                    }
                }
            }
        }
        debug!(session_id = %self.id, "Mood session loop exited");
    }

    async fn dispatch(&self, transition: Transition) {
        if let Some(action) = transition.action {
            if let Err(e) = self.reporter.interaction(action.interaction()).await {
                warn!(session_id = %self.id, action = %action, error = %e, "Failed to report interaction");
            }
        }
        if transition.became_ignored {
            if let Err(e) = self.reporter.ignored().await {
                warn!(session_id = %self.id, error = %e, "Failed to report ignore");
            }
        }
        if let Some((_, to)) = transition.mood_change {
            if let Err(e) = self.reporter.mood_changed(to).await {
                warn!(session_id = %self.id, mood = %to, error = %e, "Failed to report mood change");
            }
        }

        let snapshot = self.machine.snapshot();
        self.snapshot.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });

        if let Some(action) = transition.action {
            self.events.publish(PetEvent::ActionApplied {
                session_id: self.id,
                action,
                feed_count: snapshot.feed_count,
            });
        }
        if transition.became_ignored {
            self.events.publish(PetEvent::Ignored {
                session_id: self.id,
            });
        }
        if let Some((from, to)) = transition.mood_change {
            debug!(session_id = %self.id, from = %from, to = %to, "Mood changed");
            self.events.publish(PetEvent::MoodChanged {
                session_id: self.id,
                from,
                to,
            });
        }
    }
}
