//! Chat session: transcript plus delayed assistant replies.
//!
//! The user's turn is appended as soon as it is sent. The assistant's reply
//! is chosen right away and queued with a due time; a single worker task per
//! session appends queued replies in send order once each is due. Closing or
//! dropping the session cancels every pending reply, so nothing is appended
//! to a session that has gone away.
//!
//! The worker is spawned on the first `send`, onto the current Tokio
//! runtime. Without a runtime `send` refuses the message and returns `false`.

use emissions_core::{CompanyProfile, Persona, Turn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AssistantConfig;
use crate::error::AssistError;
use crate::normalizer::is_blank;
use crate::rulebook::Rulebook;

/// State shared with the reply worker, guarded by one lock
#[derive(Debug, Default)]
struct Shared {
    turns: Vec<Turn>,
    /// Replies queued but not yet appended
    pending: usize,
    closed: bool,
}

type SharedState = Arc<Mutex<Shared>>;

/// A reply waiting for its due time
struct QueuedReply {
    text: String,
    due: Instant,
    delivered: oneshot::Sender<()>,
}

struct ReplyWorker {
    queue: mpsc::UnboundedSender<QueuedReply>,
    handle: JoinHandle<()>,
}

pub struct ChatSession {
    persona: Persona,
    context: Option<CompanyProfile>,
    rulebook: Arc<Rulebook>,
    reply_delay: Duration,
    shared: SharedState,
    worker: Option<ReplyWorker>,
    deliveries: Vec<oneshot::Receiver<()>>,
    shutdown: watch::Sender<bool>,
}

impl ChatSession {
    /// Open a session using the rulebook and delay from `config`
    pub fn open(
        persona: Persona,
        context: Option<CompanyProfile>,
        config: &AssistantConfig,
    ) -> Result<Self, AssistError> {
        let rulebook = config.rulebook()?;
        Ok(Self::with_rulebook(persona, context, rulebook, config.reply_delay()))
    }

    /// Open a session with an explicit rulebook
    pub fn with_rulebook(
        persona: Persona,
        context: Option<CompanyProfile>,
        rulebook: Arc<Rulebook>,
        reply_delay: Duration,
    ) -> Self {
        let greeting = Turn::assistant(rulebook.greeting(persona));
        let (shutdown, _) = watch::channel(false);
        info!(%persona, "chat session opened");

        Self {
            persona,
            context,
            rulebook,
            reply_delay,
            shared: Arc::new(Mutex::new(Shared {
                turns: vec![greeting],
                ..Default::default()
            })),
            worker: None,
            deliveries: Vec::new(),
            shutdown,
        }
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Heading for the assistant panel
    pub fn title(&self) -> &'static str {
        self.persona.assistant_title()
    }

    /// Send a user message.
    ///
    /// Returns `false` without touching the transcript when the message is
    /// blank, the session is closed, or no Tokio runtime is available.
    pub fn send(&mut self, text: &str) -> bool {
        if is_blank(text) || self.is_closed() {
            return false;
        }
        let Some(queue) = self.reply_queue() else {
            warn!(persona = %self.persona, "no tokio runtime, message not sent");
            return false;
        };

        let reply = self.rulebook.respond(text, self.persona, self.context.as_ref());
        let (delivered, delivery) = oneshot::channel();
        {
            let mut shared = lock(&self.shared);
            shared.turns.push(Turn::user(text));
            shared.pending += 1;
        }

        let queued = QueuedReply {
            text: reply,
            due: Instant::now() + self.reply_delay,
            delivered,
        };
        if queue.send(queued).is_err() {
            // Worker already stopped; the reply will never be appended
            lock(&self.shared).pending -= 1;
        } else {
            self.deliveries.push(delivery);
        }
        true
    }

    /// Is any reply still waiting to be appended?
    pub fn is_pending(&self) -> bool {
        lock(&self.shared).pending > 0
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }

    /// Snapshot of the conversation so far
    pub fn transcript(&self) -> Vec<Turn> {
        lock(&self.shared).turns.clone()
    }

    /// Wait until every pending reply has been appended or cancelled
    pub async fn settle(&mut self) {
        for delivery in self.deliveries.drain(..) {
            let _ = delivery.await;
        }
    }

    /// Cancel pending replies and refuse further messages
    pub fn close(&mut self) {
        let cancelled = {
            let mut shared = lock(&self.shared);
            if shared.closed {
                return;
            }
            shared.closed = true;
            std::mem::take(&mut shared.pending)
        };

        self.shutdown.send_replace(true);
        if let Some(worker) = self.worker.take() {
            worker.handle.abort();
        }
        self.deliveries.clear();
        info!(persona = %self.persona, cancelled, "chat session closed");
    }

    /// Queue feeding the reply worker, spawning the worker on first use
    fn reply_queue(&mut self) -> Option<mpsc::UnboundedSender<QueuedReply>> {
        if let Some(worker) = &self.worker {
            return Some(worker.queue.clone());
        }

        let runtime = Handle::try_current().ok()?;
        let (queue, inbox) = mpsc::unbounded_channel();
        let handle = runtime.spawn(deliver_replies(
            inbox,
            Arc::clone(&self.shared),
            self.shutdown.subscribe(),
        ));
        self.worker = Some(ReplyWorker {
            queue: queue.clone(),
            handle,
        });
        Some(queue)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Append queued replies in order, each no earlier than its due time
async fn deliver_replies(
    mut inbox: mpsc::UnboundedReceiver<QueuedReply>,
    shared: SharedState,
    mut shutdown: watch::Receiver<bool>,
) {
    while let Some(reply) = inbox.recv().await {
        tokio::select! {
            _ = tokio::time::sleep_until(reply.due) => {
                {
                    let mut state = lock(&shared);
                    // Checked under the lock close() takes to set it
                    if state.closed {
                        return;
                    }
                    state.turns.push(Turn::assistant(reply.text));
                    state.pending = state.pending.saturating_sub(1);
                }
                let _ = reply.delivered.send(());
            }
            _ = shutdown.changed() => {
                debug!("pending replies discarded");
                return;
            }
        }
    }
}

fn lock(shared: &SharedState) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
