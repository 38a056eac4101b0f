//! Timer-driven refresh of the product list.
//!
//! A [`Poller`] re-fetches the full product list on a fixed interval and
//! publishes the latest result through a `watch` channel. Fetches run inside
//! the timer loop, so a slow request delays the next tick instead of
//! overlapping it. Failures publish an empty list plus the user-facing error
//! message and the timer keeps going.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{CardHavenError, Result};
use crate::models::Product;
use crate::CardHaven;

// ---------------------------------------------------------------------------
// ProductSource
// ---------------------------------------------------------------------------

/// Anything that can produce the full product list.
#[async_trait]
pub trait ProductSource: Send + Sync + 'static {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

#[async_trait]
impl ProductSource for CardHaven {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.products().list().await
    }
}

// ---------------------------------------------------------------------------
// PollState
// ---------------------------------------------------------------------------

/// What the poller last published.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Latest product list; empty after a failed fetch.
    pub products: Arc<Vec<Product>>,
    /// User-facing message of the last failure, cleared on success.
    pub error: Option<String>,
    /// Number of fetches completed so far. Zero until the first one lands.
    pub fetches: u64,
}

enum Command {
    Refresh(oneshot::Sender<PollState>),
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct Poller {
    state: watch::Receiver<PollState>,
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Start polling `source` every `period`. The first fetch happens
    /// immediately.
    ///
    /// Fails if `period` is zero. Must be called from within a Tokio runtime.
    pub fn spawn(source: Arc<dyn ProductSource>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(CardHavenError::InvalidArgument(
                "poll interval must be greater than zero".into(),
            ));
        }
        let (state_tx, state_rx) = watch::channel(PollState::default());
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let task = tokio::spawn(run(source, period, state_tx, cmd_rx));
        Ok(Self {
            state: state_rx,
            commands: cmd_tx,
            task,
        })
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// The most recently published state.
    pub fn latest(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Fetch right now instead of waiting for the next tick.
    ///
    /// The pending tick is cancelled and the interval restarts after this
    /// fetch, so the forced fetch is never followed by a duplicate.
    pub async fn refresh(&self) -> Result<PollState> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.commands
            .send(Command::Refresh(ack_tx))
            .await
            .map_err(|_| CardHavenError::Stopped)?;
        ack_rx.await.map_err(|_| CardHavenError::Stopped)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the poll loop. Subscribers keep the last published state.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    source: Arc<dyn ProductSource>,
    period: Duration,
    state: watch::Sender<PollState>,
    mut commands: mpsc::Receiver<Command>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut fetches = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                fetch_once(source.as_ref(), &state, &mut fetches).await;
            }
            cmd = commands.recv() => match cmd {
                Some(Command::Refresh(ack)) => {
                    let latest = fetch_once(source.as_ref(), &state, &mut fetches).await;
                    ticker.reset();
                    let _ = ack.send(latest);
                }
                None => break,
            },
        }
    }
    log::debug!("product poller stopped after {} fetches", fetches);
}

async fn fetch_once(
    source: &dyn ProductSource,
    state: &watch::Sender<PollState>,
    fetches: &mut u64,
) -> PollState {
    let result = source.fetch_products().await;
    *fetches += 1;
    let next = match result {
        Ok(products) => PollState {
            products: Arc::new(products),
            error: None,
            fetches: *fetches,
        },
        Err(e) => {
            log::warn!("product poll failed: {}", e);
            PollState {
                products: Arc::new(Vec::new()),
                error: Some(e.user_message()),
                fetches: *fetches,
            }
        }
    };
    state.send_replace(next.clone());
    next
}

// ---------------------------------------------------------------------------
// ProductFeed
// ---------------------------------------------------------------------------

/// A polled product list plus the mutations that invalidate it.
///
/// Every successful create, update or delete forces one refresh so the
/// change is visible without waiting out the poll interval.
pub struct ProductFeed {
    client: Arc<CardHaven>,
    poller: Poller,
}

impl ProductFeed {
    /// Start polling with the client's configured interval.
    pub fn start(client: Arc<CardHaven>) -> Result<Self> {
        let period = client.poll_interval();
        Self::with_interval(client, period)
    }

    /// Start polling with an explicit interval. Fails if `period` is zero.
    pub fn with_interval(client: Arc<CardHaven>, period: Duration) -> Result<Self> {
        let poller = Poller::spawn(client.clone(), period)?;
        Ok(Self { client, poller })
    }

    /// A receiver that observes every published product list.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.poller.subscribe()
    }

    /// The most recently published state.
    pub fn latest(&self) -> PollState {
        self.poller.latest()
    }

    /// Fetch the product list now. See [`Poller::refresh`].
    pub async fn refresh(&self) -> Result<PollState> {
        self.poller.refresh().await
    }

    /// Create a product, then refresh the list.
    pub async fn create(&self, product: &Product) -> Result<Product> {
        let created = self.client.products().create(product).await?;
        self.poller.refresh().await?;
        Ok(created)
    }

    /// Replace a product, then refresh the list.
    pub async fn update(&self, id: i64, product: &Product) -> Result<Product> {
        let updated = self.client.products().update(id, product).await?;
        self.poller.refresh().await?;
        Ok(updated)
    }

    /// Delete a product, then refresh the list.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.products().delete(id).await?;
        self.poller.refresh().await?;
        Ok(())
    }

    /// Stop polling and hand back the client.
    pub fn stop(self) -> Arc<CardHaven> {
        self.client
    }
}
