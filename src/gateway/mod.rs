pub mod events;
pub mod heartbeat;
pub mod reconnect;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::CardError;
use crate::models::presence::PresencePayload;
use events::Inbound;
use reconnect::ReconnectPolicy;

type RelaySocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a connected session came to an end.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The relay closed the socket, or it dropped.
    Closed,
    /// Nobody is listening for presence any more.
    ChannelClosed,
}

enum Step {
    Frame(Option<Result<Message, tungstenite::Error>>),
    Heartbeat,
}

/// Subscribes to one user on the relay and forwards every presence payload
/// to a channel. One socket at a time; a new attempt starts only after the
/// previous session has ended and the policy delay has elapsed.
pub struct RelayClient<P: ReconnectPolicy> {
    url: String,
    user_id: String,
    policy: P,
    heartbeat: bool,
}

impl<P: ReconnectPolicy> RelayClient<P> {
    pub fn new(url: impl Into<String>, user_id: impl Into<String>, policy: P) -> Self {
        Self {
            url: url.into(),
            user_id: user_id.into(),
            policy,
            heartbeat: true,
        }
    }

    pub fn with_heartbeat(mut self, enabled: bool) -> Self {
        self.heartbeat = enabled;
        self
    }

    /// Runs until the receiving side of `tx` is dropped or the policy gives up.
    pub async fn run(mut self, tx: mpsc::Sender<PresencePayload>) {
        let mut failures: u32 = 0;

        loop {
            match connect_async(self.url.as_str()).await {
                Ok((socket, _)) => {
                    failures = 0;
                    tracing::info!("connected to relay at {}", self.url);
                    match self.session(socket, &tx).await {
                        Ok(SessionEnd::ChannelClosed) => {
                            tracing::debug!("presence channel closed, leaving relay");
                            return;
                        }
                        Ok(SessionEnd::Closed) => tracing::info!("relay connection closed"),
                        Err(e) => tracing::warn!("relay session ended: {e}"),
                    }
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    tracing::warn!("failed to connect to relay: {e}");
                }
            }

            if tx.is_closed() {
                return;
            }

            let Some(delay) = self.policy.next_delay(failures) else {
                tracing::error!("giving up on relay after {failures} failed attempt(s)");
                return;
            };
            tracing::debug!("reconnecting to relay in {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }

    async fn session(
        &self,
        socket: RelaySocket,
        tx: &mpsc::Sender<PresencePayload>,
    ) -> Result<SessionEnd, CardError> {
        let (mut sink, mut stream) = socket.split();

        sink.send(Message::Text(events::subscribe_frame(&self.user_id).into()))
            .await?;

        let mut beat: Option<Interval> = None;

        loop {
            let step = tokio::select! {
                msg = stream.next() => Step::Frame(msg),
                _ = next_beat(&mut beat) => Step::Heartbeat,
            };

            match step {
                Step::Heartbeat => {
                    sink.send(Message::Text(events::heartbeat_frame().into()))
                        .await?;
                }
                Step::Frame(Some(Ok(Message::Text(text)))) => match events::decode(text.as_str()) {
                    Inbound::Presence(payload) => {
                        if tx.send(*payload).await.is_err() {
                            let _ = sink.close().await;
                            return Ok(SessionEnd::ChannelClosed);
                        }
                    }
                    Inbound::Hello(hello) if self.heartbeat => {
                        let period = heartbeat::interval_from_hello(hello.heartbeat_interval);
                        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                        beat = Some(interval);
                        tracing::debug!("relay heartbeat every {:?}", period);
                    }
                    Inbound::Hello(_) | Inbound::Ignored => {}
                },
                Step::Frame(Some(Ok(Message::Close(frame)))) => {
                    tracing::debug!("relay sent close: {:?}", frame);
                    return Ok(SessionEnd::Closed);
                }
                Step::Frame(Some(Ok(_))) => {}
                Step::Frame(Some(Err(e))) => {
                    tracing::error!("relay socket error: {e}");
                    let _ = sink.close().await;
                    return Err(e.into());
                }
                Step::Frame(None) => return Ok(SessionEnd::Closed),
            }
        }
    }
}

async fn next_beat(beat: &mut Option<Interval>) {
    match beat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
