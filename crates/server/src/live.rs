// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live activity feed for the admin panel.
//!
//! Events are notifications about bookings and catalog changes that already
//! happened. They carry identifiers only; clients fetch details over HTTP.
//! Nothing sent by a client over the socket is acted on.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{OffsetDateTime, format_description::well_known::Iso8601};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Events buffered per subscriber. Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Sent once when a client connects.
    Connected {
        /// Server time, ISO 8601.
        timestamp: String,
    },
    /// A traveler entered trip details.
    BookingStarted {
        booking_id: i64,
        user_id: i64,
        destination: String,
    },
    /// A booking was paid.
    BookingCompleted {
        booking_id: i64,
        order_id: i64,
        amount_paid: i64,
    },
    DiscountCreated {
        discount_id: i64,
        code: String,
    },
    DiscountDeleted {
        discount_id: i64,
    },
    /// The sample catalog was seeded.
    SampleDataSeeded {
        users_created: usize,
        agencies_created: usize,
        stations_created: usize,
    },
}

/// Fan-out of live events to every connected admin.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Sends `event` to current subscribers without waiting on them.
    /// With nobody listening the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(receivers) => debug!(?event, receivers, "Broadcast live event"),
            Err(_) => debug!(?event, "No receivers for live event"),
        }
    }

    /// Receives events broadcast after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

fn connected_event() -> LiveEvent {
    LiveEvent::Connected {
        timestamp: OffsetDateTime::now_utc()
            .format(&Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    }
}

/// Streams live events to one upgraded connection until either side stops.
pub async fn stream_events(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Admin connected to live feed");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    if let Ok(json) = serde_json::to_string(&connected_event())
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let event: LiveEvent = match rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live feed client lagged, events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!(?e, "Failed to serialize live event"),
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Ignoring message from live feed client");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("Admin disconnected from live feed");
}
