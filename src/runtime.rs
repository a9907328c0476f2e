// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-threaded event loop driving the controller.
//!
//! User events arrive on a channel. The position lookup is the only
//! asynchronous step the loop waits on, and it is polled alongside the
//! channel so input keeps flowing while it is outstanding. Deferred events
//! are fire-and-forget timers that post back into the same channel.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc::{UnboundedReceiver, WeakUnboundedSender};

use crate::controller::{App, Deferred, Event};
use crate::db::KeyValueStore;
use crate::error::PositionError;
use crate::models::Coordinates;
use crate::platform::{ExerciseView, MapWidget, PositionProvider};

type PositionFuture<'a> = Pin<Box<dyn Future<Output = Result<Coordinates, PositionError>> + 'a>>;

/// Run until the event channel closes, then hand the controller back.
///
/// `timers` is used to post deferred events; it is weak so pending timers
/// never keep the loop alive on their own.
pub async fn run<M, V, S, P>(
    mut app: App<M, V, S>,
    position: &P,
    mut events: UnboundedReceiver<Event>,
    timers: WeakUnboundedSender<Event>,
) -> App<M, V, S>
where
    M: MapWidget,
    V: ExerciseView,
    S: KeyValueStore,
    P: PositionProvider,
{
    let mut lookup: Option<PositionFuture<'_>> = None;

    loop {
        if app.take_position_request() && lookup.is_none() {
            tracing::debug!("Requesting position");
            let request: PositionFuture<'_> = Box::pin(position.current_position());
            lookup = Some(request);
        }
        for deferred in app.take_deferred() {
            schedule(&timers, deferred);
        }

        tokio::select! {
            // A ready position is handled before any queued input.
            biased;

            result = await_position(&mut lookup) => {
                lookup = None;
                let event = match result {
                    Ok(coords) => Event::PositionAcquired(coords),
                    Err(err) => Event::PositionFailed(err),
                };
                app.dispatch(event);
            }
            next = events.recv() => match next {
                Some(event) => {
                    tracing::trace!(?event, "Dispatching event");
                    app.dispatch(event);
                }
                None => {
                    tracing::info!("Event channel closed, stopping");
                    break;
                }
            },
        }
    }

    app
}

async fn await_position(
    lookup: &mut Option<PositionFuture<'_>>,
) -> Result<Coordinates, PositionError> {
    match lookup {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

fn schedule(timers: &WeakUnboundedSender<Event>, deferred: Deferred) {
    let timers = timers.clone();
    tokio::spawn(async move {
        tokio::time::sleep(deferred.delay).await;
        if let Some(sender) = timers.upgrade() {
            // The loop may have stopped in the meantime.
            let _ = sender.send(deferred.event);
        }
    });
}
