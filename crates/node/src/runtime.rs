//! Node runtime
//!
//! Reads messages line by line and answers them concurrently:
//!
//! ```text
//! reader ──line──▶ decode ──▶ task per message ──reply──▶ mpsc ──▶ writer task ──▶ output
//! ```
//!
//! - every decoded message is handled on its own tokio task, so slow polls
//!   on one key do not hold up appends on another
//! - a single writer task owns the output, so replies never interleave
//! - a handler that panics is answered with a `Crash` error
//! - once the output fails, reading stops and no further request is applied
//!
//! [`run`] returns once input hits EOF and every pending reply is written,
//! or with the writer's error as soon as the output fails.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, warn};

use offsetlog_wire::{decode_line, read_line, write_message, Message, WireError};

use crate::service::Service;

/// Serve `service` over `reader` / `writer` until `reader` is exhausted
/// or `writer` fails.
pub async fn run<R, W>(reader: R, writer: W, service: Arc<Service>) -> Result<(), WireError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let writer_task = tokio::spawn(write_replies(writer, rx));

    let mut reader = BufReader::new(reader);
    loop {
        // The receiver is dropped only when the writer gives up
        let line = tokio::select! {
            biased;
            _ = tx.closed() => {
                warn!("output closed, no longer reading requests");
                break;
            }
            line = read_line(&mut reader) => line?,
        };
        let Some(line) = line else {
            debug!("input closed, draining replies");
            break;
        };

        match decode_line(&line) {
            Ok(message) => spawn_handler(&service, message, &tx),
            Err(e) => {
                if let Some(reply) = service.reject(&line, &e) {
                    send_reply(&tx, reply);
                }
            }
        }

        // Input that is always ready would otherwise starve the writer
        tokio::task::yield_now().await;
    }

    // The writer stops once every handler task has dropped its sender
    drop(tx);
    writer_task.await.map_err(|e| WireError::Io(io::Error::other(e)))?
}

fn spawn_handler(service: &Arc<Service>, message: Message, tx: &UnboundedSender<Message>) {
    let service = Arc::clone(service);
    let tx = tx.clone();
    tokio::spawn(async move {
        if tx.is_closed() {
            debug!(src = %message.src, kind = message.body.op.kind(), "output closed, skipping request");
            return;
        }

        let reply = match panic::catch_unwind(AssertUnwindSafe(|| service.handle(&message))) {
            Ok(reply) => reply,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!(src = %message.src, kind = message.body.op.kind(), reason, "handler panicked");
                Some(service.crash_reply(&message, reason))
            }
        };

        if let Some(reply) = reply {
            send_reply(&tx, reply);
        }
    });
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        *reason
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        reason.as_str()
    } else {
        "handler panicked"
    }
}

fn send_reply(tx: &UnboundedSender<Message>, reply: Message) {
    if tx.send(reply).is_err() {
        warn!("writer stopped, dropping reply");
    }
}

async fn write_replies<W>(mut writer: W, mut rx: UnboundedReceiver<Message>) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = rx.recv().await {
        if let Err(e) = write_message(&mut writer, &reply).await {
            error!(error = %e, "failed to write reply");
            return Err(e);
        }
    }
    Ok(())
}
