// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run signal inbox
//!
//! Signals arrive on one unbounded channel and are sorted into per-channel
//! queues as they are read. A gate only ever takes from its own channel, so
//! a signal for a later stage waits until that stage is reached and a signal
//! for a stage already passed is never consumed.

use sg_core::{ApprovalEvent, Signal, TestOutcome};
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;

/// Create a connected sender/inbox pair for one run
pub fn inbox() -> (SignalSender, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SignalSender { tx },
        Inbox {
            rx,
            buffered: HashMap::new(),
        },
    )
}

/// Delivers signals into a run
#[derive(Clone, Debug)]
pub struct SignalSender {
    tx: mpsc::UnboundedSender<Signal>,
}

impl SignalSender {
    /// Queue a signal. Hands it back if the run's inbox is gone.
    pub fn send(&self, signal: Signal) -> Result<(), Signal> {
        self.tx.send(signal).map_err(|e| e.0)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of a run's signals
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Signal>,
    buffered: HashMap<String, VecDeque<Signal>>,
}

impl Inbox {
    /// Next signal on `channel`, buffering signals for other channels.
    ///
    /// Returns `None` once every sender is gone and nothing is buffered for
    /// the channel. Cancel-safe: a signal taken off the wire is always either
    /// returned or buffered.
    pub async fn recv(&mut self, channel: &str) -> Option<Signal> {
        if let Some(signal) = self.take_buffered(channel) {
            return Some(signal);
        }

        while let Some(signal) = self.rx.recv().await {
            let signal_channel = signal.channel();
            if signal_channel == channel {
                return Some(signal);
            }
            tracing::debug!(channel = %signal_channel, "buffering signal for later stage");
            self.buffered.entry(signal_channel).or_default().push_back(signal);
        }
        None
    }

    /// Next approval for `stage_key`
    pub async fn recv_approval(&mut self, stage_key: &str) -> Option<ApprovalEvent> {
        let channel = Signal::approval_channel(stage_key);
        loop {
            match self.recv(&channel).await? {
                Signal::Approval(event) => return Some(event),
                other => tracing::warn!(kind = ?other, "dropping mismatched signal"),
            }
        }
    }

    /// Next test outcome for `stage_key`
    pub async fn recv_test(&mut self, stage_key: &str) -> Option<TestOutcome> {
        let channel = Signal::test_channel(stage_key);
        loop {
            match self.recv(&channel).await? {
                Signal::Test(outcome) => return Some(outcome),
                other => tracing::warn!(kind = ?other, "dropping mismatched signal"),
            }
        }
    }

    /// Signals buffered for channels nobody has asked for yet
    pub fn buffered(&self) -> usize {
        self.buffered.values().map(VecDeque::len).sum()
    }

    fn take_buffered(&mut self, channel: &str) -> Option<Signal> {
        let queue = self.buffered.get_mut(channel)?;
        let signal = queue.pop_front();
        if queue.is_empty() {
            self.buffered.remove(channel);
        }
        signal
    }
}

#[cfg(test)]
#[path = "inbox_tests.rs"]
mod tests;
