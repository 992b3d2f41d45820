use crate::error::BoardError;
use crate::sink::{BroadcastSink, OutgoingKind};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Per-ceremony typed inboxes, one per DKG round kind, plus the sink used to
/// publish this node's own round output. Capacity must be at least the
/// ceremony's operator count so that no honest peer's deal/response/
/// justification ever blocks indefinitely waiting for the driver to drain.
pub struct Board {
    deal_tx: mpsc::Sender<Vec<u8>>,
    response_tx: mpsc::Sender<Vec<u8>>,
    justification_tx: mpsc::Sender<Vec<u8>>,
    receivers: Mutex<Option<BoardReceivers>>,
    sink: Arc<dyn BroadcastSink>,
}

/// The driver-facing half of a `Board`, handed out exactly once via
/// [`Board::take_receivers`].
pub struct BoardReceivers {
    pub deal_rx: mpsc::Receiver<Vec<u8>>,
    pub response_rx: mpsc::Receiver<Vec<u8>>,
    pub justification_rx: mpsc::Receiver<Vec<u8>>,
}

impl Board {
    pub fn new(capacity: usize, n: usize, sink: Arc<dyn BroadcastSink>) -> Result<Self, BoardError> {
        if capacity < n {
            return Err(BoardError::CapacityBelowGroupSize { capacity, n });
        }
        let (deal_tx, deal_rx) = mpsc::channel(capacity);
        let (response_tx, response_rx) = mpsc::channel(capacity);
        let (justification_tx, justification_rx) = mpsc::channel(capacity);
        Ok(Self {
            deal_tx,
            response_tx,
            justification_tx,
            receivers: Mutex::new(Some(BoardReceivers {
                deal_rx,
                response_rx,
                justification_rx,
            })),
            sink,
        })
    }

    pub async fn push_deal(&self, bytes: Vec<u8>) -> Result<(), BoardError> {
        self.deal_tx.send(bytes).await.map_err(|_| BoardError::Closed)
    }

    pub async fn push_response(&self, bytes: Vec<u8>) -> Result<(), BoardError> {
        self.response_tx
            .send(bytes)
            .await
            .map_err(|_| BoardError::Closed)
    }

    pub async fn push_justification(&self, bytes: Vec<u8>) -> Result<(), BoardError> {
        self.justification_tx
            .send(bytes)
            .await
            .map_err(|_| BoardError::Closed)
    }

    /// Taken exactly once by the DKG driver task on ceremony start.
    pub async fn take_receivers(&self) -> Result<BoardReceivers, BoardError> {
        self.receivers
            .lock()
            .await
            .take()
            .ok_or(BoardError::ReceiversAlreadyTaken)
    }

    pub async fn publish_deal(&self, bytes: Vec<u8>) {
        debug!(bytes = bytes.len(), "publishing deal bundle");
        self.sink.broadcast(OutgoingKind::Deal, bytes).await;
    }

    pub async fn publish_response(&self, bytes: Vec<u8>) {
        debug!(bytes = bytes.len(), "publishing response bundle");
        self.sink.broadcast(OutgoingKind::Response, bytes).await;
    }

    pub async fn publish_justification(&self, bytes: Vec<u8>) {
        debug!(bytes = bytes.len(), "publishing justification bundle");
        self.sink.broadcast(OutgoingKind::Justification, bytes).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex as TokioMutex;

    struct RecordingSink {
        seen: TokioMutex<Vec<(OutgoingKind, Vec<u8>)>>,
    }

    #[async_trait::async_trait]
    impl BroadcastSink for RecordingSink {
        async fn broadcast(&self, kind: OutgoingKind, bytes: Vec<u8>) {
            self.seen.lock().await.push((kind, bytes));
        }
    }

    #[tokio::test]
    async fn rejects_capacity_below_group_size() {
        let sink = Arc::new(RecordingSink {
            seen: TokioMutex::new(Vec::new()),
        });
        let err = Board::new(2, 4, sink).unwrap_err();
        assert_eq!(err, BoardError::CapacityBelowGroupSize { capacity: 2, n: 4 });
    }

    #[tokio::test]
    async fn pushed_deals_are_observed_by_the_driver_side() {
        let sink = Arc::new(RecordingSink {
            seen: TokioMutex::new(Vec::new()),
        });
        let board = Board::new(4, 4, sink).unwrap();
        board.push_deal(vec![1, 2, 3]).await.unwrap();
        let mut rx = board.take_receivers().await.unwrap();
        assert_eq!(rx.deal_rx.recv().await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn take_receivers_only_succeeds_once() {
        let sink = Arc::new(RecordingSink {
            seen: TokioMutex::new(Vec::new()),
        });
        let board = Board::new(4, 4, sink).unwrap();
        assert!(board.take_receivers().await.is_ok());
        assert_eq!(
            board.take_receivers().await.unwrap_err(),
            BoardError::ReceiversAlreadyTaken
        );
    }
}
