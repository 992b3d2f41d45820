use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutgoingKind {
    Deal,
    Response,
    Justification,
    /// The ceremony's final signed result, emitted once by `dkg-ceremony`
    /// outside the DKG round loop this board otherwise mediates.
    Output,
    Error,
}

/// Where a ceremony instance's locally produced bundles (and its terminal
/// result or error) go once it's done computing them — in practice, the
/// `Switch`'s authenticated broadcast-to-all-operators path.
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    async fn broadcast(&self, kind: OutgoingKind, bytes: Vec<u8>);
}
