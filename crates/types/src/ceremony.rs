/// Lifecycle of a single `LocalOwner` ceremony instance.
///
/// `Created` -> `Exchanging` -> `DkgRunning` -> `PostDkg` -> `Done`, with
/// `Failed` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyState {
    Created,
    Exchanging,
    DkgRunning,
    PostDkg,
    Done,
    Failed,
}

impl CeremonyState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CeremonyState::Done | CeremonyState::Failed)
    }
}
