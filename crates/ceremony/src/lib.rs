//! One ceremony instance's full lifecycle: exchange collection, the DKG
//! itself (delegated to `dkg-protocol`), and the post-DKG signer that turns
//! a raw share into a publishable `Output`.

pub mod error;
pub mod owner;
pub mod postdkg;

pub use error::CeremonyError;
pub use owner::LocalOwner;
