//! Pedersen DKG over BLS12-381 G1: deal, response, and (when needed)
//! justification rounds, driven asynchronously against a `dkg_board::Board`.

pub mod bundles;
pub mod driver;
pub mod error;
pub mod node;
pub mod poly;
pub mod signing;

pub use bundles::{
    DealBundle, EncryptedShare, Justification, JustificationBundle, Response, ResponseBundle,
    SignedDealBundle, Status,
};
pub use driver::{DkgDriver, DkgResult};
pub use error::ProtocolError;
pub use node::{build_nodes, index_of, Node};
