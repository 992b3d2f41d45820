//! Deterministic wire codec for ceremony messages.
//!
//! Every composite field is a `u32`-LE length prefix followed by raw bytes;
//! every integer is fixed-width little-endian. One byte sequence per
//! logical value, so encoding is canonical and signatures over it are
//! unambiguous.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod exchange_codec;
pub mod init_codec;
pub mod kyber;
pub mod output_codec;

pub use envelope::{SignedTransport, Transport, TransportType};
pub use error::WireError;
pub use exchange_codec::{decode_exchange, encode_exchange};
pub use init_codec::{decode_init, encode_init};
pub use kyber::{KyberEnvelope, KyberMessageType};
pub use output_codec::{decode_output, encode_output};
