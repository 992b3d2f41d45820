use crate::codec::{Reader, Writer};
use crate::error::WireError;
use dkg_types::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    Init,
    Exchange,
    Kyber,
    Output,
    Error,
}

impl TransportType {
    fn tag(self) -> u8 {
        match self {
            TransportType::Init => 0,
            TransportType::Exchange => 1,
            TransportType::Kyber => 2,
            TransportType::Output => 3,
            TransportType::Error => 4,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, WireError> {
        match tag {
            0 => Ok(TransportType::Init),
            1 => Ok(TransportType::Exchange),
            2 => Ok(TransportType::Kyber),
            3 => Ok(TransportType::Output),
            4 => Ok(TransportType::Error),
            other => Err(WireError::UnknownTransportType(other)),
        }
    }
}

/// The outer envelope every ceremony message is wrapped in: a type tag, the
/// request id it belongs to, and an opaque type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub kind: TransportType,
    pub request_id: RequestId,
    pub payload: Vec<u8>,
}

impl Transport {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.put_u8(self.kind.tag());
        w.put_fixed(self.request_id.as_bytes());
        w.put_prefixed(&self.payload);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader::new(bytes);
        let kind = TransportType::from_tag(r.get_u8()?)?;
        let request_id_bytes = r.get_fixed(24)?;
        let request_id =
            RequestId::from_slice(request_id_bytes).expect("get_fixed(24) always yields 24 bytes");
        let payload = r.get_prefixed()?.to_vec();
        r.finish()?;
        Ok(Self {
            kind,
            request_id,
            payload,
        })
    }
}

/// A `Transport` plus proof of who sent it. `signer_operator_id == 0` is
/// reserved for the initiator, who is not a ceremony operator and so has no
/// operator id of their own — only `Init` transports may carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransport {
    pub signer_operator_id: u64,
    pub transport: Transport,
    pub signature: Vec<u8>,
}

impl SignedTransport {
    /// The exact bytes an RSA signature is computed and verified over:
    /// the inner `Transport`'s canonical encoding, never `Self`'s own.
    pub fn signed_bytes(&self) -> Vec<u8> {
        self.transport.encode()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.put_u64(self.signer_operator_id);
        w.put_prefixed(&self.transport.encode());
        w.put_prefixed(&self.signature);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader::new(bytes);
        let signer_operator_id = r.get_u64()?;
        let transport_bytes = r.get_prefixed()?.to_vec();
        let signature = r.get_prefixed()?.to_vec();
        r.finish()?;
        let transport = Transport::decode(&transport_bytes)?;
        Ok(Self {
            signer_operator_id,
            transport,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req_id() -> RequestId {
        RequestId::from_slice(&[7u8; 24]).unwrap()
    }

    #[test]
    fn transport_round_trips() {
        let t = Transport {
            kind: TransportType::Exchange,
            request_id: req_id(),
            payload: vec![1, 2, 3, 4],
        };
        let bytes = t.encode();
        assert_eq!(Transport::decode(&bytes).unwrap(), t);
    }

    #[test]
    fn signed_transport_round_trips_and_signs_inner_bytes() {
        let t = Transport {
            kind: TransportType::Init,
            request_id: req_id(),
            payload: vec![9, 9, 9],
        };
        let st = SignedTransport {
            signer_operator_id: 0,
            transport: t.clone(),
            signature: vec![0xaa; 256],
        };
        assert_eq!(st.signed_bytes(), t.encode());
        let bytes = st.encode();
        assert_eq!(SignedTransport::decode(&bytes).unwrap(), st);
    }
}
