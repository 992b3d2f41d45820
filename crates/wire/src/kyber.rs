use crate::codec::{Reader, Writer};
use crate::error::WireError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KyberMessageType {
    Deal,
    Response,
    Justification,
}

impl KyberMessageType {
    fn tag(self) -> u8 {
        match self {
            KyberMessageType::Deal => 0,
            KyberMessageType::Response => 1,
            KyberMessageType::Justification => 2,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, WireError> {
        match tag {
            0 => Ok(KyberMessageType::Deal),
            1 => Ok(KyberMessageType::Response),
            2 => Ok(KyberMessageType::Justification),
            other => Err(WireError::UnknownKyberType(other)),
        }
    }
}

/// A `Kyber`-typed `Transport` payload: one of the three DKG round bundles,
/// opaque here and parsed only by `dkg-protocol`'s own (bincode) encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KyberEnvelope {
    pub kind: KyberMessageType,
    pub bundle_bytes: Vec<u8>,
}

impl KyberEnvelope {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.put_u8(self.kind.tag());
        w.put_prefixed(&self.bundle_bytes);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader::new(bytes);
        let kind = KyberMessageType::from_tag(r.get_u8()?)?;
        let bundle_bytes = r.get_prefixed()?.to_vec();
        r.finish()?;
        Ok(Self { kind, bundle_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kyber_envelope_round_trips() {
        let env = KyberEnvelope {
            kind: KyberMessageType::Response,
            bundle_bytes: vec![1, 2, 3, 4, 5],
        };
        let bytes = env.encode();
        assert_eq!(KyberEnvelope::decode(&bytes).unwrap(), env);
    }
}
