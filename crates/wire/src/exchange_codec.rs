use crate::codec::{Reader, Writer};
use crate::error::WireError;
use dkg_types::{ExchangeEntry, OperatorId};

pub fn encode_exchange(entry: &ExchangeEntry) -> Vec<u8> {
    let mut w = Writer::new();
    w.put_u64(entry.operator_id.get());
    w.put_prefixed(&entry.public_key);
    w.into_bytes()
}

pub fn decode_exchange(bytes: &[u8]) -> Result<ExchangeEntry, WireError> {
    let mut r = Reader::new(bytes);
    let operator_id = OperatorId(r.get_u64()?);
    let public_key = r.get_prefixed()?.to_vec();
    r.finish()?;
    Ok(ExchangeEntry {
        operator_id,
        public_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_entry_round_trips() {
        let entry = ExchangeEntry {
            operator_id: OperatorId(3),
            public_key: vec![0xaa; 48],
        };
        let bytes = encode_exchange(&entry);
        let decoded = decode_exchange(&bytes).unwrap();
        assert_eq!(decoded.operator_id, entry.operator_id);
        assert_eq!(decoded.public_key, entry.public_key);
    }
}
