use crate::codec::{Reader, Writer};
use crate::error::WireError;
use dkg_types::{InitMessage, Operator, OperatorId};

pub fn encode_init(msg: &InitMessage) -> Vec<u8> {
    let mut w = Writer::new();
    w.put_u32(msg.operators.len() as u32);
    for op in &msg.operators {
        w.put_u64(op.id.get());
        w.put_prefixed(op.address.as_bytes());
        w.put_prefixed(&op.rsa_public_key_der);
    }
    w.put_fixed(&msg.withdrawal_credentials);
    w.put_fixed(&msg.fork_version);
    w.put_fixed(&msg.owner);
    w.put_u64(msg.nonce);
    w.put_prefixed(&msg.initiator_public_key_der);
    w.put_u64(msg.threshold);
    w.into_bytes()
}

pub fn decode_init(bytes: &[u8]) -> Result<InitMessage, WireError> {
    let mut r = Reader::new(bytes);
    let n = r.get_u32()? as usize;
    let mut operators = Vec::with_capacity(n);
    for _ in 0..n {
        let id = r.get_u64()?;
        let address = String::from_utf8(r.get_prefixed()?.to_vec())
            .map_err(|_| WireError::InvalidUtf8("operator.address"))?;
        let rsa_public_key_der = r.get_prefixed()?.to_vec();
        operators.push(Operator {
            id: OperatorId(id),
            address,
            rsa_public_key_der,
        });
    }
    let withdrawal_credentials: [u8; 32] = r.get_fixed(32)?.try_into().expect("32 bytes");
    let fork_version: [u8; 4] = r.get_fixed(4)?.try_into().expect("4 bytes");
    let owner: [u8; 20] = r.get_fixed(20)?.try_into().expect("20 bytes");
    let nonce = r.get_u64()?;
    let initiator_public_key_der = r.get_prefixed()?.to_vec();
    let threshold = r.get_u64()?;
    r.finish()?;

    Ok(InitMessage {
        operators,
        withdrawal_credentials,
        fork_version,
        owner,
        nonce,
        initiator_public_key_der,
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_message_round_trips() {
        let msg = InitMessage {
            operators: vec![
                Operator {
                    id: OperatorId(1),
                    address: "10.0.0.1:3000".into(),
                    rsa_public_key_der: vec![1, 2, 3],
                },
                Operator {
                    id: OperatorId(2),
                    address: "10.0.0.2:3000".into(),
                    rsa_public_key_der: vec![4, 5, 6],
                },
            ],
            withdrawal_credentials: [0x01; 32],
            fork_version: [0x00, 0x00, 0x10, 0x20],
            owner: [0x02; 20],
            nonce: 5,
            initiator_public_key_der: vec![7, 8, 9],
            threshold: 2,
        };
        let bytes = encode_init(&msg);
        let decoded = decode_init(&bytes).unwrap();
        assert_eq!(decoded.operators.len(), 2);
        assert_eq!(decoded.operators[0].address, "10.0.0.1:3000");
        assert_eq!(decoded.withdrawal_credentials, msg.withdrawal_credentials);
        assert_eq!(decoded.fork_version, msg.fork_version);
        assert_eq!(decoded.owner, msg.owner);
        assert_eq!(decoded.nonce, msg.nonce);
        assert_eq!(decoded.threshold, msg.threshold);
    }
}
