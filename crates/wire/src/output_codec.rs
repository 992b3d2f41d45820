use crate::codec::{Reader, Writer};
use crate::error::WireError;
use dkg_types::{OperatorId, Output, RequestId};

pub fn encode_output(output: &Output) -> Vec<u8> {
    let mut w = Writer::new();
    w.put_fixed(output.request_id.as_bytes());
    w.put_u64(output.operator_id.get());
    w.put_prefixed(&output.operator_rsa_public_key_der);
    w.put_prefixed(&output.encrypted_share);
    w.put_prefixed(&output.share_public_key);
    w.put_prefixed(&output.validator_public_key);
    w.put_prefixed(&output.deposit_partial_signature);
    w.put_prefixed(&output.owner_nonce_partial_signature);
    w.into_bytes()
}

pub fn decode_output(bytes: &[u8]) -> Result<Output, WireError> {
    let mut r = Reader::new(bytes);
    let request_id_bytes = r.get_fixed(24)?;
    let request_id =
        RequestId::from_slice(request_id_bytes).expect("get_fixed(24) always yields 24 bytes");
    let operator_id = OperatorId(r.get_u64()?);
    let operator_rsa_public_key_der = r.get_prefixed()?.to_vec();
    let encrypted_share = r.get_prefixed()?.to_vec();
    let share_public_key = r.get_prefixed()?.to_vec();
    let validator_public_key = r.get_prefixed()?.to_vec();
    let deposit_partial_signature = r.get_prefixed()?.to_vec();
    let owner_nonce_partial_signature = r.get_prefixed()?.to_vec();
    r.finish()?;

    Ok(Output {
        request_id,
        operator_id,
        operator_rsa_public_key_der,
        encrypted_share,
        share_public_key,
        validator_public_key,
        deposit_partial_signature,
        owner_nonce_partial_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips() {
        let output = Output {
            request_id: RequestId::from_slice(&[3u8; 24]).unwrap(),
            operator_id: OperatorId(2),
            operator_rsa_public_key_der: vec![1, 2, 3],
            encrypted_share: vec![4, 5, 6, 7],
            share_public_key: vec![8; 48],
            validator_public_key: vec![9; 48],
            deposit_partial_signature: vec![10; 96],
            owner_nonce_partial_signature: vec![11; 96],
        };
        let bytes = encode_output(&output);
        let decoded = decode_output(&bytes).unwrap();
        assert_eq!(decoded.operator_id, output.operator_id);
        assert_eq!(decoded.encrypted_share, output.encrypted_share);
        assert_eq!(decoded.validator_public_key, output.validator_public_key);
    }
}
