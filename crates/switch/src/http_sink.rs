//! Delivers a ceremony instance's locally produced bundles to every peer
//! operator over HTTP, each wrapped in the same authenticated envelope the
//! `/dkg` route expects on the receiving end.

use async_trait::async_trait;
use dkg_board::{BroadcastSink, OutgoingKind};
use dkg_types::{OperatorId, RequestId};
use dkg_wire::{KyberEnvelope, KyberMessageType, SignedTransport, Transport, TransportType};
use rsa::RsaPrivateKey;
use tracing::warn;

pub struct Peer {
    pub operator_id: OperatorId,
    pub address: String,
}

pub struct HttpBroadcastSink {
    request_id: RequestId,
    own_operator_id: OperatorId,
    rsa_private_key: RsaPrivateKey,
    peers: Vec<Peer>,
    client: reqwest::Client,
}

impl HttpBroadcastSink {
    pub fn new(
        request_id: RequestId,
        own_operator_id: OperatorId,
        rsa_private_key: RsaPrivateKey,
        peers: Vec<Peer>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            request_id,
            own_operator_id,
            rsa_private_key,
            peers,
            client,
        }
    }

    fn build_transport(&self, kind: OutgoingKind, bytes: Vec<u8>) -> Transport {
        let (transport_kind, payload) = match kind {
            OutgoingKind::Deal => (
                TransportType::Kyber,
                KyberEnvelope {
                    kind: KyberMessageType::Deal,
                    bundle_bytes: bytes,
                }
                .encode(),
            ),
            OutgoingKind::Response => (
                TransportType::Kyber,
                KyberEnvelope {
                    kind: KyberMessageType::Response,
                    bundle_bytes: bytes,
                }
                .encode(),
            ),
            OutgoingKind::Justification => (
                TransportType::Kyber,
                KyberEnvelope {
                    kind: KyberMessageType::Justification,
                    bundle_bytes: bytes,
                }
                .encode(),
            ),
            OutgoingKind::Output => (TransportType::Output, bytes),
            OutgoingKind::Error => (TransportType::Error, bytes),
        };
        Transport {
            kind: transport_kind,
            request_id: self.request_id,
            payload,
        }
    }

    fn sign(&self, transport: Transport) -> Option<SignedTransport> {
        match dkg_crypto::rsa_auth::sign(&self.rsa_private_key, &transport.encode()) {
            Ok(signature) => Some(SignedTransport {
                signer_operator_id: self.own_operator_id.get(),
                transport,
                signature,
            }),
            Err(e) => {
                warn!(error = %e, "failed to sign outgoing transport, dropping broadcast");
                None
            }
        }
    }
}

#[async_trait]
impl BroadcastSink for HttpBroadcastSink {
    async fn broadcast(&self, kind: OutgoingKind, bytes: Vec<u8>) {
        let transport = self.build_transport(kind, bytes);
        let Some(signed) = self.sign(transport) else {
            return;
        };
        let payload = signed.encode();

        for peer in &self.peers {
            let url = format!("http://{}/dkg", peer.address);
            let client = self.client.clone();
            let payload = payload.clone();
            let operator_id = peer.operator_id;
            tokio::spawn(async move {
                if let Err(e) = client.post(&url).body(payload).send().await {
                    warn!(%operator_id, %url, error = %e, "failed to deliver dkg transport");
                }
            });
        }
    }
}
