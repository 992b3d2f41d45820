//! `LocalOwner`: one operator's view of a single ceremony instance, from
//! `Init` receipt through exchange collection, the DKG itself, and the
//! post-DKG signer. One instance lives per `RequestId` inside a `Switch`.

use crate::error::CeremonyError;
use crate::postdkg;
use bls12_381::Scalar;
use dkg_board::Board;
use dkg_crypto::{keccak, rsa_auth, suite};
use dkg_protocol::{build_nodes, index_of, DkgDriver, Node};
use dkg_types::{CeremonyState, ExchangeEntry, InitMessage, OperatorId, Output, RequestId};
use dkg_wire::{KyberEnvelope, KyberMessageType, SignedTransport, Transport, TransportType};
use dkg_observability::{CeremonyMetrics, CeremonySpan};
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::warn;

struct ExchangeState {
    entries: HashMap<OperatorId, ExchangeEntry>,
    nodes: Option<Vec<Node>>,
}

pub struct LocalOwner {
    pub request_id: RequestId,
    own_operator_id: OperatorId,
    rsa_private_key: RsaPrivateKey,
    init: InitMessage,
    state: RwLock<CeremonyState>,
    own_exchange_secret: Scalar,
    own_exchange_entry: ExchangeEntry,
    exchange: Mutex<ExchangeState>,
    exchange_complete: Notify,
    board: Arc<Board>,
    cancel: CancellationToken,
    last_activity: Mutex<Instant>,
    metrics: Arc<CeremonyMetrics>,
    span: Mutex<Option<CeremonySpan>>,
    store_share: bool,
}

impl LocalOwner {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_id: RequestId,
        own_operator_id: OperatorId,
        rsa_private_key: RsaPrivateKey,
        init: InitMessage,
        board: Arc<Board>,
        cancel: CancellationToken,
        metrics: Arc<CeremonyMetrics>,
        store_share: bool,
    ) -> Self {
        let own_exchange_secret = suite::random_scalar(&mut OsRng);
        let own_public = suite::scalar_to_g1(&own_exchange_secret);
        let own_exchange_entry = ExchangeEntry {
            operator_id: own_operator_id,
            public_key: suite::compress_g1(&own_public).to_vec(),
        };
        let span = CeremonySpan::new(request_id.to_hex(), own_operator_id.get());
        metrics.inc_ceremonies_started();
        Self {
            request_id,
            own_operator_id,
            rsa_private_key,
            init,
            state: RwLock::new(CeremonyState::Created),
            own_exchange_secret,
            own_exchange_entry,
            exchange: Mutex::new(ExchangeState {
                entries: HashMap::new(),
                nodes: None,
            }),
            exchange_complete: Notify::new(),
            board,
            cancel,
            last_activity: Mutex::new(Instant::now()),
            metrics,
            span: Mutex::new(Some(span)),
            store_share,
        }
    }

    pub async fn state(&self) -> CeremonyState {
        *self.state.read().await
    }

    pub async fn idle_for(&self) -> std::time::Duration {
        self.last_activity.lock().await.elapsed()
    }

    async fn touch(&self) {
        *self.last_activity.lock().await = Instant::now();
    }

    async fn require_state(&self, allowed: &[CeremonyState]) -> Result<(), CeremonyError> {
        let current = *self.state.read().await;
        if allowed.contains(&current) {
            Ok(())
        } else {
            Err(CeremonyError::ProtocolState(format!(
                "expected one of {allowed:?}, found {current:?}"
            )))
        }
    }

    async fn set_state(&self, next: CeremonyState) {
        *self.state.write().await = next;
    }

    pub fn own_exchange_entry(&self) -> ExchangeEntry {
        self.own_exchange_entry.clone()
    }

    /// Starts the exchange round: records this node's own entry and moves
    /// `Created` -> `Exchanging`.
    pub async fn begin_exchange(&self) -> Result<(), CeremonyError> {
        self.require_state(&[CeremonyState::Created]).await?;
        self.exchange
            .lock()
            .await
            .entries
            .insert(self.own_operator_id, self.own_exchange_entry.clone());
        self.set_state(CeremonyState::Exchanging).await;
        self.touch().await;
        Ok(())
    }

    /// Processes one signed transport addressed to this instance: verifies
    /// the sender's RSA signature against the operator set, then routes by
    /// transport kind.
    pub async fn process_transport(&self, signed: SignedTransport) -> Result<(), CeremonyError> {
        let sender_der = self.sender_public_key_der(signed.signer_operator_id)?;
        let sender_key = rsa_auth::decode_public_key_der(&sender_der)?;
        rsa_auth::verify(&sender_key, &signed.signed_bytes(), &signed.signature)
            .map_err(|_| CeremonyError::ProtocolAuth("signature verification failed".into()))?;

        self.touch().await;
        match signed.transport.kind {
            TransportType::Exchange => {
                let entry = dkg_wire::decode_exchange(&signed.transport.payload)?;
                self.receive_exchange(entry).await
            }
            TransportType::Kyber => {
                let env = KyberEnvelope::decode(&signed.transport.payload)?;
                self.receive_kyber(env).await
            }
            other => Err(CeremonyError::ProtocolState(format!(
                "transport kind {other:?} is not valid as an inbound message"
            ))),
        }
    }

    fn sender_public_key_der(&self, signer_operator_id: u64) -> Result<Vec<u8>, CeremonyError> {
        if signer_operator_id == 0 {
            return Ok(self.init.initiator_public_key_der.clone());
        }
        self.init
            .operators
            .iter()
            .find(|op| op.id.get() == signer_operator_id)
            .map(|op| op.rsa_public_key_der.clone())
            .ok_or_else(|| {
                CeremonyError::ProtocolAuth(format!("unknown signer {signer_operator_id}"))
            })
    }

    async fn receive_exchange(&self, entry: ExchangeEntry) -> Result<(), CeremonyError> {
        self.require_state(&[CeremonyState::Exchanging]).await?;
        if !self.init.operators.iter().any(|op| op.id == entry.operator_id) {
            return Err(CeremonyError::ProtocolState(format!(
                "exchange entry from unknown operator {}",
                entry.operator_id
            )));
        }

        let mut exchange = self.exchange.lock().await;
        exchange.entries.insert(entry.operator_id, entry);
        if exchange.entries.len() == self.init.operators.len() {
            let all: Vec<ExchangeEntry> = exchange.entries.values().cloned().collect();
            let nodes = build_nodes(&all)?;
            exchange.nodes = Some(nodes);
            drop(exchange);
            self.set_state(CeremonyState::DkgRunning).await;
            if let Some(span) = self.span.lock().await.as_ref() {
                span.record_exchange_collected();
            }
            self.exchange_complete.notify_one();
        }
        Ok(())
    }

    async fn receive_kyber(&self, env: KyberEnvelope) -> Result<(), CeremonyError> {
        self.require_state(&[CeremonyState::DkgRunning]).await?;
        match env.kind {
            KyberMessageType::Deal => {
                self.board.push_deal(env.bundle_bytes).await?;
                self.metrics.inc_deals_processed();
            }
            KyberMessageType::Response => {
                self.board.push_response(env.bundle_bytes).await?;
                self.metrics.inc_responses_processed();
            }
            KyberMessageType::Justification => {
                self.board.push_justification(env.bundle_bytes).await?;
                self.metrics.inc_justifications_processed();
            }
        }
        Ok(())
    }

    /// Blocks until the exchange round has completed for this instance,
    /// driven entirely by `process_transport` calls arriving concurrently.
    async fn wait_for_exchange(&self) {
        if *self.state.read().await == CeremonyState::DkgRunning {
            return;
        }
        self.exchange_complete.notified().await;
    }

    /// Runs the DKG and post-DKG phases to completion (or failure),
    /// transitioning through `DkgRunning` -> `PostDkg` -> `Done`/`Failed`.
    /// Meant to be spawned once exchange has begun; it blocks internally
    /// until exchange actually completes.
    pub async fn run_to_completion(self: Arc<Self>) -> Result<Output, CeremonyError> {
        self.wait_for_exchange().await;

        let nodes = self
            .exchange
            .lock()
            .await
            .nodes
            .clone()
            .ok_or_else(|| CeremonyError::ProtocolState("dkg started before exchange completed".into()))?;

        let own_index = index_of(&nodes, self.own_operator_id)
            .ok_or_else(|| CeremonyError::ProtocolState("own operator id missing from node set".into()))?;
        let threshold = self.init.threshold as usize;
        let protocol_nonce = keccak::keccak256(self.request_id.as_bytes());

        if let Some(span) = self.span.lock().await.as_ref() {
            span.record_dkg_started();
        }

        let driver = DkgDriver::new(
            self.own_operator_id,
            nodes,
            threshold,
            protocol_nonce,
            self.own_exchange_secret,
        )?;

        let dkg_result = match driver.run(Arc::clone(&self.board), self.cancel.clone()).await {
            Ok(result) => result,
            Err(e) => {
                self.set_state(CeremonyState::Failed).await;
                let err: CeremonyError = e.into();
                if let Some(span) = self.span.lock().await.take() {
                    span.fail(err.to_string());
                }
                self.metrics.inc_ceremonies_failed();
                return Err(err);
            }
        };
        debug_assert_eq!(dkg_result.own_index, own_index);

        if self.store_share {
            if let Err(e) = write_share_file(&self.request_id, &dkg_result) {
                warn!(request_id = %self.request_id, error = %e, "failed to persist secret share");
            }
        }

        self.set_state(CeremonyState::PostDkg).await;
        self.touch().await;

        let output = match postdkg::derive_output(
            &self.request_id,
            self.own_operator_id,
            &self.rsa_private_key,
            &self.init,
            &dkg_result,
            &self.metrics,
        ) {
            Ok(output) => output,
            Err(e) => {
                warn!(request_id = %self.request_id, error = %e, "post-dkg signer failed");
                self.set_state(CeremonyState::Failed).await;
                if let Some(span) = self.span.lock().await.take() {
                    span.fail(e.to_string());
                }
                self.metrics.inc_ceremonies_failed();
                return Err(e);
            }
        };

        self.set_state(CeremonyState::Done).await;
        if let Some(span) = self.span.lock().await.take() {
            span.complete();
        }
        self.metrics.inc_ceremonies_completed();
        Ok(output)
    }

    /// Builds the signed `Exchange` transport carrying this node's own
    /// entry, ready for `Switch` to broadcast.
    pub fn own_exchange_transport(&self) -> Transport {
        Transport {
            kind: TransportType::Exchange,
            request_id: self.request_id,
            payload: dkg_wire::encode_exchange(&self.own_exchange_entry),
        }
    }
}

/// Writes `secret_share_<hex-request-id>.json` to the current working
/// directory when the operator's `storeShare` deployment flag is set. The
/// only disk state this system produces; off by default.
fn write_share_file(request_id: &RequestId, dkg_result: &dkg_protocol::DkgResult) -> std::io::Result<()> {
    let body = serde_json::json!({
        "index": dkg_result.own_index,
        "secret": hex::encode(dkg_result.share_secret.to_bytes()),
    });
    let path = format!("secret_share_{}.json", request_id.to_hex());
    std::fs::write(path, serde_json::to_vec_pretty(&body).expect("json object always serializes"))
}
