use crate::error::SwitchError;
use crate::http_sink::{HttpBroadcastSink, Peer};
use dkg_board::{Board, BroadcastSink, OutgoingKind};
use dkg_ceremony::LocalOwner;
use dkg_crypto::rsa_auth;
use dkg_observability::CeremonyMetrics;
use dkg_types::{OperatorId, RequestId};
use dkg_wire::{SignedTransport, TransportType};
use rsa::RsaPrivateKey;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Deployment knobs for a `Switch`, not protocol inputs: a configured
/// capacity or expiry tighter or looser than the built-in defaults.
#[derive(Debug, Clone, Copy)]
pub struct SwitchLimits {
    pub max_instances: usize,
    pub idle_timeout: Duration,
    /// Write `secret_share_<hex-request-id>.json` for every completed
    /// instance. Off by default; this is the only disk state the system
    /// produces.
    pub store_share: bool,
}

impl Default for SwitchLimits {
    fn default() -> Self {
        Self {
            max_instances: dkg_types::MAX_INSTANCES,
            idle_timeout: dkg_types::INSTANCE_IDLE_TIMEOUT,
            store_share: false,
        }
    }
}

struct Instance {
    owner: Arc<LocalOwner>,
    cancel: CancellationToken,
}

/// Per-operator multiplexer: one `LocalOwner` per in-flight `RequestId`,
/// gated by a global concurrency cap and idle eviction.
pub struct Switch {
    own_operator_id: OperatorId,
    rsa_private_key: RsaPrivateKey,
    http_client: reqwest::Client,
    instances: RwLock<HashMap<RequestId, Instance>>,
    metrics: Arc<CeremonyMetrics>,
    limits: SwitchLimits,
}

impl Switch {
    pub fn new(own_operator_id: OperatorId, rsa_private_key: RsaPrivateKey) -> Self {
        Self::with_limits(own_operator_id, rsa_private_key, SwitchLimits::default())
    }

    pub fn with_limits(
        own_operator_id: OperatorId,
        rsa_private_key: RsaPrivateKey,
        limits: SwitchLimits,
    ) -> Self {
        Self {
            own_operator_id,
            rsa_private_key,
            http_client: reqwest::Client::new(),
            instances: RwLock::new(HashMap::new()),
            metrics: Arc::new(CeremonyMetrics::new()),
            limits,
        }
    }

    /// A snapshot of this operator's ceremony counters, for a host to log
    /// on its own schedule.
    pub fn metrics_snapshot(&self) -> dkg_observability::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Handles a `POST /init` body: verifies the initiator's signature,
    /// creates the ceremony instance, and returns this operator's own
    /// signed `Exchange` transport to send back as the HTTP response.
    pub async fn init_instance(&self, signed: SignedTransport) -> Result<Vec<u8>, SwitchError> {
        if signed.transport.kind != TransportType::Init {
            return Err(SwitchError::ProtocolState(
                "expected an Init transport on /init".into(),
            ));
        }
        let init = dkg_wire::decode_init(&signed.transport.payload)?;
        init.validate()?;

        let initiator_key = rsa_auth::decode_public_key_der(&init.initiator_public_key_der)?;
        rsa_auth::verify(&initiator_key, &signed.signed_bytes(), &signed.signature)
            .map_err(|_| SwitchError::ProtocolAuth("initiator signature verification failed".into()))?;

        // Every operator descriptor's RSA key must decode here, not lazily on
        // first message: a non-responsive operator's bogus key would
        // otherwise never be caught at all.
        for op in &init.operators {
            rsa_auth::decode_public_key_der(&op.rsa_public_key_der).map_err(|_| {
                SwitchError::Decode(format!("operator {} carries an undecodable RSA key", op.id.get()))
            })?;
        }

        let request_id = signed.transport.request_id;
        self.clean_instances().await;
        self.evict_if_idle(request_id).await;

        {
            let instances = self.instances.read().await;
            if instances.contains_key(&request_id) {
                return Err(SwitchError::ProtocolState(format!(
                    "instance {request_id} already exists"
                )));
            }
            if instances.len() >= self.limits.max_instances {
                return Err(SwitchError::Capacity(format!(
                    "at MaxInstances ({})",
                    self.limits.max_instances
                )));
            }
        }

        if !init.operators.iter().any(|op| op.id == self.own_operator_id) {
            return Err(SwitchError::ProtocolState(
                "this operator is not part of the ceremony's operator set".into(),
            ));
        }

        let peers: Vec<Peer> = init
            .operators
            .iter()
            .filter(|op| op.id != self.own_operator_id)
            .map(|op| Peer {
                operator_id: op.id,
                address: op.address.clone(),
            })
            .collect();

        let n = init.operators.len();
        let sink = Arc::new(HttpBroadcastSink::new(
            request_id,
            self.own_operator_id,
            self.rsa_private_key.clone(),
            peers,
            self.http_client.clone(),
        ));
        let board = Arc::new(Board::new(n, n, sink.clone())?);
        let cancel = CancellationToken::new();

        let owner = Arc::new(LocalOwner::new(
            request_id,
            self.own_operator_id,
            self.rsa_private_key.clone(),
            init,
            board,
            cancel.clone(),
            Arc::clone(&self.metrics),
            self.limits.store_share,
        ));
        owner.begin_exchange().await?;

        let exchange_transport = owner.own_exchange_transport();
        let signature = rsa_auth::sign(&self.rsa_private_key, &exchange_transport.encode())?;
        let signed_exchange = SignedTransport {
            signer_operator_id: self.own_operator_id.get(),
            transport: exchange_transport,
            signature,
        };
        let response_bytes = signed_exchange.encode();

        self.instances.write().await.insert(
            request_id,
            Instance {
                owner: Arc::clone(&owner),
                cancel,
            },
        );
        info!(%request_id, operator_id = %self.own_operator_id, "ceremony instance created");

        self.spawn_driver(request_id, owner, sink);
        Ok(response_bytes)
    }

    /// Handles a `POST /dkg` body: every non-`Init` transport, routed to the
    /// instance named by its request ID.
    pub async fn process_message(&self, signed: SignedTransport) -> Result<(), SwitchError> {
        let request_id = signed.transport.request_id;
        let owner = {
            let instances = self.instances.read().await;
            instances
                .get(&request_id)
                .map(|inst| Arc::clone(&inst.owner))
                .ok_or_else(|| SwitchError::ProtocolState(format!("unknown instance {request_id}")))?
        };
        owner.process_transport(signed).await?;
        Ok(())
    }

    /// Evicts instances idle for longer than `INSTANCE_IDLE_TIMEOUT`,
    /// cancelling their in-flight driver task. Meant to be called both
    /// opportunistically (before admitting a new instance) and on a
    /// periodic host-driven tick.
    pub async fn clean_instances(&self) {
        let mut instances = self.instances.write().await;
        let mut expired = Vec::new();
        for (request_id, instance) in instances.iter() {
            if instance.owner.idle_for().await >= self.limits.idle_timeout {
                expired.push(*request_id);
            }
        }
        for request_id in &expired {
            if let Some(instance) = instances.remove(request_id) {
                instance.cancel.cancel();
                self.metrics.inc_ceremonies_evicted();
                warn!(%request_id, "evicted idle ceremony instance");
            }
        }
    }

    async fn evict_if_idle(&self, request_id: RequestId) {
        let idle = {
            let instances = self.instances.read().await;
            match instances.get(&request_id) {
                Some(instance) => instance.owner.idle_for().await >= self.limits.idle_timeout,
                None => return,
            }
        };
        if idle {
            if let Some(instance) = self.instances.write().await.remove(&request_id) {
                instance.cancel.cancel();
                self.metrics.inc_ceremonies_evicted();
            }
        }
    }

    fn spawn_driver(
        &self,
        request_id: RequestId,
        owner: Arc<LocalOwner>,
        sink: Arc<HttpBroadcastSink>,
    ) {
        tokio::spawn(async move {
            match owner.run_to_completion().await {
                Ok(output) => {
                    info!(%request_id, "ceremony instance completed");
                    sink.broadcast(OutgoingKind::Output, dkg_wire::encode_output(&output))
                        .await;
                }
                Err(e) => {
                    warn!(%request_id, error = %e, "ceremony instance failed");
                    sink.broadcast(OutgoingKind::Error, e.to_string().into_bytes())
                        .await;
                }
            }
        });
    }
}
