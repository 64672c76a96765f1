//! Wire DTOs for the HTTP adapter.
//!
//! Request bodies arrive with every field optional; unset fields take the
//! documented defaults and a missing seed draws fresh entropy (reproduce a
//! run by passing its recorded seed back).  All validation happens here, so
//! a malformed request is rejected before any job or simulation exists.

use sg_core::{MapType, PolicyKind, SgError, SgResult, SimParams};

// ── Simulate ──────────────────────────────────────────────────────────────────

/// Body of `POST /api/simulate`, and the embedded base of the batch
/// requests.
#[derive(Clone, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimulateRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub policy: Option<String>,
    pub map_type: Option<String>,
    pub complexity: Option<f64>,
    pub room_size: Option<u32>,
    pub map_num_rooms: Option<u32>,
    pub num_drones: Option<u32>,
    pub num_targets: Option<u32>,
    pub seed: Option<u64>,
}

impl SimulateRequest {
    /// Resolve into validated parameters.
    pub fn into_params(self) -> SgResult<SimParams> {
        let mut params = SimParams::default();

        if let Some(v) = self.width {
            params.width = v;
        }
        if let Some(v) = self.height {
            params.height = v;
        }
        if let Some(name) = self.policy.as_deref() {
            params.policy = name.parse()?;
        }
        if let Some(name) = self.map_type.as_deref() {
            params.map_type = parse_map_type(name)?;
        }
        if let Some(v) = self.complexity {
            params.complexity = v;
        }
        if let Some(v) = self.room_size {
            params.room_size = v;
        }
        if let Some(v) = self.map_num_rooms {
            params.num_rooms = v;
        }
        if let Some(v) = self.num_drones {
            params.num_drones = v;
        }
        if let Some(v) = self.num_targets {
            params.num_targets = v;
        }
        params.seed = self.seed.unwrap_or_else(rand::random);

        params.validate()?;
        Ok(params)
    }
}

fn parse_map_type(name: &str) -> SgResult<MapType> {
    match name {
        "random" => Ok(MapType::Random),
        "floorplan" => Ok(MapType::Floorplan),
        other => Err(SgError::BadRequest(format!("unknown map_type {other:?}"))),
    }
}

// ── Batch requests ────────────────────────────────────────────────────────────

/// Body of `POST /api/benchmark`.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BenchmarkRequest {
    #[serde(flatten)]
    pub sim: SimulateRequest,
    pub num_runs: u32,
}

/// Body of `POST /api/compare`.  The embedded `policy` field is ignored in
/// favor of the explicit selection.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CompareRequest {
    #[serde(flatten)]
    pub sim: SimulateRequest,
    pub policies: Vec<String>,
    pub num_runs: u32,
}

impl CompareRequest {
    /// Resolve the selected policy names, rejecting unknown ones up front.
    pub fn selected_policies(&self) -> SgResult<Vec<PolicyKind>> {
        self.policies.iter().map(|name| name.parse()).collect()
    }
}

// ── Replies ───────────────────────────────────────────────────────────────────

/// Body of `GET /api/policies`.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PoliciesReply {
    pub policies: Vec<String>,
}

pub fn policies_reply() -> PoliciesReply {
    PoliciesReply {
        policies: PolicyKind::ALL.iter().map(|p| p.as_str().to_string()).collect(),
    }
}

/// Accepted-job reply for the batch endpoints.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct JobAccepted {
    pub job_id: String,
}

/// Structured error body for 4xx/5xx replies.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self { error: error.to_string() }
    }
}
