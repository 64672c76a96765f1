//! Run configuration.
//!
//! `SimParams` is the single source of truth for one simulation: the HTTP
//! adapter deserializes request bodies into it, the job scheduler clones it
//! per run (bumping the seed), and the run store persists it verbatim as
//! `config.json`.  Defaults follow the wire contract: a request body of `{}`
//! is a valid 100×100 single-drone frontier run.

use crate::error::{SgError, SgResult};

/// Hard upper bound on ticks per run, regardless of drone count.
pub const HARD_STEP_CAP: u64 = 5_000;

// ── MapType ───────────────────────────────────────────────────────────────────

/// Which generative map model to use.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    /// Uniformly scattered interior walls at `complexity` density.
    Random,
    /// Rooms connected by corridors.  The default: it stays generatable at
    /// any `complexity`, which the scattered model does not.
    #[default]
    Floorplan,
}

// ── PolicyKind ────────────────────────────────────────────────────────────────

/// The closed set of navigation policies.
///
/// A tagged enum rather than a trait object: the set is closed-world, every
/// variant needs different per-run scratch state, and benchmark requests
/// select members by wire name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Random,
    WallFollow,
    #[default]
    Frontier,
    Swarm,
}

impl PolicyKind {
    /// All policies, in the order the compare surface reports them.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Random,
        PolicyKind::WallFollow,
        PolicyKind::Frontier,
        PolicyKind::Swarm,
    ];

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::WallFollow => "wall_follow",
            PolicyKind::Frontier => "frontier",
            PolicyKind::Swarm => "swarm",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = SgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| SgError::BadRequest(format!("unknown policy {s:?}")))
    }
}

// ── SimParams ─────────────────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimParams {
    /// Map width in cells.  Valid range 10..=500.
    #[serde(default = "default_dim")]
    pub width: u32,

    /// Map height in cells.  Valid range 10..=500.
    #[serde(default = "default_dim")]
    pub height: u32,

    #[serde(default)]
    pub map_type: MapType,

    /// Obstacle density for [`MapType::Random`], in [0, 1]: the wall count is
    /// `floor(complexity · width · height)`.  Ignored by floorplans.
    #[serde(default = "default_complexity")]
    pub complexity: f64,

    /// Nominal room side for [`MapType::Floorplan`]; actual sides are drawn
    /// from ±30 % of this.
    #[serde(default = "default_room_size")]
    pub room_size: u32,

    /// Room count ceiling for [`MapType::Floorplan`].
    #[serde(default = "default_num_rooms")]
    pub num_rooms: u32,

    /// Drone count.  Valid range 1..=10.
    #[serde(default = "default_one")]
    pub num_drones: u32,

    /// Hidden target count.  Valid range 1..=20.
    #[serde(default = "default_one")]
    pub num_targets: u32,

    #[serde(default)]
    pub policy: PolicyKind,

    /// Master seed.  Identical params + seed reproduce the run bit-for-bit.
    #[serde(default)]
    pub seed: u64,

    /// Sensor footprint: Chebyshev radius of the line-of-sight sweep.
    #[serde(default = "default_sensor_range")]
    pub sensor_range: u32,

    /// Communication range in cells (Euclidean) for the connectivity metric.
    #[serde(default = "default_comm_range")]
    pub comm_range: f64,

    /// Per-drone step budget.  The effective budget is
    /// `max_steps × num_drones`, capped at [`HARD_STEP_CAP`].
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Optional battery: moves until a drone dies.  `None` disables the
    /// battery model; the history schema carries the field either way.
    #[serde(default)]
    pub battery: Option<u32>,
}

fn default_dim() -> u32 {
    100
}
fn default_complexity() -> f64 {
    0.67
}
fn default_room_size() -> u32 {
    15
}
fn default_num_rooms() -> u32 {
    10
}
fn default_one() -> u32 {
    1
}
fn default_sensor_range() -> u32 {
    3
}
fn default_comm_range() -> f64 {
    20.0
}
fn default_max_steps() -> u32 {
    500
}

impl Default for SimParams {
    fn default() -> Self {
        // `{}` deserializes to exactly this value.
        Self {
            width: default_dim(),
            height: default_dim(),
            map_type: MapType::default(),
            complexity: default_complexity(),
            room_size: default_room_size(),
            num_rooms: default_num_rooms(),
            num_drones: default_one(),
            num_targets: default_one(),
            policy: PolicyKind::default(),
            seed: 0,
            sensor_range: default_sensor_range(),
            comm_range: default_comm_range(),
            max_steps: default_max_steps(),
            battery: None,
        }
    }
}

impl SimParams {
    /// Check every documented range.  Called by the request adapter before a
    /// job is created and by the engine before a run starts.
    pub fn validate(&self) -> SgResult<()> {
        fn check(ok: bool, msg: impl FnOnce() -> String) -> SgResult<()> {
            if ok { Ok(()) } else { Err(SgError::BadRequest(msg())) }
        }

        check(
            (10..=500).contains(&self.width) && (10..=500).contains(&self.height),
            || format!("map dimensions {}x{} outside 10..=500", self.width, self.height),
        )?;
        check((0.0..=1.0).contains(&self.complexity), || {
            format!("complexity {} outside [0, 1]", self.complexity)
        })?;
        check((1..=10).contains(&self.num_drones), || {
            format!("num_drones {} outside 1..=10", self.num_drones)
        })?;
        check((1..=20).contains(&self.num_targets), || {
            format!("num_targets {} outside 1..=20", self.num_targets)
        })?;
        check(self.num_rooms >= 1, || "num_rooms must be at least 1".into())?;
        check(self.room_size >= 3, || {
            format!("room_size {} too small to hold an interior", self.room_size)
        })?;
        check(self.sensor_range >= 1, || "sensor_range must be at least 1".into())?;
        check(self.comm_range > 0.0, || "comm_range must be positive".into())?;
        check(self.max_steps >= 1, || "max_steps must be at least 1".into())?;
        Ok(())
    }

    /// The run's tick budget: `max_steps` per drone, hard-capped.
    #[inline]
    pub fn effective_max_steps(&self) -> u64 {
        (self.max_steps as u64 * self.num_drones as u64).min(HARD_STEP_CAP)
    }

    /// Total cell count.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
