//! Roster and target indices.
//!
//! Two index spaces exist per run: drones (at most 10) and hidden targets
//! (at most 20).  Both are positions into per-run lists, and both travel
//! through serialized history frames, where a bare integer would let a
//! "drone 3" slip silently into a slot meaning "target 3".  The newtypes
//! close that hole: they are `Copy`, order like their inner integers, and
//! serialize transparently as plain numbers, so the wire format pays
//! nothing for the type safety.

use std::fmt;

/// Define an index newtype with list-position semantics.
macro_rules! index_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Position in the owning per-run list.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

index_id! {
    /// Position of a drone in the run's roster (0..num_drones).
    AgentId(u32), "drone"
}

index_id! {
    /// Position of a target in the map's target list (0..num_targets).
    /// `u16` because found-target sets are serialized into every frame.
    TargetId(u16), "target"
}
