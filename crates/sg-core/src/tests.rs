//! Unit tests for sg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, TargetId};

    #[test]
    fn index_is_the_list_position() {
        assert_eq!(AgentId(3).index(), 3);
        assert_eq!(TargetId(11).index(), 11);
    }

    #[test]
    fn ordering_follows_the_inner_integer() {
        assert!(AgentId(0) < AgentId(1));
        assert!(TargetId(100) > TargetId(99));
    }

    #[test]
    fn display_names_the_index_space() {
        assert_eq!(AgentId(7).to_string(), "drone 7");
        assert_eq!(TargetId(2).to_string(), "target 2");
    }

    #[test]
    fn ids_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&AgentId(4)).unwrap(), "4");
        assert_eq!(serde_json::from_str::<TargetId>("9").unwrap(), TargetId(9));
    }
}

#[cfg(test)]
mod grid {
    use crate::grid::{Cell, Heading, MOVES_8, ORTHO_4, STAY};

    #[test]
    fn chebyshev_and_euclidean() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.chebyshev(b), 4);
        assert!((a.euclidean(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn step_lengths() {
        assert_eq!(STAY.length(), 0.0);
        for step in MOVES_8 {
            let expected = if step.is_diagonal() { 2f64.sqrt() } else { 1.0 };
            assert_eq!(step.length(), expected);
        }
    }

    #[test]
    fn neighborhoods_are_scan_ordered() {
        // Row-major: sorted by (dy, dx).
        let mut sorted = MOVES_8;
        sorted.sort_by_key(|s| (s.dy, s.dx));
        assert_eq!(sorted, MOVES_8);

        let mut sorted4 = ORTHO_4;
        sorted4.sort_by_key(|s| (s.dy, s.dx));
        assert_eq!(sorted4, ORTHO_4);
    }

    #[test]
    fn heading_turns() {
        assert_eq!(Heading::East.right(), Heading::South);
        assert_eq!(Heading::East.left(), Heading::North);
        assert_eq!(Heading::East.reverse(), Heading::West);
        assert_eq!(Heading::North.step().dy, -1);
    }

    #[test]
    fn scan_key_orders_row_major() {
        let mut cells = vec![Cell::new(5, 1), Cell::new(0, 2), Cell::new(9, 0)];
        cells.sort_by_key(|c| c.scan_key());
        assert_eq!(cells[0], Cell::new(9, 0));
        assert_eq!(cells[1], Cell::new(5, 1));
        assert_eq!(cells[2], Cell::new(0, 2));
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let mut t = Tick::ZERO;
        t.advance();
        t.advance();
        assert_eq!(t, Tick(2));
        assert_eq!(t + 3, Tick(5));
        assert_eq!(Tick(7).since(Tick(2)), 5);
        assert_eq!(Tick(4).to_string(), "T4");
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_rngs_reproducible() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1_000_000u32), b.gen_range(0..1_000_000u32));
        }
    }

    #[test]
    fn agent_streams_independent() {
        let mut a = AgentRng::new(7, AgentId(0));
        let mut b = AgentRng::new(7, AgentId(1));
        let draws_a: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn sample_prefix_is_distinct_and_deterministic() {
        let mut rng1 = SimRng::new(99);
        let mut rng2 = SimRng::new(99);
        let mut pool1: Vec<u32> = (0..100).collect();
        let mut pool2: Vec<u32> = (0..100).collect();
        rng1.sample_prefix(&mut pool1, 10);
        rng2.sample_prefix(&mut pool2, 10);
        assert_eq!(pool1[..10], pool2[..10]);

        let mut seen = pool1[..10].to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }
}

#[cfg(test)]
mod config {
    use crate::{PolicyKind, SimParams};

    #[test]
    fn defaults_validate() {
        SimParams::default().validate().unwrap();
    }

    #[test]
    fn empty_body_is_default() {
        let parsed: SimParams = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SimParams::default());
    }

    #[test]
    fn out_of_range_rejected() {
        let mut p = SimParams::default();
        p.num_drones = 11;
        assert!(p.validate().is_err());

        let mut p = SimParams::default();
        p.num_targets = 0;
        assert!(p.validate().is_err());

        let mut p = SimParams::default();
        p.width = 9;
        assert!(p.validate().is_err());
    }

    #[test]
    fn step_budget_scales_and_caps() {
        let mut p = SimParams::default();
        p.max_steps = 500;
        p.num_drones = 4;
        assert_eq!(p.effective_max_steps(), 2_000);
        p.num_drones = 10;
        p.max_steps = 600;
        assert_eq!(p.effective_max_steps(), 5_000);
    }

    #[test]
    fn policy_names_roundtrip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.as_str().parse::<PolicyKind>().unwrap(), kind);
        }
        assert!("dijkstra".parse::<PolicyKind>().is_err());
    }
}
