#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::builder::ProblemBuilder;
    use crate::layout::Node;
    use crate::shift::{Shift, DAYS};
    use crate::{allocate, Allocation, SolverFailure};

    #[test]
    fn no_demand_means_no_work() {
        let allocation = allocate(&[[1, 1, 1]], &[[0, 0, 0]], 0, 30).unwrap();

        assert_eq!(allocation.as_array().shape(), &[1, 1, DAYS, 3]);
        assert_eq!(allocation.shifts_worked(0), 0);
        assert_eq!(allocation.assignments().count(), 0);
    }

    #[test]
    fn ineligible_officer_cannot_cover() {
        assert_eq!(allocate(&[[0, 0, 0]], &[[1, 0, 0]], 0, 30), None);

        let problem = ProblemBuilder::default()
            .add_officer([0, 0, 0])
            .add_organization([1, 0, 0])
            .build()
            .unwrap();
        assert_eq!(problem.solve(), Err(SolverFailure::Unsatisfiable { flow: 0, demand: DAYS }));
    }

    #[test]
    fn too_few_officers_for_round_the_clock() {
        // 2 officers working every day supply 60 of the 90 shifts
        assert_eq!(allocate(&[[1, 1, 1]; 2], &[[1, 1, 1]], 30, 30), None);

        let problem = ProblemBuilder::default()
            .with_bounds(30, 30)
            .add_officer([1, 1, 1])
            .add_officer([1, 1, 1])
            .add_organization([1, 1, 1])
            .build()
            .unwrap();
        assert!(problem.passes_precheck());
        assert_eq!(problem.solve(), Err(SolverFailure::Unsatisfiable { flow: 60, demand: 90 }));
    }

    #[test]
    fn round_the_clock_with_three_officers() {
        let allocation = allocate(&[[1, 1, 1]; 3], &[[1, 1, 1]], 30, 30).unwrap();

        for day in 0..DAYS {
            for shift in [Shift::Morning, Shift::Afternoon, Shift::Night] {
                assert_eq!(allocation.staffed(0, day, shift), 1, "day {day} {shift:?}");
            }
            for officer in 0..3 {
                assert_eq!(allocation.shifts_on(officer, day), 1);
            }
        }
        for officer in 0..3 {
            assert_eq!(allocation.shifts_worked(officer), DAYS);
        }
    }

    #[test]
    fn inverted_bounds_are_infeasible() {
        assert_eq!(allocate(&[[1, 1, 1]], &[[0, 0, 0]], 5, 4), None);
    }

    #[test]
    fn minimum_above_demand_is_caught_early() {
        let problem = ProblemBuilder::default()
            .with_bounds(20, 30)
            .add_officer([1, 1, 1])
            .add_officer([1, 1, 1])
            .add_organization([1, 0, 0])
            .build()
            .unwrap();

        assert_eq!(problem.solve(), Err(SolverFailure::MinimumExceedsDemand { minimum: 40, demand: 30 }));
    }

    #[test]
    fn eligibility_steers_assignments() {
        let problem = ProblemBuilder::default()
            .with_bounds(0, 30)
            .add_officer([1, 0, 0])
            .add_officer([0, 0, 1])
            .add_officer([0, 1, 1])
            .add_organization([1, 0, 0])
            .add_organization([0, 1, 1])
            .build()
            .unwrap();
        let allocation = problem.solve().unwrap();

        assert_eq!(allocation.verify(&problem), Ok(()));
        for day in 0..DAYS {
            assert_eq!(allocation.officer_on(0, day, Shift::Morning), Some(0));
            assert_eq!(allocation.officer_on(1, day, Shift::Afternoon), Some(2));
            assert_eq!(allocation.officer_on(1, day, Shift::Night), Some(1));
        }
    }

    #[test]
    fn bounds_are_respected() {
        // 60 shifts over 3 officers who may work at most 20 each
        let problem = ProblemBuilder::default()
            .with_bounds(10, 20)
            .add_officer([1, 1, 0])
            .add_officer([1, 1, 0])
            .add_officer([1, 1, 1])
            .add_organization([1, 0, 0])
            .add_organization([0, 0, 0])
            .add_organization([0, 0, 1])
            .pop_organization()
            .add_organization([0, 1, 0])
            .build()
            .unwrap();
        let allocation = problem.solve().unwrap();

        assert_eq!(allocation.verify(&problem), Ok(()));
        let worked = (0..3).map(|officer| allocation.shifts_worked(officer)).collect::<Vec<_>>();
        assert_eq!(worked.iter().sum::<usize>(), 2 * DAYS);
        assert!(worked.iter().all(|w| (10..=20).contains(w)), "{worked:?}");
    }

    #[test]
    fn decoding_is_a_pure_read() {
        let problem = ProblemBuilder::default()
            .with_bounds(5, 30)
            .add_officer([1, 1, 1])
            .add_officer([1, 0, 1])
            .add_organization([1, 0, 1])
            .build()
            .unwrap();
        let mut network = problem.network().unwrap();

        assert_eq!(Allocation::decode(&network), None);
        assert_eq!(network.solve(), Ok(2 * DAYS));

        let first = Allocation::decode(&network).unwrap();
        let second = Allocation::decode(&network).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, problem.solve().unwrap());
    }

    #[test]
    fn solved_network_keeps_flow_invariants() {
        let problem = ProblemBuilder::default()
            .with_bounds(3, 30)
            .add_officer([1, 1, 0])
            .add_officer([0, 1, 1])
            .add_officer([1, 0, 1])
            .add_organization([1, 1, 0])
            .add_organization([0, 0, 1])
            .build()
            .unwrap();
        let mut network = problem.network().unwrap();
        network.solve().unwrap();

        let flow = network.flow_network();
        assert!(flow.respects_capacity());
        assert!(flow.is_conserved());
        assert!(network.is_certified());

        // the mandatory quota is always used up in a certified flow
        let table = network.table();
        for (_, end, edge) in flow.outgoing(table[Node::SuperSource]) {
            assert_eq!(edge.flow(), edge.capacity(), "{:?}", table.node(end));
        }
    }

    #[test]
    fn display_lists_each_officer() {
        let allocation = allocate(&[[0, 0, 1]], &[[0, 0, 1]], 30, 30).unwrap();
        let expected = format!("0: {}\n", vec!["0N"; DAYS].join(" "));
        assert_eq!(format!("{}", allocation), expected);

        let idle = allocate(&[[1, 1, 1], [1, 1, 1]], &[[0, 0, 0]], 0, 0).unwrap();
        let line = vec!["."; DAYS].join(" ");
        assert_eq!(format!("{}", idle), format!("0: {line}\n1: {line}\n"));
    }

    #[test]
    fn allocation_survives_json() {
        let allocation = allocate(&[[1, 1, 0], [0, 1, 1]], &[[0, 1, 0]], 10, 20).unwrap();
        let json = serde_json::to_string(&allocation).unwrap();
        let restored: Allocation = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, allocation);
    }

    /// With every officer eligible for everything, an allocation exists exactly when each day's posts fit
    /// into the officers and a balanced rotation stays within the bounds.
    fn fully_eligible_is_feasible(officers: usize, daily: usize, min_shifts: usize, max_shifts: usize) -> bool {
        let total = daily * DAYS;
        min_shifts <= max_shifts
            && daily <= officers
            && officers * min_shifts <= total
            && total <= officers * max_shifts.min(DAYS)
    }

    #[test]
    fn random_fully_eligible_instances_match_rotation_argument() {
        let mut rng = ChaCha8Rng::seed_from_u64(30);

        for _ in 0..60 {
            let officers = rng.gen_range(0..=4);
            let organizations = rng.gen_range(1..=2);
            let demand = (0..organizations)
                .map(|_| [rng.gen_range(0..=1), rng.gen_range(0..=1), rng.gen_range(0..=1)])
                .collect::<Vec<_>>();
            let min_shifts = rng.gen_range(0..=DAYS);
            let max_shifts = rng.gen_range(0..=DAYS + 2);
            let preferences = vec![[1, 1, 1]; officers];

            let daily = demand.iter().flatten().sum::<usize>();
            let expected = fully_eligible_is_feasible(officers, daily, min_shifts, max_shifts);
            let allocation = allocate(&preferences, &demand, min_shifts, max_shifts);
            assert_eq!(allocation.is_some(), expected, "{officers} officers, {demand:?}, {min_shifts}..={max_shifts}");
        }
    }

    #[test]
    fn random_instances_verify_when_solved() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut solved = 0;

        for _ in 0..60 {
            let mut builder = ProblemBuilder::default();
            let min_shifts = rng.gen_range(0..=8);
            builder.with_bounds(min_shifts, rng.gen_range(min_shifts..=DAYS));
            for _ in 0..rng.gen_range(1..=5) {
                builder.add_officer([rng.gen_range(0..=1), rng.gen_range(0..=2), rng.gen_range(0..=1)]);
            }
            for _ in 0..rng.gen_range(1..=2) {
                builder.add_organization([rng.gen_range(0..=1), rng.gen_range(0..=1), rng.gen_range(0..=1)]);
            }
            let problem = builder.build().unwrap();

            match problem.solve() {
                Ok(allocation) => {
                    solved += 1;
                    assert_eq!(allocation.verify(&problem), Ok(()), "{problem:?}");
                }
                Err(SolverFailure::Unsatisfiable { flow, demand }) => assert!(flow < demand),
                Err(SolverFailure::MinimumExceedsDemand { minimum, demand }) => assert!(minimum > demand),
                Err(failure) => panic!("{failure}"),
            }
        }

        assert!(solved > 0);
    }
}
