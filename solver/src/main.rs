use shiftflow::{ProblemBuilder, Shift, DAYS};

fn main() {
    // a bank guarded around the clock, an office in the mornings, and a warehouse overnight
    let problem = ProblemBuilder::default()
        .with_bounds(12, 24)
        .add_officer([1, 1, 0])
        .add_officer([1, 1, 0])
        .add_officer([0, 1, 1])
        .add_officer([0, 0, 1])
        .add_officer([1, 1, 1])
        .add_officer([1, 0, 1])
        .add_officer([0, 0, 1])
        .add_officer([1, 0, 0])
        .add_organization([1, 1, 1])
        .add_organization([1, 0, 0])
        .add_organization([0, 0, 1])
        .build()
        .unwrap();

    let allocation = match problem.solve() {
        Ok(allocation) => allocation,
        Err(failure) => {
            eprintln!("no allocation: {failure}");
            std::process::exit(1);
        }
    };

    assert_eq!(allocation.verify(&problem), Ok(()));
    print!("{}", allocation);

    for officer in 0..problem.officers() {
        println!("officer {officer} works {} of {DAYS} days", allocation.shifts_worked(officer));
    }
    let nights = (0..DAYS).map(|day| allocation.staffed(2, day, Shift::Night)).sum::<usize>();
    println!("warehouse covered for {nights} nights");
}
