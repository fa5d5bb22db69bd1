use std::fmt::Display;

use itertools::Itertools;
use quickcheck::{Arbitrary, Gen};

use tinysat::core::cnf::{Clause, Formula};
use tinysat::core::engine::{Engine, Solution};
use tinysat::core::eval::check_match;
use tinysat::core::lit::Lit;
use tinysat::core::model::Match;

/// Formulas generated by [SmallFormula] range over at most this many variables.
pub const MAX_VARS: u32 = 8;

/// A random formula small enough to be checked exhaustively.
#[derive(Debug, Clone)]
pub struct SmallFormula(pub Formula);

impl Arbitrary for SmallFormula {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vars = u32::arbitrary(g) % MAX_VARS + 1;
        let num_clauses = usize::arbitrary(g) % 16;
        let mut formula = Formula::new();
        for _ in 0..num_clauses {
            let len = usize::arbitrary(g) % 3 + 1;
            let lits = (0..len)
                .map(|_| {
                    let var = (u32::arbitrary(g) % num_vars + 1) as i32;
                    if bool::arbitrary(g) {
                        Lit::new(var)
                    } else {
                        Lit::new(-var)
                    }
                })
                .collect_vec();
            formula.add_clause(Clause::new(lits));
        }
        SmallFormula(formula)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let clauses = self.0.clauses().to_vec();
        Box::new((0..clauses.len()).map(move |i| {
            let mut fewer = clauses.clone();
            fewer.remove(i);
            SmallFormula(Formula::from_clauses(fewer))
        }))
    }
}

/// Try every total assignment, in binary counting order.
pub fn brute_force(formula: &Formula) -> Option<Match> {
    let n = formula.variable_count();
    assert!(n < 24, "too many variables for exhaustive search: {}", n);
    (0u32..1 << n)
        .map(|bits| Match::from((0..n).map(|i| bits >> i & 1 == 1).collect_vec()))
        .find(|assignment| check_match(formula, assignment).unwrap_or(false))
}

/// Pigeonhole principle: `pigeons` pigeons into `holes` holes.
/// Unsatisfiable whenever `pigeons > holes`.
pub fn pigeonhole(pigeons: usize, holes: usize) -> Formula {
    let var = |p: usize, h: usize| (p * holes + h + 1) as i32;
    let mut formula = Formula::new();
    for p in 0..pigeons {
        formula.add_clause((0..holes).map(|h| var(p, h)).collect_vec());
    }
    for h in 0..holes {
        for (a, b) in (0..pigeons).tuple_combinations() {
            formula.add_clause([-var(a, h), -var(b, h)]);
        }
    }
    formula
}

pub fn run_engine_smoke<E>(mut engine: E) -> color_eyre::Result<()>
where
    E: Engine + Display,
{
    println!("Engine signature: {}", engine.signature());
    println!("engine = {}", engine);

    let formula = Formula::from([vec![1, 2], vec![3, 4], vec![-1, -2], vec![-3, -4], vec![5]]);
    let solution = engine.solve(&formula)?;
    println!("Engine returned: {}", solution);
    match solution {
        Solution::Sat(model) => assert!(engine.verify(&formula, &model)?),
        Solution::Unsat => panic!("formula is satisfiable"),
    }

    let formula = Formula::from([vec![1], vec![-1, 2], vec![-2]]);
    let solution = engine.solve(&formula)?;
    println!("Engine returned: {}", solution);
    assert!(matches!(solution, Solution::Unsat));

    let solution = engine.solve(&Formula::new())?;
    println!("Engine returned: {}", solution);
    assert!(matches!(solution, Solution::Sat(ref model) if model.is_empty()));

    println!("stats = {:?}", engine.stats());
    Ok(())
}
