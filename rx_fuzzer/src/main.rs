extern crate rx_match;
extern crate rx_syntax;
extern crate rx_deriv;
extern crate rand;

mod rnd;
mod tree_gen;
mod input_gen;

use std::env;
use std::process;
use rx_syntax::{parse, print};
use rx_deriv::{accepts, optimize};
use tree_gen::random_tree;
use input_gen::{random_candidate, witness};

const TREE_DEPTH: usize = 3;
const CANDIDATES_PER_TREE: usize = 16;

fn main() {
    let mut args = env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse().unwrap_or_else(|_| die_usage()),
        None => rnd::seed_from_system_time(),
    };
    let iterations: usize = match args.next() {
        Some(s) => s.parse().unwrap_or_else(|_| die_usage()),
        None => 1000,
    };

    rnd::reseed(seed);
    println!("fuzzing {} trees with seed {}", iterations, seed);

    for i in 0..iterations {
        fuzz_one();
        if (i + 1) % 100 == 0 {
            println!("{} trees checked", i + 1);
        }
    }
    println!("done");
}

/// Builds one random tree and cross-checks printing, reparsing, optimizing
/// and matching against each other.
fn fuzz_one() {
    let tree = random_tree(TREE_DEPTH);
    let text = print(&tree);

    let parsed = match parse(&text) {
        Ok(parsed) => parsed,
        Err(err) => fail(&text, &format!("printed form does not parse back: {}", err)),
    };

    let tree_opt = optimize(&tree);
    let parsed_opt = optimize(&parsed);
    if tree_opt != parsed_opt {
        fail(&text, "printing and reparsing changed the optimized tree");
    }

    let mut candidates: Vec<String> = (0..CANDIDATES_PER_TREE)
        .map(|_| random_candidate(8))
        .collect();
    if let Some(accepted) = witness(&tree) {
        if !accepts(&tree, accepted.chars()) {
            fail(&text, &format!("witness {:?} is rejected", accepted));
        }
        candidates.push(accepted);
    }

    for candidate in &candidates {
        let expected = accepts(&tree, candidate.chars());
        if accepts(&parsed, candidate.chars()) != expected {
            fail(&text, &format!("reparsed tree disagrees on {:?}", candidate));
        }
        if accepts(&tree_opt, candidate.chars()) != expected {
            fail(&text, &format!("optimized tree disagrees on {:?}", candidate));
        }
    }
}

fn fail(pattern: &str, message: &str) -> ! {
    eprintln!("fuzzing failure (seed {}):", rnd::current_seed());
    eprintln!("  pattern: {:?}", pattern);
    eprintln!("  {}", message);
    process::exit(1);
}

fn die_usage() -> ! {
    eprintln!("usage: rx_fuzzer [seed [iterations]]");
    process::exit(2);
}
