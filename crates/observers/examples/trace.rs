//! Traces the preset runs of every method to stdout.
//!
//! # Usage
//!
//! ```text
//! cargo run --example trace
//! cargo run --example trace -- newton
//! cargo run --example trace -- bisection 5
//! ```
//!
//! The optional second argument stops the run after that many records
//! have an error below `1e-3`, using [`StopBelow`] alongside [`Trace`].

use std::{error::Error, io};

use radix_core::Observer;
use radix_expr::MathEvaluator;
use radix_observers::{StopBelow, Trace};
use radix_solvers::{Action, Event, MethodConfig, MethodKind, run_to_completion};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);

    let kinds = match args.next().as_deref() {
        None | Some("all") => MethodKind::ALL.to_vec(),
        Some("bisection") => vec![MethodKind::Bisection],
        Some("regula-falsi") => vec![MethodKind::RegulaFalsi],
        Some("secant") => vec![MethodKind::Secant],
        Some("newton") => vec![MethodKind::NewtonRaphson],
        Some("fixed-point") => vec![MethodKind::FixedPoint],
        Some(other) => {
            eprintln!("Unknown method: {other}");
            eprintln!("Usage: trace [all|bisection|regula-falsi|secant|newton|fixed-point] [min]");
            std::process::exit(1);
        }
    };
    let stop = args
        .next()
        .map(|min| min.parse::<usize>())
        .transpose()?
        .map(|min| StopBelow::new(1e-3).min_iters(min));

    for kind in kinds {
        let config = MethodConfig::preset(kind);
        println!("{kind:?}: f(x) = {}", config.expression());
        trace(config, stop)?;
        println!();
    }
    Ok(())
}

fn trace(config: MethodConfig, mut stop: Option<StopBelow>) -> Result<(), Box<dyn Error>> {
    let mut trace = Trace::new(io::stdout().lock());

    let state = run_to_completion(config, &MathEvaluator, |event: &Event<'_>| -> Option<Action> {
        let _: Option<Action> = trace.observe(event);
        stop.as_mut().and_then(|stop| stop.observe(event))
    })?;
    drop(trace.finish()?);

    let outcome = state.outcome();
    match (outcome.root, state.derivative()) {
        (Some(root), Some(derivative)) => {
            println!("root ≈ {root} using f'(x) = {derivative}");
        }
        (Some(root), None) => println!("root ≈ {root}"),
        (None, _) => {}
    }
    println!("{}", outcome.message);
    Ok(())
}
