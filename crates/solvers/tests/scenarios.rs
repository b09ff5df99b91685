//! End-to-end runs with user-style expressions.

use approx::assert_relative_eq;

use radix_expr::MathEvaluator;
use radix_solvers::{
    Failure, Method, MethodConfig, MethodKind, RunState, Status, ValidationError,
    run_to_completion_unobserved,
};

fn solve(expression: &str, method: Method, tolerance: f64, max_iters: usize) -> RunState {
    let config = MethodConfig::new(expression, method, tolerance, max_iters).expect("valid config");
    run_to_completion_unobserved(config, &MathEvaluator).expect("should prepare")
}

#[test]
fn bisection_on_a_downward_parabola() {
    let run = solve(
        "-0.9x^2 + 1.7x + 2.5",
        Method::Bisection { bounds: [2.8, 3.0] },
        1e-6,
        20,
    );
    let outcome = run.outcome();

    assert_eq!(outcome.status, Status::Converged);
    assert_eq!(outcome.iters, 16);
    assert_relative_eq!(outcome.root.expect("has a root"), 2.860_104_37, epsilon = 1e-6);

    let widths = run.widths();
    assert!(widths.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn regula_falsi_on_the_same_parabola() {
    let run = solve(
        "-0.9x^2 + 1.7x + 2.5",
        Method::RegulaFalsi { bounds: [2.8, 3.0] },
        1e-6,
        20,
    );

    assert_eq!(run.status(), Status::Converged);
    assert_eq!(run.records().len(), 4);
    assert_relative_eq!(run.outcome().root.expect("has a root"), 2.860_104_37, epsilon = 1e-6);
    assert!(run.widths().windows(2).all(|pair| pair[1] <= pair[0]));
}

#[test]
fn variable_times_parenthesis() {
    let run = solve("x(x+1) - 2", Method::Bisection { bounds: [0.0, 3.0] }, 1e-6, 50);

    assert_eq!(run.status(), Status::Converged);
    assert_relative_eq!(run.outcome().root.expect("has a root"), 1.0, epsilon = 1e-5);
}

#[test]
fn regula_falsi_on_a_small_scale_line() {
    let bounds = [0.0, 1.0];
    let bisection = solve("1e-13*(x - 0.3)", Method::Bisection { bounds }, 1e-6, 20);
    let regula_falsi = solve("1e-13*(x - 0.3)", Method::RegulaFalsi { bounds }, 1e-6, 20);

    assert_eq!(bisection.status(), Status::Converged);
    assert_eq!(regula_falsi.status(), Status::Converged);
    assert_eq!(regula_falsi.records().len(), 1);
    assert_relative_eq!(
        regula_falsi.outcome().root.expect("has a root"),
        0.3,
        epsilon = 1e-12
    );
}

#[test]
fn newton_on_the_classic_cubic() {
    let run = solve(
        "x^3 - 2x - 5",
        Method::NewtonRaphson {
            initial_guess: 2.0,
            derivative: None,
        },
        1e-4,
        20,
    );

    assert_eq!(run.derivative(), Some("3 * x^2 - 2"));
    assert_eq!(run.status(), Status::Converged);
    assert_eq!(run.records().len(), 3);
    assert_relative_eq!(run.outcome().root.expect("has a root"), 2.094_551_5, epsilon = 1e-7);
}

#[test]
fn secant_finds_the_golden_ratio() {
    let run = solve("x^2 - x - 1", Method::Secant { seeds: [0.8, 0.9] }, 1e-6, 20);

    assert_eq!(run.status(), Status::Converged);
    assert_eq!(run.records().len(), 7);
    let golden = (1.0 + 5.0_f64.sqrt()) / 2.0;
    assert_relative_eq!(run.outcome().root.expect("has a root"), golden, epsilon = 1e-8);

    let errors = run.errors();
    assert!(errors[2..].windows(2).all(|pair| pair[1] <= pair[0]), "{errors:?}");
}

#[test]
fn fixed_point_converges_for_a_contraction() {
    let run = solve(
        "(x+2)^(1/3)",
        Method::FixedPoint { initial_guess: 1.5 },
        1e-4,
        50,
    );

    assert_eq!(run.status(), Status::Converged);
    assert_eq!(run.records().len(), 4);
    assert_relative_eq!(run.outcome().root.expect("has a root"), 1.521_38, epsilon = 1e-4);
}

#[test]
fn fixed_point_square_root_map_diverges_from_a_bad_start() {
    // sqrt(2x + 5) is undefined at x0 = -3.
    let run = solve(
        "(2x+5)^(1/2)",
        Method::FixedPoint { initial_guess: -3.0 },
        1e-6,
        50,
    );

    assert_eq!(run.status(), Status::Failed);
    assert!(matches!(
        run.failure(),
        Some(Failure::Diverging { iter: 1, .. })
    ));
    assert!(run.records().is_empty());
    assert!(run.outcome().message.starts_with("iteration diverging"));
}

#[test]
fn fixed_point_expanding_map_diverges_before_the_budget() {
    let run = solve("2x + 5", Method::FixedPoint { initial_guess: 1.0 }, 1e-6, 100);

    assert_eq!(run.status(), Status::Failed);
    assert!(matches!(
        run.failure(),
        Some(Failure::Diverging { iter: 31, .. })
    ));
    assert_eq!(run.records().len(), 30);
    assert!(
        run.records()
            .iter()
            .all(|record| record.candidate().is_finite())
    );
}

#[test]
fn bracket_without_sign_change_is_rejected() {
    let config = MethodConfig::new(
        "x^2 + 1",
        Method::Bisection { bounds: [-1.0, 1.0] },
        1e-6,
        20,
    )
    .expect("valid config");

    let result = RunState::prepare(config, &MathEvaluator);
    assert!(matches!(result, Err(ValidationError::NoSignChange { .. })));
}

#[test]
fn bad_expression_fails_the_run() {
    let config = MethodConfig::new("x +", Method::Secant { seeds: [0.0, 1.0] }, 1e-6, 20)
        .expect("valid config");

    let run = RunState::prepare(config, &MathEvaluator).expect("seeds are valid");
    assert_eq!(run.status(), Status::Failed);
    assert!(matches!(run.failure(), Some(Failure::Evaluation { iter: 0, .. })));
}

#[test]
fn underivable_expression_fails_newton() {
    let config = MethodConfig::new(
        "x % 3 - 1",
        Method::NewtonRaphson {
            initial_guess: 2.0,
            derivative: None,
        },
        1e-6,
        20,
    )
    .expect("valid config");

    let run = RunState::prepare(config, &MathEvaluator).expect("guess is valid");
    assert_eq!(run.status(), Status::Failed);
    assert_eq!(
        run.outcome().message,
        "derivative could not be computed: cannot differentiate '%'"
    );
}

#[test]
fn presets_run_to_a_terminal_status() {
    for kind in MethodKind::ALL {
        let run = run_to_completion_unobserved(MethodConfig::preset(kind), &MathEvaluator)
            .expect("presets are valid");
        assert!(run.status().is_terminal(), "{kind:?}");
        assert_ne!(run.status(), Status::Failed, "{kind:?}");
    }
}
