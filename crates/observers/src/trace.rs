//! A line-oriented log of a run.

use std::io::{self, Write};

use radix_core::Observer;
use radix_solvers::{IterationRecord, Side, Status, Step};

use crate::traits::{HasRecord, HasStatus};

/// Writes one line per event.
///
/// Steps are written as `#<iter> <method values> error=<error>`, with a
/// trailing `converged` on the record that met the tolerance, and the end of
/// the run as `finished: <status>` (plus the failure message when failed).
/// Numbers use Rust's shortest round-trip formatting.
///
/// The observer never stops a run. Write errors cannot be returned from
/// [`Observer::observe`], so the first one is kept and later writes are
/// skipped; [`Trace::finish`] reports it.
///
/// # Example
///
/// ```rust
/// use radix_core::Observer;
/// use radix_expr::MathEvaluator;
/// use radix_observers::Trace;
/// use radix_solvers::{Action, Event, MethodConfig, MethodKind, run_to_completion};
///
/// let mut trace = Trace::new(Vec::new());
/// run_to_completion(
///     MethodConfig::preset(MethodKind::NewtonRaphson),
///     &MathEvaluator,
///     |event: &Event<'_>| -> Option<Action> { trace.observe(event) },
/// )?;
/// let log = String::from_utf8(trace.finish()?)?;
/// assert!(log.ends_with("finished: converged\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Trace<W> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> Trace<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the writer.
    ///
    /// # Errors
    ///
    /// Returns the first write error encountered while tracing.
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.writer),
        }
    }

    fn write_record(&mut self, record: &IterationRecord) -> io::Result<()> {
        let w = &mut self.writer;
        write!(w, "#{} ", record.iter)?;
        match record.step {
            Step::Bracket {
                a,
                b,
                c,
                fc,
                kept,
                width,
                ..
            } => {
                let kept = match kept {
                    Side::Left => "left",
                    Side::Right => "right",
                };
                write!(w, "a={a} b={b} c={c} f(c)={fc} kept={kept} width={width}")?;
            }
            Step::Secant {
                x_prev,
                x_curr,
                slope,
                x_next,
                f_next,
                relative_error,
                ..
            } => write!(
                w,
                "x_prev={x_prev} x_curr={x_curr} slope={slope} x_next={x_next} \
                 f(x_next)={f_next} relative_error={relative_error}%"
            )?,
            Step::Newton { x, fx, dfx, x_next } => {
                write!(w, "x={x} f(x)={fx} f'(x)={dfx} x_next={x_next}")?;
            }
            Step::FixedPoint { x, gx } => write!(w, "x={x} g(x)={gx}")?,
        }
        write!(w, " error={}", record.error)?;
        if record.converged {
            write!(w, " converged")?;
        }
        writeln!(w)
    }

    fn write_finish(&mut self, status: Status, failure: Option<String>) -> io::Result<()> {
        let status = match status {
            Status::Running => "running",
            Status::Converged => "converged",
            Status::MaxIters => "max iterations reached",
            Status::Failed => "failed",
        };
        match failure {
            Some(message) => writeln!(self.writer, "finished: {status}: {message}"),
            None => writeln!(self.writer, "finished: {status}"),
        }
    }
}

impl<E, A, W> Observer<E, A> for Trace<W>
where
    E: HasRecord + HasStatus,
    W: Write,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if self.error.is_some() {
            return None;
        }
        let result = match (event.record(), event.status()) {
            (Some(record), _) => self.write_record(record),
            (None, Some(status)) => {
                let failure = event.failure().map(ToString::to_string);
                self.write_finish(status, failure)
            }
            (None, None) => Ok(()),
        };
        if let Err(error) = result {
            self.error = Some(error);
        }
        None
    }
}
