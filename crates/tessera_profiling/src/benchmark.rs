//! Running benchmark targets either directly or through `criterion`.

#[cfg(feature = "criterion")]
pub mod criterion;

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

/// Something that can repeatedly execute a closure and measure it.
pub trait Benchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T);
}

/// Runs a closure in a tight loop for a fixed wall-clock duration, after an
/// optional delay. Useful for attaching an external profiler to a single
/// target.
#[derive(Clone, Debug)]
pub struct BasicBenchmarker {
    duration: Duration,
    delayer: Delayer,
}

/// Postpones a benchmark until a given time has passed since program start.
#[derive(Clone, Debug)]
pub struct Delayer {
    program_start: Instant,
    delay: Duration,
}

impl BasicBenchmarker {
    pub fn new(duration: Duration, delayer: Delayer) -> Self {
        Self { duration, delayer }
    }
}

impl Benchmarker for BasicBenchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T) {
        let iterations = run_for_duration(self.duration, self.delayer, f);
        tessera_log::info!(
            "Ran {} iterations in {:.3} s",
            iterations.count,
            iterations.elapsed.as_secs_f64()
        );
        tessera_log::info!(
            "Average time per iteration: {:.2} ns",
            iterations.nanos_per_iteration()
        );
    }
}

impl Delayer {
    pub fn new(program_start: Instant, delay_seconds: f64) -> Self {
        Self {
            program_start,
            delay: Duration::from_secs_f64(delay_seconds),
        }
    }

    fn wait(self) {
        let remaining = self.delay.saturating_sub(self.program_start.elapsed());
        if remaining > Duration::ZERO {
            std::thread::sleep(remaining);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Iterations {
    count: u64,
    elapsed: Duration,
}

impl Iterations {
    fn nanos_per_iteration(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.count as f64
    }
}

/// Defines an enum with one variant per benchmark function, where each
/// function lives in a submodule of the given benchmarks module and takes a
/// [`Benchmarker`]. Variant names are the module name followed by the
/// function name, in camel case. With the `cli` feature of the invoking
/// crate, the enum derives `clap::ValueEnum`.
#[macro_export]
macro_rules! define_target_enum {
(
    $name:ident,
    $benchmarks_mod:path,
    $(
        $module:ident => {
            $($func:ident),* $(,)?
        }
    ),* $(,)?
) => {
    ::pastey::paste! {
        #[allow(clippy::enum_variant_names)]
        #[cfg_attr(feature = "cli", derive(::clap::ValueEnum))]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
        pub enum $name {
            $(
                $( [<$module:camel $func:camel>] ),*
            ),*
        }

        impl $name {
            pub const ALL: &[Self] = &[
                $(
                    $( Self::[<$module:camel $func:camel>], )*
                )*
            ];

            fn execute(&self, benchmarker: impl $crate::benchmark::Benchmarker) {
                match self {
                    $(
                        $( Self::[<$module:camel $func:camel>] => $benchmarks_mod::$module::$func(benchmarker), )*
                    )*
                }
            }
        }
    }};
}

/// Runs the benchmark invoked by `execute` for `duration` seconds, starting no
/// earlier than `delay` seconds after this call. The target always runs at
/// least once.
pub fn benchmark(execute: impl Fn(BasicBenchmarker), duration: f64, delay: f64) {
    let start = Instant::now();

    let delayer = Delayer::new(start, delay);
    let duration = Duration::from_secs_f64(duration);

    let benchmarker = BasicBenchmarker::new(duration, delayer);

    execute(benchmarker);
}

fn run_for_duration<T>(
    duration: Duration,
    delayer: Delayer,
    f: &mut impl FnMut() -> T,
) -> Iterations {
    delayer.wait();
    let start = Instant::now();
    let mut count = 0;
    loop {
        black_box(f());
        count += 1;

        if start.elapsed() > duration {
            break;
        }
    }
    Iterations {
        count,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn zero_duration_runs_target_exactly_once() {
        let mut calls = 0;
        let iterations = run_for_duration(
            Duration::ZERO,
            Delayer::new(Instant::now(), 0.0),
            &mut || calls += 1,
        );
        assert_eq!(calls, 1);
        assert_eq!(iterations.count, 1);
    }

    #[test]
    fn delayer_waits_until_delay_has_passed() {
        let start = Instant::now();
        Delayer::new(start, 0.01).wait();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn basic_benchmarker_runs_target() {
        let calls = Cell::new(0_u32);
        benchmark(
            |benchmarker| benchmarker.benchmark(&mut || calls.set(calls.get() + 1)),
            0.0,
            0.0,
        );
        assert!(calls.get() >= 1);
    }
}
