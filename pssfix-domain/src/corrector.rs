use crate::registry::RuleRegistry;
use pssfix_types::schema::RESULT_NAME;
use pssfix_types::{Correction, Divergence};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-batch tallies. Each batch owns its counters; nothing is shared between batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrectionCounters {
    pub received: u64,
    pub provided: u64,
}

impl CorrectionCounters {
    /// Divergences for which no rule was registered.
    pub fn uncorrected(&self) -> u64 {
        self.received.saturating_sub(self.provided)
    }
}

/// Corrections published under [`RESULT_NAME`] plus the batch counters.
#[derive(Debug, Clone, Default)]
pub struct CorrectionBatch {
    pub corrections: Vec<Correction>,
    pub counters: CorrectionCounters,
}

impl CorrectionBatch {
    pub fn name(&self) -> &'static str {
        RESULT_NAME
    }
}

/// Drives divergences through a [`RuleRegistry`] one at a time.
#[derive(Debug, Clone, Copy)]
pub struct Corrector<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> Corrector<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Processes divergences until the supply is exhausted.
    pub fn correct<I>(&self, divergences: I) -> CorrectionBatch
    where
        I: IntoIterator<Item = Divergence>,
    {
        let mut batch = CorrectionBatch::default();
        for divergence in divergences {
            self.process(divergence, &mut batch);
        }
        log_summary(&batch.counters);
        batch
    }

    /// Like [`Corrector::correct`], but tolerates a missing supplier by warning and returning an
    /// empty batch.
    pub fn correct_from<I>(&self, source: Option<I>) -> CorrectionBatch
    where
        I: IntoIterator<Item = Divergence>,
    {
        match source {
            Some(divergences) => self.correct(divergences),
            None => {
                warn!("no divergence source specified - no divergence correction possible");
                let batch = CorrectionBatch::default();
                log_summary(&batch.counters);
                batch
            }
        }
    }

    /// Dispatches one divergence into `batch`. Returns whether a correction was produced.
    pub fn process(&self, divergence: Divergence, batch: &mut CorrectionBatch) -> bool {
        batch.counters.received += 1;
        let kind = divergence.kind.clone();
        match self.registry.dispatch(Arc::new(divergence)) {
            Some(correction) => {
                batch.corrections.push(correction);
                batch.counters.provided += 1;
                true
            }
            None => {
                debug!(kind = %kind, "no correction rule for divergence kind");
                false
            }
        }
    }
}

fn log_summary(counters: &CorrectionCounters) {
    info!(
        received = counters.received,
        provided = counters.provided,
        "{} corrections for {} received divergences provided",
        counters.provided,
        counters.received
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pssfix_types::DivergenceKind;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, logs)
    }

    #[test]
    fn unknown_kind_counts_as_received_only() {
        let registry = RuleRegistry::builtin().unwrap();
        let corrector = Corrector::new(&registry);
        let mut batch = CorrectionBatch::default();

        let before = batch.counters;
        let produced = corrector.process(Divergence::new("dead_code"), &mut batch);
        let after = batch.counters;

        assert!(!produced);
        assert_eq!(after.received, before.received + 1);
        assert_eq!(after.provided, before.provided);
        assert!(batch.corrections.is_empty());
    }

    #[test]
    fn known_kind_counts_as_received_and_provided() {
        let registry = RuleRegistry::builtin().unwrap();
        let corrector = Corrector::new(&registry);
        let mut batch = CorrectionBatch::default();

        assert!(corrector.process(
            Divergence::new(DivergenceKind::UnusedVariable).with_variables("A"),
            &mut batch
        ));
        assert_eq!(
            batch.counters,
            CorrectionCounters {
                received: 1,
                provided: 1
            }
        );
    }

    #[test]
    fn missing_source_yields_empty_batch() {
        let registry = RuleRegistry::builtin().unwrap();
        let batch = Corrector::new(&registry).correct_from(None::<Vec<Divergence>>);
        assert!(batch.corrections.is_empty());
        assert_eq!(batch.counters, CorrectionCounters::default());
        assert_eq!(batch.name(), "PSS_Corrections");
    }

    #[test]
    fn missing_source_emits_exactly_one_warning() {
        let registry = RuleRegistry::builtin().unwrap();
        let (batch, logs) = with_captured_logs(|| {
            Corrector::new(&registry).correct_from(None::<Vec<Divergence>>)
        });
        assert!(batch.corrections.is_empty());

        let lines = logs.lines();
        let warnings: Vec<&String> = lines.iter().filter(|l| l.contains(" WARN ")).collect();
        assert_eq!(warnings.len(), 1, "log output: {lines:?}");
        assert!(warnings[0].contains("no divergence source specified"));
    }

    #[test]
    fn present_source_emits_no_warning() {
        let registry = RuleRegistry::builtin().unwrap();
        let (_, logs) = with_captured_logs(|| {
            Corrector::new(&registry).correct_from(Some(vec![Divergence::new("dead_code")]))
        });
        assert!(logs.lines().iter().all(|l| !l.contains(" WARN ")));
    }

    #[test]
    fn uncorrected_never_underflows() {
        let counters = CorrectionCounters {
            received: 0,
            provided: 1,
        };
        assert_eq!(counters.uncorrected(), 0);
        assert_eq!(
            CorrectionCounters {
                received: 5,
                provided: 2
            }
            .uncorrected(),
            3
        );
    }

    #[test]
    fn empty_source_yields_empty_batch() {
        let registry = RuleRegistry::builtin().unwrap();
        let batch = Corrector::new(&registry).correct(Vec::new());
        assert_eq!(batch.counters.uncorrected(), 0);
    }
}
