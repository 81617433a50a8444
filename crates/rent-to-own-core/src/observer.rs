//! Diagnostics hooks for the affordability pipeline.
//!
//! The calculation never logs on its own. Callers that want to see
//! intermediate figures pass an observer; the default discards everything,
//! and observers cannot alter the result.

use rust_decimal::Decimal;

/// Receives named intermediate values as the calculation proceeds.
pub trait CalculationObserver {
    fn on_value(&self, step: &'static str, value: Decimal);

    fn on_note(&self, _step: &'static str, _message: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CalculationObserver for NoopObserver {
    fn on_value(&self, _step: &'static str, _value: Decimal) {}
}

/// Observer that forwards every value as a `tracing` debug event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CalculationObserver for TracingObserver {
    fn on_value(&self, step: &'static str, value: Decimal) {
        tracing::debug!(step, %value, "affordability step");
    }

    fn on_note(&self, step: &'static str, message: &str) {
        tracing::debug!(step, note = message, "affordability note");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(&'static str, Decimal)>>,
    }

    impl CalculationObserver for Recorder {
        fn on_value(&self, step: &'static str, value: Decimal) {
            self.seen.borrow_mut().push((step, value));
        }
    }

    #[test]
    fn test_recorder_receives_values_in_order() {
        let rec = Recorder::default();
        rec.on_value("a", dec!(1));
        rec.on_value("b", dec!(2));
        rec.on_note("c", "ignored by default");
        assert_eq!(*rec.seen.borrow(), vec![("a", dec!(1)), ("b", dec!(2))]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_debug(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_tracing_observer_emits_debug_events() {
        let logs = capture_debug(|| {
            TracingObserver.on_value("monthly_mortgage_payment", dec!(1769.79));
            TracingObserver.on_note("assessment", "Needs Improvement");
        });
        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("DEBUG"));
        assert!(lines[0].contains("monthly_mortgage_payment"));
        assert!(lines[0].contains("1769.79"));
        assert!(lines[1].contains("Needs Improvement"));
    }

    #[test]
    fn test_noop_observer_emits_nothing() {
        let logs = capture_debug(|| {
            NoopObserver.on_value("monthly_mortgage_payment", dec!(1769.79));
            NoopObserver.on_note("assessment", "Good");
        });
        assert!(logs.is_empty());
    }
}
