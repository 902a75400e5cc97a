use proptest::prelude::*;
use std::time::Duration;
use trc_trace::Trace;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct DurationWrapper(#[serde(with = "trc_trace::duration_wire")] Duration);

proptest! {
    /// `duration_wire` round-trips any duration through its human-string
    /// wire form (§6): serialize then deserialize reproduces the original
    /// to the nanosecond.
    #[test]
    fn duration_wire_round_trips(nanos in 0u64..1_000_000_000_000) {
        let original = DurationWrapper(Duration::from_nanos(nanos));
        let json = serde_json::to_string(&original).unwrap();
        let back: DurationWrapper = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.0, original.0);
    }

    /// `duration_wire` also accepts a bare integer of nanoseconds on the
    /// way in, per §6, regardless of magnitude.
    #[test]
    fn duration_wire_accepts_bare_integer_nanos(nanos in 0u64..1_000_000_000_000) {
        let back: DurationWrapper = serde_json::from_str(&nanos.to_string()).unwrap();
        prop_assert_eq!(back.0, Duration::from_nanos(nanos));
    }

    /// Events appended to one trace, in any mix of eager and lazy calls,
    /// stay observable in the exact order they were appended (§4.3).
    #[test]
    fn events_stay_append_ordered(flags in prop::collection::vec(any::<bool>(), 0..50)) {
        let trace = Trace::new("host", "foo");
        for (i, lazy) in flags.iter().enumerate() {
            if *lazy {
                trc_trace::lazy_tracef!(trace, move || format!("event {i}"));
            } else {
                trc_trace::tracef!(trace, "event {i}");
            }
        }
        let events = trace.events();
        let texts: Vec<String> = events.iter().map(|e| e.what.clone()).collect();
        let expected: Vec<String> = (0..flags.len()).map(|i| format!("event {i}")).collect();
        prop_assert_eq!(texts, expected);
    }
}
