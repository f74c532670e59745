pub mod fixtures;

use fixtures::{DestinationConfig, Recorder};
use mgmt_kernel::prelude::*;
use mgmt_kernel::ErrorKind;
use proptest::prelude::*;

fn config() -> ReadWriteDispatcher<DestinationConfig> {
    ReadWriteDispatcher::new(DestinationConfig::new()).expect("valid facade")
}

proptest! {
    #[test]
    fn accepted_limits_read_back(limit in prop_oneof![Just(-1_i64), 0..i64::MAX]) {
        let d = config();
        d.set_attribute(Attribute::new("MaxNumMsgs", limit)).unwrap();
        prop_assert_eq!(d.get_attribute("MaxNumMsgs").unwrap(), Value::Long(limit));
    }

    #[test]
    fn rejected_limits_leave_state_unchanged(
        before in 0..1_000_i64,
        limit in i64::MIN..-1,
    ) {
        let d = config();
        d.set_attribute(Attribute::new("MaxNumMsgs", before)).unwrap();

        let err = d.set_attribute(Attribute::new("MaxNumMsgs", limit)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvocationFailure);
        prop_assert_eq!(d.object().stored_max(), before);
    }

    #[test]
    fn subscriber_sees_consecutive_sequences(pauses in 1..64_usize) {
        let d = config();
        let recorder = Recorder::default();
        d.subscribe(recorder.clone(), None);

        for _ in 0..pauses {
            d.invoke("pause", vec![], &[]).unwrap();
        }

        let expected: Vec<u64> = (0..pauses as u64).collect();
        prop_assert_eq!(recorder.sequences(), expected);
    }
}
