use hashmix_core::extract::{fill_words, next_word};
use hashmix_core::Device;
use proptest::prelude::*;

fn sizes() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![32usize, 64, 96, 128, 256])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bulk_extraction_matches_word_walk(
        seed in prop::collection::vec(any::<u8>(), 1..300),
        size in sizes(),
        amounts in prop::collection::vec(0usize..80, 1..8),
    ) {
        let mut bulk = Device::new(&seed, size).unwrap();
        let mut walk = bulk.clone();
        for amount in amounts {
            let words = bulk.extract_uint64(amount);
            let walked: Vec<u64> = (0..amount).map(|_| walk.next_uint64()).collect();
            prop_assert_eq!(&words, &walked);
            prop_assert_eq!(bulk.current(), walk.current());

            let width = bulk.num_words();
            prop_assert!(bulk.current().idx_mult < width);
            prop_assert!(bulk.current().idx_xor < width);
        }
    }

    #[test]
    fn whole_epochs_move_the_feedback_cursor(
        seed in prop::collection::vec(any::<u8>(), 1..64),
        size in sizes(),
        epochs in 1usize..40,
        remainder_seed in any::<usize>(),
    ) {
        let mut device = Device::new(&seed, size).unwrap();
        let width = device.num_words();
        let remainder = remainder_seed % width;
        let start_xor = device.current().idx_xor;

        device.extract_uint64(epochs * width + remainder);

        prop_assert_eq!(device.current().idx_mult, remainder);
        prop_assert_eq!(device.current().idx_xor, (start_xor + epochs) % width);
    }

    #[test]
    fn split_requests_equal_one_request(
        seed in prop::collection::vec(any::<u8>(), 1..40),
        first in 0usize..50,
        second in 0usize..50,
    ) {
        let mut split = Device::new(&seed, 64).unwrap();
        let mut joined = split.clone();
        let mut words = split.extract_uint64(first);
        words.extend(split.extract_uint64(second));
        prop_assert_eq!(words, joined.extract_uint64(first + second));
    }
}

#[test]
fn one_word_past_an_epoch_crosses_one_boundary() {
    let mut device = Device::new(b"boundary", 64).unwrap();
    let width = device.num_words();
    let before = device.current().clone();

    let words = device.extract_uint64(width + 1);

    let after = device.current();
    assert_eq!(after.idx_mult, 1);
    assert_eq!(after.idx_xor, 1);
    let changed: Vec<usize> = (0..width)
        .filter(|&k| before.xor_x[k] != after.xor_x[k])
        .collect();
    assert_eq!(changed, vec![0]);

    // the last word is masked by the feedback entry selected after the wrap
    let lane0 = words[0];
    let expected = before.mult_a[0]
        .wrapping_mul(lane0)
        .wrapping_add(before.mult_b[0])
        ^ before.xor_x[1];
    assert_eq!(words[width], expected);
}

#[test]
fn snapshot_level_walk_agrees_from_a_mid_epoch_cursor() {
    let device = Device::new(&[9, 8, 7], 96).unwrap();
    let mut bulk = device.current().clone();
    bulk.idx_mult = 5;
    bulk.idx_xor = 11;
    let mut walk = bulk.clone();

    let mut out = vec![0u64; 100];
    fill_words(&mut bulk, &mut out);
    let walked: Vec<u64> = (0..100).map(|_| next_word(&mut walk)).collect();

    assert_eq!(out, walked);
    assert_eq!(bulk, walk);
}
