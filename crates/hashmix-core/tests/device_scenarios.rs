use hashmix_core::{
    to_unit_f64, Device, DeviceConfig, HashmixError, Output, ParityRule, Request, FLOAT_MASK,
    FLOAT_SCALE,
};
use rand::{Rng, RngCore};

#[test]
fn construction_is_reproducible() {
    let mut a = Device::new(b"reproducible seed", 128).unwrap();
    let mut b = Device::new(b"reproducible seed", 128).unwrap();
    assert_eq!(a.render_state(), b.render_state());
    assert_eq!(a.extract_uint64(300), b.extract_uint64(300));
    assert_eq!(a.extract_float64(17), b.extract_float64(17));
}

#[test]
fn parity_invariants_hold_after_construction() {
    let seeds: [&[u8]; 3] = [b"a", b"another seed", &[0u8; 300]];
    for size in [32, 64, 128, 512] {
        for seed in seeds {
            let device = Device::new(seed, size).unwrap();
            let snapshot = device.current();
            assert!(snapshot.mult_a.iter().all(|&v| ParityRule::MULT_A.holds(v)));
            assert!(snapshot.mult_a.iter().all(|&v| v % 4 == 1));
            assert!(snapshot.mult_b.iter().all(|&v| v % 2 == 1));
            assert!(snapshot.xor_a.iter().all(|&v| v % 2 == 0));
            assert!(snapshot.xor_b.iter().all(|&v| v % 2 == 1));
            assert_eq!(snapshot.width(), size / 8);
            snapshot.validate().unwrap();
        }
    }
}

#[test]
fn one_epoch_on_the_smallest_buffer() {
    let mut device = Device::new(&[0x01], 32).unwrap();
    assert_eq!(device.num_words(), 4);
    let start_xor = device.current().idx_xor;

    let words = device.extract_uint64(4);

    assert_eq!(words.len(), 4);
    assert_eq!(device.current().idx_mult, 0);
    assert_eq!(device.current().idx_xor, (start_xor + 1) % 4);
}

#[test]
fn empty_request_changes_nothing() {
    let mut device = Device::new(b"idle", 64).unwrap();
    let before = device.bank().clone();
    let dump = device.render_state();

    assert!(device.extract_uint64(0).is_empty());
    assert!(device.extract_float64(0).is_empty());
    assert!(device.extract(Request::u64(0)).is_empty());

    assert_eq!(device.bank(), &before);
    assert_eq!(device.render_state(), dump);
}

#[test]
fn floats_consume_the_same_state_as_words() {
    let mut words = Device::new(b"float", 64).unwrap();
    let mut floats = words.clone();

    let raw = words.extract_uint64(25);
    let unit = floats.extract_float64(25);

    assert_eq!(words.current(), floats.current());
    for (word, value) in raw.iter().zip(&unit) {
        assert_eq!(*value, (word & FLOAT_MASK) as f64 * FLOAT_SCALE);
        assert!((0.0..1.0).contains(value));
    }
    assert_eq!(to_unit_f64(raw[0]), unit[0]);
}

#[test]
fn restore_replays_from_the_construction_checkpoint() {
    let mut device = Device::new(b"checkpoint", 128).unwrap();
    let first = device.extract_uint64(40);
    device.extract_uint64(7);

    device.restore();
    assert_eq!(device.extract_uint64(40), first);
}

#[test]
fn explicit_checkpoint_moves_the_restart_point() {
    let mut device = Device::new(b"checkpoint", 64).unwrap();
    device.extract_uint64(13);
    device.checkpoint();
    let after_checkpoint = device.extract_uint64(21);

    device.extract_float64(5);
    device.restore();
    assert_eq!(device.extract_uint64(21), after_checkpoint);

    // restoring twice yields the same stream again
    device.restore();
    assert_eq!(device.extract_uint64(21), after_checkpoint);
}

#[test]
fn previous_snapshot_never_aliases_current() {
    let mut device = Device::new(b"alias", 64).unwrap();
    let checkpoint = device.bank().previous().clone();
    device.extract_uint64(100);
    assert_eq!(device.bank().previous(), &checkpoint);
    assert_ne!(device.current(), &checkpoint);
}

#[test]
fn requests_dispatch_by_kind() {
    let mut device = Device::new(b"dispatch", 64).unwrap();
    let mut twin = device.clone();
    match device.extract("f64:3".parse().unwrap()) {
        Output::F64(values) => assert_eq!(values, twin.extract_float64(3)),
        other => panic!("unexpected output {other:?}"),
    }
    assert_eq!(
        device.extract(Request::u64(2)),
        Output::U64(twin.extract_uint64(2))
    );
}

#[test]
fn rng_core_draws_from_the_same_stream() {
    let mut device = Device::new(b"rand", 64).unwrap();
    let mut twin = device.clone();

    assert_eq!(device.next_u64(), twin.next_uint64());
    assert_eq!(device.next_u32(), twin.next_uint64() as u32);

    let mut bytes = [0u8; 12];
    device.fill_bytes(&mut bytes);
    let expected: Vec<u8> = twin
        .extract_uint64(2)
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .take(12)
        .collect();
    assert_eq!(bytes.to_vec(), expected);

    let roll: u8 = device.gen_range(1..=6);
    assert!((1..=6).contains(&roll));
}

#[test]
fn construction_errors() {
    assert!(matches!(
        Device::new(&[], 128),
        Err(HashmixError::InvalidSeed(_))
    ));
    for size in [0, 16, 100] {
        assert!(matches!(
            Device::new(&[1], size),
            Err(HashmixError::InvalidConfig(_))
        ));
    }
    let config: DeviceConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, DeviceConfig::default());
    assert_eq!(config.buffer_size, 128);
}

#[test]
fn seed_of_exact_buffer_size_is_one_fold() {
    let seed: Vec<u8> = (0..64).map(|i| i as u8 ^ 0x5C).collect();
    let mut padded = seed.clone();
    padded.extend(std::iter::repeat(0xEE).take(64));

    // the second window of a 2N seed is never folded
    let exact = Device::new(&seed, 64).unwrap();
    let doubled = Device::new(&padded, 64).unwrap();
    assert_eq!(exact.current(), doubled.current());

    let shorter = Device::new(&seed[..63], 64).unwrap();
    assert_ne!(exact.current(), shorter.current());
}
