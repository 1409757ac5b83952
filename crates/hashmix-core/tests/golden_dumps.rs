use hashmix_core::{Device, Request};

fn replay(seed: &[u8], buffer_size: usize, requests: &[Request]) -> String {
    let mut device = Device::new(seed, buffer_size).unwrap();
    let mut text = device.render_state();
    for request in requests {
        text.push_str(&device.extract_and_render(*request));
    }
    text
}

fn assert_lines_match(actual: &str, expected: &str) {
    let actual: Vec<_> = actual.lines().collect();
    let expected: Vec<_> = expected.lines().collect();
    assert_eq!(actual.len(), expected.len(), "line count");
    for (idx, (a, e)) in actual.iter().zip(&expected).enumerate() {
        assert_eq!(a, e, "line {}", idx + 1);
    }
}

#[test]
fn single_byte_seed_default_size() {
    let requests = [
        Request::u64(5),
        Request::f64(3),
        Request::u64(20),
        Request::u64(0),
    ];
    let text = replay(&[0x01], 128, &requests);
    assert_lines_match(&text, include_str!("fixtures/seed01_size128.txt"));
    assert_eq!(text, include_str!("fixtures/seed01_size128.txt"));
}

#[test]
fn long_seed_is_folded_in_windows() {
    let seed: Vec<u8> = (0..200).collect();
    let requests = [Request::u64(9), Request::f64(17)];
    let text = replay(&seed, 64, &requests);
    assert_lines_match(&text, include_str!("fixtures/seed200_size64.txt"));
}

#[test]
fn single_block_buffer_degenerates_to_fixed_parameters() {
    let requests = [Request::u64(4), Request::u64(5)];
    let text = replay(&[0x01], 32, &requests);
    assert_lines_match(&text, include_str!("fixtures/seed01_size32.txt"));

    let device = Device::new(&[0x01], 32).unwrap();
    let snapshot = device.current();
    assert!(snapshot.mult_x.iter().all(|&v| v == 0));
    assert!(snapshot.mult_a.iter().all(|&v| v == 1));
    assert!(snapshot.xor_b.iter().all(|&v| v == 1));
}
