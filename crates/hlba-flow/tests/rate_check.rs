use hlba_core::{HlbaError, Packet};
use hlba_flow::{Admission, BucketState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn pkt(id: u64, size: usize) -> Packet {
    Packet::new(id, vec![0xAB; size])
}

#[test]
fn test_rejects_bad_config() {
    assert_eq!(
        BucketState::new(0, 2, 0).unwrap_err(),
        HlbaError::InvalidArgument("capacity must be positive")
    );
    assert_eq!(
        BucketState::new(2, 0, 0).unwrap_err(),
        HlbaError::InvalidArgument("leak rate must be positive")
    );
}

#[test]
fn test_burst_at_t0_overflows() {
    // Capacity 2, 2 pkt/s, ten 5-byte packets all at t=0.
    let mut bucket = BucketState::new(2, 2, 0).unwrap();

    let outcomes: Vec<Admission> = (0..10)
        .map(|i| bucket.add_packet(pkt(i, 5), 0).outcome)
        .collect();

    let admitted = outcomes.iter().filter(|o| **o == Admission::Admitted).count();
    let dropped = outcomes.iter().filter(|o| **o == Admission::Dropped).count();
    assert_eq!(admitted, 2);
    assert_eq!(dropped, 8);
    assert_eq!(admitted + dropped, 10);

    // First two in, rest out
    assert_eq!(outcomes[0], Admission::Admitted);
    assert_eq!(outcomes[1], Admission::Admitted);
    assert_eq!(bucket.level(), 2);
    assert!(bucket.is_full());
}

#[test]
fn test_leak_after_one_second() {
    let mut bucket = BucketState::new(2, 2, 0).unwrap();
    for i in 0..10 {
        bucket.add_packet(pkt(i, 5), 0);
    }
    assert_eq!(bucket.level(), 2);

    let leaked = bucket.leak(1_000_000);
    assert_eq!(leaked, 2);
    assert_eq!(bucket.level(), 0);
    assert_eq!(bucket.last_leak_us(), 1_000_000);
}

#[test]
fn test_leak_clamps_at_empty() {
    let mut bucket = BucketState::new(4, 2, 0).unwrap();
    bucket.add_packet(pkt(1, 1), 0);

    // 10s worth of leak, one packet queued
    assert_eq!(bucket.leak(10_000_000), 1);
    assert_eq!(bucket.level(), 0);
    assert_eq!(bucket.leak(20_000_000), 0);
}

#[test]
fn test_fifo_release() {
    let mut bucket = BucketState::new(3, 1, 0).unwrap();
    for i in 0..3 {
        bucket.add_packet(pkt(i, 1), 0);
    }
    let out = bucket.release(2_000_000);
    let ids: Vec<u64> = out.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(bucket.queued().next().unwrap().id(), 2);
}

#[test]
fn test_backwards_clock_leaks_nothing() {
    let mut bucket = BucketState::new(2, 1000, 5_000_000).unwrap();
    bucket.add_packet(pkt(1, 1), 5_000_000);
    assert_eq!(bucket.leak(1_000_000), 0);
    assert_eq!(bucket.level(), 1);
    assert_eq!(bucket.last_leak_us(), 1_000_000);
}

#[test]
fn test_full_bucket_still_leaks_before_admit() {
    let mut bucket = BucketState::new(2, 2, 0).unwrap();
    bucket.add_packet(pkt(0, 1), 0);
    bucket.add_packet(pkt(1, 1), 0);
    assert_eq!(bucket.add_packet(pkt(2, 1), 0).outcome, Admission::Dropped);

    // Half a second frees one slot at 2 pkt/s.
    let res = bucket.add_packet(pkt(3, 1), 500_000);
    assert!(res.is_admitted());
    let ids: Vec<u64> = bucket.queued().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_partial_intervals_do_not_accumulate() {
    // 0.3s at 2 pkt/s is 0.6 of a packet, twice over: nothing leaves.
    let mut bucket = BucketState::new(2, 2, 0).unwrap();
    bucket.add_packet(pkt(0, 1), 0);
    bucket.add_packet(pkt(1, 1), 0);

    assert_eq!(bucket.leak(300_000), 0);
    assert_eq!(bucket.leak(600_000), 0);
    assert_eq!(bucket.level(), 2);
}

#[test]
fn test_frequent_admits_stay_dropped() {
    // Polling every 100ms never accrues a whole packet at 2 pkt/s.
    let mut bucket = BucketState::new(2, 2, 0).unwrap();
    bucket.add_packet(pkt(0, 1), 0);
    bucket.add_packet(pkt(1, 1), 0);

    for step in 1..=10u64 {
        let res = bucket.add_packet(pkt(10 + step, 1), step * 100_000);
        assert_eq!(res.outcome, Admission::Dropped, "step {}", step);
    }
    assert_eq!(bucket.level(), 2);
}

#[test]
fn test_short_wait_after_idle_leaks_nothing() {
    let mut bucket = BucketState::new(4, 2, 0).unwrap();
    // Idle 0.4s with nothing queued
    assert_eq!(bucket.leak(400_000), 0);
    bucket.add_packet(pkt(0, 1), 400_000);
    // 0.2s at 2 pkt/s is 0.4 of a packet: nothing leaves.
    assert_eq!(bucket.leak(600_000), 0);
    assert_eq!(bucket.level(), 1);
}

#[test]
fn test_drop_does_not_mutate() {
    let mut bucket = BucketState::new(1, 1, 0).unwrap();
    bucket.add_packet(pkt(0, 3), 0);
    let res = bucket.add_packet(pkt(1, 3), 0);
    assert_eq!(res.outcome, Admission::Dropped);
    assert_eq!(res.packet.id(), 1);
    assert_eq!(bucket.level(), 1);
    assert_eq!(bucket.queued().next().unwrap().id(), 0);
}

#[test]
fn test_invariants_under_random_traffic() {
    let mut rng = ChaCha20Rng::seed_from_u64(13);
    let mut bucket = BucketState::new(7, 3, 0).unwrap();
    let mut now = 0u64;

    for id in 0..5_000u64 {
        now += rng.gen_range(0..400_000);
        if rng.gen_bool(0.2) {
            bucket.leak(now);
        } else {
            bucket.add_packet(pkt(id, rng.gen_range(0..64)), now);
        }
        assert!(bucket.level() <= bucket.capacity());
        assert_eq!(bucket.queued().count(), bucket.level());
    }
}
