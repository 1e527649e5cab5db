use hlba_cipher::{decrypt, encrypt, transform, transform_in_place, Obfuscator};
use hlba_core::{HlbaError, Packet};
use hlba_math::CombinatorialTable;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn test_round_trip() {
    let row = [1u64, 4, 6, 4, 1];
    let payload = b"Attack at Dawn".to_vec();

    let scrambled = encrypt(&payload, &row).unwrap();
    assert_ne!(scrambled, payload);

    let restored = decrypt(&scrambled, &row).unwrap();
    assert_eq!(restored, payload);
}

#[test]
fn test_known_vector() {
    // Keystream wraps: 1, 2, 1, 1, 2
    let out = transform(&[0x00, 0x00, 0x00, 0x00, 0x00], &[1, 2, 1]).unwrap();
    assert_eq!(out, vec![1, 2, 1, 1, 2]);
}

#[test]
fn test_uses_low_byte_of_coefficient() {
    // C(10,5) = 252 = 0xFC; 0x1FC keeps the same low byte
    let a = transform(&[0xFF], &[0xFC]).unwrap();
    let b = transform(&[0xFF], &[0x1FC]).unwrap();
    assert_eq!(a, vec![0x03]);
    assert_eq!(a, b);
}

#[test]
fn test_short_payloads_are_not_special() {
    // Payloads of ten bytes or fewer take the same path as longer ones.
    let row = [3u64, 7];
    for len in 0..=12 {
        let p: Vec<u8> = (0..len as u8).collect();
        let c = transform(&p, &row).unwrap();
        if len > 0 {
            assert_ne!(c, p, "len {} left unchanged", len);
        }
        assert_eq!(transform(&c, &row).unwrap(), p);
    }
}

#[test]
fn test_empty_row_rejected() {
    assert_eq!(
        transform(b"abc", &[]),
        Err(HlbaError::InvalidArgument("obfuscation row must be non-empty"))
    );
    let mut buf = [1u8, 2, 3];
    assert!(transform_in_place(&mut buf, &[]).is_err());
    // Untouched on failure
    assert_eq!(buf, [1, 2, 3]);
}

#[test]
fn test_empty_payload() {
    assert_eq!(transform(&[], &[1]).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_self_inverse_sweep() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x4842_4C41);
    let table = CombinatorialTable::generate(64).unwrap();

    for _ in 0..256 {
        let len = rng.gen_range(0..512);
        let mut payload = vec![0u8; len];
        rng.fill_bytes(&mut payload);
        let row = table.row(rng.gen_range(0..table.len())).unwrap();

        let once = transform(&payload, row).unwrap();
        assert_eq!(transform(&once, row).unwrap(), payload);
    }
}

#[test]
fn test_obfuscator_packet_round_trip() {
    let obf = Obfuscator::with_rows(5).unwrap();
    let packet = Packet::new(9, b"the quick brown fox".to_vec());

    // 19 % 5 = 4
    assert_eq!(obf.row_for(&packet), &[1, 4, 6, 4, 1]);

    let hidden = obf.obfuscate(&packet).unwrap();
    assert_eq!(hidden.id(), 9);
    assert_eq!(hidden.size(), packet.size());
    assert_ne!(hidden.payload(), packet.payload());

    assert_eq!(obf.reveal(&hidden).unwrap(), packet);
}

#[test]
fn test_obfuscator_rejects_zero_rows() {
    assert!(Obfuscator::with_rows(0).is_err());
}
