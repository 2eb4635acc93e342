#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either fail to decode or yield an index that
    // survives another encode/decode cycle
    if let Ok(precomputation) = colloc::Precomputation::decode(data) {
        let encoded = precomputation.encode();
        assert_eq!(colloc::Precomputation::decode(&encoded).unwrap(), precomputation);
    }
});
