#![no_main]

use libfuzzer_sys::fuzz_target;
use mimesniff::sniff;

fuzz_target!(|data: &[u8]| {
    let mime = sniff::guess(data);
    assert!(!mime.type_().is_empty());
    assert!(!mime.subtype().is_empty());

    // only the leading bytes decide the match
    if data.len() > sniff::SNIFF_LEN {
        assert_eq!(sniff::guess(&data[..sniff::SNIFF_LEN]), mime);
    }
});
