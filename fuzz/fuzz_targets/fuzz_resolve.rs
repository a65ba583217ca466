#![no_main]

use libfuzzer_sys::fuzz_target;
use mimesniff::{MimeType, extension_of};

fuzz_target!(|input: &str| {
    let by_path = MimeType::from_path(input);
    assert_eq!(by_path, MimeType::from_extension(extension_of(input)));

    let by_essence = MimeType::from_essence(input, None);
    if let Some(ext) = by_essence.extension() {
        assert!(by_essence.extensions().contains(&ext));
    }
    let _ = MimeType::from_url(input);
    let _ = input.parse::<MimeType>();
});
