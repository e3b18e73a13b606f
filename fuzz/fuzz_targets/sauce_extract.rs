#![no_main]
use ansiview::extract;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (body, sauce) = extract(data);
    match sauce {
        Some(record) => {
            assert_eq!(body.len() + record.record_len(), data.len());
            let _ = record.comment_lines().count();
            let _ = record.character_capabilities();
        }
        None => assert_eq!(body.len(), data.len()),
    }
});
