#![no_main]
use libfuzzer_sys::fuzz_target;
use vpc_inspector::Cidr;

// Parsing must never panic, and anything accepted must print back canonically
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(block) = text.parse::<Cidr>() {
        let printed = block.to_string();
        let reparsed: Cidr = printed.parse().unwrap();
        assert_eq!(reparsed, block);
        assert_eq!(u64::from(block.first()) % block.size(), 0);
    }
});
