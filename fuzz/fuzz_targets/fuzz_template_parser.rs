#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Whatever parses must be well-formed and survive formatting
    if let Ok(template) = colloc::precompute::parse_template(data) {
        assert!(colloc::precompute::template_arity(&template).is_ok());
        let text = colloc::precompute::format_template(&template);
        assert_eq!(colloc::precompute::parse_template(&text).unwrap(), template);
    }
});
