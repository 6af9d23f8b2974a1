#![no_main]

use std::sync::{Arc, OnceLock};

use emoji::fixtures::sample_catalog;
use emoji::{Codec, CodecConfig};
use libfuzzer_sys::fuzz_target;

fn codecs() -> &'static [Codec; 2] {
    static CODECS: OnceLock<[Codec; 2]> = OnceLock::new();
    CODECS.get_or_init(|| {
        let catalog = Arc::new(sample_catalog());
        let glyphs = CodecConfig {
            convert_to_shorthands: false,
            ..CodecConfig::default()
        };
        [
            Codec::new(Arc::clone(&catalog), CodecConfig::default()),
            Codec::new(catalog, glyphs),
        ]
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(fragment) = std::str::from_utf8(data) else {
        return;
    };
    for codec in codecs() {
        let Ok(once) = codec.render_html(fragment) else {
            return;
        };
        let twice = codec.render_html(&once).expect("rendered output converts");
        assert_eq!(once, twice, "conversion is not idempotent for {fragment:?}");
    }
});
