//! Small OpenMoji-shaped dataset for tests.
//!
//! Covers every display group remap, a skin-tone cluster listed variant-first, the duplicate
//! `white flag` pair, a generic duplicate annotation and glyph-less extras.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::codec::Codec;
use crate::config::CodecConfig;

pub const SAMPLE_JSON: &str = include_str!("../fixtures/openmoji_sample.json");

pub fn sample_catalog() -> Catalog {
    match Catalog::from_json(SAMPLE_JSON) {
        Ok(catalog) => catalog,
        Err(err) => panic!("fixture dataset must parse: {err}"),
    }
}

pub fn sample_codec(config: CodecConfig) -> Codec {
    Codec::new(Arc::new(sample_catalog()), config)
}
