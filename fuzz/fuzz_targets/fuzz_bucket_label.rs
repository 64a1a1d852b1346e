#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use textclass::capability::CapabilityChoice;
use textclass::indexing::{BucketLabel, IndexingService};
use textclass::locale::Locale;
use textclass::transliterate::{Recipe, Transliterator};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    let locale = Locale::new("en", None);
    for tier in [
        CapabilityChoice::NativeHighFidelity,
        CapabilityChoice::NativeBasic,
        CapabilityChoice::Fallback,
    ] {
        let t = Transliterator::with_recipe(Recipe::default(), tier);
        let index = IndexingService::heuristic(&locale, Arc::new(t), 4);

        // Must terminate with a single uppercase letter or the sentinel.
        let label = index.label_for(text);
        if let BucketLabel::Letter(c) = label {
            assert!(c.is_ascii_uppercase(), "{text:?} -> {c:?}");
        }
        if text.is_empty() {
            assert_eq!(label, BucketLabel::Other);
        }
        assert_eq!(index.label_for(text), label, "label must be deterministic");
    }

    // The process-wide service must never panic either.
    let _ = IndexingService::for_locale(&locale).label_for(text);
});
