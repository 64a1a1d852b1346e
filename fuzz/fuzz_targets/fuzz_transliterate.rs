#![no_main]

use libfuzzer_sys::fuzz_target;
use textclass::capability::CapabilityChoice;
use textclass::transliterate::{Recipe, Transliterator};

fuzz_target!(|data: &[u8]| {
    // First line is the recipe id, the rest is the input text.
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if raw.len() > 4096 {
        return;
    }
    let (id, text) = raw.split_once('\n').unwrap_or(("", raw));

    // Arbitrary recipe ids either parse or are rejected; never panic.
    if let Ok(recipe) = Recipe::parse(id) {
        let t = Transliterator::with_recipe(recipe, CapabilityChoice::Fallback);
        let _ = t.transliterate(text);
    }

    for tier in [
        CapabilityChoice::NativeHighFidelity,
        CapabilityChoice::NativeBasic,
        CapabilityChoice::Fallback,
    ] {
        let t = Transliterator::with_recipe(Recipe::default(), tier);
        let out = t.transliterate(text);
        assert!(
            out.chars().all(|c| c == ' ' || c.is_ascii_digit() || c.is_ascii_lowercase()),
            "default recipe must emit [ 0-9a-z]: {text:?} -> {out:?}"
        );
        assert_eq!(t.transliterate(&out), out, "output must be a fixed point");
    }
});
