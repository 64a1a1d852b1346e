#![no_main]

use std::cmp::Ordering;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textclass::capability::CapabilityChoice;
use textclass::locale::Locale;
use textclass::ordering::OrderingService;

#[derive(Arbitrary, Debug)]
struct SortInput {
    tier: u8,
    language: u8,
    words: Vec<String>,
}

const LANGUAGES: [&str; 6] = ["en", "de", "sv", "pl", "tr", "ja"];

fuzz_target!(|input: SortInput| {
    if input.words.len() > 256 {
        return;
    }
    let tier = match input.tier % 3 {
        0 => CapabilityChoice::NativeHighFidelity,
        1 => CapabilityChoice::NativeBasic,
        _ => CapabilityChoice::Fallback,
    };
    let language = LANGUAGES[usize::from(input.language) % LANGUAGES.len()];
    let ordering = OrderingService::with_choice(&Locale::new(language, None), tier);

    let tagged: Vec<(&str, usize)> = input
        .words
        .iter()
        .enumerate()
        .map(|(i, w)| (w.as_str(), i))
        .collect();
    let sorted = ordering.sort_by(tagged.clone(), |item| item.0);
    assert_eq!(sorted.len(), tagged.len());

    // Sorted, and stable among equal keys.
    for pair in sorted.windows(2) {
        let order = ordering.compare(pair[0].0, pair[1].0);
        assert_ne!(order, Ordering::Greater, "{pair:?}");
        if order == Ordering::Equal {
            assert!(pair[0].1 < pair[1].1, "stability violated: {pair:?}");
        }
    }
});
