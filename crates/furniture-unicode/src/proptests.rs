// this_file: crates/furniture-unicode/src/proptests.rs

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn uni_names_decode_to_their_codepoint(ch in any::<char>().prop_filter("BMP", |c| (*c as u32) <= 0xFFFF)) {
        let name = format!("uni{:04X}", ch as u32);
        prop_assert_eq!(decode_glyph_name(&name), Some(ch));
    }

    #[test]
    fn resolved_names_are_upper_case(name in "[a-z]{1,8}(\\.[a-z]{4})?") {
        let resolved = resolve_name(Some(&name), None);
        prop_assert_eq!(resolved.clone(), resolved.to_ascii_uppercase());
    }

    #[test]
    fn classification_never_panics(name in "\\PC{0,32}") {
        let _ = joining_form(&name);
        let _ = is_vowel_mark(&name);
        let _ = is_lam_or_meem(&name);
        let _ = decode_glyph_name(&name);
    }
}
