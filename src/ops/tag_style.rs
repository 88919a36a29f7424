/// One entry in the fixed tag palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStyle {
    pub name: &'static str,
    /// Badge text / outline color
    pub fg: (u8, u8, u8),
    /// Fill color for a selected chip
    pub solid: (u8, u8, u8),
}

/// Fixed, ordered palette. Styles are assigned by hashing the tag string,
/// never by a stored mapping, so a tag keeps its color across sessions
/// and machines.
pub const TAG_PALETTE: [TagStyle; 10] = [
    TagStyle { name: "red", fg: (0xF8, 0x71, 0x71), solid: (0xDC, 0x26, 0x26) },
    TagStyle { name: "orange", fg: (0xFB, 0x92, 0x3C), solid: (0xF9, 0x73, 0x16) },
    TagStyle { name: "amber", fg: (0xFB, 0xBF, 0x24), solid: (0xF5, 0x9E, 0x0B) },
    TagStyle { name: "green", fg: (0x34, 0xD3, 0x99), solid: (0x05, 0x96, 0x69) },
    TagStyle { name: "cyan", fg: (0x22, 0xD3, 0xEE), solid: (0x08, 0x91, 0xB2) },
    TagStyle { name: "blue", fg: (0x60, 0xA5, 0xFA), solid: (0x25, 0x63, 0xEB) },
    TagStyle { name: "indigo", fg: (0x81, 0x8C, 0xF8), solid: (0x4F, 0x46, 0xE5) },
    TagStyle { name: "violet", fg: (0xA7, 0x8B, 0xFA), solid: (0x7C, 0x3A, 0xED) },
    TagStyle { name: "fuchsia", fg: (0xE8, 0x79, 0xF9), solid: (0xC0, 0x26, 0xD3) },
    TagStyle { name: "rose", fg: (0xFB, 0x71, 0x85), solid: (0xE1, 0x1D, 0x48) },
];

/// 32-bit avalanche hash over the tag's UTF-16 code units: per unit,
/// XOR into the accumulator, multiply by an odd constant, XOR-shift right
/// by 15; one more multiply and XOR-shift to finish. not cryptographic;
/// it only has to spread nearby strings across a palette of 10.
pub fn tag_hash(tag: &str) -> u32 {
    let mut hash: u32 = 0;
    for unit in tag.encode_utf16() {
        hash = (hash ^ u32::from(unit)).wrapping_mul(0x5bd1_e995);
        hash ^= hash >> 15;
    }
    hash = hash.wrapping_mul(0x5bd1_e995);
    hash ^= hash >> 15;
    hash
}

/// The palette entry for a tag. Total and deterministic; the empty string
/// takes the all-zero hash path and lands on a fixed entry.
pub fn tag_style(tag: &str) -> &'static TagStyle {
    &TAG_PALETTE[tag_hash(tag) as usize % TAG_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tag_same_style() {
        for tag in ["design", "dev", "PAS", "web", "rust", ""] {
            assert_eq!(tag_style(tag), tag_style(tag));
        }
    }

    #[test]
    fn style_index_always_in_palette() {
        let long = "x".repeat(300);
        for tag in ["a", "ab", "abc", "你好", "🎉", "HTTP/2", long.as_str()] {
            let idx = tag_hash(tag) as usize % TAG_PALETTE.len();
            assert!(idx < TAG_PALETTE.len());
            assert_eq!(tag_style(tag).name, TAG_PALETTE[idx].name);
        }
    }

    #[test]
    fn empty_tag_is_stable_not_an_error() {
        assert_eq!(tag_hash(""), 0);
        assert_eq!(tag_style(""), &TAG_PALETTE[0]);
    }

    #[test]
    fn case_matters() {
        // No case normalization anywhere: "Web" and "web" may differ.
        assert_ne!(tag_hash("Web"), tag_hash("web"));
    }

    #[test]
    fn nearby_strings_spread_out() {
        // Not a distribution proof, just a regression guard against a
        // degenerate hash: a handful of short real-world tags should not
        // all collapse onto one entry.
        let tags = ["design", "dev", "editor", "web", "cli", "db", "ai", "infra"];
        let mut seen = std::collections::HashSet::new();
        for tag in tags {
            seen.insert(tag_style(tag).name);
        }
        assert!(seen.len() > 3, "palette collapse: {seen:?}");
    }
}
