// matcher.rs - 根据 R1 前缀识别 protocol

use crate::layout::SegmentKind;
use crate::protocol::{ProtocolDefinition, ProtocolRegistry};

/// Label reported for read pairs that match no protocol.
pub const UNRECOGNIZED: &str = "unrecognized";

/// Outcome of classifying one R1 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'r> {
    Classified { protocol: &'r str, cut_point: usize },
    Unrecognized,
}

impl<'r> MatchResult<'r> {
    pub fn protocol_name(&self) -> &'r str {
        match self {
            MatchResult::Classified { protocol, .. } => *protocol,
            MatchResult::Unrecognized => UNRECOGNIZED,
        }
    }

    pub fn cut_point(&self) -> Option<usize> {
        match self {
            MatchResult::Classified { cut_point, .. } => Some(*cut_point),
            MatchResult::Unrecognized => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, MatchResult::Classified { .. })
    }
}

/// First-match-wins classifier over a protocol registry.
///
/// Protocols are tried in registry order. A protocol matches when every cell
/// barcode slot holds a whitelisted barcode and every linker slot holds the
/// expected linker bases. UMI and poly-T slots are not inspected. There is no
/// scoring and no backtracking: the first protocol that validates wins.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'r> {
    registry: &'r ProtocolRegistry,
}

impl<'r> PatternMatcher<'r> {
    pub fn new(registry: &'r ProtocolRegistry) -> Self {
        PatternMatcher { registry }
    }

    pub fn classify(&self, sequence: &[u8]) -> MatchResult<'r> {
        self.registry
            .all_in_priority_order()
            .iter()
            .find(|protocol| matches_protocol(protocol, sequence))
            .map_or(MatchResult::Unrecognized, |protocol| MatchResult::Classified {
                protocol: protocol.name(),
                cut_point: protocol.cut_point(),
            })
    }
}

/// Check one protocol against a sequence.
///
/// A read shorter than the layout's prefix is rejected outright, so every
/// slice below is in range.
pub fn matches_protocol(protocol: &ProtocolDefinition, sequence: &[u8]) -> bool {
    let Some(whitelist) = protocol.whitelist() else {
        return false;
    };
    if sequence.len() < protocol.cut_point() {
        return false;
    }

    let literals = whitelist.linker().literals();
    if literals.is_empty() {
        return walk_layout(protocol, sequence, None);
    }
    // one member must cover every linker slot; windows from different
    // members never combine
    literals.iter().any(|literal| walk_layout(protocol, sequence, Some(literal.as_slice())))
}

fn walk_layout(protocol: &ProtocolDefinition, sequence: &[u8], linker: Option<&[u8]>) -> bool {
    let Some(whitelist) = protocol.whitelist() else {
        return false;
    };

    let mut cursor = 0;
    let mut linker_offset = 0;
    for segment in protocol.layout().segments() {
        let end = cursor + segment.length;
        match segment.kind {
            SegmentKind::CellBarcode => {
                let Some(slot) = sequence.get(cursor..end) else {
                    return false;
                };
                if !whitelist.contains_barcode(slot) {
                    return false;
                }
            }
            SegmentKind::Linker => {
                if let Some(literal) = linker {
                    let expected = literal.get(linker_offset..linker_offset + segment.length);
                    if expected.is_none() || sequence.get(cursor..end) != expected {
                        return false;
                    }
                }
                linker_offset += segment.length;
            }
            SegmentKind::Umi | SegmentKind::PolyT => {}
        }
        cursor = end;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::protocol::{LinkerSpec, Whitelist};

    const SCOPE_LINKER: &str = "ATCCACGTGCTTGAGATCAGCATGCGGCTACG";

    fn registry(entries: Vec<(&str, &str, Option<(Vec<&str>, Vec<&str>)>)>) -> ProtocolRegistry {
        let protocols = entries
            .into_iter()
            .map(|(name, pattern, wl)| {
                let whitelist =
                    wl.map(|(bcs, linkers)| Whitelist::new(bcs, LinkerSpec::from_literals(&linkers)));
                ProtocolDefinition::new(name, Layout::parse(pattern).unwrap(), whitelist).unwrap()
            })
            .collect();
        ProtocolRegistry::new(protocols).unwrap()
    }

    fn scope_read(cell: &str, umi: &str) -> Vec<u8> {
        format!(
            "{cell}{}{cell}{}{cell}{umi}{}ACGTACGTACGT",
            &SCOPE_LINKER[..16],
            &SCOPE_LINKER[16..],
            "T".repeat(18)
        )
        .into_bytes()
    }

    #[test]
    fn test_classify_scope_layout() {
        let reg = registry(vec![(
            "scope",
            "C8L16C8L16C8U12T18",
            Some((vec!["AACGTGAT"], vec![SCOPE_LINKER])),
        )]);
        let matcher = PatternMatcher::new(&reg);
        let result = matcher.classify(&scope_read("AACGTGAT", "GATTACAGATTA"));
        assert_eq!(result, MatchResult::Classified { protocol: "scope", cut_point: 86 });
        assert_eq!(result.protocol_name(), "scope");
        assert_eq!(result.cut_point(), Some(86));
    }

    #[test]
    fn test_cell_not_in_whitelist_is_unrecognized() {
        let reg = registry(vec![(
            "scope",
            "C8L16C8L16C8U12T18",
            Some((vec!["AACGTGAT"], vec![SCOPE_LINKER])),
        )]);
        let result = PatternMatcher::new(&reg).classify(&scope_read("TTTTTTTT", "GATTACAGATTA"));
        assert_eq!(result, MatchResult::Unrecognized);
        assert_eq!(result.protocol_name(), UNRECOGNIZED);
        assert_eq!(result.cut_point(), None);
    }

    #[test]
    fn test_linker_mismatch_rejects() {
        let reg = registry(vec![("p", "C4L4U2", Some((vec!["ACGT"], vec!["GGGG"])))]);
        let matcher = PatternMatcher::new(&reg);
        assert!(matcher.classify(b"ACGTGGGGNN").is_classified());
        assert!(!matcher.classify(b"ACGTGGGANN").is_classified());
    }

    #[test]
    fn test_linker_windows_follow_layout_order() {
        // two linker slots share one 6-base literal: first 4 bases, then 2
        let reg = registry(vec![("p", "C2L4C2L2", Some((vec!["AC"], vec!["GGGGTT"])))]);
        let matcher = PatternMatcher::new(&reg);
        assert!(matcher.classify(b"ACGGGGACTT").is_classified());
        assert!(!matcher.classify(b"ACGGGGACGG").is_classified());
    }

    #[test]
    fn test_linker_set_needs_one_consistent_member() {
        let reg = registry(vec![("p", "L2C2L2", Some((vec!["AC"], vec!["GGTT", "CCAA"])))]);
        let matcher = PatternMatcher::new(&reg);
        assert!(matcher.classify(b"GGACTT").is_classified());
        assert!(matcher.classify(b"CCACAA").is_classified());
        // first window from one literal, second from the other
        assert!(!matcher.classify(b"GGACAA").is_classified());
    }

    #[test]
    fn test_absent_linker_skips_bases() {
        let reg = registry(vec![("p", "C4L3C4", Some((vec!["ACGT"], vec![])))]);
        let matcher = PatternMatcher::new(&reg);
        assert!(matcher.classify(b"ACGTNNNACGT").is_classified());
        // the skipped bases still move the cursor
        assert!(!matcher.classify(b"ACGTACGTNNN").is_classified());
    }

    #[test]
    fn test_umi_first_layout() {
        let reg = registry(vec![("flv", "U3C4", Some((vec!["ACGT"], vec![])))]);
        let matcher = PatternMatcher::new(&reg);
        assert!(matcher.classify(b"NNNACGT").is_classified());
        assert!(!matcher.classify(b"ACGTNNN").is_classified());
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        let wl = || Some((vec!["ACGT"], vec![]));
        let reg = registry(vec![("first", "C4U2", wl()), ("second", "C4U6", wl())]);
        let result = PatternMatcher::new(&reg).classify(b"ACGTAAAAAAAA");
        assert_eq!(result.protocol_name(), "first");

        let reg = registry(vec![("second", "C4U6", wl()), ("first", "C4U2", wl())]);
        let result = PatternMatcher::new(&reg).classify(b"ACGTAAAAAAAA");
        assert_eq!(result.protocol_name(), "second");
    }

    #[test]
    fn test_rejected_protocol_falls_through_to_next() {
        let reg = registry(vec![
            ("a", "C4U2", Some((vec!["AAAA"], vec![]))),
            ("b", "C4U2", Some((vec!["ACGT"], vec![]))),
        ]);
        assert_eq!(PatternMatcher::new(&reg).classify(b"ACGTNN").protocol_name(), "b");
    }

    #[test]
    fn test_short_input_is_rejected() {
        let reg = registry(vec![("p", "C4U4", Some((vec!["ACGT"], vec![])))]);
        let matcher = PatternMatcher::new(&reg);
        assert_eq!(matcher.classify(b""), MatchResult::Unrecognized);
        assert_eq!(matcher.classify(b"AC"), MatchResult::Unrecognized);
        // barcode fits but the UMI does not
        assert_eq!(matcher.classify(b"ACGTNN"), MatchResult::Unrecognized);
    }

    #[test]
    fn test_protocol_without_whitelist_never_matches() {
        let reg = registry(vec![("bare", "C4", None)]);
        assert_eq!(PatternMatcher::new(&reg).classify(b"ACGT"), MatchResult::Unrecognized);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let reg = ProtocolRegistry::builtin().unwrap();
        let matcher = PatternMatcher::new(&reg);
        let read = scope_read("AACGTGAT", "GATTACAGATTA");
        let first = matcher.classify(&read);
        for _ in 0..10 {
            assert_eq!(matcher.classify(&read), first);
        }
    }

    #[test]
    fn test_builtin_scope_v2_read_resolves_to_earliest_layout() {
        // scopeV2.0.0 and scopeV2.1.0 share cells and linkers; 2.0.0 is registered first
        let reg = ProtocolRegistry::builtin().unwrap();
        let result = PatternMatcher::new(&reg).classify(&scope_read("AACGTGAT", "GATTACAGATTA"));
        assert_eq!(result, MatchResult::Classified { protocol: "scopeV2.0.0", cut_point: 82 });
    }

    #[test]
    fn test_builtin_bulk_rna_and_5p3p() {
        let reg = ProtocolRegistry::builtin().unwrap();
        let matcher = PatternMatcher::new(&reg);

        let bulk = b"AACGGACCTNNNNNNNNNNNNACGTACGT";
        assert_eq!(matcher.classify(bulk).protocol_name(), "bulk_rna");

        // first barcode outside the bulk list but inside the 5'/3' list
        let five_three = b"TTGGTGACCAACGGACCTAGGACTCACNNNNNNNNACGT";
        assert_eq!(
            matcher.classify(five_three),
            MatchResult::Classified { protocol: "scope_5p3p", cut_point: 35 }
        );
    }

    #[test]
    fn test_builtin_short_read_is_unrecognized() {
        let reg = ProtocolRegistry::builtin().unwrap();
        let shortest = reg.all_in_priority_order().iter().map(|p| p.cut_point()).min().unwrap();
        let read = vec![b'A'; shortest - 1];
        assert_eq!(PatternMatcher::new(&reg).classify(&read), MatchResult::Unrecognized);
    }
}
