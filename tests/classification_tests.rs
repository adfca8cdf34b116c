use umi_read_splitter::{
    process_record_pair, BoundaryTransformer, Direction, FastqRecord, Layout, LinkerSpec,
    MatchResult, PatternMatcher, ProtocolDefinition, ProtocolRegistry, RestoreSpan, Whitelist,
    UNRECOGNIZED,
};

const LINKER: &str = "ATCCACGTGCTTGAGATCAGCATGCGGCTACG";
const CELL: &str = "AACGTGAT";

fn scope_registry() -> ProtocolRegistry {
    let whitelist = Whitelist::new([CELL], LinkerSpec::from_literals(&[LINKER]));
    let layout = Layout::parse("C8L16C8L16C8U12T18").unwrap();
    let protocol = ProtocolDefinition::new("scope", layout, Some(whitelist)).unwrap();
    ProtocolRegistry::new(vec![protocol]).unwrap()
}

fn scope_r1(cell: &str) -> FastqRecord {
    // 8 + 16 + 8 + 16 + 8 + 12 + 18 = 86 prefix bases, then cDNA
    let seq = format!(
        "{cell}{}{cell}{}{cell}GATTACAGATTA{}CCCCGGGGAAAA",
        &LINKER[..16],
        &LINKER[16..],
        "T".repeat(18)
    );
    let qual: String = (0..seq.len()).map(|i| (b'!' + (i % 40) as u8) as char).collect();
    FastqRecord::new("frag1/1", seq, qual)
}

fn r2() -> FastqRecord {
    FastqRecord::new("frag1/2", "TTGGCCAATTGG", "ABCDEFGHIJKL")
}

#[test]
fn test_split_scope_read_at_86() {
    let registry = scope_registry();
    let matcher = PatternMatcher::new(&registry);
    let transformer = BoundaryTransformer::new(Direction::Split);

    let (orig1, orig2) = (scope_r1(CELL), r2());
    let (mut r1, mut r2) = (orig1.clone(), orig2.clone());
    let result = process_record_pair(&matcher, &transformer, &mut r1, &mut r2);

    assert_eq!(result, MatchResult::Classified { protocol: "scope", cut_point: 86 });
    assert_eq!(r1.sequence, &orig1.sequence[..86]);
    assert_eq!(r1.quality, &orig1.quality[..86]);

    let mut expected_seq = orig1.sequence[86..].to_vec();
    expected_seq.extend_from_slice(&orig2.sequence);
    let mut expected_qual = orig1.quality[86..].to_vec();
    expected_qual.extend_from_slice(&orig2.quality);
    assert_eq!(r2.sequence, expected_seq);
    assert_eq!(r2.quality, expected_qual);
}

#[test]
fn test_unlisted_cell_passes_through_unchanged() {
    let registry = scope_registry();
    let matcher = PatternMatcher::new(&registry);
    let transformer = BoundaryTransformer::new(Direction::Split);

    let (orig1, orig2) = (scope_r1("TTTTTTTT"), r2());
    let (mut r1, mut r2) = (orig1.clone(), orig2.clone());
    let result = process_record_pair(&matcher, &transformer, &mut r1, &mut r2);

    assert_eq!(result.protocol_name(), UNRECOGNIZED);
    assert_eq!(r1, orig1);
    assert_eq!(r2, orig2);
}

#[test]
fn test_restore_undoes_split() {
    let registry = scope_registry();
    let matcher = PatternMatcher::new(&registry);
    let (orig1, orig2) = (scope_r1(CELL), r2());
    let split = BoundaryTransformer::new(Direction::Split);
    let restore = BoundaryTransformer::new(Direction::Restore)
        .with_restore_span(RestoreSpan::ReadLength(orig1.sequence.len()));

    let (mut r1, mut r2) = (orig1.clone(), orig2.clone());
    process_record_pair(&matcher, &split, &mut r1, &mut r2);
    // the split R1 is exactly the prefix, so it classifies the same way again
    let result = process_record_pair(&matcher, &restore, &mut r1, &mut r2);

    assert_eq!(result.cut_point(), Some(86));
    assert_eq!(r1, orig1);
    assert_eq!(r2, orig2);
}

#[test]
fn test_restore_by_cut_point_moves_prefix_from_r2() {
    // R2 that starts with the protocol prefix: its first 86 bases go to R1
    let registry = scope_registry();
    let matcher = PatternMatcher::new(&registry);
    let restore = BoundaryTransformer::new(Direction::Restore);

    let prefixed = scope_r1(CELL);
    let mut r1 = FastqRecord::new("frag1/1", &prefixed.sequence[..86], &prefixed.quality[..86]);
    let mut r2 = prefixed.clone();
    r2.header = b"frag1/2".to_vec();
    let result = process_record_pair(&matcher, &restore, &mut r1, &mut r2);

    assert_eq!(result.cut_point(), Some(86));
    assert_eq!(r1.sequence.len(), 172);
    assert_eq!(&r1.sequence[86..], &prefixed.sequence[..86]);
    assert_eq!(r2.sequence, &prefixed.sequence[86..]);
    assert_eq!(r2.quality, &prefixed.quality[86..]);
}

#[test]
fn test_quality_stays_aligned_after_transform() {
    let registry = ProtocolRegistry::builtin().unwrap();
    let matcher = PatternMatcher::new(&registry);
    for direction in [Direction::Split, Direction::Restore] {
        let transformer = BoundaryTransformer::new(direction);
        let (mut r1, mut r2) = (scope_r1(CELL), r2());
        process_record_pair(&matcher, &transformer, &mut r1, &mut r2);
        assert_eq!(r1.sequence.len(), r1.quality.len());
        assert_eq!(r2.sequence.len(), r2.quality.len());
    }
}

#[test]
fn test_builtin_registry_prefers_earlier_scope_layout() {
    let registry = ProtocolRegistry::builtin().unwrap();
    let result = PatternMatcher::new(&registry).classify(&scope_r1(CELL).sequence);
    assert_eq!(result, MatchResult::Classified { protocol: "scopeV2.0.0", cut_point: 82 });
}

#[test]
fn test_selected_protocol_only() {
    let registry = ProtocolRegistry::builtin().unwrap().select("scopeV2.1.0").unwrap();
    let result = PatternMatcher::new(&registry).classify(&scope_r1(CELL).sequence);
    assert_eq!(result, MatchResult::Classified { protocol: "scopeV2.1.0", cut_point: 86 });

    let registry = ProtocolRegistry::builtin().unwrap().select("bulk_rna").unwrap();
    assert_eq!(PatternMatcher::new(&registry).classify(&scope_r1(CELL).sequence), MatchResult::Unrecognized);
}

#[test]
fn test_builtin_flv_read_with_leading_umi() {
    // U9 C8 L16 C8 L16 C8 with the second flv linker
    let linker = "TCAGCTTCTGACTACGATATGGCTGTCACCGA";
    let seq = format!("NNNNNNNNN{CELL}{}{CELL}{}{CELL}ACGTACGT", &linker[..16], &linker[16..]);
    let registry = ProtocolRegistry::builtin().unwrap();
    let result = PatternMatcher::new(&registry).classify(seq.as_bytes());
    assert_eq!(result, MatchResult::Classified { protocol: "flv", cut_point: 65 });
}

#[test]
fn test_builtin_bulk_vdj_read() {
    let seq = format!("GTGGTATCAACGCAGAGTCTCCAT{}ACGT", "N".repeat(16));
    let registry = ProtocolRegistry::builtin().unwrap();
    let result = PatternMatcher::new(&registry).classify(seq.as_bytes());
    assert_eq!(result, MatchResult::Classified { protocol: "bulk_vdj", cut_point: 40 });
}

fn scope_v221_r1(first: &str, rest: &str) -> Vec<u8> {
    // C8 L16 C8 L16 C8 L1 U12 T18: first L16 window from `first`, the rest from `rest`
    format!(
        "{CELL}{}{CELL}{}{CELL}{}GATTACAGATTA{}ACGTACGT",
        &first[..16],
        &rest[16..32],
        &rest[32..],
        "T".repeat(18)
    )
    .into_bytes()
}

#[test]
fn test_linker_windows_must_come_from_one_literal() {
    let linkers = umi_read_splitter::barcodes::SCOPE_V2_2_LINKERS;
    let registry = ProtocolRegistry::builtin().unwrap().select("scopeV2.2.1").unwrap();
    let matcher = PatternMatcher::new(&registry);

    let consistent = scope_v221_r1(linkers[1], linkers[1]);
    assert_eq!(
        matcher.classify(&consistent),
        MatchResult::Classified { protocol: "scopeV2.2.1", cut_point: 87 }
    );

    let mixed = scope_v221_r1(linkers[0], linkers[1]);
    assert_eq!(matcher.classify(&mixed), MatchResult::Unrecognized);
}
