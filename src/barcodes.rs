// barcodes.rs - 内置 protocol 数据表
//
// Layout strings and whitelists for the library-preparation protocols known
// at compile time. These are plain data; `protocol::ProtocolRegistry::builtin`
// assembles them into validated definitions at start-up.

/// Protocol layouts in priority order. `None` marks the `auto` pseudo-entry
/// which has no fixed layout and never takes part in matching.
pub const LAYOUTS: &[(&str, Option<&str>)] = &[
    ("auto", None),
    ("scopeV1", Some("C12U8T18")),
    ("scopeV2.0.0", Some("C8L16C8L16C8U8T18")),
    ("scopeV2.0.1", Some("C8L16C8L16C8L1U8T18")),
    ("scopeV2.1.0", Some("C8L16C8L16C8U12T18")),
    ("scopeV2.1.1", Some("C8L16C8L16C8L1U12T18")),
    ("scopeV2.2.1", Some("C8L16C8L16C8L1U12T18")),
    ("scopeV3.0.1", Some("C9L16C9L16C9L1U12T18")),
    ("flv_rna", Some("C8L16C8L16C8U9L6")),
    ("flv", Some("U9C8L16C8L16C8")),
    ("bulk_vdj", Some("L18C6U16")),
    ("bulk_rna", Some("C9U12")),
    ("scope_5p3p", Some("C9C9C9U8")),
];

/// Whitelist rows: (protocol, accepted cell barcodes, accepted linker literals).
///
/// A linker literal spans every linker segment of its layout, concatenated in
/// layout order. An empty literal list means linker segments are not checked.
/// `scopeV1` has no row and can never be matched.
pub const WHITELISTS: &[(&str, &[&str], &[&str])] = &[
    ("scopeV2.0.0", &SCOPE_V2_BARCODES, &[SCOPE_V2_LINKER]),
    ("scopeV2.0.1", &SCOPE_V2_BARCODES, &[SCOPE_V2_LINKER_C]),
    ("scopeV2.1.0", &SCOPE_V2_BARCODES, &[SCOPE_V2_LINKER]),
    ("scopeV2.1.1", &SCOPE_V2_BARCODES, &[SCOPE_V2_LINKER_C]),
    ("scopeV2.2.1", &SCOPE_V2_BARCODES, &SCOPE_V2_2_LINKERS),
    ("scopeV3.0.1", SCOPE_V3_BARCODES, &SCOPE_V2_2_LINKERS),
    ("flv_rna", &SCOPE_V2_BARCODES, &FLV_RNA_LINKERS),
    ("flv", &SCOPE_V2_BARCODES, &FLV_LINKERS),
    ("bulk_vdj", &BULK_VDJ_BARCODES, &[BULK_VDJ_LINKER]),
    ("bulk_rna", &BULK_RNA_BARCODES, &[]),
    ("scope_5p3p", &SCOPE_5P3P_BARCODES, &[]),
];

pub const SCOPE_V2_LINKER: &str = "ATCCACGTGCTTGAGATCAGCATGCGGCTACG";
pub const SCOPE_V2_LINKER_C: &str = "ATCCACGTGCTTGAGATCAGCATGCGGCTACGC";

pub const SCOPE_V2_2_LINKERS: [&str; 4] = [
    "ATCCACGTGCTTGAGATCAGCATGCGGCTACGC",
    "TCGGTGACAGCCATATCGTAGTCAGAAGCTGAC",
    "CGAACATGTAGGTCTCGACTACGTATTAGCATC",
    "GATTGTCACTAACGCGATGCTGACTCCTAGTCC",
];

pub const FLV_RNA_LINKERS: [&str; 4] = [
    "ATCCACGTGCTTGAGATCAGCATGCGGCTACGCTGTCT",
    "TCGGTGACAGCCATATCGTAGTCAGAAGCTGACTGTCT",
    "CGAACATGTAGGTCTCGACTACGTATTAGCATCTGTCT",
    "GATTGTCACTAACGCGATGCTGACTCCTAGTCCTGTCT",
];

pub const FLV_LINKERS: [&str; 4] = [
    "CGTAGCCGCATGCTGATCTCAAGCACGTGGAT",
    "TCAGCTTCTGACTACGATATGGCTGTCACCGA",
    "ATGCTAATACGTAGTCGAGACCTACATGTTCG",
    "GACTAGGAGTCAGCATCGCGTTAGTGACAATC",
];

pub const BULK_VDJ_LINKER: &str = "GTGGTATCAACGCAGAGT";

pub const SCOPE_V2_BARCODES: [&str; 96] = [
    "AACGTGAT", "AAACATCG", "ATGCCTAA", "AGTGGTCA", "ACCACTGT", "ACATTGGC", "CAGATCTG", "CATCAAGT",
    "CGCTGATC", "ACAAGCTA", "CTGTAGCC", "AGTACAAG", "AACAACCA", "AACCGAGA", "AACGCTTA", "AAGACGGA",
    "AAGGTACA", "ACACAGAA", "ACAGCAGA", "ACCTCCAA", "ACGCTCGA", "ACGTATCA", "ACTATGCA", "AGAGTCAA",
    "AGATCGCA", "AGCAGGAA", "AGTCACTA", "ATCCTGTA", "ATTGAGGA", "CAACCACA", "GACTAGTA", "CAATGGAA",
    "CACTTCGA", "CAGCGTTA", "CATACCAA", "CCAGTTCA", "CCGAAGTA", "CCGTGAGA", "CCTCCTGA", "CGAACTTA",
    "CGACTGGA", "CGCATACA", "CTCAATGA", "CTGAGCCA", "CTGGCATA", "GAATCTGA", "CAAGACTA", "GAGCTGAA",
    "GATAGACA", "GCCACATA", "GCGAGTAA", "GCTAACGA", "GCTCGGTA", "GGAGAACA", "GGTGCGAA", "GTACGCAA",
    "GTCGTAGA", "GTCTGTCA", "GTGTTCTA", "TAGGATGA", "TATCAGCA", "TCCGTCTA", "TCTTCACA", "TGAAGAGA",
    "TGGAACAA", "TGGCTTCA", "TGGTGGTA", "TTCACGCA", "AACTCACC", "AAGAGATC", "AAGGACAC", "AATCCGTC",
    "AATGTTGC", "ACACGACC", "ACAGATTC", "AGATGTAC", "AGCACCTC", "AGCCATGC", "AGGCTAAC", "ATAGCGAC",
    "ATCATTCC", "ATTGGCTC", "CAAGGAGC", "CACCTTAC", "CCATCCTC", "CCGACAAC", "CCTAATCC", "CCTCTATC",
    "CGACACAC", "CGGATTGC", "CTAAGGTC", "GAACAGGC", "GACAGTGC", "GAGTTAGC", "GATGAATC", "GCCAAGAC",
];

pub const BULK_VDJ_BARCODES: [&str; 96] = [
    "CTCCAT", "ATCCTC", "ACGTCT", "TGCGAA", "TTCTCG", "CTGCTA", "CATGAT", "TCAACT", "AGTCCT", "GTTGAG",
    "TAGCTG", "TCGCCA", "GAACTC", "TATGGT", "CGCAAC", "TGGCAG", "ATGCAT", "GACTAT", "GTGATT", "CTCTTG",
    "AAGCGT", "CCAACA", "GTTGGT", "TCTAGT", "TATGTG", "TGTGGC", "GACCTG", "TTCCGT", "AAGGCA", "TAGGAT",
    "AACTCC", "TCGATG", "CTGCGT", "GTCGGA", "TCACAT", "ATAGGT", "CGTAAT", "GCATGT", "AACTGA", "GCACAA",
    "GCCATC", "CAACCG", "GTCTGG", "TCCATT", "CAGACC", "ACGGAG", "ACATCA", "TATCCG", "GGAGAG", "CCAATG",
    "TTCTGA", "GTGACG", "ATGGTG", "ACTTGT", "ATAGAC", "CCTATA", "TTAAGG", "GATCAC", "TAGCCT", "AGCGCT",
    "AGACGC", "CTAAGA", "TATCGA", "CGCACA", "CAAGTT", "GAACCA", "TACACA", "CATTGG", "TCATGC", "AGGTTA",
    "TCGAAT", "TCTTGG", "CTCTAC", "GAGGTC", "ACAACG", "CAGATA", "CAGGTA", "TCTTAC", "CCTGTG", "TCGAGC",
    "CTGAAT", "ATTGGC", "CATCTT", "TCTCTA", "GCGTCA", "GTTCAT", "AATCAG", "CGGTGT", "TCCGTC", "CTCACC",
    "TTGACT", "GCCGTA", "CGACTC", "ATCCAA", "TGCCAT", "ACGATA",
];

pub const BULK_RNA_BARCODES: [&str; 96] = [
    "AACGGACCT", "AGGACTCAC", "ACTGCCTAG", "GAACGCTAT", "GACTGGTTG", "CAGGACTTC", "TCGGTTCGT", "GTCTTGCGT",
    "TATCTCCGA", "CGCAACTAC", "CACTTCAGA", "GCTCTCACT", "ACGAAGCTC", "GTGTTAAGG", "GGCTCTCTA", "GCGTAGTAA",
    "AGCTCCTTG", "CACATTCAC", "TCCGTATCA", "CACCTGTAA", "ATGGTCTCA", "TGCATCAAG", "CGCCAATGA", "TCGACTGTC",
    "TGTGGACAC", "ACATCGGAC", "GCTTGAGGT", "GCCGTTATT", "AACACCGTT", "CCTAGTCTT", "AACACACAG", "CAACATCGG",
    "TACCTCTCC", "CCAATGTCT", "CGAGATAGT", "AGTTCAGAG", "ATCGACACG", "GACCTTAGC", "TAACCTACC", "TGGAGAACC",
    "GATGTTACG", "TGGCATGAG", "CTGGTACTT", "GCGAGTAAC", "GATCCATGC", "GGCTTCTCA", "CGTTAGCGT", "ACACAGGCT",
    "AACTGGCGA", "AGACGTTCA", "TGCGGTTCT", "CAGTCTTCG", "AGCTGAGTC", "GTGCATATC", "GATGGCTCA", "TGAGCGAAG",
    "CTTGACGTT", "GTTACTGGT", "GAGCAGCTT", "GTTGGAGTG", "TGCCTGATC", "GCAGATGTG", "CAGAGTACA", "TGTAGTGTG",
    "ACGAATGGA", "TCACTGGAA", "ATGACAGCA", "CTCAGAACT", "AAGCTTGCG", "TCGGACATG", "GAGGATTGA", "TCTTGGACA",
    "GTGCAAGGT", "CGATCGGTA", "GGATACCAC", "ATCGTTGGC", "TGGAACGTA", "GCCTACGAT", "CATGTAGGC", "CTCACGTTC",
    "TGTGAGTCA", "AATCGCCAC", "GTGCGACTA", "TCTGGCGAA", "ATACGCGGA", "CCTTGAATC", "CCACACATT", "CGGTGATTG",
    "AGGAGCAAT", "ACACACCAA", "GGATAGATG", "TACCGTCTG", "TCTTGCTTG", "CCAGCTAAC", "CTTACGCAG", "AGTAGGAGG",
];

/// V3 cell barcodes are the first 287 entries of the 5'/3' list.
pub const SCOPE_V3_BARCODES: &[&str] = SCOPE_5P3P_BARCODES.split_at(287).0;

pub const SCOPE_5P3P_BARCODES: [&str; 288] = [
    "AACGGACCT", "AGGACTCAC", "ACTGCCTAG", "GAACGCTAT", "GACTGGTTG", "CAGGACTTC", "TCGGTTCGT", "GTCTTGCGT",
    "TATCTCCGA", "CGCAACTAC", "CACTTCAGA", "GCTCTCACT", "ACGAAGCTC", "GTGTTAAGG", "GGCTCTCTA", "GCGTAGTAA",
    "AGCTCCTTG", "CACATTCAC", "TCCGTATCA", "CACCTGTAA", "ATGGTCTCA", "TGCATCAAG", "CGCCAATGA", "TCGACTGTC",
    "TGTGGACAC", "ACATCGGAC", "GCTTGAGGT", "GCCGTTATT", "AACACCGTT", "CCTAGTCTT", "AACACACAG", "CAACATCGG",
    "TACCTCTCC", "CCAATGTCT", "CGAGATAGT", "AGTTCAGAG", "ATCGACACG", "GACCTTAGC", "TAACCTACC", "TGGAGAACC",
    "GATGTTACG", "TGGCATGAG", "CTGGTACTT", "GCGAGTAAC", "GATCCATGC", "GGCTTCTCA", "CGTTAGCGT", "ACACAGGCT",
    "AACTGGCGA", "AGACGTTCA", "TGCGGTTCT", "CAGTCTTCG", "AGCTGAGTC", "GTGCATATC", "GATGGCTCA", "TGAGCGAAG",
    "CTTGACGTT", "GTTACTGGT", "GAGCAGCTT", "GTTGGAGTG", "TGCCTGATC", "GCAGATGTG", "CAGAGTACA", "TGTAGTGTG",
    "ACGAATGGA", "TCACTGGAA", "ATGACAGCA", "CTCAGAACT", "AAGCTTGCG", "TCGGACATG", "GAGGATTGA", "TCTTGGACA",
    "GTGCAAGGT", "CGATCGGTA", "GGATACCAC", "ATCGTTGGC", "TGGAACGTA", "GCCTACGAT", "CATGTAGGC", "CTCACGTTC",
    "TGTGAGTCA", "AATCGCCAC", "GTGCGACTA", "TCTGGCGAA", "ATACGCGGA", "CCTTGAATC", "CCACACATT", "CGGTGATTG",
    "AGGAGCAAT", "ACACACCAA", "GGATAGATG", "TACCGTCTG", "TCTTGCTTG", "CCAGCTAAC", "CTTACGCAG", "AGTAGGAGG",
    "TTGGTGACC", "CATCGGTTC", "CAATGCAAC", "AAGGTGGTA", "TCAGGTAGA", "CACTAGGCA", "GGCATGCAA", "ATGCGATAC",
    "AGACGAAGT", "CGATAAGGC", "CGAGTTGCA", "GGTGATCAG", "AGTGGTGGT", "TAGCGATGA", "ATGCCTAAG", "CCATAATCG",
    "CTAACCAGA", "TGATGTGCC", "TAGCTACAC", "TCCTGGCTT", "GTAGTTCCT", "GTATCCTTC", "GCCATAACC", "GCATGTTGG",
    "AATCCGGTG", "ACGTTACGA", "AGCATAGCG", "GGTCCGTAA", "GTTCTACCG", "CGCTGTAAG", "CGTCATACC", "TGGTAACCG",
    "ACAACAGGT", "TGACTTCCG", "CACGCAATA", "ACCGTACTC", "GATGTGTGT", "ACACCAACG", "TTGAGACAG", "CGGATCATC",
    "TAATGGCCG", "ACCTCGACT", "CGGCTAGAT", "TGGACTTGT", "TGATCCTCT", "ATAGCGTGT", "TGTCGGTGT", "AGCCACATA",
    "GAAGAAGCC", "CTGTGGTAT", "CAGCCGAAT", "ACCTGCTAC", "TCTTCTCAG", "GATCAGGAC", "TAGACCACT", "TGAGTAGTC",
    "TTCGAGGAT", "ATGTATCGG", "TCTGTCTGC", "GCTTACAGG", "ATACCAGTC", "AACGTCCAA", "CTCCTCAAT", "TTCCAATCG",
    "AACGCTAGT", "TTACACGAC", "CATACGACC", "CTAATCGCG", "CGTAATTGG", "GTAGTGTTG", "TATAGCGGT", "CGTACTGAA",
    "TCGATGTGG", "CCAGAAGAT", "AGGCTGTTG", "TGAGGCCTT", "CCAGTCCTA", "CAATTGCGC", "TTGCCGTCA", "GAGTTGACA",
    "TGGTCAGTT", "GGTAGTCCA", "ATCCTTCCA", "ATGTGCAGC", "GGAAGACTC", "GTAATGGAC", "TATCGTGCA", "CCTACAAGG",
    "TAGTCCGGA", "AGATACGCA", "ACTCATCGT", "GATAACCGC", "GCTGCGATA", "TACTCACCA", "ACCAGGTCA", "GCAACTTCA",
    "TTCGGTCAA", "GTACGGACT", "GGCCATGTT", "TATGACACC", "GTGTCTGAA", "TAAGCTTGG", "AAGATCTGC", "CTTGTGCCA",
    "ACTGGTTCC", "GATTGCGAG", "ACACGGTAG", "TCGCATACT", "CCGATCGAA", "GTAGCACGA", "TCAGCACTG", "TGCTATCGC",
    "GTAAGATCG", "TGCACGAGA", "GAATCGCAA", "CCTCGATCA", "GCGTCTAGT", "TCCAGTTAG", "CAGGAACCA", "GTGAACCAA",
    "CTCTAACAC", "GTCTGATGC", "TTAAGAGGC", "GTCAATGCA", "CTTCATGGA", "CAGACACTC", "AGCGTGTAT", "CCATCCTAA",
    "TAGTAGAGC", "GACGTAGAG", "GGTGGTATC", "ATGAGTCCT", "TCCTAAGCC", "GATCTCTTG", "GAGTGATCT", "CTTAGCGAC",
    "GAGAGGAGT", "ACGTACTGT", "TGTACGCCT", "CGAAGGCAT", "AGTCTACGC", "CTGCGTAGT", "GTCGCCTAT", "TACGCGTAC",
    "TGTGCAAGT", "TTACAGAGG", "ACTATCGCC", "CATTCCGCT", "CGTGGCTAT", "TTCTTCGTG", "CAGTAAGAG", "GAACCTGTA",
    "ACGTCCATA", "GAACGAATG", "GCCACATTG", "AGTGCTACA", "GAAGCCATT", "GAGTTCGTC", "AACCGTGAT", "TGACAGCTA",
    "CGTGTGATG", "ATTGAGAGC", "CAAGGTGTT", "TAGAAGGCG", "CGACTGAGA", "AGAATCCGG", "AGAGAATGG", "TTGTGTACG",
    "TGGCAATTC", "AGAATGACC", "CAAGAGTAG", "GATGCACAT", "ACGCCACTT", "TCGTCATGC", "GCACTATTC", "AACAGGAAC",
    "ATTAGCCTG", "ACCAATCCG", "GTAGGTAAG", "CTCTGCTTA", "CTATGACCA", "GTGGAATAG", "GACTAACGG", "ACGGTGAAG",
    "GACATGGCT", "TCCAGACGA", "GCATTAGCA", "AAGGAGTCT", "TTCAACAGC", "TGACCAGCA", "ATCGCTCTG", "CCTTAGGTG",
];
