// layout.rs - R1 前缀的片段布局

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SplitError};

/// Kind of a fixed-length piece of the R1 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    CellBarcode,
    Linker,
    Umi,
    PolyT,
}

impl SegmentKind {
    /// Single-letter code used in compact layout strings (`C`, `L`, `U`, `T`).
    pub fn code(self) -> char {
        match self {
            SegmentKind::CellBarcode => 'C',
            SegmentKind::Linker => 'L',
            SegmentKind::Umi => 'U',
            SegmentKind::PolyT => 'T',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'C' => Some(SegmentKind::CellBarcode),
            'L' => Some(SegmentKind::Linker),
            'U' => Some(SegmentKind::Umi),
            'T' => Some(SegmentKind::PolyT),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub length: usize,
}

impl Segment {
    pub fn new(kind: SegmentKind, length: usize) -> Self {
        Segment { kind, length }
    }
}

/// Ordered segments of an R1 prefix, 5' to 3'.
///
/// The prefix length (the cut point) is cached at construction and always
/// equals the sum of the segment lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    segments: Vec<Segment>,
    prefix_len: usize,
}

impl Layout {
    /// Build a layout from explicit segments. Empty layouts and zero-length
    /// segments are rejected.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let malformed = |segments: &[Segment], reason: &str| SplitError::MalformedLayoutSpec {
            pattern: render(segments),
            reason: reason.to_string(),
        };
        if segments.is_empty() {
            return Err(malformed(&segments, "layout has no segments"));
        }
        if segments.iter().any(|s| s.length == 0) {
            return Err(malformed(&segments, "segment length must be positive"));
        }
        let prefix_len = segments.iter().map(|s| s.length).sum();
        Ok(Layout { segments, prefix_len })
    }

    /// Parse a compact layout string such as `C8L16C8L16C8U12T18`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let malformed = |reason: String| SplitError::MalformedLayoutSpec {
            pattern: pattern.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut chars = pattern.char_indices().peekable();
        while let Some((pos, code)) = chars.next() {
            let kind = SegmentKind::from_code(code).ok_or_else(|| {
                malformed(format!("unknown segment kind '{code}' at offset {pos}"))
            })?;

            let mut digits = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            if digits.is_empty() {
                return Err(malformed(format!("segment '{code}' at offset {pos} has no length")));
            }
            let length: usize = digits
                .parse()
                .map_err(|_| malformed(format!("segment length '{digits}' is out of range")))?;
            if length == 0 {
                return Err(malformed(format!("segment '{code}' at offset {pos} has zero length")));
            }
            segments.push(Segment::new(kind, length));
        }

        if segments.is_empty() {
            return Err(malformed("layout has no segments".to_string()));
        }
        Layout::new(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total prefix length; the R1/R2 cut point for this layout.
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Sum of lengths of all segments of `kind`.
    pub fn total_len_of(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).map(|s| s.length).sum()
    }

    /// Iterate over the segments of `kind` in layout order.
    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}

fn render(segments: &[Segment]) -> String {
    segments.iter().map(|s| format!("{}{}", s.kind.code(), s.length)).collect()
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments))
    }
}

impl FromStr for Layout {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self> {
        Layout::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scope_layout() {
        let layout = Layout::parse("C8L16C8L16C8U12T18").unwrap();
        assert_eq!(layout.segments().len(), 7);
        assert_eq!(layout.segments()[0], Segment::new(SegmentKind::CellBarcode, 8));
        assert_eq!(layout.segments()[1], Segment::new(SegmentKind::Linker, 16));
        assert_eq!(layout.segments()[6], Segment::new(SegmentKind::PolyT, 18));
        assert_eq!(layout.prefix_len(), 86);
        assert_eq!(layout.total_len_of(SegmentKind::Linker), 32);
        assert_eq!(layout.segments_of(SegmentKind::CellBarcode).count(), 3);
    }

    #[test]
    fn test_parse_multi_digit_and_leading_umi() {
        let layout = Layout::parse("U9C8L16C8L16C8").unwrap();
        assert_eq!(layout.segments()[0].kind, SegmentKind::Umi);
        assert_eq!(layout.prefix_len(), 65);
    }

    #[test]
    fn test_display_matches_input() {
        for pattern in ["C12U8T18", "C8L16C8L16C8L1U8T18", "L18C6U16", "C9C9C9U8"] {
            assert_eq!(Layout::parse(pattern).unwrap().to_string(), pattern);
        }
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let err = Layout::parse("C8X4").unwrap_err();
        assert!(matches!(err, SplitError::MalformedLayoutSpec { .. }));
        assert!(err.to_string().contains("'X'"));
    }

    #[test]
    fn test_missing_or_zero_length_is_malformed() {
        assert!(Layout::parse("C8L").is_err());
        assert!(Layout::parse("CU8").is_err());
        assert!(Layout::parse("C0U8").is_err());
        assert!(Layout::parse("").is_err());
        assert!(Layout::parse("8C").is_err());
        assert!(Layout::parse("c8").is_err());
    }

    #[test]
    fn test_new_rejects_empty_and_zero() {
        assert!(Layout::new(vec![]).is_err());
        assert!(Layout::new(vec![Segment::new(SegmentKind::Umi, 0)]).is_err());
    }

    #[test]
    fn test_from_str() {
        let layout: Layout = "C9U12".parse().unwrap();
        assert_eq!(layout.prefix_len(), 21);
    }
}
