// protocol.rs - protocol 定义与优先级注册表

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::barcodes::{LAYOUTS, WHITELISTS};
use crate::error::{Result, SplitError};
use crate::layout::{Layout, SegmentKind};

/// Name of the pseudo-protocol that has no fixed layout.
pub const AUTO: &str = "auto";

/// Accepted content of a protocol's linker segments.
///
/// A literal covers every linker segment of the layout, concatenated in
/// layout order, so its length equals the layout's total linker length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkerSpec {
    /// Linker bases are skipped without being checked
    Absent,
    Literal(Vec<u8>),
    /// Any one member may match, but the same member must match every segment
    OneOf(Vec<Vec<u8>>),
}

impl LinkerSpec {
    pub fn from_literals<S: AsRef<str>>(literals: &[S]) -> Self {
        let mut literals: Vec<Vec<u8>> =
            literals.iter().map(|l| l.as_ref().as_bytes().to_vec()).collect();
        match literals.len() {
            0 => LinkerSpec::Absent,
            1 => LinkerSpec::Literal(literals.remove(0)),
            _ => LinkerSpec::OneOf(literals),
        }
    }

    pub fn literals(&self) -> &[Vec<u8>] {
        match self {
            LinkerSpec::Absent => &[],
            LinkerSpec::Literal(l) => std::slice::from_ref(l),
            LinkerSpec::OneOf(ls) => ls,
        }
    }
}

/// Accepted cell barcodes and linker content for one protocol.
#[derive(Debug, Clone)]
pub struct Whitelist {
    cell_barcodes: HashSet<Vec<u8>>,
    linker: LinkerSpec,
}

impl Whitelist {
    pub fn new<I, S>(cell_barcodes: I, linker: LinkerSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cell_barcodes =
            cell_barcodes.into_iter().map(|bc| bc.as_ref().as_bytes().to_vec()).collect();
        Whitelist { cell_barcodes, linker }
    }

    pub fn contains_barcode(&self, barcode: &[u8]) -> bool {
        self.cell_barcodes.contains(barcode)
    }

    pub fn linker(&self) -> &LinkerSpec {
        &self.linker
    }

    pub fn barcode_count(&self) -> usize {
        self.cell_barcodes.len()
    }
}

/// A named layout together with the whitelist used to recognize it.
///
/// Keeping both in one value means the layout and its whitelist can never
/// refer to different protocols. A definition without a whitelist is kept in
/// the registry but never matches.
#[derive(Debug, Clone)]
pub struct ProtocolDefinition {
    name: String,
    layout: Layout,
    whitelist: Option<Whitelist>,
}

impl ProtocolDefinition {
    pub fn new(name: impl Into<String>, layout: Layout, whitelist: Option<Whitelist>) -> Result<Self> {
        let name = name.into();
        let fault = |reason: String| SplitError::ConfigurationIntegrity {
            protocol: name.clone(),
            reason,
        };

        if name.is_empty() {
            return Err(fault("protocol name is empty".to_string()));
        }
        if name == AUTO {
            return Err(fault(format!("'{AUTO}' is reserved for unlabeled input")));
        }

        if let Some(whitelist) = &whitelist {
            if let Some(bad) = whitelist.cell_barcodes.iter().find(|bc| !is_nucleotide_string(bc)) {
                return Err(fault(format!(
                    "cell barcode '{}' is not an uppercase nucleotide string",
                    String::from_utf8_lossy(bad)
                )));
            }

            let cell_lens: Vec<usize> = layout.segments_of(SegmentKind::CellBarcode).map(|s| s.length).collect();
            if let Some(bad) = whitelist.cell_barcodes.iter().find(|bc| !cell_lens.contains(&bc.len())) {
                return Err(fault(format!(
                    "cell barcode '{}' has {} bases but layout {} has cell barcode slots of {:?}",
                    String::from_utf8_lossy(bad),
                    bad.len(),
                    layout,
                    cell_lens
                )));
            }

            let linker_len = layout.total_len_of(SegmentKind::Linker);
            for literal in whitelist.linker.literals() {
                if !is_nucleotide_string(literal) {
                    return Err(fault(format!(
                        "linker '{}' is not an uppercase nucleotide string",
                        String::from_utf8_lossy(literal)
                    )));
                }
                if literal.len() != linker_len {
                    return Err(fault(format!(
                        "linker '{}' has {} bases but layout {} has {} linker bases",
                        String::from_utf8_lossy(literal),
                        literal.len(),
                        layout,
                        linker_len
                    )));
                }
            }
        }

        Ok(ProtocolDefinition { name, layout, whitelist })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn whitelist(&self) -> Option<&Whitelist> {
        self.whitelist.as_ref()
    }

    /// Offset at which R1 is split; the layout's total prefix length.
    pub fn cut_point(&self) -> usize {
        self.layout.prefix_len()
    }
}

fn is_nucleotide_string(s: &[u8]) -> bool {
    !s.is_empty() && s.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N'))
}

/// Protocols in matching priority order.
///
/// The order is the tie-break when more than one layout validates against
/// the same read: the earlier protocol wins.
#[derive(Debug, Clone)]
pub struct ProtocolRegistry {
    protocols: Vec<ProtocolDefinition>,
}

impl ProtocolRegistry {
    pub fn new(protocols: Vec<ProtocolDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for p in &protocols {
            if !seen.insert(p.name()) {
                return Err(SplitError::ConfigurationIntegrity {
                    protocol: p.name().to_string(),
                    reason: "protocol is registered twice".to_string(),
                });
            }
        }
        Ok(ProtocolRegistry { protocols })
    }

    /// Assemble the compiled-in layout and whitelist tables.
    ///
    /// Every whitelist row must name a protocol from the layout table.
    pub fn builtin() -> Result<Self> {
        assemble(LAYOUTS, WHITELISTS)
    }

    /// Load a protocol table from a JSON file (see [`ProtocolTable`]).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let table: ProtocolTable = serde_json::from_reader(reader)?;
        table.into_registry()
    }

    pub fn lookup(&self, name: &str) -> Result<&ProtocolDefinition> {
        self.protocols
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SplitError::UnknownProtocol(name.to_string()))
    }

    /// All protocols, highest priority first. The `auto` pseudo-entry is
    /// never part of the registry.
    pub fn all_in_priority_order(&self) -> &[ProtocolDefinition] {
        &self.protocols
    }

    /// Narrow the registry to one protocol, or keep all of it for `auto`.
    pub fn select(self, name: &str) -> Result<Self> {
        if name == AUTO {
            return Ok(self);
        }
        let chosen = self.lookup(name)?.clone();
        if chosen.whitelist().is_none() {
            warn!("Protocol '{name}' has no whitelist; every read pair will pass through");
        }
        Ok(ProtocolRegistry { protocols: vec![chosen] })
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

fn assemble(
    layouts: &[(&str, Option<&str>)],
    whitelists: &[(&str, &[&str], &[&str])],
) -> Result<ProtocolRegistry> {
    for (name, _, _) in whitelists {
        let known = layouts.iter().any(|(n, layout)| n == name && layout.is_some());
        if !known {
            return Err(SplitError::ConfigurationIntegrity {
                protocol: (*name).to_string(),
                reason: "whitelist has no matching layout".to_string(),
            });
        }
    }

    let mut protocols = Vec::with_capacity(layouts.len());
    for (name, pattern) in layouts {
        let Some(pattern) = pattern else {
            continue;
        };
        let layout = Layout::parse(pattern)?;
        let whitelist = whitelists
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, barcodes, linkers)| Whitelist::new(barcodes.iter(), LinkerSpec::from_literals(linkers)));
        if whitelist.is_none() {
            debug!("Protocol '{name}' has no whitelist and can never be matched");
        }
        protocols.push(ProtocolDefinition::new(*name, layout, whitelist)?);
    }
    ProtocolRegistry::new(protocols)
}

/// On-disk protocol table, in priority order.
///
/// ```json
/// {"protocols": [
///   {"name": "bulk_rna", "pattern": "C9U12", "barcodes": ["AACGGACCT"], "linkers": null}
/// ]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolTable {
    pub protocols: Vec<ProtocolEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolEntry {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub barcodes: Option<Vec<String>>,
    #[serde(default)]
    pub linkers: Option<Vec<String>>,
}

impl ProtocolTable {
    pub fn into_registry(self) -> Result<ProtocolRegistry> {
        let mut protocols = Vec::with_capacity(self.protocols.len());
        for entry in self.protocols {
            if entry.barcodes.is_none() && entry.linkers.is_some() {
                return Err(SplitError::ConfigurationIntegrity {
                    protocol: entry.name,
                    reason: "linkers given without cell barcodes".to_string(),
                });
            }
            let layout = Layout::parse(&entry.pattern)?;
            let linker = LinkerSpec::from_literals(entry.linkers.as_deref().unwrap_or_default());
            let whitelist = entry.barcodes.map(|bcs| Whitelist::new(bcs, linker));
            protocols.push(ProtocolDefinition::new(entry.name, layout, whitelist)?);
        }
        ProtocolRegistry::new(protocols)
    }
}
