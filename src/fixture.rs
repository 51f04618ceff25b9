//! In-memory container assembly for tests

use crate::header::SIZE_HEADER;

/// Assembles container bytes block by block
pub struct ContainerBuilder {
    bytes: Vec<u8>,
}
impl ContainerBuilder {
    /// Starts a DNA container exported by version 15 and imported by version 19
    pub fn new() -> Self {
        Self::with_header(1, 15, 19)
    }

    pub fn with_header(dna_flag: u16, export_version: u16, import_version: u16) -> Self {
        let mut bytes = Vec::with_capacity(SIZE_HEADER);
        bytes.push(b'\t');
        bytes.extend_from_slice(&14u32.to_be_bytes());
        bytes.extend_from_slice(b"SnapGene");
        bytes.extend_from_slice(&dna_flag.to_be_bytes());
        bytes.extend_from_slice(&export_version.to_be_bytes());
        bytes.extend_from_slice(&import_version.to_be_bytes());
        Self { bytes }
    }

    pub fn block(mut self, tag: u8, payload: &[u8]) -> Self {
        self.bytes.push(tag);
        self.bytes
            .extend_from_slice(&(payload.len() as u32).to_be_bytes());
        self.bytes.extend_from_slice(payload);
        self
    }

    pub fn sequence(self, flags: u8, sequence: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(sequence.len() + 1);
        payload.push(flags);
        payload.extend_from_slice(sequence);
        self.block(0, &payload)
    }

    pub fn notes(self, payload: &[u8]) -> Self {
        self.block(6, payload)
    }

    pub fn features(self, payload: &[u8]) -> Self {
        self.block(10, payload)
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

pub const REFERENCE_LENGTH: usize = 5493;

/// Sequence with the same length and ends as the reference pET-22b(+) map
pub fn reference_sequence() -> Vec<u8> {
    let head = b"ATCCGGATAT";
    let tail = b"CCATTCGCCA";
    let mut sequence = head.to_vec();
    sequence.extend(
        b"GCTAGCTTAC"
            .iter()
            .cycle()
            .take(REFERENCE_LENGTH - head.len() - tail.len()),
    );
    sequence.extend_from_slice(tail);
    sequence
}

const REFERENCE_NOTES: &str = r#"<Notes>
<UUID>4b7eca01-cceb-44ba-b754-6efcad9cc573</UUID>
<Type>Synthetic</Type>
<ConfirmedExperimentally>0</ConfirmedExperimentally>
<CustomMapLabel>pET-22b(+)</CustomMapLabel>
<UseCustomMapLabel>1</UseCustomMapLabel>
<Description>&lt;html&gt;&lt;body&gt;Bacterial vector that encodes a signal sequence for inducible expression of proteins in the periplasm.&lt;/body&gt;&lt;/html&gt;</Description>
<Created UTC="0:0:0">2012.5.12</Created>
<LastModified UTC="13:51:9">2024.3.6</LastModified>
<SequenceClass>UNA</SequenceClass>
<TransformedInto>Unspecified</TransformedInto>
<Organism>Escherichia coli</Organism>
<CreatedBy>MilliporeSigma (Novagen)</CreatedBy>
<Comments>&lt;html&gt;&lt;body&gt;&lt;br&gt;&lt;/body&gt;&lt;/html&gt;</Comments>
</Notes>"#;

/// (name, type, range, color, translated, label)
const REFERENCE_FEATURES: [(&str, &str, &str, &str, bool, Option<&str>); 14] = [
    ("RBS", "RBS", "298-303", "#a6acb3", false, None),
    ("pelB signal sequence", "sig_peptide", "312-377", "#ffcc99", true, Some("pelB")),
    ("MCS", "misc_feature", "378-443", "#ffffff", false, None),
    ("6xHis", "CDS", "449-466", "#ffcc00", true, None),
    ("T7 terminator", "terminator", "530-577", "#999999", false, None),
    ("f1 ori", "rep_origin", "645-1100", "#993366", false, None),
    ("AmpR promoter", "promoter", "1126-1230", "#ffffff", false, None),
    ("AmpR", "CDS", "1231-2091", "#ccccff", true, None),
    ("ori", "rep_origin", "2262-2850", "#ffff00", false, None),
    ("rop", "CDS", "3036-3227", "#ff9ccd", true, None),
    ("lacI promoter", "promoter", "3866-3943", "#ffffff", false, None),
    ("lacI", "CDS", "3944-5026", "#ccccff", true, None),
    ("T7 promoter", "promoter", "5299-5317", "#ffffff", false, None),
    ("lac operator", "protein_bind", "5318-5342", "#99ccff", false, Some("lacO")),
];

fn reference_features() -> String {
    let mut payload = format!(
        "<?xml version=\"1.0\"?><Features nextValidID=\"{}\">",
        REFERENCE_FEATURES.len()
    );
    for (id, (name, kind, range, color, translated, label)) in
        REFERENCE_FEATURES.iter().enumerate()
    {
        payload.push_str(&format!(
            "<Feature recentID=\"{id}\" name=\"{name}\" type=\"{kind}\" allowSegmentOverlaps=\"0\" consecutiveTranslationNumbering=\"1\">"
        ));
        let translated = if *translated { " translated=\"1\"" } else { "" };
        payload.push_str(&format!(
            "<Segment range=\"{range}\" color=\"{color}\" type=\"standard\"{translated}/>"
        ));
        if let Some(label) = label {
            payload.push_str(&format!("<Q name=\"label\"><V text=\"{label}\"/></Q>"));
        }
        payload.push_str("<Q name=\"note\"><V text=\"reference\"/></Q></Feature>");
    }
    payload.push_str("</Features>");
    payload
}

/// A container reproducing the observable contents of the reference pET-22b(+) file,
/// interleaved with blocks the decoder does not model.
pub fn reference_container() -> Vec<u8> {
    ContainerBuilder::new()
        .sequence(0x07, &reference_sequence())
        .block(5, b"<Primers nextValidID=\"0\"/>")
        .notes(REFERENCE_NOTES.as_bytes())
        .block(8, b"<AdditionalSequenceProperties/>")
        .features(reference_features().as_bytes())
        .block(17, &[0u8; 32])
        .block(28, &[])
        .finish()
}
