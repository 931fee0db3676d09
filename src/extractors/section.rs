// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

// --- Regex Patterns for Header Matching (Lazy Static) ---
// One pattern per section, matched as a case-insensitive substring search
// anywhere in the line. Keywords are the synonyms pathology reports
// commonly use for each heading.
static SECTION_PATTERNS: Lazy<[Regex; 6]> = Lazy::new(|| {
    [
        r"(?i)(Patient Information|Patient Name|MRN|ID|DOB)",
        r"(?i)(Clinical History|Medical History|Reason for Visit)",
        r"(?i)(Diagnosis|Impression|Final Diagnosis)",
        r"(?i)(Specimen|Sample|Tissue Type|Collected)",
        r"(?i)(Findings|Microscopic Description|Macroscopic Description)",
        r"(?i)(Conclusion|Summary|Comments)",
    ]
    .map(|pat| Regex::new(pat).expect("Failed to compile section pattern"))
});

/// The fixed report sections, in the order patterns are tried.
///
/// A line matching more than one pattern is claimed by the earlier
/// variant, so this order is part of the splitting contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PatientInformation,
    ClinicalHistory,
    Diagnosis,
    SpecimenDetails,
    Findings,
    Conclusion,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::PatientInformation,
        Section::ClinicalHistory,
        Section::Diagnosis,
        Section::SpecimenDetails,
        Section::Findings,
        Section::Conclusion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::PatientInformation => "Patient Information",
            Section::ClinicalHistory => "Clinical History",
            Section::Diagnosis => "Diagnosis",
            Section::SpecimenDetails => "Specimen Details",
            Section::Findings => "Findings",
            Section::Conclusion => "Conclusion",
        }
    }

    fn pattern(self) -> &'static Regex {
        &SECTION_PATTERNS[self as usize]
    }

    /// Returns the first section (in `ALL` order) whose pattern matches
    /// the line, or `None` if the line is not a recognized header.
    pub fn match_header(line: &str) -> Option<Section> {
        Section::ALL
            .into_iter()
            .find(|section| section.pattern().is_match(line))
    }
}

/// Accumulated text per section. All six accumulators always exist;
/// unmatched sections stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    parts: [String; 6],
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &str {
        &self.parts[section as usize]
    }

    fn append_line(&mut self, section: Section, line: &str) {
        let part = &mut self.parts[section as usize];
        part.push_str(line);
        part.push('\n');
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL
            .into_iter()
            .zip(self.parts.iter().map(String::as_str))
    }
}

// Serialized as an object keyed by display name, preserving the fixed
// section order for the form on the other end.
impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Section::ALL.len()))?;
        for (section, text) in self.iter() {
            map.serialize_entry(section.name(), text)?;
        }
        map.end()
    }
}

/// Splits extracted report text into the six fixed sections.
///
/// This is a single-pass tagged-state accumulator, not a parser. The state
/// is the current section (initially unset); a header match switches it,
/// and every line (including the header line itself) is appended to the
/// current section's buffer with a trailing newline. Lines seen before the
/// first header match are dropped. There is no notion of nested sections
/// and no boundary detection from whitespace or layout; a line that merely
/// mentions a keyword will start its section.
pub struct SectionSplitter;

impl SectionSplitter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn split(&self, text: &str) -> SectionMap {
        let mut sections = SectionMap::default();
        let mut current: Option<Section> = None;

        for line in text.lines() {
            if let Some(section) = Section::match_header(line) {
                current = Some(section);
            }
            if let Some(section) = current {
                sections.append_line(section, line);
            }
        }

        sections
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> SectionMap {
        SectionSplitter::new().split(text)
    }

    #[test]
    fn test_lines_accumulate_under_most_recent_header() {
        let text = "Intro line\nDiagnosis: adenocarcinoma\ngrade 2\nFindings: none\n";
        let sections = split(text);

        assert_eq!(sections.get(Section::Diagnosis), "Diagnosis: adenocarcinoma\ngrade 2\n");
        assert_eq!(sections.get(Section::Findings), "Findings: none\n");
        assert_eq!(sections.get(Section::PatientInformation), "");
        assert_eq!(sections.get(Section::ClinicalHistory), "");
        assert_eq!(sections.get(Section::SpecimenDetails), "");
        assert_eq!(sections.get(Section::Conclusion), "");
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let sections = split("no header here\nstill nothing\n");
        for (_, text) in sections.iter() {
            assert_eq!(text, "");
        }
    }

    #[test]
    fn test_earlier_section_wins_pattern_ties() {
        // Matches both the Diagnosis and Findings patterns; Diagnosis is
        // earlier in the enumeration order and must claim the line.
        let line = "Diagnosis and Findings reviewed together";
        assert_eq!(Section::match_header(line), Some(Section::Diagnosis));

        let sections = split(line);
        assert_eq!(sections.get(Section::Diagnosis), format!("{line}\n"));
        assert_eq!(sections.get(Section::Findings), "");
    }

    #[test]
    fn test_matching_is_case_insensitive_substring_search() {
        let sections = split("final DIAGNOSIS follows\ncarcinoma in situ\n");
        assert_eq!(
            sections.get(Section::Diagnosis),
            "final DIAGNOSIS follows\ncarcinoma in situ\n"
        );
    }

    #[test]
    fn test_synonym_keywords_route_to_their_section() {
        let text = "MRN: 00123\nReason for Visit: biopsy follow-up\nImpression: benign\nTissue Type: skin\nMicroscopic Description: unremarkable\nComments: none\n";
        let sections = split(text);

        assert_eq!(sections.get(Section::PatientInformation), "MRN: 00123\n");
        assert_eq!(sections.get(Section::ClinicalHistory), "Reason for Visit: biopsy follow-up\n");
        assert_eq!(sections.get(Section::Diagnosis), "Impression: benign\n");
        assert_eq!(sections.get(Section::SpecimenDetails), "Tissue Type: skin\n");
        assert_eq!(sections.get(Section::Findings), "Microscopic Description: unremarkable\n");
        assert_eq!(sections.get(Section::Conclusion), "Comments: none\n");
    }

    #[test]
    fn test_keyword_mention_mid_sentence_switches_section() {
        // Known (and accepted) misclassification mode: a passing mention
        // of a keyword starts that section.
        let text = "Diagnosis: pending\nsee Specimen container label\ntrailing note\n";
        let sections = split(text);

        assert_eq!(sections.get(Section::Diagnosis), "Diagnosis: pending\n");
        assert_eq!(
            sections.get(Section::SpecimenDetails),
            "see Specimen container label\ntrailing note\n"
        );
    }

    #[test]
    fn test_split_is_pure_and_idempotent() {
        let text = "Clinical History: cough\nDiagnosis: viral\nSummary: recovered\n";
        let splitter = SectionSplitter::new();
        assert_eq!(splitter.split(text), splitter.split(text));
    }

    #[test]
    fn test_empty_input_yields_empty_sections() {
        let sections = split("");
        for (_, text) in sections.iter() {
            assert_eq!(text, "");
        }
    }

    #[test]
    fn test_serializes_as_ordered_name_keyed_object() {
        let sections = split("Diagnosis: x\n");
        let json = serde_json::to_string(&sections).expect("serialize section map");

        // Written out as a JSON object whose keys appear in section order.
        let positions: Vec<usize> = [
            "\"Patient Information\"",
            "\"Clinical History\"",
            "\"Diagnosis\"",
            "\"Specimen Details\"",
            "\"Findings\"",
            "\"Conclusion\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap_or_else(|| panic!("missing key {key} in {json}")))
        .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "keys out of order: {json}"
        );
        assert!(json.contains(r#""Diagnosis":"Diagnosis: x\n""#));
    }
}
