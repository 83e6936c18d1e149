//! Rhyme-scheme detection over an ordered sequence of lines.
//!
//! Builds a windowed rhyme-adjacency graph, assigns scheme labels by label
//! propagation (merging groups when a connection bridges two of them), and
//! names the resulting pattern.

use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::{classify_with_variant, Classification, Variant};
use super::domain::{extract_rhyme_domain, RhymeDomain};

/// Sentinel label for lines with no rhyme partner in the window.
pub const NO_RHYME: char = 'X';

/// Lines shorter than this are skipped outright.
const MIN_LINE_CHARS: usize = 4;

/// Minimum rhyme quality accepted when connecting lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RhymeQuality {
    /// Accept PURE and RICH only.
    #[default]
    Pure,
    /// Also accept the imperfect kinds.
    Imperfect,
}

impl RhymeQuality {
    fn accepts(&self, classification: &Classification) -> bool {
        match self {
            RhymeQuality::Pure => matches!(
                classification,
                Classification::Pure { .. } | Classification::Rich { .. }
            ),
            RhymeQuality::Imperfect => classification.is_rhyme(),
        }
    }
}

/// Tuning for scheme detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemeOptions {
    /// How far ahead a line looks for rhyme partners. Bounds the quadratic
    /// pair scan to O(lines × window).
    pub window: usize,
    pub min_quality: RhymeQuality,
    pub variant: Variant,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        SchemeOptions {
            window: 8,
            min_quality: RhymeQuality::Pure,
            variant: Variant::Strict,
        }
    }
}

/// One accepted rhyme connection between two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhymeConnection {
    pub line1: usize,
    pub line2: usize,
    pub domain1: String,
    pub domain2: String,
    pub classification: Classification,
    pub distance: usize,
}

/// The detected scheme of a chunk of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeResult {
    /// One label per line, `X` for lines without a partner.
    pub scheme: String,
    /// Recognized pattern name or a generic descriptor.
    pub pattern: String,
    /// Line indices grouped by label.
    pub groups: BTreeMap<char, Vec<usize>>,
    pub connections: Vec<RhymeConnection>,
    pub total_lines: usize,
    pub rhyming_lines: usize,
}

/// Detect the rhyme scheme of `lines` with default quality and variant.
pub fn detect_scheme<S: AsRef<str>>(lines: &[S], window: usize) -> SchemeResult {
    detect_scheme_with(
        lines,
        SchemeOptions { window, ..SchemeOptions::default() },
    )
}

/// Detect the rhyme scheme of `lines` under the given options.
pub fn detect_scheme_with<S: AsRef<str>>(lines: &[S], options: SchemeOptions) -> SchemeResult {
    if lines.len() < 2 {
        return SchemeResult {
            scheme: String::new(),
            pattern: "NONE".to_string(),
            groups: BTreeMap::new(),
            connections: Vec::new(),
            total_lines: lines.len(),
            rhyming_lines: 0,
        };
    }

    // One domain per line, skipping lines too short to carry a rhyme.
    let domains: Vec<Option<RhymeDomain>> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.trim().chars().count() < MIN_LINE_CHARS {
                None
            } else {
                Some(extract_rhyme_domain(line))
            }
        })
        .collect();

    let mut connections = Vec::new();
    for i in 0..domains.len() {
        let Some(d1) = &domains[i] else { continue };
        let upper = (i + options.window).min(domains.len() - 1);
        for j in (i + 1)..=upper {
            let Some(d2) = &domains[j] else { continue };
            if d1.stress != d2.stress {
                continue;
            }

            let classification = classify_with_variant(&d1.text, &d2.text, options.variant);
            if options.min_quality.accepts(&classification) {
                connections.push(RhymeConnection {
                    line1: i,
                    line2: j,
                    domain1: d1.text.clone(),
                    domain2: d2.text.clone(),
                    classification,
                    distance: j - i,
                });
            }
        }
    }

    log::debug!(
        "{} rhyme connections across {} lines",
        connections.len(),
        lines.len()
    );

    // Label propagation over the connections. A connection between two
    // already-labeled groups merges the later label into the earlier one.
    let mut labels: Vec<Option<char>> = vec![None; lines.len()];
    let mut next_label = b'A';
    for conn in &connections {
        match (labels[conn.line1], labels[conn.line2]) {
            (Some(a), Some(b)) => {
                if a != b {
                    for slot in labels.iter_mut() {
                        if *slot == Some(b) {
                            *slot = Some(a);
                        }
                    }
                }
            }
            (Some(a), None) => labels[conn.line2] = Some(a),
            (None, Some(b)) => labels[conn.line1] = Some(b),
            (None, None) => {
                let label = next_label as char;
                next_label += 1;
                labels[conn.line1] = Some(label);
                labels[conn.line2] = Some(label);
            }
        }
    }

    let scheme: String = labels.iter().map(|l| l.unwrap_or(NO_RHYME)).collect();

    let mut groups: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        if let Some(label) = label {
            groups.entry(*label).or_default().push(idx);
        }
    }

    let rhyming_lines = labels.iter().flatten().count();
    let pattern = identify_pattern(&scheme, &groups);

    SchemeResult {
        scheme,
        pattern,
        groups,
        connections,
        total_lines: lines.len(),
        rhyming_lines,
    }
}

/// Named schemes, checked both for exact matches and as prefixes.
const NAMED_PATTERNS: &[(&str, &str)] = &[
    ("AABB", "COUPLETS"),
    ("ABAB", "ALTERNATE"),
    ("ABBA", "ENCLOSED"),
    ("AAAA", "MONORHYME"),
    ("AABCCB", "TAIL RHYME"),
    ("ABCABC", "TRIPLET REPEAT"),
    ("ABABCC", "QUATRAIN + COUPLET"),
    ("AABBCC", "TRIPLE COUPLETS"),
    ("ABABABCC", "OCTAVE (Sicilian)"),
    ("ABBAABBA", "OCTAVE (Petrarchan)"),
    ("ABABCDCD", "DOUBLE ALTERNATE"),
    ("ABBACDDC", "DOUBLE ENCLOSED"),
    ("ABBAABBACDECDE", "SONNET (Petrarchan)"),
    ("ABBAABBACDCDCD", "SONNET (Italian variant)"),
    ("ABABCDCDEFEFGG", "SONNET (Shakespearean)"),
];

/// Name the pattern a scheme string spells out.
pub fn identify_pattern(scheme: &str, groups: &BTreeMap<char, Vec<usize>>) -> String {
    let labeled: String = scheme.chars().filter(|c| *c != NO_RHYME).collect();
    if labeled.is_empty() {
        return "UNRHYMED".to_string();
    }

    for (pattern, name) in NAMED_PATTERNS {
        if scheme == *pattern {
            return (*name).to_string();
        }
    }

    let chars: Vec<char> = scheme.chars().collect();
    if chars.len() >= 6 {
        if chars.iter().enumerate().all(|(i, c)| *c == chars[i % 2]) {
            return "CONTINUOUS ALTERNATE".to_string();
        }
        let couplets = chars
            .chunks(2)
            .all(|pair| pair.len() < 2 || pair[0] == pair[1]);
        if couplets {
            return "CONTINUOUS COUPLETS".to_string();
        }
    }

    if chars.len() >= 4 {
        for (pattern, name) in NAMED_PATTERNS {
            if scheme.starts_with(pattern) && scheme != *pattern {
                return format!("{} (starts {})", name, scheme);
            }
        }
    }

    let max_group = groups.values().map(|g| g.len()).max().unwrap_or(0);
    if max_group >= 3 {
        return format!("COMPLEX CROSS-RHYME (max {} lines)", max_group);
    }

    let mut distinct: Vec<char> = chars.clone();
    distinct.sort();
    distinct.dedup();
    match distinct.len() {
        1 => format!("MONORHYME ({} lines)", scheme.len()),
        2 => format!("TWO-RHYME SCHEME ({})", scheme),
        _ => format!("COMPLEX ({})", scheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme_of(lines: &[&str], window: usize) -> SchemeResult {
        detect_scheme(lines, window)
    }

    #[test]
    fn alternate_quatrain() {
        let lines = [
            "και φως το γέμισε ο ουρανός",
            "χτυπούσε μόνη μια καρδιά",
            "άναψε απόψε ο φανός",
            "μου τραγουδούσε η ξενιτιά",
        ];
        let result = scheme_of(&lines, 3);
        assert_eq!(result.scheme, "ABAB");
        assert_eq!(result.pattern, "ALTERNATE");
        assert_eq!(result.groups[&'A'], vec![0, 2]);
        assert_eq!(result.groups[&'B'], vec![1, 3]);
        assert_eq!(result.rhyming_lines, 4);
    }

    #[test]
    fn couplets() {
        let lines = [
            "τραγούδι του ουρανού",
            "κυνηγητό του νου",
            "στου κόσμου την αυλή",
            "άνοιξε μια πληγή",
        ];
        let result = scheme_of(&lines, 3);
        assert_eq!(result.scheme, "AABB");
        assert_eq!(result.pattern, "COUPLETS");
    }

    #[test]
    fn unrhymed_lines_get_the_sentinel() {
        let lines = [
            "ένα πρωινό με σύννεφα",
            "η θάλασσα μονάχη",
            "περπάτησα στην άμμο",
        ];
        let result = scheme_of(&lines, 3);
        assert_eq!(result.scheme, "XXX");
        assert_eq!(result.pattern, "UNRHYMED");
        assert_eq!(result.rhyming_lines, 0);
        assert!(result.connections.is_empty());
    }

    #[test]
    fn short_lines_are_skipped() {
        let lines = ["ναι", "τραγούδι του ουρανού", "κυνηγητό του νου"];
        let result = scheme_of(&lines, 3);
        assert_eq!(result.scheme, "XAA");
    }

    #[test]
    fn too_few_lines() {
        let result = scheme_of(&["μοναχική γραμμή"], 3);
        assert_eq!(result.pattern, "NONE");
        assert_eq!(result.scheme, "");
        assert_eq!(result.total_lines, 1);
    }

    #[test]
    fn window_limits_connections() {
        let lines = [
            "και φως το γέμισε ο ουρανός",
            "η θάλασσα μονάχη απλώνεται",
            "περπάτησα μες στ' άδειο δείλι",
            "ξανά δικός μου ο ουρανός",
        ];
        // distance 3 exceeds a window of 2, so nothing connects
        let result = scheme_of(&lines, 2);
        assert_eq!(result.scheme, "XXXX");

        let wide = scheme_of(&lines, 3);
        assert_eq!(wide.scheme, "AXXA");
    }

    #[test]
    fn imperfect_quality_widens_the_net() {
        let lines = ["κάτι χάνεται", "και τίποτα δε γίνεται"];
        let strict = scheme_of(&lines, 3);
        assert_eq!(strict.scheme, "XX");

        let relaxed = detect_scheme_with(
            &lines,
            SchemeOptions { min_quality: RhymeQuality::Imperfect, ..SchemeOptions::default() },
        );
        assert_eq!(relaxed.scheme, "AA");
    }

    #[test]
    fn bridging_connection_merges_label_groups() {
        // consonant compatibility is not transitive: s/k, m/p and k/p pass
        // the feature check while s/m and m/k do not, so two groups form
        // before the last connection bridges them
        let lines = ["πάσα", "λάμα", "πλάκα", "μάπα"];
        let result = detect_scheme_with(
            &lines,
            SchemeOptions {
                window: 2,
                min_quality: RhymeQuality::Imperfect,
                ..SchemeOptions::default()
            },
        );
        assert_eq!(result.scheme, "AAAA");
        assert_eq!(result.pattern, "MONORHYME");
        assert_eq!(result.groups[&'A'], vec![0, 1, 2, 3]);
        assert!(!result.groups.contains_key(&'B'));
        assert_eq!(result.connections.len(), 3);
    }

    #[test]
    fn pattern_names() {
        let empty = BTreeMap::new();
        assert_eq!(identify_pattern("XXXX", &empty), "UNRHYMED");
        assert_eq!(identify_pattern("ABAB", &empty), "ALTERNATE");
        assert_eq!(identify_pattern("ABABAB", &empty), "CONTINUOUS ALTERNATE");
        assert_eq!(identify_pattern("AABBCCDD", &empty), "CONTINUOUS COUPLETS");
        assert_eq!(identify_pattern("ABABX", &empty), "ALTERNATE (starts ABABX)");
        assert_eq!(
            identify_pattern("ABABCDCDEFEFGG", &empty),
            "SONNET (Shakespearean)"
        );
    }

    #[test]
    fn generic_descriptors() {
        let mut groups = BTreeMap::new();
        groups.insert('A', vec![0, 2, 4]);
        assert_eq!(
            identify_pattern("AXAXA", &groups),
            "COMPLEX CROSS-RHYME (max 3 lines)"
        );

        let mut two = BTreeMap::new();
        two.insert('A', vec![0, 1]);
        assert_eq!(identify_pattern("AAXX", &two), "TWO-RHYME SCHEME (AAXX)");

        let mut pairs = BTreeMap::new();
        pairs.insert('A', vec![0, 3]);
        pairs.insert('B', vec![1, 2]);
        assert_eq!(identify_pattern("ABBA", &pairs), "ENCLOSED");
        // the sentinel counts as a letter, pushing this past two distinct
        assert_eq!(identify_pattern("AABX", &pairs), "COMPLEX (AABX)");
    }
}
