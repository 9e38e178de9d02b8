use std::fmt;

/// Mismatch annotation value for a read without mismatches.
pub const PERFECT_MATCH: &str = "PM";

/// One `position:base:quality` entry of a mismatch annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub position: u32,
    pub base: String,
    pub qual: u32,
}

/// Decoded second column of a parsed bowtie line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchField {
    Perfect,
    Mismatches(Vec<Mismatch>),
}

impl MismatchField {
    /// Parse `PM` or a comma-separated list of `position:base:quality` entries.
    ///
    /// The quality is the last colon-delimited field and the base is everything between the
    /// position and the quality.
    pub fn parse(field: &str) -> std::result::Result<Self, String> {
        if field == PERFECT_MATCH {
            return Ok(MismatchField::Perfect);
        }

        field
            .split(',')
            .map(parse_mismatch)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(MismatchField::Mismatches)
    }
}

fn parse_mismatch(entry: &str) -> std::result::Result<Mismatch, String> {
    let malformed = || format!("expected \"position:base:quality\" but found \"{}\"", entry);

    let (rest, qual) = entry.rsplit_once(':').ok_or_else(malformed)?;
    let (position, base) = rest.split_once(':').ok_or_else(malformed)?;

    if base.is_empty() {
        return Err(malformed());
    }

    let position = position
        .parse::<u32>()
        .ok()
        .filter(|&p| p >= 1)
        .ok_or_else(|| format!("invalid mismatch position \"{}\" in \"{}\"", position, entry))?;
    let qual = qual
        .parse::<u32>()
        .map_err(|_| format!("invalid quality score \"{}\" in \"{}\"", qual, entry))?;

    Ok(Mismatch {
        position,
        base: base.to_owned(),
        qual,
    })
}

/// Whether every mismatched base has a quality score of at least `threshold`.
///
/// Perfect matches always pass.
pub fn passes_quality(field: &MismatchField, threshold: u32) -> bool {
    match field {
        MismatchField::Perfect => true,
        MismatchField::Mismatches(mms) => mms.iter().all(|m| m.qual >= threshold),
    }
}

/// Quality-free form of a mismatch annotation used to group reads.
pub fn normalize_signature(field: &MismatchField) -> Signature {
    match field {
        MismatchField::Perfect => Signature::default(),
        MismatchField::Mismatches(mms) => Signature(
            mms.iter()
                .map(|m| (m.position, m.base.clone()))
                .collect(),
        ),
    }
}

/// Ordered `(position, base)` pairs of a read's mismatches. Empty for a perfect match.
///
/// Displays as `0` for a perfect match, otherwise as `position:base` entries joined by commas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<(u32, String)>);

impl Signature {
    pub fn entries(&self) -> &[(u32, String)] {
        &self.0
    }

    pub fn is_perfect(&self) -> bool {
        self.0.is_empty()
    }

    pub fn mismatch_count(&self) -> usize {
        self.0.len()
    }

    /// The `idx`-th mismatch, or `(0, "0")` if there are not that many.
    pub fn nth(&self, idx: usize) -> (u32, &str) {
        self.0
            .get(idx)
            .map(|(p, b)| (*p, b.as_str()))
            .unwrap_or((0, "0"))
    }

    /// Like [`Display`](fmt::Display), but a perfect match is written as `PM`.
    pub fn display_name(&self) -> String {
        if self.is_perfect() {
            PERFECT_MATCH.to_owned()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("0");
        }

        for (i, (position, base)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", position, base)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> MismatchField {
        MismatchField::parse(s).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("PM"), MismatchField::Perfect);
        assert_eq!(
            parse("12:A>G:40,20:T>C:35"),
            MismatchField::Mismatches(vec![
                Mismatch {
                    position: 12,
                    base: "A>G".to_owned(),
                    qual: 40
                },
                Mismatch {
                    position: 20,
                    base: "T>C".to_owned(),
                    qual: 35
                },
            ])
        );
    }

    #[test]
    fn test_parse_malformed() {
        for field in ["", "12", "12:40", "12::40", "x:A:40", "0:A:40", "12:A:x", "12:A:40,", "pm"] {
            assert!(MismatchField::parse(field).is_err(), "{field}");
        }
    }

    #[test]
    fn test_passes_quality() {
        for q in [0, 38, 41, 1000] {
            assert!(passes_quality(&parse("PM"), q));
        }

        let field = parse("12:A:40,20:T:35");
        assert!(!passes_quality(&field, 38));
        assert!(passes_quality(&field, 35));
        assert!(!passes_quality(&field, 36));
        assert!(passes_quality(&parse("3:G>A:38"), 38));
    }

    #[test]
    fn test_signature_ignores_quality() {
        let a = normalize_signature(&parse("12:A>G:40,20:T>C:35"));
        let b = normalize_signature(&parse("12:A>G:2,20:T>C:41"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "12:A>G,20:T>C");

        let c = normalize_signature(&parse("20:T>C:35,12:A>G:40"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_signature_perfect() {
        let pm = normalize_signature(&parse("PM"));
        assert!(pm.is_perfect());
        assert_eq!(pm.to_string(), "0");
        assert_eq!(pm.display_name(), "PM");
        assert_eq!(pm.mismatch_count(), 0);
        assert_eq!(pm.nth(0), (0, "0"));
    }

    #[test]
    fn test_signature_columns() {
        let sig = normalize_signature(&parse("5:C>T:40,9:A>G:40,14:G>A:40"));
        assert_eq!(sig.mismatch_count(), 3);
        assert_eq!(sig.nth(0), (5, "C>T"));
        assert_eq!(sig.nth(1), (9, "A>G"));
        assert_eq!(sig.nth(2), (14, "G>A"));
        assert_eq!(sig.nth(3), (0, "0"));
    }
}
