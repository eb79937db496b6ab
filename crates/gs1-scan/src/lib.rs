//! GS1-128 Label Parsing
//!
//! Parses the label subset printed on box labels in the plant:
//! `01<14-digit GTIN>3100<6-digit weight>10<lot>`, where application
//! identifier `3100` carries a net weight in kilograms scaled by 100 and
//! `3200` the same weight in pounds. Scanners paste one code per line, so
//! batches are parsed line by line and a bad line never aborts its siblings.

use std::fmt;

/// Weight unit encoded by the weight application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilograms,
    Pounds,
}

/// One successfully parsed label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedBox {
    pub gtin: String,
    pub weight: f64,
    pub unit: WeightUnit,
    pub lot: String,
}

/// Why a label failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    Empty,
    MissingGtinIdentifier,
    BadGtin,
    MissingWeightIdentifier,
    BadWeight,
    MissingLot,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Empty => write!(f, "empty code"),
            ScanError::MissingGtinIdentifier => write!(f, "code does not start with identifier 01"),
            ScanError::BadGtin => write!(f, "GTIN is not 14 digits"),
            ScanError::MissingWeightIdentifier => write!(f, "missing weight identifier 3100/3200"),
            ScanError::BadWeight => write!(f, "weight field is not 6 digits"),
            ScanError::MissingLot => write!(f, "missing lot after identifier 10"),
        }
    }
}

impl std::error::Error for ScanError {}

const GTIN_LEN: usize = 14;
const WEIGHT_LEN: usize = 6;

fn take_digits(input: &str, len: usize) -> Option<(&str, &str)> {
    if input.len() < len || !input.as_bytes()[..len].iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(input.split_at(len))
}

/// Parse a single scanned/pasted label.
pub fn parse_label(code: &str) -> Result<ScannedBox, ScanError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ScanError::Empty);
    }
    let rest = code.strip_prefix("01").ok_or(ScanError::MissingGtinIdentifier)?;
    let (gtin, rest) = take_digits(rest, GTIN_LEN).ok_or(ScanError::BadGtin)?;

    let (unit, rest) = if let Some(rest) = rest.strip_prefix("3100") {
        (WeightUnit::Kilograms, rest)
    } else if let Some(rest) = rest.strip_prefix("3200") {
        (WeightUnit::Pounds, rest)
    } else {
        return Err(ScanError::MissingWeightIdentifier);
    };
    let (raw_weight, rest) = take_digits(rest, WEIGHT_LEN).ok_or(ScanError::BadWeight)?;
    // take_digits guarantees six ASCII digits
    let weight = raw_weight.parse::<u32>().map_err(|_| ScanError::BadWeight)? as f64 / 100.0;

    let lot = rest.strip_prefix("10").ok_or(ScanError::MissingLot)?;
    if lot.is_empty() {
        return Err(ScanError::MissingLot);
    }

    Ok(ScannedBox {
        gtin: gtin.to_string(),
        weight,
        unit,
        lot: lot.to_string(),
    })
}

/// Result of parsing a pasted batch of labels, one per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub boxes: Vec<ScannedBox>,
    /// (1-based line number, error) for every line that failed
    pub failures: Vec<(usize, ScanError)>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.failures.is_empty()
    }

    /// Aggregate message for the failed lines, if any.
    pub fn failure_summary(&self) -> Option<String> {
        match self.failures.len() {
            0 => None,
            1 => Some("1 código no reconocido".to_string()),
            n => Some(format!("{} códigos no reconocidos", n)),
        }
    }
}

/// Parse newline-separated labels independently. Blank lines are skipped.
pub fn parse_lines(input: &str) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_label(line) {
            Ok(parsed) => outcome.boxes.push(parsed),
            Err(err) => outcome.failures.push((idx + 1, err)),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_code(gtin: &str, ai: &str, weight: &str, lot: &str) -> String {
        format!("01{}{}{}10{}", gtin, ai, weight, lot)
    }

    #[test]
    fn test_parse_kilogram_label() {
        let code = make_code("08412345678905", "3100", "001250", "L2409A");
        let parsed = parse_label(&code).expect("should parse");
        assert_eq!(parsed.gtin, "08412345678905");
        assert_eq!(parsed.unit, WeightUnit::Kilograms);
        assert!((parsed.weight - 12.5).abs() < 1e-9);
        assert_eq!(parsed.lot, "L2409A");
    }

    #[test]
    fn test_parse_pound_label() {
        let code = make_code("08412345678905", "3200", "002756", "LOTE-7");
        let parsed = parse_label(&code).expect("should parse");
        assert_eq!(parsed.unit, WeightUnit::Pounds);
        assert!((parsed.weight - 27.56).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_prefix_is_an_error_not_a_panic() {
        assert_eq!(parse_label("9908412345678905310000125010A"), Err(ScanError::MissingGtinIdentifier));
    }

    #[test]
    fn test_short_gtin() {
        assert_eq!(parse_label("018412345678310000125010A"), Err(ScanError::BadGtin));
    }

    #[test]
    fn test_non_numeric_weight() {
        let code = make_code("08412345678905", "3100", "12X450", "A");
        assert_eq!(parse_label(&code), Err(ScanError::BadWeight));
    }

    #[test]
    fn test_missing_weight_identifier() {
        assert_eq!(
            parse_label("0108412345678905330000125010A"),
            Err(ScanError::MissingWeightIdentifier)
        );
    }

    #[test]
    fn test_missing_lot() {
        assert_eq!(
            parse_label("01084123456789053100001250"),
            Err(ScanError::MissingLot)
        );
        assert_eq!(
            parse_label("0108412345678905310000125010"),
            Err(ScanError::MissingLot)
        );
    }

    #[test]
    fn test_batch_keeps_good_lines_when_one_fails() {
        let input = format!(
            "{}\nnot-a-code\n\n{}",
            make_code("08412345678905", "3100", "000980", "A1"),
            make_code("08412345678912", "3100", "001540", "B2"),
        );
        let outcome = parse_lines(&input);
        assert_eq!(outcome.boxes.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, 2);
        assert_eq!(outcome.failure_summary().as_deref(), Some("1 código no reconocido"));
    }

    #[test]
    fn test_batch_summary_counts_all_failures() {
        let outcome = parse_lines("bad\nworse\n");
        assert!(outcome.boxes.is_empty());
        assert_eq!(outcome.failure_summary().as_deref(), Some("2 códigos no reconocidos"));
    }
}
