//! Delimited text files of `lat,lng` pairs
//!
//! One coordinate pair per line, in degrees, latitude first:
//! - Delimiter auto-detected (comma, semicolon, tab or whitespace)
//! - Optional header line such as `lat,lng` or `latitude,longitude`
//! - Blank lines and `#` comments are skipped

use crate::error::IoError;
use geosimplify_core::LatLng;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::debug;

/// Supported field separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    /// Any run of spaces or tabs
    Whitespace,
}

impl Delimiter {
    /// Character written between fields
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Whitespace => ' ',
        }
    }

    /// Detect the delimiter used on a line.
    ///
    /// Explicit separators win over whitespace, so `45.0, -85.0` is comma
    /// separated. Returns `None` for a line with a single field.
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.matches(';').count(), Delimiter::Semicolon),
            (line.matches('\t').count(), Delimiter::Tab),
        ];

        // First of the most frequent explicit separators
        let explicit = counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .fold(None, |best: Option<(usize, Delimiter)>, &(count, delimiter)| match best {
                Some((top, _)) if top >= count => best,
                _ => Some((count, delimiter)),
            })
            .map(|(_, delimiter)| delimiter);

        explicit.or_else(|| line.contains(' ').then_some(Delimiter::Whitespace))
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Whitespace => line.split_whitespace().collect(),
            _ => line.split(self.as_char()).map(str::trim).collect(),
        }
    }
}

const LAT_NAMES: [&str; 3] = ["lat", "latitude", "y"];
const LNG_NAMES: [&str; 5] = ["lng", "lon", "long", "longitude", "x"];

fn is_header(fields: &[&str]) -> bool {
    match fields {
        [lat, lng] => {
            LAT_NAMES.contains(&lat.to_lowercase().as_str())
                && LNG_NAMES.contains(&lng.to_lowercase().as_str())
        }
        _ => false,
    }
}

fn parse_coordinate(field: &str, what: &str, line: usize) -> Result<f64, IoError> {
    field
        .parse::<f64>()
        .map_err(|_| IoError::parse(line, format!("invalid {} '{}'", what, field)))
}

fn parse_fields(fields: &[&str], line: usize) -> Result<LatLng, IoError> {
    let [lat, lng] = fields else {
        return Err(IoError::parse(
            line,
            format!("expected 2 fields (lat, lng), found {}", fields.len()),
        ));
    };
    let lat = parse_coordinate(lat, "latitude", line)?;
    let lng = parse_coordinate(lng, "longitude", line)?;

    let latlng = LatLng::from_degrees(lat, lng);
    if !latlng.is_valid() {
        return Err(IoError::parse(
            line,
            format!("coordinate ({}, {}) is out of range", lat, lng),
        ));
    }
    Ok(latlng)
}

/// Parse coordinate pairs from any buffered reader
pub fn parse_latlngs<R: BufRead>(reader: R) -> Result<Vec<LatLng>, IoError> {
    let mut delimiter = None;
    let mut latlngs = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let current = match delimiter {
            Some(d) => d,
            None => {
                let detected = Delimiter::detect_from_line(content).ok_or_else(|| {
                    IoError::parse(line_number, "could not detect a field delimiter")
                })?;
                debug!(?detected, line = line_number, "detected delimiter");
                delimiter = Some(detected);

                let fields = detected.split(content);
                if is_header(&fields) {
                    continue;
                }
                detected
            }
        };

        latlngs.push(parse_fields(&current.split(content), line_number)?);
    }

    Ok(latlngs)
}

/// Read coordinate pairs from a file
pub fn read_latlngs<P: AsRef<Path>>(path: P) -> Result<Vec<LatLng>, IoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })?;
    let latlngs = parse_latlngs(BufReader::new(file))?;
    debug!(path = %path.display(), points = latlngs.len(), "read coordinates");
    Ok(latlngs)
}

/// Write a header line and one coordinate pair per line
pub fn write_latlngs_to<W: Write>(
    writer: &mut W,
    latlngs: &[LatLng],
    delimiter: Delimiter,
) -> Result<(), IoError> {
    let sep = delimiter.as_char();
    writeln!(writer, "lat{}lng", sep)?;
    for latlng in latlngs {
        writeln!(writer, "{}{}{}", latlng.lat_degrees(), sep, latlng.lng_degrees())?;
    }
    Ok(())
}

/// Write coordinate pairs to a file, replacing it if it exists
pub fn write_latlngs<P: AsRef<Path>>(
    path: P,
    latlngs: &[LatLng],
    delimiter: Delimiter,
) -> Result<(), IoError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_latlngs_to(&mut writer, latlngs, delimiter)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn parse(text: &str) -> Result<Vec<LatLng>, IoError> {
        parse_latlngs(text.as_bytes())
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(Delimiter::detect_from_line("1.0,2.0"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1.0, 2.0"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1.0;2.0"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::detect_from_line("1.0\t2.0"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::detect_from_line("1.0   2.0"), Some(Delimiter::Whitespace));
        assert_eq!(Delimiter::detect_from_line("  1.0  "), None);
    }

    #[test]
    fn test_parse_with_header_and_comments() {
        let text = "# survey points\nLatitude, Longitude\n45.5, -85.25\n\n  46.0,-86.0  \n";
        let latlngs = parse(text).unwrap();
        assert_eq!(latlngs.len(), 2);
        assert_relative_eq!(latlngs[0].lat_degrees(), 45.5, epsilon = 1e-12);
        assert_relative_eq!(latlngs[0].lng_degrees(), -85.25, epsilon = 1e-12);
        assert_relative_eq!(latlngs[1].lng_degrees(), -86.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_whitespace_without_header() {
        let latlngs = parse("1 2\n3\t 4\n").unwrap();
        assert_eq!(latlngs.len(), 2);
        assert_relative_eq!(latlngs[1].lat_degrees(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_errors_report_line() {
        match parse("lat,lng\n1,2\n1,abc\n") {
            Err(IoError::ParseError { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("longitude"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }

        assert!(matches!(parse("1,2,3\n"), Err(IoError::ParseError { line: 1, .. })));
        assert!(matches!(parse("1,2\n95,0\n"), Err(IoError::ParseError { line: 2, .. })));
        assert!(matches!(parse("0,181\n"), Err(IoError::ParseError { line: 1, .. })));
        assert!(matches!(parse("foo,bar\n"), Err(IoError::ParseError { line: 1, .. })));
        assert!(matches!(parse("12\n"), Err(IoError::ParseError { line: 1, .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("geosimplify_io_{}.csv", std::process::id()));
        let latlngs = vec![
            LatLng::from_degrees(45.03008967256179, -85.63249468803406),
            LatLng::from_degrees(-12.5, 130.25),
        ];

        write_latlngs(&path, &latlngs, Delimiter::Tab).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("lat\tlng\n"));

        let read = read_latlngs(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(read.len(), 2);
        for (a, b) in latlngs.iter().zip(&read) {
            assert_relative_eq!(a.lat, b.lat, epsilon = 1e-15);
            assert_relative_eq!(a.lng, b.lng, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_latlngs("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
