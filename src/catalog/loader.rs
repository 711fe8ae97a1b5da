//! Song catalog file parser
//!
//! The catalog is a tab-delimited text file: a fixed header row, then one
//! row per song with 8 double-quoted fields in the order Name, Artist,
//! Album, Genre, Size, Time, Year, Comments. Song ids are assigned from the
//! 1-based data-row position.

use crate::model::Song;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Header fields every catalog file must begin with, in order
const HEADERS: [&str; 8] = [
    "Name", "Artist", "Album", "Genre", "Size", "Time", "Year", "Comments",
];

/// Parse the catalog file and extract all songs
pub fn parse_catalog(path: &Path) -> Result<Vec<Song>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open song catalog: {:?}", path))?;
    let reader = BufReader::new(file);

    let mut songs = Vec::new();
    let mut saw_header = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line =
            line.with_context(|| format!("Failed to read catalog line {}", line_no))?;
        let fields = split_fields(&line, line_no)?;

        if !saw_header {
            check_header(&fields)?;
            saw_header = true;
            continue;
        }

        let id = songs.len() as u32 + 1;
        songs.push(parse_song(&fields, id, line_no)?);
    }

    if !saw_header {
        bail!("Catalog file is empty: {:?}", path);
    }

    log::info!("Parsed {} songs from catalog {:?}", songs.len(), path);
    Ok(songs)
}

/// Split one catalog line into its 8 fields, with enclosing quotes removed
///
/// Every raw field must be present: a missing field usually means the row
/// was separated by something other than single tabs.
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != HEADERS.len() {
        bail!(
            "Invalid catalog: line {} has {} tab-separated fields, expected {}",
            line_no,
            fields.len(),
            HEADERS.len()
        );
    }
    if fields.iter().any(|f| f.is_empty()) {
        bail!(
            "Invalid catalog: line {} has one or more missing fields",
            line_no
        );
    }

    Ok(fields
        .iter()
        .map(|f| f.replace('"', ""))
        .collect())
}

/// Check the first row carries exactly the expected headers
fn check_header(fields: &[String]) -> Result<()> {
    for (field, expected) in fields.iter().zip(HEADERS) {
        if field != expected {
            bail!(
                "Invalid catalog: incorrect header '{}', expected '{}'",
                field,
                expected
            );
        }
    }
    Ok(())
}

/// Convert one data row into a [`Song`]
fn parse_song(fields: &[String], id: u32, line_no: usize) -> Result<Song> {
    // Name and Artist must survive quote stripping; a quoted-empty value
    // ("") is tolerated everywhere else
    if fields[0].is_empty() || fields[1].is_empty() {
        bail!(
            "Invalid catalog: line {} is missing a Name and/or Artist value",
            line_no
        );
    }

    Ok(Song {
        id,
        title: fields[0].clone(),
        artist: fields[1].clone(),
        album: fields[2].clone(),
        genre: fields[3].clone(),
        size: parse_numeric(&fields[4], "Size", line_no)?,
        duration_secs: parse_numeric(&fields[5], "Time", line_no)?,
        year: parse_numeric(&fields[6], "Year", line_no)?,
        comments: fields[7].clone(),
    })
}

/// Parse a numeric field, treating a quoted-empty value as zero
fn parse_numeric(field: &str, name: &str, line_no: usize) -> Result<u32> {
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().with_context(|| {
        format!(
            "Invalid catalog: line {} has a non-numeric {} value '{}'",
            line_no, name, field
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER_LINE: &str =
        "\"Name\"\t\"Artist\"\t\"Album\"\t\"Genre\"\t\"Size\"\t\"Time\"\t\"Year\"\t\"Comments\"";

    fn write_catalog(dir: &TempDir, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("songs.csv");
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn parses_rows_and_assigns_positional_ids() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            &[
                HEADER_LINE,
                "\"One More Time\"\t\"Daft Punk\"\t\"Discovery\"\t\"House\"\t\"7000\"\t\"320\"\t\"2001\"\t\"None\"",
                "\"Fix You\"\t\"Coldplay\"\t\"X&Y\"\t\"Rock\"\t\"6000\"\t\"295\"\t\"2005\"\t\"None\"",
            ],
        );

        let songs = parse_catalog(&path).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, 1);
        assert_eq!(songs[0].title, "One More Time");
        assert_eq!(songs[0].duration_secs, 320);
        assert_eq!(songs[1].id, 2);
        assert_eq!(songs[1].artist, "Coldplay");
    }

    #[test]
    fn rejects_wrong_headers() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            &["\"Title\"\t\"Artist\"\t\"Album\"\t\"Genre\"\t\"Size\"\t\"Time\"\t\"Year\"\t\"Comments\""],
        );

        let err = parse_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("incorrect header"));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            &[HEADER_LINE, "\"Only\"\t\"Two\""],
        );

        let err = parse_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("expected 8"));
    }

    #[test]
    fn rejects_missing_name_or_artist() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            &[
                HEADER_LINE,
                "\"\"\t\"Artist\"\t\"Album\"\t\"Genre\"\t\"1\"\t\"1\"\t\"1\"\t\"None\"",
            ],
        );

        let err = parse_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("Name and/or Artist"));
    }

    #[test]
    fn quoted_empty_numeric_fields_become_zero() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            &[
                HEADER_LINE,
                "\"Song\"\t\"Artist\"\t\"Album\"\t\"Genre\"\t\"\"\t\"\"\t\"\"\t\"None\"",
            ],
        );

        let songs = parse_catalog(&path).unwrap();
        assert_eq!(songs[0].size, 0);
        assert_eq!(songs[0].duration_secs, 0);
        assert_eq!(songs[0].year, 0);
    }

    #[test]
    fn rejects_missing_file_and_empty_file() {
        let tmp = TempDir::new().unwrap();
        assert!(parse_catalog(&tmp.path().join("absent.csv")).is_err());

        let path = write_catalog(&tmp, &[]);
        let err = parse_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
