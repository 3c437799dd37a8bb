//! Chronological ordering of images from EXIF date fields.
//!
//! Each image is read metadata-only (no pixel decode). The recognized date
//! fields are consulted in a fixed priority order; the first one that parses
//! under the EXIF datetime format wins and later fields are never looked at.
//! Images with no usable timestamp are dropped from the chronological
//! sequence entirely.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Date fields in priority order.
const DATE_FIELDS: [Tag; 3] = [Tag::DateTime, Tag::DateTimeDigitized, Tag::DateTimeOriginal];

/// The fixed EXIF datetime format, e.g. "2015:12:29 10:00:00".
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// An image path paired with its extracted capture timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedPath {
    pub path: PathBuf,
    pub taken_at: NaiveDateTime,
}

/// Derives a chronologically ascending path sequence from EXIF metadata.
pub struct TemporalResolver;

impl TemporalResolver {
    /// Resolve timestamps for all paths and sort ascending.
    ///
    /// The sort is stable: images with equal timestamps keep their relative
    /// input order. Output length is the number of images with a usable
    /// timestamp; the rest are silently excluded (logged at DEBUG).
    pub fn resolve(paths: &[PathBuf]) -> Vec<TimestampedPath> {
        let mut timeline: Vec<TimestampedPath> = paths
            .iter()
            .filter_map(|path| {
                match Self::extract_timestamp(path) {
                    Some(taken_at) => Some(TimestampedPath {
                        path: path.clone(),
                        taken_at,
                    }),
                    None => {
                        tracing::debug!("No usable date field in {:?}, excluded from timeline", path);
                        None
                    }
                }
            })
            .collect();

        timeline.sort_by_key(|entry| entry.taken_at);
        timeline
    }

    /// Extract the capture timestamp from one image, metadata-only.
    ///
    /// A field whose value is empty or fails to parse under the fixed
    /// format is treated exactly like an absent field: the next field in
    /// priority order is consulted.
    pub fn extract_timestamp(path: &Path) -> Option<NaiveDateTime> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new().read_from_container(&mut reader).ok()?;

        for tag in DATE_FIELDS {
            let Some(field) = exif.get_field(tag, In::PRIMARY) else {
                continue;
            };
            let raw = field.display_value().to_string();
            let value = raw.trim_matches('"').trim();
            if value.is_empty() {
                continue;
            }
            match NaiveDateTime::parse_from_str(value, EXIF_DATETIME_FORMAT) {
                Ok(taken_at) => return Some(taken_at),
                Err(e) => {
                    tracing::debug!("Unparseable {tag} value {value:?} in {:?}: {e}", path);
                    continue;
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::experimental::Writer;
    use exif::{Field, Value};
    use std::io::Cursor;

    /// Write a minimal TIFF-format EXIF container holding the given
    /// datetime fields, readable back by the resolver.
    fn write_exif_fixture(dir: &Path, name: &str, fields: &[(Tag, &str)]) -> PathBuf {
        let path = dir.join(name);

        let owned: Vec<Field> = fields
            .iter()
            .map(|(tag, value)| Field {
                tag: *tag,
                ifd_num: In::PRIMARY,
                value: Value::Ascii(vec![value.as_bytes().to_vec()]),
            })
            .collect();

        let mut writer = Writer::new();
        for field in &owned {
            writer.push_field(field);
        }
        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, false).unwrap();

        std::fs::write(&path, buf.into_inner()).unwrap();
        path
    }

    #[test]
    fn test_extract_missing_file() {
        assert!(TemporalResolver::extract_timestamp(Path::new("/nonexistent/a.jpg")).is_none());
    }

    #[test]
    fn test_extract_no_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]))
            .save(&path)
            .unwrap();

        assert!(TemporalResolver::extract_timestamp(&path).is_none());
    }

    #[test]
    fn test_first_field_in_priority_order_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_exif_fixture(
            dir.path(),
            "both.tif",
            &[
                (Tag::DateTime, "2016:01:01 00:00:00"),
                (Tag::DateTimeOriginal, "2010:05:05 12:00:00"),
            ],
        );

        let taken_at = TemporalResolver::extract_timestamp(&path).unwrap();
        assert_eq!(taken_at.format("%Y:%m:%d %H:%M:%S").to_string(), "2016:01:01 00:00:00");
    }

    #[test]
    fn test_garbage_value_falls_through_to_next_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_exif_fixture(
            dir.path(),
            "partial.tif",
            &[
                (Tag::DateTime, "not a datetime"),
                (Tag::DateTimeDigitized, "2015:12:29 10:00:00"),
            ],
        );

        let taken_at = TemporalResolver::extract_timestamp(&path).unwrap();
        assert_eq!(taken_at.format("%Y:%m:%d %H:%M:%S").to_string(), "2015:12:29 10:00:00");
    }

    #[test]
    fn test_resolve_sorts_and_drops() {
        let dir = tempfile::tempdir().unwrap();

        let newer = write_exif_fixture(
            dir.path(),
            "newer.tif",
            &[(Tag::DateTime, "2016:01:01 00:00:00")],
        );
        let older = write_exif_fixture(
            dir.path(),
            "older.tif",
            &[(Tag::DateTimeOriginal, "2015:12:29 10:00:00")],
        );
        let undated = dir.path().join("undated.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]))
            .save(&undated)
            .unwrap();

        let timeline =
            TemporalResolver::resolve(&[newer.clone(), undated, older.clone()]);

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].path, older);
        assert_eq!(timeline[1].path, newer);
        assert!(timeline[0].taken_at <= timeline[1].taken_at);
    }

    #[test]
    fn test_resolve_equal_timestamps_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();

        let first = write_exif_fixture(
            dir.path(),
            "b_first.tif",
            &[(Tag::DateTime, "2015:12:29 10:00:00")],
        );
        let second = write_exif_fixture(
            dir.path(),
            "a_second.tif",
            &[(Tag::DateTime, "2015:12:29 10:00:00")],
        );

        let timeline = TemporalResolver::resolve(&[first.clone(), second.clone()]);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].path, first);
        assert_eq!(timeline[1].path, second);
    }

    #[test]
    fn test_resolve_empty_input() {
        assert!(TemporalResolver::resolve(&[]).is_empty());
    }
}
