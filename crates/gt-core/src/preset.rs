use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::frame::BrightnessGrid;
use crate::sampler::{average_brightness, block_fits};

/// Table caractère → luminance, dans l'ordre d'insertion.
///
/// L'ordre compte : à distance égale, le premier caractère inséré gagne.
/// Réinsérer un caractère met à jour sa valeur sans changer sa position.
///
/// # Example
/// ```
/// use gt_core::preset::BrightnessTable;
/// let mut table = BrightnessTable::new();
/// table.insert('a', 1.0);
/// table.insert('b', 2.0);
/// table.insert('a', 3.0);
/// assert_eq!(table.get('a'), Some(3.0));
/// assert_eq!(table.iter().map(|(c, _)| c).collect::<String>(), "ab");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrightnessTable {
    entries: Vec<(char, f64)>,
}

impl BrightnessTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `symbol`.
    pub fn insert(&mut self, symbol: char, brightness: f64) {
        match self.entries.iter_mut().find(|(c, _)| *c == symbol) {
            Some(entry) => entry.1 = brightness,
            None => self.entries.push((symbol, brightness)),
        }
    }

    #[must_use]
    pub fn get(&self, symbol: char) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|&(c, v)| (c == symbol).then_some(v))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(char, f64)> for BrightnessTable {
    fn from_iter<I: IntoIterator<Item = (char, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (c, v) in iter {
            table.insert(c, v);
        }
        table
    }
}

impl Serialize for BrightnessTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        let mut buf = [0u8; 4];
        for &(c, v) in &self.entries {
            map.serialize_entry(c.encode_utf8(&mut buf), &v)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = BrightnessTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping single characters to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut table = BrightnessTable::new();
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => table.insert(c, value),
                _ => {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Str(&key),
                        &"a single character",
                    ));
                }
            }
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for BrightnessTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

/// Preset de conversion : taille de cellule et luminance de chaque caractère.
///
/// Format persistant (JSON) : `{"width": .., "height": .., "brightness": {..}}`.
///
/// # Example
/// ```
/// use gt_core::preset::Preset;
/// let preset = Preset::default();
/// assert_eq!(preset.cell_width, 0);
/// assert!(preset.brightness.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Largeur d'une cellule caractère en pixels.
    #[serde(rename = "width")]
    pub cell_width: u32,
    /// Hauteur d'une cellule caractère en pixels.
    #[serde(rename = "height")]
    pub cell_height: u32,
    /// Luminance moyenne de chaque caractère.
    pub brightness: BrightnessTable,
}

impl Preset {
    /// Calibre un preset à partir d'une capture d'écran de texte.
    ///
    /// `reference_text` est découpé en lignes ; la ligne `i`, caractère `j`
    /// occupe la cellule dont le coin haut-gauche est
    /// `(origin_x + j × cell_width, origin_y + i × cell_height)`.
    /// Un caractère répété prend la valeur de sa dernière occurrence.
    ///
    /// Every cell is checked before any sampling, so a failed call leaves
    /// no partial result.
    ///
    /// # Errors
    /// `InvalidDimensions` for a zero cell size, `OutOfBounds` if any
    /// cell extends past the screenshot.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::BrightnessGrid;
    /// use gt_core::preset::Preset;
    /// let screen = BrightnessGrid::from_values(2, 1, vec![0.0, 255.0]).unwrap();
    /// let preset = Preset::generate(&screen, ".#", 1, 1, (0, 0)).unwrap();
    /// assert_eq!(preset.brightness.get('#'), Some(255.0));
    /// ```
    pub fn generate(
        screen: &BrightnessGrid,
        reference_text: &str,
        cell_width: u32,
        cell_height: u32,
        origin: (u32, u32),
    ) -> Result<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: cell_width,
                height: cell_height,
            });
        }

        let cells = layout_cells(reference_text, cell_width, cell_height, origin);
        if let Some(&(_, x, y)) = cells
            .iter()
            .find(|&&(_, x, y)| !block_fits(screen, x, y, cell_width, cell_height))
        {
            return Err(CoreError::OutOfBounds {
                x,
                y,
                width: cell_width,
                height: cell_height,
                grid_width: screen.width,
                grid_height: screen.height,
            });
        }

        let brightness = cells
            .into_iter()
            .map(|(symbol, x, y)| {
                (
                    symbol,
                    average_brightness(screen, x, y, cell_width, cell_height),
                )
            })
            .collect::<BrightnessTable>();

        log::debug!(
            "Preset calibré : {} caractères, cellule {cell_width}×{cell_height}",
            brightness.len()
        );

        Ok(Self {
            cell_width,
            cell_height,
            brightness,
        })
    }

    /// Charge un preset JSON.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Format` if it is not valid JSON or
    /// misses `width`, `height` or `brightness`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::Format {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Sauvegarde en JSON indenté (4 espaces). N'écrase jamais un fichier existant.
    ///
    /// # Errors
    /// `AlreadyExists` if `path` is present (the file is left untouched),
    /// `Io` on any other write failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut json, formatter);
        self.serialize(&mut ser).map_err(|e| io_err(e.into()))?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(CoreError::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(&json).map_err(io_err)?;
        log::info!("Preset sauvegardé : {}", path.display());
        Ok(())
    }
}

/// (symbol, x, y) for every character of the reference text, row-major.
fn layout_cells(
    reference_text: &str,
    cell_width: u32,
    cell_height: u32,
    (origin_x, origin_y): (u32, u32),
) -> Vec<(char, u32, u32)> {
    let mut cells = Vec::new();
    let mut y = origin_y;
    for line in reference_text.split('\n') {
        // "\r\n" : le '\r' n'est pas un caractère de la capture.
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut x = origin_x;
        for symbol in line.chars() {
            cells.push((symbol, x, y));
            x = x.saturating_add(cell_width);
        }
        y = y.saturating_add(cell_height);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4×4 screen where each 2×2 quadrant holds a distinct value.
    fn quadrant_screen() -> BrightnessGrid {
        #[rustfmt::skip]
        let values = vec![
            10.0, 10.0, 20.0, 20.0,
            10.0, 10.0, 20.0, 20.0,
            30.0, 30.0, 40.0, 40.0,
            30.0, 30.0, 40.0, 40.0,
        ];
        BrightnessGrid::from_values(4, 4, values).unwrap()
    }

    #[test]
    fn generate_samples_one_block_per_character() {
        let preset = Preset::generate(&quadrant_screen(), "ab\ncd", 2, 2, (0, 0)).unwrap();
        assert_eq!((preset.cell_width, preset.cell_height), (2, 2));
        let entries: Vec<_> = preset.brightness.iter().collect();
        assert_eq!(
            entries,
            vec![('a', 10.0), ('b', 20.0), ('c', 30.0), ('d', 40.0)]
        );
    }

    #[test]
    fn generate_honours_origin() {
        let preset = Preset::generate(&quadrant_screen(), "x", 2, 2, (2, 2)).unwrap();
        assert_eq!(preset.brightness.get('x'), Some(40.0));
    }

    #[test]
    fn repeated_character_takes_last_sample() {
        let preset = Preset::generate(&quadrant_screen(), "aa\nba", 2, 2, (0, 0)).unwrap();
        assert_eq!(preset.brightness.len(), 2);
        assert_eq!(preset.brightness.get('a'), Some(40.0));
        assert_eq!(preset.brightness.iter().next(), Some(('a', 40.0)));
    }

    #[test]
    fn crlf_reference_text_matches_lf() {
        let lf = Preset::generate(&quadrant_screen(), "ab\ncd\n", 2, 2, (0, 0)).unwrap();
        let crlf = Preset::generate(&quadrant_screen(), "ab\r\ncd\r\n", 2, 2, (0, 0)).unwrap();
        assert_eq!(crlf, lf);
        assert_eq!(crlf.brightness.get('\r'), None);
    }

    #[test]
    fn generate_rejects_cells_outside_screen() {
        let err = Preset::generate(&quadrant_screen(), "abc", 2, 2, (0, 0)).unwrap_err();
        assert!(matches!(err, CoreError::OutOfBounds { x: 4, y: 0, .. }));

        let err = Preset::generate(&quadrant_screen(), "a\nb", 2, 2, (0, 1)).unwrap_err();
        assert!(matches!(err, CoreError::OutOfBounds { x: 0, y: 3, .. }));
    }

    #[test]
    fn generate_rejects_zero_cell() {
        assert!(matches!(
            Preset::generate(&quadrant_screen(), "a", 0, 2, (0, 0)),
            Err(CoreError::InvalidDimensions { width: 0, height: 2 })
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        let preset = Preset {
            cell_width: 7,
            cell_height: 15,
            brightness: [('z', 0.1), ('é', 123.456_789), (' ', 0.0), ('"', 1e-7)]
                .into_iter()
                .collect(),
        };
        preset.save(&path).unwrap();
        let loaded = Preset::load(&path).unwrap();
        assert_eq!(loaded, preset);
    }

    #[test]
    fn save_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, "curated").unwrap();

        let err = Preset::default().save(&path).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "curated");
    }

    #[test]
    fn load_keeps_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(
            &path,
            r#"{"width": 8, "height": 16, "brightness": {"b": 0.5, "a": 0.25}}"#,
        )
        .unwrap();
        let preset = Preset::load(&path).unwrap();
        assert_eq!((preset.cell_width, preset.cell_height), (8, 16));
        let order: String = preset.brightness.iter().map(|(c, _)| c).collect();
        assert_eq!(order, "ba");
    }

    #[test]
    fn load_rejects_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, r#"{"width": 8, "brightness": {}}"#).unwrap();
        assert!(matches!(
            Preset::load(&path),
            Err(CoreError::Format { .. })
        ));
    }

    #[test]
    fn load_rejects_multi_character_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, r#"{"width": 1, "height": 1, "brightness": {"ab": 1.0}}"#)
            .unwrap();
        assert!(matches!(
            Preset::load(&path),
            Err(CoreError::Format { .. })
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Preset::load(&dir.path().join("absent.json")),
            Err(CoreError::Io { .. })
        ));
    }
}
