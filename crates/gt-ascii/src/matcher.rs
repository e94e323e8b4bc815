use gt_core::preset::BrightnessTable;

/// Écart maximal (exclusif) accepté entre une luminance et celle d'un caractère.
pub const MATCH_THRESHOLD: f64 = 10.0;

/// Caractère émis quand aucune entrée n'est assez proche.
pub const BLANK: char = ' ';

/// Choisit le caractère dont la luminance est la plus proche de `value`.
///
/// Parcours linéaire dans l'ordre de la table ; à égalité, la première
/// entrée rencontrée reste. Sans entrée à moins de [`MATCH_THRESHOLD`],
/// retourne [`BLANK`].
///
/// # Example
/// ```
/// use gt_ascii::matcher::nearest_symbol;
/// use gt_core::preset::BrightnessTable;
/// let table: BrightnessTable = [('a', 0.0), ('b', 5.0), ('c', 9.9)].into_iter().collect();
/// assert_eq!(nearest_symbol(5.0, &table), 'b');
/// assert_eq!(nearest_symbol(20.0, &table), ' ');
/// ```
#[inline]
#[must_use]
pub fn nearest_symbol(value: f64, table: &BrightnessTable) -> char {
    let mut best_difference = MATCH_THRESHOLD;
    let mut result = BLANK;
    for (symbol, brightness) in table.iter() {
        let difference = (value - brightness).abs();
        if difference < best_difference {
            best_difference = difference;
            result = symbol;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(char, f64)]) -> BrightnessTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn exact_match_wins() {
        let t = table(&[('a', 0.0), ('b', 5.0), ('c', 9.9)]);
        assert_eq!(nearest_symbol(5.0, &t), 'b');
        assert_eq!(nearest_symbol(9.0, &t), 'c');
        assert_eq!(nearest_symbol(1.0, &t), 'a');
    }

    #[test]
    fn nothing_within_threshold_is_blank() {
        let t = table(&[('a', 0.0), ('b', 5.0), ('c', 9.9)]);
        assert_eq!(nearest_symbol(20.0, &t), BLANK);
    }

    #[test]
    fn threshold_is_strict() {
        let t = table(&[('a', 0.0)]);
        assert_eq!(nearest_symbol(10.0, &t), BLANK);
        assert_eq!(nearest_symbol(-10.0, &t), BLANK);
        assert_eq!(nearest_symbol(9.5, &t), 'a');
    }

    #[test]
    fn tie_keeps_first_seen() {
        let t = table(&[('a', 3.0), ('b', 3.0)]);
        assert_eq!(nearest_symbol(3.0, &t), 'a');

        let t = table(&[('x', 2.0), ('y', 4.0)]);
        assert_eq!(nearest_symbol(3.0, &t), 'x');
    }

    #[test]
    fn empty_table_is_blank() {
        assert_eq!(nearest_symbol(0.0, &BrightnessTable::new()), BLANK);
    }

    #[test]
    fn nan_is_blank() {
        let t = table(&[('a', 0.0)]);
        assert_eq!(nearest_symbol(f64::NAN, &t), BLANK);
    }
}
