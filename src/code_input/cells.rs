use std::num::NonZeroUsize;

/// Fixed-length sequence of optional digits backing a [`super::CodeInput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cells {
    digits: Vec<Option<u8>>,
}

impl Cells {
    /// Maps every position of `value` below `length` to a digit, or to an empty
    /// cell when the character is missing or not a decimal digit.
    pub fn parse(length: NonZeroUsize, value: &str) -> Self {
        let mut chars = value.chars();
        let digits = (0..length.get())
            .map(|_| chars.next().and_then(|c| c.to_digit(10)).map(|d| d as u8))
            .collect();
        Self { digits }
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied().flatten()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    pub fn populate(&mut self, index: usize, digit: u8) {
        self.digits[index] = Some(digit);
    }

    /// Returns false when the cell was already empty.
    pub fn clear(&mut self, index: usize) -> bool {
        self.digits[index].take().is_some()
    }

    /// Replaces every cell at once. `digits` must hold exactly `len()` digits.
    pub fn fill(&mut self, digits: impl IntoIterator<Item = u8>) {
        for (cell, digit) in self.digits.iter_mut().zip(digits) {
            *cell = Some(digit);
        }
    }

    pub fn find_last_populated_before(&self, index: usize) -> Option<usize> {
        self.digits[..index.min(self.len())]
            .iter()
            .rposition(Option::is_some)
    }

    pub fn find_first_empty_before(&self, index: usize) -> Option<usize> {
        self.digits[..index.min(self.len())]
            .iter()
            .position(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// Populated digits concatenated in order; gaps contribute nothing.
    pub fn value(&self) -> String {
        self.digits
            .iter()
            .flatten()
            .map(|d| char::from(b'0' + d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(length: usize, value: &str) -> Cells {
        Cells::parse(NonZeroUsize::new(length).unwrap(), value)
    }

    #[test]
    fn parse_keeps_length_regardless_of_value() {
        assert_eq!(cells(6, "").len(), 6);
        assert_eq!(cells(6, "123456789").len(), 6);
        assert_eq!(cells(4, "12").value(), "12");
        assert_eq!(cells(4, "123456").value(), "1234");
    }

    #[test]
    fn parse_maps_non_digits_to_empty() {
        let cells = cells(4, "1a 4");
        assert_eq!(cells.get(0), Some(1));
        assert_eq!(cells.get(1), None);
        assert_eq!(cells.get(2), None);
        assert_eq!(cells.get(3), Some(4));
        assert_eq!(cells.value(), "14");
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let mut cells = cells(3, "1");
        assert!(cells.clear(0));
        assert!(!cells.clear(0));
        assert!(!cells.clear(2));
    }

    #[test]
    fn finds_last_populated_strictly_before() {
        let cells = cells(5, "1 3");
        assert_eq!(cells.find_last_populated_before(0), None);
        assert_eq!(cells.find_last_populated_before(2), Some(0));
        assert_eq!(cells.find_last_populated_before(3), Some(2));
        assert_eq!(cells.find_last_populated_before(5), Some(2));
    }

    #[test]
    fn finds_first_empty_strictly_before() {
        let cells = cells(5, "1 3");
        assert_eq!(cells.find_first_empty_before(1), None);
        assert_eq!(cells.find_first_empty_before(2), Some(1));
        assert_eq!(cells.find_first_empty_before(5), Some(1));
        assert_eq!(self::cells(3, "123").find_first_empty_before(3), None);
    }

    #[test]
    fn zero_is_a_digit() {
        let cells = cells(3, "0 0");
        assert_eq!(cells.get(0), Some(0));
        assert_eq!(cells.value(), "00");
        assert!(!cells.is_complete());
    }
}
