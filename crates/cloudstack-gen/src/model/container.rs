//! Ordered, name-unique field collections.

use std::cmp::Ordering;
use serde::Serialize;

use super::field::Field;

/// An ordered collection of fields with unique names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableContainer {
    fields: Vec<Field>,
}

impl VariableContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `field` unless a field with the same name exists.
    ///
    /// Returns `true` when the field was inserted. An existing field is never
    /// replaced.
    pub fn insert_if_absent(&mut self, field: impl Into<Field>) -> bool {
        let field = field.into();
        if self.contains(field.name()) {
            return false;
        }
        self.fields.push(field);
        true
    }

    /// Exact, case-sensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Required fields, in container order.
    pub fn required(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.is_required()).collect()
    }

    /// Stable in-place sort by name, in [`natural_cmp`] order.
    pub fn name_sort(&mut self) {
        self.fields.sort_by(|a, b| natural_cmp(a.name(), b.name()));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a VariableContainer {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Case-sensitive natural order: digit runs compare by numeric value,
/// everything else byte by byte, so `id2` sorts before `id10`.
///
/// Names equal under that rule (`id01` and `id1`) fall back to byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (x, y) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < x.len() && j < y.len() {
        if x[i].is_ascii_digit() && y[j].is_ascii_digit() {
            let (start_i, start_j) = (i, j);
            while i < x.len() && x[i].is_ascii_digit() {
                i += 1;
            }
            while j < y.len() && y[j].is_ascii_digit() {
                j += 1;
            }
            match cmp_digit_runs(&x[start_i..i], &y[start_j..j]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        } else {
            match x[i].cmp(&y[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                ord => return ord,
            }
        }
    }

    (x.len() - i).cmp(&(y.len() - j)).then_with(|| a.cmp(b))
}

fn cmp_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let (a, b) = (trim_leading_zeros(a), trim_leading_zeros(b));
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(digits: &[u8]) -> &[u8] {
    let start = digits.iter().position(|&d| d != b'0').unwrap_or(digits.len());
    &digits[start..]
}
