use std::collections::HashMap;

use anyhow::{bail, Result};

/// One named column of per-row optional values. Nulls are represented as
/// `None` and survive every table operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Str(Vec<Option<String>>),
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Str(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An all-null string column of the given length. Missing canonical
    /// columns are materialized with this.
    pub fn nulls(len: usize) -> Column {
        Column::Str(vec![None; len])
    }

    pub fn push_null(&mut self) {
        match self {
            Column::Str(v) => v.push(None),
            Column::Int(v) => v.push(None),
            Column::Float(v) => v.push(None),
            Column::Bool(v) => v.push(None),
        }
    }

    /// Cell rendered for TSV output; null becomes the empty string.
    pub fn format_cell(&self, row: usize) -> String {
        match self {
            Column::Str(v) => v[row].clone().unwrap_or_default(),
            Column::Int(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Float(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
            Column::Bool(v) => v[row]
                .map(|x| if x { "T".to_string() } else { "F".to_string() })
                .unwrap_or_default(),
        }
    }

    /// Take the rows at the given positions, in the given order.
    pub fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Str(v) => Column::Str(rows.iter().map(|&r| v[r].clone()).collect()),
            Column::Int(v) => Column::Int(rows.iter().map(|&r| v[r]).collect()),
            Column::Float(v) => Column::Float(rows.iter().map(|&r| v[r]).collect()),
            Column::Bool(v) => Column::Bool(rows.iter().map(|&r| v[r]).collect()),
        }
    }

    /// Append all rows of `other` onto this column. Mixed types degrade to
    /// string, since concatenation happens after per-file typing and files
    /// may disagree on a column's type.
    pub fn append(&mut self, other: &Column) {
        match (&mut *self, other) {
            (Column::Str(a), Column::Str(b)) => a.extend(b.iter().cloned()),
            (Column::Int(a), Column::Int(b)) => a.extend(b.iter().copied()),
            (Column::Float(a), Column::Float(b)) => a.extend(b.iter().copied()),
            (Column::Bool(a), Column::Bool(b)) => a.extend(b.iter().copied()),
            (a, b) => {
                let mut merged = a.to_string_values();
                merged.extend(b.to_string_values());
                *a = Column::Str(merged);
            }
        }
    }

    fn to_string_values(&self) -> Vec<Option<String>> {
        match self {
            Column::Str(v) => v.clone(),
            Column::Int(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            Column::Float(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            Column::Bool(v) => v
                .iter()
                .map(|x| x.map(|x| if x { "T".to_string() } else { "F".to_string() }))
                .collect(),
        }
    }
}

/// An in-memory table of named, equally long columns with a stable column
/// order and stable row order.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    order: Vec<String>,
    columns: HashMap<String, Column>,
    n_rows: usize,
}

impl RecordTable {
    pub fn new() -> RecordTable {
        RecordTable::default()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.order
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Insert a column, or replace it in place if one with the same name
    /// already exists. All columns of a table must have the same length;
    /// the first column inserted fixes the row count.
    pub fn set_column(&mut self, name: &str, column: Column) -> Result<()> {
        if self.order.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            bail!(
                "column {} has {} rows, table has {}",
                name,
                column.len(),
                self.n_rows
            );
        }
        if !self.columns.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.columns.insert(name.to_string(), column);
        Ok(())
    }

    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(col) = self.columns.remove(from) {
            for name in self.order.iter_mut() {
                if name == from {
                    *name = to.to_string();
                }
            }
            self.columns.insert(to.to_string(), col);
        }
    }

    pub fn drop_column(&mut self, name: &str) {
        if self.columns.remove(name).is_some() {
            self.order.retain(|n| n != name);
        }
    }

    /// Borrow a string column's values, or None if the column is absent or
    /// not string-typed.
    pub fn str_column(&self, name: &str) -> Option<&[Option<String>]> {
        match self.columns.get(name) {
            Some(Column::Str(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int_column(&self, name: &str) -> Option<&[Option<i64>]> {
        match self.columns.get(name) {
            Some(Column::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float_column(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.columns.get(name) {
            Some(Column::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn bool_column(&self, name: &str) -> Option<&[Option<bool>]> {
        match self.columns.get(name) {
            Some(Column::Bool(v)) => Some(v),
            _ => None,
        }
    }

    /// One string cell; None when the column is absent, not a string column,
    /// or the cell itself is null.
    pub fn str_cell(&self, name: &str, row: usize) -> Option<&str> {
        self.str_column(name)
            .and_then(|v| v.get(row))
            .and_then(|c| c.as_deref())
    }

    /// A new table with only the named columns, in the given order. Missing
    /// names are skipped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> RecordTable {
        let mut out = RecordTable::new();
        for name in names {
            if let Some(col) = self.columns.get(name.as_ref()) {
                out.set_column(name.as_ref(), col.clone())
                    .expect("selected columns share the source row count");
            }
        }
        out.n_rows = self.n_rows;
        out
    }

    /// A new table holding the rows at the given positions, in that order.
    pub fn take_rows(&self, rows: &[usize]) -> RecordTable {
        let mut out = RecordTable::new();
        for name in &self.order {
            let col = self.columns[name].take(rows);
            out.set_column(name, col)
                .expect("taken columns share a row count");
        }
        out.n_rows = rows.len();
        out
    }

    /// Align the table to a reference field list: every reference field
    /// becomes a column (missing ones as nulls), in reference order, and
    /// non-reference columns are dropped. Equivalent to a right outer join
    /// on column names against an empty reference table.
    pub fn align_to_schema<S: AsRef<str>>(&self, fields: &[S]) -> RecordTable {
        let mut out = RecordTable::new();
        for field in fields {
            let field = field.as_ref();
            let col = match self.columns.get(field) {
                Some(col) => col.clone(),
                None => Column::nulls(self.n_rows),
            };
            out.set_column(field, col)
                .expect("aligned columns share the source row count");
        }
        out.n_rows = self.n_rows;
        out
    }

    /// Ordered concatenation: rows in table-then-row order, column set the
    /// union of all inputs in first-seen order, absent cells null.
    pub fn concat(tables: Vec<RecordTable>) -> RecordTable {
        let mut out = RecordTable::new();
        for table in tables {
            let offset = out.n_rows;
            // pad previously unseen columns up to the current row count
            for name in table.order.iter() {
                if !out.columns.contains_key(name) {
                    out.order.push(name.clone());
                    out.columns.insert(name.clone(), Column::nulls(offset));
                }
            }
            let incoming = table.columns;
            for name in out.order.clone() {
                let col = out.columns.get_mut(&name).expect("column exists");
                match incoming.get(&name) {
                    Some(other) => col.append(other),
                    None => {
                        for _ in 0..table.n_rows {
                            col.push_null();
                        }
                    }
                }
            }
            out.n_rows += table.n_rows;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strcol(vals: &[&str]) -> Column {
        Column::Str(vals.iter().map(|s| Some(s.to_string())).collect())
    }

    #[test]
    fn set_and_rename() {
        let mut t = RecordTable::new();
        t.set_column("aminoAcid", strcol(&["CASS", "CSAR"])).unwrap();
        t.rename_column("aminoAcid", "sequence_aa");
        assert!(t.has_column("sequence_aa"));
        assert!(!t.has_column("aminoAcid"));
        assert_eq!(t.column_names(), &["sequence_aa".to_string()]);
        assert_eq!(t.str_cell("sequence_aa", 1), Some("CSAR"));
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut t = RecordTable::new();
        t.set_column("a", strcol(&["x", "y"])).unwrap();
        assert!(t.set_column("b", strcol(&["x"])).is_err());
    }

    #[test]
    fn align_fills_missing_with_nulls_and_orders() {
        let mut t = RecordTable::new();
        t.set_column("junction", strcol(&["GTC"])).unwrap();
        t.set_column("vendor_extra", strcol(&["z"])).unwrap();
        let aligned = t.align_to_schema(&["sequence", "junction"]);
        assert_eq!(
            aligned.column_names(),
            &["sequence".to_string(), "junction".to_string()]
        );
        assert_eq!(aligned.str_cell("sequence", 0), None);
        assert_eq!(aligned.str_cell("junction", 0), Some("GTC"));
        assert!(!aligned.has_column("vendor_extra"));
    }

    #[test]
    fn concat_unions_columns_and_sums_rows() {
        let mut a = RecordTable::new();
        a.set_column("junction", strcol(&["AAA", "CCC"])).unwrap();
        a.set_column("only_a", strcol(&["1", "2"])).unwrap();

        let mut b = RecordTable::new();
        b.set_column("junction", strcol(&["GGG"])).unwrap();
        b.set_column("only_b", Column::Int(vec![Some(7)])).unwrap();

        let cat = RecordTable::concat(vec![a, b]);
        assert_eq!(cat.n_rows(), 3);
        assert_eq!(cat.n_columns(), 3);
        assert_eq!(cat.str_cell("junction", 2), Some("GGG"));
        assert_eq!(cat.str_cell("only_a", 2), None);
        // only_b was unseen for the first two rows
        let only_b = cat.column("only_b").unwrap();
        assert_eq!(only_b.format_cell(0), "");
        assert_eq!(only_b.format_cell(2), "7");
    }

    #[test]
    fn take_rows_preserves_order() {
        let mut t = RecordTable::new();
        t.set_column("junction", strcol(&["AAA", "CCC", "GGG"])).unwrap();
        let picked = t.take_rows(&[2, 0]);
        assert_eq!(picked.n_rows(), 2);
        assert_eq!(picked.str_cell("junction", 0), Some("GGG"));
        assert_eq!(picked.str_cell("junction", 1), Some("AAA"));
    }
}
