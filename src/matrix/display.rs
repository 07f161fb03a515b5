//! Fixed-width tabular `Display` formatting for [`Matrix`]

use std::fmt;

use super::core::Matrix;
use crate::scalar::Scalar;

/// Width of one formatted cell, including a bracketed name prefix
const CELL_WIDTH: usize = 14;

/// Clip a string into `width` characters, marking truncation with `..`
fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let kept: String = s.chars().take(width.saturating_sub(2)).collect();
        format!("{}..", kept)
    }
}

/// Render a name as a bracketed prefix clipped to `width`
fn bracketed(name: &str, width: usize) -> String {
    let inner = width.saturating_sub(2);
    if name.chars().count() <= inner {
        format!("[{}]", name)
    } else {
        let kept: String = name.chars().take(inner.saturating_sub(2)).collect();
        format!("[{}..]", kept)
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            writeln!(f, "{}", name)?;
        }

        let w = CELL_WIDTH;
        let label_col = self.has_row_names();

        // Blank-filled header row appears only when any column is named
        if self.has_column_names() {
            if label_col {
                write!(f, "{:w$} ", "")?;
            }
            for c in 0..self.ncols() {
                let header = match self.try_get_column_name(c) {
                    Some(n) => bracketed(n, CELL_WIDTH),
                    None => String::new(),
                };
                write!(f, "{:>w$} ", header)?;
            }
            writeln!(f)?;
        }

        for r in 0..self.nrows() {
            if label_col {
                let label = match self.try_get_row_name(r) {
                    Some(n) => bracketed(n, CELL_WIDTH),
                    None => String::new(),
                };
                write!(f, "{:<w$} ", label)?;
            }
            for c in 0..self.ncols() {
                let cell = fit(&self.at(r, c).to_string(), CELL_WIDTH);
                write!(f, "{:>w$} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::RealMatrix;

    #[test]
    fn test_plain_matrix_has_no_header() {
        let m = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let text = m.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains('1'));
        assert!(text.contains('4'));
    }

    #[test]
    fn test_row_names_render_bracketed() {
        let mut m = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        m.set_row_name(0, "top").unwrap();
        let text = m.to_string();
        assert!(text.contains("[top]"));
        // Unnamed row keeps a blank prefix, so both lines align
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_column_names_emit_header_row() {
        let mut m = RealMatrix::from_row_major(1, 2, &[1.0, 2.0]).unwrap();
        m.set_column_name(1, "price").unwrap();
        let text = m.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[price]"));
        assert!(!lines[0].contains('1'));
    }

    #[test]
    fn test_long_name_truncated_with_marker() {
        let mut m = RealMatrix::from_row_major(1, 1, &[1.0]).unwrap();
        m.set_row_name(0, "a-very-long-row-label").unwrap();
        let text = m.to_string();
        assert!(text.contains("..]"));
        assert!(!text.contains("a-very-long-row-label"));
    }

    #[test]
    fn test_matrix_name_leads_output() {
        let mut m = RealMatrix::from_row_major(1, 1, &[1.0]).unwrap();
        m.set_name("weights").unwrap();
        assert!(m.to_string().starts_with("weights\n"));
    }
}
