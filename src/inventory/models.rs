use std::fmt;

/// A single cell as read from the ERP export
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Lenient numeric coercion used for quantities and costs.
    ///
    /// Text is trimmed and parsed as a plain decimal (`"10"`, `" 2.5 "`, `"1e3"`).
    /// Thousands separators, currency symbols and markers like `"N/A"` do not
    /// coerce. NaN never counts as a number.
    pub fn coerce_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };

        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One row of the ERP export
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryRow {
    /// `Código` column. Section marker rows carry the marker text here.
    pub code: CellValue,
    /// `Artículo` column
    pub article: CellValue,
    /// `Existencia` column (quantity on hand)
    pub existence: CellValue,
    /// `Costo unitario` column
    pub unit_cost: CellValue,
    /// Values of the table's `extra_columns`, in the same order
    pub extra_values: Vec<CellValue>,
}

impl InventoryRow {
    pub fn new(
        code: impl Into<CellValue>,
        article: impl Into<CellValue>,
        existence: impl Into<CellValue>,
        unit_cost: impl Into<CellValue>,
    ) -> Self {
        Self {
            code: code.into(),
            article: article.into(),
            existence: existence.into(),
            unit_cost: unit_cost.into(),
            extra_values: Vec::new(),
        }
    }
}

/// Rows of the ERP export in original sheet order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryTable {
    /// Header names of the columns the pipeline does not read
    pub extra_columns: Vec<String>,
    pub rows: Vec<InventoryRow>,
}

impl InventoryTable {
    pub fn new(rows: Vec<InventoryRow>) -> Self {
        Self {
            extra_columns: Vec::new(),
            rows,
        }
    }

    pub fn with_extra_columns(extra_columns: Vec<String>, rows: Vec<InventoryRow>) -> Self {
        Self {
            extra_columns,
            rows,
        }
    }

    /// Value of an unread column for one row, looked up by header name
    pub fn extra_value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.extra_columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.extra_values.get(col)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output row with derived prices
#[derive(Debug, Clone, PartialEq)]
pub struct PricedRow {
    pub code: CellValue,
    pub description: CellValue,
    pub existence: f64,
    pub list_price: f64,
    pub promo_price: f64,
    /// Filled in by hand after download, never computed
    pub clearance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricedTable {
    pub rows: Vec<PricedRow>,
}

impl PricedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
