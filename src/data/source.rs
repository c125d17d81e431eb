use polars::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{PriceRangeError, Result};
use crate::range::Interval;

/// DataSource wraps a loaded Polars DataFrame
pub struct DataSource {
    df: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
    /// Cache for numeric column conversions
    numeric_cache: RefCell<HashMap<usize, Vec<f64>>>,
    /// Cache for rendered cell text
    string_cache: RefCell<HashMap<usize, Vec<String>>>,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("DataSource::load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PriceRangeError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let lazy = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?,
            ext => {
                return Err(PriceRangeError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let df = lazy.collect()?;
        if df.height() == 0 {
            return Err(PriceRangeError::EmptyDataset);
        }
        log::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(Self::from_dataframe(df, Some(path.to_path_buf())))
    }

    /// Create DataSource from an already-loaded DataFrame
    pub fn from_dataframe(df: DataFrame, path: Option<PathBuf>) -> Self {
        Self {
            df,
            file_path: path,
            numeric_cache: RefCell::new(HashMap::new()),
            string_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Index of the column with the given name (case-insensitive)
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.column_names()
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Indices of columns with an integer or float dtype
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.df
            .get_columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| is_numeric_dtype(c.dtype()))
            .map(|(i, _)| i)
            .collect()
    }

    fn series_at(&self, col_idx: usize) -> Result<Series> {
        self.df
            .get_columns()
            .get(col_idx)
            .map(|c| c.as_materialized_series().clone())
            .ok_or_else(|| PriceRangeError::ColumnNotFound {
                column: format!("#{}", col_idx),
            })
    }

    /// Get a column's numeric values as Vec<f64>
    /// Nulls and non-numeric values become NaN
    pub fn column_as_f64(&self, col_idx: usize) -> Result<Vec<f64>> {
        let series = self.series_at(col_idx)?;

        match series.cast(&DataType::Float64) {
            Ok(s) => Ok(s
                .f64()?
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect()),
            Err(_) => {
                // For string columns, try to parse as f64
                if let Ok(str_series) = series.str() {
                    Ok(str_series
                        .into_iter()
                        .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(f64::NAN))
                        .collect())
                } else {
                    Ok(vec![f64::NAN; series.len()])
                }
            }
        }
    }

    /// Get cached numeric column, computing if necessary
    pub fn get_cached_column(&self, col_idx: usize) -> Result<std::cell::Ref<'_, Vec<f64>>> {
        if !self.numeric_cache.borrow().contains_key(&col_idx) {
            let data = self.column_as_f64(col_idx)?;
            self.numeric_cache.borrow_mut().insert(col_idx, data);
        }

        std::cell::Ref::filter_map(self.numeric_cache.borrow(), |cache| cache.get(&col_idx))
            .map_err(|_| PriceRangeError::ColumnNotFound {
                column: format!("#{}", col_idx),
            })
    }

    /// Get a column's values rendered as strings
    pub fn column_as_string(&self, col_idx: usize) -> Result<Vec<String>> {
        let series = self.series_at(col_idx)?;

        if let Ok(str_series) = series.str() {
            return Ok(str_series
                .into_iter()
                .map(|opt| opt.unwrap_or("").to_string())
                .collect());
        }

        let str_series = series.cast(&DataType::String)?;
        Ok(str_series
            .str()?
            .into_iter()
            .map(|opt| opt.unwrap_or("").to_string())
            .collect())
    }

    /// Cell text for every column, computed once and cached
    pub fn cached_strings(&self) -> std::cell::Ref<'_, HashMap<usize, Vec<String>>> {
        {
            let mut cache = self.string_cache.borrow_mut();
            for col_idx in 0..self.width() {
                if !cache.contains_key(&col_idx) {
                    let data = self
                        .column_as_string(col_idx)
                        .unwrap_or_else(|_| vec![String::new(); self.height()]);
                    cache.insert(col_idx, data);
                }
            }
        }
        self.string_cache.borrow()
    }

    /// Smallest and largest finite value of a column
    pub fn column_bounds(&self, col_idx: usize) -> Result<(f64, f64)> {
        let values = self.get_cached_column(col_idx)?;
        let bounds = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            });

        bounds.ok_or_else(|| PriceRangeError::NonNumericColumn {
            column: self
                .column_names()
                .get(col_idx)
                .cloned()
                .unwrap_or_else(|| format!("#{}", col_idx)),
        })
    }

    /// Row indices whose value in `col_idx` lies inside the interval (inclusive)
    pub fn rows_in_interval(&self, col_idx: usize, interval: Interval) -> Result<Vec<usize>> {
        profiling::scope!("rows_in_interval");
        let values = self.get_cached_column(col_idx)?;
        Ok(values
            .iter()
            .enumerate()
            .filter(|(_, v)| interval.contains(**v))
            .map(|(i, _)| i)
            .collect())
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}
