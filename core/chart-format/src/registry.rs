//! FILENAME: core/chart-format/src/registry.rs
//! PURPOSE: Dispatch table from format kind to formatter function.
//! CONTEXT: Built-in kinds are registered in a fixed order. Hosts may register
//! additional kinds (or replace a built-in) on their own registry instance;
//! the process-wide default registry is immutable.

use once_cell::sync::Lazy;

use crate::date_format::format_date;
use crate::format_spec::{FieldFormat, FormatKind};
use crate::number_format::{format_currency, format_numeric, format_percentage, format_scientific};
use crate::value::CellValue;

/// A formatter renders a value or declines with `None`, which means passthrough.
pub type FormatFn = Box<dyn Fn(&CellValue, &FieldFormat) -> Option<String> + Send + Sync>;

pub struct FormatterRegistry {
    entries: Vec<(FormatKind, FormatFn)>,
}

static DEFAULT_REGISTRY: Lazy<FormatterRegistry> = Lazy::new(FormatterRegistry::with_builtins);

impl FormatterRegistry {
    /// An empty registry: every value passes through.
    pub fn new() -> Self {
        FormatterRegistry { entries: Vec::new() }
    }

    /// Registry with numeric, currency, percentage, scientificNotation and date.
    pub fn with_builtins() -> Self {
        let mut registry = FormatterRegistry::new();
        registry.register(
            FormatKind::Numeric,
            numeric_formatter(|n, format| format_numeric(n, &format.numeric.clone().unwrap_or_default())),
        );
        registry.register(
            FormatKind::Currency,
            numeric_formatter(|n, format| format_currency(n, &format.currency.clone().unwrap_or_default())),
        );
        registry.register(
            FormatKind::Percentage,
            numeric_formatter(|n, format| {
                format_percentage(n, &format.percentage.clone().unwrap_or_default())
            }),
        );
        registry.register(
            FormatKind::ScientificNotation,
            numeric_formatter(|n, format| {
                format_scientific(n, &format.scientific_notation.clone().unwrap_or_default())
            }),
        );
        registry.register(
            FormatKind::Date,
            Box::new(|value, format| {
                let pattern = format.date.as_ref()?.format.as_deref()?;
                format_date(value, pattern)
            }),
        );
        registry
    }

    /// The shared default registry.
    pub fn global() -> &'static FormatterRegistry {
        &DEFAULT_REGISTRY
    }

    /// Register a formatter. An existing entry for the same kind is replaced in place,
    /// keeping its dispatch position.
    pub fn register(&mut self, kind: FormatKind, formatter: FormatFn) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == kind) {
            Some(entry) => entry.1 = formatter,
            None => self.entries.push((kind, formatter)),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = &FormatKind> {
        self.entries.iter().map(|(kind, _)| kind)
    }

    /// Format a value. Returns `Text` on success and a clone of the input otherwise.
    pub fn format(&self, value: &CellValue, format: Option<&FieldFormat>) -> CellValue {
        let Some(format) = format else {
            return value.clone();
        };
        if value.is_nan() {
            return value.clone();
        }

        let Some((_, formatter)) = self.entries.iter().find(|(kind, _)| *kind == format.kind) else {
            return value.clone();
        };

        match formatter(value, format) {
            Some(text) => CellValue::Text(text),
            None => value.clone(),
        }
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Wrap a number-only formatter: non-numeric values and NaN decline.
fn numeric_formatter<F>(render: F) -> FormatFn
where
    F: Fn(f64, &FieldFormat) -> String + Send + Sync + 'static,
{
    Box::new(move |value, format| {
        let number = value.as_number().filter(|n| !n.is_nan())?;
        Some(render(number, format))
    })
}

/// Format a value with the default registry.
pub fn to_formatted_value(value: &CellValue, format: Option<&FieldFormat>) -> CellValue {
    FormatterRegistry::global().format(value, format)
}
