use crate::domain::model::OutputRecord;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotal {
    pub records: usize,
    pub amount: f64,
}

/// Per-category roll-up of a normalized batch, keyed and ordered by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total_records: usize,
    pub total_amount: f64,
    pub categories: BTreeMap<String, CategoryTotal>,
}

impl RunSummary {
    pub fn from_records(records: &[OutputRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            let value = record.amount.value();
            summary.total_records += 1;
            summary.total_amount += value;

            let entry = summary
                .categories
                .entry(record.category.clone())
                .or_default();
            entry.records += 1;
            entry.amount += value;
        }
        summary
    }

    pub fn log(&self) {
        for (category, total) in &self.categories {
            tracing::debug!(
                category = %category,
                records = total.records,
                amount = total.amount,
                "category total"
            );
        }
        tracing::info!(
            records = self.total_records,
            categories = self.categories.len(),
            amount = self.total_amount,
            "Normalized batch summary"
        );
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:>8} {:>18}", "category", "records", "amount")?;
        for (category, total) in &self.categories {
            writeln!(f, "{:<24} {:>8} {:>18.2}", category, total.records, total.amount)?;
        }
        write!(
            f,
            "{:<24} {:>8} {:>18.2}",
            "TOTAL", self.total_records, self.total_amount
        )
    }
}
