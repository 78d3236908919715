//! Load debt lists from CSV exports

use super::{validate_debts, Debt};
use crate::error::LoadError;
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Raw CSV row; blank numeric cells are treated as zero
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    #[serde(default)]
    name: String,
    balance: Option<f64>,
    min_payment: Option<f64>,
    interest_rate: Option<f64>,
    promo_end: Option<String>,
}

impl CsvRow {
    fn into_debt(self, row: usize) -> Result<Debt, LoadError> {
        let promo_end = match self.promo_end.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(
                |source| LoadError::Date {
                    row,
                    value: value.to_string(),
                    source,
                },
            )?),
        };

        Ok(Debt {
            id: self.id,
            name: self.name,
            balance: self.balance.unwrap_or(0.0),
            min_payment: self.min_payment.unwrap_or(0.0),
            interest_rate: self.interest_rate.unwrap_or(0.0),
            promo_end,
        })
    }
}

/// Load all debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, LoadError> {
    let reader = Reader::from_path(path)?;
    read_debts(reader)
}

/// Load debts from any reader (e.g., string buffer, stdin)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Debt>, LoadError> {
    read_debts(Reader::from_reader(reader))
}

fn read_debts<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Debt>, LoadError> {
    let mut debts = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        debts.push(row.into_debt(index + 1)?);
    }

    validate_debts(&debts)?;
    log::debug!("loaded {} debts", debts.len());
    Ok(debts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,name,balance,min_payment,interest_rate,promo_end
d1,Barclays Aviator,4200.50,120,0,2026-03-01
d2,Chase Freedom,2800,85,24.99,
d3,Old Loan,0,,,
";

    #[test]
    fn test_load_debts_from_reader() {
        let debts = load_debts_from_reader(SAMPLE.as_bytes()).expect("Failed to load debts");
        assert_eq!(debts.len(), 3);

        assert_eq!(debts[0].id, "d1");
        assert_eq!(debts[0].promo_end, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert!(debts[0].is_zero_rate());

        assert_eq!(debts[1].promo_end, None);
        assert!((debts[1].interest_rate - 24.99).abs() < 1e-12);

        assert_eq!(debts[2].min_payment, 0.0);
        assert!(!debts[2].is_active());
    }

    #[test]
    fn test_bad_promo_date_reports_row() {
        let data = "id,name,balance,min_payment,interest_rate,promo_end\nd1,Card,100,10,0,03/01/2026\n";
        match load_debts_from_reader(data.as_bytes()) {
            Err(LoadError::Date { row, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "03/01/2026");
            }
            other => panic!("expected date error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_balance_rejected() {
        let data = "id,name,balance,min_payment,interest_rate,promo_end\nd1,Card,-100,10,5,\n";
        let err = load_debts_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }
}
