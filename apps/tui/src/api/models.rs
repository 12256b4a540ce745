use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Wire format of the purchase date field.
const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// One sales transaction as served by the remote endpoint.
///
/// Field names follow the production dataset, hence the serde renames.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Data da Compra", deserialize_with = "purchase_date")]
    pub purchase_date: NaiveDate,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Vendedor")]
    pub seller: String,
}

/// Strict `DD/MM/YYYY` parsing. One malformed date fails the whole payload.
fn purchase_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&raw, PURCHASE_DATE_FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ROW: &str = r#"{
        "Data da Compra": "01/02/2022",
        "Preço": 49.9,
        "Categoria do Produto": "livros",
        "Local da compra": "SP",
        "lat": -22.19,
        "lon": -48.79,
        "Vendedor": "Beatriz Moraes"
    }"#;

    #[test]
    fn deserializes_a_wire_row() -> Result<(), serde_json::Error> {
        let row: Transaction = serde_json::from_str(SAMPLE_ROW)?;
        assert_eq!(Some(row.purchase_date), NaiveDate::from_ymd_opt(2022, 2, 1));
        assert!((row.price - 49.9).abs() < f64::EPSILON);
        assert_eq!(row.category, "livros");
        assert_eq!(row.location, "SP");
        assert_eq!(row.seller, "Beatriz Moraes");
        Ok(())
    }

    #[test]
    fn rejects_a_malformed_date() {
        let row = SAMPLE_ROW.replace("01/02/2022", "2022-02-01");
        let parsed: Result<Transaction, _> = serde_json::from_str(&row);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_an_out_of_range_date() {
        let row = SAMPLE_ROW.replace("01/02/2022", "31/02/2022");
        let parsed: Result<Transaction, _> = serde_json::from_str(&row);
        assert!(parsed.is_err());
    }
}
