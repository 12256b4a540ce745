use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Month};

use crate::api::Transaction;

/// Summed revenue for one purchase location, with its map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRevenue {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
}

/// Summed revenue for one (year, calendar month) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub revenue: f64,
}

/// Summed revenue for one product category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// Revenue sum and transaction count for one salesperson.
///
/// Kept in first-seen order; each consumer sorts by the column it charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub seller: String,
    pub revenue: f64,
    pub sales: u64,
}

/// Scalar totals over the filtered table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub revenue: f64,
    pub sales: u64,
}

/// Client-side salesperson filter.
///
/// An empty selection means "no filter", not "match nothing".
pub fn filter_by_sellers(rows: &[Transaction], selected: &HashSet<String>) -> Vec<Transaction> {
    if selected.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| selected.contains(&row.seller))
        .cloned()
        .collect()
}

pub fn totals(rows: &[Transaction]) -> Totals {
    Totals {
        revenue: rows.iter().map(|row| row.price).sum(),
        sales: rows.len() as u64,
    }
}

/// Revenue per purchase location, sorted descending by revenue.
///
/// Coordinates come from the first row seen for each location.
pub fn revenue_by_location(rows: &[Transaction]) -> Vec<LocationRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<LocationRevenue> = Vec::new();

    for row in rows {
        if let Some(&at) = index.get(row.location.as_str()) {
            table[at].revenue += row.price;
        } else {
            index.insert(row.location.as_str(), table.len());
            table.push(LocationRevenue {
                location: row.location.clone(),
                lat: row.lat,
                lon: row.lon,
                revenue: row.price,
            });
        }
    }

    table.sort_by(|a, b| descending(a.revenue, b.revenue).then_with(|| a.location.cmp(&b.location)));
    table
}

/// Revenue per (year, month) bucket, in chronological order.
pub fn revenue_by_month(rows: &[Transaction]) -> Vec<MonthlyRevenue> {
    let mut index: HashMap<(i32, u32), usize> = HashMap::new();
    let mut table: Vec<MonthlyRevenue> = Vec::new();

    for row in rows {
        let key = (row.purchase_date.year(), row.purchase_date.month());
        if let Some(&at) = index.get(&key) {
            table[at].revenue += row.price;
        } else {
            index.insert(key, table.len());
            table.push(MonthlyRevenue {
                year: key.0,
                month: key.1,
                month_name: month_name(key.1),
                revenue: row.price,
            });
        }
    }

    table.sort_by_key(|bucket| (bucket.year, bucket.month));
    table
}

/// Revenue per product category, sorted descending by revenue.
pub fn revenue_by_category(rows: &[Transaction]) -> Vec<CategoryRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<CategoryRevenue> = Vec::new();

    for row in rows {
        if let Some(&at) = index.get(row.category.as_str()) {
            table[at].revenue += row.price;
        } else {
            index.insert(row.category.as_str(), table.len());
            table.push(CategoryRevenue {
                category: row.category.clone(),
                revenue: row.price,
            });
        }
    }

    table.sort_by(|a, b| descending(a.revenue, b.revenue).then_with(|| a.category.cmp(&b.category)));
    table
}

/// Revenue sum and sale count per salesperson, in first-seen order.
pub fn seller_stats(rows: &[Transaction]) -> Vec<SellerStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<SellerStats> = Vec::new();

    for row in rows {
        if let Some(&at) = index.get(row.seller.as_str()) {
            table[at].revenue += row.price;
            table[at].sales += 1;
        } else {
            index.insert(row.seller.as_str(), table.len());
            table.push(SellerStats {
                seller: row.seller.clone(),
                revenue: row.price,
                sales: 1,
            });
        }
    }

    table
}

/// Top `n` sellers ranked by revenue.
pub fn top_sellers_by_revenue(stats: &[SellerStats], n: usize) -> Vec<SellerStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| descending(a.revenue, b.revenue).then_with(|| a.seller.cmp(&b.seller)));
    ranked.truncate(n);
    ranked
}

/// Top `n` sellers ranked by sale count.
pub fn top_sellers_by_sales(stats: &[SellerStats], n: usize) -> Vec<SellerStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.seller.cmp(&b.seller)));
    ranked.truncate(n);
    ranked
}

/// Distinct salesperson names in first-seen order, for the multiselect.
pub fn distinct_sellers(rows: &[Transaction]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    for row in rows {
        if seen.insert(row.seller.as_str()) {
            names.push(row.seller.clone());
        }
    }

    names
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map_or("", |month| month.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    fn row(
        price: f64,
        location: &str,
        when: NaiveDate,
        category: &str,
        seller: &str,
    ) -> Transaction {
        Transaction {
            purchase_date: when,
            price,
            category: category.to_string(),
            location: location.to_string(),
            lat: -15.0,
            lon: -47.0,
            seller: seller.to_string(),
        }
    }

    /// The worked example: three transactions across two locations,
    /// two months, two categories and two sellers.
    fn sample_rows() -> Vec<Transaction> {
        vec![
            row(100.0, "A", date(2022, 1, 10), "X", "S1"),
            row(200.0, "A", date(2022, 1, 20), "Y", "S2"),
            row(50.0, "B", date(2022, 2, 5), "X", "S1"),
        ]
    }

    #[test]
    fn location_revenue_sums_and_sorts_descending() {
        let table = revenue_by_location(&sample_rows());
        let summary: Vec<(&str, f64)> = table
            .iter()
            .map(|entry| (entry.location.as_str(), entry.revenue))
            .collect();
        assert_eq!(summary, vec![("A", 300.0), ("B", 50.0)]);
    }

    #[test]
    fn category_revenue_sorts_descending() {
        let table = revenue_by_category(&sample_rows());
        let summary: Vec<(&str, f64)> = table
            .iter()
            .map(|entry| (entry.category.as_str(), entry.revenue))
            .collect();
        assert_eq!(summary, vec![("Y", 200.0), ("X", 150.0)]);
    }

    #[test]
    fn monthly_revenue_is_chronological() {
        let mut rows = sample_rows();
        rows.push(row(25.0, "B", date(2021, 12, 31), "X", "S1"));

        let table = revenue_by_month(&rows);
        let summary: Vec<(i32, u32, f64)> = table
            .iter()
            .map(|bucket| (bucket.year, bucket.month, bucket.revenue))
            .collect();
        assert_eq!(
            summary,
            vec![(2021, 12, 25.0), (2022, 1, 300.0), (2022, 2, 50.0)]
        );
        assert_eq!(table[0].month_name, "December");
        assert_eq!(table[1].month_name, "January");
    }

    #[test]
    fn seller_stats_carry_sum_and_count() {
        let table = seller_stats(&sample_rows());
        let summary: Vec<(&str, f64, u64)> = table
            .iter()
            .map(|entry| (entry.seller.as_str(), entry.revenue, entry.sales))
            .collect();
        assert_eq!(summary, vec![("S1", 150.0, 2), ("S2", 200.0, 1)]);
    }

    #[test]
    fn totals_match_the_worked_example() {
        let totals = totals(&sample_rows());
        assert!((totals.revenue - 350.0).abs() < f64::EPSILON);
        assert_eq!(totals.sales, 3);
    }

    #[test]
    fn aggregates_are_complete_partitions() {
        let rows = sample_rows();
        let expected = totals(&rows).revenue;

        let by_location: f64 = revenue_by_location(&rows)
            .iter()
            .map(|entry| entry.revenue)
            .sum();
        let by_category: f64 = revenue_by_category(&rows)
            .iter()
            .map(|entry| entry.revenue)
            .sum();
        let by_month: f64 = revenue_by_month(&rows)
            .iter()
            .map(|bucket| bucket.revenue)
            .sum();
        let by_seller: f64 = seller_stats(&rows).iter().map(|entry| entry.revenue).sum();

        for total in [by_location, by_category, by_month, by_seller] {
            assert!((total - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_input_degrades_gracefully() {
        let rows: Vec<Transaction> = Vec::new();
        assert!(revenue_by_location(&rows).is_empty());
        assert!(revenue_by_month(&rows).is_empty());
        assert!(revenue_by_category(&rows).is_empty());
        assert!(seller_stats(&rows).is_empty());
        assert_eq!(totals(&rows), Totals::default());
    }

    #[test]
    fn empty_seller_selection_is_identity() {
        let rows = sample_rows();
        let filtered = filter_by_sellers(&rows, &HashSet::new());
        assert_eq!(filtered.len(), rows.len());
    }

    #[test]
    fn seller_selection_keeps_only_selected_rows() {
        let rows = sample_rows();
        let selected: HashSet<String> = ["S1".to_string()].into_iter().collect();
        let filtered = filter_by_sellers(&rows, &selected);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|row| row.seller == "S1"));

        let aggregated = seller_stats(&filtered);
        assert_eq!(aggregated.len(), 1);
        assert!((aggregated[0].revenue - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_n_rankings_are_monotonic_in_n() {
        let mut rows = sample_rows();
        rows.push(row(75.0, "C", date(2022, 3, 1), "X", "S3"));
        rows.push(row(10.0, "C", date(2022, 3, 2), "X", "S4"));

        let stats = seller_stats(&rows);
        let top2 = top_sellers_by_revenue(&stats, 2);
        let top5 = top_sellers_by_revenue(&stats, 5);
        assert_eq!(top2[..], top5[..2]);

        let by_sales2 = top_sellers_by_sales(&stats, 2);
        let by_sales5 = top_sellers_by_sales(&stats, 5);
        assert_eq!(by_sales2[..], by_sales5[..2]);
    }

    #[test]
    fn revenue_and_sales_rankings_are_independent() {
        // S1 leads on count (2 sales), S2 leads on revenue (200).
        let stats = seller_stats(&sample_rows());
        let by_revenue = top_sellers_by_revenue(&stats, 2);
        let by_sales = top_sellers_by_sales(&stats, 2);
        assert_eq!(by_revenue[0].seller, "S2");
        assert_eq!(by_sales[0].seller, "S1");
    }

    #[test]
    fn distinct_sellers_preserve_first_seen_order() {
        let sellers = distinct_sellers(&sample_rows());
        assert_eq!(sellers, vec!["S1".to_string(), "S2".to_string()]);
    }
}
