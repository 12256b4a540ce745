use std::collections::HashSet;
use std::time::Instant;

use color_eyre::Result;

use ratatui_sales_dash::aggregate::{
    self, CategoryRevenue, LocationRevenue, MonthlyRevenue, SellerStats, Totals,
};
use ratatui_sales_dash::api::Transaction;
use ratatui_sales_dash::domain::{
    clamp_top_sellers, clamp_year, Region, TOP_SELLERS_DEFAULT, YEAR_MIN,
};

use crate::app::actions::AppActions;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Dashboard,
    SelectSellers,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DashTab {
    Revenue,
    Volume,
    Sellers,
}

impl DashTab {
    pub const ALL: [Self; 3] = [Self::Revenue, Self::Volume, Self::Sellers];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Revenue),
            1 => Some(Self::Volume),
            2 => Some(Self::Sellers),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Revenue => 0,
            Self::Volume => 1,
            Self::Sellers => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Volume => "Sales volume",
            Self::Sellers => "Salespeople",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Revenue => Self::Volume,
            Self::Volume => Self::Sellers,
            Self::Sellers => Self::Revenue,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Revenue => Self::Sellers,
            Self::Volume => Self::Revenue,
            Self::Sellers => Self::Volume,
        }
    }
}

/// User-selected filters. Region and year are server-side query parameters;
/// the seller selection is applied client-side after the fetch.
#[derive(Debug, Clone)]
pub struct Filters {
    pub region_index: usize,
    pub all_period: bool,
    pub year: i32,
    pub selected_sellers: HashSet<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self {
            region_index: 0,
            all_period: true,
            year: YEAR_MIN,
            selected_sellers: HashSet::new(),
        }
    }

    pub fn region(&self) -> Region {
        Region::from_index(self.region_index).unwrap_or(Region::Brasil)
    }

    pub fn set_region(&mut self, region: Region) {
        if let Some(index) = Region::ALL.iter().position(|&r| r == region) {
            self.region_index = index;
        }
    }

    /// Year sent to the endpoint; `None` while "whole period" is on.
    pub const fn year_filter(&self) -> Option<i32> {
        if self.all_period {
            None
        } else {
            Some(self.year)
        }
    }
}

/// The four aggregate tables plus scalar totals, recomputed on every run.
#[derive(Debug, Default)]
pub struct Aggregates {
    pub by_location: Vec<LocationRevenue>,
    pub by_month: Vec<MonthlyRevenue>,
    pub by_category: Vec<CategoryRevenue>,
    pub sellers: Vec<SellerStats>,
    pub totals: Totals,
}

impl Aggregates {
    pub fn compute(rows: &[Transaction]) -> Self {
        Self {
            by_location: aggregate::revenue_by_location(rows),
            by_month: aggregate::revenue_by_month(rows),
            by_category: aggregate::revenue_by_category(rows),
            sellers: aggregate::seller_stats(rows),
            totals: aggregate::totals(rows),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub tab: DashTab,
    pub show_help: bool,
    pub filters: Filters,
    pub top_sellers: usize,
    pub rows: Vec<Transaction>,
    pub seller_names: Vec<String>,
    pub seller_cursor: usize,
    pub aggregates: Aggregates,
    pub status_message: String,
    pub needs_fetch: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub actions: AppActions,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            tab: DashTab::Revenue,
            show_help: false,
            filters: Filters::new(),
            top_sellers: TOP_SELLERS_DEFAULT,
            rows: Vec::new(),
            seller_names: Vec::new(),
            seller_cursor: 0,
            aggregates: Aggregates::default(),
            status_message: String::new(),
            needs_fetch: true,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            actions: AppActions::new(),
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.actions.initialize()
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    /// Full pipeline run: fetch for the current region/year, then re-filter
    /// and re-aggregate.
    pub async fn refresh(&mut self) -> Result<()> {
        let rows = self
            .actions
            .load(self.filters.region(), self.filters.year_filter())
            .await?;
        self.apply_fetch(rows);
        Ok(())
    }

    /// Install a fresh fetch result and rebuild everything derived from it.
    pub fn apply_fetch(&mut self, rows: Vec<Transaction>) {
        self.rows = rows;
        self.seller_names = aggregate::distinct_sellers(&self.rows);

        // The multiselect is populated from the current fetch; drop
        // selections that no longer exist in it.
        let names: HashSet<&str> = self.seller_names.iter().map(String::as_str).collect();
        self.filters
            .selected_sellers
            .retain(|seller| names.contains(seller.as_str()));
        if self.seller_cursor >= self.seller_names.len() {
            self.seller_cursor = self.seller_names.len().saturating_sub(1);
        }

        self.recompute();
    }

    /// Client-side part of the pipeline: seller filter plus aggregation.
    pub fn recompute(&mut self) {
        let filtered = aggregate::filter_by_sellers(&self.rows, &self.filters.selected_sellers);
        self.aggregates = Aggregates::compute(&filtered);
    }

    pub fn cycle_region(&mut self, step: isize) {
        let len = Region::ALL.len() as isize;
        let index = (self.filters.region_index as isize + step).rem_euclid(len);
        self.filters.region_index = index as usize;
        self.needs_fetch = true;
    }

    pub fn toggle_all_period(&mut self) {
        self.filters.all_period = !self.filters.all_period;
        self.needs_fetch = true;
    }

    pub fn adjust_year(&mut self, delta: i32) {
        if self.filters.all_period {
            return;
        }
        self.filters.year = clamp_year(self.filters.year + delta);
        self.needs_fetch = true;
    }

    pub fn adjust_top_sellers(&mut self, delta: isize) {
        let requested = self.top_sellers.saturating_add_signed(delta);
        self.top_sellers = clamp_top_sellers(requested);
    }

    pub fn seller_cursor_up(&mut self) {
        self.seller_cursor = self.seller_cursor.saturating_sub(1);
    }

    pub fn seller_cursor_down(&mut self) {
        if !self.seller_names.is_empty() && self.seller_cursor < self.seller_names.len() - 1 {
            self.seller_cursor += 1;
        }
    }

    /// Toggle the seller under the cursor; only re-filters, never refetches.
    pub fn toggle_seller_at_cursor(&mut self) {
        if let Some(name) = self.seller_names.get(self.seller_cursor) {
            if !self.filters.selected_sellers.remove(name) {
                self.filters.selected_sellers.insert(name.clone());
            }
            self.recompute();
        }
    }

    pub fn clear_seller_selection(&mut self) {
        if !self.filters.selected_sellers.is_empty() {
            self.filters.selected_sellers.clear();
            self.recompute();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui_sales_dash::domain::{TOP_SELLERS_MAX, TOP_SELLERS_MIN, YEAR_MAX};

    fn sample_rows() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2022, 1, 10).unwrap_or_default();
        ["S1", "S2", "S1"]
            .into_iter()
            .enumerate()
            .map(|(i, seller)| Transaction {
                purchase_date: date,
                price: 100.0 * (i + 1) as f64,
                category: "X".to_string(),
                location: "A".to_string(),
                lat: -15.0,
                lon: -47.0,
                seller: seller.to_string(),
            })
            .collect()
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.needs_fetch = false;
        app.apply_fetch(sample_rows());
        app
    }

    #[test]
    fn region_change_marks_a_refetch() {
        let mut app = loaded_app();
        app.cycle_region(1);
        assert!(app.needs_fetch);
        assert_eq!(app.filters.region(), Region::CentroOeste);

        app.needs_fetch = false;
        app.cycle_region(-1);
        assert!(app.needs_fetch);
        assert_eq!(app.filters.region(), Region::Brasil);
    }

    #[test]
    fn year_selector_is_gated_by_all_period() {
        let mut app = loaded_app();
        app.adjust_year(1);
        assert!(!app.needs_fetch, "year is inert while all-period is on");

        app.toggle_all_period();
        app.needs_fetch = false;
        app.adjust_year(100);
        assert!(app.needs_fetch);
        assert_eq!(app.filters.year, YEAR_MAX);
    }

    #[test]
    fn seller_toggle_refilters_without_refetch() {
        let mut app = loaded_app();
        assert_eq!(app.aggregates.totals.sales, 3);

        app.seller_cursor = 1; // S2
        app.toggle_seller_at_cursor();
        assert!(!app.needs_fetch);
        assert_eq!(app.aggregates.totals.sales, 1);

        app.clear_seller_selection();
        assert_eq!(app.aggregates.totals.sales, 3);
    }

    #[test]
    fn stale_seller_selections_are_pruned_on_fetch() {
        let mut app = loaded_app();
        app.filters.selected_sellers.insert("ghost".to_string());
        app.apply_fetch(sample_rows());
        assert!(!app.filters.selected_sellers.contains("ghost"));
    }

    #[test]
    fn top_sellers_control_clamps() {
        let mut app = loaded_app();
        for _ in 0..20 {
            app.adjust_top_sellers(1);
        }
        assert_eq!(app.top_sellers, TOP_SELLERS_MAX);
        for _ in 0..20 {
            app.adjust_top_sellers(-1);
        }
        assert_eq!(app.top_sellers, TOP_SELLERS_MIN);
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        let mut tab = DashTab::Revenue;
        for _ in 0..DashTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, DashTab::Revenue);
        assert_eq!(DashTab::Revenue.prev(), DashTab::Sellers);
    }
}
