use serde::Deserialize;

pub const GLOBAL_COUNTRY_NAME: &str = "Global";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryReport {
    pub date: String,
    pub global: GlobalTotals,
    pub countries: Vec<CountryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalTotals {
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
    #[serde(default)]
    pub total_active: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryRecord {
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub slug: String,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
    #[serde(default)]
    pub total_active: u64,
}

impl SummaryReport {
    /// Consumes the report and appends the world totals as a synthetic record
    /// named "Global" so it is sorted alongside real countries.
    pub fn into_records_with_global(self) -> Vec<CountryRecord> {
        let mut records = self.countries;
        records.push(CountryRecord {
            country: GLOBAL_COUNTRY_NAME.to_string(),
            country_code: String::new(),
            date: self.date,
            slug: String::new(),
            total_confirmed: self.global.total_confirmed,
            total_deaths: self.global.total_deaths,
            total_recovered: self.global.total_recovered,
            total_active: self.global.total_active,
        });
        records
    }
}
