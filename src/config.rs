use std::path::PathBuf;
use std::time::Duration;

pub const PRICES_API_BASE: &str = "https://prices.openfoodfacts.org/api/v1/prices";
pub const PRODUCT_SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Staple commodities tracked by a batch run, in report order.
pub const DEFAULT_COMMODITIES: [&str; 5] = ["rice", "milk", "eggs", "oil", "wheat"];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SAMPLE_SIZE: usize = 50;
pub const DEFAULT_COMMODITY_PAUSE: Duration = Duration::from_secs(1);
pub const DEFAULT_CODE_PAUSE: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_PRODUCT_CODES: usize = 5;
pub const DEFAULT_MIN_RECORDS_PER_CODE: usize = 5;
pub const DEFAULT_MIN_REGION_SAMPLES: usize = 5;
pub const DEFAULT_REGION_LIMIT: usize = 5;

pub const REPORT_FILE: &str = "latest_report.json";
pub const DEFAULT_ALERT_SENDER: &str = "alerts@resend.dev";

pub fn default_commodities() -> Vec<String> {
    DEFAULT_COMMODITIES.iter().map(|c| c.to_string()).collect()
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("supply-risk")
    } else {
        PathBuf::from(".supply-risk")
    }
}

// ---------------------------------------------------------------------------
// CollectorConfig
// ---------------------------------------------------------------------------

/// Tuning for the two-step keyword -> product code -> price lookup.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Upper bound on product codes resolved per keyword.
    pub max_product_codes: usize,
    /// Floor on the number of records requested for each product code.
    pub min_records_per_code: usize,
    /// Pause between consecutive per-code requests.
    pub code_pause: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_product_codes: DEFAULT_MAX_PRODUCT_CODES,
            min_records_per_code: DEFAULT_MIN_RECORDS_PER_CODE,
            code_pause: DEFAULT_CODE_PAUSE,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalyzerConfig
// ---------------------------------------------------------------------------

/// Settings owned by the analyzer for a single process.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Commodity keywords covered by
    /// [`analyze_all`](crate::analyzer::CommodityAnalyzer::analyze_all).
    pub commodities: Vec<String>,
    /// Target number of price records collected per commodity.
    pub sample_size: usize,
    /// Minimum prices a region needs before it is reported.
    pub min_region_samples: usize,
    /// Maximum regions reported per level.
    pub region_limit: usize,
    /// Pause between consecutive commodities in a batch.
    pub commodity_pause: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            commodities: default_commodities(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            min_region_samples: DEFAULT_MIN_REGION_SAMPLES,
            region_limit: DEFAULT_REGION_LIMIT,
            commodity_pause: DEFAULT_COMMODITY_PAUSE,
        }
    }
}
