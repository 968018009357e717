use serde::{Deserialize, Serialize};

/// A descriptive input with a fixed set of options, cycled in the form.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continent {
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Asia,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
    Oceania,
}

impl Choice for Continent {
    const ALL: &'static [Self] = &[
        Self::Europe,
        Self::NorthAmerica,
        Self::Asia,
        Self::SouthAmerica,
        Self::Africa,
        Self::Oceania,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::Asia => "Asia",
            Self::SouthAmerica => "South America",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Enterprise,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    #[serde(rename = "SMB")]
    Smb,
}

impl Choice for Segment {
    const ALL: &'static [Self] = &[Self::Enterprise, Self::MidMarket, Self::Smb];

    fn label(self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::MidMarket => "Mid-Market",
            Self::Smb => "SMB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoToMarket {
    SelfServe,
    Hybrid,
    SalesLed,
}

impl Choice for GoToMarket {
    const ALL: &'static [Self] = &[Self::SelfServe, Self::Hybrid, Self::SalesLed];

    fn label(self) -> &'static str {
        match self {
            Self::SelfServe => "self-serve",
            Self::Hybrid => "hybrid",
            Self::SalesLed => "sales-led",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Subscription,
    PerSeat,
    UsageBased,
}

impl Choice for PricingModel {
    const ALL: &'static [Self] = &[Self::Subscription, Self::PerSeat, Self::UsageBased];

    fn label(self) -> &'static str {
        match self {
            Self::Subscription => "subscription",
            Self::PerSeat => "per-seat",
            Self::UsageBased => "usage-based",
        }
    }
}

/// One-time costs of entering the market, charged against year 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryCosts {
    pub legal_setup: f64,
    pub compliance: f64,
    pub localization: f64,
    pub launch_campaign: f64,
    pub tools_integrations: f64,
    pub other: f64,
}

impl EntryCosts {
    pub fn total(&self) -> f64 {
        self.legal_setup
            + self.compliance
            + self.localization
            + self.launch_campaign
            + self.tools_integrations
            + self.other
    }
}

impl Default for EntryCosts {
    fn default() -> Self {
        Self {
            legal_setup: 10_000.0,
            compliance: 15_000.0,
            localization: 20_000.0,
            launch_campaign: 25_000.0,
            tools_integrations: 5_000.0,
            other: 0.0,
        }
    }
}

/// Everything the projection reads, plus descriptive fields carried through
/// to display and export.
///
/// Percentages are percentage points (`2.0` means 2 %) and are not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub continent: Continent,
    pub country: String,
    pub segment: Segment,
    pub total_addressable_customers: f64,
    pub penetration_y1: f64,
    pub penetration_y2: f64,
    pub penetration_y3: f64,
    pub sales_cycle_months: f64,
    pub go_to_market: GoToMarket,
    pub average_selling_price: f64,
    pub pricing_model: PricingModel,
    pub entry_costs: EntryCosts,
    pub sales_and_marketing_pct: f64,
    pub ops_support_pct: f64,
    pub fixed_headcount_cost: f64,
}

impl Inputs {
    /// Penetration for a 1-based projection year.
    pub fn penetration(&self, year: u8) -> f64 {
        match year {
            1 => self.penetration_y1,
            2 => self.penetration_y2,
            _ => self.penetration_y3,
        }
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            continent: Continent::Europe,
            country: "Switzerland".to_string(),
            segment: Segment::Enterprise,
            total_addressable_customers: 1000.0,
            penetration_y1: 2.0,
            penetration_y2: 5.0,
            penetration_y3: 10.0,
            sales_cycle_months: 3.0,
            go_to_market: GoToMarket::SalesLed,
            average_selling_price: 50_000.0,
            pricing_model: PricingModel::Subscription,
            entry_costs: EntryCosts::default(),
            sales_and_marketing_pct: 30.0,
            ops_support_pct: 15.0,
            fixed_headcount_cost: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YearResult {
    pub customers: f64,
    pub revenue: f64,
    pub costs: f64,
    pub margin: f64,
    pub cumulative_profit: f64,
}

/// First year whose cumulative profit is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakeven {
    #[serde(rename = "1")]
    Year1,
    #[serde(rename = "2")]
    Year2,
    #[serde(rename = "3")]
    Year3,
    #[serde(rename = ">3 years")]
    Beyond,
}

impl Breakeven {
    /// Projection year of breakeven, `None` when it falls outside the horizon.
    pub fn year(self) -> Option<u8> {
        match self {
            Self::Year1 => Some(1),
            Self::Year2 => Some(2),
            Self::Year3 => Some(3),
            Self::Beyond => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Year1 => "1",
            Self::Year2 => "2",
            Self::Year3 => "3",
            Self::Beyond => ">3 years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "NO GO")]
    NoGo,
    #[serde(rename = "REVIEW")]
    Review,
}

impl Decision {
    pub fn label(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::NoGo => "NO GO",
            Self::Review => "REVIEW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "High sensitivity")]
    HighSensitivity,
    #[serde(rename = "Low sensitivity")]
    LowSensitivity,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Self::HighSensitivity => "High sensitivity",
            Self::LowSensitivity => "Low sensitivity",
        }
    }
}

/// Snapshot of one projection. Recomputed wholesale on every input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub year1: YearResult,
    pub year2: YearResult,
    pub year3: YearResult,
    pub entry_investment: f64,
    pub breakeven: Breakeven,
    pub three_year_cumulative_profit: f64,
    pub roi_pct: f64,
    pub decision: Decision,
    pub confidence: Confidence,
}

impl Results {
    pub fn years(&self) -> [&YearResult; 3] {
        [&self.year1, &self.year2, &self.year3]
    }
}
