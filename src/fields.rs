//! Editable input fields: labels, grouping and text coercion.
//!
//! The form and the CSV export both walk [`FieldKey::ALL`], so a field's
//! label and position are defined once here.

use crate::engine::{Choice, Continent, GoToMarket, Inputs, PricingModel, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Market,
    Pricing,
    EntryCosts,
    OngoingCosts,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Market,
        Section::Pricing,
        Section::EntryCosts,
        Section::OngoingCosts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Market => "1. Market",
            Section::Pricing => "2. Pricing",
            Section::EntryCosts => "3. Entry Costs",
            Section::OngoingCosts => "4. Ongoing Costs",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = FieldKey> {
        FieldKey::ALL.into_iter().filter(move |k| k.section() == self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number,
    Text,
    Choice(Vec<&'static str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Continent,
    Country,
    Segment,
    TotalAddressableCustomers,
    PenetrationY1,
    PenetrationY2,
    PenetrationY3,
    SalesCycleMonths,
    GoToMarket,
    AverageSellingPrice,
    PricingModel,
    LegalSetup,
    Compliance,
    Localization,
    LaunchCampaign,
    ToolsIntegrations,
    OtherCosts,
    SalesAndMarketingPct,
    OpsSupportPct,
    FixedHeadcountCost,
}

impl FieldKey {
    pub const ALL: [FieldKey; 20] = [
        FieldKey::Continent,
        FieldKey::Country,
        FieldKey::Segment,
        FieldKey::TotalAddressableCustomers,
        FieldKey::PenetrationY1,
        FieldKey::PenetrationY2,
        FieldKey::PenetrationY3,
        FieldKey::SalesCycleMonths,
        FieldKey::GoToMarket,
        FieldKey::AverageSellingPrice,
        FieldKey::PricingModel,
        FieldKey::LegalSetup,
        FieldKey::Compliance,
        FieldKey::Localization,
        FieldKey::LaunchCampaign,
        FieldKey::ToolsIntegrations,
        FieldKey::OtherCosts,
        FieldKey::SalesAndMarketingPct,
        FieldKey::OpsSupportPct,
        FieldKey::FixedHeadcountCost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Continent => "Target Continent",
            FieldKey::Country => "Target Country",
            FieldKey::Segment => "Target Segment",
            FieldKey::TotalAddressableCustomers => "Total Addressable Customers",
            FieldKey::PenetrationY1 => "Market Penetration Year 1 (%)",
            FieldKey::PenetrationY2 => "Market Penetration Year 2 (%)",
            FieldKey::PenetrationY3 => "Market Penetration Year 3 (%)",
            FieldKey::SalesCycleMonths => "Sales Cycle (months)",
            FieldKey::GoToMarket => "Go-to-Market Type",
            FieldKey::AverageSellingPrice => "Average Annual Price per Customer (ASP)",
            FieldKey::PricingModel => "Pricing Model",
            FieldKey::LegalSetup => "Legal & entity setup",
            FieldKey::Compliance => "Compliance / certifications",
            FieldKey::Localization => "Localization",
            FieldKey::LaunchCampaign => "Launch campaign",
            FieldKey::ToolsIntegrations => "Tools & integrations",
            FieldKey::OtherCosts => "Other costs",
            FieldKey::SalesAndMarketingPct => "Sales & Marketing (% of revenue)",
            FieldKey::OpsSupportPct => "Operations / Support (% of revenue)",
            FieldKey::FixedHeadcountCost => "Fixed Headcount Costs (annual)",
        }
    }

    pub fn section(self) -> Section {
        match self {
            FieldKey::Continent
            | FieldKey::Country
            | FieldKey::Segment
            | FieldKey::TotalAddressableCustomers
            | FieldKey::PenetrationY1
            | FieldKey::PenetrationY2
            | FieldKey::PenetrationY3
            | FieldKey::SalesCycleMonths
            | FieldKey::GoToMarket => Section::Market,
            FieldKey::AverageSellingPrice | FieldKey::PricingModel => Section::Pricing,
            FieldKey::LegalSetup
            | FieldKey::Compliance
            | FieldKey::Localization
            | FieldKey::LaunchCampaign
            | FieldKey::ToolsIntegrations
            | FieldKey::OtherCosts => Section::EntryCosts,
            FieldKey::SalesAndMarketingPct
            | FieldKey::OpsSupportPct
            | FieldKey::FixedHeadcountCost => Section::OngoingCosts,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::Continent => FieldKind::Choice(Continent::labels()),
            FieldKey::Segment => FieldKind::Choice(Segment::labels()),
            FieldKey::GoToMarket => FieldKind::Choice(GoToMarket::labels()),
            FieldKey::PricingModel => FieldKind::Choice(PricingModel::labels()),
            FieldKey::Country => FieldKind::Text,
            _ => FieldKind::Number,
        }
    }

    /// Current value as raw text (numbers unformatted).
    pub fn value_text(self, inputs: &Inputs) -> String {
        match self {
            FieldKey::Continent => inputs.continent.label().to_string(),
            FieldKey::Country => inputs.country.clone(),
            FieldKey::Segment => inputs.segment.label().to_string(),
            FieldKey::GoToMarket => inputs.go_to_market.label().to_string(),
            FieldKey::PricingModel => inputs.pricing_model.label().to_string(),
            _ => self.number(inputs).map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Apply text entered for this field. Numbers never fail: anything
    /// unparseable becomes zero. Returns false only for an unknown choice.
    pub fn apply(self, inputs: &mut Inputs, raw: &str) -> bool {
        match self {
            FieldKey::Continent => set_choice(&mut inputs.continent, raw),
            FieldKey::Segment => set_choice(&mut inputs.segment, raw),
            FieldKey::GoToMarket => set_choice(&mut inputs.go_to_market, raw),
            FieldKey::PricingModel => set_choice(&mut inputs.pricing_model, raw),
            FieldKey::Country => {
                inputs.country = raw.trim().to_string();
                true
            }
            _ => match self.number_mut(inputs) {
                Some(slot) => {
                    *slot = parse_number(raw);
                    true
                }
                None => false,
            },
        }
    }

    /// Advance a choice field to its next option. No-op for other kinds.
    pub fn cycle(self, inputs: &mut Inputs) {
        match self {
            FieldKey::Continent => inputs.continent = inputs.continent.next(),
            FieldKey::Segment => inputs.segment = inputs.segment.next(),
            FieldKey::GoToMarket => inputs.go_to_market = inputs.go_to_market.next(),
            FieldKey::PricingModel => inputs.pricing_model = inputs.pricing_model.next(),
            _ => {}
        }
    }

    fn number(self, inputs: &Inputs) -> Option<f64> {
        let value = match self {
            FieldKey::TotalAddressableCustomers => inputs.total_addressable_customers,
            FieldKey::PenetrationY1 => inputs.penetration_y1,
            FieldKey::PenetrationY2 => inputs.penetration_y2,
            FieldKey::PenetrationY3 => inputs.penetration_y3,
            FieldKey::SalesCycleMonths => inputs.sales_cycle_months,
            FieldKey::AverageSellingPrice => inputs.average_selling_price,
            FieldKey::LegalSetup => inputs.entry_costs.legal_setup,
            FieldKey::Compliance => inputs.entry_costs.compliance,
            FieldKey::Localization => inputs.entry_costs.localization,
            FieldKey::LaunchCampaign => inputs.entry_costs.launch_campaign,
            FieldKey::ToolsIntegrations => inputs.entry_costs.tools_integrations,
            FieldKey::OtherCosts => inputs.entry_costs.other,
            FieldKey::SalesAndMarketingPct => inputs.sales_and_marketing_pct,
            FieldKey::OpsSupportPct => inputs.ops_support_pct,
            FieldKey::FixedHeadcountCost => inputs.fixed_headcount_cost,
            _ => return None,
        };
        Some(value)
    }

    fn number_mut(self, inputs: &mut Inputs) -> Option<&mut f64> {
        let slot = match self {
            FieldKey::TotalAddressableCustomers => &mut inputs.total_addressable_customers,
            FieldKey::PenetrationY1 => &mut inputs.penetration_y1,
            FieldKey::PenetrationY2 => &mut inputs.penetration_y2,
            FieldKey::PenetrationY3 => &mut inputs.penetration_y3,
            FieldKey::SalesCycleMonths => &mut inputs.sales_cycle_months,
            FieldKey::AverageSellingPrice => &mut inputs.average_selling_price,
            FieldKey::LegalSetup => &mut inputs.entry_costs.legal_setup,
            FieldKey::Compliance => &mut inputs.entry_costs.compliance,
            FieldKey::Localization => &mut inputs.entry_costs.localization,
            FieldKey::LaunchCampaign => &mut inputs.entry_costs.launch_campaign,
            FieldKey::ToolsIntegrations => &mut inputs.entry_costs.tools_integrations,
            FieldKey::OtherCosts => &mut inputs.entry_costs.other,
            FieldKey::SalesAndMarketingPct => &mut inputs.sales_and_marketing_pct,
            FieldKey::OpsSupportPct => &mut inputs.ops_support_pct,
            FieldKey::FixedHeadcountCost => &mut inputs.fixed_headcount_cost,
            _ => return None,
        };
        Some(slot)
    }
}

fn set_choice<C: Choice>(slot: &mut C, raw: &str) -> bool {
    match C::from_label(raw.trim()) {
        Some(choice) => {
            *slot = choice;
            true
        }
        None => false,
    }
}

/// Coerce form text to a number. Empty, unparseable or non-finite entries
/// become `0.0`. Digit-group separators (`'`, `’`, `_`) are ignored.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '_'))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
