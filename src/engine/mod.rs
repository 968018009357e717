pub mod decision;
pub mod projection;
pub mod types;

pub use projection::compute;
pub use types::{
    Breakeven, Choice, Confidence, Continent, Decision, EntryCosts, GoToMarket, Inputs,
    PricingModel, Results, Segment, YearResult,
};
