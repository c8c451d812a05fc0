mod quote;
mod service;
mod snapshot;
mod yahoo;

pub use self::{
    quote::{Quote, QuoteError, QuoteProvider},
    service::{IndexService, TRACKED_INDICES, TrackedIndex},
    snapshot::{IndexSnapshot, format_change, format_price},
    yahoo::YahooQuoteProvider,
};
