pub mod config;
pub mod model;
pub mod normalize;
pub mod repository;
pub mod service;
pub mod store;
pub mod time;

pub use config::AppConfig;
pub use model::stats::JournalStats;
pub use model::template::TripTemplate;
pub use model::trip::TripRecord;
pub use normalize::{
    normalize, normalize_lenient, ClockField, DayField, LenientTrip, NormalizeError, TripDraft,
};
pub use repository::{
    CsvJournalRepository, FileMirror, FileTemplateRepository, JournalMirror, JournalRepository,
};
pub use service::journal_service::{CommitOutcome, JournalService};
pub use store::{StoreError, TripFilter, TripLog};
pub use time::{format_clock, format_day, parse_clock, parse_day, travel_minutes};
