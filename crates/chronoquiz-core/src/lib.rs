//! chronoquiz-core — Event model, scoring and quiz session state machine.
//!
//! This crate holds everything that decides how a guess-the-year quiz
//! behaves: parsing the event list, filtering and sampling questions,
//! partial-credit scoring, and the per-session state machine. Fetching the
//! data is left to `EventSource` implementers.

pub mod builder;
pub mod error;
pub mod filter;
pub mod guess;
pub mod loader;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod traits;

pub use error::{QuizError, SourceError};
pub use model::{format_year, Era, Event, EventPool, QuizConfig};
pub use session::{prepare_session, QuizSession, SessionState, Summary};
