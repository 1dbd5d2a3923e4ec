//! Quote polling, session tracking and logging.

mod display;
mod logging;
mod poller;
mod session;

pub use display::{format_quote_line, DisplayPreferences, QuoteLine};
pub use logging::{setup_logging, LogFormat};
pub use poller::{PollUpdate, QuotePoller};
pub use session::SessionTracker;
