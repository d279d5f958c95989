//! Handlers reachable without a session token.
//!
//! Ticket endpoints, account creation, login and service probes. Account
//! creation consults the staff gate when staff status is requested.

pub mod login;
pub mod system;
pub mod tickets;
pub mod users;
pub mod utils;

pub use login::login;
pub use system::{health, ping, root};
pub use tickets::{ticket_create, tickets_list};
pub use users::user_create;
