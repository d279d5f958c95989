pub mod ticket;
pub mod user;

pub use ticket::{NewTicket, Ticket};
pub use user::{NewUser, User};
