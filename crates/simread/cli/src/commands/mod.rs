//! Command handlers

mod messages;
mod phonebook;

pub use messages::messages_command;
pub use phonebook::contacts_command;
