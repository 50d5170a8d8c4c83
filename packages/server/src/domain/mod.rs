//! Domain layer: entities, message model, and the capability traits the
//! usecase layer depends on.

mod connection;
mod delivery;
mod directory;
mod message;
mod target;

pub use connection::{Connection, ConnectionId, User, UserId};
pub use delivery::{DeliveryError, MessageDeliverer};
pub use directory::{ConnectionDirectory, DirectoryError};
pub use message::OutboundMessage;
pub use target::MessageTarget;

#[cfg(test)]
pub use delivery::MockMessageDeliverer;
#[cfg(test)]
pub use directory::MockConnectionDirectory;
