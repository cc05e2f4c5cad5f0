pub mod identity;
pub mod player;

pub use identity::CallerIdentity;
pub use player::{NewPlayer, Player};
