pub mod constants;
pub mod ledger;
pub mod music;
pub mod progress;
pub mod scheduler;
pub mod shimmer;

pub use constants::*;
pub use ledger::*;
pub use music::*;
pub use progress::*;
pub use scheduler::*;
pub use shimmer::*;
