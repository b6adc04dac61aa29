pub mod classifier;
pub mod conversation;
pub mod dispatcher;
pub mod messaging;
pub mod policy;
pub mod search;
pub mod showcase;
pub mod slots;
