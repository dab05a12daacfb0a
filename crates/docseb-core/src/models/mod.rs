pub mod conversation;
pub mod record;
