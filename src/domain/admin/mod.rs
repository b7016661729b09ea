//! Admin domain — privileged passthroughs (order refunds, event moderation,
//! user management).

pub mod client;
