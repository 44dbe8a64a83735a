//! Route paths.

pub const POST_API_CHAT: &str = "/api/chat";
pub const POST_API_CREATE_CHECKOUT_SESSION: &str = "/api/create-checkout-session";
pub const GET_API_HEALTH: &str = "/api/health";
