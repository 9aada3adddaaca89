/// Liveness endpoint
pub mod health;
/// Router and request handlers
pub mod http;
/// Timezone lookup, parsing, and conversion
pub mod timezone;
