//! Route handlers. Each one passes request input straight into a dangerous
//! sink; the CWE is named at the sink.

pub mod files;
pub mod ping;
pub mod users;
pub mod welcome;

pub use files::read_file;
pub use ping::ping_host;
pub use users::{get_user, search_users};
pub use welcome::welcome_user;
