//! External mailing list sync.

mod http_email_list_provider;

pub use http_email_list_provider::{EmailListConfig, HttpEmailListProvider};
