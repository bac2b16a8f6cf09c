//! mindsignal-forum
//!
//! Forum API access: a blocking Reddit client, listing decoding, and the
//! post selection policy used by the classifier pages.

pub mod client;
pub mod error;
pub mod listing;
pub mod selection;
pub mod source;
