//! XMLTV processing: streaming conversion of existing guides and
//! composition of new ones from pipe-delimited listings

pub mod channels;
pub mod listing;
pub mod rewriter;

pub use channels::{ChannelClassificationQuery, ChannelRules, normalize_channel_id};
pub use listing::compose;
pub use rewriter::{ConversionStats, RewriteOptions, StreamState, StreamingRewriter, convert};
