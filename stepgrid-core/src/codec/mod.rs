//! Pattern sharing codec.
//!
//! ```text
//! PatternSnapshot --compress--> CompactPattern --encode--> token
//! token --decode--> CompactPattern --decompress--> PatternSnapshot --validate--> PatternSnapshot
//! ```
//!
//! Every inbound step reports failure as `None` after logging the reason.

pub mod compact;
pub mod defaults;
pub mod snapshot;
pub mod token;
pub mod validate;

pub use compact::{compress, decompress, pack_sequence, unpack_sequence, CompactPattern, CompactSample};
pub use snapshot::{serialize, PatternSnapshot, SampleSnapshot};
pub use token::{decode, encode, DecodeError};
pub use validate::{validate, ValidationError};
