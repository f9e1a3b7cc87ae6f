pub mod helpers;
pub mod mock_transport;

pub use helpers::*;
pub use mock_transport::{MockReply, MockTransport, RecordedRequest};
