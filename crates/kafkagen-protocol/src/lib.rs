//! kafkagen-protocol - Wire codec for generated protocol messages
//!
//! Generated code imports [`Encoder`], [`Decoder`], [`Message`] and
//! [`CodecError`] from this crate. The schemas under `schemas/` are compiled at
//! build time into [`messages`].
//!
//! # Example
//!
//! ```
//! use kafkagen_protocol::messages::echo::EchoRequest;
//! use kafkagen_protocol::{decode_from_slice, encode_to_vec};
//!
//! let request = EchoRequest {
//!     tags: vec!["a".into()],
//!     ..EchoRequest::default()
//! };
//! let bytes = encode_to_vec(&request, 1).unwrap();
//! let decoded: EchoRequest = decode_from_slice(&bytes, 1).unwrap();
//! assert_eq!(decoded, request);
//! ```

mod codec;

pub use codec::{CodecError, Decoder, Encoder, Message, decode_from_slice, encode_to_vec};

/// Messages generated from the bundled schemas.
pub mod messages {
    /// `RequestHeader` and `ResponseHeader`.
    #[allow(clippy::all)]
    pub mod headers {
        include!(concat!(env!("OUT_DIR"), "/headers_gen.rs"));
    }

    /// `EchoRequest` and `EchoResponse`.
    #[allow(clippy::all)]
    pub mod echo {
        include!(concat!(env!("OUT_DIR"), "/echo_gen.rs"));
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CodecError, Decoder, Encoder, Message, decode_from_slice, encode_to_vec};
}
