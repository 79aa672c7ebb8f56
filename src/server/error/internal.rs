use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enum column holds a value no variant matches.
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Unknown {field} value '{value}' stored in database")]
    UnknownEnumValue {
        /// Column the value was read from
        field: &'static str,
        /// The stored value
        value: String,
    },

    /// A stored JSON document does not match its expected shape.
    #[error("Malformed {document} document: {source}")]
    MalformedDocument {
        /// Which document failed to decode
        document: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// An amount in cents does not fit the stored integer range.
    #[error("Amount {0} cannot be stored in minor currency units")]
    AmountOutOfRange(String),
}
