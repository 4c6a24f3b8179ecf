//! Helper macro for storage port error enums.
//!
//! Every storage port fails in one of two ways: the backend is unreachable,
//! or a query against it failed. [`define_store_error!`] generates that pair
//! for a named store, with `connection`/`query` constructors and the
//! conversion into the domain [`Error`](crate::domain::Error):
//!
//! - `Connection` becomes `service_unavailable` (503, message redacted at the HTTP edge).
//! - `Query` becomes `internal` (500, message redacted at the HTTP edge).

macro_rules! define_store_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $store:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store could not be reached.
            #[error("{store} connection failed: {message}", store = $store)]
            Connection { message: String },
            /// A query or mutation failed during execution.
            #[error("{store} query failed: {message}", store = $store)]
            Query { message: String },
        }

        impl $name {
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                match error {
                    $name::Connection { message } => $crate::domain::Error::service_unavailable(
                        format!("{} unavailable: {message}", $store),
                    ),
                    $name::Query { message } => {
                        $crate::domain::Error::internal(format!("{} error: {message}", $store))
                    }
                }
            }
        }
    };
}

pub(crate) use define_store_error;
