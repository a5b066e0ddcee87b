//! Shared identifiers, future aliases, and small containers used across the abacus crates.
//!
//! ```rust
//! use acommon::{CallId, GenerationOptions, MetadataMap, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let call = CallId::new("call_7");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("channel".to_string(), "cli".to_string());
//!
//! let options = GenerationOptions::default().with_temperature(0.0);
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(call.to_string(), "call_7");
//! assert_eq!(options.temperature, Some(0.0));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use acommon::BoxFuture;
    //!
    //! fn doubled<'a>(value: &'a f64) -> BoxFuture<'a, f64> {
    //!     Box::pin(async move { value * 2.0 })
    //! }
    //!
    //! let _future = doubled(&2.0);
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Metadata map and the identifier newtypes threaded through turns and tool calls.

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    macro_rules! string_id {
        ($(#[$meta:meta])* $name:ident) => {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }
        };
    }

    string_id!(
        /// Identifies one conversation across turns.
        SessionId
    );

    string_id!(
        /// Optional caller-supplied trace correlation value.
        TraceId
    );

    string_id!(
        /// Correlates a tool call request with its outcome.
        ///
        /// The id assigned by the model is carried unchanged through the middleware
        /// chain and back into the tool message sent to the provider.
        CallId
    );
}

pub mod model {
    //! Generation settings shared by request types.

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }
    }
}

pub mod registry {
    //! Name-keyed map that keeps registration order.
    //!
    //! ```rust
    //! use acommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("multiply".to_string(), 2_u32);
    //! registry.insert("add".to_string(), 1_u32);
    //!
    //! let keys: Vec<_> = registry.keys().cloned().collect();
    //! assert_eq!(keys, vec!["multiply".to_string(), "add".to_string()]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        order: Vec<K>,
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                order: Vec::new(),
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            let previous = self.items.insert(key.clone(), value);
            if previous.is_none() {
                self.order.push(key);
            }
            previous
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.order.iter()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.order.iter().filter_map(|key| self.items.get(key))
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use context::{CallId, MetadataMap, SessionId, TraceId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{CallId, GenerationOptions, Registry, SessionId, TraceId};

    #[test]
    fn id_newtypes_round_trip_strings() {
        let session = SessionId::new("session-1");
        let trace = TraceId::from("trace-1");
        let call = CallId::from("call_1".to_string());

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(trace.to_string(), "trace-1");
        assert_eq!(call.as_ref(), "call_1");
    }

    #[test]
    fn generation_options_builder_helpers_set_values() {
        let options = GenerationOptions::default()
            .with_temperature(0.3)
            .with_max_tokens(123);

        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(123));
    }

    #[test]
    fn registry_keeps_insertion_order_and_ignores_reinsert_position() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.insert("divide".to_string(), 1_u32);
        registry.insert("add".to_string(), 2_u32);
        let replaced = registry.insert("divide".to_string(), 3_u32);

        assert_eq!(replaced, Some(1));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains_key("add"));
        assert_eq!(registry.values().copied().collect::<Vec<_>>(), vec![3, 2]);
    }
}
