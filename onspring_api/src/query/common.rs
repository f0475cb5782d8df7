//! Shared query infrastructure: the [`Query`] trait.

use url::Url;

use crate::Error;

/// Trait implemented by all query builders. Provides URL serialization of the
/// builder's parameters and a validation hook run before a request is built.
pub trait Query {
    /// Returns the query parameters in the order they are sent.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Checks the parameters before they are sent. Accepts everything by default.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in pairs.iter() {
                serializer.append_pair(key, value);
            }
        }
        url
    }
}
