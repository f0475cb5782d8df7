use serde::{Deserialize, Serialize};

/// An Onspring app as returned by the `/apps` listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct App {
    pub href: String,
    pub id: i64,
    pub name: String,
}
