// ABOUTME: Line classification, height policy and the capability traits a host implements
// ABOUTME: Everything here is pure or trait-only; no host state lives in this crate

pub mod capabilities;
pub mod classifier;
pub mod error;
pub mod height_policy;

pub use capabilities::{
    AdornmentLayer, HostView, MarkerGeometry, SelectionProvider, TextPropertiesProvider,
    TextViewLines, ViewLine,
};
pub use classifier::{LineClassifier, classify};
pub use error::{ClassifierError, HostError, SyncError};
pub use height_policy::HeightPolicy;
