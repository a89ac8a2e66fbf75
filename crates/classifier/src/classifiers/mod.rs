//! Concrete classifier plugins, one per source ecosystem or aspect.

pub mod generic;
pub mod governance;
pub mod integration;
pub mod network_security;
pub mod orchestration;

pub use generic::{GenericIntentClassifier, VM_LIFECYCLE_CATEGORY};
pub use governance::{GovernanceClassifier, GOVERNANCE_CATEGORY};
pub use integration::{IntegrationClassifier, EXTERNAL_API_CATEGORY, PLUGIN_CATEGORY};
pub use network_security::{NetworkSecurityClassifier, NETWORK_SECURITY_CATEGORY};
pub use orchestration::{OrchestrationClassifier, ORCHESTRATION_CATEGORY};
